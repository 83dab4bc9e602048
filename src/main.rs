use brand_catalogue::app::open_local_catalogue;
use brand_catalogue::config::cli::parse_model_arg;
use brand_catalogue::config::toml_config::LogFormat;
use brand_catalogue::core::render::{BrandListView, DetailsView};
use brand_catalogue::utils::error::{CatalogueError, ErrorSeverity};
use brand_catalogue::utils::logger;
use brand_catalogue::{
    CatalogueController, CliConfig, Command, Confirmation, DeleteOutcome, FormMode, LocalStorage,
    SubmitOutcome,
};
use clap::Parser;

type Controller = CatalogueController<LocalStorage>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    match settings.log_format {
        LogFormat::Compact => logger::init_cli_logger(settings.verbose),
        LogFormat::Json => logger::init_json_logger(settings.verbose),
    }
    tracing::debug!("Resolved settings: {:?}", settings);

    let mut controller = match open_local_catalogue(&settings) {
        Ok(controller) => controller,
        Err(e) => {
            tracing::error!("❌ Failed to open catalogue: {}", e);
            exit_with(&e)
        }
    };
    controller.init().await;

    let exit_code = run(&mut controller, cli.command, cli.json).await?;
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

fn exit_with(e: &CatalogueError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 3,
        ErrorSeverity::Critical => 4,
    };
    std::process::exit(exit_code);
}

async fn run(controller: &mut Controller, command: Command, json: bool) -> anyhow::Result<i32> {
    match command {
        Command::List { search } => {
            if let Some(term) = search {
                controller.handle_search(&term);
            }
            print_brand_list(&controller.view().brand_list, json)?;
            Ok(0)
        }
        Command::Show { brand_id } => {
            if !controller.set_active_brand(&brand_id) {
                eprintln!("❌ Brand '{}' not found", brand_id);
                return Ok(1);
            }
            print_details(&controller.view().details, json)?;
            Ok(0)
        }
        Command::AddBrand { name, logo, models } => {
            controller.open_brand_modal(None, FormMode::Create);
            if let Some(form) = controller.modal_form_mut() {
                form.brand_name = name;
                form.brand_logo = logo;
                form.models = models.iter().map(|arg| parse_model_arg(arg)).collect();
            }
            Ok(report_submit(controller.submit_modal().await))
        }
        Command::EditBrand {
            brand_id,
            name,
            logo,
            models,
        } => {
            if !controller.open_brand_modal(Some(&brand_id), FormMode::Edit) {
                eprintln!("❌ Brand '{}' not found", brand_id);
                return Ok(1);
            }
            if let Some(form) = controller.modal_form_mut() {
                if let Some(name) = name {
                    form.brand_name = name;
                }
                if let Some(logo) = logo {
                    form.brand_logo = logo;
                }
                if !models.is_empty() {
                    form.models = models.iter().map(|arg| parse_model_arg(arg)).collect();
                }
            }
            Ok(report_submit(controller.submit_modal().await))
        }
        Command::DeleteBrand { brand_id, yes } => {
            let Some(prompt) = controller.brand_delete_prompt(&brand_id) else {
                eprintln!("❌ Brand '{}' not found", brand_id);
                return Ok(1);
            };
            let outcome = controller
                .handle_brand_delete(&brand_id, Confirmation::from(yes))
                .await;
            Ok(report_delete(outcome, &prompt))
        }
        Command::AddModel {
            brand_id,
            name,
            seats,
            image,
        } => {
            if !controller.open_model_modal(&brand_id, None, FormMode::Create) {
                eprintln!("❌ Brand '{}' not found", brand_id);
                return Ok(1);
            }
            if let Some(row) = controller
                .modal_form_mut()
                .and_then(|form| form.models.first_mut())
            {
                row.name = name;
                row.seats = seats;
                row.interior_image = image;
            }
            Ok(report_submit(controller.submit_modal().await))
        }
        Command::EditModel {
            brand_id,
            model_id,
            name,
            seats,
            image,
        } => {
            if !controller.open_model_modal(&brand_id, Some(&model_id), FormMode::Edit) {
                eprintln!("❌ Model '{}' of brand '{}' not found", model_id, brand_id);
                return Ok(1);
            }
            if let Some(row) = controller
                .modal_form_mut()
                .and_then(|form| form.models.first_mut())
            {
                if let Some(name) = name {
                    row.name = name;
                }
                if let Some(seats) = seats {
                    row.seats = seats;
                }
                if let Some(image) = image {
                    row.interior_image = image;
                }
            }
            Ok(report_submit(controller.submit_modal().await))
        }
        Command::DeleteModel {
            brand_id,
            model_id,
            yes,
        } => {
            let Some(prompt) = controller.model_delete_prompt(&brand_id, &model_id) else {
                eprintln!("❌ Brand '{}' not found", brand_id);
                return Ok(1);
            };
            let outcome = controller
                .handle_model_delete(&brand_id, &model_id, Confirmation::from(yes))
                .await;
            Ok(report_delete(outcome, &prompt))
        }
        Command::Seed => {
            println!(
                "✅ Catalogue holds {} brands",
                controller.state().brands.len()
            );
            Ok(0)
        }
        Command::Reset { yes } => {
            if !yes {
                eprintln!("Erase the whole catalogue? Re-run with --yes to confirm.");
                return Ok(1);
            }
            if let Err(e) = controller.store().clear_all().await {
                tracing::error!("❌ Failed to clear catalogue: {}", e);
                eprintln!("❌ {}", e.user_friendly_message());
                return Ok(1);
            }
            println!("✅ Catalogue cleared");
            Ok(0)
        }
    }
}

fn report_submit(outcome: SubmitOutcome) -> i32 {
    match outcome {
        SubmitOutcome::Saved { brand_id, model_id } => {
            match model_id {
                Some(model_id) => println!("✅ Saved model {} under brand {}", model_id, brand_id),
                None => println!("✅ Saved brand {}", brand_id),
            }
            0
        }
        SubmitOutcome::Rejected { message } | SubmitOutcome::Failed { message } => {
            eprintln!("❌ {}", message);
            1
        }
        SubmitOutcome::Ignored => {
            eprintln!("❌ Nothing was saved");
            1
        }
    }
}

fn report_delete(outcome: DeleteOutcome, prompt: &str) -> i32 {
    match outcome {
        DeleteOutcome::Deleted => {
            println!("✅ Deleted");
            0
        }
        DeleteOutcome::Cancelled => {
            eprintln!("{} Re-run with --yes to confirm.", prompt);
            1
        }
        DeleteOutcome::NotFound => {
            eprintln!("❌ Nothing to delete");
            1
        }
        DeleteOutcome::Failed { message } => {
            eprintln!("❌ {}", message);
            1
        }
    }
}

fn print_brand_list(view: &BrandListView, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }
    match view {
        BrandListView::Empty { message } => println!("{}", message),
        BrandListView::Items { items } => {
            for item in items {
                let marker = if item.is_active { "*" } else { " " };
                println!("{} {}  ({})", marker, item.name, item.id);
            }
        }
    }
    Ok(())
}

fn print_details(view: &DetailsView, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }
    match view {
        DetailsView::Empty => println!("No brand selected."),
        DetailsView::Brand {
            id,
            name,
            logo_url,
            model_count_label,
            models,
            empty_message,
            ..
        } => {
            println!("{}  ({})", name, id);
            println!("logo: {}", logo_url);
            println!("{}", model_count_label);
            if let Some(message) = empty_message {
                println!("{}", message);
            }
            for model in models {
                println!(
                    "  - {}  ({}), {}, {}",
                    model.name, model.id, model.seat_label, model.interior_image
                );
            }
        }
    }
    Ok(())
}
