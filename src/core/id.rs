use crate::domain::ports::IdGenerator;
use chrono::Utc;

const RANDOM_LEN: usize = 6;

/// Generates ids shaped like `brand-lq2x9c1k-4f0a9z`: prefix, base36 epoch
/// millis, then six random base36 characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampIdGenerator;

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&self, prefix: &str) -> String {
        let millis = Utc::now().timestamp_millis().max(0) as u128;
        let random = uuid::Uuid::new_v4().as_u128();
        let mut suffix = to_base36(random);
        suffix.truncate(RANDOM_LEN);
        format!("{}-{}-{}", prefix, to_base36(millis), suffix)
    }
}

fn to_base36(mut value: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
