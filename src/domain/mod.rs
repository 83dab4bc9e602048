// Domain layer: catalogue records and the ports the core depends on.

pub mod model;
pub mod ports;
