// Domain layer: models and ports only, no IO.

pub mod model;
pub mod ports;
