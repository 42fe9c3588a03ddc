// Domain layer: request/result models and the calculation port.

pub mod model;
pub mod ports;
