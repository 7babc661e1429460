// Domain layer: interval model, entities and ports. No I/O lives here.

pub mod interval;
pub mod model;
pub mod ports;
