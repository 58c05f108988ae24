// Domain layer: menu, pricing and event models plus the ports the pipeline talks through.

pub mod model;
pub mod ports;
