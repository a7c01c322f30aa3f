// Domain layer: record types and the repository ports the services consume.

pub mod model;
pub mod ports;
