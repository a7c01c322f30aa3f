// Adapters layer: concrete store backends behind the domain ports.

pub mod json;
pub mod memory;
