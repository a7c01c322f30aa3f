pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::SeedConfig;
pub use self::core::{AssociationService, CostEngine, CostFilter};
pub use domain::model::{Event, EventDraft, Logistics, Participant, ParticipantRef, Role};
pub use utils::error::{PlannerError, Result};
