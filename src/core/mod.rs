pub mod association;
pub mod costing;

pub use crate::domain::model::{Event, EventDraft, Logistics, Participant, ParticipantRef, Role};
pub use crate::domain::ports::{EventStore, LogisticsStore, ParticipantStore};
pub use crate::utils::error::Result;
pub use association::AssociationService;
pub use costing::{CostEngine, CostFilter};
