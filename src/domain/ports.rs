use crate::domain::model::{Event, EventId, Logistics, Participant, ParticipantId, Role};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Lookup misses are `Ok(None)` / an empty vec; only actual store failures
/// surface as `Err`, so callers can tell "not found" from "store broken".
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>>;

    /// Exact match on the description, which acts as a secondary key.
    async fn find_by_description(&self, description: &str) -> Result<Option<Event>>;

    /// Events whose start date falls in `[from, to]`, bounds inclusive.
    async fn find_by_start_date_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Event>>;

    /// Events having at least one participant matching all three attributes
    /// exactly.
    async fn find_by_participant(
        &self,
        last_name: &str,
        first_name: &str,
        role: Role,
    ) -> Result<Vec<Event>>;

    /// Upsert by id; assigns an id when the incoming one is 0. Atomic for the
    /// single record.
    async fn save(&self, event: Event) -> Result<Event>;
}

#[async_trait]
pub trait ParticipantStore: Send + Sync {
    async fn find_by_id(&self, id: ParticipantId) -> Result<Option<Participant>>;

    async fn save(&self, participant: Participant) -> Result<Participant>;
}

#[async_trait]
pub trait LogisticsStore: Send + Sync {
    async fn save(&self, logistics: Logistics) -> Result<Logistics>;
}
