use crate::domain::model::Role;
use crate::domain::ports::EventStore;
use crate::utils::error::Result;

/// Participant attributes selecting the events whose costs are recomputed.
/// All three are matched exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostFilter {
    pub last_name: String,
    pub first_name: String,
    pub role: Role,
}

impl CostFilter {
    pub fn new(last_name: impl Into<String>, first_name: impl Into<String>, role: Role) -> Self {
        Self {
            last_name: last_name.into(),
            first_name: first_name.into(),
            role,
        }
    }
}

/// Recomputes the derived cost of every event linked to a matching
/// participant. Cost is a batch-derived value: it is only guaranteed
/// consistent with the logistics sets immediately after a run.
pub struct CostEngine<E> {
    events: E,
}

impl<E: EventStore> CostEngine<E> {
    pub fn new(events: E) -> Self {
        Self { events }
    }

    /// The only observable effect is the persisted cost updates.
    pub async fn recompute_costs(&self, filter: &CostFilter) -> Result<()> {
        let events = self
            .events
            .find_by_participant(&filter.last_name, &filter.first_name, filter.role)
            .await?;

        tracing::debug!(
            "Recomputing costs for {} event(s) matching {} {} ({})",
            events.len(),
            filter.first_name,
            filter.last_name,
            filter.role
        );

        let mut updated = 0usize;
        for mut event in events {
            event.cost = event.reserved_cost();
            tracing::info!("Event '{}' cost set to {}", event.description, event.cost);
            self.events.save(event).await?;
            updated += 1;
        }

        tracing::debug!("Recomputed {} event cost(s)", updated);
        Ok(())
    }
}
