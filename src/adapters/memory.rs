use crate::domain::model::{
    Event, EventId, Logistics, LogisticsId, Participant, ParticipantId, Role,
};
use crate::domain::ports::{EventStore, LogisticsStore, ParticipantStore};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

fn next_id<'a>(keys: impl Iterator<Item = &'a u32>) -> u32 {
    keys.copied().max().unwrap_or(0) + 1
}

/// Clone-shareable in-memory store; every clone sees the same records.
#[derive(Clone, Default)]
pub struct InMemoryEventStore {
    records: Arc<Mutex<HashMap<EventId, Event>>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>> {
        let records = self.records.lock().await;
        Ok(records.get(&id).cloned())
    }

    async fn find_by_description(&self, description: &str) -> Result<Option<Event>> {
        let records = self.records.lock().await;
        Ok(records
            .values()
            .find(|e| e.description == description)
            .cloned())
    }

    async fn find_by_start_date_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Event>> {
        let records = self.records.lock().await;
        let mut hits: Vec<Event> = records
            .values()
            .filter(|e| e.start_date >= from && e.start_date <= to)
            .cloned()
            .collect();
        hits.sort_by_key(|e| e.id);
        Ok(hits)
    }

    async fn find_by_participant(
        &self,
        last_name: &str,
        first_name: &str,
        role: Role,
    ) -> Result<Vec<Event>> {
        let records = self.records.lock().await;
        let mut hits: Vec<Event> = records
            .values()
            .filter(|e| {
                e.participants.iter().any(|p| {
                    p.last_name == last_name && p.first_name == first_name && p.role == role
                })
            })
            .cloned()
            .collect();
        hits.sort_by_key(|e| e.id);
        Ok(hits)
    }

    async fn save(&self, mut event: Event) -> Result<Event> {
        let mut records = self.records.lock().await;
        if event.id == 0 {
            event.id = next_id(records.keys());
        }
        records.insert(event.id, event.clone());
        Ok(event)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryParticipantStore {
    records: Arc<Mutex<HashMap<ParticipantId, Participant>>>,
}

impl InMemoryParticipantStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParticipantStore for InMemoryParticipantStore {
    async fn find_by_id(&self, id: ParticipantId) -> Result<Option<Participant>> {
        let records = self.records.lock().await;
        Ok(records.get(&id).cloned())
    }

    async fn save(&self, mut participant: Participant) -> Result<Participant> {
        let mut records = self.records.lock().await;
        if participant.id == 0 {
            participant.id = next_id(records.keys());
        }
        records.insert(participant.id, participant.clone());
        Ok(participant)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryLogisticsStore {
    records: Arc<Mutex<HashMap<LogisticsId, Logistics>>>,
}

impl InMemoryLogisticsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: LogisticsId) -> Option<Logistics> {
        let records = self.records.lock().await;
        records.get(&id).cloned()
    }
}

#[async_trait]
impl LogisticsStore for InMemoryLogisticsStore {
    async fn save(&self, mut logistics: Logistics) -> Result<Logistics> {
        let mut records = self.records.lock().await;
        if logistics.id == 0 {
            logistics.id = next_id(records.keys());
        }
        records.insert(logistics.id, logistics.clone());
        Ok(logistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(description: &str, start: NaiveDate) -> Event {
        Event {
            id: 0,
            description: description.to_string(),
            start_date: start,
            end_date: start,
            cost: 0.0,
            participants: Vec::new(),
            logistics: None,
        }
    }

    #[tokio::test]
    async fn save_assigns_sequential_ids() {
        let store = InMemoryEventStore::new();
        let d = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();

        let first = store.save(event("First", d)).await.unwrap();
        let second = store.save(event("Second", d)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn save_keeps_explicit_ids_and_upserts() {
        let store = InMemoryEventStore::new();
        let d = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();

        let mut e = event("First", d);
        e.id = 10;
        store.save(e.clone()).await.unwrap();

        e.cost = 42.0;
        store.save(e).await.unwrap();

        let found = store.find_by_id(10).await.unwrap().unwrap();
        assert_eq!(found.cost, 42.0);
    }

    #[tokio::test]
    async fn date_range_bounds_are_inclusive() {
        let store = InMemoryEventStore::new();
        let from = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();

        store.save(event("On lower bound", from)).await.unwrap();
        store.save(event("On upper bound", to)).await.unwrap();
        store
            .save(event(
                "Outside",
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            ))
            .await
            .unwrap();

        let hits = store.find_by_start_date_between(from, to).await.unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn clones_share_the_same_records() {
        let store = InMemoryParticipantStore::new();
        let clone = store.clone();

        let stored = store
            .save(Participant {
                id: 0,
                last_name: "Doe".to_string(),
                first_name: "John".to_string(),
                role: Role::Organizer,
            })
            .await
            .unwrap();

        let found = clone.find_by_id(stored.id).await.unwrap();
        assert_eq!(found, Some(stored));
    }
}
