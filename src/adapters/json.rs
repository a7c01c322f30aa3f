//! JSON-file-backed stores: one snapshot file per record type under a base
//! path, read and rewritten whole on each save. Good enough for the CLI demo;
//! a real deployment would swap these for a database-backed implementation of
//! the same ports.

use crate::domain::model::{
    Event, EventId, Logistics, Participant, ParticipantId, Role,
};
use crate::domain::ports::{EventStore, LogisticsStore, ParticipantStore};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

fn read_snapshot<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = fs::read(path)?;
    if data.is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_slice(&data)?)
}

fn write_snapshot<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(records)?;
    fs::write(path, data)?;
    Ok(())
}

fn next_id(ids: impl Iterator<Item = u32>) -> u32 {
    ids.max().unwrap_or(0) + 1
}

/// The mutex serializes read-modify-write cycles within the process, so each
/// save lands whole.
#[derive(Clone)]
pub struct JsonEventStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonEventStore {
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            path: base_path.as_ref().join("events.json"),
            lock: Arc::new(Mutex::new(())),
        }
    }
}

#[async_trait]
impl EventStore for JsonEventStore {
    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>> {
        let _guard = self.lock.lock().await;
        let records: Vec<Event> = read_snapshot(&self.path)?;
        Ok(records.into_iter().find(|e| e.id == id))
    }

    async fn find_by_description(&self, description: &str) -> Result<Option<Event>> {
        let _guard = self.lock.lock().await;
        let records: Vec<Event> = read_snapshot(&self.path)?;
        Ok(records.into_iter().find(|e| e.description == description))
    }

    async fn find_by_start_date_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Event>> {
        let _guard = self.lock.lock().await;
        let records: Vec<Event> = read_snapshot(&self.path)?;
        Ok(records
            .into_iter()
            .filter(|e| e.start_date >= from && e.start_date <= to)
            .collect())
    }

    async fn find_by_participant(
        &self,
        last_name: &str,
        first_name: &str,
        role: Role,
    ) -> Result<Vec<Event>> {
        let _guard = self.lock.lock().await;
        let records: Vec<Event> = read_snapshot(&self.path)?;
        Ok(records
            .into_iter()
            .filter(|e| {
                e.participants.iter().any(|p| {
                    p.last_name == last_name && p.first_name == first_name && p.role == role
                })
            })
            .collect())
    }

    async fn save(&self, mut event: Event) -> Result<Event> {
        let _guard = self.lock.lock().await;
        let mut records: Vec<Event> = read_snapshot(&self.path)?;
        if event.id == 0 {
            event.id = next_id(records.iter().map(|e| e.id));
        }
        match records.iter_mut().find(|e| e.id == event.id) {
            Some(slot) => *slot = event.clone(),
            None => records.push(event.clone()),
        }
        write_snapshot(&self.path, &records)?;
        Ok(event)
    }
}

#[derive(Clone)]
pub struct JsonParticipantStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonParticipantStore {
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            path: base_path.as_ref().join("participants.json"),
            lock: Arc::new(Mutex::new(())),
        }
    }
}

#[async_trait]
impl ParticipantStore for JsonParticipantStore {
    async fn find_by_id(&self, id: ParticipantId) -> Result<Option<Participant>> {
        let _guard = self.lock.lock().await;
        let records: Vec<Participant> = read_snapshot(&self.path)?;
        Ok(records.into_iter().find(|p| p.id == id))
    }

    async fn save(&self, mut participant: Participant) -> Result<Participant> {
        let _guard = self.lock.lock().await;
        let mut records: Vec<Participant> = read_snapshot(&self.path)?;
        if participant.id == 0 {
            participant.id = next_id(records.iter().map(|p| p.id));
        }
        match records.iter_mut().find(|p| p.id == participant.id) {
            Some(slot) => *slot = participant.clone(),
            None => records.push(participant.clone()),
        }
        write_snapshot(&self.path, &records)?;
        Ok(participant)
    }
}

#[derive(Clone)]
pub struct JsonLogisticsStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonLogisticsStore {
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            path: base_path.as_ref().join("logistics.json"),
            lock: Arc::new(Mutex::new(())),
        }
    }
}

#[async_trait]
impl LogisticsStore for JsonLogisticsStore {
    async fn save(&self, mut logistics: Logistics) -> Result<Logistics> {
        let _guard = self.lock.lock().await;
        let mut records: Vec<Logistics> = read_snapshot(&self.path)?;
        if logistics.id == 0 {
            logistics.id = next_id(records.iter().map(|l| l.id));
        }
        match records.iter_mut().find(|l| l.id == logistics.id) {
            Some(slot) => *slot = logistics.clone(),
            None => records.push(logistics.clone()),
        }
        write_snapshot(&self.path, &records)?;
        Ok(logistics)
    }
}
