use crate::core::association::AssociationService;
use crate::domain::model::{Event, Logistics, Participant, Role};
use crate::domain::ports::{EventStore, LogisticsStore, ParticipantStore};
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Demo/bootstrap data loaded from a TOML document. Dates are quoted strings
/// in `YYYY-MM-DD` form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default)]
    pub events: Vec<EventSeed>,
    #[serde(default)]
    pub participants: Vec<ParticipantSeed>,
    #[serde(default)]
    pub logistics: Vec<LogisticsSeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSeed {
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantSeed {
    pub last_name: String,
    pub first_name: String,
    pub role: Role,
    /// Descriptions of the events this participant is attached to.
    #[serde(default)]
    pub events: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticsSeed {
    pub description: String,
    pub reserved: bool,
    pub unit_price: f64,
    pub quantity: u32,
    /// Description of the owning event.
    pub event: String,
}

impl SeedConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlannerError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| PlannerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Events are created directly through the store (event creation is
    /// external to the core); participants and logistics go through the
    /// association service so seeding exercises the same paths as live
    /// callers.
    pub async fn apply<E, P, L>(
        &self,
        events: &E,
        service: &AssociationService<E, P, L>,
    ) -> Result<()>
    where
        E: EventStore,
        P: ParticipantStore,
        L: LogisticsStore,
    {
        for seed in &self.events {
            events
                .save(Event {
                    id: 0,
                    description: seed.description.clone(),
                    start_date: seed.start_date,
                    end_date: seed.end_date,
                    cost: 0.0,
                    participants: Vec::new(),
                    logistics: None,
                })
                .await?;
        }

        for seed in &self.participants {
            let stored = service
                .add_participant(Participant {
                    id: 0,
                    last_name: seed.last_name.clone(),
                    first_name: seed.first_name.clone(),
                    role: seed.role,
                })
                .await?;

            for description in &seed.events {
                let event = events
                    .find_by_description(description)
                    .await?
                    .ok_or_else(|| PlannerError::EventNotFound {
                        description: description.clone(),
                    })?;
                service.attach_participant(event, stored.id).await?;
            }
        }

        for seed in &self.logistics {
            service
                .attach_logistics(
                    Logistics {
                        id: 0,
                        description: seed.description.clone(),
                        reserved: seed.reserved,
                        unit_price: seed.unit_price,
                        quantity: seed.quantity,
                    },
                    &seed.event,
                )
                .await?;
        }

        tracing::info!(
            "Seed applied: {} event(s), {} participant(s), {} logistics item(s)",
            self.events.len(),
            self.participants.len(),
            self.logistics.len()
        );
        Ok(())
    }
}

impl Validate for SeedConfig {
    fn validate(&self) -> Result<()> {
        for (i, event) in self.events.iter().enumerate() {
            let field = format!("events[{}]", i);
            validation::validate_non_empty_string(&field, &event.description)?;
            validation::validate_date_order(&field, event.start_date, event.end_date)?;
        }

        for (i, participant) in self.participants.iter().enumerate() {
            let field = format!("participants[{}]", i);
            validation::validate_non_empty_string(&field, &participant.last_name)?;
            validation::validate_non_empty_string(&field, &participant.first_name)?;
            for description in &participant.events {
                validation::validate_non_empty_string(&field, description)?;
            }
        }

        for (i, item) in self.logistics.iter().enumerate() {
            let field = format!("logistics[{}]", i);
            validation::validate_non_empty_string(&field, &item.description)?;
            validation::validate_non_empty_string(&field, &item.event)?;
            validation::validate_non_negative(&field, item.unit_price)?;
        }

        Ok(())
    }
}
