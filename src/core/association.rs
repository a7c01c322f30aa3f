use crate::domain::model::{Event, EventDraft, Logistics, Participant, ParticipantId};
use crate::domain::ports::{EventStore, LogisticsStore, ParticipantStore};
use crate::utils::error::{PlannerError, Result};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Maintains the participant and logistics memberships owned by events,
/// resolving id-only references through the stores before anything is merged
/// into an owning collection.
pub struct AssociationService<E, P, L> {
    events: E,
    participants: P,
    logistics: L,
}

impl<E: EventStore, P: ParticipantStore, L: LogisticsStore> AssociationService<E, P, L> {
    pub fn new(events: E, participants: P, logistics: L) -> Self {
        Self {
            events,
            participants,
            logistics,
        }
    }

    /// Registers a new participant and returns the stored record, so
    /// store-assigned fields are visible to the caller.
    pub async fn add_participant(&self, participant: Participant) -> Result<Participant> {
        tracing::debug!(
            "Registering participant {} {}",
            participant.first_name,
            participant.last_name
        );
        self.participants.save(participant).await
    }

    /// Resolves `participant_id` and merges the full record into the event's
    /// membership set. Re-attaching an id already present never duplicates.
    /// An unresolvable id fails the call and the event is not persisted.
    pub async fn attach_participant(
        &self,
        mut event: Event,
        participant_id: ParticipantId,
    ) -> Result<Event> {
        let participant = self
            .participants
            .find_by_id(participant_id)
            .await?
            .ok_or(PlannerError::ParticipantNotFound { id: participant_id })?;

        event.insert_participant(participant);
        let saved = self.events.save(event).await?;
        tracing::debug!(
            "Attached participant {} to event '{}'",
            participant_id,
            saved.description
        );
        Ok(saved)
    }

    /// Resolves every id-only reference carried by the draft into a full
    /// record and persists the event with the resolved set. If any reference
    /// cannot be resolved the whole call aborts and nothing is persisted.
    pub async fn resolve_participants(&self, draft: EventDraft) -> Result<Event> {
        let mut resolved: Vec<Participant> = Vec::with_capacity(draft.participants.len());
        for reference in &draft.participants {
            let participant = self
                .participants
                .find_by_id(reference.id)
                .await?
                .ok_or(PlannerError::ParticipantNotFound { id: reference.id })?;
            if !resolved.iter().any(|p| p.id == participant.id) {
                resolved.push(participant);
            }
        }

        tracing::debug!(
            "Resolved {} participant reference(s) for event '{}'",
            resolved.len(),
            draft.description
        );

        self.events
            .save(Event {
                id: draft.id,
                description: draft.description,
                start_date: draft.start_date,
                end_date: draft.end_date,
                cost: draft.cost,
                participants: resolved,
                logistics: draft.logistics,
            })
            .await
    }

    /// Stores the logistics item and merges it into the set of the event
    /// matching `event_description` exactly, initializing the set on first
    /// use. Returns the stored item.
    pub async fn attach_logistics(
        &self,
        item: Logistics,
        event_description: &str,
    ) -> Result<Logistics> {
        let mut event = self
            .events
            .find_by_description(event_description)
            .await?
            .ok_or_else(|| PlannerError::EventNotFound {
                description: event_description.to_string(),
            })?;

        // Two independent saves; if the event save fails the stored item is
        // left orphaned. Atomicity is per record only.
        let stored = self.logistics.save(item).await?;
        event.insert_logistics(stored.clone());
        self.events.save(event).await?;

        tracing::debug!(
            "Attached logistics {} to event '{}'",
            stored.id,
            event_description
        );
        Ok(stored)
    }

    /// Union, without duplicates, of the logistics sets of all events whose
    /// start date lies in `[from, to]`. An empty union is reported as `None`
    /// rather than an empty list; callers depend on the distinction.
    pub async fn logistics_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Option<Vec<Logistics>>> {
        let events = self.events.find_by_start_date_between(from, to).await?;
        tracing::debug!("Found {} event(s) starting in {}..{}", events.len(), from, to);

        let mut seen = HashSet::new();
        let mut union = Vec::new();
        for event in events {
            for item in event.logistics.into_iter().flatten() {
                if seen.insert(item.id) {
                    union.push(item);
                }
            }
        }

        if union.is_empty() {
            Ok(None)
        } else {
            Ok(Some(union))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryEventStore, InMemoryLogisticsStore, InMemoryParticipantStore,
    };
    use crate::domain::model::{ParticipantRef, Role};
    use async_trait::async_trait;

    struct FailingEventStore;

    #[async_trait]
    impl EventStore for FailingEventStore {
        async fn find_by_id(&self, _id: u32) -> Result<Option<Event>> {
            Err(PlannerError::RepositoryError {
                message: "event store unavailable".to_string(),
            })
        }

        async fn find_by_description(&self, _description: &str) -> Result<Option<Event>> {
            Err(PlannerError::RepositoryError {
                message: "event store unavailable".to_string(),
            })
        }

        async fn find_by_start_date_between(
            &self,
            _from: NaiveDate,
            _to: NaiveDate,
        ) -> Result<Vec<Event>> {
            Err(PlannerError::RepositoryError {
                message: "event store unavailable".to_string(),
            })
        }

        async fn find_by_participant(
            &self,
            _last_name: &str,
            _first_name: &str,
            _role: Role,
        ) -> Result<Vec<Event>> {
            Err(PlannerError::RepositoryError {
                message: "event store unavailable".to_string(),
            })
        }

        async fn save(&self, _event: Event) -> Result<Event> {
            Err(PlannerError::RepositoryError {
                message: "event store unavailable".to_string(),
            })
        }
    }

    fn sample_event(id: u32, description: &str) -> Event {
        Event {
            id,
            description: description.to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 22).unwrap(),
            cost: 0.0,
            participants: Vec::new(),
            logistics: None,
        }
    }

    fn sample_participant(last: &str, first: &str, role: Role) -> Participant {
        Participant {
            id: 0,
            last_name: last.to_string(),
            first_name: first.to_string(),
            role,
        }
    }

    fn service() -> (
        AssociationService<InMemoryEventStore, InMemoryParticipantStore, InMemoryLogisticsStore>,
        InMemoryEventStore,
        InMemoryParticipantStore,
    ) {
        let events = InMemoryEventStore::new();
        let participants = InMemoryParticipantStore::new();
        let logistics = InMemoryLogisticsStore::new();
        let svc = AssociationService::new(events.clone(), participants.clone(), logistics);
        (svc, events, participants)
    }

    #[tokio::test]
    async fn add_participant_round_trips_through_the_store() {
        let (svc, _events, participants) = service();

        let stored = svc
            .add_participant(sample_participant("Doe", "John", Role::Organizer))
            .await
            .unwrap();

        assert_ne!(stored.id, 0);
        let found = participants.find_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(found, stored);
        assert_eq!(found.last_name, "Doe");
        assert_eq!(found.first_name, "John");
        assert_eq!(found.role, Role::Organizer);
    }

    #[tokio::test]
    async fn attach_participant_is_idempotent() {
        let (svc, events, _participants) = service();

        let stored = svc
            .add_participant(sample_participant("Doe", "John", Role::Organizer))
            .await
            .unwrap();
        let event = events.save(sample_event(0, "Annual Conference")).await.unwrap();

        let once = svc.attach_participant(event, stored.id).await.unwrap();
        let twice = svc.attach_participant(once, stored.id).await.unwrap();

        assert_eq!(twice.participants.len(), 1);
        assert!(twice.has_participant(stored.id));

        let persisted = events.find_by_id(twice.id).await.unwrap().unwrap();
        assert_eq!(persisted.participants.len(), 1);
    }

    #[tokio::test]
    async fn attach_participant_unknown_id_fails_without_persisting() {
        let (svc, events, _participants) = service();

        let event = events.save(sample_event(0, "Annual Conference")).await.unwrap();
        let event_id = event.id;

        let err = svc.attach_participant(event, 99).await.unwrap_err();
        assert!(matches!(err, PlannerError::ParticipantNotFound { id: 99 }));

        let persisted = events.find_by_id(event_id).await.unwrap().unwrap();
        assert!(persisted.participants.is_empty());
    }

    #[tokio::test]
    async fn resolve_participants_replaces_refs_with_full_records() {
        let (svc, events, _participants) = service();

        let doe = svc
            .add_participant(sample_participant("Doe", "John", Role::Organizer))
            .await
            .unwrap();
        let smith = svc
            .add_participant(sample_participant("Smith", "Anna", Role::Guest))
            .await
            .unwrap();

        let draft = EventDraft {
            id: 0,
            description: "Annual Conference".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 22).unwrap(),
            cost: 0.0,
            participants: vec![
                ParticipantRef { id: doe.id },
                ParticipantRef { id: smith.id },
                ParticipantRef { id: doe.id },
            ],
            logistics: None,
        };

        let event = svc.resolve_participants(draft).await.unwrap();

        assert_eq!(event.participants.len(), 2);
        assert!(event.has_participant(doe.id));
        assert!(event.has_participant(smith.id));
        assert!(event.participants.iter().any(|p| p.last_name == "Smith"));

        let persisted = events.find_by_id(event.id).await.unwrap().unwrap();
        assert_eq!(persisted, event);
    }

    #[tokio::test]
    async fn resolve_participants_aborts_entirely_on_missing_ref() {
        let (svc, events, _participants) = service();

        let doe = svc
            .add_participant(sample_participant("Doe", "John", Role::Organizer))
            .await
            .unwrap();

        let draft = EventDraft {
            id: 0,
            description: "Annual Conference".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 22).unwrap(),
            cost: 0.0,
            participants: vec![ParticipantRef { id: doe.id }, ParticipantRef { id: 404 }],
            logistics: None,
        };

        let err = svc.resolve_participants(draft).await.unwrap_err();
        assert!(matches!(err, PlannerError::ParticipantNotFound { id: 404 }));

        let persisted = events
            .find_by_description("Annual Conference")
            .await
            .unwrap();
        assert!(persisted.is_none());
    }

    #[tokio::test]
    async fn attach_logistics_initializes_the_set() {
        let (svc, events, _participants) = service();

        events.save(sample_event(0, "Annual Conference")).await.unwrap();

        let stored = svc
            .attach_logistics(
                Logistics {
                    id: 0,
                    description: "Projector".to_string(),
                    reserved: true,
                    unit_price: 200.0,
                    quantity: 3,
                },
                "Annual Conference",
            )
            .await
            .unwrap();

        assert_ne!(stored.id, 0);

        let persisted = events
            .find_by_description("Annual Conference")
            .await
            .unwrap()
            .unwrap();
        let set = persisted.logistics.expect("logistics set initialized");
        assert_eq!(set.len(), 1);
        assert_eq!(set[0], stored);
    }

    #[tokio::test]
    async fn attach_logistics_appends_to_existing_set() {
        let (svc, events, _participants) = service();

        let mut event = sample_event(0, "Annual Conference");
        event.insert_logistics(Logistics {
            id: 1,
            description: "Catering".to_string(),
            reserved: true,
            unit_price: 100.0,
            quantity: 5,
        });
        events.save(event).await.unwrap();

        svc.attach_logistics(
            Logistics {
                id: 0,
                description: "Projector".to_string(),
                reserved: true,
                unit_price: 200.0,
                quantity: 3,
            },
            "Annual Conference",
        )
        .await
        .unwrap();

        let persisted = events
            .find_by_description("Annual Conference")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(persisted.logistics.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn attach_logistics_unknown_event_fails() {
        let (svc, _events, _participants) = service();

        let err = svc
            .attach_logistics(
                Logistics {
                    id: 0,
                    description: "Projector".to_string(),
                    reserved: true,
                    unit_price: 200.0,
                    quantity: 3,
                },
                "No Such Event",
            )
            .await
            .unwrap_err();

        assert!(matches!(err, PlannerError::EventNotFound { ref description } if description == "No Such Event"));
    }

    #[tokio::test]
    async fn logistics_between_returns_deduplicated_union() {
        let (svc, events, _participants) = service();

        let mut may = sample_event(0, "May Meetup");
        may.insert_logistics(Logistics {
            id: 1,
            description: "Catering".to_string(),
            reserved: true,
            unit_price: 100.0,
            quantity: 5,
        });
        events.save(may).await.unwrap();

        let mut june = sample_event(0, "June Meetup");
        june.start_date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        june.end_date = NaiveDate::from_ymd_opt(2024, 6, 11).unwrap();
        june.insert_logistics(Logistics {
            id: 2,
            description: "Projector".to_string(),
            reserved: false,
            unit_price: 200.0,
            quantity: 1,
        });
        events.save(june).await.unwrap();

        let items = svc
            .logistics_between(
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            )
            .await
            .unwrap()
            .expect("union is non-empty");

        assert_eq!(items.len(), 2);
        let ids: Vec<u32> = items.iter().map(|l| l.id).collect();
        assert!(ids.contains(&1));
        assert!(ids.contains(&2));
    }

    #[tokio::test]
    async fn logistics_between_reports_empty_union_as_absent() {
        let (svc, events, _participants) = service();

        // Matching event with no logistics still yields the absent marker.
        events.save(sample_event(0, "Annual Conference")).await.unwrap();

        let result = svc
            .logistics_between(
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            )
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn store_failures_propagate_unchanged() {
        let participants = InMemoryParticipantStore::new();
        let stored = participants
            .save(sample_participant("Doe", "John", Role::Organizer))
            .await
            .unwrap();

        let svc = AssociationService::new(
            FailingEventStore,
            participants,
            InMemoryLogisticsStore::new(),
        );

        let err = svc
            .attach_participant(sample_event(1, "Annual Conference"), stored.id)
            .await
            .unwrap_err();

        assert!(matches!(err, PlannerError::RepositoryError { .. }));
    }
}
