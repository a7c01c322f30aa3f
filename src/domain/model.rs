use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type ParticipantId = u32;
pub type EventId = u32;
pub type LogisticsId = u32;

/// Function a participant holds relative to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Organizer,
    Invitee,
    Guest,
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "organizer" => Ok(Role::Organizer),
            "invitee" => Ok(Role::Invitee),
            "guest" => Ok(Role::Guest),
            other => Err(format!(
                "unknown role '{}', expected one of: organizer, invitee, guest",
                other
            )),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::Organizer => "organizer",
            Role::Invitee => "invitee",
            Role::Guest => "guest",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Store-assigned when 0.
    #[serde(default)]
    pub id: ParticipantId,
    pub last_name: String,
    pub first_name: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Logistics {
    /// Store-assigned when 0.
    #[serde(default)]
    pub id: LogisticsId,
    pub description: String,
    pub reserved: bool,
    pub unit_price: f64,
    pub quantity: u32,
}

impl Logistics {
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// A scheduled occurrence owning its participant and logistics memberships.
///
/// `logistics` stays `None` until the first item is attached, so callers can
/// tell an untouched set apart from an emptied one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: EventId,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub logistics: Option<Vec<Logistics>>,
}

impl Event {
    pub fn has_participant(&self, id: ParticipantId) -> bool {
        self.participants.iter().any(|p| p.id == id)
    }

    /// Membership is a set keyed by id: an existing entry is replaced with the
    /// incoming record, never duplicated.
    pub fn insert_participant(&mut self, participant: Participant) {
        match self.participants.iter_mut().find(|p| p.id == participant.id) {
            Some(slot) => *slot = participant,
            None => self.participants.push(participant),
        }
    }

    /// Initializes the logistics set on first use; same set semantics as
    /// `insert_participant`.
    pub fn insert_logistics(&mut self, item: Logistics) {
        let set = self.logistics.get_or_insert_with(Vec::new);
        match set.iter_mut().find(|l| l.id == item.id) {
            Some(slot) => *slot = item,
            None => set.push(item),
        }
    }

    /// Sum of `unit_price × quantity` over reserved items only. An absent or
    /// empty logistics set contributes zero.
    pub fn reserved_cost(&self) -> f64 {
        self.logistics
            .iter()
            .flatten()
            .filter(|l| l.reserved)
            .map(Logistics::line_total)
            .sum()
    }
}

/// Lightweight reference carrying only an id, accepted at the boundary where
/// callers hand in events whose participant entries are not fully populated.
/// Internal collections only ever hold resolved `Participant` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRef {
    pub id: ParticipantId,
}

/// Inbound form of an event whose participant entries carry only ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    #[serde(default)]
    pub id: EventId,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub participants: Vec<ParticipantRef>,
    #[serde(default)]
    pub logistics: Option<Vec<Logistics>>,
}
