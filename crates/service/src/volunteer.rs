use rand::RngCore;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ServiceError;

pub const EXPERIENCE_WEIGHT: f64 = 0.6;
pub const AVAILABILITY_WEIGHT: f64 = 0.4;

/// Identifiers are drawn from 48 random bits.
pub const ID_MASK: u64 = (1 << 48) - 1;

const REQUIRED_FIELDS: [&str; 3] = ["name", "experienceYears", "availabilityScore"];

/// A volunteer record as stored and returned over HTTP.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Volunteer {
    pub id: u64,
    pub name: String,
    pub experience_years: f64,
    pub availability_score: f64,
    pub priority: f64,
}

impl Volunteer {
    pub fn new(id: u64, input: NewVolunteer) -> Self {
        let priority = priority_for(input.experience_years, input.availability_score);
        Self {
            id,
            name: input.name,
            experience_years: input.experience_years,
            availability_score: input.availability_score,
            priority,
        }
    }
}

pub fn priority_for(experience_years: f64, availability_score: f64) -> f64 {
    (experience_years * EXPERIENCE_WEIGHT) + (availability_score * AVAILABILITY_WEIGHT)
}

/// Validated enqueue input.
#[derive(Clone, Debug, PartialEq)]
pub struct NewVolunteer {
    pub name: String,
    pub experience_years: f64,
    pub availability_score: f64,
}

impl NewVolunteer {
    /// Presence is checked before types so a partial body always reports
    /// the missing-field error. Numbers may arrive as JSON numbers or as
    /// numeric strings.
    pub fn from_json(payload: &Value) -> Result<Self, ServiceError> {
        let obj = payload.as_object().ok_or_else(ServiceError::missing_field)?;
        if !REQUIRED_FIELDS.iter().all(|k| obj.contains_key(*k)) {
            return Err(ServiceError::missing_field());
        }

        let name = match &obj["name"] {
            Value::String(s) => s.clone(),
            _ => return Err(ServiceError::Validation("name must be a string".into())),
        };
        Ok(Self {
            name,
            experience_years: parse_number("experienceYears", &obj["experienceYears"])?,
            availability_score: parse_number("availabilityScore", &obj["availabilityScore"])?,
        })
    }
}

fn parse_number(field: &str, value: &Value) -> Result<f64, ServiceError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(ServiceError::Validation(format!("{field} must be a number"))),
    }
}

/// The persisted document: both lists plus any foreign top-level keys,
/// which are carried through untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Store {
    #[serde(default)]
    pub queued_volunteers: Vec<Volunteer>,
    #[serde(default)]
    pub assigned_volunteers: Vec<Volunteer>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Store {
    pub fn contains_id(&self, id: u64) -> bool {
        self.queued_volunteers
            .iter()
            .chain(self.assigned_volunteers.iter())
            .any(|v| v.id == id)
    }

    /// Draw a random id not used by any record in either list.
    pub fn fresh_id<R: RngCore>(&self, rng: &mut R) -> u64 {
        loop {
            let id = rng.next_u64() & ID_MASK;
            if !self.contains_id(id) {
                return id;
            }
        }
    }

    /// Create a volunteer with a fresh id and append it to the queue.
    pub fn enqueue<R: RngCore>(&mut self, input: NewVolunteer, rng: &mut R) -> Volunteer {
        let volunteer = Volunteer::new(self.fresh_id(rng), input);
        self.queued_volunteers.push(volunteer.clone());
        volunteer
    }

    /// Index of the highest-priority queued volunteer; the earliest one wins ties.
    pub fn highest_priority_index(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, v) in self.queued_volunteers.iter().enumerate() {
            if best.map_or(true, |(_, p)| v.priority > p) {
                best = Some((idx, v.priority));
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Move the highest-priority volunteer to the front of the assigned list.
    pub fn assign_next(&mut self) -> Option<Volunteer> {
        let idx = self.highest_priority_index()?;
        let volunteer = self.queued_volunteers.remove(idx);
        self.assigned_volunteers.insert(0, volunteer.clone());
        Some(volunteer)
    }
}
