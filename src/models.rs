use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted workout as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub load: f64,
    pub reps: f64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Raw creation payload. Every field is optional so validation can report
/// all empty fields at once instead of failing on the first decode error.
/// Unknown keys are dropped during deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewWorkout {
    pub title: Option<String>,
    pub load: Option<f64>,
    pub reps: Option<f64>,
}

/// Creation payload that passed the emptiness check.
#[derive(Debug)]
pub struct WorkoutFields {
    pub title: String,
    pub load: f64,
    pub reps: f64,
}

/// Field-by-field patch for updates. `None` means leave the stored value
/// unchanged; unrecognized keys never pass through.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WorkoutPatch {
    pub title: Option<String>,
    pub load: Option<f64>,
    pub reps: Option<f64>,
}
