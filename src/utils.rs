use bson::oid::ObjectId;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::AppError,
    models::{NewWorkout, WorkoutFields},
};

/// Whether a candidate string is a structurally valid document id
/// (a 24-character hex ObjectId). Checked before any id-keyed operation so
/// malformed requests never reach the store.
pub fn is_valid_id(candidate: &str) -> bool {
    ObjectId::parse_str(candidate).is_ok()
}

pub fn parse_payload<T: DeserializeOwned>(body: Value) -> Result<T, AppError> {
    serde_json::from_value(body).map_err(|e| AppError::MalformedPayload(e.to_string()))
}

/// Checks that title, load and reps all carry a non-empty value. Empty means
/// missing, an empty string, or zero. Collects every empty field name, in
/// title, load, reps order, rather than stopping at the first.
pub fn validate_fields(payload: NewWorkout) -> Result<WorkoutFields, AppError> {
    let title = payload.title.filter(|t| !t.is_empty());
    let load = payload.load.filter(|v| *v != 0.0);
    let reps = payload.reps.filter(|v| *v != 0.0);

    let mut empty = Vec::new();
    if title.is_none() {
        empty.push("title");
    }
    if load.is_none() {
        empty.push("load");
    }
    if reps.is_none() {
        empty.push("reps");
    }

    match (title, load, reps) {
        (Some(title), Some(load), Some(reps)) => Ok(WorkoutFields { title, load, reps }),
        _ => Err(AppError::EmptyFields(empty)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::WorkoutPatch;

    #[test]
    fn test_valid_id() {
        assert!(is_valid_id("507f1f77bcf86cd799439011"));
        assert!(is_valid_id("ABCDEF0123456789abcdef01"));
    }

    #[test]
    fn test_invalid_id() {
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("not-a-valid-id"));
        assert!(!is_valid_id("507f1f77bcf86cd79943901"));
        assert!(!is_valid_id("507f1f77bcf86cd7994390111"));
        assert!(!is_valid_id("507f1f77bcf86cd79943901g"));
    }

    #[test]
    fn test_validate_complete() {
        let payload = NewWorkout {
            title: Some("Bench Press".to_string()),
            load: Some(100.0),
            reps: Some(10.0),
        };

        let fields = validate_fields(payload).unwrap();
        assert_eq!(fields.title, "Bench Press");
        assert_eq!(fields.load, 100.0);
        assert_eq!(fields.reps, 10.0);
    }

    #[test]
    fn test_validate_collects_all_empty_fields() {
        let err = validate_fields(NewWorkout::default()).unwrap_err();
        match err {
            AppError::EmptyFields(fields) => assert_eq!(fields, vec!["title", "load", "reps"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_empty_title() {
        let payload = NewWorkout {
            title: Some("".to_string()),
            load: Some(100.0),
            reps: Some(10.0),
        };

        match validate_fields(payload).unwrap_err() {
            AppError::EmptyFields(fields) => assert_eq!(fields, vec!["title"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_zero_is_empty() {
        let payload = NewWorkout {
            title: Some("Deadlift".to_string()),
            load: Some(0.0),
            reps: Some(0.0),
        };

        match validate_fields(payload).unwrap_err() {
            AppError::EmptyFields(fields) => assert_eq!(fields, vec!["load", "reps"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let payload: NewWorkout = parse_payload(json!({
            "title": "Squat",
            "load": 80,
            "reps": 5,
            "sets": 3
        }))
        .unwrap();

        assert_eq!(payload.title.as_deref(), Some("Squat"));
        assert_eq!(payload.load, Some(80.0));
        assert_eq!(payload.reps, Some(5.0));
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        let result: Result<NewWorkout, _> = parse_payload(json!({ "load": "heavy" }));
        assert!(matches!(result, Err(AppError::MalformedPayload(_))));
    }

    #[test]
    fn test_parse_patch_null_means_unchanged() {
        let patch: WorkoutPatch = parse_payload(json!({ "title": null, "load": 60 })).unwrap();

        assert!(patch.title.is_none());
        assert_eq!(patch.load, Some(60.0));
        assert!(patch.reps.is_none());
    }
}
