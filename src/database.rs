//! # MongoDB
//!
//! Document store holding the workout collection.
//!
//! Handlers talk to [`WorkoutStore`] rather than the driver so the request
//! path stays decoupled from any specific client library. [`MongoStore`] is
//! the real implementation; [`MemoryStore`] backs the integration tests.

use std::sync::Mutex;

use async_trait::async_trait;
use bson::{DateTime, doc, oid::ObjectId};
use chrono::{SubsecRound, Utc};
use futures::TryStreamExt;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::models::{Workout, WorkoutFields, WorkoutPatch};

const COLLECTION: &str = "workouts";
const DEFAULT_DATABASE: &str = "workouts";

#[derive(Error, Debug)]
#[error("{0}")]
pub struct StoreError(String);

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        Self(err.to_string())
    }
}

#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// All workouts, newest first.
    async fn find_all(&self) -> Result<Vec<Workout>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Workout>, StoreError>;

    /// Persists a new workout, assigning its id and timestamps.
    async fn insert(&self, fields: WorkoutFields) -> Result<Workout, StoreError>;

    /// Removes a workout, returning its last state.
    async fn delete_by_id(&self, id: &str) -> Result<Option<Workout>, StoreError>;

    /// Merges the supplied fields into a workout and bumps `updatedAt`.
    /// Returns the pre-update state, not the merged result.
    async fn update_by_id(
        &self,
        id: &str,
        patch: WorkoutPatch,
    ) -> Result<Option<Workout>, StoreError>;
}

/// Workout as stored in MongoDB. Timestamps are native BSON datetimes so the
/// store can sort on them; millisecond precision.
#[derive(Debug, Serialize, Deserialize)]
struct WorkoutDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    load: f64,
    reps: f64,
    #[serde(
        rename = "createdAt",
        with = "bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    created_at: chrono::DateTime<Utc>,
    #[serde(
        rename = "updatedAt",
        with = "bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    updated_at: chrono::DateTime<Utc>,
}

impl From<WorkoutDocument> for Workout {
    fn from(document: WorkoutDocument) -> Self {
        Self {
            id: document.id.to_hex(),
            title: document.title,
            load: document.load,
            reps: document.reps,
            created_at: document.created_at,
            updated_at: document.updated_at,
        }
    }
}

pub struct MongoStore {
    collection: Collection<WorkoutDocument>,
}

impl MongoStore {
    /// Connects and pings the deployment. An unreachable store is fatal at
    /// startup, nowhere else.
    pub async fn connect(uri: &str) -> Self {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| warn!("Invalid MONGO_URI: {e}"))
            .expect("Database misconfigured!");

        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| warn!("Failed to reach MongoDB: {e}"))
            .expect("Database unreachable!");

        Self {
            collection: database.collection(COLLECTION),
        }
    }
}

#[async_trait]
impl WorkoutStore for MongoStore {
    async fn find_all(&self) -> Result<Vec<Workout>, StoreError> {
        let documents: Vec<WorkoutDocument> = self
            .collection
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;

        Ok(documents.into_iter().map(Workout::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Workout>, StoreError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let document = self.collection.find_one(doc! { "_id": oid }).await?;

        Ok(document.map(Workout::from))
    }

    async fn insert(&self, fields: WorkoutFields) -> Result<Workout, StoreError> {
        // BSON datetimes carry millisecond precision, so truncate up front to
        // keep the returned workout identical to the stored one.
        let now = Utc::now().trunc_subsecs(3);

        let document = WorkoutDocument {
            id: ObjectId::new(),
            title: fields.title,
            load: fields.load,
            reps: fields.reps,
            created_at: now,
            updated_at: now,
        };

        self.collection.insert_one(&document).await?;

        Ok(document.into())
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Workout>, StoreError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let document = self
            .collection
            .find_one_and_delete(doc! { "_id": oid })
            .await?;

        Ok(document.map(Workout::from))
    }

    async fn update_by_id(
        &self,
        id: &str,
        patch: WorkoutPatch,
    ) -> Result<Option<Workout>, StoreError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let mut set = doc! { "updatedAt": DateTime::from_chrono(Utc::now()) };
        if let Some(title) = patch.title {
            set.insert("title", title);
        }
        if let Some(load) = patch.load {
            set.insert("load", load);
        }
        if let Some(reps) = patch.reps {
            set.insert("reps", reps);
        }

        // find_one_and_update returns the document as it was before the
        // update was applied.
        let document = self
            .collection
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
            .await?;

        Ok(document.map(Workout::from))
    }
}

/// In-process store with the same observable behavior as [`MongoStore`],
/// minus durability. Lets the integration tests drive the full router
/// without a running deployment.
#[derive(Default)]
pub struct MemoryStore {
    workouts: Mutex<Vec<Workout>>,
}

#[async_trait]
impl WorkoutStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Workout>, StoreError> {
        let workouts = self.workouts.lock().unwrap();

        // Reverse before the stable sort so creation order breaks timestamp
        // ties newest first.
        let mut all: Vec<Workout> = workouts.iter().rev().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(all)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Workout>, StoreError> {
        let workouts = self.workouts.lock().unwrap();

        Ok(workouts.iter().find(|w| w.id == id).cloned())
    }

    async fn insert(&self, fields: WorkoutFields) -> Result<Workout, StoreError> {
        let now = Utc::now();
        let workout = Workout {
            id: ObjectId::new().to_hex(),
            title: fields.title,
            load: fields.load,
            reps: fields.reps,
            created_at: now,
            updated_at: now,
        };

        self.workouts.lock().unwrap().push(workout.clone());

        Ok(workout)
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Workout>, StoreError> {
        let mut workouts = self.workouts.lock().unwrap();

        let position = workouts.iter().position(|w| w.id == id);

        Ok(position.map(|i| workouts.remove(i)))
    }

    async fn update_by_id(
        &self,
        id: &str,
        patch: WorkoutPatch,
    ) -> Result<Option<Workout>, StoreError> {
        let mut workouts = self.workouts.lock().unwrap();

        let Some(workout) = workouts.iter_mut().find(|w| w.id == id) else {
            return Ok(None);
        };

        let previous = workout.clone();

        if let Some(title) = patch.title {
            workout.title = title;
        }
        if let Some(load) = patch.load {
            workout.load = load;
        }
        if let Some(reps) = patch.reps {
            workout.reps = reps;
        }
        workout.updated_at = Utc::now();

        Ok(Some(previous))
    }
}
