//! Legacy key-value file
//!
//! Earlier versions kept all workouts as a JSON array under a single key of a key-value file. The
//! file is only ever read; migrating replays its records into the current repository.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use serde_json::Value;
use trainlog_domain as domain;

use crate::record;

pub const WORKOUTS_KEY: &str = "fitness_workouts";

pub struct LegacyStore {
    path: PathBuf,
}

impl LegacyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file or key yields no workouts. Unreadable records are skipped.
    pub fn read_workouts(&self) -> Result<Vec<domain::WorkoutSession>, domain::ReadError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no legacy file at {}", self.path.display());
                return Ok(vec![]);
            }
            Err(err) => return Err(domain::ReadError::Other(Box::new(err))),
        };

        let mut entries: serde_json::Map<String, Value> =
            serde_json::from_str(&content).map_err(|err| domain::ReadError::Other(Box::new(err)))?;

        let records = match entries.remove(WORKOUTS_KEY) {
            None | Some(Value::Null) => return Ok(vec![]),
            Some(Value::String(json)) => {
                serde_json::from_str(&json).map_err(|err| domain::ReadError::Other(Box::new(err)))?
            }
            Some(value) => value,
        };

        let Value::Array(records) = records else {
            return Err(domain::ReadError::Other(
                format!("expected array under \"{WORKOUTS_KEY}\"").into(),
            ));
        };

        Ok(records
            .into_iter()
            .filter_map(
                |value| match serde_json::from_value::<record::WorkoutSession>(value) {
                    Ok(session) => Some(session.into()),
                    Err(err) => {
                        warn!("skipping unreadable legacy workout: {err}");
                        None
                    }
                },
            )
            .collect())
    }
}

/// Replay legacy workouts that are not yet in the repository.
///
/// The legacy file is left untouched. Workouts keep their ids, so records migrated by an earlier
/// run are skipped and later edits of them are preserved. Returns the number of replayed workouts.
pub async fn migrate_legacy<R: domain::WorkoutRepository>(
    legacy: &LegacyStore,
    repository: &R,
) -> Result<usize, domain::WriteError> {
    let mut count = 0;

    for session in legacy.read_workouts()? {
        if repository.get_workout(&session.id).await?.is_some() {
            debug!("legacy workout {} already migrated", session.id);
            continue;
        }
        repository.save_workout(session).await?;
        count += 1;
    }

    if count > 0 {
        info!(
            "migrated {count} workouts from {}",
            legacy.path().display()
        );
    }

    Ok(count)
}
