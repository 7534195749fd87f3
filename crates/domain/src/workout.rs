use chrono::{DateTime, NaiveDateTime, Utc};
use derive_more::{Deref, Display, Into};
use strum::{AsRefStr, EnumIter, EnumString};
use uuid::Uuid;

use crate::{DeleteError, ReadError, WriteError};

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn get_all_workouts(&self) -> Result<Vec<WorkoutSession>, ReadError>;
    async fn get_workout(&self, id: &WorkoutSessionID)
    -> Result<Option<WorkoutSession>, ReadError>;
    async fn save_workout(&self, session: WorkoutSession) -> Result<WorkoutSession, WriteError>;
    async fn delete_workout(&self, id: &WorkoutSessionID)
    -> Result<WorkoutSessionID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSession {
    pub id: WorkoutSessionID,
    pub date: NaiveDateTime,
    /// Minutes
    pub duration: u32,
    pub exercises: Vec<Exercise>,
    pub photos: Vec<String>,
    pub notes: String,
    pub coach_feedback: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkoutSession {
    #[must_use]
    pub fn new(date: NaiveDateTime, duration: u32) -> Self {
        let now = Utc::now();
        Self {
            id: WorkoutSessionID::generate(),
            date,
            duration,
            exercises: vec![],
            photos: vec![],
            notes: String::new(),
            coach_feedback: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn add_exercise(&mut self, exercise: Exercise) {
        self.exercises.push(exercise);
    }

    pub fn remove_exercise(&mut self, index: usize) -> Option<Exercise> {
        if index < self.exercises.len() {
            Some(self.exercises.remove(index))
        } else {
            None
        }
    }

    #[must_use]
    pub fn total_sets(&self) -> u32 {
        self.exercises.iter().map(Exercise::num_sets).sum()
    }

    /// Sum of reps × weight over all sets.
    #[must_use]
    pub fn total_volume(&self) -> f32 {
        self.exercises.iter().map(Exercise::volume).sum()
    }

    /// Check the invariants of a complete session.
    ///
    /// A session must contain at least one exercise, every exercise needs a name and at least one
    /// set, and all weights must be finite and non-negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.exercises.is_empty() {
            return Err(ValidationError::NoExercises);
        }

        for (position, exercise) in self.exercises.iter().enumerate() {
            if exercise.name.trim().is_empty() {
                return Err(ValidationError::EmptyExerciseName(position + 1));
            }
            if exercise.sets.is_empty() {
                return Err(ValidationError::NoSets(exercise.name.trim().to_string()));
            }
            if let Some(set) = exercise
                .sets
                .iter()
                .find(|s| !s.weight.is_finite() || s.weight < 0.0)
            {
                return Err(ValidationError::InvalidWeight {
                    name: exercise.name.trim().to_string(),
                    set: set.set_number,
                });
            }
        }

        Ok(())
    }
}

#[derive(Deref, Display, Into, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkoutSessionID(String);

impl WorkoutSessionID {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for WorkoutSessionID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for WorkoutSessionID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<u128> for WorkoutSessionID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_u128(value).to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: String,
    pub body_part: BodyPart,
    pub sets: Vec<ExerciseSet>,
}

impl Exercise {
    #[must_use]
    pub fn new(name: &str, body_part: BodyPart) -> Self {
        Self {
            id: ExerciseID::generate(),
            name: name.trim().to_string(),
            body_part,
            sets: vec![],
        }
    }

    pub fn add_set(&mut self, reps: u32, weight: f32) {
        self.sets.push(ExerciseSet {
            set_number: self.num_sets() + 1,
            reps,
            weight,
        });
    }

    /// Replace all sets by `count` identical sets.
    pub fn fill_sets(&mut self, count: u32, reps: u32, weight: f32) {
        self.sets = (1..=count)
            .map(|set_number| ExerciseSet {
                set_number,
                reps,
                weight,
            })
            .collect();
    }

    pub fn update_set(&mut self, index: usize, reps: u32, weight: f32) -> Option<ExerciseSet> {
        let set = self.sets.get_mut(index)?;
        set.reps = reps;
        set.weight = weight;
        Some(*set)
    }

    /// Remove a set and renumber the remaining sets so that numbering stays contiguous.
    pub fn remove_set(&mut self, index: usize) -> Option<ExerciseSet> {
        if index >= self.sets.len() {
            return None;
        }
        let removed = self.sets.remove(index);
        self.renumber_sets();
        Some(removed)
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn num_sets(&self) -> u32 {
        self.sets.len() as u32
    }

    /// Heaviest single set, 0 if there are no sets.
    #[must_use]
    pub fn max_weight(&self) -> f32 {
        self.sets.iter().map(|s| s.weight).fold(0.0, f32::max)
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.sets.iter().map(ExerciseSet::volume).sum()
    }

    fn renumber_sets(&mut self) {
        for (set_number, set) in (1..).zip(self.sets.iter_mut()) {
            set.set_number = set_number;
        }
    }
}

#[derive(Deref, Display, Into, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExerciseID(String);

impl ExerciseID {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ExerciseID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ExerciseID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_u128(value).to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExerciseSet {
    pub set_number: u32,
    pub reps: u32,
    /// Kilograms
    pub weight: f32,
}

impl ExerciseSet {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn volume(&self) -> f32 {
        self.reps as f32 * self.weight
    }
}

#[derive(
    strum::Display,
    AsRefStr,
    EnumIter,
    EnumString,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BodyPart {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Glutes,
    Core,
    Cardio,
    Stretching,
    Other,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Add at least one exercise")]
    NoExercises,
    #[error("Enter a name for exercise {0}")]
    EmptyExerciseName(usize),
    #[error("Add at least one set to \"{0}\"")]
    NoSets(String),
    #[error("Set {set} of \"{name}\" has an invalid weight")]
    InvalidWeight { name: String, set: u32 },
}
