use std::{fmt::Write, str::FromStr};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use log::info;
use trainlog_domain::{self as domain, WorkoutService, catalog};

use crate::cli::AddArgs;

use super::{confirm, resolve_id};

const DEFAULT_REPS: u32 = 10;
const DEFAULT_WEIGHT: f32 = 0.0;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ExerciseSpecError {
    #[error("exercise name must not be empty")]
    EmptyName,
    #[error("unknown body part \"{0}\"")]
    UnknownBodyPart(String),
    #[error("invalid sets \"{0}\" (expected SETSxREPS@WEIGHT)")]
    InvalidSets(String),
}

pub async fn list(service: &impl WorkoutService, limit: Option<usize>) -> Result<()> {
    let sessions = service.get_workouts().await?;

    if sessions.is_empty() {
        println!("No workouts recorded yet");
        return Ok(());
    }

    for session in sessions.iter().take(limit.unwrap_or(usize::MAX)) {
        println!("{}", format_summary(session));
    }

    Ok(())
}

pub async fn show(service: &impl WorkoutService, id: &str) -> Result<()> {
    let id = resolve_id(service, id).await?;
    let session = service
        .get_workout(&id)
        .await?
        .with_context(|| format!("workout {id} not found"))?;
    print!("{}", format_session(&session));
    Ok(())
}

pub async fn add(service: &impl WorkoutService, args: AddArgs) -> Result<()> {
    let date = match args.date {
        Some(date) => parse_date_time(&date).with_context(|| format!("invalid date \"{date}\""))?,
        None => Local::now().naive_local(),
    };

    let mut session = domain::WorkoutSession::new(date, args.duration);
    for spec in &args.exercises {
        session.add_exercise(parse_exercise(spec)?);
    }
    session.photos = args.photos;
    session.notes = args.notes;
    session.coach_feedback = args.feedback.filter(|f| !f.trim().is_empty());

    let session = service.save_workout(session).await?;
    info!("added workout {}", session.id);
    println!("{}", format_summary(&session));

    Ok(())
}

pub async fn feedback(service: &impl WorkoutService, id: &str, text: &str) -> Result<()> {
    let id = resolve_id(service, id).await?;
    let mut session = service
        .get_workout(&id)
        .await?
        .with_context(|| format!("workout {id} not found"))?;

    let text = text.trim();
    session.coach_feedback = if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    };

    service.save_workout(session).await?;
    println!("Feedback of workout {id} updated");

    Ok(())
}

pub async fn delete(service: &impl WorkoutService, id: &str, yes: bool) -> Result<()> {
    let id = resolve_id(service, id).await?;

    if !yes && !confirm(&format!("Delete workout {id}?"))? {
        return Ok(());
    }

    service.delete_workout(&id).await?;
    println!("Deleted workout {id}");

    Ok(())
}

/// Parse an exercise given as `NAME:PART:SETS`.
///
/// `SETS` is a comma-separated list of set groups `COUNTxREPS@WEIGHT`, where the count defaults to
/// 1 and the weight to 0. Without sets a single default set is added. An empty body part is looked
/// up in the exercise catalog.
pub fn parse_exercise(spec: &str) -> Result<domain::Exercise, ExerciseSpecError> {
    let mut parts = spec.splitn(3, ':');
    let name = parts.next().unwrap_or_default().trim();
    let body_part = parts.next().unwrap_or_default().trim();
    let sets = parts.next().unwrap_or_default().trim();

    if name.is_empty() {
        return Err(ExerciseSpecError::EmptyName);
    }

    let body_part = if body_part.is_empty() {
        catalog::body_parts_of(name)
            .first()
            .copied()
            .unwrap_or(domain::BodyPart::Other)
    } else {
        domain::BodyPart::from_str(body_part)
            .map_err(|_| ExerciseSpecError::UnknownBodyPart(body_part.to_string()))?
    };

    let mut exercise = domain::Exercise::new(name, body_part);

    if sets.is_empty() {
        exercise.add_set(DEFAULT_REPS, DEFAULT_WEIGHT);
        return Ok(exercise);
    }

    for group in sets.split(',') {
        let group = group.trim();
        let (count, reps, weight) = parse_set_group(group)
            .ok_or_else(|| ExerciseSpecError::InvalidSets(group.to_string()))?;
        for _ in 0..count {
            exercise.add_set(reps, weight);
        }
    }

    Ok(exercise)
}

fn parse_set_group(group: &str) -> Option<(u32, u32, f32)> {
    let (count_reps, weight) = group.split_once('@').unwrap_or((group, "0"));
    let (count, reps) = count_reps
        .split_once(['x', 'X'])
        .unwrap_or(("1", count_reps));
    let count = count.trim().parse::<u32>().ok().filter(|c| *c > 0)?;
    let reps = reps.trim().parse::<u32>().ok()?;
    let weight = weight
        .trim()
        .trim_end_matches("kg")
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|w| w.is_finite() && *w >= 0.0)?;
    Some((count, reps, weight))
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM` and ISO 8601 date times.
pub fn parse_date_time(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::from_str(value))
        .or_else(|_| NaiveDate::from_str(value).map(|d| d.and_time(chrono::NaiveTime::MIN)))
}

pub fn format_summary(session: &domain::WorkoutSession) -> String {
    format!(
        "{}  {}  {:>3} min  {} exercises  {} sets{}",
        short_id(&session.id),
        session.date.format("%Y-%m-%d %H:%M"),
        session.duration,
        session.exercises.len(),
        session.total_sets(),
        if session.coach_feedback.is_some() {
            "  (feedback)"
        } else {
            ""
        }
    )
}

pub fn format_session(session: &domain::WorkoutSession) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Workout {}", session.id);
    let _ = writeln!(
        output,
        "{}, {} min, {} sets, {} kg total volume",
        session.date.format("%A %Y-%m-%d %H:%M"),
        session.duration,
        session.total_sets(),
        session.total_volume()
    );

    for exercise in &session.exercises {
        let _ = writeln!(output, "\n{} ({})", exercise.name, exercise.body_part);
        for set in &exercise.sets {
            let _ = writeln!(
                output,
                "  {}. {} reps × {} kg",
                set.set_number, set.reps, set.weight
            );
        }
    }

    if !session.notes.is_empty() {
        let _ = writeln!(output, "\nNotes: {}", session.notes);
    }
    if let Some(feedback) = &session.coach_feedback {
        let _ = writeln!(output, "\nCoach feedback: {feedback}");
    }
    if !session.photos.is_empty() {
        let _ = writeln!(output, "\nPhotos: {}", session.photos.len());
    }

    output
}

pub fn short_id(id: &domain::WorkoutSessionID) -> &str {
    id.get(..8).unwrap_or(id.as_str())
}
