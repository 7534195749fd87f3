//! Serialized form of workout sessions.
//!
//! Sessions are stored as JSON text with camelCase keys. Timestamps are ISO 8601 strings. The
//! session date is a local date and time; RFC 3339 values with an offset are accepted and
//! converted to local time. The date column of remote rows carries the local offset, as the
//! replica may echo it back normalized to UTC.

use std::str::FromStr;

use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use trainlog_domain as domain;

pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    pub id: String,
    #[serde(with = "session_date")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coach_feedback: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkoutSession {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<domain::WorkoutSession> for WorkoutSession {
    fn from(value: domain::WorkoutSession) -> Self {
        Self {
            id: value.id.into(),
            date: value.date,
            duration: value.duration,
            exercises: value.exercises.into_iter().map(Exercise::from).collect(),
            photos: value.photos,
            notes: value.notes,
            coach_feedback: value.coach_feedback,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<&domain::WorkoutSession> for WorkoutSession {
    fn from(value: &domain::WorkoutSession) -> Self {
        Self::from(value.clone())
    }
}

impl From<WorkoutSession> for domain::WorkoutSession {
    fn from(value: WorkoutSession) -> Self {
        Self {
            id: value.id.into(),
            date: value.date,
            duration: value.duration,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::Exercise::from)
                .collect(),
            photos: value.photos,
            notes: value.notes,
            coach_feedback: value.coach_feedback.filter(|f| !f.is_empty()),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub body_part: String,
    #[serde(default)]
    pub sets: Vec<ExerciseSet>,
}

impl From<domain::Exercise> for Exercise {
    fn from(value: domain::Exercise) -> Self {
        Self {
            id: value.id.into(),
            name: value.name,
            body_part: value.body_part.to_string(),
            sets: value.sets.into_iter().map(ExerciseSet::from).collect(),
        }
    }
}

impl From<Exercise> for domain::Exercise {
    fn from(value: Exercise) -> Self {
        let body_part = domain::BodyPart::from_str(&value.body_part).unwrap_or_else(|_| {
            warn!(
                "unknown body part \"{}\" of exercise \"{}\"",
                value.body_part, value.name
            );
            domain::BodyPart::Other
        });
        Self {
            id: value.id.into(),
            name: value.name,
            body_part,
            sets: value
                .sets
                .into_iter()
                .map(domain::ExerciseSet::from)
                .collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSet {
    pub set_number: u32,
    pub reps: u32,
    pub weight: f32,
}

impl From<domain::ExerciseSet> for ExerciseSet {
    fn from(value: domain::ExerciseSet) -> Self {
        Self {
            set_number: value.set_number,
            reps: value.reps,
            weight: value.weight,
        }
    }
}

impl From<ExerciseSet> for domain::ExerciseSet {
    fn from(value: ExerciseSet) -> Self {
        Self {
            set_number: value.set_number,
            reps: value.reps,
            weight: value.weight,
        }
    }
}

/// Row of the remote `workouts` table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RemoteRow {
    pub id: String,
    pub sync_code: String,
    pub date: String,
    pub data: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl RemoteRow {
    pub fn new(
        session: &domain::WorkoutSession,
        token: &domain::SyncToken,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id: session.id.to_string(),
            sync_code: token.to_string(),
            date: format_remote_date(session.date),
            data: serde_json::to_value(WorkoutSession::from(session))?,
            created_at: None,
            updated_at: session.updated_at,
        })
    }
}

/// The columns of the row take precedence over the corresponding fields of the payload.
impl TryFrom<RemoteRow> for domain::WorkoutSession {
    type Error = serde_json::Error;

    fn try_from(value: RemoteRow) -> Result<Self, Self::Error> {
        let mut session: WorkoutSession = serde_json::from_value(value.data)?;
        session.id = value.id;
        session.date = parse_date(&value.date).map_err(serde::de::Error::custom)?;
        if let Some(created_at) = value.created_at {
            session.created_at = created_at;
        }
        session.updated_at = value.updated_at;
        Ok(session.into())
    }
}

#[must_use]
pub fn format_date(date: NaiveDateTime) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Local date and time with the local offset, inverse of [`parse_date`].
#[must_use]
pub fn format_remote_date(date: NaiveDateTime) -> String {
    format_date_in(date, &Local)
}

pub fn parse_date(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    parse_date_in(value, &Local)
}

/// Times skipped by a daylight saving transition have no offset and are written without one.
fn format_date_in<Tz: TimeZone>(date: NaiveDateTime, timezone: &Tz) -> String
where
    Tz::Offset: Display,
{
    match timezone.from_local_datetime(&date).earliest() {
        Some(date) => date.to_rfc3339_opts(SecondsFormat::Secs, false),
        None => format_date(date),
    }
}

fn parse_date_in<Tz: TimeZone>(
    value: &str,
    timezone: &Tz,
) -> Result<NaiveDateTime, chrono::ParseError> {
    if let Ok(date) = NaiveDateTime::from_str(value) {
        return Ok(date);
    }
    if let Ok(date) = NaiveDate::from_str(value) {
        return Ok(date.and_time(chrono::NaiveTime::MIN));
    }
    Ok(DateTime::parse_from_rfc3339(value)?
        .with_timezone(timezone)
        .naive_local())
}

mod session_date {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::parse_date(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use crate::tests::data::{TOKEN, WORKOUT_SESSION, WORKOUT_SESSION_2};

    use super::*;

    #[test]
    fn test_workout_session_from() {
        assert_eq!(
            domain::WorkoutSession::from(WorkoutSession::from(WORKOUT_SESSION.clone())),
            *WORKOUT_SESSION
        );
    }

    #[test]
    fn test_workout_session_serde() {
        let json = WorkoutSession::from(&*WORKOUT_SESSION).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["date"], json!("2024-06-11T18:30:00"));
        assert_eq!(value["exercises"][0]["bodyPart"], json!("chest"));
        assert_eq!(value["exercises"][0]["sets"][1]["setNumber"], json!(2));
        assert_eq!(value["coachFeedback"], json!("Good depth"));
        assert_eq!(
            domain::WorkoutSession::from(WorkoutSession::from_json(&json).unwrap()),
            *WORKOUT_SESSION
        );
    }

    #[test]
    fn test_workout_session_deserialize_minimal() {
        let session = WorkoutSession::from_json(
            r#"{
                "id": "a",
                "date": "2024-06-10T07:00:00.000Z",
                "duration": 30,
                "exercises": [
                    {"id": "e", "name": "Run", "bodyPart": "Cardio", "sets": [{"setNumber": 1, "reps": 1, "weight": 0}]}
                ],
                "createdAt": "2024-06-10T07:45:00.000Z",
                "updatedAt": "2024-06-10T07:45:00.000Z"
            }"#,
        )
        .unwrap();
        let session = domain::WorkoutSession::from(session);

        assert_eq!(
            session.date,
            Utc.with_ymd_and_hms(2024, 6, 10, 7, 0, 0)
                .unwrap()
                .with_timezone(&Local)
                .naive_local()
        );
        assert_eq!(session.exercises[0].body_part, domain::BodyPart::Cardio);
        assert!(session.photos.is_empty());
        assert_eq!(session.notes, "");
        assert_eq!(session.coach_feedback, None);
    }

    #[test]
    fn test_exercise_unknown_body_part() {
        let exercise = domain::Exercise::from(Exercise {
            id: "1".into(),
            name: "Juggling".into(),
            body_part: "hands".into(),
            sets: vec![],
        });
        assert_eq!(exercise.body_part, domain::BodyPart::Other);
    }

    #[rstest]
    #[case("2024-06-10T18:00:00", (2024, 6, 10, 18, 0, 0))]
    #[case("2024-06-10T18:00:00.250", (2024, 6, 10, 18, 0, 0))]
    #[case("2024-06-10", (2024, 6, 10, 0, 0, 0))]
    fn test_parse_date(#[case] value: &str, #[case] expected: (i32, u32, u32, u32, u32, u32)) {
        let (y, m, d, h, min, s) = expected;
        assert_eq!(
            parse_date(value).unwrap().format(DATE_FORMAT).to_string(),
            format_date(
                NaiveDate::from_ymd_opt(y, m, d)
                    .unwrap()
                    .and_hms_opt(h, min, s)
                    .unwrap()
            )
        );
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date("yesterday").is_err());
    }

    #[test]
    fn test_remote_row() {
        let row = RemoteRow::new(&WORKOUT_SESSION, &TOKEN).unwrap();

        assert_eq!(row.id, WORKOUT_SESSION.id.to_string());
        assert_eq!(row.sync_code, "AB12CD34");
        assert!(row.date.starts_with("2024-06-11T18:30:00"));
        assert_eq!(parse_date(&row.date).unwrap(), WORKOUT_SESSION.date);
        assert_eq!(
            serde_json::to_value(&row).unwrap().get("created_at"),
            None
        );
        assert_eq!(
            domain::WorkoutSession::try_from(row).unwrap(),
            *WORKOUT_SESSION
        );
    }

    #[rstest]
    #[case(8 * 3600, "2024-06-11T18:30:00+08:00", "2024-06-11T10:30:00+00:00")]
    #[case(-5 * 3600, "2024-06-11T18:30:00-05:00", "2024-06-11T23:30:00+00:00")]
    #[case(0, "2024-06-11T18:30:00+00:00", "2024-06-11T18:30:00+00:00")]
    fn test_remote_date_round_trip(
        #[case] offset: i32,
        #[case] written: &str,
        #[case] echoed: &str,
    ) {
        let timezone = chrono::FixedOffset::east_opt(offset).unwrap();
        let date = WORKOUT_SESSION.date;

        assert_eq!(format_date_in(date, &timezone), written);
        assert_eq!(parse_date_in(written, &timezone).unwrap(), date);
        assert_eq!(parse_date_in(echoed, &timezone).unwrap(), date);
    }

    #[test]
    fn test_remote_row_date_round_trip() {
        let row = RemoteRow::new(&WORKOUT_SESSION_2, &TOKEN).unwrap();
        let mut echoed = row.clone();
        echoed.date = DateTime::parse_from_rfc3339(&row.date)
            .unwrap()
            .with_timezone(&Utc)
            .to_rfc3339();

        assert_eq!(
            domain::WorkoutSession::try_from(echoed).unwrap().date,
            WORKOUT_SESSION_2.date
        );
    }

    #[test]
    fn test_remote_row_columns_take_precedence() {
        let mut row = RemoteRow::new(&WORKOUT_SESSION, &TOKEN).unwrap();
        row.date = "2024-06-12T08:00:00".into();
        row.created_at = Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        row.updated_at = Utc.with_ymd_and_hms(2024, 6, 13, 0, 0, 0).unwrap();

        let session = domain::WorkoutSession::try_from(row).unwrap();

        assert_eq!(format_date(session.date), "2024-06-12T08:00:00");
        assert_eq!(
            session.created_at,
            Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            session.updated_at,
            Utc.with_ymd_and_hms(2024, 6, 13, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_remote_row_malformed_payload() {
        let mut row = RemoteRow::new(&WORKOUT_SESSION, &TOKEN).unwrap();
        row.data = json!({"unexpected": true});

        assert!(domain::WorkoutSession::try_from(row).is_err());
    }
}
