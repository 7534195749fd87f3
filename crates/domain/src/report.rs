//! Weekly and monthly reports.
//!
//! Reports are recomputed from the complete collection of workout sessions on every request. All
//! functions in this module are pure and total: an empty or degenerate input produces a report
//! with zero counters, a fully enumerated body part distribution and empty series.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime};
use strum::IntoEnumIterator;

use crate::{BodyPart, WorkoutSession};

const NUM_TOP_EXERCISES: usize = 5;
const WEEKS_PER_MONTH: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl Interval {
    /// Monday through Sunday of the week containing `reference`.
    #[must_use]
    pub fn week_of(reference: NaiveDate) -> Self {
        let first = reference
            .checked_sub_days(Days::new(u64::from(
                reference.weekday().num_days_from_monday(),
            )))
            .unwrap_or(reference);
        Self {
            first,
            last: first.checked_add_days(Days::new(6)).unwrap_or(first),
        }
    }

    /// First through last day of the calendar month containing `reference`.
    #[must_use]
    pub fn month_of(reference: NaiveDate) -> Self {
        let first = reference.with_day(1).unwrap_or(reference);
        Self {
            first,
            last: first
                .checked_add_months(Months::new(1))
                .and_then(|d| d.pred_opt())
                .unwrap_or(reference),
        }
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDateTime) -> bool {
        (self.first..=self.last).contains(&date.date())
    }

    #[must_use]
    pub fn earlier_by(&self, days: u64) -> Self {
        Self {
            first: self
                .first
                .checked_sub_days(Days::new(days))
                .unwrap_or(self.first),
            last: self
                .last
                .checked_sub_days(Days::new(days))
                .unwrap_or(self.last),
        }
    }
}

impl From<std::ops::RangeInclusive<NaiveDate>> for Interval {
    fn from(value: std::ops::RangeInclusive<NaiveDate>) -> Self {
        Interval {
            first: *value.start(),
            last: *value.end(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyReport {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_sessions: u32,
    pub total_duration: u32,
    pub total_sets: u32,
    pub body_part_distribution: BTreeMap<BodyPart, u32>,
    pub progress_comparison: Vec<ProgressComparison>,
    pub photos: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressComparison {
    pub exercise_name: String,
    pub previous_week_max: f32,
    pub current_week_max: f32,
    /// Percent, 0 if there is no previous value
    pub improvement: f32,
}

impl ProgressComparison {
    /// The exercise was not performed with any weight in the previous week.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.previous_week_max <= 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyReport {
    pub month: NaiveDate,
    pub total_sessions: u32,
    pub total_duration: u32,
    pub weekly_progress: Vec<WeekProgress>,
    pub body_part_distribution: BTreeMap<BodyPart, u32>,
    pub top_exercises: Vec<TopExercise>,
    pub progress_curve: Vec<VolumePoint>,
    pub before_after_photos: BeforeAfterPhotos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekProgress {
    /// Week of month, `ceil(day / 7)`
    pub week: u32,
    pub sessions: u32,
    pub duration: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopExercise {
    pub name: String,
    pub total_sets: u32,
    pub max_weight: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumePoint {
    pub date: NaiveDateTime,
    pub total_volume: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeforeAfterPhotos {
    pub before: String,
    pub after: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub week: Interval,
    pub sessions: u32,
    pub duration: u32,
    pub sets: u32,
    pub recent: Vec<WorkoutSession>,
}

#[must_use]
pub fn weekly_report(sessions: &[WorkoutSession], reference: NaiveDate) -> WeeklyReport {
    let week = Interval::week_of(reference);
    let current = sessions_within(sessions, &week);
    let previous = sessions_within(sessions, &week.earlier_by(7));

    WeeklyReport {
        week_start: week.first,
        week_end: week.last,
        total_sessions: count(&current),
        total_duration: total_duration(&current),
        total_sets: current.iter().map(|s| s.total_sets()).sum(),
        body_part_distribution: body_part_distribution(&current),
        progress_comparison: progress_comparison(&previous, &current),
        photos: current
            .iter()
            .flat_map(|s| s.photos.iter().cloned())
            .collect(),
    }
}

/// Generate the report for the calendar month containing `reference`.
///
/// The progress curve and the before/after photos are derived from the sessions in chronological
/// order. Sessions sharing the same date keep the order in which they were passed. All other
/// values do not depend on the order of `sessions`, except for ties in the ranking of the top
/// exercises, which are resolved by first occurrence.
#[must_use]
pub fn monthly_report(sessions: &[WorkoutSession], reference: NaiveDate) -> MonthlyReport {
    let month = Interval::month_of(reference);
    let current = sessions_within(sessions, &month);

    let mut chronological = current.clone();
    chronological.sort_by_key(|s| s.date);

    let photos = chronological
        .iter()
        .flat_map(|s| s.photos.iter())
        .collect::<Vec<_>>();

    MonthlyReport {
        month: month.first,
        total_sessions: count(&current),
        total_duration: total_duration(&current),
        weekly_progress: weekly_progress(&current),
        body_part_distribution: body_part_distribution(&current),
        top_exercises: top_exercises(&current),
        progress_curve: chronological
            .iter()
            .map(|s| VolumePoint {
                date: s.date,
                total_volume: s.total_volume(),
            })
            .collect(),
        before_after_photos: BeforeAfterPhotos {
            before: photos.first().map(|p| (*p).clone()).unwrap_or_default(),
            after: photos.last().map(|p| (*p).clone()).unwrap_or_default(),
        },
    }
}

/// Summary of the week containing `today` and the most recent sessions.
#[must_use]
pub fn dashboard(sessions: &[WorkoutSession], today: NaiveDate, recent: usize) -> Dashboard {
    let report = weekly_report(sessions, today);
    let mut latest = sessions.iter().collect::<Vec<_>>();
    latest.sort_by(|a, b| b.date.cmp(&a.date));

    Dashboard {
        week: (report.week_start..=report.week_end).into(),
        sessions: report.total_sessions,
        duration: report.total_duration,
        sets: report.total_sets,
        recent: latest.into_iter().take(recent).cloned().collect(),
    }
}

fn sessions_within<'a>(
    sessions: &'a [WorkoutSession],
    interval: &Interval,
) -> Vec<&'a WorkoutSession> {
    sessions
        .iter()
        .filter(|s| interval.contains(s.date))
        .collect()
}

#[allow(clippy::cast_possible_truncation)]
fn count(sessions: &[&WorkoutSession]) -> u32 {
    sessions.len() as u32
}

fn total_duration(sessions: &[&WorkoutSession]) -> u32 {
    sessions.iter().map(|s| s.duration).sum()
}

fn body_part_distribution(sessions: &[&WorkoutSession]) -> BTreeMap<BodyPart, u32> {
    let mut result: BTreeMap<BodyPart, u32> = BodyPart::iter().map(|b| (b, 0)).collect();
    for exercise in sessions.iter().flat_map(|s| &s.exercises) {
        *result.entry(exercise.body_part).or_insert(0) += exercise.num_sets();
    }
    result
}

fn weekly_progress(sessions: &[&WorkoutSession]) -> Vec<WeekProgress> {
    (1..=WEEKS_PER_MONTH)
        .map(|week| {
            let in_week = sessions
                .iter()
                .filter(|s| s.date.day().div_ceil(7) == week)
                .copied()
                .collect::<Vec<_>>();
            WeekProgress {
                week,
                sessions: count(&in_week),
                duration: total_duration(&in_week),
            }
        })
        .collect()
}

fn top_exercises(sessions: &[&WorkoutSession]) -> Vec<TopExercise> {
    let mut result: Vec<TopExercise> = vec![];
    let mut index: HashMap<&str, usize> = HashMap::new();

    for exercise in sessions.iter().flat_map(|s| &s.exercises) {
        let i = *index.entry(exercise.name.as_str()).or_insert_with(|| {
            result.push(TopExercise {
                name: exercise.name.clone(),
                total_sets: 0,
                max_weight: 0.0,
            });
            result.len() - 1
        });
        result[i].total_sets += exercise.num_sets();
        result[i].max_weight = result[i].max_weight.max(exercise.max_weight());
    }

    result.sort_by(|a, b| b.total_sets.cmp(&a.total_sets));
    result.truncate(NUM_TOP_EXERCISES);
    result
}

/// Compare the heaviest set per exercise name between two sets of sessions.
///
/// Only exercises with a positive weight in `current` are included. The result is sorted by
/// descending improvement, exercises with equal improvement are kept in order of first
/// occurrence (exercises of `previous` before new exercises of `current`).
fn progress_comparison(
    previous: &[&WorkoutSession],
    current: &[&WorkoutSession],
) -> Vec<ProgressComparison> {
    let mut max_weights: Vec<(&str, f32, f32)> = vec![];
    let mut index: HashMap<&str, usize> = HashMap::new();

    for (sessions, is_current) in [(previous, false), (current, true)] {
        for exercise in sessions.iter().flat_map(|s| &s.exercises) {
            let i = *index.entry(exercise.name.as_str()).or_insert_with(|| {
                max_weights.push((exercise.name.as_str(), 0.0, 0.0));
                max_weights.len() - 1
            });
            let (_, previous_max, current_max) = &mut max_weights[i];
            if is_current {
                *current_max = current_max.max(exercise.max_weight());
            } else {
                *previous_max = previous_max.max(exercise.max_weight());
            }
        }
    }

    let mut result = max_weights
        .into_iter()
        .filter(|(_, _, current_max)| *current_max > 0.0)
        .map(|(name, previous_max, current_max)| ProgressComparison {
            exercise_name: name.to_string(),
            previous_week_max: previous_max,
            current_week_max: current_max,
            improvement: if previous_max > 0.0 {
                (current_max - previous_max) / previous_max * 100.0
            } else {
                0.0
            },
        })
        .collect::<Vec<_>>();
    result.sort_by(|a, b| b.improvement.total_cmp(&a.improvement));
    result
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{Exercise, ExerciseSet, WorkoutSessionID};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, s).unwrap()
    }

    fn exercise(name: &str, body_part: BodyPart, sets: &[(u32, f32)]) -> Exercise {
        Exercise {
            id: name.into(),
            name: name.to_string(),
            body_part,
            sets: (1..)
                .zip(sets)
                .map(|(set_number, (reps, weight))| ExerciseSet {
                    set_number,
                    reps: *reps,
                    weight: *weight,
                })
                .collect(),
        }
    }

    fn session(
        id: u128,
        date: NaiveDateTime,
        duration: u32,
        exercises: Vec<Exercise>,
        photos: &[&str],
    ) -> WorkoutSession {
        WorkoutSession {
            id: id.into(),
            date,
            duration,
            exercises,
            photos: photos.iter().map(ToString::to_string).collect(),
            notes: String::new(),
            coach_feedback: None,
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
        }
    }

    fn zero_distribution() -> BTreeMap<BodyPart, u32> {
        BodyPart::iter().map(|b| (b, 0)).collect()
    }

    #[rstest]
    #[case::thursday(date(2024, 6, 13), date(2024, 6, 10), date(2024, 6, 16))]
    #[case::monday(date(2024, 6, 10), date(2024, 6, 10), date(2024, 6, 16))]
    #[case::sunday(date(2024, 6, 16), date(2024, 6, 10), date(2024, 6, 16))]
    #[case::across_months(date(2024, 5, 1), date(2024, 4, 29), date(2024, 5, 5))]
    fn test_interval_week_of(
        #[case] reference: NaiveDate,
        #[case] first: NaiveDate,
        #[case] last: NaiveDate,
    ) {
        assert_eq!(Interval::week_of(reference), Interval { first, last });
    }

    #[rstest]
    #[case(date(2024, 2, 14), date(2024, 2, 1), date(2024, 2, 29))]
    #[case(date(2023, 2, 28), date(2023, 2, 1), date(2023, 2, 28))]
    #[case(date(2024, 12, 31), date(2024, 12, 1), date(2024, 12, 31))]
    fn test_interval_month_of(
        #[case] reference: NaiveDate,
        #[case] first: NaiveDate,
        #[case] last: NaiveDate,
    ) {
        assert_eq!(Interval::month_of(reference), Interval { first, last });
    }

    #[test]
    fn test_weekly_report_zero_state() {
        assert_eq!(
            weekly_report(&[], date(2024, 6, 13)),
            WeeklyReport {
                week_start: date(2024, 6, 10),
                week_end: date(2024, 6, 16),
                total_sessions: 0,
                total_duration: 0,
                total_sets: 0,
                body_part_distribution: zero_distribution(),
                progress_comparison: vec![],
                photos: vec![],
            }
        );
    }

    #[test]
    fn test_monthly_report_zero_state() {
        assert_eq!(
            monthly_report(&[], date(2024, 5, 20)),
            MonthlyReport {
                month: date(2024, 5, 1),
                total_sessions: 0,
                total_duration: 0,
                weekly_progress: (1..=5)
                    .map(|week| WeekProgress {
                        week,
                        sessions: 0,
                        duration: 0
                    })
                    .collect(),
                body_part_distribution: zero_distribution(),
                top_exercises: vec![],
                progress_curve: vec![],
                before_after_photos: BeforeAfterPhotos {
                    before: String::new(),
                    after: String::new(),
                },
            }
        );
    }

    #[test]
    fn test_weekly_report_week_boundaries() {
        let sessions = [
            session(1, datetime(2024, 6, 9, 23, 59, 59), 30, vec![], &[]),
            session(2, datetime(2024, 6, 10, 0, 0, 0), 40, vec![], &[]),
            session(3, datetime(2024, 6, 16, 23, 59, 59), 50, vec![], &[]),
            session(4, datetime(2024, 6, 17, 0, 0, 0), 60, vec![], &[]),
        ];

        let report = weekly_report(&sessions, date(2024, 6, 13));

        assert_eq!(report.week_start, date(2024, 6, 10));
        assert_eq!(report.week_end, date(2024, 6, 16));
        assert_eq!(report.total_sessions, 2);
        assert_eq!(report.total_duration, 90);
    }

    #[test]
    fn test_weekly_report_totals_and_distribution() {
        let sessions = [
            session(
                1,
                datetime(2024, 6, 10, 18, 0, 0),
                60,
                vec![
                    exercise("Bench Press", BodyPart::Chest, &[(10, 50.0), (8, 60.0)]),
                    exercise("Squat", BodyPart::Legs, &[(5, 100.0), (5, 100.0), (5, 100.0)]),
                ],
                &["a.jpg", "b.jpg"],
            ),
            session(
                2,
                datetime(2024, 6, 12, 7, 30, 0),
                45,
                vec![exercise("Plank", BodyPart::Core, &[(1, 0.0)])],
                &["c.jpg"],
            ),
            session(
                3,
                datetime(2024, 6, 3, 18, 0, 0),
                60,
                vec![exercise("Bench Press", BodyPart::Chest, &[(10, 40.0)])],
                &["old.jpg"],
            ),
        ];

        let report = weekly_report(&sessions, date(2024, 6, 13));

        assert_eq!(report.total_sessions, 2);
        assert_eq!(report.total_duration, 105);
        assert_eq!(report.total_sets, 6);
        assert_eq!(report.photos, vec!["a.jpg", "b.jpg", "c.jpg"]);

        let mut expected = zero_distribution();
        expected.insert(BodyPart::Chest, 2);
        expected.insert(BodyPart::Legs, 3);
        expected.insert(BodyPart::Core, 1);
        assert_eq!(report.body_part_distribution, expected);
        assert_eq!(report.body_part_distribution.len(), 10);
        assert_eq!(
            report.body_part_distribution.values().sum::<u32>(),
            report.total_sets
        );
    }

    #[test]
    fn test_weekly_report_progress_comparison() {
        let sessions = [
            session(
                1,
                datetime(2024, 6, 4, 18, 0, 0),
                60,
                vec![
                    exercise("Bench Press", BodyPart::Chest, &[(10, 50.0)]),
                    exercise("Squat", BodyPart::Legs, &[(5, 100.0)]),
                    exercise("Deadlift", BodyPart::Back, &[(5, 120.0)]),
                ],
                &[],
            ),
            session(
                2,
                datetime(2024, 6, 11, 18, 0, 0),
                60,
                vec![
                    exercise("Bench Press", BodyPart::Chest, &[(10, 50.0), (5, 55.0)]),
                    exercise("Squat", BodyPart::Legs, &[(5, 90.0)]),
                    exercise("Lunge", BodyPart::Legs, &[(10, 20.0)]),
                    exercise("Plank", BodyPart::Core, &[(1, 0.0)]),
                ],
                &[],
            ),
        ];

        let comparison = weekly_report(&sessions, date(2024, 6, 13)).progress_comparison;

        assert_eq!(
            comparison
                .iter()
                .map(|c| c.exercise_name.as_str())
                .collect::<Vec<_>>(),
            vec!["Bench Press", "Lunge", "Squat"]
        );
        assert_approx_eq!(comparison[0].improvement, 10.0);
        assert_eq!(comparison[0].previous_week_max, 50.0);
        assert_eq!(comparison[0].current_week_max, 55.0);
        assert_eq!(comparison[1].improvement, 0.0);
        assert!(comparison[1].is_new());
        assert_approx_eq!(comparison[2].improvement, -10.0);
        assert!(!comparison[2].is_new());
    }

    #[test]
    fn test_weekly_report_progress_comparison_without_previous_week() {
        let sessions = [session(
            1,
            datetime(2024, 6, 11, 18, 0, 0),
            60,
            vec![exercise("Bench Press", BodyPart::Chest, &[(10, 50.0)])],
            &[],
        )];

        let comparison = weekly_report(&sessions, date(2024, 6, 13)).progress_comparison;

        assert_eq!(
            comparison,
            vec![ProgressComparison {
                exercise_name: "Bench Press".to_string(),
                previous_week_max: 0.0,
                current_week_max: 50.0,
                improvement: 0.0,
            }]
        );
        assert!(comparison[0].improvement.is_finite());
    }

    #[test]
    fn test_monthly_report_progress_curve_volume() {
        let sessions = [session(
            1,
            datetime(2024, 5, 14, 18, 0, 0),
            60,
            vec![exercise(
                "Bench Press",
                BodyPart::Chest,
                &[(10, 50.0), (8, 60.0)],
            )],
            &[],
        )];

        assert_eq!(
            monthly_report(&sessions, date(2024, 5, 1)).progress_curve,
            vec![VolumePoint {
                date: datetime(2024, 5, 14, 18, 0, 0),
                total_volume: 980.0
            }]
        );
    }

    #[test]
    fn test_monthly_report_progress_curve_one_point_per_session() {
        let sessions = [
            session(2, datetime(2024, 5, 20, 18, 0, 0), 60, vec![], &[]),
            session(1, datetime(2024, 5, 3, 7, 0, 0), 60, vec![], &[]),
            session(3, datetime(2024, 5, 3, 19, 0, 0), 60, vec![], &[]),
            session(4, datetime(2024, 6, 1, 0, 0, 0), 60, vec![], &[]),
        ];

        assert_eq!(
            monthly_report(&sessions, date(2024, 5, 31))
                .progress_curve
                .iter()
                .map(|p| p.date)
                .collect::<Vec<_>>(),
            vec![
                datetime(2024, 5, 3, 7, 0, 0),
                datetime(2024, 5, 3, 19, 0, 0),
                datetime(2024, 5, 20, 18, 0, 0),
            ]
        );
    }

    #[test]
    fn test_monthly_report_top_exercises_ranking() {
        let sessions = [
            session(
                1,
                datetime(2024, 5, 2, 18, 0, 0),
                60,
                vec![
                    exercise("A", BodyPart::Chest, &[(10, 20.0), (10, 30.0), (10, 25.0)]),
                    exercise("B", BodyPart::Back, &[(10, 40.0); 5]),
                    exercise("C", BodyPart::Legs, &[(10, 60.0); 5]),
                ],
                &[],
            ),
            session(
                2,
                datetime(2024, 5, 9, 18, 0, 0),
                60,
                vec![
                    exercise("D", BodyPart::Arms, &[(10, 10.0)]),
                    exercise("E", BodyPart::Arms, &[(10, 10.0)]),
                    exercise("F", BodyPart::Arms, &[(10, 10.0)]),
                    exercise("D", BodyPart::Arms, &[(10, 12.5)]),
                ],
                &[],
            ),
        ];

        assert_eq!(
            monthly_report(&sessions, date(2024, 5, 1)).top_exercises,
            vec![
                TopExercise {
                    name: "B".into(),
                    total_sets: 5,
                    max_weight: 40.0
                },
                TopExercise {
                    name: "C".into(),
                    total_sets: 5,
                    max_weight: 60.0
                },
                TopExercise {
                    name: "A".into(),
                    total_sets: 3,
                    max_weight: 30.0
                },
                TopExercise {
                    name: "D".into(),
                    total_sets: 2,
                    max_weight: 12.5
                },
                TopExercise {
                    name: "E".into(),
                    total_sets: 1,
                    max_weight: 10.0
                },
            ]
        );
    }

    #[test]
    fn test_monthly_report_weekly_progress() {
        let sessions = [
            session(1, datetime(2024, 3, 1, 8, 0, 0), 30, vec![], &[]),
            session(2, datetime(2024, 3, 7, 8, 0, 0), 40, vec![], &[]),
            session(3, datetime(2024, 3, 8, 8, 0, 0), 50, vec![], &[]),
            session(4, datetime(2024, 3, 29, 8, 0, 0), 60, vec![], &[]),
            session(5, datetime(2024, 3, 31, 8, 0, 0), 70, vec![], &[]),
        ];

        assert_eq!(
            monthly_report(&sessions, date(2024, 3, 15)).weekly_progress,
            vec![
                WeekProgress {
                    week: 1,
                    sessions: 2,
                    duration: 70
                },
                WeekProgress {
                    week: 2,
                    sessions: 1,
                    duration: 50
                },
                WeekProgress {
                    week: 3,
                    sessions: 0,
                    duration: 0
                },
                WeekProgress {
                    week: 4,
                    sessions: 0,
                    duration: 0
                },
                WeekProgress {
                    week: 5,
                    sessions: 2,
                    duration: 130
                },
            ]
        );
    }

    #[test]
    fn test_monthly_report_totals_and_distribution() {
        let sessions = [
            session(
                1,
                datetime(2024, 5, 2, 18, 0, 0),
                60,
                vec![
                    exercise("Run", BodyPart::Cardio, &[(1, 0.0)]),
                    exercise("Stretch", BodyPart::Stretching, &[(1, 0.0), (1, 0.0)]),
                ],
                &[],
            ),
            session(
                2,
                datetime(2024, 4, 30, 18, 0, 0),
                60,
                vec![exercise("Run", BodyPart::Cardio, &[(1, 0.0)])],
                &[],
            ),
        ];

        let report = monthly_report(&sessions, date(2024, 5, 31));

        assert_eq!(report.total_sessions, 1);
        assert_eq!(report.total_duration, 60);
        assert_eq!(report.body_part_distribution[&BodyPart::Cardio], 1);
        assert_eq!(report.body_part_distribution[&BodyPart::Stretching], 2);
        assert_eq!(report.body_part_distribution.values().sum::<u32>(), 3);
    }

    #[rstest]
    #[case::no_photos(vec![vec![], vec![]], "", "")]
    #[case::single_photo(vec![vec!["a.jpg"], vec![]], "a.jpg", "a.jpg")]
    #[case::multiple_sessions(vec![vec!["a.jpg", "b.jpg"], vec!["c.jpg"]], "a.jpg", "c.jpg")]
    fn test_monthly_report_before_after_photos(
        #[case] photos: Vec<Vec<&str>>,
        #[case] before: &str,
        #[case] after: &str,
    ) {
        let sessions = (1..)
            .zip(&photos)
            .map(|(day, p)| session(u128::from(day), datetime(2024, 5, day, 18, 0, 0), 60, vec![], p))
            .collect::<Vec<_>>();

        assert_eq!(
            monthly_report(&sessions, date(2024, 5, 1)).before_after_photos,
            BeforeAfterPhotos {
                before: before.to_string(),
                after: after.to_string(),
            }
        );
    }

    #[test]
    fn test_monthly_report_before_after_photos_chronological() {
        let sessions = [
            session(2, datetime(2024, 5, 20, 18, 0, 0), 60, vec![], &["late.jpg"]),
            session(1, datetime(2024, 5, 2, 18, 0, 0), 60, vec![], &["early.jpg"]),
        ];

        assert_eq!(
            monthly_report(&sessions, date(2024, 5, 1)).before_after_photos,
            BeforeAfterPhotos {
                before: "early.jpg".to_string(),
                after: "late.jpg".to_string(),
            }
        );
    }

    #[test]
    fn test_dashboard() {
        let sessions = [
            session(1, datetime(2024, 6, 3, 18, 0, 0), 30, vec![], &[]),
            session(
                2,
                datetime(2024, 6, 11, 18, 0, 0),
                45,
                vec![exercise("Squat", BodyPart::Legs, &[(5, 100.0); 3])],
                &[],
            ),
            session(3, datetime(2024, 6, 12, 18, 0, 0), 60, vec![], &[]),
            session(4, datetime(2024, 5, 30, 18, 0, 0), 60, vec![], &[]),
        ];

        let dashboard = dashboard(&sessions, date(2024, 6, 13), 3);

        assert_eq!(
            dashboard.week,
            Interval::from(date(2024, 6, 10)..=date(2024, 6, 16))
        );
        assert_eq!(dashboard.sessions, 2);
        assert_eq!(dashboard.duration, 105);
        assert_eq!(dashboard.sets, 3);
        assert_eq!(
            dashboard
                .recent
                .iter()
                .map(|s| s.id.clone())
                .collect::<Vec<_>>(),
            vec![
                WorkoutSessionID::from(3),
                WorkoutSessionID::from(2),
                WorkoutSessionID::from(1)
            ]
        );
    }
}
