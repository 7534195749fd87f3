use std::{fmt::Write, str::FromStr};

use anyhow::{Result, bail};
use chrono::{Local, NaiveDate};
use strum::IntoEnumIterator;
use trainlog_domain::{self as domain, WorkoutService, catalog};

use super::workout::format_summary;

pub async fn weekly(service: &impl WorkoutService, date: Option<NaiveDate>) -> Result<()> {
    let report = service
        .get_weekly_report(date.unwrap_or_else(today))
        .await?;
    print!("{}", format_weekly_report(&report));
    Ok(())
}

pub async fn monthly(service: &impl WorkoutService, date: Option<NaiveDate>) -> Result<()> {
    let report = service
        .get_monthly_report(date.unwrap_or_else(today))
        .await?;
    print!("{}", format_monthly_report(&report));
    Ok(())
}

pub async fn dashboard(service: &impl WorkoutService, recent: usize) -> Result<()> {
    let dashboard = service.get_dashboard(today(), recent).await?;
    print!("{}", format_dashboard(&dashboard));
    Ok(())
}

pub fn exercises(body_part: Option<&str>, search: Option<&str>) -> Result<()> {
    if let Some(query) = search {
        let results = catalog::search(query);
        if results.is_empty() {
            println!("No exercise matches \"{query}\"");
        }
        for (body_part, name) in results {
            println!("{name} ({body_part})");
        }
        return Ok(());
    }

    let body_parts = match body_part {
        Some(body_part) => match domain::BodyPart::from_str(body_part) {
            Ok(body_part) => vec![body_part],
            Err(_) => bail!(
                "unknown body part \"{body_part}\" (expected one of: {})",
                domain::BodyPart::iter()
                    .map(|b| b.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        },
        None => domain::BodyPart::iter().collect(),
    };

    for body_part in body_parts {
        println!("{body_part}");
        for name in catalog::common_exercises(body_part) {
            println!("  {name}");
        }
    }

    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_weekly_report(report: &domain::WeeklyReport) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "Week {} – {}",
        report.week_start.format("%Y-%m-%d"),
        report.week_end.format("%Y-%m-%d")
    );
    let _ = writeln!(
        output,
        "{} sessions, {} min, {} sets",
        report.total_sessions, report.total_duration, report.total_sets
    );

    write_distribution(&mut output, &report.body_part_distribution);

    if !report.progress_comparison.is_empty() {
        let _ = writeln!(output, "\nProgress");
        for progress in &report.progress_comparison {
            if progress.is_new() {
                let _ = writeln!(
                    output,
                    "  {}: {} kg (new)",
                    progress.exercise_name, progress.current_week_max
                );
            } else {
                let _ = writeln!(
                    output,
                    "  {}: {} kg → {} kg ({:+.1} %)",
                    progress.exercise_name,
                    progress.previous_week_max,
                    progress.current_week_max,
                    progress.improvement
                );
            }
        }
    }

    if !report.photos.is_empty() {
        let _ = writeln!(output, "\nPhotos: {}", report.photos.len());
    }

    output
}

pub fn format_monthly_report(report: &domain::MonthlyReport) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", report.month.format("%B %Y"));
    let _ = writeln!(
        output,
        "{} sessions, {} min",
        report.total_sessions, report.total_duration
    );

    let _ = writeln!(output, "\nWeeks");
    for week in &report.weekly_progress {
        let _ = writeln!(
            output,
            "  {}: {} sessions, {} min",
            week.week, week.sessions, week.duration
        );
    }

    write_distribution(&mut output, &report.body_part_distribution);

    if !report.top_exercises.is_empty() {
        let _ = writeln!(output, "\nTop exercises");
        for exercise in &report.top_exercises {
            let _ = writeln!(
                output,
                "  {}: {} sets, max {} kg",
                exercise.name, exercise.total_sets, exercise.max_weight
            );
        }
    }

    if !report.progress_curve.is_empty() {
        let _ = writeln!(output, "\nVolume");
        for point in &report.progress_curve {
            let _ = writeln!(
                output,
                "  {}: {} kg",
                point.date.format("%Y-%m-%d"),
                point.total_volume
            );
        }
    }

    let photos = &report.before_after_photos;
    if !photos.before.is_empty() {
        let _ = writeln!(output, "\nBefore: {}\nAfter: {}", photos.before, photos.after);
    }

    output
}

pub fn format_dashboard(dashboard: &domain::Dashboard) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "This week ({} – {}): {} sessions, {} min, {} sets",
        dashboard.week.first.format("%Y-%m-%d"),
        dashboard.week.last.format("%Y-%m-%d"),
        dashboard.sessions,
        dashboard.duration,
        dashboard.sets
    );

    if dashboard.recent.is_empty() {
        let _ = writeln!(output, "\nNo workouts recorded yet");
    } else {
        let _ = writeln!(output, "\nRecent workouts");
        for session in &dashboard.recent {
            let _ = writeln!(output, "  {}", format_summary(session));
        }
    }

    output
}

fn write_distribution(
    output: &mut String,
    distribution: &std::collections::BTreeMap<domain::BodyPart, u32>,
) {
    let trained = distribution
        .iter()
        .filter(|(_, sets)| **sets > 0)
        .map(|(body_part, sets)| format!("{body_part} {sets}"))
        .collect::<Vec<_>>();
    if !trained.is_empty() {
        let _ = writeln!(output, "\nSets by body part: {}", trained.join(", "));
    }
}
