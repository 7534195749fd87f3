use std::io::{BufRead, Write};

use anyhow::{Result, bail};
use trainlog_domain::{self as domain, WorkoutService};
use trainlog_storage::{
    rest::{ReqwestSendRequest, Rest},
    sqlite::SqliteStore,
    synced::SyncRepository,
};

pub mod report;
pub mod sync;
pub mod workout;

pub type Repository = SyncRepository<SqliteStore, Rest<ReqwestSendRequest>>;
pub type Service = domain::Service<Repository>;

/// Ask a yes/no question on the terminal. Anything but "y" or "yes" declines.
pub fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Find the workout whose id is `id` or starts with `id`.
pub async fn resolve_id(
    service: &impl WorkoutService,
    id: &str,
) -> Result<domain::WorkoutSessionID> {
    let id = id.trim();
    if id.is_empty() {
        bail!("workout id must not be empty");
    }

    let candidates = service
        .get_workouts()
        .await?
        .into_iter()
        .filter(|s| s.id.as_str() == id || s.id.starts_with(id))
        .map(|s| s.id)
        .collect::<Vec<_>>();

    if let Some(exact) = candidates.iter().find(|c| c.as_str() == id) {
        return Ok(exact.clone());
    }

    match candidates.as_slice() {
        [] => bail!("no workout with id {id}"),
        [candidate] => Ok(candidate.clone()),
        _ => bail!("id {id} is ambiguous ({} workouts match)", candidates.len()),
    }
}
