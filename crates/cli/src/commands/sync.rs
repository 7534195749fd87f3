use std::sync::Arc;

use anyhow::{Result, bail};
use log::{error, info};
use tokio::sync::Notify;
use trainlog_domain::{self as domain, WorkoutRepository, WorkoutService};

use crate::settings::{Settings, SettingsRepository};

use super::{Service, confirm, report};

/// How a sync code was obtained when binding.
#[derive(Debug, PartialEq)]
pub enum Binding {
    Entered(domain::SyncToken),
    /// Requires confirmation before it is bound.
    Link(domain::SyncToken),
}

impl Binding {
    /// Interpret the input as a share link if it contains a query, otherwise as a sync code.
    pub fn parse(input: &str) -> Result<Self> {
        if input.contains('?') {
            match domain::SyncToken::from_deep_link(input) {
                Some(token) => Ok(Binding::Link(token)),
                None => bail!("link contains no sync code"),
            }
        } else {
            Ok(Binding::Entered(domain::SyncToken::new(input)?))
        }
    }

    pub fn token(&self) -> &domain::SyncToken {
        match self {
            Binding::Entered(token) | Binding::Link(token) => token,
        }
    }
}

pub fn show(service: &Service, settings: &Settings) {
    let repository = service.repository();
    match repository.sync_token() {
        Some(token) => println!("Sync code: {token}"),
        None => println!("No sync code bound"),
    }
    if repository.is_remote() {
        println!("Mode: synced");
    } else if settings.remote().is_none() {
        println!("Mode: local (no remote configured)");
    } else {
        println!("Mode: local");
    }
}

pub async fn generate(
    service: &mut Service,
    settings_repository: &impl SettingsRepository,
    settings: Settings,
) -> Result<()> {
    bind_token(
        service,
        settings_repository,
        settings,
        domain::SyncToken::generate(),
    )
    .await
}

pub async fn bind(
    service: &mut Service,
    settings_repository: &impl SettingsRepository,
    settings: Settings,
    input: &str,
    yes: bool,
) -> Result<()> {
    let binding = Binding::parse(input)?;

    if service.repository().sync_token() == Some(binding.token()) {
        println!("Sync code {} is already bound", binding.token());
        return Ok(());
    }

    if let Binding::Link(token) = &binding {
        if !yes && !confirm(&format!("Bind sync code {token} and sync workouts?"))? {
            return Ok(());
        }
    }

    let token = match binding {
        Binding::Entered(token) | Binding::Link(token) => token,
    };
    bind_token(service, settings_repository, settings, token).await
}

async fn bind_token(
    service: &mut Service,
    settings_repository: &impl SettingsRepository,
    mut settings: Settings,
    token: domain::SyncToken,
) -> Result<()> {
    settings.sync_token = Some(token.to_string());
    settings_repository.write_settings(&settings).await?;
    info!("bound sync code {token}");
    println!("Sync code: {token}");

    service.repository_mut().set_sync_token(Some(token));

    if service.repository().is_remote() {
        let sessions = service.get_workouts().await?;
        println!("{} workouts synced", sessions.len());
    } else {
        println!("No remote configured, workouts stay on this device");
    }

    Ok(())
}

pub async fn unbind(
    service: &mut Service,
    settings_repository: &impl SettingsRepository,
    mut settings: Settings,
    clear_local: bool,
    yes: bool,
) -> Result<()> {
    if service.repository().sync_token().is_none() {
        println!("No sync code bound");
        return Ok(());
    }

    if !yes && !confirm("Stop syncing and return to local storage?")? {
        return Ok(());
    }

    settings.sync_token = None;
    settings_repository.write_settings(&settings).await?;
    service.repository_mut().set_sync_token(None);
    info!("unbound sync code");

    if clear_local {
        service.repository().clear_local().await?;
        println!("Removed workouts stored on this device");
    }

    println!("Sync stopped");

    Ok(())
}

pub fn link(service: &Service, base: &str) -> Result<()> {
    match service.repository().sync_token() {
        Some(token) => {
            println!("{}", token.share_link(base));
            Ok(())
        }
        None => bail!("no sync code bound (use `trainlog sync generate`)"),
    }
}

/// Print the dashboard initially and again on every remote change until interrupted.
pub async fn watch(service: &Service) -> Result<()> {
    let changed = Arc::new(Notify::new());
    let notifier = Arc::clone(&changed);

    let Some(subscription) = service
        .repository()
        .subscribe(Arc::new(move || notifier.notify_one()))
    else {
        bail!("watching requires a bound sync code and a configured remote");
    };

    report::dashboard(service, 3).await?;

    loop {
        tokio::select! {
            () = changed.notified() => {
                info!("workouts changed");
                match service.repository().get_all_workouts().await {
                    Ok(sessions) => {
                        println!();
                        print!(
                            "{}",
                            report::format_dashboard(&domain::dashboard(
                                &sessions,
                                chrono::Local::now().date_naive(),
                                3
                            ))
                        );
                    }
                    Err(err) => error!("failed to reload workouts: {err}"),
                }
            }
            result = tokio::signal::ctrl_c() => {
                result?;
                break;
            }
        }
    }

    service.repository().unsubscribe(subscription);

    Ok(())
}
