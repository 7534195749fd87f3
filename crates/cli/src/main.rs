#![warn(clippy::pedantic)]

use std::{path::PathBuf, sync::Arc};

use ::log::{error, warn};
use anyhow::{Context, Result, anyhow};
use clap::Parser;
use trainlog_domain as domain;
use trainlog_storage::{legacy, rest::Rest, sqlite::SqliteStore, synced::SyncRepository};

use crate::{
    cli::{Cli, Command, ReportCmd, SyncCmd},
    commands::{Repository, Service, report, sync, workout},
    log::{LogFile, Repository as _},
    settings::{Settings, SettingsFile, SettingsRepository},
};

mod cli;
mod commands;
mod log;
mod settings;

const APP_DIR: &str = "trainlog";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = data_dir()?;
    let log_file = Arc::new(LogFile::new(data_dir.join("log.json")));
    log::init(log_file.clone(), cli.log_level()).map_err(|err| anyhow!("{err}"))?;

    let settings_file = SettingsFile::new(match cli.config {
        Some(ref path) => path.clone(),
        None => dirs::config_dir()
            .context("no configuration directory")?
            .join(APP_DIR)
            .join("settings.json"),
    });
    let settings = settings_file
        .read_settings()
        .await
        .with_context(|| format!("failed to read {}", settings_file.path().display()))?
        .with_env(|name| std::env::var(name).ok());

    let mut service = domain::Service::new(repository(&settings, &data_dir)?);

    let legacy_file = data_dir.join("legacy.json");
    if !matches!(cli.command, Command::Migrate { .. }) && legacy_file.exists() {
        if let Err(err) =
            legacy::migrate_legacy(&legacy::LegacyStore::new(&legacy_file), service.repository())
                .await
        {
            error!("failed to migrate legacy workouts: {err}");
        }
    }

    run(cli.command, &mut service, &settings_file, settings, &data_dir, &log_file).await
}

async fn run(
    command: Command,
    service: &mut Service,
    settings_file: &SettingsFile,
    settings: Settings,
    data_dir: &std::path::Path,
    log_file: &LogFile,
) -> Result<()> {
    match command {
        Command::List { limit } => workout::list(service, limit).await,
        Command::Show { id } => workout::show(service, &id).await,
        Command::Add(args) => workout::add(service, args).await,
        Command::Feedback { id, text } => workout::feedback(service, &id, &text).await,
        Command::Delete { id, yes } => workout::delete(service, &id, yes).await,
        Command::Report(ReportCmd::Weekly { date }) => report::weekly(service, date).await,
        Command::Report(ReportCmd::Monthly { date }) => report::monthly(service, date).await,
        Command::Dashboard { recent } => report::dashboard(service, recent).await,
        Command::Exercises { body_part, search } => {
            report::exercises(body_part.as_deref(), search.as_deref())
        }
        Command::Sync(SyncCmd::Show) => {
            sync::show(service, &settings);
            Ok(())
        }
        Command::Sync(SyncCmd::Generate) => sync::generate(service, settings_file, settings).await,
        Command::Sync(SyncCmd::Bind { code, yes }) => {
            sync::bind(service, settings_file, settings, &code, yes).await
        }
        Command::Sync(SyncCmd::Unbind { clear_local, yes }) => {
            sync::unbind(service, settings_file, settings, clear_local, yes).await
        }
        Command::Sync(SyncCmd::Link { base }) => sync::link(service, &base),
        Command::Watch => sync::watch(service).await,
        Command::Migrate { legacy } => {
            let store =
                legacy::LegacyStore::new(legacy.unwrap_or_else(|| data_dir.join("legacy.json")));
            let count = legacy::migrate_legacy(&store, service.repository()).await?;
            println!("{count} workouts migrated from {}", store.path().display());
            Ok(())
        }
        Command::Log => {
            for entry in log_file.read_entries()? {
                println!(
                    "{}  {:<5}  {}",
                    entry.time,
                    entry.level.as_str(),
                    entry.message
                );
            }
            Ok(())
        }
    }
}

fn data_dir() -> Result<PathBuf> {
    Ok(dirs::data_dir()
        .context("no data directory")?
        .join(APP_DIR))
}

fn repository(settings: &Settings, data_dir: &std::path::Path) -> Result<Repository> {
    let database = settings
        .database
        .clone()
        .unwrap_or_else(|| data_dir.join("workouts.db"));
    if let Some(parent) = database.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let local = SqliteStore::open(&database)
        .with_context(|| format!("failed to open {}", database.display()))?;

    let remote = settings
        .remote()
        .and_then(|(url, api_key)| match Rest::new(url, api_key) {
            Ok(rest) => Some(rest),
            Err(err) => {
                warn!("remote replica unavailable: {err}");
                None
            }
        });

    Ok(SyncRepository::new(local, remote, settings.sync_token()))
}
