#![deny(
    warnings,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, Result};
use clap::Parser;
use mapty::app::{App, Persisted};
use mapty::cli::{self, AddCmd};
use mapty::config::Config;
use mapty::form::{Alert, Submission};
use mapty::storage::KeyValueStorage;
use mapty::types::Coordinates;
use mapty::{dlog, render, utils};
use std::io;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let config = Config::from_cli(&cli).context("checking --storage-key")?;
    dlog!(
        "data_dir={} storage_key={} zoom={}",
        config.data_dir.display(),
        config.storage_key,
        config.zoom
    );

    let (mut app, load_warning) = App::open(config.open_store(), config.zoom);
    if let Some(e) = load_warning {
        tracing::warn!(err = %e, "could not load saved workouts; starting with an empty list");
    }
    if app.is_read_only() {
        tracing::warn!("saving disabled for this run; `mapty reset` discards the unreadable data");
    }

    match cli.cmd {
        cli::Cmd::Add(add) => add_workout(&mut app, &add),
        cli::Cmd::List { sort } => {
            if app.workouts().is_empty() {
                tracing::info!("no workouts yet");
            }
            for w in render::ordered(app.workouts(), sort) {
                println!("{}", render::list_entry(w));
            }
            Ok(())
        }
        cli::Cmd::Markers => {
            for w in app.workouts() {
                println!("{}", render::marker(w));
            }
            Ok(())
        }
        cli::Cmd::Show { id } => {
            let Some((view, persisted)) = app.focus(&id) else {
                anyhow::bail!("No workout with id {id}. Run `mapty list` to see ids.");
            };
            if let Some(w) = app.find(&id) {
                println!("{}", render::marker(w));
            }
            println!("{}", render::map_view(&view));
            report(persisted);
            Ok(())
        }
        cli::Cmd::Reset { yes } => {
            if !yes {
                let alert = Alert::confirm_reset();
                let confirmed = utils::confirm(
                    &alert.to_string(),
                    &mut io::stdin().lock(),
                    &mut io::stderr(),
                )
                .context("reading confirmation")?;
                if !confirmed {
                    tracing::info!("reset cancelled");
                    return Ok(());
                }
            }
            app.reset().context("deleting saved workouts")?;
            println!("All workouts deleted.");
            Ok(())
        }
    }
}

fn add_workout<S: KeyValueStorage>(app: &mut App<S>, add: &AddCmd) -> Result<()> {
    let submission = match add {
        AddCmd::Running { common, cadence } => Submission::Running {
            coordinates: Coordinates::new(common.lat, common.lng),
            distance: &common.distance,
            duration: &common.duration,
            cadence,
        },
        AddCmd::Cycling { common, elevation } => Submission::Cycling {
            coordinates: Coordinates::new(common.lat, common.lng),
            distance: &common.distance,
            duration: &common.duration,
            elevation,
        },
    };

    let persisted = match app.submit(&submission) {
        Ok(p) => p,
        Err(alert) => anyhow::bail!("{}", alert.text),
    };

    if let Some(w) = app.workouts().last() {
        println!("{}", render::marker(w));
        println!("{}", render::list_entry(w));
    }
    report(persisted);
    Ok(())
}

/// A failed write is not fatal: the change stays in this session's memory.
fn report(persisted: Persisted) {
    if let Persisted::Failed(e) = persisted {
        tracing::warn!(err = %e, "change not saved; it only exists for this run");
    }
}
