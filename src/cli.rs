use crate::render::{DEFAULT_ZOOM_LEVEL, ListOrder};
use crate::store::DEFAULT_STORAGE_KEY;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

const DEFAULT_DATA_DIR: &str = ".mapty";

#[derive(Parser, Debug)]
#[command(
    name = "mapty",
    about = "Log running and cycling workouts pinned to map coordinates"
)]
pub struct Cli {
    /// Directory holding the saved workouts.
    ///
    /// Default: ./.mapty
    #[arg(long, env = "MAPTY_DATA_DIR", default_value = DEFAULT_DATA_DIR, global = true)]
    pub data_dir: PathBuf,

    /// Key the workout collection is stored under.
    #[arg(long, env = "MAPTY_STORAGE_KEY", default_value = DEFAULT_STORAGE_KEY, global = true)]
    pub storage_key: String,

    /// Zoom level used when centring the map on a workout.
    #[arg(long, default_value_t = DEFAULT_ZOOM_LEVEL, global = true)]
    pub zoom: u8,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Record a workout at a map position.
    #[command(subcommand)]
    Add(AddCmd),

    /// Print the workout list.
    List {
        #[arg(long, value_enum, default_value_t = ListOrder::Newest)]
        sort: ListOrder,
    },

    /// Print one map marker per workout.
    Markers,

    /// Centre the map on a workout.
    Show {
        /// Workout id as printed by `list`.
        id: String,
    },

    /// Delete every saved workout.
    Reset {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum AddCmd {
    Running {
        #[command(flatten)]
        common: CommonFields,

        /// Steps per minute.
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        cadence: String,
    },
    Cycling {
        #[command(flatten)]
        common: CommonFields,

        /// Metres climbed; negative for a net descent.
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        elevation: String,
    },
}

/// The clicked map position plus the fields both workout kinds share.
///
/// Numeric fields are taken as typed so the form can reject them with its own
/// message.
#[derive(Args, Debug)]
pub struct CommonFields {
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,

    /// Kilometres.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub distance: String,

    /// Minutes.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub duration: String,
}
