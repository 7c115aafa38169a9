//! Terminal stand-ins for the map markers and the workout list.

use crate::types::{Coordinates, Workout, WorkoutKind};
use crate::workout::describe;

pub const DEFAULT_ZOOM_LEVEL: u8 = 15;

/// Where the map should be centred and how far zoomed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
}

impl MapView {
    pub fn on(workout: &Workout, zoom: u8) -> Self {
        Self {
            center: workout.coordinates(),
            zoom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ListOrder {
    /// Most recently added first.
    #[default]
    Newest,
    Oldest,
    /// Alphabetical by kind (cycling, then running), newest first within each.
    Kind,
}

pub const fn icon(kind: WorkoutKind) -> &'static str {
    match kind {
        WorkoutKind::Running => "🏃‍♂️",
        WorkoutKind::Cycling => "🚴‍♀️",
    }
}

/// Popup text of the marker pinned at the workout's coordinates.
pub fn marker(workout: &Workout) -> String {
    format!(
        "[{}] {} {}",
        workout.coordinates(),
        icon(workout.kind()),
        describe(workout)
    )
}

pub fn map_view(view: &MapView) -> String {
    format!("map centred on [{}] at zoom {}", view.center, view.zoom)
}

/// One list entry: shared stats first, then the variant's own.
pub fn list_entry(workout: &Workout) -> String {
    let mut line = format!(
        "{id}  {desc}\n    {icon} {dist} km   ⏱ {dur} min",
        id = workout.id(),
        desc = describe(workout),
        icon = icon(workout.kind()),
        dist = workout.distance_km(),
        dur = workout.duration_min(),
    );

    match workout {
        Workout::Running(r) => {
            line.push_str(&format!(
                "   ⚡️ {:.1} min/km   🦶🏼 {} spm",
                r.pace_min_per_km(),
                r.cadence_spm()
            ));
        }
        Workout::Cycling(c) => {
            line.push_str(&format!(
                "   ⚡️ {:.1} km/h   ⛰ {} m",
                c.speed_km_per_h(),
                c.elevation_gain_m()
            ));
        }
    }

    line
}

/// Display order over a collection kept in insertion order.
pub fn ordered(workouts: &[Workout], order: ListOrder) -> Vec<&Workout> {
    let mut out: Vec<&Workout> = workouts.iter().collect();
    match order {
        ListOrder::Oldest => {}
        ListOrder::Newest => out.reverse(),
        ListOrder::Kind => {
            out.reverse();
            // Stable, so newest-first survives within each kind.
            out.sort_by_key(|w| w.kind().as_str());
        }
    }
    out
}
