use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A map position as (latitude, longitude) degrees, stored as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lng]
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Discriminator as written in storage.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields shared by every workout variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutBase {
    pub(crate) id: String,
    #[serde(rename = "createdAtEpochMs", with = "chrono::serde::ts_milliseconds")]
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) coordinates: Coordinates,
    pub(crate) distance_km: f64,
    pub(crate) duration_min: f64,
    pub(crate) description: String,
    pub(crate) click_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunningWorkout {
    #[serde(flatten)]
    pub(crate) base: WorkoutBase,
    pub(crate) cadence_spm: f64,
    pub(crate) pace_min_per_km: f64,
}

impl RunningWorkout {
    pub const fn cadence_spm(&self) -> f64 {
        self.cadence_spm
    }

    /// Minutes per kilometre.
    pub const fn pace_min_per_km(&self) -> f64 {
        self.pace_min_per_km
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CyclingWorkout {
    #[serde(flatten)]
    pub(crate) base: WorkoutBase,
    pub(crate) elevation_gain_m: f64,
    pub(crate) speed_km_per_h: f64,
}

impl CyclingWorkout {
    /// Negative values mean a net descent.
    pub const fn elevation_gain_m(&self) -> f64 {
        self.elevation_gain_m
    }

    pub const fn speed_km_per_h(&self) -> f64 {
        self.speed_km_per_h
    }
}

/// One recorded session. The `type` field of the stored record selects the
/// variant on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Workout {
    Running(RunningWorkout),
    Cycling(CyclingWorkout),
}

impl Workout {
    pub(crate) const fn base(&self) -> &WorkoutBase {
        match self {
            Self::Running(r) => &r.base,
            Self::Cycling(c) => &c.base,
        }
    }

    pub(crate) fn base_mut(&mut self) -> &mut WorkoutBase {
        match self {
            Self::Running(r) => &mut r.base,
            Self::Cycling(c) => &mut c.base,
        }
    }

    pub const fn kind(&self) -> WorkoutKind {
        match self {
            Self::Running(_) => WorkoutKind::Running,
            Self::Cycling(_) => WorkoutKind::Cycling,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.base().created_at
    }

    pub const fn coordinates(&self) -> Coordinates {
        self.base().coordinates
    }

    pub const fn distance_km(&self) -> f64 {
        self.base().distance_km
    }

    pub const fn duration_min(&self) -> f64 {
        self.base().duration_min
    }

    pub const fn click_count(&self) -> u32 {
        self.base().click_count
    }
}

impl From<RunningWorkout> for Workout {
    fn from(r: RunningWorkout) -> Self {
        Self::Running(r)
    }
}

impl From<CyclingWorkout> for Workout {
    fn from(c: CyclingWorkout) -> Self {
        Self::Cycling(c)
    }
}
