use crate::error::{MaptyError, Result};
use crate::types::{Coordinates, CyclingWorkout, RunningWorkout, Workout, WorkoutBase, WorkoutKind};
use chrono::{DateTime, Local, SubsecRound, Utc};

const ID_DIGITS: usize = 10;

/// Build a running workout stamped with the current time.
pub fn create_running(
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    cadence_spm: f64,
) -> Result<RunningWorkout> {
    create_running_at(Utc::now(), coordinates, distance_km, duration_min, cadence_spm)
}

/// Build a cycling workout stamped with the current time.
pub fn create_cycling(
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    elevation_gain_m: f64,
) -> Result<CyclingWorkout> {
    create_cycling_at(Utc::now(), coordinates, distance_km, duration_min, elevation_gain_m)
}

/// Distance, duration and cadence must be finite and strictly positive.
/// Pace is fixed here and never recomputed.
pub fn create_running_at(
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    cadence_spm: f64,
) -> Result<RunningWorkout> {
    check_coordinates(coordinates)?;
    check_positive("distance", distance_km)?;
    check_positive("duration", duration_min)?;
    check_positive("cadence", cadence_spm)?;

    Ok(RunningWorkout {
        base: new_base(
            created_at,
            WorkoutKind::Running,
            coordinates,
            distance_km,
            duration_min,
        ),
        cadence_spm,
        pace_min_per_km: duration_min / distance_km,
    })
}

/// Distance and duration must be finite and strictly positive; elevation
/// only has to be finite.
pub fn create_cycling_at(
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    elevation_gain_m: f64,
) -> Result<CyclingWorkout> {
    check_coordinates(coordinates)?;
    check_positive("distance", distance_km)?;
    check_positive("duration", duration_min)?;
    check_finite("elevation", elevation_gain_m)?;

    Ok(CyclingWorkout {
        base: new_base(
            created_at,
            WorkoutKind::Cycling,
            coordinates,
            distance_km,
            duration_min,
        ),
        elevation_gain_m,
        speed_km_per_h: distance_km / (duration_min / 60.0),
    })
}

pub fn describe(workout: &Workout) -> &str {
    &workout.base().description
}

pub fn register_click(workout: &mut Workout) {
    let base = workout.base_mut();
    base.click_count = base.click_count.saturating_add(1);
}

/// Last ten digits of the epoch milliseconds.
pub fn id_for(created_at: DateTime<Utc>) -> String {
    let ms = created_at.timestamp_millis().to_string();
    ms[ms.len().saturating_sub(ID_DIGITS)..].to_string()
}

/// e.g. "Running on April 14", in local time.
pub fn description_for(kind: WorkoutKind, created_at: DateTime<Utc>) -> String {
    let local = created_at.with_timezone(&Local);
    format!("{} on {}", kind.label(), local.format("%B %-d"))
}

fn new_base(
    created_at: DateTime<Utc>,
    kind: WorkoutKind,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
) -> WorkoutBase {
    // Storage keeps millisecond precision.
    let created_at = created_at.trunc_subsecs(3);
    WorkoutBase {
        id: id_for(created_at),
        created_at,
        coordinates,
        distance_km,
        duration_min,
        description: description_for(kind, created_at),
        click_count: 0,
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MaptyError::InvalidInput {
            field,
            value,
            reason: "not a finite number",
        })
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<()> {
    check_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(MaptyError::InvalidInput {
            field,
            value,
            reason: "must be greater than zero",
        })
    }
}

fn check_coordinates(c: Coordinates) -> Result<()> {
    check_finite("latitude", c.lat)?;
    check_finite("longitude", c.lng)?;
    if !(-90.0..=90.0).contains(&c.lat) {
        return Err(MaptyError::InvalidInput {
            field: "latitude",
            value: c.lat,
            reason: "must be between -90 and 90",
        });
    }
    if !(-180.0..=180.0).contains(&c.lng) {
        return Err(MaptyError::InvalidInput {
            field: "longitude",
            value: c.lng,
            reason: "must be between -180 and 180",
        });
    }
    Ok(())
}
