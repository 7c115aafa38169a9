//! Workout entry form: raw text fields in, validated `Workout` or an alert out.

use crate::dlog;
use crate::types::{Coordinates, Workout};
use crate::workout::{create_cycling_at, create_running_at};
use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertIcon {
    Error,
    Info,
}

/// Message shown to the user in place of a modal dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub icon: AlertIcon,
    pub title: String,
    pub text: String,
}

impl Alert {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            icon: AlertIcon::Error,
            title: "ERROR".to_string(),
            text: text.into(),
        }
    }

    pub fn confirm_reset() -> Self {
        Self {
            icon: AlertIcon::Info,
            title: "Are you sure?".to_string(),
            text: "Deleting the data will result in irreversible data loss!".to_string(),
        }
    }

    pub fn invalid_running() -> Self {
        Self::error("Unfortunately, you cannot use negative numbers or letters in those fields!")
    }

    pub fn invalid_cycling() -> Self {
        Self::error(
            "Unfortunately, you cannot use negative numbers or letters in those fields. \
             Please use positive numbers as negative numbers are only permitted in elevation field!",
        )
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.text)
    }
}

/// Field values exactly as the user typed them.
#[derive(Debug, Clone)]
pub enum Submission<'a> {
    Running {
        coordinates: Coordinates,
        distance: &'a str,
        duration: &'a str,
        cadence: &'a str,
    },
    Cycling {
        coordinates: Coordinates,
        distance: &'a str,
        duration: &'a str,
        elevation: &'a str,
    },
}

/// Numeric coercion of a text field: blank reads as 0, garbage as NaN.
pub fn parse_field(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

fn all_positive(values: &[f64]) -> bool {
    values.iter().all(|v| *v > 0.0)
}

/// Validate the submission and build the workout stamped `created_at`.
pub fn submit(submission: &Submission<'_>, created_at: DateTime<Utc>) -> Result<Workout, Alert> {
    match *submission {
        Submission::Running {
            coordinates,
            distance,
            duration,
            cadence,
        } => {
            let nums = [parse_field(distance), parse_field(duration), parse_field(cadence)];
            if !all_finite(&nums) || !all_positive(&nums) {
                dlog!("form_rejected kind=running distance={distance:?} duration={duration:?} cadence={cadence:?}");
                return Err(Alert::invalid_running());
            }
            let [distance_km, duration_min, cadence_spm] = nums;
            create_running_at(created_at, coordinates, distance_km, duration_min, cadence_spm)
                .map(Workout::from)
                .map_err(|e| Alert::error(e.to_string()))
        }
        Submission::Cycling {
            coordinates,
            distance,
            duration,
            elevation,
        } => {
            let distance_km = parse_field(distance);
            let duration_min = parse_field(duration);
            let elevation_gain_m = parse_field(elevation);
            if !all_finite(&[distance_km, duration_min, elevation_gain_m])
                || !all_positive(&[distance_km, duration_min])
            {
                dlog!("form_rejected kind=cycling distance={distance:?} duration={duration:?} elevation={elevation:?}");
                return Err(Alert::invalid_cycling());
            }
            create_cycling_at(created_at, coordinates, distance_km, duration_min, elevation_gain_m)
                .map(Workout::from)
                .map_err(|e| Alert::error(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WorkoutKind;

    const HERE: Coordinates = Coordinates::new(51.5, -0.12);

    fn running<'a>(distance: &'a str, duration: &'a str, cadence: &'a str) -> Submission<'a> {
        Submission::Running {
            coordinates: HERE,
            distance,
            duration,
            cadence,
        }
    }

    fn cycling<'a>(distance: &'a str, duration: &'a str, elevation: &'a str) -> Submission<'a> {
        Submission::Cycling {
            coordinates: HERE,
            distance,
            duration,
            elevation,
        }
    }

    #[test]
    fn parse_field_coerces_like_a_number_input() {
        assert!((parse_field(" 5.2 ") - 5.2).abs() < f64::EPSILON);
        assert!(parse_field("").abs() < f64::EPSILON);
        assert!(parse_field("   ").abs() < f64::EPSILON);
        assert!(parse_field("abc").is_nan());
        assert!((parse_field("-40") + 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn valid_running_form_builds_running_workout() {
        let w = submit(&running("5.2", "24", "178"), Utc::now()).unwrap();
        assert_eq!(w.kind(), WorkoutKind::Running);
        assert!((w.distance_km() - 5.2).abs() < f64::EPSILON);
        assert_eq!(w.coordinates(), HERE);
    }

    #[test]
    fn running_form_rejects_blank_negative_and_letters() {
        for sub in [
            running("5.2", "24", ""),
            running("-5", "24", "178"),
            running("5", "abc", "178"),
            running("0", "24", "178"),
        ] {
            assert_eq!(submit(&sub, Utc::now()).unwrap_err(), Alert::invalid_running());
        }
    }

    #[test]
    fn cycling_form_allows_blank_or_negative_elevation() {
        let w = submit(&cycling("27", "95", ""), Utc::now()).unwrap();
        let Workout::Cycling(c) = w else {
            panic!("expected cycling");
        };
        assert!(c.elevation_gain_m().abs() < f64::EPSILON);

        assert!(submit(&cycling("27", "95", "-523"), Utc::now()).is_ok());
    }

    #[test]
    fn cycling_form_rejects_bad_distance_duration_or_elevation() {
        for sub in [
            cycling("-27", "95", "10"),
            cycling("27", "", "10"),
            cycling("27", "95", "ten"),
        ] {
            assert_eq!(submit(&sub, Utc::now()).unwrap_err(), Alert::invalid_cycling());
        }
    }

    #[test]
    fn model_rejection_becomes_an_error_alert() {
        let sub = Submission::Running {
            coordinates: Coordinates::new(120.0, 0.0),
            distance: "5",
            duration: "24",
            cadence: "178",
        };
        let alert = submit(&sub, Utc::now()).unwrap_err();
        assert_eq!(alert.icon, AlertIcon::Error);
        assert!(alert.text.contains("latitude"), "{alert}");
    }
}
