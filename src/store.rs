use crate::error::{MaptyError, Result};
use crate::storage::KeyValueStorage;
use crate::types::Workout;

pub const DEFAULT_STORAGE_KEY: &str = "workouts";

/// The whole workout collection, kept as one JSON array under a fixed key.
///
/// Every save rewrites the full collection. Loading rebuilds typed
/// `Workout` variants from each record's `type` field and keeps the stored
/// description, pace and speed as they were written.
#[derive(Debug)]
pub struct WorkoutStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> WorkoutStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub fn save(&mut self, workouts: &[Workout]) -> Result<()> {
        let json = serde_json::to_string(workouts)?;
        self.storage.set_item(&self.key, &json)?;
        tracing::debug!(key = %self.key, count = workouts.len(), "saved workouts");
        Ok(())
    }

    /// Empty when nothing is stored; `MalformedStoredData` when the stored
    /// value is not a workout array.
    pub fn load(&self) -> Result<Vec<Workout>> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            return Ok(Vec::new());
        };

        let workouts: Vec<Workout> =
            serde_json::from_str(&raw).map_err(|source| MaptyError::MalformedStoredData {
                key: self.key.clone(),
                source,
            })?;

        tracing::debug!(key = %self.key, count = workouts.len(), "loaded workouts");
        Ok(workouts)
    }

    /// Leaves any in-memory collection untouched.
    pub fn clear(&mut self) -> Result<()> {
        self.storage.remove_item(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::types::{Coordinates, WorkoutKind};
    use crate::workout::{create_cycling, create_running, register_click};
    use serde_json::Value as JsonValue;

    const LONDON: Coordinates = Coordinates::new(51.5, -0.12);

    fn sample() -> Vec<Workout> {
        let mut run: Workout = create_running(LONDON, 5.2, 24.0, 178.0).unwrap().into();
        register_click(&mut run);
        let ride = create_cycling(Coordinates::new(48.85, 2.35), 27.0, 95.0, -40.0)
            .unwrap()
            .into();
        vec![run, ride]
    }

    #[test]
    fn load_on_absent_key_is_empty() {
        let store = WorkoutStore::new(MemoryStorage::new());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_keeps_order_and_every_field() {
        let workouts = sample();
        let mut store = WorkoutStore::new(MemoryStorage::new());
        store.save(&workouts).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].kind(), WorkoutKind::Running);
        assert_eq!(loaded[1].kind(), WorkoutKind::Cycling);
        assert_eq!(loaded, workouts);
        assert_eq!(loaded[0].click_count(), 1);
    }

    #[test]
    fn save_overwrites_including_with_empty() {
        let mut store = WorkoutStore::new(MemoryStorage::new());
        store.save(&sample()).unwrap();
        store.save(&[]).unwrap();
        assert!(store.storage().get_item("workouts").unwrap().is_some());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn clear_then_load_is_empty_and_clear_twice_is_fine() {
        let mut store = WorkoutStore::new(MemoryStorage::new());
        store.save(&sample()).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_empty());
        assert!(store.storage().get_item("workouts").unwrap().is_none());
    }

    #[test]
    fn stored_record_uses_documented_field_names() {
        let mut store = WorkoutStore::new(MemoryStorage::new());
        store.save(&sample()).unwrap();

        let raw = store.storage().get_item("workouts").unwrap().unwrap();
        let v: JsonValue = serde_json::from_str(&raw).unwrap();

        let run = &v[0];
        assert_eq!(run["type"], "running");
        assert_eq!(run["coordinates"], serde_json::json!([51.5, -0.12]));
        assert_eq!(run["clickCount"], 1);
        for field in [
            "id",
            "createdAtEpochMs",
            "distanceKm",
            "durationMin",
            "description",
            "cadenceSpm",
            "paceMinPerKm",
        ] {
            assert!(run.get(field).is_some(), "running record missing {field}");
        }

        let ride = &v[1];
        assert_eq!(ride["type"], "cycling");
        assert_eq!(ride["elevationGainM"], -40.0);
        assert!(ride.get("speedKmPerH").is_some());
        assert!(ride.get("cadenceSpm").is_none());
    }

    #[test]
    fn stored_derived_values_are_not_recomputed() {
        let raw = r#"[{
            "type": "running", "id": "0000000001", "createdAtEpochMs": 1713096000000,
            "coordinates": [51.5, -0.12], "distanceKm": 5, "durationMin": 25,
            "description": "Morning loop", "clickCount": 3,
            "cadenceSpm": 170, "paceMinPerKm": 9.99
        }]"#;
        let mut storage = MemoryStorage::new();
        storage.set_item("workouts", raw).unwrap();

        let loaded = WorkoutStore::new(storage).load().unwrap();
        let Workout::Running(r) = &loaded[0] else {
            panic!("expected a running workout");
        };
        assert!((r.pace_min_per_km() - 9.99).abs() < f64::EPSILON);
        assert_eq!(crate::workout::describe(&loaded[0]), "Morning loop");
        assert_eq!(loaded[0].click_count(), 3);
    }

    #[test]
    fn malformed_data_is_reported() {
        for raw in ["not json", r#"{"workouts": []}"#, r#"[{"type": "swimming"}]"#] {
            let mut storage = MemoryStorage::new();
            storage.set_item("workouts", raw).unwrap();
            let err = WorkoutStore::new(storage).load().unwrap_err();
            assert!(
                matches!(err, MaptyError::MalformedStoredData { .. }),
                "{raw}: {err:?}"
            );
        }
    }

    #[test]
    fn generated_values_survive_save_and_load_bit_for_bit() {
        use crate::workout::{create_cycling_at, create_running_at};
        use chrono::{TimeZone, Utc};

        // xorshift64 gives full-mantissa floats without pulling in a RNG crate.
        let mut state = 0x9E37_79B9_7F4A_7C15_u64;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 11) as f64 / (1_u64 << 53) as f64
        };

        let created = Utc.timestamp_millis_opt(1_713_096_000_000).single().unwrap();
        let mut workouts = Vec::new();
        for i in 0..2_000 {
            let at = Coordinates::new(next() * 180.0 - 90.0, next() * 360.0 - 180.0);
            let distance = next().mul_add(60.0, 0.01);
            let duration = next().mul_add(300.0, 0.5);
            let w: Workout = if i % 2 == 0 {
                create_running_at(created, at, distance, duration, next().mul_add(200.0, 1.0))
                    .unwrap()
                    .into()
            } else {
                create_cycling_at(created, at, distance, duration, next() * 4000.0 - 2000.0)
                    .unwrap()
                    .into()
            };
            workouts.push(w);
        }

        let mut store = WorkoutStore::new(MemoryStorage::new());
        store.save(&workouts).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded.len(), workouts.len());
        for (i, (before, after)) in workouts.iter().zip(&loaded).enumerate() {
            assert_eq!(after, before, "record {i} changed across save/load");
        }
    }

    #[test]
    fn custom_key_is_used() {
        let mut store = WorkoutStore::with_key(MemoryStorage::new(), "mapty-test");
        store.save(&sample()).unwrap();
        assert!(store.storage().get_item("mapty-test").unwrap().is_some());
        assert!(store.storage().get_item("workouts").unwrap().is_none());
    }
}
