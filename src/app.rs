use crate::error::{MaptyError, Result};
use crate::form::{self, Alert, Submission};
use crate::render::MapView;
use crate::storage::KeyValueStorage;
use crate::store::WorkoutStore;
use crate::types::Workout;
use crate::workout::{id_for, register_click};
use chrono::{DateTime, Duration, SubsecRound, Utc};

/// Outcome of writing the collection after a change.
#[must_use]
#[derive(Debug)]
pub enum Persisted {
    Saved,
    /// The change is kept in memory only.
    Failed(MaptyError),
}

impl Persisted {
    pub const fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Owns the session's workouts (in insertion order) and the store behind them.
#[derive(Debug)]
pub struct App<S> {
    workouts: Vec<Workout>,
    store: WorkoutStore<S>,
    zoom: u8,
    /// Set when the stored collection could not be read; saving it would
    /// overwrite data this session never saw.
    read_only: bool,
}

impl<S: KeyValueStorage> App<S> {
    /// Load whatever the store holds. Unreadable or malformed data leaves the
    /// session empty and is handed back as a warning. If the storage itself
    /// could not be read, nothing is saved until `reset`.
    pub fn open(store: WorkoutStore<S>, zoom: u8) -> (Self, Option<MaptyError>) {
        let (workouts, warning) = match store.load() {
            Ok(workouts) => (workouts, None),
            Err(e) => (Vec::new(), Some(e)),
        };
        let read_only = matches!(warning, Some(MaptyError::StorageUnavailable { .. }));

        (
            Self {
                workouts,
                store,
                zoom,
                read_only,
            },
            warning,
        )
    }

    /// True while changes stay in memory only.
    pub const fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn find(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    pub const fn store(&self) -> &WorkoutStore<S> {
        &self.store
    }

    /// Earliest millisecond at or after `now` whose id is not taken yet.
    pub fn next_created_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let mut at = now.trunc_subsecs(3);
        while self.find(&id_for(at)).is_some() {
            at += Duration::milliseconds(1);
        }
        at
    }

    /// Validate a form submission, record it and persist the collection.
    pub fn submit(&mut self, submission: &Submission<'_>) -> std::result::Result<Persisted, Alert> {
        let at = self.next_created_at(Utc::now());
        let workout = form::submit(submission, at)?;
        Ok(self.add(workout))
    }

    pub fn add(&mut self, workout: Workout) -> Persisted {
        tracing::info!(id = %workout.id(), kind = %workout.kind(), "workout added");
        self.workouts.push(workout);
        self.persist()
    }

    /// Centre the map on a workout and count the click. `None` for an unknown id.
    pub fn focus(&mut self, id: &str) -> Option<(MapView, Persisted)> {
        let zoom = self.zoom;
        let workout = self.workouts.iter_mut().find(|w| w.id() == id)?;
        register_click(workout);
        let view = MapView::on(workout, zoom);
        Some((view, self.persist()))
    }

    /// Remove the stored collection, then drop the in-memory one. Saving
    /// resumes afterwards.
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear()?;
        tracing::info!(discarded = self.workouts.len(), "workouts reset");
        self.workouts.clear();
        self.read_only = false;
        Ok(())
    }

    fn persist(&mut self) -> Persisted {
        if self.read_only {
            return Persisted::Failed(MaptyError::ReadOnlySession {
                key: self.store.key().to_string(),
            });
        }
        match self.store.save(&self.workouts) {
            Ok(()) => Persisted::Saved,
            Err(e) => Persisted::Failed(e),
        }
    }
}
