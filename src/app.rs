//! Application orchestrator.
//!
//! `Momento` owns one session: the loaded moments, the unlocked-achievement
//! state and the collaborators that persist them. Mutations are applied in
//! memory, saved, and followed by a refresh that recomputes statistics and
//! achievements and persists any newly unlocked ones.

use crate::achievements::{
    Achievement, AchievementEvaluator, NewlyUnlocked, UnlockedAchievements,
};
use crate::aggregate::MomentData;
use crate::config::{ensure_directory_exists, Config};
use crate::db::Database;
use crate::errors::{AppError, AppResult};
use crate::lock::SessionLock;
use crate::moments::{Moment, MomentCollection, MomentUpdate, NewMoment};
use crate::photos::{image_file_exists, PhotoStore};
use crate::stats::{calculate_stats, MomentStats};
use crate::store;
use chrono::{DateTime, TimeZone, Utc};
use rand::Rng;
use std::path::Path;
use tracing::{debug, info, warn};

/// Everything derived from one snapshot of moments.
#[derive(Debug, Clone, PartialEq)]
pub struct Refresh {
    pub stats: MomentStats,
    pub achievements: Vec<Achievement>,
    pub newly_unlocked: Vec<NewlyUnlocked>,
}

/// Result of a mutating command together with the refresh that followed it.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation<T> {
    pub value: T,
    pub refresh: Refresh,
}

pub struct Momento {
    config: Config,
    db: Database,
    photos: PhotoStore,
    moments: MomentCollection,
    unlocked: UnlockedAchievements,
    evaluator: AchievementEvaluator,
    // held for the lifetime of the session
    _lock: SessionLock,
}

impl Momento {
    /// Opens the data directory, takes the session lock and loads state.
    ///
    /// Moments whose photo no longer exists keep their other fields but lose
    /// the image reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the directory cannot
    /// be created, another process holds the lock, or the database cannot be
    /// opened.
    pub fn open(config: Config) -> AppResult<Self> {
        config.validate()?;
        ensure_directory_exists(&config.data_dir)?;
        ensure_directory_exists(&config.photos_dir)?;

        let lock = SessionLock::acquire(&config.lock_path())?;
        let db = Database::open(&config.db_path)?;

        let (moments, unlocked) = {
            let conn = db.get_conn()?;
            let mut moments = store::load_moments(&conn, Utc::now())?;
            drop_missing_images(&mut moments);
            (moments, store::load_unlocked(&conn)?)
        };
        info!(
            "Loaded {} moments, {} unlocked achievements",
            moments.len(),
            unlocked.len()
        );

        Ok(Momento {
            photos: PhotoStore::new(config.photos_dir.clone()),
            config,
            db,
            moments: MomentCollection::new(moments),
            unlocked,
            evaluator: AchievementEvaluator::default(),
            _lock: lock,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn moments(&self) -> &MomentCollection {
        &self.moments
    }

    pub fn unlocked(&self) -> &UnlockedAchievements {
        &self.unlocked
    }

    pub fn random_moment<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Moment> {
        self.moments.random(rng)
    }

    /// Recomputes statistics and achievements relative to `now`.
    ///
    /// Newly unlocked achievements are merged into the unlocked state with
    /// their rule-provided time, or `now` when the rule has none, and written
    /// back when there are any.
    pub fn refresh<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> AppResult<Refresh> {
        let (stats, report) = {
            let data = MomentData::calculate(self.moments.as_slice(), now);
            let stats = calculate_stats(&data);
            let report = self.evaluator.evaluate(&data, &self.unlocked);
            (stats, report)
        };

        if !report.newly_unlocked.is_empty() {
            let mut additions = UnlockedAchievements::new();
            additions.merge_newly_unlocked(&report.newly_unlocked, now.with_timezone(&Utc));

            let conn = self.db.get_conn()?;
            self.unlocked = store::merge_unlocked(&conn, &additions)?;
            for newly in &report.newly_unlocked {
                info!("Achievement unlocked: {}", newly.id);
            }
        }

        Ok(Refresh {
            stats,
            achievements: report.achievements,
            newly_unlocked: report.newly_unlocked,
        })
    }

    fn save_and_refresh<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> AppResult<Refresh> {
        {
            let conn = self.db.get_conn()?;
            store::save_moments(&conn, self.moments.as_slice())?;
        }
        self.refresh(now)
    }

    /// Captures a new moment, importing `photo` into the photo store first.
    pub fn add_moment<Tz: TimeZone>(
        &mut self,
        mut new: NewMoment,
        photo: Option<&Path>,
        now: &DateTime<Tz>,
    ) -> AppResult<Mutation<Moment>> {
        let stored_photo = photo.map(|p| self.photos.save_photo(p)).transpose()?;
        if let Some(path) = &stored_photo {
            new.image_uri = Some(path.to_string_lossy().into_owned());
        }

        let moment = match self.moments.add(new, now.with_timezone(&Utc)) {
            Ok(moment) => moment.clone(),
            Err(e) => {
                if let Some(path) = &stored_photo {
                    self.photos.delete_local_photo(path);
                }
                return Err(e);
            }
        };
        info!("Captured moment {}", moment.id);

        let refresh = self.save_and_refresh(now)?;
        Ok(Mutation {
            value: moment,
            refresh,
        })
    }

    /// Edits a moment. A new `photo` replaces the old one, whose file is
    /// released.
    pub fn edit_moment<Tz: TimeZone>(
        &mut self,
        id: &str,
        mut update: MomentUpdate,
        photo: Option<&Path>,
        now: &DateTime<Tz>,
    ) -> AppResult<Mutation<Moment>> {
        let stored_photo = photo.map(|p| self.photos.save_photo(p)).transpose()?;
        if let Some(path) = &stored_photo {
            update.image_uri = Some(path.to_string_lossy().into_owned());
        }

        match self.moments.update(id, update, now.with_timezone(&Utc)) {
            Ok(Some(replaced)) => self.photos.delete_local_photo(Path::new(&replaced)),
            Ok(None) => {}
            Err(e) => {
                if let Some(path) = &stored_photo {
                    self.photos.delete_local_photo(path);
                }
                return Err(e);
            }
        }

        let moment = self.moments.get(id).cloned();
        let refresh = self.save_and_refresh(now)?;
        match moment {
            Some(value) => Ok(Mutation { value, refresh }),
            None => Err(AppError::Moment(format!("No moment with id {}", id))),
        }
    }

    /// Deletes a moment and releases its photo. A failed photo delete does
    /// not block removal.
    pub fn remove_moment<Tz: TimeZone>(
        &mut self,
        id: &str,
        now: &DateTime<Tz>,
    ) -> AppResult<Mutation<Moment>> {
        let removed = self.moments.remove(id)?;
        if let Some(image) = removed.image_uri.as_deref().filter(|uri| !uri.is_empty()) {
            self.photos.delete_local_photo(Path::new(image));
        }
        info!("Removed moment {}", removed.id);

        let refresh = self.save_and_refresh(now)?;
        Ok(Mutation {
            value: removed,
            refresh,
        })
    }

    /// Flips a moment's favorite flag; returns the new value.
    pub fn toggle_favorite<Tz: TimeZone>(
        &mut self,
        id: &str,
        now: &DateTime<Tz>,
    ) -> AppResult<Mutation<bool>> {
        let favorite = self.moments.toggle_favorite(id)?;
        debug!("Moment {} favorite = {}", id, favorite);

        let refresh = self.save_and_refresh(now)?;
        Ok(Mutation {
            value: favorite,
            refresh,
        })
    }
}

fn drop_missing_images(moments: &mut [Moment]) {
    for moment in moments.iter_mut() {
        let missing = moment
            .image_uri
            .as_deref()
            .is_some_and(|uri| !image_file_exists(uri));
        if missing {
            warn!(
                "Photo for moment {} is missing, dropping the reference",
                moment.id
            );
            moment.image_uri = None;
        }
    }
}
