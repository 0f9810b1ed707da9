//! JSON persistence of moments and unlocked achievements on top of the
//! key-value table.
//!
//! Both blobs are read leniently. A moments blob that cannot be parsed is
//! discarded so the app can start fresh; an achievements blob that cannot be
//! parsed is left in place and treated as empty. The first unlock written
//! afterwards copies it to a side key before replacing it.

use crate::achievements::UnlockedAchievements;
use crate::constants::{
    STORAGE_KEY_ACHIEVEMENTS, STORAGE_KEY_ACHIEVEMENTS_CORRUPT, STORAGE_KEY_MOMENTS,
};
use crate::db::kv;
use crate::errors::AppResult;
use crate::moments::Moment;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, error, warn};

/// On-disk shape of a moment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredMoment {
    id: String,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mood: Option<String>,
    #[serde(default)]
    is_favorite: bool,
    created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<String>,
}

fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|at| at.with_timezone(&Utc))
}

impl From<&Moment> for StoredMoment {
    fn from(moment: &Moment) -> Self {
        StoredMoment {
            id: moment.id.clone(),
            title: moment.title.clone(),
            notes: moment.notes.clone(),
            image_uri: moment.image_uri.clone(),
            mood: moment.mood.clone(),
            is_favorite: moment.is_favorite,
            created_at: format_timestamp(&moment.created_at),
            updated_at: moment.updated_at.as_ref().map(format_timestamp),
        }
    }
}

impl StoredMoment {
    fn into_moment(self, loaded_at: DateTime<Utc>) -> Moment {
        let created_at = parse_timestamp(&self.created_at).unwrap_or_else(|| {
            warn!(
                "Moment {} has invalid createdAt {:?}, using load time",
                self.id, self.created_at
            );
            loaded_at
        });
        let updated_at = self.updated_at.as_deref().and_then(|raw| {
            let parsed = parse_timestamp(raw);
            if parsed.is_none() {
                warn!("Moment {} has invalid updatedAt {:?}, dropping it", self.id, raw);
            }
            parsed
        });

        Moment {
            id: self.id,
            title: self.title,
            notes: self.notes,
            image_uri: self.image_uri,
            mood: self.mood,
            is_favorite: self.is_favorite,
            created_at,
            updated_at,
        }
    }
}

pub fn serialize_moments(moments: &[Moment]) -> AppResult<String> {
    let stored: Vec<StoredMoment> = moments.iter().map(StoredMoment::from).collect();
    Ok(serde_json::to_string(&stored)?)
}

/// Parses a moments blob. Bad timestamps are repaired; a malformed array is
/// an error.
pub fn deserialize_moments(raw: &str, loaded_at: DateTime<Utc>) -> AppResult<Vec<Moment>> {
    let stored: Vec<StoredMoment> = serde_json::from_str(raw)?;
    Ok(stored
        .into_iter()
        .map(|m| m.into_moment(loaded_at))
        .collect())
}

/// Loads all moments. A blob that fails to parse is removed and an empty
/// list returned.
pub fn load_moments(conn: &Connection, loaded_at: DateTime<Utc>) -> AppResult<Vec<Moment>> {
    let Some(raw) = kv::get_value(conn, STORAGE_KEY_MOMENTS)? else {
        debug!("No stored moments");
        return Ok(Vec::new());
    };

    match deserialize_moments(&raw, loaded_at) {
        Ok(moments) => {
            debug!("Loaded {} moments", moments.len());
            Ok(moments)
        }
        Err(e) => {
            error!("Stored moments are corrupt, clearing them: {}", e);
            kv::remove_value(conn, STORAGE_KEY_MOMENTS)?;
            Ok(Vec::new())
        }
    }
}

pub fn save_moments(conn: &Connection, moments: &[Moment]) -> AppResult<()> {
    let raw = serialize_moments(moments)?;
    kv::set_value(conn, STORAGE_KEY_MOMENTS, &raw)?;
    debug!("Saved {} moments", moments.len());
    Ok(())
}

/// Accepted shapes of the unlocked-achievements blob.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredUnlocked {
    /// Bare array of ids, as written by older versions.
    Legacy(Vec<String>),
    Current {
        ids: Vec<String>,
        #[serde(default, rename = "unlockedAt")]
        unlocked_at: BTreeMap<String, String>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredUnlockedOut<'a> {
    ids: Vec<&'a str>,
    unlocked_at: BTreeMap<&'a str, String>,
}

pub fn serialize_unlocked(unlocked: &UnlockedAchievements) -> AppResult<String> {
    let out = StoredUnlockedOut {
        ids: unlocked.ids().collect(),
        unlocked_at: unlocked
            .timestamps()
            .iter()
            .map(|(id, at)| (id.as_str(), format_timestamp(at)))
            .collect(),
    };
    Ok(serde_json::to_string(&out)?)
}

pub fn deserialize_unlocked(raw: &str) -> AppResult<UnlockedAchievements> {
    let stored: StoredUnlocked = serde_json::from_str(raw)?;
    let (ids, timestamps) = match stored {
        StoredUnlocked::Legacy(ids) => (ids, BTreeMap::new()),
        StoredUnlocked::Current { ids, unlocked_at } => (ids, unlocked_at),
    };

    let mut unlocked = UnlockedAchievements::new();
    for id in ids {
        let at = timestamps.get(&id).and_then(|raw| {
            let parsed = parse_timestamp(raw);
            if parsed.is_none() {
                warn!("Ignoring invalid unlock time {:?} for {}", raw, id);
            }
            parsed
        });
        unlocked.insert(id, at);
    }
    Ok(unlocked)
}

/// Loads the unlocked set. A blob that fails to parse is logged and treated
/// as empty. Loading never modifies it; see `merge_unlocked` for what happens
/// on the next write.
pub fn load_unlocked(conn: &Connection) -> AppResult<UnlockedAchievements> {
    let Some(raw) = kv::get_value(conn, STORAGE_KEY_ACHIEVEMENTS)? else {
        return Ok(UnlockedAchievements::new());
    };

    match deserialize_unlocked(&raw) {
        Ok(unlocked) => {
            debug!("Loaded {} unlocked achievements", unlocked.len());
            Ok(unlocked)
        }
        Err(e) => {
            error!("Stored achievements are corrupt, ignoring them: {}", e);
            Ok(UnlockedAchievements::new())
        }
    }
}

/// Writes `stored ∪ additions` and returns the merged set. Callers hold the
/// session lock so the read and write are not interleaved with another
/// process.
///
/// A stored blob that fails to parse is copied to
/// `STORAGE_KEY_ACHIEVEMENTS_CORRUPT` before the union replaces it.
pub fn merge_unlocked(
    conn: &Connection,
    additions: &UnlockedAchievements,
) -> AppResult<UnlockedAchievements> {
    let mut merged = match kv::get_value(conn, STORAGE_KEY_ACHIEVEMENTS)? {
        None => UnlockedAchievements::new(),
        Some(raw) => match deserialize_unlocked(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                error!(
                    "Stored achievements are corrupt, moving them to {}: {}",
                    STORAGE_KEY_ACHIEVEMENTS_CORRUPT, e
                );
                kv::set_value(conn, STORAGE_KEY_ACHIEVEMENTS_CORRUPT, &raw)?;
                UnlockedAchievements::new()
            }
        },
    };
    let added = merged.merge(additions);
    let raw = serialize_unlocked(&merged)?;
    kv::set_value(conn, STORAGE_KEY_ACHIEVEMENTS, &raw)?;
    debug!(
        "Persisted {} unlocked achievements ({} new)",
        merged.len(),
        added
    );
    Ok(merged)
}
