//! Moment model and in-memory collection operations.
//!
//! A moment is one captured journal record: a title, optional note, photo and
//! mood, a favorite flag and its timestamps. `MomentCollection` owns the
//! current list in display order (newest first) and applies user edits to it.
//! Persistence happens elsewhere; nothing here touches the filesystem.

use crate::dates::format_month_year;
use crate::errors::{AppError, AppResult};
use crate::moods::mood_by_value;
use chrono::{DateTime, TimeZone, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use std::fmt::Display;
use tracing::debug;
use uuid::Uuid;

#[cfg(test)]
mod tests;

/// One captured moment.
#[derive(Debug, Clone, PartialEq)]
pub struct Moment {
    pub id: String,
    pub title: String,
    pub notes: Option<String>,
    /// Path of the stored photo, owned by the photo store.
    pub image_uri: Option<String>,
    /// Value of a catalog mood.
    pub mood: Option<String>,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Moment {
    pub fn has_photo(&self) -> bool {
        self.image_uri.as_deref().is_some_and(|uri| !uri.is_empty())
    }

    /// True when the note has non-whitespace content.
    pub fn has_notes(&self) -> bool {
        self.notes.as_deref().is_some_and(|n| !n.trim().is_empty())
    }

    /// Photo, note and mood all present.
    pub fn is_perfect(&self) -> bool {
        self.has_photo() && self.has_notes() && self.mood.is_some()
    }
}

/// User input for a new moment.
#[derive(Debug, Clone, Default)]
pub struct NewMoment {
    pub title: String,
    pub notes: Option<String>,
    pub image_uri: Option<String>,
    pub mood: Option<String>,
}

/// Partial edit of an existing moment. `None` leaves a field untouched.
///
/// An empty note, mood or image clears that field. The favorite flag and
/// creation time are not editable here.
#[derive(Debug, Clone, Default)]
pub struct MomentUpdate {
    pub title: Option<String>,
    pub notes: Option<String>,
    pub image_uri: Option<String>,
    pub mood: Option<String>,
}

impl MomentUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.notes.is_none()
            && self.image_uri.is_none()
            && self.mood.is_none()
    }
}

/// Moments sharing a calendar month, for the gallery view.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup<'a> {
    /// e.g. "January 2024"
    pub month_name: String,
    pub moments: Vec<&'a Moment>,
}

/// The user's moments in display order (newest first).
#[derive(Debug, Clone, Default)]
pub struct MomentCollection {
    moments: Vec<Moment>,
}

fn validate_title(title: &str) -> AppResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(AppError::Moment("Title cannot be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

fn validate_mood(mood: &str) -> AppResult<String> {
    mood_by_value(mood)
        .map(|m| m.value.to_string())
        .ok_or_else(|| AppError::Moment(format!("Unknown mood: {}", mood)))
}

fn normalize_notes(notes: String) -> Option<String> {
    if notes.trim().is_empty() {
        None
    } else {
        Some(notes)
    }
}

impl MomentCollection {
    pub fn new(moments: Vec<Moment>) -> Self {
        MomentCollection { moments }
    }

    pub fn as_slice(&self) -> &[Moment] {
        &self.moments
    }

    pub fn into_inner(self) -> Vec<Moment> {
        self.moments
    }

    pub fn len(&self) -> usize {
        self.moments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moments.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Moment> {
        self.moments.iter().find(|m| m.id == id)
    }

    fn get_mut(&mut self, id: &str) -> AppResult<&mut Moment> {
        self.moments
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| AppError::Moment(format!("No moment with id {}", id)))
    }

    /// Creates a moment at `now` and puts it at the front of the list.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Moment` if the title is blank or the mood is not in
    /// the catalog.
    pub fn add(&mut self, new: NewMoment, now: DateTime<Utc>) -> AppResult<&Moment> {
        let title = validate_title(&new.title)?;
        let mood = new.mood.as_deref().map(validate_mood).transpose()?;

        let moment = Moment {
            id: Uuid::new_v4().to_string(),
            title,
            notes: new.notes.and_then(normalize_notes),
            image_uri: new.image_uri.filter(|uri| !uri.is_empty()),
            mood,
            is_favorite: false,
            created_at: now,
            updated_at: None,
        };
        debug!("Adding moment {}", moment.id);

        self.moments.insert(0, moment);
        Ok(&self.moments[0])
    }

    /// Applies an edit and stamps `updated_at`.
    ///
    /// Returns the image the edit replaced, if any, so the caller can release it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Moment` for an unknown id, a blank title or an
    /// unknown mood. A failed edit leaves the moment unchanged.
    pub fn update(
        &mut self,
        id: &str,
        update: MomentUpdate,
        now: DateTime<Utc>,
    ) -> AppResult<Option<String>> {
        let title = update.title.as_deref().map(validate_title).transpose()?;
        let mood = match update.mood.as_deref() {
            Some(mood) if mood.trim().is_empty() => Some(None),
            Some(mood) => Some(Some(validate_mood(mood)?)),
            None => None,
        };

        let moment = self.get_mut(id)?;
        if let Some(title) = title {
            moment.title = title;
        }
        if let Some(notes) = update.notes {
            moment.notes = normalize_notes(notes);
        }
        if let Some(mood) = mood {
            moment.mood = mood;
        }
        let mut replaced = None;
        if let Some(image_uri) = update.image_uri {
            let new_image = Some(image_uri).filter(|uri| !uri.is_empty());
            if moment.image_uri != new_image {
                replaced = std::mem::replace(&mut moment.image_uri, new_image);
            }
        }
        moment.updated_at = Some(now);
        debug!("Updated moment {}", id);

        Ok(replaced)
    }

    /// Removes a moment, handing it back so its photo can be released.
    pub fn remove(&mut self, id: &str) -> AppResult<Moment> {
        let index = self
            .moments
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| AppError::Moment(format!("No moment with id {}", id)))?;
        debug!("Removing moment {}", id);
        Ok(self.moments.remove(index))
    }

    /// Flips the favorite flag and returns the new value.
    pub fn toggle_favorite(&mut self, id: &str) -> AppResult<bool> {
        let moment = self.get_mut(id)?;
        moment.is_favorite = !moment.is_favorite;
        Ok(moment.is_favorite)
    }

    /// Picks a moment uniformly at random.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Moment> {
        self.moments.choose(rng)
    }

    /// Groups moments by calendar month in `tz`, newest month first.
    pub fn group_by_month<Tz: TimeZone>(&self, tz: &Tz) -> Vec<MonthGroup<'_>>
    where
        Tz::Offset: Display,
    {
        let mut sorted: Vec<&Moment> = self.moments.iter().collect();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut groups: Vec<MonthGroup<'_>> = Vec::new();
        let mut index_by_name: HashMap<String, usize> = HashMap::new();
        for moment in sorted {
            let month_name = format_month_year(&moment.created_at.with_timezone(tz));
            match index_by_name.get(&month_name) {
                Some(&index) => groups[index].moments.push(moment),
                None => {
                    index_by_name.insert(month_name.clone(), groups.len());
                    groups.push(MonthGroup {
                        month_name,
                        moments: vec![moment],
                    });
                }
            }
        }
        groups
    }
}
