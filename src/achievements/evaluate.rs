//! Achievement evaluation with a persistent, append-only unlock overlay.
//!
//! The evaluator is a pure function of the aggregate and the previously
//! unlocked set. Anything already in that set is reported unlocked without
//! running its rule, so deleting moments can never re-lock an achievement.
//! The caller receives the newly unlocked ids and merges them into its set.

use super::catalog::{AchievementDefinition, ACHIEVEMENT_DEFINITIONS};
use super::rules::{AchievementRule, Progress};
use crate::aggregate::MomentData;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Evaluated state of one achievement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    #[serde(flatten)]
    pub definition: &'static AchievementDefinition,
    pub unlocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
}

impl Achievement {
    pub fn id(&self) -> &'static str {
        self.definition.id
    }
}

/// Ids of achievements unlocked in earlier sessions, with unlock times when
/// known. Only ever grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnlockedAchievements {
    ids: BTreeSet<String>,
    unlocked_at: BTreeMap<String, DateTime<Utc>>,
}

impl UnlockedAchievements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        UnlockedAchievements {
            ids: ids.into_iter().map(Into::into).collect(),
            unlocked_at: BTreeMap::new(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn unlocked_at(&self, id: &str) -> Option<DateTime<Utc>> {
        self.unlocked_at.get(id).copied()
    }

    pub fn timestamps(&self) -> &BTreeMap<String, DateTime<Utc>> {
        &self.unlocked_at
    }

    /// Adds an id. An existing id keeps its original timestamp; a missing
    /// timestamp is filled in. Returns true when the id is new.
    pub fn insert(&mut self, id: impl Into<String>, at: Option<DateTime<Utc>>) -> bool {
        let id = id.into();
        if let Some(at) = at {
            self.unlocked_at.entry(id.clone()).or_insert(at);
        }
        self.ids.insert(id)
    }

    /// Set union with another unlock state.
    pub fn merge(&mut self, other: &UnlockedAchievements) -> usize {
        let mut added = 0;
        for id in &other.ids {
            if self.insert(id.clone(), other.unlocked_at(id)) {
                added += 1;
            }
        }
        added
    }

    /// Merges a newly-unlocked delta, stamping entries without a rule-provided
    /// time with `now`. Returns how many ids were added.
    pub fn merge_newly_unlocked(&mut self, newly: &[NewlyUnlocked], now: DateTime<Utc>) -> usize {
        newly
            .iter()
            .filter(|n| self.insert(n.id, Some(n.unlocked_at.unwrap_or(now))))
            .count()
    }
}

/// An achievement that unlocked during this evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewlyUnlocked {
    pub id: &'static str,
    pub unlocked_at: Option<DateTime<Utc>>,
}

/// Full evaluation output.
#[derive(Debug, Clone, PartialEq)]
pub struct AchievementReport {
    /// One entry per catalog definition, in catalog order.
    pub achievements: Vec<Achievement>,
    /// Unlocked now but absent from the persisted set.
    pub newly_unlocked: Vec<NewlyUnlocked>,
}

/// Evaluates a catalog against aggregates. Rules are decoded once on
/// construction.
#[derive(Debug, Clone)]
pub struct AchievementEvaluator {
    rules: Vec<(&'static AchievementDefinition, AchievementRule)>,
}

impl Default for AchievementEvaluator {
    fn default() -> Self {
        AchievementEvaluator::new(ACHIEVEMENT_DEFINITIONS)
    }
}

impl AchievementEvaluator {
    pub fn new(definitions: &'static [AchievementDefinition]) -> Self {
        let rules = definitions
            .iter()
            .map(|definition| (definition, AchievementRule::from_definition(definition)))
            .collect();
        AchievementEvaluator { rules }
    }

    pub fn rules(&self) -> &[(&'static AchievementDefinition, AchievementRule)] {
        &self.rules
    }

    /// Evaluates every achievement.
    ///
    /// Ids present in `unlocked` short-circuit to unlocked, carrying their
    /// stored unlock time. Everything else runs its rule.
    pub fn evaluate(
        &self,
        data: &MomentData<'_>,
        unlocked: &UnlockedAchievements,
    ) -> AchievementReport {
        let mut newly_unlocked = Vec::new();

        let achievements: Vec<Achievement> = self
            .rules
            .iter()
            .map(|&(definition, rule)| {
                if unlocked.contains(definition.id) {
                    return Achievement {
                        definition,
                        unlocked: true,
                        unlocked_at: unlocked.unlocked_at(definition.id),
                        progress: None,
                    };
                }

                let outcome = rule.evaluate(data);
                if outcome.unlocked {
                    debug!("Achievement {} unlocked", definition.id);
                    newly_unlocked.push(NewlyUnlocked {
                        id: definition.id,
                        unlocked_at: outcome.unlocked_at,
                    });
                }
                Achievement {
                    definition,
                    unlocked: outcome.unlocked,
                    unlocked_at: outcome.unlocked_at,
                    progress: outcome.progress,
                }
            })
            .collect();

        if !newly_unlocked.is_empty() {
            info!("{} new achievement(s) unlocked", newly_unlocked.len());
        }

        AchievementReport {
            achievements,
            newly_unlocked,
        }
    }
}

/// Evaluates the standard catalog.
pub fn calculate_achievements(
    data: &MomentData<'_>,
    unlocked: &UnlockedAchievements,
) -> AchievementReport {
    AchievementEvaluator::default().evaluate(data, unlocked)
}

pub fn unlocked_count(achievements: &[Achievement]) -> usize {
    achievements.iter().filter(|a| a.unlocked).count()
}
