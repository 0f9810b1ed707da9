//! Command-line interface.

pub mod output;

use crate::achievements::AchievementFilter;
use crate::constants::{APP_DESCRIPTION, APP_NAME, LOG_FORMAT_JSON, LOG_FORMAT_TEXT};
use crate::moments::{MomentUpdate, NewMoment};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Capture little moments and watch your journal grow
#[derive(Parser, Debug)]
#[clap(name = APP_NAME, about = APP_DESCRIPTION)]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    /// Print debug logs
    #[clap(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[clap(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            LogFormat::Text => LOG_FORMAT_TEXT,
            LogFormat::Json => LOG_FORMAT_JSON,
        }
    }
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Capture a new moment
    Add(AddArgs),
    /// Edit an existing moment
    Edit(EditArgs),
    /// Delete a moment and its photo
    Remove {
        /// Moment id
        id: String,
    },
    /// Toggle a moment's favorite flag
    Favorite {
        /// Moment id
        id: String,
    },
    /// List moments, newest first
    List,
    /// Show moments grouped by month
    Gallery,
    /// Show one moment in full
    Show {
        /// Moment id
        id: String,
    },
    /// Show a random moment
    Random,
    /// Show summary statistics
    Stats,
    /// Show achievements by category
    Achievements {
        /// Which achievements to show
        #[clap(long, value_enum, default_value_t = AchievementFilter::All)]
        filter: AchievementFilter,
    },
    /// List available moods
    Moods,
}

#[derive(Args, Debug, PartialEq)]
pub struct AddArgs {
    /// Title of the moment
    #[clap(short = 't', long)]
    pub title: String,

    /// Free-form note
    #[clap(short = 'n', long)]
    pub note: Option<String>,

    /// Mood value (see `momento moods`)
    #[clap(short = 'm', long)]
    pub mood: Option<String>,

    /// Photo to copy into the journal
    #[clap(short = 'p', long)]
    pub photo: Option<PathBuf>,
}

impl AddArgs {
    pub fn to_new_moment(&self) -> NewMoment {
        NewMoment {
            title: self.title.clone(),
            notes: self.note.clone(),
            image_uri: None,
            mood: self.mood.clone(),
        }
    }
}

#[derive(Args, Debug, PartialEq)]
pub struct EditArgs {
    /// Moment id
    pub id: String,

    /// New title
    #[clap(short = 't', long)]
    pub title: Option<String>,

    /// New note; an empty string clears it
    #[clap(short = 'n', long)]
    pub note: Option<String>,

    /// New mood value; an empty string clears it
    #[clap(short = 'm', long)]
    pub mood: Option<String>,

    /// Replacement photo
    #[clap(short = 'p', long)]
    pub photo: Option<PathBuf>,
}

impl EditArgs {
    pub fn to_update(&self) -> MomentUpdate {
        MomentUpdate {
            title: self.title.clone(),
            notes: self.note.clone(),
            image_uri: None,
            mood: self.mood.clone(),
        }
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.to_update().is_empty() && self.photo.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_args() {
        let args = CliArgs::parse_from([
            "momento", "add", "--title", "Coffee", "--mood", "happy", "-n", "first sip",
        ]);
        assert!(!args.verbose);
        assert_eq!(args.log_format, LogFormat::Text);
        let Command::Add(add) = args.command else {
            panic!("expected add");
        };
        let new = add.to_new_moment();
        assert_eq!(new.title, "Coffee");
        assert_eq!(new.mood.as_deref(), Some("happy"));
        assert_eq!(new.notes.as_deref(), Some("first sip"));
        assert!(add.photo.is_none());
    }

    #[test]
    fn test_add_requires_title() {
        assert!(CliArgs::try_parse_from(["momento", "add"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::parse_from(["momento", "stats", "--verbose", "--log-format", "json"]);
        assert!(args.verbose);
        assert_eq!(args.log_format, LogFormat::Json);
        assert_eq!(args.log_format.as_str(), "json");
        assert_eq!(args.command, Command::Stats);
    }

    #[test]
    fn test_edit_args() {
        let args = CliArgs::parse_from(["momento", "edit", "abc", "--note", ""]);
        let Command::Edit(edit) = args.command else {
            panic!("expected edit");
        };
        assert_eq!(edit.id, "abc");
        assert!(!edit.is_empty());
        assert_eq!(edit.to_update().notes.as_deref(), Some(""));

        let args = CliArgs::parse_from(["momento", "edit", "abc"]);
        let Command::Edit(edit) = args.command else {
            panic!("expected edit");
        };
        assert!(edit.is_empty());

        let args = CliArgs::parse_from(["momento", "edit", "abc", "--mood", ""]);
        let Command::Edit(edit) = args.command else {
            panic!("expected edit");
        };
        assert!(!edit.is_empty());
        assert_eq!(edit.to_update().mood.as_deref(), Some(""));
    }

    #[test]
    fn test_achievement_filter() {
        let args = CliArgs::parse_from(["momento", "achievements"]);
        assert_eq!(
            args.command,
            Command::Achievements {
                filter: AchievementFilter::All
            }
        );

        let args = CliArgs::parse_from(["momento", "achievements", "--filter", "locked"]);
        assert_eq!(
            args.command,
            Command::Achievements {
                filter: AchievementFilter::Locked
            }
        );

        assert!(CliArgs::try_parse_from(["momento", "achievements", "--filter", "some"]).is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(CliArgs::try_parse_from(["momento"]).is_err());
    }
}
