/*!
# Momento

Command-line journal for capturing small moments: a title, an optional note,
photo and mood. Every capture feeds streaks, statistics and a catalog of
achievements that, once unlocked, stay unlocked.

## Usage

```text
momento [OPTIONS] <COMMAND>

Commands:
  add           Capture a new moment
  edit          Edit an existing moment
  remove        Delete a moment and its photo
  favorite      Toggle a moment's favorite flag
  list          List moments, newest first
  gallery       Show moments grouped by month
  show          Show one moment in full
  random        Show a random moment
  stats         Show summary statistics
  achievements  Show achievements by category
  moods         List available moods

Options:
  -v, --verbose                  Print debug logs
      --log-format <LOG_FORMAT>  Log output format [default: text] [possible values: text, json]
```

## Configuration

- `MOMENTO_DIR`: data directory (defaults to `~/.momento`)
- `RUST_LOG`: log filter (defaults to `info`; `--verbose` forces `debug`)
*/

use chrono::{DateTime, Local};
use clap::Parser;
use momento::achievements::{group_achievements_by_category, unlocked_count};
use momento::app::{Momento, Refresh};
use momento::cli::output::{
    render_achievements, render_gallery, render_moment_detail, render_moment_line,
    render_moment_list, render_moods, render_newly_unlocked, render_stats,
};
use momento::cli::{CliArgs, Command, LogFormat};
use momento::config::Config;
use momento::constants::{DEFAULT_LOG_LEVEL, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME};
use momento::errors::{AppError, AppResult};
use tracing::{debug, error, info, info_span};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};
use uuid::Uuid;

fn init_tracing(verbose: bool, format: LogFormat) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    };

    let layer = match format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed(),
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed(),
    };

    tracing_subscriber::registry().with(layer).init();
    debug!("Logging initialized ({} format)", format.as_str());
}

fn announce(refresh: &Refresh) {
    if let Some(text) = render_newly_unlocked(&refresh.newly_unlocked) {
        println!("{}", text);
    }
}

fn run(command: Command, now: DateTime<Local>) -> AppResult<()> {
    if command == Command::Moods {
        println!("{}", render_moods());
        return Ok(());
    }

    let config = Config::load()?;
    debug!("Configuration: {:?}", config);
    let mut app = Momento::open(config)?;

    match command {
        Command::Add(args) => {
            let added = app.add_moment(args.to_new_moment(), args.photo.as_deref(), &now)?;
            println!("Captured {}", render_moment_line(&added.value, &Local));
            announce(&added.refresh);
        }
        Command::Edit(args) => {
            if args.is_empty() {
                return Err(AppError::Moment("Nothing to change".to_string()));
            }
            let edited = app.edit_moment(&args.id, args.to_update(), args.photo.as_deref(), &now)?;
            println!("Updated {}", render_moment_line(&edited.value, &Local));
            announce(&edited.refresh);
        }
        Command::Remove { id } => {
            let removed = app.remove_moment(&id, &now)?;
            println!("Removed \"{}\"", removed.value.title);
            announce(&removed.refresh);
        }
        Command::Favorite { id } => {
            let toggled = app.toggle_favorite(&id, &now)?;
            let state = if toggled.value { "Marked" } else { "Unmarked" };
            println!("{} {} as favorite", state, id);
            announce(&toggled.refresh);
        }
        Command::List => {
            let refresh = app.refresh(&now)?;
            println!("{}", render_moment_list(app.moments().as_slice(), &Local));
            announce(&refresh);
        }
        Command::Gallery => {
            let refresh = app.refresh(&now)?;
            let groups = app.moments().group_by_month(&Local);
            println!("{}", render_gallery(&groups, &Local));
            announce(&refresh);
        }
        Command::Show { id } => {
            let moment = app
                .moments()
                .get(&id)
                .ok_or_else(|| AppError::Moment(format!("No moment with id {}", id)))?;
            println!("{}", render_moment_detail(moment, &Local));
        }
        Command::Random => match app.random_moment(&mut rand::thread_rng()) {
            Some(moment) => println!("{}", render_moment_detail(moment, &Local)),
            None => println!("No moments yet."),
        },
        Command::Stats => {
            let refresh = app.refresh(&now)?;
            let newest = app.moments().as_slice().iter().max_by_key(|m| m.created_at);
            println!("{}", render_stats(&refresh.stats, newest, &Local));
            announce(&refresh);
        }
        Command::Achievements { filter } => {
            let refresh = app.refresh(&now)?;
            let groups = group_achievements_by_category(&refresh.achievements, filter);
            println!(
                "{}",
                render_achievements(
                    &groups,
                    unlocked_count(&refresh.achievements),
                    refresh.achievements.len()
                )
            );
            announce(&refresh);
        }
        Command::Moods => {}
    }

    Ok(())
}

fn main() -> AppResult<()> {
    // One clock reading per invocation
    let now = Local::now();

    let args = CliArgs::parse();
    init_tracing(args.verbose, args.log_format);

    let correlation_id = Uuid::new_v4().to_string();
    let root_span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service_name = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = root_span.enter();

    info!("Starting momento");
    debug!("CLI arguments: {:?}", args);

    if let Err(e) = run(args.command, now) {
        error!("{}", e);
        return Err(e);
    }
    Ok(())
}
