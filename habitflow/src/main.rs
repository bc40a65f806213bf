//! habitflow - local-first daily habit tracker
//!
//! CLI over habitflow-core: define habits, toggle daily completions, and
//! view streaks, dashboard statistics, the yearly heatmap, and milestones.
//!
//! Uses XDG Base Directory specification for file locations:
//! - Database: $XDG_DATA_HOME/habitflow/data.db
//! - Config: $XDG_CONFIG_HOME/habitflow/config.toml

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use habitflow_core::analytics::{evaluate_milestones, DashboardStats, Heatmap};
use habitflow_core::{dates, AppState, Category, Config, Habit, Language, Store, Toggle};

/// Glyph per heatmap bucket, dimmest to brightest.
const BUCKET_GLYPHS: [char; 5] = ['·', '░', '▒', '▓', '█'];

#[derive(Parser)]
#[command(name = "habitflow")]
#[command(about = "Local-first daily habit tracker")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a new habit
    Add {
        /// Display name for the habit
        name: String,

        /// Category: health, work, mind, finance or social
        #[arg(short, long, default_value = "health")]
        category: String,
    },

    /// List habits with streaks and today's completion state
    List,

    /// Toggle a habit's completion for today (or a past day)
    Done {
        /// Habit to toggle (id, id prefix, or name)
        habit: String,

        /// Backfill a specific day instead of today (format: YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a habit and all its completion records
    Delete {
        /// Habit to delete (id, id prefix, or name)
        habit: String,
    },

    /// Show dashboard statistics
    Stats {
        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Render the trailing-year completion heatmap
    Heatmap,

    /// Show milestone progress
    Milestones,

    /// Set the display language (en or pt)
    Lang {
        /// Two-letter locale code
        language: String,
    },

    /// Set the display name
    Name {
        /// New display name
        name: String,
    },

    /// Export all data to a JSON file
    Export {
        /// Output path (default: habitflow_backup_<date>.json)
        path: Option<PathBuf>,
    },

    /// Import data from a JSON export, replacing current state
    Import {
        /// Path to the export file
        path: PathBuf,
    },

    /// Delete all habits and completion records
    Reset {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    Config::ensure_xdg_env();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = habitflow_core::logging::init(&config.logging).ok();

    let store = Store::open(&Config::database_path()).context("failed to open store")?;
    let mut state = store.load().context("failed to load state")?;
    let today = dates::today();

    tracing::debug!(
        habits = state.habits.len(),
        completions = state.log.len(),
        "State loaded"
    );

    match args.command {
        Command::Add { name, category } => cmd_add(&mut state, &store, &name, &category),
        Command::List => cmd_list(&state, today),
        Command::Done { habit, date } => cmd_done(&mut state, &store, &habit, date, today),
        Command::Delete { habit } => cmd_delete(&mut state, &store, &habit),
        Command::Stats { format } => cmd_stats(&state, today, &format),
        Command::Heatmap => cmd_heatmap(&state, today),
        Command::Milestones => cmd_milestones(&state),
        Command::Lang { language } => cmd_lang(&mut state, &store, &language),
        Command::Name { name } => cmd_name(&mut state, &store, &name),
        Command::Export { path } => cmd_export(&state, path, today),
        Command::Import { path } => cmd_import(&mut state, &store, &path),
        Command::Reset { yes } => cmd_reset(&mut state, &store, yes),
    }
}

/// Resolve a habit argument to its id.
///
/// Tries exact id, then exact name (case-insensitive), then a unique id
/// prefix, then a unique name substring.
fn resolve_habit(state: &AppState, query: &str) -> Result<String> {
    if let Some(habit) = state.habits.iter().find(|h| h.id == query) {
        return Ok(habit.id.clone());
    }

    let lowered = query.to_lowercase();
    if let Some(habit) = state
        .habits
        .iter()
        .find(|h| h.name.to_lowercase() == lowered)
    {
        return Ok(habit.id.clone());
    }

    let matches: Vec<&Habit> = state
        .habits
        .iter()
        .filter(|h| h.id.starts_with(query) || h.name.to_lowercase().contains(&lowered))
        .collect();

    match matches.as_slice() {
        [habit] => Ok(habit.id.clone()),
        [] => anyhow::bail!("No habit found matching '{}'", query),
        several => {
            let names: Vec<&str> = several.iter().map(|h| h.name.as_str()).collect();
            anyhow::bail!(
                "'{}' is ambiguous; matches: {}",
                query,
                names.join(", ")
            )
        }
    }
}

fn cmd_add(state: &mut AppState, store: &Store, name: &str, category: &str) -> Result<()> {
    let category: Category = category
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{e}. Use one of: health, work, mind, finance, social"))?;

    let habit = state
        .add_habit(name, category, Utc::now())
        .context("failed to add habit")?;
    let summary = format!("Added '{}' ({})", habit.name, habit.category);

    store.save(state);
    println!("{}", summary);
    Ok(())
}

fn cmd_list(state: &AppState, today: NaiveDate) -> Result<()> {
    if state.habits.is_empty() {
        println!("No habits yet. Add one with: habitflow add <name>");
        return Ok(());
    }

    println!(
        "{} habit(s), {} completion(s) total",
        state.habits.len(),
        state.log.len()
    );
    println!();

    for habit in &state.habits {
        let mark = if state.log.is_completed(&habit.id, today) {
            "x"
        } else {
            " "
        };
        println!(
            "  [{}] {:<24} {:<8} streak {:>3}  best {:>3}  ({})",
            mark,
            habit.name,
            habit.category.to_string(),
            habit.streak,
            habit.best_streak,
            &habit.id[..8.min(habit.id.len())]
        );
    }
    Ok(())
}

fn cmd_done(
    state: &mut AppState,
    store: &Store,
    habit: &str,
    date: Option<String>,
    today: NaiveDate,
) -> Result<()> {
    let id = resolve_habit(state, habit)?;

    let day = match date {
        Some(raw) => dates::parse_day_key(&raw)
            .with_context(|| format!("invalid date '{}'. Use YYYY-MM-DD", raw))?,
        None => today,
    };

    let outcome = state.toggle(&id, day, today)?;
    let habit = state.habit(&id).expect("habit was just toggled");
    let message = match outcome {
        Toggle::Inserted => format!(
            "Marked '{}' done on {} (streak {})",
            habit.name, day, habit.streak
        ),
        Toggle::Removed => format!(
            "Un-marked '{}' on {} (streak {})",
            habit.name, day, habit.streak
        ),
    };

    store.save(state);
    println!("{}", message);
    Ok(())
}

fn cmd_delete(state: &mut AppState, store: &Store, habit: &str) -> Result<()> {
    let id = resolve_habit(state, habit)?;
    let habit = state.delete_habit(&id)?;

    store.save(state);
    println!("Deleted '{}' and its completion records", habit.name);
    Ok(())
}

fn cmd_stats(state: &AppState, today: NaiveDate, format: &str) -> Result<()> {
    let stats = DashboardStats::compute(&state.habits, &state.log, today);

    match format {
        "json" => {
            let output = serde_json::json!({
                "activeStreaks": stats.active_streak_total,
                "consistencyScore": stats.consistency_score,
                "totalCompletions": stats.total_completions,
                "topCategory": stats.top_category.map(|c| c.to_string()),
                "habitCount": state.habits.len(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        "text" => {
            if !state.user_name.is_empty() {
                println!("Dashboard for {}", state.user_name);
            } else {
                println!("Dashboard");
            }
            println!("==================================");
            println!("Habits:            {}", state.habits.len());
            println!("Active streaks:    {}", stats.active_streak_total);
            println!("Consistency:       {}%", stats.consistency_score);
            println!("Total completions: {}", stats.total_completions);
            match stats.top_category {
                Some(category) => println!("Top category:      {}", category),
                None => println!("Top category:      N/A"),
            }
        }
        other => anyhow::bail!("Unknown format: {}. Use 'text' or 'json'", other),
    }
    Ok(())
}

fn cmd_heatmap(state: &AppState, today: NaiveDate) -> Result<()> {
    let map = Heatmap::build(&state.log, today);
    let columns = map.week_columns();
    let weekdays = state.language.weekdays_short();
    let months = state.language.months_short();

    // Month labels above the columns that contain a first-of-month
    let mut month_row = String::from("     ");
    let mut last_label_end = 0usize;
    for (col, week) in columns.iter().enumerate() {
        if col * 2 < last_label_end {
            continue;
        }
        let first_of_month = week
            .iter()
            .flatten()
            .find(|cell| cell.day.day() == 1)
            .map(|cell| months[cell.day.month0() as usize]);
        if let Some(label) = first_of_month {
            while month_row.len() < 5 + col * 2 {
                month_row.push(' ');
            }
            month_row.push_str(label);
            last_label_end = col * 2 + label.len() + 1;
        }
    }
    println!("{}", month_row);

    for row in 0..7 {
        // Label alternating rows, like a calendar margin
        let label = if row % 2 == 1 { weekdays[row] } else { "" };
        let mut line = format!("{:>4} ", label);
        for week in &columns {
            match week[row] {
                Some(cell) => {
                    line.push(BUCKET_GLYPHS[cell.bucket as usize]);
                    line.push(' ');
                }
                None => line.push_str("  "),
            }
        }
        println!("{}", line);
    }

    println!();
    println!(
        "     {} total in the last year   less {} {} {} {} {} more",
        map.cells().iter().map(|c| c.count).sum::<usize>(),
        BUCKET_GLYPHS[0],
        BUCKET_GLYPHS[1],
        BUCKET_GLYPHS[2],
        BUCKET_GLYPHS[3],
        BUCKET_GLYPHS[4],
    );
    Ok(())
}

fn cmd_milestones(state: &AppState) -> Result<()> {
    let lang = state.language;
    for (milestone, unlocked) in evaluate_milestones(&state.habits, &state.log) {
        let mark = if unlocked { "x" } else { " " };
        println!(
            "  [{}] {:<22} {}",
            mark,
            milestone.title(lang),
            milestone.description(lang)
        );
    }
    Ok(())
}

fn cmd_lang(state: &mut AppState, store: &Store, language: &str) -> Result<()> {
    let language: Language = language
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{e}. Use 'en' or 'pt'"))?;

    state.set_language(language);
    store.save(state);
    println!("Language set to {}", language);
    Ok(())
}

fn cmd_name(state: &mut AppState, store: &Store, name: &str) -> Result<()> {
    state.set_user_name(name)?;
    store.save(state);
    println!("Display name set to {}", state.user_name);
    Ok(())
}

fn cmd_export(state: &AppState, path: Option<PathBuf>, today: NaiveDate) -> Result<()> {
    let path = path.unwrap_or_else(|| {
        PathBuf::from(format!("habitflow_backup_{}.json", today.format("%Y-%m-%d")))
    });

    let json = state.export(Utc::now()).to_json()?;
    std::fs::write(&path, json)
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!(
        "Exported {} habit(s) and {} completion(s) to {}",
        state.habits.len(),
        state.log.len(),
        path.display()
    );
    Ok(())
}

fn cmd_import(state: &mut AppState, store: &Store, path: &PathBuf) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    state.import(&content)?;
    store.save(state);

    println!(
        "Imported {} habit(s) and {} completion(s)",
        state.habits.len(),
        state.log.len()
    );
    Ok(())
}

fn cmd_reset(state: &mut AppState, store: &Store, yes: bool) -> Result<()> {
    if !yes {
        anyhow::bail!("This deletes all habits and completions. Re-run with --yes to confirm");
    }

    state.reset();
    store.save(state);
    println!("All habits and completions deleted");
    Ok(())
}
