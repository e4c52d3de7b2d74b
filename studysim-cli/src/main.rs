use std::fmt::Write as _;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use tracing::debug;

use studysim_core::{
    SavedSimulation, Strategy, StudyBudget, StudyPlan, Subject, parse_study_date, run_strategy,
    validate_plan, validate_subjects,
};

mod config;
mod logging;
mod render;
mod state;
mod store;
mod subjects_cmd;

use config::{Config, config_path, init_config, load_config};
use store::{
    FileStore, KeyValueStore, SAVED_SIMULATION_KEY, STUDY_PLAN_KEY, SUBJECTS_KEY, load_or, save,
};
use subjects_cmd::SubjectsCommand;

#[derive(Parser, Debug)]
#[command(name = "studysim", version, about = "Exam study-round simulator")]
struct Cli {
    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Exam name, study period and daily hours
    Plan {
        #[command(subcommand)]
        command: PlanCommand,
    },

    /// Manage the subject list
    Subjects {
        #[command(subcommand)]
        command: SubjectsCommand,
    },

    /// Allocate study time and show achievable rounds per subject
    Simulate {
        /// equal | priority | target-rounds (unknown names use equal)
        #[arg(long)]
        strategy: Option<String>,

        /// Print results as JSON
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Save results as the last simulation
        #[arg(long, default_value_t = false)]
        save: bool,
    },

    /// Show the last saved simulation
    Saved {
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Delete the saved simulation
        #[arg(long, default_value_t = false)]
        clear: bool,
    },

    /// Config file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum PlanCommand {
    /// Set the study plan (dates: YYYY-MM-DD, "YYYY-MM-DD HH:MM" or RFC3339)
    Set {
        #[arg(long)]
        exam: String,

        /// Defaults to now
        #[arg(long)]
        start: Option<String>,

        /// Defaults to start + plan.default_period_days
        #[arg(long)]
        end: Option<String>,

        /// Defaults to plan.default_daily_hours
        #[arg(long)]
        hours: Option<f64>,
    },

    /// Show the stored plan and its hour budget
    Show,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write config.toml with defaults (no-op if present)
    Init,

    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let home = state::ensure_studysim_home()?;
    let cfg = load_config(&home)?;
    let store = FileStore::open(&home)?;
    debug!(home = %home.display(), "studysim home");

    match cli.command {
        Command::Plan { command } => match command {
            PlanCommand::Set {
                exam,
                start,
                end,
                hours,
            } => {
                let plan = set_plan(&store, &cfg, exam, start, end, hours, Utc::now())?;
                println!("Saved plan\n");
                print!("{}", render::render_plan(&plan));
            }
            PlanCommand::Show => {
                let plan = stored_plan(&store)?;
                print!("{}", render::render_plan(&plan));
            }
        },

        Command::Subjects { command } => subjects_cmd::run(command, &store, &cfg)?,

        Command::Simulate {
            strategy,
            json,
            save,
        } => {
            let strategy = strategy
                .as_deref()
                .map(Strategy::from_name)
                .unwrap_or(cfg.simulation.default_strategy);
            print!("{}", simulate(&store, strategy, json, save, Utc::now())?);
        }

        Command::Saved { json, clear } => {
            if clear {
                store.remove(SAVED_SIMULATION_KEY)?;
                println!("Cleared saved simulation");
            } else {
                print!("{}", show_saved(&store, json)?);
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => {
                let p = config_path(&home);
                if init_config(&home)? {
                    println!("Wrote {}", p.display());
                } else {
                    println!("Config already exists: {}", p.display());
                }
            }
            ConfigCommand::Show => {
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn stored_plan(store: &dyn KeyValueStore) -> Result<StudyPlan> {
    match load_or::<Option<StudyPlan>>(store, STUDY_PLAN_KEY, None) {
        Some(plan) => Ok(plan),
        None => bail!("No study plan yet. Run: studysim plan set --exam <name> --end <date>"),
    }
}

fn set_plan(
    store: &dyn KeyValueStore,
    cfg: &Config,
    exam: String,
    start: Option<String>,
    end: Option<String>,
    hours: Option<f64>,
    now: DateTime<Utc>,
) -> Result<StudyPlan> {
    let tz = &cfg.plan.timezone;
    let start = match start {
        Some(s) => parse_study_date(&s, tz).with_context(|| format!("--start {s}"))?,
        None => now,
    };
    let end = match end {
        Some(s) => parse_study_date(&s, tz).with_context(|| format!("--end {s}"))?,
        None => start + Duration::days(cfg.plan.default_period_days),
    };

    let plan = StudyPlan::new(
        exam.trim(),
        start,
        end,
        hours.unwrap_or(cfg.plan.default_daily_hours),
    );
    validate_plan(&plan)?;

    save(store, STUDY_PLAN_KEY, &plan)?;
    Ok(plan)
}

/// Run `strategy` over the stored plan and subjects and return the report.
fn simulate(
    store: &FileStore,
    strategy: Strategy,
    json: bool,
    save_result: bool,
    now: DateTime<Utc>,
) -> Result<String> {
    let plan = stored_plan(store)?;
    let subjects: Vec<Subject> = load_or(store, SUBJECTS_KEY, Vec::new());
    validate_plan(&plan)?;
    validate_subjects(&subjects)?;

    let results = run_strategy(&plan, &subjects, strategy);

    let mut out = String::new();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&results)?)?;
    } else {
        let budget = StudyBudget::for_plan(&plan);
        let used = render::hours_used(&results, &subjects, strategy);
        writeln!(out, "{} - {}", plan.exam_name, strategy.label())?;
        writeln!(
            out,
            "{} days x {} h = {} h available, {:.1} h allocated\n",
            budget.study_days, plan.daily_study_hours, budget.total_hours, used
        )?;
        out.push_str(&render::render_bars(&results));
    }

    if save_result {
        let saved = SavedSimulation::new(strategy, plan, subjects, results, now)
            .context("nothing to save")?;
        save(store, SAVED_SIMULATION_KEY, &saved)?;
        if !json {
            writeln!(
                out,
                "\nSaved. Average achievement {:.1}% (best: {}, worst: {})",
                saved.total_achievement_rate, saved.best_subject, saved.worst_subject
            )?;
        }
    }

    Ok(out)
}

/// True when the plan or subjects were written after the saved simulation.
fn saved_is_stale(store: &FileStore) -> bool {
    let saved_at = store.modified(SAVED_SIMULATION_KEY);
    [STUDY_PLAN_KEY, SUBJECTS_KEY]
        .into_iter()
        .any(|key| store.modified(key) > saved_at)
}

fn show_saved(store: &FileStore, json: bool) -> Result<String> {
    let Some(saved) = load_or::<Option<SavedSimulation>>(store, SAVED_SIMULATION_KEY, None) else {
        return Ok("No saved simulation. Run: studysim simulate --save\n".to_string());
    };

    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&saved)?));
    }

    let mut out = render::render_saved(&saved);
    if saved_is_stale(store) {
        out.push_str(
            "\nNote: plan or subjects changed since this was saved; re-run `studysim simulate`.\n",
        );
    }
    Ok(out)
}
