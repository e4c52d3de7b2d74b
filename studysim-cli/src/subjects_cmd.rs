use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::Subcommand;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

use studysim_core::{Subject, validate_subject};

use crate::config::{Config, SubjectSection};
use crate::render::render_subject;
use crate::store::{KeyValueStore, SUBJECTS_KEY, load_existing, load_or, save};

#[derive(Subcommand, Debug)]
pub enum SubjectsCommand {
    /// Add a subject (unset fields take config defaults)
    Add {
        #[arg(long)]
        name: String,

        /// Total workload, e.g. number of pages
        #[arg(long)]
        load: f64,

        /// Unit label for the workload (display only)
        #[arg(long)]
        unit: Option<String>,

        /// Minutes needed per unit
        #[arg(long)]
        speed: Option<f64>,

        /// 1 (low) to 5 (high)
        #[arg(long)]
        priority: Option<u8>,

        /// Desired number of complete review rounds
        #[arg(long)]
        target: Option<u32>,
    },

    /// List subjects in their stored order
    List,

    /// Change fields of an existing subject
    Update {
        #[arg(long)]
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        load: Option<f64>,

        #[arg(long)]
        unit: Option<String>,

        #[arg(long)]
        speed: Option<f64>,

        #[arg(long)]
        priority: Option<u8>,

        #[arg(long)]
        target: Option<u32>,
    },

    /// Remove a subject by id
    Remove {
        #[arg(long)]
        id: String,
    },

    /// Import subjects from a CSV file
    /// (columns: name,total_load,load_unit,study_speed_minutes,priority,target_rounds)
    Import {
        #[arg(long)]
        csv: PathBuf,

        /// Replace the current list instead of appending
        #[arg(long, default_value_t = false)]
        replace: bool,
    },
}

/// Optional field changes shared by `add` and `update`.
#[derive(Debug, Default)]
struct SubjectEdit {
    name: Option<String>,
    load: Option<f64>,
    unit: Option<String>,
    speed: Option<f64>,
    priority: Option<u8>,
    target: Option<u32>,
}

impl SubjectEdit {
    fn apply(self, mut s: Subject) -> Subject {
        if let Some(name) = self.name {
            s.name = name.trim().to_string();
        }
        if let Some(load) = self.load {
            s.total_load = load;
        }
        if let Some(unit) = self.unit {
            s.load_unit = unit;
        }
        if let Some(speed) = self.speed {
            s.study_speed_per_page = speed;
        }
        if let Some(priority) = self.priority {
            s.priority = priority;
        }
        if let Some(target) = self.target {
            s.target_rounds = target;
        }
        s
    }
}

pub fn run(cmd: SubjectsCommand, store: &dyn KeyValueStore, cfg: &Config) -> Result<()> {
    match cmd {
        SubjectsCommand::Add {
            name,
            load,
            unit,
            speed,
            priority,
            target,
        } => {
            let edit = SubjectEdit {
                name: Some(name),
                load: Some(load),
                unit,
                speed,
                priority,
                target,
            };
            add(store, &cfg.subjects, edit)
        }
        SubjectsCommand::List => list(store),
        SubjectsCommand::Update {
            id,
            name,
            load,
            unit,
            speed,
            priority,
            target,
        } => {
            let edit = SubjectEdit {
                name,
                load,
                unit,
                speed,
                priority,
                target,
            };
            update(store, &id, edit)
        }
        SubjectsCommand::Remove { id } => remove(store, &id),
        SubjectsCommand::Import { csv, replace } => import(store, &cfg.subjects, &csv, replace),
    }
}

fn load_subjects(store: &dyn KeyValueStore) -> Vec<Subject> {
    load_or(store, SUBJECTS_KEY, Vec::new())
}

/// Current list for commands that write it back; corrupt data is an error.
fn subjects_for_edit(store: &dyn KeyValueStore) -> Result<Vec<Subject>> {
    Ok(load_existing(store, SUBJECTS_KEY)?.unwrap_or_default())
}

fn add(store: &dyn KeyValueStore, defaults: &SubjectSection, edit: SubjectEdit) -> Result<()> {
    let mut subjects = subjects_for_edit(store)?;
    let id = next_subject_id(&subjects, Utc::now().timestamp_millis());
    let subject = edit.apply(defaults.new_subject(id, ""));
    validate_subject(&subject)?;

    println!("Added {}", render_subject(&subject));
    subjects.push(subject);
    save(store, SUBJECTS_KEY, &subjects)
}

fn list(store: &dyn KeyValueStore) -> Result<()> {
    let subjects = load_subjects(store);
    if subjects.is_empty() {
        println!("No subjects yet. Add one: studysim subjects add --name <name> --load <pages>");
        return Ok(());
    }
    for s in &subjects {
        println!("{}", render_subject(s));
    }
    Ok(())
}

fn update(store: &dyn KeyValueStore, id: &str, edit: SubjectEdit) -> Result<()> {
    let mut subjects = subjects_for_edit(store)?;
    let Some(pos) = subjects.iter().position(|s| s.id == id) else {
        bail!("no subject with id {id}");
    };

    let updated = edit.apply(subjects[pos].clone());
    validate_subject(&updated)?;

    println!("Updated {}", render_subject(&updated));
    subjects[pos] = updated;
    save(store, SUBJECTS_KEY, &subjects)
}

fn remove(store: &dyn KeyValueStore, id: &str) -> Result<()> {
    let mut subjects = subjects_for_edit(store)?;
    let before = subjects.len();
    subjects.retain(|s| s.id != id);
    if subjects.len() == before {
        bail!("no subject with id {id}");
    }
    println!("Removed {id}");
    save(store, SUBJECTS_KEY, &subjects)
}

fn import(
    store: &dyn KeyValueStore,
    defaults: &SubjectSection,
    path: &Path,
    replace: bool,
) -> Result<()> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut subjects = if replace {
        Vec::new()
    } else {
        subjects_for_edit(store)?
    };

    let imported = parse_subjects_csv(file, defaults, &subjects, Utc::now().timestamp_millis())
        .with_context(|| format!("parsing {}", path.display()))?;

    info!(count = imported.len(), path = %path.display(), "imported subjects");
    println!("Imported {} subjects from {}", imported.len(), path.display());
    for s in &imported {
        println!("- {}", render_subject(s));
    }

    subjects.extend(imported);
    save(store, SUBJECTS_KEY, &subjects)
}

#[derive(Debug, Deserialize)]
struct SubjectRow {
    name: String,
    total_load: f64,
    load_unit: Option<String>,
    study_speed_minutes: Option<f64>,
    priority: Option<u8>,
    target_rounds: Option<u32>,
}

/// Parse subject rows, filling blanks from config and assigning fresh ids.
pub fn parse_subjects_csv<R: Read>(
    reader: R,
    defaults: &SubjectSection,
    existing: &[Subject],
    now_ms: i64,
) -> Result<Vec<Subject>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut taken: Vec<Subject> = existing.to_vec();
    let mut out = Vec::new();

    for (i, row) in rdr.deserialize::<SubjectRow>().enumerate() {
        // Header is line 1.
        let line = i + 2;
        let row = row.with_context(|| format!("line {line}"))?;

        let id = next_subject_id(&taken, now_ms);
        let edit = SubjectEdit {
            name: Some(row.name),
            load: Some(row.total_load),
            unit: row.load_unit.filter(|u| !u.is_empty()),
            speed: row.study_speed_minutes,
            priority: row.priority,
            target: row.target_rounds,
        };
        let subject = edit.apply(defaults.new_subject(id, ""));
        validate_subject(&subject).with_context(|| format!("line {line}"))?;

        taken.push(subject.clone());
        out.push(subject);
    }

    Ok(out)
}

/// Millisecond-timestamp id, bumped until unique within `existing`.
pub fn next_subject_id(existing: &[Subject], now_ms: i64) -> String {
    let mut candidate = now_ms;
    loop {
        let id = candidate.to_string();
        if !existing.iter().any(|s| s.id == id) {
            return id;
        }
        candidate += 1;
    }
}
