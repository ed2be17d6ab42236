//! DriveDesk
//!
//! Command-line entry point to the records console

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{error, info, warn};

use DriveDesk::{
    config::Settings,
    controller::{DeleteOutcome, SubmitOutcome, SystemClock},
    database::open_store,
    models::{Entity, EntityKind, Record},
    services::{AdminConsole, AuthService},
    utils::{helpers::{parse_date, truncate_text}, logging},
    DriveDeskError, EntityListController,
};

#[derive(Parser)]
#[command(name = "drivedesk", version, about = "Driving-school records console")]
struct Cli {
    /// Configuration file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, short = 'u', env = "DRIVEDESK_USERNAME")]
    username: String,

    #[arg(long, short = 'p', env = "DRIVEDESK_PASSWORD", hide_env_values = true)]
    password: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show record totals per status
    Dashboard,
    /// List records of one kind, optionally filtered
    List {
        kind: EntityKind,
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Show one record as stored
    Show { kind: EntityKind, id: String },
    /// Create a record from a JSON object of its fields
    Add { kind: EntityKind, json: String },
    /// Change fields of a record from a JSON object
    Edit { kind: EntityKind, id: String, json: String },
    /// Delete a record
    Delete {
        kind: EntityKind,
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Students enrolled in a course
    StudentsInCourse { course_code: String },
    /// Licenses held by a national id
    LicensesFor { national_id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::load(cli.config.as_deref())?;
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}", DriveDesk::info());

    let auth = AuthService::new(settings.admin.clone());
    let session = auth.login(&cli.username, &cli.password)?;

    let store = open_store(&settings.store).await?;
    let mut console = AdminConsole::new(store, Arc::new(SystemClock), &settings.console);
    if !console.health_check().await {
        warn!("Record store is not answering, listings may show built-in data");
    }

    for (kind, outcome) in console.load_all().await {
        if let Some(warning) = outcome.warning() {
            eprintln!("warning: {} ({})", warning, kind);
        }
    }

    let result = run(cli.command, &mut console).await;
    if let Err(e) = &result {
        let severity = e
            .downcast_ref::<DriveDeskError>()
            .map(|e| e.severity().to_string())
            .unwrap_or_else(|| "error".to_string());
        error!(user = %session.username, severity = %severity, error = %e, "Command failed");
    }
    result
}

async fn run(command: Command, console: &mut AdminConsole) -> anyhow::Result<()> {
    match command {
        Command::Dashboard => {
            let summary = console.dashboard();
            for kind in &summary.kinds {
                let statuses: Vec<String> = kind
                    .by_status
                    .iter()
                    .map(|(status, count)| format!("{} {}", status, count))
                    .collect();
                println!(
                    "{:<11} {:>4}  ({})",
                    kind.kind.collection(),
                    kind.total,
                    statuses.join(", ")
                );
            }
            let capacity = &summary.course_capacity;
            println!(
                "course seats {} (ongoing {}, upcoming {}, finished {})",
                capacity.total, capacity.ongoing, capacity.upcoming, capacity.finished
            );
            println!("exam candidates pending {}", summary.pending_exam_candidates);
        }
        Command::List { kind, search } => {
            let term = search.unwrap_or_default();
            match kind {
                EntityKind::Student => print_listing(&console.students, &term),
                EntityKind::Course => print_listing(&console.courses, &term),
                EntityKind::Instructor => print_listing(&console.instructors, &term),
                EntityKind::Exam => print_listing(&console.exams, &term),
                EntityKind::License => print_listing(&console.licenses, &term),
            }
        }
        Command::Show { kind, id } => match kind {
            EntityKind::Student => show(&console.students, &id).await?,
            EntityKind::Course => show(&console.courses, &id).await?,
            EntityKind::Instructor => show(&console.instructors, &id).await?,
            EntityKind::Exam => show(&console.exams, &id).await?,
            EntityKind::License => show(&console.licenses, &id).await?,
        },
        Command::Add { kind, json } => {
            let patch = parse_object(&json)?;
            match kind {
                EntityKind::Student => add(&mut console.students, patch).await?,
                EntityKind::Course => add(&mut console.courses, patch).await?,
                EntityKind::Instructor => add(&mut console.instructors, patch).await?,
                EntityKind::Exam => add(&mut console.exams, patch).await?,
                EntityKind::License => add(&mut console.licenses, patch).await?,
            }
        }
        Command::Edit { kind, id, json } => {
            let patch = parse_object(&json)?;
            match kind {
                EntityKind::Student => edit(&mut console.students, &id, patch).await?,
                EntityKind::Course => edit(&mut console.courses, &id, patch).await?,
                EntityKind::Instructor => edit(&mut console.instructors, &id, patch).await?,
                EntityKind::Exam => edit(&mut console.exams, &id, patch).await?,
                EntityKind::License => edit(&mut console.licenses, &id, patch).await?,
            }
        }
        Command::Delete { kind, id, yes } => {
            let outcome = match kind {
                EntityKind::Student => delete(&mut console.students, &id, yes).await?,
                EntityKind::Course => delete(&mut console.courses, &id, yes).await?,
                EntityKind::Instructor => delete(&mut console.instructors, &id, yes).await?,
                EntityKind::Exam => delete(&mut console.exams, &id, yes).await?,
                EntityKind::License => delete(&mut console.licenses, &id, yes).await?,
            };
            match outcome {
                DeleteOutcome::Deleted { id } => println!("deleted {} {}", kind, id),
                DeleteOutcome::Cancelled => println!("cancelled"),
            }
        }
        Command::StudentsInCourse { course_code } => {
            for record in console.students_in_course(&course_code).await? {
                print_row(&record);
            }
        }
        Command::LicensesFor { national_id } => {
            for record in console.licenses_for_holder(&national_id).await? {
                print_row(&record);
            }
        }
    }

    Ok(())
}

fn print_row<E: Entity>(record: &Record<E>) {
    println!(
        "{:<34} {:<40} {}",
        record.id,
        truncate_text(record.fields.display_name(), 40),
        record.fields.status_label()
    );
}

fn print_listing<E: Entity>(controller: &EntityListController<E>, term: &str) {
    let matches = controller.search(term);
    for record in &matches {
        print_row(record);
    }
    println!("{} of {} {}", matches.len(), controller.len(), E::KIND.collection());
}

async fn show<E: Entity>(controller: &EntityListController<E>, id: &str) -> anyhow::Result<()> {
    let record = match controller.fetch(id).await {
        Ok(Some(record)) => record,
        Ok(None) => bail!("{} {} does not exist", E::KIND, id),
        Err(e) => {
            warn!(error = %e, "Store lookup failed, falling back to listing");
            controller
                .find(id)
                .cloned()
                .with_context(|| format!("{} {} is not in the listing", E::KIND, id))?
        }
    };
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

async fn add<E: Entity>(
    controller: &mut EntityListController<E>,
    patch: serde_json::Map<String, Value>,
) -> anyhow::Result<()> {
    let fields = apply_patch(E::default(), patch)?;
    let mut draft = controller.begin_create();
    draft.set_fields(fields);
    report_submit(controller.submit(draft).await)
}

async fn edit<E: Entity>(
    controller: &mut EntityListController<E>,
    id: &str,
    patch: serde_json::Map<String, Value>,
) -> anyhow::Result<()> {
    let mut draft = controller
        .begin_edit(id)
        .with_context(|| format!("{} {} is not in the listing", E::KIND, id))?;
    let fields = apply_patch(draft.fields().clone(), patch)?;
    draft.set_fields(fields);
    report_submit(controller.submit(draft).await)
}

async fn delete<E: Entity>(
    controller: &mut EntityListController<E>,
    id: &str,
    yes: bool,
) -> anyhow::Result<DeleteOutcome> {
    let outcome = controller
        .delete(id, |record| {
            yes || confirm(&format!(
                "Delete {} '{}' ({})?",
                E::KIND,
                record.fields.display_name(),
                record.id
            ))
        })
        .await?;
    Ok(outcome)
}

fn report_submit(result: DriveDesk::Result<SubmitOutcome>) -> anyhow::Result<()> {
    match result {
        Ok(SubmitOutcome::Created { id }) => println!("created {}", id),
        Ok(SubmitOutcome::Updated { id }) => println!("updated {}", id),
        Ok(SubmitOutcome::Viewed) => {}
        Err(DriveDeskError::Validation(violations)) => {
            for message in violations.messages() {
                eprintln!("  - {}", message);
            }
            bail!("{} problem(s) found, nothing was saved", violations.len());
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn parse_object(json: &str) -> anyhow::Result<serde_json::Map<String, Value>> {
    match serde_json::from_str(json).context("fields must be a JSON object")? {
        Value::Object(map) => Ok(map),
        _ => bail!("fields must be a JSON object"),
    }
}

/// Overlay the given keys onto `base`'s serialized fields.
///
/// Date fields also accept `DD/MM/YYYY`; a blank date clears the field.
fn apply_patch<E: Entity>(base: E, patch: serde_json::Map<String, Value>) -> anyhow::Result<E> {
    let mut value = serde_json::to_value(base)?;
    if let Value::Object(fields) = &mut value {
        for (key, entry) in patch {
            let entry = match entry {
                Value::String(text) if key.ends_with("date") || key == "date_of_birth" => {
                    match parse_date(&text) {
                        Some(date) => Value::String(date.to_string()),
                        None if text.trim().is_empty() => Value::Null,
                        None => bail!("{} is not a date: {}", key, text),
                    }
                }
                other => other,
            };
            fields.insert(key, entry);
        }
    }
    serde_json::from_value(value).with_context(|| format!("invalid {} fields", E::KIND))
}

fn confirm(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}
