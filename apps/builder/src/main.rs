use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_builder::config::Config;
use resume_builder::session::Session;
use resume_builder::state::AppState;
use resume_builder::AppError;

#[derive(Parser, Debug)]
#[command(name = "resume-builder", about = "Manage locally stored resumes", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List saved resumes in creation order
    List,
    /// Print the id of the resume being edited
    Current,
    /// Print a resume with its resolved template (defaults to the current one)
    Show { id: Option<String> },
    /// Create an empty resume and make it current
    New { name: String },
    /// Make a saved resume current
    Select { id: String },
    /// Copy a resume and make the copy current
    Duplicate { id: String },
    /// Delete a resume
    Delete { id: String },
    /// Set the name on the current resume
    Rename { first: String, last: String },
    /// Change the current resume's template
    SetTemplate { template_id: String },
    /// List document templates
    Templates,
    /// List editor themes
    Themes,
    /// Rebuild the resume index from stored documents
    Repair,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting resume-builder v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let state = AppState::from_config(config);
    let mut session = state.open_session()?;

    if let Err(e) = run(cli.command, &state, &mut session) {
        print_json(&json!({
            "error": {
                "code": e.code(),
                "message": e.to_string()
            }
        }))?;
        session.flush();
        std::process::exit(1);
    }
    session.flush();
    Ok(())
}

fn run(command: Command, state: &AppState, session: &mut Session) -> Result<(), AppError> {
    match command {
        Command::List => print_json(&session.listings())?,
        Command::Current => print_json(&json!({ "id": session.current_id() }))?,
        Command::Show { id } => {
            if let Some(id) = id {
                if !session.switch_to(&id) {
                    return Err(AppError::NotFound(format!("Resume {id} not found")));
                }
            } else {
                session.bootstrap();
            }
            print_json(&session.resolved())?;
        }
        Command::New { name } => {
            let id = session.new_resume(&name);
            print_json(&json!({ "id": id }))?;
        }
        Command::Select { id } => {
            if !session.switch_to(&id) {
                return Err(AppError::NotFound(format!("Resume {id} not found")));
            }
            print_json(&json!({ "id": id }))?;
        }
        Command::Duplicate { id } => {
            let copy = session.duplicate(&id)?;
            print_json(&json!({ "id": copy, "source": id }))?;
        }
        Command::Delete { id } => {
            session.delete(&id);
            print_json(&json!({ "deleted": id, "current": session.current_id() }))?;
        }
        Command::Rename { first, last } => {
            session.bootstrap();
            let doc = session.edit(|mut doc| {
                doc.personal_info.first_name = first;
                doc.personal_info.last_name = last;
                doc
            })?;
            print_json(&json!({ "id": doc.id, "name": doc.display_name() }))?;
        }
        Command::SetTemplate { template_id } => {
            session.bootstrap();
            session.apply_template(&template_id)?;
            print_json(&session.resolved())?;
        }
        Command::Templates => print_json(&state.registry.templates())?,
        Command::Themes => print_json(&state.registry.themes())?,
        Command::Repair => print_json(&state.repo.repair_index())?,
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let out = serde_json::to_string_pretty(value).map_err(anyhow::Error::from)?;
    println!("{out}");
    Ok(())
}
