//! NoteSpace command-line client.
//!
//! The thin application shell: it owns the SessionStore/ApiClient/
//! AuthSession triple, maps subcommands onto client calls, and prints
//! results as JSON or short status lines.

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use notespace_client::models::{NoteCreate, NoteUpdate, Role, ShareRequest};
use notespace_client::{ApiClient, AuthSession, AuthState, ClientConfig, SessionStore};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "notespace", version, about = "NoteSpace collaborative notes client")]
struct Cli {
    /// API base URL (overrides $NOTESPACE_API_URL).
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account and log in
    Register { email: String },
    /// Log in and store the session token
    Login { email: String },
    /// Clear the stored session token
    Logout,
    /// Show the currently logged-in user
    Whoami,
    /// List your notes, optionally filtered by a query
    List {
        #[arg(long)]
        query: Option<String>,
    },
    /// Search owned and shared notes
    Search { query: String },
    /// List notes shared with you
    Shared,
    /// Show one note
    Show { id: i64 },
    /// Create a note
    Create { title: String, content: String },
    /// Update a note's title and/or content
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete a note
    Delete { id: i64 },
    /// Share a note with another user by email
    Share {
        id: i64,
        email: String,
        #[arg(long, default_value = "viewer")]
        role: Role,
    },
    /// Remove a collaborator from a note
    Unshare { id: i64, collaborator_id: i64 },
    /// List a note's collaborators
    Collaborators { id: i64 },
    /// List a note's versions
    Versions { id: i64 },
    /// Show one version of a note
    Version { id: i64, version: i64 },
    /// Restore a note to an earlier version
    Restore { id: i64, version: i64 },
    /// Show a note's activity log
    Activity { id: i64 },
    /// Show your own activity log
    MyActivity,
    /// List users you can share with
    Users,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.url {
        Some(url) => ClientConfig::new(url.clone()),
        None => ClientConfig::from_env(),
    };

    let session = Arc::new(match config.token_path.clone() {
        Some(path) => SessionStore::with_path(path),
        None => SessionStore::ephemeral(),
    });
    let api = Arc::new(ApiClient::new(&config, session)?);
    let auth = AuthSession::new(api.clone());

    match cli.command {
        Command::Register { email } => {
            let password = prompt_password()?;
            let user = auth.register(&email, &password).await?;
            println!("Registered and logged in as {} (id {})", user.email, user.id);
        }
        Command::Login { email } => {
            let password = prompt_password()?;
            let user = auth.login(&email, &password).await?;
            println!("Logged in as {} (id {})", user.email, user.id);
        }
        Command::Logout => {
            auth.logout();
            println!("Logged out");
        }
        Command::Whoami => match auth.bootstrap().await {
            AuthState::Authenticated(user) => println!("{} (id {})", user.email, user.id),
            _ => println!("Not logged in"),
        },
        Command::List { query } => print_json(&api.list_notes(query.as_deref()).await?)?,
        Command::Search { query } => print_json(&api.search_notes(&query).await?)?,
        Command::Shared => print_json(&api.shared_notes_or_empty().await)?,
        Command::Show { id } => print_json(&api.get_note(id).await?)?,
        Command::Create { title, content } => {
            print_json(&api.create_note(&NoteCreate { title, content }).await?)?
        }
        Command::Edit { id, title, content } => {
            if title.is_none() && content.is_none() {
                bail!("nothing to update: pass --title and/or --content");
            }
            print_json(&api.update_note(id, &NoteUpdate { title, content }).await?)?
        }
        Command::Delete { id } => {
            api.delete_note(id).await?;
            println!("Deleted note {id}");
        }
        Command::Share { id, email, role } => {
            print_json(&api.share_note(id, &ShareRequest { email, role }).await?)?
        }
        Command::Unshare {
            id,
            collaborator_id,
        } => {
            api.remove_collaborator(id, collaborator_id).await?;
            println!("Removed collaborator {collaborator_id} from note {id}");
        }
        Command::Collaborators { id } => print_json(&api.collaborators_or_empty(id).await)?,
        Command::Versions { id } => print_json(&api.list_versions(id).await?)?,
        Command::Version { id, version } => print_json(&api.get_version(id, version).await?)?,
        Command::Restore { id, version } => print_json(&api.restore_version(id, version).await?)?,
        Command::Activity { id } => print_json(&api.note_activity(id).await?)?,
        Command::MyActivity => print_json(&api.my_activity().await?)?,
        Command::Users => print_json(&api.list_users_or_empty().await)?,
    }

    Ok(())
}

fn prompt_password() -> Result<String> {
    dialoguer::Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(|err| anyhow!("failed to read password: {err}"))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
