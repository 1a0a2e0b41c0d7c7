use std::io::{self, Write as _};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{SeminarStore, StoreEvent};
use shared::domain::{Seminar, SeminarDraft, SeminarId};

mod config;

#[derive(Parser, Debug)]
#[command(name = "seminars", about = "Browse and edit a remote seminar collection")]
struct Args {
    /// Base address of the seminar service, e.g. http://localhost:3000
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the collection and print each seminar as a card
    List,
    /// Replace every field of one seminar
    Update {
        id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
        #[arg(long)]
        photo: String,
    },
    /// Delete one seminar (asks for confirmation first)
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();
    let settings = config::load_settings(args.server_url.clone())?;
    let store = SeminarStore::new(settings.api_base_url);

    store.load().await;
    if let Some(error) = store.last_error().await {
        eprintln!("{error}");
        return Ok(ExitCode::FAILURE);
    }

    match args.command {
        Command::List => {
            let seminars = store.seminars().await;
            if seminars.is_empty() {
                println!("No seminars scheduled.");
            }
            for seminar in &seminars {
                print_card(seminar);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Update {
            id,
            title,
            description,
            date,
            time,
            photo,
        } => {
            let id = SeminarId(id);
            if !store.seminars().await.iter().any(|s| s.id == id) {
                eprintln!("no seminar with id {}", id.0);
                return Ok(ExitCode::FAILURE);
            }
            let draft = SeminarDraft {
                title,
                description,
                date,
                time,
                photo,
            };
            let mut events = store.subscribe_events();
            store.update(id, draft).await;
            match events.recv().await {
                Ok(StoreEvent::SeminarUpdated { id }) => {
                    println!("Seminar {} updated.", id.0);
                    Ok(ExitCode::SUCCESS)
                }
                Ok(StoreEvent::Error(message)) => {
                    eprintln!("{message}");
                    Ok(ExitCode::FAILURE)
                }
                other => {
                    eprintln!("unexpected store signal: {other:?}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Delete { id, yes } => {
            let id = SeminarId(id);
            let Some(seminar) = store.seminars().await.into_iter().find(|s| s.id == id) else {
                eprintln!("no seminar with id {}", id.0);
                return Ok(ExitCode::FAILURE);
            };
            if !yes && !confirm_removal(&seminar)? {
                println!("Kept.");
                return Ok(ExitCode::SUCCESS);
            }
            let mut events = store.subscribe_events();
            store.remove(id).await;
            match events.recv().await {
                Ok(StoreEvent::SeminarRemoved { id }) => {
                    println!("Seminar {} deleted.", id.0);
                    Ok(ExitCode::SUCCESS)
                }
                Ok(StoreEvent::Error(message)) => {
                    eprintln!("{message}");
                    Ok(ExitCode::FAILURE)
                }
                other => {
                    eprintln!("unexpected store signal: {other:?}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

fn print_card(seminar: &Seminar) {
    println!("#{} {}", seminar.id.0, seminar.title);
    println!("    {} at {}", seminar.date, seminar.time);
    println!("    {}", truncate(&seminar.description, 120));
    println!("    photo: {}", seminar.photo);
    println!();
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(limit).collect();
    cut.push_str("...");
    cut
}

/// Deleting is irreversible on the remote side; the store itself never
/// prompts, so the question is asked here before `remove` is called.
fn confirm_removal(seminar: &Seminar) -> Result<bool> {
    print!(
        "Delete \"{}\" ({} at {})? [y/N] ",
        seminar.title, seminar.date, seminar.time
    );
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate("short", 120), "short");
    }

    #[test]
    fn truncate_cuts_on_char_boundaries() {
        let text = "долгое описание семинара";
        let cut = truncate(text, 6);
        assert_eq!(cut, "долгое...");
    }
}
