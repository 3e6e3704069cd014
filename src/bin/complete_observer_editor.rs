// Observer Pattern: an editor notifies log and email listeners.
// Pass a TOML config path to change the vocabulary or the listeners.

use std::path::PathBuf;
use std::process::ExitCode;

use colored::Colorize;
use observer_pattern::{ConfigError, Editor, EditorConfig, ListenerError, Subscribers};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Listener(#[from] ListenerError),
}

fn load_config() -> Result<EditorConfig, ConfigError> {
    match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            println!("Using config {}", path.display());
            EditorConfig::load(&path)
        }
        None => {
            println!("Using built-in config");
            Ok(EditorConfig::default())
        }
    }
}

fn print_outputs(subscribers: &Subscribers) {
    for log in subscribers.logs() {
        println!("  {} {}", "log".cyan(), log.log_path());
        for entry in log.entries() {
            println!("    {entry}");
        }
    }
    for email in subscribers.emails() {
        println!("  {} {}", "email".magenta(), email.email());
        for message in email.sent() {
            println!("    {message}");
        }
    }
}

fn run() -> Result<(), DemoError> {
    let config = load_config()?;
    let (mut editor, subscribers): (Editor, Subscribers) = config.build_editor()?;
    println!("Registry: {:?}\n", editor.events());

    println!("{}", "=== Open and save ===".bold());
    editor.open_file("test.txt")?;
    editor.save_file()?;
    print_outputs(&subscribers);
    println!();

    println!("{}", "=== Email unsubscribed from open ===".bold());
    subscribers.detach_emails(editor.events_mut(), "open");
    editor.open_file("notes.txt")?;
    print_outputs(&subscribers);

    Ok(())
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    println!("Observer Pattern: Editor Events");
    println!("===============================\n");

    match run() {
        Ok(()) => {
            println!("\n{}", "✓ Done".green());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {err}", "error:".bold().red());
            ExitCode::FAILURE
        }
    }
}
