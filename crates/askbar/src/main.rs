//! A terminal chat over Gemini, built on the `askbar` library.

#[macro_use]
extern crate tracing;

use std::env;
use std::io::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use askbar::core::conversation::Speaker;
use askbar::store::FileStore;
use askbar::{Session, SessionBuilder, Submission};
use askbar_gemini_model::{GeminiConfigBuilder, GeminiProvider};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufReadExt};

const BAR_CHAR: &str = "▎";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut config = GeminiConfigBuilder::new();
    if let Ok(base_url) = env::var("GEMINI_BASE_URL") {
        config = config.with_base_url(base_url);
    }
    let model_provider = GeminiProvider::new(config.build());

    let store = FileStore::new(store_path());
    debug!("using store at {}", store.path().display());
    let mut builder =
        SessionBuilder::with_model_provider(model_provider).with_store(store);
    if let Ok(model) = env::var("GEMINI_MODEL") {
        builder = builder.with_model(model);
    }
    if let Ok(api_key) = env::var("GEMINI_API_KEY") {
        builder = builder.with_credential(api_key);
    }
    let session = match builder.build() {
        Ok(session) => session,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };

    print_history(&session);
    if !session.has_credential() {
        println!(
            "{}",
            "Please set your API key with `/key <KEY>` to enable AI responses"
                .bright_blue()
        );
    }

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let Some(line) = read_line().await else {
            break;
        };
        let line = line.trim();

        match line.split_once(' ').unwrap_or((line, "")) {
            ("/quit", _) => break,
            ("/new", _) => {
                session.new_thread();
                println!("{}", "Started a new thread.".dimmed());
                continue;
            }
            ("/history", _) => {
                print_history(&session);
                continue;
            }
            ("/key", key) => {
                save_key(&session, key.trim());
                continue;
            }
            _ => {}
        }

        let progress_bar = ProgressBar::new_spinner();
        progress_bar.set_style(progress_style.clone());
        progress_bar.set_message("🤔 Thinking...");
        progress_bar.enable_steady_tick(Duration::from_millis(100));

        let submission = session.submit(line).await;

        // Finish the progress bar before printing anything else.
        progress_bar.finish_and_clear();

        match submission {
            Submission::Ignored => {}
            Submission::CredentialRequired => {
                println!(
                    "{}",
                    "Please set your API key first: /key <KEY>".bright_yellow()
                );
            }
            Submission::Replied(reply) => print_turn(Speaker::Model, &reply),
            Submission::Failed { notice, error } => {
                print_turn(Speaker::Model, notice);
                println!("{}", format!("({error})").dimmed());
            }
        }
    }
}

fn store_path() -> PathBuf {
    if let Ok(path) = env::var("ASKBAR_STORE") {
        return PathBuf::from(path);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_owned());
    PathBuf::from(home).join(".askbar.json")
}

fn save_key(session: &Session, key: &str) {
    if key.is_empty() {
        println!("{}", "Usage: /key <KEY>".bright_yellow());
        return;
    }
    match session.save_credential(key) {
        Ok(()) => println!("{}", "API key saved.".dimmed()),
        Err(err) => {
            error!("failed to save the API key: {err}");
            println!("{}", format!("Could not save the API key: {err}").red());
        }
    }
}

fn print_history(session: &Session) {
    for turn in session.history() {
        print_turn(turn.speaker(), turn.text());
    }
}

fn print_turn(speaker: Speaker, text: &str) {
    match speaker {
        Speaker::User => {
            for paragraph in text.lines() {
                println!("{}{}", BAR_CHAR.bright_blue(), paragraph);
            }
        }
        Speaker::Model => {
            let mut lines = text.lines();
            println!(
                "{}🤖 {}",
                BAR_CHAR.bright_cyan(),
                lines.next().unwrap_or_default().bright_white()
            );
            for paragraph in lines {
                println!("{}{}", BAR_CHAR.bright_cyan(), paragraph.bright_white());
            }
        }
    }
}

async fn read_line() -> Option<String> {
    let mut stdin = io::BufReader::new(io::stdin());
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
