use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use daily_quiz::Settings;
use env_logger::{Env, Target};

#[derive(Parser, Debug)]
#[command(version, about = "One quiz question a day, in your terminal", long_about = None)]
struct Args {
    /// Cache file holding today's question and recent history
    #[arg(short, long)]
    cache: Option<PathBuf>,

    /// Never contact the remote question provider
    #[arg(long)]
    offline: bool,

    /// Question provider endpoint
    #[arg(long)]
    api_url: Option<String>,

    /// Seconds to wait for the question provider
    #[arg(long, default_value_t = 5)]
    timeout_secs: u64,

    /// Seed for reproducible question and answer order
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write logs (RUST_LOG controls the level)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        let defaults = Settings::default();
        Settings {
            cache_path: args.cache.unwrap_or(defaults.cache_path),
            log_path: args.log_file.unwrap_or(defaults.log_path),
            offline: args.offline,
            api_url: args.api_url.unwrap_or(defaults.api_url),
            timeout: Duration::from_secs(args.timeout_secs),
            seed: args.seed,
        }
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Logs go to a file; stderr is unusable while the terminal UI is up.
fn init_logging(path: &Path) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));

    match open_log_file(path) {
        Ok(file) => {
            builder.target(Target::Pipe(Box::new(file)));
        }
        Err(err) => eprintln!("Cannot open log file {}: {}", path.display(), err),
    }

    builder.init();
}

fn main() {
    let settings = Settings::from(Args::parse());
    init_logging(&settings.log_path);

    if let Err(e) = daily_quiz::run(&settings) {
        eprintln!("Error running daily quiz: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("daily-quiz.log");
        assert!(open_log_file(&path).is_ok());
        assert!(path.exists());
    }

    #[test]
    fn test_open_log_file_reports_blocked_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("logs");
        fs::write(&blocker, "not a directory").unwrap();

        assert!(open_log_file(&blocker.join("daily-quiz.log")).is_err());
    }
}
