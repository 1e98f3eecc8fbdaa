mod logging;

use clap::{CommandFactory, Parser};
use shredder::{shred_with, ShredOptions};
use std::path::PathBuf;
use std::process::ExitCode;

/// Version info from build.rs
const VERSION: &str = env!("SHREDDER_VERSION");
const PROFILE: &str = env!("SHREDDER_PROFILE");
const GIT_HASH: &str = env!("SHREDDER_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} ({})", PROFILE, VERSION, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "shredder")]
#[command(author, about = "Overwrite a file with random data, then truncate and delete it", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    /// Overwrite and truncate, but keep the file
    #[arg(short, long)]
    keep: bool,

    /// Leave the overwritten file at its original length
    #[arg(long)]
    no_truncate: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// File to shred
    path: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("shredder {}", get_version());
        return ExitCode::SUCCESS;
    }

    let path = match cli.path {
        Some(path) => path,
        None => {
            eprintln!("{}", Cli::command().render_usage());
            return ExitCode::FAILURE;
        }
    };

    logging::init(cli.verbose);

    let options = ShredOptions {
        truncate: !cli.no_truncate,
        delete: !cli.keep,
        ..Default::default()
    };

    println!("Shredding file: {}", path.display());

    match shred_with(&path, &options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Shred error: {}", e);
            ExitCode::from(e.exit_status())
        }
    }
}
