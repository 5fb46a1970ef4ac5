mod platform;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use platform::settings::{self, SETTINGS_FILENAME};

#[derive(Parser)]
#[command(author, version, about = "Calculate the hash of a file", long_about = None)]
struct Cli {
    /// File to hash right away; the program exits once it is done.
    /// Without it, paths and commands are read from stdin.
    file: Option<PathBuf>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let settings = settings::load_or_default(Path::new(SETTINGS_FILENAME));
    platform::logging::initialize(settings.log_destination, settings.level_filter());

    platform::run_app(cli.file, &settings)
}
