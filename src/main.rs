use std::process::ExitCode;

use clap::Parser;

use pad_wm::app;
use pad_wm::config::{Cli, Config};
use pad_wm::error::AppError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = Config::try_from(&cli)
        .map_err(AppError::from)
        .and_then(app::run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("pad-wm: {err}");
            ExitCode::FAILURE
        }
    }
}
