use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use edit_core::{ConfigError, EditConfig};
use mimalloc::MiMalloc;
use thiserror::Error;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Debug, Error)]
enum CliError {
    #[error("reading {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("config {path:?}: {source}")]
    Config { path: PathBuf, source: ConfigError },
    #[error(transparent)]
    Platform(#[from] platform::PlatformError),
}

fn read(path: PathBuf) -> Result<(PathBuf, String), CliError> {
    match fs::read_to_string(&path) {
        Ok(content) => Ok((path, content)),
        Err(source) => Err(CliError::Read { path, source }),
    }
}

/// `editkit [CONFIG.toml] [TEXT_FILE]`
fn run() -> Result<(), CliError> {
    let mut args = env::args_os().skip(1).map(PathBuf::from);

    let config = match args.next() {
        Some(path) => {
            let (path, content) = read(path)?;
            EditConfig::from_toml_str(&content)
                .map_err(|source| CliError::Config { path, source })?
        }
        None => EditConfig {
            multiline: true,
            width: 640.0,
            height: 360.0,
            ..EditConfig::default()
        },
    };
    let text = match args.next() {
        Some(path) => read(path)?.1,
        None => String::new(),
    };

    log::info!(
        target: "editkit",
        "starting: {}x{}, multiline={}, read_only={}",
        config.width,
        config.height,
        config.multiline,
        config.read_only
    );
    platform::run(config, text)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!(target: "editkit", "{err}");
            ExitCode::FAILURE
        }
    }
}
