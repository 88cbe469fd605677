use std::{fs::OpenOptions, path::Path};

use anyhow::Result;
use clap::Parser;
use weather_clock::{
    app::config::{LOG_FILE_NAME, config_dir_path},
    cli::Cli,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.validate()?;
    init_logging(&cli);

    if cli.one_shot {
        return weather_clock::run_one_shot(&cli).await;
    }
    weather_clock::run(cli).await
}

/// Logs go to stderr in one-shot mode and to a file beside the config otherwise.
fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    if cli.one_shot {
        builder.target(env_logger::Target::Stderr);
    } else {
        let Some(file) = config_dir_path(cli.config_dir.as_deref())
            .and_then(|dir| open_log_file(&dir.join(LOG_FILE_NAME)))
        else {
            return;
        };
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    let _ = builder.try_init();
}

fn open_log_file(path: &Path) -> Option<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}
