use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cowichan_bus::agency::Generator;
use cowichan_bus::feed::Feed;
use cowichan_bus::split::SplitConfig;

/// Environment variable overriding the aligner's lookahead.
const LOOKAHEAD_ENV: &str = "SPLIT_LOOKAHEAD";

fn init_logger() {
    let default_level = LevelFilter::INFO;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|err| {
        if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
            eprintln!(
                "invalid {}, falling back to level '{}' - {}",
                EnvFilter::DEFAULT_ENV,
                default_level,
                err,
            );
        }
        EnvFilter::new(default_level.to_string())
    });
    // stdout carries the JSON output
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> ExitCode {
    init_logger();

    let Some(dir) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("usage: cowichan-bus <gtfs-dir>");
        return ExitCode::from(2);
    };

    let lookahead = std::env::var(LOOKAHEAD_ENV).ok();
    let config = match SplitConfig::with_lookahead_override(lookahead.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, var = LOOKAHEAD_ENV, "Invalid configuration");
            return ExitCode::from(2);
        }
    };
    info!(lookahead = config.lookahead, "Starting generation run");

    let feed = match Feed::load_from_dir(&dir) {
        Ok(feed) => feed,
        Err(e) => {
            error!(error = %e, "Failed to load feed");
            return ExitCode::FAILURE;
        }
    };

    let output = match Generator::cowichan_valley(config).and_then(|g| g.run(&feed)) {
        Ok(output) => output,
        Err(e) => {
            error!(error = %e, route = ?e.route(), "Generation run failed");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Failed to serialize output");
            ExitCode::FAILURE
        }
    }
}
