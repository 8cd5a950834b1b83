//! Questline client binary.
//!
//! Loads a level and an action queue, plays the queue through the runtime and
//! prints the level before and after.
//!
//! ```bash
//! questline levels/first_steps.ron levels/first_steps.txt
//! QUESTLINE_JSON_EVENTS=true questline levels/first_steps.ron moveright pickup
//! ```
mod config;
mod presentation;

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use runtime::{LevelController, LevelSummary, Runtime, RuntimeConfig, Topic};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use config::ClientConfig;

/// Level controller that reports the result in the log.
struct LoggingLevelController;

#[async_trait]
impl LevelController for LoggingLevelController {
    async fn win_level(&self, summary: LevelSummary) {
        info!(
            treasures = summary.treasures_collected,
            monsters = summary.monsters_killed,
            "level complete"
        );
    }

    async fn lose_level(&self, summary: LevelSummary) {
        info!(actions = summary.actions_executed, "caught by a monster");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env().with_args(std::env::args().skip(1));
    let _guard = setup_logging(config.log_dir.as_deref())?;

    let session = config.load()?;
    println!("{}", presentation::render(&session.level));

    let mut runtime_config = RuntimeConfig {
        game_config: session.game_config,
        ..RuntimeConfig::default()
    };
    if let Some(frame_interval) = config.frame_interval {
        runtime_config.frame_interval = frame_interval;
    }

    let mut runtime = Runtime::builder()
        .config(runtime_config)
        .level(session.level)
        .level_controller(LoggingLevelController)
        .build()
        .await?;

    let loggers: Vec<_> = runtime
        .handle()
        .subscribe_multiple(&Topic::ALL)
        .into_iter()
        .map(|(topic, rx)| tokio::spawn(presentation::log_topic(topic, rx, config.json_events)))
        .collect();

    let report = runtime.execute_actions(&session.tokens).await?;
    let final_state = runtime.handle().query_state().await?;
    runtime.shutdown().await?;

    for logger in loggers {
        logger.await??;
    }

    println!("{}", presentation::render(&final_state));
    println!("{}", presentation::report_line(&report));
    Ok(())
}

/// Logs to stderr, plus `questline.log` in `log_dir` when one is configured.
fn setup_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::never(dir, "questline.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(dir) = log_dir {
        info!("Log file: {}/questline.log", dir.display());
    }

    Ok(guard)
}
