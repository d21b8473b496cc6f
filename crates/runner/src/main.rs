use clap::Parser;
use kotoshi_engine::TimeEngine;
use kotoshi_runner::{Cli, RunnerSettings, build_clock, log_new_year, render, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = RunnerSettings::resolve(&cli)?;

    let engine = TimeEngine::new(build_clock(settings.start_at), settings.engine.clone());
    log::info!(
        "Time engine ready ({}, tick every {:?})",
        engine.clock_name(),
        settings.engine.tick_interval
    );

    if settings.once {
        println!("{}", render(&engine.get_snapshot(), settings.output)?);
        return Ok(());
    }

    let new_year = log_new_year(&engine);
    engine.start();

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };
    run(&engine, &settings, &mut std::io::stdout().lock(), shutdown).await?;

    new_year.unsubscribe();
    engine.stop();

    let last = engine.get_snapshot();
    log::info!(
        "Stopped at {}% of {} ({} days left)",
        last.progress_percent,
        last.year,
        last.remaining_days
    );
    Ok(())
}
