use clap::Parser;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vacancy_scraper::{
    cli::{Cli, Command},
    config::{get_config, init_config},
    database::{memory::MemorySink, pool::create_pool, sink::PgSink, sink::RecordSink},
    utils::{prompt::TerminalPrompt, time::today},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_config()?;
    let config = get_config();
    init_tracing(config.log_json);

    let date = cli.date.unwrap_or_else(today);

    if cli.dry_run {
        warn!("Dry run: rows are kept in memory and discarded on exit");
        let sink = MemorySink::new();
        let state = AppState::new(config, sink.clone())?;
        run(&state, cli.command, date).await?;
        for table in sink.table_names()? {
            info!(%table, rows = sink.row_count(&table)?, "Dry-run table");
        }
        return Ok(());
    }

    let target = config.database.resolve(&TerminalPrompt::new())?;
    let pool = create_pool(&target).await?;
    info!("Connected to database");

    let state = AppState::new(config, PgSink::new(pool.clone()))?;
    let outcome = run(&state, cli.command, date).await;
    pool.close().await;
    outcome
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn run<S>(
    state: &AppState<S>,
    command: Command,
    date: chrono::NaiveDate,
) -> anyhow::Result<()>
where
    S: RecordSink + Clone,
{
    let started = Instant::now();

    match command {
        Command::DjinniLinks => {
            let links = state.djinni_service.collect_links(date).await?;
            info!(links = links.len(), "djinni links stored");
        }
        Command::DjinniVacancies => {
            let links = state.djinni_service.stored_links(date).await?;
            if links.is_empty() {
                warn!(%date, "No stored djinni links for this day; run djinni-links first");
            }
            let vacancies = state.djinni_service.collect_vacancies(&links, date).await?;
            info!(vacancies = vacancies.len(), "djinni vacancies stored");
        }
        Command::Djinni => {
            let links = state.djinni_service.collect_links(date).await?;
            let vacancies = state.djinni_service.collect_vacancies(&links, date).await?;
            info!(
                links = links.len(),
                vacancies = vacancies.len(),
                "djinni run stored"
            );
        }
        Command::WorkUaCities => {
            let cities = state.work_ua_service.discover_cities(date).await?;
            info!(cities = cities.len(), "work.ua cities stored");
        }
        Command::WorkUaCategories => {
            let categories = state.work_ua_service.discover_categories(date).await?;
            info!(categories = categories.len(), "work.ua categories stored");
        }
        Command::WorkUaVacancies { cities, categories } => {
            let vacancies = state
                .work_ua_service
                .collect_vacancies(&cities, &categories, date)
                .await?;
            info!(vacancies = vacancies.len(), "work.ua vacancies stored");
        }
    }

    info!(elapsed = ?started.elapsed(), "Finished");
    Ok(())
}
