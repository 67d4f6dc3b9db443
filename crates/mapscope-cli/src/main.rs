mod render;

use clap::{Parser, Subcommand};
use sqlx::PgPool;
use tracing_subscriber::EnvFilter;

use mapscope_core::AppConfig;
use mapscope_engine::{tier_order_from_results, AnalysisResult, CampaignRunner};
use mapscope_places::PlacesClient;

#[derive(Debug, Parser)]
#[command(name = "mapscope")]
#[command(about = "Geographic search visibility analyzer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a full analysis campaign and print the dominance and expansion reports
    Run {
        /// Skip persistence; accumulate results in memory only
        #[arg(long)]
        dry_run: bool,
    },
    /// Apply pending database migrations
    Migrate,
    /// Re-render reports from a stored run without a fresh sweep
    Report {
        /// Run id to render; defaults to the most recent completed run
        #[arg(long)]
        run: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = mapscope_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Run { dry_run } => run_campaign(&config, dry_run).await,
        Commands::Migrate => migrate(&config).await,
        Commands::Report { run } => report(&config, run).await,
    }
}

/// Runs the full campaign: sweep every configured point, persist results
/// (unless `--dry-run`), then render both reports.
///
/// Ctrl-C aborts the sweep wholesale: already-persisted rows are kept, the
/// run row is marked failed best-effort, and no report is rendered from
/// partial data.
async fn run_campaign(config: &AppConfig, dry_run: bool) -> anyhow::Result<()> {
    let plan = mapscope_core::load_plan(&config.plan_path)?;
    let client = PlacesClient::new(&config.places_api_key, config.http_timeout_secs)?;

    tracing::info!(
        base = %config.base.name,
        business = %config.business_name,
        tiers = plan.tiers.len(),
        queries = plan.total_queries(),
        "starting geographic boundaries analysis"
    );

    if dry_run {
        let runner = CampaignRunner::new(&client, config, &plan, None);
        let Some(results) = run_until_interrupted(&runner).await else {
            return Ok(());
        };
        render::render_reports(&results, &plan.tier_labels(), config.top_opportunities);
        return Ok(());
    }

    let pool = connect(config).await?;
    mapscope_db::run_migrations(&pool).await?;

    let run = mapscope_db::create_analysis_run(&pool, "cli").await?;
    if let Err(e) = mapscope_db::start_analysis_run(&pool, run.id).await {
        fail_run_best_effort(&pool, run.id, format!("{e:#}")).await;
        return Err(e.into());
    }

    let runner = CampaignRunner::new(&client, config, &plan, Some((&pool, run.id)));
    let Some(results) = run_until_interrupted(&runner).await else {
        fail_run_best_effort(&pool, run.id, "interrupted by signal".to_string()).await;
        pool.close().await;
        return Ok(());
    };

    let count = i32::try_from(results.len()).unwrap_or(i32::MAX);
    if let Err(e) = mapscope_db::complete_analysis_run(&pool, run.id, count).await {
        fail_run_best_effort(&pool, run.id, format!("{e:#}")).await;
        return Err(e.into());
    }
    tracing::info!(run_id = run.id, results = results.len(), "analysis run completed");

    render::render_reports(&results, &plan.tier_labels(), config.top_opportunities);
    Ok(())
}

/// Drives the runner to completion unless a Ctrl-C arrives first.
/// Returns `None` on interrupt.
async fn run_until_interrupted(runner: &CampaignRunner<'_>) -> Option<Vec<AnalysisResult>> {
    tokio::select! {
        results = runner.run() => Some(results),
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("interrupted — aborting sweep, no report will be rendered");
            None
        }
    }
}

async fn migrate(config: &AppConfig) -> anyhow::Result<()> {
    let pool = connect(config).await?;
    mapscope_db::run_migrations(&pool).await?;
    mapscope_db::ping(&pool).await?;
    println!("migrations applied");
    Ok(())
}

/// Re-renders the reports from a stored run's result rows.
async fn report(config: &AppConfig, run_id: Option<i64>) -> anyhow::Result<()> {
    let pool = connect(config).await?;

    let run = match run_id {
        Some(id) => mapscope_db::get_analysis_run(&pool, id).await?,
        None => mapscope_db::latest_completed_run(&pool)
            .await?
            .ok_or_else(|| anyhow::anyhow!("no completed analysis run found; run `mapscope run` first"))?,
    };

    let rows = mapscope_db::list_results_for_run(&pool, run.id).await?;
    let results: Vec<AnalysisResult> = rows.into_iter().map(AnalysisResult::from).collect();

    tracing::info!(run_id = run.id, results = results.len(), "rendering stored run");
    let tier_order = tier_order_from_results(&results);
    render::render_reports(&results, &tier_order, config.top_opportunities);
    Ok(())
}

async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    let pool_config = mapscope_db::PoolConfig {
        max_connections: config.db_max_connections,
        min_connections: config.db_min_connections,
        acquire_timeout_secs: config.db_acquire_timeout_secs,
    };
    let pool = mapscope_db::connect_pool(&config.database_url, pool_config).await?;
    Ok(pool)
}

/// Marks a run as failed, logging rather than propagating any error so the
/// original failure stays the one the caller reports.
async fn fail_run_best_effort(pool: &PgPool, run_id: i64, message: String) {
    if let Err(e) = mapscope_db::fail_analysis_run(pool, run_id, &message).await {
        tracing::error!(run_id, error = %e, "failed to mark analysis run as failed");
    }
}
