//! cfetch — Codeforces analytics dashboard backend
//!
//! Usage:
//!   cfetch serve --port 3001          — Launch the JSON API server
//!   cfetch run --handle tourist       — One-shot analytics report from CLI

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;
use clap::{Parser, Subcommand};
use engine::{load_analytics, AnalyticsViewModel, ApiError, CodeforcesClient};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "cfetch")]
#[command(about = "Codeforces contest-history analytics", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the analytics web server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        /// Port to listen on
        #[arg(short, long, default_value_t = 3001)]
        port: u16,
    },
    /// Build analytics for one handle and print a summary (no web server)
    Run {
        /// Codeforces handle to analyze
        #[arg(long)]
        handle: String,
        /// Optional JSON export path for the full view-model
        #[arg(long)]
        export: Option<String>,
    },
}

#[derive(Clone)]
struct AppState {
    codeforces: Arc<CodeforcesClient>,
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug,engine=debug,cfetch=debug")
    } else {
        EnvFilter::new("info,engine=info,cfetch=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).compact())
        .with(filter)
        .init();
}

/// Handle format accepted by the judge: 3–24 chars of `[A-Za-z0-9_.-]`
fn is_valid_handle(handle: &str) -> bool {
    (3..=24).contains(&handle.len())
        && handle
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    dotenvy::dotenv().ok();

    match cli.command {
        Commands::Serve { host, port } => {
            cmd_serve(&host, port).await?;
        }
        Commands::Run { handle, export } => {
            cmd_run(&handle, export).await?;
        }
    }

    Ok(())
}

// ============================================================================
// Serve command — Axum web server
// ============================================================================

async fn cmd_serve(host: &str, port: u16) -> anyhow::Result<()> {
    info!("cfetch v{} starting...", APP_VERSION);

    let state = AppState {
        codeforces: Arc::new(CodeforcesClient::new()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(api_health))
        .route("/analytics", get(api_analytics))
        .with_state(state);

    let app = Router::new().nest("/api", api_routes).layer(cors);

    let addr: std::net::SocketAddr = format!("{}:{}", host, port).parse()?;
    println!("\n=== cfetch v{} ===", APP_VERSION);
    println!("Codeforces Analytics Server");
    println!("Listening on http://{}", addr);
    println!("\nEndpoints:");
    println!("  GET  /api/health               - Health check");
    println!("  GET  /api/analytics?handle=X   - Full analytics view-model");
    println!("\nPress Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn api_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": APP_VERSION,
    }))
}

#[derive(Deserialize)]
struct AnalyticsQuery {
    handle: Option<String>,
}

#[derive(serde::Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

async fn api_analytics(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsViewModel>, (StatusCode, Json<ErrorBody>)> {
    let handle = query.handle.as_deref().map(str::trim).unwrap_or("");
    if !is_valid_handle(handle) {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Invalid handle format",
        ));
    }

    match load_analytics(&state.codeforces, handle, Utc::now()).await {
        Ok(model) => Ok(Json(model)),
        Err(ApiError::AccountNotFound) => Err(error_response(
            StatusCode::NOT_FOUND,
            ApiError::AccountNotFound.to_string(),
        )),
        Err(err) => {
            error!(handle, error = %err, "Analytics load failed");
            // The fetch-layer message is surfaced verbatim; the dashboard
            // shows it in place of the charts.
            Err(error_response(StatusCode::BAD_GATEWAY, err.to_string()))
        }
    }
}

// ============================================================================
// Run command — CLI mode (no web server)
// ============================================================================

async fn cmd_run(handle: &str, export: Option<String>) -> anyhow::Result<()> {
    println!("\n=== cfetch v{} ===", APP_VERSION);

    if !is_valid_handle(handle) {
        anyhow::bail!("Invalid handle format: {}", handle);
    }

    let client = CodeforcesClient::new();
    let model = load_analytics(&client, handle, Utc::now()).await?;

    print_summary(&model);

    if let Some(path) = export {
        let json = serde_json::to_string_pretty(&model)?;
        std::fs::write(&path, json)?;
        println!("Full view-model exported to {}", path);
    }

    Ok(())
}

fn print_summary(model: &AnalyticsViewModel) {
    let basic = &model.basic;
    println!("\nHandle: {}", basic.handle);
    println!(
        "Rating: {} (max {}){}",
        basic
            .current_rating
            .map(|r| r.to_string())
            .unwrap_or_else(|| "unrated".to_string()),
        basic
            .max_rating
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string()),
        basic
            .rank
            .as_deref()
            .map(|r| format!(" — {}", r))
            .unwrap_or_default(),
    );
    println!(
        "Contests: {} | Solved: {} | Best streak: {} days",
        basic.total_contests, basic.total_solved, model.problem_volume.solve_streak
    );
    println!(
        "Submissions: {} ({} accepted, {:.1}% success, {:.2} attempts/solve)",
        model.submissions.total,
        model.submissions.accepted,
        model.submissions.success_rate,
        model.submissions.avg_attempts_per_solved,
    );
    println!(
        "Upsolves: {} ({:.2} per contest)",
        model.upsolve.total_upsolves, model.upsolve.upsolves_per_contest
    );

    if !model.tags.top_tags.is_empty() {
        let tags: Vec<String> = model
            .tags
            .top_tags
            .iter()
            .take(5)
            .map(|t| format!("{} ({})", t.tag, t.solved))
            .collect();
        println!("Top tags: {}", tags.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_validation() {
        assert!(is_valid_handle("tourist"));
        assert!(is_valid_handle("Um_nik"));
        assert!(is_valid_handle("a.b-c_d"));
        assert!(!is_valid_handle(""));
        assert!(!is_valid_handle("ab"));
        assert!(!is_valid_handle("white space"));
        assert!(!is_valid_handle(&"x".repeat(25)));
    }
}
