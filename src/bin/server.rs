use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use cut_planner::{Cut, Error, FreeRect, Item, Panel, Params, Placement, SearchConfig, solve_named};
use serde::{Deserialize, Serialize};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Deserialize, Serialize)]
struct PlanRequest {
    #[serde(default = "default_method")]
    method: String,
    #[serde(default)]
    cut_width: f64,
    #[serde(default)]
    min_initial_usage: bool,
    panels: Vec<Panel>,
    items: Vec<Item>,
}

fn default_method() -> String {
    "forward-greedy".to_string()
}

#[derive(Serialize)]
struct PlanResponse {
    used: Vec<Placement>,
    unused: Vec<FreeRect>,
    cuts: Vec<Cut>,
    panels_used: usize,
    waste_percent: f64,
}

async fn plan(Json(req): Json<PlanRequest>) -> Result<Json<PlanResponse>, (StatusCode, String)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /plan"
    );

    let params = Params {
        cut_width: req.cut_width,
        min_initial_usage: req.min_initial_usage,
        panels: req.panels,
        items: req.items,
    };

    let layout = solve_named(&req.method, params, &SearchConfig::default()).map_err(|e| match e {
        Error::Unsolvable => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
        Error::UnsupportedMethod(_) | Error::InvalidParams(_) => {
            (StatusCode::BAD_REQUEST, e.to_string())
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    })?;

    Ok(Json(PlanResponse {
        used: layout.placements.clone(),
        unused: layout.free.clone(),
        cuts: layout.cuts.clone(),
        panels_used: layout.panels_used(),
        waste_percent: layout.waste_percent(),
    }))
}

#[tokio::main]
async fn main() {
    let _sentry = std::env::var("SENTRY_DSN").ok().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let app = Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/plan", post(plan))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    eprintln!("Listening on {addr}");
    axum::serve(listener, app).await.unwrap();
}
