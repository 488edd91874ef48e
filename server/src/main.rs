mod api;
mod db;
mod models;
mod schema;
mod store;

use anyhow::Context;
use axum::extract::MatchedPath;
use axum::http::Request;
use axum::Router;
use std::env;
use std::sync::Arc;
use stovetop_core::ai::{AiClient, OpenAiClient};
use stovetop_core::RecipeGenerator;
use tower_http::trace::TraceLayer;
use tracing::Span;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across all handlers
pub type AppState = Arc<RecipeGenerator>;

/// Default listen address when STOVETOP_BIND_ADDR is unset.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Console logging, filtered by RUST_LOG.
fn init_telemetry() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn app(state: AppState) -> Router {
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    Router::new()
        .nest("/api/recipes", api::recipes::router())
        .merge(swagger_ui)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %matched_path,
                    )
                })
                .on_request(|_request: &Request<_>, _span: &Span| {})
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &Span| {
                        let status = response.status().as_u16();
                        if status >= 500 {
                            tracing::error!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request completed"
                            );
                        }
                    },
                )
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &Span| {
                        tracing::error!(
                            error = %error,
                            latency_ms = %latency.as_millis(),
                            "request failed"
                        );
                    },
                ),
        )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi()
            .to_pretty_json()
            .context("could not render the OpenAPI document")?;
        println!("{}", spec);
        return Ok(());
    }

    init_telemetry();

    let ai_client =
        OpenAiClient::from_env().context("generation service is not configured")?;
    tracing::info!(model = ai_client.model_name(), "Generation service configured");

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool_size = db::pool_size_from_env();
    let pool = db::connect(&database_url, pool_size)?;
    tracing::info!(pool_size, "Recipe database ready");

    let generator = RecipeGenerator::new(
        Arc::new(ai_client),
        Arc::new(store::PgRecipeStore::new(pool)),
    );

    let bind_addr =
        env::var("STOVETOP_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("could not listen on {}", bind_addr))?;

    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Server listening on {}", addr);
    }
    tracing::info!("Swagger UI available at /swagger-ui/");

    axum::serve(listener, app(Arc::new(generator)))
        .await
        .context("server stopped unexpectedly")
}
