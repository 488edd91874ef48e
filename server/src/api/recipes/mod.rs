pub mod generate;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(generate::generate_recipe))
}

#[derive(OpenApi)]
#[openapi(
    paths(generate::generate_recipe),
    components(schemas(
        stovetop_core::GenerationRequest,
        stovetop_core::GenerateRecipeResponse,
        stovetop_core::StoredRecipe,
        stovetop_core::PersistedRecipe,
    ))
)]
pub struct ApiDoc;
