use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use stovetop_core::{
    GenerateRecipeResponse, GenerationOutcome, GenerationRequest, GENERIC_FAILURE_MESSAGE,
};

/// Generate a recipe from a few ingredients
///
/// Asks the generation service for a one-pan camping recipe built around the
/// given ingredients, validates it and saves it.
#[utoipa::path(
    post,
    path = "/api/recipes/generate",
    tag = "recipes",
    request_body = GenerationRequest,
    responses(
        (status = 201, description = "Recipe generated and saved", body = GenerateRecipeResponse),
        (status = 400, description = "Ingredients were invalid or non-existing, or the body was not valid JSON", body = GenerateRecipeResponse),
        (status = 415, description = "Body was not sent as application/json", body = GenerateRecipeResponse),
        (status = 422, description = "Body was JSON but not a generation request", body = GenerateRecipeResponse),
        (status = 500, description = "The recipe could not be generated", body = GenerateRecipeResponse)
    )
)]
pub async fn generate_recipe(
    State(generator): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(
                status = rejection.status().as_u16(),
                error = %rejection.body_text(),
                "Rejected generation request body"
            );
            let outcome = GenerationOutcome::Failed(GENERIC_FAILURE_MESSAGE.to_string());
            return (rejection.status(), Json(outcome.into_response()));
        }
    };

    let outcome = generator.generate(&request).await;
    let status = status_for(&outcome);
    (status, Json(outcome.into_response()))
}

fn status_for(outcome: &GenerationOutcome) -> StatusCode {
    match outcome {
        GenerationOutcome::Created(_) => StatusCode::CREATED,
        GenerationOutcome::Rejected(_) => StatusCode::BAD_REQUEST,
        GenerationOutcome::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
