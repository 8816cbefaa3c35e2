use crate::coordinator;
use crate::errors::ApiError;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use larder_core::gateway::ModelGateway;
use larder_core::transcript::Turn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Application state shared with all routes
#[derive(Clone)]
pub struct AppState {
    gateway: Arc<dyn ModelGateway>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self { gateway }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct SuggestionsRequest {
    ingredients: Option<Vec<String>>,
}

impl SuggestionsRequest {
    fn validate(self) -> Result<Vec<String>, ApiError> {
        match self.ingredients {
            Some(ingredients) if !ingredients.is_empty() => Ok(ingredients),
            _ => Err(ApiError::InvalidInput("Ingredients are required")),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    meal_name: Option<String>,
    ingredients: Option<Vec<String>>,
    conversation_history: Option<Vec<Turn>>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub recipe: String,
    pub conversation_history: Vec<Turn>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct FollowupRequest {
    question: Option<String>,
    conversation_history: Option<Vec<Turn>>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FollowupResponse {
    pub response: String,
    pub conversation_history: Vec<Turn>,
}

/// Build the router with all API routes and CORS
pub fn build_router(state: AppState) -> Router {
    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health))
        .route("/api/get-suggestions", post(get_suggestions))
        .route("/api/get-recipe", post(get_recipe))
        .route("/api/ask-followup", post(ask_followup))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server
pub async fn run_server(gateway: Arc<dyn ModelGateway>, addr: SocketAddr) -> anyhow::Result<()> {
    info!("Starting HTTP server on {}", addr);

    let app = build_router(AppState::new(gateway));

    axum::Server::try_bind(&addr)
        .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", addr, e))?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server failed: {}", e))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

/// Unwrap a JSON body. A body sent without a JSON content type reads as an empty
/// object, so the route's own required-field message is what the client sees.
fn read_body<T: Default>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(rejection.into()),
    }
}

/// Health check handler
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Server is running".to_string(),
    })
}

async fn get_suggestions(
    State(state): State<AppState>,
    payload: Result<Json<SuggestionsRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = read_body(payload)?;
    let ingredients = request.validate()?;
    info!(ingredients = ingredients.len(), "Suggestions requested");

    let meals = coordinator::suggest_meals(state.gateway.as_ref(), &ingredients).await?;
    Ok(Json(meals))
}

async fn get_recipe(
    State(state): State<AppState>,
    payload: Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let request = read_body(payload)?;
    let (meal_name, ingredients) = match (request.meal_name, request.ingredients) {
        (Some(meal_name), Some(ingredients)) if !meal_name.is_empty() => (meal_name, ingredients),
        _ => return Err(ApiError::InvalidInput("Meal name and ingredients are required")),
    };
    let history = request.conversation_history.unwrap_or_default();
    info!(meal = %meal_name, turns = history.len(), "Recipe requested");

    let exchange =
        coordinator::fetch_recipe(state.gateway.as_ref(), &meal_name, &ingredients, &history)
            .await?;
    Ok(Json(RecipeResponse {
        recipe: exchange.reply,
        conversation_history: exchange.conversation_history,
    }))
}

async fn ask_followup(
    State(state): State<AppState>,
    payload: Result<Json<FollowupRequest>, JsonRejection>,
) -> Result<Json<FollowupResponse>, ApiError> {
    let request = read_body(payload)?;
    let (question, history) = match (request.question, request.conversation_history) {
        (Some(question), Some(history)) if !question.is_empty() && !history.is_empty() => {
            (question, history)
        }
        _ => {
            return Err(ApiError::InvalidInput(
                "Question and conversation history are required",
            ))
        }
    };
    info!(turns = history.len(), "Follow-up question received");

    let exchange = coordinator::answer_followup(state.gateway.as_ref(), &question, &history).await?;
    Ok(Json(FollowupResponse {
        response: exchange.reply,
        conversation_history: exchange.conversation_history,
    }))
}
