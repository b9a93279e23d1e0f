//! The webhook router: a single tool-dispatch endpoint plus a health probe.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use crate::error::ServerError;
use crate::state::AppState;

/// The request envelope: which tool to run and its argument object.
#[derive(Debug, Deserialize)]
struct ToolRequest {
    tool_name: Option<String>,
    #[serde(default = "empty_object")]
    arguments: Value,
}

fn empty_object() -> Value {
    json!({})
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/webhook/tools", post(handle_tool_webhook))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Route a `{tool_name, arguments}` envelope into the registry unchanged.
async fn handle_tool_webhook(
    State(state): State<AppState>,
    Json(request): Json<ToolRequest>,
) -> Result<Json<Value>, ServerError> {
    let Some(tool_name) = request.tool_name else {
        return Err(ServerError::bad_request("no tool_name provided"));
    };
    let result = state.registry.dispatch(&tool_name, request.arguments).await?;
    Ok(Json(result))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    let corpus = state.corpus.get().await;
    Json(json!({
        "status": "ok",
        "diseases": corpus.disease_count(),
        "symptoms": corpus.symptom_count(),
    }))
}
