use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::models::GenerationRequest;
use crate::services::prompt;
use crate::services::providers::CompletionParams;
use crate::startup::AppState;
use service_core::error::AppError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateArticleResponse {
    pub article_content: String,
}

/// POST /api/generate — build the prompt, call the upstream provider,
/// return the generated article text.
#[tracing::instrument(skip(state, body))]
pub async fn generate_article(
    State(state): State<AppState>,
    body: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GenerateArticleResponse>), AppError> {
    // Body parsing failures fall inside the generic failure boundary, the
    // same as provider failures.
    let Json(request) = body.map_err(|e| AppError::InternalError(anyhow::anyhow!(e)))?;

    let messages = prompt::build_messages(state.config.prompt_style, &request);

    let params = CompletionParams {
        max_tokens: state.config.generation.max_tokens,
        temperature: state.config.generation.temperature,
        top_p: state.config.generation.top_p,
    };

    let completion = state.provider.complete(&messages, &params).await?;

    tracing::info!(
        content_len = completion.content.len(),
        "Article generated"
    );

    Ok((
        StatusCode::OK,
        Json(GenerateArticleResponse {
            article_content: completion.content,
        }),
    ))
}

/// OPTIONS /api/generate — CORS preflight, 200 with an empty body.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Any other method on /api/generate.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
