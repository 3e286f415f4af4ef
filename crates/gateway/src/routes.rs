use std::sync::Arc;

use {
    axum::{
        Json, Router,
        extract::{Query, State},
        http::header,
        response::{IntoResponse, Response},
        routing::{get, post},
    },
    coastal_memory::EmbedOutcome,
    tower_http::trace::TraceLayer,
    tracing::{error, info},
};

use crate::{
    error::ApiError,
    services::ServiceError,
    state::GatewayState,
    types::{
        AnswerResponse, AskEmbeddedParams, AskEmbeddedResponse, AskModelParams, EmbedParams,
        MessageResponse, QueryBody, RawGenerateParams, SourceFragment,
    },
};

pub fn build_router(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/embedToModel", post(embed_to_model))
        .route("/askEmbeddedModel", post(ask_embedded_model))
        .route("/askModel", post(ask_model))
        .route("/AskModel", get(ask_model_raw))
        .route("/query", post(query_corpus))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home() -> Json<MessageResponse> {
    Json(MessageResponse::new("API is running"))
}

async fn embed_to_model(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<EmbedParams>,
) -> Result<Json<MessageResponse>, ApiError> {
    let path = &params.file_path;
    match state.rag.embed(path, params.force).await {
        Ok(EmbedOutcome::AlreadyEmbedded) => Ok(Json(MessageResponse::new(format!(
            "Data for '{path}' is already embedded."
        )))),
        Ok(EmbedOutcome::Embedded {
            fragments,
            replaced,
        }) => {
            info!(path = %path, fragments, replaced, force = params.force, "embed request done");
            Ok(Json(MessageResponse::new(format!(
                "Data from '{path}' has been successfully embedded."
            ))))
        },
        Err(e) if e.is_not_found() => Err(ApiError::NotFound(e.to_string())),
        Err(e) => {
            error!(path = %path, error = %e, "error while embedding");
            Err(ApiError::Internal(format!("Embedding failed: {e}")))
        },
    }
}

async fn ask_embedded_model(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<AskEmbeddedParams>,
) -> Result<Json<AskEmbeddedResponse>, ApiError> {
    let path = params.file_path.as_str();
    let result = state
        .rag
        .ask(&params.query, Some(path))
        .await
        .map_err(|e| query_error(e, "Model query failed"))?;

    let sources = result
        .sources
        .into_iter()
        .filter(|s| s.source == path)
        .map(|s| SourceFragment {
            source: s.source,
            page_content: s.text,
        })
        .collect();

    Ok(Json(AskEmbeddedResponse {
        answer: result.answer,
        sources,
    }))
}

/// Whole-corpus variant of `askEmbeddedModel` taking a JSON body.
async fn query_corpus(
    State(state): State<Arc<GatewayState>>,
    Json(body): Json<QueryBody>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let result = state
        .rag
        .ask(&body.question, None)
        .await
        .map_err(|e| query_error(e, "Query failed"))?;
    Ok(Json(AnswerResponse {
        answer: result.answer,
    }))
}

fn query_error(e: ServiceError, context: &str) -> ApiError {
    if e.is_not_found() {
        return ApiError::NotFound(e.to_string());
    }
    error!(error = %e, "error while querying model");
    ApiError::Internal(format!("{context}: {e}"))
}

async fn ask_model(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<AskModelParams>,
) -> Result<Json<String>, ApiError> {
    let answer = state.rag.ask_model(&params.query).await.map_err(|e| {
        error!(error = %e, "error invoking llm");
        ApiError::Internal(format!("Error invoking LLM: {e}"))
    })?;
    if answer.is_empty() {
        return Err(ApiError::Internal("No response from the LLM".into()));
    }
    Ok(Json(answer))
}

/// Proxy to the model server's generate endpoint, returning its JSON verbatim.
async fn ask_model_raw(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<RawGenerateParams>,
) -> Result<Response, ApiError> {
    let body = state.rag.generate_raw(&params.prompt).await.map_err(|e| {
        error!(error = %e, "model server request failed");
        ApiError::BadGateway(format!("Model server request failed: {e}"))
    })?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
