//! Chat completions endpoint
//!
//! OpenAI-compatible chat completions API endpoint.
//! Handles both streaming and non-streaming responses.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures::{Stream, StreamExt};
use tracing::{info, warn};

use crate::{
    conversation::ConversationContext,
    error::AppError,
    proxy::{new_session_id, UpstreamRequest},
    response::ResponseAssembler,
    routes::metrics::{record_request, record_upstream_error},
    streaming::{answer_events, collect_answer, format_error_event, AnswerEvent, StreamError},
    types::ChatCompletionRequest,
    AppState,
};

/// Handle chat completion requests
///
/// Resolves the model, derives the upstream question and prior exchange
/// from the history, opens one upstream call and translates its answer.
pub async fn chat_completions(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, AppError> {
    let start_time = Instant::now();

    let request: ChatCompletionRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;

    // Unknown models never reach the upstream
    let upstream_model = state.models.resolve(&request.model).map_err(|e| {
        warn!(model = %request.model, "Rejected unsupported model");
        record_request("rejected", &request.model, start_time.elapsed().as_secs_f64());
        e
    })?;

    let context = ConversationContext::extract(&request.messages);
    let session_id = new_session_id();
    let upstream_request = UpstreamRequest::build(
        &context,
        &session_id,
        upstream_model,
        &state.config.upstream_language,
    );

    info!(
        model = %request.model,
        upstream_model = %upstream_model,
        session_id = %session_id,
        stream = request.stream,
        messages = request.messages.len(),
        has_previous = context.has_previous(),
        "Processing chat completion request"
    );

    let upstream_body = state
        .upstream
        .open_chat(&upstream_request)
        .await
        .map_err(|e| {
            warn!(session_id = %session_id, error = %e, upstream = state.upstream.name(), "Upstream call failed");
            record_upstream_error(e.kind());
            record_request("upstream_error", &request.model, start_time.elapsed().as_secs_f64());
            e
        })?;

    let events = answer_events(upstream_body, state.config.read_timeout());
    let assembler = ResponseAssembler::new(session_id, request.model.clone());

    if request.stream {
        handle_streaming_chat(events, assembler, request.model, start_time)
    } else {
        handle_non_streaming_chat(events, assembler, request.model, start_time).await
    }
}

/// Handle non-streaming chat completion
async fn handle_non_streaming_chat<S>(
    events: S,
    assembler: ResponseAssembler,
    model: String,
    start_time: Instant,
) -> Result<Response, AppError>
where
    S: Stream<Item = Result<AnswerEvent, StreamError>>,
{
    let answer = match collect_answer(events).await {
        Ok(answer) => answer,
        Err(e) => {
            warn!(session_id = %assembler.id(), error = %e, "Upstream answer failed");
            record_upstream_error(e.code());
            record_request(e.code(), &model, start_time.elapsed().as_secs_f64());
            return Err(e.into());
        }
    };

    let duration = start_time.elapsed().as_secs_f64();
    record_request("success", &model, duration);

    info!(
        model = %model,
        session_id = %assembler.id(),
        answer_len = answer.len(),
        duration_ms = %format!("{:.2}", duration * 1000.0),
        "Chat completion request completed"
    );

    Ok((StatusCode::OK, Json(assembler.completion(answer))).into_response())
}

/// Handle streaming chat completion
///
/// Each answer event becomes one SSE event as soon as it is read. A failure
/// after headers are committed is reported as an SSE error event and the
/// stream closes without a finish marker.
fn handle_streaming_chat<S>(
    events: S,
    assembler: ResponseAssembler,
    model: String,
    start_time: Instant,
) -> Result<Response, AppError>
where
    S: Stream<Item = Result<AnswerEvent, StreamError>> + Send + 'static,
{
    let sse_stream = async_stream::stream! {
        futures::pin_mut!(events);
        let mut status = "truncated";

        while let Some(event) = events.next().await {
            match event {
                Ok(event) => {
                    if event == AnswerEvent::Finish {
                        status = "success";
                    }
                    yield Ok::<Bytes, Infallible>(assembler.sse_chunk(event));
                }
                Err(e) => {
                    record_upstream_error(e.code());
                    status = e.code();
                    yield Ok(format_error_event(&e.to_string(), e.code()));
                }
            }
        }

        let duration = start_time.elapsed().as_secs_f64();
        record_request(status, &model, duration);
        info!(
            model = %model,
            session_id = %assembler.id(),
            status = status,
            duration_ms = %format!("{:.2}", duration * 1000.0),
            "Streaming chat completion finished"
        );
    };

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .header(header::CONNECTION, "keep-alive")
        .header("X-Accel-Buffering", "no")
        .body(Body::from_stream(sse_stream))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build response: {}", e)))?;

    Ok(response)
}
