//! Analyze Routes - Single entry point dispatching on `action`
//!
//! Form-encoded submissions get an HTML result page, JSON bodies get JSON.

use axum::{
    async_trait,
    extract::{FromRequest, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::post,
    Form, Json, Router,
};

use textlens::{Action, AnalysisRequest, DomainError};

use crate::application::ActionOutput;
use crate::error::{status_for, ApiError};
use crate::extract::ApiJson;
use crate::models::{ActionResponse, AnalyzeForm, ErrorResponse};
use crate::views;
use crate::AppState;

/// Request body in whichever encoding the client sent
pub enum AnalyzeInput {
    Form(AnalyzeForm),
    Json(AnalyzeForm),
}

#[async_trait]
impl<S> FromRequest<S> for AnalyzeInput
where
    S: Send + Sync,
{
    /// HTML page for form submissions, JSON envelope otherwise
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(false);

        if is_form {
            match Form::<AnalyzeForm>::from_request(req, state).await {
                Ok(Form(form)) => Ok(Self::Form(form)),
                Err(e) => {
                    tracing::warn!("Rejected form submission: {}", e.body_text());
                    let err = DomainError::Validation(e.body_text());
                    Err(form_page(status_for(&err), "", None, &Err(err)))
                }
            }
        } else {
            let ApiJson(form) = ApiJson::<AnalyzeForm>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self::Json(form))
        }
    }
}

fn form_page(
    status: StatusCode,
    text: &str,
    action: Option<Action>,
    outcome: &Result<ActionOutput, DomainError>,
) -> Response {
    (status, Html(views::result_page(text, action, outcome))).into_response()
}

/// Validate the submission and run the selected action
async fn dispatch(
    state: &AppState,
    form: &AnalyzeForm,
) -> (Option<Action>, Result<ActionOutput, DomainError>) {
    let text = form.text.clone().unwrap_or_default();
    let request = match AnalysisRequest::parse(text, form.action.as_deref()) {
        Ok(request) => request,
        Err(e) => return (None, Err(e)),
    };

    tracing::info!("Handling action '{}' ({} chars)", request.action, request.text.len());

    let result = state.analysis.handle(&request).await;
    (Some(request.action), result)
}

/// Analyze text with the selected action
#[utoipa::path(
    post,
    path = "/analyze",
    request_body(content = AnalyzeForm, description = "JSON or form-encoded text and action"),
    responses(
        (status = 200, description = "Action result (JSON or HTML)", body = ActionResponse),
        (status = 400, description = "Empty text or unknown action", body = ErrorResponse),
        (status = 502, description = "Model request failed or output could not be interpreted", body = ErrorResponse),
        (status = 503, description = "No document store configured", body = ErrorResponse)
    ),
    tag = "Analysis"
)]
pub async fn analyze(State(state): State<AppState>, input: AnalyzeInput) -> Response {
    match input {
        AnalyzeInput::Json(form) => match dispatch(&state, &form).await {
            (action, Ok(result)) => Json(ActionResponse {
                action: action.unwrap_or_default(),
                result,
            })
            .into_response(),
            (_, Err(e)) => ApiError(e).into_response(),
        },
        AnalyzeInput::Form(form) => {
            let (action, outcome) = dispatch(&state, &form).await;
            let status = match &outcome {
                Ok(_) => StatusCode::OK,
                Err(e) => {
                    tracing::warn!("Form request failed: {}", e);
                    status_for(e)
                }
            };
            form_page(status, form.text.as_deref().unwrap_or(""), action, &outcome)
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/analyze", post(analyze))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Method, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::application::testing::{ScriptedCompletion, ScriptedEmbedding};
    use crate::{build_router, AppState};

    const POSITIVE: &str = r#"{"sentiment": "positive", "score": 0.7, "confidence": 0.9}"#;

    fn app(
        completion: Arc<ScriptedCompletion>,
        embedding: Arc<ScriptedEmbedding>,
        server_api_key: Option<&str>,
    ) -> axum::Router {
        build_router(AppState::for_test(
            completion,
            embedding,
            None,
            server_api_key.map(str::to_string),
        ))
    }

    fn json_request(uri: &str, body: Value) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_json_analyze() {
        let completion = ScriptedCompletion::replying(POSITIVE);
        let app = app(completion.clone(), ScriptedEmbedding::new(&[]), None);

        let response = app
            .oneshot(json_request(
                "/analyze",
                json!({"text": "Sunny and warm", "action": "analyze"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["action"], "analyze");
        assert_eq!(body["result"]["sentiment"], "positive");
        assert_eq!(completion.call_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_action_defaults_to_analyze() {
        let completion = ScriptedCompletion::replying(POSITIVE);
        let app = app(completion.clone(), ScriptedEmbedding::new(&[]), None);

        let response = app
            .oneshot(json_request("/analyze", json!({"text": "Sunny and warm"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["action"], "analyze");
    }

    #[tokio::test]
    async fn test_unknown_action_is_explicit_error() {
        let completion = ScriptedCompletion::replying(POSITIVE);
        let embedding = ScriptedEmbedding::new(&[]);
        let app = app(completion.clone(), embedding.clone(), None);

        let response = app
            .oneshot(json_request(
                "/analyze",
                json!({"text": "hello", "action": "translate"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["code"], "unknown_action");
        assert_eq!(completion.call_count(), 0);
        assert_eq!(embedding.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_text_rejected_before_outbound_call() {
        for action in ["analyze", "summarize", "search"] {
            let completion = ScriptedCompletion::replying(POSITIVE);
            let embedding = ScriptedEmbedding::new(&[]);
            let app = app(completion.clone(), embedding.clone(), None);

            let response = app
                .oneshot(json_request("/analyze", json!({"text": "  ", "action": action})))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "action {}", action);
            assert_eq!(body_json(response).await["code"], "invalid_request");
            assert_eq!(completion.call_count(), 0);
            assert_eq!(embedding.call_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_interpretation_failure_response() {
        let completion = ScriptedCompletion::replying("Mostly positive, I would say.");
        let app = app(completion, ScriptedEmbedding::new(&[]), None);

        let response = app
            .oneshot(json_request("/analyze", json!({"text": "hello"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_json(response).await["code"], "interpretation_failed");
    }

    #[tokio::test]
    async fn test_transport_failure_response() {
        let completion = ScriptedCompletion::failing("503 from upstream");
        let app = app(completion, ScriptedEmbedding::new(&[]), None);

        let response = app
            .oneshot(json_request("/analyze", json!({"text": "hello"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_json(response).await["code"], "request_failed");
    }

    #[tokio::test]
    async fn test_search_action_returns_vector() {
        let embedding = ScriptedEmbedding::new(&[]);
        let app = app(ScriptedCompletion::replying(""), embedding.clone(), None);

        let response = app
            .oneshot(json_request(
                "/analyze",
                json!({"text": "similar things", "action": "search"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["result"]["dimensions"], 3);
        assert_eq!(body["result"]["embedding"].as_array().unwrap().len(), 3);
        assert_eq!(embedding.call_count(), 1);
    }

    #[tokio::test]
    async fn test_vectorize_without_store() {
        let app = app(
            ScriptedCompletion::replying(""),
            ScriptedEmbedding::new(&[]),
            None,
        );

        let response = app
            .oneshot(json_request(
                "/analyze",
                json!({"action": "vectorize_collection"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(response).await["code"], "store_unavailable");
    }

    #[tokio::test]
    async fn test_form_submission_renders_html() {
        let app = app(
            ScriptedCompletion::replying(POSITIVE),
            ScriptedEmbedding::new(&[]),
            None,
        );

        let request = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/analyze")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("text=Great+service&action=analyze"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Great service"));
        assert!(html.contains("Sentiment: positive"));
    }

    #[tokio::test]
    async fn test_form_error_renders_html_with_status() {
        let app = app(
            ScriptedCompletion::replying("not json"),
            ScriptedEmbedding::new(&[]),
            None,
        );

        let request = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/analyze")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("text=hello"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert!(body_text(response)
            .await
            .contains("Unable to parse response from the language model."));
    }

    #[tokio::test]
    async fn test_api_routes() {
        let completion = ScriptedCompletion::replying("```\nIn short: fine.\n```");
        let app = app(completion, ScriptedEmbedding::new(&[]), None);

        let response = app
            .clone()
            .oneshot(json_request("/api/summarize", json!({"text": "long text"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["result"]["summary"], "In short: fine.");

        let response = app
            .oneshot(json_request("/api/search", json!({"text": ""})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_auth_when_key_configured() {
        let app = app(
            ScriptedCompletion::replying(POSITIVE),
            ScriptedEmbedding::new(&[]),
            Some("secret"),
        );

        let response = app
            .clone()
            .oneshot(json_request("/analyze", json!({"text": "hello"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let mut request = json_request("/analyze", json!({"text": "hello"}));
        request
            .headers_mut()
            .insert(header::AUTHORIZATION, "Bearer wrong".parse().unwrap());
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let mut request = json_request("/analyze", json!({"text": "hello"}));
        request
            .headers_mut()
            .insert(header::AUTHORIZATION, "Bearer secret".parse().unwrap());
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let health = axum::http::Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(health).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_index_form() {
        let app = app(
            ScriptedCompletion::replying(""),
            ScriptedEmbedding::new(&[]),
            None,
        );

        let request = axum::http::Request::builder()
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains(r#"<form method="post" action="/analyze">"#));
    }

    #[tokio::test]
    async fn test_api_body_rejection_uses_error_envelope() {
        let embedding = ScriptedEmbedding::new(&[]);
        let app = app(ScriptedCompletion::replying(""), embedding.clone(), None);

        let response = app
            .clone()
            .oneshot(json_request("/api/search", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["code"], "invalid_request");

        let request = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/api/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "invalid_request");
        assert_eq!(embedding.call_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_json_on_analyze() {
        let app = app(
            ScriptedCompletion::replying(POSITIVE),
            ScriptedEmbedding::new(&[]),
            None,
        );

        let request = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text": 5}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "invalid_request");
    }

    #[tokio::test]
    async fn test_malformed_form_renders_html() {
        let completion = ScriptedCompletion::replying(POSITIVE);
        let app = app(completion.clone(), ScriptedEmbedding::new(&[]), None);

        let request = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/analyze")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("text=a&text=b"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));
        assert!(body_text(response).await.contains("<!DOCTYPE html>"));
        assert_eq!(completion.call_count(), 0);
    }
}
