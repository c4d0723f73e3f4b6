//! HTTP API server implementation

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::{OpenApi, ToSchema};

use crate::chat::{ChatError, ChatMessage, ChatSession, Exchange, Notice, NoticeLevel};
use crate::core::catalog::{Language, LanguageCatalog};
use crate::core::config::TranslatorConfig;
use crate::core::models::{TranslationRequest, TranslationResult, AUTO_DETECT};
use crate::core::resolver::TranslationResolver;

/// Application state
pub struct AppState {
    resolver: Arc<TranslationResolver>,
    catalog: Arc<LanguageCatalog>,
    session: ChatSession,
}

impl AppState {
    pub fn new(resolver: Arc<TranslationResolver>, catalog: Arc<LanguageCatalog>) -> Self {
        let session = ChatSession::new(resolver.clone(), catalog.clone());
        Self {
            resolver,
            catalog,
            session,
        }
    }

    pub fn from_config(config: &TranslatorConfig) -> anyhow::Result<Self> {
        let resolver = Arc::new(TranslationResolver::from_config(config)?);
        Ok(Self::new(resolver, Arc::new(LanguageCatalog::builtin())))
    }
}

/// Health check response
#[derive(Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

/// Language list response
#[derive(Serialize, ToSchema)]
struct LanguagesResponse {
    object: String,
    data: Vec<Language>,
}

/// One-shot translation request
#[derive(Deserialize, ToSchema)]
pub struct TranslateBody {
    pub text: String,
    /// Language code ("fr") or display name ("French")
    pub target_lang: String,
    /// Defaults to auto-detection
    pub source_lang: Option<String>,
}

/// Chat submission
#[derive(Deserialize, ToSchema)]
pub struct SubmitBody {
    pub text: String,
}

/// Language selection
#[derive(Deserialize, ToSchema)]
pub struct LanguageBody {
    pub code: String,
}

/// Current chat state
#[derive(Serialize, ToSchema)]
pub struct ChatStateResponse {
    pub selected_language: String,
    pub translating: bool,
    pub messages: Vec<ChatMessage>,
}

/// Error response
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
}

type ApiError = (StatusCode, axum::Json<ErrorResponse>);

fn invalid_request(message: impl Into<String>, code: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        axum::Json(ErrorResponse {
            error: ErrorDetail {
                message: message.into(),
                code: Some(code.to_string()),
                r#type: Some("invalid_request_error".to_string()),
            },
        }),
    )
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::EmptyInput => invalid_request(err.to_string(), "empty_input"),
            ChatError::UnknownLanguage(_) => invalid_request(err.to_string(), "unknown_language"),
            ChatError::Busy => (
                StatusCode::CONFLICT,
                axum::Json(ErrorResponse {
                    error: ErrorDetail {
                        message: err.to_string(),
                        code: Some("busy".to_string()),
                        r#type: Some("conflict_error".to_string()),
                    },
                }),
            ),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        list_languages,
        translate,
        chat_state,
        submit_message,
        select_language
    ),
    components(schemas(
        HealthResponse,
        LanguagesResponse,
        Language,
        TranslateBody,
        TranslationResult,
        SubmitBody,
        LanguageBody,
        ChatStateResponse,
        ChatMessage,
        Exchange,
        Notice,
        NoticeLevel,
        ErrorResponse,
        ErrorDetail
    )),
    tags((name = "pollyglot", description = "Chat translator API"))
)]
struct ApiDoc;

/// Health check handler
#[utoipa::path(get, path = "/", responses((status = 200, description = "Service is up", body = HealthResponse)))]
async fn health_check() -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "ok".to_string(),
        service: crate::NAME.to_string(),
        version: crate::VERSION.to_string(),
    })
}

/// Language catalog handler
#[utoipa::path(get, path = "/v1/languages", responses((status = 200, description = "Known languages", body = LanguagesResponse)))]
async fn list_languages(State(state): State<Arc<AppState>>) -> axum::Json<LanguagesResponse> {
    axum::Json(LanguagesResponse {
        object: "list".to_string(),
        data: state.catalog.all().to_vec(),
    })
}

/// One-shot translation handler. Always answers with a translation once the
/// input is valid; provider failures only change who answers.
#[utoipa::path(
    post,
    path = "/translate",
    request_body = TranslateBody,
    responses(
        (status = 200, description = "Translation result", body = TranslationResult),
        (status = 400, description = "Blank text", body = ErrorResponse)
    )
)]
async fn translate(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TranslateBody>,
) -> Result<axum::Json<TranslationResult>, ApiError> {
    if payload.text.trim().is_empty() {
        return Err(invalid_request("text cannot be empty", "empty_input"));
    }

    let target_lang = state.catalog.resolve_name(&payload.target_lang);
    let source_lang = match payload.source_lang.as_deref() {
        None | Some(AUTO_DETECT) => AUTO_DETECT.to_string(),
        Some(lang) => state.catalog.resolve_name(lang),
    };

    let request = TranslationRequest::new(payload.text, target_lang).with_source_lang(source_lang);
    Ok(axum::Json(state.resolver.resolve(&request).await))
}

/// Chat history handler
#[utoipa::path(get, path = "/chat", responses((status = 200, description = "Chat history", body = ChatStateResponse)))]
async fn chat_state(State(state): State<Arc<AppState>>) -> axum::Json<ChatStateResponse> {
    axum::Json(ChatStateResponse {
        selected_language: state.session.selected_language().await,
        translating: state.session.is_translating(),
        messages: state.session.messages().await,
    })
}

/// Chat submission handler
#[utoipa::path(
    post,
    path = "/chat/messages",
    request_body = SubmitBody,
    responses(
        (status = 200, description = "Message translated", body = Exchange),
        (status = 400, description = "Blank text", body = ErrorResponse),
        (status = 409, description = "Another translation in progress", body = ErrorResponse)
    )
)]
async fn submit_message(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SubmitBody>,
) -> Result<axum::Json<Exchange>, ApiError> {
    match state.session.submit(&payload.text).await {
        Ok(exchange) => {
            if let Some(notice) = &exchange.notice {
                info!("{}: {}", notice.title, notice.description);
            }
            Ok(axum::Json(exchange))
        }
        Err(e) => {
            warn!("Chat submission rejected: {}", e);
            Err(e.into())
        }
    }
}

/// Language selection handler
#[utoipa::path(
    put,
    path = "/chat/language",
    request_body = LanguageBody,
    responses(
        (status = 200, description = "Language selected", body = ChatStateResponse),
        (status = 400, description = "Unknown language code", body = ErrorResponse)
    )
)]
async fn select_language(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LanguageBody>,
) -> Result<axum::Json<ChatStateResponse>, ApiError> {
    state.session.select_language(&payload.code).await?;
    Ok(chat_state(State(state)).await)
}

async fn openapi_json() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}

/// Create the router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/v1/languages", get(list_languages))
        .route("/translate", post(translate))
        .route("/chat", get(chat_state))
        .route("/chat/messages", post(submit_message))
        .route("/chat/language", put(select_language))
        .route("/api-docs/openapi.json", get(openapi_json))
        .with_state(state)
}

/// Run the HTTP server
pub async fn run_server(host: String, port: u16, config: TranslatorConfig) -> anyhow::Result<()> {
    // Create app state
    let state = Arc::new(AppState::from_config(&config)?);

    // Create router
    let app = build_router(state);

    // Bind address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Starting server on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
