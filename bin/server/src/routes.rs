//! HTTP routes.
//!
//! Tool routes take urlencoded forms and answer with HTML fragments for
//! htmx to swap into the page. A form that fails to decode is answered
//! with an error fragment too.

use crate::error::{RouteError, Tool};
use crate::fragments;
use crate::pages;
use crate::state::AppState;
use axum::Router;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::response::Html;
use axum::routing::{get, post};
use langbuddy_core::SessionKey;
use serde::Deserialize;
use std::path::Path;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Builds the application router.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/translate", post(translate))
        .route("/grammar", post(grammar))
        .route("/pronounce", post(pronounce))
        .route("/conversation", post(conversation))
        .route("/roleplay", post(roleplay))
        .route("/chat", post(chat))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct TranslateForm {
    text: String,
    src_lang: String,
    tgt_lang: String,
}

#[derive(Debug, Deserialize)]
struct GrammarForm {
    text: String,
    language: String,
}

#[derive(Debug, Deserialize)]
struct PronounceForm {
    text: String,
    language: String,
}

#[derive(Debug, Deserialize)]
struct ConversationForm {
    prompt: String,
    language: String,
    #[serde(default)]
    session_id: SessionKey,
    #[serde(default)]
    user_response: String,
}

#[derive(Debug, Deserialize)]
struct RoleplayForm {
    prompt: String,
    language: String,
}

#[derive(Debug, Deserialize)]
struct ChatForm {
    message: String,
    #[serde(default)]
    session_id: SessionKey,
}

fn decode<T>(tool: Tool, form: Result<Form<T>, FormRejection>) -> Result<T, RouteError> {
    form.map(|Form(form)| form)
        .map_err(|rejection| RouteError::invalid_form(tool, &rejection))
}

async fn index() -> Html<String> {
    Html(pages::index())
}

async fn translate(
    State(state): State<AppState>,
    form: Result<Form<TranslateForm>, FormRejection>,
) -> Result<Html<String>, RouteError> {
    let form = decode(Tool::Translation, form)?;
    let services = state.services(Tool::Translation)?;
    let translation = services
        .translator
        .translate(&form.text, &form.src_lang, &form.tgt_lang)
        .await
        .map_err(|report| RouteError::task(Tool::Translation, report))?;

    Ok(Html(fragments::translation(
        &form.text,
        &form.src_lang,
        &form.tgt_lang,
        &translation,
    )))
}

async fn grammar(
    State(state): State<AppState>,
    form: Result<Form<GrammarForm>, FormRejection>,
) -> Result<Html<String>, RouteError> {
    let form = decode(Tool::Grammar, form)?;
    let services = state.services(Tool::Grammar)?;
    let corrected = services
        .grammar
        .correct(&form.text, &form.language)
        .await
        .map_err(|report| RouteError::task(Tool::Grammar, report))?;

    Ok(Html(fragments::grammar(&form.text, &corrected)))
}

async fn pronounce(
    State(state): State<AppState>,
    form: Result<Form<PronounceForm>, FormRejection>,
) -> Result<Html<String>, RouteError> {
    let form = decode(Tool::Pronunciation, form)?;
    let services = state.services(Tool::Pronunciation)?;
    let clip = services
        .speech
        .synthesize(&form.text, &form.language)
        .await
        .map_err(RouteError::speech)?;

    Ok(Html(fragments::pronunciation(
        &form.text,
        &form.language,
        &clip.public_path,
    )))
}

async fn conversation(
    State(state): State<AppState>,
    form: Result<Form<ConversationForm>, FormRejection>,
) -> Result<Html<String>, RouteError> {
    let form = decode(Tool::Conversation, form)?;
    let services = state.services(Tool::Conversation)?;
    let reply = services
        .orchestrator
        .converse(
            &form.session_id,
            &form.language,
            &form.prompt,
            Some(form.user_response.as_str()),
        )
        .await
        .map_err(|report| RouteError::conversation(Tool::Conversation, report))?;

    Ok(Html(fragments::conversation(
        &form.prompt,
        &form.language,
        &form.session_id,
        &reply,
    )))
}

async fn roleplay(
    State(state): State<AppState>,
    form: Result<Form<RoleplayForm>, FormRejection>,
) -> Result<Html<String>, RouteError> {
    let form = decode(Tool::Roleplay, form)?;
    let services = state.services(Tool::Roleplay)?;
    let opener = services
        .roleplay
        .start(&form.prompt, &form.language)
        .await
        .map_err(|report| RouteError::task(Tool::Roleplay, report))?;

    Ok(Html(fragments::roleplay(&form.prompt, &form.language, &opener)))
}

async fn chat(
    State(state): State<AppState>,
    form: Result<Form<ChatForm>, FormRejection>,
) -> Result<Html<String>, RouteError> {
    let form = decode(Tool::Chat, form)?;
    let services = state.services(Tool::Chat)?;
    let reply = services
        .orchestrator
        .chat(&form.session_id, &form.message)
        .await
        .map_err(|report| RouteError::conversation(Tool::Chat, report))?;

    Ok(Html(fragments::chat(&form.session_id, &reply)))
}
