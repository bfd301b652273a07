use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Form, Router};
use chrono::Utc;
use serde::Deserialize;

use hark_app::voice::{webhook, VoiceScripts};
use hark_ports::inbound::AckGateway;

/// State shared by the two voice webhook endpoints.
#[derive(Clone)]
pub struct VoiceWebhookState {
    pub gateway: Arc<dyn AckGateway>,
    pub scripts: Arc<VoiceScripts>,
}

/// The voice callback surface: `POST /prompt` and `POST /acknowledge`,
/// both addressed by `alertId` and `token` query parameters. Responses are
/// always voice documents; a bad request talks to the caller instead of
/// erroring at the transport.
pub fn voice_router(state: VoiceWebhookState) -> Router {
    Router::new()
        .route("/prompt", post(handle_prompt))
        .route("/acknowledge", post(handle_acknowledge))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct CallbackParams {
    #[serde(rename = "alertId", default)]
    alert_id: String,
    #[serde(default)]
    token: String,
}

#[derive(Debug, Deserialize)]
struct GatherForm {
    #[serde(rename = "Digits", default)]
    digits: String,
}

async fn handle_prompt(
    State(state): State<VoiceWebhookState>,
    Query(params): Query<CallbackParams>,
) -> impl IntoResponse {
    let document = webhook::prompt(
        state.gateway.as_ref(),
        &state.scripts,
        &params.alert_id,
        &params.token,
    )
    .await;
    xml_response(document.into_xml())
}

async fn handle_acknowledge(
    State(state): State<VoiceWebhookState>,
    Query(params): Query<CallbackParams>,
    Form(form): Form<GatherForm>,
) -> impl IntoResponse {
    let document = webhook::acknowledge(
        state.gateway.as_ref(),
        &state.scripts,
        &params.alert_id,
        &params.token,
        &form.digits,
        Utc::now(),
    )
    .await;
    xml_response(document.into_xml())
}

fn xml_response(body: String) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/xml")], body)
}
