use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap, HeaderName, StatusCode},
    response::Html,
    Json,
};

use crate::auth::AUTH_TOKEN_HEADER;
use crate::error::CheckinError;
use crate::models::{CheckinRequest, CheckinResponse};
use crate::state::AppState;

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

pub async fn readyz() -> StatusCode {
    StatusCode::OK
}

pub async fn dashboard(State(state): State<AppState>) -> Result<Html<String>, CheckinError> {
    let devices = state.registry.snapshot_sorted_by_recency().await;
    let page = state
        .dashboard
        .render(&devices)
        .map_err(|err| CheckinError::Internal(format!("dashboard render: {err}")))?;
    Ok(Html(page))
}

pub async fn connect(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<CheckinResponse>, CheckinError> {
    let user_agent = header_value(&headers, &header::USER_AGENT);
    let token = header_value(&headers, &HeaderName::from_static(AUTH_TOKEN_HEADER));

    // Authenticate before looking at the payload.
    if let Err(reason) = state.auth.verify(user_agent, token) {
        tracing::warn!(
            reason = reason.as_str(),
            user_agent = user_agent,
            "check-in denied"
        );
        return Err(CheckinError::Unauthorized(reason));
    }

    // Oversized or unreadable bodies are rejected only once the caller is trusted.
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "check-in body unreadable");
            return Err(CheckinError::NoJsonData);
        }
    };

    let checkin = match CheckinRequest::parse(&body) {
        Ok(request) => request.sanitize(),
        Err(err) => {
            tracing::warn!(body_len = body.len(), "check-in without json data");
            return Err(err);
        }
    };

    let last_seen = state
        .registry
        .upsert(checkin.mac.clone(), checkin.id.clone(), checkin.message)
        .await;
    tracing::info!(
        device_id = %checkin.id,
        mac = %checkin.mac,
        "device connected"
    );

    Ok(Json(CheckinResponse {
        status: "accepted",
        server_time: last_seen.format("%H:%M:%S").to_string(),
    }))
}

/// Missing or non-visible-ASCII header values read as empty.
fn header_value<'a>(headers: &'a HeaderMap, name: &HeaderName) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn missing_header_reads_empty() {
        let mut headers = HeaderMap::new();
        assert_eq!(header_value(&headers, &header::USER_AGENT), "");

        headers.insert(header::USER_AGENT, HeaderValue::from_static("ESP32-Class-Device"));
        assert_eq!(
            header_value(&headers, &header::USER_AGENT),
            "ESP32-Class-Device"
        );
    }
}
