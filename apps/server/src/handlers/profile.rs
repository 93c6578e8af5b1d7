use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{FromRequest, Request, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use userproxy_shared::api::profile::{CombinedProfile, LookupCredentials};
use userproxy_shared::error::ProxyError;

use crate::error::ServerError;
use crate::state::AppState;

/// POST /api/discord-user — look up a Discord user and their profile with the
/// caller's bot token and return both merged, with CDN avatar/banner URLs.
///
/// Routed for every method so non-POST requests get a JSON 405. The method is
/// checked before the body is buffered.
pub async fn lookup_user(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, ServerError> {
    if request.method() != Method::POST {
        return Err(ProxyError::MethodNotAllowed.into());
    }

    let body = Bytes::from_request(request, &state)
        .await
        .map_err(body_rejection)?;

    let payload: Value = serde_json::from_slice(&body)?;
    let creds = LookupCredentials::from_body(&payload)?;

    let user_response = state
        .directory
        .fetch_user(&creds.token, &creds.user_id)
        .await?;
    if !user_response.is_success() {
        tracing::warn!(
            user_id = %creds.user_id,
            status = user_response.status,
            "directory rejected user lookup"
        );
        let details = serde_json::from_slice::<Value>(&user_response.body)
            .unwrap_or_else(|_| Value::Object(Default::default()));
        return Err(ProxyError::Upstream {
            status: user_response.status,
            details,
        }
        .into());
    }

    let user = match serde_json::from_slice::<Value>(&user_response.body)? {
        Value::Object(map) => map,
        _ => {
            return Err(ProxyError::Internal("user payload is not a JSON object".into()).into())
        }
    };

    let profile_response = state
        .directory
        .fetch_user_profile(&creds.token, &creds.user_id)
        .await?;
    let profile = if profile_response.is_success() {
        Some(serde_json::from_slice::<Value>(&profile_response.body)?)
    } else {
        tracing::debug!(
            user_id = %creds.user_id,
            status = profile_response.status,
            "profile unavailable, continuing without it"
        );
        None
    };

    let combined = CombinedProfile::build(user, profile)?;
    tracing::info!(user_id = %creds.user_id, "user lookup served");

    Ok(([(header::CACHE_CONTROL, "no-cache")], Json(combined)).into_response())
}

/// Buffering failures; the body-limit layer surfaces as 413.
fn body_rejection(rejection: BytesRejection) -> ProxyError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ProxyError::PayloadTooLarge(rejection.body_text())
    } else {
        ProxyError::Internal(rejection.body_text())
    }
}
