//! Wire contracts for the profile lookup endpoint.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::cdn;
use crate::error::ProxyError;

/// Message returned when either credential is absent.
pub const MISSING_CREDENTIALS: &str = "Token and userId are required";

/// Credentials extracted from the inbound request body
/// (`{ "token": string, "userId": string }`).
#[derive(Clone, PartialEq, Eq)]
pub struct LookupCredentials {
    pub token: String,
    pub user_id: String,
}

// Hand-written so the bot token never reaches a log line.
impl std::fmt::Debug for LookupCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupCredentials")
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .finish()
    }
}

impl LookupCredentials {
    /// Extract `token` and `userId` from a parsed request body.
    ///
    /// Both must be non-empty strings. Anything else, including a body that
    /// is not a JSON object, is a validation error.
    pub fn from_body(body: &Value) -> Result<Self, ProxyError> {
        let field = |name: &str| {
            body.get(name)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        };

        match (field("token"), field("userId")) {
            (Some(token), Some(user_id)) => Ok(Self { token, user_id }),
            _ => Err(ProxyError::Validation(MISSING_CREDENTIALS.into())),
        }
    }
}

/// The merged document returned to the caller: every upstream user field plus
/// `profile`, `avatar_url` and `banner_url`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CombinedProfile(pub Map<String, Value>);

impl CombinedProfile {
    /// Merge an upstream user object with its (optional) profile and derive
    /// the CDN URLs.
    pub fn build(user: Map<String, Value>, profile: Option<Value>) -> Result<Self, ProxyError> {
        let avatar_url = match hash_field(&user, "avatar")? {
            Some(hash) => cdn::avatar_url(&user_id(&user)?, hash),
            None => cdn::default_avatar_url(discriminator(&user).as_deref()),
        };
        let banner_url = hash_field(&user, "banner")?
            .map(|hash| user_id(&user).map(|id| cdn::banner_url(&id, hash)))
            .transpose()?;

        let mut merged = user;
        merged.insert("profile".into(), profile.unwrap_or(Value::Null));
        merged.insert("avatar_url".into(), Value::String(avatar_url));
        merged.insert(
            "banner_url".into(),
            banner_url.map(Value::String).unwrap_or(Value::Null),
        );
        Ok(Self(merged))
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// Reads an asset hash; absent, `null`, `false`, `0` and `""` all mean "not set".
fn hash_field<'a>(user: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>, ProxyError> {
    match user.get(key) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(ProxyError::Internal(format!(
            "user field `{key}` is not a string: {other}"
        ))),
    }
}

fn user_id(user: &Map<String, Value>) -> Result<String, ProxyError> {
    match user.get("id") {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(ProxyError::Internal("user payload has no id".into())),
    }
}

fn discriminator(user: &Map<String, Value>) -> Option<String> {
    match user.get("discriminator") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}
