//! Wire types for the provider's `POST /accounts` call and the rules for
//! reading its replies.
//!
//! The provider answers success and failure with the same loosely-shaped JSON
//! object. Failures are spread over several optional fields with no
//! discriminant, depending on which layer rejected the call (validation,
//! authentication, rate limiting), so [`ErrorEnvelope`] folds them into one
//! message using a fixed priority.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const PROVIDER_LINKEDIN: &str = "LINKEDIN";

/// How the external LinkedIn session is proven to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthMethod {
    /// `li_at` session cookie, sent as a bearer credential.
    Cookie { access_token: String },
    Credentials { username: String, password: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectRequest {
    pub provider: &'static str,
    #[serde(flatten)]
    pub auth: AuthMethod,
}

impl ConnectRequest {
    pub fn linkedin_cookie(cookie: impl Into<String>) -> Self {
        Self {
            provider: PROVIDER_LINKEDIN,
            auth: AuthMethod::Cookie {
                access_token: cookie.into(),
            },
        }
    }

    pub fn linkedin_credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            provider: PROVIDER_LINKEDIN,
            auth: AuthMethod::Credentials {
                username: username.into(),
                password: password.into(),
            },
        }
    }

    pub fn kind(&self) -> &'static str {
        match self.auth {
            AuthMethod::Cookie { .. } => "cookie",
            AuthMethod::Credentials { .. } => "credentials",
        }
    }
}

/// Raw reply body. Success fields and every known error field are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectResponse {
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

/// HTTP status plus parsed body of one provider call.
#[derive(Debug, Clone)]
pub struct ProviderReply {
    pub status: u16,
    pub body: ConnectResponse,
}

/// The external account the provider created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedIdentity {
    pub account_id: String,
    pub display_name: String,
}

/// Error shapes observed from the provider, most descriptive first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorEnvelope {
    Problem { title: String, detail: String },
    Detail(String),
    Title(String),
    OAuth { error: String, description: String },
    Error(String),
    Description(String),
    Message(String),
    Typed(String),
    Unknown,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

impl ErrorEnvelope {
    pub fn from_response(body: &ConnectResponse) -> Self {
        let title = present(&body.title);
        let error = present(&body.error);
        let description = present(&body.description);

        if let Some(detail) = present(&body.detail) {
            return match title {
                Some(title) => Self::Problem {
                    title: title.to_string(),
                    detail: detail.to_string(),
                },
                None => Self::Detail(detail.to_string()),
            };
        }
        if let Some(title) = title {
            return Self::Title(title.to_string());
        }
        if let Some(error) = error {
            return match description {
                Some(description) => Self::OAuth {
                    error: error.to_string(),
                    description: description.to_string(),
                },
                None => Self::Error(error.to_string()),
            };
        }
        if let Some(description) = description {
            return Self::Description(description.to_string());
        }
        if let Some(message) = present(&body.message) {
            return Self::Message(message.to_string());
        }
        if let Some(kind) = present(&body.kind) {
            return Self::Typed(kind.to_string());
        }
        Self::Unknown
    }
}

impl fmt::Display for ErrorEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Problem { title, detail } => write!(f, "{title}: {detail}"),
            Self::OAuth { error, description } => write!(f, "{error}: {description}"),
            Self::Detail(s)
            | Self::Title(s)
            | Self::Error(s)
            | Self::Description(s)
            | Self::Message(s) => f.write_str(s),
            Self::Typed(kind) => write!(f, "Error type: {kind}"),
            Self::Unknown => f.write_str("Unknown error from provider API"),
        }
    }
}

/// Why a reply does not count as a connected account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Non-success status; carries the normalized envelope.
    Provider { status: u16, envelope: ErrorEnvelope },
    /// Success status without an account id.
    MissingAccountId,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider { envelope, .. } => write!(f, "{envelope}"),
            Self::MissingAccountId => {
                f.write_str("invalid response from provider: missing account_id")
            }
        }
    }
}

/// A reply is a connection only when the status is 200/201 and an account id came back.
pub fn classify(reply: &ProviderReply) -> Result<LinkedIdentity, Rejection> {
    if reply.status != 200 && reply.status != 201 {
        return Err(Rejection::Provider {
            status: reply.status,
            envelope: ErrorEnvelope::from_response(&reply.body),
        });
    }

    let account_id = present(&reply.body.account_id).ok_or(Rejection::MissingAccountId)?;
    let display_name = present(&reply.body.name)
        .or_else(|| present(&reply.body.username))
        .unwrap_or_default();

    Ok(LinkedIdentity {
        account_id: account_id.to_string(),
        display_name: display_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(v: serde_json::Value) -> ConnectResponse {
        serde_json::from_value(v).unwrap()
    }

    fn message(v: serde_json::Value) -> String {
        ErrorEnvelope::from_response(&body(v)).to_string()
    }

    #[test]
    fn cookie_request_wire_shape() {
        let req = ConnectRequest::linkedin_cookie("AQEDAT");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "provider": "LINKEDIN", "type": "cookie", "access_token": "AQEDAT" })
        );
        assert_eq!(req.kind(), "cookie");
    }

    #[test]
    fn credentials_request_wire_shape() {
        let req = ConnectRequest::linkedin_credentials("jane", "pw");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "provider": "LINKEDIN", "type": "credentials", "username": "jane", "password": "pw" })
        );
    }

    #[test]
    fn envelope_priority_order() {
        let all = json!({
            "title": "T", "detail": "D", "error": "E", "description": "S",
            "message": "M", "type": "errors/x"
        });
        assert_eq!(message(all), "T: D");
        assert_eq!(message(json!({ "detail": "D", "error": "E" })), "D");
        assert_eq!(message(json!({ "title": "T", "error": "E", "description": "S" })), "T");
        assert_eq!(message(json!({ "error": "E", "description": "S", "message": "M" })), "E: S");
        assert_eq!(message(json!({ "error": "E", "message": "M" })), "E");
        assert_eq!(message(json!({ "description": "S", "message": "M" })), "S");
        assert_eq!(message(json!({ "message": "M", "type": "errors/x" })), "M");
        assert_eq!(
            message(json!({ "type": "errors/invalid_credentials" })),
            "Error type: errors/invalid_credentials"
        );
        assert_eq!(message(json!({})), "Unknown error from provider API");
    }

    #[test]
    fn empty_strings_count_as_absent() {
        assert_eq!(message(json!({ "title": "", "detail": "D" })), "D");
        assert_eq!(message(json!({ "detail": "", "title": "T" })), "T");
        assert_eq!(message(json!({ "error": "", "description": "S" })), "S");
        assert_eq!(
            ErrorEnvelope::from_response(&body(json!({ "message": "" }))),
            ErrorEnvelope::Unknown
        );
    }

    #[test]
    fn envelope_variants() {
        assert_eq!(
            ErrorEnvelope::from_response(&body(json!({ "error": "rate_limited", "description": "slow down" }))),
            ErrorEnvelope::OAuth {
                error: "rate_limited".into(),
                description: "slow down".into()
            }
        );
        assert_eq!(
            ErrorEnvelope::from_response(&body(json!({ "detail": "only detail" }))),
            ErrorEnvelope::Detail("only detail".into())
        );
    }

    #[test]
    fn classify_success_prefers_name_then_username() {
        let reply = ProviderReply {
            status: 200,
            body: body(json!({ "account_id": "acc_123", "name": "Jane" })),
        };
        assert_eq!(
            classify(&reply).unwrap(),
            LinkedIdentity {
                account_id: "acc_123".into(),
                display_name: "Jane".into()
            }
        );

        let reply = ProviderReply {
            status: 201,
            body: body(json!({ "account_id": "acc_9", "provider": "LINKEDIN", "username": "jdoe", "status": 1 })),
        };
        assert_eq!(classify(&reply).unwrap().display_name, "jdoe");

        let reply = ProviderReply {
            status: 201,
            body: body(json!({ "account_id": "acc_9" })),
        };
        assert_eq!(classify(&reply).unwrap().display_name, "");
    }

    #[test]
    fn classify_requires_account_id_on_success_status() {
        let reply = ProviderReply {
            status: 200,
            body: body(json!({ "name": "Jane", "account_id": "" })),
        };
        let err = classify(&reply).unwrap_err();
        assert_eq!(err, Rejection::MissingAccountId);
        assert_eq!(err.to_string(), "invalid response from provider: missing account_id");
    }

    #[test]
    fn classify_rejects_other_statuses_even_with_account_id() {
        let reply = ProviderReply {
            status: 202,
            body: body(json!({ "account_id": "acc_1", "message": "pending checkpoint" })),
        };
        assert_eq!(classify(&reply).unwrap_err().to_string(), "pending checkpoint");
    }

    #[test]
    fn classify_problem_details_reply() {
        let reply = ProviderReply {
            status: 401,
            body: body(json!({
                "title": "Invalid credentials",
                "detail": "The provided credentials are invalid."
            })),
        };
        assert_eq!(
            classify(&reply).unwrap_err().to_string(),
            "Invalid credentials: The provided credentials are invalid."
        );
    }
}
