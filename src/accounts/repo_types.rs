use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

pub const DEFAULT_PROVIDER: &str = "linkedin";

/// Local record of an external account linked to a user.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LinkedAccount {
    pub id: i64,
    pub user_id: i64,
    pub provider: String,
    pub account_id: String, // provider-issued id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(skip_serializing)]
    pub deleted_at: Option<OffsetDateTime>,
}
