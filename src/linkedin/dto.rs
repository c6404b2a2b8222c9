use serde::{Deserialize, Serialize};

use crate::accounts::repo::LinkedAccount;

/// `li_at` cookie copied from a logged-in LinkedIn browser session.
#[derive(Deserialize)]
pub struct CookieConnectRequest {
    #[serde(default)]
    pub cookie: String,
}

#[derive(Deserialize)]
pub struct CredentialsConnectRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct ConnectResponse {
    pub message: String,
    pub account_id: String,
    pub account: LinkedAccount,
}
