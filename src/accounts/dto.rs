use serde::Serialize;

use super::repo_types::LinkedAccount;

#[derive(Debug, Serialize)]
pub struct AccountsResponse {
    pub accounts: Vec<LinkedAccount>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
