//! Wire-level request and response shapes for the three operations.
//!
//! Input field names are camelCase (`startLine`, `endLine`,
//! `replacementText`); output fields are snake_case. Failures always
//! serialize as `{"isError": true, "message": ...}`.

use serde::{Deserialize, Serialize};

/// Request to create (or overwrite) a file from UTF-8 text.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequest {
    pub path: String,
    pub text: String,
}

/// Request to replace an inclusive 1-based line range of a file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    pub path: String,
    pub start_line: u64,
    pub end_line: u64,
    pub replacement_text: String,
}

/// Request to read a file back as UTF-8 text.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadRequest {
    pub path: String,
}

/// Success payload for `create`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateResponse {
    pub success: bool,
    pub path: String,
    pub encoding: &'static str,
    pub corruption_count: usize,
    pub is_clean: bool,
}

/// Success payload for `edit`.
#[derive(Debug, Clone, Serialize)]
pub struct EditResponse {
    pub success: bool,
    pub path: String,
    pub encoding: &'static str,
    pub corruption_count: usize,
    pub is_clean: bool,
    pub lines_replaced: usize,
    pub total_lines: usize,
    pub backup_path: String,
}

/// Success payload for `read`.
#[derive(Debug, Clone, Serialize)]
pub struct ReadResponse {
    pub success: bool,
    pub path: String,
    pub content: String,
    pub lines: usize,
    pub line_ending: &'static str,
}

/// Uniform failure shape. Nothing ever panics or throws across the
/// service boundary; every failure becomes one of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "isError")]
    pub is_error: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { is_error: true, message: message.into() }
    }
}
