//! Prospect list parsing and validation.
//!
//! The prospect prompt instructs the model to return a JSON array of
//! exactly N objects with fixed field names. The model output goes through
//! the cleanup pipeline first, then shape validation mirrors what the
//! prompt demanded.

use crate::cleanup;
use serde::{Deserialize, Serialize};

/// Field names every prospect object must carry.
///
/// Email is allowed to be absent or empty ("leave the email column blank").
pub const REQUIRED_FIELDS: &[&str] = &["Name", "LinkedIn Profile URL", "Title", "Company", "Location"];

/// A single discovered prospect. Serde names match the wire contract the
/// prompt dictates to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prospect {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Email", default)]
    pub email: String,

    #[serde(rename = "LinkedIn Profile URL")]
    pub linkedin_url: String,

    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Company")]
    pub company: String,

    #[serde(rename = "Location")]
    pub location: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ProspectError {
    #[error("Model output is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON array of prospects")]
    NotAnArray,

    #[error("Expected {expected} prospects, got {got}")]
    WrongCount { expected: usize, got: usize },

    #[error("Prospect {index} is not a JSON object")]
    NotAnObject { index: usize },

    #[error("Prospect {index} is missing field '{field}'")]
    MissingField { index: usize, field: &'static str },
}

/// Clean raw model output and parse it into a validated prospect list.
///
/// Validation order matches the prompt contract: array shape, then exact
/// count, then per-entry required fields.
pub fn parse_prospects(raw: &str, expected: usize) -> Result<Vec<Prospect>, ProspectError> {
    let cleaned = cleanup::clean_array_output(raw);
    let value: serde_json::Value = serde_json::from_str(&cleaned)?;

    let entries = value.as_array().ok_or(ProspectError::NotAnArray)?;

    if entries.len() != expected {
        return Err(ProspectError::WrongCount {
            expected,
            got: entries.len(),
        });
    }

    for (index, entry) in entries.iter().enumerate() {
        let object = entry.as_object().ok_or(ProspectError::NotAnObject { index })?;
        for field in REQUIRED_FIELDS {
            if !object.contains_key(*field) {
                return Err(ProspectError::MissingField { index, field });
            }
        }
    }

    let prospects = serde_json::from_value(value)?;
    Ok(prospects)
}

/// Render prospects as CSV with a header row.
pub fn to_csv(prospects: &[Prospect]) -> String {
    let mut out = String::from("Name,Email,LinkedIn Profile URL,Title,Company,Location\n");
    for p in prospects {
        let row = [
            &p.name,
            &p.email,
            &p.linkedin_url,
            &p.title,
            &p.company,
            &p.location,
        ];
        let line: Vec<String> = row.iter().map(|field| csv_escape(field)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

/// Quote a CSV field when it contains a comma, quote, or newline.
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
