//! Google Sheets source
//!
//! Reads sheet values through the Sheets v4 REST API:
//! `GET {base}/v4/spreadsheets/{id}/values/{sheet}`.
//!
//! The credentials file is JSON:
//!
//! ```json
//! { "spreadsheet_id": "1AbC...", "api_key": "AIza..." }
//! ```
//!
//! An `access_token` may be given instead of `api_key` and is sent as a
//! bearer token.

use super::*;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Public Google Sheets endpoint
pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";

/// Contents of the credentials file
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleCredentials {
    /// Spreadsheet holding every sheet the console reads
    pub spreadsheet_id: String,
    /// API key for publicly shared spreadsheets
    #[serde(default)]
    pub api_key: Option<String>,
    /// OAuth access token for private spreadsheets
    #[serde(default)]
    pub access_token: Option<String>,
    /// Override for the API host (tests, proxies)
    #[serde(default)]
    pub base_url: Option<String>,
}

impl GoogleCredentials {
    /// Load credentials from a JSON file
    pub fn load(path: &Path) -> SheetResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SheetError::Credentials(format!("cannot read {:?}: {}", path, e))
        })?;
        let creds: GoogleCredentials = serde_json::from_str(&content)
            .map_err(|e| SheetError::Credentials(format!("invalid {:?}: {}", path, e)))?;

        if creds.api_key.is_none() && creds.access_token.is_none() {
            return Err(SheetError::Credentials(
                "credentials need either api_key or access_token".to_string(),
            ));
        }

        Ok(creds)
    }
}

/// `values.get` response body
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Sheet source backed by the Google Sheets API
pub struct GoogleSheetsSource {
    client: Client,
    credentials: GoogleCredentials,
    base_url: String,
}

impl GoogleSheetsSource {
    /// Create a source from loaded credentials
    pub fn new(credentials: GoogleCredentials) -> SheetResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("strategic-console/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(15))
            .build()?;

        let base_url = credentials
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_SHEETS_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            credentials,
            base_url,
        })
    }

    /// Create a source from a credentials file path
    pub fn from_credentials_file(path: &Path) -> SheetResult<Self> {
        Self::new(GoogleCredentials::load(path)?)
    }

    fn spreadsheet_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}",
            self.base_url,
            urlencoding::encode(&self.credentials.spreadsheet_id)
        )
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match (&self.credentials.access_token, &self.credentials.api_key) {
            (Some(token), _) => request.bearer_auth(token),
            (None, Some(key)) => request.query(&[("key", key.as_str())]),
            (None, None) => request,
        }
    }
}

/// Render a JSON cell the way a spreadsheet shows it
fn cell_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Turn a values grid into a sheet; the first row holds headers
fn grid_to_sheet(name: &str, grid: Vec<Vec<serde_json::Value>>) -> Sheet {
    let mut rows = grid.into_iter();
    let headers: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(cell_to_string).collect(),
        None => return Sheet::empty(name),
    };

    let rows = rows
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .collect();

    Sheet::new(name, headers, rows)
}

#[async_trait]
impl SheetSource for GoogleSheetsSource {
    fn name(&self) -> &str {
        "google-sheets"
    }

    async fn fetch(&self, sheet: &str) -> SheetResult<Sheet> {
        let url = format!("{}/values/{}", self.spreadsheet_url(), urlencoding::encode(sheet));
        let response = self
            .authorized(self.client.get(&url))
            .query(&[("majorDimension", "ROWS")])
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {}
            // Unknown tab names come back as 400 "Unable to parse range"
            StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST => {
                tracing::debug!(sheet = %sheet, status = %response.status(), "Sheet not in spreadsheet");
                return Ok(Sheet::empty(sheet));
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(SheetError::Auth(format!(
                    "Google Sheets returned {}",
                    response.status()
                )));
            }
            status => {
                return Err(SheetError::Http(format!("Google Sheets returned {}", status)));
            }
        }

        let body: ValueRange = response
            .json()
            .await
            .map_err(|e| SheetError::Parse(e.to_string()))?;

        let parsed = grid_to_sheet(sheet, body.values);
        tracing::debug!(sheet = %sheet, rows = parsed.len(), "Loaded sheet from Google Sheets");
        Ok(parsed)
    }

    async fn ping(&self) -> SheetResult<()> {
        let response = self
            .authorized(self.client.get(self.spreadsheet_url()))
            .query(&[("fields", "spreadsheetId")])
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(SheetError::Auth(format!(
                "Google Sheets returned {}",
                response.status()
            ))),
            status => Err(SheetError::Http(format!("Google Sheets returned {}", status))),
        }
    }
}
