use crate::models::registration::{RegistrationForm, RejectedResponse, SavedResponse};
use crate::security::csrf::CSRF_HEADER;
use crate::validation::error_bag::ErrorBag;
use anyhow::{bail, Context, Result};
use reqwest::StatusCode;
use std::time::Duration;

const META_PREFIX: &str = r#"<meta name="csrf-token" content=""#;

/// What the server made of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved { message: String },
    Rejected(ErrorBag),
}

/// HTTP client for the registration form endpoints
pub struct FormClient {
    client: reqwest::Client,
    base_url: String,
    csrf_token: String,
}

impl FormClient {
    /// Build a client that already holds `csrf_token`
    pub fn with_token(base_url: impl Into<String>, csrf_token: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            csrf_token: csrf_token.into(),
        })
    }

    /// Load the form page once and keep the CSRF token it carries
    pub async fn connect(base_url: impl Into<String>) -> Result<Self> {
        let mut client = Self::with_token(base_url, "")?;
        client.csrf_token = client.fetch_csrf_token().await?;
        Ok(client)
    }

    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    pub async fn fetch_csrf_token(&self) -> Result<String> {
        let response = self
            .client
            .get(format!("{}/user-form", self.base_url))
            .send()
            .await
            .context("Failed to load form page")?;

        if !response.status().is_success() {
            bail!("Form page returned error status: {}", response.status());
        }

        let page = response.text().await.context("Failed to read form page")?;

        extract_csrf_token(&page)
            .map(str::to_string)
            .context("Form page has no csrf-token meta tag")
    }

    /// Send one submission
    ///
    /// 200 and 422 are outcomes; every other status is an error.
    pub async fn submit(&self, form: &RegistrationForm) -> Result<SubmitOutcome> {
        let response = self
            .client
            .post(format!("{}/submit-form", self.base_url))
            .header(CSRF_HEADER, &self.csrf_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(form)
            .send()
            .await
            .context("Failed to send submission")?;

        match response.status() {
            StatusCode::OK => {
                let body = response
                    .json::<SavedResponse>()
                    .await
                    .context("Failed to parse success response")?;

                if !body.status {
                    bail!("Server answered 200 without a success status");
                }

                Ok(SubmitOutcome::Saved {
                    message: body.message,
                })
            }
            StatusCode::UNPROCESSABLE_ENTITY => {
                let body = response
                    .json::<RejectedResponse>()
                    .await
                    .context("Failed to parse validation response")?;

                Ok(SubmitOutcome::Rejected(body.errors))
            }
            status => bail!("Submission failed with status: {}", status),
        }
    }
}

fn extract_csrf_token(page: &str) -> Option<&str> {
    let start = page.find(META_PREFIX)? + META_PREFIX.len();
    let len = page[start..].find('"')?;
    let token = &page[start..start + len];

    (!token.is_empty()).then_some(token)
}
