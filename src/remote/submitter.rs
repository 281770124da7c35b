// SPDX-License-Identifier: GPL-3.0-or-later
// src/remote/submitter.rs
//
// Transport that posts the cropped image to the answering service.

use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;

use crate::config::AppConfig;
use crate::constant::UPLOAD_FIELD;
use crate::domain::answer::AnswerRecord;
use crate::domain::upload::UploadItem;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("could not connect to {0}")]
    Connect(String),
    #[error("request timed out after {0}s")]
    Timeout(u64),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("server responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Response(String),
}

/// Decoded service reply. `data` keeps the order the service sent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmitResponse {
    pub data: Vec<AnswerRecord>,
}

/// Sends one file and returns the answers. Errors are values, never panics.
pub trait RemoteSubmitter: Send + Sync {
    fn submit<'a>(&'a self, file: &'a UploadItem) -> BoxFuture<'a, Result<SubmitResponse, SubmitError>>;
}

impl<T: RemoteSubmitter + ?Sized> RemoteSubmitter for Arc<T> {
    fn submit<'a>(&'a self, file: &'a UploadItem) -> BoxFuture<'a, Result<SubmitResponse, SubmitError>> {
        (**self).submit(file)
    }
}

/// Response bodies the service is known to send: a bare list or `{ "data": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ResponseBody {
    Wrapped { data: Vec<AnswerRecord> },
    Bare(Vec<AnswerRecord>),
}

/// Parse a response body into answers.
pub fn parse_response(body: &[u8]) -> Result<SubmitResponse, SubmitError> {
    let parsed: ResponseBody =
        serde_json::from_slice(body).map_err(|e| SubmitError::Response(e.to_string()))?;
    let data = match parsed {
        ResponseBody::Wrapped { data } | ResponseBody::Bare(data) => data,
    };
    Ok(SubmitResponse { data })
}

/// Multipart HTTP POST to a fixed URL.
pub struct HttpSubmitter {
    url: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpSubmitter {
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        Ok(Self {
            url: url.into(),
            client,
            timeout_secs,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, SubmitError> {
        Self::new(config.upload_url(), config.request_timeout_secs)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn post(&self, file: &UploadItem) -> Result<SubmitResponse, SubmitError> {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.filename().to_string())
            .mime_str(file.declared_type())
            .map_err(|e| SubmitError::Transport(e.to_string()))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        log::debug!("POST {} ({} bytes, {})", self.url, file.size(), file.declared_type());

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.classify(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SubmitError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await.map_err(|e| self.classify(&e))?;
        parse_response(&body)
    }

    fn classify(&self, e: &reqwest::Error) -> SubmitError {
        if e.is_timeout() {
            SubmitError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            SubmitError::Connect(self.url.clone())
        } else {
            SubmitError::Transport(e.to_string())
        }
    }
}

impl RemoteSubmitter for HttpSubmitter {
    fn submit<'a>(&'a self, file: &'a UploadItem) -> BoxFuture<'a, Result<SubmitResponse, SubmitError>> {
        self.post(file).boxed()
    }
}
