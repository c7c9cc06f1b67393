use async_trait::async_trait;
use log::debug;
use reqwest::multipart;
use thiserror::Error;

use crate::form::{FieldValue, FormPart};

/// Header the anti-forgery token travels in.
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// A reply that made it back over the wire, whatever its status.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Network seam: one POST of a multipart form with the token attached.
///
/// Implementations report non-2xx statuses as `Ok` replies; `Err` is
/// reserved for requests that produced no reply at all. They never
/// interpret the body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_form(
        &self,
        url: &str,
        csrf_token: &str,
        parts: Vec<FormPart>,
    ) -> Result<HttpReply, TransportError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_form(
        &self,
        url: &str,
        csrf_token: &str,
        parts: Vec<FormPart>,
    ) -> Result<HttpReply, TransportError> {
        let mut form = multipart::Form::new();
        for part in parts {
            form = match part.value {
                FieldValue::Text(value) => form.text(part.name, value),
                FieldValue::File { filename, bytes } => form.part(
                    part.name,
                    multipart::Part::bytes(bytes).file_name(filename),
                ),
            };
        }

        debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .header(CSRF_HEADER, csrf_token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TransportError(format!("request to {} failed: {}", url, e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(format!("cannot read reply body: {}", e)))?;
        debug!("reply status {} ({} bytes)", status, body.len());

        Ok(HttpReply { status, body })
    }
}
