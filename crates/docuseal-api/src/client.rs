//! DocuSeal API client
//!
//! Every endpoint method funnels through [`DocusealClient::request`], the
//! single place where auth, default headers, body encoding and status
//! handling live.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::request::ApiRequest;
use crate::transport::{HttpRequest, HttpTransport, Method, Transport};
use crate::types::{
    CloneTemplate, CreateSubmission, CreateTemplateFromPdf, ResourceId, SubmissionListQuery,
    SubmitterListQuery, TemplateListQuery, UpdateSubmitter,
};
use crate::{Error, Result};

/// Header carrying the API key
pub const AUTH_HEADER: &str = "X-Auth-Token";

/// DocuSeal API client
#[derive(Clone)]
pub struct DocusealClient {
    config: Config,
    transport: Arc<dyn Transport>,
}

impl DocusealClient {
    /// Create a client over an arbitrary transport
    pub fn new(config: Config, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Create a client that talks HTTP through `reqwest`
    pub fn with_http(config: Config) -> Self {
        Self::new(config, Arc::new(HttpTransport::new()))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send one request and return the parsed JSON response.
    ///
    /// Fails with [`Error::MissingApiKey`] before touching the transport when
    /// no key is configured, and with [`Error::Api`] on a non-2xx status.
    pub async fn request(&self, request: ApiRequest) -> Result<Value> {
        let api_key = self.config.api_key().ok_or(Error::MissingApiKey)?;

        let mut headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
            (AUTH_HEADER.to_string(), api_key.to_string()),
        ];
        for (name, value) in &request.headers {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
            headers.push((name.clone(), value.clone()));
        }

        let body = match (&request.body, request.method) {
            (Some(body), method) if method != Method::Get => Some(serde_json::to_string(body)?),
            _ => None,
        };

        let wire = HttpRequest {
            method: request.method,
            url: self.config.url_for(&request.path_and_query()),
            headers,
            body,
        };

        debug!(method = %wire.method, path = %request.path, "DocuSeal API request");

        let response = self.transport.send(wire).await?;

        if !response.is_success() {
            warn!(
                status = response.status,
                path = %request.path,
                "DocuSeal API returned an error"
            );
            return Err(Error::Api {
                status: response.status,
                body: response.body,
            });
        }

        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&response.body).map_err(|e| Error::InvalidResponse(e.to_string()))
    }

    // ========================================================================
    // Templates
    // ========================================================================

    /// `GET /templates`
    pub async fn list_templates(&self, query: &TemplateListQuery) -> Result<Value> {
        let request = ApiRequest::get("/templates")
            .query_opt("application_key", query.application_key.as_deref())
            .query_opt("folder", query.folder.as_deref())
            .query_opt("archived", query.archived)
            .query_opt("limit", query.limit);
        self.request(request).await
    }

    /// `GET /templates/{id}`
    pub async fn get_template(&self, id: ResourceId) -> Result<Value> {
        self.request(ApiRequest::get(format!("/templates/{id}"))).await
    }

    /// `POST /templates/{id}/clone`
    pub async fn clone_template(&self, id: ResourceId, body: &CloneTemplate) -> Result<Value> {
        let request = ApiRequest::post(format!("/templates/{id}/clone")).json(body)?;
        self.request(request).await
    }

    /// `DELETE /templates/{id}`
    pub async fn archive_template(&self, id: ResourceId) -> Result<Value> {
        self.request(ApiRequest::delete(format!("/templates/{id}"))).await
    }

    /// `POST /templates/pdf`
    pub async fn create_template_from_pdf(&self, body: &CreateTemplateFromPdf) -> Result<Value> {
        let request = ApiRequest::post("/templates/pdf").json(body)?;
        self.request(request).await
    }

    // ========================================================================
    // Submissions
    // ========================================================================

    /// `GET /submissions`
    pub async fn list_submissions(&self, query: &SubmissionListQuery) -> Result<Value> {
        let request = ApiRequest::get("/submissions")
            .query_opt("template_id", query.template_id)
            .query_opt("application_key", query.application_key.as_deref())
            .query_opt("template_folder", query.template_folder.as_deref())
            .query_opt("limit", query.limit);
        self.request(request).await
    }

    /// `GET /submissions/{id}`
    pub async fn get_submission(&self, id: ResourceId) -> Result<Value> {
        self.request(ApiRequest::get(format!("/submissions/{id}"))).await
    }

    /// `POST /submissions`
    pub async fn create_submission(&self, args: CreateSubmission) -> Result<Value> {
        let request = ApiRequest::post("/submissions").json(&args.into_body())?;
        self.request(request).await
    }

    /// `DELETE /submissions/{id}`
    pub async fn archive_submission(&self, id: ResourceId) -> Result<Value> {
        self.request(ApiRequest::delete(format!("/submissions/{id}"))).await
    }

    // ========================================================================
    // Submitters
    // ========================================================================

    /// `GET /submitters`
    pub async fn list_submitters(&self, query: &SubmitterListQuery) -> Result<Value> {
        let request = ApiRequest::get("/submitters")
            .query_opt("submission_id", query.submission_id)
            .query_opt("application_key", query.application_key.as_deref())
            .query_opt("limit", query.limit);
        self.request(request).await
    }

    /// `GET /submitters/{id}`
    pub async fn get_submitter(&self, id: ResourceId) -> Result<Value> {
        self.request(ApiRequest::get(format!("/submitters/{id}"))).await
    }

    /// `PUT /submitters/{id}`
    pub async fn update_submitter(&self, id: ResourceId, body: &UpdateSubmitter) -> Result<Value> {
        let request = ApiRequest::put(format!("/submitters/{id}")).json(body)?;
        self.request(request).await
    }
}

impl std::fmt::Debug for DocusealClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocusealClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
