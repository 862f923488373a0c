//! Client for the DocuSeal document-signing API
//!
//! Covers the template, submission and submitter endpoints used by the MCP
//! server:
//!
//! | Resource | Endpoints |
//! |----------|-----------|
//! | Templates | `GET /templates`, `GET /templates/{id}`, `POST /templates/{id}/clone`, `DELETE /templates/{id}`, `POST /templates/pdf` |
//! | Submissions | `GET /submissions`, `GET /submissions/{id}`, `POST /submissions`, `DELETE /submissions/{id}` |
//! | Submitters | `GET /submitters`, `GET /submitters/{id}`, `PUT /submitters/{id}` |
//!
//! Responses are returned as untyped JSON; the client does not model the
//! API's response schemas.

pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod transport;
pub mod types;

pub use client::{DocusealClient, AUTH_HEADER};
pub use config::{Config, API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use request::ApiRequest;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method, Transport};
