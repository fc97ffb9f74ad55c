//! # ctclient
//!
//! Blocking client for the cloudtamer.io management REST API.
//!
//! This crate provides:
//! - A bearer-token [`Client`] with GET/POST/PATCH/DELETE helpers
//! - Pluggable transports: real HTTP via `ureq`, or an in-memory mock
//! - Error categories for presenting failures to the user
//! - Wire models shared by every resource kind
//!
//! ## Example
//!
//! ```no_run
//! use ctclient::Client;
//! use serde_json::json;
//!
//! let client = Client::new("https://ct.example.com", "app_123", false)?;
//!
//! let id = client.create("/v3/cft", &json!({"name": "base", "regions": []}))?;
//! let cft = client.get_value(&format!("/v3/cft/{id}"))?;
//! println!("{}", cft["data"]["cft"]["name"]);
//! # Ok::<(), ctclient::Error>(())
//! ```
//!
//! Only HTTP 200 and 201 count as success. Anything else surfaces as
//! [`Error::Http`] with the method, URL, status, and response body.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{Client, api_base};
pub use error::{Error, ErrorCategory, Result};
pub use models::{ChangeOwners, Creation, Envelope, ObjectWithId};
pub use transport::{HttpTransport, Method, MockTransport, Transport};
