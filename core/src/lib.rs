//! Client for the Sunny Judge judicial-records API.
//!
//! # Overview
//! Fetches individual court verdicts, their hearing schedules, and bulk
//! verdict searches by adjudication date. Verdict lookups are flattened
//! together with their full-text content into a single `VerdictRecord`.
//!
//! # Design
//! - `VerdictClient` is stateless: endpoint configuration plus a `Transport`.
//! - Each operation is split into `build_*` (produces a request) and
//!   `parse_*` (consumes a response); only `Transport::execute` does I/O.
//! - Non-200 statuses are returned as data. `ApiError` is reserved for
//!   transport failures and bodies that cannot be decoded.
//! - Everything is synchronous and sequential.
//!
//! ```no_run
//! use sunnyjudge_core::{CaseIdentifier, CaseType, ClientConfig, VerdictClient};
//!
//! let client = VerdictClient::new(ClientConfig::default());
//! let id = CaseIdentifier::new("TPD", CaseType::Civil, 109, "訴", 123);
//! let fetched = client.fetch_verdict(&id)?;
//! if let Some(record) = fetched.record {
//!     println!("{}", serde_json::to_string_pretty(&record)?);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{merge_verdict, VerdictClient, CONTENT_UNAVAILABLE};
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{
    CaseIdentifier, CaseType, FetchedVerdict, FilterKey, Resource, SearchFilter, SearchPage,
    StorySummary, VerdictLookup, VerdictRecord,
};
