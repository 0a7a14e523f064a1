//! Async client for the LearnHub backend REST API.
//!
//! The backend speaks JSON over HTTPS and wraps every response in a
//! `{ success, message, data }` envelope. This crate owns the transport
//! mechanics only:
//!
//! - **[`ApiClient`]** — URL construction, bearer-token auth, envelope
//!   unwrapping. Endpoint groups (orders, catalog, live classes) are
//!   implemented as inherent methods in separate files to keep the client
//!   module focused on transport.
//! - **[`Session`]** — explicit session object handed in by the caller.
//!   The crate never reads tokens from the environment or any ambient
//!   store.
//! - **Wire types** ([`models`]) — DTOs matching the backend JSON exactly,
//!   duck-typed reference fields included. Normalization into domain types
//!   happens downstream in `learnhub-core`.
//!
//! No retry policy is implemented: each call is a single request, and
//! callers apply last-response-wins semantics to whatever arrives.

pub mod client;
pub mod error;
pub mod models;
pub mod session;
pub mod transport;

mod catalog;
mod live;
mod orders;

pub use client::ApiClient;
pub use error::Error;
pub use models::{
    Envelope, IdRef, RawCombo, RawComboDoc, RawComboRef, RawCourse, RawLiveClass, RawOrder,
};
pub use session::Session;
pub use transport::TransportConfig;
