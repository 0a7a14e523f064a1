//! Domain layer between `learnhub-api` and UI consumers.
//!
//! This crate owns the business logic and reactive data infrastructure
//! for the LearnHub client workspace:
//!
//! - **[`access`]** — the course access resolver: a pure function of a
//!   user's order history deciding `Granted` / `PendingApproval` /
//!   `NotPurchased` for a target course. Fail-closed throughout.
//!
//! - **[`renewal`]** — subscription extension math: true calendar-month
//!   end-date arithmetic next to the 30-day-month remaining-time display
//!   breakdown (intentionally different; see the module docs).
//!
//! - **[`schedule`]** — live-class countdown classification
//!   (`Ended` / `StartingSoon` / `Today` / `Later`).
//!
//! - **[`Portal`]** — central facade: [`connect()`](Portal::connect)
//!   fetches a snapshot and runs background refresh plus the 1 Hz
//!   countdown ticker; [`oneshot()`](Portal::oneshot) is the
//!   fire-and-forget mode for single CLI invocations.
//!
//! - **[`DataStore`]** — reactive cache of backend responses with
//!   last-response-wins overwrite semantics.
//!
//! - **Domain model** ([`model`]) — normalized types ([`Order`],
//!   [`Course`], [`Combo`], [`LiveClass`]) behind [`EntityId`]; all
//!   duck-typed wire shapes collapse in [`convert`] and never escape it.
//!
//! Time never comes from the ambient environment: everything that asks
//! "now" takes it from an injected [`Clock`].

pub mod access;
pub mod clock;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod portal;
pub mod renewal;
pub mod schedule;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use access::{AccessDecision, resolve_access};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::PortalConfig;
pub use error::CoreError;
pub use portal::{ConnectionState, LivePhase, Portal};
pub use renewal::{EXTENSION_MONTHS, ExtensionPreview, RemainingTime};
pub use schedule::SessionPhase;
pub use store::{DataStore, RefreshSnapshot};

// Re-export model types at the crate root for ergonomics.
pub use model::{Combo, ComboGrant, Course, EntityId, Expiry, LiveClass, Order, PaymentStatus, PlanType};

// The session type callers hand into `PortalConfig`.
pub use learnhub_api::Session;
