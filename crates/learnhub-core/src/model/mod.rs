//! Canonical domain types.
//!
//! Everything here is the normalized form: duck-typed wire shapes,
//! string enums, and raw date strings have already been collapsed by
//! [`crate::convert`] and never leak past this module boundary.

mod combo;
mod course;
mod entity_id;
mod live_class;
mod order;

pub use combo::Combo;
pub use course::Course;
pub use entity_id::EntityId;
pub use live_class::LiveClass;
pub use order::{ComboGrant, Expiry, Order, PaymentStatus, PlanType};
