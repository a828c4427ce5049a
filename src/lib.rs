//! skuboard — terminal dashboard for reviewing underperforming SKUs.
//!
//! An agent endpoint ranks the worst-performing SKUs; its free-text reply is
//! repaired into rows, decorated, shown in a selectable table and shared
//! with a read-only view through a small key/value store. Comments on a
//! selection are forwarded to a second agent that sends a notification.
//!
//! # Architecture
//!
//! ```text
//! agent ──► normalizer ──► decorate ──► Dashboard ──► store ──► view
//!   ▲                                      │
//!   └──────────── comment ◄────────────────┘
//! ```
//!
//! The member crates are re-exported so integration tests and benches can
//! reach every layer from one place.

pub mod cli;

pub use skuboard_agent;
pub use skuboard_core;
pub use skuboard_tui;
