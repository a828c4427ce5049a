//! skuboard-core — core library for skuboard.
//!
//! This crate holds everything that does not touch the network or the
//! terminal: the payload normalizer, row decoration, the shared key/value
//! store, the dashboard model and configuration.
//!
//! # Pipeline
//!
//! ```text
//! agent reply.text ──► normalizer ──► decorate ──► Dashboard ──► KvStore
//!                                                     │
//!                                                     └──► views
//! ```

pub mod config;
pub mod dashboard;
pub mod decorate;
pub mod normalizer;
pub mod store;
pub mod types;

pub use dashboard::{Dashboard, PanelOptions, SubmitAction, TimeWindow};
pub use decorate::decorate;
pub use normalizer::{decode, normalize, Decoded, DecodeError, Strategy};
pub use store::{FileStore, KvStore, KvStoreExt, MemoryStore, StoreError};
pub use types::{RawAgentPayload, Row, RowStatus};
