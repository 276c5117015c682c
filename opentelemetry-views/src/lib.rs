//! # OpenTelemetry Views
//!
//! Views decide, once per instrument registration, whether a user supplied
//! selection matches the instrument and what stream (name, description, unit,
//! aggregation, attribute filter) the instrument's measurements are recorded
//! and exported under.
//!
//! See the [metrics] module for the view types and an example.
//!
//! ## Crate Feature Flags
//!
//! * `internal-logs`: Reports discarded overrides and resolver decisions via
//!   `tracing`. On by default.
#![warn(
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    rust_2018_idioms,
    unreachable_pub,
    unused
)]
#![cfg_attr(docsrs, feature(doc_cfg), deny(rustdoc::broken_intra_doc_links))]

pub mod metrics;
