//! Types consumed by the OpenTelemetry view resolution engine.
//!
//! This crate holds the values that instrumentation code hands to the engine
//! when it registers an instrument: the attribute model ([`Key`], [`Value`],
//! [`KeyValue`]), the [`InstrumentationScope`] that created the instrument and
//! the [`Unit`](metrics::Unit) it records in. It also provides the
//! `otel_debug!`, `otel_warn!` and `otel_error!` diagnostic macros.
//!
//! ## Crate Feature Flags
//!
//! * `internal-logs`: Enables diagnostic logging via `tracing`. On by default.
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

mod attributes;
mod global;
pub mod metrics;
mod scope;

pub use attributes::{Key, KeyValue, Value};
pub use scope::{InstrumentationScope, InstrumentationScopeBuilder};

#[doc(hidden)]
#[cfg(feature = "internal-logs")]
pub mod _private {
    pub use tracing::{debug, error, warn};
}
