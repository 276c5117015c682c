#![allow(unused_macros)]
//! Diagnostic macros used by the view engine to report on its own behavior.
//!
//! These macros are meant for code that plugs into the engine (views, error
//! handlers, stream resolvers) and not for general application logging. Each
//! record carries a `name` identifying the event and is emitted through
//! [`tracing`](https://crates.io/crates/tracing) with the emitting crate's
//! package name as its target, so a subscriber can filter engine diagnostics
//! independently of application logs.
//!
//! When the calling crate is built without its `internal-logs` feature, the
//! macros compile to nothing and only evaluate their arguments.

/// Emit a debug-level diagnostic.
///
/// # Example:
/// ```rust
/// use opentelemetry_views_api::otel_debug;
/// otel_debug!(name: "View.Created", criteria = "http.*");
/// ```
#[macro_export]
macro_rules! otel_debug {
    (name: $name:expr $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::_private::debug!(name: $name, target: env!("CARGO_PKG_NAME"), name = $name);
        }

        #[cfg(not(feature = "internal-logs"))]
        {
            let _ = $name;
        }
    };
    (name: $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::_private::debug!(
                name: $name,
                target: env!("CARGO_PKG_NAME"),
                name = $name,
                $($key = { $value }),+
            );
        }

        #[cfg(not(feature = "internal-logs"))]
        {
            let _ = ($name, $($value),+);
        }
    };
}

/// Emit a warning-level diagnostic.
///
/// # Example:
/// ```rust
/// use opentelemetry_views_api::otel_warn;
/// otel_warn!(name: "StreamResolver.DuplicateStreamName", stream_name = "requests");
/// ```
#[macro_export]
macro_rules! otel_warn {
    (name: $name:expr $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::_private::warn!(name: $name, target: env!("CARGO_PKG_NAME"), name = $name);
        }

        #[cfg(not(feature = "internal-logs"))]
        {
            let _ = $name;
        }
    };
    (name: $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::_private::warn!(
                name: $name,
                target: env!("CARGO_PKG_NAME"),
                name = $name,
                $($key = { $value }),+
            );
        }

        #[cfg(not(feature = "internal-logs"))]
        {
            let _ = ($name, $($value),+);
        }
    };
}

/// Emit an error-level diagnostic.
///
/// # Example:
/// ```rust
/// use opentelemetry_views_api::otel_error;
/// otel_error!(name: "View.InvalidAggregation", error = "non-monotonic boundaries");
/// ```
#[macro_export]
macro_rules! otel_error {
    (name: $name:expr $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::_private::error!(name: $name, target: env!("CARGO_PKG_NAME"), name = $name);
        }

        #[cfg(not(feature = "internal-logs"))]
        {
            let _ = $name;
        }
    };
    (name: $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::_private::error!(
                name: $name,
                target: env!("CARGO_PKG_NAME"),
                name = $name,
                $($key = { $value }),+
            );
        }

        #[cfg(not(feature = "internal-logs"))]
        {
            let _ = ($name, $($value),+);
        }
    };
}
