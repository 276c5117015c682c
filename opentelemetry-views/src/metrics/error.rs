use std::result;

use opentelemetry_views_api::otel_error;
use thiserror::Error;

/// A specialized `Result` type for view operations.
pub type MetricResult<T> = result::Result<T, MetricError>;

/// Errors reported by view construction and evaluation.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MetricError {
    /// Invalid configuration, such as an aggregation that fails its self-check.
    #[error("Config error {0}")]
    Config(String),
    /// The name pattern of a view's criteria could not be compiled.
    #[error("Invalid name pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The selection string as given in the criteria.
        pattern: String,
        /// The rejection reported by the matching engine.
        #[source]
        source: regex::Error,
    },
}

/// Receives the errors a view recovers from instead of returning.
///
/// Views never fail an instrument registration because of a bad override;
/// they hand the error to their handler and carry on with defaults. Any
/// `Fn(MetricError) + Send + Sync` closure is a handler.
pub trait ErrorHandler: Send + Sync {
    /// Handle one recovered error.
    fn handle(&self, err: MetricError);
}

impl<F> ErrorHandler for F
where
    F: Fn(MetricError) + Send + Sync,
{
    fn handle(&self, err: MetricError) {
        self(err)
    }
}

/// The default [ErrorHandler]: emits one error-level diagnostic per error.
///
/// The event name follows the variant: `View.InvalidAggregation` for
/// [MetricError::Config], `View.InvalidPattern` for
/// [MetricError::InvalidPattern].
#[derive(Clone, Copy, Debug, Default)]
pub struct InternalLogHandler;

impl ErrorHandler for InternalLogHandler {
    fn handle(&self, err: MetricError) {
        match &err {
            MetricError::Config(_) => {
                otel_error!(
                    name: "View.InvalidAggregation",
                    message = "Aggregation override discarded, falling back to the reader default.",
                    error = format!("{err}")
                );
            }
            MetricError::InvalidPattern { pattern, .. } => {
                otel_error!(
                    name: "View.InvalidPattern",
                    message = "Instrument name pattern could not be compiled.",
                    pattern = pattern.as_str(),
                    error = format!("{err}")
                );
            }
        }
    }
}
