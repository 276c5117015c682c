//! Instrument-to-stream view resolution.
//!
//! A view pairs selection criteria, given as an [Instrument] whose empty
//! fields match anything, with a [Stream] mask whose non-empty fields
//! override what a matching instrument would otherwise produce.
//!
//! ### Example
//!
//! ```
//! use opentelemetry_views::metrics::{Aggregation, CriteriaView, Instrument, InstrumentKind, Stream};
//! use opentelemetry_views_api::Key;
//!
//! // Export every histogram from the HTTP server with coarser buckets, keeping
//! // only the status code attribute.
//! let view = CriteriaView::new(
//!     Instrument::new()
//!         .name("http.server.*")
//!         .kind(InstrumentKind::Histogram),
//!     Stream::new()
//!         .aggregation(Aggregation::ExplicitBucketHistogram {
//!             boundaries: vec![0.1, 0.5, 1.0, 5.0],
//!             record_min_max: false,
//!         })
//!         .allowed_attribute_keys([Key::new("http.response.status_code")]),
//! )
//! .unwrap();
//!
//! let instrument = Instrument::new()
//!     .name("http.server.request.duration")
//!     .kind(InstrumentKind::Histogram)
//!     .unit("s");
//!
//! let (stream, matched) = view.evaluate(&instrument);
//! assert!(matched);
//! assert_eq!(stream.name, "http.server.request.duration");
//! assert_eq!(stream.unit.as_str(), "s");
//! assert!(stream.attribute_filter.is_some());
//! ```

pub(crate) mod aggregation;
mod error;
pub(crate) mod instrument;
mod resolver;
pub(crate) mod view;
mod wildcard;

pub use aggregation::Aggregation;
pub use error::{ErrorHandler, InternalLogHandler, MetricError, MetricResult};
pub use instrument::{Filter, Instrument, InstrumentKind, Stream};
pub use resolver::StreamResolver;
pub use view::{new_view, AggregationValidation, CriteriaView, View, ViewBuilder};
