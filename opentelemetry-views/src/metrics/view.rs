use std::fmt;
use std::sync::{Arc, OnceLock};

use opentelemetry_views_api::otel_debug;

use super::aggregation::Aggregation;
use super::error::{ErrorHandler, InternalLogHandler, MetricResult};
use super::instrument::{Instrument, Stream};
use super::wildcard::NamePattern;

/// Decides which stream, if any, an instrument produces.
///
/// A [StreamResolver] asks each of its views in turn. [CriteriaView] covers
/// the declarative case: select instruments by name pattern, kind, unit or
/// scope and rename them, swap their aggregation or restrict their
/// attributes. Anything more dynamic can be written as a closure.
///
/// [StreamResolver]: super::StreamResolver
///
/// # Example Custom View
///
/// View is implemented for all `Fn(&Instrument) -> Option<Stream>`.
///
/// ```
/// use opentelemetry_views::metrics::{Instrument, Stream, StreamResolver, View};
/// use std::sync::Arc;
///
/// // return streams for the given instrument
/// let my_view = |i: &Instrument| {
///     (i.name == "latency").then(|| Stream::new().name("request.latency"))
/// };
///
/// let resolver = StreamResolver::new([Arc::new(my_view) as Arc<dyn View>]);
/// let streams = resolver.resolve(&Instrument::new().name("latency"));
/// assert_eq!(streams[0].name, "request.latency");
/// ```
pub trait View: Send + Sync + 'static {
    /// Defines how data should be collected for certain instruments.
    ///
    /// Return [Stream] to use for matching [Instrument]s,
    /// otherwise if there is no match, return `None`.
    fn match_inst(&self, inst: &Instrument) -> Option<Stream>;
}

impl<T> View for T
where
    T: Fn(&Instrument) -> Option<Stream> + Send + Sync + 'static,
{
    fn match_inst(&self, inst: &Instrument) -> Option<Stream> {
        self(inst)
    }
}

/// When a view checks the aggregation override of its mask.
///
/// Validation never happens at construction. Bad overrides are reported to
/// the view's [ErrorHandler] and dropped from the resolved stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AggregationValidation {
    /// Validate on every matching evaluation, reporting every failure.
    #[default]
    EveryMatch,
    /// Validate on the first matching evaluation and reuse the outcome, so a
    /// failure is reported once per view.
    FirstMatch,
}

/// Configuration for a [CriteriaView].
pub struct ViewBuilder {
    criteria: Instrument,
    mask: Stream,
    error_handler: Option<Arc<dyn ErrorHandler>>,
    validation: AggregationValidation,
}

impl ViewBuilder {
    /// Send recovered errors to `handler` instead of the internal log.
    pub fn with_error_handler(mut self, handler: impl ErrorHandler + 'static) -> Self {
        self.error_handler = Some(Arc::new(handler));
        self
    }

    /// Choose when the mask's aggregation is validated.
    pub fn with_aggregation_validation(mut self, validation: AggregationValidation) -> Self {
        self.validation = validation;
        self
    }

    /// Compile the criteria and build the view.
    ///
    /// # Errors
    ///
    /// Returns [MetricError::InvalidPattern] if the criteria name cannot be
    /// compiled.
    ///
    /// [MetricError::InvalidPattern]: super::MetricError::InvalidPattern
    pub fn build(self) -> MetricResult<CriteriaView> {
        let name = if self.criteria.name.is_empty() {
            None
        } else {
            Some(NamePattern::compile(&self.criteria.name)?)
        };

        otel_debug!(
            name: "View.Created",
            criteria_name = &*self.criteria.name,
            select_all = self.criteria.is_empty()
        );

        Ok(CriteriaView {
            criteria: self.criteria,
            name,
            mask: self.mask,
            error_handler: self
                .error_handler
                .unwrap_or_else(|| Arc::new(InternalLogHandler)),
            validation: self.validation,
            validated: OnceLock::new(),
        })
    }
}

impl fmt::Debug for ViewBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewBuilder")
            .field("criteria", &self.criteria)
            .field("mask", &self.mask)
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

/// A view selecting instruments by criteria and rewriting them with a mask.
///
/// The criteria and mask are fixed at construction. Evaluation does not
/// mutate them, so one view can be shared across threads and evaluated
/// concurrently.
///
/// # Example
///
/// ```
/// use opentelemetry_views::metrics::{Aggregation, CriteriaView, Instrument, Stream};
///
/// let view = CriteriaView::new(
///     Instrument::new().name("http.*"),
///     Stream::new().aggregation(Aggregation::Sum),
/// )
/// .unwrap();
///
/// let (stream, matched) = view.evaluate(&Instrument::new().name("http.requests"));
/// assert!(matched);
/// assert_eq!(stream.name, "http.requests");
/// assert_eq!(stream.aggregation, Some(Aggregation::Sum));
/// ```
#[derive(Clone)]
pub struct CriteriaView {
    criteria: Instrument,
    /// `None` when the criteria leave the name empty.
    name: Option<NamePattern>,
    mask: Stream,
    error_handler: Arc<dyn ErrorHandler>,
    validation: AggregationValidation,
    validated: OnceLock<Option<Aggregation>>,
}

impl CriteriaView {
    /// Build a view with the default configuration.
    ///
    /// # Errors
    ///
    /// See [ViewBuilder::build].
    pub fn new(criteria: Instrument, mask: Stream) -> MetricResult<Self> {
        Self::builder(criteria, mask).build()
    }

    /// Start configuring a view.
    pub fn builder(criteria: Instrument, mask: Stream) -> ViewBuilder {
        ViewBuilder {
            criteria,
            mask,
            error_handler: None,
            validation: AggregationValidation::default(),
        }
    }

    /// The selection criteria.
    pub fn criteria(&self) -> &Instrument {
        &self.criteria
    }

    /// The stream mask.
    pub fn mask(&self) -> &Stream {
        &self.mask
    }

    /// Match `inst` against the criteria and, if it matches, resolve its stream.
    ///
    /// A non-matching instrument yields the zero-value stream and `false`;
    /// the mask is not consulted and nothing is reported.
    pub fn evaluate(&self, inst: &Instrument) -> (Stream, bool) {
        if !self.matches(inst) {
            return (Stream::default(), false);
        }
        (self.apply(inst), true)
    }

    fn matches(&self, inst: &Instrument) -> bool {
        self.name
            .as_ref()
            .map_or(true, |pattern| pattern.matches(&inst.name))
            && self.criteria.matches_fields(inst)
    }

    /// Overlay the mask onto the stream the instrument would produce by default.
    fn apply(&self, inst: &Instrument) -> Stream {
        Stream {
            name: if self.mask.name.is_empty() {
                inst.name.clone()
            } else {
                self.mask.name.clone()
            },
            description: if self.mask.description.is_empty() {
                inst.description.clone()
            } else {
                self.mask.description.clone()
            },
            unit: if self.mask.unit.is_empty() {
                inst.unit.clone()
            } else {
                self.mask.unit.clone()
            },
            aggregation: self
                .mask
                .aggregation
                .as_ref()
                .and_then(|agg| self.checked_aggregation(agg)),
            attribute_filter: self.mask.attribute_filter.clone(),
            cardinality_limit: self.mask.cardinality_limit,
        }
    }

    fn checked_aggregation(&self, agg: &Aggregation) -> Option<Aggregation> {
        match self.validation {
            AggregationValidation::EveryMatch => validate_aggregation(agg, &*self.error_handler),
            AggregationValidation::FirstMatch => self
                .validated
                .get_or_init(|| validate_aggregation(agg, &*self.error_handler))
                .clone(),
        }
    }
}

impl View for CriteriaView {
    fn match_inst(&self, inst: &Instrument) -> Option<Stream> {
        let (stream, matched) = self.evaluate(inst);
        matched.then_some(stream)
    }
}

impl fmt::Debug for CriteriaView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CriteriaView")
            .field("criteria", &self.criteria)
            .field("mask", &self.mask)
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

/// Returns a copy of `agg` if its self-check passes. Otherwise the error goes
/// to `handler` and no aggregation is returned.
pub(crate) fn validate_aggregation(
    agg: &Aggregation,
    handler: &dyn ErrorHandler,
) -> Option<Aggregation> {
    match agg.validate() {
        Ok(()) => Some(agg.clone()),
        Err(err) => {
            handler.handle(err);
            None
        }
    }
}

/// Creates a [View] that applies the [Stream] mask for all instruments that
/// match criteria.
///
/// The returned [View] will only apply the mask if all non-empty fields of
/// criteria match the corresponding [Instrument] passed to the view. If all
/// fields of the criteria are their default values, a view that matches all
/// instruments is returned.
///
/// The [Instrument::name] criteria field may contain the wildcards `*`, which
/// matches zero or more characters, and `?`, which matches exactly one.
///
/// The non-empty fields of mask override the defaults the instrument would
/// otherwise produce. An invalid [Aggregation] in the mask is reported through
/// the internal log each time it is applied and left unset on the result.
///
/// # Errors
///
/// See [ViewBuilder::build].
///
/// # Example
///
/// ```
/// use opentelemetry_views::metrics::{new_view, Instrument, Stream};
///
/// let criteria = Instrument::new().name("counter_*");
/// let mask = Stream::new().name("counter_renamed");
///
/// let view = new_view(criteria, mask).unwrap();
/// let stream = view.match_inst(&Instrument::new().name("counter_a")).unwrap();
/// assert_eq!(stream.name, "counter_renamed");
/// ```
pub fn new_view(criteria: Instrument, mask: Stream) -> MetricResult<Box<dyn View>> {
    Ok(Box::new(CriteriaView::new(criteria, mask)?))
}
