use std::{borrow::Cow, collections::HashSet, fmt, sync::Arc};

use opentelemetry_views_api::{metrics::Unit, InstrumentationScope, Key, KeyValue};

use crate::metrics::aggregation::Aggregation;

/// The identifier of a group of instruments that all perform the same function.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum InstrumentKind {
    /// Identifies a group of instruments that record increasing values synchronously
    /// with the code path they are measuring.
    Counter,
    /// A group of instruments that record increasing and decreasing values
    /// synchronously with the code path they are measuring.
    UpDownCounter,
    /// A group of instruments that record a distribution of values synchronously with
    /// the code path they are measuring.
    Histogram,
    /// A group of instruments that record increasing values in an asynchronous
    /// callback.
    ObservableCounter,
    /// A group of instruments that record increasing and decreasing values in an
    /// asynchronous callback.
    ObservableUpDownCounter,
    /// A group of instruments that record current values in an asynchronous callback.
    ObservableGauge,
}

impl InstrumentKind {
    /// The aggregation a reader falls back to when a stream leaves its
    /// aggregation unset, or sets it to [Aggregation::Default].
    ///
    /// * Counter ⇨ Sum
    /// * Observable Counter ⇨ Sum
    /// * UpDownCounter ⇨ Sum
    /// * Observable UpDownCounter ⇨ Sum
    /// * Observable Gauge ⇨ LastValue
    /// * Histogram ⇨ ExplicitBucketHistogram
    pub fn default_aggregation(&self) -> Aggregation {
        match self {
            InstrumentKind::Counter
            | InstrumentKind::UpDownCounter
            | InstrumentKind::ObservableCounter
            | InstrumentKind::ObservableUpDownCounter => Aggregation::Sum,
            InstrumentKind::ObservableGauge => Aggregation::LastValue,
            InstrumentKind::Histogram => Aggregation::ExplicitBucketHistogram {
                boundaries: vec![
                    0.0, 5.0, 10.0, 25.0, 50.0, 75.0, 100.0, 250.0, 500.0, 750.0, 1000.0, 2500.0,
                    5000.0, 7500.0, 10000.0,
                ],
                record_min_max: true,
            },
        }
    }
}

/// Describes the properties of an instrument at creation.
///
/// The same type serves as the selection criteria of a view. Used as criteria,
/// every empty field (an empty string, `None` kind, empty scope field) matches
/// any value, and a non-empty field requires equality. The criteria name may
/// additionally use the `*` and `?` wildcards.
///
/// # Example
///
/// ```
/// use opentelemetry_views::metrics::{Instrument, InstrumentKind};
///
/// let criteria = Instrument::new()
///     .name("http.server.*")
///     .kind(InstrumentKind::Histogram);
/// ```
#[derive(Clone, Default, Debug, PartialEq)]
#[non_exhaustive]
pub struct Instrument {
    /// The human-readable identifier of the instrument.
    pub name: Cow<'static, str>,
    /// describes the purpose of the instrument.
    pub description: Cow<'static, str>,
    /// The functional group of the instrument.
    pub kind: Option<InstrumentKind>,
    /// Unit is the unit of measurement recorded by the instrument.
    pub unit: Unit,
    /// The instrumentation that created the instrument.
    pub scope: InstrumentationScope,
}

impl Instrument {
    /// Create a new instrument with every field empty.
    pub fn new() -> Self {
        Instrument::default()
    }

    /// Set the instrument name.
    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the instrument description.
    pub fn description(mut self, description: impl Into<Cow<'static, str>>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the instrument kind.
    pub fn kind(mut self, kind: InstrumentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the instrument unit.
    pub fn unit(mut self, unit: impl Into<Unit>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Set the instrument scope.
    pub fn scope(mut self, scope: InstrumentationScope) -> Self {
        self.scope = scope;
        self
    }

    /// `true` if every field is empty. Such criteria select all instruments.
    pub(crate) fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.description.is_empty()
            && self.kind.is_none()
            && self.unit.is_empty()
            && self.scope == InstrumentationScope::default()
    }

    /// Checks every field except the name, which views match separately
    /// because it may carry wildcards.
    pub(crate) fn matches_fields(&self, other: &Instrument) -> bool {
        self.matches_description(other)
            && self.matches_kind(other)
            && self.matches_unit(other)
            && self.matches_scope(other)
    }

    pub(crate) fn matches_description(&self, other: &Instrument) -> bool {
        self.description.is_empty() || self.description == other.description
    }

    pub(crate) fn matches_kind(&self, other: &Instrument) -> bool {
        self.kind.is_none() || self.kind == other.kind
    }

    pub(crate) fn matches_unit(&self, other: &Instrument) -> bool {
        self.unit.is_empty() || self.unit == other.unit
    }

    pub(crate) fn matches_scope(&self, other: &Instrument) -> bool {
        let (want, got) = (&self.scope, &other.scope);
        (want.name().is_empty() || want.name() == got.name())
            && (want.version().is_none() || want.version() == got.version())
            && (want.schema_url().is_none() || want.schema_url() == got.schema_url())
    }
}

/// A predicate deciding which attributes a stream keeps.
pub type Filter = Arc<dyn Fn(&KeyValue) -> bool + Send + Sync>;

/// Describes the stream of data an instrument produces.
///
/// As a view mask, empty strings and `None` mean "keep the instrument's
/// value". As the resolved stream returned by a view, the name, description
/// and unit are concrete, an unset aggregation leaves the choice to the
/// reader and an unset filter keeps every attribute.
///
/// Filters are compared by identity: two streams are equal only if they
/// carry the same filter instance, or none.
#[derive(Default, Clone)]
#[non_exhaustive]
pub struct Stream {
    /// The human-readable identifier of the stream.
    pub name: Cow<'static, str>,
    /// Describes the purpose of the data.
    pub description: Cow<'static, str>,
    /// the unit of measurement recorded.
    pub unit: Unit,
    /// Aggregation the stream uses for an instrument.
    pub aggregation: Option<Aggregation>,
    /// Applied to the attributes of every measurement. Attributes it rejects
    /// are dropped from the stream.
    pub attribute_filter: Option<Filter>,
    /// Maximum number of distinct attribute sets the stream tracks.
    pub cardinality_limit: Option<usize>,
}

impl Stream {
    /// Create a new stream with empty values.
    pub fn new() -> Self {
        Stream::default()
    }

    /// Set the stream name.
    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the stream description.
    pub fn description(mut self, description: impl Into<Cow<'static, str>>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the stream unit.
    pub fn unit(mut self, unit: impl Into<Unit>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Set the stream aggregation.
    ///
    /// The aggregation is validated when a view applies the stream, not here.
    pub fn aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = Some(aggregation);
        self
    }

    /// Set the stream attribute filter.
    pub fn attribute_filter(
        mut self,
        filter: impl Fn(&KeyValue) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.attribute_filter = Some(Arc::new(filter));
        self
    }

    /// Keep only attributes whose key is in `attribute_keys`.
    ///
    /// An empty set drops every attribute.
    pub fn allowed_attribute_keys(self, attribute_keys: impl IntoIterator<Item = Key>) -> Self {
        let allowed: HashSet<Key> = attribute_keys.into_iter().collect();
        self.attribute_filter(move |kv| allowed.contains(&kv.key))
    }

    /// Set the stream cardinality limit.
    pub fn cardinality_limit(mut self, limit: usize) -> Self {
        self.cardinality_limit = Some(limit);
        self
    }
}

impl PartialEq for Stream {
    fn eq(&self, other: &Self) -> bool {
        let same_filter = match (&self.attribute_filter, &other.attribute_filter) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };

        same_filter
            && self.name == other.name
            && self.description == other.description
            && self.unit == other.unit
            && self.aggregation == other.aggregation
            && self.cardinality_limit == other.cardinality_limit
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("unit", &self.unit)
            .field("aggregation", &self.aggregation)
            .field(
                "attribute_filter",
                &self.attribute_filter.as_ref().map(|_| "<filter>"),
            )
            .field("cardinality_limit", &self.cardinality_limit)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA_URL: &str = "https://opentelemetry.io/schemas/1.0.0";

    fn scope(name: &'static str, version: &'static str, url: &'static str) -> InstrumentationScope {
        InstrumentationScope::builder(name)
            .with_version(version)
            .with_schema_url(url)
            .build()
    }

    #[test]
    fn empty_criteria_constrain_nothing() {
        let criteria = Instrument::new();
        assert!(criteria.is_empty());

        let candidate = Instrument::new()
            .description("desc")
            .kind(InstrumentKind::Histogram)
            .unit(Unit::BYTES)
            .scope(scope("lib", "v1", SCHEMA_URL));
        assert!(criteria.matches_fields(&candidate));
        assert!(criteria.matches_fields(&Instrument::new()));
    }

    #[test]
    fn scope_fields_match_independently() {
        let by_version = Instrument::new().scope(scope("", "v0.1.0", ""));
        assert!(by_version.matches_scope(&Instrument::new().scope(scope("any", "v0.1.0", SCHEMA_URL))));
        assert!(!by_version.matches_scope(&Instrument::new().scope(scope("any", "v0.1.1", SCHEMA_URL))));
        assert!(!by_version.matches_scope(&Instrument::new()));

        let by_url = Instrument::new().scope(scope("", "", SCHEMA_URL));
        assert!(by_url.matches_scope(&Instrument::new().scope(scope("", "", SCHEMA_URL))));
        let other_url = format!("{SCHEMA_URL}/path");
        assert!(!by_url.matches_scope(
            &Instrument::new().scope(InstrumentationScope::builder("").with_schema_url(other_url).build())
        ));
    }

    #[test]
    fn kind_requires_exact_equality() {
        let criteria = Instrument::new().kind(InstrumentKind::Counter);
        assert!(criteria.matches_kind(&Instrument::new().kind(InstrumentKind::Counter)));
        assert!(!criteria.matches_kind(&Instrument::new().kind(InstrumentKind::ObservableCounter)));
        assert!(!criteria.matches_kind(&Instrument::new()));
    }

    #[test]
    fn allowed_attribute_keys_filter() {
        let stream = Stream::new().allowed_attribute_keys([Key::new("status")]);
        let filter = stream.attribute_filter.expect("filter set");

        assert!(filter(&KeyValue::new("status", 200_i64)));
        assert!(!filter(&KeyValue::new("method", "GET")));

        let drop_all = Stream::new().allowed_attribute_keys(Vec::<Key>::new());
        let filter = drop_all.attribute_filter.expect("filter set");
        assert!(!filter(&KeyValue::new("status", 200_i64)));
    }

    #[test]
    fn stream_equality_uses_filter_identity() {
        let a = Stream::new().name("s").attribute_filter(|_| true);
        let b = a.clone();
        assert_eq!(a, b);

        let c = Stream::new().name("s").attribute_filter(|_| true);
        assert_ne!(a, c);
        assert_ne!(a, Stream::new().name("s"));
    }

    #[test]
    fn default_aggregation_by_kind() {
        assert_eq!(InstrumentKind::Counter.default_aggregation(), Aggregation::Sum);
        assert_eq!(
            InstrumentKind::ObservableUpDownCounter.default_aggregation(),
            Aggregation::Sum
        );
        assert_eq!(
            InstrumentKind::ObservableGauge.default_aggregation(),
            Aggregation::LastValue
        );
        let histogram = InstrumentKind::Histogram.default_aggregation();
        assert!(matches!(histogram, Aggregation::ExplicitBucketHistogram { .. }));
        assert!(histogram.validate().is_ok());
    }
}
