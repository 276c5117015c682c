use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use opentelemetry_views_api::{metrics::Unit, otel_debug, otel_warn};

use super::instrument::{Instrument, Stream};
use super::view::View;

/// The identifying properties of a resolved stream.
///
/// Two streams with the same id would aggregate and export the same data, so
/// only the first is kept.
#[derive(Debug, PartialEq, Eq, Hash)]
struct StreamId {
    /// Names are case-insensitive ASCII, this is the lower-cased form.
    name: Cow<'static, str>,
    description: Cow<'static, str>,
    unit: Unit,
    aggregation: Option<String>,
}

impl StreamId {
    fn new(stream: &Stream) -> Self {
        let name = if stream.name.chars().any(|c| c.is_ascii_uppercase()) {
            Cow::Owned(stream.name.to_ascii_lowercase())
        } else {
            stream.name.clone()
        };

        StreamId {
            name,
            description: stream.description.clone(),
            unit: stream.unit.clone(),
            aggregation: stream.aggregation.as_ref().map(ToString::to_string),
        }
    }
}

/// Resolves the streams an instrument produces from a list of views.
///
/// Every matching view contributes its stream, in the order the views were
/// given. When no view matches, the instrument produces one stream that keeps
/// its own name, description and unit and leaves the aggregation to the
/// reader.
///
/// # Example
///
/// ```
/// use opentelemetry_views::metrics::{new_view, Instrument, Stream, StreamResolver, View};
/// use std::sync::Arc;
///
/// let renamed: Arc<dyn View> = new_view(Instrument::new().name("db.*"), Stream::new().name("db"))
///     .unwrap()
///     .into();
/// let resolver = StreamResolver::new([renamed]);
///
/// let streams = resolver.resolve(&Instrument::new().name("db.calls"));
/// assert_eq!(streams.len(), 1);
/// assert_eq!(streams[0].name, "db");
///
/// let streams = resolver.resolve(&Instrument::new().name("http.calls"));
/// assert_eq!(streams[0].name, "http.calls");
/// ```
#[derive(Clone, Default)]
pub struct StreamResolver {
    views: Vec<Arc<dyn View>>,
}

impl StreamResolver {
    /// Create a resolver over `views`, consulted in iteration order.
    pub fn new(views: impl IntoIterator<Item = Arc<dyn View>>) -> Self {
        StreamResolver {
            views: views.into_iter().collect(),
        }
    }

    /// Append a view, consulted after the ones already registered.
    pub fn with_view(mut self, view: impl View) -> Self {
        self.views.push(Arc::new(view));
        self
    }

    /// Resolve the streams `inst` produces.
    ///
    /// Duplicate streams are dropped. Streams sharing a name but otherwise
    /// different are all returned and a warning is logged, since exporting
    /// both under one name is likely to conflict downstream.
    pub fn resolve(&self, inst: &Instrument) -> Vec<Stream> {
        let mut streams = Vec::new();
        let mut seen = HashSet::new();
        let mut by_name: HashMap<Cow<'static, str>, usize> = HashMap::new();

        for stream in self.views.iter().filter_map(|v| v.match_inst(inst)) {
            let id = StreamId::new(&stream);
            if seen.contains(&id) {
                otel_debug!(
                    name: "StreamResolver.DuplicateStream",
                    instrument_name = &*inst.name,
                    stream_name = &*stream.name
                );
                continue;
            }

            if let Some(existing) = by_name.get(&id.name) {
                let existing: &Stream = &streams[*existing];
                otel_warn!(
                    name: "StreamResolver.DuplicateStreamName",
                    instrument_name = &*inst.name,
                    stream_name = &*stream.name,
                    existing_description = &*existing.description,
                    duplicate_description = &*stream.description,
                    existing_unit = existing.unit.as_str(),
                    duplicate_unit = stream.unit.as_str()
                );
            } else {
                by_name.insert(id.name.clone(), streams.len());
            }

            seen.insert(id);
            streams.push(stream);
        }

        if streams.is_empty() {
            otel_debug!(
                name: "StreamResolver.DefaultStream",
                instrument_name = &*inst.name
            );
            streams.push(
                Stream::new()
                    .name(inst.name.clone())
                    .description(inst.description.clone())
                    .unit(inst.unit.clone()),
            );
        }

        streams
    }
}

impl fmt::Debug for StreamResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamResolver")
            .field("views", &self.views.len())
            .finish()
    }
}
