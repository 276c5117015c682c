use std::borrow::Cow;
use std::hash;

use crate::KeyValue;

/// Information about a library or crate providing instrumentation.
///
/// An instrumentation scope should be named to follow any naming conventions
/// of the instrumented library (e.g. 'middleware' for a web framework).
///
/// Every identifying field may be empty. When a scope is used as part of view
/// selection criteria, an empty field places no constraint on the instrument
/// being matched; `None` and `Some("")` are treated alike.
///
/// See the [instrumentation libraries] spec for more information.
///
/// [instrumentation libraries]: https://github.com/open-telemetry/opentelemetry-specification/blob/v1.9.0/specification/overview.md#instrumentation-libraries
#[derive(Debug, Default, Clone)]
pub struct InstrumentationScope {
    /// The library name.
    name: Cow<'static, str>,

    /// The library version.
    version: Option<Cow<'static, str>>,

    /// [Schema URL] used by this library.
    ///
    /// [Schema URL]: https://github.com/open-telemetry/opentelemetry-specification/blob/v1.9.0/specification/schemas/overview.md#schema-url
    schema_url: Option<Cow<'static, str>>,

    /// Attributes carried with the scope. Not part of its identity.
    attributes: Vec<KeyValue>,
}

// Uniqueness for InstrumentationScope does not depend on attributes
impl Eq for InstrumentationScope {}

impl PartialEq for InstrumentationScope {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.version() == other.version()
            && self.schema_url() == other.schema_url()
    }
}

impl hash::Hash for InstrumentationScope {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.version().hash(state);
        self.schema_url().hash(state);
    }
}

impl InstrumentationScope {
    /// Create a new builder to create an [InstrumentationScope]
    pub fn builder<T: Into<Cow<'static, str>>>(name: T) -> InstrumentationScopeBuilder {
        InstrumentationScopeBuilder {
            name: name.into(),
            version: None,
            schema_url: None,
            attributes: None,
        }
    }

    /// Returns the instrumentation library name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the instrumentation library version, if a non-empty one was set.
    #[inline]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref().filter(|v| !v.is_empty())
    }

    /// Returns the [Schema URL] used by this library, if a non-empty one was set.
    ///
    /// [Schema URL]: https://github.com/open-telemetry/opentelemetry-specification/blob/v1.9.0/specification/schemas/overview.md#schema-url
    #[inline]
    pub fn schema_url(&self) -> Option<&str> {
        self.schema_url.as_deref().filter(|url| !url.is_empty())
    }

    /// Returns the instrumentation scope attributes to associate with emitted telemetry.
    #[inline]
    pub fn attributes(&self) -> impl Iterator<Item = &KeyValue> {
        self.attributes.iter()
    }
}

/// Configuration options for [InstrumentationScope].
///
/// Apart from the name, all other fields are optional.
#[derive(Debug)]
pub struct InstrumentationScopeBuilder {
    name: Cow<'static, str>,
    version: Option<Cow<'static, str>>,
    schema_url: Option<Cow<'static, str>>,
    attributes: Option<Vec<KeyValue>>,
}

impl InstrumentationScopeBuilder {
    /// Configure the version for the instrumentation scope
    ///
    /// # Examples
    ///
    /// ```
    /// let scope = opentelemetry_views_api::InstrumentationScope::builder("my-crate")
    ///     .with_version("v0.1.0")
    ///     .build();
    /// assert_eq!(scope.version(), Some("v0.1.0"));
    /// ```
    pub fn with_version(mut self, version: impl Into<Cow<'static, str>>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Configure the Schema URL for the instrumentation scope
    ///
    /// # Examples
    ///
    /// ```
    /// let scope = opentelemetry_views_api::InstrumentationScope::builder("my-crate")
    ///     .with_schema_url("https://opentelemetry.io/schemas/1.17.0")
    ///     .build();
    /// assert_eq!(scope.schema_url(), Some("https://opentelemetry.io/schemas/1.17.0"));
    /// ```
    pub fn with_schema_url(mut self, schema_url: impl Into<Cow<'static, str>>) -> Self {
        self.schema_url = Some(schema_url.into());
        self
    }

    /// Configure the attributes for the instrumentation scope
    pub fn with_attributes<I>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = KeyValue>,
    {
        self.attributes = Some(attributes.into_iter().collect());
        self
    }

    /// Create a new [InstrumentationScope] from this configuration
    pub fn build(self) -> InstrumentationScope {
        InstrumentationScope {
            name: self.name,
            version: self.version,
            schema_url: self.schema_url,
            attributes: self.attributes.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_read_as_none() {
        let scope = InstrumentationScope::builder("lib")
            .with_version("")
            .with_schema_url("")
            .build();

        assert_eq!(scope.version(), None);
        assert_eq!(scope.schema_url(), None);
        assert_eq!(scope, InstrumentationScope::builder("lib").build());
    }

    #[test]
    fn attributes_do_not_affect_identity() {
        let plain = InstrumentationScope::builder("lib").with_version("1").build();
        let attributed = InstrumentationScope::builder("lib")
            .with_version("1")
            .with_attributes([KeyValue::new("k", "v")])
            .build();

        assert_eq!(plain, attributed);
        assert_eq!(attributed.attributes().count(), 1);
    }

    #[test]
    fn default_scope_is_empty() {
        let scope = InstrumentationScope::default();
        assert_eq!(scope.name(), "");
        assert_eq!(scope.version(), None);
        assert_eq!(scope.schema_url(), None);
    }
}
