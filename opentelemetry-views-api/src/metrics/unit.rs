use std::borrow::Cow;
use std::fmt;

/// Units denote underlying data units tracked by instruments.
///
/// Units follow the [UCUM] case-sensitive codes. An empty unit is valid and
/// means the instrument did not declare one.
///
/// [UCUM]: https://ucum.org/ucum
#[derive(Clone, Default, Debug, PartialEq, Eq, Hash)]
pub struct Unit(Cow<'static, str>);

impl Unit {
    /// The standard marker for dimensionless values.
    pub const DIMENSIONLESS: Unit = Unit(Cow::Borrowed("1"));

    /// Bytes.
    pub const BYTES: Unit = Unit(Cow::Borrowed("By"));

    /// Create a new `Unit` from an `Into<Cow<'static, str>>`
    pub fn new<S>(value: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Unit(value.into())
    }

    /// View unit as &str
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }

    /// Returns `true` if no unit was declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for Unit {
    #[inline]
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

impl From<&'static str> for Unit {
    fn from(value: &'static str) -> Self {
        Unit(Cow::Borrowed(value))
    }
}

impl From<String> for Unit {
    fn from(value: String) -> Self {
        Unit(Cow::Owned(value))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
