use std::borrow::Cow;
use std::fmt;

/// The key part of attribute [KeyValue] pairs.
///
/// See the [attribute naming] spec for guidelines.
///
/// [attribute naming]: https://github.com/open-telemetry/semantic-conventions/blob/main/docs/general/attribute-naming.md
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(Cow<'static, str>);

impl Key {
    /// Create a new `Key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use opentelemetry_views_api::Key;
    ///
    /// let key1 = Key::new("my_static_str");
    /// let key2 = Key::new(String::from("my_owned_string"));
    /// assert_ne!(key1, key2);
    /// ```
    pub fn new(value: impl Into<Key>) -> Self {
        value.into()
    }

    /// Create a new const `Key`.
    pub const fn from_static_str(value: &'static str) -> Self {
        Key(Cow::Borrowed(value))
    }

    /// Returns a reference to the underlying key name
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }
}

impl From<&'static str> for Key {
    fn from(key_str: &'static str) -> Self {
        Key(Cow::Borrowed(key_str))
    }
}

impl From<String> for Key {
    fn from(string: String) -> Self {
        Key(Cow::Owned(string))
    }
}

impl From<Cow<'static, str>> for Key {
    fn from(string: Cow<'static, str>) -> Self {
        Key(string)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(fmt)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.as_str())
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// The value part of attribute [KeyValue] pairs.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// bool values
    Bool(bool),
    /// i64 values
    I64(i64),
    /// f64 values
    F64(f64),
    /// String values
    String(Cow<'static, str>),
}

impl Value {
    /// String representation of the `Value`
    ///
    /// This will allocate iff the underlying value is not a `String`.
    pub fn as_str(&self) -> Cow<'_, str> {
        match self {
            Value::Bool(v) => v.to_string().into(),
            Value::I64(v) => v.to_string().into(),
            Value::F64(v) => v.to_string().into(),
            Value::String(v) => Cow::Borrowed(v.as_ref()),
        }
    }
}

macro_rules! from_values {
    ($(($t:ty, $val:expr);)+) => {
        $(
            impl From<$t> for Value {
                fn from(t: $t) -> Self {
                    $val(t)
                }
            }
        )+
    }
}

from_values!(
    (bool, Value::Bool);
    (i64, Value::I64);
    (f64, Value::F64);
    (Cow<'static, str>, Value::String);
);

impl From<&'static str> for Value {
    fn from(s: &'static str) -> Self {
        Value::String(Cow::Borrowed(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Cow::Owned(s))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(&self.as_str())
    }
}

/// A key-value pair describing an attribute.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct KeyValue {
    /// The attribute name
    pub key: Key,

    /// The attribute value
    pub value: Value,
}

impl KeyValue {
    /// Create a new `KeyValue` pair.
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<Key>,
        V: Into<Value>,
    {
        KeyValue {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_value_equality_covers_key_and_value() {
        let a = KeyValue::new("key", "val");
        assert_eq!(a, KeyValue::new(String::from("key"), String::from("val")));
        assert_ne!(a, KeyValue::new("key", "other val"));
        assert_ne!(a, KeyValue::new("other", "val"));
    }

    #[test]
    fn const_keys_equal_runtime_keys() {
        const KEY: Key = Key::from_static_str("http.method");
        assert_eq!(KEY, Key::new("http.method"));
        assert_eq!(KEY, Key::new(String::from("http.method")));
        assert_eq!(KEY.as_str(), "http.method");
    }

    #[test]
    fn value_as_str() {
        assert_eq!(Value::from(true).as_str(), "true");
        assert_eq!(Value::from(42_i64).as_str(), "42");
        assert_eq!(Value::from(1.5_f64).as_str(), "1.5");
        assert_eq!(Value::from("text").as_str(), "text");
    }
}
