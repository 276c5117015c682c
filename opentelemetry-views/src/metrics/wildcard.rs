//! Compilation of instrument name selection strings.
//!
//! A selection string may contain `*` (zero or more characters) and `?`
//! (exactly one character). Everything else is literal and the pattern must
//! account for the whole name. Wildcard patterns are lowered to an anchored,
//! fully escaped [Regex], which matches in time linear to the name length.

use regex::Regex;

use crate::metrics::error::{MetricError, MetricResult};

const WILDCARD_ANY: char = '*';
const WILDCARD_ONE: char = '?';

/// A compiled name selection string.
#[derive(Clone, Debug)]
pub(crate) enum NamePattern {
    /// The pattern is made only of `*`, every name matches.
    Any,
    /// No wildcards, the name must be equal to the pattern.
    Exact(String),
    /// Anchored regular expression equivalent to the wildcard pattern.
    Wildcard(Regex),
}

impl NamePattern {
    /// Compile `pattern` into a matcher.
    ///
    /// Fails only if the regex engine rejects the lowered expression, which
    /// for escaped input happens only when its size limits are exceeded.
    /// Instrument names are far too short to reach those limits.
    pub(crate) fn compile(pattern: &str) -> MetricResult<Self> {
        if !pattern.contains([WILDCARD_ANY, WILDCARD_ONE]) {
            return Ok(NamePattern::Exact(pattern.to_owned()));
        }
        if pattern.chars().all(|c| c == WILDCARD_ANY) {
            return Ok(NamePattern::Any);
        }

        Regex::new(&to_regex(pattern))
            .map(NamePattern::Wildcard)
            .map_err(|source| MetricError::InvalidPattern {
                pattern: pattern.to_owned(),
                source,
            })
    }

    pub(crate) fn matches(&self, name: &str) -> bool {
        match self {
            NamePattern::Any => true,
            NamePattern::Exact(expected) => expected == name,
            NamePattern::Wildcard(re) => re.is_match(name),
        }
    }
}

/// Lower a wildcard pattern to an anchored regular expression.
///
/// Literal runs are escaped, `?` becomes `.` and each run of `*` becomes a
/// single `.*`. `(?s)` lets both wildcards cover line terminators too.
fn to_regex(pattern: &str) -> String {
    let mut re = String::with_capacity(pattern.len() * 2 + 8);
    re.push_str(r"(?s)\A");

    let mut literal_start = 0;
    let mut prev_any = false;
    for (i, c) in pattern.char_indices() {
        if c != WILDCARD_ANY && c != WILDCARD_ONE {
            prev_any = false;
            continue;
        }
        re.push_str(&regex::escape(&pattern[literal_start..i]));
        literal_start = i + c.len_utf8();

        if c == WILDCARD_ONE {
            re.push('.');
            prev_any = false;
        } else if !prev_any {
            re.push_str(".*");
            prev_any = true;
        }
    }
    re.push_str(&regex::escape(&pattern[literal_start..]));
    re.push_str(r"\z");

    re
}
