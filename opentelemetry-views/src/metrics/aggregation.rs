use std::fmt;

use crate::metrics::error::{MetricError, MetricResult};

/// The largest scale a base-2 exponential histogram may be configured with.
pub(crate) const EXPO_MAX_SCALE: i8 = 20;
/// The smallest scale a base-2 exponential histogram may be configured with.
pub(crate) const EXPO_MIN_SCALE: i8 = -10;

/// The way recorded measurements are summarized.
///
/// Views only select and validate an aggregation; the algorithms themselves
/// live with the readers that consume the resolved stream.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Aggregation {
    /// An aggregation that drops all recorded data.
    Drop,

    /// An aggregation that uses the default instrument kind selection mapping to
    /// select another aggregation.
    ///
    /// See [InstrumentKind::default_aggregation] for the mapping.
    ///
    /// [InstrumentKind::default_aggregation]: crate::metrics::InstrumentKind::default_aggregation
    Default,

    /// An aggregation that summarizes a set of measurements as their arithmetic
    /// sum.
    Sum,

    /// An aggregation that summarizes a set of measurements as the last one made.
    LastValue,

    /// An aggregation that summarizes a set of measurements as a histogram with
    /// explicitly defined buckets.
    ExplicitBucketHistogram {
        /// The increasing bucket boundary values.
        ///
        /// Boundary values define bucket upper bounds. Buckets are exclusive of their
        /// lower boundary and inclusive of their upper bound (except at positive
        /// infinity). Boundaries must be finite and strictly increasing.
        boundaries: Vec<f64>,

        /// Indicates whether to record the min and max of the distribution.
        record_min_max: bool,
    },

    /// An aggregation that summarizes a set of measurements as a histogram with
    /// bucket widths that grow exponentially.
    Base2ExponentialHistogram {
        /// The maximum number of buckets to use for the histogram.
        max_size: u32,

        /// The maximum resolution scale to use for the histogram.
        ///
        /// Must lie within `-10..=20`.
        max_scale: i8,

        /// Indicates whether to record the min and max of the distribution.
        record_min_max: bool,
    },
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // used for stream id comparisons
        let name = match self {
            Aggregation::Drop => "Drop",
            Aggregation::Default => "Default",
            Aggregation::Sum => "Sum",
            Aggregation::LastValue => "LastValue",
            Aggregation::ExplicitBucketHistogram { .. } => "ExplicitBucketHistogram",
            Aggregation::Base2ExponentialHistogram { .. } => "Base2ExponentialHistogram",
        };

        f.write_str(name)
    }
}

impl Aggregation {
    /// Validate that this aggregation has correct configuration
    ///
    /// # Errors
    ///
    /// Returns [MetricError::Config] describing the first inconsistency found.
    pub fn validate(&self) -> MetricResult<()> {
        match self {
            Aggregation::Drop
            | Aggregation::Default
            | Aggregation::Sum
            | Aggregation::LastValue => Ok(()),
            Aggregation::ExplicitBucketHistogram { boundaries, .. } => {
                if boundaries.iter().any(|b| !b.is_finite()) {
                    return Err(MetricError::Config(format!(
                        "aggregation: explicit bucket histogram: non-finite boundaries: {boundaries:?}"
                    )));
                }
                if boundaries.windows(2).any(|pair| pair[0] >= pair[1]) {
                    return Err(MetricError::Config(format!(
                        "aggregation: explicit bucket histogram: non-monotonic boundaries: {boundaries:?}"
                    )));
                }

                Ok(())
            }
            Aggregation::Base2ExponentialHistogram {
                max_size,
                max_scale,
                ..
            } => {
                if *max_scale > EXPO_MAX_SCALE {
                    return Err(MetricError::Config(format!(
                        "aggregation: exponential histogram: max scale ({max_scale}) is greater than {EXPO_MAX_SCALE}"
                    )));
                }
                if *max_scale < EXPO_MIN_SCALE {
                    return Err(MetricError::Config(format!(
                        "aggregation: exponential histogram: max scale ({max_scale}) is less than {EXPO_MIN_SCALE}"
                    )));
                }
                if *max_size == 0 {
                    return Err(MetricError::Config(
                        "aggregation: exponential histogram: max size must be greater than 0".into(),
                    ));
                }

                Ok(())
            }
        }
    }
}
