//! Metric types shared between instrumentation and the view engine.

mod unit;

pub use unit::Unit;
