//! Process-wide helpers shared by the engine crates.

mod internal_logging;
