//! Game events and the sequenced event log.
//!
//! The engine never renders text itself. It appends structured
//! `GameEvent`s; presentation layers read them back through the log.

mod log;

pub use log::{EventLog, GameEvent, LogRecord};
