//! Auxiliary reporters that are not part of the simulation model itself.
mod time_trackers;

pub use time_trackers::*;
