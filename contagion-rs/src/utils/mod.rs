//! Small helpers used by drivers and reporters.
mod ascii_plot;

pub use ascii_plot::*;
