// Terminal output helpers

pub mod formatters;

pub use formatters::{
    format_bytes, format_clock, format_snapshot, format_temperature, severity_label,
};
