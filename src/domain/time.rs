//! Tick-to-time projection
//!
//! Tag data fields carry raw tick counts whose physical meaning depends on
//! the instrumented target. The conversion is injected by the caller as an
//! opaque function; the default leaves values as ticks.

/// A scaled time value with its display unit and decimal precision
#[derive(Debug, Clone, PartialEq)]
pub struct TimeValue {
    pub value: f64,
    pub unit: String,
    pub precision: usize,
}

impl TimeValue {
    pub fn format(&self) -> String {
        format!("{:.*} {}", self.precision, self.value, self.unit)
    }
}

/// Caller-supplied conversion from a raw 32-bit tick value to a time value
pub type TickConverter = Box<dyn Fn(u32) -> TimeValue>;

/// Identity conversion: raw ticks, no decimals
pub fn ticks() -> TickConverter {
    Box::new(|t| TimeValue {
        value: t as f64,
        unit: "ticks".to_string(),
        precision: 0,
    })
}

/// Conversion based on a fixed tick rate, e.g. 84 MHz dividing down to
/// seconds
pub fn from_rate(ticks_per_second: f64, unit: &str, precision: usize) -> TickConverter {
    let unit = unit.to_string();
    Box::new(move |t| TimeValue {
        value: t as f64 / ticks_per_second,
        unit: unit.clone(),
        precision,
    })
}
