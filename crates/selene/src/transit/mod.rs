pub mod duration;
pub mod span;

pub use duration::{checked_label_duration, label_duration, DurationLabel, DurationUnit};
pub use span::{TransitBands, TransitPhase, TransitSpan};
