pub mod events;
pub mod placement;
pub mod signs;

pub use events::{
    chart_ingresses, chart_seasonal_marker, retrograde_ingress, retrograde_ingress_between, seasonal_marker,
    sign_ingress, SeasonalMarker, SignIngress,
};
pub use placement::Placement;
pub use signs::{degree_in_sign, sign_for, Element, Modality, SignMeta, ZodiacSign, SIGN_SPAN_DEGREES};
