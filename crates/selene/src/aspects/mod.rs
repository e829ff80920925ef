pub mod calculator;
pub mod types;

pub use calculator::{checked_compute_aspect, compute_aspect, AspectCalculator};
pub use types::{
    AspectNature, AspectObjectRef, AspectPair, AspectRelationship, AspectSet, AspectSetKind,
    AspectType, OrbTable,
};
