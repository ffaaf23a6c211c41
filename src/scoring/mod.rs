pub mod engine;
pub mod weights;

pub use engine::{
    assess, AnnotatedRow, Assessment, DISCOUNT_BASELINE, DISCOUNT_MULTIPLIER, FALLBACK_SCORE,
};
pub use weights::{weight_for, DEFAULT_WEIGHT};
