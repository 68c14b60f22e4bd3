//! Answer extraction and comparison.
//!
//! - [`extraction`] isolates a final answer from a free-text response
//! - [`normalize`] strips formatting wrappers before comparison
//! - [`expression`] / [`rational`] provide exact symbolic comparison
//! - [`value`] defines [`AnswerValue`] and the [`equivalent`] comparator
//!
//! The comparator is conservative: answers that look different but are
//! mathematically equal may be judged unequal, but different answers are
//! never judged equal.

pub mod expression;
pub mod extraction;
pub mod normalize;
pub mod rational;
pub mod value;

pub use extraction::{
    ERROR_MARKER, ExtractedAnswer, extract_answers, extract_final_answer, is_error_marker,
};
pub use value::{AnswerValue, answers_equivalent, equivalent};
