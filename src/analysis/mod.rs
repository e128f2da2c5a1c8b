//! The questionnaire analysis pipeline.
//!
//! Each operation is an independent function of a [`Dataset`] reference
//! and its parameters, returning a fresh value; none of them mutate the
//! input or hold state across calls.
//!
//! [`Dataset`]: crate::dataset::Dataset

pub mod clean;
pub mod correlate;
pub mod histogram;
pub mod impute;
pub mod score;
pub mod utility;
