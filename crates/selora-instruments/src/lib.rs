//! selora-instruments
//!
//! Screening instrument definitions and the question bank that serves
//! them. Pure data — no storage dependency. Defines the questions,
//! options, scoring rules, and score-range interpretations for each
//! built-in instrument, plus per-language text variants.

pub mod bank;
pub mod error;
pub mod instruments;

pub use bank::QuestionBank;
