//! Curved, credit-weighted GPA reports.
//!
//! [`grading::calculate_gpa`] computes a [`grading::Report`] in one pass;
//! [`grading::GpaCalculator`] does the same work step by step. Both give
//! identical reports for any input.

pub mod grading;
pub mod output;
pub mod record;
