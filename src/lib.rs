//! Parser for the text format for bulk test case entry.
//!
//! Bulk entry text is a loosely structured, line-oriented format:
//!
//! ```text
//! Test that I can log in
//! When I click the login button
//! Then I am logged in
//! ```
//!
//! Pass whole submissions to [`parsing::parse`]. The result is a list of
//! [`language::TestCase`] records; a malformed or truncated submission
//! produces records carrying an `error` message rather than a Rust-level
//! error, so everything parsed before the failure remains available to
//! the caller.

pub mod language;
pub mod parsing;
pub mod problem;
