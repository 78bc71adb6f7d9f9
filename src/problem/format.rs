use owo_colors::OwoColorize;
use std::path::Path;

use crate::language::{LoadingError, TestCase};

/// Dig the failure message out of a parse result. The error marker is
/// always on the last record, if anywhere.
pub fn find_failure<'c>(cases: &'c [TestCase]) -> Option<&'c str> {
    cases
        .last()
        .and_then(|case| {
            case.error
                .as_deref()
        })
}

/// Format an embedded parse failure with concise single-line output
pub fn concise_parse_error(filename: &Path, problem: &str) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        filename.to_string_lossy(),
        problem.bold(),
    )
}

/// Format an embedded parse failure along with a note about how much of
/// the submission survived. The parser keeps everything it completed
/// before the failing line, and those cases are still usable.
pub fn full_parse_error(filename: &Path, cases: &[TestCase], problem: &str) -> String {
    let intact = cases
        .iter()
        .filter(|case| !case.failed())
        .count();

    format!(
        "{}\n\n{} complete case{} parsed before the failure.",
        concise_parse_error(filename, problem),
        intact,
        if intact == 1 { " was" } else { "s were" },
    )
}

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error(error: &LoadingError) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        error
            .filename
            .display(),
        error
            .problem
            .bold()
    )
}
