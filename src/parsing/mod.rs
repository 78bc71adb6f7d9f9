//! parser for the bulk test case entry format

use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::language::{LoadingError, TestCase};

pub mod parser;

/// Read a file and return an owned String. A filename of "-" reads from
/// standard input instead. We pass that ownership back to the caller so
/// that the records created by parse() below can borrow from the content
/// with the same lifetime.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    if filename.to_str() == Some("-") {
        let mut content = String::new();
        return match std::io::stdin().read_to_string(&mut content) {
            Ok(_) => Ok(content),
            Err(error) => {
                debug!(?error);
                Err(LoadingError {
                    problem: "Failed reading standard input".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                })
            }
        };
    }

    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Parse bulk entry text into test case records. Failures never escape as
/// errors or panics; they come back embedded in the records themselves,
/// and every record completed before the failure is returned intact.
pub fn parse(content: &str) -> Vec<TestCase<'_>> {
    let cases = parser::parse_via_states(content);

    debug!(
        "Found {} case{}",
        cases.len(),
        if cases.len() == 1 { "" } else { "s" }
    );

    if let Some(problem) = cases
        .last()
        .and_then(|case| case.error.as_deref())
    {
        debug!("Parse failed: {}", problem);
    }

    cases
}
