//! Types representing parsed bulk test case entries

use serde::Serialize;

/// One test case extracted from a bulk entry submission. Optional fields
/// are omitted when serialized so the output mapping only carries the keys
/// that were actually populated during the parse.
#[derive(Eq, Debug, PartialEq, Serialize)]
pub struct TestCase<'i> {
    /// The whole "Test that ..." line, original casing preserved. Absent
    /// only on a record synthesized to carry an error before any case
    /// header was seen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'i str>,

    /// Free-form lines between the case header and the first step, joined
    /// with newlines. `Some("")` when a step was reached without any
    /// description lines; `None` when parsing never got that far.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Step>,

    /// Terminal error marker. At most one per parse, always on the last
    /// record; no further input was consumed after it was set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// An instruction and, once a "Then ..." line has been seen, the result
/// expected from carrying it out.
#[derive(Eq, Debug, PartialEq, Serialize)]
pub struct Step {
    pub instruction: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
}

impl TestCase<'_> {
    pub fn failed(&self) -> bool {
        self.error
            .is_some()
    }
}
