use crate::language::{Step, TestCase};

/// Parse bulk test case entry text into a list of test case records.
///
/// Parses this format:
///
/// ```text
/// Test that I can log in
/// When I click the login button
/// Then I am logged in
/// ```
///
/// Every failure is reported as data: the offending record (or a record
/// synthesized for the purpose) carries the message in its `error` field,
/// and records completed before the failure are returned intact. This
/// function never panics and never returns an Err; callers decide what to
/// keep.
pub fn parse_via_states(content: &str) -> Vec<TestCase<'_>> {
    let mut machine = Machine::new();
    let mut state = State::Begin;
    let mut aborted = false;

    for line in preprocess(content) {
        match machine.advance(state, &line.lowered, line.original) {
            Ok(next) => state = next,
            Err(failure) => {
                machine.attach_failure(&failure);
                aborted = true;
                break;
            }
        }
    }

    // Stopping is only legitimate in a state that has seen a complete
    // step; anywhere else the input was cut off mid-record.
    if !aborted && !state.expect_end() {
        machine.attach_failure(&ParsingError::UnexpectedEndOfInput {
            expecting: state.expecting(),
        });
    }

    machine.finish()
}

/// A retained input line in the two views the state machine needs: the
/// lowercased copy is only ever used for keyword matching, the trimmed
/// original is what gets stored.
struct Line<'i> {
    lowered: String,
    original: &'i str,
}

fn preprocess(content: &str) -> Vec<Line<'_>> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| Line {
            lowered: line.to_lowercase(),
            original: line,
        })
        .collect()
}

/// The states of the parser. Each in-progress record and step is addressed
/// by the indices carried in the state value itself, assigned by whichever
/// transition created it, so a transition can only ever touch the record
/// it was handed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State<'i> {
    Begin,
    Description {
        case: usize,
    },
    Instruction {
        case: usize,
        step: usize,
    },
    ExpectedResult {
        case: usize,
        step: usize,
    },
    /// A bare "and" line has been seen; it is held here until the next
    /// line settles whether it opened a new step or continued the
    /// expected result.
    AfterAnd {
        case: usize,
        step: usize,
        pending: &'i str,
    },
}

impl State<'_> {
    /// The keyword prefixes this state is prepared to act on next. These
    /// are only consulted when composing the end-of-input message; the
    /// matching itself happens in advance().
    fn expecting(&self) -> &'static [&'static str] {
        match self {
            State::Begin => &["test that "],
            State::Description { .. } => &["when ", "and when "],
            State::Instruction { .. } => &["then "],
            State::ExpectedResult { .. } => &["test that ", "when "],
            State::AfterAnd { .. } => &["when "],
        }
    }

    /// Whether input may legitimately stop while in this state.
    fn expect_end(&self) -> bool {
        matches!(self, State::ExpectedResult { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParsingError<'i> {
    Structural {
        expected: &'static str,
        line: &'i str,
    },
    UnexpectedEndOfInput {
        expecting: &'static [&'static str],
    },
}

impl ParsingError<'_> {
    fn message(&self) -> String {
        match self {
            ParsingError::Structural { expected, line } => {
                format!("Expected '{}', not '{}'", expected, line)
            }
            ParsingError::UnexpectedEndOfInput { expecting } => {
                let wanted = expecting
                    .iter()
                    .map(|prefix| format!("'{}'", title_case(prefix)))
                    .collect::<Vec<String>>()
                    .join(" or ");
                format!("Unexpected end of input, looking for {}", wanted)
            }
        }
    }
}

/// Capitalize the first letter of each word and lowercase the rest, the
/// way the end-of-input message has always rendered its keyword labels:
/// "test that " becomes "Test That ", trailing space included.
fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut boundary = true;

    for c in text.chars() {
        if c.is_alphabetic() {
            if boundary {
                result.extend(c.to_uppercase());
            } else {
                result.extend(c.to_lowercase());
            }
            boundary = false;
        } else {
            result.push(c);
            boundary = true;
        }
    }

    result
}

#[derive(Debug)]
struct Machine<'i> {
    cases: Vec<CaseDraft<'i>>,
}

/// A record under construction. Multi-line fields are kept as ordered line
/// lists until finish(); nothing is joined while the machine is running.
#[derive(Debug, Default)]
struct CaseDraft<'i> {
    name: Option<&'i str>,
    description: Option<Vec<&'i str>>,
    steps: Vec<StepDraft<'i>>,
    error: Option<String>,
}

#[derive(Debug)]
struct StepDraft<'i> {
    instruction: Vec<&'i str>,
    expected: Option<Vec<&'i str>>,
}

impl<'i> Machine<'i> {
    fn new() -> Machine<'i> {
        Machine { cases: Vec::new() }
    }

    /// Feed one line through the current state. Returns the next state,
    /// possibly having appended a record or step or extended a line list
    /// along the way.
    fn advance(
        &mut self,
        state: State<'i>,
        lowered: &str,
        original: &'i str,
    ) -> Result<State<'i>, ParsingError<'i>> {
        match state {
            State::Begin => {
                if lowered.starts_with("test that ") {
                    Ok(self.open_case(original))
                } else {
                    Err(ParsingError::Structural {
                        expected: "Test that ...",
                        line: original,
                    })
                }
            }
            State::Description { case } => {
                if is_step_introduction(lowered) {
                    // The description becomes real (if empty) the moment
                    // the first step arrives, so a case with no prose
                    // still ends up with an empty description rather
                    // than a missing one.
                    self.cases[case]
                        .description
                        .get_or_insert_with(Vec::new);
                    Ok(self.open_step(case, original))
                } else {
                    self.cases[case]
                        .description
                        .get_or_insert_with(Vec::new)
                        .push(original);
                    Ok(State::Description { case })
                }
            }
            State::Instruction { case, step } => {
                if lowered.starts_with("then ") {
                    self.cases[case].steps[step].expected = Some(vec![original]);
                    Ok(State::ExpectedResult { case, step })
                } else {
                    self.cases[case].steps[step]
                        .instruction
                        .push(original);
                    Ok(State::Instruction { case, step })
                }
            }
            State::ExpectedResult { case, step } => {
                if lowered == "and" {
                    Ok(State::AfterAnd {
                        case,
                        step,
                        pending: original,
                    })
                } else if lowered.starts_with("test that ") {
                    Ok(self.open_case(original))
                } else if is_step_introduction(lowered) {
                    Ok(self.open_step(case, original))
                } else {
                    self.cases[case].steps[step]
                        .expected
                        .get_or_insert_with(Vec::new)
                        .push(original);
                    Ok(State::ExpectedResult { case, step })
                }
            }
            State::AfterAnd {
                case,
                step,
                pending,
            } => {
                if lowered.starts_with("when ") {
                    Ok(self.open_step(case, original))
                } else {
                    // The held "and" turned out to be result text after
                    // all; both lines go to the expected list in input
                    // order.
                    let expected = self.cases[case].steps[step]
                        .expected
                        .get_or_insert_with(Vec::new);
                    expected.push(pending);
                    expected.push(original);
                    Ok(State::ExpectedResult { case, step })
                }
            }
        }
    }

    fn open_case(&mut self, name: &'i str) -> State<'i> {
        self.cases
            .push(CaseDraft {
                name: Some(name),
                ..CaseDraft::default()
            });
        State::Description {
            case: self
                .cases
                .len()
                - 1,
        }
    }

    fn open_step(&mut self, case: usize, instruction: &'i str) -> State<'i> {
        let steps = &mut self.cases[case].steps;
        steps.push(StepDraft {
            instruction: vec![instruction],
            expected: None,
        });
        State::Instruction {
            case,
            step: steps.len() - 1,
        }
    }

    /// Attach a failure message to the parse output. The message lands on
    /// the last record even when that record is itself complete and
    /// valid; callers locate the error by position, so it must not move
    /// onto a record of its own.
    fn attach_failure(&mut self, failure: &ParsingError) {
        if self
            .cases
            .is_empty()
        {
            self.cases
                .push(CaseDraft::default());
        }
        if let Some(last) = self
            .cases
            .last_mut()
        {
            last.error = Some(failure.message());
        }
    }

    fn finish(self) -> Vec<TestCase<'i>> {
        self.cases
            .into_iter()
            .map(CaseDraft::finish)
            .collect()
    }
}

fn is_step_introduction(lowered: &str) -> bool {
    lowered.starts_with("when ") || lowered.starts_with("and when ")
}

impl<'i> CaseDraft<'i> {
    /// Collapse the accumulated line lists into final strings. Joining an
    /// empty list yields an empty string.
    fn finish(self) -> TestCase<'i> {
        TestCase {
            name: self.name,
            description: self
                .description
                .map(|lines| lines.join("\n")),
            steps: self
                .steps
                .into_iter()
                .map(StepDraft::finish)
                .collect(),
            error: self.error,
        }
    }
}

impl StepDraft<'_> {
    fn finish(self) -> Step {
        Step {
            instruction: self
                .instruction
                .join("\n"),
            expected: self
                .expected
                .map(|lines| lines.join("\n")),
        }
    }
}
