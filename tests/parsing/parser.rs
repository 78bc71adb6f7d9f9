#[cfg(test)]
mod verify {
    use bulkcase::language::{Step, TestCase};
    use bulkcase::parsing::parser::parse_via_states;

    fn trim(s: &str) -> &str {
        s.strip_prefix('\n')
            .unwrap_or(s)
    }

    #[test]
    fn single_well_formed_case() {
        let cases = parse_via_states(trim(
            r#"
Test that I can log in
When I click the login button
Then I am logged in
            "#,
        ));

        assert_eq!(
            cases,
            vec![TestCase {
                name: Some("Test that I can log in"),
                description: Some("".to_string()),
                steps: vec![Step {
                    instruction: "When I click the login button".to_string(),
                    expected: Some("Then I am logged in".to_string()),
                }],
                error: None,
            }]
        );
    }

    #[test]
    fn description_lines_joined_in_order() {
        let cases = parse_via_states(trim(
            r#"
Test that cart totals update
This case covers the Cart page.
It assumes an Existing account.
When I add an item
Then the total updates
            "#,
        ));

        assert_eq!(
            cases[0].description,
            Some("This case covers the Cart page.\nIt assumes an Existing account.".to_string())
        );
        assert_eq!(cases[0].name, Some("Test that cart totals update"));
    }

    #[test]
    fn instruction_continuation_lines() {
        let cases = parse_via_states(trim(
            r#"
Test that uploads work
When I pick a file
and drag it onto the page
Then the file appears
            "#,
        ));

        assert_eq!(
            cases[0].steps,
            vec![Step {
                instruction: "When I pick a file\nand drag it onto the page".to_string(),
                expected: Some("Then the file appears".to_string()),
            }]
        );
    }

    #[test]
    fn expected_result_continuation_lines() {
        let cases = parse_via_states(trim(
            r#"
Test that errors are shown
When I submit an empty form
Then a message appears
next to every required field
            "#,
        ));

        assert_eq!(
            cases[0].steps[0].expected,
            Some("Then a message appears\nnext to every required field".to_string())
        );
    }

    #[test]
    fn bare_and_line_extends_expected_result() {
        let cases = parse_via_states(trim(
            r#"
Test that alerts show
When I break something
Then an alert appears
And
it stays on screen
            "#,
        ));

        // the "And" was continuation text, so it is kept, in input order
        assert_eq!(
            cases[0].steps,
            vec![Step {
                instruction: "When I break something".to_string(),
                expected: Some("Then an alert appears\nAnd\nit stays on screen".to_string()),
            }]
        );
    }

    #[test]
    fn bare_and_line_before_a_step_is_discarded() {
        let cases = parse_via_states(trim(
            r#"
Test that alerts clear
When I break something
Then an alert appears
And
When I fix it
Then the alert clears
            "#,
        ));

        // the "And" introduced a new step, so the line itself vanishes
        assert_eq!(
            cases[0].steps,
            vec![
                Step {
                    instruction: "When I break something".to_string(),
                    expected: Some("Then an alert appears".to_string()),
                },
                Step {
                    instruction: "When I fix it".to_string(),
                    expected: Some("Then the alert clears".to_string()),
                },
            ]
        );
    }

    #[test]
    fn and_when_opens_a_subsequent_step() {
        let cases = parse_via_states(trim(
            r#"
Test that drafts save
When I type a reply
Then a draft is saved
And when I reload the page
Then the draft is still there
            "#,
        ));

        assert_eq!(
            cases[0].steps,
            vec![
                Step {
                    instruction: "When I type a reply".to_string(),
                    expected: Some("Then a draft is saved".to_string()),
                },
                Step {
                    instruction: "And when I reload the page".to_string(),
                    expected: Some("Then the draft is still there".to_string()),
                },
            ]
        );
    }

    #[test]
    fn header_like_line_mid_case_is_a_continuation() {
        // a new case only opens from the expected-result position; before
        // that, a "Test that" line is ordinary description text
        let cases = parse_via_states(trim(
            r#"
Test that A
Test that B
When x
Then y
            "#,
        ));

        assert_eq!(
            cases
                .len(),
            1
        );
        assert_eq!(cases[0].name, Some("Test that A"));
        assert_eq!(cases[0].description, Some("Test that B".to_string()));
    }

    #[test]
    fn when_line_mid_instruction_is_a_continuation() {
        // a second step only opens from the expected-result position
        let cases = parse_via_states(trim(
            r#"
Test that A
When x
When y, really
Then z
            "#,
        ));

        assert_eq!(
            cases[0].steps,
            vec![Step {
                instruction: "When x\nWhen y, really".to_string(),
                expected: Some("Then z".to_string()),
            }]
        );
    }

    #[test]
    fn multiple_cases_in_one_submission() {
        let cases = parse_via_states(trim(
            r#"
Test that I can log in
When I click the login button
Then I am logged in
Test that I can log out
When I click the logout button
Then I am logged out
            "#,
        ));

        assert_eq!(
            cases,
            vec![
                TestCase {
                    name: Some("Test that I can log in"),
                    description: Some("".to_string()),
                    steps: vec![Step {
                        instruction: "When I click the login button".to_string(),
                        expected: Some("Then I am logged in".to_string()),
                    }],
                    error: None,
                },
                TestCase {
                    name: Some("Test that I can log out"),
                    description: Some("".to_string()),
                    steps: vec![Step {
                        instruction: "When I click the logout button".to_string(),
                        expected: Some("Then I am logged out".to_string()),
                    }],
                    error: None,
                },
            ]
        );
    }

    #[test]
    fn keywords_case_insensitive_content_preserved() {
        let cases = parse_via_states(trim(
            r#"
TEST THAT shouting is allowed
WHEN I Do X
THEN It Happens
            "#,
        ));

        assert_eq!(cases[0].name, Some("TEST THAT shouting is allowed"));
        assert_eq!(
            cases[0].steps,
            vec![Step {
                instruction: "WHEN I Do X".to_string(),
                expected: Some("THEN It Happens".to_string()),
            }]
        );
        assert!(!cases[0].failed());
    }

    #[test]
    fn blank_lines_and_padding_do_not_change_output() {
        let plain = parse_via_states(trim(
            r#"
Test that I can log in
Some context first.
When I click the login button
Then I am logged in
            "#,
        ));

        let padded = parse_via_states(
            "\n\n   Test that I can log in\t\n\n  Some context first.  \n\n\n\tWhen I click the login button\n   \n Then I am logged in \n\n",
        );

        assert_eq!(plain, padded);
    }

    #[test]
    fn parse_entry_point_matches_core() {
        let content = "Test that I can log in\nWhen I click the login button\nThen I am logged in";

        assert_eq!(bulkcase::parsing::parse(content), parse_via_states(content));
    }

    #[test]
    fn serialized_shape_omits_absent_fields() {
        let cases = parse_via_states(trim(
            r#"
Test that I can log in
When I click the login button
Then I am logged in
            "#,
        ));

        let value = serde_json::to_value(&cases).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {
                    "name": "Test that I can log in",
                    "description": "",
                    "steps": [
                        {
                            "instruction": "When I click the login button",
                            "expected": "Then I am logged in"
                        }
                    ]
                }
            ])
        );
    }

    #[test]
    fn serialized_error_record_is_bare() {
        let cases = parse_via_states("Not a test case");

        let value = serde_json::to_value(&cases).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {
                    "error": "Expected 'Test that ...', not 'Not a test case'"
                }
            ])
        );
    }
}
