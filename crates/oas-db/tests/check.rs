use oas_db::{CheckConfig, Diagnostic, File, Severity, UnrecognizedMode, check_file};

#[derive(Debug, PartialEq, Eq)]
struct ExpectedDiag {
    line: usize,
    severity: Severity,
    message: String,
}

#[derive(Debug, PartialEq, Eq)]
struct ActualDiag {
    line: usize,
    severity: Severity,
    message: String,
}

fn parse_expectations(fixture: &str) -> Vec<ExpectedDiag> {
    let mut expected = Vec::new();

    for (idx, line) in fixture.lines().enumerate() {
        let Some((_, comment)) = line.split_once("//~") else {
            continue;
        };
        let comment = comment.trim();
        let (severity, message) = if let Some(message) = comment.strip_prefix("WARNING") {
            (Severity::Warning, message)
        } else {
            (Severity::Error, comment.strip_prefix("ERROR").unwrap_or(comment))
        };
        let message = message.trim();
        if message.is_empty() {
            continue;
        }
        expected.push(ExpectedDiag { line: idx + 1, severity, message: message.to_owned() });
    }

    expected
}

fn collect_actual(file: &File, diagnostics: &[Diagnostic]) -> Vec<ActualDiag> {
    let line_index = file.line_index();
    let mut actual = diagnostics
        .iter()
        .map(|diag| {
            let line = line_index.line_col(diag.range().start()).line as usize + 1;
            ActualDiag { line, severity: diag.severity(), message: diag.message().to_owned() }
        })
        .collect::<Vec<_>>();
    actual.sort_by_key(|diag| (diag.line, diag.message.clone()));
    actual
}

#[track_caller]
fn check_with(fixture: &str, config: &CheckConfig) {
    let file = File::new("check.json", fixture);

    let diagnostics = check_file(&file, config);
    let mut actual = collect_actual(&file, &diagnostics);
    let mut expected = parse_expectations(fixture);

    expected.sort_by_key(|diag| (diag.line, diag.message.clone()));

    assert_eq!(
        expected.len(),
        actual.len(),
        "expected {} diagnostic(s), got {}\nexpected: {expected:#?}\nactual: {actual:#?}",
        expected.len(),
        actual.len(),
    );

    for expected_diag in expected {
        let Some(pos) = actual.iter().position(|diag| {
            diag.line == expected_diag.line
                && diag.severity == expected_diag.severity
                && diag.message.contains(&expected_diag.message)
        }) else {
            panic!(
                "missing diagnostic on line {} containing `{}`\nactual: {actual:#?}",
                expected_diag.line, expected_diag.message
            );
        };
        actual.remove(pos);
    }

    assert!(actual.is_empty(), "unexpected diagnostics:\n{actual:#?}");
}

#[track_caller]
fn check(fixture: &str) {
    check_with(fixture, &CheckConfig::default());
}

#[test]
fn clean_document() {
    check(
        r#"
{
  "openapi": "3.1.0",
  "info": {"title": "Pets", "version": "1"},
  "paths": {"/pets": {"get": {"responses": {"200": {"description": "ok"}}}}}
}
"#,
    );
}

#[test]
fn missing_version_is_reported_once() {
    check(
        r#"
{ //~ ERROR document has no `openapi` version field
  "swagger": "2.0",
  "paths": {"/pets": {"get": {}}}
}
"#,
    );
}

#[test]
fn unsupported_version_points_at_the_value() {
    check(
        r#"
{
  "openapi": "2.0", //~ ERROR unsupported OpenAPI version `2.0`
  "info": {}
}
"#,
    );
}

#[test]
fn version_must_be_a_string() {
    check(
        r#"
{
  "openapi": 3.1 //~ ERROR `openapi` version field must be a string
}
"#,
    );
}

#[test]
fn non_mapping_root_is_not_recognized() {
    check(
        r#"
[1, 2] //~ ERROR document has no `openapi` version field
"#,
    );
}

#[test]
fn duplicate_keys_are_warned() {
    check(
        r#"
{
  "openapi": "3.0.3",
  "info": {"title": "a"},
  "info": {"title": "b"}, //~ WARNING duplicate key `info`
  "paths": {
    "/a": {},
    "/a": {} //~ WARNING duplicate key `/a`
  }
}
"#,
    );
}

#[test]
fn duplicate_keys_can_be_disabled() {
    let config = CheckConfig { duplicate_keys: false, ..CheckConfig::default() };
    check_with(
        r#"
{
  "openapi": "3.0.3",
  "tags": [],
  "tags": []
}
"#,
        &config,
    );
}

#[test]
fn unrecognized_documents_skip_generic_checks_by_default() {
    check(
        r#"
{ //~ ERROR document has no `openapi` version field
  "a": 1,
  "a": 2
}
"#,
    );
}

#[test]
fn unrecognized_documents_can_run_generic_checks() {
    let config =
        CheckConfig { unrecognized: UnrecognizedMode::AllGenericChecks, ..CheckConfig::default() };
    check_with(
        r#"
{ //~ ERROR document has no `openapi` version field
  "a": 1,
  "a": 2 //~ WARNING duplicate key `a`
}
"#,
        &config,
    );
}

#[test]
fn syntax_errors_stop_checking() {
    check(
        r#"
{
  "openapi": "3.1.0",
  "info": tru //~ ERROR expected a value, found `tru`
}
"#,
    );
}

#[test]
fn wrong_shapes_are_not_errors() {
    check(
        r#"
{
  "openapi": "3.0.0",
  "info": "not an object",
  "paths": {"pets": []},
  "x-anything": {"deep": [null]}
}
"#,
    );
}
