//! Unit tests for the `authorkit` CLI entrypoint module.

use super::{
    format_buffer, load_schema, load_values, read_limited, render_formatted, render_validation,
    run, submit_form, ActionArg, Cli, Commands, JsonSink,
};
use crate::config::{Config, MAX_INPUT_SIZE_ENV};
use authorkit_core::editor::{FormatOperation, Selection};
use authorkit_core::test_support::{env_lock, EnvGuard};
use authorkit_core::workflow::{FormSession, SubmissionSink};
use authorkit_core::{
    FieldDescriptor, FieldKind, FieldValue, MarkdownAction, ValidationError, ValidationResult,
    ValueMap,
};
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use tempfile::NamedTempFile;

fn format_args(argv: &[&str]) -> super::FormatArgs {
    let mut full = vec!["authorkit", "format"];
    full.extend_from_slice(argv);
    match Cli::try_parse_from(full).expect("parse").command {
        Commands::Format(args) => args,
        other => panic!("unexpected command: {:?}", other),
    }
}

fn temp_json(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

fn exit_label(code: ExitCode) -> String {
    format!("{:?}", code)
}

fn form_cli(command: &str, schema: &NamedTempFile, values: &NamedTempFile) -> Cli {
    let schema_path = schema.path().to_string_lossy().to_string();
    let values_path = values.path().to_string_lossy().to_string();
    Cli::try_parse_from([
        "authorkit",
        command,
        "--schema",
        schema_path.as_str(),
        "--values",
        values_path.as_str(),
    ])
    .expect("parse")
}

#[test]
fn format_requires_exactly_one_operation() {
    assert!(Cli::try_parse_from(["authorkit", "format"]).is_err());
    assert!(Cli::try_parse_from([
        "authorkit", "format", "--action", "bold", "--insert", "x"
    ])
    .is_err());
    assert!(Cli::try_parse_from(["authorkit", "format", "--wrap", "**"]).is_err());
}

#[test]
fn format_args_map_to_operations() {
    let args = format_args(&["--action", "heading", "--level", "3", "--start", "4"]);
    assert_eq!(args.selection(), Selection::caret(4));
    assert_eq!(
        args.operation().expect("operation"),
        MarkdownAction::Heading(3).operation()
    );

    let args = format_args(&["--wrap", "[", "](url)", "--start", "1", "--end", "3"]);
    assert_eq!(args.selection(), Selection::new(1, 3));
    assert_eq!(
        args.operation().expect("operation"),
        FormatOperation::WrapSelection {
            prefix: "[".to_string(),
            suffix: "](url)".to_string()
        }
    );

    let args = format_args(&["--line-prefix", "- "]);
    assert_eq!(
        args.operation().expect("operation"),
        FormatOperation::LinePrefix {
            prefix: "- ".to_string()
        }
    );
}

#[test]
fn action_names_cover_toolbar() {
    assert_eq!(ActionArg::Code.to_action(2), MarkdownAction::InlineCode);
    assert_eq!(ActionArg::Rule.to_action(2), MarkdownAction::HorizontalRule);
    assert_eq!(ActionArg::Heading.to_action(1), MarkdownAction::Heading(1));
}

#[test]
fn format_buffer_applies_operation_and_reports_bad_selection() {
    let args = format_args(&["--action", "bold", "--start", "6", "--end", "11"]);
    let formatted = format_buffer(&args, "hello world").expect("format");
    assert_eq!(render_formatted(&formatted, false).expect("render"), "hello **world**");

    let json = render_formatted(&formatted, true).expect("render");
    let value: serde_json::Value = serde_json::from_str(&json).expect("json");
    assert_eq!(value["selection"]["start"], 8);
    assert_eq!(value["selection"]["end"], 13);

    let args = format_args(&["--insert", "x", "--start", "20"]);
    let err = format_buffer(&args, "short").expect_err("must fail");
    assert!(err.to_string().contains("Invalid selection"), "{}", err);
}

#[test]
fn read_limited_enforces_byte_limit() {
    assert_eq!(
        read_limited("abc".as_bytes(), 3, "input").expect("read"),
        "abc"
    );
    let err = read_limited("abcd".as_bytes(), 3, "input").expect_err("too large");
    assert!(err.to_string().contains("exceeds"), "{}", err);
}

#[test]
fn read_limited_accepts_largest_configured_limit() {
    let _lock = env_lock().lock().expect("env lock");
    let _size = EnvGuard::set(MAX_INPUT_SIZE_ENV, &usize::MAX.to_string());
    let limit = Config::from_env().max_input_size;
    assert_eq!(limit, usize::MAX);
    assert_eq!(
        read_limited("abc".as_bytes(), limit, "stdin").expect("read"),
        "abc"
    );
}

#[test]
fn render_validation_lists_errors_in_order() {
    let result = ValidationResult::from_errors(vec![
        ValidationError::new("name", "Name is required"),
        ValidationError::new("email", "Please enter a valid email address"),
    ]);
    assert_eq!(
        render_validation(&result, false).expect("render"),
        "name: Name is required\nemail: Please enter a valid email address"
    );
    assert_eq!(
        render_validation(&ValidationResult::default(), false).expect("render"),
        "valid"
    );
    let json = render_validation(&result, true).expect("render");
    assert!(json.contains("\"isValid\": false"), "{}", json);
}

#[test]
fn schema_and_values_load_from_files() {
    let schema = temp_json(
        r#"[{"name": "email", "kind": "text", "required": true, "email": true},
            {"name": "tags", "kind": "multiline"}]"#,
    );
    let values = temp_json(r#"{"email": "ada@example.com", "tags": "a\nb"}"#);

    let descriptors = load_schema(schema.path(), 1024).expect("schema");
    assert_eq!(descriptors.len(), 2);
    let loaded = load_values(Some(values.path()), 1024).expect("values");
    assert_eq!(loaded["email"], FieldValue::from("ada@example.com"));
    assert!(load_values(None, 1024).expect("empty").is_empty());

    let broken = temp_json("{not json");
    assert!(load_schema(broken.path(), 1024).is_err());
}

#[test]
fn json_sink_writes_pretty_submission() {
    let mut sink = JsonSink { out: Vec::new() };
    let mut submission = ValueMap::new();
    submission.insert("published".to_string(), FieldValue::Bool(true));
    sink.submit(&submission).expect("submit");
    let written = String::from_utf8(sink.out).expect("utf8");
    assert_eq!(written, "{\n  \"published\": true\n}\n");
}

#[test]
fn run_validate_and_submit_succeed_on_files() {
    let schema = temp_json(r#"[{"name": "title", "kind": "text", "required": true}]"#);
    let values = temp_json(r#"{"title": "Hello"}"#);

    for command in ["validate", "submit", "seed"] {
        let code = run(form_cli(command, &schema, &values), &Config::default()).expect("run");
        assert_eq!(
            exit_label(code),
            exit_label(ExitCode::SUCCESS),
            "command: {}",
            command
        );
    }
}

#[test]
fn run_exits_with_failure_when_required_field_is_missing() {
    let schema = temp_json(r#"[{"name": "title", "kind": "text", "required": true}]"#);
    let values = temp_json(r#"{"title": "  "}"#);

    for command in ["validate", "submit"] {
        let code = run(form_cli(command, &schema, &values), &Config::default())
            .expect("invalid form is not an error");
        assert_eq!(
            exit_label(code),
            exit_label(ExitCode::FAILURE),
            "command: {}",
            command
        );
    }

    let valid = temp_json(r#"{"title": "Hello"}"#);
    let code = run(form_cli("validate", &schema, &valid), &Config::default()).expect("run");
    assert_eq!(exit_label(code), exit_label(ExitCode::SUCCESS));
}

#[test]
fn rejected_submission_writes_nothing_to_sink() {
    let descriptors = vec![FieldDescriptor::new("title", FieldKind::Text).required()];
    let session = FormSession::new(descriptors, &ValueMap::new()).expect("session");
    let mut sink = JsonSink { out: Vec::new() };

    let code = submit_form(&session, &mut sink, true).expect("submit");
    assert_eq!(exit_label(code), exit_label(ExitCode::FAILURE));
    assert!(sink.out.is_empty());

    let mut session = session;
    session.edit("title", "Hello").expect("edit");
    let code = submit_form(&session, &mut sink, true).expect("submit");
    assert_eq!(exit_label(code), exit_label(ExitCode::SUCCESS));
    assert_eq!(
        String::from_utf8(sink.out).expect("utf8"),
        "{\n  \"title\": \"Hello\"\n}\n"
    );
}
