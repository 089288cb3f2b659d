//! Command-line front end for the authorkit formatting and form engines.

mod config;

use anyhow::{bail, Context};
use authorkit_core::editor::{self, FormatOperation, Formatted, Selection};
use authorkit_core::schema::{seed, FieldDescriptor};
use authorkit_core::workflow::{FormSession, NoticeKind, Notifier, SubmissionSink, SubmitOutcome};
use authorkit_core::{MarkdownAction, ValidationResult, ValueMap};
use clap::{ArgGroup, Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use config::Config;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "authorkit", about = "Authoring toolkit CLI", version)]
struct Cli {
    /// Output in JSON format (can also be set via AUTHORKIT_JSON)
    #[arg(short, long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Apply a formatting operation to a text buffer
    Format(FormatArgs),
    /// Print the starting value map for a form schema
    Seed(FormArgs),
    /// Validate form values against a schema
    Validate(FormArgs),
    /// Validate and print the normalized submission
    Submit(FormArgs),
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("operation")
        .required(true)
        .args(["action", "insert", "wrap", "line_prefix"])
))]
struct FormatArgs {
    /// Read the buffer from a file instead of stdin
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Selection start (char offset)
    #[arg(long, default_value_t = 0)]
    start: usize,
    /// Selection end (char offset); defaults to the start
    #[arg(long)]
    end: Option<usize>,
    /// Toolbar action to apply
    #[arg(short, long, value_enum)]
    action: Option<ActionArg>,
    /// Heading level for `--action heading`
    #[arg(long, default_value_t = 2)]
    level: u8,
    /// Replace the selection with this text
    #[arg(long)]
    insert: Option<String>,
    /// Wrap the selection with a prefix and suffix
    #[arg(long, num_args = 2, value_names = ["PREFIX", "SUFFIX"], allow_hyphen_values = true)]
    wrap: Option<Vec<String>>,
    /// Insert a newline and this prefix at the selection
    #[arg(long, allow_hyphen_values = true)]
    line_prefix: Option<String>,
}

#[derive(Args, Debug)]
struct FormArgs {
    /// JSON array of field descriptors
    #[arg(short, long)]
    schema: PathBuf,
    /// JSON object of field values
    #[arg(short, long)]
    values: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ActionArg {
    Bold,
    Italic,
    Strikethrough,
    Code,
    CodeBlock,
    Link,
    Image,
    Heading,
    Bullet,
    Numbered,
    Quote,
    Rule,
}

impl ActionArg {
    fn to_action(self, level: u8) -> MarkdownAction {
        match self {
            Self::Bold => MarkdownAction::Bold,
            Self::Italic => MarkdownAction::Italic,
            Self::Strikethrough => MarkdownAction::Strikethrough,
            Self::Code => MarkdownAction::InlineCode,
            Self::CodeBlock => MarkdownAction::CodeBlock,
            Self::Link => MarkdownAction::Link,
            Self::Image => MarkdownAction::Image,
            Self::Heading => MarkdownAction::Heading(level),
            Self::Bullet => MarkdownAction::BulletList,
            Self::Numbered => MarkdownAction::NumberedList,
            Self::Quote => MarkdownAction::Quote,
            Self::Rule => MarkdownAction::HorizontalRule,
        }
    }
}

impl FormatArgs {
    fn selection(&self) -> Selection {
        Selection::new(self.start, self.end.unwrap_or(self.start))
    }

    fn operation(&self) -> anyhow::Result<FormatOperation> {
        if let Some(action) = self.action {
            return Ok(action.to_action(self.level).operation());
        }
        if let Some(text) = self.insert.as_ref() {
            return Ok(FormatOperation::InsertText { text: text.clone() });
        }
        if let Some([prefix, suffix]) = self.wrap.as_deref() {
            return Ok(FormatOperation::WrapSelection {
                prefix: prefix.clone(),
                suffix: suffix.clone(),
            });
        }
        if let Some(prefix) = self.line_prefix.as_ref() {
            return Ok(FormatOperation::LinePrefix {
                prefix: prefix.clone(),
            });
        }
        bail!("No formatting operation given")
    }
}

/// Writes accepted submissions as pretty JSON.
struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> SubmissionSink for JsonSink<W> {
    type Error = anyhow::Error;

    fn submit(&mut self, submission: &ValueMap) -> Result<(), Self::Error> {
        let rendered = serde_json::to_string_pretty(submission)?;
        writeln!(self.out, "{}", rendered)?;
        Ok(())
    }
}

/// Routes user-facing notices to the log.
struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, kind: NoticeKind, message: &str) {
        match kind {
            NoticeKind::Success => tracing::info!("{}", message),
            NoticeKind::Error => tracing::warn!("{}", message),
        }
    }
}

fn read_limited<R: Read>(reader: R, limit: usize, source: &str) -> anyhow::Result<String> {
    let mut buffer = String::new();
    reader
        .take((limit as u64).saturating_add(1))
        .read_to_string(&mut buffer)
        .with_context(|| format!("Failed to read {}", source))?;
    if buffer.len() > limit {
        bail!("{} exceeds the {} byte input limit", source, limit);
    }
    Ok(buffer)
}

fn read_input(path: Option<&Path>, limit: usize) -> anyhow::Result<String> {
    match path {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            read_limited(file, limit, &path.display().to_string())
        }
        None => read_limited(io::stdin().lock(), limit, "stdin"),
    }
}

fn load_schema(path: &Path, limit: usize) -> anyhow::Result<Vec<FieldDescriptor>> {
    let raw = read_input(Some(path), limit)?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid schema in {}", path.display()))
}

fn load_values(path: Option<&Path>, limit: usize) -> anyhow::Result<ValueMap> {
    let Some(path) = path else {
        return Ok(ValueMap::new());
    };
    let raw = read_input(Some(path), limit)?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid values in {}", path.display()))
}

fn format_buffer(args: &FormatArgs, buffer: &str) -> anyhow::Result<Formatted> {
    let operation = args.operation()?;
    let formatted = editor::apply(buffer, args.selection(), &operation)?;
    Ok(formatted)
}

fn render_formatted(formatted: &Formatted, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(formatted)?);
    }
    Ok(formatted.buffer.clone())
}

fn render_validation(result: &ValidationResult, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(result)?);
    }
    if result.is_valid {
        return Ok("valid".to_string());
    }
    Ok(result
        .errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n"))
}

fn exit_for(result: &ValidationResult) -> ExitCode {
    if result.is_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run(cli: Cli, config: &Config) -> anyhow::Result<ExitCode> {
    let json = cli.json || config.json;
    let limit = config.max_input_size;
    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "authorkit", &mut io::stdout());
        }
        Commands::Format(args) => {
            let buffer = read_input(args.file.as_deref(), limit)?;
            let formatted = format_buffer(&args, &buffer)?;
            tracing::debug!(
                start = formatted.selection.start,
                end = formatted.selection.end,
                "Formatted buffer"
            );
            print!("{}", render_formatted(&formatted, json)?);
            if json {
                println!();
            } else {
                eprintln!(
                    "selection: {}..{}",
                    formatted.selection.start, formatted.selection.end
                );
            }
        }
        Commands::Seed(args) => {
            let descriptors = load_schema(&args.schema, limit)?;
            let initial = load_values(args.values.as_deref(), limit)?;
            println!("{}", serde_json::to_string_pretty(&seed(&descriptors, &initial))?);
        }
        Commands::Validate(args) => {
            let descriptors = load_schema(&args.schema, limit)?;
            let values = load_values(args.values.as_deref(), limit)?;
            let session = FormSession::new(descriptors, &values)?;
            let result = session.validate();
            println!("{}", render_validation(&result, json)?);
            return Ok(exit_for(&result));
        }
        Commands::Submit(args) => {
            let descriptors = load_schema(&args.schema, limit)?;
            let values = load_values(args.values.as_deref(), limit)?;
            let session = FormSession::new(descriptors, &values)?;
            let mut sink = JsonSink { out: io::stdout() };
            return submit_form(&session, &mut sink, json);
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Submit `session` into `sink`, printing the validation result on rejection.
///
/// # Returns
/// [`ExitCode::FAILURE`] when validation rejects the form, otherwise success.
///
/// # Errors
/// Propagates sink failures and rendering errors.
fn submit_form<W: Write>(
    session: &FormSession,
    sink: &mut JsonSink<W>,
    json: bool,
) -> anyhow::Result<ExitCode> {
    tracing::debug!(fields = session.descriptors().len(), "Submitting form");
    match session.submit(sink, &mut LogNotifier) {
        SubmitOutcome::Submitted(_) => Ok(ExitCode::SUCCESS),
        SubmitOutcome::Rejected(result) => {
            println!("{}", render_validation(&result, json)?);
            Ok(exit_for(&result))
        }
        SubmitOutcome::Failed(err) => Err(err),
    }
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "authorkit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env();
    run(Cli::parse(), &config)
}

#[cfg(test)]
mod tests;
