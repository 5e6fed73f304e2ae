mod config;
mod render;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use uncomment_core::{RegexPolicy, StripOptions, scan, strip_comments};

use crate::render::{CommentReport, Format, print_summary, render_annotated, render_comments};

/// Environment variable holding the log filter (e.g. `UNCOMMENT_LOG=debug`).
const LOG_ENV: &str = "UNCOMMENT_LOG";

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "uncomment",
    version,
    about = "Strip comments from JavaScript and other C-family source without touching strings or regular expressions"
)]
struct Cli {
    /// Output mode for reports: "pretty" for terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Strip comments and print the result (or rewrite the file).
    Strip {
        /// Input file. Reads stdin when omitted or `-`.
        file: Option<String>,
        /// Write the stripped output back to the file (in-place).
        #[arg(long, short, conflicts_with = "check")]
        write: bool,
        /// Exit 1 if the file contains removable comments. For CI.
        #[arg(long, conflicts_with = "write")]
        check: bool,
        #[command(flatten)]
        options: OptionArgs,
    },

    /// List the comments found in a file.
    Comments {
        /// Input file. Reads stdin when omitted or `-`.
        file: Option<String>,
        /// Also render the comments underlined in their source context.
        #[arg(long)]
        annotate: bool,
        #[command(flatten)]
        options: OptionArgs,
    },
}

/// Options shared by every command that scans input.
#[derive(Args, Debug)]
struct OptionArgs {
    /// Collapse blank-line runs left by removed comments.
    #[arg(long)]
    remove_empty_lines: bool,
    /// Collapse blank-line runs to a single blank line (wins over
    /// --remove-empty-lines).
    #[arg(long)]
    merge_empty_lines: bool,
    /// How to tell a regular expression from a division.
    #[arg(long, value_enum)]
    regex_policy: Option<PolicyArg>,
    /// Treat backticks as string quotes.
    #[arg(long)]
    backtick_strings: bool,
    /// Path to a JSON (comments allowed) options file. Defaults to
    /// `.uncommentrc.json` in the working directory when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Regular-expression disambiguation policy.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Regex when the previous code character expects an expression.
    TokenContext,
    /// Regex unless the slash is followed by whitespace or `=`.
    Whitespace,
}

impl From<PolicyArg> for RegexPolicy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::TokenContext => RegexPolicy::TokenContext,
            PolicyArg::Whitespace => RegexPolicy::Whitespace,
        }
    }
}

impl OptionArgs {
    /// Layer command-line flags over the config file (or defaults).
    fn resolve(&self) -> Result<StripOptions> {
        let mut options = config::resolve_options(self.config.as_deref())?;
        options.remove_empty_lines |= self.remove_empty_lines;
        options.merge_empty_lines |= self.merge_empty_lines;
        options.backtick_strings |= self.backtick_strings;
        if let Some(policy) = self.regex_policy {
            options.regex_policy = policy.into();
        }
        debug!(?options, "resolved strip options");
        Ok(options)
    }
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let format = Format::resolve_or_detect(cli.output.as_deref());

    match cli.cmd {
        Cmd::Strip {
            file,
            write,
            check,
            options,
        } => cmd_strip(file.as_deref(), write, check, &options.resolve()?, format)?,
        Cmd::Comments {
            file,
            annotate,
            options,
        } => cmd_comments(file.as_deref(), annotate, &options.resolve()?, format)?,
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_strip(
    file: Option<&str>,
    write: bool,
    check: bool,
    options: &StripOptions,
    format: Format,
) -> Result<()> {
    let (input, name) = read_input(file)?;
    let stripped = strip_comments(&input, options);
    let changed = stripped != input;
    info!(
        file = %name,
        policy = options.regex_policy.name(),
        input_bytes = input.len(),
        output_bytes = stripped.len(),
        "stripped comments"
    );

    if check {
        status_message(format, changed, "has comments", "clean", &name)?;
        if changed {
            process::exit(1);
        }
    } else if write {
        let Some(path) = file.filter(|f| *f != "-") else {
            bail!("--write needs a file path; stdin cannot be rewritten");
        };
        if changed {
            fs::write(path, &stripped).with_context(|| format!("failed to write '{path}'"))?;
        }
        status_message(format, changed, "stripped", "unchanged", &name)?;
    } else {
        // Default: the stripped text itself is the output.
        print!("{stripped}");
    }

    Ok(())
}

fn cmd_comments(
    file: Option<&str>,
    annotate: bool,
    options: &StripOptions,
    format: Format,
) -> Result<()> {
    let (input, name) = read_input(file)?;
    let result = scan(&input, options);
    let comments = result.comments();

    let reports: Vec<CommentReport<'_>> = comments
        .iter()
        .map(|c| CommentReport::new(&input, c))
        .collect();
    render_comments(&name, &reports, format)?;

    if format == Format::Pretty {
        if annotate {
            render_annotated(&input, &name, comments);
        }
        print_summary(comments);
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Read the input file, or stdin for `None` / `-`. Returns the text and the
/// name to show in messages.
fn read_input(file: Option<&str>) -> Result<(String, String)> {
    match file {
        Some(path) if path != "-" => {
            let text =
                fs::read_to_string(path).with_context(|| format!("failed to read '{path}'"))?;
            Ok((text, path.to_string()))
        }
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok((text, "<stdin>".to_string()))
        }
    }
}

/// Emit a status message for --check / --write in the appropriate format.
fn status_message(
    format: Format,
    changed: bool,
    if_changed: &str,
    if_unchanged: &str,
    file: &str,
) -> Result<()> {
    let msg = if changed { if_changed } else { if_unchanged };
    match format {
        Format::Json => {
            let out = serde_json::json!({ "status": msg, "file": file, "changed": changed });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            eprintln!("{}: {}", msg, file);
        }
    }
    Ok(())
}
