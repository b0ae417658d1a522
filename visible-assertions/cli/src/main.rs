//! Rendering environment check for visible-assertions.
//!
//! Shows what the library sees in the current process:
//! - whether stdout is an interactive terminal
//! - build tool and IDE detection
//! - the ANSI decision and the rule that made it
//! - terminal dimensions
//!
//! It can also render inline markup and run a short assertion demo.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use clap_complete::engine::{ArgValueCompleter, PathCompleter};
use serde::Serialize;
use visible_assertions::ansi::markup;
use visible_assertions::ansi::segment::green;
use visible_assertions::discovery::detection::dimensions;
use visible_assertions::discovery::overrides::OverrideFlags;
use visible_assertions::matcher::{contains_string, greater_than, is};
use visible_assertions::{AssertConfig, RenderingContext, VisibleAssertions};

const SAMPLE_LINE: &str = "This text will be green if ANSI output is enabled";

/// visible-assertions environment check
#[derive(Parser, Debug)]
#[command(name = "va")]
#[command(author, version, about = "Show how visible-assertions will render here")]
#[command(after_help = "\
SHELL COMPLETIONS:
    # Dynamic (completes config file paths)
    echo 'source <(COMPLETE=bash va)' >> ~/.bashrc

    # Static
    va --completions zsh > ~/.zfunc/_va
")]
struct Args {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Load settings from a YAML config file
    #[arg(long, value_name = "PATH", global = true, add = ArgValueCompleter::new(config_completer()))]
    config: Option<PathBuf>,

    /// Generate shell completions and exit.
    ///
    /// Outputs completion scripts for the specified shell to stdout.
    #[arg(long, value_name = "SHELL")]
    completions: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render inline style markup
    ///
    /// Examples:
    ///   va render "@|green ok|@ and @|red,bold not ok|@"
    ///   va render --plain "@|yellow hint|@"
    Render {
        /// Never emit escape sequences
        #[arg(long, conflicts_with = "ansi")]
        plain: bool,

        /// Always emit escape sequences
        #[arg(long)]
        ansi: bool,

        /// Markup to render (multiple values are joined with spaces)
        #[arg(value_name = "MARKUP", required = true)]
        markup: Vec<String>,
    },

    /// Run a short scripted assertion demo
    Demo,
}

#[derive(Debug, Serialize)]
struct CapabilityReport {
    is_tty: bool,
    is_under_build_tool: bool,
    is_under_ide: bool,
    ansi_enabled: bool,
    decided_by: &'static str,
    overrides: OverrideFlags,
    width: u16,
    height: u16,
}

#[derive(Debug, Serialize)]
struct RenderOutput {
    markup: String,
    ansi: bool,
    rendered: String,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    clap_complete::CompleteEnv::with_factory(Args::command).complete();

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let args = Args::parse();

    if let Some(ref shell_arg) = args.completions {
        return handle_completions(shell_arg);
    }

    let config = match args.config.as_deref() {
        Some(path) => AssertConfig::from_path(path)?,
        None => AssertConfig::default(),
    };
    let ctx = Arc::new(RenderingContext::from_config(&config));

    match args.command {
        Some(Command::Render {
            plain,
            ansi,
            markup: ref parts,
        }) => render(&ctx, plain, ansi, &parts.join(" "), args.json),
        Some(Command::Demo) => {
            let va = VisibleAssertions::new(ctx).with_equality_hint(config.equality_hint);
            run_demo(&va)
        }
        None => {
            let report = collect_report(&ctx);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&ctx, &report);
            }
            Ok(())
        }
    }
}

fn collect_report(ctx: &RenderingContext) -> CapabilityReport {
    let signal = ctx.signal();
    let (ansi_enabled, reason) = ctx.decision();
    let (_, height) = dimensions();
    CapabilityReport {
        is_tty: signal.is_interactive_terminal,
        is_under_build_tool: signal.is_under_build_tool,
        is_under_ide: signal.is_under_ide,
        ansi_enabled,
        decided_by: reason.name(),
        overrides: ctx.overrides(),
        width: ctx.terminal_width(),
        height,
    }
}

fn print_report(ctx: &Arc<RenderingContext>, report: &CapabilityReport) {
    let va = VisibleAssertions::new(ctx.clone());
    va.info(&format!("is_tty: {}", report.is_tty));
    va.info(&format!("is_under_build_tool: {}", report.is_under_build_tool));
    va.info(&format!("is_under_ide: {}", report.is_under_ide));
    va.info(&format!(
        "ansi_enabled: {} (decided by {})",
        report.ansi_enabled, report.decided_by
    ));
    va.info(&format!("dimensions: {}x{}", report.width, report.height));
    ctx.write_line(&ctx.render(&green(SAMPLE_LINE)));
}

fn render(
    ctx: &RenderingContext,
    plain: bool,
    ansi: bool,
    source: &str,
    json: bool,
) -> color_eyre::Result<()> {
    let ansi = if plain {
        false
    } else if ansi {
        true
    } else {
        ctx.ansi_enabled()
    };
    let rendered = markup::render(source, ansi)?;

    if json {
        let output = RenderOutput {
            markup: source.to_string(),
            ansi,
            rendered,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{rendered}");
    }
    Ok(())
}

fn run_demo(va: &VisibleAssertions) -> color_eyre::Result<()> {
    va.context("visible-assertions demo");
    va.info("Assertions print a line whether they pass or fail");

    va.context_indented("passing checks", 2);
    va.assert_true("two plus two is four", 2 + 2 == 4)?;
    va.assert_equals("names match", "ferris", "ferris")?;
    va.assert_null("nothing here", None::<&str>)?;
    va.assert_that("the greeting", "hello world", contains_string("world"))?;
    va.assert_that("the answer", 42, is(greater_than(41)))?;
    va.assert_throws::<std::num::ParseIntError, _, _>("words are not numbers", || {
        "seven".parse::<i32>()
    })?;

    va.context_indented("a failing check", 2);
    if let Err(err) = va.assert_equals("greeting matches", "hello", "goodbye") {
        va.warn(&format!("failure returned to the caller as: {err}"));
    }

    Ok(())
}

fn handle_completions(shell_arg: &str) -> color_eyre::Result<()> {
    let shell = match shell_arg.to_lowercase().as_str() {
        "bash" => Shell::Bash,
        "elvish" => Shell::Elvish,
        "fish" => Shell::Fish,
        "powershell" | "pwsh" => Shell::PowerShell,
        "zsh" => Shell::Zsh,
        _ => {
            eprintln!(
                "error: invalid shell '{shell_arg}'\n\nValid shells: bash, elvish, fish, powershell, zsh"
            );
            std::process::exit(1);
        }
    };

    let mut cmd = Args::command();
    clap_complete::generate(shell, &mut cmd, "va", &mut std::io::stdout());
    Ok(())
}

/// Completes YAML files and directories.
fn config_completer() -> PathCompleter {
    PathCompleter::any().filter(|path| {
        if path.is_dir() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| matches!(ext.to_lowercase().as_str(), "yaml" | "yml"))
    })
}
