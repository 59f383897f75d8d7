//! termkit CLI
//!
//! Interactive prompt demos and a Python venv bootstrap.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use humansize::{BINARY, format_size};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use termkit::demo::{self, HOLY_HAND_GRENADE};
use termkit::select::select;
use termkit::style::{STYLE_ERROR, STYLE_OUTPUT, STYLE_PROMPT};
use termkit::term::{ConsoleTerminal, Terminal};
use termkit::types::{CleanReport, OutputFormat, Platform, SelectConfig, SetupAction, VenvConfig};
use termkit::venv::{clean, execute, plan, prepare};

#[derive(Parser)]
#[command(name = "termkit")]
#[command(about = "Terminal prompts, menus and a Python venv bootstrap")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk through colors, prompts, keystrokes and menus
    Demo,

    /// Pick one entry from a numbered menu and print it
    Select {
        /// Menu entries (default: a demo list)
        items: Vec<String>,

        /// Line shown above the menu
        #[arg(long, default_value = "")]
        title: String,

        /// Index prompt text
        #[arg(long, default_value = "Select")]
        prompt: String,
    },

    /// Manage the project's Python virtual environment
    Venv {
        #[command(subcommand)]
        command: VenvCommand,
    },
}

#[derive(Subcommand)]
enum VenvCommand {
    /// Create or refresh the venv from requirements.in
    Setup(VenvArgs),

    /// Print the commands setup would run, without running them
    Plan {
        #[command(flatten)]
        args: VenvArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Remove the venv, build output and bytecode caches
    Clean(VenvArgs),
}

#[derive(Args)]
struct VenvArgs {
    /// Project directory
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Python interpreter
    #[arg(long, default_value = "python")]
    python: String,

    /// Virtual environment directory, relative to the project
    #[arg(long, default_value = "venv")]
    venv: PathBuf,
}

impl From<VenvArgs> for VenvConfig {
    fn from(args: VenvArgs) -> Self {
        Self {
            root: args.root,
            venv_dir: args.venv,
            python: args.python,
            ..Default::default()
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Demo => cmd_demo(),
        Commands::Select { items, title, prompt } => cmd_select(items, title, prompt),
        Commands::Venv { command } => match command {
            VenvCommand::Setup(args) => cmd_venv_setup(args.into()),
            VenvCommand::Plan { args, format } => cmd_venv_plan(args.into(), format.into()),
            VenvCommand::Clean(args) => cmd_venv_clean(args.into()),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = format!("Error: {}", e);
            if std::io::stderr().is_terminal() {
                eprintln!("{}", STYLE_ERROR.apply(&message));
            } else {
                eprintln!("{}", message);
            }
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr, quiet unless RUST_LOG asks for more.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // Ignore the error: a subscriber may already be installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// ============================================================================
// PROGRESS HELPERS
// ============================================================================

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn describe_clean(report: &CleanReport) -> String {
    let mut summary = format!(
        "Removed {} paths ({})",
        report.removed.len(),
        format_size(report.bytes_freed, BINARY)
    );
    if !report.failed.is_empty() {
        summary.push_str(&format!(", {} failed", report.failed.len()));
    }
    summary
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_demo() -> Result<(), String> {
    let mut term = ConsoleTerminal::new();
    demo::run(&mut term).map_err(|e| e.to_string())
}

fn cmd_select(items: Vec<String>, title: String, prompt: String) -> Result<(), String> {
    let items: Vec<String> = if items.is_empty() {
        HOLY_HAND_GRENADE.iter().map(|s| s.to_string()).collect()
    } else {
        items
    };

    let config = SelectConfig {
        title,
        prompt,
        ..Default::default()
    };

    let mut term = ConsoleTerminal::new();
    match select(&mut term, &items, &config).map_err(|e| e.to_string())? {
        Some(index) => {
            term.write_styled(&items[index], &STYLE_OUTPUT, true)
                .map_err(|e| e.to_string())?;
            Ok(())
        }
        None => Err("nothing selected".to_string()),
    }
}

fn cmd_venv_setup(config: VenvConfig) -> Result<(), String> {
    let mut term = ConsoleTerminal::new();
    let say = |term: &mut ConsoleTerminal, text: &str| {
        term.write_styled(text, &STYLE_OUTPUT, true).map_err(|e| e.to_string())
    };

    match prepare(&config).map_err(|e| e.to_string())? {
        SetupAction::CreatedManifest => say(
            &mut term,
            &format!("Created empty {}", config.requirements_in.display()),
        )?,
        SetupAction::Refreshed(report) => say(
            &mut term,
            &format!(
                "{} changed; {}",
                config.requirements_in.display(),
                describe_clean(&report)
            ),
        )?,
        SetupAction::Reused => {}
    }

    let setup_plan = plan(&config, Platform::current());
    for step in &setup_plan.steps {
        term.write_styled(&format!("$ {}", step), &STYLE_PROMPT, true)
            .map_err(|e| e.to_string())?;
    }

    execute(&setup_plan, &config.root).map_err(|e| e.to_string())?;
    say(
        &mut term,
        &format!("Wrote {}", config.requirements_txt.display()),
    )
}

fn cmd_venv_plan(config: VenvConfig, format: OutputFormat) -> Result<(), String> {
    let setup_plan = plan(&config, Platform::current());

    match format {
        OutputFormat::Human => {
            for step in &setup_plan.steps {
                println!("{}", step);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&setup_plan).map_err(|e| e.to_string())?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn cmd_venv_clean(config: VenvConfig) -> Result<(), String> {
    let sp = spinner(&format!("Cleaning {}...", config.root.display()));

    match clean(&config) {
        Ok(report) => {
            sp.finish_with_message(describe_clean(&report));
            for path in &report.removed {
                println!("  {}", path.display());
            }
            for (path, error) in &report.failed {
                eprintln!("  Failed: {} - {}", path.display(), error);
            }
            if report.failed.is_empty() {
                Ok(())
            } else {
                Err(format!("{} paths could not be removed", report.failed.len()))
            }
        }
        Err(e) => {
            sp.finish_and_clear();
            Err(e.to_string())
        }
    }
}
