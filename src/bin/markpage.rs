//! markpage - Convert a markdown file to a standalone HTML page
//!
//! Usage:
//!   markpage -i notes.md
//!   markpage -i notes.md -o site/index.html --open
//!   markpage                      (pick a .md file from the current directory)

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser as ClapParser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

use markpage::convert::{output_path_for, Converter};
use markpage::interactive::{self, DialoguerPrompter, SystemOpener};
use markpage::markdown::RenderOptions;
use markpage::page::{PageOptions, PageTemplate, Theme};

#[derive(ClapParser)]
#[command(
    version,
    about = "Convert a markdown file to a standalone HTML page",
    long_about = "Converts a markdown file to a single HTML page with a light/dark theme toggle,\n\
                  copy buttons on code blocks and syntax highlighting.\n\n\
                  Without --input, lists the markdown files of the current directory,\n\
                  asks which one to convert and whether to open the result."
)]
struct Cli {
    /// Input markdown file (prompts for one in the current directory if not specified)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output html file (defaults to the input path with an .html extension)
    #[arg(short, long, value_name = "OUTPUT", requires = "input")]
    output: Option<PathBuf>,

    /// TOML theme file overriding the built-in light/dark palette
    #[arg(short, long, value_name = "THEME")]
    theme: Option<PathBuf>,

    /// Open the result in the default browser
    #[arg(long, requires = "input")]
    open: bool,

    /// Leave out the highlight.js references so the page needs no network
    #[arg(long)]
    offline: bool,

    /// debug log file
    #[arg(short, long, value_name = "FILE")]
    debuglogfile: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn init_logger(filter_level: log::LevelFilter, logfile: Option<&PathBuf>) -> anyhow::Result<()> {
    let mut loggers = vec![simplelog::TermLogger::new(
        filter_level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) as Box<dyn simplelog::SharedLogger>];
    if let Some(filename) = logfile {
        let file = File::create(filename)
            .with_context(|| format!("cannot create log file {}", filename.display()))?;
        loggers.push(simplelog::WriteLogger::new(
            filter_level,
            simplelog::Config::default(),
            file,
        ));
    }
    simplelog::CombinedLogger::init(loggers)?;
    Ok(())
}

fn build_converter(args: &Cli) -> anyhow::Result<Converter> {
    let mut theme = Theme::builtin()?;
    if let Some(path) = &args.theme {
        theme = theme.merge(Theme::from_file(path)?);
        log::debug!("theme overrides loaded from {}", path.display());
    }
    let options = PageOptions::new().with_syntax_highlighting(!args.offline);
    let page = PageTemplate::load(theme, options)?;
    Ok(Converter::new(RenderOptions::default(), page))
}

fn run(args: &Cli) -> anyhow::Result<PathBuf> {
    let converter = build_converter(args)?;

    match &args.input {
        Some(input) => {
            let output = args
                .output
                .clone()
                .unwrap_or_else(|| output_path_for(input));
            let conversion = converter.convert_file(input, &output)?;
            if args.open {
                interactive::open_best_effort(&SystemOpener, &conversion.output);
            }
            Ok(conversion.output)
        }
        None => {
            let dir = std::env::current_dir()
                .map_err(|e| anyhow::anyhow!("cannot determine the current directory: {e}"))?;
            let mut prompter = DialoguerPrompter::default();
            let session =
                interactive::run_interactive(&converter, &dir, &mut prompter, &SystemOpener)?;
            Ok(session.conversion.output)
        }
    }
}

fn main() -> ExitCode {
    let args = Cli::parse();
    if let Err(e) = init_logger(args.verbose.log_level_filter(), args.debuglogfile.as_ref()) {
        eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(output) => {
            println!("Conversion complete. Output written to {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
