//! Pick a markdown file from a directory, convert it, optionally open it.
//!
//! Terminal interaction goes through [`Prompter`] and launching the browser
//! through [`Opener`], so the flow runs the same against scripted answers.

use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use dialoguer::{theme::ColorfulTheme, Confirm, Select};

use crate::convert::{output_path_for, Conversion, Converter};
use crate::error::{Error, Result};

pub trait Prompter {
    /// Choose one of `items`, returning its index.
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize>;
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;
}

pub trait Opener {
    /// Open `path` with the platform's default application.
    fn open(&self, path: &Path) -> io::Result<()>;
}

/// Terminal prompts. Esc or `q` cancels.
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    fn ensure_terminal() -> Result<()> {
        if io::stdin().is_terminal() {
            Ok(())
        } else {
            Err(Error::NotInteractive)
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Prompter for DialoguerPrompter {
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize> {
        Self::ensure_terminal()?;
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()
            .map_err(prompt_error)?
            .ok_or(Error::PromptCancelled)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        Self::ensure_terminal()?;
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact_opt()
            .map_err(prompt_error)?
            .ok_or(Error::PromptCancelled)
    }
}

fn prompt_error(err: dialoguer::Error) -> Error {
    let dialoguer::Error::IO(err) = err;
    if err.kind() == io::ErrorKind::Interrupted {
        Error::PromptCancelled
    } else {
        Error::Prompt(err)
    }
}

pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open(&self, path: &Path) -> io::Result<()> {
        open::that(path)
    }
}

/// What an interactive run did
#[derive(Debug)]
pub struct Session {
    pub conversion: Conversion,
    pub opened: bool,
}

/// `.md` files directly inside `dir`, sorted by path.
pub fn list_markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let list_error = |source| Error::ListDirectory {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_error)? {
        let path = entry.map_err(list_error)?.path();
        if path.is_file() && is_markdown(&path) {
            files.push(path);
        }
    }
    files.sort();
    log::debug!("found {} markdown file(s) in {}", files.len(), dir.display());
    Ok(files)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

/// Open `path`, logging instead of failing: the conversion already succeeded.
pub fn open_best_effort(opener: &dyn Opener, path: &Path) -> bool {
    match opener.open(path) {
        Ok(()) => {
            log::info!("opened {}", path.display());
            true
        }
        Err(e) => {
            log::warn!("could not open {}: {}", path.display(), e);
            false
        }
    }
}

pub fn run_interactive(
    converter: &Converter,
    dir: &Path,
    prompter: &mut dyn Prompter,
    opener: &dyn Opener,
) -> Result<Session> {
    let files = list_markdown_files(dir)?;
    if files.is_empty() {
        return Err(Error::NoMarkdownFiles(dir.to_path_buf()));
    }

    let names: Vec<String> = files
        .iter()
        .map(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string())
        })
        .collect();
    let choice = prompter.select("Select a markdown file to convert", &names)?;
    let input = files.get(choice).ok_or_else(|| {
        Error::Prompt(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("selection {} out of range", choice),
        ))
    })?;

    let conversion = converter.convert_file(input, &output_path_for(input))?;

    let opened = if prompter.confirm("Open the result in your browser?", true)? {
        open_best_effort(opener, &conversion.output)
    } else {
        false
    };

    Ok(Session { conversion, opened })
}
