use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read input file {}: {source}", .path.display())]
    ReadInput { path: PathBuf, source: io::Error },
    #[error("cannot write output file {}: {source}", .path.display())]
    WriteOutput { path: PathBuf, source: io::Error },
    #[error("output file {} is the input file", .0.display())]
    OutputIsInput(PathBuf),
    #[error("cannot list directory {}: {source}", .path.display())]
    ListDirectory { path: PathBuf, source: io::Error },
    #[error("no markdown files found in {}", .0.display())]
    NoMarkdownFiles(PathBuf),
    #[error("no input file given and stdin is not a terminal; use --input")]
    NotInteractive,
    #[error("prompt cancelled")]
    PromptCancelled,
    #[error("prompt failed: {0}")]
    Prompt(io::Error),
    #[error("embedded asset {0} is missing")]
    MissingAsset(&'static str),
    #[error("embedded asset {0} is not valid UTF-8")]
    InvalidAsset(&'static str),
    #[error("cannot read theme {}: {source}", .path.display())]
    ThemeRead { path: PathBuf, source: io::Error },
    #[error("cannot parse theme: {0}")]
    ThemeParse(#[from] toml::de::Error),
    #[error("invalid theme variable {name:?}: {reason}")]
    Theme { name: String, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
