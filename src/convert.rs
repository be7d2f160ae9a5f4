//! Read, render, compose, write

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::markdown::{MarkdownRenderer, RenderOptions};
use crate::page::PageTemplate;

/// Outcome of a single successful file conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub input: PathBuf,
    pub output: PathBuf,
    pub bytes_written: usize,
}

/// Default output location: the input path with its extension replaced by
/// (or, without one, extended with) `.html`.
pub fn output_path_for(input: &Path) -> PathBuf {
    input.with_extension("html")
}

pub struct Converter {
    renderer: MarkdownRenderer,
    page: PageTemplate,
}

impl Converter {
    pub fn new(options: RenderOptions, page: PageTemplate) -> Self {
        Self {
            renderer: MarkdownRenderer::new(options),
            page,
        }
    }

    /// Default render options and the built-in page template
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(RenderOptions::default(), PageTemplate::builtin()?))
    }

    pub fn renderer(&self) -> &MarkdownRenderer {
        &self.renderer
    }

    pub fn page(&self) -> &PageTemplate {
        &self.page
    }

    /// Render markdown text into a complete HTML document.
    pub fn convert_str(&self, markdown: &str, title: &str) -> String {
        let fragment = self.renderer.render(markdown);
        self.page.render(&fragment, title)
    }

    /// Convert `input` and write the page to `output`, creating or truncating
    /// it. Nothing is written when the input cannot be read.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<Conversion> {
        let bytes = fs::read(input).map_err(|source| Error::ReadInput {
            path: input.to_path_buf(),
            source,
        })?;
        let markdown = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                log::warn!(
                    "{} is not valid UTF-8, invalid sequences are replaced",
                    input.display()
                );
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        if is_same_file(input, output) {
            return Err(Error::OutputIsInput(output.to_path_buf()));
        }

        let title = input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.display().to_string());
        log::debug!("rendering {} ({} bytes)", input.display(), markdown.len());
        let page = self.convert_str(&markdown, &title);

        write_page(output, &page).map_err(|source| Error::WriteOutput {
            path: output.to_path_buf(),
            source,
        })?;
        log::info!("wrote {} ({} bytes)", output.display(), page.len());

        Ok(Conversion {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            bytes_written: page.len(),
        })
    }
}

fn write_page(path: &Path, page: &str) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(page.as_bytes())?;
    writer.flush()
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
