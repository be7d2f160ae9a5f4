//! Standalone HTML page composition
//!
//! Wraps a rendered markdown fragment into a full HTML5 document with the
//! theme palette, the embedded stylesheet, a dark-mode toggle and copy buttons
//! on code blocks.

mod assets;
mod theme;

use std::io::{self, Write};

use crate::error::Result;

pub use theme::{Theme, ThemeVariable};

const HLJS_CDN: &str = "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.9.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    pub(crate) syntax_highlighting: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            syntax_highlighting: true,
        }
    }
}

impl PageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference highlight.js and its github stylesheets from cdnjs
    pub fn with_syntax_highlighting(mut self, enable: bool) -> Self {
        self.syntax_highlighting = enable;
        self
    }

    pub fn syntax_highlighting(&self) -> bool {
        self.syntax_highlighting
    }
}

pub struct PageTemplate {
    theme: Theme,
    options: PageOptions,
    stylesheet: String,
    script: String,
}

impl PageTemplate {
    pub fn load(theme: Theme, options: PageOptions) -> Result<Self> {
        Ok(Self {
            theme,
            options,
            stylesheet: assets::load(assets::STYLESHEET)?,
            script: assets::load(assets::SCRIPT)?,
        })
    }

    /// Built-in theme with default options
    pub fn builtin() -> Result<Self> {
        Self::load(Theme::builtin()?, PageOptions::default())
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn options(&self) -> &PageOptions {
        &self.options
    }

    /// Build the complete document. `fragment` is trusted HTML and goes in
    /// verbatim; `title` is escaped.
    pub fn render(&self, fragment: &str, title: &str) -> String {
        let mut page = String::with_capacity(
            fragment.len() + self.stylesheet.len() + self.script.len() + 1024,
        );
        page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        page.push_str("<meta charset=\"UTF-8\">\n");
        page.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        page.push_str(&format!(
            "<title>{}</title>\n",
            html_escape::encode_text(title)
        ));
        if self.options.syntax_highlighting {
            page.push_str(&format!(
                "<link rel=\"stylesheet\" id=\"hljs-light\" href=\"{HLJS_CDN}/styles/github.min.css\">\n\
                 <link rel=\"stylesheet\" id=\"hljs-dark\" href=\"{HLJS_CDN}/styles/github-dark.min.css\" disabled>\n\
                 <script src=\"{HLJS_CDN}/highlight.min.js\"></script>\n"
            ));
        }
        page.push_str("<style>\n");
        page.push_str(&self.theme.to_css());
        page.push_str(&self.stylesheet);
        page.push_str("</style>\n</head>\n<body>\n");
        page.push_str("<button id=\"mode-toggle\">Toggle Dark Mode</button>\n");
        page.push_str(fragment);
        page.push_str("<script>\n");
        page.push_str(&self.script);
        page.push_str("</script>\n</body>\n</html>\n");
        page
    }

    pub fn compose(&self, fragment: &str, title: &str, output: &mut dyn Write) -> io::Result<()> {
        output.write_all(self.render(fragment, title).as_bytes())
    }
}
