use pulldown_cmark::Options;

/// Markdown renderer options
///
/// The parser extension set is fixed; these switches only control the passes
/// applied on top of the parsed event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub(crate) auto_heading_ids: bool,
    pub(crate) href_target_blank: bool,
    pub(crate) autolink: bool,
    pub(crate) smart_punctuation: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            auto_heading_ids: true,
            href_target_blank: true,
            autolink: true,
            smart_punctuation: true,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive `id` attributes for headings that don't carry an explicit `{#id}`
    pub fn with_auto_heading_ids(mut self, enable: bool) -> Self {
        self.auto_heading_ids = enable;
        self
    }

    /// Open non-relative links in a new tab
    pub fn with_href_target_blank(mut self, enable: bool) -> Self {
        self.href_target_blank = enable;
        self
    }

    /// Turn bare http(s)/ftp URLs in text into links
    pub fn with_autolink(mut self, enable: bool) -> Self {
        self.autolink = enable;
        self
    }

    /// Curly quotes, en/em dashes and ellipses
    pub fn with_smart_punctuation(mut self, enable: bool) -> Self {
        self.smart_punctuation = enable;
        self
    }

    pub fn auto_heading_ids(&self) -> bool {
        self.auto_heading_ids
    }

    pub fn href_target_blank(&self) -> bool {
        self.href_target_blank
    }

    pub fn autolink(&self) -> bool {
        self.autolink
    }

    pub fn smart_punctuation(&self) -> bool {
        self.smart_punctuation
    }

    pub(crate) fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_DEFINITION_LIST);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        if self.smart_punctuation {
            options.insert(Options::ENABLE_SMART_PUNCTUATION);
        }
        options
    }
}
