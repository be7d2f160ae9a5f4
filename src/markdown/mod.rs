mod heading_id;
mod options;
mod renderer;

pub use heading_id::{slugify, HeadingIds};
pub use options::RenderOptions;
pub use renderer::MarkdownRenderer;

/// Render markdown with the default extension set and passes.
pub fn render_markdown(markdown: &str) -> String {
    MarkdownRenderer::default().render(markdown)
}
