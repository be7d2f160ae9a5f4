//! Tests for markdown to HTML fragment rendering
//!
//! Covers heading ids, code block preservation, links and the block/inline
//! extensions that are enabled by default.

use markpage::markdown::{render_markdown, MarkdownRenderer, RenderOptions};

fn render(md: &str) -> String {
    render_markdown(md)
}

// =============================================================================
// End-to-end
// =============================================================================

#[test]
fn test_hello_world() {
    let html = render("# Hello\n\nWorld");
    let heading = html.find("<h1 id=\"hello\">Hello</h1>").expect("heading with id");
    let paragraph = html.find("<p>World</p>").expect("paragraph");
    assert!(heading < paragraph);
}

#[test]
fn test_rendering_is_deterministic() {
    let md = "# A\n\n## A\n\nSome *text* with https://example.com and `code`.\n\n\
              | a | b |\n|---|---|\n| 1 | 2 |\n\n```rust\nfn main() {}\n```\n";
    let first = render(md);
    for _ in 0..5 {
        assert_eq!(render(md), first);
    }
}

#[test]
fn test_malformed_input_is_tolerated() {
    let html = render("**unclosed *emphasis\n\n```\nnever closed");
    assert!(html.contains("unclosed"));
    assert!(html.contains("never closed"));
}

// =============================================================================
// Heading ids
// =============================================================================

mod headings {
    use super::*;

    #[test]
    fn test_every_level_gets_an_id() {
        let html = render("# One\n## Two\n### Three\n#### Four\n##### Five\n###### Six");
        assert!(html.contains("<h1 id=\"one\">One</h1>"));
        assert!(html.contains("<h2 id=\"two\">Two</h2>"));
        assert!(html.contains("<h3 id=\"three\">Three</h3>"));
        assert!(html.contains("<h4 id=\"four\">Four</h4>"));
        assert!(html.contains("<h5 id=\"five\">Five</h5>"));
        assert!(html.contains("<h6 id=\"six\">Six</h6>"));
    }

    #[test]
    fn test_setext_heading() {
        let html = render("Getting Started\n===============\n");
        assert!(html.contains("<h1 id=\"getting-started\">Getting Started</h1>"));
    }

    #[test]
    fn test_id_from_inline_markup() {
        let html = render("## Using `cargo build` *fast*");
        assert!(html.contains("id=\"using-cargo-build-fast\""));
    }

    #[test]
    fn test_duplicate_headings_are_numbered() {
        let html = render("# Notes\n\n# Notes\n\n# Notes");
        assert!(html.contains("<h1 id=\"notes\">"));
        assert!(html.contains("<h1 id=\"notes-1\">"));
        assert!(html.contains("<h1 id=\"notes-2\">"));
    }

    #[test]
    fn test_explicit_id_is_kept_and_reserved() {
        let html = render("# Intro {#intro}\n\n# Intro");
        assert!(html.contains("<h1 id=\"intro\">Intro</h1>"));
        assert!(html.contains("<h1 id=\"intro-1\">Intro</h1>"));
    }

    #[test]
    fn test_symbol_only_heading_has_no_id() {
        let html = render("# !!!");
        assert!(html.contains("<h1>!!!</h1>"));
    }

    #[test]
    fn test_heading_with_link_keeps_text_id() {
        let html = render("## See [the docs](https://docs.example.com)");
        assert!(html.contains("<h2 id=\"see-the-docs\">"));
        assert!(html.contains("target=\"_blank\""));
    }

    #[test]
    fn test_disabled_auto_ids() {
        let renderer = MarkdownRenderer::new(RenderOptions::new().with_auto_heading_ids(false));
        assert_eq!(renderer.render("# Hello"), "<h1>Hello</h1>\n");
    }
}

// =============================================================================
// Code blocks
// =============================================================================

mod code_blocks {
    use super::*;

    #[test]
    fn test_fenced_code_preserved() {
        let md = "```\nlet x = a < b && c > d;\n    indented \"quoted\" line\ttab\n```\n";
        let html = render(md);
        assert!(html.contains(
            "<pre><code>let x = a &lt; b &amp;&amp; c &gt; d;\n    indented \"quoted\" line\ttab\n</code></pre>"
        ));
    }

    #[test]
    fn test_fenced_code_language_class() {
        let html = render("```python\nprint('hi')\n```");
        assert!(html.contains("<pre><code class=\"language-python\">print('hi')\n</code></pre>"));
    }

    #[test]
    fn test_code_is_not_smartened() {
        let html = render("```\n\"quotes\" -- and ...\n```\n\n`'x' -- y`");
        assert!(html.contains("\"quotes\" -- and ..."));
        assert!(html.contains("<code>'x' -- y</code>"));
    }

    #[test]
    fn test_indented_code_block() {
        let html = render("text\n\n    <tag>\n");
        assert!(html.contains("<pre><code>&lt;tag&gt;\n</code></pre>"));
    }

    #[test]
    fn test_unicode_in_code_survives() {
        let html = render("```\nこんにちは 🦀 é\n```");
        assert!(html.contains("こんにちは 🦀 é"));
    }
}

// =============================================================================
// Links
// =============================================================================

mod links {
    use super::*;

    #[test]
    fn test_external_link_opens_new_tab() {
        let html = render("[Rust](https://www.rust-lang.org)");
        assert!(html.contains("<a href=\"https://www.rust-lang.org\" target=\"_blank\">Rust</a>"));
    }

    #[test]
    fn test_anchor_link_stays_in_page() {
        let html = render("[jump](#section)");
        assert!(html.contains("<a href=\"#section\">jump</a>"));
    }

    #[test]
    fn test_angle_autolink() {
        let html = render("<https://example.com>");
        assert!(html.contains(
            "<a href=\"https://example.com\" target=\"_blank\">https://example.com</a>"
        ));
    }

    #[test]
    fn test_bare_url_autolink() {
        let html = render("Visit https://example.com/docs, then ftp://files.example.com.");
        assert!(html.contains(
            "<a href=\"https://example.com/docs\" target=\"_blank\">https://example.com/docs</a>,"
        ));
        assert!(html.contains(
            "<a href=\"ftp://files.example.com\" target=\"_blank\">ftp://files.example.com</a>."
        ));
    }

    #[test]
    fn test_bare_url_in_parentheses() {
        let html = render("(see https://example.com/page)");
        assert!(html.contains("target=\"_blank\">https://example.com/page</a>)"));
    }

    #[test]
    fn test_href_attribute_is_escaped() {
        let html = render("[q](https://example.com/?a=1&b=2)");
        assert!(html.contains("href=\"https://example.com/?a=1&amp;b=2\""));
    }

    #[test]
    fn test_image_is_not_a_link() {
        let html = render("![logo https://example.com/x](https://example.com/logo.png)");
        assert!(html.contains("<img src=\"https://example.com/logo.png\""));
        assert!(!html.contains("<a "));
    }
}

// =============================================================================
// Extensions
// =============================================================================

mod extensions {
    use super::*;

    #[test]
    fn test_table() {
        let html = render("| Name | Age |\n|------|-----|\n| Ann  | 30  |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<th>Name</th>"));
        assert!(html.contains("<td>Ann</td>"));
    }

    #[test]
    fn test_strikethrough() {
        assert!(render("~~gone~~").contains("<del>gone</del>"));
    }

    #[test]
    fn test_task_list() {
        let html = render("- [x] done\n- [ ] todo");
        assert!(html.contains("checked"));
        assert!(html.contains("type=\"checkbox\""));
    }

    #[test]
    fn test_footnote() {
        let html = render("Claim[^1].\n\n[^1]: Source.");
        assert!(html.contains("footnote-reference"));
        assert!(html.contains("footnote-definition"));
    }

    #[test]
    fn test_definition_list() {
        let html = render("Term\n: Definition");
        assert!(html.contains("<dl>"));
        assert!(html.contains("<dt>Term</dt>"));
    }

    #[test]
    fn test_smart_punctuation() {
        let html = render("\"quoted\" -- done...");
        assert!(html.contains("\u{201c}quoted\u{201d}"));
        assert!(html.contains("\u{2013}"));
        assert!(html.contains("\u{2026}"));
    }

    #[test]
    fn test_raw_html_passes_through() {
        let html = render("<div class=\"note\">kept</div>");
        assert!(html.contains("<div class=\"note\">kept</div>"));
    }
}
