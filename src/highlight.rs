use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Tag, TagEnd};
use pulldown_cmark_escape::escape_html;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

const THEME: &str = "base16-ocean.dark";

static HIGHLIGHTER: LazyLock<CodeHighlighter> = LazyLock::new(CodeHighlighter::new);

/// Syntax and theme sets are expensive to load, so one instance is shared
/// by every render.
pub struct CodeHighlighter {
    syntaxset: SyntaxSet,
    theme: Option<Theme>,
}

impl CodeHighlighter {
    fn new() -> CodeHighlighter {
        let syntaxset = SyntaxSet::load_defaults_newlines();
        let mut themeset = ThemeSet::load_defaults();
        CodeHighlighter {
            syntaxset,
            theme: themeset.themes.remove(THEME),
        }
    }

    fn render_block(&self, lang: Option<&str>, code: &str) -> String {
        let syntax = lang
            .and_then(|l| self.syntaxset.find_syntax_by_token(l))
            .unwrap_or_else(|| self.syntaxset.find_syntax_plain_text());
        let highlighted = self.theme.as_ref().and_then(|theme| {
            highlighted_html_for_string(code, &self.syntaxset, syntax, theme)
                .map_err(|e| tracing::warn!("couldn't highlight code block: {e}"))
                .ok()
        });
        highlighted.unwrap_or_else(|| plain_block(code))
    }

    /// Replace fenced and indented code blocks with pre-rendered HTML.
    ///
    /// Highly based on <https://gitlab.com/eguiraud/highlight-pulldown>.
    pub fn highlight<'a, It>(&self, events: It) -> Vec<Event<'a>>
    where
        It: Iterator<Item = Event<'a>>,
    {
        let mut code_lang: Option<Option<CowStr<'a>>> = None;
        let mut to_highlight = String::new();
        let mut out_events = Vec::new();

        for event in events {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    code_lang = Some(match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang),
                        _ => None,
                    });
                }
                Event::End(TagEnd::CodeBlock) => {
                    let lang = code_lang.take().flatten();
                    // info strings may carry attributes after the language
                    let token = lang.as_deref().and_then(|l| l.split_whitespace().next());
                    let html = self.render_block(token, &to_highlight);
                    to_highlight.clear();
                    out_events.push(Event::Html(CowStr::from(html)));
                }
                Event::Text(t) if code_lang.is_some() => to_highlight.push_str(&t),
                e => out_events.push(e),
            }
        }

        out_events
    }
}

fn plain_block(code: &str) -> String {
    let mut out = String::from("<pre><code>");
    // writing into a String can't fail
    let _ = escape_html(&mut out, code);
    out.push_str("</code></pre>\n");
    out
}

/// Apply syntax highlighting to a pulldown-cmark event stream.
pub fn highlight<'a, It>(events: It) -> std::vec::IntoIter<Event<'a>>
where
    It: Iterator<Item = Event<'a>>,
{
    HIGHLIGHTER.highlight(events).into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulldown_cmark::{html, Parser};

    fn render(md: &str) -> String {
        let mut out = String::new();
        html::push_html(&mut out, highlight(Parser::new(md)));
        out
    }

    #[test]
    fn test_fenced_block_is_highlighted() {
        let out = render("```rust\nfn main() {}\n```\n");
        assert!(out.contains("<pre style="));
        assert!(out.contains("main"));
        assert!(!out.contains("<code class=\"language-rust\">"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain_text() {
        let out = render("```nosuchlang\n<tag>\n```\n");
        assert!(out.contains("&lt;tag&gt;"));
    }

    #[test]
    fn test_plain_block_escapes_html() {
        assert_eq!(
            plain_block("a < b && \"c\" > d"),
            "<pre><code>a &lt; b &amp;&amp; &quot;c&quot; &gt; d</code></pre>\n"
        );
    }

    #[test]
    fn test_text_outside_code_untouched() {
        let out = render("hello *world*\n");
        assert_eq!(out, "<p>hello <em>world</em></p>\n");
    }
}
