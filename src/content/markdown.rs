//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::HighlightConfig;
use crate::helpers::html_escape;

/// Markdown renderer used by text blocks
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

/// Fenced or indented code being collected between start and end events
struct CodeBlock {
    lang: Option<String>,
    source: String,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::from_config(&HighlightConfig::default())
    }

    pub fn from_config(config: &HighlightConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: config.theme.clone(),
            line_numbers: config.line_number,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        // Metadata blocks are never enabled: front-matter is split off
        // before the body reaches this renderer
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;

        let mut events: Vec<Event> = Vec::new();
        let mut code: Option<CodeBlock> = None;

        for event in Parser::new_ext(markdown, options) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code = Some(CodeBlock {
                        lang,
                        source: String::new(),
                    });
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(block) = code.take() {
                        let highlighted = self.highlight(&block.source, block.lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) if code.is_some() => {
                    if let Some(block) = code.as_mut() {
                        block.source.push_str(&text);
                    }
                }
                // Raw HTML in a page body is shown as text, never injected
                Event::Html(raw) | Event::InlineHtml(raw) if code.is_none() => {
                    events.push(Event::Text(raw));
                }
                other if code.is_none() => events.push(other),
                _ => {}
            }
        }

        let mut output = String::new();
        html::push_html(&mut output, events.into_iter());
        output
    }

    fn highlight(&self, source: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(source, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(html) if self.line_numbers => with_line_numbers(&html, lang),
            Some(html) => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang, html
            ),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang,
                html_escape(source)
            ),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap highlighted lines in a two-column gutter table
fn with_line_numbers(code: &str, lang: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();
    let gutter = (1..=lines.len())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
        lang,
        gutter,
        lines.join("\n")
    )
}
