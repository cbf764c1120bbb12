//! Built-in block renderers
//!
//! Props are untyped; every renderer reads what it needs and skips what is
//! missing or of the wrong shape.

use serde_json::{Map, Value};
use std::fmt::Write as _;

use super::{BlockRenderer, RenderContext};
use crate::content::scalar_text;
use crate::helpers::{html_escape, link_to};
use crate::resolver::ResolvedBlock;

fn text(props: &Map<String, Value>, key: &str) -> Option<String> {
    props.get(key).and_then(scalar_text).filter(|s| !s.is_empty())
}

fn objects<'a>(props: &'a Map<String, Value>, key: &str) -> Vec<&'a Map<String, Value>> {
    props
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_object).collect())
        .unwrap_or_default()
}

pub struct Hero;

impl BlockRenderer for Hero {
    fn render(&self, block: &ResolvedBlock, _ctx: &RenderContext) -> String {
        let props = &block.props;
        let mut html = String::from(r#"<div class="hero">"#);

        if let Some(image) = text(props, "backgroundImage") {
            let _ = write!(
                html,
                r#"<div class="hero-background"><img src="{}" alt="Hero background"></div>"#,
                html_escape(&image)
            );
        }
        if let Some(title) = text(props, "title") {
            let _ = write!(html, "<h1>{}</h1>", html_escape(&title));
        }
        if let Some(subtitle) = text(props, "subtitle") {
            let _ = write!(html, r#"<p class="subtitle">{}</p>"#, html_escape(&subtitle));
        }
        // The call to action needs both its label and its target
        if let (Some(label), Some(href)) = (text(props, "ctaText"), text(props, "ctaLink")) {
            let _ = write!(html, r#"<p class="cta">{}</p>"#, link_to(&href, &label));
        }

        html.push_str("</div>");
        html
    }
}

pub struct Features;

impl BlockRenderer for Features {
    fn render(&self, block: &ResolvedBlock, _ctx: &RenderContext) -> String {
        let mut html = String::from(r#"<div class="features">"#);

        for item in objects(&block.props, "items") {
            let icon = text(item, "icon").unwrap_or_else(|| "HelpCircle".to_string());
            let _ = write!(
                html,
                r#"<div class="feature"><span class="icon" data-icon="{}"></span><h3>{}</h3><p>{}</p></div>"#,
                html_escape(&icon),
                html_escape(&text(item, "title").unwrap_or_default()),
                html_escape(&text(item, "description").unwrap_or_default())
            );
        }

        html.push_str("</div>");
        html
    }
}

pub struct ContactForm;

impl BlockRenderer for ContactForm {
    fn render(&self, block: &ResolvedBlock, _ctx: &RenderContext) -> String {
        let props = &block.props;
        let mut html = String::from(r#"<div class="contact-form">"#);

        if let Some(title) = text(props, "title") {
            let _ = write!(html, "<h2>{}</h2>", html_escape(&title));
        }
        html.push_str(r#"<form method="post">"#);

        for field in objects(props, "fields") {
            let Some(raw_name) = text(field, "name") else {
                continue;
            };
            let label = html_escape(&text(field, "label").unwrap_or_else(|| raw_name.clone()));
            let name = html_escape(&raw_name);
            let required = field.get("required") == Some(&Value::Bool(true));
            let marker = if required { r#" <span class="required">*</span>"# } else { "" };
            let required_attr = if required { " required" } else { "" };

            let _ = write!(
                html,
                r#"<div class="field"><label for="{0}">{1}{2}</label>"#,
                name, label, marker
            );
            match text(field, "type").as_deref() {
                Some("textarea") => {
                    let _ = write!(
                        html,
                        r#"<textarea id="{0}" name="{0}" rows="4"{1}></textarea>"#,
                        name, required_attr
                    );
                }
                Some("select") => {
                    let _ = write!(
                        html,
                        r#"<select id="{0}" name="{0}"{1}><option value="">Select an option</option>"#,
                        name, required_attr
                    );
                    let options = field.get("options").and_then(Value::as_array);
                    for option in options.into_iter().flatten().filter_map(scalar_text) {
                        let option = html_escape(&option);
                        let _ = write!(html, r#"<option value="{0}">{0}</option>"#, option);
                    }
                    html.push_str("</select>");
                }
                other => {
                    let _ = write!(
                        html,
                        r#"<input type="{}" id="{1}" name="{1}"{2}>"#,
                        html_escape(other.unwrap_or("text")),
                        name,
                        required_attr
                    );
                }
            }
            html.push_str("</div>");
        }

        let submit = text(props, "submitLabel").unwrap_or_else(|| "Submit".to_string());
        let _ = write!(
            html,
            r#"<button type="submit">{}</button></form>"#,
            html_escape(&submit)
        );
        if let Some(message) = text(props, "successMessage") {
            let _ = write!(
                html,
                r#"<p class="success-message" hidden>{}</p>"#,
                html_escape(&message)
            );
        }

        html.push_str("</div>");
        html
    }
}

pub struct AdminPanel;

impl BlockRenderer for AdminPanel {
    fn render(&self, _block: &ResolvedBlock, ctx: &RenderContext) -> String {
        let mut html = String::from(
            r#"<div class="admin-panel"><h2>Content Management</h2><table><thead><tr><th>Slug</th><th>Title</th><th>Layout</th><th>Access</th></tr></thead><tbody>"#,
        );

        for page in &ctx.pages {
            let meta = &page.metadata;
            let access = match (meta.requires_auth, meta.required_role) {
                (_, Some(role)) => role.as_str(),
                (true, None) => "signed in",
                (false, None) => "public",
            };
            let _ = write!(
                html,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                link_to(&page.slug, &page.slug),
                html_escape(&meta.title),
                meta.layout.as_str(),
                access
            );
        }

        html.push_str("</tbody></table></div>");
        html
    }
}

pub struct TextBlock;

impl BlockRenderer for TextBlock {
    fn render(&self, block: &ResolvedBlock, ctx: &RenderContext) -> String {
        match text(&block.props, "content") {
            Some(content) => format!(
                r#"<div class="prose">{}</div>"#,
                ctx.markdown.render(&content)
            ),
            None => String::new(),
        }
    }
}

pub struct Unknown;

impl BlockRenderer for Unknown {
    fn render(&self, block: &ResolvedBlock, _ctx: &RenderContext) -> String {
        format!(
            r#"<div class="block-missing">Component <strong>{}</strong> not found in registry.</div>"#,
            html_escape(&block.kind)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{MarkdownRenderer, PageRecord};
    use crate::resolver::BlockOrigin;
    use serde_json::json;

    fn block(kind: &str, props: Value) -> ResolvedBlock {
        ResolvedBlock {
            kind: kind.to_string(),
            props: props.as_object().cloned().unwrap_or_default(),
            id: None,
            origin: BlockOrigin::Declared { index: 0 },
        }
    }

    fn render(renderer: &dyn BlockRenderer, b: &ResolvedBlock, pages: Vec<&PageRecord>) -> String {
        let markdown = MarkdownRenderer::new();
        let ctx = RenderContext {
            markdown: &markdown,
            pages,
        };
        renderer.render(b, &ctx)
    }

    #[test]
    fn test_hero() {
        let html = render(
            &Hero,
            &block(
                "hero",
                json!({ "title": "Build <Faster>", "subtitle": "Sub", "ctaText": "Go", "ctaLink": "/about" }),
            ),
            Vec::new(),
        );
        assert!(html.contains("<h1>Build &lt;Faster&gt;</h1>"));
        assert!(html.contains(r#"<a href="/about">Go</a>"#));
    }

    #[test]
    fn test_hero_without_link_has_no_cta() {
        let html = render(&Hero, &block("hero", json!({ "ctaText": "Go" })), Vec::new());
        assert!(!html.contains("cta"));
    }

    #[test]
    fn test_features_tolerates_bad_items() {
        let html = render(
            &Features,
            &block(
                "features",
                json!({ "items": [{ "title": "A", "icon": "Bot" }, "junk", { "description": "only" }] }),
            ),
            Vec::new(),
        );
        assert_eq!(html.matches(r#"class="feature""#).count(), 2);
        assert!(html.contains(r#"data-icon="Bot""#));
        assert!(html.contains(r#"data-icon="HelpCircle""#));
    }

    #[test]
    fn test_features_without_items() {
        let html = render(&Features, &block("features", json!({})), Vec::new());
        assert_eq!(html, r#"<div class="features"></div>"#);
    }

    #[test]
    fn test_contact_form_fields() {
        let html = render(
            &ContactForm,
            &block(
                "contact-form",
                json!({
                    "title": "Write us",
                    "fields": [
                        { "name": "email", "label": "Email", "type": "email", "required": true },
                        { "name": "message", "label": "Message", "type": "textarea" },
                        { "name": "topic", "type": "select", "options": ["Sales", "Support"] }
                    ],
                    "submitLabel": "Send"
                }),
            ),
            Vec::new(),
        );
        assert!(html.contains(r#"<input type="email" id="email" name="email" required>"#));
        assert!(html.contains(r#"<textarea id="message" name="message" rows="4"></textarea>"#));
        assert!(html.contains(r#"<option value="Support">Support</option>"#));
        assert!(html.contains(r#"<button type="submit">Send</button>"#));
    }

    #[test]
    fn test_admin_panel_lists_pages() {
        let mut admin = PageRecord::blank("/admin", "Admin");
        admin.metadata.required_role = Some(crate::content::Role::Admin);
        let home = PageRecord::blank("/", "Home");
        let html = render(
            &AdminPanel,
            &block("admin-panel", json!({})),
            vec![&home, &admin],
        );
        assert!(html.contains("<td>Home</td>"));
        assert!(html.contains("<td>ADMIN</td>"));
        assert!(html.contains("<td>public</td>"));
    }

    #[test]
    fn test_text_block_renders_markdown() {
        let html = render(
            &TextBlock,
            &block("text-block", json!({ "content": "## Title" })),
            Vec::new(),
        );
        assert!(html.contains("<h2>Title</h2>"));
    }

    #[test]
    fn test_text_block_without_content_is_empty() {
        let html = render(&TextBlock, &block("text-block", json!({})), Vec::new());
        assert!(html.is_empty());
    }
}
