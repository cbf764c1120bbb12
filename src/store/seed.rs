//! Built-in pages every store starts from

use indexmap::IndexMap;
use serde_json::{json, Value};

use crate::content::{ComponentConfig, Layout, PageMetadata, PageRecord, Role};

fn component(kind: &str, props: Value) -> ComponentConfig {
    ComponentConfig {
        kind: kind.to_string(),
        props: props.as_object().cloned().unwrap_or_default(),
        id: None,
    }
}

fn page(slug: &str, metadata: PageMetadata, body: &str) -> PageRecord {
    PageRecord {
        slug: slug.to_string(),
        raw_content: String::new(),
        metadata,
        markdown_body: body.to_string(),
    }
}

const ABOUT_BODY: &str = r#"
# About Our Mission

We believe content management should stay simple. This page renders plain
Markdown next to dynamic blocks.

## Why Folio?

1. Speed
2. Flexibility
3. Security

> "The best code is no code."
"#;

/// The seed pages, in navigation order
pub fn initial_pages() -> IndexMap<String, PageRecord> {
    let mut home = PageMetadata::titled("Home - Folio");
    home.layout = Layout::Landing;
    home.components = vec![
        component(
            "hero",
            json!({
                "title": "Build Faster with Folio",
                "subtitle": "A Markdown-driven page system with composable blocks.",
                "ctaText": "Get Started",
                "ctaLink": "/about",
                "backgroundImage": "https://picsum.photos/1920/1080"
            }),
        ),
        component(
            "features",
            json!({
                "items": [
                    { "title": "Markdown Driven", "description": "Edit content as plain text files.", "icon": "FileText" },
                    { "title": "Generated Drafts", "description": "Start a page from a topic and a style.", "icon": "Bot" },
                    { "title": "Block System", "description": "Pages are stacks of typed blocks.", "icon": "Blocks" }
                ]
            }),
        ),
    ];

    let mut products = PageMetadata::titled("Our Products");
    products.components = vec![
        component(
            "hero",
            json!({
                "title": "Premium Solutions",
                "subtitle": "Browse our catalog of widgets.",
                "ctaText": "Contact Sales",
                "ctaLink": "/about",
                "backgroundImage": "https://picsum.photos/id/20/1920/600"
            }),
        ),
        component(
            "features",
            json!({
                "items": [
                    { "title": "Widget A", "description": "The classic widget.", "icon": "Package" },
                    { "title": "Widget B", "description": "Faster, stronger.", "icon": "Zap" },
                    { "title": "Widget C", "description": "Eco-friendly edition.", "icon": "Leaf" }
                ]
            }),
        ),
        component(
            crate::resolver::TEXT_BLOCK,
            json!({
                "content": "## Custom Enterprise Solutions\n\nWe offer bulk pricing for larger teams. Contact sales for a quote."
            }),
        ),
    ];

    let mut about = PageMetadata::titled("About Us");
    about.components = vec![
        component(crate::resolver::TEXT_BLOCK, json!({ "theme": "light" })),
        ComponentConfig {
            id: Some("contact-main".to_string()),
            ..component(
                "contact-form",
                json!({
                    "title": "Send us a Message",
                    "fields": [
                        { "name": "email", "label": "Email Address", "type": "email", "required": true },
                        { "name": "message", "label": "Your Message", "type": "textarea", "required": true }
                    ],
                    "submitLabel": "Send Inquiry",
                    "successMessage": "Thanks! We will get back to you."
                }),
            )
        },
    ];

    let mut admin = PageMetadata::titled("Admin Dashboard");
    admin.layout = Layout::Dashboard;
    admin.requires_auth = true;
    admin.required_role = Some(Role::Admin);
    admin.components = vec![component("admin-panel", json!({}))];

    [
        page("/", home, ""),
        page("/products", products, ""),
        page("/about", about, ABOUT_BODY),
        page("/admin", admin, ""),
    ]
    .into_iter()
    .map(|p| (p.slug.clone(), p))
    .collect()
}
