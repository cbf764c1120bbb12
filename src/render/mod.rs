//! Page view: resolved blocks inside the site chrome

use chrono::{Datelike, Local};
use std::fmt::Write as _;

use crate::access::Viewer;
use crate::config::SiteConfig;
use crate::content::{MarkdownRenderer, PageRecord, Role};
use crate::helpers::{html_escape, link_to};
use crate::registry::{render_block, RenderContext};
use crate::resolver::{resolve, BlockOrigin};

/// Renders full HTML documents for pages and error screens
pub struct PageView<'a> {
    site: &'a SiteConfig,
    markdown: &'a MarkdownRenderer,
}

impl<'a> PageView<'a> {
    pub fn new(site: &'a SiteConfig, markdown: &'a MarkdownRenderer) -> Self {
        Self { site, markdown }
    }

    /// Render a page. Access must already have been checked by the caller.
    pub fn render(
        &self,
        page: &PageRecord,
        pages: Vec<&PageRecord>,
        viewer: Option<&Viewer>,
    ) -> String {
        let ctx = RenderContext {
            markdown: self.markdown,
            pages,
        };

        let mut main = format!(
            r#"<div class="page-wrapper layout-{}">"#,
            page.metadata.layout.as_str()
        );
        for block in resolve(page) {
            let html = render_block(&block, &ctx);
            match &block.origin {
                BlockOrigin::Synthesized { heading } => {
                    let _ = write!(
                        main,
                        r#"<article class="prose"><h1>{}</h1>{}</article>"#,
                        html_escape(heading),
                        html
                    );
                }
                BlockOrigin::Declared { .. } => main.push_str(&html),
            }
        }
        main.push_str("</div>");

        self.document(&page.metadata.title, &main, viewer)
    }

    /// Render the "page could not be shown" screen
    pub fn render_error(&self, message: &str, viewer: Option<&Viewer>) -> String {
        let main = format!(
            r#"<div class="error"><h1>Ooops!</h1><p>{}</p>{}</div>"#,
            html_escape(message),
            link_to("/", "Go back home")
        );
        self.document(message, &main, viewer)
    }

    fn document(&self, title: &str, main: &str, viewer: Option<&Viewer>) -> String {
        let mut nav = format!(
            r#"<nav><a class="brand" href="/">{}</a>{}{}"#,
            html_escape(&self.site.title),
            link_to("/", "Home"),
            link_to("/about", "About")
        );
        if let Some(viewer) = viewer {
            let _ = write!(
                nav,
                r#"<span class="viewer">{}</span>"#,
                html_escape(&viewer.username)
            );
            if viewer.role == Role::Admin {
                nav.push_str(&link_to("/admin", "Dashboard"));
            }
        }
        nav.push_str("</nav>");

        format!(
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<title>{title} | {site}</title>
</head>
<body>
{nav}
<main>{main}</main>
<footer>&copy; {year} {site}</footer>
</body>
</html>
"#,
            lang = html_escape(&self.site.language),
            title = html_escape(title),
            site = html_escape(&self.site.title),
            nav = nav,
            main = main,
            year = Local::now().year()
        )
    }
}
