//! HTML helper functions

/// Escape text for use in element content or a quoted attribute
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render an optional `id="..."` attribute, with a leading space
pub fn id_attr(id: Option<&str>) -> String {
    match id {
        Some(id) if !id.is_empty() => format!(r#" id="{}""#, html_escape(id)),
        _ => String::new(),
    }
}

/// Generate an anchor tag
///
/// # Examples
/// ```ignore
/// link_to("/about", "About") // -> <a href="/about">About</a>
/// ```
pub fn link_to(href: &str, text: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        format!(
            r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
            html_escape(href),
            html_escape(text)
        )
    } else {
        format!(r#"<a href="{}">{}</a>"#, html_escape(href), html_escape(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_id_attr() {
        assert_eq!(id_attr(Some("contact")), r#" id="contact""#);
        assert_eq!(id_attr(Some("")), "");
        assert_eq!(id_attr(None), "");
    }

    #[test]
    fn test_link_to() {
        assert_eq!(link_to("/about", "About"), r#"<a href="/about">About</a>"#);
        assert!(link_to("https://example.com", "Out").contains("noopener"));
    }
}
