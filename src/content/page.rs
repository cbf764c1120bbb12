//! Page records and their metadata

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Write as _;

use super::frontmatter::{Diagnostic, FrontMatter};
use super::value::{coerce, scalar_text};

/// Page layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Default,
    Landing,
    Dashboard,
}

impl Layout {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Layout::Default),
            "landing" => Some(Layout::Landing),
            "dashboard" => Some(Layout::Dashboard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Default => "default",
            Layout::Landing => "landing",
            Layout::Dashboard => "dashboard",
        }
    }
}

/// Viewer role required by a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Guest,
    User,
    Admin,
}

impl Role {
    /// Case-insensitive role name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "GUEST" => Some(Role::Guest),
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "GUEST",
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

/// One declared block of a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// Registry key, e.g. `hero` or `text-block`
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub props: Map<String, Value>,

    /// Opaque correlation token for the rendered instance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ComponentConfig {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            props: Map::new(),
            id: None,
        }
    }

    pub fn with_prop(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.props.insert(key.to_string(), value.into());
        self
    }

    /// Build from a front-matter list item.
    ///
    /// `type` and `id` are lifted out; every other key of the item is a prop.
    fn from_item(mut item: Map<String, Value>, diagnostics: &mut Vec<Diagnostic>) -> Self {
        let kind = match item.remove("type") {
            Some(value) => scalar_text(&value).unwrap_or_default(),
            None => {
                diagnostics.push(invalid("components", "item without a `type`"));
                String::new()
            }
        };
        let id = item.remove("id").as_ref().and_then(scalar_text);

        Self {
            kind,
            props: item,
            id,
        }
    }
}

/// Front-matter of a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub layout: Layout,

    #[serde(default)]
    pub requires_auth: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_role: Option<Role>,

    /// Declaration order is rendering order
    #[serde(default)]
    pub components: Vec<ComponentConfig>,

    /// Any other top-level fields
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl PageMetadata {
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: None,
            layout: Layout::Default,
            requires_auth: false,
            required_role: None,
            components: Vec::new(),
            extra: IndexMap::new(),
        }
    }

    /// Assemble typed metadata from coerced front-matter fields.
    ///
    /// Fields of the wrong shape are reported and left at their defaults.
    pub fn from_fields(
        fields: Map<String, Value>,
        slug: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Self {
        let mut meta = Self::titled(slug);
        let mut has_title = false;

        for (key, value) in fields {
            match key.as_str() {
                "title" => match scalar_text(&value) {
                    Some(title) => {
                        meta.title = title;
                        has_title = true;
                    }
                    None => diagnostics.push(invalid("title", "expected text")),
                },
                "description" => match scalar_text(&value) {
                    Some(text) => meta.description = Some(text),
                    None => diagnostics.push(invalid("description", "expected text")),
                },
                "layout" => match value.as_str().and_then(Layout::from_name) {
                    Some(layout) => meta.layout = layout,
                    None => diagnostics.push(invalid(
                        "layout",
                        &format!("unknown layout {}, using default", value),
                    )),
                },
                "requiresAuth" => match value {
                    Value::Bool(flag) => meta.requires_auth = flag,
                    other => diagnostics.push(invalid(
                        "requiresAuth",
                        &format!("expected true or false, got {}", other),
                    )),
                },
                "requiredRole" => match value.as_str().and_then(Role::from_name) {
                    Some(role) => meta.required_role = Some(role),
                    None => diagnostics.push(invalid(
                        "requiredRole",
                        &format!("unknown role {}", value),
                    )),
                },
                "components" => match value {
                    Value::Array(items) => {
                        for item in items {
                            match item {
                                Value::Object(obj) => meta
                                    .components
                                    .push(ComponentConfig::from_item(obj, diagnostics)),
                                other => diagnostics.push(invalid(
                                    "components",
                                    &format!("expected an object item, got {}", other),
                                )),
                            }
                        }
                    }
                    other => diagnostics.push(invalid(
                        "components",
                        &format!("expected a list, got {}", other),
                    )),
                },
                _ => {
                    meta.extra.insert(key, value);
                }
            }
        }

        if !has_title {
            diagnostics.push(invalid("title", "missing, using the slug"));
        }

        meta
    }
}

fn invalid(field: &str, message: &str) -> Diagnostic {
    Diagnostic::InvalidField {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// A page keyed by its slug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    pub slug: String,

    /// Source text the record was parsed from, empty for built pages
    #[serde(default)]
    pub raw_content: String,

    pub metadata: PageMetadata,

    /// Always present, possibly empty
    #[serde(default)]
    pub markdown_body: String,
}

impl PageRecord {
    /// Parse a raw document. Never fails.
    pub fn parse(slug: &str, document: &str) -> Self {
        Self::parse_with_diagnostics(slug, document).0
    }

    /// Parse a raw document, keeping every line-level and field-level issue
    pub fn parse_with_diagnostics(slug: &str, document: &str) -> (Self, Vec<Diagnostic>) {
        let fm = FrontMatter::parse(document);
        let mut diagnostics = fm.diagnostics;

        let metadata = match fm.fields {
            Some(fields) => PageMetadata::from_fields(fields, slug, &mut diagnostics),
            None => PageMetadata::titled(slug),
        };

        let record = Self {
            slug: slug.to_string(),
            raw_content: document.to_string(),
            metadata,
            markdown_body: fm.body.to_string(),
        };
        (record, diagnostics)
    }

    /// A fresh editable page with one text block showing the body
    pub fn blank(slug: &str, title: &str) -> Self {
        let mut metadata = PageMetadata::titled(title);
        metadata
            .components
            .push(ComponentConfig::new(crate::resolver::TEXT_BLOCK).with_prop("content", ""));

        Self {
            slug: slug.to_string(),
            raw_content: String::new(),
            metadata,
            markdown_body: format!("# {}\n\nStart editing...", title),
        }
    }

    /// Serialize back to the `---` delimited text form.
    ///
    /// Scalars, lists of scalars and lists of flat objects are written;
    /// nested values that the grammar cannot express are left out. So are
    /// scalar list items containing a colon, which would read back as
    /// `key: value` objects.
    pub fn to_document(&self) -> String {
        let meta = &self.metadata;
        let mut out = String::from("---\n");

        write_field(&mut out, "title", &Value::String(meta.title.clone()));
        if let Some(description) = &meta.description {
            write_field(&mut out, "description", &Value::String(description.clone()));
        }
        let _ = writeln!(out, "layout: {}", meta.layout.as_str());
        if meta.requires_auth {
            out.push_str("requiresAuth: true\n");
        }
        if let Some(role) = meta.required_role {
            let _ = writeln!(out, "requiredRole: {}", role.as_str());
        }

        for (key, value) in &meta.extra {
            match value {
                Value::Array(items) => write_list(&mut out, key, items.iter().cloned()),
                other => write_field(&mut out, key, other),
            }
        }

        if !meta.components.is_empty() {
            let items = meta.components.iter().map(|component| {
                let mut item = Map::new();
                item.insert("type".to_string(), Value::String(component.kind.clone()));
                if let Some(id) = &component.id {
                    item.insert("id".to_string(), Value::String(id.clone()));
                }
                for (key, value) in &component.props {
                    if !matches!(key.as_str(), "type" | "id" | "props") {
                        item.insert(key.clone(), value.clone());
                    }
                }
                Value::Object(item)
            });
            write_list(&mut out, "components", items);
        }

        out.push_str("---\n");
        out.push_str(&self.markdown_body);
        out
    }
}

fn write_field(out: &mut String, key: &str, value: &Value) {
    if let Some(text) = encode_scalar(value) {
        if is_writable_key(key) {
            let _ = writeln!(out, "{}: {}", key, text);
        }
    }
}

fn write_list(out: &mut String, key: &str, items: impl Iterator<Item = Value>) {
    if !is_writable_key(key) {
        return;
    }
    let _ = writeln!(out, "{}:", key);

    for item in items {
        match item {
            Value::Object(map) => {
                let mut first = true;
                for (prop, value) in &map {
                    let Some(text) = encode_scalar(value) else {
                        continue;
                    };
                    if !is_writable_key(prop) {
                        continue;
                    }
                    let lead = if first { "  - " } else { "    " };
                    let _ = writeln!(out, "{}{}: {}", lead, prop, text);
                    first = false;
                }
            }
            other => match encode_scalar(&other) {
                Some(text) if !text.contains(':') => {
                    let _ = writeln!(out, "  - {}", text);
                }
                _ => {}
            },
        }
    }
}

fn is_writable_key(key: &str) -> bool {
    !key.is_empty() && !key.contains([':', '\n']) && !key.starts_with(['#', '-'])
}

/// Text that reads back as the same scalar, quoting where needed
fn encode_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.replace('\n', " ");
            if coerce(&s) == Value::String(s.clone()) && s.trim() == s && !s.is_empty() {
                Some(s)
            } else {
                Some(format!("\"{}\"", s))
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
