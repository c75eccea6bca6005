use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Publication state of a CMS page. Only `Published` pages are ever rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    // Local fixtures usually omit the status
    #[default]
    Published,
    Draft,
    Archived,
    #[serde(other)]
    Unknown,
}

impl PageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageStatus::Published => "published",
            PageStatus::Draft => "draft",
            PageStatus::Archived => "archived",
            PageStatus::Unknown => "unknown",
        }
    }
}

/// A CMS-authored content unit (button, menu, form, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub content: Value,
    /// Per-breakpoint style overrides, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// A page as delivered by the content API.
///
/// `full_path` is never trusted from upstream; it is recomputed by
/// [`build_page_paths`](crate::paths::build_page_paths) on every resolution run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    pub id: String,
    pub slug: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub status: PageStatus,
    #[serde(default)]
    pub reverse_header_colors: Option<bool>,
    #[serde(default)]
    pub content: PageContent,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub full_path: Option<String>,
}

impl PageRecord {
    pub fn new(id: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            parent_id: None,
            status: PageStatus::Published,
            reverse_header_colors: None,
            content: PageContent::default(),
            full_path: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_status(mut self, status: PageStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_reverse_header_colors(mut self, reverse: bool) -> Self {
        self.reverse_header_colors = Some(reverse);
        self
    }

    pub fn is_published(&self) -> bool {
        self.status == PageStatus::Published
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuLinkType {
    Internal,
    External,
    #[serde(rename = "none")]
    Unlinked,
}

/// A node in a navigation menu tree. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub link_type: MenuLinkType,
    #[serde(default)]
    pub url: Option<String>,
    /// Target page for `internal` links
    #[serde(default)]
    pub page_id: Option<String>,
    #[serde(default)]
    pub children: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// Header configuration as authored in the CMS.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderSettings {
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub background_on_scroll: Option<String>,
    #[serde(default)]
    pub text_on_scroll: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub alternate_logo_url: Option<String>,
}

impl HeaderSettings {
    /// A header without a background color, or with `transparent`, floats over the hero.
    pub fn is_transparent(&self) -> bool {
        match self.background_color.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(color) => color.eq_ignore_ascii_case("transparent"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderRecord {
    pub id: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub settings: HeaderSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterRecord {
    pub id: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,
    #[serde(default)]
    pub required: bool,
}

fn default_field_type() -> String {
    "text".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FormField>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_record_from_api_json() {
        let json = r#"{
            "id": "p2",
            "slug": "team",
            "parent_id": "p1",
            "status": "published",
            "reverse_header_colors": true,
            "content": { "blocks": [ { "id": "b1", "type": "button", "content": { "label": "Go" } } ] },
            "full_path": "/bogus"
        }"#;

        let page: PageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(page.parent_id.as_deref(), Some("p1"));
        assert_eq!(page.reverse_header_colors, Some(true));
        assert_eq!(page.content.blocks[0].block_type, "button");
        assert!(page.full_path.is_none(), "upstream full_path must be ignored");
    }

    #[test]
    fn test_unknown_status_is_not_published() {
        let page: PageRecord =
            serde_json::from_str(r#"{"id":"1","slug":"x","status":"scheduled"}"#).unwrap();
        assert_eq!(page.status, PageStatus::Unknown);
        assert!(!page.is_published());
    }

    #[test]
    fn test_menu_link_type_none() {
        let item: MenuItem =
            serde_json::from_str(r#"{"id":"m1","label":"Heading","type":"none"}"#).unwrap();
        assert_eq!(item.link_type, MenuLinkType::Unlinked);
        assert!(item.children.is_empty());
    }

    #[test]
    fn test_header_transparency() {
        let mut settings = HeaderSettings::default();
        assert!(settings.is_transparent());

        settings.background_color = Some("Transparent".to_string());
        assert!(settings.is_transparent());

        settings.background_color = Some("#112233".to_string());
        assert!(!settings.is_transparent());
    }
}
