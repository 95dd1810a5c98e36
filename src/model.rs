//! Catalog records as the rest of the crate sees them

/// Placeholder shown when the catalog has no description for a volume
pub const NO_DESCRIPTION: &str = "No description available.";

/// One suggestion row: a title and the opaque volume identifier behind it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResultItem {
    pub title: String,
    pub id: String,
}

impl SearchResultItem {
    pub fn new(title: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            id: id.into(),
        }
    }
}

/// Metadata rendered on the detail screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetail {
    pub title: String,
    pub authors: Vec<String>,
    /// Raw catalog HTML. Run it through [`crate::sanitize::description_to_text`]
    /// before display.
    pub description: String,
    /// Cover thumbnail, empty when the catalog has none
    pub image_url: String,
}

impl Default for BookDetail {
    fn default() -> Self {
        Self {
            title: String::new(),
            authors: Vec::new(),
            description: NO_DESCRIPTION.to_string(),
            image_url: String::new(),
        }
    }
}

impl BookDetail {
    /// Authors joined for a single display line
    pub fn authors_line(&self) -> Option<String> {
        if self.authors.is_empty() {
            None
        } else {
            Some(self.authors.join(", "))
        }
    }

    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }
}
