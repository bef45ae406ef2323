use crate::error::{LightboxError, Result};

/// What the viewer displays: copied from the clicked image at click time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRef {
    source_url: String,
    alt_text: String,
    caption_text: String,
}

impl ImageRef {
    pub fn new(
        source_url: impl Into<String>,
        alt_text: impl Into<String>,
        caption_text: impl Into<String>,
    ) -> Result<Self> {
        let source_url = source_url.into();
        if source_url.trim().is_empty() {
            return Err(LightboxError::EmptySource);
        }
        Ok(Self {
            source_url,
            alt_text: alt_text.into(),
            caption_text: caption_text.into(),
        })
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn alt_text(&self) -> &str {
        &self.alt_text
    }

    pub fn caption_text(&self) -> &str {
        &self.caption_text
    }
}
