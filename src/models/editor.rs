use serde::{Deserialize, Serialize};

use crate::models::content::ContentInput;
use crate::models::style::{ExportFormat, StyleConfig};
use crate::models::suggestion::StyleSuggestion;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EditorTab {
    #[default]
    Content,
    Design,
    Logo,
}

/// Everything one editing session holds. Only `locale` is meant to outlive
/// the session, and storing it is the client's business.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorState {
    pub tab: EditorTab,
    pub content: ContentInput,
    pub style: StyleConfig,
    pub export_format: ExportFormat,
    pub locale: String,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            tab: EditorTab::default(),
            content: ContentInput::default(),
            style: StyleConfig::default(),
            export_format: ExportFormat::default(),
            locale: String::from("en"),
        }
    }
}

impl EditorState {
    /// Replaces the content wholesale; switching content type drops the old fields.
    pub fn set_content(&mut self, content: ContentInput) {
        self.content = content;
    }

    pub fn set_style(&mut self, style: StyleConfig) {
        self.style = style;
    }

    pub fn set_export_format(&mut self, format: ExportFormat) {
        self.export_format = format;
    }

    pub fn set_logo(&mut self, logo: Option<String>) {
        self.style.logo = logo.filter(|value| !value.trim().is_empty());
    }

    pub fn apply_suggestion(&mut self, suggestion: &StyleSuggestion) {
        self.style.apply_suggestion(suggestion);
    }

    pub fn payload(&self) -> String {
        self.content.payload()
    }
}
