use serde::{Deserialize, Serialize};

use crate::models::suggestion::StyleSuggestion;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DotType {
    #[default]
    Square,
    Dots,
    Rounded,
    ExtraRounded,
    Classy,
    ClassyRounded,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CornerSquareType {
    #[default]
    Square,
    Dot,
    ExtraRounded,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CornerDotType {
    #[default]
    Square,
    Dot,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorCorrection {
    L,
    M,
    #[default]
    Q,
    H,
}

/// Accepted pixel side of a rendered code.
pub const MIN_QR_SIZE: u32 = 64;
pub const MAX_QR_SIZE: u32 = 2048;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Svg,
    Webp,
}

impl DotType {
    pub const ALL: [DotType; 6] = [
        DotType::Square,
        DotType::Dots,
        DotType::Rounded,
        DotType::ExtraRounded,
        DotType::Classy,
        DotType::ClassyRounded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DotType::Square => "square",
            DotType::Dots => "dots",
            DotType::Rounded => "rounded",
            DotType::ExtraRounded => "extra-rounded",
            DotType::Classy => "classy",
            DotType::ClassyRounded => "classy-rounded",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

impl CornerSquareType {
    pub const ALL: [CornerSquareType; 3] = [
        CornerSquareType::Square,
        CornerSquareType::Dot,
        CornerSquareType::ExtraRounded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CornerSquareType::Square => "square",
            CornerSquareType::Dot => "dot",
            CornerSquareType::ExtraRounded => "extra-rounded",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

impl CornerDotType {
    pub const ALL: [CornerDotType; 2] = [CornerDotType::Square, CornerDotType::Dot];

    pub fn as_str(&self) -> &'static str {
        match self {
            CornerDotType::Square => "square",
            CornerDotType::Dot => "dot",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
            ExportFormat::Webp => "webp",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Webp => "image/webp",
        }
    }
}

/// Cosmetic parameters for the rendered code. Never affects the payload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleConfig {
    pub fg_color: String,
    pub bg_color: String,
    pub dot_type: DotType,
    pub corner_square_type: CornerSquareType,
    pub corner_square_color: String,
    pub corner_dot_type: CornerDotType,
    pub corner_dot_color: String,
    pub error_level: ErrorCorrection,
    pub margin: bool,
    /// Data URI or bare base64 image.
    pub logo: Option<String>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            fg_color: String::from("#000000"),
            bg_color: String::from("#ffffff"),
            dot_type: DotType::default(),
            corner_square_type: CornerSquareType::default(),
            corner_square_color: String::from("#000000"),
            corner_dot_type: CornerDotType::default(),
            corner_dot_color: String::from("#000000"),
            error_level: ErrorCorrection::default(),
            margin: true,
            logo: None,
        }
    }
}

impl StyleConfig {
    /// Take colors and shapes from a validated suggestion. Error level, margin
    /// and logo are left alone.
    pub fn apply_suggestion(&mut self, suggestion: &StyleSuggestion) {
        self.fg_color = suggestion.primary_color.clone();
        self.bg_color = suggestion.secondary_color.clone();
        self.dot_type = suggestion.dot_type;
        self.corner_square_type = suggestion.corner_square_type;
        self.corner_square_color = suggestion.corner_square_color.clone();
        self.corner_dot_type = suggestion.corner_dot_type;
        self.corner_dot_color = suggestion.corner_dot_color.clone();
    }
}
