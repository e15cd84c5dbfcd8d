//! Language styles and visual style presets.
//!
//! [`LanguageStyle`] is the closed tone/voice selector compiled into the
//! analysis prompt; [`StylePreset`] is the visual attribute bundle attached
//! to each card. Both are plain enumerated configuration — no dynamic
//! dispatch, just fixed lookup tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tone/voice selector controlling how the LLM rephrases the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageStyle {
    /// 活泼亲切，适合种草分享 (default)
    #[default]
    Xiaohongshu,
    /// 简洁明了，突出重点
    Minimal,
    /// 逻辑清晰，数据支撑
    Scientific,
    /// 正式严谨，适合职场
    Professional,
    /// 自然随性，贴近生活
    Casual,
    /// 优美文雅，富有诗意
    Literary,
}

impl LanguageStyle {
    /// All styles, in presentation order.
    pub const ALL: [LanguageStyle; 6] = [
        LanguageStyle::Xiaohongshu,
        LanguageStyle::Minimal,
        LanguageStyle::Scientific,
        LanguageStyle::Professional,
        LanguageStyle::Casual,
        LanguageStyle::Literary,
    ];

    /// Stable identifier used on the wire and the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageStyle::Xiaohongshu => "xiaohongshu",
            LanguageStyle::Minimal => "minimal",
            LanguageStyle::Scientific => "scientific",
            LanguageStyle::Professional => "professional",
            LanguageStyle::Casual => "casual",
            LanguageStyle::Literary => "literary",
        }
    }

    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageStyle::Xiaohongshu => "小红书风格",
            LanguageStyle::Minimal => "简约风格",
            LanguageStyle::Scientific => "严谨科学",
            LanguageStyle::Professional => "商务专业",
            LanguageStyle::Casual => "轻松日常",
            LanguageStyle::Literary => "文艺优雅",
        }
    }
}

impl fmt::Display for LanguageStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "xiaohongshu" => Ok(LanguageStyle::Xiaohongshu),
            "minimal" => Ok(LanguageStyle::Minimal),
            "scientific" => Ok(LanguageStyle::Scientific),
            "professional" => Ok(LanguageStyle::Professional),
            "casual" => Ok(LanguageStyle::Casual),
            "literary" => Ok(LanguageStyle::Literary),
            other => Err(format!(
                "unknown language style '{other}' (expected one of: xiaohongshu, minimal, \
                 scientific, professional, casual, literary)"
            )),
        }
    }
}

/// Visual card template family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardTemplate {
    #[default]
    Minimal,
    Colorful,
    Elegant,
    Playful,
}

/// A named bundle of visual attributes applied to a card's rendered form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePreset {
    pub id: String,
    pub name: String,
    pub background_color: String,
    pub text_color: String,
    pub accent_color: String,
    pub font_family: String,
    pub font_size: u32,
    pub border_radius: u32,
    pub padding: u32,
    #[serde(default)]
    pub template: CardTemplate,
}

impl Default for StylePreset {
    /// `minimal-blue` — the preset used for synthesized cards and as the
    /// parse fallback when the LLM omits the `stylePreset` field.
    fn default() -> Self {
        StylePreset {
            id: "minimal-blue".into(),
            name: "简约蓝".into(),
            background_color: "#F0F8FF".into(),
            text_color: "#1F2937".into(),
            accent_color: "#3B82F6".into(),
            font_family: "Inter, sans-serif".into(),
            font_size: 16,
            border_radius: 12,
            padding: 24,
            template: CardTemplate::Minimal,
        }
    }
}

/// The four built-in presets offered to the LLM and the renderer.
pub fn builtin_presets() -> Vec<StylePreset> {
    vec![
        StylePreset::default(),
        StylePreset {
            id: "colorful-pink".into(),
            name: "活力粉".into(),
            background_color: "#FDF2F8".into(),
            text_color: "#BE185D".into(),
            accent_color: "#EC4899".into(),
            font_family: "Inter, sans-serif".into(),
            font_size: 16,
            border_radius: 16,
            padding: 20,
            template: CardTemplate::Colorful,
        },
        StylePreset {
            id: "elegant-purple".into(),
            name: "优雅紫".into(),
            background_color: "#F5F3FF".into(),
            text_color: "#581C87".into(),
            accent_color: "#8B5CF6".into(),
            font_family: "Georgia, serif".into(),
            font_size: 15,
            border_radius: 8,
            padding: 28,
            template: CardTemplate::Elegant,
        },
        StylePreset {
            id: "playful-orange".into(),
            name: "俏皮橙".into(),
            background_color: "#FFF7ED".into(),
            text_color: "#9A3412".into(),
            accent_color: "#EA580C".into(),
            font_family: "Comic Sans MS, cursive".into(),
            font_size: 17,
            border_radius: 20,
            padding: 16,
            template: CardTemplate::Playful,
        },
    ]
}
