//! Prompts for LLM-based content analysis and title generation.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — changing the JSON contract or a style's
//!    voice requires editing exactly one place.
//!
//! 2. **Testability** — unit tests can inspect prompts directly without
//!    spinning up a real provider, making prompt regressions easy to catch.
//!
//! Callers can override the analysis system prompt via
//! [`crate::config::AnalysisConfig::system_prompt`]; the constants here are
//! used only when no override is provided.

use crate::style::LanguageStyle;
use crate::types::Paragraph;

/// Default system prompt for the content-analysis call.
pub const ANALYSIS_SYSTEM_PROMPT: &str = "你是一位内容编辑专家，擅长将长文改写成适合社交平台分享的卡片文案。\
你只输出JSON，不输出任何解释或Markdown围栏。";

/// System prompt for the title-generation call.
pub const TITLES_SYSTEM_PROMPT: &str = "你是一位标题创作专家，擅长为内容写出吸引眼球的标题。\
你只输出JSON，不输出任何解释或Markdown围栏。";

/// Fixed per-style instruction block compiled into the analysis prompt.
///
/// Plain enumerated configuration — the closed [`LanguageStyle`] enum maps to
/// a static description, never to dynamic dispatch.
pub fn style_instruction(style: LanguageStyle) -> &'static str {
    match style {
        LanguageStyle::Xiaohongshu => {
            "语言风格：小红书风格。活泼亲切，适合种草分享，多用『姐妹们必看！』『真的绝绝子』这类口语表达，emoji丰富。"
        }
        LanguageStyle::Minimal => {
            "语言风格：简约风格。简洁明了，突出重点，短句为主，一目了然，不堆砌修饰词。"
        }
        LanguageStyle::Scientific => {
            "语言风格：严谨科学。逻辑清晰，数据支撑，多用『研究表明』『数据显示』等表述，避免夸张。"
        }
        LanguageStyle::Professional => {
            "语言风格：商务专业。正式严谨，适合职场，注重专业分析与深度解读。"
        }
        LanguageStyle::Casual => {
            "语言风格：轻松日常。自然随性，贴近生活，像朋友间『简单聊聊』的口吻。"
        }
        LanguageStyle::Literary => {
            "语言风格：文艺优雅。优美文雅，富有诗意，讲究意境与遣词。"
        }
    }
}

/// Build the user prompt for the content-analysis call.
///
/// The segmented paragraphs are embedded with their ids, and the model is
/// required to echo each id back unchanged so replies stay traceable to
/// their source paragraphs.
pub fn build_analysis_prompt(paragraphs: &[Paragraph], style: LanguageStyle) -> String {
    let mut blocks = String::new();
    for p in paragraphs {
        blocks.push_str(&format!("[{}] {}\n\n", p.id, p.content));
    }

    // r## because the JSON contract below contains `"#` (hex colour values).
    format!(
        r##"请分析以下段落，为每个段落改写出适合分享卡片的文案，并提取关键信息。

{style}

段落内容（每段以 [id] 开头）：
{blocks}
请按以下JSON格式返回分析结果：
{{
  "paragraphs": [
    {{
      "id": "原样返回输入中的段落id",
      "content": "段落原文",
      "order": 段落序号,
      "type": "段落类型(text/heading/list/quote)",
      "keyPoints": ["关键点1", "关键点2"],
      "summary": "段落摘要(符合指定语言风格的简短描述)",
      "emoji": "相关emoji",
      "tags": ["标签1", "标签2"],
      "stylePreset": {{
        "id": "minimal-blue|colorful-pink|elegant-purple|playful-orange",
        "name": "风格名称",
        "backgroundColor": "#颜色代码",
        "textColor": "#颜色代码",
        "accentColor": "#颜色代码",
        "fontFamily": "字体",
        "fontSize": 16,
        "borderRadius": 12,
        "padding": 24,
        "template": "minimal|colorful|elegant|playful"
      }}
    }}
  ]
}}

要求：
1. 每个段落摘要要生动有趣，符合指定的语言风格
2. emoji要贴切，增加趣味性
3. 标签要热门且相关，每段不超过5个
4. 只输出JSON"##,
        style = style_instruction(style),
        blocks = blocks,
    )
}

/// Build the user prompt for the title-generation call.
pub fn build_titles_prompt(text: &str, style: LanguageStyle) -> String {
    format!(
        r#"请为以下内容生成3个吸引人的标题：

{style}

内容：
{text}

请按以下JSON格式返回：
{{
  "titles": ["标题1", "标题2", "标题3"],
  "selectedIndex": 0
}}

要求：
1. 标题要吸引眼球，符合指定的语言风格
2. 可以使用emoji增加趣味性
3. 长度控制在25字以内
4. 要有号召性或悬念
5. 只输出JSON"#,
        style = style_instruction(style),
        text = text,
    )
}
