//! Style presets and the prompt templates sent to image generators.

use minijinja::{Environment, context};
use serde::{Deserialize, Serialize};

use crate::error::{PictogramError, Result};

/// Style identifier selecting the generic guide.
pub const AUTO_STYLE: &str = "auto";

const GENERIC_REFERENCE: &str = "modern icon libraries";
const GENERIC_GUIDE: &str = "Clean, professional, and versatile design suitable for UI/UX.";

/// `(identifier, reference, guide)` in presentation order.
const STYLE_PRESETS: &[(&str, &str, &str)] = &[
    (
        "fontawesome",
        "Font Awesome",
        "Bold, solid shapes with rounded corners. Thick outlines when using strokes. Friendly and approachable design.",
    ),
    (
        "material",
        "Material Design Icons",
        "Following Material Design principles. 24x24 grid-based design. Geometric and consistent stroke weights. Clean and modern.",
    ),
    (
        "feather",
        "Feather Icons",
        "Thin, consistent 2px strokes only. No fills. Light and elegant. Minimalist line art style.",
    ),
    (
        "tabler",
        "Tabler Icons",
        "Medium weight strokes. Rounded line caps and joins. Balanced and versatile design.",
    ),
    (
        "heroicons",
        "Heroicons",
        "Clean and simple. Available in both outline (2px stroke) and solid styles. Optimized for small sizes.",
    ),
    (
        "phosphor",
        "Phosphor Icons",
        "Flexible and consistent. Multiple weights available. Rounded corners and friendly appearance.",
    ),
    (
        "lucide",
        "Lucide Icons",
        "Fork of Feather Icons. Consistent 2px strokes. Community-driven and highly optimized.",
    ),
    (
        "ionicons",
        "Ionicons",
        "Premium design for iOS and Android. Available in outline, filled, and sharp styles.",
    ),
    (
        "bootstrap",
        "Bootstrap Icons",
        "Official Bootstrap icon library. Consistent stroke weights. Works well at small sizes.",
    ),
];

const ICON_PROMPT_TEMPLATE: &str = r#"Create a minimal, geometric pictogram icon for: "{{ prompt }}".
The icon should be designed in the style of {{ reference }} icons:
- {{ guide }}
- Simple geometric shapes (circles, squares, triangles, lines)
- Monochromatic black on white background
- No gradients, shadows, or 3D effects
- Clear and recognizable at small sizes (16x16 to 24x24)
- Professional icon design
- Consistent with {{ reference }} visual language"#;

const IMAGEN_PROMPT_TEMPLATE: &str = r#"Minimalist icon design: {{ subject }}.
Simple, clean, single-color pictogram in the style of {{ reference }} icons. {{ guide }}
Line art style with 2px stroke weight.
White background, black lines only.
No gradients, no shadows, no 3D effects.
Centered, geometric, professional icon suitable for user interface.
Vector-style illustration, high contrast."#;

/// Japanese UI vocabulary mapped to English subjects for Imagen.
const IMAGEN_TRANSLATIONS: &[(&str, &str)] = &[
    ("メール", "email envelope"),
    ("ホーム", "home house"),
    ("設定", "settings gear"),
    ("ユーザー", "user person profile"),
    ("検索", "search magnifying glass"),
    ("メニュー", "menu hamburger lines"),
    ("閉じる", "close x cancel"),
    ("チェック", "check checkmark done"),
    ("スター", "star favorite"),
    ("ハート", "heart love"),
    ("ダウンロード", "download arrow down"),
    ("アップロード", "upload arrow up"),
    ("削除", "delete trash bin"),
    ("編集", "edit pencil write"),
    ("保存", "save disk floppy"),
    ("共有", "share send export"),
    ("ロック", "lock security"),
    ("カレンダー", "calendar date schedule"),
    ("時計", "clock time"),
];

/// The `{reference, guide}` pair interpolated into generation prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleGuide {
    pub reference: String,
    pub guide: String,
}

impl StyleGuide {
    /// Resolves a style identifier.
    ///
    /// Preset identifiers are matched case-insensitively. `None`, blank and
    /// `"auto"` give the generic guide; any other identifier is treated as a
    /// custom style name.
    pub fn resolve(style: Option<&str>) -> Self {
        let style = style.map(str::trim).unwrap_or_default();
        if style.is_empty() || style.eq_ignore_ascii_case(AUTO_STYLE) {
            return Self {
                reference: GENERIC_REFERENCE.to_string(),
                guide: GENERIC_GUIDE.to_string(),
            };
        }

        let normalized = style.to_lowercase();
        match STYLE_PRESETS.iter().find(|(id, _, _)| *id == normalized) {
            Some((_, reference, guide)) => Self {
                reference: (*reference).to_string(),
                guide: (*guide).to_string(),
            },
            None => Self {
                reference: style.to_string(),
                guide: format!(
                    "Designed in the style of {style} icons. Professional and consistent design."
                ),
            },
        }
    }
}

/// Identifiers of the built-in style presets.
pub fn preset_identifiers() -> impl Iterator<Item = &'static str> {
    STYLE_PRESETS.iter().map(|(id, _, _)| *id)
}

/// Builds the instruction sent to general-purpose image models.
pub fn build_icon_prompt(prompt: &str, style: &StyleGuide) -> Result<String> {
    render(
        ICON_PROMPT_TEMPLATE,
        context! {
            prompt => prompt.trim(),
            reference => &style.reference,
            guide => &style.guide,
        },
    )
}

/// Builds the Imagen instruction, translating known Japanese subjects.
pub fn build_imagen_prompt(prompt: &str, style: &StyleGuide) -> Result<String> {
    render(
        IMAGEN_PROMPT_TEMPLATE,
        context! {
            subject => translate_for_imagen(prompt),
            reference => &style.reference,
            guide => &style.guide,
        },
    )
}

/// English subject for a Japanese UI word; other prompts pass through.
pub fn translate_for_imagen(prompt: &str) -> &str {
    let prompt = prompt.trim();
    IMAGEN_TRANSLATIONS
        .iter()
        .find(|(ja, _)| *ja == prompt)
        .map(|(_, en)| *en)
        .unwrap_or(prompt)
}

fn render(template: &str, ctx: minijinja::Value) -> Result<String> {
    Environment::new()
        .render_str(template, ctx)
        .map_err(|e| PictogramError::generation(format!("failed to render prompt: {e}")))
}
