//! Resolution results, style presets and prompt construction.

pub mod model;
pub mod style;

pub use model::{Alternative, GenerationResult, IconMetadata, IconSource, ResolveRequest};
pub use style::{
    AUTO_STYLE, StyleGuide, build_icon_prompt, build_imagen_prompt, preset_identifiers,
    translate_for_imagen,
};
