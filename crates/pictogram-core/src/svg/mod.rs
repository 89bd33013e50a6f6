//! SVG validation and canonicalization.
//!
//! Everything here is pure text/tree rewriting. Apart from [`pretty_print`]
//! the transforms degrade gracefully: input that is not valid SVG is
//! returned unchanged.

mod dom;
pub mod format;
pub mod recolor;
pub mod strip;
pub mod traced;
pub mod validate;

pub use format::pretty_print;
pub use recolor::{
    DEFAULT_EXPORT_SIZE, MAX_EXPORT_SIZE, MIN_EXPORT_SIZE, clamp_export_size,
    recolor_and_resize_for_export, recolor_for_display,
};
pub use strip::{ensure_safe_svg, primary_path_data, strip_decorative_attributes};
pub use traced::{TRACED_ICON_SIZE, finalize_traced_svg};
pub use validate::is_valid_svg;
