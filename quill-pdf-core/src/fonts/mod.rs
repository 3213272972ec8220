//! Font resources: the standard 14 fonts, per-document registration and
//! ToUnicode CMaps.

mod cmap;
mod core_widths;
mod font_metrics;
mod registry;

pub use cmap::{to_unicode_cmap, UnicodeMapping};
pub use font_metrics::{
    CoreFontMetrics, FontCategory, FontMetrics, FontMetricsProvider, CP1252, CP1252_UNICODE_MAP,
    SYMBOL_UNICODE_MAP, ZAPF_DINGBATS_UNICODE_MAP,
};
pub use registry::{
    font_key, normalize_style, FontEntry, FontObjectTable, FontRegistry, ResolvedFont,
    CORE_FAMILIES,
};
