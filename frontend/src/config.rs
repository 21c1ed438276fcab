//! Bootstrap configuration
//!
//! Resolved once at startup from optional page meta tags, with compiled
//! defaults. Config is never an error surface: absent or malformed values
//! fall back silently.

use wasm_bindgen::JsCast;

pub const DEFAULT_PROGRESS_DELAY_MS: u32 = 120;
pub const DEFAULT_TOOLTIP_OFFSET_PX: f64 = 15.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BootstrapConfig {
    /// Display delay before the loading bar shows.
    pub progress_delay_ms: u32,
    /// Pointer offset applied by the hover inspector.
    pub tooltip_offset_px: f64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            progress_delay_ms: DEFAULT_PROGRESS_DELAY_MS,
            tooltip_offset_px: DEFAULT_TOOLTIP_OFFSET_PX,
        }
    }
}

impl BootstrapConfig {
    pub fn from_document() -> Self {
        Self {
            progress_delay_ms: resolve_progress_delay(
                meta_content("pagelift:progress-delay-ms").as_deref(),
            ),
            tooltip_offset_px: resolve_tooltip_offset(
                meta_content("pagelift:tooltip-offset-px").as_deref(),
            ),
        }
    }
}

/// Read a named meta tag's content. Empty content counts as absent.
pub fn meta_content(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let element = document
        .query_selector(&format!("meta[name='{name}']"))
        .ok()??;
    let meta: web_sys::HtmlMetaElement = element.dyn_into().ok()?;
    let content = meta.content();
    if content.is_empty() { None } else { Some(content) }
}

/// Read a meta tag the page is required to carry. Missing tags are a fatal
/// startup precondition, not a recoverable error.
pub fn required_meta(name: &str) -> String {
    meta_content(name)
        .unwrap_or_else(|| panic!("required <meta name=\"{name}\"> tag missing from page"))
}

fn resolve_progress_delay(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(DEFAULT_PROGRESS_DELAY_MS)
}

fn resolve_tooltip_offset(raw: Option<&str>) -> f64 {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(DEFAULT_TOOLTIP_OFFSET_PX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_parse_when_well_formed() {
        assert_eq!(resolve_progress_delay(Some("250")), 250);
        assert_eq!(resolve_progress_delay(Some(" 80 ")), 80);
        assert_eq!(resolve_tooltip_offset(Some("20.5")), 20.5);
    }

    #[test]
    fn malformed_or_absent_overrides_fall_back() {
        assert_eq!(resolve_progress_delay(None), DEFAULT_PROGRESS_DELAY_MS);
        assert_eq!(
            resolve_progress_delay(Some("soon")),
            DEFAULT_PROGRESS_DELAY_MS
        );
        assert_eq!(resolve_tooltip_offset(Some("")), DEFAULT_TOOLTIP_OFFSET_PX);
        assert_eq!(
            BootstrapConfig::default().progress_delay_ms,
            DEFAULT_PROGRESS_DELAY_MS
        );
    }
}
