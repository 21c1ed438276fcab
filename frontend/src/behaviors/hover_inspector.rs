//! Tooltip-position follower for `.hover-inspector` elements
//!
//! Tracks the pointer inside an inspector element and mirrors its position
//! into the CSS custom properties the tooltip is drawn from. Purely
//! derived, stateless per event.

use crate::behaviors::Behavior;
use crate::debug_utils;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

/// Offset the tooltip right of and above the pointer so it never sits
/// under the cursor.
pub fn tooltip_position(client_x: f64, client_y: f64, offset_px: f64) -> (f64, f64) {
    (client_x + offset_px, client_y - offset_px)
}

pub struct HoverInspector {
    pub offset_px: f64,
}

impl Behavior for HoverInspector {
    fn selector(&self) -> &'static str {
        ".hover-inspector"
    }

    fn attach(&self, element: &web_sys::Element) {
        let offset_px = self.offset_px;
        let mousemove_closure = Closure::wrap(Box::new({
            let element = element.clone();
            move |event: web_sys::MouseEvent| {
                let (left, top) = tooltip_position(
                    event.client_x() as f64,
                    event.client_y() as f64,
                    offset_px,
                );

                if let Some(html_el) = element.dyn_ref::<web_sys::HtmlElement>() {
                    let style = html_el.style();
                    style
                        .set_property("--tooltip-left", &format!("{left}px"))
                        .unwrap();
                    style
                        .set_property("--tooltip-top", &format!("{top}px"))
                        .unwrap();
                }

                debug_utils::debug_throttled(&format!("tooltip follows to ({left}, {top})"));
            }
        }) as Box<dyn FnMut(web_sys::MouseEvent)>);

        element
            .add_event_listener_with_callback(
                "mousemove",
                mousemove_closure.as_ref().unchecked_ref(),
            )
            .unwrap();

        mousemove_closure.forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tooltip_offsets_pointer_exactly() {
        assert_eq!(tooltip_position(100.0, 200.0, 15.0), (115.0, 185.0));
        assert_eq!(tooltip_position(0.0, 0.0, 15.0), (15.0, -15.0));
    }

    #[test]
    fn tooltip_offset_is_symmetric_around_pointer() {
        let (left, top) = tooltip_position(640.0, 360.0, 15.0);
        assert_eq!(left - 640.0, 15.0);
        assert_eq!(360.0 - top, 15.0);
    }
}
