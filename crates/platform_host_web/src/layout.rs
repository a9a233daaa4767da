//! Layout measurement adapter backed by `getBoundingClientRect` and the window's inner size.

use platform_host::{ElementBounds, ElementRectProvider, ViewportSize};

#[cfg(target_arch = "wasm32")]
fn round_px(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

#[derive(Debug, Clone, Copy, Default)]
/// Browser layout adapter that measures elements by DOM id on every call.
///
/// Bounds are passed through unrounded; only the viewport size is rounded here.
pub struct WebElementRectProvider;

impl ElementRectProvider for WebElementRectProvider {
    fn element_bounds(&self, element_id: &str) -> Option<ElementBounds> {
        #[cfg(target_arch = "wasm32")]
        {
            let element = web_sys::window()?
                .document()?
                .get_element_by_id(element_id)?;
            let rect = element.get_bounding_client_rect();
            Some(ElementBounds::new(
                rect.x(),
                rect.y(),
                rect.width(),
                rect.height(),
            ))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = element_id;
            None
        }
    }

    fn viewport_size(&self) -> ViewportSize {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(window) = web_sys::window() else {
                return ViewportSize::default();
            };
            let dimension = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
                value.ok().and_then(|value| value.as_f64()).map(round_px)
            };
            match (dimension(window.inner_width()), dimension(window.inner_height())) {
                (Some(width), Some(height)) => ViewportSize { width, height },
                _ => ViewportSize::default(),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            ViewportSize::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn native_fallback_measures_nothing() {
        let layout = WebElementRectProvider;
        assert_eq!(layout.element_rect("desktop-surface"), None);
        assert_eq!(layout.element_bounds("tray-info-button"), None);
        assert_eq!(layout.viewport_size(), ViewportSize::default());
    }
}
