//! Document-title adapter.

use platform_host::DocumentService;

#[derive(Debug, Clone, Copy, Default)]
/// Browser adapter that writes `document.title`.
pub struct WebDocumentService;

impl DocumentService for WebDocumentService {
    fn set_title(&self, title: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(document) = web_sys::window().and_then(|window| window.document()) {
                document.set_title(title);
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        let _ = title;
    }
}
