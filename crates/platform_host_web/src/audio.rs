//! Audio host-service adapter backed by `HTMLAudioElement`.

use platform_host::{AudioService, SoundRequest};

#[derive(Debug, Clone, Copy, Default)]
/// Browser audio adapter. Each request plays through a fresh `Audio` element.
///
/// Autoplay rejections surface asynchronously and are swallowed; only failures to construct or
/// start the element are reported.
pub struct WebAudioService;

impl AudioService for WebAudioService {
    fn play(&self, request: &SoundRequest) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let audio = web_sys::HtmlAudioElement::new_with_src(&request.url)
                .map_err(|err| format!("audio element unavailable: {err:?}"))?;
            audio.set_volume(request.volume);
            let promise = audio
                .play()
                .map_err(|err| format!("audio playback failed: {err:?}"))?;
            wasm_bindgen_futures::spawn_local(async move {
                let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
            });
            Ok(())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = request;
            Ok(())
        }
    }

    fn unlock(&self, url: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let audio = web_sys::HtmlAudioElement::new_with_src(url)
                .map_err(|err| format!("audio element unavailable: {err:?}"))?;
            audio.set_volume(0.0);
            let promise = audio
                .play()
                .map_err(|err| format!("audio unlock failed: {err:?}"))?;
            wasm_bindgen_futures::spawn_local(async move {
                if wasm_bindgen_futures::JsFuture::from(promise).await.is_ok() {
                    let _ = audio.pause();
                    audio.set_current_time(0.0);
                }
            });
            Ok(())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = url;
            Ok(())
        }
    }
}
