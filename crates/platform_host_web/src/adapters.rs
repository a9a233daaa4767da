use std::rc::Rc;

use platform_host::{
    AssetResolver, AudioService, DocumentService, ElementRectProvider, HostServices, HostStrategy,
    NoopAudioService, NoopDocumentService, NoopElementRectProvider,
};

use crate::{WebAudioService, WebDocumentService, WebElementRectProvider};

/// Returns the host strategy for the active build target.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(target_arch = "wasm32")]
    {
        HostStrategy::Browser
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        HostStrategy::Headless
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    selected_host_strategy().as_str()
}

/// Adapter enum that erases the concrete audio backend behind [`AudioService`].
#[derive(Debug, Clone, Copy)]
pub enum AudioServiceAdapter {
    /// `HTMLAudioElement` playback.
    Browser(WebAudioService),
    /// Silent fallback for non-browser builds.
    Headless(NoopAudioService),
}

impl AudioService for AudioServiceAdapter {
    fn play(&self, request: &platform_host::SoundRequest) -> Result<(), String> {
        match self {
            Self::Browser(service) => service.play(request),
            Self::Headless(service) => service.play(request),
        }
    }

    fn unlock(&self, url: &str) -> Result<(), String> {
        match self {
            Self::Browser(service) => service.unlock(url),
            Self::Headless(service) => service.unlock(url),
        }
    }
}

/// Adapter enum that erases the concrete layout backend behind [`ElementRectProvider`].
#[derive(Debug, Clone, Copy)]
pub enum ElementRectProviderAdapter {
    /// DOM measurement.
    Browser(WebElementRectProvider),
    /// Fixed default viewport with no mounted elements.
    Headless(NoopElementRectProvider),
}

impl ElementRectProvider for ElementRectProviderAdapter {
    fn element_bounds(&self, element_id: &str) -> Option<platform_host::ElementBounds> {
        match self {
            Self::Browser(provider) => provider.element_bounds(element_id),
            Self::Headless(provider) => provider.element_bounds(element_id),
        }
    }

    fn viewport_size(&self) -> platform_host::ViewportSize {
        match self {
            Self::Browser(provider) => provider.viewport_size(),
            Self::Headless(provider) => provider.viewport_size(),
        }
    }
}

/// Adapter enum that erases the concrete document backend behind [`DocumentService`].
#[derive(Debug, Clone, Copy)]
pub enum DocumentServiceAdapter {
    /// `document.title` writes.
    Browser(WebDocumentService),
    /// Discards titles.
    Headless(NoopDocumentService),
}

impl DocumentService for DocumentServiceAdapter {
    fn set_title(&self, title: &str) {
        match self {
            Self::Browser(service) => service.set_title(title),
            Self::Headless(service) => service.set_title(title),
        }
    }
}

/// Builds the audio adapter for the selected host strategy.
pub fn audio_service() -> AudioServiceAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => AudioServiceAdapter::Browser(WebAudioService),
        HostStrategy::Headless => AudioServiceAdapter::Headless(NoopAudioService),
    }
}

/// Builds the layout adapter for the selected host strategy.
pub fn element_rect_provider() -> ElementRectProviderAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => ElementRectProviderAdapter::Browser(WebElementRectProvider),
        HostStrategy::Headless => ElementRectProviderAdapter::Headless(NoopElementRectProvider),
    }
}

/// Builds the document adapter for the selected host strategy.
pub fn document_service() -> DocumentServiceAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => DocumentServiceAdapter::Browser(WebDocumentService),
        HostStrategy::Headless => DocumentServiceAdapter::Headless(NoopDocumentService),
    }
}

/// Assembles the host bundle injected into the desktop runtime.
pub fn build_host_services(asset_base_path: &str) -> HostServices {
    HostServices {
        audio: Rc::new(audio_service()),
        layout: Rc::new(element_rect_provider()),
        document: Rc::new(document_service()),
        assets: AssetResolver::new(asset_base_path),
        host_strategy: selected_host_strategy(),
    }
}
