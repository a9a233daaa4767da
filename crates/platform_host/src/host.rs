//! Shared host-bundle model for browser and headless runtime composition.

use std::rc::Rc;

use crate::{
    AssetResolver, AudioService, DocumentService, ElementRectProvider, NoopAudioService,
    NoopDocumentService, NoopElementRectProvider,
};

/// Stable host strategy selected for the current build/runtime composition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser-backed runtime composition.
    Browser,
    /// Headless composition (tests, native tooling) with no-op or in-memory adapters.
    Headless,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Headless => "headless",
        }
    }
}

/// Runtime-selected host service bundle injected into the desktop runtime.
///
/// Environment-specific adapter selection happens before this bundle crosses into
/// `desktop_runtime`, so the runtime never imports browser types.
#[derive(Clone)]
pub struct HostServices {
    /// Sound playback.
    pub audio: Rc<dyn AudioService>,
    /// Element-rect and viewport measurement.
    pub layout: Rc<dyn ElementRectProvider>,
    /// Document title updates.
    pub document: Rc<dyn DocumentService>,
    /// Public asset URL resolution.
    pub assets: AssetResolver,
    /// Stable strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Headless bundle with no-op adapters and a root asset base path.
    pub fn headless() -> Self {
        Self {
            audio: Rc::new(NoopAudioService),
            layout: Rc::new(NoopElementRectProvider),
            document: Rc::new(NoopDocumentService),
            assets: AssetResolver::default(),
            host_strategy: HostStrategy::Headless,
        }
    }

    /// Replaces the audio adapter.
    pub fn with_audio(mut self, audio: Rc<dyn AudioService>) -> Self {
        self.audio = audio;
        self
    }

    /// Replaces the layout adapter.
    pub fn with_layout(mut self, layout: Rc<dyn ElementRectProvider>) -> Self {
        self.layout = layout;
        self
    }

    /// Replaces the document adapter.
    pub fn with_document(mut self, document: Rc<dyn DocumentService>) -> Self {
        self.document = document;
        self
    }

    /// Replaces the asset resolver.
    pub fn with_assets(mut self, assets: AssetResolver) -> Self {
        self.assets = assets;
        self
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices")
            .field("assets", &self.assets)
            .field("host_strategy", &self.host_strategy)
            .finish_non_exhaustive()
    }
}
