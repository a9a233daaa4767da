//! Typed host-domain contracts shared by the desktop runtime and its browser adapters.
//!
//! This crate is the API-first boundary for platform services. It exposes the layout,
//! audio, document, and asset contracts the runtime consumes, plus no-op and in-memory
//! adapters for headless use. Concrete browser adapters live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod assets;
pub mod audio;
pub mod document;
pub mod host;
pub mod layout;

pub use assets::AssetResolver;
pub use audio::{AudioEvent, AudioService, MemoryAudioService, NoopAudioService, SoundRequest};
pub use document::{DocumentService, MemoryDocumentService, NoopDocumentService};
pub use host::{HostServices, HostStrategy};
pub use layout::{
    ElementBounds, ElementRectProvider, MemoryElementRectProvider, NoopElementRectProvider,
    ScreenRect, ViewportSize,
};
