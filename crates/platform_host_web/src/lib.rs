//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side host wiring layer for sound playback, element
//! measurement, and document-title updates. Every adapter compiles on native targets too,
//! where it degrades to the headless behavior so the workspace builds and tests natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod audio;
pub mod document;
pub mod layout;

pub use adapters::{
    audio_service, build_host_services, document_service, element_rect_provider,
    host_strategy_name, selected_host_strategy, AudioServiceAdapter, DocumentServiceAdapter,
    ElementRectProviderAdapter,
};
pub use audio::WebAudioService;
pub use document::WebDocumentService;
pub use layout::WebElementRectProvider;
