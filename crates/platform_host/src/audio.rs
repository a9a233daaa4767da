//! Audio playback service contracts and adapters.
//!
//! Playback is fire-and-forget: adapters start playback and return immediately. The returned
//! `Result` only reports failures the host can observe synchronously (for example an audio
//! element that cannot be constructed); asynchronous rejections such as autoplay blocking are
//! swallowed inside the adapter.

use std::{cell::RefCell, rc::Rc};

/// One playback request with an already-resolved URL.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundRequest {
    /// Resolved, host-loadable URL.
    pub url: String,
    /// Volume in `0.0..=1.0`.
    pub volume: f64,
}

impl SoundRequest {
    /// Builds a request, clamping `volume` into `0.0..=1.0`.
    pub fn new(url: impl Into<String>, volume: f64) -> Self {
        Self {
            url: url.into(),
            volume: volume.clamp(0.0, 1.0),
        }
    }
}

/// Host service for short UI sounds.
pub trait AudioService {
    /// Starts playback of `request`.
    fn play(&self, request: &SoundRequest) -> Result<(), String>;

    /// Performs a silent play/pause of `url` so later playback is not blocked by autoplay
    /// policy. Called from inside a user gesture.
    fn unlock(&self, url: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Audio service for targets without sound output.
pub struct NoopAudioService;

impl AudioService for NoopAudioService {
    fn play(&self, _request: &SoundRequest) -> Result<(), String> {
        Ok(())
    }

    fn unlock(&self, _url: &str) -> Result<(), String> {
        Ok(())
    }
}

/// Event recorded by [`MemoryAudioService`].
#[derive(Debug, Clone, PartialEq)]
pub enum AudioEvent {
    /// A playback request.
    Played(SoundRequest),
    /// An unlock request for the given URL.
    Unlocked(String),
}

#[derive(Debug, Clone, Default)]
/// In-memory audio service that records every request.
///
/// A failing instance still records requests and then reports an error, which lets callers
/// verify that playback failures never escape.
pub struct MemoryAudioService {
    events: Rc<RefCell<Vec<AudioEvent>>>,
    fail: bool,
}

impl MemoryAudioService {
    /// Returns a recorder whose every call fails after recording.
    pub fn failing() -> Self {
        Self {
            events: Rc::default(),
            fail: true,
        }
    }

    /// Returns a snapshot of recorded events in call order.
    pub fn events(&self) -> Vec<AudioEvent> {
        self.events.borrow().clone()
    }

    /// Returns only the playback requests.
    pub fn played(&self) -> Vec<SoundRequest> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                AudioEvent::Played(request) => Some(request.clone()),
                AudioEvent::Unlocked(_) => None,
            })
            .collect()
    }

    fn record(&self, event: AudioEvent) -> Result<(), String> {
        self.events.borrow_mut().push(event);
        if self.fail {
            Err("audio output unavailable".to_string())
        } else {
            Ok(())
        }
    }
}

impl AudioService for MemoryAudioService {
    fn play(&self, request: &SoundRequest) -> Result<(), String> {
        self.record(AudioEvent::Played(request.clone()))
    }

    fn unlock(&self, url: &str) -> Result<(), String> {
        self.record(AudioEvent::Unlocked(url.to_string()))
    }
}
