use std::fmt;

use platform_host::ViewportSize;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    config::{ConfigError, RuntimeConfig},
    content::{ContentError, PortfolioContent, WindowContent},
    drag::DragSession,
    notification::ToastState,
    phase::PhaseState,
    selection::SelectionState,
    timers::TimerTable,
};

/// Stable identifier shared by a catalog window and its desktop icon (for example `"about"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WindowId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque icon reference handed to the rendering layer (an image path).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IconHandle(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ApplicationPhase {
    #[default]
    Boot,
    Login,
    Welcome,
    Desktop,
}

impl ApplicationPhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boot => "boot",
            Self::Login => "login",
            Self::Welcome => "welcome",
            Self::Desktop => "desktop",
        }
    }
}

impl fmt::Display for ApplicationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

impl PointerPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// What the pointer landed on when a desktop pointer-down was observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerTarget {
    /// Empty desktop surface (wallpaper).
    DesktopSurface,
    Icon(WindowId),
    Window(WindowId),
    Taskbar,
    Toast,
}

impl PointerTarget {
    /// Only the bare surface may start a lasso; every other surface is marked non-selectable.
    pub fn starts_lasso(&self) -> bool {
        matches!(self, Self::DesktopSurface)
    }
}

/// Static desktop icon: never mutated, its screen rectangle is measured on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconDescriptor {
    pub id: WindowId,
    pub label: String,
    pub icon: IconHandle,
}

/// One start-menu launcher row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartMenuEntry {
    pub id: WindowId,
    pub label: String,
    pub subtitle: String,
    pub icon: IconHandle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenWindowEntry {
    pub id: WindowId,
    pub title: String,
    pub icon: IconHandle,
    pub content: WindowContent,
    /// Position at creation; never updated afterwards.
    pub initial_position: WindowPosition,
    /// Current top-left, moved only by title-bar drags.
    pub position: WindowPosition,
    /// Higher is further in front; used directly as the paint z-index.
    pub stack_order: u32,
}

/// One taskbar window-switcher button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskbarEntry {
    pub id: WindowId,
    pub title: String,
    pub icon: IconHandle,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DesktopState {
    pub phase: PhaseState,
    /// Open windows in open order.
    pub windows: Vec<OpenWindowEntry>,
    pub active_window: Option<WindowId>,
    pub selection: SelectionState,
    pub toast: ToastState,
    pub start_menu_open: bool,
    pub audio_unlocked: bool,
    pub viewport: ViewportSize,
    pub timers: TimerTable,
}

impl DesktopState {
    pub fn window(&self, window_id: &WindowId) -> Option<&OpenWindowEntry> {
        self.windows.iter().find(|w| &w.id == window_id)
    }

    pub fn is_open(&self, window_id: &WindowId) -> bool {
        self.window(window_id).is_some()
    }

    /// Open windows sorted back-to-front.
    pub fn paint_order(&self) -> Vec<&OpenWindowEntry> {
        let mut ordered: Vec<_> = self.windows.iter().collect();
        ordered.sort_by_key(|w| w.stack_order);
        ordered
    }

    pub fn taskbar_entries(&self) -> Vec<TaskbarEntry> {
        self.windows
            .iter()
            .map(|w| TaskbarEntry {
                id: w.id.clone(),
                title: w.title.clone(),
                icon: w.icon.clone(),
                active: self.active_window.as_ref() == Some(&w.id),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
}

#[derive(Debug, Error)]
pub enum EnvError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Content(#[from] ContentError),
}

/// Read-only inputs shared by every reducer call: timings and the static portfolio content.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeEnv {
    pub config: RuntimeConfig,
    pub content: PortfolioContent,
}

impl RuntimeEnv {
    pub fn new(config: RuntimeConfig, content: PortfolioContent) -> Self {
        Self { config, content }
    }

    /// Configuration and portfolio content embedded at build time.
    pub fn embedded() -> Result<Self, EnvError> {
        Ok(Self::new(
            RuntimeConfig::embedded()?,
            PortfolioContent::embedded()?,
        ))
    }
}
