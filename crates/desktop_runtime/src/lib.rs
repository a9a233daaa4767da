//! Headless runtime for the XP-style portfolio desktop.
//!
//! The reducer in [`reducer`] owns every state transition: boot/login/welcome/desktop phases,
//! the window registry, icon selection, window dragging, and the welcome toast. Side effects
//! leave the reducer as [`RuntimeEffect`] values and are executed by a
//! [`host::DesktopHostContext`], either inside the virtual-clock [`DesktopSession`] or inside
//! the Leptos [`DesktopProvider`].

pub mod apps;
pub mod config;
pub mod content;
pub mod drag;
pub mod effect_executor;
pub mod host;
pub mod model;
pub mod notification;
pub mod phase;
pub mod reducer;
pub mod runtime_context;
pub mod selection;
pub mod session;
pub mod timers;
pub mod window_manager;

pub use config::{ConfigError, RuntimeConfig};
pub use content::{ContentError, ContentKind, PortfolioContent, WindowContent};
pub use host::DesktopHostContext;
pub use model::*;
pub use notification::{compute_toast_position, ToastPosition, ToastSize, ToastState};
pub use phase::{document_title, FadeStage, PhaseState, PhaseTransition};
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};
pub use selection::{IconRect, SelectionBox, SelectionState};
pub use session::DesktopSession;
pub use timers::{TimerKind, TimerToken};
