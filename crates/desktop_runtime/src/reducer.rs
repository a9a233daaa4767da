//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use platform_host::{ElementBounds, ScreenRect, ViewportSize};
use thiserror::Error;

use crate::{
    drag,
    model::{
        ApplicationPhase, DesktopState, InteractionState, PointerButton, PointerPosition,
        PointerTarget, RuntimeEnv, WindowId,
    },
    notification::{self, ToastSize},
    phase,
    selection::IconRect,
    timers::{TimerKind, TimerToken},
    window_manager,
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Enter Boot from scratch, dropping any session and pending timers.
    PowerOn,
    /// Leave the login screen for the welcome screen.
    Login,
    /// Return to the login screen, closing everything.
    LogOff,
    /// Return to the boot screen, closing everything.
    Restart,
    /// A host timer scheduled through [`RuntimeEffect::ScheduleTimer`] elapsed.
    TimerFired(TimerToken),
    /// Open a catalog window, or focus it when already open.
    OpenWindow {
        /// Catalog id.
        window_id: WindowId,
    },
    /// Raise a window and make it active (also used by taskbar buttons).
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Close a window.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Toggle the start menu open/closed.
    ToggleStartMenu,
    /// Close the start menu if open.
    CloseStartMenu,
    /// Open a window from the start menu and close the menu.
    LaunchFromStartMenu {
        /// Catalog id.
        window_id: WindowId,
    },
    /// Single click on a desktop icon.
    SelectIcon {
        /// Clicked icon.
        icon_id: WindowId,
    },
    /// Double click on a desktop icon.
    ActivateIcon {
        /// Activated icon.
        icon_id: WindowId,
    },
    /// Pointer-down on the desktop layer.
    BeginDesktopSelection {
        /// Pointer in viewport coordinates.
        pointer: PointerPosition,
        /// Desktop surface rectangle in viewport coordinates.
        surface: ScreenRect,
        /// Pressed button.
        button: PointerButton,
        /// Surface under the pointer.
        target: PointerTarget,
    },
    /// Pointer-move while a lasso may be active.
    UpdateDesktopSelection {
        /// Pointer in viewport coordinates.
        pointer: PointerPosition,
        /// Current icon rectangles in viewport coordinates.
        icon_rects: Vec<IconRect>,
    },
    /// Pointer-up ending a lasso.
    EndDesktopSelection,
    /// Title-bar pointer-down.
    BeginWindowDrag {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer in viewport coordinates.
        pointer: PointerPosition,
    },
    /// Pointer-move during a title-bar drag.
    UpdateWindowDrag {
        /// Pointer in viewport coordinates.
        pointer: PointerPosition,
    },
    /// Pointer-up ending a title-bar drag.
    EndWindowDrag,
    /// Tray info button: show the welcome toast now.
    ShowToast,
    /// Toast close button or click.
    DismissToast,
    /// Tray button rectangle changed (or disappeared).
    SetToastAnchor {
        /// New anchor bounds.
        anchor: Option<ElementBounds>,
    },
    /// Rendered toast size measured by the host.
    ToastMeasured {
        /// Measured size.
        size: ToastSize,
    },
    /// Browser viewport resized.
    ViewportResized {
        /// New viewport size.
        viewport: ViewportSize,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the host to execute.
pub enum RuntimeEffect {
    /// Fire [`DesktopAction::TimerFired`] with `token` after `delay_ms`.
    ScheduleTimer {
        /// Timer identity to report back.
        token: TimerToken,
        /// Delay in milliseconds.
        delay_ms: u32,
    },
    /// Cancel a previously scheduled timer.
    CancelTimer(TimerToken),
    /// Play a sound asset (best-effort).
    PlaySound {
        /// Asset path, resolved against the asset base by the host.
        path: String,
        /// Volume in `0.0..=1.0`.
        volume: f64,
    },
    /// Prime audio playback inside a user gesture.
    UnlockAudio {
        /// Asset path, resolved against the asset base by the host.
        path: String,
    },
    /// Replace the document title.
    SetDocumentTitle(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that cannot apply to the current state.
pub enum ReducerError {
    /// A timer fired whose token was cancelled or superseded.
    #[error("stale {} timer fired", .kind.as_str())]
    StaleTimer {
        /// Kind of the stale timer.
        kind: TimerKind,
    },
    /// The action is only valid in another phase.
    #[error("`{action}` is not accepted during the {phase} phase")]
    PhaseMismatch {
        /// Rejected action name.
        action: &'static str,
        /// Phase at the time of the action.
        phase: ApplicationPhase,
    },
}

fn require_presenting(
    state: &DesktopState,
    phase: ApplicationPhase,
    action: &'static str,
) -> Result<(), ReducerError> {
    if state.phase.is_presenting(phase) {
        Ok(())
    } else {
        Err(ReducerError::PhaseMismatch {
            action,
            phase: state.phase.current,
        })
    }
}

/// Applies a [`DesktopAction`] to the desktop state and collects resulting side effects.
///
/// State is left untouched when an error is returned.
///
/// # Errors
///
/// Returns [`ReducerError::StaleTimer`] for timer tokens that are no longer armed, and
/// [`ReducerError::PhaseMismatch`] for a login while the login screen is not showing, or for
/// window launches, title-bar drags and toast requests while the desktop is not showing.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    env: &RuntimeEnv,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::PowerOn => phase::power_on(state, interaction, env, &mut effects),
        DesktopAction::Login => {
            require_presenting(state, ApplicationPhase::Login, "login")?;
            if !state.audio_unlocked {
                state.audio_unlocked = true;
                effects.push(RuntimeEffect::UnlockAudio {
                    path: env.config.notification_sound.clone(),
                });
            }
            phase::request_phase(state, env, &mut effects, ApplicationPhase::Welcome);
        }
        DesktopAction::LogOff => {
            phase::clear_session(state, interaction, &mut effects);
            phase::request_phase(state, env, &mut effects, ApplicationPhase::Login);
        }
        DesktopAction::Restart => {
            phase::clear_session(state, interaction, &mut effects);
            phase::request_phase(state, env, &mut effects, ApplicationPhase::Boot);
        }
        DesktopAction::TimerFired(token) => {
            if !state.timers.take(token) {
                return Err(ReducerError::StaleTimer { kind: token.kind });
            }
            match token.kind {
                TimerKind::BootDwell => phase::complete_boot_dwell(state, env, &mut effects),
                TimerKind::FadeOut => phase::complete_fade_out(state, env, &mut effects),
                TimerKind::FadeIn => phase::complete_fade_in(state, env, &mut effects),
                TimerKind::WelcomeDwell => {
                    phase::request_phase(state, env, &mut effects, ApplicationPhase::Desktop)
                }
                TimerKind::ToastShow => notification::show_scheduled(state, env, &mut effects),
                TimerKind::ToastAutoHide => notification::expire(state),
            }
        }
        DesktopAction::OpenWindow { window_id } => {
            require_presenting(state, ApplicationPhase::Desktop, "open-window")?;
            window_manager::open_window(state, env, &window_id);
        }
        DesktopAction::ActivateIcon { icon_id } => {
            require_presenting(state, ApplicationPhase::Desktop, "activate-icon")?;
            window_manager::open_window(state, env, &icon_id);
        }
        DesktopAction::FocusWindow { window_id } => {
            window_manager::focus_window(state, &window_id);
        }
        DesktopAction::CloseWindow { window_id } => {
            if window_manager::close_window(state, &window_id)
                && interaction
                    .dragging
                    .as_ref()
                    .is_some_and(|session| session.window_id == window_id)
            {
                interaction.dragging = None;
            }
        }
        DesktopAction::ToggleStartMenu => state.start_menu_open = !state.start_menu_open,
        DesktopAction::CloseStartMenu => state.start_menu_open = false,
        DesktopAction::LaunchFromStartMenu { window_id } => {
            require_presenting(state, ApplicationPhase::Desktop, "launch-from-start-menu")?;
            window_manager::open_window(state, env, &window_id);
            state.start_menu_open = false;
        }
        DesktopAction::SelectIcon { icon_id } => {
            state.selection.lasso = None;
            state.selection.select_only(icon_id);
        }
        DesktopAction::BeginDesktopSelection {
            pointer,
            surface,
            button,
            target,
        } => {
            if button == PointerButton::Primary
                && target.starts_lasso()
                && state.phase.is_presenting(ApplicationPhase::Desktop)
            {
                state.selection.begin_lasso(pointer, surface);
            }
        }
        DesktopAction::UpdateDesktopSelection {
            pointer,
            icon_rects,
        } => {
            state
                .selection
                .update_lasso(pointer, &icon_rects, env.config.drag_threshold_px);
        }
        DesktopAction::EndDesktopSelection => {
            state.selection.end_lasso();
        }
        DesktopAction::BeginWindowDrag { window_id, pointer } => {
            require_presenting(state, ApplicationPhase::Desktop, "begin-window-drag")?;
            drag::begin_drag(state, interaction, &window_id, pointer);
        }
        DesktopAction::UpdateWindowDrag { pointer } => {
            drag::update_drag(state, interaction, pointer);
        }
        DesktopAction::EndWindowDrag => {
            drag::end_drag(interaction);
        }
        DesktopAction::ShowToast => {
            require_presenting(state, ApplicationPhase::Desktop, "show-toast")?;
            notification::show_from_tray(state, env, &mut effects);
        }
        DesktopAction::DismissToast => notification::dismiss(state, &mut effects),
        DesktopAction::SetToastAnchor { anchor } => notification::set_anchor(state, anchor),
        DesktopAction::ToastMeasured { size } => notification::set_size(state, size),
        DesktopAction::ViewportResized { viewport } => notification::set_viewport(state, viewport),
    }
    Ok(effects)
}
