//! Welcome toast scheduling and balloon placement.

use platform_host::{ElementBounds, ViewportSize};

use crate::{
    model::{DesktopState, RuntimeEnv},
    reducer::RuntimeEffect,
    timers::{arm_timer, disarm_timer, TimerKind},
};

const EDGE_MARGIN: i32 = 10;
const TASKBAR_CLEARANCE: i32 = 48;
const ANCHOR_GAP: i32 = 14;
const ANCHOR_NUDGE: f64 = 28.0;
const TAIL_INSET: i32 = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastSize {
    pub width: i32,
    pub height: i32,
}

impl Default for ToastSize {
    fn default() -> Self {
        Self {
            width: 320,
            height: 90,
        }
    }
}

/// Balloon placement: top-left corner plus the tail's x offset from `left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToastPosition {
    pub left: i32,
    pub top: i32,
    pub tail_x: i32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastState {
    pub visible: bool,
    pub anchor: Option<ElementBounds>,
    pub size: ToastSize,
    pub position: ToastPosition,
    /// Auto-hide delay armed when the toast last became visible.
    pub lifetime_ms: Option<u32>,
}

fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Places the toast above its anchor, clamped inside the viewport and clear of the taskbar.
///
/// Without an anchor the toast sits in the bottom-right corner above the tray.
pub fn compute_toast_position(
    anchor: Option<ElementBounds>,
    viewport: ViewportSize,
    size: ToastSize,
) -> ToastPosition {
    let (w, h) = (size.width, size.height);
    let Some(anchor) = anchor else {
        return ToastPosition {
            left: viewport.width - w - EDGE_MARGIN,
            top: viewport.height - 38 - h - 8,
            tail_x: w - 40,
        };
    };

    let cx = anchor.center_x();
    let left = round_half_up(cx - f64::from(w) + ANCHOR_NUDGE)
        .min(viewport.width - w - EDGE_MARGIN)
        .max(EDGE_MARGIN);
    let top = round_half_up(anchor.top - f64::from(h + ANCHOR_GAP))
        .min(viewport.height - h - TASKBAR_CLEARANCE)
        .max(EDGE_MARGIN);
    let tail_x = round_half_up(cx - f64::from(left))
        .min(w - TAIL_INSET)
        .max(TAIL_INSET);
    ToastPosition { left, top, tail_x }
}

fn reposition(state: &mut DesktopState) {
    state.toast.position = compute_toast_position(state.toast.anchor, state.viewport, state.toast.size);
}

fn reveal(state: &mut DesktopState, env: &RuntimeEnv, effects: &mut Vec<RuntimeEffect>, lifetime_ms: u32) {
    state.toast.visible = true;
    state.toast.lifetime_ms = Some(lifetime_ms);
    reposition(state);
    effects.push(RuntimeEffect::PlaySound {
        path: env.config.notification_sound.clone(),
        volume: env.config.notification_volume,
    });
    arm_timer(&mut state.timers, effects, TimerKind::ToastAutoHide, lifetime_ms);
}

/// Hides the toast and cancels both toast timers.
pub(crate) fn hide(state: &mut DesktopState, effects: &mut Vec<RuntimeEffect>) {
    state.toast.visible = false;
    state.toast.lifetime_ms = None;
    disarm_timer(&mut state.timers, effects, TimerKind::ToastShow);
    disarm_timer(&mut state.timers, effects, TimerKind::ToastAutoHide);
}

/// Desktop entry: start hidden and schedule the first appearance.
pub(crate) fn schedule_welcome(state: &mut DesktopState, env: &RuntimeEnv, effects: &mut Vec<RuntimeEffect>) {
    hide(state, effects);
    arm_timer(
        &mut state.timers,
        effects,
        TimerKind::ToastShow,
        env.config.toast_show_delay_ms,
    );
}

pub(crate) fn show_scheduled(state: &mut DesktopState, env: &RuntimeEnv, effects: &mut Vec<RuntimeEffect>) {
    reveal(state, env, effects, env.config.toast_auto_close_ms);
}

/// Tray button: show immediately, superseding a pending first appearance.
pub(crate) fn show_from_tray(state: &mut DesktopState, env: &RuntimeEnv, effects: &mut Vec<RuntimeEffect>) {
    disarm_timer(&mut state.timers, effects, TimerKind::ToastShow);
    reveal(state, env, effects, env.config.toast_reshow_auto_close_ms);
}

pub(crate) fn dismiss(state: &mut DesktopState, effects: &mut Vec<RuntimeEffect>) {
    state.toast.visible = false;
    state.toast.lifetime_ms = None;
    disarm_timer(&mut state.timers, effects, TimerKind::ToastAutoHide);
}

/// The auto-hide timer already fired, so there is nothing left to cancel.
pub(crate) fn expire(state: &mut DesktopState) {
    state.toast.visible = false;
    state.toast.lifetime_ms = None;
}

pub(crate) fn set_anchor(state: &mut DesktopState, anchor: Option<ElementBounds>) {
    state.toast.anchor = anchor;
    if state.toast.visible {
        reposition(state);
    }
}

pub(crate) fn set_size(state: &mut DesktopState, size: ToastSize) {
    state.toast.size = size;
    if state.toast.visible {
        reposition(state);
    }
}

pub(crate) fn set_viewport(state: &mut DesktopState, viewport: ViewportSize) {
    state.viewport = viewport;
    if state.toast.visible {
        reposition(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const VIEWPORT: ViewportSize = ViewportSize {
        width: 1024,
        height: 768,
    };

    #[test]
    fn anchored_toast_sits_above_tray_button() {
        let anchor = ElementBounds::new(980.0, 740.0, 20.0, 20.0);
        let position = compute_toast_position(Some(anchor), VIEWPORT, ToastSize::default());
        // left 698 and top 636 both overflow and clamp; tail follows the clamped left.
        assert_eq!(
            position,
            ToastPosition {
                left: 694,
                top: 630,
                tail_x: 296,
            }
        );
    }

    #[test]
    fn anchor_near_left_edge_clamps_left_and_tail() {
        let anchor = ElementBounds::new(0.0, 400.0, 10.0, 10.0);
        let position = compute_toast_position(Some(anchor), VIEWPORT, ToastSize::default());
        assert_eq!(position.left, 10);
        assert_eq!(position.top, 296);
        assert_eq!(position.tail_x, 22);
    }

    #[test]
    fn odd_anchor_width_rounds_half_up() {
        let anchor = ElementBounds::new(500.0, 400.0, 21.0, 10.0);
        let position = compute_toast_position(Some(anchor), VIEWPORT, ToastSize::default());
        // cx = 510.5, so left = round(218.5) and tail = round(291.5).
        assert_eq!(position.left, 219);
        assert_eq!(position.tail_x, 292);
    }

    #[test]
    fn fractional_anchor_rounds_only_the_final_offsets() {
        // Whole-pixel rounding first would give x 501 / w 21 (cx 511.5), so left 220.
        let anchor = ElementBounds::new(500.6, 400.4, 20.6, 10.0);
        let position = compute_toast_position(Some(anchor), VIEWPORT, ToastSize::default());
        // cx = 510.9, so left = round(218.9) and top = round(296.4).
        assert_eq!(position.left, 219);
        assert_eq!(position.top, 296);
        assert_eq!(position.tail_x, 292);
    }

    #[test]
    fn unanchored_toast_uses_bottom_right_corner() {
        let position = compute_toast_position(None, VIEWPORT, ToastSize::default());
        assert_eq!(
            position,
            ToastPosition {
                left: 694,
                top: 632,
                tail_x: 280,
            }
        );
    }

    #[test]
    fn viewport_resize_repositions_only_while_visible() {
        let mut state = DesktopState::default();
        set_viewport(&mut state, ViewportSize { width: 800, height: 600 });
        assert_eq!(state.toast.position, ToastPosition::default());

        state.toast.visible = true;
        set_viewport(&mut state, ViewportSize { width: 800, height: 600 });
        assert_eq!(state.toast.position.left, 470);
    }
}
