//! Headless desktop session driven by a virtual clock.
//!
//! [`DesktopSession`] owns the reducer state, executes effects through the injected host
//! services, and advances time deterministically, which makes it the harness for integration
//! tests and non-browser hosts.

use leptos::logging;
use platform_host::HostServices;

use crate::{
    host::DesktopHostContext,
    model::{
        DesktopState, InteractionState, PointerButton, PointerPosition, PointerTarget, RuntimeEnv,
        WindowId,
    },
    reducer::{reduce_desktop, DesktopAction, ReducerError},
    timers::{TimerKind, TimerQueue},
};

pub struct DesktopSession {
    env: RuntimeEnv,
    host: DesktopHostContext,
    state: DesktopState,
    interaction: InteractionState,
    timers: TimerQueue,
}

impl DesktopSession {
    /// Creates a session and powers it on at virtual time zero.
    pub fn new(env: RuntimeEnv, services: HostServices) -> Self {
        let mut session = Self {
            env,
            host: DesktopHostContext::new(services),
            state: DesktopState::default(),
            interaction: InteractionState::default(),
            timers: TimerQueue::default(),
        };
        if let Err(err) = session.dispatch(DesktopAction::PowerOn) {
            logging::warn!("desktop power-on failed: {err}");
        }
        session
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn env(&self) -> &RuntimeEnv {
        &self.env
    }

    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// Absolute virtual deadline of the pending timer of `kind`, if any.
    pub fn deadline_of(&self, kind: TimerKind) -> Option<u64> {
        self.timers.deadline_of(kind)
    }

    /// Applies `action` and runs its effects. On error the state is left unchanged.
    pub fn dispatch(&mut self, action: DesktopAction) -> Result<(), ReducerError> {
        let mut desktop = self.state.clone();
        let mut ui = self.interaction.clone();
        let effects = reduce_desktop(&mut desktop, &mut ui, &self.env, action)?;
        self.state = desktop;
        self.interaction = ui;
        for effect in effects {
            self.host.run_runtime_effect(&mut self.timers, effect);
        }
        Ok(())
    }

    /// Advances virtual time by `ms`, firing every timer that comes due in deadline order.
    pub fn advance_by(&mut self, ms: u64) -> Result<(), ReducerError> {
        let until = self.timers.now_ms() + ms;
        while let Some(token) = self.timers.pop_due(until) {
            self.dispatch(DesktopAction::TimerFired(token))?;
        }
        self.timers.advance_to(until);
        Ok(())
    }

    /// Advances until the pending timer of `kind` fires. Returns `false` if none is pending.
    pub fn advance_until(&mut self, kind: TimerKind) -> Result<bool, ReducerError> {
        let Some(deadline) = self.timers.deadline_of(kind) else {
            return Ok(false);
        };
        self.advance_by(deadline - self.timers.now_ms())?;
        Ok(true)
    }

    pub fn login(&mut self) -> Result<(), ReducerError> {
        self.dispatch(DesktopAction::Login)
    }

    pub fn log_off(&mut self) -> Result<(), ReducerError> {
        self.dispatch(DesktopAction::LogOff)
    }

    pub fn restart(&mut self) -> Result<(), ReducerError> {
        self.dispatch(DesktopAction::Restart)
    }

    pub fn open(&mut self, window_id: &str) -> Result<(), ReducerError> {
        self.dispatch(DesktopAction::OpenWindow {
            window_id: WindowId::from(window_id),
        })
    }

    pub fn focus(&mut self, window_id: &str) -> Result<(), ReducerError> {
        self.dispatch(DesktopAction::FocusWindow {
            window_id: WindowId::from(window_id),
        })
    }

    pub fn close(&mut self, window_id: &str) -> Result<(), ReducerError> {
        self.dispatch(DesktopAction::CloseWindow {
            window_id: WindowId::from(window_id),
        })
    }

    pub fn click_icon(&mut self, icon_id: &str) -> Result<(), ReducerError> {
        self.dispatch(DesktopAction::SelectIcon {
            icon_id: WindowId::from(icon_id),
        })
    }

    pub fn double_click_icon(&mut self, icon_id: &str) -> Result<(), ReducerError> {
        self.dispatch(DesktopAction::ActivateIcon {
            icon_id: WindowId::from(icon_id),
        })
    }

    /// Re-reads the viewport and tray anchor from the layout provider.
    pub fn sync_layout(&mut self) -> Result<(), ReducerError> {
        for action in self.host.layout_actions() {
            self.dispatch(action)?;
        }
        Ok(())
    }

    /// Pointer-down on the desktop layer.
    pub fn desktop_pointer_down(
        &mut self,
        pointer: PointerPosition,
        button: PointerButton,
        target: PointerTarget,
    ) -> Result<(), ReducerError> {
        let action = self
            .host
            .desktop_pointer_down_action(pointer, button, target);
        self.dispatch(action)
    }

    /// Title-bar pointer-down.
    pub fn title_bar_pointer_down(
        &mut self,
        window_id: &str,
        pointer: PointerPosition,
    ) -> Result<(), ReducerError> {
        self.dispatch(DesktopAction::BeginWindowDrag {
            window_id: WindowId::from(window_id),
            pointer,
        })
    }

    /// Document-level pointer-move, routed to whichever gesture is active.
    pub fn pointer_move(&mut self, pointer: PointerPosition) -> Result<(), ReducerError> {
        let actions = self
            .host
            .pointer_move_actions(&self.state, &self.interaction, pointer);
        for action in actions {
            self.dispatch(action)?;
        }
        Ok(())
    }

    /// Document-level pointer-up, ending whichever gesture is active.
    pub fn pointer_up(&mut self) -> Result<(), ReducerError> {
        for action in DesktopHostContext::pointer_up_actions(&self.state, &self.interaction) {
            self.dispatch(action)?;
        }
        Ok(())
    }
}
