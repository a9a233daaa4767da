//! Boot → login → welcome → desktop phase machine with fade-wrapped transitions.

use leptos::logging;

use crate::{
    config::RuntimeConfig,
    model::{ApplicationPhase, DesktopState, InteractionState, RuntimeEnv},
    notification,
    reducer::RuntimeEffect,
    timers::{arm_timer, disarm_timer, TimerKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeStage {
    FadingOut,
    FadingIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    pub target: ApplicationPhase,
    pub stage: FadeStage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseState {
    pub current: ApplicationPhase,
    pub transition: Option<PhaseTransition>,
}

impl PhaseState {
    /// `true` when no fade sequence is in flight.
    pub fn is_settled(&self) -> bool {
        self.transition.is_none()
    }

    pub fn is_settled_in(&self, phase: ApplicationPhase) -> bool {
        self.is_settled() && self.current == phase
    }

    /// `true` while `phase` is on screen and not being faded out, including its own fade-in.
    pub fn is_presenting(&self, phase: ApplicationPhase) -> bool {
        self.current == phase
            && !matches!(
                self.transition,
                Some(PhaseTransition {
                    stage: FadeStage::FadingOut,
                    ..
                })
            )
    }

    /// Opacity of the full-screen fade overlay.
    pub fn fade_opacity(&self) -> f64 {
        match self.transition {
            Some(PhaseTransition {
                stage: FadeStage::FadingOut,
                ..
            }) => 1.0,
            _ => 0.0,
        }
    }
}

/// `"{app} v{version}"`, suffixed with the upper-case phase outside the desktop.
pub fn document_title(config: &RuntimeConfig, phase: ApplicationPhase) -> String {
    let base = format!("{} v{}", config.app_name, config.app_version);
    match phase {
        ApplicationPhase::Desktop => base,
        other => format!("{base} - {}", other.as_str().to_uppercase()),
    }
}

fn cancel_phase_timers(state: &mut DesktopState, effects: &mut Vec<RuntimeEffect>) {
    for kind in TimerKind::PHASE_SCOPED {
        disarm_timer(&mut state.timers, effects, kind);
    }
}

fn enter_phase(
    state: &mut DesktopState,
    env: &RuntimeEnv,
    effects: &mut Vec<RuntimeEffect>,
    phase: ApplicationPhase,
) {
    state.phase.current = phase;
    logging::log!("desktop phase -> {}", phase.as_str());
    effects.push(RuntimeEffect::SetDocumentTitle(document_title(
        &env.config,
        phase,
    )));
    match phase {
        ApplicationPhase::Boot => arm_timer(
            &mut state.timers,
            effects,
            TimerKind::BootDwell,
            env.config.boot_dwell_ms,
        ),
        ApplicationPhase::Desktop => notification::schedule_welcome(state, env, effects),
        ApplicationPhase::Login | ApplicationPhase::Welcome => {}
    }
}

/// Hard reset into Boot with no fade: cancels everything, including an in-flight fade.
pub(crate) fn power_on(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    env: &RuntimeEnv,
    effects: &mut Vec<RuntimeEffect>,
) {
    clear_session(state, interaction, effects);
    cancel_phase_timers(state, effects);
    disarm_timer(&mut state.timers, effects, TimerKind::FadeOut);
    state.phase.transition = None;
    enter_phase(state, env, effects, ApplicationPhase::Boot);
}

/// Starts the fade-out toward `target`. A newer request supersedes one in flight.
pub(crate) fn request_phase(
    state: &mut DesktopState,
    env: &RuntimeEnv,
    effects: &mut Vec<RuntimeEffect>,
    target: ApplicationPhase,
) {
    cancel_phase_timers(state, effects);
    state.phase.transition = Some(PhaseTransition {
        target,
        stage: FadeStage::FadingOut,
    });
    arm_timer(
        &mut state.timers,
        effects,
        TimerKind::FadeOut,
        env.config.fade_ms,
    );
}

pub(crate) fn complete_fade_out(
    state: &mut DesktopState,
    env: &RuntimeEnv,
    effects: &mut Vec<RuntimeEffect>,
) {
    let Some(transition) = state.phase.transition else {
        return;
    };
    state.phase.transition = Some(PhaseTransition {
        target: transition.target,
        stage: FadeStage::FadingIn,
    });
    enter_phase(state, env, effects, transition.target);
    arm_timer(
        &mut state.timers,
        effects,
        TimerKind::FadeIn,
        env.config.fade_ms,
    );
}

pub(crate) fn complete_fade_in(
    state: &mut DesktopState,
    env: &RuntimeEnv,
    effects: &mut Vec<RuntimeEffect>,
) {
    state.phase.transition = None;
    if state.phase.current == ApplicationPhase::Welcome {
        arm_timer(
            &mut state.timers,
            effects,
            TimerKind::WelcomeDwell,
            env.config.welcome_dwell_ms,
        );
    }
}

/// Boot dwell elapsed: cut straight to Login.
pub(crate) fn complete_boot_dwell(
    state: &mut DesktopState,
    env: &RuntimeEnv,
    effects: &mut Vec<RuntimeEffect>,
) {
    enter_phase(state, env, effects, ApplicationPhase::Login);
}

/// Drops windows, selection, drags, the start menu, and the toast.
pub(crate) fn clear_session(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    effects: &mut Vec<RuntimeEffect>,
) {
    state.windows.clear();
    state.active_window = None;
    state.selection.clear();
    state.start_menu_open = false;
    interaction.dragging = None;
    notification::hide(state, effects);
}
