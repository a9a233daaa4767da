//! Runtime provider and context wiring for the browser desktop.
//!
//! This module owns the long-lived reducer container, the runtime effect queue, browser timeout
//! handles, and the document-level listeners that feed pointer and resize events back into the
//! reducer.
#![allow(clippy::clone_on_copy)]

use std::{collections::HashMap, time::Duration};

use leptos::{leptos_dom::helpers::TimeoutHandle, *};
use platform_host::HostServices;

use crate::{
    effect_executor,
    host::DesktopHostContext,
    model::{DesktopState, InteractionState, PointerButton, PointerPosition, PointerTarget, RuntimeEnv},
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
    timers::{TimerDriver, TimerKind, TimerToken},
};

type TimeoutHandles = HashMap<TimerKind, (u64, TimeoutHandle)>;

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Host service bundle for executing runtime side effects and layout queries.
    pub host: StoredValue<DesktopHostContext>,
    /// Static configuration and portfolio content.
    pub env: StoredValue<RuntimeEnv>,
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// Reactive pointer/drag interaction state signal.
    pub interaction: RwSignal<InteractionState>,
    /// Queue of runtime effects emitted by the reducer and drained by the effect executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Live browser timeouts keyed by timer kind, tagged with their token generation.
    pub timeouts: StoredValue<TimeoutHandles>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    /// Pointer-down on the desktop layer, measuring the surface first.
    pub fn desktop_pointer_down(
        &self,
        pointer: PointerPosition,
        button: PointerButton,
        target: PointerTarget,
    ) {
        let action = self
            .host
            .with_value(|host| host.desktop_pointer_down_action(pointer, button, target));
        self.dispatch_action(action);
    }

    /// Re-reads viewport size and tray anchor.
    pub fn sync_layout(&self) {
        for action in self.host.with_value(DesktopHostContext::layout_actions) {
            self.dispatch_action(action);
        }
    }

    pub(crate) fn timer_driver(&self) -> BrowserTimers {
        BrowserTimers {
            timeouts: self.timeouts,
            dispatch: self.dispatch,
        }
    }
}

/// [`TimerDriver`] backed by `setTimeout`, reporting expirations through `dispatch`.
pub(crate) struct BrowserTimers {
    timeouts: StoredValue<TimeoutHandles>,
    dispatch: Callback<DesktopAction>,
}

impl TimerDriver for BrowserTimers {
    fn schedule(&mut self, token: TimerToken, delay_ms: u32) {
        if let Some((_, previous)) = self
            .timeouts
            .try_update_value(|timeouts| timeouts.remove(&token.kind))
            .flatten()
        {
            previous.clear();
        }

        let timeouts = self.timeouts;
        let dispatch = self.dispatch;
        let scheduled = set_timeout_with_handle(
            move || {
                timeouts.update_value(|timeouts| {
                    if timeouts
                        .get(&token.kind)
                        .is_some_and(|(generation, _)| *generation == token.generation)
                    {
                        timeouts.remove(&token.kind);
                    }
                });
                dispatch.call(DesktopAction::TimerFired(token));
            },
            Duration::from_millis(u64::from(delay_ms)),
        );
        match scheduled {
            Ok(handle) => timeouts.update_value(|timeouts| {
                timeouts.insert(token.kind, (token.generation, handle));
            }),
            Err(err) => logging::warn!(
                "failed to schedule {} timer: {err:?}",
                token.kind.as_str()
            ),
        }
    }

    fn cancel(&mut self, token: TimerToken) {
        self.timeouts.update_value(|timeouts| {
            if let Some(&(generation, handle)) = timeouts.get(&token.kind) {
                if generation == token.generation {
                    handle.clear();
                    timeouts.remove(&token.kind);
                }
            }
        });
    }
}

fn clear_all_timeouts(timeouts: StoredValue<TimeoutHandles>) {
    timeouts.update_value(|timeouts| {
        for (_, (_, handle)) in timeouts.drain() {
            handle.clear();
        }
    });
}

fn install_document_listeners(runtime: DesktopRuntimeContext) {
    let resize = window_event_listener(ev::resize, move |_| runtime.sync_layout());
    let pointer_move = window_event_listener(ev::pointermove, move |event| {
        let pointer = PointerPosition::new(event.client_x(), event.client_y());
        let state = runtime.state.get_untracked();
        let interaction = runtime.interaction.get_untracked();
        let actions = runtime
            .host
            .with_value(|host| host.pointer_move_actions(&state, &interaction, pointer));
        for action in actions {
            runtime.dispatch_action(action);
        }
    });
    let pointer_up = window_event_listener(ev::pointerup, move |_| {
        let actions = DesktopHostContext::pointer_up_actions(
            &runtime.state.get_untracked(),
            &runtime.interaction.get_untracked(),
        );
        for action in actions {
            runtime.dispatch_action(action);
        }
    });

    on_cleanup(move || {
        resize.remove();
        pointer_move.remove();
        pointer_up.remove();
        clear_all_timeouts(runtime.timeouts);
    });
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and powers the desktop on.
pub fn DesktopProvider(
    /// Runtime configuration and portfolio content.
    env: RuntimeEnv,
    /// Host bundle override; defaults to the adapters selected for the build target.
    #[prop(optional)]
    host_services: Option<HostServices>,
    children: Children,
) -> impl IntoView {
    let host = match host_services {
        Some(services) => DesktopHostContext::new(services),
        None => DesktopHostContext::for_target(&env.config.asset_base_path),
    };
    let host = store_value(host);
    let env = store_value(env);
    let state = create_rw_signal(DesktopState::default());
    let interaction = create_rw_signal(InteractionState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
    let timeouts = store_value(TimeoutHandles::new());

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut desktop = state.get_untracked();
        let mut ui = interaction.get_untracked();
        let previous_desktop = desktop.clone();
        let previous_ui = ui.clone();

        let reduced = env.with_value(|env| reduce_desktop(&mut desktop, &mut ui, env, action));
        match reduced {
            Ok(new_effects) => {
                if desktop != previous_desktop {
                    state.set(desktop);
                }
                if ui != previous_ui {
                    interaction.set(ui);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("desktop reducer error: {err}"),
        }
    });

    let runtime = DesktopRuntimeContext {
        host,
        env,
        state,
        interaction,
        effects,
        timeouts,
        dispatch,
    };

    provide_context(runtime.clone());

    effect_executor::install(runtime);
    install_document_listeners(runtime);
    runtime.sync_layout();
    runtime.dispatch_action(DesktopAction::PowerOn);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`], if a [`DesktopProvider`] is mounted above.
pub fn use_desktop_runtime() -> Option<DesktopRuntimeContext> {
    use_context::<DesktopRuntimeContext>()
}
