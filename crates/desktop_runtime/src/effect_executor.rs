//! Explicit runtime effect-queue executor for reducer-emitted side effects.

use leptos::*;

use crate::runtime_context::DesktopRuntimeContext;

/// Installs the effect executor that drains reducer-emitted runtime effects in order.
pub fn install(runtime: DesktopRuntimeContext) {
    // Clear the queue before draining so dispatches made while draining enqueue a fresh batch
    // instead of being overwritten.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        let host = runtime.host.get_value();
        let mut timers = runtime.timer_driver();
        for effect in queued {
            host.run_runtime_effect(&mut timers, effect);
        }
    });
}
