//! Window registry transitions used by the desktop reducer.

use crate::{
    apps,
    content::WindowContent,
    model::{DesktopState, IconHandle, OpenWindowEntry, RuntimeEnv, WindowId},
};

/// Returns the stack order for the next opened or focused window.
///
/// `base` is used when nothing is open so windows always sit above the desktop layer.
pub fn next_stack_order(windows: &[OpenWindowEntry], base: u32) -> u32 {
    windows
        .iter()
        .map(|w| w.stack_order)
        .max()
        .map_or(base, |max| max.saturating_add(1))
}

/// Returns the id of the frontmost open window.
pub fn topmost_window_id(windows: &[OpenWindowEntry]) -> Option<WindowId> {
    windows
        .iter()
        .max_by_key(|w| w.stack_order)
        .map(|w| w.id.clone())
}

/// Opens `window_id` from the catalog, or focuses it when it is already open.
///
/// Either way the window's icon becomes the sole selected icon. Returns `false` for ids
/// the catalog does not know.
pub fn open_window(state: &mut DesktopState, env: &RuntimeEnv, window_id: &WindowId) -> bool {
    if state.is_open(window_id) {
        focus_window(state, window_id);
        state.selection.select_only(window_id.clone());
        return true;
    }

    let Some(descriptor) = apps::window_descriptor(window_id) else {
        return false;
    };

    let stack_order = next_stack_order(&state.windows, env.config.window_stack_base);
    state.windows.push(OpenWindowEntry {
        id: window_id.clone(),
        title: descriptor.title.to_string(),
        icon: IconHandle(descriptor.icon.to_string()),
        content: WindowContent::build(
            descriptor.content,
            &env.content,
            &env.config.asset_resolver(),
        ),
        initial_position: descriptor.initial_position,
        position: descriptor.initial_position,
        stack_order,
    });
    state.active_window = Some(window_id.clone());
    state.selection.select_only(window_id.clone());
    true
}

/// Raises `window_id` above every other open window and makes it active.
pub fn focus_window(state: &mut DesktopState, window_id: &WindowId) -> bool {
    if !state.is_open(window_id) {
        return false;
    }

    let stack_order = next_stack_order(&state.windows, 0);
    if let Some(window) = state.windows.iter_mut().find(|w| &w.id == window_id) {
        window.stack_order = stack_order;
    }
    state.active_window = Some(window_id.clone());
    true
}

/// Removes `window_id`; the frontmost remaining window becomes active.
pub fn close_window(state: &mut DesktopState, window_id: &WindowId) -> bool {
    let before = state.windows.len();
    state.windows.retain(|w| &w.id != window_id);
    if state.windows.len() == before {
        return false;
    }

    state.active_window = topmost_window_id(&state.windows);
    true
}
