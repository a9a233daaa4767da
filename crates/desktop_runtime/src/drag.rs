//! Title-bar window dragging.

use crate::{
    model::{DesktopState, InteractionState, PointerPosition, WindowId, WindowPosition},
    window_manager,
};

/// Active title-bar drag: the window and the pointer offset from its top-left at grab time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub grab_offset: PointerPosition,
}

/// Captures the grab offset for `window_id` and raises it. Replaces any previous session.
pub fn begin_drag(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    window_id: &WindowId,
    pointer: PointerPosition,
) -> bool {
    let Some(window) = state.window(window_id) else {
        return false;
    };
    let grab_offset = PointerPosition::new(pointer.x - window.position.x, pointer.y - window.position.y);
    window_manager::focus_window(state, window_id);
    interaction.dragging = Some(DragSession {
        window_id: window_id.clone(),
        grab_offset,
    });
    true
}

/// Moves the dragged window so the grab point follows `pointer`. Positions are unconstrained.
pub fn update_drag(
    state: &mut DesktopState,
    interaction: &InteractionState,
    pointer: PointerPosition,
) -> bool {
    let Some(session) = interaction.dragging.as_ref() else {
        return false;
    };
    let Some(window) = state.windows.iter_mut().find(|w| w.id == session.window_id) else {
        return false;
    };
    window.position = WindowPosition {
        x: pointer.x - session.grab_offset.x,
        y: pointer.y - session.grab_offset.y,
    };
    true
}

pub fn end_drag(interaction: &mut InteractionState) -> bool {
    interaction.dragging.take().is_some()
}
