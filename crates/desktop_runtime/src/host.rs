//! Host-side runtime helpers for executing reducer effects and measuring live layout.
//!
//! Both the headless session and the Leptos binding funnel reducer effects through
//! [`DesktopHostContext::run_runtime_effect`]; only the [`TimerDriver`] differs between them.

use leptos::logging;
use platform_host::{ElementBounds, HostServices, ScreenRect, SoundRequest, ViewportSize};
use platform_host_web::build_host_services;

use crate::{
    apps::{self, DESKTOP_SURFACE_ELEMENT_ID, TRAY_INFO_ELEMENT_ID},
    model::{DesktopState, InteractionState, PointerButton, PointerPosition, PointerTarget},
    reducer::{DesktopAction, RuntimeEffect},
    selection::IconRect,
    timers::TimerDriver,
};

#[derive(Clone, Debug)]
/// Host service bundle for desktop runtime side effects and layout queries.
pub struct DesktopHostContext {
    services: HostServices,
}

impl Default for DesktopHostContext {
    fn default() -> Self {
        Self::new(HostServices::headless())
    }
}

impl DesktopHostContext {
    pub fn new(services: HostServices) -> Self {
        Self { services }
    }

    /// Host context wired to the adapters selected for the build target.
    pub fn for_target(asset_base_path: &str) -> Self {
        Self::new(build_host_services(asset_base_path))
    }

    pub fn services(&self) -> &HostServices {
        &self.services
    }

    /// Returns the stable name of the selected host strategy.
    pub fn host_strategy_name(&self) -> &'static str {
        self.services.host_strategy.as_str()
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, timers: &mut dyn TimerDriver, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::ScheduleTimer { token, delay_ms } => timers.schedule(token, delay_ms),
            RuntimeEffect::CancelTimer(token) => timers.cancel(token),
            RuntimeEffect::PlaySound { path, volume } => self.play_sound(&path, volume),
            RuntimeEffect::UnlockAudio { path } => self.unlock_audio(&path),
            RuntimeEffect::SetDocumentTitle(title) => self.services.document.set_title(&title),
        }
    }

    fn play_sound(&self, path: &str, volume: f64) {
        let request = SoundRequest::new(self.services.assets.asset_url(path), volume);
        if let Err(err) = self.services.audio.play(&request) {
            logging::warn!("sound playback failed for `{}`: {err}", request.url);
        }
    }

    fn unlock_audio(&self, path: &str) {
        let url = self.services.assets.asset_url(path);
        if let Err(err) = self.services.audio.unlock(&url) {
            logging::warn!("audio unlock failed for `{url}`: {err}");
        }
    }

    pub fn viewport_size(&self) -> ViewportSize {
        self.services.layout.viewport_size()
    }

    /// Desktop surface rectangle, falling back to the full viewport when it is not mounted.
    pub fn desktop_surface_rect(&self) -> ScreenRect {
        self.services
            .layout
            .element_rect(DESKTOP_SURFACE_ELEMENT_ID)
            .unwrap_or_else(|| {
                let viewport = self.viewport_size();
                ScreenRect::new(0, 0, viewport.width, viewport.height)
            })
    }

    pub fn toast_anchor_bounds(&self) -> Option<ElementBounds> {
        self.services.layout.element_bounds(TRAY_INFO_ELEMENT_ID)
    }

    /// Current rectangles of every mounted desktop icon. Unmounted icons are skipped.
    pub fn icon_rects(&self) -> Vec<IconRect> {
        apps::desktop_icons()
            .into_iter()
            .filter_map(|icon| {
                let rect = self
                    .services
                    .layout
                    .element_rect(&apps::desktop_icon_element_id(&icon.id))?;
                Some(IconRect { id: icon.id, rect })
            })
            .collect()
    }

    /// Viewport and tray-anchor refresh, dispatched on mount and on resize.
    pub fn layout_actions(&self) -> [DesktopAction; 2] {
        [
            DesktopAction::ViewportResized {
                viewport: self.viewport_size(),
            },
            DesktopAction::SetToastAnchor {
                anchor: self.toast_anchor_bounds(),
            },
        ]
    }

    pub fn desktop_pointer_down_action(
        &self,
        pointer: PointerPosition,
        button: PointerButton,
        target: PointerTarget,
    ) -> DesktopAction {
        DesktopAction::BeginDesktopSelection {
            pointer,
            surface: self.desktop_surface_rect(),
            button,
            target,
        }
    }

    /// Routes a document-level pointer-move to the active drag and/or lasso.
    pub fn pointer_move_actions(
        &self,
        state: &DesktopState,
        interaction: &InteractionState,
        pointer: PointerPosition,
    ) -> Vec<DesktopAction> {
        let mut actions = Vec::new();
        if interaction.dragging.is_some() {
            actions.push(DesktopAction::UpdateWindowDrag { pointer });
        }
        if state.selection.is_lasso_active() {
            actions.push(DesktopAction::UpdateDesktopSelection {
                pointer,
                icon_rects: self.icon_rects(),
            });
        }
        actions
    }

    /// Routes a document-level pointer-up to the active drag and/or lasso.
    pub fn pointer_up_actions(
        state: &DesktopState,
        interaction: &InteractionState,
    ) -> Vec<DesktopAction> {
        let mut actions = Vec::new();
        if interaction.dragging.is_some() {
            actions.push(DesktopAction::EndWindowDrag);
        }
        if state.selection.is_lasso_active() {
            actions.push(DesktopAction::EndDesktopSelection);
        }
        actions
    }
}
