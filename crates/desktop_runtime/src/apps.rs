//! Static window catalog: desktop icons, start-menu launchers, and open-window defaults.

use crate::{
    content::ContentKind,
    model::{IconDescriptor, IconHandle, StartMenuEntry, WindowId, WindowPosition},
};

/// DOM id of the desktop surface that hosts icons and the lasso rectangle.
pub const DESKTOP_SURFACE_ELEMENT_ID: &str = "desktop-surface";
/// DOM id of the tray button the welcome toast points at.
pub const TRAY_INFO_ELEMENT_ID: &str = "tray-info-button";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDescriptor {
    pub id: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub content: ContentKind,
    pub desktop_label: &'static str,
    pub start_menu_label: &'static str,
    pub start_menu_subtitle: &'static str,
    pub initial_position: WindowPosition,
}

include!(concat!(env!("OUT_DIR"), "/window_catalog_generated.rs"));

pub fn window_catalog() -> &'static [WindowDescriptor] {
    WINDOW_CATALOG
}

pub fn window_descriptor(window_id: &WindowId) -> Option<&'static WindowDescriptor> {
    WINDOW_CATALOG.iter().find(|d| d.id == window_id.as_str())
}

pub fn desktop_icons() -> Vec<IconDescriptor> {
    WINDOW_CATALOG
        .iter()
        .map(|d| IconDescriptor {
            id: WindowId::new(d.id),
            label: d.desktop_label.to_string(),
            icon: IconHandle(d.icon.to_string()),
        })
        .collect()
}

pub fn start_menu_entries() -> Vec<StartMenuEntry> {
    WINDOW_CATALOG
        .iter()
        .map(|d| StartMenuEntry {
            id: WindowId::new(d.id),
            label: d.start_menu_label.to_string(),
            subtitle: d.start_menu_subtitle.to_string(),
            icon: IconHandle(d.icon.to_string()),
        })
        .collect()
}

pub fn desktop_icon_element_id(icon_id: &WindowId) -> String {
    format!("desktop-icon-{icon_id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn catalog_preserves_manifest_order_and_positions() {
        let ids: Vec<_> = window_catalog().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["about", "experience", "projects", "contact"]);

        let experience = window_descriptor(&WindowId::from("experience")).expect("experience");
        assert_eq!(experience.title, "Experience & Education");
        assert_eq!(experience.initial_position, WindowPosition { x: 200, y: 20 });
        assert_eq!(experience.content, ContentKind::Experience);
    }

    #[test]
    fn unknown_ids_have_no_descriptor() {
        assert!(window_descriptor(&WindowId::from("minesweeper")).is_none());
    }

    #[test]
    fn icons_and_launchers_cover_every_window() {
        assert_eq!(desktop_icons().len(), window_catalog().len());
        let contact = start_menu_entries()
            .into_iter()
            .find(|entry| entry.id.as_str() == "contact")
            .expect("contact launcher");
        assert_eq!(contact.subtitle, "Get in touch");
        assert_eq!(
            desktop_icon_element_id(&contact.id),
            "desktop-icon-contact".to_string()
        );
    }
}
