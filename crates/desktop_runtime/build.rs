use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
struct Position {
    x: i32,
    y: i32,
}

#[derive(Debug, Clone, Deserialize)]
struct WindowManifest {
    id: String,
    title: String,
    icon: String,
    content: String,
    desktop_label: String,
    start_menu_label: String,
    start_menu_subtitle: String,
    initial_position: Position,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogManifest {
    schema_version: u32,
    windows: Vec<WindowManifest>,
}

fn content_variant(path: &str, id: &str, content: &str) -> &'static str {
    match content {
        "about" => "About",
        "experience" => "Experience",
        "projects" => "Projects",
        "contact" => "Contact",
        other => panic!("unknown content kind `{other}` for window `{id}` in {path}"),
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("windows.manifest.toml");
    let display = path.display().to_string();
    println!("cargo:rerun-if-changed={display}");

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {display}: {err}"));
    let manifest: CatalogManifest =
        toml::from_str(&raw).unwrap_or_else(|err| panic!("failed to parse {display}: {err}"));
    if manifest.schema_version != 1 {
        panic!(
            "catalog schema mismatch in {display}: expected 1 found {}",
            manifest.schema_version
        );
    }

    let mut seen = BTreeSet::new();
    let mut entries = String::new();
    for window in &manifest.windows {
        if window.id.trim().is_empty() || window.title.trim().is_empty() {
            panic!("window entries in {display} need a non-empty id and title");
        }
        if !seen.insert(window.id.clone()) {
            panic!("duplicate window id `{}` in {display}", window.id);
        }
        let content = content_variant(&display, &window.id, &window.content);
        entries.push_str(&format!(
            "    WindowDescriptor {{\n        id: {:?},\n        title: {:?},\n        icon: {:?},\n        content: ContentKind::{content},\n        desktop_label: {:?},\n        start_menu_label: {:?},\n        start_menu_subtitle: {:?},\n        initial_position: WindowPosition {{ x: {}, y: {} }},\n    }},\n",
            window.id,
            window.title,
            window.icon,
            window.desktop_label,
            window.start_menu_label,
            window.start_menu_subtitle,
            window.initial_position.x,
            window.initial_position.y,
        ));
    }

    let generated = format!(
        "/// Build-time generated window catalog, in desktop/start-menu order.\n\
pub(crate) const WINDOW_CATALOG: &[WindowDescriptor] = &[\n{entries}];\n"
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("window_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
