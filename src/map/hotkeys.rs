use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use leptos::SignalGet;
use wasm_bindgen::JsCast;

/// Everything the map can be asked to do from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapAction {
    ZoomIn,
    ZoomOut,
    TunnelKCore,
    RouteKCore,
    ClearPath,
    ClearAll,
    NetworkFacts,
    Quit,
}

impl MapAction {
    pub const ALL: [MapAction; 8] = [
        MapAction::ZoomIn,
        MapAction::ZoomOut,
        MapAction::TunnelKCore,
        MapAction::RouteKCore,
        MapAction::ClearPath,
        MapAction::ClearAll,
        MapAction::NetworkFacts,
        MapAction::Quit,
    ];

    /// Stable id used as the key in saved settings
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::ZoomIn => "zoom_in",
            Self::ZoomOut => "zoom_out",
            Self::TunnelKCore => "tunnel_kcore",
            Self::RouteKCore => "route_kcore",
            Self::ClearPath => "clear_path",
            Self::ClearAll => "clear_all",
            Self::NetworkFacts => "network_facts",
            Self::Quit => "quit",
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.id() == id)
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::ZoomIn => "Zoom in",
            Self::ZoomOut => "Zoom out",
            Self::TunnelKCore => "Tunnel k-core centrality",
            Self::RouteKCore => "Route k-core centrality",
            Self::ClearPath => "Clear shortest path",
            Self::ClearAll => "Clear everything",
            Self::NetworkFacts => "Network facts",
            Self::Quit => "Quit",
        }
    }

    fn default_shortcut(self) -> KeyboardShortcut {
        KeyboardShortcut::key_only(match self {
            Self::ZoomIn => "Equal",
            Self::ZoomOut => "Minus",
            Self::TunnelKCore => "KeyK",
            Self::RouteKCore => "KeyR",
            Self::ClearPath => "KeyQ",
            Self::ClearAll => "KeyC",
            Self::NetworkFacts => "KeyI",
            Self::Quit => "Escape",
        })
    }
}

/// Keyboard shortcut definition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct KeyboardShortcut {
    /// The key code (e.g., `"KeyK"`, `"Equal"`, `"Escape"`)
    pub code: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyboardShortcut {
    #[must_use]
    #[allow(clippy::fn_params_excessive_bools)]
    pub fn new(code: String, ctrl: bool, shift: bool, alt: bool, meta: bool) -> Self {
        Self { code, ctrl, shift, alt, meta }
    }

    /// Create a shortcut with just a key code (no modifiers)
    #[must_use]
    pub fn key_only(code: &str) -> Self {
        Self::new(code.to_string(), false, false, false, false)
    }

    /// `+` and `_` sit on the same keys as `=` and `-`, and the numpad
    /// operators zoom like their main-keyboard twins.
    #[must_use]
    fn normalized(mut self) -> Self {
        match self.code.as_str() {
            "NumpadAdd" => self.code = "Equal".to_string(),
            "NumpadSubtract" => self.code = "Minus".to_string(),
            _ => {}
        }
        if self.code == "Equal" || self.code == "Minus" {
            self.shift = false;
        }
        self
    }

    /// Format the shortcut for display
    #[must_use]
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.meta {
            parts.push("Meta".to_string());
        }
        if self.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.alt {
            parts.push("Alt".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        parts.push(self.code_to_display_name());
        parts.join("+")
    }

    fn code_to_display_name(&self) -> String {
        match self.code.as_str() {
            "Equal" => "=".to_string(),
            "Minus" => "-".to_string(),
            "Escape" => "Esc".to_string(),
            "NumpadAdd" => "Numpad+".to_string(),
            "NumpadSubtract" => "Numpad-".to_string(),
            code if code.starts_with("Key") => code[3..].to_string(),
            code if code.starts_with("Digit") => code[5..].to_string(),
            _ => self.code.clone(),
        }
    }
}

/// Shortcut per action, as saved in the settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapHotkeys {
    pub shortcuts: HashMap<String, Option<KeyboardShortcut>>,
    #[serde(skip)]
    index: HashMap<KeyboardShortcut, MapAction>,
}

// Rebuild the index after deserialization
impl<'de> Deserialize<'de> for MapHotkeys {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct MapHotkeysHelper {
            shortcuts: HashMap<String, Option<KeyboardShortcut>>,
        }

        let helper = MapHotkeysHelper::deserialize(deserializer)?;
        let mut instance = MapHotkeys {
            shortcuts: helper.shortcuts,
            index: HashMap::new(),
        };
        instance.rebuild_index();
        Ok(instance)
    }
}

impl MapHotkeys {
    #[must_use]
    pub fn default_shortcuts() -> Self {
        let shortcuts = MapAction::ALL
            .into_iter()
            .map(|action| (action.id().to_string(), Some(action.default_shortcut())))
            .collect();

        let mut instance = Self { shortcuts, index: HashMap::new() };
        instance.rebuild_index();
        instance
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (id, shortcut) in &self.shortcuts {
            let (Some(action), Some(shortcut)) = (MapAction::from_id(id), shortcut) else {
                continue;
            };
            self.index.insert(shortcut.clone().normalized(), action);
        }
    }

    #[must_use]
    pub fn get(&self, action: MapAction) -> Option<&KeyboardShortcut> {
        self.shortcuts.get(action.id()).and_then(Option::as_ref)
    }

    /// Set a shortcut, `None` unbinds the action
    pub fn set(&mut self, action: MapAction, shortcut: Option<KeyboardShortcut>) {
        self.shortcuts.insert(action.id().to_string(), shortcut);
        self.rebuild_index();
    }

    /// Find which action matches the given keyboard event
    #[must_use]
    #[allow(clippy::fn_params_excessive_bools)]
    pub fn find_action(&self, code: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> Option<MapAction> {
        let shortcut = KeyboardShortcut::new(code.to_string(), ctrl, shift, alt, meta).normalized();
        self.index.get(&shortcut).copied()
    }

    /// Add defaults for actions missing from saved settings
    pub fn merge_with_defaults(&mut self) {
        let defaults = Self::default_shortcuts();
        let mut needs_rebuild = false;

        for (id, default_shortcut) in defaults.shortcuts {
            if let std::collections::hash_map::Entry::Vacant(e) = self.shortcuts.entry(id) {
                e.insert(default_shortcut);
                needs_rebuild = true;
            }
        }

        if needs_rebuild {
            self.rebuild_index();
        }
    }
}

impl Default for MapHotkeys {
    fn default() -> Self {
        Self::default_shortcuts()
    }
}

/// Listen for map hotkeys on the window.
///
/// Key presses in text fields and key repeats are ignored.
pub fn listen<F, S>(hotkeys: S, handler: F)
where
    F: Fn(MapAction, &web_sys::KeyboardEvent) + 'static,
    S: SignalGet<Value = MapHotkeys> + Copy + 'static,
{
    leptos::leptos_dom::helpers::window_event_listener(leptos::ev::keydown, move |ev| {
        let Some(target) = ev.target() else { return };
        let Ok(element) = target.dyn_into::<web_sys::HtmlElement>() else { return };
        let tag_name = element.tag_name().to_lowercase();
        if tag_name == "input" || tag_name == "textarea" {
            return;
        }

        if ev.repeat() {
            return;
        }

        let action = hotkeys.get().find_action(
            &ev.code(),
            ev.ctrl_key(),
            ev.shift_key(),
            ev.alt_key(),
            ev.meta_key(),
        );

        if let Some(action) = action {
            handler(action, &ev);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let hotkeys = MapHotkeys::default();
        assert_eq!(hotkeys.find_action("KeyK", false, false, false, false), Some(MapAction::TunnelKCore));
        assert_eq!(hotkeys.find_action("KeyR", false, false, false, false), Some(MapAction::RouteKCore));
        assert_eq!(hotkeys.find_action("KeyQ", false, false, false, false), Some(MapAction::ClearPath));
        assert_eq!(hotkeys.find_action("KeyC", false, false, false, false), Some(MapAction::ClearAll));
        assert_eq!(hotkeys.find_action("Escape", false, false, false, false), Some(MapAction::Quit));
        assert_eq!(hotkeys.find_action("KeyC", true, false, false, false), None);
    }

    #[test]
    fn test_zoom_key_aliases() {
        let hotkeys = MapHotkeys::default();
        for (code, shift) in [("Equal", false), ("Equal", true), ("NumpadAdd", false)] {
            assert_eq!(hotkeys.find_action(code, false, shift, false, false), Some(MapAction::ZoomIn));
        }
        for (code, shift) in [("Minus", false), ("Minus", true), ("NumpadSubtract", false)] {
            assert_eq!(hotkeys.find_action(code, false, shift, false, false), Some(MapAction::ZoomOut));
        }
    }

    #[test]
    fn test_rebinding() {
        let mut hotkeys = MapHotkeys::default();
        hotkeys.set(MapAction::TunnelKCore, Some(KeyboardShortcut::key_only("KeyT")));
        assert_eq!(hotkeys.find_action("KeyT", false, false, false, false), Some(MapAction::TunnelKCore));
        assert_eq!(hotkeys.find_action("KeyK", false, false, false, false), None);

        hotkeys.set(MapAction::Quit, None);
        assert_eq!(hotkeys.find_action("Escape", false, false, false, false), None);
    }

    #[test]
    fn test_deserialize_rebuilds_index_and_merge_adds_missing() {
        let json = r#"{"shortcuts": {"quit": {"code": "KeyX", "ctrl": false, "shift": false, "alt": false, "meta": false}}}"#;
        let mut hotkeys: MapHotkeys = serde_json::from_str(json).expect("valid json");
        assert_eq!(hotkeys.find_action("KeyX", false, false, false, false), Some(MapAction::Quit));
        assert_eq!(hotkeys.find_action("KeyK", false, false, false, false), None);

        hotkeys.merge_with_defaults();
        assert_eq!(hotkeys.find_action("KeyK", false, false, false, false), Some(MapAction::TunnelKCore));
        assert_eq!(hotkeys.get(MapAction::Quit).map(|s| s.code.as_str()), Some("KeyX"));
    }

    #[test]
    fn test_format() {
        assert_eq!(KeyboardShortcut::key_only("KeyK").format(), "K");
        assert_eq!(KeyboardShortcut::key_only("Equal").format(), "=");
        assert_eq!(KeyboardShortcut::new("KeyS".to_string(), true, true, false, false).format(), "Ctrl+Shift+S");
    }
}
