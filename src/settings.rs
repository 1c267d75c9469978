use log::warn;
use serde::{Deserialize, Serialize};

use crate::map::hotkeys::MapHotkeys;
use crate::services::ExtentSource;

const SETTINGS_KEY: &str = "paris_subway_map.settings";

/// Sizes and colours of everything drawn on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapStyle {
    pub seine_width: f64,
    pub seine_color: String,
    pub station_radius: f64,
    pub station_font_size: f64,
    pub station_fill: String,
    pub station_outline: String,
    pub label_color: String,
    pub line_width: f64,
    /// Perpendicular distance between parallel lines sharing a tunnel
    pub line_spacing: f64,
    pub tunnel_kcore_max_radius: f64,
    pub tunnel_kcore_color: String,
    pub route_kcore_max_radius: f64,
    pub route_kcore_color: String,
    pub selection_color: String,
    pub path_color: String,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            seine_width: 10.0,
            seine_color: "#def".to_string(),
            station_radius: 3.0,
            station_font_size: 5.0,
            station_fill: "white".to_string(),
            station_outline: "black".to_string(),
            label_color: "#666".to_string(),
            line_width: 2.0,
            line_spacing: 0.5,
            tunnel_kcore_max_radius: 15.0,
            tunnel_kcore_color: "#AAF".to_string(),
            route_kcore_max_radius: 17.0,
            route_kcore_color: "#FF4821".to_string(),
            selection_color: "#DDD".to_string(),
            path_color: "#E22901".to_string(),
        }
    }
}

/// User settings, persisted in local storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// URL of the Graql query gateway
    pub endpoint: String,
    pub extent_source: ExtentSource,
    pub style: MapStyle,
    pub hotkeys: MapHotkeys,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            endpoint: "/api/graql".to_string(),
            extent_source: ExtentSource::default(),
            style: MapStyle::default(),
            hotkeys: MapHotkeys::default(),
        }
    }
}

impl MapSettings {
    /// Parse saved settings, filling in hotkeys added since they were saved
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.hotkeys.merge_with_defaults();
        Ok(settings)
    }

    /// # Errors
    ///
    /// Returns an error if the settings cannot be serialized.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Load settings from local storage, falling back to defaults
    #[must_use]
    pub fn load() -> Self {
        let Some(storage) = local_storage() else {
            return Self::default();
        };

        match storage.get_item(SETTINGS_KEY) {
            Ok(Some(json)) => Self::from_json(&json).unwrap_or_else(|e| {
                warn!("Ignoring unreadable settings: {e}");
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(e) => {
                warn!("Failed to read settings: {e:?}");
                Self::default()
            }
        }
    }

    /// Save settings to local storage
    ///
    /// # Errors
    ///
    /// Returns an error if local storage is unavailable or the write fails.
    pub fn save(&self) -> Result<(), String> {
        let storage = local_storage().ok_or("Local storage is unavailable")?;
        let json = self.to_json().map_err(|e| format!("Failed to serialize settings: {e}"))?;
        storage
            .set_item(SETTINGS_KEY, &json)
            .map_err(|e| format!("Failed to save settings: {e:?}"))
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::hotkeys::MapAction;

    #[test]
    fn test_partial_settings_use_defaults() {
        let settings = MapSettings::from_json(r#"{"endpoint": "http://localhost:8080/graql", "style": {"line_width": 3.0}}"#)
            .expect("valid json");

        assert_eq!(settings.endpoint, "http://localhost:8080/graql");
        assert_eq!(settings.extent_source, ExtentSource::Store);
        assert_eq!(settings.style.line_width, 3.0);
        assert_eq!(settings.style.station_radius, 3.0);
        assert!(settings.hotkeys.get(MapAction::TunnelKCore).is_some());
    }

    #[test]
    fn test_round_trip_keeps_rebound_hotkey() {
        let mut settings = MapSettings::default();
        settings.extent_source = ExtentSource::Stations;
        settings.hotkeys.set(MapAction::ClearAll, None);

        let restored = MapSettings::from_json(&settings.to_json().expect("serializes")).expect("parses");
        assert_eq!(restored, settings);
    }

    #[test]
    fn test_malformed_settings() {
        assert!(MapSettings::from_json("{\"style\": 4}").is_err());
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_save_and_load_settings() {
        let mut settings = MapSettings::default();
        settings.endpoint = "http://localhost:4567/graql".to_string();
        settings.style.line_width = 4.0;

        settings.save().expect("local storage is available");
        let loaded = MapSettings::load();

        assert_eq!(loaded.endpoint, settings.endpoint);
        assert_eq!(loaded.style.line_width, 4.0);
    }

    #[wasm_bindgen_test]
    fn test_unreadable_settings_fall_back_to_defaults() {
        let storage = local_storage().expect("local storage is available");
        storage.set_item(SETTINGS_KEY, "{not json").expect("write succeeds");

        let loaded = MapSettings::load();
        assert_eq!(loaded.endpoint, MapSettings::default().endpoint);
    }
}
