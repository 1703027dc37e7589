//! Centralized viewer options with TOML preset support.
//!
//! Camera and gesture tuning, display settings, and keybindings are
//! consolidated here. Options serialize to/from TOML so presets can be
//! kept next to the binary and passed on the command line.

mod camera;
mod display;
mod gestures;
mod keybindings;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use gestures::GestureOptions;
pub use keybindings::KeybindingOptions;
use serde::{Deserialize, Serialize};

use crate::error::CubeviewError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Projection, sensitivity, and default pose.
    pub camera: CameraOptions,
    /// Clear color and depth settings.
    pub display: DisplayOptions,
    /// Tap / double-tap thresholds.
    pub gestures: GestureOptions,
    /// Keyboard binding options.
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CubeviewError::OptionsParse`] for malformed TOML or camera
    /// values that cannot drive the controller (see
    /// [`CameraOptions::validate`]).
    pub fn from_toml_str(content: &str) -> Result<Self, CubeviewError> {
        let mut opts: Self = toml::from_str(content)
            .map_err(|e| CubeviewError::OptionsParse(e.to_string()))?;
        opts.camera.validate().map_err(CubeviewError::OptionsParse)?;
        opts.keybindings.rebuild_reverse_map();
        Ok(opts)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, CubeviewError> {
        let content =
            std::fs::read_to_string(path).map_err(CubeviewError::Io)?;
        let opts = Self::from_toml_str(&content)?;
        log::info!("loaded options from {}", path.display());
        Ok(opts)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), CubeviewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CubeviewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(CubeviewError::Io)?;
        }
        std::fs::write(path, content).map_err(CubeviewError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[camera]
fovy = 60.0
max_scale = 4.0
";
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.camera.fovy, 60.0);
        assert_eq!(opts.camera.max_scale, 4.0);
        // Everything else should be default
        assert_eq!(opts.camera.min_scale, 0.05);
        assert_eq!(opts.camera.default_pose, [0.0, 0.0, 0.0, 1.0, 1.0, 0.0]);
        assert_eq!(opts.gestures.double_tap_ms, 300);
        assert!(opts.display.depth_test);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml_str("[camera]\nfovy = \"wide\"\n");
        assert!(matches!(err, Err(CubeviewError::OptionsParse(_))));
    }

    #[test]
    fn out_of_range_camera_values_are_rejected() {
        for bad in [
            "[camera]\nmin_scale = 30.0\n",
            "[camera]\nmin_scale = 0.0\n",
            "[camera]\nmin_scale = -1.0\n",
            "[camera]\nmax_scale = nan\n",
            "[camera]\nmax_scale = inf\n",
            "[camera]\nfovy = nan\n",
        ] {
            let result = Options::from_toml_str(bad);
            assert!(
                matches!(result, Err(CubeviewError::OptionsParse(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(opts.keybindings.lookup("KeyR"), Some(KeyAction::ResetPose));
        assert_eq!(opts.keybindings.lookup("Equal"), Some(KeyAction::ZoomIn));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn rebound_keys_resolve_after_parse() {
        let toml_str = r#"
[keybindings.bindings]
reset_pose = "Space"
"#;
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.keybindings.lookup("Space"), Some(KeyAction::ResetPose));
        assert_eq!(opts.keybindings.lookup("KeyR"), None);
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("cubeview-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.display.clear_color = [0.1, 0.2, 0.3];
        opts.save(&dir.join("dusk.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "not a preset").unwrap();

        let loaded = Options::load(&dir.join("dusk.toml")).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["dusk".to_owned()]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
