//! TOML configuration for glass synthesis and backend selection.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use log::{info, warn};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlassConfig {
    #[serde(default)]
    pub synthesis: SynthesisConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisConfig {
    /// Margin around the capsule that holds shadow bleed.
    #[serde(default = "default_inset")]
    pub inset: f32,
    #[serde(default = "default_seam_epsilon")]
    pub seam_epsilon: f32,
    /// Contraction of the ellipse casting the standalone ambient shadow.
    #[serde(default = "default_shadow_inner_inset")]
    pub shadow_inner_inset: f32,
    /// SVG overlaid instead of the highlight recipe at `edge_texture_size`.
    pub edge_texture: Option<PathBuf>,
    #[serde(default = "default_edge_texture_size")]
    pub edge_texture_size: f32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendConfig {
    /// Use image synthesis even where a native compositor effect exists.
    #[serde(default)]
    pub prefer_procedural: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        SynthesisConfig {
            inset: default_inset(),
            seam_epsilon: default_seam_epsilon(),
            shadow_inner_inset: default_shadow_inner_inset(),
            edge_texture: None,
            edge_texture_size: default_edge_texture_size(),
        }
    }
}

fn default_inset() -> f32 { 32.0 }
fn default_seam_epsilon() -> f32 { 0.25 }
fn default_shadow_inner_inset() -> f32 { 0.5 }
fn default_edge_texture_size() -> f32 { 40.0 }

impl GlassConfig {
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))?;
        let mut config: GlassConfig =
            toml::from_str(&content).map_err(|e| format!("parse {}: {e}", path.display()))?;
        config.resolve_relative_paths(path.parent().unwrap_or_else(|| Path::new(".")));
        Ok(config)
    }

    /// Load config with fallback chain:
    /// 1. $GLASS_SURFACE_CONFIG env var
    /// 2. ./glass-surface.toml
    /// 3. Built-in defaults
    pub fn find_and_load() -> Self {
        let candidates: Vec<PathBuf> = vec![
            std::env::var("GLASS_SURFACE_CONFIG").ok().map(PathBuf::from),
            Some(PathBuf::from("glass-surface.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        for path in &candidates {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => {
                        info!("Loaded glass config from {}", path.display());
                        return config;
                    }
                    Err(e) => warn!("Failed to load {}: {e}", path.display()),
                }
            }
        }

        info!("Using built-in default glass config");
        Self::default()
    }

    /// Texture paths in a config file are relative to that file.
    fn resolve_relative_paths(&mut self, base: &Path) {
        if let Some(texture) = &self.synthesis.edge_texture {
            if texture.is_relative() {
                self.synthesis.edge_texture = Some(base.join(texture));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_glass_toml() {
        let toml_str = r#"
[synthesis]
inset = 24.0
seam_epsilon = 0.5
edge_texture = "edge.svg"

[backend]
prefer_procedural = true
"#;
        let config: GlassConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.synthesis.inset, 24.0);
        assert_eq!(config.synthesis.seam_epsilon, 0.5);
        assert_eq!(config.synthesis.shadow_inner_inset, 0.5);
        assert_eq!(config.synthesis.edge_texture_size, 40.0);
        assert_eq!(config.synthesis.edge_texture.as_deref(), Some(Path::new("edge.svg")));
        assert!(config.backend.prefer_procedural);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config: GlassConfig = toml::from_str("").unwrap();
        assert_eq!(config.synthesis.inset, 32.0);
        assert_eq!(config.synthesis.seam_epsilon, 0.25);
        assert!(config.synthesis.edge_texture.is_none());
        assert!(!config.backend.prefer_procedural);
    }

    #[test]
    fn relative_texture_resolves_against_config_dir() {
        let mut config: GlassConfig = toml::from_str("[synthesis]\nedge_texture = \"tex/edge.svg\"").unwrap();
        config.resolve_relative_paths(Path::new("/etc/glass"));
        assert_eq!(
            config.synthesis.edge_texture.as_deref(),
            Some(Path::new("/etc/glass/tex/edge.svg"))
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = GlassConfig::load(Path::new("/nonexistent/glass-surface.toml")).unwrap_err();
        assert!(err.starts_with("read /nonexistent/glass-surface.toml"));
    }
}
