//! Page settings.
//!
//! Every field has a default, so a page works with no configuration at all.
//! A page can override any subset by embedding
//! `<script type="application/json" id="page-config">{ ... }</script>`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::activation::ActivationConfig;

#[cfg(target_arch = "wasm32")]
pub const PAGE_CONFIG_ELEMENT_ID: &str = "page-config";

const DEFAULT_MUSIC_VOLUME: f64 = 0.1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid page config: {0}")]
    Parse(#[from] serde_json::Error),
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    #[error("page config element `{0}` is empty")]
    MissingDocument(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub preloader_delay_ms: u32,
    /// Preloader fade and activation prompt fade.
    pub fade_out_delay_ms: u32,
    pub music_volume: f64,
    pub music_src: String,
    pub sparkle_count: usize,
    /// Per content section.
    pub particle_count: usize,
    /// Per content section.
    pub streak_count: usize,
    pub animation_threshold: f64,
    /// Show the "enable music" button as soon as autoplay is refused. When
    /// false the page waits silently for the first click, key or touch.
    pub show_music_button_on_autoplay_block: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            preloader_delay_ms: 2000,
            fade_out_delay_ms: 500,
            music_volume: DEFAULT_MUSIC_VOLUME,
            music_src: "/assets/audio/background-music.mp3".to_string(),
            sparkle_count: 70,
            particle_count: 25,
            streak_count: 8,
            animation_threshold: 0.1,
            show_music_button_on_autoplay_block: true,
        }
    }
}

impl PageConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let mut config: PageConfig = serde_json::from_str(raw)?;
        config.music_volume = normalize_volume(config.music_volume);
        config.animation_threshold = config.animation_threshold.clamp(0.0, 1.0);
        Ok(config)
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    pub fn activation(&self) -> ActivationConfig {
        ActivationConfig {
            music_volume: normalize_volume(self.music_volume),
            show_prompt_immediately_on_block: self.show_music_button_on_autoplay_block,
            prompt_fade_out: Duration::from_millis(u64::from(self.fade_out_delay_ms)),
        }
    }
}

/// Accepts either a fraction or a percentage.
pub fn normalize_volume(mut value: f64) -> f64 {
    if !value.is_finite() {
        return DEFAULT_MUSIC_VOLUME;
    }
    let mut passes = 0;
    while value > 1.0 && passes < 4 {
        value /= 100.0;
        passes += 1;
    }
    value.clamp(0.0, 1.0)
}

/// Read overrides from the page, falling back to defaults.
#[cfg(target_arch = "wasm32")]
pub fn load_page_config() -> PageConfig {
    match read_page_config_element() {
        Ok(Some(config)) => config,
        Ok(None) => PageConfig::default(),
        Err(err) => {
            tracing::warn!(%err, "ignoring page config");
            PageConfig::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_page_config() -> PageConfig {
    PageConfig::default()
}

#[cfg(target_arch = "wasm32")]
fn read_page_config_element() -> Result<Option<PageConfig>, ConfigError> {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(PAGE_CONFIG_ELEMENT_ID))
    else {
        return Ok(None);
    };
    let raw = element.text_content().unwrap_or_default();
    if raw.trim().is_empty() {
        return Err(ConfigError::MissingDocument(PAGE_CONFIG_ELEMENT_ID.to_string()));
    }
    PageConfig::from_json(&raw).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_page_constants() {
        let config = PageConfig::default();
        assert_eq!(config.preloader_delay_ms, 2000);
        assert_eq!(config.fade_out_delay_ms, 500);
        assert_eq!(config.music_volume, 0.1);
        assert_eq!(
            (config.sparkle_count, config.particle_count, config.streak_count),
            (70, 25, 8)
        );
        assert_eq!(config.animation_threshold, 0.1);
        assert!(config.show_music_button_on_autoplay_block);
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let config =
            PageConfig::from_json(r#"{"show_music_button_on_autoplay_block": false, "sparkle_count": 12}"#)
                .unwrap();
        assert!(!config.show_music_button_on_autoplay_block);
        assert_eq!(config.sparkle_count, 12);
        assert_eq!(config.particle_count, 25);
        assert_eq!(config.music_src, PageConfig::default().music_src);
    }

    #[test]
    fn percentage_volume_is_scaled_down() {
        let config = PageConfig::from_json(r#"{"music_volume": 35}"#).unwrap();
        assert!((config.music_volume - 0.35).abs() < 1e-9);
        assert_eq!(normalize_volume(f64::NAN), DEFAULT_MUSIC_VOLUME);
        assert_eq!(normalize_volume(-0.5), 0.0);
        assert_eq!(normalize_volume(0.6), 0.6);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = PageConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("invalid page config"));
    }

    #[test]
    fn activation_settings_follow_page_config() {
        let config = PageConfig {
            music_volume: 20.0,
            fade_out_delay_ms: 750,
            show_music_button_on_autoplay_block: false,
            ..PageConfig::default()
        };
        let activation = config.activation();
        assert!((activation.music_volume - 0.2).abs() < 1e-9);
        assert_eq!(activation.prompt_fade_out, Duration::from_millis(750));
        assert!(!activation.show_prompt_immediately_on_block);
    }
}
