//! Startup configuration, parsed from JSON supplied by the host.

use serde::Deserialize;

use crate::gallery::{self, GalleryItem};

pub const DEFAULT_PARTICLE_COUNT: usize = 15_000;
pub const DEFAULT_WATERMARK: &str = "2026 NEW YEAR | 记录美好瞬间";
pub const DEFAULT_MUSIC_URL: &str = "https://cdn.pixabay.com/audio/2022/12/16/audio_1739c9472e.mp3";
const DEFAULT_SEED: u64 = 0x2026;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate gallery id: {0}")]
    DuplicateId(String),

    #[error("particle count must be at least 1")]
    ZeroParticleCount,

    #[error("no gallery item with id {0}")]
    UnknownItem(String),

    #[error("gallery is limited to {0} items")]
    GalleryFull(usize),
}

/// Every field is optional; missing fields take the sample defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CelebrationConfig {
    pub gallery: Vec<GalleryItem>,
    pub watermark_text: String,
    /// Image URL (usually a data URL) for the watermark badge.
    /// Empty means the host draws its built-in badge.
    pub watermark_icon: String,
    pub music_url: String,
    /// Fixed for the lifetime of the app.
    pub particle_count: usize,
    pub seed: u64,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            gallery: gallery::sample_items(),
            watermark_text: DEFAULT_WATERMARK.to_string(),
            watermark_icon: String::new(),
            music_url: DEFAULT_MUSIC_URL.to_string(),
            particle_count: DEFAULT_PARTICLE_COUNT,
            seed: DEFAULT_SEED,
        }
    }
}

impl CelebrationConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::ZeroParticleCount);
        }
        if self.gallery.len() > gallery::MAX_ITEMS {
            return Err(ConfigError::GalleryFull(gallery::MAX_ITEMS));
        }
        for (i, item) in self.gallery.iter().enumerate() {
            if !item.id.is_empty() && self.gallery[..i].iter().any(|other| other.id == item.id) {
                return Err(ConfigError::DuplicateId(item.id.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::Orientation;

    #[test]
    fn empty_object_gives_defaults() {
        let config = CelebrationConfig::from_json("{}").unwrap();
        assert_eq!(config.particle_count, 15_000);
        assert_eq!(config.gallery.len(), 6);
        assert_eq!(config.watermark_text, DEFAULT_WATERMARK);
        assert_eq!(config.music_url, DEFAULT_MUSIC_URL);
    }

    #[test]
    fn fields_override_defaults() {
        let config = CelebrationConfig::from_json(
            r#"{"particle_count": 2000, "gallery": [{"id": "a", "url": "x.jpg", "orientation": "portrait"}], "seed": 3}"#,
        )
        .unwrap();
        assert_eq!(config.particle_count, 2000);
        assert_eq!(config.seed, 3);
        assert_eq!(config.gallery[0].orientation, Orientation::Portrait);
    }

    #[test]
    fn rejects_zero_particles() {
        let err = CelebrationConfig::from_json(r#"{"particle_count": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroParticleCount));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = CelebrationConfig::from_json(
            r#"{"gallery": [{"id": "a", "url": "1"}, {"id": "a", "url": "2"}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate gallery id: a"));
    }

    #[test]
    fn rejects_oversized_gallery() {
        let config = CelebrationConfig {
            gallery: vec![GalleryItem::new("", "u", Orientation::Landscape); gallery::MAX_ITEMS + 1],
            ..CelebrationConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::GalleryFull(_))));
    }

    #[test]
    fn malformed_json_is_typed() {
        let err = CelebrationConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().starts_with("malformed json:"));
    }
}
