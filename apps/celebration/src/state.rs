//! Shared application state, passed by reference to the components that need it.

use rand::rngs::SmallRng;

use crate::config::{CelebrationConfig, ConfigError};
use crate::gallery::Gallery;
use crate::phase::PhaseMachine;

pub struct AppState {
    pub phase: PhaseMachine,
    pub gallery: Gallery,
    pub watermark_text: String,
    pub watermark_icon: String,
    pub music_url: String,
}

impl AppState {
    pub fn from_config(config: &CelebrationConfig, rng: &mut SmallRng) -> Result<Self, ConfigError> {
        let gallery = Gallery::from_items(config.gallery.clone(), rng)?;
        Ok(Self::with_gallery(config, gallery))
    }

    pub fn with_gallery(config: &CelebrationConfig, gallery: Gallery) -> Self {
        Self {
            phase: PhaseMachine::new(),
            gallery,
            watermark_text: config.watermark_text.clone(),
            watermark_icon: config.watermark_icon.clone(),
            music_url: config.music_url.clone(),
        }
    }
}
