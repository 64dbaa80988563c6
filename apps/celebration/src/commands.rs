//! Structured commands the host sends through `game_command`.

use serde::Deserialize;

use crate::config::ConfigError;
use crate::gallery::{GalleryItem, Orientation};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum HostCommand {
    /// Swap in a whole new list; selection goes back to the first item.
    ReplaceGallery { items: Vec<GalleryItem> },
    AddImage {
        url: String,
        #[serde(default)]
        orientation: Orientation,
    },
    RemoveImage { id: String },
    /// Without an explicit orientation the item's orientation is flipped.
    SetOrientation {
        id: String,
        #[serde(default)]
        orientation: Option<Orientation>,
    },
    SetWatermark {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        icon: Option<String>,
    },
    SetMusic { url: String },
}

impl HostCommand {
    pub fn parse(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether applying the command changes the gallery layout.
    pub fn touches_gallery(&self) -> bool {
        matches!(
            self,
            HostCommand::ReplaceGallery { .. }
                | HostCommand::AddImage { .. }
                | HostCommand::RemoveImage { .. }
                | HostCommand::SetOrientation { .. }
        )
    }
}
