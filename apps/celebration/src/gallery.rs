//! Gallery items and the active selection.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Most items a gallery holds; also the frame capacity of the render buffer.
pub const MAX_ITEMS: usize = 128;

/// Length of generated item ids.
const ID_LEN: usize = 7;
const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
}

impl Orientation {
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Landscape => Orientation::Portrait,
            Orientation::Portrait => Orientation::Landscape,
        }
    }

    /// Frame size in world units (width, height).
    pub fn frame_size(self) -> (f32, f32) {
        match self {
            Orientation::Landscape => (1.8, 1.2),
            Orientation::Portrait => (1.2, 1.6),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    /// Empty ids are filled in when the item enters a gallery.
    #[serde(default)]
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub orientation: Orientation,
}

impl GalleryItem {
    pub fn new(id: impl Into<String>, url: impl Into<String>, orientation: Orientation) -> Self {
        Self { id: id.into(), url: url.into(), orientation }
    }
}

/// Random lowercase base-36 id.
pub fn random_id(rng: &mut impl Rng) -> String {
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// The six sample photos shown before the user uploads anything.
pub fn sample_items() -> Vec<GalleryItem> {
    let sample = |n: u32, orientation: Orientation| {
        let (w, h) = match orientation {
            Orientation::Landscape => (800, 600),
            Orientation::Portrait => (600, 800),
        };
        GalleryItem::new(
            format!("sample{n}"),
            format!("https://picsum.photos/id/{n}/{w}/{h}"),
            orientation,
        )
    };
    vec![
        sample(10, Orientation::Landscape),
        sample(11, Orientation::Landscape),
        sample(14, Orientation::Landscape),
        sample(17, Orientation::Landscape),
        sample(19, Orientation::Portrait),
        sample(28, Orientation::Landscape),
    ]
}

/// Ordered items plus the active index. `active` is `None` only when empty.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    items: Vec<GalleryItem>,
    active: Option<usize>,
}

impl Gallery {
    /// Build from items, filling in missing ids. Duplicate ids are rejected.
    pub fn from_items(items: Vec<GalleryItem>, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        let mut gallery = Self::default();
        gallery.replace(items, rng)?;
        Ok(gallery)
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GalleryItem> {
        self.items.get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_item(&self) -> Option<&GalleryItem> {
        self.active.and_then(|i| self.items.get(i))
    }

    /// Select `index`. Out-of-range indices are ignored.
    pub fn set_active(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.active = Some(index);
        true
    }

    pub fn next(&mut self) {
        if let Some(i) = self.active {
            self.active = Some((i + 1) % self.items.len());
        }
    }

    pub fn prev(&mut self) {
        if let Some(i) = self.active {
            let n = self.items.len();
            self.active = Some((i + n - 1) % n);
        }
    }

    /// Replace the whole list and reset the selection to the first item.
    pub fn replace(&mut self, mut items: Vec<GalleryItem>, rng: &mut impl Rng) -> Result<(), ConfigError> {
        if items.len() > MAX_ITEMS {
            return Err(ConfigError::GalleryFull(MAX_ITEMS));
        }
        for i in 0..items.len() {
            if items[i].id.is_empty() {
                let id = unique_id(&items, rng);
                items[i].id = id;
            } else if items[..i].iter().any(|other| other.id == items[i].id) {
                return Err(ConfigError::DuplicateId(items[i].id.clone()));
            }
        }
        self.items = items;
        self.reset_selection();
        Ok(())
    }

    /// Append an item with a fresh id and select the first item. Returns the id.
    pub fn add(&mut self, url: impl Into<String>, orientation: Orientation, rng: &mut impl Rng) -> Result<String, ConfigError> {
        if self.items.len() >= MAX_ITEMS {
            return Err(ConfigError::GalleryFull(MAX_ITEMS));
        }
        let id = unique_id(&self.items, rng);
        self.items.push(GalleryItem::new(id.clone(), url, orientation));
        self.reset_selection();
        Ok(id)
    }

    /// Remove by id and select the first remaining item.
    pub fn remove(&mut self, id: &str) -> Result<GalleryItem, ConfigError> {
        let index = self.position(id).ok_or_else(|| ConfigError::UnknownItem(id.to_string()))?;
        let removed = self.items.remove(index);
        self.reset_selection();
        Ok(removed)
    }

    /// Any change to the list puts the selection back on the first item.
    fn reset_selection(&mut self) {
        self.active = if self.items.is_empty() { None } else { Some(0) };
    }

    pub fn set_orientation(&mut self, id: &str, orientation: Orientation) -> Result<(), ConfigError> {
        let index = self.position(id).ok_or_else(|| ConfigError::UnknownItem(id.to_string()))?;
        self.items[index].orientation = orientation;
        Ok(())
    }

    pub fn toggle_orientation(&mut self, id: &str) -> Result<Orientation, ConfigError> {
        let index = self.position(id).ok_or_else(|| ConfigError::UnknownItem(id.to_string()))?;
        let item = &mut self.items[index];
        item.orientation = item.orientation.toggled();
        Ok(item.orientation)
    }

    /// Global indices of the items in `orientation`, in gallery order.
    pub fn ring(&self, orientation: Orientation) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.orientation == orientation)
            .map(|(i, _)| i)
            .collect()
    }
}

fn unique_id(items: &[GalleryItem], rng: &mut impl Rng) -> String {
    loop {
        let id = random_id(rng);
        if !items.iter().any(|item| item.id == id) {
            return id;
        }
    }
}
