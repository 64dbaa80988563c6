use bytemuck::{Pod, Zeroable};

/// Unique identifier for a node in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// A game event communicated from Rust to the host via the shared buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

/// Audio transport request for the host's media element.
/// The engine never plays audio itself; it only states what it wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioRequest {
    #[default]
    Paused,
    Playing,
}

impl AudioRequest {
    pub fn is_playing(self) -> bool {
        matches!(self, AudioRequest::Playing)
    }

    pub fn toggled(self) -> Self {
        match self {
            AudioRequest::Paused => AudioRequest::Playing,
            AudioRequest::Playing => AudioRequest::Paused,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_event_is_four_floats() {
        assert_eq!(std::mem::size_of::<GameEvent>(), GameEvent::FLOATS * 4);
        let ev = GameEvent::new(1.0, 2.0, 3.0, 4.0);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&ev));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn audio_toggle_flips() {
        assert!(AudioRequest::Paused.toggled().is_playing());
        assert!(!AudioRequest::Playing.toggled().is_playing());
    }
}
