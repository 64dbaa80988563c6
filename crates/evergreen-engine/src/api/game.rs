use glam::Vec3;

use crate::api::types::{AudioRequest, GameEvent, NodeId};
use crate::core::scene::{Node, Scene};
use crate::core::time::FrameClock;
use crate::extensions::transform::{LocalTransform, TransformGraph};
use crate::input::queue::InputQueue;
use crate::renderer::camera::Camera3D;
use crate::renderer::instance::RenderBuffer;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Number of points in the particle buffer (default: 15000).
    /// Fixed for the lifetime of the runner.
    pub max_points: usize,
    /// Maximum number of textured quads per frame (default: 128).
    pub max_quads: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Largest animation step a single frame may take, in seconds (default: 0.1).
    pub max_frame_dt: f32,
    /// Vertical field of view of the camera in degrees (default: 50).
    pub camera_fov_deg: f32,
    /// Initial camera distance along +Z (default: 35).
    pub camera_distance: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_points: 15_000,
            max_quads: 128,
            max_events: 32,
            max_frame_dt: 0.1,
            camera_fov_deg: 50.0,
            camera_distance: 35.0,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn nodes, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The per-frame tick. Called exactly once per rendered frame.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Read-only render pass: write draw data for this frame.
    fn render(&self, _ctx: &mut RenderContext) {}

    /// Structured command from the host (JSON). Ignored by default.
    fn command(&mut self, _ctx: &mut EngineContext, _json: &str) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub graph: TransformGraph,
    pub camera: Camera3D,
    pub clock: FrameClock,
    pub events: Vec<GameEvent>,
    /// What the host's audio element should be doing.
    pub audio: AudioRequest,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::new(),
            graph: TransformGraph::new(),
            camera: Camera3D::new(Vec3::new(0.0, 0.0, config.camera_distance), config.camera_fov_deg),
            clock: FrameClock::new(config.max_frame_dt),
            events: Vec::with_capacity(config.max_events),
            audio: AudioRequest::default(),
            next_id: 1,
        }
    }

    /// Generate the next unique node ID.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn a node into the scene and register it in the transform graph,
    /// optionally under a parent.
    pub fn spawn(&mut self, node: Node, local: LocalTransform, parent: Option<NodeId>) -> NodeId {
        let id = node.id;
        self.scene.spawn(node);
        self.graph.register_with(id, local);
        if parent.is_some() {
            self.graph.set_parent(id, parent);
        }
        id
    }

    /// Despawn a node and everything below it.
    pub fn despawn_subtree(&mut self, id: NodeId) {
        for removed in self.graph.remove_subtree(id) {
            self.scene.despawn(removed);
        }
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Change the audio request, emitting nothing; games report it as they see fit.
    pub fn set_audio(&mut self, audio: AudioRequest) {
        self.audio = audio;
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for the read-only render pass.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
    pub scene: &'a Scene,
    pub camera: &'a Camera3D,
}
