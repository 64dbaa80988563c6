use glam::{Mat4, Vec3};
use crate::api::types::NodeId;

/// What a node draws, if anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    /// Pure transform container.
    Group,
    /// A textured quad of the given size in local units, centered on the node.
    /// `user` is an opaque game value (e.g. an index into a gallery).
    Quad { width: f32, height: f32, user: u32 },
}

/// A node in the scene. World transforms are written by the transform graph.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// Whether this node is visible (hidden nodes are skipped by render and picking).
    pub visible: bool,
    pub kind: NodeKind,
    /// World transform, recomputed by `TransformGraph::propagate`.
    pub world: Mat4,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            visible: true,
            kind,
            world: Mat4::IDENTITY,
        }
    }

    pub fn group(id: NodeId) -> Self {
        Self::new(id, NodeKind::Group)
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// World-space origin of this node.
    pub fn world_position(&self) -> Vec3 {
        self.world.transform_point3(Vec3::ZERO)
    }

    /// World-space corners of a quad node (counter-clockwise from bottom-left).
    /// Returns `None` for nodes that are not quads.
    pub fn quad_corners(&self) -> Option<[Vec3; 4]> {
        let NodeKind::Quad { width, height, .. } = self.kind else {
            return None;
        };
        let hw = width * 0.5;
        let hh = height * 0.5;
        Some([
            self.world.transform_point3(Vec3::new(-hw, -hh, 0.0)),
            self.world.transform_point3(Vec3::new(hw, -hh, 0.0)),
            self.world.transform_point3(Vec3::new(hw, hh, 0.0)),
            self.world.transform_point3(Vec3::new(-hw, hh, 0.0)),
        ])
    }
}

/// Simple node storage using a flat Vec.
/// Designed for small node counts (tens of frames, a handful of groups).
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(64),
        }
    }

    /// Add a node to the scene.
    pub fn spawn(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Remove a node by ID. Returns the removed node if found.
    pub fn despawn(&mut self, id: NodeId) -> Option<Node> {
        let idx = self.nodes.iter().position(|n| n.id == id)?;
        Some(self.nodes.swap_remove(idx))
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
