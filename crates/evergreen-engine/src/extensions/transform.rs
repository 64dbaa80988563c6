//! Parent/child placement for scene nodes.
//!
//! The graph keeps each node's local transform; `propagate` folds them down
//! the hierarchy and writes world matrices into the `Scene`. Games edit
//! locals during update and the runner propagates once before rendering.

use std::collections::HashMap;
use glam::{Mat4, Quat, Vec3};
use crate::api::types::NodeId;
use crate::core::scene::Scene;

/// Local transform data for nodes in a hierarchy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    /// Position relative to parent (or world if no parent).
    pub translation: Vec3,
    /// Rotation relative to parent.
    pub rotation: Quat,
    /// Scale multiplier relative to parent.
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    /// Rotation about the vertical axis, in radians.
    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.rotation = Quat::from_rotation_y(yaw);
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_uniform_scale(self, s: f32) -> Self {
        self.with_scale(Vec3::splat(s))
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Node in the transform hierarchy.
#[derive(Debug, Clone, Default)]
struct TransformNode {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalTransform,
}

/// Hierarchy of local transforms keyed by `NodeId`.
#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: HashMap<NodeId, TransformNode>,
    /// Nodes with no parent (top-level), in registration order.
    roots: Vec<NodeId>,
    /// Set when anything changes, cleared after propagate.
    dirty: bool,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node with a specific local transform.
    pub fn register_with(&mut self, id: NodeId, local: LocalTransform) {
        let node = self.nodes.entry(id).or_default();
        node.local = local;
        if node.parent.is_none() && !self.roots.contains(&id) {
            self.roots.push(id);
        }
        self.dirty = true;
    }

    /// Register a node with an identity local transform.
    pub fn register(&mut self, id: NodeId) {
        self.register_with(id, LocalTransform::default());
    }

    /// Set the parent of a node. Pass `None` to make it a root.
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) {
        self.nodes.entry(child).or_default();
        if let Some(p) = parent {
            self.nodes.entry(p).or_default();
            if !self.roots.contains(&p) && self.nodes[&p].parent.is_none() {
                self.roots.push(p);
            }
        }

        if let Some(old_parent) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(old_node) = self.nodes.get_mut(&old_parent) {
                old_node.children.retain(|&c| c != child);
            }
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }

        match parent {
            Some(p) => {
                if let Some(parent_node) = self.nodes.get_mut(&p) {
                    if !parent_node.children.contains(&child) {
                        parent_node.children.push(child);
                    }
                }
                self.roots.retain(|&r| r != child);
            }
            None => {
                if !self.roots.contains(&child) {
                    self.roots.push(child);
                }
            }
        }

        self.dirty = true;
    }

    /// Register `child` under `parent` in one step.
    pub fn attach(&mut self, child: NodeId, parent: NodeId, local: LocalTransform) {
        self.register_with(child, local);
        self.set_parent(child, Some(parent));
    }

    pub fn set_local(&mut self, id: NodeId, local: LocalTransform) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.local = local;
            self.dirty = true;
        }
    }

    pub fn get_local(&self, id: NodeId) -> Option<&LocalTransform> {
        self.nodes.get(&id).map(|n| &n.local)
    }

    pub fn get_local_mut(&mut self, id: NodeId) -> Option<&mut LocalTransform> {
        self.dirty = true;
        self.nodes.get_mut(&id).map(|n| &mut n.local)
    }

    pub fn get_parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn get_children(&self, id: NodeId) -> Option<&[NodeId]> {
        self.nodes.get(&id).map(|n| n.children.as_slice())
    }

    /// Remove a node and its whole subtree. Returns every removed id
    /// (the node itself first) so the caller can despawn them from the scene.
    pub fn remove_subtree(&mut self, id: NodeId) -> Vec<NodeId> {
        let mut removed = Vec::new();
        if let Some(parent) = self.get_parent(id) {
            if let Some(parent_node) = self.nodes.get_mut(&parent) {
                parent_node.children.retain(|&c| c != id);
            }
        }
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                stack.extend(node.children);
                removed.push(next);
            }
        }
        self.roots.retain(|r| !removed.contains(r));
        self.dirty = true;
        removed
    }

    /// Propagate transforms from roots down through the hierarchy,
    /// writing world matrices into the scene.
    pub fn propagate(&mut self, scene: &mut Scene) {
        if !self.dirty {
            return;
        }

        for &root in &self.roots {
            self.propagate_recursive(root, Mat4::IDENTITY, scene);
        }

        self.dirty = false;
    }

    fn propagate_recursive(&self, id: NodeId, parent_world: Mat4, scene: &mut Scene) {
        let Some(node) = self.nodes.get(&id) else { return };
        let world = parent_world * node.local.matrix();

        if let Some(scene_node) = scene.get_mut(id) {
            scene_node.world = world;
        }

        for &child in &node.children {
            self.propagate_recursive(child, world, scene);
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::Node;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn parent_child_relationship() {
        let mut graph = TransformGraph::new();
        let parent = NodeId(1);
        let child = NodeId(2);

        graph.register(parent);
        graph.register(child);
        graph.set_parent(child, Some(parent));

        assert_eq!(graph.get_parent(child), Some(parent));
        assert_eq!(graph.get_children(parent), Some([child].as_slice()));
        assert!(!graph.roots.contains(&child));
    }

    #[test]
    fn propagate_composes_translation_and_yaw() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        let ring = NodeId(1);
        let frame = NodeId(2);
        scene.spawn(Node::group(ring));
        scene.spawn(Node::group(frame));

        graph.register_with(
            ring,
            LocalTransform::new()
                .with_translation(Vec3::new(0.0, 2.0, 0.0))
                .with_yaw(FRAC_PI_2),
        );
        graph.attach(frame, ring, LocalTransform::new().with_translation(Vec3::new(0.0, 0.0, 5.0)));
        graph.propagate(&mut scene);

        // A quarter turn about Y maps +Z onto +X
        let p = scene.get(frame).unwrap().world_position();
        assert!((p - Vec3::new(5.0, 2.0, 0.0)).length() < 1e-5, "got {p:?}");
        assert!(!graph.is_dirty());
    }

    #[test]
    fn parent_scale_shrinks_children() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        scene.spawn(Node::group(NodeId(1)));
        scene.spawn(Node::group(NodeId(2)));
        graph.register_with(NodeId(1), LocalTransform::new().with_uniform_scale(0.0));
        graph.attach(NodeId(2), NodeId(1), LocalTransform::new().with_translation(Vec3::X * 7.0));
        graph.propagate(&mut scene);
        assert_eq!(scene.get(NodeId(2)).unwrap().world_position(), Vec3::ZERO);
    }

    #[test]
    fn remove_subtree_returns_all_descendants() {
        let mut graph = TransformGraph::new();
        graph.register(NodeId(1));
        graph.attach(NodeId(2), NodeId(1), LocalTransform::new());
        graph.attach(NodeId(3), NodeId(2), LocalTransform::new());
        graph.register(NodeId(4));

        let mut removed = graph.remove_subtree(NodeId(1));
        removed.sort();
        assert_eq!(removed, vec![NodeId(1), NodeId(2), NodeId(3)]);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.roots, vec![NodeId(4)]);
    }
}
