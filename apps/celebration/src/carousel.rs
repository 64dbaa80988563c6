//! Two-ring 3D photo carousel: landscape frames on the upper ring, portrait
//! frames on the lower one. The ring holding the selection turns it to the
//! front; the other ring idles.

use std::f32::consts::TAU;

use evergreen_engine::{
    point_in_convex, Camera3D, Damped, DampedVec3, EngineContext, InputEvent, LocalTransform,
    Node, NodeId, NodeKind, QuadInstance, RenderContext, Scene,
};
use glam::{Vec2, Vec3};

use crate::gallery::{Gallery, Orientation};

// ── Camera / zoom / pan ──────────────────────────────────────────────

pub const ZOOM_INITIAL: f32 = 35.0;
pub const ZOOM_MIN: f32 = 10.0;
pub const ZOOM_MAX: f32 = 60.0;
/// Zoom change per wheel delta unit.
const WHEEL_ZOOM_RATE: f32 = 0.02;
/// World units of pan per pixel dragged.
const DRAG_SENSITIVITY: f32 = 0.015;
/// Pointer travel (|dx| + |dy| summed, in pixels) below which a release is a click.
pub const CLICK_THRESHOLD: f32 = 5.0;

// ── Layout ───────────────────────────────────────────────────────────

/// Visible width (world units at the focal plane) below which rings shrink.
const COMPACT_VIEW_WIDTH: f32 = 8.0;
const RADIUS_COMPACT: f32 = 4.5;
const RADIUS_WIDE: f32 = 7.0;
/// Landscape ring sits this far above the group origin, portrait the same below.
const RING_OFFSET_Y: f32 = 1.8;
/// Group shift that brings the active ring to eye level.
const AUTO_CENTER_Y: f32 = 1.8;
/// Where the group parks while hidden.
const HIDDEN_Y: f32 = -20.0;

// ── Motion ───────────────────────────────────────────────────────────

const GROUP_SCALE_SMOOTH: f32 = 0.5;
const GROUP_POSITION_SMOOTH: f32 = 0.2;
const CAMERA_SMOOTH: f32 = 0.5;
const RING_SMOOTH: f32 = 0.5;
const FRAME_SCALE_SMOOTH: f32 = 0.3;
/// Idle ring spin, radians per second.
const IDLE_SPIN: f32 = 0.05;
const ACTIVE_SCALE: f32 = 1.2;
const HOVER_SCALE: f32 = 1.05;

const RING_ORIENTATIONS: [Orientation; 2] = [Orientation::Landscape, Orientation::Portrait];

/// Caption shown under the active frame.
pub fn artwork_label(index: usize) -> String {
    format!("ARTWORK {:02}", index + 1)
}

/// Vertical offset of a ring inside the group.
fn ring_offset(orientation: Orientation) -> f32 {
    match orientation {
        Orientation::Landscape => RING_OFFSET_Y,
        Orientation::Portrait => -RING_OFFSET_Y,
    }
}

/// Angle between neighbours on a ring of `count` items.
pub fn angle_step(count: usize) -> f32 {
    TAU / count.max(1) as f32
}

/// Local transform of slot `slot` on a ring of `count` items.
pub fn frame_local(slot: usize, count: usize, radius: f32, scale: f32) -> LocalTransform {
    let angle = slot as f32 * angle_step(count);
    LocalTransform::new()
        .with_translation(Vec3::new(angle.sin() * radius, 0.0, angle.cos() * radius))
        .with_yaw(angle)
        .with_uniform_scale(scale)
}

/// Ring radius for a given visible width.
pub fn ring_radius(visible_width: f32) -> f32 {
    if visible_width < COMPACT_VIEW_WIDTH {
        RADIUS_COMPACT
    } else {
        RADIUS_WIDE
    }
}

struct Frame {
    node: NodeId,
    /// Index into the gallery.
    index: usize,
    scale: Damped,
}

struct Ring {
    orientation: Orientation,
    node: NodeId,
    frames: Vec<Frame>,
    rotation: Damped,
}

impl Ring {
    fn slot_of(&self, index: usize) -> Option<usize> {
        self.frames.iter().position(|f| f.index == index)
    }
}

pub struct CarouselController {
    root: Option<NodeId>,
    rings: Vec<Ring>,
    visible: bool,
    group_position: DampedVec3,
    group_scale: Damped,
    camera_z: Damped,
    radius: f32,

    enabled: bool,
    zoom: f32,
    pan: Vec2,
    dragging: bool,
    last_pointer: Vec2,
    drag_accumulator: f32,
    hovered: Option<usize>,
}

impl CarouselController {
    pub fn new() -> Self {
        Self {
            root: None,
            rings: Vec::new(),
            visible: false,
            group_position: DampedVec3::new(Vec3::new(0.0, HIDDEN_Y, 0.0)),
            group_scale: Damped::new(0.0),
            camera_z: Damped::new(ZOOM_INITIAL),
            radius: RADIUS_WIDE,
            enabled: false,
            zoom: ZOOM_INITIAL,
            pan: Vec2::ZERO,
            dragging: false,
            last_pointer: Vec2::ZERO,
            drag_accumulator: 0.0,
            hovered: None,
        }
    }

    /// Spawn the (hidden) group node and build rings for `gallery`.
    pub fn init(&mut self, ctx: &mut EngineContext, gallery: &Gallery) {
        let id = ctx.next_id();
        let root = Node::group(id).with_visible(false);
        let local = LocalTransform::new()
            .with_translation(self.group_position.value())
            .with_uniform_scale(self.group_scale.value);
        self.root = Some(ctx.spawn(root, local, None));
        self.radius = ring_radius(ctx.camera.visible_size().x);
        self.rebuild(ctx, gallery);
    }

    /// Re-partition the gallery into rings and respawn every frame node.
    /// Ring rotations carry over.
    pub fn rebuild(&mut self, ctx: &mut EngineContext, gallery: &Gallery) {
        let Some(root) = self.root else {
            return;
        };

        let previous: Vec<(Orientation, Damped)> =
            self.rings.iter().map(|r| (r.orientation, r.rotation)).collect();
        for ring in self.rings.drain(..) {
            ctx.despawn_subtree(ring.node);
        }

        for orientation in RING_ORIENTATIONS {
            let indices = gallery.ring(orientation);
            if indices.is_empty() {
                continue;
            }
            let rotation = previous
                .iter()
                .find(|(o, _)| *o == orientation)
                .map(|(_, r)| *r)
                .unwrap_or_default();

            let ring_id = ctx.next_id();
            let ring_local = LocalTransform::new()
                .with_translation(Vec3::new(0.0, ring_offset(orientation), 0.0))
                .with_yaw(rotation.value);
            ctx.spawn(Node::group(ring_id), ring_local, Some(root));

            let (width, height) = orientation.frame_size();
            let count = indices.len();
            let frames = indices
                .into_iter()
                .enumerate()
                .map(|(slot, index)| {
                    let id = ctx.next_id();
                    let node = Node::new(id, NodeKind::Quad { width, height, user: index as u32 });
                    ctx.spawn(node, frame_local(slot, count, self.radius, 1.0), Some(ring_id));
                    Frame { node: id, index, scale: Damped::new(1.0) }
                })
                .collect();

            self.rings.push(Ring { orientation, node: ring_id, frames, rotation });
        }

        if self.hovered.is_some_and(|i| i >= gallery.len()) {
            self.hovered = None;
        }
        log::debug!(
            "carousel rebuilt: {} rings, {} frames",
            self.rings.len(),
            self.frame_count()
        );
    }

    /// Input is only accepted while enabled. Disabling drops any drag in progress.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.dragging = false;
            self.hovered = None;
        }
        self.enabled = enabled;
    }

    /// Feed one input event. Returns the gallery index picked by a click.
    pub fn handle_input(&mut self, event: &InputEvent, scene: &Scene, camera: &Camera3D) -> Option<usize> {
        if !self.enabled {
            return None;
        }
        match *event {
            InputEvent::Wheel { delta_y } => {
                self.zoom = (self.zoom + delta_y * WHEEL_ZOOM_RATE).clamp(ZOOM_MIN, ZOOM_MAX);
            }
            InputEvent::PointerDown { x, y, button } => {
                // Primary button only
                if button == 0 {
                    self.dragging = true;
                    self.last_pointer = Vec2::new(x, y);
                    self.drag_accumulator = 0.0;
                }
            }
            InputEvent::PointerMove { x, y } => {
                let pos = Vec2::new(x, y);
                if self.dragging {
                    let delta = pos - self.last_pointer;
                    self.drag_accumulator += delta.x.abs() + delta.y.abs();
                    self.last_pointer = pos;
                    // Screen y grows downward; dragging up moves content up
                    self.pan.x += delta.x * DRAG_SENSITIVITY;
                    self.pan.y -= delta.y * DRAG_SENSITIVITY;
                }
                self.hovered = self.hit_test(scene, camera, pos);
            }
            InputEvent::PointerUp { x, y } => {
                if self.dragging {
                    self.dragging = false;
                    if self.drag_accumulator < CLICK_THRESHOLD {
                        return self.hit_test(scene, camera, Vec2::new(x, y));
                    }
                }
            }
            _ => {}
        }
        None
    }

    /// Gallery index of the nearest frame whose projected quad contains `pointer`.
    pub fn hit_test(&self, scene: &Scene, camera: &Camera3D, pointer: Vec2) -> Option<usize> {
        if !self.visible {
            return None;
        }
        let mut best: Option<(usize, f32)> = None;
        for frame in self.rings.iter().flat_map(|r| &r.frames) {
            let Some(corners) = scene.get(frame.node).and_then(Node::quad_corners) else {
                continue;
            };
            let mut screen = [Vec2::ZERO; 4];
            let mut depth = 0.0;
            let mut in_front = true;
            for (out, corner) in screen.iter_mut().zip(corners) {
                match camera.project(corner) {
                    Some((px, d)) => {
                        *out = px;
                        depth += d * 0.25;
                    }
                    None => in_front = false,
                }
            }
            if !in_front || !point_in_convex(pointer, &screen) {
                continue;
            }
            if best.map_or(true, |(_, d)| depth < d) {
                best = Some((frame.index, depth));
            }
        }
        best.map(|(index, _)| index)
    }

    /// Per-frame animation. `visible` is true while the photo wall is showing.
    pub fn update(&mut self, ctx: &mut EngineContext, gallery: &Gallery, visible: bool) {
        let dt = ctx.clock.delta();
        self.visible = visible;

        let radius = ring_radius(ctx.camera.visible_size().x);
        if radius != self.radius {
            log::debug!("carousel radius {} -> {}", self.radius, radius);
            self.radius = radius;
        }

        // Group: fade in by scale, center the active ring, follow the pan
        let target_scale = if visible { 1.0 } else { 0.0 };
        self.group_scale.step(target_scale, GROUP_SCALE_SMOOTH, dt);

        let active = gallery.active();
        let auto_y = match gallery.active_item().map(|item| item.orientation) {
            Some(Orientation::Landscape) => -AUTO_CENTER_Y,
            _ => AUTO_CENTER_Y,
        };
        let target_y = if visible { auto_y + self.pan.y } else { HIDDEN_Y };
        self.group_position
            .step(Vec3::new(self.pan.x, target_y, 0.0), GROUP_POSITION_SMOOTH, dt);

        if visible {
            self.camera_z.value = ctx.camera.position.z;
            self.camera_z.step(self.zoom, CAMERA_SMOOTH, dt);
            ctx.camera.position.z = self.camera_z.value;
        }

        if let Some(root) = self.root {
            if let Some(node) = ctx.scene.get_mut(root) {
                node.visible = visible;
            }
            ctx.graph.set_local(
                root,
                LocalTransform::new()
                    .with_translation(self.group_position.value())
                    .with_uniform_scale(self.group_scale.value),
            );
        }

        for ring in &mut self.rings {
            let count = ring.frames.len();
            match active.and_then(|a| ring.slot_of(a)) {
                Some(slot) => {
                    let target = -(slot as f32) * angle_step(count);
                    ring.rotation.step(target, RING_SMOOTH, dt);
                }
                None => ring.rotation.set(ring.rotation.value + dt * IDLE_SPIN),
            }
            if let Some(local) = ctx.graph.get_local_mut(ring.node) {
                *local = local.with_yaw(ring.rotation.value);
            }

            for (slot, frame) in ring.frames.iter_mut().enumerate() {
                let base = if Some(frame.index) == active { ACTIVE_SCALE } else { 1.0 };
                let hover = if Some(frame.index) == self.hovered { HOVER_SCALE } else { 1.0 };
                frame.scale.step(base * hover, FRAME_SCALE_SMOOTH, dt);
                ctx.graph.set_local(frame.node, frame_local(slot, count, self.radius, frame.scale.value));
            }
        }
    }

    /// Push one quad per frame while the group is shown.
    pub fn render(&self, ctx: &mut RenderContext, active: Option<usize>) {
        let shown = self
            .root
            .and_then(|root| ctx.scene.get(root))
            .is_some_and(|node| node.visible);
        if !shown {
            return;
        }

        for frame in self.rings.iter().flat_map(|r| &r.frames) {
            let Some(node) = ctx.scene.get(frame.node) else {
                continue;
            };
            let NodeKind::Quad { width, height, user } = node.kind else {
                continue;
            };
            let mut flags = 0;
            if Some(frame.index) == active {
                flags |= QuadInstance::FLAG_ACTIVE | QuadInstance::FLAG_HIGHLIGHT;
            }
            if Some(frame.index) == self.hovered {
                flags |= QuadInstance::FLAG_HOVERED;
            }
            ctx.render_buffer.push_quad(QuadInstance::new(node.world, width, height, flags, user));
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn group_scale(&self) -> f32 {
        self.group_scale.value
    }

    pub fn group_position(&self) -> Vec3 {
        self.group_position.value()
    }

    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    pub fn frame_count(&self) -> usize {
        self.rings.iter().map(|r| r.frames.len()).sum()
    }

    pub fn ring_rotation(&self, orientation: Orientation) -> Option<f32> {
        self.rings
            .iter()
            .find(|r| r.orientation == orientation)
            .map(|r| r.rotation.value)
    }

    /// Node of the frame showing gallery item `index`.
    pub fn frame_node(&self, index: usize) -> Option<NodeId> {
        self.rings
            .iter()
            .flat_map(|r| &r.frames)
            .find(|f| f.index == index)
            .map(|f| f.node)
    }
}

impl Default for CarouselController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::{sample_items, GalleryItem};
    use evergreen_engine::RenderBuffer;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const DT: f32 = 1.0 / 60.0;

    fn gallery() -> Gallery {
        Gallery::from_items(sample_items(), &mut SmallRng::seed_from_u64(1)).unwrap()
    }

    fn setup(gallery: &Gallery) -> (EngineContext, CarouselController) {
        let mut ctx = EngineContext::new();
        let mut carousel = CarouselController::new();
        carousel.init(&mut ctx, gallery);
        ctx.graph.propagate(&mut ctx.scene);
        (ctx, carousel)
    }

    fn run(ctx: &mut EngineContext, carousel: &mut CarouselController, gallery: &Gallery, visible: bool, frames: usize) {
        for _ in 0..frames {
            ctx.clock.advance(DT);
            carousel.update(ctx, gallery, visible);
            ctx.graph.propagate(&mut ctx.scene);
        }
    }

    fn shown(gallery: &Gallery) -> (EngineContext, CarouselController) {
        let (mut ctx, mut carousel) = setup(gallery);
        carousel.set_enabled(true);
        run(&mut ctx, &mut carousel, gallery, true, 600);
        (ctx, carousel)
    }

    fn screen_pos(ctx: &EngineContext, carousel: &CarouselController, index: usize) -> Vec2 {
        let node = carousel.frame_node(index).and_then(|id| ctx.scene.get(id)).unwrap();
        ctx.camera.project(node.world_position()).unwrap().0
    }

    #[test]
    fn labels_are_one_based_and_padded() {
        assert_eq!(artwork_label(0), "ARTWORK 01");
        assert_eq!(artwork_label(11), "ARTWORK 12");
    }

    #[test]
    fn radius_follows_visible_width() {
        assert_eq!(ring_radius(7.9), 4.5);
        assert_eq!(ring_radius(8.0), 7.0);
    }

    #[test]
    fn frame_slots_face_outward() {
        let local = frame_local(1, 4, 7.0, 1.0);
        assert!((local.translation - Vec3::new(7.0, 0.0, 0.0)).length() < 1e-5);
        let facing = local.rotation * Vec3::Z;
        assert!((facing - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn rings_partition_by_orientation() {
        let gallery = gallery();
        let (ctx, carousel) = setup(&gallery);
        assert_eq!(carousel.ring_count(), 2);
        assert_eq!(carousel.frame_count(), 6);
        // root + 2 rings + 6 frames
        assert_eq!(ctx.scene.len(), 9);
    }

    #[test]
    fn empty_ring_is_omitted() {
        let items = vec![GalleryItem::new("a", "u", Orientation::Portrait)];
        let gallery = Gallery::from_items(items, &mut SmallRng::seed_from_u64(1)).unwrap();
        let (_, carousel) = setup(&gallery);
        assert_eq!(carousel.ring_count(), 1);
        assert_eq!(carousel.ring_rotation(Orientation::Landscape), None);
    }

    #[test]
    fn rebuild_replaces_nodes() {
        let mut gallery = gallery();
        let (mut ctx, mut carousel) = setup(&gallery);
        let id = gallery.get(4).unwrap().id.clone();
        gallery.remove(&id).unwrap();
        carousel.rebuild(&mut ctx, &gallery);
        assert_eq!(carousel.ring_count(), 1);
        assert_eq!(ctx.scene.len(), 1 + 1 + 5);
        assert_eq!(ctx.graph.len(), ctx.scene.len());
    }

    #[test]
    fn active_ring_settles_on_selection() {
        let mut gallery = gallery();
        gallery.set_active(2);
        let (_, carousel) = shown(&gallery);
        let expected = -2.0 * TAU / 5.0;
        let rotation = carousel.ring_rotation(Orientation::Landscape).unwrap();
        assert!((rotation - expected).abs() < 1e-3, "{rotation} vs {expected}");
    }

    #[test]
    fn inactive_ring_idles() {
        let gallery = gallery();
        let (mut ctx, mut carousel) = setup(&gallery);
        run(&mut ctx, &mut carousel, &gallery, true, 60);
        let rotation = carousel.ring_rotation(Orientation::Portrait).unwrap();
        assert!((rotation - 60.0 * DT * 0.05).abs() < 1e-4);
    }

    #[test]
    fn ring_resumes_from_rest_after_idling() {
        let mut gallery = gallery();
        gallery.set_active(2);
        let (mut ctx, mut carousel) = setup(&gallery);
        run(&mut ctx, &mut carousel, &gallery, true, 10);

        // Selection moves to the portrait ring for one frame
        gallery.set_active(4);
        run(&mut ctx, &mut carousel, &gallery, true, 1);
        let idled = carousel.ring_rotation(Orientation::Landscape).unwrap();

        gallery.set_active(0);
        run(&mut ctx, &mut carousel, &gallery, true, 1);
        let mut from_rest = Damped::new(idled);
        from_rest.step(0.0, RING_SMOOTH, DT);
        let rotation = carousel.ring_rotation(Orientation::Landscape).unwrap();
        assert!((rotation - from_rest.value).abs() < 1e-6, "{rotation} vs {}", from_rest.value);
    }

    #[test]
    fn group_shows_and_hides() {
        let gallery = gallery();
        let (mut ctx, mut carousel) = setup(&gallery);
        assert_eq!(carousel.group_scale(), 0.0);

        run(&mut ctx, &mut carousel, &gallery, true, 600);
        assert_eq!(carousel.group_scale(), 1.0);
        // Active item 0 is landscape: group drops so the upper ring sits at eye level
        assert!((carousel.group_position().y + 1.8).abs() < 1e-3);

        run(&mut ctx, &mut carousel, &gallery, false, 600);
        assert_eq!(carousel.group_scale(), 0.0);
        assert!((carousel.group_position().y + 20.0).abs() < 1e-3);
    }

    #[test]
    fn camera_follows_zoom_while_shown() {
        let gallery = gallery();
        let (mut ctx, mut carousel) = shown(&gallery);
        carousel.handle_input(&InputEvent::Wheel { delta_y: 500.0 }, &ctx.scene, &ctx.camera);
        assert_eq!(carousel.zoom(), 45.0);
        run(&mut ctx, &mut carousel, &gallery, true, 600);
        assert!((ctx.camera.position.z - 45.0).abs() < 1e-2);
    }

    #[test]
    fn wheel_zoom_is_clamped() {
        let gallery = gallery();
        let (ctx, mut carousel) = shown(&gallery);
        carousel.handle_input(&InputEvent::Wheel { delta_y: 10_000.0 }, &ctx.scene, &ctx.camera);
        assert_eq!(carousel.zoom(), ZOOM_MAX);
        carousel.handle_input(&InputEvent::Wheel { delta_y: -10_000.0 }, &ctx.scene, &ctx.camera);
        assert_eq!(carousel.zoom(), ZOOM_MIN);
    }

    #[test]
    fn input_ignored_while_disabled() {
        let gallery = gallery();
        let (ctx, mut carousel) = setup(&gallery);
        carousel.handle_input(&InputEvent::Wheel { delta_y: 100.0 }, &ctx.scene, &ctx.camera);
        carousel.handle_input(&InputEvent::PointerDown { x: 0.0, y: 0.0, button: 0 }, &ctx.scene, &ctx.camera);
        assert_eq!(carousel.zoom(), ZOOM_INITIAL);
        assert!(!carousel.is_dragging());
    }

    #[test]
    fn disabling_drops_drag() {
        let gallery = gallery();
        let (ctx, mut carousel) = shown(&gallery);
        carousel.handle_input(&InputEvent::PointerDown { x: 0.0, y: 0.0, button: 0 }, &ctx.scene, &ctx.camera);
        assert!(carousel.is_dragging());
        carousel.set_enabled(false);
        assert!(!carousel.is_dragging());
    }

    #[test]
    fn secondary_button_does_not_drag() {
        let gallery = gallery();
        let (ctx, mut carousel) = shown(&gallery);
        carousel.handle_input(&InputEvent::PointerDown { x: 0.0, y: 0.0, button: 2 }, &ctx.scene, &ctx.camera);
        assert!(!carousel.is_dragging());
    }

    #[test]
    fn drag_pans_with_inverted_y() {
        let gallery = gallery();
        let (ctx, mut carousel) = shown(&gallery);
        carousel.handle_input(&InputEvent::PointerDown { x: 100.0, y: 100.0, button: 0 }, &ctx.scene, &ctx.camera);
        carousel.handle_input(&InputEvent::PointerMove { x: 110.0, y: 120.0 }, &ctx.scene, &ctx.camera);
        let pan = carousel.pan();
        assert!((pan.x - 0.15).abs() < 1e-5);
        assert!((pan.y + 0.3).abs() < 1e-5);
    }

    #[test]
    fn click_selects_frame_under_pointer() {
        let gallery = gallery();
        let (ctx, mut carousel) = shown(&gallery);
        let target = screen_pos(&ctx, &carousel, 1);

        carousel.handle_input(&InputEvent::PointerDown { x: target.x, y: target.y, button: 0 }, &ctx.scene, &ctx.camera);
        carousel.handle_input(&InputEvent::PointerMove { x: target.x + 2.0, y: target.y + 2.0 }, &ctx.scene, &ctx.camera);
        let picked = carousel.handle_input(&InputEvent::PointerUp { x: target.x + 2.0, y: target.y + 2.0 }, &ctx.scene, &ctx.camera);
        assert_eq!(picked, Some(1));
    }

    #[test]
    fn front_frame_sits_at_screen_center() {
        let gallery = gallery();
        let (ctx, carousel) = shown(&gallery);
        let center = ctx.camera.viewport_px * 0.5;
        assert!((screen_pos(&ctx, &carousel, 0) - center).length() < 1.0);
        assert_eq!(carousel.hit_test(&ctx.scene, &ctx.camera, center), Some(0));
    }

    #[test]
    fn long_drag_suppresses_click() {
        let gallery = gallery();
        let (ctx, mut carousel) = shown(&gallery);
        let target = screen_pos(&ctx, &carousel, 0);

        carousel.handle_input(&InputEvent::PointerDown { x: target.x, y: target.y, button: 0 }, &ctx.scene, &ctx.camera);
        carousel.handle_input(&InputEvent::PointerMove { x: target.x + 3.0, y: target.y }, &ctx.scene, &ctx.camera);
        carousel.handle_input(&InputEvent::PointerMove { x: target.x, y: target.y + 3.0 }, &ctx.scene, &ctx.camera);
        let picked = carousel.handle_input(&InputEvent::PointerUp { x: target.x, y: target.y + 3.0 }, &ctx.scene, &ctx.camera);
        assert_eq!(picked, None);
    }

    #[test]
    fn empty_space_click_selects_nothing() {
        let gallery = gallery();
        let (ctx, mut carousel) = shown(&gallery);
        carousel.handle_input(&InputEvent::PointerDown { x: 2.0, y: 2.0, button: 0 }, &ctx.scene, &ctx.camera);
        let picked = carousel.handle_input(&InputEvent::PointerUp { x: 2.0, y: 2.0 }, &ctx.scene, &ctx.camera);
        assert_eq!(picked, None);
    }

    #[test]
    fn hover_enlarges_frame() {
        let gallery = gallery();
        let (mut ctx, mut carousel) = shown(&gallery);
        let target = screen_pos(&ctx, &carousel, 1);
        carousel.handle_input(&InputEvent::PointerMove { x: target.x, y: target.y }, &ctx.scene, &ctx.camera);
        assert_eq!(carousel.hovered(), Some(1));
        run(&mut ctx, &mut carousel, &gallery, true, 300);
        let node = carousel.frame_node(1).unwrap();
        let scale = ctx.graph.get_local(node).unwrap().scale.x;
        assert!((scale - 1.05).abs() < 1e-3);
    }

    #[test]
    fn render_flags_active_frame() {
        let gallery = gallery();
        let (ctx, carousel) = shown(&gallery);
        let mut buffer = RenderBuffer::with_capacity(0, 16);
        let mut render = RenderContext { render_buffer: &mut buffer, scene: &ctx.scene, camera: &ctx.camera };
        carousel.render(&mut render, gallery.active());
        assert_eq!(buffer.quads.len(), 6);
        let active: Vec<_> = buffer.quads.iter().filter(|q| q.has_flag(QuadInstance::FLAG_HIGHLIGHT)).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].user, 0.0);
        assert_eq!(active[0].width, 1.8);
    }

    #[test]
    fn hidden_group_renders_nothing() {
        let gallery = gallery();
        let (ctx, carousel) = setup(&gallery);
        let mut buffer = RenderBuffer::with_capacity(0, 16);
        let mut render = RenderContext { render_buffer: &mut buffer, scene: &ctx.scene, camera: &ctx.camera };
        carousel.render(&mut render, gallery.active());
        assert!(buffer.quads.is_empty());
    }
}
