//! Evergreen Echo: New Year countdown in particles, ending on a photo carousel.
//!
//! Particles morph sphere → digits → "2026" → tree → starfield on a scripted
//! timeline; once the photo wall is up the carousel takes pointer input.

use evergreen_engine::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::carousel::{self, CarouselController};
use crate::commands::HostCommand;
use crate::config::{CelebrationConfig, ConfigError};
use crate::gallery::{self, Gallery};
use crate::particles::ParticleAnimator;
use crate::phase::{Phase, PhaseWatcher};
use crate::sequence::SequenceDirector;
use crate::state::AppState;

// ── Custom event kinds from the host UI ──────────────────────────────

pub const CUSTOM_START: u32 = 1;
pub const CUSTOM_NEXT: u32 = 2;
pub const CUSTOM_PREV: u32 = 3;
/// a = gallery index
pub const CUSTOM_SELECT: u32 = 4;
pub const CUSTOM_TOGGLE_AUDIO: u32 = 5;
/// The host's audio element refused to play (autoplay policy).
pub const CUSTOM_AUDIO_BLOCKED: u32 = 6;
/// Viewport resize (a = width px, b = height px).
pub const CUSTOM_RESIZE: u32 = 99;

// ── Game event kinds to the host ─────────────────────────────────────

/// a = phase code
pub const EVENT_PHASE: f32 = 1.0;
/// a = active index (-1 when none), b = item count
pub const EVENT_SELECTION: f32 = 2.0;
/// a = 1 when music should play
pub const EVENT_AUDIO: f32 = 3.0;

/// Seed offset so gallery ids do not share a stream with the particles.
const ID_SEED_SALT: u64 = 0x9E37_79B9;

pub struct Celebration {
    state: AppState,
    watcher: PhaseWatcher,
    particles: ParticleAnimator,
    carousel: CarouselController,
    sequence: SequenceDirector,
    rng: SmallRng,
    /// Last (active, count) reported to the host.
    reported_selection: Option<(Option<usize>, usize)>,
    reported_audio: Option<AudioRequest>,
}

impl Celebration {
    /// Sample configuration: six demo photos, 15000 particles.
    pub fn new() -> Self {
        let config = CelebrationConfig::default();
        let mut rng = SmallRng::seed_from_u64(config.seed ^ ID_SEED_SALT);
        let state = AppState::from_config(&config, &mut rng).unwrap_or_else(|e| {
            log::error!("sample gallery rejected: {e}");
            AppState::with_gallery(&config, Gallery::default())
        });
        Self::assemble(&config, state, rng)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::with_config(CelebrationConfig::from_json(json)?)
    }

    pub fn with_config(config: CelebrationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(config.seed ^ ID_SEED_SALT);
        let state = AppState::from_config(&config, &mut rng)?;
        Ok(Self::assemble(&config, state, rng))
    }

    fn assemble(config: &CelebrationConfig, state: AppState, rng: SmallRng) -> Self {
        let particle_count = config.particle_count.max(1);
        Self {
            particles: ParticleAnimator::new(particle_count, config.seed),
            carousel: CarouselController::new(),
            sequence: SequenceDirector::new(),
            watcher: state.phase.watch(),
            reported_selection: None,
            reported_audio: None,
            state,
            rng,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn particles(&self) -> &ParticleAnimator {
        &self.particles
    }

    pub fn carousel(&self) -> &CarouselController {
        &self.carousel
    }

    pub fn sequence(&self) -> &SequenceDirector {
        &self.sequence
    }

    pub fn phase(&self) -> Phase {
        self.state.phase.current()
    }

    /// Caption for the active frame, if any.
    pub fn active_label(&self) -> Option<String> {
        self.state.gallery.active().map(carousel::artwork_label)
    }

    fn start_sequence(&mut self, ctx: &mut EngineContext) {
        match self.sequence.start(&mut self.state.phase) {
            Ok(()) => ctx.set_audio(AudioRequest::Playing),
            Err(e) => log::warn!("start ignored: {e}"),
        }
    }

    fn apply_command(&mut self, ctx: &mut EngineContext, command: HostCommand) -> Result<(), ConfigError> {
        let rebuild = command.touches_gallery();
        let gallery = &mut self.state.gallery;
        match command {
            HostCommand::ReplaceGallery { items } => gallery.replace(items, &mut self.rng)?,
            HostCommand::AddImage { url, orientation } => {
                let id = gallery.add(url, orientation, &mut self.rng)?;
                log::debug!("added image {id}");
            }
            HostCommand::RemoveImage { id } => {
                gallery.remove(&id)?;
            }
            HostCommand::SetOrientation { id, orientation: Some(o) } => gallery.set_orientation(&id, o)?,
            HostCommand::SetOrientation { id, orientation: None } => {
                gallery.toggle_orientation(&id)?;
            }
            HostCommand::SetWatermark { text, icon } => {
                if let Some(text) = text {
                    self.state.watermark_text = text;
                }
                if let Some(icon) = icon {
                    self.state.watermark_icon = icon;
                }
            }
            HostCommand::SetMusic { url } => self.state.music_url = url,
        }
        if rebuild {
            self.carousel.rebuild(ctx, &self.state.gallery);
        }
        Ok(())
    }

    /// Emit selection and audio events when they differ from what the host last saw.
    fn report(&mut self, ctx: &mut EngineContext) {
        let gallery = &self.state.gallery;
        let selection = (gallery.active(), gallery.len());
        if self.reported_selection != Some(selection) {
            log::debug!("selection {:?} of {}", selection.0, selection.1);
            ctx.emit_event(GameEvent::new(
                EVENT_SELECTION,
                selection.0.map_or(-1.0, |i| i as f32),
                selection.1 as f32,
                0.0,
            ));
            self.reported_selection = Some(selection);
        }

        if self.reported_audio != Some(ctx.audio) {
            ctx.emit_event(GameEvent::new(
                EVENT_AUDIO,
                if ctx.audio.is_playing() { 1.0 } else { 0.0 },
                0.0,
                0.0,
            ));
            self.reported_audio = Some(ctx.audio);
        }
    }
}

impl Default for Celebration {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Celebration {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_points: self.particles.len(),
            max_quads: gallery::MAX_ITEMS,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.carousel.init(ctx, &self.state.gallery);
        ctx.emit_event(GameEvent::new(EVENT_PHASE, self.phase().code() as f32, 0.0, 0.0));
        log::info!(
            "{} particles, {} gallery items",
            self.particles.len(),
            self.state.gallery.len()
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        self.particles.begin_frame();

        // ── Handle input ─────────────────────────────────────────────
        self.carousel.set_enabled(self.phase() == Phase::PhotoWall);
        // Only the final size of a resize burst matters, and hit tests need it first
        if let Some((width, height, _)) = input.custom(CUSTOM_RESIZE).last() {
            ctx.camera.resize(width, height);
        }
        for event in input.iter() {
            match event {
                InputEvent::Custom { kind, a, .. } => match *kind {
                    CUSTOM_START => self.start_sequence(ctx),
                    CUSTOM_NEXT => self.state.gallery.next(),
                    CUSTOM_PREV => self.state.gallery.prev(),
                    CUSTOM_SELECT => {
                        if !a.is_finite() || *a < 0.0 || !self.state.gallery.set_active(*a as usize) {
                            log::warn!("select {a} out of range");
                        }
                    }
                    CUSTOM_TOGGLE_AUDIO => ctx.set_audio(ctx.audio.toggled()),
                    CUSTOM_AUDIO_BLOCKED => log::warn!("audio playback blocked by the browser"),
                    _ => {}
                },
                other => {
                    if let Some(index) = self.carousel.handle_input(other, &ctx.scene, &ctx.camera) {
                        self.state.gallery.set_active(index);
                    }
                }
            }
        }

        // ── Timeline ─────────────────────────────────────────────────
        self.sequence.advance(ctx.clock.wall_delta(), &mut self.state.phase);

        if let Some(phase) = self.watcher.poll(&self.state.phase) {
            self.particles.apply_phase(phase);
            ctx.emit_event(GameEvent::new(EVENT_PHASE, phase.code() as f32, 0.0, 0.0));
        }

        // ── Animate ──────────────────────────────────────────────────
        self.particles.tick(ctx.clock.elapsed());
        let visible = self.phase() == Phase::PhotoWall;
        self.carousel.update(ctx, &self.state.gallery, visible);

        self.report(ctx);
    }

    fn render(&self, ctx: &mut RenderContext) {
        ctx.render_buffer
            .write_points(self.particles.positions(), self.particles.colors());
        ctx.render_buffer.points = self.particles.uniforms();
        self.carousel.render(ctx, self.state.gallery.active());
    }

    fn command(&mut self, ctx: &mut EngineContext, json: &str) {
        let result = HostCommand::parse(json).and_then(|command| self.apply_command(ctx, command));
        if let Err(e) = result {
            log::warn!("command rejected: {e}");
        }
    }
}
