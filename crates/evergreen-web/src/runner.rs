use evergreen_engine::{
    Game, GameConfig, EngineContext, RenderContext,
    InputEvent, InputQueue, RenderBuffer,
    ProtocolLayout, FrameCounts, HEADER_FLOATS,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    config: GameConfig,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);
        let render_buffer = RenderBuffer::with_capacity(config.max_points, config.max_quads);

        Self {
            game,
            ctx: EngineContext::from_config(&config),
            input: InputQueue::new(),
            render_buffer,
            layout,
            config,
            header: [0.0; HEADER_FLOATS],
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.ctx.graph.propagate(&mut self.ctx.scene);
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Forward a structured JSON command to the game.
    pub fn command(&mut self, json: &str) {
        if !self.initialized {
            log::warn!("command before init ignored");
            return;
        }
        self.game.command(&mut self.ctx, json);
    }

    /// Run one frame: update game, propagate transforms, build render buffer.
    /// `dt` is the wall-clock time since the previous frame, in seconds.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();
        self.ctx.clock.advance(dt);

        self.game.update(&mut self.ctx, &self.input);
        self.input.drain();

        // State mutation is done; recompute transforms before the render pass
        self.ctx.graph.propagate(&mut self.ctx.scene);

        self.render_buffer.clear_quads();
        {
            let mut render_ctx = RenderContext {
                render_buffer: &mut self.render_buffer,
                scene: &self.ctx.scene,
                camera: &self.ctx.camera,
            };
            self.game.render(&mut render_ctx);
        }
        self.render_buffer.camera = self.ctx.camera.uniform();

        if self.ctx.events.len() > self.config.max_events {
            log::warn!(
                "dropping {} game events over capacity",
                self.ctx.events.len() - self.config.max_events
            );
            self.ctx.events.truncate(self.config.max_events);
        }

        self.layout.write_header(
            &mut self.header,
            FrameCounts {
                frame: self.ctx.clock.frames(),
                points: self.render_buffer.positions.len(),
                quads: self.render_buffer.quads.len(),
                events: self.ctx.events.len(),
                elapsed: self.ctx.clock.elapsed(),
            },
        );
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.render_buffer
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn positions_ptr(&self) -> *const f32 {
        self.render_buffer.positions_ptr()
    }

    pub fn colors_ptr(&self) -> *const f32 {
        self.render_buffer.colors_ptr()
    }

    pub fn point_uniforms_ptr(&self) -> *const f32 {
        self.render_buffer.point_uniforms_ptr()
    }

    pub fn point_count(&self) -> u32 {
        self.render_buffer.point_count()
    }

    pub fn quads_ptr(&self) -> *const f32 {
        self.render_buffer.quads_ptr()
    }

    pub fn quad_count(&self) -> u32 {
        self.render_buffer.quad_count()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        self.render_buffer.camera_ptr()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn audio_playing(&self) -> bool {
        self.ctx.audio.is_playing()
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_points(&self) -> u32 {
        self.layout.max_points as u32
    }

    pub fn max_quads(&self) -> u32 {
        self.layout.max_quads as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
