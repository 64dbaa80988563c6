pub mod runner;

pub use runner::GameRunner;
pub use evergreen_engine::InputEvent;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// The macro expands to:
/// - `thread_local!` storage for the GameRunner
/// - a `with_runner()` helper
/// - every wasm-bindgen export the host calls (init, tick, input, commands, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::MyGame;
///
/// evergreen_web::export_game!(MyGame, "my-game");
/// ```
///
/// `$game_type` must implement `evergreen_engine::Game` and provide `new()`.
/// `$game_name` is only used in the initialization log line.
///
/// The expansion names `wasm_bindgen`, `log`, `console_log` and
/// `console_error_panic_hook` directly, so the calling crate depends on them.
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn game_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        /// `dt` is the wall-clock frame time in seconds.
        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32, button: u32) {
            with_runner(|r| r.push_input($crate::InputEvent::PointerDown { x, y, button }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_wheel(delta_y: f32) {
            with_runner(|r| r.push_input($crate::InputEvent::Wheel { delta_y }));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input($crate::InputEvent::Custom { kind, a, b, c }));
        }

        /// Structured command from the host, JSON encoded.
        #[wasm_bindgen]
        pub fn game_command(json: &str) {
            with_runner(|r| r.command(json));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr())
        }

        #[wasm_bindgen]
        pub fn get_camera_ptr() -> *const f32 {
            with_runner(|r| r.camera_ptr())
        }

        #[wasm_bindgen]
        pub fn get_point_uniforms_ptr() -> *const f32 {
            with_runner(|r| r.point_uniforms_ptr())
        }

        #[wasm_bindgen]
        pub fn get_positions_ptr() -> *const f32 {
            with_runner(|r| r.positions_ptr())
        }

        #[wasm_bindgen]
        pub fn get_colors_ptr() -> *const f32 {
            with_runner(|r| r.colors_ptr())
        }

        #[wasm_bindgen]
        pub fn get_point_count() -> u32 {
            with_runner(|r| r.point_count())
        }

        #[wasm_bindgen]
        pub fn get_quads_ptr() -> *const f32 {
            with_runner(|r| r.quads_ptr())
        }

        #[wasm_bindgen]
        pub fn get_quad_count() -> u32 {
            with_runner(|r| r.quad_count())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        #[wasm_bindgen]
        pub fn get_audio_playing() -> bool {
            with_runner(|r| r.audio_playing())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_points() -> u32 {
            with_runner(|r| r.max_points())
        }

        #[wasm_bindgen]
        pub fn get_max_quads() -> u32 {
            with_runner(|r| r.max_quads())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }
    };
}
