use wasm_bindgen::prelude::*;

pub mod carousel;
pub mod commands;
pub mod config;
pub mod gallery;
pub mod game;
pub mod palette;
pub mod particles;
pub mod phase;
pub mod sequence;
pub mod shapes;
pub mod state;
pub mod text;

use game::Celebration;

evergreen_web::export_game!(Celebration, "celebration");

/// Like `game_init`, but from a JSON configuration
/// (`{gallery, watermark_text, watermark_icon, music_url, particle_count, seed}`).
/// Rejected configurations leave the previous runner, if any, in place.
#[wasm_bindgen]
pub fn game_init_with_config(json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let game = Celebration::from_json(json).map_err(|e| {
        log::warn!("configuration rejected: {e}");
        JsValue::from_str(&e.to_string())
    })?;
    let mut runner = evergreen_web::GameRunner::new(game);
    runner.init();
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("celebration: initialized from configuration");
    Ok(())
}

// ── App-specific readouts ────────────────────────────────────────────

#[wasm_bindgen]
pub fn get_phase_code() -> u32 {
    with_runner(|r| r.game().phase().code())
}

#[wasm_bindgen]
pub fn get_phase_name() -> String {
    with_runner(|r| r.game().phase().name().to_string())
}

/// Active gallery index, or -1 when the gallery is empty.
#[wasm_bindgen]
pub fn get_active_index() -> i32 {
    with_runner(|r| r.game().state().gallery.active().map_or(-1, |i| i as i32))
}

#[wasm_bindgen]
pub fn get_gallery_count() -> u32 {
    with_runner(|r| r.game().state().gallery.len() as u32)
}

#[wasm_bindgen]
pub fn get_active_label() -> String {
    with_runner(|r| r.game().active_label().unwrap_or_default())
}

#[wasm_bindgen]
pub fn get_watermark_text() -> String {
    with_runner(|r| r.game().state().watermark_text.clone())
}

#[wasm_bindgen]
pub fn get_watermark_icon() -> String {
    with_runner(|r| r.game().state().watermark_icon.clone())
}

#[wasm_bindgen]
pub fn get_music_url() -> String {
    with_runner(|r| r.game().state().music_url.clone())
}

/// Current gallery as JSON (`[{id, url, orientation}]`).
#[wasm_bindgen]
pub fn get_gallery_json() -> String {
    with_runner(|r| match serde_json::to_string(r.game().state().gallery.items()) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("gallery serialization failed: {e}");
            String::from("[]")
        }
    })
}
