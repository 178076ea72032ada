//! Asteroid Dodge entry point
//!
//! Handles platform-specific initialization and starts the tick loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger init failed: {}", e).into());
    }

    log::info!("Asteroid Dodge starting...");
    asteroid_dodge::platform::web::start()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use asteroid_dodge::Settings;
    use asteroid_dodge::platform::native;

    env_logger::init();
    log::info!("Asteroid Dodge (native) starting...");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("Seed: {}", seed);

    let summary = native::run(&settings, seed);
    log::info!(
        "Run finished after {} ticks with score {} ({} collisions){}",
        summary.ticks,
        summary.score,
        summary.collisions,
        if summary.game_over { " (game over)" } else { "" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
