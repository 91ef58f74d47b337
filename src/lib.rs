//! Anna Laura AI chat widget.
//!
//! Two independent parts share only the page lifecycle:
//! - `background`: a canvas of bouncing translucent particles plus pointer
//!   parallax on decorative shapes.
//! - `chat`: a canned-response coding assistant. Each user message gets one
//!   keyword-matched reply after a simulated 1–3 s "thinking" delay, shown
//!   with a typing indicator.
//!
//! The particle field, keyword rules and dispatcher are plain Rust and are
//! tested natively; the browser glue is only reached through `start_widget`.

use wasm_bindgen::prelude::*;

pub mod background;
pub mod chat;
pub mod config;
pub mod error;
pub mod logging;

pub use background::field::{PARTICLE_COUNT, Particle, ParticleField};
pub use chat::dispatcher::{Dispatcher, Message, Sender, SubmitOutcome};
pub use chat::responses::{Topic, classify, topic_for};
pub use config::WidgetConfig;
pub use error::WidgetError;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(WidgetConfig::default().log_level);
}

/// Start the widget against the stock page layout.
#[wasm_bindgen]
pub fn start_widget() -> Result<(), JsValue> {
    run(&WidgetConfig::default())?;
    Ok(())
}

/// Start the widget with a JSON override of [`WidgetConfig`], e.g.
/// `{"particle_count": 80, "elements": {"input": "prompt"}}`.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_widget_with_config(json: &str) -> Result<(), JsValue> {
    let cfg = WidgetConfig::from_json(json)?;
    run(&cfg)?;
    Ok(())
}

fn run(cfg: &WidgetConfig) -> error::Result<()> {
    cfg.validate()?;
    logging::init(cfg.log_level);
    chat::start_chat(cfg)?;
    background::start_background(cfg)?;
    log::info!("widget started ({} particles)", cfg.particle_count);
    Ok(())
}
