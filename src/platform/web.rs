//! Browser driver
//!
//! Draws onto a 2D canvas, plays effects through `<audio>` elements, reads
//! the keyboard from document listeners and ticks from `setInterval`.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlAudioElement, HtmlCanvasElement, HtmlImageElement};

use super::Game;
use crate::assets::{SpriteDesc, SpriteKind};
use crate::audio::{AudioBackend, AudioManager, SoundEffect};
use crate::input::KeyEvent;
use crate::renderer::{Font, Surface};
use crate::settings::Settings;
use crate::sim::{Arena, Simulation, TickOutcome};

/// Canvas element the game draws into
pub const CANVAS_ID: &str = "game";
/// Toggles the demo pilot
const AUTOPILOT_KEY: &str = "KeyI";

/// [`Surface`] backed by a canvas 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    images: HashMap<SpriteKind, HtmlImageElement>,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        ctx.set_text_align("center");
        ctx.set_fill_style_str("white");

        let mut images = HashMap::new();
        for kind in SpriteKind::ALL {
            let img = HtmlImageElement::new()?;
            img.set_src(kind.path());
            images.insert(kind, img);
        }

        Ok(Self { ctx, images })
    }

    fn try_draw_sprite(&self, sprite: &SpriteDesc, center: Vec2, rotation_deg: f32) -> Result<(), JsValue> {
        let Some(img) = self.images.get(&sprite.kind) else {
            return Ok(());
        };
        let (w, h) = (sprite.width as f64, sprite.height as f64);

        self.ctx.save();
        self.ctx.translate(center.x as f64, center.y as f64)?;
        self.ctx.rotate((rotation_deg as f64).to_radians())?;
        let drawn = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(img, -w / 2.0, -h / 2.0, w, h);
        self.ctx.restore();
        drawn
    }
}

impl Surface for CanvasSurface {
    fn draw_sprite(&mut self, sprite: &SpriteDesc, center: Vec2, rotation_deg: f32) {
        // Images that have not finished loading throw; skip them this frame
        if let Err(e) = self.try_draw_sprite(sprite, center, rotation_deg) {
            log::trace!("skipped {:?}: {:?}", sprite.kind, e);
        }
    }

    fn set_font(&mut self, font: Font) {
        self.ctx.set_font(&font.css());
    }

    fn draw_text(&mut self, text: &str, pos: Vec2) {
        if let Err(e) = self.ctx.fill_text(text, pos.x as f64, pos.y as f64) {
            log::warn!("fill_text failed: {:?}", e);
        }
    }
}

/// Plays each effect on a fresh `<audio>` element so overlapping shots stack
#[derive(Debug, Default)]
pub struct HtmlAudioBackend;

impl AudioBackend for HtmlAudioBackend {
    fn play(&self, effect: SoundEffect, volume: f32) {
        let Ok(audio) = HtmlAudioElement::new_with_src(effect.path()) else {
            log::warn!("Could not create audio element for {:?}", effect);
            return;
        };
        audio.set_volume(volume.clamp(0.0, 1.0) as f64);
        // Autoplay may be refused until the first user gesture
        let _ = audio.play();
    }
}

type WebGame = Game<CanvasSurface>;

/// Build the scene on the page canvas and start the tick timer
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| JsValue::from_str("no canvas"))?
        .dyn_into()?;

    let settings = Settings::load();
    let arena = Arena::new(canvas.width() as f32, canvas.height() as f32);
    let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
    log::info!("Starting {}x{} arena with seed {}", arena.width, arena.height, seed);

    let sim = Simulation::with_default_scene(arena, seed, settings.keys.clone());
    let audio = AudioManager::new(Box::new(HtmlAudioBackend));
    let surface = CanvasSurface::new(&canvas)?;
    let game = Rc::new(RefCell::new(Game::new(sim, surface, audio, &settings)));
    let settings = Rc::new(RefCell::new(settings));

    setup_keyboard(&document, game.clone(), settings.clone())?;
    let interval_ms = settings.borrow().tick_interval_ms().min(i32::MAX as u64) as i32;
    start_timer(&window, game, interval_ms)
}

fn setup_keyboard(
    document: &web_sys::Document,
    game: Rc<RefCell<WebGame>>,
    settings: Rc<RefCell<Settings>>,
) -> Result<(), JsValue> {
    // Key down
    {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            let code = event.code();
            if code == AUTOPILOT_KEY {
                if !event.repeat() {
                    g.toggle_autopilot();
                    let mut s = settings.borrow_mut();
                    s.autopilot = g.autopilot;
                    s.save();
                }
                return;
            }
            if g.sim.input.bindings().fire == code {
                event.prevent_default();
            }
            g.sim.input_mut().handle_key(&KeyEvent { code, pressed: true });
        });
        document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Key up
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            g.sim.input_mut().handle_key(&KeyEvent {
                code: event.code(),
                pressed: false,
            });
        });
        document.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

fn start_timer(window: &web_sys::Window, game: Rc<RefCell<WebGame>>, interval_ms: i32) -> Result<(), JsValue> {
    let handle = Rc::new(Cell::new(None::<i32>));

    let closure = {
        let handle = handle.clone();
        Closure::<dyn FnMut()>::new(move || {
            let outcome = game.borrow_mut().step();
            if outcome == TickOutcome::Halt {
                if let (Some(id), Some(window)) = (handle.take(), web_sys::window()) {
                    window.clear_interval_with_handle(id);
                    log::info!("Tick timer stopped");
                }
            }
        })
    };

    let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        interval_ms,
    )?;
    handle.set(Some(id));
    closure.forget();
    Ok(())
}
