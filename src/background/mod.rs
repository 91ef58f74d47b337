//! Decorative page background: a full-viewport canvas of drifting particles
//! behind all content, plus pointer parallax on the `.shape` elements.
//!
//! The canvas is appended to the configured host element and never receives
//! input. The frame loop runs for the lifetime of the document.

pub mod field;
pub mod parallax;

use crate::config::WidgetConfig;
use crate::error::{Result, WidgetError};
use field::ParticleField;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, Window, window};

struct BackgroundState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    field: ParticleField,
}

thread_local! {
    static BACKGROUND_STATE: std::cell::RefCell<Option<BackgroundState>> = const { std::cell::RefCell::new(None) };
}

fn viewport_size(win: &Window) -> (f64, f64) {
    let w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (w, h)
}

/// Whether the particle loop is already running.
pub fn is_running() -> bool {
    BACKGROUND_STATE.with(|b| b.borrow().is_some())
}

/// Start the background. Only the first successful call starts a frame loop
/// and attaches listeners; later calls return immediately.
pub fn start_background(cfg: &WidgetConfig) -> Result<()> {
    if is_running() {
        return Ok(());
    }
    let win = window().ok_or(WidgetError::NoWindow)?;
    let doc = win.document().ok_or(WidgetError::NoDocument)?;
    let host = doc
        .get_element_by_id(&cfg.elements.particles_host)
        .ok_or_else(|| WidgetError::MissingElement(cfg.elements.particles_host.clone()))?;

    // Reuse a canvas left behind by an earlier, failed start.
    let canvas_id = &cfg.elements.particles_canvas;
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(canvas_id) {
        el.dyn_into::<HtmlCanvasElement>()
            .map_err(|_| WidgetError::MissingElement(canvas_id.clone()))?
    } else {
        let c: HtmlCanvasElement = doc
            .create_element("canvas")?
            .dyn_into()
            .map_err(|_| WidgetError::NoContext2d)?;
        c.set_id(canvas_id);
        c.set_attribute(
            "style",
            "position:fixed; top:0; left:0; width:100%; height:100%; z-index:-1; pointer-events:none;",
        )?;
        host.append_child(&c)?;
        c
    };
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(WidgetError::NoContext2d)?
        .dyn_into()
        .map_err(|_| WidgetError::NoContext2d)?;

    let (w, h) = viewport_size(&win);
    resize_canvas(&canvas, w, h);
    let field = ParticleField::initialize(w, h, cfg.particle_count, &mut rand::thread_rng());
    log::debug!("particle field: {} particles over {}x{}", field.len(), w, h);
    BACKGROUND_STATE.with(|b| b.replace(Some(BackgroundState { canvas, ctx, field })));

    // Resize: only the drawing surface follows the window; particles stay put.
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            let Some(win) = window() else { return };
            let (w, h) = viewport_size(&win);
            BACKGROUND_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    resize_canvas(&state.canvas, w, h);
                    state.field.on_resize(w, h);
                }
            });
            log::debug!("background resized to {}x{}", w, h);
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Pointer parallax on decorative shapes
    {
        let selector = cfg.elements.shapes.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            apply_parallax(&selector, evt.client_x() as f64, evt.client_y() as f64);
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    start_frame_loop();
    Ok(())
}

fn resize_canvas(canvas: &HtmlCanvasElement, w: f64, h: f64) {
    canvas.set_width(w as u32);
    canvas.set_height(h as u32);
}

fn apply_parallax(selector: &str, client_x: f64, client_y: f64) {
    let Some(win) = window() else { return };
    let Some(doc) = win.document() else { return };
    let Ok(shapes) = doc.query_selector_all(selector) else { return };
    let (w, h) = viewport_size(&win);
    let (fx, fy) = parallax::pointer_fraction(client_x, client_y, w, h);
    for i in 0..shapes.length() {
        if let Some(shape) = shapes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
            let _ = shape.style().set_property("transform", &parallax::shape_transform(i as usize, fx, fy));
        }
    }
}

type FrameCallback = std::rc::Rc<std::cell::RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop() {
    let f: FrameCallback = std::rc::Rc::new(std::cell::RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        BACKGROUND_STATE.with(|state_cell| {
            if let Some(state) = state_cell.borrow_mut().as_mut() {
                state.field.advance_frame();
                render(state);
            }
        });
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}

fn request_frame(cb: &FrameCallback) {
    let Some(w) = window() else { return };
    if let Some(closure) = cb.borrow().as_ref() {
        let _ = w.request_animation_frame(closure.as_ref().unchecked_ref());
    }
}

fn render(state: &BackgroundState) {
    let ctx = &state.ctx;
    ctx.clear_rect(0.0, 0.0, state.canvas.width() as f64, state.canvas.height() as f64);
    for p in state.field.particles() {
        ctx.set_fill_style_str(&p.css_color());
        ctx.begin_path();
        ctx.arc(p.x, p.y, p.size, 0.0, std::f64::consts::TAU).ok();
        ctx.fill();
    }
}
