//! Chat panel glue: binds the input, send button and preset prompt buttons to
//! the [`Dispatcher`], renders message bubbles, toggles the typing indicator
//! and wakes the dispatcher with one-shot `setTimeout` callbacks.

pub mod dispatcher;
pub mod responses;
pub mod schedule;

use crate::config::{ElementIds, WidgetConfig};
use crate::error::{Result, WidgetError};
use dispatcher::{Dispatcher, Message, SubmitOutcome};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlAudioElement, HtmlInputElement, window};

struct ChatState {
    dispatcher: Dispatcher,
    elements: ElementIds,
    /// History entries already turned into DOM bubbles.
    rendered: usize,
}

thread_local! {
    static CHAT_STATE: std::cell::RefCell<Option<ChatState>> = const { std::cell::RefCell::new(None) };
}

fn document() -> Result<Document> {
    window().ok_or(WidgetError::NoWindow)?.document().ok_or(WidgetError::NoDocument)
}

fn element(doc: &Document, id: &str) -> Result<Element> {
    doc.get_element_by_id(id).ok_or_else(|| WidgetError::MissingElement(id.to_string()))
}

fn typed_element<T: JsCast>(doc: &Document, id: &str) -> Result<T> {
    element(doc, id)?.dyn_into::<T>().map_err(|_| WidgetError::MissingElement(id.to_string()))
}

fn now_ms() -> f64 {
    window().and_then(|w| w.performance()).map(|p| p.now()).unwrap_or(0.0)
}

/// Whether the chat panel is already bound to the page.
pub fn is_running() -> bool {
    CHAT_STATE.with(|c| c.borrow().is_some())
}

/// Bind the chat panel. A second call while already bound is a no-op so
/// listeners and the greeting are never duplicated.
pub fn start_chat(cfg: &WidgetConfig) -> Result<()> {
    if is_running() {
        return Ok(());
    }
    let doc = document()?;
    let ids = cfg.elements.clone();

    // Fail early if the page is missing any required hook.
    let input: HtmlInputElement = typed_element(&doc, &ids.input)?;
    let send_btn = element(&doc, &ids.send_button)?;
    element(&doc, &ids.messages)?;
    element(&doc, &ids.typing_indicator)?;

    let mut dispatcher = Dispatcher::from_config(cfg);
    let welcome_due = dispatcher.start(now_ms());
    CHAT_STATE.with(|c| c.replace(Some(ChatState { dispatcher, elements: ids.clone(), rendered: 0 })));

    // Enter key in the input
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            if evt.key() == "Enter" {
                send_current_input();
            }
        }) as Box<dyn FnMut(_)>);
        input.add_event_listener_with_callback("keypress", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Send button
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            send_current_input();
        }) as Box<dyn FnMut(_)>);
        send_btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Preset prompts: copy the button's data-prompt into the input, then send.
    let quick = doc.query_selector_all(&ids.quick_buttons)?;
    for i in 0..quick.length() {
        let Some(btn) = quick.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else { continue };
        let prompt = btn.get_attribute("data-prompt").unwrap_or_default();
        let input = input.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            input.set_value(&prompt);
            send_current_input();
        }) as Box<dyn FnMut(_)>);
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    if let Some(due) = welcome_due {
        wake_at(due);
    }
    Ok(())
}

/// Read the input box and hand it to the dispatcher. Blank input and input
/// while a reply is pending are dropped without any feedback.
fn send_current_input() {
    let res = CHAT_STATE.with(|cell| -> Result<()> {
        let mut borrow = cell.borrow_mut();
        let Some(state) = borrow.as_mut() else { return Ok(()) };
        let doc = document()?;
        let input: HtmlInputElement = typed_element(&doc, &state.elements.input)?;

        let outcome = state.dispatcher.submit(&input.value(), now_ms(), &mut rand::thread_rng());
        let SubmitOutcome::Accepted { reply_due_ms } = outcome else { return Ok(()) };

        render_new_messages(&doc, state)?;
        input.set_value("");
        play_sound(&doc, &state.elements.sound);
        set_typing_indicator(&doc, &state.elements, true)?;
        wake_at(reply_due_ms);
        Ok(())
    });
    if let Err(e) = res {
        log::error!("send failed: {}", e);
    }
}

/// Schedule a one-shot callback that delivers whatever is due at `due_ms`.
fn wake_at(due_ms: f64) {
    let Some(win) = window() else { return };
    let delay = (due_ms - now_ms()).max(0.0).ceil() as i32;
    let cb = Closure::once_into_js(move || {
        // Timers may fire a hair early relative to performance.now().
        pump(now_ms().max(due_ms));
    });
    if let Err(e) = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref::<js_sys::Function>(), delay) {
        log::error!("setTimeout failed: {:?}", e);
    }
}

fn pump(now: f64) {
    let res = CHAT_STATE.with(|cell| -> Result<()> {
        let mut borrow = cell.borrow_mut();
        let Some(state) = borrow.as_mut() else { return Ok(()) };
        if state.dispatcher.poll(now) == 0 {
            return Ok(());
        }
        let doc = document()?;
        render_new_messages(&doc, state)?;
        set_typing_indicator(&doc, &state.elements, state.dispatcher.is_typing())?;
        Ok(())
    });
    if let Err(e) = res {
        log::error!("message delivery failed: {}", e);
    }
}

fn render_new_messages(doc: &Document, state: &mut ChatState) -> Result<()> {
    let container = element(doc, &state.elements.messages)?;
    for msg in &state.dispatcher.history()[state.rendered..] {
        let bubble = message_bubble(doc, msg)?;
        container.append_child(&bubble)?;
        state.rendered += 1;
        container.set_scroll_top(container.scroll_height());
    }
    Ok(())
}

fn message_bubble(doc: &Document, msg: &Message) -> Result<Element> {
    let div = doc.create_element("div")?;
    div.set_class_name(&format!("message {}-message", msg.sender.css_class()));
    div.set_text_content(Some(&msg.text));
    Ok(div)
}

fn set_typing_indicator(doc: &Document, ids: &ElementIds, active: bool) -> Result<()> {
    let el = element(doc, &ids.typing_indicator)?;
    let classes = el.class_list();
    if active {
        classes.add_1(&ids.typing_active_class)?;
    } else {
        classes.remove_1(&ids.typing_active_class)?;
    }
    Ok(())
}

/// Best-effort notification sound. A missing element, a failed call or a
/// rejected play promise (autoplay policy) are all ignored.
fn play_sound(doc: &Document, id: &str) {
    let Some(audio) = doc.get_element_by_id(id).and_then(|el| el.dyn_into::<HtmlAudioElement>().ok()) else {
        return;
    };
    audio.set_current_time(0.0);
    if let Ok(promise) = audio.play() {
        let swallow = Closure::wrap(Box::new(|_err: JsValue| {}) as Box<dyn FnMut(JsValue)>);
        let _ = promise.catch(&swallow);
        swallow.forget();
    }
}
