//! Browser side of the arcade: finds the modal and canvas, drives the
//! `requestAnimationFrame` loop, and owns the listeners of the active session.
//!
//! All state lives in one thread-local [`Runtime`]. Every exported entry point
//! borrows it for the duration of a single call; nothing here blocks.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, EventTarget, HtmlCanvasElement, HtmlElement,
    KeyboardEvent, MouseEvent, window,
};

use crate::config::HostConfig;
use crate::error::ArcadeError;
use crate::games::{SessionDescriptor, SessionKind};
use crate::host::{FrameOutcome, GameHost};
use crate::input::{Binding, InputEvent, Target};

thread_local! {
    static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime::new());
    // Created once and reused by every session; it only reads RUNTIME.
    static FRAME_CALLBACK: Closure<dyn FnMut(f64)> =
        Closure::wrap(Box::new(on_animation_frame) as Box<dyn FnMut(f64)>);
}

fn with_runtime<R>(f: impl FnOnce(&mut Runtime) -> R) -> R {
    RUNTIME.with(|rt| f(&mut rt.borrow_mut()))
}

pub fn open_game(kind: &str) {
    if let Err(err) = with_runtime(|rt| rt.open(kind)) {
        log::error!("open_game({kind}): {err}");
    }
}

pub fn close_game() {
    with_runtime(Runtime::close);
}

pub fn report_score(value: i32) {
    with_runtime(|rt| {
        rt.host.report_score(value);
        rt.push_score();
    });
}

pub fn acknowledge_notice() {
    with_runtime(Runtime::acknowledge);
}

pub fn current_score() -> i32 {
    with_runtime(|rt| rt.host.score())
}

pub fn is_running() -> bool {
    with_runtime(|rt| rt.host.is_running())
}

pub fn active_game() -> Option<String> {
    with_runtime(|rt| rt.host.descriptor().map(|d| d.kind.as_str().to_string()))
}

#[cfg(feature = "serde_json")]
pub fn set_config(config: HostConfig) {
    with_runtime(|rt| rt.config = config);
}

// --- Runtime ------------------------------------------------------------------

struct Runtime {
    config: HostConfig,
    host: GameHost,
    surfaces: Option<Surfaces>,
    listeners: Option<ListenerSet>,
    frame_id: Option<i32>,
}

impl Runtime {
    fn new() -> Self {
        Self {
            config: HostConfig::default(),
            host: GameHost::new(entropy_seed()),
            surfaces: None,
            listeners: None,
            frame_id: None,
        }
    }

    fn open(&mut self, kind: &str) -> Result<(), ArcadeError> {
        let kind: SessionKind = kind.parse()?;
        let surfaces = Surfaces::locate(&self.config)?;

        self.teardown();
        let descriptor = self.host.open(kind);
        let registered = surfaces
            .show(&descriptor)
            .and_then(|()| ListenerSet::register(kind.bindings(), &surfaces));
        let listeners = match registered {
            Ok(set) => set,
            Err(err) => {
                self.abandon(&surfaces);
                return Err(err);
            }
        };
        self.listeners = Some(listeners);
        self.surfaces = Some(surfaces);
        self.push_score();
        self.schedule_frame();
        Ok(())
    }

    /// Undo a half-finished `open`: the modal may already be showing.
    fn abandon(&mut self, surfaces: &Surfaces) {
        surfaces.hide();
        self.host.close();
    }

    fn close(&mut self) {
        match self.surfaces.as_ref() {
            Some(s) => s.hide(),
            // nothing open; still hide the modal if the page shows it
            None => {
                if let Some(modal) = document().and_then(|d| find::<HtmlElement>(&d, &self.config.modal_id)) {
                    modal.style().set_property("display", "none").ok();
                }
            }
        }
        self.teardown();
    }

    /// Cancel the frame, drop listeners and surfaces, close the host session.
    fn teardown(&mut self) {
        if let (Some(id), Some(win)) = (self.frame_id.take(), window()) {
            win.cancel_animation_frame(id).ok();
        }
        if let Some(mut listeners) = self.listeners.take() {
            listeners.dispose();
        }
        self.surfaces = None;
        self.host.close();
    }

    fn acknowledge(&mut self) {
        if let Some(s) = self.surfaces.as_ref() {
            s.hide_notice();
        }
        if self.host.acknowledge_notice() {
            self.schedule_frame();
        }
    }

    fn schedule_frame(&mut self) {
        if let (Some(id), Some(win)) = (self.frame_id.take(), window()) {
            win.cancel_animation_frame(id).ok();
        }
        self.frame_id = request_frame();
    }

    /// One animation frame. Returns whether the loop should continue.
    fn frame(&mut self, now: f64) -> bool {
        self.frame_id = None;
        let Some(surfaces) = self.surfaces.as_mut() else {
            return false;
        };
        let outcome = self.host.tick(now, &mut surfaces.ctx);
        if let FrameOutcome::Notice(notice) = &outcome {
            surfaces.show_notice(&notice.message);
        }
        self.push_score();
        matches!(outcome, FrameOutcome::Advanced | FrameOutcome::Skipped)
    }

    fn push_score(&mut self) {
        let Some(value) = self.host.take_score_update() else {
            return;
        };
        let text = format!("Score: {value}");
        match self.surfaces.as_ref() {
            Some(s) => s.score.set_text_content(Some(&text)),
            None => {
                if let Some(el) = document().and_then(|d| d.get_element_by_id(&self.config.score_id)) {
                    el.set_text_content(Some(&text));
                }
            }
        }
    }
}

fn on_animation_frame(now: f64) {
    with_runtime(|rt| {
        if rt.frame(now) && rt.host.is_running() {
            rt.frame_id = request_frame();
        }
    });
}

fn request_frame() -> Option<i32> {
    let win = window()?;
    FRAME_CALLBACK.with(|cb| win.request_animation_frame(cb.as_ref().unchecked_ref()).ok())
}

// --- DOM surfaces -----------------------------------------------------------

struct Surfaces {
    modal: HtmlElement,
    title: Element,
    instructions: Element,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    score: Element,
    notice: HtmlElement,
}

impl Surfaces {
    fn locate(config: &HostConfig) -> Result<Self, ArcadeError> {
        let doc = document().ok_or(ArcadeError::NoDocument)?;
        let require = |role: &'static str, id: &str| {
            doc.get_element_by_id(id)
                .ok_or_else(|| ArcadeError::MissingElement { role, id: id.to_string() })
        };

        let modal: HtmlElement = require("modal", &config.modal_id)?
            .dyn_into()
            .map_err(|_| ArcadeError::MissingElement { role: "modal", id: config.modal_id.clone() })?;
        let title = require("title", &config.title_id)?;
        let instructions = require("instructions", &config.instructions_id)?;
        let canvas: HtmlCanvasElement = require("canvas", &config.canvas_id)?
            .dyn_into()
            .map_err(|_| ArcadeError::MissingElement { role: "canvas", id: config.canvas_id.clone() })?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(ArcadeError::NoContext)?
            .dyn_into()
            .map_err(|_| ArcadeError::NoContext)?;
        let score = require("score", &config.score_id)?;
        let notice = match find::<HtmlElement>(&doc, &config.notice_id) {
            Some(el) => el,
            None => create_notice(&doc, &modal, &config.notice_id)?,
        };

        Ok(Self { modal, title, instructions, canvas, ctx, score, notice })
    }

    fn show(&self, descriptor: &SessionDescriptor) -> Result<(), ArcadeError> {
        self.modal.style().set_property("display", "block")?;
        self.title.set_text_content(Some(descriptor.title));
        self.instructions.set_text_content(Some(descriptor.instructions));
        self.hide_notice();
        Ok(())
    }

    fn hide(&self) {
        self.modal.style().set_property("display", "none").ok();
        self.hide_notice();
    }

    fn show_notice(&self, message: &str) {
        self.notice.set_text_content(Some(&format!("{message} (click to continue)")));
        self.notice.style().set_property("display", "block").ok();
    }

    fn hide_notice(&self) {
        self.notice.style().set_property("display", "none").ok();
    }

    fn target(&self, target: Target) -> Option<EventTarget> {
        match target {
            Target::Document => document().map(Into::into),
            Target::Canvas => Some(self.canvas.clone().into()),
        }
    }
}

fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

fn find<T: JsCast>(doc: &Document, id: &str) -> Option<T> {
    doc.get_element_by_id(id).and_then(|el| el.dyn_into().ok())
}

fn create_notice(doc: &Document, modal: &HtmlElement, id: &str) -> Result<HtmlElement, ArcadeError> {
    let div: HtmlElement = doc.create_element("div")?.dyn_into().map_err(|_| {
        ArcadeError::Js("created element is not an HtmlElement".into())
    })?;
    div.set_id(id);
    div.set_attribute("style", "display:none; position:absolute; left:50%; top:40%; transform:translate(-50%,-50%); font-family:'Fira Code', monospace; font-size:18px; padding:10px 16px; background:rgba(0,0,0,0.75); border:1px solid #333; border-radius:8px; color:#FFD24D; cursor:pointer; z-index:50;")?;
    modal.append_child(&div)?;
    Ok(div)
}

// --- Listeners --------------------------------------------------------------

type Handler = Closure<dyn FnMut(web_sys::Event)>;

/// Listeners registered for one session. Disposing removes them from the DOM;
/// it runs at most once whether called explicitly or on drop.
struct ListenerSet {
    entries: Vec<(EventTarget, &'static str, Handler)>,
}

impl ListenerSet {
    fn register(bindings: &'static [Binding], surfaces: &Surfaces) -> Result<Self, ArcadeError> {
        let mut set = ListenerSet { entries: Vec::with_capacity(bindings.len() + 1) };
        for &binding in bindings {
            let target = surfaces.target(binding.target).ok_or(ArcadeError::NoDocument)?;
            let handler = Closure::wrap(Box::new(move |evt: web_sys::Event| {
                if let Some(input) = translate(binding, &evt) {
                    with_runtime(|rt| rt.host.handle_input(input));
                }
            }) as Box<dyn FnMut(_)>);
            set.add(target, binding.event.dom_name(), handler)?;
        }

        let ack = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            acknowledge_notice();
        }) as Box<dyn FnMut(_)>);
        set.add(surfaces.notice.clone().into(), "click", ack)?;
        Ok(set)
    }

    fn add(&mut self, target: EventTarget, name: &'static str, handler: Handler) -> Result<(), ArcadeError> {
        target.add_event_listener_with_callback(name, handler.as_ref().unchecked_ref())?;
        self.entries.push((target, name, handler));
        Ok(())
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn dispose(&mut self) {
        for (target, name, handler) in self.entries.drain(..) {
            target
                .remove_event_listener_with_callback(name, handler.as_ref().unchecked_ref())
                .ok();
        }
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn translate(binding: Binding, evt: &web_sys::Event) -> Option<InputEvent> {
    if binding.event.is_keyboard() {
        let key = evt.dyn_ref::<KeyboardEvent>()?.key();
        binding.key_event(&key)
    } else {
        // offset coordinates are relative to the canvas, which is the target
        let mouse = evt.dyn_ref::<MouseEvent>()?;
        binding.pointer_event(mouse.offset_x() as f64, mouse.offset_y() as f64)
    }
}

// --- Randomness -------------------------------------------------------------

fn entropy_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(err) => {
            log::warn!("getrandom unavailable ({err}); seeding from the clock");
            crate::performance_now().to_bits()
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::KeyboardEventInit;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount() {
        let Some(doc) = document() else { return };
        let config = HostConfig::default();
        for (tag, id) in [
            ("div", &config.modal_id),
            ("h2", &config.title_id),
            ("p", &config.instructions_id),
            ("canvas", &config.canvas_id),
            ("div", &config.score_id),
        ] {
            if doc.get_element_by_id(id).is_none() {
                let el = doc.create_element(tag).unwrap();
                el.set_id(id);
                doc.body().unwrap().append_child(&el).unwrap();
            }
        }
    }

    fn listener_count() -> usize {
        with_runtime(|rt| rt.listeners.as_ref().map_or(0, ListenerSet::len))
    }

    fn press(key: &str) {
        let init = KeyboardEventInit::new();
        init.set_key(key);
        let evt = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
        document().unwrap().dispatch_event(&evt).unwrap();
    }

    #[wasm_bindgen_test]
    fn listeners_follow_the_active_session() {
        mount();
        // one per binding plus the notice click
        open_game("snake");
        assert_eq!(listener_count(), SessionKind::Snake.bindings().len() + 1);

        open_game("doodler");
        assert_eq!(listener_count(), SessionKind::Doodler.bindings().len() + 1);

        close_game();
        assert_eq!(listener_count(), 0);
        press("ArrowUp");
        assert!(!is_running());
        assert_eq!(active_game(), None);

        open_game("snake");
        press("ArrowUp");
        assert_eq!(listener_count(), 2);
        assert_eq!(active_game().as_deref(), Some("snake"));
        close_game();
        assert_eq!(listener_count(), 0);
    }

    #[wasm_bindgen_test]
    fn dispose_runs_once() {
        mount();
        let surfaces = Surfaces::locate(&HostConfig::default()).unwrap();
        let mut set = ListenerSet::register(SessionKind::Golf.bindings(), &surfaces).unwrap();
        assert_eq!(set.len(), 4);
        set.dispose();
        set.dispose();
        assert_eq!(set.len(), 0);
    }

    #[wasm_bindgen_test]
    fn abandoned_open_hides_the_modal() {
        mount();
        with_runtime(|rt| {
            let surfaces = Surfaces::locate(&rt.config).unwrap();
            let descriptor = rt.host.open(SessionKind::Cricket);
            surfaces.show(&descriptor).unwrap();
            assert_eq!(surfaces.modal.style().get_property_value("display").unwrap(), "block");

            rt.abandon(&surfaces);
            assert_eq!(surfaces.modal.style().get_property_value("display").unwrap(), "none");
            assert!(!rt.host.is_running());
        });
    }
}
