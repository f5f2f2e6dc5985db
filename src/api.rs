use crate::dom::{self, DomHost, ElementRegistry};
use crate::events;
use crate::frame::{self, RafScheduler};
use crate::scan;
use scroll_core::{
    EngineConfig, EventKind, ScrollController, ScrollTarget, SubscriptionId, TargetId,
};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use web_sys as web;

type Controller = ScrollController<DomHost, RafScheduler>;

// Set once the first engine is built; a second one would fight over the page.
static STARTED: AtomicBool = AtomicBool::new(false);

#[inline]
fn js_err(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{e:#}"))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let text = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&text)
}

fn build(config_json: Option<String>) -> anyhow::Result<SmoothScroll> {
    let (window, document) = dom::window_document()?;
    let config = match config_json.as_deref() {
        Some(text) => EngineConfig::from_json(text)?,
        None => EngineConfig::default(),
    };

    let registry = Rc::new(RefCell::new(ElementRegistry::default()));
    let host = DomHost::new(window.clone(), document.clone(), registry.clone());
    let scheduler = RafScheduler::new(window.clone());
    let callback = scheduler.callback_slot();
    let armed = scheduler.armed();
    let controller = ScrollController::new(host, scheduler, &config);
    frame::bind_loop(controller.clone(), callback, armed);

    let bridge_window = window.clone();
    controller.subscribe(move |ev| events::dispatch_dom_event(&bridge_window, ev));

    if STARTED.swap(true, Ordering::SeqCst) {
        log::warn!("[scroll] another SmoothScroll instance already exists on this page");
    }
    log::info!(
        "[scroll] ready preset={} reset={}ms",
        config.default_preset,
        config.reset_duration_ms
    );
    Ok(SmoothScroll {
        window,
        document,
        registry,
        controller,
    })
}

/// Auto-scroll engine bound to the current page.
#[wasm_bindgen]
pub struct SmoothScroll {
    window: web::Window,
    document: web::Document,
    registry: Rc<RefCell<ElementRegistry>>,
    controller: Controller,
}

#[wasm_bindgen]
impl SmoothScroll {
    /// `config` is an optional JSON string, e.g. `{"defaultSpeed":"fast"}`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<SmoothScroll, JsValue> {
        build(config).map_err(js_err)
    }

    /// Start on `target` (an element handle), or on the current target.
    pub fn start(&self, target: Option<u32>) {
        self.controller
            .start(target.map(|id| ScrollTarget::Element(TargetId(id))));
    }

    pub fn pause(&self) {
        self.controller.pause();
    }

    pub fn resume(&self) {
        self.controller.resume();
    }

    pub fn toggle(&self) {
        self.controller.toggle();
    }

    pub fn stop(&self) {
        self.controller.stop();
    }

    pub fn reset(&self) {
        self.controller.reset();
    }

    /// Returns `false` for names other than `slow`, `medium`, `fast`.
    #[wasm_bindgen(js_name = setSpeedPreset)]
    pub fn set_speed_preset(&self, name: &str) -> bool {
        self.controller.set_speed_preset_named(name)
    }

    #[wasm_bindgen(js_name = setSpeedMultiplier)]
    pub fn set_speed_multiplier(&self, multiplier: f64) {
        self.controller.set_speed_multiplier(multiplier);
    }

    /// `null`/`undefined` selects the whole page.
    #[wasm_bindgen(js_name = setTarget)]
    pub fn set_target(&self, target: Option<u32>) {
        self.controller.set_target(target.map(TargetId).into());
    }

    #[wasm_bindgen(js_name = setTargetElement)]
    pub fn set_target_element(&self, element: &web::Element) -> u32 {
        let id = self.registry.borrow_mut().register_one(element);
        self.controller.set_target(ScrollTarget::Element(id));
        id.0
    }

    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.controller.state())
    }

    /// Relay entry point: takes `{"action": ...}` JSON, returns the reply object.
    #[wasm_bindgen(js_name = handleMessage)]
    pub fn handle_message(&self, message: &str) -> Result<JsValue, JsValue> {
        let reply = self
            .controller
            .handle_json(message)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        js_sys::JSON::parse(&reply)
    }

    #[wasm_bindgen(js_name = findScrollableElements)]
    pub fn find_scrollable_elements(&self) -> Result<JsValue, JsValue> {
        let candidates = scan::find_scrollable_elements(
            &self.window,
            &self.document,
            &mut self.registry.borrow_mut(),
        );
        to_js(&candidates)
    }

    #[wasm_bindgen(js_name = isScrollable)]
    pub fn is_scrollable(&self, element: &web::Element) -> bool {
        scan::element_is_scrollable(&self.window, &self.document, element)
    }

    #[wasm_bindgen(js_name = registerElement)]
    pub fn register_element(&self, element: &web::Element) -> u32 {
        self.registry.borrow_mut().register_one(element).0
    }

    /// Subscribe `callback(name, detail)` to one event name, or to every event
    /// with `"*"`. Returns `undefined` for unknown names.
    pub fn on(&self, event: &str, callback: js_sys::Function) -> Option<u32> {
        let listener = move |ev: &scroll_core::EngineEvent| events::call_js_listener(&callback, ev);
        let id = if event == "*" {
            self.controller.subscribe(listener)
        } else {
            let Some(kind) = EventKind::from_name(event) else {
                log::warn!("[events] unknown event name {:?}", event);
                return None;
            };
            self.controller.subscribe_kind(kind, listener)
        };
        u32::try_from(id.0).ok()
    }

    pub fn off(&self, id: u32) -> bool {
        self.controller.unsubscribe(SubscriptionId(u64::from(id)))
    }
}
