use crate::constants::dom_event_name;
use scroll_core::EngineEvent;
use wasm_bindgen::JsValue;
use web_sys as web;

/// Event detail as a JS value; `null` when the event has no payload.
pub fn detail_value(event: &EngineEvent) -> JsValue {
    let detail = event.detail();
    if detail.is_null() {
        return JsValue::NULL;
    }
    match js_sys::JSON::parse(&detail.to_string()) {
        Ok(v) => v,
        Err(e) => {
            log::error!("detail parse error: {:?}", e);
            JsValue::NULL
        }
    }
}

/// Re-dispatch an engine event on `window` as `smoothscroll:<name>`.
pub fn dispatch_dom_event(window: &web::Window, event: &EngineEvent) {
    let init = web::CustomEventInit::new();
    init.set_detail(&detail_value(event));
    let name = dom_event_name(event.kind().name());
    match web::CustomEvent::new_with_event_init_dict(&name, &init) {
        Ok(ev) => {
            _ = window.dispatch_event(&ev);
        }
        Err(e) => log::error!("CustomEvent {} error: {:?}", name, e),
    }
}

/// Call a page-supplied listener with `(name, detail)`.
pub fn call_js_listener(callback: &js_sys::Function, event: &EngineEvent) {
    let name = JsValue::from_str(event.kind().name());
    if let Err(e) = callback.call2(&JsValue::NULL, &name, &detail_value(event)) {
        log::warn!("[events] listener for {} threw: {:?}", event.kind(), e);
    }
}
