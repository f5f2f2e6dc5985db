use crate::constants::OVERFLOW_Y_PROPERTY;
use scroll_core::{
    ElementInfo, HandleRegistry, OverflowY, Position, ScrollHost, ScrollTarget, TargetId,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys as web;

#[inline]
pub fn window_document() -> anyhow::Result<(web::Window, web::Document)> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    Ok((window, document))
}

/// Maps opaque handles to DOM elements. A `WeakMap` keyed by element gives
/// the reverse lookup without keeping removed nodes alive on the JS side;
/// handles of removed elements read as detached until pruned.
pub struct ElementRegistry {
    handles: HandleRegistry<web::Element>,
    ids: js_sys::WeakMap,
}

impl Default for ElementRegistry {
    fn default() -> Self {
        Self {
            handles: HandleRegistry::new(),
            ids: js_sys::WeakMap::new(),
        }
    }
}

impl ElementRegistry {
    /// Handle for `element`, reusing the existing one if already registered.
    pub fn register(&mut self, element: &web::Element) -> TargetId {
        let key: &js_sys::Object = element.as_ref();
        let known = self.ids.get(key).as_f64().map(|v| TargetId(v as u32));
        let id = self.handles.register(known, element.clone());
        if known != Some(id) {
            self.ids.set(key, &JsValue::from(id.0));
        }
        id
    }

    /// Single registration from page script: drops detached entries first so
    /// they do not pile up between scans.
    pub fn register_one(&mut self, element: &web::Element) -> TargetId {
        self.prune();
        self.register(element)
    }

    /// The element behind `id`, only while it is still in the document.
    pub fn live(&self, id: TargetId) -> Option<&web::Element> {
        self.handles.get(id).filter(|el| el.is_connected())
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Forget elements that have left the document.
    pub fn prune(&mut self) -> usize {
        self.handles.retain(|el| el.is_connected())
    }
}

#[inline]
fn inner_height(window: &web::Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

#[inline]
fn scroll_options(top: f64) -> web::ScrollToOptions {
    let opts = web::ScrollToOptions::new();
    opts.set_top(top);
    opts.set_behavior(web::ScrollBehavior::Instant);
    opts
}

pub fn is_root_element(document: &web::Document, element: &web::Element) -> bool {
    let is_html = document
        .document_element()
        .map(|root| element.is_same_node(Some(&root)))
        .unwrap_or(false);
    let is_body = document
        .body()
        .map(|body| element.is_same_node(Some(&body)))
        .unwrap_or(false);
    is_html || is_body
}

pub fn element_info(
    window: &web::Window,
    document: &web::Document,
    element: &web::Element,
) -> ElementInfo {
    let overflow_y = match window.get_computed_style(element) {
        Ok(Some(style)) => style
            .get_property_value(OVERFLOW_Y_PROPERTY)
            .map(|v| OverflowY::parse(&v))
            .unwrap_or_default(),
        Ok(None) => OverflowY::default(),
        Err(e) => {
            log::error!("getComputedStyle error: {:?}", e);
            OverflowY::default()
        }
    };
    ElementInfo {
        is_root: is_root_element(document, element),
        scroll_height: f64::from(element.scroll_height()),
        client_height: f64::from(element.client_height()),
        overflow_y,
    }
}

/// Document-level scroll metrics: total height and viewport height.
pub fn page_extent(window: &web::Window, document: &web::Document) -> (f64, f64) {
    let document_height = document
        .document_element()
        .map(|root| f64::from(root.scroll_height()))
        .unwrap_or(0.0);
    (document_height, inner_height(window))
}

/// `ScrollHost` over the real page.
pub struct DomHost {
    window: web::Window,
    document: web::Document,
    registry: Rc<RefCell<ElementRegistry>>,
}

impl DomHost {
    pub fn new(
        window: web::Window,
        document: web::Document,
        registry: Rc<RefCell<ElementRegistry>>,
    ) -> Self {
        Self {
            window,
            document,
            registry,
        }
    }

    fn live(&self, id: TargetId) -> Option<web::Element> {
        self.registry.borrow().live(id).cloned()
    }
}

impl ScrollHost for DomHost {
    fn page_position(&self) -> Position {
        let top = match self.window.scroll_y() {
            Ok(y) => y,
            Err(_) => self
                .document
                .document_element()
                .map(|root| f64::from(root.scroll_top()))
                .unwrap_or(0.0),
        };
        let (document_height, viewport_height) = page_extent(&self.window, &self.document);
        Position::from_box(top, document_height, viewport_height)
    }

    fn element_position(&self, id: TargetId) -> Option<Position> {
        let el = self.live(id)?;
        Some(Position::from_box(
            f64::from(el.scroll_top()),
            f64::from(el.scroll_height()),
            f64::from(el.client_height()),
        ))
    }

    fn element_info(&self, id: TargetId) -> Option<ElementInfo> {
        let el = self.live(id)?;
        Some(element_info(&self.window, &self.document, &el))
    }

    fn scroll_by(&mut self, target: ScrollTarget, delta: f64) {
        let opts = scroll_options(delta);
        match target {
            ScrollTarget::Page => self.window.scroll_by_with_scroll_to_options(&opts),
            ScrollTarget::Element(id) => {
                if let Some(el) = self.live(id) {
                    el.scroll_by_with_scroll_to_options(&opts);
                }
            }
        }
    }

    fn scroll_to(&mut self, target: ScrollTarget, top: f64) {
        let opts = scroll_options(top);
        match target {
            ScrollTarget::Page => self.window.scroll_to_with_scroll_to_options(&opts),
            ScrollTarget::Element(id) => {
                if let Some(el) = self.live(id) {
                    el.scroll_to_with_scroll_to_options(&opts);
                }
            }
        }
    }
}
