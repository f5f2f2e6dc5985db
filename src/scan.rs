use crate::constants::SCAN_SELECTOR;
use crate::dom::{self, ElementRegistry};
use scroll_core::{candidate_label, is_page_scrollable, is_scrollable, Candidate};
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn element_is_scrollable(
    window: &web::Window,
    document: &web::Document,
    element: &web::Element,
) -> bool {
    is_scrollable(&dom::element_info(window, document, element))
}

// `className` is not a string on SVG elements; the attribute always is.
fn label_for(element: &web::Element) -> String {
    let class = element.get_attribute("class").unwrap_or_default();
    candidate_label(&element.tag_name(), &element.id(), &class)
}

/// Page first (when it scrolls), then every scrollable element in document
/// order. Each element found is registered so the picker can hand its handle
/// back to `setTarget`.
pub fn find_scrollable_elements(
    window: &web::Window,
    document: &web::Document,
    registry: &mut ElementRegistry,
) -> Vec<Candidate> {
    let mut out = Vec::new();
    let (document_height, viewport_height) = dom::page_extent(window, document);
    if is_page_scrollable(document_height, viewport_height) {
        out.push(Candidate::page());
    }

    let nodes = match document.query_selector_all(SCAN_SELECTOR) {
        Ok(n) => n,
        Err(e) => {
            log::error!("querySelectorAll error: {:?}", e);
            return out;
        }
    };
    for i in 0..nodes.length() {
        let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        if !element_is_scrollable(window, document, &element) {
            continue;
        }
        let id = registry.register(&element);
        out.push(Candidate::element(id, label_for(&element)));
    }

    let pruned = registry.prune();
    log::info!(
        "[scan] {} candidates, {} handles ({} stale dropped)",
        out.len(),
        registry.len(),
        pruned
    );
    out
}
