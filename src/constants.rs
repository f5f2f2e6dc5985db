// DOM-facing names shared by the content-script front-end.

// Every engine event is re-dispatched on `window` as `smoothscroll:<name>`
pub const EVENT_PREFIX: &str = "smoothscroll:";

// Computed-style property checked by the scrollability predicate
pub const OVERFLOW_Y_PROPERTY: &str = "overflow-y";

// Selector used when scanning the page for scroll candidates
pub const SCAN_SELECTOR: &str = "*";

#[inline]
pub fn dom_event_name(event: &str) -> String {
    format!("{EVENT_PREFIX}{event}")
}
