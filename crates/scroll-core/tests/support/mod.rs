// In-memory page and frame loop used to drive the engine without a browser.

#![allow(dead_code)]

use scroll_core::*;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

pub const FRAME_MS: f64 = 16.0;

#[derive(Clone, Debug)]
pub struct FakeElement {
    pub top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
    pub overflow_y: OverflowY,
    pub attached: bool,
    pub is_root: bool,
}

impl FakeElement {
    pub fn scrollable(scroll_height: f64, client_height: f64) -> Self {
        Self {
            top: 0.0,
            scroll_height,
            client_height,
            overflow_y: OverflowY::Auto,
            attached: true,
            is_root: false,
        }
    }

    fn position(&self) -> Position {
        Position::from_box(self.top, self.scroll_height, self.client_height)
    }
}

#[derive(Debug, Default)]
pub struct FakePage {
    pub top: f64,
    pub document_height: f64,
    pub viewport_height: f64,
    pub elements: BTreeMap<TargetId, FakeElement>,
    /// Every position read, tagged with what was read.
    pub reads: Vec<ScrollTarget>,
    pub scrolls: Vec<(ScrollTarget, f64)>,
}

impl FakePage {
    pub fn page_position(&self) -> Position {
        Position::from_box(self.top, self.document_height, self.viewport_height)
    }
}

pub struct FakeHost(pub Rc<RefCell<FakePage>>);

impl ScrollHost for FakeHost {
    fn page_position(&self) -> Position {
        let mut page = self.0.borrow_mut();
        page.reads.push(ScrollTarget::Page);
        page.page_position()
    }

    fn element_position(&self, id: TargetId) -> Option<Position> {
        let mut page = self.0.borrow_mut();
        page.reads.push(ScrollTarget::Element(id));
        page.elements
            .get(&id)
            .filter(|el| el.attached)
            .map(FakeElement::position)
    }

    fn element_info(&self, id: TargetId) -> Option<ElementInfo> {
        let page = self.0.borrow();
        page.elements.get(&id).filter(|el| el.attached).map(|el| ElementInfo {
            is_root: el.is_root,
            scroll_height: el.scroll_height,
            client_height: el.client_height,
            overflow_y: el.overflow_y,
        })
    }

    fn scroll_by(&mut self, target: ScrollTarget, delta: f64) {
        let mut page = self.0.borrow_mut();
        page.scrolls.push((target, delta));
        match target {
            ScrollTarget::Page => {
                let max = page.page_position().max.max(0.0);
                page.top = (page.top + delta).clamp(0.0, max);
            }
            ScrollTarget::Element(id) => {
                if let Some(el) = page.elements.get_mut(&id).filter(|el| el.attached) {
                    let max = el.position().max.max(0.0);
                    el.top = (el.top + delta).clamp(0.0, max);
                }
            }
        }
    }

    fn scroll_to(&mut self, target: ScrollTarget, top: f64) {
        let mut page = self.0.borrow_mut();
        match target {
            ScrollTarget::Page => page.top = top.max(0.0),
            ScrollTarget::Element(id) => {
                if let Some(el) = page.elements.get_mut(&id).filter(|el| el.attached) {
                    el.top = top.max(0.0);
                }
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct FrameLog {
    next: u64,
    pub pending: Vec<FrameHandle>,
    pub requested: usize,
    pub cancelled: Vec<FrameHandle>,
    pub refuse: bool,
    /// Largest number of simultaneously pending frames ever observed.
    pub max_pending: usize,
}

pub struct FakeScheduler(pub Rc<RefCell<FrameLog>>);

impl FrameScheduler for FakeScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let mut log = self.0.borrow_mut();
        if log.refuse {
            return None;
        }
        log.next += 1;
        log.requested += 1;
        let handle = FrameHandle(log.next);
        log.pending.push(handle);
        log.max_pending = log.max_pending.max(log.pending.len());
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let mut log = self.0.borrow_mut();
        log.pending.retain(|h| *h != handle);
        log.cancelled.push(handle);
    }
}

pub type TestController = ScrollController<FakeHost, FakeScheduler>;

pub struct Harness {
    pub ctl: TestController,
    pub page: Rc<RefCell<FakePage>>,
    pub frames: Rc<RefCell<FrameLog>>,
    pub events: Rc<RefCell<Vec<EngineEvent>>>,
    pub now: Cell<f64>,
}

impl Harness {
    /// A page `document_height` tall seen through a `viewport_height` window.
    pub fn page(document_height: f64, viewport_height: f64) -> Self {
        Self::with_config(document_height, viewport_height, &EngineConfig::default())
    }

    pub fn with_config(document_height: f64, viewport_height: f64, config: &EngineConfig) -> Self {
        let page = Rc::new(RefCell::new(FakePage {
            document_height,
            viewport_height,
            ..FakePage::default()
        }));
        let frames = Rc::new(RefCell::new(FrameLog::default()));
        let ctl = ScrollController::new(
            FakeHost(page.clone()),
            FakeScheduler(frames.clone()),
            config,
        );
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        ctl.subscribe(move |ev| sink.borrow_mut().push(ev.clone()));
        Self {
            ctl,
            page,
            frames,
            events,
            now: Cell::new(0.0),
        }
    }

    pub fn add_element(&self, id: u32, element: FakeElement) -> TargetId {
        let id = TargetId(id);
        self.page.borrow_mut().elements.insert(id, element);
        id
    }

    /// Fire the oldest pending frame. Returns false when nothing is pending.
    pub fn frame(&self) -> bool {
        let next = {
            let mut log = self.frames.borrow_mut();
            if log.pending.is_empty() {
                None
            } else {
                Some(log.pending.remove(0))
            }
        };
        match next {
            Some(handle) => {
                self.now.set(self.now.get() + FRAME_MS);
                self.ctl.run_frame(handle, self.now.get());
                true
            }
            None => false,
        }
    }

    /// Fire up to `n` frames, returning how many actually ran.
    pub fn frames(&self, n: usize) -> usize {
        (0..n).take_while(|_| self.frame()).count()
    }

    pub fn run_until_idle(&self, limit: usize) -> usize {
        self.frames(limit)
    }

    pub fn pending(&self) -> usize {
        self.frames.borrow().pending.len()
    }

    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.borrow().iter().map(EngineEvent::kind).collect()
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.events.borrow().iter().filter(|e| e.kind() == kind).count()
    }

    pub fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn page_top(&self) -> f64 {
        self.page.borrow().top
    }

    pub fn element_top(&self, id: TargetId) -> f64 {
        self.page.borrow().elements[&id].top
    }
}
