use scroll_core::{FrameHandle, FrameScheduler, ScrollController, ScrollHost};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `FrameScheduler` backed by `requestAnimationFrame`.
///
/// One persistent closure serves every frame; `armed` remembers which request
/// it answers so the engine can tell current frames from cancelled ones.
pub struct RafScheduler {
    window: web::Window,
    callback: FrameCallback,
    armed: Rc<Cell<Option<FrameHandle>>>,
}

impl RafScheduler {
    pub fn new(window: web::Window) -> Self {
        Self {
            window,
            callback: Rc::new(RefCell::new(None)),
            armed: Rc::new(Cell::new(None)),
        }
    }

    pub fn callback_slot(&self) -> FrameCallback {
        self.callback.clone()
    }

    pub fn armed(&self) -> Rc<Cell<Option<FrameHandle>>> {
        self.armed.clone()
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let slot = self.callback.borrow();
        let Some(cb) = slot.as_ref() else {
            log::warn!("[frame] frame requested before the loop was bound");
            return None;
        };
        match self
            .window
            .request_animation_frame(cb.as_ref().unchecked_ref())
        {
            Ok(id) => {
                let handle = FrameHandle(id as u64);
                self.armed.set(Some(handle));
                Some(handle)
            }
            Err(e) => {
                log::error!("requestAnimationFrame error: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        _ = self.window.cancel_animation_frame(handle.0 as i32);
        if self.armed.get() == Some(handle) {
            self.armed.set(None);
        }
    }
}

/// Install the per-frame closure that feeds `controller`.
pub fn bind_loop<H: ScrollHost + 'static>(
    controller: ScrollController<H, RafScheduler>,
    callback: FrameCallback,
    armed: Rc<Cell<Option<FrameHandle>>>,
) {
    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
        if let Some(handle) = armed.take() {
            controller.run_frame(handle, now_ms);
        }
    }) as Box<dyn FnMut(f64)>));
}
