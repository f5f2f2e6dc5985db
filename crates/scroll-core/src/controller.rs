//! Shared handle to one engine and its observers.
//!
//! Commands borrow the engine only for the state change itself. Queued events
//! are delivered afterwards with no engine borrow held, so a listener may
//! call straight back into the controller (for example `reset` on `ended`).
//! Events caused by such nested calls are delivered by the outer dispatch
//! loop once the current listener returns, keeping delivery in order.

use crate::config::EngineConfig;
use crate::engine::{Phase, ScrollEngine, StateSnapshot};
use crate::events::{EngineEvent, EventBus, EventKind, SubscriptionId, WidgetSignal};
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::speed::SpeedPreset;
use crate::target::{ScrollHost, ScrollTarget};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub struct ScrollController<H, S> {
    engine: Rc<RefCell<ScrollEngine<H, S>>>,
    bus: Rc<RefCell<EventBus>>,
    dispatching: Rc<Cell<bool>>,
}

impl<H, S> Clone for ScrollController<H, S> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            bus: self.bus.clone(),
            dispatching: self.dispatching.clone(),
        }
    }
}

impl<H: ScrollHost, S: FrameScheduler> ScrollController<H, S> {
    pub fn new(host: H, scheduler: S, config: &EngineConfig) -> Self {
        Self::from_engine(ScrollEngine::new(host, scheduler, config))
    }

    pub fn from_engine(engine: ScrollEngine<H, S>) -> Self {
        Self {
            engine: Rc::new(RefCell::new(engine)),
            bus: Rc::new(RefCell::new(EventBus::new())),
            dispatching: Rc::new(Cell::new(false)),
        }
    }

    // ---------------- Observers ----------------

    pub fn subscribe(&self, listener: impl FnMut(&EngineEvent) + 'static) -> SubscriptionId {
        self.bus.borrow_mut().subscribe(listener)
    }

    pub fn subscribe_kind(
        &self,
        kind: EventKind,
        listener: impl FnMut(&EngineEvent) + 'static,
    ) -> SubscriptionId {
        self.bus.borrow_mut().subscribe_kind(kind, listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.bus.borrow_mut().unsubscribe(id)
    }

    // ---------------- Queries ----------------

    pub fn state(&self) -> StateSnapshot {
        self.engine.borrow().snapshot()
    }

    pub fn phase(&self) -> Phase {
        self.engine.borrow().phase()
    }

    /// Read-only access to the engine, e.g. for the host or pending frame.
    pub fn inspect<R>(&self, f: impl FnOnce(&ScrollEngine<H, S>) -> R) -> R {
        f(&self.engine.borrow())
    }

    // ---------------- Commands ----------------

    pub fn start(&self, target: Option<ScrollTarget>) {
        self.command(|e| e.start(target));
    }

    pub fn pause(&self) {
        self.command(|e| e.pause());
    }

    pub fn resume(&self) {
        self.command(|e| e.resume());
    }

    pub fn toggle(&self) {
        self.command(|e| e.toggle());
    }

    pub fn stop(&self) {
        self.command(|e| e.stop());
    }

    pub fn reset(&self) {
        self.command(|e| e.reset());
    }

    pub fn set_speed_preset(&self, preset: SpeedPreset) {
        self.command(|e| e.set_speed_preset(preset));
    }

    pub fn set_speed_preset_named(&self, name: &str) -> bool {
        self.command(|e| e.set_speed_preset_named(name))
    }

    pub fn set_speed_multiplier(&self, multiplier: f64) {
        self.command(|e| e.set_speed_multiplier(multiplier));
    }

    pub fn set_target(&self, target: ScrollTarget) {
        self.command(|e| e.set_target(target));
    }

    pub fn relay(&self, signal: WidgetSignal) {
        self.command(|e| e.relay(signal));
    }

    /// Called by the frame scheduler's callback.
    pub fn run_frame(&self, handle: FrameHandle, now_ms: f64) {
        self.command(|e| e.run_frame(handle, now_ms));
    }

    /// Apply `f` to the engine, then deliver whatever it queued.
    pub fn command<R>(&self, f: impl FnOnce(&mut ScrollEngine<H, S>) -> R) -> R {
        let out = f(&mut self.engine.borrow_mut());
        self.dispatch();
        out
    }

    fn dispatch(&self) {
        if self.dispatching.replace(true) {
            // An outer dispatch loop is running and will pick the events up.
            return;
        }
        loop {
            let next = self.engine.borrow_mut().pop_event();
            let Some(event) = next else {
                break;
            };
            let listeners = self.bus.borrow().listeners_for(event.kind());
            for (id, listener) in listeners {
                if !self.bus.borrow().is_subscribed(id) {
                    continue;
                }
                (*listener.borrow_mut())(&event);
            }
        }
        self.dispatching.set(false);
    }
}
