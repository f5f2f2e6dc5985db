//! The auto-scroll state machine.
//!
//! `ScrollEngine` owns the scroll state for one page context. It moves the
//! active target through a [`ScrollHost`], asks a [`FrameScheduler`] for at
//! most one pending frame at a time, and queues an [`EngineEvent`] for every
//! transition. Events are only queued here; delivering them is the
//! controller's job so listeners never run while the engine is borrowed.

use crate::config::EngineConfig;
use crate::easing::Rewind;
use crate::events::{EngineEvent, WidgetSignal};
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::speed::{SpeedModel, SpeedPreset};
use crate::target::{is_scrollable, Position, ScrollHost, ScrollTarget};
use serde::Serialize;
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Paused,
    /// Reached the scroll limit. Behaves like `Idle` for the next `start`.
    Ended,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EngineState {
    pub phase: Phase,
    /// Pixels advanced per tick.
    pub speed: f64,
    pub target: ScrollTarget,
    /// Sub-pixel remainder carried between ticks.
    pub carry: f64,
}

impl EngineState {
    #[inline]
    pub fn running(&self) -> bool {
        matches!(self.phase, Phase::Running | Phase::Paused)
    }

    #[inline]
    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }
}

/// Answer to a state query, in the shape the popup and widget consume.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub running: bool,
    pub paused: bool,
    pub speed: f64,
    pub multiplier: f64,
    pub target: ScrollTarget,
    pub position: Position,
}

pub struct ScrollEngine<H, S> {
    host: H,
    scheduler: S,
    model: SpeedModel,
    reset_duration_ms: f64,
    state: EngineState,
    pending: Option<FrameHandle>,
    rewind: Option<(ScrollTarget, Rewind)>,
    outbox: VecDeque<EngineEvent>,
}

impl<H: ScrollHost, S: FrameScheduler> ScrollEngine<H, S> {
    pub fn new(host: H, scheduler: S, config: &EngineConfig) -> Self {
        let model = config.speed_model();
        Self {
            host,
            scheduler,
            model,
            reset_duration_ms: config.reset_duration_ms,
            state: EngineState {
                phase: Phase::Idle,
                speed: model.table.rate(config.default_preset),
                target: ScrollTarget::Page,
                carry: 0.0,
            },
            pending: None,
            rewind: None,
            outbox: VecDeque::new(),
        }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn speed_model(&self) -> &SpeedModel {
        &self.model
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn is_rewinding(&self) -> bool {
        self.rewind.is_some()
    }

    pub fn position(&self) -> Option<Position> {
        self.host.position(self.state.target)
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            running: self.state.running(),
            paused: self.state.paused(),
            speed: self.state.speed,
            multiplier: self.model.multiplier_for_speed(self.state.speed),
            target: self.state.target,
            position: self.position().unwrap_or_default(),
        }
    }

    pub fn pop_event(&mut self) -> Option<EngineEvent> {
        self.outbox.pop_front()
    }

    // ---------------- Commands ----------------

    /// Begin a fresh session. `None` keeps the current target.
    ///
    /// While already running this only re-arms a frame the host previously
    /// refused; state and events are untouched.
    pub fn start(&mut self, target: Option<ScrollTarget>) {
        if self.state.phase == Phase::Running {
            if self.pending.is_none() {
                log::info!("[scroll] re-arming frame for running session");
                self.arm();
            }
            return;
        }
        if let Some(t) = target {
            if self.accepts(t) {
                self.state.target = t;
            }
        }
        self.rewind = None;
        self.state.phase = Phase::Running;
        self.state.carry = 0.0;
        self.arm();
        log::info!("[scroll] started target={:?} speed={:.2}", self.state.target, self.state.speed);
        self.emit(EngineEvent::Started {
            target: self.state.target,
        });
    }

    pub fn pause(&mut self) {
        if self.state.phase != Phase::Running {
            return;
        }
        self.disarm();
        self.state.phase = Phase::Paused;
        self.emit(EngineEvent::Paused);
    }

    pub fn resume(&mut self) {
        if self.state.phase != Phase::Paused {
            return;
        }
        self.state.phase = Phase::Running;
        self.arm();
        self.emit(EngineEvent::Resumed);
    }

    pub fn toggle(&mut self) {
        match self.state.phase {
            Phase::Idle | Phase::Ended => self.start(None),
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
        }
    }

    pub fn stop(&mut self) {
        self.disarm();
        self.rewind = None;
        self.state.phase = Phase::Idle;
        self.emit(EngineEvent::Stopped);
    }

    /// Stop, then ease the target back to the top.
    pub fn reset(&mut self) {
        self.stop();
        let target = self.state.target;
        let top = self.host.position(target).map(|p| p.top);
        self.emit(EngineEvent::Reset);
        match top {
            Some(top) if top > 0.0 => {
                if self.reset_duration_ms <= 0.0 {
                    self.host.scroll_to(target, 0.0);
                } else {
                    self.rewind = Some((target, Rewind::new(top, self.reset_duration_ms)));
                    self.arm();
                }
            }
            Some(_) => {}
            None => log::warn!("[scroll] reset: target {:?} is detached", target),
        }
    }

    pub fn set_speed_preset(&mut self, preset: SpeedPreset) {
        let speed = self.model.table.rate(preset);
        self.state.speed = speed;
        self.emit(EngineEvent::SpeedChanged {
            speed,
            preset: Some(preset),
            multiplier: self.model.multiplier_for_speed(speed),
        });
    }

    /// Preset by name; unknown names are ignored. Returns whether it applied.
    pub fn set_speed_preset_named(&mut self, name: &str) -> bool {
        match name.parse::<SpeedPreset>() {
            Ok(preset) => {
                self.set_speed_preset(preset);
                true
            }
            Err(e) => {
                log::warn!("[scroll] {}", e);
                false
            }
        }
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f64) {
        let Some((speed, multiplier)) = self.model.speed_for_multiplier(multiplier) else {
            log::warn!("[scroll] ignoring non-finite multiplier {}", multiplier);
            return;
        };
        self.state.speed = speed;
        self.emit(EngineEvent::SpeedChanged {
            speed,
            preset: None,
            multiplier,
        });
    }

    /// Swap targets. A running session is paused across the swap so no tick
    /// can mix measurements from the old and new targets.
    pub fn set_target(&mut self, target: ScrollTarget) {
        if !self.accepts(target) {
            return;
        }
        let was_running = self.state.phase == Phase::Running;
        if was_running {
            self.pause();
        }
        if self.rewind.take().is_some() {
            self.disarm();
        }
        self.state.target = target;
        if was_running {
            self.resume();
        }
        self.emit(EngineEvent::TargetChanged { target });
    }

    pub fn relay(&mut self, signal: WidgetSignal) {
        self.emit(EngineEvent::Widget(signal));
    }

    // ---------------- Frame driving ----------------

    /// Entry point for the host's per-frame callback. Frames other than the
    /// single pending one are ignored.
    pub fn run_frame(&mut self, handle: FrameHandle, now_ms: f64) {
        if self.pending != Some(handle) {
            log::trace!("[scroll] dropping stale frame {:?}", handle);
            return;
        }
        self.pending = None;

        if let Some((target, rewind)) = self.rewind.as_mut() {
            let target = *target;
            let (top, done) = rewind.sample(now_ms);
            self.host.scroll_to(target, top);
            if done {
                self.rewind = None;
            } else {
                self.arm();
            }
            return;
        }

        if self.state.phase == Phase::Running {
            self.tick();
        }
    }

    fn tick(&mut self) {
        let target = self.state.target;
        let Some(pos) = self.host.position(target) else {
            log::warn!("[scroll] target {:?} detached, ending", target);
            self.finish();
            return;
        };
        if pos.at_end() {
            self.finish();
            return;
        }

        self.state.carry += self.state.speed;
        if self.state.carry >= 1.0 {
            let whole = self.state.carry.floor();
            self.state.carry -= whole;
            self.host.scroll_by(target, whole.min(pos.room()));
            match self.host.position(target) {
                Some(after) if !after.at_end() => {}
                _ => {
                    self.finish();
                    return;
                }
            }
        }
        self.arm();
    }

    fn finish(&mut self) {
        self.disarm();
        self.state.phase = Phase::Ended;
        log::info!("[scroll] reached end of {:?}", self.state.target);
        self.emit(EngineEvent::Ended);
    }

    // ---------------- Helpers ----------------

    fn accepts(&self, target: ScrollTarget) -> bool {
        let ScrollTarget::Element(id) = target else {
            return true;
        };
        match self.host.element_info(id) {
            Some(info) if is_scrollable(&info) => true,
            Some(_) => {
                log::warn!("[scroll] element {:?} is not scrollable, ignoring", id);
                false
            }
            None => {
                log::warn!("[scroll] element {:?} is detached, ignoring", id);
                false
            }
        }
    }

    fn arm(&mut self) {
        self.disarm();
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() {
            log::error!("[scroll] host refused to schedule a frame");
        }
    }

    fn disarm(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    fn emit(&mut self, event: EngineEvent) {
        log::debug!("[scroll] event {}", event.kind());
        self.outbox.push_back(event);
    }
}
