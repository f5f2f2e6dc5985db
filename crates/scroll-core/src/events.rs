//! Engine notifications and the typed observer registry that delivers them.

use crate::speed::SpeedPreset;
use crate::target::ScrollTarget;
use serde_json::{json, Value};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Started,
    Paused,
    Resumed,
    Stopped,
    Ended,
    Reset,
    SpeedChanged,
    TargetChanged,
    ShowWidget,
    HideWidget,
    ToggleWidget,
}

impl EventKind {
    pub const ALL: [EventKind; 11] = [
        EventKind::Started,
        EventKind::Paused,
        EventKind::Resumed,
        EventKind::Stopped,
        EventKind::Ended,
        EventKind::Reset,
        EventKind::SpeedChanged,
        EventKind::TargetChanged,
        EventKind::ShowWidget,
        EventKind::HideWidget,
        EventKind::ToggleWidget,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Started => "started",
            EventKind::Paused => "paused",
            EventKind::Resumed => "resumed",
            EventKind::Stopped => "stopped",
            EventKind::Ended => "ended",
            EventKind::Reset => "reset",
            EventKind::SpeedChanged => "speedchanged",
            EventKind::TargetChanged => "targetchanged",
            EventKind::ShowWidget => "showwidget",
            EventKind::HideWidget => "hidewidget",
            EventKind::ToggleWidget => "togglewidget",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// UI-only signals the engine relays without interpreting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetSignal {
    Show,
    Hide,
    Toggle,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EngineEvent {
    Started { target: ScrollTarget },
    Paused,
    Resumed,
    Stopped,
    Ended,
    Reset,
    SpeedChanged {
        speed: f64,
        preset: Option<SpeedPreset>,
        multiplier: f64,
    },
    TargetChanged { target: ScrollTarget },
    Widget(WidgetSignal),
}

impl EngineEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            EngineEvent::Started { .. } => EventKind::Started,
            EngineEvent::Paused => EventKind::Paused,
            EngineEvent::Resumed => EventKind::Resumed,
            EngineEvent::Stopped => EventKind::Stopped,
            EngineEvent::Ended => EventKind::Ended,
            EngineEvent::Reset => EventKind::Reset,
            EngineEvent::SpeedChanged { .. } => EventKind::SpeedChanged,
            EngineEvent::TargetChanged { .. } => EventKind::TargetChanged,
            EngineEvent::Widget(WidgetSignal::Show) => EventKind::ShowWidget,
            EngineEvent::Widget(WidgetSignal::Hide) => EventKind::HideWidget,
            EngineEvent::Widget(WidgetSignal::Toggle) => EventKind::ToggleWidget,
        }
    }

    /// Detail payload attached to the DOM `CustomEvent`, `null` when the
    /// event carries nothing.
    pub fn detail(&self) -> Value {
        match self {
            EngineEvent::Started { target } => json!({ "target": target }),
            EngineEvent::SpeedChanged {
                speed,
                preset,
                multiplier,
            } => match preset {
                Some(p) => json!({ "speed": speed, "preset": p, "multiplier": multiplier }),
                None => json!({ "speed": speed, "multiplier": multiplier }),
            },
            EngineEvent::TargetChanged { target } => json!({ "element": target }),
            _ => Value::Null,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

pub type Listener = Rc<RefCell<dyn FnMut(&EngineEvent)>>;

struct Subscriber {
    id: SubscriptionId,
    kind: Option<EventKind>,
    listener: Listener,
}

/// Observer registry. Delivery follows subscription order.
#[derive(Default)]
pub struct EventBus {
    subscribers: SmallVec<[Subscriber; 4]>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen to every event.
    pub fn subscribe(&mut self, listener: impl FnMut(&EngineEvent) + 'static) -> SubscriptionId {
        self.insert(None, Rc::new(RefCell::new(listener)))
    }

    /// Listen to a single event kind.
    pub fn subscribe_kind(
        &mut self,
        kind: EventKind,
        listener: impl FnMut(&EngineEvent) + 'static,
    ) -> SubscriptionId {
        self.insert(Some(kind), Rc::new(RefCell::new(listener)))
    }

    fn insert(&mut self, kind: Option<EventKind>, listener: Listener) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscribers.push(Subscriber { id, kind, listener });
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscribers.iter().any(|s| s.id == id)
    }

    /// Listeners interested in `kind`, cloned out so the bus can be released
    /// before any of them runs.
    pub fn listeners_for(&self, kind: EventKind) -> SmallVec<[(SubscriptionId, Listener); 4]> {
        self.subscribers
            .iter()
            .filter(|s| s.kind.map_or(true, |k| k == kind))
            .map(|s| (s.id, s.listener.clone()))
            .collect()
    }

    /// Deliver directly. Listeners must not touch this bus while it runs;
    /// the controller uses `listeners_for` instead.
    pub fn emit(&self, event: &EngineEvent) {
        for (_, listener) in self.listeners_for(event.kind()) {
            (*listener.borrow_mut())(event);
        }
    }
}
