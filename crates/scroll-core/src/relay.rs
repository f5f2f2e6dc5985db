//! Named-action message protocol used by the popup and background worker.
//!
//! A message looks like `{"action": "setSpeed", "preset": "fast"}`. Each
//! action maps onto one engine command; the reply is either the post-command
//! state snapshot or a plain acknowledgement.

use crate::controller::ScrollController;
use crate::engine::StateSnapshot;
use crate::events::WidgetSignal;
use crate::scheduler::FrameScheduler;
use crate::target::{ScrollHost, ScrollTarget};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("malformed relay message: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Command {
    GetState,
    Start,
    Pause,
    Resume,
    Toggle,
    Stop,
    Reset,
    SetSpeed {
        #[serde(default)]
        preset: Option<String>,
        #[serde(default)]
        multiplier: Option<f64>,
    },
    SetTarget {
        #[serde(default)]
        target: ScrollTarget,
    },
    ShowWidget,
    HideWidget,
    ToggleWidget,
}

impl Command {
    pub fn parse(json: &str) -> Result<Self, RelayError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    State(StateSnapshot),
    Ack {
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        speed: Option<f64>,
    },
}

impl Reply {
    pub fn ack() -> Self {
        Reply::Ack {
            success: true,
            speed: None,
        }
    }

    pub fn to_json(&self) -> String {
        // A snapshot of plain numbers and bools always serializes.
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{\"success\":false}"))
    }
}

impl<H: ScrollHost, S: FrameScheduler> ScrollController<H, S> {
    pub fn handle(&self, command: Command) -> Reply {
        log::debug!("[relay] {:?}", command);
        match command {
            Command::GetState => Reply::State(self.state()),
            Command::Start => {
                self.start(None);
                Reply::ack()
            }
            Command::Pause => {
                self.pause();
                Reply::ack()
            }
            Command::Resume => {
                self.resume();
                Reply::ack()
            }
            Command::Toggle => {
                self.toggle();
                Reply::State(self.state())
            }
            Command::Stop => {
                self.stop();
                Reply::ack()
            }
            Command::Reset => {
                self.reset();
                Reply::ack()
            }
            Command::SetSpeed { preset, multiplier } => {
                // An empty preset name counts as absent.
                if let Some(name) = preset.filter(|p| !p.is_empty()) {
                    self.set_speed_preset_named(&name);
                } else if let Some(m) = multiplier {
                    self.set_speed_multiplier(m);
                }
                Reply::Ack {
                    success: true,
                    speed: Some(self.state().speed),
                }
            }
            Command::SetTarget { target } => {
                self.set_target(target);
                Reply::ack()
            }
            Command::ShowWidget => {
                self.relay(WidgetSignal::Show);
                Reply::ack()
            }
            Command::HideWidget => {
                self.relay(WidgetSignal::Hide);
                Reply::ack()
            }
            Command::ToggleWidget => {
                self.relay(WidgetSignal::Toggle);
                Reply::ack()
            }
        }
    }

    /// Parse a raw JSON message, run it and serialize the reply.
    pub fn handle_json(&self, json: &str) -> Result<String, RelayError> {
        let command = Command::parse(json)?;
        Ok(self.handle(command).to_json())
    }
}
