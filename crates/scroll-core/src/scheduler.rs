//! Per-frame scheduling seam.
//!
//! On the web this is `requestAnimationFrame`; tests use a fake that records
//! requests and lets the test decide when a frame fires.

use serde::{Deserialize, Serialize};

/// Identifies one scheduled frame so it can be cancelled, and so a frame that
/// fires after being superseded can be recognised as stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameHandle(pub u64);

pub trait FrameScheduler {
    /// Ask the host to run one frame later. `None` means the host refused.
    fn request_frame(&mut self) -> Option<FrameHandle>;

    fn cancel_frame(&mut self, handle: FrameHandle);
}
