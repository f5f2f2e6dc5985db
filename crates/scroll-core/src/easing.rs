//! Eased rewind used by `reset`.

/// Cubic ease-out: fast start, gentle landing. `t` is clamped to `[0, 1]`.
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Time-based animation of a scroll offset from `from` down to 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rewind {
    from: f64,
    duration_ms: f64,
    started_at: Option<f64>,
}

impl Rewind {
    pub fn new(from: f64, duration_ms: f64) -> Self {
        Self {
            from,
            duration_ms: duration_ms.max(0.0),
            started_at: None,
        }
    }

    /// Offset for the frame stamped `now_ms`, and whether the rewind is done.
    /// The first sampled frame anchors the start time.
    pub fn sample(&mut self, now_ms: f64) -> (f64, bool) {
        let start = *self.started_at.get_or_insert(now_ms);
        if self.duration_ms <= 0.0 {
            return (0.0, true);
        }
        let t = ((now_ms - start) / self.duration_ms).clamp(0.0, 1.0);
        if t >= 1.0 {
            return (0.0, true);
        }
        (self.from * (1.0 - ease_out_cubic(t)), false)
    }
}
