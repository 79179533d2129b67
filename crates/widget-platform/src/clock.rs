//! Wall clock adapter.

use widget_core::ports::Clock;

/// System time in ms since the epoch (js `Date.now()` via chrono's
/// wasmbind).
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
