//! Time-derived identifier allocation

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Next record identifier: the current epoch milliseconds, bumped past the
/// previous issue when the clock stalls or steps backwards. Unique for the
/// life of the process; time-derived values can collide across processes
/// under clock skew, a known limitation of the scheme.
pub fn next_id() -> i64 {
    loop {
        let last = LAST_ID.load(Ordering::Relaxed);
        let now = Utc::now().timestamp_millis();
        let candidate = if now > last { now } else { last + 1 };
        if LAST_ID
            .compare_exchange(last, candidate, Ordering::Relaxed, Ordering::Relaxed)
            .is_ok()
        {
            return candidate;
        }
    }
}

/// Identifier for a user-created category. The prefix keeps generated ids
/// out of both the builtin category namespace and the numeric transaction
/// id space.
pub fn next_category_id() -> String {
    format!("custom_{}", next_id())
}
