/// Seconds left of an estimate after `elapsed_secs`, floored at zero.
pub fn remaining_secs(estimated_secs: u64, elapsed_secs: u64) -> u64 {
    estimated_secs.saturating_sub(elapsed_secs)
}

/// Formats seconds as `m:ss`.
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Estimated and hard-timeout durations for one generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBudget {
    pub estimated_secs: u64,
    pub timeout_secs: u64,
}

impl TimeBudget {
    /// Audio upload plus full render.
    pub const FULL: TimeBudget = TimeBudget {
        estimated_secs: 30,
        timeout_secs: 90,
    };

    /// Server-side quick render without uploaded audio.
    pub const QUICK: TimeBudget = TimeBudget {
        estimated_secs: 15,
        timeout_secs: 45,
    };
}
