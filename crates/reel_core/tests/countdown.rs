use reel_core::{format_clock, remaining_secs, TimeBudget};

#[test]
fn clock_pads_seconds_to_two_digits() {
    assert_eq!(format_clock(125), "2:05");
    assert_eq!(format_clock(0), "0:00");
    assert_eq!(format_clock(59), "0:59");
    assert_eq!(format_clock(600), "10:00");
}

#[test]
fn remaining_never_goes_negative() {
    assert_eq!(remaining_secs(30, 12), 18);
    assert_eq!(remaining_secs(30, 30), 0);
    assert_eq!(remaining_secs(30, 95), 0);
}

#[test]
fn budgets_time_out_after_their_estimate() {
    for budget in [TimeBudget::FULL, TimeBudget::QUICK] {
        assert!(budget.timeout_secs > budget.estimated_secs);
    }
}
