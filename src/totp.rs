//! Time-step code derivation.
//!
//! The code is the raw counter `floor(unix_time / 30)`, not a hashed
//! decimal display code: it is consumed as binary by the kernel
//! module, which recomputes the expected value from its own clock.
//! Clock skew between the two sides is the module's problem, not
//! ours.

use std::time::{SystemTime, UNIX_EPOCH};

/// Width of one time step in seconds.
pub const STEP_SECONDS: u64 = 30;

/// Current time-step counter from the system clock.
///
/// Two calls within the same 30-second window return the same value.
pub fn time_step() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);
    step_at(now)
}

/// Time-step counter for the given unix time.
pub fn step_at(unix_secs: u64) -> u64 {
    unix_secs / STEP_SECONDS
}

/// Narrow a step counter to its 32-bit wire representation.
///
/// The signature covers the full 64-bit counter; the payload field
/// carries this truncation.  Both widths are fixed by the kernel
/// contract.
pub fn wire_code(step: u64) -> u32 {
    step as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_window_same_code() {
        assert_eq!(step_at(1_700_000_010), step_at(1_700_000_010));
        // 1_699_999_990 and 1_700_000_009 share the window starting
        // at 1_699_999_980.
        assert_eq!(step_at(1_699_999_990), step_at(1_700_000_009));
    }

    #[test]
    fn adjacent_windows_differ() {
        let last = step_at(1_700_000_009);
        let next = step_at(1_700_000_010);
        assert_eq!(next, last + 1);
    }

    #[test]
    fn monotonic_non_decreasing() {
        let mut previous = 0;
        for t in (0..=3_000).step_by(7) {
            let step = step_at(t);
            assert!(step >= previous);
            previous = step;
        }
    }

    #[test]
    fn window_boundaries() {
        assert_eq!(step_at(0), 0);
        assert_eq!(step_at(29), 0);
        assert_eq!(step_at(30), 1);
        assert_eq!(step_at(59), 1);
        assert_eq!(step_at(60), 2);
    }

    #[test]
    fn narrowing_keeps_low_bits() {
        assert_eq!(wire_code(0x1_2345_6789), 0x2345_6789);
        assert_eq!(wire_code(42), 42);
    }

    #[test]
    fn current_step_is_plausible() {
        // Sometime after 2023 and before the u32 range matters for
        // a 30-second step (year 6053).
        let step = time_step();
        assert!(step > step_at(1_680_000_000));
    }
}
