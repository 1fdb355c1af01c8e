//! Bounded convergence polling
//!
//! A loop that repeats an observation until the observed value stops
//! changing for a required number of consecutive passes, or an iteration
//! ceiling is reached. Hitting the ceiling is not an error; callers treat
//! the last observation as "as complete as achievable".

/// Result of a polling run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOutcome<T> {
    /// The final observed value
    pub value: T,
    /// Total observations made
    pub passes: usize,
    /// Whether the stability streak was reached before the ceiling
    pub converged: bool,
}

/// Observe repeatedly until the value is unchanged for `stable_for`
/// consecutive passes or `max_passes` observations have been made.
///
/// The closure receives the zero-based pass number. `max_passes` must be
/// at least 1; the closure is always invoked at least once.
pub fn poll_until_stable<T, F>(mut observe: F, stable_for: usize, max_passes: usize) -> PollOutcome<T>
where
    T: PartialEq + Copy,
    F: FnMut(usize) -> T,
{
    let mut last = observe(0);
    let mut streak = 0usize;

    for pass in 1..max_passes.max(1) {
        if streak >= stable_for {
            return PollOutcome {
                value: last,
                passes: pass,
                converged: true,
            };
        }

        let current = observe(pass);
        if current == last {
            streak += 1;
        } else {
            streak = 0;
        }
        last = current;
    }

    PollOutcome {
        value: last,
        passes: max_passes.max(1),
        converged: streak >= stable_for,
    }
}
