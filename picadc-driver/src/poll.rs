//! Bounded busy-waiting
use defmt_or_log::warn;
use picadc_common::{ConversionPhase, PollLimit};

use crate::converter::{AdcError, TimeoutSnafu};

/// Spin until `ready` returns true, or the poll limit is used up
///
/// `ready` is called at most `limit` times. The returned error carries the phase being waited on.
pub(crate) fn poll_until(
    limit: PollLimit,
    phase: ConversionPhase,
    mut ready: impl FnMut() -> bool,
) -> Result<(), AdcError> {
    let mut polls: u32 = 0;
    loop {
        if ready() {
            return Ok(());
        }
        polls = polls.saturating_add(1);
        if limit.is_exhausted(polls) {
            warn!("ADC stalled in {} phase after {} polls", phase, polls);
            return TimeoutSnafu { phase, polls }.fail();
        }
        core::hint::spin_loop();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ready_immediately() {
        let mut calls = 0;
        let result = poll_until(PollLimit::polls(1), ConversionPhase::Converting, || {
            calls += 1;
            true
        });
        assert_eq!(Ok(()), result);
        assert_eq!(1, calls);
    }

    #[test]
    fn test_limit_counts_polls() {
        let mut calls = 0;
        let result = poll_until(PollLimit::polls(5), ConversionPhase::Sampling, || {
            calls += 1;
            false
        });
        assert_eq!(
            Err(AdcError::Timeout {
                phase: ConversionPhase::Sampling,
                polls: 5
            }),
            result
        );
        assert_eq!(5, calls);
    }

    #[test]
    fn test_unbounded_waits() {
        let mut calls = 0;
        let result = poll_until(PollLimit::Unbounded, ConversionPhase::Converting, || {
            calls += 1;
            calls == 10_000
        });
        assert_eq!(Ok(()), result);
        assert_eq!(10_000, calls);
    }
}
