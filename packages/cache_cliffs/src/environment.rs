//! The controlled execution environment for the measurement process.
//!
//! Timing deltas are only attributable to cache behavior if the process cannot migrate
//! between processors (the private cache levels are not shared between them) and is not
//! preempted mid-window. [`Environment::claim_processor`] therefore binds the process to
//! one fixed logical processor and raises it to the maximum FIFO real-time priority.
//!
//! Both steps are correctness preconditions, not optimizations: if either fails the
//! process must abort before taking a single measurement. Neither is ever reverted - the
//! process runs pinned and elevated until it exits at the end of the sweep.

use crate::Result;
use crate::error::Error;
use crate::pal::{Bindings, BindingsFacade};

/// Identifies a logical processor as the operating system numbers them.
pub type ProcessorId = u32;

/// Configures the operating-system environment the measurement process runs under.
#[derive(Debug)]
pub struct Environment {
    bindings: BindingsFacade,
}

impl Environment {
    /// Creates an environment configurator talking to the real operating system.
    #[must_use]
    pub fn new() -> Self {
        Self::with_bindings(BindingsFacade::target())
    }

    pub(crate) fn with_bindings(bindings: BindingsFacade) -> Self {
        Self { bindings }
    }

    /// Binds the process to `processor` and elevates it to the highest FIFO real-time
    /// priority the host offers.
    ///
    /// # Errors
    ///
    /// [`Error::Affinity`] if the process cannot be pinned, [`Error::Scheduling`] if the
    /// real-time elevation is refused (typically: insufficient privileges). Either one
    /// means measurements would be polluted by core migration or preemption, so callers
    /// must abort rather than continue.
    pub fn claim_processor(&self, processor: ProcessorId) -> Result<()> {
        self.bindings
            .sched_setaffinity_current(processor)
            .map_err(|source| Error::Affinity { processor, source })?;

        let priority = self
            .bindings
            .sched_max_priority_fifo()
            .map_err(|source| Error::Scheduling { source })?;

        self.bindings
            .sched_set_fifo_current(priority)
            .map_err(|source| Error::Scheduling { source })?;

        Ok(())
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;

    use super::*;
    use crate::pal::MockBindings;

    #[test]
    fn pins_then_elevates() {
        let mut bindings = MockBindings::new();
        let mut seq = Sequence::new();

        bindings
            .expect_sched_setaffinity_current()
            .once()
            .in_sequence(&mut seq)
            .withf(|processor| *processor == 5)
            .returning(|_| Ok(()));

        bindings
            .expect_sched_max_priority_fifo()
            .once()
            .in_sequence(&mut seq)
            .returning(|| Ok(99));

        bindings
            .expect_sched_set_fifo_current()
            .once()
            .in_sequence(&mut seq)
            .withf(|priority| *priority == 99)
            .returning(|_| Ok(()));

        let environment = Environment::with_bindings(BindingsFacade::from_mock(bindings));

        environment
            .claim_processor(5)
            .expect("all mocked calls succeed");
    }

    #[test]
    fn affinity_failure_stops_before_scheduling() {
        let mut bindings = MockBindings::new();

        // No scheduling expectations: reaching the scheduler calls would fail the test.
        bindings
            .expect_sched_setaffinity_current()
            .once()
            .returning(|_| Err(std::io::Error::from_raw_os_error(libc::EINVAL)));

        let environment = Environment::with_bindings(BindingsFacade::from_mock(bindings));
        let result = environment.claim_processor(0);

        assert!(matches!(
            result,
            Err(Error::Affinity { processor: 0, .. })
        ));
    }

    #[test]
    fn scheduling_refusal_is_fatal() {
        let mut bindings = MockBindings::new();

        bindings
            .expect_sched_setaffinity_current()
            .once()
            .returning(|_| Ok(()));

        bindings
            .expect_sched_max_priority_fifo()
            .once()
            .returning(|| Ok(99));

        // The classic failure mode: not privileged to enter the real-time class.
        bindings
            .expect_sched_set_fifo_current()
            .once()
            .returning(|_| Err(std::io::Error::from_raw_os_error(libc::EPERM)));

        let environment = Environment::with_bindings(BindingsFacade::from_mock(bindings));
        let result = environment.claim_processor(0);

        assert!(matches!(result, Err(Error::Scheduling { .. })));
    }
}
