use std::fmt::Debug;
use std::io;
use std::ptr::NonNull;
#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use crate::pal::MockBindings;
use crate::pal::{Bindings, BuildTargetBindings};

/// Enum to hide the real/mock choice behind a single wrapper type.
#[derive(Clone)]
pub(crate) enum BindingsFacade {
    Target(&'static BuildTargetBindings),

    #[cfg(test)]
    Mock(Arc<MockBindings>),
}

impl BindingsFacade {
    pub(crate) const fn target() -> Self {
        Self::Target(&BuildTargetBindings)
    }

    #[cfg(test)]
    pub(crate) fn from_mock(mock: MockBindings) -> Self {
        Self::Mock(Arc::new(mock))
    }
}

impl Bindings for BindingsFacade {
    fn sched_setaffinity_current(&self, processor: u32) -> Result<(), io::Error> {
        match self {
            Self::Target(bindings) => bindings.sched_setaffinity_current(processor),
            #[cfg(test)]
            Self::Mock(mock) => mock.sched_setaffinity_current(processor),
        }
    }

    fn sched_max_priority_fifo(&self) -> Result<i32, io::Error> {
        match self {
            Self::Target(bindings) => bindings.sched_max_priority_fifo(),
            #[cfg(test)]
            Self::Mock(mock) => mock.sched_max_priority_fifo(),
        }
    }

    fn sched_set_fifo_current(&self, priority: i32) -> Result<(), io::Error> {
        match self {
            Self::Target(bindings) => bindings.sched_set_fifo_current(priority),
            #[cfg(test)]
            Self::Mock(mock) => mock.sched_set_fifo_current(priority),
        }
    }

    fn page_size(&self) -> usize {
        match self {
            Self::Target(bindings) => bindings.page_size(),
            #[cfg(test)]
            Self::Mock(mock) => mock.page_size(),
        }
    }

    fn map_anonymous(&self, length: usize) -> Result<NonNull<u8>, io::Error> {
        match self {
            Self::Target(bindings) => bindings.map_anonymous(length),
            #[cfg(test)]
            Self::Mock(mock) => mock.map_anonymous(length),
        }
    }

    fn unmap(&self, address: NonNull<u8>, length: usize) -> Result<(), io::Error> {
        match self {
            Self::Target(bindings) => bindings.unmap(address, length),
            #[cfg(test)]
            Self::Mock(mock) => mock.unmap(address, length),
        }
    }
}

impl Debug for BindingsFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Target(inner) => inner.fmt(f),
            #[cfg(test)]
            Self::Mock(inner) => inner.fmt(f),
        }
    }
}
