use std::alloc::{self, Layout};

/// Errors surfaced by the fallible constructors and capacity operations.
///
/// The two cases are deliberately distinct: [`Error::CapacityOverflow`] is a
/// logic or input-size error (the request can never be satisfied), while
/// [`Error::AllocationFailure`] is a resource error the caller may be able to
/// recover from. Whichever is returned, the string that produced it is left
/// untouched and all of its invariants still hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested length exceeds the maximum any header variant can record.
    #[error("requested capacity of {required} bytes exceeds the maximum representable length")]
    CapacityOverflow {
        /// The total payload length that was requested, saturated on overflow.
        required: usize,
    },
    /// The global allocator could not provide a block of the requested size.
    #[error("the allocator failed to provide a block of {size} bytes")]
    AllocationFailure {
        /// Total block size requested from the allocator, headers included.
        size: usize,
    },
}

impl Error {
    /// Escalates the error the way the std collections do: panic on a size
    /// that can never be satisfied, abort through [`alloc::handle_alloc_error`]
    /// on allocator exhaustion. Used by the infallible API surface.
    pub(crate) fn escalate(self) -> ! {
        match self {
            Error::CapacityOverflow { .. } => panic!("{self}"),
            Error::AllocationFailure { size } => match Layout::from_size_align(size, 1) {
                Ok(layout) => alloc::handle_alloc_error(layout),
                // unreachable in practice: the size came from a layout we allocated with
                Err(_) => panic!("{self}"),
            },
        }
    }
}
