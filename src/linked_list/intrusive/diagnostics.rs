//! Contract violations.
//!
//! Misusing a list is a programming error, never a recoverable condition, so
//! nothing here returns a `Result`. Checks come in two tiers:
//!
//! - checks that keep the safe API sound run in every build;
//! - everything else goes through [`check!`] and only exists when the crate
//!   is built with `cfg(diagnostics)` (debug builds, the `diagnostics`
//!   feature, or `INTRUSIVE_RING_DIAGNOSTICS=on`).
//!
//! Diagnostics builds also track which ring every link belongs to, which is
//! what makes foreign-ring erasure detectable.

use core::fmt;

/// A broken list contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// A link was inserted while it was already in a ring.
    AlreadyLinked,
    /// A link was traversed or removed while it was not in any ring.
    NotLinked,
    /// A link was erased through a list it does not belong to.
    ForeignRing,
    /// The sentinel was erased or projected to a host.
    Sentinel,
    /// A cursor was advanced past the end of its list.
    PastEnd,
    /// A cursor was moved back past the first element.
    BeforeBegin,
    /// Forward and back references stopped being inverses.
    BrokenRing,
    /// The cached length disagrees with the ring.
    CountMismatch,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Violation::AlreadyLinked => "link is already in a list",
            Violation::NotLinked => "link is not in a list",
            Violation::ForeignRing => "link belongs to a different list",
            Violation::Sentinel => "sentinel has no host",
            Violation::PastEnd => "cursor moved past the end",
            Violation::BeforeBegin => "cursor moved before the front",
            Violation::BrokenRing => "ring references are not mutual",
            Violation::CountMismatch => "cached length does not match the ring",
        };
        f.write_str(msg)
    }
}

/// Aborts the current operation.
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn violated(violation: Violation) -> ! {
    panic!("contract violation: {violation}")
}

/// Diagnostics-only assertion. Expands to nothing without `cfg(diagnostics)`,
/// so the condition may use diagnostics-only state.
macro_rules! check {
    ($cond:expr, $violation:expr $(,)?) => {
        #[cfg(diagnostics)]
        {
            if !($cond) {
                $crate::linked_list::intrusive::diagnostics::violated($violation);
            }
        }
    };
}

pub(crate) use check;
