//! The per-membership link record.

use core::{cell::Cell, fmt, ptr::NonNull};

use super::diagnostics::{check, violated, Violation};

/// A link in an intrusive doubly linked ring.
///
/// Embed one `Link` in a host for every list the host can be a member of.
/// A link is either *unlinked* (its references are unset) or *linked* into
/// exactly one ring.
///
/// The references are cells: a ring is rewired through shared borrows of
/// its hosts, and hosts stay shared-borrowed for as long as they are linked.
pub struct Link {
    next: Cell<Option<NonNull<Link>>>,
    prev: Cell<Option<NonNull<Link>>>,
    /// The sentinel of the ring this link is in.
    ///
    /// Tracking the ring's sentinel rather than its list keeps `Link` free of
    /// the host and bridge types.
    #[cfg(diagnostics)]
    owner: Cell<Option<NonNull<Link>>>,
}

#[cfg(not(diagnostics))]
sa::const_assert_eq!(size_of::<Link>(), 2 * size_of::<usize>());
#[cfg(diagnostics)]
sa::const_assert_eq!(size_of::<Link>(), 3 * size_of::<usize>());
sa::assert_not_impl_any!(Link: Sync, Clone);

impl Link {
    /// Creates an unlinked link.
    #[inline]
    pub const fn new() -> Self {
        Self {
            next: Cell::new(None),
            prev: Cell::new(None),
            #[cfg(diagnostics)]
            owner: Cell::new(None),
        }
    }

    /// Returns `true` if this link is currently in a list.
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.next.get().is_some()
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> NonNull<Link> {
        NonNull::from(self)
    }

    /// The link's successor in its ring.
    ///
    /// Must not be called while the link is not in a ring.
    #[inline]
    pub(crate) fn next(&self) -> NonNull<Link> {
        match self.next.get() {
            Some(next) => next,
            None => violated(Violation::NotLinked),
        }
    }

    /// The link's predecessor in its ring.
    ///
    /// Must not be called while the link is not in a ring.
    #[inline]
    pub(crate) fn prev(&self) -> NonNull<Link> {
        match self.prev.get() {
            Some(prev) => prev,
            None => violated(Violation::NotLinked),
        }
    }

    /// Wires this link into a ring of one, making it a sentinel.
    ///
    /// A sentinel that is already wired is left alone.
    #[inline]
    pub(crate) fn init_sentinel(&self) {
        if self.is_linked() {
            return;
        }
        let this = self.as_ptr();
        self.next.set(Some(this));
        self.prev.set(Some(this));
        #[cfg(diagnostics)]
        self.owner.set(Some(this));
    }

    #[cfg(diagnostics)]
    #[inline]
    pub(crate) fn owner(&self) -> Option<NonNull<Link>> {
        self.owner.get()
    }

    #[cfg(diagnostics)]
    #[inline]
    pub(crate) fn is_sentinel(&self) -> bool {
        self.owner.get() == Some(self.as_ptr())
    }

    /// Links `link` into a ring, right before `target`.
    ///
    /// `link` is the address the ring keeps. Derive it from a pointer to the
    /// whole host (see [`Bridge::link_ptr`]) so the host can later be
    /// recovered from it.
    ///
    /// # Safety
    ///
    /// Both pointers must point to live links, `target` must be in a ring,
    /// and every link of that ring must stay alive and in place while `link`
    /// is in it.
    ///
    /// [`Bridge::link_ptr`]: super::bridge::Bridge::link_ptr
    pub(crate) unsafe fn insert_before(link: NonNull<Link>, target: NonNull<Link>) {
        let this = unsafe { link.as_ref() };
        if this.is_linked() {
            violated(Violation::AlreadyLinked);
        }
        let target_ref = unsafe { target.as_ref() };
        let prev = target_ref.prev();

        #[cfg(diagnostics)]
        {
            check!(target_ref.owner.get().is_some(), Violation::NotLinked);
            this.owner.set(target_ref.owner.get());
        }

        this.prev.set(Some(prev));
        this.next.set(Some(target));
        unsafe { prev.as_ref() }.next.set(Some(link));
        target_ref.prev.set(Some(link));
    }

    /// Removes this link from the ring it is in.
    ///
    /// # Safety
    ///
    /// The neighbours of this link must still be alive, which holds as long
    /// as the ring's list has not been leaked.
    pub(crate) unsafe fn remove(&self) {
        check!(!self.is_sentinel(), Violation::Sentinel);
        let (Some(next), Some(prev)) = (self.next.get(), self.prev.get()) else {
            violated(Violation::NotLinked);
        };

        unsafe {
            next.as_ref().prev.set(Some(prev));
            prev.as_ref().next.set(Some(next));
        }

        self.next.set(None);
        self.prev.set(None);
        #[cfg(diagnostics)]
        self.owner.set(None);
    }

    /// Moves every link of `donor`'s ring in front of this sentinel and
    /// leaves `donor` as an empty ring.
    ///
    /// O(1). Diagnostics builds also walk the moved links to hand them over
    /// to this ring. Returns `false` if `donor` had nothing to give.
    ///
    /// # Safety
    ///
    /// Both links must be wired sentinels of distinct, live rings.
    pub(crate) unsafe fn splice_before(&self, donor: &Link) -> bool {
        let donor_ptr = donor.as_ptr();
        let first = donor.next();
        if first == donor_ptr {
            return false;
        }
        let last = donor.prev();
        let prev = self.prev();
        let this = self.as_ptr();

        unsafe {
            prev.as_ref().next.set(Some(first));
            first.as_ref().prev.set(Some(prev));
            last.as_ref().next.set(Some(this));
        }
        self.prev.set(Some(last));

        donor.next.set(Some(donor_ptr));
        donor.prev.set(Some(donor_ptr));

        #[cfg(diagnostics)]
        unsafe {
            self.rehome(first, donor_ptr)
        };
        true
    }

    /// Hands the links from `first` up to this sentinel over to this ring.
    #[cfg(diagnostics)]
    unsafe fn rehome(&self, first: NonNull<Link>, donor: NonNull<Link>) {
        let this = self.as_ptr();
        let mut moved = 0usize;
        let mut cursor = first;
        while cursor != this {
            let link = unsafe { cursor.as_ref() };
            check!(!link.is_sentinel(), Violation::Sentinel);
            check!(link.owner.get() == Some(donor), Violation::ForeignRing);
            link.owner.set(Some(this));
            cursor = link.next();
            moved += 1;
        }
        log::debug!("re-homed {moved} links from {donor:p} to {this:p}");
    }

    /// Unlinks every link of this sentinel's ring, leaving it empty.
    ///
    /// Returns how many links were released. An unwired sentinel has none.
    ///
    /// # Safety
    ///
    /// Every link in the ring must still be alive.
    pub(crate) unsafe fn unlink_ring(&self) -> usize {
        let Some(mut cursor) = self.next.get() else {
            return 0;
        };
        let this = self.as_ptr();
        let mut released = 0;
        while cursor != this {
            let link = unsafe { cursor.as_ref() };
            cursor = link.next();
            link.next.set(None);
            link.prev.set(None);
            #[cfg(diagnostics)]
            link.owner.set(None);
            released += 1;
        }
        self.next.set(Some(this));
        self.prev.set(Some(this));
        released
    }

    /// Checks that this link and its successor point at each other, and
    /// returns the successor.
    ///
    /// # Safety
    ///
    /// The successor must still be alive.
    #[inline]
    pub(crate) unsafe fn check_successor(&self) -> NonNull<Link> {
        let next = self.next();
        if unsafe { next.as_ref() }.prev.get() != Some(self.as_ptr()) {
            violated(Violation::BrokenRing);
        }
        next
    }
}

impl Default for Link {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Link")
            .field("linked", &self.is_linked())
            .finish()
    }
}

// SAFETY: a link is only reached through its host or through the ring of a
// list that borrows that host. A host that can be moved to another thread is
// not borrowed by any live list, so nothing else touches its link.
unsafe impl Send for Link {}
