//! The list container.

use core::{
    fmt,
    marker::{PhantomData, PhantomPinned},
    pin::Pin,
    ptr::NonNull,
};

use super::{
    bridge::{Bridge, DefaultBridge},
    diagnostics::{check, violated, Violation},
    iter::{Cursor, CursorMut, Iter},
    link::Link,
};

/// An intrusive doubly linked list.
///
/// The list owns a sentinel [`Link`] and an element count; everything else
/// lives in the hosts. `B` picks which embedded link the list uses and
/// defaults to the host's `link` field.
///
/// Hosts are borrowed for `'a`, so they outlive their membership. The list
/// itself must be pinned before it is modified, because the ring points back
/// at its sentinel:
///
/// ```
/// use core::pin::pin;
/// use intrusive_ring::{Link, Linked, LinkedList};
///
/// #[derive(Linked)]
/// struct Frame {
///     no: usize,
///     link: Link,
/// }
///
/// let frames: Vec<Frame> = (0..4).map(|no| Frame { no, link: Link::new() }).collect();
/// let mut free = pin!(LinkedList::<Frame>::new());
/// for frame in &frames {
///     free.as_mut().push_back(frame);
/// }
///
/// assert_eq!(free.as_mut().pop_front().map(|f| f.no), Some(0));
/// assert_eq!(free.back().map(|f| f.no), Some(3));
/// assert_eq!(free.len(), 3);
/// ```
///
/// Lists cannot be cloned: a link is in at most one ring. To hand every host
/// over to another list, use [`LinkedList::append`].
///
/// Dropping a list that still holds hosts unlinks them.
pub struct LinkedList<'a, H, B = DefaultBridge<H>>
where
    B: Bridge<Host = H>,
{
    sentinel: Link,
    len: usize,
    _hosts: PhantomData<&'a H>,
    _bridge: PhantomData<fn() -> B>,
    _pin: PhantomPinned,
}

impl<'a, H, B> LinkedList<'a, H, B>
where
    B: Bridge<Host = H>,
{
    /// Creates an empty list.
    #[inline]
    pub const fn new() -> Self {
        Self {
            sentinel: Link::new(),
            len: 0,
            _hosts: PhantomData,
            _bridge: PhantomData,
            _pin: PhantomPinned,
        }
    }

    /// Returns the number of hosts in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no host.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head() == self.sentinel()
    }

    /// Returns the first host.
    #[inline]
    pub fn front(&self) -> Option<&'a H> {
        self.host(self.head())
    }

    /// Returns the last host.
    #[inline]
    pub fn back(&self) -> Option<&'a H> {
        self.host(self.tail())
    }

    /// Iterates over the hosts from front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, 'a, H, B> {
        Iter::new(self)
    }

    /// Returns a cursor at the first host, or at the end if the list is
    /// empty.
    #[inline]
    pub fn cursor_front(&self) -> Cursor<'_, 'a, H, B> {
        Cursor::new(self, self.head())
    }

    /// Returns a cursor at the last host, or at the end if the list is empty.
    #[inline]
    pub fn cursor_back(&self) -> Cursor<'_, 'a, H, B> {
        Cursor::new(self, self.tail())
    }

    /// Returns a cursor at the end position, one past the last host.
    #[inline]
    pub fn cursor_end(&self) -> Cursor<'_, 'a, H, B> {
        Cursor::new(self, self.sentinel())
    }

    /// Returns a mutable cursor at the first host, or at the end if the list
    /// is empty.
    pub fn cursor_front_mut(self: Pin<&mut Self>) -> CursorMut<'_, 'a, H, B> {
        let this = self.ring();
        let head = this.head();
        CursorMut::new(this, head)
    }

    /// Returns a mutable cursor at the last host, or at the end if the list
    /// is empty.
    pub fn cursor_back_mut(self: Pin<&mut Self>) -> CursorMut<'_, 'a, H, B> {
        let this = self.ring();
        let tail = this.tail();
        CursorMut::new(this, tail)
    }

    /// Returns a mutable cursor at the end position.
    pub fn cursor_end_mut(self: Pin<&mut Self>) -> CursorMut<'_, 'a, H, B> {
        let this = self.ring();
        let sentinel = this.sentinel();
        CursorMut::new(this, sentinel)
    }

    /// Returns a mutable cursor at `host`.
    ///
    /// # Safety
    ///
    /// `host` must be in this list.
    pub unsafe fn cursor_mut_from_host(
        self: Pin<&mut Self>,
        host: &H,
    ) -> CursorMut<'_, 'a, H, B> {
        let this = self.ring();
        let link = B::link_of(host);
        if !link.is_linked() {
            violated(Violation::NotLinked);
        }
        check!(link.owner() == Some(this.sentinel()), Violation::ForeignRing);
        CursorMut::new(this, Self::link_ptr(host))
    }

    /// Adds `host` at the front.
    ///
    /// # Panics
    ///
    /// Panics if the host's link is already in a list.
    pub fn push_front(self: Pin<&mut Self>, host: &'a H) {
        let this = self.ring();
        let head = this.head();
        this.link_before(head, host);
    }

    /// Adds `host` at the back.
    ///
    /// # Panics
    ///
    /// Panics if the host's link is already in a list.
    pub fn push_back(self: Pin<&mut Self>, host: &'a H) {
        let this = self.ring();
        let sentinel = this.sentinel();
        this.link_before(sentinel, host);
    }

    /// Removes and returns the first host.
    pub fn pop_front(self: Pin<&mut Self>) -> Option<&'a H> {
        let this = self.ring();
        let head = this.head();
        if head == this.sentinel() {
            return None;
        }
        Some(this.unlink(head))
    }

    /// Removes and returns the last host.
    pub fn pop_back(self: Pin<&mut Self>) -> Option<&'a H> {
        let this = self.ring();
        let tail = this.tail();
        if tail == this.sentinel() {
            return None;
        }
        Some(this.unlink(tail))
    }

    /// Removes `host` from the list in O(1).
    ///
    /// # Safety
    ///
    /// `host` must be in this list. Diagnostics builds check this and panic;
    /// other builds trust the caller.
    ///
    /// # Panics
    ///
    /// Panics if the host is not in any list.
    pub unsafe fn remove(self: Pin<&mut Self>, host: &H) {
        let this = self.ring();
        this.unlink(Self::link_ptr(host));
    }

    /// Moves `host` to the front, e.g. to mark it most recently used.
    ///
    /// # Safety
    ///
    /// `host` must be in this list.
    pub unsafe fn move_to_front(mut self: Pin<&mut Self>, host: &'a H) {
        unsafe { self.as_mut().remove(host) };
        self.push_front(host);
    }

    /// Moves `host` to the back.
    ///
    /// # Safety
    ///
    /// `host` must be in this list.
    pub unsafe fn move_to_back(mut self: Pin<&mut Self>, host: &'a H) {
        unsafe { self.as_mut().remove(host) };
        self.push_back(host);
    }

    /// Moves every host of `other` to the back of this list, keeping their
    /// order, and leaves `other` empty.
    ///
    /// Appending to an empty list is how a list is moved. The splice is
    /// O(1); diagnostics builds additionally walk the moved hosts.
    pub fn append(self: Pin<&mut Self>, other: Pin<&mut Self>) {
        let this = self.ring();
        // SAFETY: nothing is moved out of `other`.
        let other = unsafe { other.get_unchecked_mut() };
        if !other.sentinel.is_linked() {
            return;
        }
        // SAFETY: both sentinels are wired and pinned, and two `Pin<&mut _>`
        // cannot alias.
        if unsafe { this.sentinel.splice_before(&other.sentinel) } {
            this.len += other.len;
            other.len = 0;
        }
    }

    /// Unlinks every host. O(n).
    pub fn clear(self: Pin<&mut Self>) {
        // SAFETY: nothing is moved out of the list.
        let this = unsafe { self.get_unchecked_mut() };
        // SAFETY: linked hosts are borrowed for `'a` and still alive.
        let released = unsafe { this.sentinel.unlink_ring() };
        if released > 0 {
            log::debug!("cleared {released} hosts");
        }
        this.len = 0;
    }

    /// Returns `true` if `host` is in this list. O(n), or O(1) if the host
    /// is in no list at all.
    pub fn contains(&self, host: &H) -> bool {
        let link = B::link_of(host);
        if !link.is_linked() {
            return false;
        }
        let target = Self::link_ptr(host);
        let sentinel = self.sentinel();
        let mut cursor = self.head();
        while cursor != sentinel {
            if cursor == target {
                return true;
            }
            cursor = self.successor(cursor);
        }
        false
    }

    /// Walks the whole ring and panics on the first broken invariant:
    /// references that are not mutual, a length that disagrees with the
    /// ring, or (diagnostics builds) a link owned by another ring. O(n).
    pub fn validate(&self) {
        let sentinel = self.sentinel();
        if !self.sentinel.is_linked() {
            if self.len != 0 {
                violated(Violation::CountMismatch);
            }
            return;
        }

        let mut count = 0;
        let mut cursor = sentinel;
        loop {
            // SAFETY: ring members are the sentinel and hosts borrowed for
            // `'a`.
            let link = unsafe { cursor.as_ref() };
            check!(link.owner() == Some(sentinel), Violation::ForeignRing);
            let next = unsafe { link.check_successor() };
            if next == sentinel {
                break;
            }
            count += 1;
            if count > self.len {
                violated(Violation::CountMismatch);
            }
            cursor = next;
        }
        if count != self.len {
            violated(Violation::CountMismatch);
        }
    }

    /// Wires the sentinel if this is the first time the list is pinned.
    fn ring(self: Pin<&mut Self>) -> &mut Self {
        // SAFETY: nothing is moved out of the list.
        let this = unsafe { self.get_unchecked_mut() };
        this.sentinel.init_sentinel();
        this
    }

    #[inline]
    pub(crate) fn sentinel(&self) -> NonNull<Link> {
        self.sentinel.as_ptr()
    }

    /// The first link, or the sentinel if the list is empty.
    #[inline]
    pub(crate) fn head(&self) -> NonNull<Link> {
        self.successor(self.sentinel())
    }

    /// The last link, or the sentinel if the list is empty.
    #[inline]
    pub(crate) fn tail(&self) -> NonNull<Link> {
        self.predecessor(self.sentinel())
    }

    /// The link after `link`. An unwired sentinel is its own successor.
    ///
    /// `link` must be the sentinel or a link in this ring.
    #[inline]
    pub(crate) fn successor(&self, link: NonNull<Link>) -> NonNull<Link> {
        if link == self.sentinel() && !self.sentinel.is_linked() {
            return link;
        }
        // SAFETY: ring members are the sentinel and hosts borrowed for `'a`.
        unsafe { link.as_ref() }.next()
    }

    /// The link before `link`. An unwired sentinel is its own predecessor.
    ///
    /// `link` must be the sentinel or a link in this ring.
    #[inline]
    pub(crate) fn predecessor(&self, link: NonNull<Link>) -> NonNull<Link> {
        if link == self.sentinel() && !self.sentinel.is_linked() {
            return link;
        }
        // SAFETY: as in `successor`.
        unsafe { link.as_ref() }.prev()
    }

    /// The ring address of `host`'s link, carrying the whole host's
    /// provenance.
    #[inline]
    fn link_ptr(host: &H) -> NonNull<Link> {
        // SAFETY: `host` is a live reference.
        unsafe { B::link_ptr(NonNull::from(host)) }
    }

    /// Projects a ring position to its host. The sentinel has none.
    ///
    /// Every projection of the list goes through here or through `unlink`,
    /// which both keep the sentinel away from `B::host_of`.
    #[inline]
    pub(crate) fn host(&self, link: NonNull<Link>) -> Option<&'a H> {
        if link == self.sentinel() {
            return None;
        }
        // SAFETY: every non-sentinel link of the ring was stored by
        // `link_before` from `B::link_ptr` of a host borrowed for `'a`.
        Some(unsafe { B::host_of(link).as_ref() })
    }

    /// Links `host` right before `pos`, which must be in this wired ring.
    pub(crate) fn link_before(&mut self, pos: NonNull<Link>, host: &'a H) {
        let link = Self::link_ptr(host);
        // SAFETY: `pos` is in this ring, whose sentinel is pinned and whose
        // hosts are borrowed for `'a`, as `host` now is.
        unsafe { Link::insert_before(link, pos) };
        check!(
            unsafe { B::host_of(link) } == NonNull::from(host),
            Violation::BrokenRing
        );
        self.len += 1;
    }

    /// Unlinks the host at `pos` and returns it.
    pub(crate) fn unlink(&mut self, pos: NonNull<Link>) -> &'a H {
        if pos == self.sentinel() {
            violated(Violation::Sentinel);
        }
        // SAFETY: `pos` is a host link taken from the ring or from
        // `link_ptr`, and hosts outlive `'a`.
        let link = unsafe { pos.as_ref() };
        check!(
            !link.is_linked() || link.owner() == Some(self.sentinel()),
            Violation::ForeignRing
        );
        let host = unsafe { B::host_of(pos).as_ref() };
        // SAFETY: the neighbours are this ring's sentinel or its hosts.
        unsafe { link.remove() };
        check!(self.len > 0, Violation::CountMismatch);
        self.len -= 1;
        host
    }
}

impl<H, B> Default for LinkedList<'_, H, B>
where
    B: Bridge<Host = H>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<H, B> Drop for LinkedList<'_, H, B>
where
    B: Bridge<Host = H>,
{
    fn drop(&mut self) {
        // SAFETY: the hosts are borrowed for `'a`, which outlives the list.
        let released = unsafe { self.sentinel.unlink_ring() };
        if released > 0 {
            log::debug!("dropped a list still holding {released} hosts");
        }
    }
}

impl<'l, 'a, H, B> IntoIterator for &'l LinkedList<'a, H, B>
where
    B: Bridge<Host = H>,
{
    type Item = &'a H;
    type IntoIter = Iter<'l, 'a, H, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<H, B> fmt::Debug for LinkedList<'_, H, B>
where
    H: fmt::Debug,
    B: Bridge<Host = H>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
