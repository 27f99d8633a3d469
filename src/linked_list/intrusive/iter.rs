//! Iteration and cursors.

use core::{fmt, iter::FusedIterator, ptr::NonNull};

#[cfg_attr(not(diagnostics), allow(unused_imports))]
use super::diagnostics::{check, Violation};
use super::{bridge::Bridge, link::Link, list::LinkedList};

/// An iterator over the hosts of a [`LinkedList`], front to back.
pub struct Iter<'l, 'a, H, B>
where
    B: Bridge<Host = H>,
{
    list: &'l LinkedList<'a, H, B>,
    head: NonNull<Link>,
    tail: NonNull<Link>,
    remaining: usize,
}

impl<'l, 'a, H, B> Iter<'l, 'a, H, B>
where
    B: Bridge<Host = H>,
{
    pub(crate) fn new(list: &'l LinkedList<'a, H, B>) -> Self {
        Self {
            head: list.head(),
            tail: list.tail(),
            remaining: list.len(),
            list,
        }
    }
}

impl<'a, H, B> Iterator for Iter<'_, 'a, H, B>
where
    B: Bridge<Host = H>,
{
    type Item = &'a H;

    #[inline]
    fn next(&mut self) -> Option<&'a H> {
        if self.remaining == 0 {
            return None;
        }
        let host = self.list.host(self.head)?;
        self.head = self.list.successor(self.head);
        self.remaining -= 1;
        Some(host)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, H, B> DoubleEndedIterator for Iter<'_, 'a, H, B>
where
    B: Bridge<Host = H>,
{
    #[inline]
    fn next_back(&mut self) -> Option<&'a H> {
        if self.remaining == 0 {
            return None;
        }
        let host = self.list.host(self.tail)?;
        self.tail = self.list.predecessor(self.tail);
        self.remaining -= 1;
        Some(host)
    }
}

impl<H, B> ExactSizeIterator for Iter<'_, '_, H, B> where B: Bridge<Host = H> {}

impl<H, B> FusedIterator for Iter<'_, '_, H, B> where B: Bridge<Host = H> {}

impl<H, B> Clone for Iter<'_, '_, H, B>
where
    B: Bridge<Host = H>,
{
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

/// A read-only position in a [`LinkedList`].
///
/// A cursor rests either on a host or on the end position, one past the last
/// host. Moving forward from the last host reaches the end; moving past the
/// end, or backwards from the first host, breaks the list contract.
pub struct Cursor<'l, 'a, H, B>
where
    B: Bridge<Host = H>,
{
    list: &'l LinkedList<'a, H, B>,
    current: NonNull<Link>,
}

impl<'l, 'a, H, B> Cursor<'l, 'a, H, B>
where
    B: Bridge<Host = H>,
{
    pub(crate) fn new(list: &'l LinkedList<'a, H, B>, current: NonNull<Link>) -> Self {
        Self { list, current }
    }

    /// Returns the host under the cursor, or `None` at the end.
    #[inline]
    pub fn current(&self) -> Option<&'a H> {
        self.list.host(self.current)
    }

    /// Returns `true` at the end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.current == self.list.sentinel()
    }

    /// Moves to the next position.
    #[inline]
    pub fn move_next(&mut self) {
        check!(!self.is_end(), Violation::PastEnd);
        self.current = self.list.successor(self.current);
    }

    /// Moves to the previous position.
    #[inline]
    pub fn move_prev(&mut self) {
        let prev = self.list.predecessor(self.current);
        check!(prev != self.list.sentinel(), Violation::BeforeBegin);
        self.current = prev;
    }

    /// Returns the host after the cursor. At the end this is the first host.
    #[inline]
    pub fn peek_next(&self) -> Option<&'a H> {
        self.list.host(self.list.successor(self.current))
    }

    /// Returns the host before the cursor.
    #[inline]
    pub fn peek_prev(&self) -> Option<&'a H> {
        self.list.host(self.list.predecessor(self.current))
    }
}

impl<H, B> Clone for Cursor<'_, '_, H, B>
where
    B: Bridge<Host = H>,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<H, B> Copy for Cursor<'_, '_, H, B> where B: Bridge<Host = H> {}

/// Cursors are equal when they rest on the same link.
impl<H, B> PartialEq for Cursor<'_, '_, H, B>
where
    B: Bridge<Host = H>,
{
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current
    }
}

impl<H, B> Eq for Cursor<'_, '_, H, B> where B: Bridge<Host = H> {}

impl<H, B> fmt::Debug for Cursor<'_, '_, H, B>
where
    H: fmt::Debug,
    B: Bridge<Host = H>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.current()).finish()
    }
}

/// A position in a [`LinkedList`] that can insert and remove hosts.
///
/// The cursor stays valid across everything it does: inserting keeps it on
/// the same host, and removing the current host moves it to the next
/// position.
pub struct CursorMut<'l, 'a, H, B>
where
    B: Bridge<Host = H>,
{
    list: &'l mut LinkedList<'a, H, B>,
    current: NonNull<Link>,
}

impl<'l, 'a, H, B> CursorMut<'l, 'a, H, B>
where
    B: Bridge<Host = H>,
{
    /// `list` must come from a pinned list whose sentinel is wired.
    pub(crate) fn new(list: &'l mut LinkedList<'a, H, B>, current: NonNull<Link>) -> Self {
        Self { list, current }
    }

    /// Returns the host under the cursor, or `None` at the end.
    #[inline]
    pub fn current(&self) -> Option<&'a H> {
        self.list.host(self.current)
    }

    /// Returns `true` at the end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.current == self.list.sentinel()
    }

    /// Moves to the next position.
    #[inline]
    pub fn move_next(&mut self) {
        check!(!self.is_end(), Violation::PastEnd);
        self.current = self.list.successor(self.current);
    }

    /// Moves to the previous position.
    #[inline]
    pub fn move_prev(&mut self) {
        let prev = self.list.predecessor(self.current);
        check!(prev != self.list.sentinel(), Violation::BeforeBegin);
        self.current = prev;
    }

    /// Returns the host after the cursor. At the end this is the first host.
    #[inline]
    pub fn peek_next(&self) -> Option<&'a H> {
        self.list.host(self.list.successor(self.current))
    }

    /// Returns the host before the cursor.
    #[inline]
    pub fn peek_prev(&self) -> Option<&'a H> {
        self.list.host(self.list.predecessor(self.current))
    }

    /// Returns a read-only cursor at the same position.
    #[inline]
    pub fn as_cursor(&self) -> Cursor<'_, 'a, H, B> {
        Cursor::new(self.list, self.current)
    }

    /// Returns the number of hosts in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the list holds no host.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Links `host` right before the cursor. At the end this appends.
    ///
    /// # Panics
    ///
    /// Panics if the host's link is already in a list.
    #[inline]
    pub fn insert_before(&mut self, host: &'a H) {
        self.list.link_before(self.current, host);
    }

    /// Links `host` right after the cursor. At the end this prepends.
    ///
    /// # Panics
    ///
    /// Panics if the host's link is already in a list.
    #[inline]
    pub fn insert_after(&mut self, host: &'a H) {
        let next = self.list.successor(self.current);
        self.list.link_before(next, host);
    }

    /// Unlinks the host under the cursor and moves to the next position.
    ///
    /// Returns `None`, and does nothing, at the end.
    pub fn remove_current(&mut self) -> Option<&'a H> {
        if self.is_end() {
            return None;
        }
        let next = self.list.successor(self.current);
        let host = self.list.unlink(self.current);
        self.current = next;
        Some(host)
    }
}
