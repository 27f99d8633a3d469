//! Host-to-link projections.

use core::{marker::PhantomData, ptr::NonNull};

use super::link::Link;

/// Projection between a host and one of its embedded [`Link`]s.
///
/// A list is parameterized by a bridge, which names the host type and the
/// field that list uses. Hosts that belong to several lists at once embed
/// one link per list and provide one bridge per link.
///
/// Most bridges are generated by `#[derive(Linked)]`. A hand-written one
/// looks like this:
///
/// ```
/// use core::{mem::offset_of, ptr::NonNull};
/// use intrusive_ring::{container_of, Bridge, Link};
///
/// struct Waiter {
///     token: u64,
///     queue: Link,
/// }
///
/// struct QueueBridge;
///
/// unsafe impl Bridge for QueueBridge {
///     type Host = Waiter;
///
///     fn link_of(host: &Waiter) -> &Link {
///         &host.queue
///     }
///
///     unsafe fn link_ptr(host: NonNull<Waiter>) -> NonNull<Link> {
///         unsafe { NonNull::new_unchecked(&raw mut (*host.as_ptr()).queue) }
///     }
///
///     unsafe fn host_of(link: NonNull<Link>) -> NonNull<Waiter> {
///         unsafe { container_of(link, offset_of!(Waiter, queue)) }
///     }
/// }
/// ```
///
/// # Safety
///
/// `link_of` must return a link stored inside the host itself, and always
/// the same one. `link_ptr` must project to that same link without going
/// through a reference. `host_of` must be their exact inverse: for every
/// host `h`, `host_of(link_ptr(h))` points to `h`.
pub unsafe trait Bridge {
    /// The type embedding the link.
    type Host;

    /// Returns the host's link for this bridge's list.
    fn link_of(host: &Self::Host) -> &Link;

    /// Projects a pointer to a host onto its link for this bridge's list.
    ///
    /// The list keeps the result in the ring. Unlike a pointer taken from
    /// [`Bridge::link_of`], it may be used to reach the whole host again.
    ///
    /// # Safety
    ///
    /// `host` must point to a live host.
    unsafe fn link_ptr(host: NonNull<Self::Host>) -> NonNull<Link>;

    /// Recovers the host from the address of its link.
    ///
    /// # Safety
    ///
    /// `link` must have been obtained from [`Bridge::link_ptr`] on a live
    /// host. A list's sentinel has no host and must never be passed here.
    unsafe fn host_of(link: NonNull<Link>) -> NonNull<Self::Host>;
}

/// The default list membership of a host type.
///
/// By convention the link lives in a field named `link`. Implement this
/// with `#[derive(Linked)]`; [`DefaultBridge`] turns it into a [`Bridge`].
///
/// # Safety
///
/// Same contract as [`Bridge`]: `link_ptr` must project to the field `link`
/// returns, and `from_link` must invert it.
pub unsafe trait Linked: Sized {
    /// Returns the host's default link.
    fn link(&self) -> &Link;

    /// Projects a pointer to a host onto its default link.
    ///
    /// # Safety
    ///
    /// `this` must point to a live host.
    unsafe fn link_ptr(this: NonNull<Self>) -> NonNull<Link>;

    /// Recovers the host from the address of its default link.
    ///
    /// # Safety
    ///
    /// `link` must have been obtained from [`Linked::link_ptr`] on a live
    /// host.
    unsafe fn from_link(link: NonNull<Link>) -> NonNull<Self>;
}

/// Bridge over a host's default membership.
///
/// This is the bridge a `LinkedList<'_, H>` uses when none is named.
pub struct DefaultBridge<H>(PhantomData<fn() -> H>);

unsafe impl<H: Linked> Bridge for DefaultBridge<H> {
    type Host = H;

    #[inline]
    fn link_of(host: &H) -> &Link {
        host.link()
    }

    #[inline]
    unsafe fn link_ptr(host: NonNull<H>) -> NonNull<Link> {
        unsafe { H::link_ptr(host) }
    }

    #[inline]
    unsafe fn host_of(link: NonNull<Link>) -> NonNull<H> {
        unsafe { H::from_link(link) }
    }
}

/// Recovers a host from the address of a link embedded `offset` bytes into
/// it.
///
/// `offset` is what `core::mem::offset_of!(Host, field)` reports for the
/// link's field.
///
/// # Safety
///
/// `link` must point to a link field that really sits `offset` bytes into a
/// live `H`, and must have been derived from a pointer to that whole `H`
/// (as [`Bridge::link_ptr`] does) for the result to be dereferenceable.
#[inline]
pub unsafe fn container_of<H>(link: NonNull<Link>, offset: usize) -> NonNull<H> {
    unsafe { link.byte_sub(offset).cast() }
}
