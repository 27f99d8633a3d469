//! An intrusive linked list implementation.
//!
//! In an intrusive linked list, the links are stored directly in the data
//! structure that is being linked. A host type reserves one [`Link`] field
//! per list it can belong to, and the list only wires those fields together.
//! Nothing is allocated when a host joins or leaves a list.
//!
//! The list is a ring closed by a sentinel link owned by the list itself,
//! which is why a [`LinkedList`] must be pinned before it is modified.
//!
//! # Embedding contract
//!
//! - A field named `link` of type [`Link`] is the host's default membership,
//!   used by `LinkedList<'_, Host>`.
//! - Every further membership is another [`Link`] field paired with its own
//!   [`Bridge`] type, used by `LinkedList<'_, Host, ThatBridge>`.
//! - `#[derive(Linked)]` writes both for you. Hand-written impls project
//!   host pointers onto links with `&raw mut`, never through a reference,
//!   and back with [`container_of`] and `core::mem::offset_of!`.
//! - A host is borrowed by every list it is in, so it cannot move or be
//!   dropped while linked.
//!
//! # Examples
//!
//! ```
//! use core::pin::pin;
//! use intrusive_ring::{Link, Linked, LinkedList};
//!
//! #[derive(Linked)]
//! struct Page {
//!     id: u32,
//!     link: Link,
//!     #[linked(bridge = "DirtyBridge")]
//!     dirty: Link,
//! }
//!
//! impl Page {
//!     fn new(id: u32) -> Self {
//!         Self { id, link: Link::new(), dirty: Link::new() }
//!     }
//! }
//!
//! let (a, b, c) = (Page::new(1), Page::new(2), Page::new(3));
//!
//! let mut lru = pin!(LinkedList::<Page>::new());
//! let mut dirty = pin!(LinkedList::<Page, DirtyBridge>::new());
//!
//! lru.as_mut().push_back(&a);
//! lru.as_mut().push_back(&b);
//! lru.as_mut().push_front(&c);
//! dirty.as_mut().push_back(&b);
//!
//! let ids: Vec<u32> = lru.iter().map(|page| page.id).collect();
//! assert_eq!(ids, [3, 1, 2]);
//!
//! // Leaving one list does not disturb the other membership.
//! unsafe { lru.as_mut().remove(&b) };
//! assert_eq!(lru.len(), 2);
//! assert_eq!(dirty.front().map(|page| page.id), Some(2));
//! ```
//!
//! [`Link`]: intrusive::link::Link
//! [`LinkedList`]: intrusive::list::LinkedList
//! [`Bridge`]: intrusive::bridge::Bridge
//! [`container_of`]: intrusive::bridge::container_of
pub mod intrusive;
