//! # Intrusive Linked List
//!
//! This module provides a sentinel-closed, doubly linked intrusive ring.
//!
//! ## Core Components
//!
//! - [`link::Link`]: the forward/back pair a host embeds per membership.
//! - [`bridge`]: projection between a host and its embedded link
//!   ([`bridge::Bridge`], [`bridge::Linked`]).
//! - [`list::LinkedList`]: owns the sentinel and the element count.
//! - [`iter`]: iterators and cursors over the hosts of a list.
//! - [`diagnostics`]: the contract-violation taxonomy and the optional
//!   owner-tracking checks.
//!
//! ## Safety
//!
//! The safe API relies on a few structural guarantees:
//!
//! - A list is pinned before it is modified, so the sentinel never moves
//!   while links point at it.
//! - Hosts are borrowed for the list's host lifetime, so they outlive their
//!   membership and cannot move while linked.
//! - A link that is already in a ring is never linked again. This is checked
//!   in every build.
//! - A list that is dropped while non-empty unlinks its remaining hosts.
//!
//! Removing a host by reference ([`list::LinkedList::remove`]) is `unsafe`:
//! the caller vouches that the host is in that list. Diagnostics builds
//! check the claim.

pub mod bridge;
pub mod diagnostics;
pub mod iter;
pub mod link;
pub mod list;

#[cfg(test)]
mod tests;
