//! Allocation-free intrusive lists for hot-path resource management.
//!
//! Hosts embed the list links themselves, so free lists, LRU chains and wait
//! queues can be maintained without a single allocation per element. See
//! [`linked_list`] for the embedding contract and a worked example.
#![no_std]
#![warn(missing_docs)]

extern crate static_assertions as sa;

pub mod linked_list;

pub use intrusive_ring_derive::Linked;
pub use linked_list::intrusive::{
    bridge::{container_of, Bridge, DefaultBridge, Linked},
    diagnostics::Violation,
    iter::{Cursor, CursorMut, Iter},
    link::Link,
    list::LinkedList,
};
