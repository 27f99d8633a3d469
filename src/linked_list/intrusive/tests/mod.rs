extern crate std;

use core::{array, fmt};
use std::vec::Vec;

use crate::linked_list::intrusive::{bridge::Bridge, link::Link, list::LinkedList};
use crate::Linked;

mod cursor;

/// A host in two lists at once: a pool list through `link` and a
/// transaction list through `tx_link`.
#[derive(Linked)]
#[linked(crate_path = "crate")]
struct Page {
    id: u32,
    link: Link,
    #[linked(bridge = "TxBridge")]
    tx_link: Link,
}

impl Page {
    fn new(id: u32) -> Self {
        Self {
            id,
            link: Link::new(),
            tx_link: Link::new(),
        }
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page({})", self.id)
    }
}

fn pages<const N: usize>() -> [Page; N] {
    array::from_fn(|i| Page::new(i as u32))
}

fn ids<B>(list: &LinkedList<'_, Page, B>) -> Vec<u32>
where
    B: Bridge<Host = Page>,
{
    list.iter().map(|page| page.id).collect()
}
