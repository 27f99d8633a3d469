extern crate std;

use core::pin::pin;
use std::{format, vec::Vec};

use super::{ids, pages, Page};
use crate::linked_list::intrusive::list::LinkedList;

#[test]
fn test_cursor_walks_both_ways() {
    let hosts: [Page; 3] = pages();
    let mut list = pin!(LinkedList::<Page>::new());
    for page in &hosts {
        list.as_mut().push_back(page);
    }

    let mut cursor = list.cursor_front();
    let mut forward = Vec::new();
    while let Some(page) = cursor.current() {
        forward.push(page.id);
        cursor.move_next();
    }
    assert_eq!(forward, [0, 1, 2]);
    assert!(cursor.is_end());
    assert_eq!(cursor, list.cursor_end());

    let mut backward = Vec::new();
    let mut cursor = list.cursor_end();
    for _ in 0..list.len() {
        cursor.move_prev();
        backward.push(cursor.current().unwrap().id);
    }
    assert_eq!(backward, [2, 1, 0]);
    assert_eq!(cursor, list.cursor_front());
}

#[test]
fn test_cursor_back_is_last_host() {
    let hosts: [Page; 2] = pages();
    let mut list = pin!(LinkedList::<Page>::new());
    for page in &hosts {
        list.as_mut().push_back(page);
    }

    let mut cursor = list.cursor_back();
    assert_eq!(cursor.current().map(|p| p.id), Some(1));
    cursor.move_next();
    assert!(cursor.is_end());
}

#[test]
fn test_cursors_on_empty_list_meet_at_end() {
    let list = LinkedList::<Page>::new();
    assert_eq!(list.cursor_front(), list.cursor_end());
    assert_eq!(list.cursor_back(), list.cursor_end());
    assert!(list.cursor_front().current().is_none());

    let mut list = pin!(LinkedList::<Page>::new());
    let cursor = list.as_mut().cursor_front_mut();
    assert!(cursor.is_end());
    assert!(cursor.is_empty());
    assert!(cursor.peek_next().is_none());
    assert!(cursor.peek_prev().is_none());
}

#[test]
fn test_cursor_copies_are_independent() {
    let hosts: [Page; 2] = pages();
    let mut list = pin!(LinkedList::<Page>::new());
    for page in &hosts {
        list.as_mut().push_back(page);
    }

    let first = list.cursor_front();
    let mut second = first;
    second.move_next();
    assert_ne!(first, second);
    assert_eq!(first.current().map(|p| p.id), Some(0));
    assert_eq!(second.current().map(|p| p.id), Some(1));
    assert_eq!(format!("{:?}", first), "Cursor(Some(Page(0)))");
    assert_eq!(format!("{:?}", list.cursor_end()), "Cursor(None)");
}

#[test]
fn test_peek_wraps_through_the_end() {
    let hosts: [Page; 3] = pages();
    let mut list = pin!(LinkedList::<Page>::new());
    for page in &hosts {
        list.as_mut().push_back(page);
    }

    let cursor = list.cursor_front();
    assert!(cursor.peek_prev().is_none());
    assert_eq!(cursor.peek_next().map(|p| p.id), Some(1));

    let end = list.cursor_end();
    assert_eq!(end.peek_next().map(|p| p.id), Some(0));
    assert_eq!(end.peek_prev().map(|p| p.id), Some(2));
}

#[test]
fn test_insert_before_keeps_position() {
    let [a, b, c] = pages();
    let mut list = pin!(LinkedList::<Page>::new());
    list.as_mut().push_back(&b);

    let mut cursor = list.as_mut().cursor_front_mut();
    cursor.insert_before(&a);
    assert_eq!(cursor.current().map(|p| p.id), Some(1));
    assert_eq!(cursor.peek_prev().map(|p| p.id), Some(0));

    cursor.insert_after(&c);
    assert_eq!(cursor.current().map(|p| p.id), Some(1));
    assert_eq!(cursor.len(), 3);

    assert_eq!(ids(&list), [0, 1, 2]);
    list.validate();
}

#[test]
fn test_insert_at_end() {
    let [a, b, c] = pages();
    let mut list = pin!(LinkedList::<Page>::new());
    list.as_mut().push_back(&b);

    let mut cursor = list.as_mut().cursor_end_mut();
    cursor.insert_before(&c);
    cursor.insert_after(&a);
    assert!(cursor.is_end());
    assert_eq!(cursor.as_cursor().peek_prev().map(|p| p.id), Some(2));

    assert_eq!(ids(&list), [0, 1, 2]);
    assert_eq!(list.len(), 3);
}

#[test]
fn test_remove_current_advances() {
    let hosts: [Page; 4] = pages();
    let mut list = pin!(LinkedList::<Page>::new());
    for page in &hosts {
        list.as_mut().push_back(page);
    }

    let mut cursor = list.as_mut().cursor_front_mut();
    cursor.move_next();
    assert_eq!(cursor.remove_current().map(|p| p.id), Some(1));
    assert_eq!(cursor.current().map(|p| p.id), Some(2));

    cursor.move_next();
    assert_eq!(cursor.remove_current().map(|p| p.id), Some(3));
    assert!(cursor.is_end());
    assert!(cursor.remove_current().is_none());
    assert_eq!(cursor.len(), 2);

    assert_eq!(ids(&list), [0, 2]);
    assert!(!hosts[1].link.is_linked());
    assert!(!hosts[3].link.is_linked());
    list.validate();
}

#[test]
fn test_remove_all_with_cursor() {
    let hosts: [Page; 5] = pages();
    let mut list = pin!(LinkedList::<Page>::new());
    for page in &hosts {
        list.as_mut().push_back(page);
    }

    let mut cursor = list.as_mut().cursor_front_mut();
    let mut removed = Vec::new();
    while let Some(page) = cursor.remove_current() {
        removed.push(page.id);
    }
    assert_eq!(removed, [0, 1, 2, 3, 4]);
    assert!(list.is_empty());
    assert!(hosts.iter().all(|page| !page.link.is_linked()));
}

#[test]
fn test_cursor_mut_from_host() {
    let hosts: [Page; 3] = pages();
    let mut list = pin!(LinkedList::<Page>::new());
    for page in &hosts {
        list.as_mut().push_back(page);
    }

    let mut cursor = unsafe { list.as_mut().cursor_mut_from_host(&hosts[1]) };
    assert_eq!(cursor.current().map(|p| p.id), Some(1));
    cursor.move_prev();
    assert_eq!(cursor.current().map(|p| p.id), Some(0));
}

#[test]
fn test_iter_both_ends() {
    let hosts: [Page; 4] = pages();
    let mut list = pin!(LinkedList::<Page>::new());
    for page in &hosts {
        list.as_mut().push_back(page);
    }

    let mut iter = list.iter();
    assert_eq!(iter.len(), 4);
    assert_eq!(iter.next().map(|p| p.id), Some(0));
    assert_eq!(iter.next_back().map(|p| p.id), Some(3));
    assert_eq!(iter.len(), 2);

    let rest = iter.clone();
    assert_eq!(iter.next().map(|p| p.id), Some(1));
    assert_eq!(iter.next_back().map(|p| p.id), Some(2));
    assert!(iter.next().is_none());
    assert!(iter.next_back().is_none());

    assert_eq!(rest.map(|p| p.id).collect::<Vec<_>>(), [1, 2]);
}

#[test]
#[should_panic(expected = "link is not in a list")]
fn test_cursor_mut_from_unlinked_host_panics() {
    let [a] = pages();
    let mut list = pin!(LinkedList::<Page>::new());
    let _ = unsafe { list.as_mut().cursor_mut_from_host(&a) };
}

#[test]
#[should_panic(expected = "sentinel has no host")]
fn test_remove_at_sentinel_panics() {
    let [a] = pages();
    let mut list = pin!(LinkedList::<Page>::new());
    list.as_mut().push_back(&a);
    let this = unsafe { list.as_mut().get_unchecked_mut() };
    let end = this.sentinel();
    this.unlink(end);
}

#[cfg(diagnostics)]
#[test]
#[should_panic(expected = "cursor moved past the end")]
fn test_move_past_end_panics() {
    let list = LinkedList::<Page>::new();
    let mut cursor = list.cursor_end();
    cursor.move_next();
}

#[cfg(diagnostics)]
#[test]
#[should_panic(expected = "cursor moved before the front")]
fn test_move_before_front_panics() {
    let [a] = pages();
    let mut list = pin!(LinkedList::<Page>::new());
    list.as_mut().push_back(&a);
    let mut cursor = list.as_mut().cursor_front_mut();
    cursor.move_prev();
}
