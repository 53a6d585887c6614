//! This module is for testing only

use std::cell::RefCell;
use std::rc::Rc;

/// Shared record of which tracked values were dropped, in drop order.
#[derive(Clone, Default)]
pub struct DropCounter {
    dropped: Rc<RefCell<Vec<i32>>>,
}

impl DropCounter {
    pub fn drops(&self) -> usize {
        self.dropped.borrow().len()
    }

    pub fn dropped_values(&self) -> Vec<i32> {
        self.dropped.borrow().clone()
    }
}

/// A value that reports its own drop to a `DropCounter`.
#[derive(Debug)]
pub struct Tracked {
    pub value: i32,
    dropped: Rc<RefCell<Vec<i32>>>,
}

impl Tracked {
    pub fn new(value: i32, counter: &DropCounter) -> Tracked {
        Tracked {
            value,
            dropped: counter.dropped.clone(),
        }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Tracked {
        Tracked {
            value: self.value,
            dropped: self.dropped.clone(),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.dropped.borrow_mut().push(self.value);
    }
}

/// Like `Tracked`, but panics after reporting its drop when `armed`.
pub struct Bomb {
    pub value: i32,
    armed: bool,
    dropped: Rc<RefCell<Vec<i32>>>,
}

impl Bomb {
    pub fn new(value: i32, counter: &DropCounter) -> Bomb {
        Bomb { value, armed: false, dropped: counter.dropped.clone() }
    }

    pub fn armed(value: i32, counter: &DropCounter) -> Bomb {
        Bomb { value, armed: true, dropped: counter.dropped.clone() }
    }
}

impl Drop for Bomb {
    fn drop(&mut self) {
        self.dropped.borrow_mut().push(self.value);
        if self.armed {
            panic!("bomb {} went off", self.value);
        }
    }
}

impl DropCounter {
    /// True if no value was reported dropped more than once.
    pub fn no_double_drops(&self) -> bool {
        let mut seen = self.dropped_values();
        let total = seen.len();
        seen.sort();
        seen.dedup();
        seen.len() == total
    }
}

/// Compares tracked values by payload only.
pub fn tracked_cmp(a: &Tracked, b: &Tracked) -> std::cmp::Ordering {
    a.value.cmp(&b.value)
}

#[test]
fn dropflag() {
    let counter = DropCounter::default();
    let tracked = Tracked::new(5, &counter);
    assert_eq!(0, counter.drops());
    std::mem::drop(tracked);
    assert_eq!(vec![5], counter.dropped_values());
}
