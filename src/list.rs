use std::cmp::Ordering;
use std::marker::PhantomData;
use std::ptr::NonNull;

struct Node<T> where T: Sized {
    value: T,
    next: Option<NonNull<Node<T>>>,
}

impl<T> Node<T> where T: Sized {
    fn boxed(value: T, next: Option<NonNull<Node<T>>>) -> NonNull<Node<T>> {
        let node = Box::new(Node { value, next });
        // Box::into_raw never returns null
        unsafe { NonNull::new_unchecked(Box::into_raw(node)) }
    }
}

/// Singly-linked list.
///
/// Each node owns its value and the link to the next node, the list owns the head
/// and so, transitively, the whole chain. A tail link keeps `push_back` O(1);
/// positional access walks from the head.
// don't derive Clone, the node pointers are owned
pub struct List<T> where T: Sized {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    len: usize,
    _owns: PhantomData<Box<Node<T>>>,
}

// Nodes are owned outright, so the list is as thread-safe as its elements.
unsafe impl<T> Send for List<T> where T: Send {}
unsafe impl<T> Sync for List<T> where T: Sync {}

impl<T> List<T> where T: Sized {
    pub fn new() -> List<T> {
        List {
            head: None,
            tail: None,
            len: 0,
            _owns: PhantomData,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Node at `pos`; `pos < len` is checked by the callers.
    fn node_at(&self, pos: usize) -> NonNull<Node<T>> {
        let mut current = self.head;
        for _ in 0..pos {
            current = current.and_then(|node| unsafe { node.as_ref() }.next);
        }
        match current {
            Some(node) => node,
            None => unreachable!("list shorter than its length"),
        }
    }

    #[track_caller]
    fn check_index(&self, pos: usize) {
        assert!(pos < self.len, "index {} out of bounds for list of size {}", pos, self.len);
    }

    #[track_caller]
    pub fn get(&self, pos: usize) -> &T {
        self.check_index(pos);
        unsafe { &(*self.node_at(pos).as_ptr()).value }
    }

    #[track_caller]
    pub fn get_mut(&mut self, pos: usize) -> &mut T {
        self.check_index(pos);
        unsafe { &mut (*self.node_at(pos).as_ptr()).value }
    }

    /// Replaces the value at `pos`, dropping the previous one.
    #[track_caller]
    pub fn set(&mut self, pos: usize, value: T) {
        *self.get_mut(pos) = value;
    }

    pub fn push_back(&mut self, value: T) {
        let node = Node::boxed(value, None);
        match self.tail {
            None => self.head = Some(node),
            Some(tail) => unsafe { (*tail.as_ptr()).next = Some(node) },
        }
        self.tail = Some(node);
        self.len += 1;
    }

    pub fn push_front(&mut self, value: T) {
        let node = Node::boxed(value, self.head);
        self.head = Some(node);
        if self.tail.is_none() {
            self.tail = Some(node);
        }
        self.len += 1;
    }

    /// Inserts `value` so that it ends up at `pos`; `pos == len()` appends.
    #[track_caller]
    pub fn insert(&mut self, pos: usize, value: T) {
        assert!(pos <= self.len, "insert position {} is past the end of list of size {}", pos, self.len);
        if pos == 0 {
            self.push_front(value);
        } else if pos == self.len {
            self.push_back(value);
        } else {
            let previous = self.node_at(pos - 1);
            unsafe {
                let node = Node::boxed(value, (*previous.as_ptr()).next);
                (*previous.as_ptr()).next = Some(node);
            }
            self.len += 1;
        }
    }

    #[track_caller]
    pub fn pop_front(&mut self) -> T {
        let head = match self.head {
            Some(head) => head,
            None => panic!("pop_front on an empty list"),
        };
        let node = unsafe { Box::from_raw(head.as_ptr()) };
        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.len -= 1;
        node.value
    }

    /// Removes the last value. O(n): the new tail is found by walking from the head.
    #[track_caller]
    pub fn pop_back(&mut self) -> T {
        assert!(!self.is_empty(), "pop_back on an empty list");
        if self.len == 1 {
            return self.pop_front();
        }
        let previous = self.node_at(self.len - 2);
        let last = unsafe { (*previous.as_ptr()).next.take() };
        self.tail = Some(previous);
        self.len -= 1;
        match last {
            Some(last) => {
                let node = unsafe { Box::from_raw(last.as_ptr()) };
                node.value
            }
            None => unreachable!("tail predecessor without a successor"),
        }
    }

    /// Drops the value at `pos` and unlinks its node.
    #[track_caller]
    pub fn erase(&mut self, pos: usize) {
        self.check_index(pos);
        if pos == 0 {
            std::mem::drop(self.pop_front());
            return;
        }
        let previous = self.node_at(pos - 1);
        let node = unsafe {
            let target = match (*previous.as_ptr()).next {
                Some(target) => target,
                None => unreachable!("list shorter than its length"),
            };
            Box::from_raw(target.as_ptr())
        };
        unsafe { (*previous.as_ptr()).next = node.next };
        if node.next.is_none() {
            self.tail = Some(previous);
        }
        self.len -= 1;
        std::mem::drop(node);
    }

    /// Drops every value, front to back.
    pub fn clear(&mut self) {
        while let Some(head) = self.head {
            let node = unsafe { Box::from_raw(head.as_ptr()) };
            self.head = node.next;
            self.len -= 1;
            std::mem::drop(node);
        }
        self.tail = None;
    }

    /// Index of the first value equal to `value` under `cmp`.
    pub fn linear_search(&self, value: &T, mut cmp: impl FnMut(&T, &T) -> Ordering) -> Option<usize> {
        self.iter().position(|item| cmp(item, value) == Ordering::Equal)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            current: self.head,
            len: self.len,
            _borrow: PhantomData,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            current: self.head,
            len: self.len,
            _borrow: PhantomData,
        }
    }
}

impl<T> Drop for List<T> where T: Sized {
    fn drop(&mut self) {
        trace!("drop list of {} nodes", self.len);
        self.clear();
    }
}

impl<T> Default for List<T> {
    fn default() -> List<T> {
        List::new()
    }
}

impl<T> std::iter::FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item=T>>(iter: I) -> List<T> {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item=T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Renders the chain as `[a -> b -> c]`.
impl<T> std::fmt::Debug for List<T> where T: std::fmt::Debug, T: Sized {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{:?}", item)?;
        }
        write!(f, "]")
    }
}

pub struct Iter<'a, K> {
    current: Option<NonNull<Node<K>>>,
    len: usize,
    _borrow: PhantomData<&'a K>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.current.map(|node| {
            let node = unsafe { &*node.as_ptr() };
            self.current = node.next;
            self.len -= 1;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, K> ExactSizeIterator for Iter<'a, K> {}

pub struct IterMut<'a, K> {
    current: Option<NonNull<Node<K>>>,
    len: usize,
    _borrow: PhantomData<&'a mut K>,
}

impl<'a, K> Iterator for IterMut<'a, K> {
    type Item = &'a mut K;

    fn next(&mut self) -> Option<&'a mut K> {
        self.current.map(|node| {
            let node = unsafe { &mut *node.as_ptr() };
            self.current = node.next;
            self.len -= 1;
            &mut node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, K> ExactSizeIterator for IterMut<'a, K> {}

#[cfg(test)]
mod list_tests {
    use crate::List;
    use crate::dropflag::{tracked_cmp, DropCounter, Tracked};
    use std::fmt::Debug;

    struct Compact<T> where T: Debug {
        value: T,
    }

    fn values(list: &List<i32>) -> Vec<i32> {
        list.iter().copied().collect()
    }

    #[test]
    fn simple_test() {
        let mut list = List::new();
        assert_eq!(0, list.len());
        assert!(list.is_empty());
        for i in 1..=5 {
            list.push_back(Compact { value: i });
            assert_eq!(i as usize, list.len());
        }
        for (i, item) in (1..=5).zip(list.iter()) {
            assert_eq!(i, item.value);
        }
        assert_eq!(5, list.iter().len());
    }

    #[test]
    fn many_items_test() {
        let mut list: List<usize> = (0..1000).collect();
        for item in list.iter_mut() {
            *item += 1;
        }
        for (i, item) in (1..=1000).zip(list.iter()) {
            assert_eq!(i, *item);
        }
    }

    #[test]
    fn push_front_and_back() {
        let mut list = List::new();
        list.push_front(2);
        list.push_back(3);
        list.push_front(1);
        assert_eq!(vec![1, 2, 3], values(&list));
        assert_eq!(3, *list.get(2));
    }

    #[test]
    fn insert_positions() {
        let mut list: List<i32> = vec![0, 2].into_iter().collect();
        list.insert(1, 1);
        list.insert(0, -1);
        list.insert(4, 3);
        assert_eq!(vec![-1, 0, 1, 2, 3], values(&list));
        list.push_back(4);
        assert_eq!(4, *list.get(5));
    }

    #[test]
    #[should_panic(expected = "past the end of list of size 1")]
    fn insert_beyond_len_panics() {
        let mut list: List<i32> = vec![0].into_iter().collect();
        list.insert(2, 1);
    }

    #[test]
    #[should_panic(expected = "index 3 out of bounds for list of size 3")]
    fn get_past_len_panics() {
        let list: List<i32> = (0..3).collect();
        list.get(3);
    }

    #[test]
    fn set_and_get_mut() {
        let mut list: List<i32> = (0..3).collect();
        list.set(1, 10);
        *list.get_mut(2) += 5;
        assert_eq!(vec![0, 10, 7], values(&list));
    }

    #[test]
    fn pops_from_both_ends() {
        let mut list: List<i32> = (0..4).collect();
        assert_eq!(3, list.pop_back());
        assert_eq!(0, list.pop_front());
        assert_eq!(2, list.pop_back());
        assert_eq!(1, list.pop_back());
        assert!(list.is_empty());
        list.push_back(9);
        assert_eq!(vec![9], values(&list));
        assert_eq!(9, list.pop_front());
        list.push_front(8);
        assert_eq!(8, list.pop_back());
    }

    #[test]
    #[should_panic(expected = "pop_front on an empty list")]
    fn pop_front_empty_panics() {
        List::<u8>::new().pop_front();
    }

    #[test]
    #[should_panic(expected = "pop_back on an empty list")]
    fn pop_back_empty_panics() {
        List::<u8>::new().pop_back();
    }

    #[test]
    fn erase_relinks_and_keeps_tail() {
        let mut list: List<i32> = (0..5).collect();
        list.erase(4);
        list.push_back(40);
        list.erase(0);
        list.erase(1);
        assert_eq!(vec![1, 3, 40], values(&list));
        assert_eq!(3, list.len());
    }

    #[test]
    fn erase_and_clear_drop_values() {
        let counter = DropCounter::default();
        let mut list: List<Tracked> = (0..4).map(|i| Tracked::new(i, &counter)).collect();
        list.erase(2);
        assert_eq!(vec![2], counter.dropped_values());
        let popped = list.pop_front();
        assert_eq!(1, counter.drops());
        list.clear();
        assert_eq!(vec![2, 1, 3], counter.dropped_values());
        assert!(list.is_empty());
        list.push_back(Tracked::new(9, &counter));
        drop(list);
        drop(popped);
        assert_eq!(vec![2, 1, 3, 9, 0], counter.dropped_values());
    }

    #[test]
    fn search() {
        let counter = DropCounter::default();
        let list: List<Tracked> = vec![5, 7, 5].into_iter().map(|i| Tracked::new(i, &counter)).collect();
        assert_eq!(Some(0), list.linear_search(&Tracked::new(5, &counter), tracked_cmp));
        assert_eq!(Some(1), list.linear_search(&Tracked::new(7, &counter), tracked_cmp));
        assert_eq!(None, list.linear_search(&Tracked::new(6, &counter), tracked_cmp));
    }

    #[test]
    fn debug_renders_chain() {
        let list: List<i32> = (1..4).collect();
        assert_eq!("[1 -> 2 -> 3]", format!("{:?}", list));
        assert_eq!("[]", format!("{:?}", List::<i32>::default()));
    }

    #[test]
    fn long_list_drops_without_recursion() {
        let list: List<u32> = (0..200_000).collect();
        assert_eq!(200_000, list.len());
        drop(list);
    }

    #[test]
    fn moves_between_threads() {
        fn assert_send_sync<S: Send + Sync>() {}
        assert_send_sync::<List<String>>();

        let list: List<u64> = (1..=10).collect();
        let sum = std::thread::spawn(move || list.iter().sum::<u64>()).join().unwrap();
        assert_eq!(55, sum);
    }
}
