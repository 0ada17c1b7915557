//! A generic doubly-linked list with O(1) insertion and removal at both ends
//! and, through [`CursorMut`], at any already-located node.
//!
//! This is the engine's general-purpose sequence container; it does not
//! depend on the byte-string core. The classic pluggable callbacks of such
//! containers map onto capability bounds instead: duplication is `T: Clone`
//! (see [`List::clone`]), value release is `T`'s own [`Drop`], and matching
//! is `T: PartialEq` (see [`List::find`]).

use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;

struct Node<T> {
    next: Option<NonNull<Node<T>>>,
    prev: Option<NonNull<Node<T>>>,
    value: T,
}

/// A doubly-linked list.
///
/// # Examples
/// ```
/// use dynbytes::List;
///
/// let mut list: List<i32> = List::new();
/// list.push_back(2);
/// list.push_front(1);
/// list.push_back(3);
///
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
/// assert_eq!(list.iter().rev().next(), Some(&3));
/// ```
pub struct List<T> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    len: usize,
    marker: PhantomData<Box<Node<T>>>,
}

// SAFETY: a List owns its nodes outright; sending it sends the values
unsafe impl<T: Send> Send for List<T> {}
// SAFETY: &List only permits reads of the values
unsafe impl<T: Sync> Sync for List<T> {}

impl<T> List<T> {
    /// Creates an empty list. O(1), does not allocate.
    pub const fn new() -> Self {
        List {
            head: None,
            tail: None,
            len: 0,
            marker: PhantomData,
        }
    }

    /// Number of nodes. O(1).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Prepends `value`. O(1).
    pub fn push_front(&mut self, value: T) {
        let node = NonNull::from(Box::leak(Box::new(Node {
            next: self.head,
            prev: None,
            value,
        })));
        match self.head {
            // SAFETY: head is a live node owned by this list
            Some(mut head) => unsafe { head.as_mut().prev = Some(node) },
            None => self.tail = Some(node),
        }
        self.head = Some(node);
        self.len += 1;
    }

    /// Appends `value`. O(1).
    pub fn push_back(&mut self, value: T) {
        let node = NonNull::from(Box::leak(Box::new(Node {
            next: None,
            prev: self.tail,
            value,
        })));
        match self.tail {
            // SAFETY: tail is a live node owned by this list
            Some(mut tail) => unsafe { tail.as_mut().next = Some(node) },
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.len += 1;
    }

    /// Removes and returns the first value. O(1).
    pub fn pop_front(&mut self) -> Option<T> {
        self.head.map(|node| {
            // SAFETY: head was allocated via Box and is owned by this list
            let node = unsafe { Box::from_raw(node.as_ptr()) };
            self.head = node.next;
            match self.head {
                Some(mut head) => unsafe { head.as_mut().prev = None },
                None => self.tail = None,
            }
            self.len -= 1;
            node.value
        })
    }

    /// Removes and returns the last value. O(1).
    pub fn pop_back(&mut self) -> Option<T> {
        self.tail.map(|node| {
            // SAFETY: tail was allocated via Box and is owned by this list
            let node = unsafe { Box::from_raw(node.as_ptr()) };
            self.tail = node.prev;
            match self.tail {
                Some(mut tail) => unsafe { tail.as_mut().next = None },
                None => self.head = None,
            }
            self.len -= 1;
            node.value
        })
    }

    pub fn front(&self) -> Option<&T> {
        // SAFETY: head is live for as long as &self
        self.head.map(|node| unsafe { &node.as_ref().value })
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        // SAFETY: exclusive access through &mut self
        self.head.map(|mut node| unsafe { &mut node.as_mut().value })
    }

    pub fn back(&self) -> Option<&T> {
        // SAFETY: tail is live for as long as &self
        self.tail.map(|node| unsafe { &node.as_ref().value })
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        // SAFETY: exclusive access through &mut self
        self.tail.map(|mut node| unsafe { &mut node.as_mut().value })
    }

    /// Drops every node. O(n).
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Borrowing iterator from head to tail; reversible with
    /// [`Iterator::rev`] to walk tail to head.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            head: self.head,
            tail: self.tail,
            len: self.len,
            marker: PhantomData,
        }
    }

    /// Value at `index`, walking from the nearer end. O(n).
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        if index <= self.len / 2 {
            self.iter().nth(index)
        } else {
            self.iter().rev().nth(self.len - 1 - index)
        }
    }

    /// Index of the first node equal to `key`. O(n).
    pub fn find(&self, key: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|value| value == key)
    }

    /// Moves the tail node to the head, rotating the list by one. O(1), the
    /// value is not touched.
    pub fn rotate(&mut self) {
        if self.len < 2 {
            return;
        }
        let Some(node) = self.tail else { return };
        // SAFETY: node is owned by this list; unlink then relink at the head
        unsafe {
            self.unlink(node);
            (*node.as_ptr()).prev = None;
            (*node.as_ptr()).next = self.head;
            if let Some(mut head) = self.head {
                head.as_mut().prev = Some(node);
            }
            self.head = Some(node);
            if self.tail.is_none() {
                self.tail = Some(node);
            }
            self.len += 1;
        }
    }

    /// Splices all of `other`'s nodes onto the back of `self`, leaving
    /// `other` empty. O(1), no values are moved or cloned.
    pub fn append(&mut self, other: &mut Self) {
        match self.tail {
            None => {
                self.head = other.head.take();
                self.tail = other.tail.take();
            }
            Some(mut tail) => {
                if let Some(mut other_head) = other.head.take() {
                    // SAFETY: both nodes are live and now belong to self
                    unsafe {
                        tail.as_mut().next = Some(other_head);
                        other_head.as_mut().prev = Some(tail);
                    }
                    self.tail = other.tail.take();
                }
            }
        }
        self.len += mem::replace(&mut other.len, 0);
    }

    /// Cursor over the list starting at the head, able to remove and insert
    /// in O(1) at its current position.
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut {
            current: self.head,
            index: 0,
            list: self,
        }
    }

    /// Detaches `node` from its neighbors without dropping it.
    ///
    /// # Safety
    /// `node` must be a live node belonging to this list.
    unsafe fn unlink(&mut self, node: NonNull<Node<T>>) {
        let node = node.as_ptr();
        match (*node).prev {
            Some(mut prev) => prev.as_mut().next = (*node).next,
            None => self.head = (*node).next,
        }
        match (*node).next {
            Some(mut next) => next.as_mut().prev = (*node).prev,
            None => self.tail = (*node).prev,
        }
        self.len -= 1;
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Duplicates the list node by node; requires the element's duplication
/// capability.
impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
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

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

/// Borrowing iterator over a [`List`], double-ended.
pub struct Iter<'a, T> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    len: usize,
    marker: PhantomData<&'a Node<T>>,
}

// SAFETY: an Iter hands out shared references only
unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        self.head.map(|node| {
            // SAFETY: the node outlives 'a and no &mut exists while iterating
            let node = unsafe { &*node.as_ptr() };
            self.len -= 1;
            self.head = node.next;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        self.tail.map(|node| {
            // SAFETY: as in next()
            let node = unsafe { &*node.as_ptr() };
            self.len -= 1;
            self.tail = node.prev;
            &node.value
        })
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            head: self.head,
            tail: self.tail,
            len: self.len,
            marker: PhantomData,
        }
    }
}

/// Owning iterator over a [`List`].
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

/// A cursor with exclusive access, supporting O(1) removal of the node it
/// points at and O(1) insertion around it.
///
/// The cursor starts at the head and can be moved in both directions. Once
/// it walks off either end it points at nothing; [`CursorMut::current`]
/// returns `None` and insertions append at the back.
///
/// # Examples
/// ```
/// use dynbytes::list::List;
///
/// let mut list: List<i32> = (1..=5).collect();
///
/// // remove the even values in one pass
/// let mut cursor = list.cursor_front_mut();
/// while let Some(&mut value) = cursor.current() {
///     if value % 2 == 0 {
///         cursor.remove_current();
///     } else {
///         cursor.move_next();
///     }
/// }
///
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 3, 5]);
/// ```
pub struct CursorMut<'a, T> {
    list: &'a mut List<T>,
    current: Option<NonNull<Node<T>>>,
    index: usize,
}

impl<'a, T> CursorMut<'a, T> {
    /// The value under the cursor, or `None` once it walked off the list.
    pub fn current(&mut self) -> Option<&mut T> {
        // SAFETY: exclusive access through the &mut List borrow
        self.current.map(|mut node| unsafe { &mut node.as_mut().value })
    }

    /// Position of the cursor, or `None` once it walked off the list.
    pub fn index(&self) -> Option<usize> {
        self.current.map(|_| self.index)
    }

    /// Advances toward the tail. No-op once off the list.
    pub fn move_next(&mut self) {
        if let Some(node) = self.current {
            // SAFETY: node is live and owned by the list
            self.current = unsafe { node.as_ref().next };
            self.index += 1;
        }
    }

    /// Moves toward the head. No-op once off the list.
    pub fn move_prev(&mut self) {
        if let Some(node) = self.current {
            // SAFETY: node is live and owned by the list
            self.current = unsafe { node.as_ref().prev };
            self.index = self.index.saturating_sub(1);
        }
    }

    /// Removes and returns the value under the cursor, advancing it to the
    /// next node. O(1).
    pub fn remove_current(&mut self) -> Option<T> {
        let node = self.current?;
        // SAFETY: node belongs to the list; after unlinking we own the box
        unsafe {
            self.current = node.as_ref().next;
            self.list.unlink(node);
            let node = Box::from_raw(node.as_ptr());
            Some(node.value)
        }
    }

    /// Inserts `value` before the cursor's node, or at the back if the
    /// cursor is off the list. O(1).
    pub fn insert_before(&mut self, value: T) {
        match self.current {
            None => self.list.push_back(value),
            Some(mut cur) => {
                // SAFETY: cur is live; splice the new node before it
                unsafe {
                    let prev = cur.as_ref().prev;
                    let node = NonNull::from(Box::leak(Box::new(Node {
                        next: Some(cur),
                        prev,
                        value,
                    })));
                    cur.as_mut().prev = Some(node);
                    match prev {
                        Some(mut prev) => prev.as_mut().next = Some(node),
                        None => self.list.head = Some(node),
                    }
                    self.list.len += 1;
                    self.index += 1;
                }
            }
        }
    }

    /// Inserts `value` after the cursor's node, or at the back if the
    /// cursor is off the list. O(1).
    pub fn insert_after(&mut self, value: T) {
        match self.current {
            None => self.list.push_back(value),
            Some(mut cur) => {
                // SAFETY: cur is live; splice the new node after it
                unsafe {
                    let next = cur.as_ref().next;
                    let node = NonNull::from(Box::leak(Box::new(Node {
                        next,
                        prev: Some(cur),
                        value,
                    })));
                    cur.as_mut().next = Some(node);
                    match next {
                        Some(mut next) => next.as_mut().prev = Some(node),
                        None => self.list.tail = Some(node),
                    }
                    self.list.len += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::List;

    #[test]
    fn push_and_pop_at_both_ends() {
        let mut list = List::new();
        list.push_back(2);
        list.push_back(3);
        list.push_front(1);

        assert_eq!(list.len(), 3);
        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.back(), Some(&3));

        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
    }

    #[test]
    fn iterates_in_both_directions() {
        let list: List<i32> = (1..=4).collect();
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4]);
        assert_eq!(
            list.iter().rev().copied().collect::<Vec<_>>(),
            [4, 3, 2, 1]
        );

        // a double-ended walk meets in the middle without overlap
        let mut iter = list.iter();
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn get_walks_from_the_nearer_end() {
        let list: List<i32> = (0..10).collect();
        for i in 0..10 {
            assert_eq!(list.get(i), Some(&(i as i32)));
        }
        assert_eq!(list.get(10), None);
    }

    #[test]
    fn find_returns_the_first_match() {
        let list: List<&str> = ["a", "b", "c", "b"].into_iter().collect();
        assert_eq!(list.find(&"b"), Some(1));
        assert_eq!(list.find(&"z"), None);
    }

    #[test]
    fn rotate_moves_the_tail_to_the_head() {
        let mut list: List<i32> = (1..=4).collect();
        list.rotate();
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [4, 1, 2, 3]);
        assert_eq!(list.len(), 4);

        let mut single: List<i32> = [1].into_iter().collect();
        single.rotate();
        assert_eq!(single.iter().copied().collect::<Vec<_>>(), [1]);
    }

    #[test]
    fn append_splices_and_empties_the_other_list() {
        let mut left: List<i32> = (1..=2).collect();
        let mut right: List<i32> = (3..=4).collect();

        left.append(&mut right);
        assert_eq!(left.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4]);
        assert!(right.is_empty());
        assert_eq!(right.pop_front(), None);

        // appending to an empty list takes everything over
        let mut empty = List::new();
        empty.append(&mut left);
        assert_eq!(empty.len(), 4);
        assert_eq!(empty.back(), Some(&4));
    }

    #[test]
    fn cursor_removes_in_the_middle() {
        let mut list: List<i32> = (1..=5).collect();
        let mut cursor = list.cursor_front_mut();
        cursor.move_next();
        cursor.move_next();
        assert_eq!(cursor.index(), Some(2));
        assert_eq!(cursor.remove_current(), Some(3));
        assert_eq!(cursor.current(), Some(&mut 4));

        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 4, 5]);
    }

    #[test]
    fn cursor_removes_head_and_tail() {
        let mut list: List<i32> = (1..=3).collect();
        let mut cursor = list.cursor_front_mut();
        assert_eq!(cursor.remove_current(), Some(1));

        cursor.move_next();
        assert_eq!(cursor.remove_current(), Some(3));
        assert!(cursor.current().is_none());

        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [2]);
        assert_eq!(list.front(), list.back());
    }

    #[test]
    fn cursor_inserts_around_the_current_node() {
        let mut list: List<i32> = [2].into_iter().collect();
        let mut cursor = list.cursor_front_mut();
        cursor.insert_before(1);
        cursor.insert_after(3);
        assert_eq!(cursor.index(), Some(1));

        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    fn clone_is_a_deep_duplicate() {
        let original: List<String> = ["x", "y"].into_iter().map(String::from).collect();
        let mut copy = original.clone();

        copy.push_back(String::from("z"));
        *copy.front_mut().unwrap() = String::from("mutated");

        assert_eq!(original.iter().collect::<Vec<_>>(), ["x", "y"]);
        assert_eq!(copy.len(), 3);
    }

    #[test]
    fn into_iter_drains_by_value() {
        let list: List<i32> = (1..=3).collect();
        let collected: Vec<i32> = list.into_iter().collect();
        assert_eq!(collected, [1, 2, 3]);
    }

    #[test]
    fn drop_releases_every_node() {
        use std::rc::Rc;

        let probe = Rc::new(());
        {
            let mut list = List::new();
            for _ in 0..10 {
                list.push_back(Rc::clone(&probe));
            }
            assert_eq!(Rc::strong_count(&probe), 11);
        }
        assert_eq!(Rc::strong_count(&probe), 1);
    }
}
