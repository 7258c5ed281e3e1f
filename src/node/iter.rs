use std::marker::PhantomData;
use std::vec;

use super::{leftmost, predecessor, rightmost, successor, Node};

// Two cursors closing in on each other; `len` entries remain between them,
// and the count, not the cursors, decides when iteration ends.
pub struct Iter<'a, K: 'a, V: 'a> {
    nodes: &'a [Node<K, V>],
    front: Option<u32>,
    back: Option<u32>,
    len: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub fn new(nodes: &'a [Node<K, V>], root: Option<u32>) -> Iter<'a, K, V> {
        Iter {
            nodes,
            front: root.map(|root| leftmost(nodes, root)),
            back: root.map(|root| rightmost(nodes, root)),
            len: nodes.len(),
        }
    }
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Iter<'a, K, V> {
        Iter {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            len: self.len,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        if self.len == 0 {
            return None;
        }
        let index = self.front?;
        self.len -= 1;
        self.front = successor(self.nodes, index);

        let node = &self.nodes[index as usize];
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        if self.len == 0 {
            return None;
        }
        let index = self.back?;
        self.len -= 1;
        self.back = predecessor(self.nodes, index);

        let node = &self.nodes[index as usize];
        Some((&node.key, &node.value))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

// The mutable walk navigates through raw pointers: a `&[Node]` over the
// arena would alias the `&mut V` borrows already handed out. Only link
// fields are read while such borrows live.
pub struct IterMut<'a, K: 'a, V: 'a> {
    nodes: *mut Node<K, V>,
    front: Option<u32>,
    back: Option<u32>,
    len: usize,
    _marker: PhantomData<&'a mut [Node<K, V>]>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub fn new(nodes: &'a mut [Node<K, V>], root: Option<u32>) -> IterMut<'a, K, V> {
        IterMut {
            front: root.map(|root| leftmost(nodes, root)),
            back: root.map(|root| rightmost(nodes, root)),
            len: nodes.len(),
            nodes: nodes.as_mut_ptr(),
            _marker: PhantomData,
        }
    }
}

unsafe fn successor_raw<K, V>(nodes: *mut Node<K, V>, index: u32) -> Option<u32> {
    if let Some(right) = (*nodes.add(index as usize)).right {
        let mut index = right;
        while let Some(left) = (*nodes.add(index as usize)).left {
            index = left;
        }
        return Some(index);
    }

    let mut child = index;
    let mut parent = (*nodes.add(index as usize)).parent;

    while let Some(index) = parent {
        if (*nodes.add(index as usize)).left == Some(child) {
            return Some(index);
        }
        child = index;
        parent = (*nodes.add(index as usize)).parent;
    }

    None
}

unsafe fn predecessor_raw<K, V>(nodes: *mut Node<K, V>, index: u32) -> Option<u32> {
    if let Some(left) = (*nodes.add(index as usize)).left {
        let mut index = left;
        while let Some(right) = (*nodes.add(index as usize)).right {
            index = right;
        }
        return Some(index);
    }

    let mut child = index;
    let mut parent = (*nodes.add(index as usize)).parent;

    while let Some(index) = parent {
        if (*nodes.add(index as usize)).right == Some(child) {
            return Some(index);
        }
        child = index;
        parent = (*nodes.add(index as usize)).parent;
    }

    None
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<(&'a K, &'a mut V)> {
        if self.len == 0 {
            return None;
        }
        let index = self.front?;
        self.len -= 1;

        unsafe {
            self.front = successor_raw(self.nodes, index);
            let node = self.nodes.add(index as usize);
            Some((&(*node).key, &mut (*node).value))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a mut V)> {
        if self.len == 0 {
            return None;
        }
        let index = self.back?;
        self.len -= 1;

        unsafe {
            self.back = predecessor_raw(self.nodes, index);
            let node = self.nodes.add(index as usize);
            Some((&(*node).key, &mut (*node).value))
        }
    }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}

unsafe impl<'a, K, V> Send for IterMut<'a, K, V>
where
    K: Send,
    V: Send,
{
}
unsafe impl<'a, K, V> Sync for IterMut<'a, K, V>
where
    K: Sync,
    V: Sync,
{
}

// Consuming iteration extracts every entry up front, in order; the walk
// needs intact links, so entries cannot be moved out lazily.
#[derive(Clone)]
pub struct IntoIter<K, V> {
    entries: vec::IntoIter<(K, V)>,
}

impl<K, V> IntoIter<K, V> {
    pub fn new(nodes: Vec<Node<K, V>>, root: Option<u32>) -> IntoIter<K, V> {
        let mut order = Vec::with_capacity(nodes.len());
        let mut next = root.map(|root| leftmost(&nodes, root));
        while let Some(index) = next {
            order.push(index);
            next = successor(&nodes, index);
        }

        let mut slots: Vec<Option<Node<K, V>>> = nodes.into_iter().map(Some).collect();
        let entries: Vec<(K, V)> = order
            .into_iter()
            .filter_map(|index| slots[index as usize].take())
            .map(|node| (node.key, node.value))
            .collect();

        IntoIter {
            entries: entries.into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.entries.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
