mod balance;
mod iter;

#[cfg(test)]
mod test;

use compare::Compare;
use std::cmp::Ordering::*;
use std::mem;

pub use self::iter::{IntoIter, Iter, IterMut};

// Nodes live in a dense arena indexed by `u32`; links carry no ownership,
// and the parent link exists only for upward walks.
#[derive(Clone)]
pub struct Node<K, V> {
    parent: Option<u32>,
    left: Option<u32>,
    right: Option<u32>,
    balance: i8,
    key: K,
    value: V,
}

fn new_node<K, V>(nodes: &mut Vec<Node<K, V>>, key: K, value: V, parent: Option<u32>) -> u32 {
    let index = nodes.len() as u32;
    nodes.push(Node {
        parent,
        left: None,
        right: None,
        balance: 0,
        key,
        value,
    });
    index
}

pub fn key_value<K, V>(nodes: &[Node<K, V>], index: u32) -> (&K, &V) {
    let node = &nodes[index as usize];
    (&node.key, &node.value)
}

pub fn value_mut<K, V>(nodes: &mut [Node<K, V>], index: u32) -> &mut V {
    &mut nodes[index as usize].value
}

pub fn find<K, V, C, Q: ?Sized>(
    nodes: &[Node<K, V>],
    mut link: Option<u32>,
    cmp: &C,
    key: &Q,
) -> Option<u32>
where
    C: Compare<Q, K>,
{
    while let Some(index) = link {
        link = match cmp.compare(key, &nodes[index as usize].key) {
            Equal => return Some(index),
            Less => nodes[index as usize].left,
            Greater => nodes[index as usize].right,
        };
    }

    None
}

pub fn leftmost<K, V>(nodes: &[Node<K, V>], mut index: u32) -> u32 {
    while let Some(left) = nodes[index as usize].left {
        index = left;
    }
    index
}

pub fn rightmost<K, V>(nodes: &[Node<K, V>], mut index: u32) -> u32 {
    while let Some(right) = nodes[index as usize].right {
        index = right;
    }
    index
}

pub fn successor<K, V>(nodes: &[Node<K, V>], index: u32) -> Option<u32> {
    if let Some(right) = nodes[index as usize].right {
        return Some(leftmost(nodes, right));
    }

    let mut child = index;
    let mut parent = nodes[index as usize].parent;

    while let Some(index) = parent {
        if nodes[index as usize].left == Some(child) {
            return Some(index);
        }
        child = index;
        parent = nodes[index as usize].parent;
    }

    None
}

pub fn predecessor<K, V>(nodes: &[Node<K, V>], index: u32) -> Option<u32> {
    if let Some(left) = nodes[index as usize].left {
        return Some(rightmost(nodes, left));
    }

    let mut child = index;
    let mut parent = nodes[index as usize].parent;

    while let Some(index) = parent {
        if nodes[index as usize].right == Some(child) {
            return Some(index);
        }
        child = index;
        parent = nodes[index as usize].parent;
    }

    None
}

// Exchanges the tree positions of `a` and `b`, leaving each node's key and
// value in place. The two may be parent and child.
pub fn swap_nodes<K, V>(nodes: &mut [Node<K, V>], root: &mut Option<u32>, a: u32, b: u32) {
    if a == b {
        return;
    }

    let remap = |link: Option<u32>| match link {
        Some(index) if index == a => Some(b),
        Some(index) if index == b => Some(a),
        other => other,
    };

    let (a_parent, a_left, a_right) = links(nodes, a);
    let (b_parent, b_left, b_right) = links(nodes, b);
    let a_was_left = matches!(a_parent, Some(p) if nodes[p as usize].left == Some(a));
    let b_was_left = matches!(b_parent, Some(p) if nodes[p as usize].left == Some(b));

    nodes[a as usize].parent = remap(b_parent);
    nodes[a as usize].left = remap(b_left);
    nodes[a as usize].right = remap(b_right);
    nodes[b as usize].parent = remap(a_parent);
    nodes[b as usize].left = remap(a_left);
    nodes[b as usize].right = remap(a_right);

    for moved in [a, b] {
        for child in [nodes[moved as usize].left, nodes[moved as usize].right] {
            if let Some(child) = child {
                if child != a && child != b {
                    nodes[child as usize].parent = Some(moved);
                }
            }
        }
    }

    // When one was the other's parent, their own links already join them.
    reattach(nodes, root, b_parent, b_was_left, a);
    reattach(nodes, root, a_parent, a_was_left, b);
}

fn links<K, V>(nodes: &[Node<K, V>], index: u32) -> (Option<u32>, Option<u32>, Option<u32>) {
    let node = &nodes[index as usize];
    (node.parent, node.left, node.right)
}

fn reattach<K, V>(
    nodes: &mut [Node<K, V>],
    root: &mut Option<u32>,
    parent: Option<u32>,
    was_left: bool,
    index: u32,
) {
    match parent {
        None => *root = Some(index),
        Some(p) if p == index => {}
        Some(p) => {
            if was_left {
                nodes[p as usize].left = Some(index);
            } else {
                nodes[p as usize].right = Some(index);
            }
        }
    }
}

// Frees the slot at `index`, keeping the arena dense: the last slot moves
// into the hole and its neighborhood is re-pointed. The caller must have
// unlinked the node first.
fn release<K, V>(nodes: &mut Vec<Node<K, V>>, root: &mut Option<u32>, index: u32) -> Node<K, V> {
    let last = (nodes.len() - 1) as u32;
    let node = nodes.swap_remove(index as usize);

    if index != last {
        let (parent, left, right) = links(nodes, index);

        match parent {
            None => *root = Some(index),
            Some(p) if nodes[p as usize].left == Some(last) => nodes[p as usize].left = Some(index),
            Some(p) => nodes[p as usize].right = Some(index),
        }
        if let Some(left) = left {
            nodes[left as usize].parent = Some(index);
        }
        if let Some(right) = right {
            nodes[right as usize].parent = Some(index);
        }
    }

    node
}

pub fn insert<K, V, C>(
    nodes: &mut Vec<Node<K, V>>,
    root: &mut Option<u32>,
    cmp: &C,
    key: K,
    value: V,
) -> Option<V>
where
    C: Compare<K>,
{
    let mut walk = match *root {
        None => {
            *root = Some(new_node(nodes, key, value, None));
            return None;
        }
        Some(root) => root,
    };

    let parent = loop {
        match cmp.compare(&key, &nodes[walk as usize].key) {
            Equal => return Some(mem::replace(&mut nodes[walk as usize].value, value)),
            Less => match nodes[walk as usize].left {
                Some(left) => walk = left,
                None => {
                    let node = new_node(nodes, key, value, Some(walk));
                    nodes[walk as usize].left = Some(node);
                    break walk;
                }
            },
            Greater => match nodes[walk as usize].right {
                Some(right) => walk = right,
                None => {
                    let node = new_node(nodes, key, value, Some(walk));
                    nodes[walk as usize].right = Some(node);
                    break walk;
                }
            },
        }
    };

    balance::fix_upward(nodes, root, parent);
    balance::update_balances(nodes, *root);
    None
}

pub fn remove<K, V, C, Q: ?Sized>(
    nodes: &mut Vec<Node<K, V>>,
    root: &mut Option<u32>,
    cmp: &C,
    key: &Q,
) -> Option<(K, V)>
where
    C: Compare<Q, K>,
{
    let target = find(nodes, *root, cmp, key)?;

    if nodes[target as usize].left.is_some() && nodes[target as usize].right.is_some() {
        let pred = match predecessor(nodes, target) {
            Some(pred) => pred,
            None => unreachable!("a node with a left child has a predecessor"),
        };
        swap_nodes(nodes, root, target, pred);
        // balance metadata follows tree position
        let balance = nodes[target as usize].balance;
        nodes[target as usize].balance = nodes[pred as usize].balance;
        nodes[pred as usize].balance = balance;
    }

    let child = nodes[target as usize].left.or(nodes[target as usize].right);
    let parent = nodes[target as usize].parent;

    if let Some(child) = child {
        nodes[child as usize].parent = parent;
    }
    match parent {
        None => *root = child,
        Some(p) if nodes[p as usize].left == Some(target) => nodes[p as usize].left = child,
        Some(p) => nodes[p as usize].right = child,
    }

    match parent {
        Some(parent) => balance::fix_upward(nodes, root, parent),
        None => {
            if let Some(new_root) = *root {
                balance::fix_upward(nodes, root, new_root);
            }
        }
    }
    balance::update_balances(nodes, *root);

    let node = release(nodes, root, target);
    Some((node.key, node.value))
}
