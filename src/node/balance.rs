use std::cmp::max;

use super::Node;

// Rotates `n`'s right child into its place; `n` becomes that child's left
// child and the child's former left subtree becomes `n`'s right subtree.
// A node without a right child is left alone.
pub fn rotate_left<K, V>(nodes: &mut [Node<K, V>], root: &mut Option<u32>, n: u32) {
    let c = match nodes[n as usize].right {
        Some(c) => c,
        None => return,
    };
    let p = nodes[n as usize].parent;
    let m = nodes[c as usize].left;

    nodes[n as usize].right = m;
    if let Some(m) = m {
        nodes[m as usize].parent = Some(n);
    }

    nodes[c as usize].left = Some(n);
    nodes[n as usize].parent = Some(c);

    nodes[c as usize].parent = p;
    match p {
        None => *root = Some(c),
        Some(p) if nodes[p as usize].left == Some(n) => nodes[p as usize].left = Some(c),
        Some(p) => nodes[p as usize].right = Some(c),
    }
}

// Mirror image of `rotate_left`.
pub fn rotate_right<K, V>(nodes: &mut [Node<K, V>], root: &mut Option<u32>, n: u32) {
    let c = match nodes[n as usize].left {
        Some(c) => c,
        None => return,
    };
    let p = nodes[n as usize].parent;
    let m = nodes[c as usize].right;

    nodes[n as usize].left = m;
    if let Some(m) = m {
        nodes[m as usize].parent = Some(n);
    }

    nodes[c as usize].right = Some(n);
    nodes[n as usize].parent = Some(c);

    nodes[c as usize].parent = p;
    match p {
        None => *root = Some(c),
        Some(p) if nodes[p as usize].left == Some(n) => nodes[p as usize].left = Some(c),
        Some(p) => nodes[p as usize].right = Some(c),
    }
}

// Walks from `start` to the root, rotating wherever the subtree heights
// differ by more than one. A rotation demotes the current node, so the next
// step of the walk visits the subtree's new root. Ties between a grandchild
// pair favor the single rotation.
pub fn fix_upward<K, V>(nodes: &mut [Node<K, V>], root: &mut Option<u32>, start: u32) {
    let mut cur = Some(start);

    while let Some(n) = cur {
        let left = height(nodes, nodes[n as usize].left);
        let right = height(nodes, nodes[n as usize].right);

        if (right as isize - left as isize) < -1 {
            let l = match nodes[n as usize].left {
                Some(l) => l,
                None => unreachable!("a left-heavy node has a left child"),
            };
            if height(nodes, nodes[l as usize].left) >= height(nodes, nodes[l as usize].right) {
                rotate_right(nodes, root, n);
            } else {
                rotate_left(nodes, root, l);
                rotate_right(nodes, root, n);
            }
        } else if (right as isize - left as isize) > 1 {
            let r = match nodes[n as usize].right {
                Some(r) => r,
                None => unreachable!("a right-heavy node has a right child"),
            };
            if height(nodes, nodes[r as usize].right) >= height(nodes, nodes[r as usize].left) {
                rotate_left(nodes, root, n);
            } else {
                rotate_right(nodes, root, r);
                rotate_left(nodes, root, n);
            }
        }

        cur = nodes[n as usize].parent;
    }
}

// Rewrites every stored balance factor from actual subtree heights, in
// post-order. Runs after each mutation's fix-up so the stored factors never
// drift from the structure.
pub fn update_balances<K, V>(nodes: &mut [Node<K, V>], link: Option<u32>) {
    if let Some(n) = link {
        update_balances(nodes, nodes[n as usize].left);
        update_balances(nodes, nodes[n as usize].right);

        let left = height(nodes, nodes[n as usize].left);
        let right = height(nodes, nodes[n as usize].right);
        nodes[n as usize].balance = (right as isize - left as isize) as i8;
    }
}

pub fn height<K, V>(nodes: &[Node<K, V>], link: Option<u32>) -> usize {
    match link {
        None => 0,
        Some(n) => {
            1 + max(
                height(nodes, nodes[n as usize].left),
                height(nodes, nodes[n as usize].right),
            )
        }
    }
}
