use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

use super::{balance, Node};
use crate::map::Map;

/// An operation on a `Map`.
#[derive(Clone, Debug)]
enum Op<K> {
    /// Insert a key into the map.
    Insert(K),
    /// Remove the key at index `n % map.len()` from the map.
    Remove(usize),
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary + Ord,
{
    fn arbitrary(g: &mut Gen) -> Op<K> {
        if bool::arbitrary(g) {
            Op::Insert(K::arbitrary(g))
        } else {
            Op::Remove(usize::arbitrary(g))
        }
    }
}

impl<K> Op<K>
where
    K: Clone + Ord,
{
    /// Performs the operation on the given map.
    fn exec(self, map: &mut Map<K, ()>) {
        match self {
            Op::Insert(key) => {
                map.insert(key, ());
            }
            Op::Remove(index) => {
                if !map.is_empty() {
                    let key = map.iter().nth(index % map.len()).unwrap().0.clone();
                    map.remove(&key);
                }
            }
        }
    }
}

fn assert_avl<K, V>(map: &Map<K, V>)
where
    K: Ord,
{
    fn check<K, V>(nodes: &[Node<K, V>], index: u32) -> usize
    where
        K: Ord,
    {
        let node = &nodes[index as usize];
        let left = balance::height(nodes, node.left);
        let right = balance::height(nodes, node.right);
        let diff = right as isize - left as isize;

        assert!(diff.abs() <= 1);
        assert_eq!(node.balance as isize, diff);

        let mut count = 1;

        if let Some(left) = node.left {
            assert_eq!(nodes[left as usize].parent, Some(index));
            assert!(nodes[left as usize].key < node.key);
            count += check(nodes, left);
        }

        if let Some(right) = node.right {
            assert_eq!(nodes[right as usize].parent, Some(index));
            assert!(nodes[right as usize].key > node.key);
            count += check(nodes, right);
        }

        count
    }

    match map.root() {
        None => assert!(map.nodes().is_empty()),
        Some(root) => {
            let nodes = map.nodes();
            assert_eq!(nodes[root as usize].parent, None);
            assert_eq!(check(nodes, root), map.len());

            let keys: Vec<_> = map.iter().map(|e| e.0).collect();
            for pair in keys.windows(2) {
                assert!(pair[0] < pair[1]);
            }
        }
    }
}

#[quickcheck]
fn avl_invariants_hold(ops: Vec<Op<u32>>) -> bool {
    let mut map = Map::new();

    for op in ops {
        op.exec(&mut map);
        assert_avl(&map);
    }

    true
}

fn assert_balanced_triple(map: &Map<u32, ()>) {
    let nodes = map.nodes();
    let root = map.root().unwrap();
    let left = nodes[root as usize].left.unwrap();
    let right = nodes[root as usize].right.unwrap();

    assert_eq!(nodes[root as usize].key, 2);
    assert_eq!(nodes[left as usize].key, 1);
    assert_eq!(nodes[right as usize].key, 3);

    for node in nodes {
        assert_eq!(node.balance, 0);
    }
}

#[test]
fn single_left_rotation() {
    let mut map = Map::new();
    for key in [1, 2, 3] {
        map.insert(key, ());
    }
    assert_balanced_triple(&map);
}

#[test]
fn single_right_rotation() {
    let mut map = Map::new();
    for key in [3, 2, 1] {
        map.insert(key, ());
    }
    assert_balanced_triple(&map);
}

#[test]
fn double_left_right_rotation() {
    let mut map = Map::new();
    for key in [3, 1, 2] {
        map.insert(key, ());
    }
    assert_balanced_triple(&map);
}

#[test]
fn double_right_left_rotation() {
    let mut map = Map::new();
    for key in [1, 3, 2] {
        map.insert(key, ());
    }
    assert_balanced_triple(&map);
}

#[test]
fn removing_an_inner_node_promotes_its_predecessor() {
    let mut map = Map::new();
    for key in [4, 2, 5, 1, 3] {
        map.insert(key, ());
    }

    assert_eq!(map.remove(&4), Some((4, ())));
    assert_avl(&map);

    let nodes = map.nodes();
    let root = map.root().unwrap();
    let left = nodes[root as usize].left.unwrap();
    let right = nodes[root as usize].right.unwrap();

    assert_eq!(nodes[root as usize].key, 3);
    assert_eq!(nodes[left as usize].key, 2);
    assert_eq!(nodes[right as usize].key, 5);
    assert_eq!(nodes[left as usize].left.map(|i| nodes[i as usize].key), Some(1));
}

#[test]
fn removing_the_root_promotes_its_child() {
    let mut map = Map::new();
    map.insert(2, ());
    map.insert(1, ());

    assert_eq!(map.remove(&2), Some((2, ())));
    assert_eq!(map.len(), 1);

    let root = map.root().unwrap();
    assert_eq!(map.nodes()[root as usize].key, 1);
    assert_eq!(map.nodes()[root as usize].parent, None);
    assert_avl(&map);
}

#[test]
fn removing_an_absent_key_is_a_no_op() {
    let mut map = Map::new();
    map.insert(1, "a");

    assert_eq!(map.remove(&2), None);
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&1), Some(&"a"));
}

#[test]
fn overwriting_a_key_leaves_the_shape_alone() {
    let mut map = Map::new();
    map.insert(2, "b");
    map.insert(1, "a");
    map.insert(3, "c");

    let root = map.root();
    assert_eq!(map.insert(2, "x"), Some("b"));
    assert_eq!(map.root(), root);
    assert_eq!(map.len(), 3);
    assert_eq!(map.get(&2), Some(&"x"));
    assert_avl(&map);
}

#[test]
fn removing_every_key_drains_the_arena() {
    let mut map = Map::new();
    for key in [5, 3, 8, 1, 4, 7, 9, 2, 6] {
        map.insert(key, ());
    }

    for key in 1..=9 {
        assert_eq!(map.remove(&key), Some((key, ())));
        assert_avl(&map);
    }

    assert!(map.is_empty());
    assert!(map.nodes().is_empty());
}

#[test]
fn ascending_inserts_stay_balanced() {
    let mut map = Map::new();

    for key in 0..100 {
        map.insert(key, ());
        assert_avl(&map);
    }

    assert_eq!(map.len(), 100);
}
