//! Checks whether every root-to-leaf path in a binary tree has the same length.

/// A node in a plain binary tree.
#[derive(Clone, Debug)]
pub struct Node<T> {
    pub value: T,
    pub left: Option<Box<Node<T>>>,
    pub right: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
    /// Creates a node with no children.
    pub fn leaf(value: T) -> Node<T> {
        Node {
            value,
            left: None,
            right: None,
        }
    }
}

/// Checks if all paths from the root to a leaf have the same length.
///
/// An empty tree passes, and a node with a single child contributes one level
/// no matter how deep that child's subtree is, so chains of single children
/// never fail on their own.
///
/// # Examples
///
/// ```
/// use avl::paths::{equal_paths, Node};
///
/// let mut root = Node::leaf(2);
/// root.left = Some(Box::new(Node::leaf(1)));
/// root.right = Some(Box::new(Node::leaf(3)));
/// assert!(equal_paths(Some(&root)));
///
/// let mut deep = Node::leaf(4);
/// deep.left = Some(Box::new(Node::leaf(3)));
/// deep.right = Some(Box::new(Node::leaf(5)));
/// root.right = Some(Box::new(deep));
/// assert!(!equal_paths(Some(&root)));
/// ```
pub fn equal_paths<T>(root: Option<&Node<T>>) -> bool {
    path_height(root) != -1
}

// Returns the uniform leaf depth below `link`, or -1 if two leaves disagree.
// A lone child is absorbed as one level so only two-child splits can conflict.
fn path_height<T>(link: Option<&Node<T>>) -> i32 {
    let node = match link {
        Some(node) => node,
        None => return 1,
    };

    let left = path_height(node.left.as_deref());
    let right = path_height(node.right.as_deref());

    if left == -1 || right == -1 {
        return -1;
    }

    match (&node.left, &node.right) {
        (Some(_), Some(_)) => {
            if left != right {
                -1
            } else {
                1 + left
            }
        }
        (Some(_), None) => 1 + left,
        (None, Some(_)) => 1 + right,
        (None, None) => 1,
    }
}
