//! An AVL tree: a BST that keeps itself balanced by caching the height of
//! every subtree and rotating whenever a node's children's heights differ
//! by more than one. The height of the tree is bounded by roughly
//! `1.44 * lg N`, so searches never degrade no matter the insertion order.
//!
//! # Examples
//!
//! ```
//! use balanced_trees::avl::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//!
//! // Inserting ascending keys would degrade a plain BST;
//! // this tree rotates itself back into shape as it goes.
//! for key in 1..=100 {
//!     tree.insert(key);
//! }
//!
//! assert!(tree.contains(&1));
//! assert!(tree.contains(&100));
//! assert!(tree.height() <= 8);
//!
//! // Keys come back out in ascending order.
//! let keys = tree.inorder();
//! assert_eq!(keys.first(), Some(&&1));
//! assert_eq!(keys.last(), Some(&&100));
//! ```

use std::cmp::Ordering;

/// A self-balancing Binary Search Tree (specifically, an AVL tree). This can
/// be used for inserting and finding keys and for sorted traversal.
#[derive(Clone, Debug)]
pub struct Tree<K> {
    root: Option<Box<Node<K>>>,
    len: usize,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of keys stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree stores no keys at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The height of the tree: the number of nodes on the longest path from
    /// the root to a leaf. An empty tree has a height of 0.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// The root node, if the tree is non-empty. Together with
    /// [`Node::left`] and [`Node::right`] this allows walking the tree's
    /// structure, e.g. to inspect [balance factors][Node::balance_factor].
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }
}

impl<K> Tree<K>
where
    K: Ord,
{
    /// Inserts the given key into the tree, rebalancing as needed.
    /// Inserting a key that is already present leaves the tree unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// tree.insert(1);
    /// assert!(tree.contains(&1));
    /// assert_eq!(tree.len(), 1);
    ///
    /// // Duplicates are rejected.
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) {
        let (root, inserted) = Node::insert(self.root.take(), key);
        self.root = Some(root);
        if inserted {
            self.len += 1;
        }
    }

    /// Whether the tree contains the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert!(tree.contains(&1));
    /// assert!(!tree.contains(&42));
    /// ```
    pub fn contains(&self, key: &K) -> bool {
        self.root().map_or(false, |n| n.contains(key))
    }

    /// All keys in the tree in ascending order. Because of the BST ordering
    /// invariant this sequence is always sorted, which makes it a handy
    /// correctness oracle.
    pub fn inorder(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len);
        if let Some(root) = self.root() {
            root.collect_inorder(&mut keys);
        }
        keys
    }
}

/// Height of a possibly-absent subtree: 0 for no subtree, otherwise the
/// cached height of its root.
fn height<K>(link: &Option<Box<Node<K>>>) -> usize {
    link.as_ref().map_or(0, |n| n.height)
}

/// A `Node` has a key that is used for searching/sorting and up to two
/// children. It caches the height of the subtree rooted at itself so that
/// rebalancing never has to re-measure subtrees.
#[derive(Clone, Debug)]
pub struct Node<K> {
    key: K,
    left: Option<Box<Node<K>>>,
    right: Option<Box<Node<K>>>,
    height: usize,
}

impl<K> Node<K> {
    fn new(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
            height: 1,
        }
    }

    /// The key stored in this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The left child, if any.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The right child, if any.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// The height of the subtree rooted at this node. A node with no
    /// children has a height of 1.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The difference in height between the left and right subtrees. The
    /// AVL invariant keeps this within `[-1, 1]` whenever `insert` is not
    /// mid-flight; a value of ±2 can only be observed inside rebalancing.
    pub fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    /// Adjusts the height of `self` to be the max of its children's
    /// heights + 1.
    fn fix_height(&mut self) {
        self.height = height(&self.left).max(height(&self.right)) + 1;
    }

    fn collect_inorder<'a>(&'a self, keys: &mut Vec<&'a K>) {
        if let Some(left) = self.left() {
            left.collect_inorder(keys);
        }
        keys.push(&self.key);
        if let Some(right) = self.right() {
            right.collect_inorder(keys);
        }
    }
}

impl<K> Node<K>
where
    K: Ord,
{
    fn contains(&self, key: &K) -> bool {
        match key.cmp(&self.key) {
            Ordering::Less => self.left().map_or(false, |n| n.contains(key)),
            Ordering::Equal => true,
            Ordering::Greater => self.right().map_or(false, |n| n.contains(key)),
        }
    }

    /// Inserts `key` into the subtree `link`, returning the (possibly new)
    /// subtree root and whether a node was actually added. Rebalances every
    /// node on the way back up the recursion.
    fn insert(link: Option<Box<Self>>, key: K) -> (Box<Self>, bool) {
        let mut node = match link {
            None => return (Box::new(Self::new(key)), true),
            Some(node) => node,
        };

        let inserted = match key.cmp(&node.key) {
            Ordering::Less => {
                let (left, inserted) = Self::insert(node.left.take(), key);
                node.left = Some(left);
                inserted
            }
            // Duplicate key: the tree is left untouched.
            Ordering::Equal => false,
            Ordering::Greater => {
                let (right, inserted) = Self::insert(node.right.take(), key);
                node.right = Some(right);
                inserted
            }
        };

        if inserted {
            node = node.rebalance();
        }
        (node, inserted)
    }

    /// Restores the AVL invariant at this node after an insertion into one
    /// of its subtrees. There are four cases, picked by this node's balance
    /// factor and the taller child's:
    ///
    /// - left-left: the left child is taller and its own left subtree grew.
    ///   A single right rotation fixes it.
    /// - left-right: the left child is taller but its *right* subtree grew.
    ///   Rotating the left child left first reduces this to left-left.
    /// - right-right / right-left: mirror images of the above.
    fn rebalance(mut self: Box<Self>) -> Box<Self> {
        self.fix_height();
        let node = match self.balance_factor() {
            bf if bf > 1 => {
                let left = self.left().expect("left-heavy node must have a left child");
                if left.balance_factor() < 0 {
                    let left = self.left.take().expect("checked above");
                    self.left = Some(left.rotate_left());
                }
                self.rotate_right()
            }
            bf if bf < -1 => {
                let right = self
                    .right()
                    .expect("right-heavy node must have a right child");
                if right.balance_factor() > 0 {
                    let right = self.right.take().expect("checked above");
                    self.right = Some(right.rotate_right());
                }
                self.rotate_left()
            }
            _ => self,
        };

        // In debug builds, assert that rebalancing restored the invariant.
        if cfg!(debug_assertions) {
            assert!(node.balance_factor().abs() <= 1);
            assert_eq!(node.height, height(&node.left).max(height(&node.right)) + 1);
        }
        node
    }

    /// Rotates this subtree to the right, promoting the left child to be
    /// the new subtree root. To preserve the in-order key sequence, the left
    /// child's right subtree becomes the demoted node's new left subtree.
    /// Heights are recomputed for the two nodes involved, demoted node
    /// first.
    ///
    /// # Diagram
    ///
    /// ```text
    ///      old_root (i.e. "self")       new_root
    ///       /     \                     /     \
    ///    new_root  z     rotate ->     x    old_root
    ///     / \                                 /  \
    ///    x   y                               y    z
    /// ```
    fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        let mut new_root = self
            .left
            .take()
            .expect("rotating right requires a left child");
        self.left = new_root.right.take();
        self.fix_height();
        new_root.right = Some(self);
        new_root.fix_height();
        new_root
    }

    /// Rotates this subtree to the left, promoting the right child to be
    /// the new subtree root. The mirror image of [`Node::rotate_right`].
    fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        let mut new_root = self
            .right
            .take()
            .expect("rotating left requires a right child");
        self.right = new_root.left.take();
        self.fix_height();
        new_root.left = Some(self);
        new_root.fix_height();
        new_root
    }
}
