//! A Red-Black tree: a BST that keeps itself balanced by coloring every
//! node red or black and maintaining two rules across every insertion:
//! a red node never has a red child, and every path from the root down to
//! an absent child passes the same number of black nodes. Together these
//! bound the height at `2 * lg(N + 1)`.
//!
//! Nodes are stored in an arena (a `Vec`) and refer to each other by
//! index. This gives every node a parent link for the upward-walking
//! repair loop without any shared ownership; the reserved `NIL` index
//! plays the role of the classic shared sentinel, and the link accessors
//! encode its fixed properties (black, no children) so the rotation code
//! needs no special cases for missing children.
//!
//! # Examples
//!
//! ```
//! use balanced_trees::red_black::Tree;
//!
//! let mut tree = Tree::new();
//! for key in [7, 3, 18, 10, 22, 8, 11, 26] {
//!     tree.insert(key);
//! }
//!
//! assert!(tree.contains(&10));
//! assert!(!tree.contains(&99));
//!
//! // The coloring rules held after every insertion, so every root-to-leaf
//! // path passes the same number of black nodes.
//! assert!(tree.black_height().is_some());
//! ```

use std::cmp::Ordering;

/// Stand-in for an absent child (and for the parent of the root). Always
/// treated as black by [`Tree::color`].
const NIL: NodeId = NodeId(usize::MAX);

/// Index of a node in the tree's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct NodeId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

#[derive(Clone, Debug)]
struct Node<K> {
    key: K,
    color: Color,
    parent: NodeId,
    left: NodeId,
    right: NodeId,
}

/// A self-balancing Binary Search Tree (specifically, a Red-Black tree).
/// This can be used for inserting and finding keys and for sorted
/// traversal.
#[derive(Clone, Debug)]
pub struct Tree<K> {
    nodes: Vec<Node<K>>,
    root: NodeId,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: NIL,
        }
    }

    /// The number of keys stored in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree stores no keys at all.
    pub fn is_empty(&self) -> bool {
        self.root == NIL
    }

    /// The height of the tree: the number of nodes on the longest path from
    /// the root to a leaf. An empty tree has a height of 0.
    pub fn height(&self) -> usize {
        self.height_of(self.root)
    }

    /// The number of black nodes on any path from the root down to an
    /// absent child, if that number is the same for every such path.
    /// Returns `None` if some two paths disagree, which would mean the
    /// balancing invariant has been violated; this is the tree's built-in
    /// consistency check and test oracle.
    pub fn black_height(&self) -> Option<usize> {
        self.black_height_of(self.root)
    }

    fn node(&self, id: NodeId) -> &Node<K> {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<K> {
        &mut self.nodes[id.0]
    }

    fn left(&self, id: NodeId) -> NodeId {
        self.node(id).left
    }

    fn right(&self, id: NodeId) -> NodeId {
        self.node(id).right
    }

    fn parent(&self, id: NodeId) -> NodeId {
        self.node(id).parent
    }

    /// The color of a possibly-absent node. `NIL` is always black; this is
    /// what lets the repair loop treat missing uncles uniformly.
    fn color(&self, id: NodeId) -> Color {
        if id == NIL {
            Color::Black
        } else {
            self.node(id).color
        }
    }

    /// Repoints a child's parent link, ignoring `NIL`: the sentinel has no
    /// bookkeeping to update.
    fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        if id != NIL {
            self.node_mut(id).parent = parent;
        }
    }

    fn height_of(&self, id: NodeId) -> usize {
        if id == NIL {
            return 0;
        }
        let left = self.height_of(self.left(id));
        let right = self.height_of(self.right(id));
        left.max(right) + 1
    }

    fn black_height_of(&self, id: NodeId) -> Option<usize> {
        if id == NIL {
            return Some(0);
        }
        let left = self.black_height_of(self.left(id))?;
        let right = self.black_height_of(self.right(id))?;
        if left != right {
            return None;
        }
        Some(left + usize::from(self.color(id) == Color::Black))
    }
}

impl<K> Tree<K>
where
    K: Ord,
{
    /// Inserts the given key into the tree, recoloring and rotating as
    /// needed. Inserting a key that is already present leaves the tree
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::red_black::Tree;
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
        // Ordinary BST descent to the attachment point.
        let mut parent = NIL;
        let mut current = self.root;
        let mut went_left = false;
        while current != NIL {
            parent = current;
            match key.cmp(&self.node(current).key) {
                Ordering::Less => {
                    went_left = true;
                    current = self.left(current);
                }
                // Duplicate key: the tree is left untouched.
                Ordering::Equal => return,
                Ordering::Greater => {
                    went_left = false;
                    current = self.right(current);
                }
            }
        }

        // The new node starts red so it cannot change any path's black
        // count; only the red-red rule can be violated, and the repair
        // loop below restores it.
        let z = NodeId(self.nodes.len());
        self.nodes.push(Node {
            key,
            color: Color::Red,
            parent,
            left: NIL,
            right: NIL,
        });
        if parent == NIL {
            self.root = z;
        } else if went_left {
            self.node_mut(parent).left = z;
        } else {
            self.node_mut(parent).right = z;
        }

        self.insert_fixup(z);
    }

    /// Whether the tree contains the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::red_black::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert!(tree.contains(&1));
    /// assert!(!tree.contains(&42));
    /// ```
    pub fn contains(&self, key: &K) -> bool {
        let mut current = self.root;
        while current != NIL {
            current = match key.cmp(&self.node(current).key) {
                Ordering::Less => self.left(current),
                Ordering::Equal => return true,
                Ordering::Greater => self.right(current),
            };
        }
        false
    }

    /// All keys in the tree in ascending order. Because of the BST ordering
    /// invariant this sequence is always sorted, which makes it a handy
    /// correctness oracle.
    pub fn inorder(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.nodes.len());
        self.collect_inorder(self.root, &mut keys);
        keys
    }

    fn collect_inorder<'a>(&'a self, id: NodeId, keys: &mut Vec<&'a K>) {
        if id == NIL {
            return;
        }
        self.collect_inorder(self.left(id), keys);
        keys.push(&self.node(id).key);
        self.collect_inorder(self.right(id), keys);
    }

    /// Restores the coloring rules after `z` was attached as a red node.
    ///
    /// The loop runs while `z`'s parent is red (a red-red violation; note
    /// this also means `z` is not the root). Each round looks at `z`'s
    /// uncle:
    ///
    /// - red uncle: recolor parent and uncle black and the grandparent
    ///   red, then continue the loop from the grandparent, which may now
    ///   violate the rule itself.
    /// - black uncle, `z` an inner child: rotate the parent so `z`
    ///   becomes an outer child, reducing to the next case.
    /// - black uncle, `z` an outer child: recolor parent black and
    ///   grandparent red, rotate the grandparent. The subtree root is now
    ///   black, so the loop terminates.
    ///
    /// Finally the root is forced black, absorbing the case where the
    /// recoloring round reached it.
    fn insert_fixup(&mut self, mut z: NodeId) {
        while self.color(self.parent(z)) == Color::Red {
            let parent = self.parent(z);
            // A red parent is never the root, so the grandparent is a
            // real node.
            let grandparent = self.parent(parent);

            if parent == self.left(grandparent) {
                let uncle = self.right(grandparent);
                if self.color(uncle) == Color::Red {
                    self.node_mut(parent).color = Color::Black;
                    self.node_mut(uncle).color = Color::Black;
                    self.node_mut(grandparent).color = Color::Red;
                    z = grandparent;
                } else {
                    if z == self.right(parent) {
                        z = parent;
                        self.rotate_left(z);
                    }
                    let parent = self.parent(z);
                    let grandparent = self.parent(parent);
                    self.node_mut(parent).color = Color::Black;
                    self.node_mut(grandparent).color = Color::Red;
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.left(grandparent);
                if self.color(uncle) == Color::Red {
                    self.node_mut(parent).color = Color::Black;
                    self.node_mut(uncle).color = Color::Black;
                    self.node_mut(grandparent).color = Color::Red;
                    z = grandparent;
                } else {
                    if z == self.left(parent) {
                        z = parent;
                        self.rotate_right(z);
                    }
                    let parent = self.parent(z);
                    let grandparent = self.parent(parent);
                    self.node_mut(parent).color = Color::Black;
                    self.node_mut(grandparent).color = Color::Red;
                    self.rotate_left(grandparent);
                }
            }
        }

        let root = self.root;
        self.node_mut(root).color = Color::Black;
    }

    /// Rotates the subtree at `x` to the left, promoting `x`'s right child
    /// `y` into `x`'s place. `y`'s left subtree becomes `x`'s new right
    /// subtree, preserving the in-order key sequence.
    fn rotate_left(&mut self, x: NodeId) {
        let y = self.right(x);
        debug_assert_ne!(y, NIL, "rotating left requires a right child");

        let y_left = self.left(y);
        self.node_mut(x).right = y_left;
        self.set_parent(y_left, x);

        let parent = self.parent(x);
        self.set_parent(y, parent);
        if parent == NIL {
            self.root = y;
        } else if self.left(parent) == x {
            self.node_mut(parent).left = y;
        } else {
            self.node_mut(parent).right = y;
        }

        self.node_mut(y).left = x;
        self.node_mut(x).parent = y;
    }

    /// Rotates the subtree at `x` to the right. The mirror image of
    /// [`Tree::rotate_left`].
    fn rotate_right(&mut self, x: NodeId) {
        let y = self.left(x);
        debug_assert_ne!(y, NIL, "rotating right requires a left child");

        let y_right = self.right(y);
        self.node_mut(x).left = y_right;
        self.set_parent(y_right, x);

        let parent = self.parent(x);
        self.set_parent(y, parent);
        if parent == NIL {
            self.root = y;
        } else if self.right(parent) == x {
            self.node_mut(parent).right = y;
        } else {
            self.node_mut(parent).left = y;
        }

        self.node_mut(y).right = x;
        self.node_mut(x).parent = y;
    }
}
