//! A B-tree: a multiway search tree that stores many sorted keys per node.
//! Every node except the root holds between `t - 1` and `2t - 1` keys,
//! where `t` is the tree's *minimum degree*. Insertion works top-down in a
//! single pass: any full node encountered on the way is split around its
//! median key before descending into it, so there is always room at the
//! leaf. The tree only grows in height when the root itself splits, which
//! keeps every leaf at the same depth.
//!
//! # Examples
//!
//! ```
//! use balanced_trees::btree::Tree;
//!
//! let mut tree = Tree::new(3);
//! for key in [10, 20, 5, 6, 12, 30, 7, 17] {
//!     tree.insert(key);
//! }
//!
//! assert!(tree.contains(&12));
//! assert!(!tree.contains(&99));
//! assert_eq!(tree.traverse(), [&5, &6, &7, &10, &12, &17, &20, &30]);
//! ```

/// A balanced multiway search tree. This can be used for inserting and
/// finding keys and for sorted traversal.
#[derive(Clone, Debug)]
pub struct Tree<K> {
    root: Box<Node<K>>,
    min_degree: usize,
    len: usize,
}

#[derive(Clone, Debug)]
struct Node<K> {
    keys: Vec<K>,
    children: Vec<Box<Node<K>>>,
}

/// A `Tree` with the minimum degree defaulted to 3 (nodes hold 2 to 5
/// keys).
impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new(3)
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree` with the given minimum degree `t`.
    /// Every node except the root will hold between `t - 1` and `2t - 1`
    /// keys.
    ///
    /// # Panics
    ///
    /// Panics if `min_degree` is less than 2: a node must be able to hold
    /// at least one key after a split.
    pub fn new(min_degree: usize) -> Self {
        assert!(min_degree >= 2, "B-tree minimum degree must be at least 2");
        Self {
            root: Box::new(Node::new()),
            min_degree,
            len: 0,
        }
    }

    /// The tree's minimum degree `t`, fixed at construction.
    pub fn min_degree(&self) -> usize {
        self.min_degree
    }

    /// The number of keys stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree stores no keys at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The largest number of keys any node may hold: `2t - 1`.
    fn max_keys(&self) -> usize {
        2 * self.min_degree - 1
    }
}

impl<K> Tree<K>
where
    K: Ord,
{
    /// Inserts the given key into the tree, splitting full nodes as
    /// needed. Inserting a key that is already present leaves the tree
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::btree::Tree;
    ///
    /// let mut tree = Tree::new(2);
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
        // Screen out duplicates up front so a repeated key cannot split
        // nodes as a side effect.
        if self.contains(&key) {
            return;
        }

        let t = self.min_degree;
        if self.root.keys.len() == self.max_keys() {
            // The root is full: hang it under a fresh root and split it.
            // This is the only place the tree grows in height, which is
            // what keeps all leaves at the same depth.
            let old_root = std::mem::replace(&mut self.root, Box::new(Node::new()));
            self.root.children.push(old_root);
            self.root.split_child(0, t);
        }
        self.root.insert_non_full(key, t);
        self.len += 1;
    }

    /// Whether the tree contains the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::btree::Tree;
    ///
    /// let mut tree = Tree::new(3);
    /// tree.insert(1);
    ///
    /// assert!(tree.contains(&1));
    /// assert!(!tree.contains(&42));
    /// ```
    pub fn contains(&self, key: &K) -> bool {
        self.root.contains(key)
    }

    /// All keys in the tree in ascending order. Because every node's keys
    /// and children interleave in sorted order, this sequence is always
    /// sorted, which makes it a handy correctness oracle.
    pub fn traverse(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len);
        self.root.collect_inorder(&mut keys);
        keys
    }
}

impl<K> Node<K> {
    fn new() -> Self {
        Self {
            keys: Vec::new(),
            children: Vec::new(),
        }
    }

    /// A node with no children is a leaf. The root starts as one; interior
    /// nodes always carry one more child than they have keys.
    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn collect_inorder<'a>(&'a self, out: &mut Vec<&'a K>) {
        if self.is_leaf() {
            out.extend(self.keys.iter());
            return;
        }
        for (i, key) in self.keys.iter().enumerate() {
            self.children[i].collect_inorder(out);
            out.push(key);
        }
        self.children
            .last()
            .expect("an interior node has one more child than keys")
            .collect_inorder(out);
    }
}

impl<K> Node<K>
where
    K: Ord,
{
    fn contains(&self, key: &K) -> bool {
        // Position of the first key >= the target.
        let i = self.keys.partition_point(|k| k < key);
        if i < self.keys.len() && &self.keys[i] == key {
            return true;
        }
        if self.is_leaf() {
            false
        } else {
            self.children[i].contains(key)
        }
    }

    /// Inserts `key` into this subtree. The caller guarantees this node is
    /// not full, so a leaf always has room and an interior node can absorb
    /// the median of any child it has to split on the way down.
    fn insert_non_full(&mut self, key: K, t: usize) {
        let mut i = self.keys.partition_point(|k| k < &key);

        if self.is_leaf() {
            // Shifts the larger keys one slot to the right.
            self.keys.insert(i, key);
            return;
        }

        if self.children[i].keys.len() == 2 * t - 1 {
            self.split_child(i, t);
            // The split hoisted the child's median key into slot `i`;
            // keys above it now live in the new right-hand sibling.
            if key > self.keys[i] {
                i += 1;
            }
        }
        self.children[i].insert_non_full(key, t);
    }

    /// Splits the full child at position `i` around its median key. The
    /// median moves up into this node at slot `i`; the child keeps its
    /// lower `t - 1` keys (and lower `t` children) while the upper
    /// `t - 1` keys (and upper `t` children) move into a new sibling
    /// inserted just to the child's right.
    fn split_child(&mut self, i: usize, t: usize) {
        let full = &mut self.children[i];
        debug_assert_eq!(full.keys.len(), 2 * t - 1);

        let upper_keys = full.keys.split_off(t);
        let median = full.keys.pop().expect("a full node has a median key");
        let upper_children = if full.is_leaf() {
            Vec::new()
        } else {
            full.children.split_off(t)
        };

        let sibling = Box::new(Node {
            keys: upper_keys,
            children: upper_children,
        });
        self.keys.insert(i, median);
        self.children.insert(i + 1, sibling);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Checks the key-count bounds, per-node sortedness, child counts, and
    /// that every leaf sits at the same depth. Returns the subtree height.
    fn check_node<K: Ord>(node: &Node<K>, t: usize, is_root: bool) -> usize {
        if !is_root {
            assert!(node.keys.len() >= t - 1);
        }
        assert!(node.keys.len() <= 2 * t - 1);
        assert!(node.keys.windows(2).all(|pair| pair[0] < pair[1]));

        if node.is_leaf() {
            return 1;
        }

        assert_eq!(node.children.len(), node.keys.len() + 1);
        let depths: Vec<usize> = node
            .children
            .iter()
            .map(|child| check_node(child, t, false))
            .collect();
        let first = depths[0];
        assert!(depths.iter().all(|depth| *depth == first));

        first + 1
    }

    fn check_invariants<K: Ord>(tree: &Tree<K>) {
        if !tree.is_empty() {
            assert!(!tree.root.keys.is_empty());
        }
        check_node(&tree.root, tree.min_degree(), true);
    }

    #[test]
    fn empty_tree() {
        let tree: Tree<i32> = Tree::new(3);

        assert!(tree.is_empty());
        assert!(!tree.contains(&1));
        assert!(tree.traverse().is_empty());
    }

    #[test]
    #[should_panic(expected = "minimum degree")]
    fn rejects_degenerate_min_degree() {
        let _tree: Tree<i32> = Tree::new(1);
    }

    #[test]
    fn splits_keep_leaves_level() {
        let mut tree = Tree::new(3);
        for key in [10, 20, 5, 6, 12, 30, 7, 17] {
            tree.insert(key);
            check_invariants(&tree);
        }

        assert_eq!(tree.traverse(), [&5, &6, &7, &10, &12, &17, &20, &30]);
        assert!(tree.contains(&12));
        assert!(!tree.contains(&99));
    }

    #[test]
    fn root_split_grows_the_tree() {
        let mut tree = Tree::new(2);

        // Three keys fill the t = 2 root; the fourth forces a root split.
        for key in [1, 2, 3] {
            tree.insert(key);
        }
        assert!(tree.root.is_leaf());

        tree.insert(4);
        assert!(!tree.root.is_leaf());
        assert_eq!(tree.root.keys.len(), 1);
        check_invariants(&tree);
    }

    #[test]
    fn ascending_and_descending_runs() {
        for t in 2..=4 {
            let mut up = Tree::new(t);
            let mut down = Tree::new(t);
            for key in 0..100 {
                up.insert(key);
                down.insert(99 - key);
                check_invariants(&up);
                check_invariants(&down);
            }
            let expected: Vec<i32> = (0..100).collect();
            assert!(up.traverse().into_iter().eq(expected.iter()));
            assert!(down.traverse().into_iter().eq(expected.iter()));
        }
    }

    #[test]
    fn duplicate_insert_is_a_no_op() {
        let mut tree = Tree::new(2);
        for key in [2, 1, 3] {
            tree.insert(key);
        }

        tree.insert(2);
        tree.insert(1);

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.traverse(), [&1, &2, &3]);
        check_invariants(&tree);
    }

    #[test]
    fn duplicate_insert_does_not_split_a_full_root() {
        let mut tree = Tree::new(2);
        for key in [1, 2, 3] {
            tree.insert(key);
        }
        assert_eq!(tree.root.keys.len(), 3);

        // The root is full; a duplicate must not trigger the pre-split.
        tree.insert(2);
        assert_eq!(tree.root.keys.len(), 3);
        assert!(tree.root.is_leaf());
    }

    #[test]
    fn shuffled_keys_stay_within_bounds() {
        use rand::rngs::StdRng;
        use rand::seq::SliceRandom;
        use rand::SeedableRng;

        let n = 1000;
        let mut keys: Vec<i32> = (0..n).collect();
        keys.shuffle(&mut StdRng::seed_from_u64(0x5eed));

        let mut tree = Tree::new(3);
        for key in keys {
            tree.insert(key);
        }

        assert_eq!(tree.len(), n as usize);
        check_invariants(&tree);
    }
}
