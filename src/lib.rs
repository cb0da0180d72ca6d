//! This crate exposes a family of self-balancing ordered index structures:
//! an AVL tree, a Red-Black tree, and a multiway B-tree.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert and find stored keys. BSTs are typically defined recursively
//! using the notion of a `Node`. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! The benefits of these invariants are many. For instance, searching for
//! keys in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). BSTs also naturally support
//! sorted iteration by visiting the left subtree, then the subtree root, then
//! the right subtree.
//!
//! ## Self-balancing trees
//!
//! The catch is that nothing about the BST invariants bounds `height`.
//! Inserting keys in ascending order degrades a plain BST into a linked
//! list with `O(N)` searches. The structures in this crate each maintain an
//! additional *balance* invariant across every insertion, using cheap local
//! repairs, so that `height` stays `O(lg N)`:
//!
//! - [`avl::Tree`] caches a height in every node and repairs any node whose
//!   children's heights differ by more than one with single or double
//!   rotations.
//! - [`red_black::Tree`] colors every node red or black and repairs
//!   violations of its coloring rules after each insertion with recoloring
//!   and rotations.
//! - [`btree::Tree`] stores many keys per node and splits any node that
//!   fills up, growing the tree from the root so all leaves stay at the
//!   same depth.
//!
//! The three trees are independent: they share no code, only the idea of an
//! ordered key container with `insert`, `contains`, and sorted traversal.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
pub mod btree;
pub mod red_black;
