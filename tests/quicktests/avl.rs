use balanced_trees::avl::Tree;

use std::collections::HashSet;

use quickcheck_macros::quickcheck;

use crate::sorted_unique;

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }

    xs.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x))
}

#[quickcheck]
fn inorder_matches_sorted_input(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }

    let expected = sorted_unique(xs);
    tree.len() == expected.len() && tree.inorder().into_iter().eq(expected.iter())
}

#[quickcheck]
fn height_stays_logarithmic(xs: Vec<i16>) -> bool {
    let mut tree = Tree::new();
    for x in xs {
        tree.insert(x);
    }

    let bound = 1.45 * ((tree.len() + 2) as f64).log2();
    (tree.height() as f64) <= bound
}

#[quickcheck]
fn balance_factors_stay_bounded(xs: Vec<i16>) -> bool {
    fn balanced<K>(node: &balanced_trees::avl::Node<K>) -> bool {
        node.balance_factor().abs() <= 1
            && node.left().map_or(true, balanced)
            && node.right().map_or(true, balanced)
    }

    let mut tree = Tree::new();
    for x in xs {
        tree.insert(x);
    }

    tree.root().map_or(true, balanced)
}
