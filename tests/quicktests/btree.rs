use balanced_trees::btree::Tree;

use std::collections::HashSet;

use quickcheck_macros::quickcheck;

use crate::sorted_unique;

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = Tree::default();
    for x in &xs {
        tree.insert(*x);
    }

    xs.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = Tree::default();
    for x in &xs {
        tree.insert(*x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x))
}

#[quickcheck]
fn traverse_matches_sorted_input(xs: Vec<i8>) -> bool {
    let mut tree = Tree::default();
    for x in &xs {
        tree.insert(*x);
    }

    let expected = sorted_unique(xs);
    tree.len() == expected.len() && tree.traverse().into_iter().eq(expected.iter())
}

#[quickcheck]
fn any_small_degree_works(xs: Vec<i8>, t_choice: u8) -> bool {
    // Exercise the smallest degrees, where splits are most frequent.
    let t = 2 + usize::from(t_choice % 4);
    let mut tree = Tree::new(t);
    for x in &xs {
        tree.insert(*x);
    }

    let expected = sorted_unique(xs);
    tree.min_degree() == t && tree.traverse().into_iter().eq(expected.iter())
}
