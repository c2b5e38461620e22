//! Permutation-level genetic operators.
//!
//! These work on plain `&[usize]` visiting orders so they can be tested
//! without a distance model. [`Chromosome`](super::Chromosome) wraps them and
//! adds the invariant checks.
//!
//! # Operators
//!
//! - [`swap_mutation`]: exchange the values at two distinct random positions — O(1)
//! - [`order_crossover_child`] (OX): keep a window of one parent, fill the rest
//!   in the other parent's relative order — O(n)
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use rand::Rng;

/// Returns `true` if `perm` holds each value of `0..n` exactly once.
pub fn is_permutation(perm: &[usize], n: usize) -> bool {
    if perm.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &v in perm {
        if v >= n || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}

/// Swap mutation: exchange the values at two distinct random positions.
///
/// The second position is redrawn until it differs from the first. Returns
/// the swapped positions, or `None` when `perm` has fewer than two elements
/// and nothing can change.
pub fn swap_mutation<R: Rng + ?Sized>(perm: &mut [usize], rng: &mut R) -> Option<(usize, usize)> {
    let n = perm.len();
    if n < 2 {
        return None;
    }
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n);
    while j == i {
        j = rng.random_range(0..n);
    }
    perm.swap(i, j);
    Some((i, j))
}

/// Draws an OX window `[begin, end)` with `0 <= begin <= end <= n`.
///
/// `n` itself is a valid cut point because the window is half-open.
pub fn crossover_window<R: Rng + ?Sized>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..=n);
    let b = rng.random_range(0..=n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Builds one Order Crossover child.
///
/// Positions in `[begin, end)` keep `p1`'s values. The other positions are
/// filled left to right with `p2`'s values in `p2`'s order, skipping the
/// cities already reserved by `p1`'s window.
///
/// # Panics
/// Panics if the parents differ in length or `end > p1.len()`. Debug builds
/// also panic if the parents are not permutations of the same set, which
/// would leave the donor cursor without an unreserved value.
pub fn order_crossover_child(p1: &[usize], p2: &[usize], begin: usize, end: usize) -> Vec<usize> {
    let n = p1.len();
    assert_eq!(n, p2.len(), "parents must have equal length");
    assert!(begin <= end && end <= n, "window [{begin}, {end}) out of range 0..={n}");

    let mut reserved = vec![false; n];
    for &city in &p1[begin..end] {
        reserved[city] = true;
    }

    let mut child = p1.to_vec();
    let mut j = 0;
    for (i, slot) in child.iter_mut().enumerate() {
        if (begin..end).contains(&i) {
            continue;
        }
        while j < n && reserved[p2[j]] {
            j += 1;
        }
        debug_assert!(j < n, "donor exhausted at position {i}");
        *slot = p2[j];
        j += 1;
    }
    child
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[2, 0, 1], 3));
        assert!(is_permutation(&[], 0));
        assert!(!is_permutation(&[0, 1], 3));
        assert!(!is_permutation(&[0, 0, 1], 3));
        assert!(!is_permutation(&[0, 1, 3], 3));
    }

    #[test]
    fn test_swap_changes_exactly_two_positions() {
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let original: Vec<usize> = (0..10).collect();
            let mut perm = original.clone();
            let (i, j) = swap_mutation(&mut perm, &mut rng).unwrap();
            assert_ne!(i, j);
            let changed: Vec<usize> = (0..10).filter(|&k| perm[k] != original[k]).collect();
            assert_eq!(changed.len(), 2, "changed positions: {changed:?}");
            assert_eq!(perm[i], original[j]);
            assert_eq!(perm[j], original[i]);
        }
    }

    #[test]
    fn test_swap_two_elements_always_swaps() {
        let mut rng = create_rng(42);
        for _ in 0..20 {
            let mut perm = vec![0, 1];
            swap_mutation(&mut perm, &mut rng);
            assert_eq!(perm, vec![1, 0]);
        }
    }

    #[test]
    fn test_swap_single_element() {
        let mut rng = create_rng(42);
        let mut perm = vec![0];
        assert_eq!(swap_mutation(&mut perm, &mut rng), None);
        assert_eq!(perm, vec![0]);
    }

    #[test]
    fn test_window_bounds() {
        let mut rng = create_rng(42);
        let mut saw_full_end = false;
        for _ in 0..2000 {
            let (b, e) = crossover_window(10, &mut rng);
            assert!(b <= e && e <= 10);
            saw_full_end |= e == 10;
        }
        assert!(saw_full_end, "cut point n should be reachable");
    }

    #[test]
    fn test_ox_reference_example() {
        let p1 = [0, 1, 2, 3, 4];
        let p2 = [4, 3, 2, 1, 0];
        let child = order_crossover_child(&p1, &p2, 1, 3);
        assert_eq!(&child[1..3], &[1, 2]);
        // Remaining slots take {0, 3, 4} in p2's order: 4, 3, 0.
        assert_eq!(child, vec![4, 1, 2, 3, 0]);
    }

    #[test]
    fn test_ox_swapped_roles() {
        let p1 = [0, 1, 2, 3, 4];
        let p2 = [4, 3, 2, 1, 0];
        let child = order_crossover_child(&p2, &p1, 1, 3);
        assert_eq!(child, vec![0, 3, 2, 1, 4]);
        assert!(is_permutation(&child, 5));
    }

    #[test]
    fn test_ox_empty_window_copies_donor() {
        let p1 = [0, 1, 2, 3];
        let p2 = [3, 1, 0, 2];
        assert_eq!(order_crossover_child(&p1, &p2, 2, 2), p2.to_vec());
    }

    #[test]
    fn test_ox_full_window_copies_template() {
        let p1 = [0, 1, 2, 3];
        let p2 = [3, 1, 0, 2];
        assert_eq!(order_crossover_child(&p1, &p2, 0, 4), p1.to_vec());
    }

    #[test]
    #[should_panic(expected = "parents must have equal length")]
    fn test_ox_length_mismatch_panics() {
        order_crossover_child(&[0, 1, 2], &[0, 1], 0, 1);
    }

    fn permutation(n: usize) -> impl Strategy<Value = Vec<usize>> {
        Just((0..n).collect::<Vec<usize>>()).prop_shuffle()
    }

    fn parents_and_window() -> impl Strategy<Value = (Vec<usize>, Vec<usize>, usize, usize)> {
        (1usize..40).prop_flat_map(|n| (permutation(n), permutation(n), 0..=n, 0..=n)).prop_map(
            |(p1, p2, a, b)| (p1, p2, a.min(b), a.max(b)),
        )
    }

    proptest! {
        #[test]
        fn prop_ox_child_is_permutation_and_keeps_window(
            (p1, p2, b, e) in parents_and_window()
        ) {
            let n = p1.len();
            let child = order_crossover_child(&p1, &p2, b, e);
            prop_assert!(is_permutation(&child, n));
            prop_assert_eq!(&child[b..e], &p1[b..e]);

            // Outside the window the child follows p2's relative order.
            let outside: Vec<usize> = child
                .iter()
                .enumerate()
                .filter(|(i, _)| !(b..e).contains(i))
                .map(|(_, &v)| v)
                .collect();
            let expected: Vec<usize> = p2
                .iter()
                .copied()
                .filter(|v| !p1[b..e].contains(v))
                .collect();
            prop_assert_eq!(outside, expected);
        }

        #[test]
        fn prop_swap_keeps_permutation(mut perm in (2usize..50).prop_flat_map(permutation), seed in any::<u64>()) {
            let n = perm.len();
            let mut rng = create_rng(seed);
            swap_mutation(&mut perm, &mut rng);
            prop_assert!(is_permutation(&perm, n));
        }
    }
}
