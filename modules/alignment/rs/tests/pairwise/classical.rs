use cognate_alignment_rs::pairwise::{
    edit_dist, edit_dist_normalized, nw_align, sw_align, we_align,
    Slot::{Gap, Token},
};

use crate::support::full_table;

#[test]
fn test_edit_dist() {
    let kitten = ["k", "i", "t", "t", "e", "n"];
    let sitting = ["s", "i", "t", "t", "i", "n", "g"];
    assert_eq!(edit_dist(&kitten, &sitting), 3);
    assert_eq!(edit_dist_normalized(&kitten, &sitting), 3.0 / 7.0);
}

#[test]
fn test_edit_dist_degenerate_inputs() {
    let empty: [&str; 0] = [];
    assert_eq!(edit_dist(&empty, &["a", "b"]), 2);
    assert_eq!(edit_dist(&["a", "b"], &empty), 2);
    assert_eq!(edit_dist(&empty, &empty), 0);
    assert_eq!(edit_dist_normalized(&empty, &empty), 0.0);
}

#[test]
fn test_nw_with_explicit_table() {
    let table = full_table(&["a", "b", "c"], 1.0, -1.0);
    let result = nw_align(&["a", "b", "c"], &["a", "c"], Some(&table), -1.0).unwrap();

    assert_eq!(*result.score(), 1.0);
    assert_eq!(
        *result.a().slots(),
        [Token("a"), Token("b"), Token("c")]
    );
    assert_eq!(*result.b().slots(), [Token("a"), Gap, Token("c")]);
}

#[test]
fn test_nw_identity_with_fallback_scoring() {
    let seq = ["s", "o", "n", "g"];
    let result = nw_align(&seq, &seq, None, -1.0).unwrap();

    assert_eq!(*result.score(), 4.0);
    assert!(result.a().slots().iter().all(|slot| !slot.is_gap()));
    assert_eq!(result.a().slots(), result.b().slots());
}

#[test]
fn test_sw_keeps_the_flanks() {
    let result = sw_align(
        &["x", "a", "b", "c", "y"],
        &["a", "b", "c"],
        None,
        -2.0,
    )
    .unwrap();

    assert_eq!(*result.score(), 3.0);
    assert_eq!(*result.a().prefix(), ["x"]);
    assert_eq!(
        *result.a().slots(),
        [Token("a"), Token("b"), Token("c")]
    );
    assert_eq!(*result.a().suffix(), ["y"]);
    assert!(result.b().prefix().is_empty());
    assert_eq!(
        *result.b().slots(),
        [Token("a"), Token("b"), Token("c")]
    );
    assert!(result.b().suffix().is_empty());
}

#[test]
fn test_we_finds_disjoint_repeats() {
    let seq_a = ["a", "b", "c", "q", "d", "e", "f"];
    let seq_b = ["a", "b", "c", "r", "d", "e", "f"];
    let hits = we_align(&seq_a, &seq_b, None, -2.0).unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(*hits[0].score(), 3.0);
    assert_eq!(*hits[1].score(), 3.0);

    assert_eq!(
        *hits[0].a(),
        [Token("a"), Token("b"), Token("c")]
    );
    assert_eq!(*hits[0].a_range(), 0..3);
    assert_eq!(*hits[0].b_range(), 0..3);

    assert_eq!(
        *hits[1].a(),
        [Token("d"), Token("e"), Token("f")]
    );
    assert_eq!(*hits[1].a_range(), 4..7);
    assert_eq!(*hits[1].b_range(), 4..7);
}

#[test]
fn test_we_scores_are_non_increasing() {
    let seq_a = ["a", "b", "c", "d", "x", "a", "b"];
    let seq_b = ["a", "b", "c", "d", "y", "a", "b"];
    let hits = we_align(&seq_a, &seq_b, None, -2.0).unwrap();

    assert!(!hits.is_empty());
    for pair in hits.windows(2) {
        assert!(pair[0].score() >= pair[1].score());
    }
    assert_eq!(*hits[0].score(), 4.0);
}
