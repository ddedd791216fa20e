use std::collections::HashSet;
use std::iter::zip;

use ahash::AHashSet;
use proptest::prelude::*;

use cognate_alignment_rs::pairwise::{
    basic_align, edit_dist, nw_align, sc_align, we_align, BasicParams, ContextParams,
    LocalHit, Mode, SeqContext,
};

use crate::support::{full_table, graded_table};

const ALPHABET: [&str; 6] = ["p", "t", "k", "a", "i", "u"];

fn arb_tokens(max: usize) -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(ALPHABET.to_vec()), 1..max)
}

/// Matrix cells visited by the core of a Waterman-Eggert hit.
fn path_cells(hit: &LocalHit<&'static str>) -> Vec<(usize, usize)> {
    let (mut i, mut j) = (hit.b_range().start, hit.a_range().start);
    let mut cells = Vec::new();
    for (slot_a, slot_b) in zip(hit.a(), hit.b()) {
        match (slot_a.is_gap(), slot_b.is_gap()) {
            (false, false) => {
                i += 1;
                j += 1;
            }
            (true, false) => i += 1,
            (false, true) => j += 1,
            (true, true) => unreachable!("a column cannot be all gaps"),
        }
        cells.push((i, j));
    }
    cells
}

proptest! {
    // Aligned sides have equal length and reproduce their inputs once gaps
    // are stripped; in local mode the flanks complete the picture.
    #[test]
    fn test_length_coherence(
        seq_a in arb_tokens(8),
        seq_b in arb_tokens(8),
        local in any::<bool>(),
    ) {
        let params = BasicParams {
            mode: if local { Mode::Local } else { Mode::Global },
            ..BasicParams::default()
        };
        let result = basic_align(&seq_a, &seq_b, None, &params).unwrap();

        prop_assert_eq!(result.a().slots().len(), result.b().slots().len());

        for (aligned, seq) in [(result.a(), &seq_a), (result.b(), &seq_b)] {
            let mut restored = aligned.prefix().clone();
            restored.extend(aligned.tokens());
            restored.extend(aligned.suffix().iter().cloned());
            prop_assert_eq!(&restored, seq);
        }
    }

    // Aligning a sequence against itself with matching contexts is at
    // distance zero.
    #[test]
    fn test_self_alignment_distance_is_zero(seq in arb_tokens(8)) {
        let table = graded_table(&ALPHABET, -1.0);
        let weights = vec![1.0; seq.len()];
        let prosody = vec!['c'; seq.len()];
        let ctx = SeqContext::new(&seq, &weights, &prosody);

        let params = ContextParams {
            distance: true,
            ..ContextParams::default()
        };
        let result = sc_align(&ctx, &ctx, &table, &params).unwrap();
        prop_assert!(result.distance().unwrap().abs() < 1e-9);
    }

    // Distance is symmetric for the basic aligner and for edit distance.
    #[test]
    fn test_distance_symmetry(seq_a in arb_tokens(8), seq_b in arb_tokens(8)) {
        let params = BasicParams {
            distance: true,
            ..BasicParams::default()
        };
        let ab = basic_align(&seq_a, &seq_b, None, &params).unwrap();
        let ba = basic_align(&seq_b, &seq_a, None, &params).unwrap();
        let delta = ab.distance().unwrap() - ba.distance().unwrap();
        prop_assert!(delta.abs() < 1e-9);

        prop_assert_eq!(edit_dist(&seq_a, &seq_b), edit_dist(&seq_b, &seq_a));
    }

    // Unit-cost Levenshtein is a metric.
    #[test]
    fn test_edit_dist_triangle(
        seq_a in arb_tokens(7),
        seq_b in arb_tokens(7),
        seq_c in arb_tokens(7),
    ) {
        let direct = edit_dist(&seq_a, &seq_c);
        let via = edit_dist(&seq_a, &seq_b) + edit_dist(&seq_b, &seq_c);
        prop_assert!(direct <= via);
    }

    // A harsher gap penalty never buys more gaps. Checked at scale 1.0,
    // where the gap cost is linear in the gap count.
    #[test]
    fn test_gap_count_is_monotone_in_gop(
        seq_a in arb_tokens(8),
        seq_b in arb_tokens(8),
        gop in -3i32..=-1,
        delta in 1i32..=3,
    ) {
        let table = full_table(&ALPHABET, 2.0, -1.0);
        let weights_a = vec![1.0; seq_a.len()];
        let weights_b = vec![1.0; seq_b.len()];
        let pro_a = vec!['c'; seq_a.len()];
        let pro_b = vec!['c'; seq_b.len()];
        let a = SeqContext::new(&seq_a, &weights_a, &pro_a);
        let b = SeqContext::new(&seq_b, &weights_b, &pro_b);

        let gaps = |gop: i32| {
            let params = ContextParams {
                gop,
                scale: 1.0,
                factor: 0.0,
                restricted: AHashSet::new(),
                ..ContextParams::default()
            };
            let result = sc_align(&a, &b, &table, &params).unwrap();
            result.a().gaps() + result.b().gaps()
        };

        prop_assert!(gaps(gop - delta) <= gaps(gop));
    }

    // Local similarities never go negative.
    #[test]
    fn test_local_similarity_is_non_negative(
        seq_a in arb_tokens(8),
        seq_b in arb_tokens(8),
    ) {
        let params = BasicParams {
            mode: Mode::Local,
            ..BasicParams::default()
        };
        let result = basic_align(&seq_a, &seq_b, None, &params).unwrap();
        prop_assert!(*result.score() >= 0.0);
    }

    // Waterman-Eggert hits never share a matrix cell and come out in
    // non-increasing score order.
    #[test]
    fn test_we_hits_are_disjoint_and_sorted(
        seq_a in arb_tokens(10),
        seq_b in arb_tokens(10),
    ) {
        let hits = we_align(&seq_a, &seq_b, None, -2.0).unwrap();

        for pair in hits.windows(2) {
            prop_assert!(pair[0].score() >= pair[1].score());
        }

        let mut seen = HashSet::new();
        for hit in &hits {
            for cell in path_cells(hit) {
                prop_assert!(seen.insert(cell));
            }
        }
    }

    // Needleman-Wunsch on equal sequences is the gapless identity.
    #[test]
    fn test_nw_identity(seq in arb_tokens(10)) {
        let result = nw_align(&seq, &seq, None, -1.0).unwrap();
        prop_assert_eq!(*result.score(), seq.len() as f64);
        prop_assert!(result.a().slots().iter().all(|slot| !slot.is_gap()));
    }
}
