//! Selection engine — sampling without replacement
//!
//! A draw is a uniformly random ordering of source positions: the first
//! `winners` positions become winners, the next `reserves` become reserves.
//! Positions, not names, are sampled, so duplicate names in the input are
//! independent entries and a position is never picked twice.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};

use crate::participants::ParticipantList;
use crate::request::DrawRequest;

/// Final outcome of a draw
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DrawResult {
    /// Winners in selection order
    pub winners: Vec<String>,
    /// Reserves in selection order
    pub reserves: Vec<String>,
}

impl DrawResult {
    /// Total number of picks
    pub fn total(&self) -> usize {
        self.winners.len() + self.reserves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.winners.is_empty() && self.reserves.is_empty()
    }
}

/// Source positions chosen by a draw
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub winners: Vec<usize>,
    pub reserves: Vec<usize>,
}

impl Selection {
    /// Resolve positions to names
    pub fn resolve(&self, list: &ParticipantList) -> DrawResult {
        let names = |positions: &[usize]| -> Vec<String> {
            positions
                .iter()
                .filter_map(|&p| list.get(p))
                .map(str::to_owned)
                .collect()
        };

        DrawResult {
            winners: names(self.winners.as_slice()),
            reserves: names(self.reserves.as_slice()),
        }
    }
}

/// Choose disjoint winner and reserve positions out of `len` entries
///
/// Uses a partial Fisher–Yates shuffle over the position indices, which is
/// equivalent to taking a prefix of a uniform random permutation.
/// Callers validate first; an oversubscribed request is truncated to `len`.
pub fn select_positions<R: Rng + ?Sized>(
    len: usize,
    request: DrawRequest,
    rng: &mut R,
) -> Selection {
    debug_assert!(
        request.total() <= len,
        "select called with {} picks for {} entries",
        request.total(),
        len
    );

    let take = request.total().min(len);
    let mut order: Vec<usize> = (0..len).collect();
    let (picked, _) = order.partial_shuffle(rng, take);

    let split = request.winners.min(picked.len());
    let (winners, reserves) = picked.split_at(split);

    Selection {
        winners: winners.to_vec(),
        reserves: reserves.to_vec(),
    }
}

/// Draw winners and reserves from a validated participant list
pub fn select<R: Rng + ?Sized>(
    list: &ParticipantList,
    request: DrawRequest,
    rng: &mut R,
) -> DrawResult {
    let selection = select_positions(list.len(), request, rng);
    log::debug!(
        "[Selection] drew {} winners, {} reserves from {} entries",
        selection.winners.len(),
        selection.reserves.len(),
        list.len()
    );
    selection.resolve(list)
}

/// Pick one random entry for the spinning display
///
/// Purely cosmetic: independent of the final result, with no exclusion.
pub fn pick_candidate<R: Rng + ?Sized>(list: &ParticipantList, rng: &mut R) -> Option<String> {
    list.as_slice().choose(rng).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participants::parse;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_select_lengths_and_disjoint_positions() {
        let mut rng = StdRng::seed_from_u64(42);

        for n in 1..=12 {
            for winners in 1..=n {
                for reserves in 0..=(n - winners) {
                    let sel = select_positions(n, DrawRequest::new(winners, reserves), &mut rng);
                    assert_eq!(sel.winners.len(), winners);
                    assert_eq!(sel.reserves.len(), reserves);

                    let all: HashSet<usize> =
                        sel.winners.iter().chain(&sel.reserves).copied().collect();
                    assert_eq!(all.len(), winners + reserves, "positions repeated");
                    assert!(all.iter().all(|&p| p < n));
                }
            }
        }
    }

    #[test]
    fn test_select_with_duplicate_names() {
        let list = parse("alice\n\nbob\nalice\n  \ncarol");
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..500 {
            let sel = select_positions(list.len(), DrawRequest::new(2, 1), &mut rng);
            let positions: HashSet<usize> =
                sel.winners.iter().chain(&sel.reserves).copied().collect();
            assert_eq!(positions.len(), 3);
            assert!(positions.iter().all(|&p| p < 4));

            let result = sel.resolve(&list);
            assert_eq!(result.winners.len(), 2);
            assert_eq!(result.reserves.len(), 1);
            for name in result.winners.iter().chain(&result.reserves) {
                assert!(["alice", "bob", "carol"].contains(&name.as_str()));
            }
        }
    }

    #[test]
    fn test_first_position_is_uniform() {
        const TRIALS: usize = 40_000;
        let n = 4;
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts = [0usize; 4];

        for _ in 0..TRIALS {
            let sel = select_positions(n, DrawRequest::new(n, 0), &mut rng);
            counts[sel.winners[0]] += 1;
        }

        let expected = TRIALS / n;
        for (position, &count) in counts.iter().enumerate() {
            let deviation = count.abs_diff(expected);
            assert!(
                deviation < 600,
                "position {} landed first {} times (expected ~{})",
                position,
                count,
                expected
            );
        }
    }

    #[test]
    fn test_full_draw_is_a_permutation() {
        let list = parse("a\nb\nc\nd\ne");
        let mut rng = StdRng::seed_from_u64(9);

        let result = select(&list, DrawRequest::new(5, 0), &mut rng);
        let mut names = result.winners.clone();
        names.sort();
        assert_eq!(names, ["a", "b", "c", "d", "e"]);
        assert!(result.reserves.is_empty());
    }

    #[test]
    fn test_same_seed_same_result() {
        let list = parse("a\nb\nc\nd\ne\nf");
        let request = DrawRequest::new(2, 2);

        let first = select(&list, request, &mut StdRng::seed_from_u64(77));
        let second = select(&list, request, &mut StdRng::seed_from_u64(77));
        assert_eq!(first, second);
        assert_eq!(first.total(), 4);
    }

    #[test]
    fn test_pick_candidate() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_candidate(&parse(""), &mut rng), None);

        let list = parse("x\ny");
        for _ in 0..20 {
            let name = pick_candidate(&list, &mut rng).unwrap_or_default();
            assert!(name == "x" || name == "y");
        }
    }
}
