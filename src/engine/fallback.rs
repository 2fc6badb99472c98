//! Deterministic fallback: bipartite perfect matching.
//!
//! Givers on one side, recipients on the other, an edge for every candidate.
//! A perfect matching in this graph is exactly a valid assignment, since
//! self and forbidden edges never enter the candidate table. Augmenting
//! paths (Kuhn's algorithm) find one in O(n · e) or show that none exists,
//! i.e. that Hall's condition fails for some set of givers.

use crate::engine::candidates::CandidateTable;

/// Find a perfect matching, as `(giver, recipient)` index pairs sorted by giver
pub(crate) fn perfect_matching(table: &CandidateTable) -> Option<Vec<(usize, usize)>> {
    let n = table.len();
    // owner[recipient] = giver currently matched to it
    let mut owner: Vec<Option<usize>> = vec![None; n];

    for giver in 0..n {
        let mut visited = vec![false; n];
        if !augment(table, giver, &mut visited, &mut owner) {
            return None;
        }
    }

    let mut pairs: Vec<(usize, usize)> = owner
        .iter()
        .enumerate()
        .filter_map(|(recipient, giver)| giver.map(|giver| (giver, recipient)))
        .collect();
    pairs.sort_unstable();
    Some(pairs)
}

fn augment(
    table: &CandidateTable,
    giver: usize,
    visited: &mut [bool],
    owner: &mut [Option<usize>],
) -> bool {
    for &recipient in table.of(giver) {
        if visited[recipient] {
            continue;
        }
        visited[recipient] = true;

        let free = match owner[recipient] {
            None => true,
            Some(current) => augment(table, current, visited, owner),
        };
        if free {
            owner[recipient] = Some(giver);
            return true;
        }
    }
    false
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Participant, ParticipantKey, Restrictions};

    fn people(n: usize) -> Vec<Participant> {
        (0..n)
            .map(|i| Participant::new(i as u64 + 1, &format!("p{i}")).unwrap())
            .collect()
    }

    fn key(i: usize) -> ParticipantKey {
        ParticipantKey::new(&format!("p{i}")).unwrap()
    }

    #[test]
    fn test_matching_two_cycle() {
        let table = CandidateTable::build(&people(2), &Restrictions::new()).unwrap();
        assert_eq!(perfect_matching(&table), Some(vec![(0, 1), (1, 0)]));
    }

    #[test]
    fn test_matching_respects_candidates() {
        let p = people(4);
        let mut restrictions = Restrictions::new();
        restrictions.forbid_mutual(key(0), key(1));
        restrictions.forbid_mutual(key(2), key(3));
        let table = CandidateTable::build(&p, &restrictions).unwrap();

        let pairs = perfect_matching(&table).expect("a matching exists");
        assert_eq!(pairs.len(), 4);
        for &(giver, recipient) in &pairs {
            assert!(table.of(giver).contains(&recipient));
        }
        let mut recipients: Vec<usize> = pairs.iter().map(|p| p.1).collect();
        recipients.sort_unstable();
        assert_eq!(recipients, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_matching_detects_hall_violation() {
        // p0 and p1 compete for p2 alone
        let p = people(3);
        let mut restrictions = Restrictions::new();
        restrictions.forbid_mutual(key(0), key(1));
        let table = CandidateTable::build(&p, &restrictions).unwrap();

        assert_eq!(perfect_matching(&table), None);
    }

    #[test]
    fn test_matching_requires_reassignment() {
        // p0 first takes p1; p2 can only be served once p0 moves to p2
        let p = people(3);
        let mut restrictions = Restrictions::new();
        restrictions.forbid(key(1), key(2));
        let table = CandidateTable::build(&p, &restrictions).unwrap();

        assert_eq!(
            perfect_matching(&table),
            Some(vec![(0, 2), (1, 0), (2, 1)])
        );
    }
}
