use std::cmp::Ordering;

use log::debug;

use super::BoundError;
use super::BoundKind;
use super::LowerBound;
use super::Packing;
use crate::instance::DegreeIndex;
use crate::instance::ElementId;
use crate::instance::Hypergraph;

/// The size of a greedy [`Packing`] after it has been improved by 2-opt swaps.
///
/// A swap removes one packed edge and adds two disjoint edges which were only blocked by the
/// removed edge. Every swap enlarges the packing, so the search ends after at most as many swaps
/// as there are edges. The result is still a packing and therefore a lower bound which is never
/// weaker than the [`PackingBound`](super::PackingBound).
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSearchPackingBound;

impl LocalSearchPackingBound {
    /// Applies 2-opt swaps to `packing` until none is left.
    ///
    /// `packing` has to be maximal, i.e. every edge outside of it has to share an element with
    /// one of the packed edges; greedy packings have this property and it is kept by each swap.
    pub fn improve(
        &self,
        hypergraph: &Hypergraph,
        degrees: &DegreeIndex,
        packing: Packing,
    ) -> Result<Packing, BoundError> {
        let edge_positions = hypergraph
            .edges()
            .iter()
            .map(|edge| {
                edge.elements()
                    .iter()
                    .map(|&element| degrees.position(element))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut packed = packing.edges().to_vec();
        let mut in_packing = vec![false; hypergraph.num_edges()];
        for &edge_idx in &packed {
            in_packing[edge_idx] = true;
        }

        // The index into `packed` of the edge hitting each element
        let mut hit_by: Vec<Option<usize>> = vec![None; degrees.num_elements()];
        let mut blocked_by: Vec<Vec<usize>> = Vec::new();
        let mut num_swaps = 0;

        loop {
            hit_by.fill(None);
            for (packed_idx, &edge_idx) in packed.iter().enumerate() {
                for &position in &edge_positions[edge_idx] {
                    hit_by[position] = Some(packed_idx);
                }
            }

            blocked_by.iter_mut().for_each(Vec::clear);
            blocked_by.resize(packed.len(), Vec::new());
            for edge_idx in (0..hypergraph.num_edges()).filter(|&edge_idx| !in_packing[edge_idx]) {
                if let Some(blocking) = sole_blocker(&edge_positions[edge_idx], &hit_by) {
                    blocked_by[blocking].push(edge_idx);
                }
            }

            let Some((removed_idx, first, second)) = find_two_opt_swap(hypergraph, &blocked_by)
            else {
                break;
            };
            num_swaps += 1;

            let removed = packed.remove(removed_idx);
            in_packing[removed] = false;
            for &position in &edge_positions[removed] {
                hit_by[position] = None;
            }

            // Only whether an element is hit matters from here on, not by which edge
            for added in [first, second] {
                packed.push(added);
                in_packing[added] = true;
                for &position in &edge_positions[added] {
                    hit_by[position] = Some(0);
                }
            }

            // Edges which were only blocked by the removed edge may fit next to the added ones
            for &candidate in &blocked_by[removed_idx] {
                let positions = &edge_positions[candidate];
                if in_packing[candidate] || positions.iter().any(|&p| hit_by[p].is_some()) {
                    continue;
                }
                packed.push(candidate);
                in_packing[candidate] = true;
                for &position in positions {
                    hit_by[position] = Some(0);
                }
            }
        }

        debug!(
            "Local search performed {num_swaps} swaps, packing {} of {} edges",
            packed.len(),
            hypergraph.num_edges()
        );
        Ok(Packing::from_disjoint(hypergraph, packed))
    }
}

/// The packed edge which is the only one hitting the elements at `positions`, if there is
/// exactly one such edge.
fn sole_blocker(positions: &[usize], hit_by: &[Option<usize>]) -> Option<usize> {
    let mut blockers = positions.iter().filter_map(|&position| hit_by[position]);
    let first = blockers.next()?;
    blockers.all(|blocking| blocking == first).then_some(first)
}

/// Finds a packed edge together with two disjoint edges it alone was blocking.
fn find_two_opt_swap(
    hypergraph: &Hypergraph,
    blocked_by: &[Vec<usize>],
) -> Option<(usize, usize, usize)> {
    let edges = hypergraph.edges();
    for (blocking, blocked) in blocked_by.iter().enumerate() {
        for (idx, &second) in blocked.iter().enumerate() {
            for &first in &blocked[..idx] {
                if are_disjoint(edges[first].elements(), edges[second].elements()) {
                    return Some((blocking, first, second));
                }
            }
        }
    }
    None
}

/// Whether two sorted slices of elements have no element in common.
fn are_disjoint(first: &[ElementId], second: &[ElementId]) -> bool {
    let mut first = first.iter().peekable();
    let mut second = second.iter().peekable();
    while let (Some(&&left), Some(&&right)) = (first.peek(), second.peek()) {
        match left.cmp(&right) {
            Ordering::Less => {
                let _ = first.next();
            }
            Ordering::Greater => {
                let _ = second.next();
            }
            Ordering::Equal => return false,
        }
    }
    true
}

impl LowerBound for LocalSearchPackingBound {
    fn kind(&self) -> BoundKind {
        BoundKind::LocalSearchPacking
    }

    fn compute(
        &self,
        hypergraph: &Hypergraph,
        degrees: &DegreeIndex,
    ) -> Result<usize, BoundError> {
        if hypergraph.is_empty() {
            return Ok(0);
        }

        let greedy = Packing::greedy(hypergraph, degrees)?;
        Ok(self.improve(hypergraph, degrees, greedy)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::PackingBound;

    fn hypergraph(edges: &[&[u32]]) -> Hypergraph {
        Hypergraph::from_edges(edges.iter().map(|edge| edge.iter().copied()))
    }

    fn bounds(hypergraph: &Hypergraph) -> (usize, usize) {
        let degrees = DegreeIndex::build(hypergraph);
        (
            PackingBound.compute(hypergraph, &degrees).unwrap(),
            LocalSearchPackingBound
                .compute(hypergraph, &degrees)
                .unwrap(),
        )
    }

    #[test]
    fn empty_hypergraph() {
        assert_eq!(bounds(&hypergraph(&[])), (0, 0));
    }

    #[test]
    fn swap_replaces_a_blocking_edge() {
        // All degree sums are 4, so the greedy packing takes {1, 2} first, which blocks both
        // {1, 3, 5} and {2, 4, 6}
        let hypergraph = hypergraph(&[&[1, 2], &[1, 3, 5], &[2, 4, 6]]);
        assert_eq!(bounds(&hypergraph), (1, 2));

        let degrees = DegreeIndex::build(&hypergraph);
        let greedy = Packing::greedy(&hypergraph, &degrees).unwrap();
        let improved = LocalSearchPackingBound
            .improve(&hypergraph, &degrees, greedy)
            .unwrap();
        assert_eq!(improved.edges(), &[1, 2]);
        assert!(improved.is_disjoint(&hypergraph));
    }

    #[test]
    fn edges_freed_by_a_swap_are_added() {
        // Every degree sum is 6 and {1, 2, 7} comes first. Swapping it for {1, ...} and {2, ...}
        // releases element 7, after which {7, ...} fits as well
        let hypergraph = hypergraph(&[
            &[1, 2, 7],
            &[1, 3, 5, 10, 11],
            &[2, 4, 6, 12, 13],
            &[7, 8, 14, 15, 16],
        ]);
        assert_eq!(bounds(&hypergraph), (1, 3));
    }

    #[test]
    fn packed_edges_outside_of_the_swap_are_kept() {
        // {9} is packed first due to its low degree sum and takes no part in the swap
        let hypergraph = hypergraph(&[&[1, 2], &[1, 3, 5], &[2, 4, 6], &[9]]);
        assert_eq!(bounds(&hypergraph), (2, 3));
    }

    #[test]
    fn maximum_packing_is_left_unchanged() {
        let hypergraph = hypergraph(&[&[1, 2], &[2, 3], &[3, 4]]);
        assert_eq!(bounds(&hypergraph), (2, 2));
    }

    #[test]
    fn edges_blocked_by_two_packed_edges_are_not_swapped_in() {
        let hypergraph = hypergraph(&[&[1], &[2], &[1, 2]]);
        assert_eq!(bounds(&hypergraph), (2, 2));
    }

    #[test]
    fn disjointness_of_sorted_slices() {
        let ids = |ids: &[u32]| ids.iter().copied().map(ElementId::new).collect::<Vec<_>>();
        assert!(are_disjoint(&ids(&[1, 3, 5]), &ids(&[2, 4, 6])));
        assert!(!are_disjoint(&ids(&[1, 3, 5]), &ids(&[0, 5])));
        assert!(are_disjoint(&ids(&[]), &ids(&[1])));
    }
}
