#![cfg(test)]
use enumset::EnumSet;

use crate::bounds::BoundKind;
use crate::bounds::LocalSearchPackingBound;
use crate::bounds::LowerBound;
use crate::bounds::MaxDegreeBound;
use crate::bounds::Packing;
use crate::bounds::PackingBound;
use crate::bounds::SumDegreeBound;
use crate::bounds::SumOverPackingBound;
use crate::instance::DegreeIndex;
use crate::tests::instances::brute_force_optimum;
use crate::tests::instances::random_hypergraph;

const NUM_INSTANCES: u64 = 500;

#[test]
fn all_bounds_are_sound() {
    for seed in 0..NUM_INSTANCES {
        let hypergraph = random_hypergraph(seed);
        let degrees = DegreeIndex::build(&hypergraph);
        let optimum = brute_force_optimum(&hypergraph);

        for kind in EnumSet::<BoundKind>::all() {
            let bound = kind.compute(&hypergraph, &degrees).unwrap();
            assert!(
                bound <= optimum,
                "The {kind} bound {bound} exceeds the optimum {optimum} for seed {seed}: {hypergraph:?}"
            );
        }
    }
}

#[test]
fn sum_degree_is_never_weaker_than_max_degree() {
    for seed in 0..NUM_INSTANCES {
        let hypergraph = random_hypergraph(seed);
        let degrees = DegreeIndex::build(&hypergraph);

        let max_degree = MaxDegreeBound.compute(&hypergraph, &degrees).unwrap();
        let sum_degree = SumDegreeBound.compute(&hypergraph, &degrees).unwrap();
        assert!(sum_degree >= max_degree, "Failed for seed {seed}");
    }
}

#[test]
fn packing_is_at_most_the_number_of_edges() {
    for seed in 0..NUM_INSTANCES {
        let hypergraph = random_hypergraph(seed);
        let degrees = DegreeIndex::build(&hypergraph);

        let packing = PackingBound.compute(&hypergraph, &degrees).unwrap();
        assert!(packing <= hypergraph.num_edges());
        assert_eq!(packing == 0, hypergraph.is_empty(), "Failed for seed {seed}");
    }
}

#[test]
fn greedy_packings_are_disjoint() {
    for seed in 0..NUM_INSTANCES {
        let hypergraph = random_hypergraph(seed);
        let degrees = DegreeIndex::build(&hypergraph);

        let packing = Packing::greedy(&hypergraph, &degrees).unwrap();
        assert!(packing.is_disjoint(&hypergraph), "Failed for seed {seed}");
    }
}

#[test]
fn greedy_packings_are_maximal() {
    // No skipped edge could be added afterwards, since it was skipped because of an overlap
    for seed in 0..NUM_INSTANCES {
        let hypergraph = random_hypergraph(seed);
        let degrees = DegreeIndex::build(&hypergraph);
        let packing = Packing::greedy(&hypergraph, &degrees).unwrap();

        for (edge_idx, edge) in hypergraph.edges().iter().enumerate() {
            if packing.edges().contains(&edge_idx) {
                continue;
            }
            let overlaps = packing.edges().iter().any(|&packed| {
                hypergraph.edges()[packed]
                    .elements()
                    .iter()
                    .any(|&element| edge.contains(element))
            });
            assert!(overlaps, "Edge {edge_idx} could be packed for seed {seed}");
        }
    }
}

#[test]
fn sum_over_packing_is_never_weaker_than_packing() {
    for seed in 0..NUM_INSTANCES {
        let hypergraph = random_hypergraph(seed);
        let degrees = DegreeIndex::build(&hypergraph);

        let packing = PackingBound.compute(&hypergraph, &degrees).unwrap();
        let sum_over_packing = SumOverPackingBound.compute(&hypergraph, &degrees).unwrap();
        assert!(sum_over_packing >= packing, "Failed for seed {seed}");
    }
}

#[test]
fn local_search_packings_are_disjoint_and_sound() {
    for seed in 0..NUM_INSTANCES {
        let hypergraph = random_hypergraph(seed);
        let degrees = DegreeIndex::build(&hypergraph);
        let optimum = brute_force_optimum(&hypergraph);

        let greedy = Packing::greedy(&hypergraph, &degrees).unwrap();
        let greedy_len = greedy.len();
        let improved = LocalSearchPackingBound
            .improve(&hypergraph, &degrees, greedy)
            .unwrap();

        assert!(improved.is_disjoint(&hypergraph), "Failed for seed {seed}");
        assert!(improved.len() >= greedy_len, "Failed for seed {seed}");
        assert!(improved.len() <= optimum, "Failed for seed {seed}");
    }
}

#[test]
fn bounds_are_idempotent() {
    for seed in 0..NUM_INSTANCES / 5 {
        let hypergraph = random_hypergraph(seed);
        let degrees = DegreeIndex::build(&hypergraph);
        let rebuilt = DegreeIndex::build(&hypergraph);

        for kind in EnumSet::<BoundKind>::all() {
            let first = kind.compute(&hypergraph, &degrees).unwrap();
            let second = kind.compute(&hypergraph, &degrees).unwrap();
            let third = kind.compute(&hypergraph, &rebuilt).unwrap();
            assert_eq!(first, second);
            assert_eq!(first, third);
        }
    }
}

#[test]
fn degrees_sum_up_to_incidences() {
    for seed in 0..NUM_INSTANCES {
        let hypergraph = random_hypergraph(seed);
        let degrees = DegreeIndex::build(&hypergraph);

        assert_eq!(degrees.total_incidences(), hypergraph.num_incidences());
        assert_eq!(degrees.num_elements(), hypergraph.num_elements());
    }
}
