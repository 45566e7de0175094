#![cfg(test)]
use enumset::EnumSet;

use crate::bounds::BoundError;
use crate::bounds::BoundKind;
use crate::bounds::LowerBound;
use crate::bounds::MaxDegreeBound;
use crate::bounds::Packing;
use crate::bounds::PackingBound;
use crate::instance::DegreeIndex;
use crate::instance::ElementId;
use crate::instance::Hypergraph;
use crate::tests::instances::brute_force_optimum;

fn all_bounds(hypergraph: &Hypergraph) -> Vec<(BoundKind, usize)> {
    let degrees = DegreeIndex::build(hypergraph);
    EnumSet::<BoundKind>::all()
        .iter()
        .map(|kind| (kind, kind.compute(hypergraph, &degrees).unwrap()))
        .collect()
}

#[test]
fn path_of_three_edges() {
    let hypergraph = Hypergraph::from_edges([vec![1, 2], vec![2, 3], vec![3, 4]]);
    let degrees = DegreeIndex::build(&hypergraph);

    let degree_of = |id: u32| degrees.degree(ElementId::new(id)).unwrap();
    assert_eq!(
        [degree_of(1), degree_of(2), degree_of(3), degree_of(4)],
        [1, 2, 2, 1]
    );

    for (kind, bound) in all_bounds(&hypergraph) {
        assert_eq!(bound, 2, "Unexpected {kind} bound");
    }
    assert_eq!(brute_force_optimum(&hypergraph), 2);
}

#[test]
fn repeated_singleton_edges() {
    let hypergraph = Hypergraph::from_edges([vec![1], vec![1], vec![2]]);
    let degrees = DegreeIndex::build(&hypergraph);

    assert_eq!(degrees.degree(ElementId::new(1)).unwrap(), 2);
    assert_eq!(MaxDegreeBound.compute(&hypergraph, &degrees).unwrap(), 2);

    let packing = Packing::greedy(&hypergraph, &degrees).unwrap();
    assert_eq!(packing.edges(), &[2, 0]);
    assert_eq!(brute_force_optimum(&hypergraph), 2);
}

#[test]
fn single_edge_of_size_one() {
    let hypergraph = Hypergraph::from_edges([vec![5]]);
    for (kind, bound) in all_bounds(&hypergraph) {
        assert_eq!(bound, 1, "Unexpected {kind} bound");
    }
}

#[test]
fn hypergraph_without_edges() {
    let hypergraph = Hypergraph::default();
    for (kind, bound) in all_bounds(&hypergraph) {
        assert_eq!(bound, 0, "Unexpected {kind} bound");
    }
}

#[test]
fn star_is_hit_by_its_center() {
    let hypergraph = Hypergraph::from_edges([vec![0, 1], vec![0, 2], vec![0, 3], vec![0, 4]]);
    let bounds = all_bounds(&hypergraph);

    assert!(bounds.iter().all(|&(_, bound)| bound == 1));
    assert_eq!(brute_force_optimum(&hypergraph), 1);
}

#[test]
fn index_of_another_hypergraph_reports_unknown_element() {
    let hypergraph = Hypergraph::from_edges([vec![1, 2], vec![7]]);
    let other = Hypergraph::from_edges([vec![1, 2]]);
    let degrees = DegreeIndex::build(&other);

    assert_eq!(
        PackingBound.compute(&hypergraph, &degrees),
        Err(BoundError::UnknownElement(ElementId::new(7)))
    );
    assert_eq!(
        BoundKind::Efficiency.compute(&hypergraph, &degrees),
        Err(BoundError::UnknownElement(ElementId::new(7)))
    );
}

#[test]
fn empty_index_of_non_empty_hypergraph() {
    let hypergraph = Hypergraph::from_edges([vec![1]]);
    let degrees = DegreeIndex::build(&Hypergraph::default());

    assert_eq!(
        MaxDegreeBound.compute(&hypergraph, &degrees),
        Err(BoundError::EmptyHypergraph)
    );
}
