use super::*;
use nalgebra::dvector;

fn unit_square() -> FaceLattice {
    let points = vec![dvector![0.0, 0.0], dvector![1.0, 0.0], dvector![1.0, 1.0], dvector![0.0, 1.0]];
    let levels = vec![
        vec![],
        vec![vec![0, 1], vec![1, 2], vec![2, 3], vec![3, 0]],
        vec![vec![0, 1, 2, 3]],
    ];
    FaceLattice::from_levels(points, &levels, Tol::default()).unwrap()
}

/// Links are mutual and every face is the union of its sub-faces.
fn assert_consistent(fl: &FaceLattice) {
    for (id, node) in fl.nodes() {
        for &s in &node.sup {
            assert!(fl.node(s).sub.contains(&id));
            assert_eq!(fl.node(s).dim, node.dim + 1);
        }
        if node.dim > 0 {
            let mut union: Vec<usize> = node.sub.iter().flat_map(|&c| fl.node(c).vertices.clone()).collect();
            union.sort_unstable();
            union.dedup();
            assert_eq!(union, node.vertices);
            assert_eq!(node.aff_basis.sub_dim(), node.dim);
        }
    }
}

#[test]
fn square_from_levels() {
    let fl = unit_square();
    assert_eq!(fl.dim(), 2);
    assert_eq!(fl.space_dim(), 2);
    assert_eq!(fl.f_vector(), vec![4, 4, 1]);
    assert_consistent(&fl);
    // points come out lexicographically sorted
    assert_eq!(fl.points()[1], dvector![0.0, 1.0]);
    let top = fl.node(fl.top());
    assert!((&top.inner_point - dvector![0.5, 0.5]).norm() < 1e-12);
    assert!(fl.level(3).is_empty());
}

#[test]
fn every_node_sees_the_same_levels() {
    let fl = unit_square();
    let from_top = fl.levels().to_vec();
    for &v in fl.level(0) {
        assert_eq!(fl.levels_from(v), from_top.as_slice());
    }
}

#[test]
fn several_tops_are_rejected() {
    let points = vec![dvector![0.0], dvector![1.0], dvector![2.0]];
    let levels = vec![vec![], vec![vec![0, 1], vec![1, 2]]];
    assert!(FaceLattice::from_levels(points, &levels, Tol::default()).is_err());
}

#[test]
fn single_vertex() {
    let fl = FaceLattice::from_vertex(dvector![3.0, 4.0], Tol::default());
    assert_eq!(fl.dim(), 0);
    assert_eq!(fl.f_vector(), vec![1]);
    assert_eq!(fl.node(fl.top()).inner_point, dvector![3.0, 4.0]);
}

#[test]
fn vertex_transform_keeps_combinatorics() {
    let fl = unit_square();
    let moved = fl.vertex_transform(|p| p * 2.0 + dvector![1.0, -1.0]).unwrap();
    assert_eq!(moved.f_vector(), fl.f_vector());
    assert_consistent(&moved);
    let top = moved.node(moved.top());
    assert!((&top.inner_point - dvector![2.0, 0.0]).norm() < 1e-12);
    assert_ne!(moved, fl);

    // swapping the axes maps the square onto itself
    let swapped = fl.vertex_transform(|p| dvector![p[1], p[0]]).unwrap();
    assert_eq!(swapped, fl);

    let collapsed = fl.vertex_transform(|p| dvector![p[0], 0.0]);
    assert!(collapsed.is_err());
}

#[test]
fn equality_is_order_independent() {
    let a = unit_square();
    let points = vec![dvector![1.0, 1.0], dvector![0.0, 1.0], dvector![0.0, 0.0], dvector![1.0, 0.0]];
    let levels = vec![
        vec![],
        vec![vec![2, 3], vec![0, 1], vec![3, 0], vec![1, 2]],
        vec![vec![3, 2, 1, 0]],
    ];
    let b = FaceLattice::from_levels(points, &levels, Tol::default()).unwrap();
    assert_eq!(a, b);
}
