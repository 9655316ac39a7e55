//! End-to-end scenarios: hulls of small named shapes, the V → H → V round
//! trip, and face lattice consistency.

use std::collections::HashSet;

use nalgebra::dvector;
use polytopes::api::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn tol() -> Tol {
    Tol::default()
}

fn unit_cube() -> Vec<Vector> {
    cube01_vrep(3, tol()).unwrap().vrep().unwrap().to_vec()
}

fn same_point_set(a: &[Vector], b: &[Vector]) -> bool {
    a.len() == b.len() && a.iter().all(|x| b.iter().any(|y| tol().vec_eq(x, y)))
}

#[test]
fn unit_square() {
    let pts = vec![dvector![0.0, 0.0], dvector![1.0, 0.0], dvector![1.0, 1.0], dvector![0.0, 1.0]];
    let gw = GiftWrapping::new(&pts, tol()).unwrap();
    assert_eq!(gw.vertices().len(), 4);
    assert_eq!(gw.edges().len(), 4);
    let normals: Vec<Vector> = gw.facets().into_iter().map(|f| f.normal).collect();
    for expected in [dvector![1.0, 0.0], dvector![-1.0, 0.0], dvector![0.0, 1.0], dvector![0.0, -1.0]] {
        assert!(normals.iter().any(|n| (n - &expected).norm() < 1e-9), "missing {expected}");
    }

    // the same square sitting in the plane z = 1 of 3-space
    let lifted: Vec<Vector> = pts.iter().map(|p| dvector![p[0], p[1], 1.0]).collect();
    let gw3 = GiftWrapping::new(&lifted, tol()).unwrap();
    assert_eq!((gw3.polytop_dim(), gw3.space_dim()), (2, 3));
    for f in gw3.facets() {
        assert!(f.normal[2].abs() < 1e-12);
        assert!((f.normal.norm() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn unit_cube_corners() {
    let gw = GiftWrapping::new(&unit_cube(), tol()).unwrap();
    assert_eq!(gw.vertices().len(), 8);
    let facets = gw.facets();
    assert_eq!(facets.len(), 6);
    assert!(facets.iter().all(|f| f.vertices.len() == 4));
    assert_eq!(gw.edges().len(), 12);
}

#[test]
fn cube_with_its_centroid() {
    let plain = GiftWrapping::new(&unit_cube(), tol()).unwrap();
    let mut pts = unit_cube();
    pts.push(dvector![0.5, 0.5, 0.5]);
    let with_centre = GiftWrapping::new(&pts, tol()).unwrap();

    let verts = plain.vertices();
    assert!(same_point_set(&with_centre.vertices(), &verts));
    let (a, b) = (with_centre.facets(), plain.facets());
    assert_eq!(a.len(), b.len());
    assert!(a.iter().all(|f| b.contains(f)));
    assert_eq!(
        with_centre.face_lattice().unwrap(),
        plain.face_lattice().unwrap()
    );
}

#[test]
fn repeated_point() {
    let p = dvector![1.0, 2.0, 3.0];
    let gw = GiftWrapping::new(&[p.clone(), p.clone(), p.clone()], tol()).unwrap();
    assert_eq!(gw.polytop_dim(), 0);
    assert_eq!(gw.vertices(), vec![p]);
    assert!(gw.facets().is_empty());
    assert_eq!(gw.face_lattice().unwrap().f_vector(), vec![1]);
}

#[test]
fn cube_halfspaces() {
    let hps = cube01_hrep(3, tol()).unwrap().hrep().unwrap().to_vec();
    assert_eq!(hps.len(), 6);
    let vs = hrep_to_vrep_naive(&hps, tol()).unwrap();
    assert!(same_point_set(&vs, &unit_cube()));
}

#[test]
fn round_trip_through_halfspaces() {
    let mut rng = StdRng::seed_from_u64(2024);
    let bodies = vec![
        cube01_vrep(4, tol()).unwrap(),
        simplex_rnd(4, &mut rng, tol()).unwrap(),
        cyclic(3, 9, 0.5, tol()).unwrap(),
        ball_1(&dvector![0.5, -1.0, 2.0, 0.0], 2.0, tol()).unwrap(),
    ];
    for p in bodies {
        let hps = p.hrep().unwrap();
        for strategy in [HrepToVrep::Naive, HrepToVrep::Walk] {
            let back = strategy.convert(hps, tol()).unwrap();
            assert!(same_point_set(&back, p.vrep().unwrap()), "{strategy:?}");
        }
    }
}

#[test]
fn lattice_links_are_consistent() {
    let fl = cyclic(4, 7, 1.0, tol()).unwrap().face_lattice().unwrap().clone();
    for (id, node) in fl.nodes() {
        if !node.is_vertex() {
            let union: HashSet<usize> = node
                .sub
                .iter()
                .flat_map(|&c| fl.node(c).vertices.iter().copied())
                .collect();
            let own: HashSet<usize> = node.vertices.iter().copied().collect();
            assert_eq!(union, own);
        }
        for &up in &node.sup {
            assert!(fl.node(up).sub.contains(&id));
        }
        for &down in &node.sub {
            assert!(fl.node(down).sup.contains(&id));
        }
        // every node reaches the whole lattice
        let f: Vec<usize> = fl.levels_from(id).iter().map(Vec::len).collect();
        assert_eq!(f, fl.f_vector());
    }
}

#[test]
fn simplices_have_simplex_facets() {
    let mut rng = StdRng::seed_from_u64(11);
    for d in 2..=5 {
        let pts = simplex_rnd(d, &mut rng, tol()).unwrap().vrep().unwrap().to_vec();
        let gw = GiftWrapping::new(&pts, tol()).unwrap();
        assert!(gw.polytope().is_simplex());
        let facets = gw.facets();
        assert_eq!(facets.len(), d + 1);
        assert!(facets.iter().all(|f| f.vertices.len() == d));
    }
}
