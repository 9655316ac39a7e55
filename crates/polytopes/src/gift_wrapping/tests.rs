use super::*;
use crate::geom::Tol;
use nalgebra::dvector;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeSet, HashSet};

fn v(c: &[f64]) -> Vector {
    Vector::from_column_slice(c)
}

fn cube(d: usize) -> Vec<Vector> {
    (0..1usize << d)
        .map(|mask| Vector::from_iterator(d, (0..d).map(|i| ((mask >> i) & 1) as f64)))
        .collect()
}

/// Every facet supports the swarm and carries its own vertices.
fn assert_supporting(gw: &GiftWrapping) {
    for f in gw.facets() {
        assert!((f.normal.norm() - 1.0).abs() < 1e-9);
        let o = &f.vertices[0];
        for x in gw.points() {
            assert!(f.normal.dot(&(x - o)) <= 1e-7, "point {x:?} above facet");
        }
        for x in &f.vertices {
            assert!(f.normal.dot(&(x - o)).abs() <= 1e-7);
        }
    }
}

#[test]
fn cube_with_clutter_keeps_only_corners() {
    let mut swarm = cube(3);
    swarm.push(v(&[0.5, 0.5, 0.5]));
    swarm.push(v(&[0.5, 0.5, 0.0])); // facet centre
    swarm.push(v(&[0.5, 0.0, 0.0])); // edge midpoint
    swarm.push(v(&[1.0, 1.0, 1.0])); // duplicate
    let gw = GiftWrapping::new(&swarm, Tol::default()).unwrap();
    assert_eq!(gw.polytop_dim(), 3);
    assert_eq!(gw.space_dim(), 3);

    let mut expected = cube(3);
    expected.sort_by(|a, b| Tol::default().cmp_lex(a, b));
    assert_eq!(gw.vertices(), expected);

    let facets = gw.facets();
    assert_eq!(facets.len(), 6);
    assert!(facets.iter().all(|f| f.vertices.len() == 4));
    // outer normals are the signed axes
    for f in &facets {
        let nonzero: Vec<f64> = f.normal.iter().copied().filter(|c| c.abs() > 1e-9).collect();
        assert_eq!(nonzero.len(), 1);
        let axis = f.normal.iamax();
        let side = f.vertices[0][axis];
        assert_eq!(f.normal[axis].signum(), if side > 0.5 { 1.0 } else { -1.0 });
    }
    assert_supporting(&gw);

    let inc = gw.ridge_incidence().unwrap();
    assert_eq!(inc.len(), 12);
    assert!(inc.values().all(|&(a, b)| a < b && b < 6));
    assert_eq!(gw.edges().len(), 12);
}

#[test]
fn tetrahedron_with_interior_point_is_a_simplex() {
    let swarm = vec![
        v(&[0.0, 0.0, 0.0]),
        v(&[1.0, 0.0, 0.0]),
        v(&[0.0, 1.0, 0.0]),
        v(&[0.0, 0.0, 1.0]),
        v(&[0.1, 0.1, 0.1]),
    ];
    let gw = GiftWrapping::new(&swarm, Tol::default()).unwrap();
    assert!(matches!(gw.polytope(), SubCp::Simplex(_)));
    assert_eq!(gw.vertices().len(), 4);
    assert_eq!(gw.facets().len(), 4);
    assert!(gw.ridge_incidence().is_none());
    assert_supporting(&gw);
}

#[test]
fn octahedron_is_not_a_simplex() {
    let mut swarm = Vec::new();
    for i in 0..3 {
        for s in [-1.0, 1.0] {
            let mut p = Vector::zeros(3);
            p[i] = s;
            swarm.push(p);
        }
    }
    let gw = GiftWrapping::new(&swarm, Tol::default()).unwrap();
    assert!(matches!(gw.polytope(), SubCp::NonSimplex(_)));
    let facets = gw.facets();
    assert_eq!(facets.len(), 8);
    assert!(facets.iter().all(|f| f.vertices.len() == 3));
    assert_supporting(&gw);
}

#[test]
fn four_cube_face_counts() {
    let gw = GiftWrapping::new(&cube(4), Tol::default()).unwrap();
    assert_eq!(gw.polytop_dim(), 4);
    assert_eq!(gw.facets().len(), 8);
    assert!(gw.facets().iter().all(|f| f.vertices.len() == 8));
    assert_supporting(&gw);
    let fl = gw.face_lattice().unwrap();
    assert_eq!(fl.f_vector(), vec![16, 32, 24, 8, 1]);
}

#[test]
fn flat_square_in_space() {
    let swarm = vec![
        v(&[0.0, 0.0, 2.0]),
        v(&[1.0, 0.0, 2.0]),
        v(&[0.0, 1.0, 2.0]),
        v(&[1.0, 1.0, 2.0]),
        v(&[0.5, 0.5, 2.0]),
    ];
    let gw = GiftWrapping::new(&swarm, Tol::default()).unwrap();
    assert_eq!(gw.polytop_dim(), 2);
    assert_eq!(gw.space_dim(), 3);
    assert_eq!(gw.vertices().len(), 4);
    let facets = gw.facets();
    assert_eq!(facets.len(), 4);
    for f in &facets {
        assert_eq!(f.vertices.len(), 2);
        // normals stay inside the plane z = 2
        assert!(f.normal[2].abs() < 1e-9);
    }
    assert_supporting(&gw);
}

#[test]
fn collinear_swarm_is_a_segment() {
    let swarm: Vec<Vector> = (0..5).map(|i| dvector![i as f64, 2.0 * i as f64, -(i as f64)]).collect();
    let gw = GiftWrapping::new(&swarm, Tol::default()).unwrap();
    assert_eq!(gw.polytop_dim(), 1);
    assert_eq!(gw.vertices(), vec![swarm[0].clone(), swarm[4].clone()]);
    assert_eq!(gw.edges().len(), 1);
    assert_eq!(gw.facets().len(), 2);
}

#[test]
fn repeated_point_is_a_vertex() {
    let p = dvector![1.0, 2.0, 3.0];
    let gw = GiftWrapping::new(&[p.clone(), p.clone(), p.clone()], Tol::default()).unwrap();
    assert_eq!(gw.polytop_dim(), 0);
    assert_eq!(gw.vertices(), vec![p]);
    assert!(gw.facets().is_empty());
    assert!(gw.edges().is_empty());
    assert_eq!(gw.face_lattice().unwrap().f_vector(), vec![1]);
}

#[test]
fn bad_input_is_rejected() {
    assert!(matches!(
        GiftWrapping::new(&[], Tol::default()),
        Err(PolytopeError::EmptySwarm)
    ));
    assert!(matches!(
        GiftWrapping::new(&[dvector![0.0, 0.0], dvector![1.0, 0.0, 0.0]], Tol::default()),
        Err(PolytopeError::DimensionMismatch { expected: 2, found: 3 })
    ));
}

#[test]
fn input_order_does_not_matter() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut swarm: Vec<Vector> = (0..40)
        .map(|_| Vector::from_fn(3, |_, _| rng.gen_range(-1.0..1.0)))
        .collect();
    let reference = GiftWrapping::new(&swarm, Tol::default()).unwrap();
    assert_supporting(&reference);
    for _ in 0..3 {
        swarm.shuffle(&mut rng);
        let gw = GiftWrapping::new(&swarm, Tol::default()).unwrap();
        assert_eq!(gw.vertices(), reference.vertices());
        assert_eq!(gw.facets().len(), reference.facets().len());
    }
}

#[test]
fn lattice_of_square_pyramid() {
    let swarm = vec![
        v(&[0.0, 0.0, 0.0]),
        v(&[1.0, 0.0, 0.0]),
        v(&[0.0, 1.0, 0.0]),
        v(&[1.0, 1.0, 0.0]),
        v(&[0.5, 0.5, 1.0]),
    ];
    let fl = wrap_face_lattice(&swarm, Tol::default()).unwrap();
    assert_eq!(fl.f_vector(), vec![5, 8, 5, 1]);
    assert_eq!(fl.dim(), 3);
    assert_eq!(wrap_vrep(&swarm, Tol::default()).unwrap().len(), 5);
}

/// A 4-simplex only about 1e-6 thick over the hyperplane of its first four
/// vertices, plus three points inside it. The last one lies 0.08 from the
/// first vertex and within 1e-8 of several facet hyperplanes through it.
fn thin_simplex_swarm() -> Vec<Vector> {
    vec![
        v(&[2.573083673504434, 4.459384730891181, -0.27379963436950927, -3.9775508290570114]),
        v(&[-0.4334526451848103, -0.4053162935667942, 3.2553497814236554, 3.4524045601609177]),
        v(&[-3.942094170242104, -1.9384525033967692, -0.29372328782773627, 2.603184338100996]),
        v(&[-2.231889343176011, -3.249343109375179, -0.4791314609998676, -3.9361931497548226]),
        v(&[0.4576718028303406, -1.483829232511071, 1.5060715392478907, -3.912975119639415]),
        v(&[-0.715863786767021, 1.1248964198021802, -0.08999099950936182, -0.41480693316225237]),
        v(&[-1.2504502355127234, -2.0382520989901907, 0.055536783449397165, -3.4765790886104364]),
        v(&[2.5244380627935232, 4.399463020994712, -0.2616425805524087, -3.92127411448588]),
    ]
}

#[test]
fn point_close_to_a_vertex_of_a_thin_simplex() {
    let swarm = thin_simplex_swarm();
    for tol in [Tol::default(), Tol::new(1e-10)] {
        let gw = GiftWrapping::new(&swarm, tol).unwrap();
        assert!(matches!(gw.polytope(), SubCp::Simplex(_)), "eps = {}", tol.eps);
        let mut expected = swarm[..5].to_vec();
        expected.sort_by(|a, b| tol.cmp_lex(a, b));
        assert_eq!(gw.vertices(), expected);
        assert_eq!(gw.facets().len(), 5);
        assert_supporting(&gw);
    }
}

/// The `k`-faces for every `k`: a point inside the face on the first `k+1`
/// vertices and one inside the face on the last `k+1`.
fn standard_simplex_with_face_points(d: usize) -> (Vec<Vector>, Vec<Vector>) {
    let mut verts = vec![Vector::zeros(d)];
    verts.extend((0..d).map(|i| {
        let mut e = Vector::zeros(d);
        e[i] = 1.0;
        e
    }));
    let mut swarm = verts.clone();
    for k in 1..=d {
        let starts: BTreeSet<usize> = [0, d - k].into_iter().collect();
        for start in starts {
            let face = &verts[start..=start + k];
            swarm.push(face.iter().fold(Vector::zeros(d), |acc, p| acc + p) / (k + 1) as f64);
        }
    }
    (swarm, verts)
}

#[test]
fn simplices_with_points_on_every_face() {
    for d in 4..=7 {
        let (swarm, verts) = standard_simplex_with_face_points(d);
        let gw = GiftWrapping::new(&swarm, Tol::default()).unwrap();
        assert!(matches!(gw.polytope(), SubCp::Simplex(_)), "d = {d}");
        let mut expected = verts;
        expected.sort_by(|a, b| Tol::default().cmp_lex(a, b));
        assert_eq!(gw.vertices(), expected);
        assert_eq!(gw.facets().len(), d + 1);
        assert_supporting(&gw);
    }
}

#[test]
fn cubes_with_points_on_every_face() {
    for d in 4..=6 {
        let mut swarm = cube(d);
        for k in 1..=d {
            // inside a k-face at the origin and inside one at the far corner
            swarm.push(Vector::from_fn(d, |i, _| if i < k { 0.5 } else { 0.0 }));
            swarm.push(Vector::from_fn(d, |i, _| if i < d - k { 1.0 } else { 0.25 }));
        }
        let gw = GiftWrapping::new(&swarm, Tol::default()).unwrap();
        let mut expected = cube(d);
        expected.sort_by(|a, b| Tol::default().cmp_lex(a, b));
        assert_eq!(gw.vertices(), expected, "d = {d}");
        assert_eq!(gw.facets().len(), 2 * d);
        assert!(gw.facets().iter().all(|f| f.vertices.len() == 1 << (d - 1)));
        assert_supporting(&gw);
        let f = gw.face_lattice().unwrap().f_vector();
        let expected_f: Vec<usize> = (0..=d).map(|k| binomial(d, k) << (d - k)).collect();
        assert_eq!(f, expected_f);
    }
}

fn binomial(n: usize, k: usize) -> usize {
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

#[test]
fn facets_compare_by_vertex_set_and_normal() {
    let plain = GiftWrapping::new(&cube(3), Tol::default()).unwrap();
    let mut swarm = cube(3);
    swarm.push(v(&[0.5, 0.5, 0.5]));
    swarm.push(v(&[0.5, 0.5, 1.0]));
    swarm.reverse();
    let cluttered = GiftWrapping::new(&swarm, Tol::default()).unwrap();

    let (a, b) = (plain.facets(), cluttered.facets());
    assert_eq!(a.len(), b.len());
    assert!(a.iter().all(|f| b.contains(f)));
    let (ea, eb) = (plain.edges(), cluttered.edges());
    assert!(ea.iter().all(|e| eb.contains(e)));
    let hashed: HashSet<Facet> = b.into_iter().collect();
    assert!(a.iter().all(|f| hashed.contains(f)));

    let f = &a[0];
    let mut flipped = f.clone();
    flipped.normal = -&f.normal;
    assert_ne!(*f, flipped);

    let mut nudged = f.clone();
    nudged.vertices[0][0] += 1e-10;
    assert_eq!(*f, nudged);
    nudged.vertices[0][0] += 1e-3;
    assert_ne!(*f, nudged);

    let mut shorter = f.clone();
    shorter.vertices.pop();
    assert_ne!(*f, shorter);
    assert_ne!(ea[0], Edge { a: ea[0].b.clone(), b: ea[0].a.clone(), tol: Tol::default() });
}
