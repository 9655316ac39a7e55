use super::special::*;
use crate::error::PolytopeError;
use crate::geom::{Tol, Vector};
use nalgebra::dvector;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn tol() -> Tol {
    Tol::default()
}

fn facets(f: &[usize]) -> usize {
    f[f.len() - 2]
}

#[test]
fn cubes_in_several_dimensions() {
    for d in 2..=4 {
        let p = cube01_vrep(d, tol()).unwrap();
        let f = p.f_vector().unwrap();
        assert_eq!(f[0], 1 << d);
        assert_eq!(facets(&f), 2 * d);
    }
    let h = cube01_hrep(3, tol()).unwrap();
    assert_eq!(h.vrep().unwrap().len(), 8);
    assert!(cube01_hrep(0, tol()).is_err());
}

#[test]
fn boxes_check_their_corners() {
    assert!(matches!(
        rect_axis_parallel(&dvector![0.0, 0.0], &dvector![1.0], tol()),
        Err(PolytopeError::DimensionMismatch { expected: 2, found: 1 })
    ));
    let b = rect_axis_parallel(&dvector![-1.0, 0.0, 2.0], &dvector![1.0, 3.0, 4.0], tol()).unwrap();
    assert_eq!(b.f_vector().unwrap(), vec![8, 12, 6, 1]);
}

#[test]
fn random_simplex_is_a_simplex() {
    let mut rng = StdRng::seed_from_u64(7);
    for d in 2..=5 {
        let p = simplex_rnd(d, &mut rng, tol()).unwrap();
        let f = p.f_vector().unwrap();
        assert_eq!(f[0], d + 1);
        assert_eq!(facets(&f), d + 1);
        assert!(p.vrep().unwrap().iter().flatten().all(|&x| (0.0..10.0).contains(&x)));
    }
}

#[test]
fn cyclic_polytopes() {
    // C(n, 3) has 2n - 4 facets
    for n in 5..=8 {
        let p = cyclic(3, n, 1.0, tol()).unwrap();
        let f = p.f_vector().unwrap();
        assert_eq!(f[0], n);
        assert_eq!(facets(&f), 2 * n - 4);
    }
    // C(6, 4) is neighbourly with n(n-3)/2 facets
    let f = cyclic(4, 6, 1.0, tol()).unwrap().f_vector().unwrap();
    assert_eq!(f, vec![6, 15, 18, 9, 1]);

    assert!(cyclic(3, 3, 1.0, tol()).is_err());
    assert!(cyclic(3, 6, 0.0, tol()).is_err());
}

#[test]
fn coarse_sphere_is_an_octahedron() {
    let p = sphere(&Vector::zeros(3), 2.0, 2, 4, tol()).unwrap();
    assert_eq!(p.f_vector().unwrap(), vec![6, 12, 8, 1]);
    assert!(p.vrep().unwrap().iter().all(|v| (v.norm() - 2.0).abs() < 1e-9));
}

#[test]
fn circle_and_ellipse() {
    let c = dvector![1.0, -1.0];
    assert_eq!(sphere(&c, 1.0, 0, 8, tol()).unwrap().vrep().unwrap().len(), 8);

    let axes = dvector![3.0, 1.0, 2.0];
    let e = ellipsoid(&Vector::zeros(3), &axes, 4, 6, tol()).unwrap();
    // poles collapse: 6 azimuths times 3 inner rings plus 2 poles
    assert_eq!(e.vrep().unwrap().len(), 20);
    for v in e.vrep().unwrap() {
        let r: f64 = v.iter().zip(axes.iter()).map(|(x, a)| (x / a).powi(2)).sum();
        assert!((r - 1.0).abs() < 1e-9);
    }

    assert!(sphere(&c, 1.0, 0, 2, tol()).is_err());
    assert!(sphere(&Vector::zeros(3), 1.0, 1, 4, tol()).is_err());
    assert!(ellipsoid(&c, &dvector![1.0, -1.0], 2, 4, tol()).is_err());
}

#[test]
fn unit_balls() {
    let centre = dvector![1.0, 2.0, 3.0];
    let cross = ball_1(&centre, 1.0, tol()).unwrap();
    assert_eq!(cross.f_vector().unwrap(), vec![6, 12, 8, 1]);
    assert!(cross.vrep().unwrap().iter().all(|v| ((v - &centre).norm() - 1.0).abs() < 1e-12));

    let cube = ball_oo(&centre, 0.5, tol()).unwrap();
    assert_eq!(cube.f_vector().unwrap(), vec![8, 12, 6, 1]);
    assert!(cube.contains_strict(&centre).unwrap());

    assert!(ball_1(&centre, 0.0, tol()).is_err());
    assert!(ball_oo(&centre, -1.0, tol()).is_err());
}
