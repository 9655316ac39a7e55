//! One recursion level of Gift-Wrapping: a full-dimensional swarm in R^d.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;

use tracing::{debug, debug_span, trace};

use crate::error::{PolytopeError, Result};
use crate::geom::{unit_vector, AffineBasis, Tol, Vector};
use crate::subcp::{FaceKey, Incidence, PointRef, SubCp, SubPoint};

fn degenerate(context: &'static str) -> PolytopeError {
    PolytopeError::Degenerate { context }
}

/// Why a level stopped before closing its boundary.
#[derive(Debug)]
enum Halt {
    /// Points that some facet holds in its plane without using them as
    /// vertices, while an earlier face of the level already does. The level
    /// starts over without them.
    Drop(BTreeSet<usize>),
    Fail(PolytopeError),
}

impl From<PolytopeError> for Halt {
    fn from(e: PolytopeError) -> Self {
        Halt::Fail(e)
    }
}

type Step<T> = std::result::Result<T, Halt>;

fn uses_any(face: Option<&SubCp>, ids: &BTreeSet<usize>) -> bool {
    face.is_some_and(|f| ids.iter().any(|&id| f.contains_vertex(id)))
}

/// State of a single level. Facets live in an arena (`faces`); the ridge map
/// and the facet index refer to them by position. A facet replaced during
/// the walk stays in the arena with `alive` cleared.
pub(crate) struct Wrapper {
    swarm: Vec<PointRef>,
    space_dim: usize,
    tol: Tol,
    faces: Vec<SubCp>,
    alive: Vec<bool>,
    face_index: HashMap<FaceKey, usize>,
    incidence: HashMap<FaceKey, (usize, Option<usize>)>,
    /// Ids used as vertices by the seed or by any facet built so far.
    protected: HashSet<usize>,
}

impl Wrapper {
    /// Hull of `swarm`, which must span its whole space.
    pub(crate) fn wrap(swarm: Vec<PointRef>, tol: Tol) -> Result<SubCp> {
        match Self::wrap_level(swarm, None, tol) {
            Ok(p) => Ok(p),
            Err(Halt::Fail(e)) => Err(e),
            // without a seed the level restarts instead
            Err(Halt::Drop(_)) => Err(degenerate("point removal reached the outermost level")),
        }
    }

    /// `init_face`, when given, is a known facet (expressed in this level's
    /// coordinates) and replaces the initial-plane search. Its vertices are
    /// never dropped here; a conflict on them is handed to the caller.
    fn wrap_level(mut swarm: Vec<PointRef>, init_face: Option<SubCp>, tol: Tol) -> Step<SubCp> {
        let space_dim = swarm.first().map(|p| p.space_dim()).ok_or(PolytopeError::EmptySwarm)?;
        let _span = debug_span!("gift_wrapping", dim = space_dim, points = swarm.len()).entered();
        debug_assert!(
            AffineBasis::from_points(swarm.iter().map(|p| &p.coords), tol).map_or(false, |b| b.is_full()),
            "swarm does not span its space"
        );
        loop {
            match space_dim {
                0 => return Err(degenerate("zero-dimensional space").into()),
                1 => {
                    let lo = swarm.iter().min_by(|a, b| a.coords[0].total_cmp(&b.coords[0]));
                    let hi = swarm.iter().max_by(|a, b| a.coords[0].total_cmp(&b.coords[0]));
                    return match (lo, hi) {
                        (Some(lo), Some(hi)) if lo.id != hi.id => Ok(SubCp::edge(Rc::clone(lo), Rc::clone(hi))),
                        _ => Err(degenerate("one-dimensional swarm has a single point").into()),
                    };
                }
                2 => return Ok(SubCp::planar(&swarm, tol)?),
                d if swarm.len() == d + 1 => return Ok(SubCp::simplex(swarm)),
                _ => {}
            }

            let mut w = Wrapper {
                swarm,
                space_dim,
                tol,
                faces: Vec::new(),
                alive: Vec::new(),
                face_index: HashMap::new(),
                incidence: HashMap::new(),
                protected: init_face
                    .iter()
                    .flat_map(|f| f.vertices().iter().map(|p| p.id))
                    .collect(),
            };
            match w.run(init_face.clone()) {
                Err(Halt::Drop(ids)) if !uses_any(init_face.as_ref(), &ids) => {
                    debug!(count = ids.len(), "restarting level without facet-interior points");
                    swarm = w.swarm;
                    swarm.retain(|p| !ids.contains(&p.id));
                }
                other => return other,
            }
        }
    }

    fn run(&mut self, init_face: Option<SubCp>) -> Step<SubCp> {
        let d = self.space_dim;
        let init = match init_face {
            Some(mut f) => {
                // a ridge handed down from the level above lies in x_d = 0
                let mut n = f.normal().cloned().unwrap_or_else(|| unit_vector(d, d - 1));
                self.orient_normal(&mut n, &f.vertices()[0].coords);
                f.set_normal(n);
                f
            }
            None => {
                let plane = self.build_initial_plane()?;
                self.build_face(plane, None)?
            }
        };
        if init.dim() + 1 != d {
            return Err(degenerate("initial facet has the wrong dimension").into());
        }

        let mut queue = VecDeque::new();
        queue.push_back(self.push_face(init)?);

        while let Some(fi) = queue.pop_front() {
            if !self.alive[fi] {
                continue;
            }
            let ridges = self.faces[fi].faces().into_owned();
            for ridge in &ridges {
                if matches!(self.incidence.get(&ridge.key()), Some((_, Some(_)))) {
                    continue;
                }
                let next = self.roll_over(fi, ridge)?;
                if let Some(&known) = self.face_index.get(&next.key()) {
                    if known == fi {
                        return Err(degenerate("roll-over returned the facet it started from").into());
                    }
                    // same vertex set reached across a ridge the old copy lacks
                    debug!(facet = known, "replacing a facet rebuilt from another ridge");
                    self.retire(known, &mut queue);
                }
                let ni = self.push_face(next)?;
                if self.has_open_ridge(ni) {
                    queue.push_back(ni);
                }
            }
        }

        let mut remap = vec![usize::MAX; self.faces.len()];
        let mut faces = Vec::new();
        for (i, (f, alive)) in std::mem::take(&mut self.faces).into_iter().zip(&self.alive).enumerate() {
            if *alive {
                remap[i] = faces.len();
                faces.push(f);
            }
        }
        let mut incidence = Incidence::new();
        for (key, (f1, f2)) in self.incidence.drain() {
            let f2 = f2.ok_or(degenerate("hull boundary did not close"))?;
            let (a, b) = (remap[f1], remap[f2]);
            incidence.insert(key, (a.min(b), a.max(b)));
        }
        debug!(facets = faces.len(), ridges = incidence.len(), "level closed");

        if faces.len() == d + 1 && faces.iter().all(SubCp::is_simplex) {
            let vertices = faces.iter().flat_map(|f| f.vertices().iter().cloned()).collect();
            return Ok(SubCp::simplex(vertices));
        }
        Ok(SubCp::non_simplex(faces, incidence))
    }

    /// Add a facet and register it on each of its ridges.
    fn push_face(&mut self, face: SubCp) -> Result<usize> {
        let idx = self.faces.len();
        for r in face.faces().iter() {
            match self.incidence.entry(r.key()) {
                Entry::Occupied(mut e) => {
                    let slot = e.get_mut();
                    if slot.1.is_some() {
                        return Err(degenerate("ridge shared by more than two facets"));
                    }
                    slot.1 = Some(idx);
                }
                Entry::Vacant(e) => {
                    e.insert((idx, None));
                }
            }
        }
        self.protected.extend(face.vertices().iter().map(|p| p.id));
        self.face_index.insert(face.key(), idx);
        self.faces.push(face);
        self.alive.push(true);
        Ok(idx)
    }

    fn has_open_ridge(&self, idx: usize) -> bool {
        self.faces[idx]
            .faces()
            .iter()
            .any(|r| matches!(self.incidence.get(&r.key()), Some((_, None))))
    }

    /// Take facet `idx` out of the walk. Its neighbours get the shared
    /// ridges back as open ridges and are queued again.
    fn retire(&mut self, idx: usize, queue: &mut VecDeque<usize>) {
        self.alive[idx] = false;
        self.face_index.remove(&self.faces[idx].key());
        for r in self.faces[idx].faces().iter() {
            let key = r.key();
            match self.incidence.get(&key).copied() {
                Some((a, Some(b))) => {
                    let other = if a == idx { b } else { a };
                    self.incidence.insert(key, (other, None));
                    queue.push_back(other);
                }
                Some(_) => {
                    self.incidence.remove(&key);
                }
                None => {}
            }
        }
    }

    /// Flip `normal` so the swarm lies on its non-positive side. The first
    /// point off the hyperplane decides.
    fn orient_normal(&self, normal: &mut Vector, origin: &Vector) {
        for s in &self.swarm {
            let dot = (&s.coords - origin).dot(normal);
            if self.tol.is_neg(dot) {
                break;
            }
            if self.tol.is_pos(dot) {
                *normal = -&*normal;
                break;
            }
        }
    }

    fn outer_normal(&self, plane: &AffineBasis) -> Result<Vector> {
        let mut n = plane.lin.orthonormal_vector().ok_or(degenerate("facet plane fills the space"))?;
        self.orient_normal(&mut n, &plane.origin);
        Ok(n)
    }

    /// Supporting hyperplane through at least `d` swarm points (Swart's
    /// rotation): start at the lexicographic minimum with normal `-e_1` and
    /// repeatedly tilt the normal towards the point of largest angle.
    fn build_initial_plane(&self) -> Result<AffineBasis> {
        let d = self.space_dim;
        let tol = self.tol;
        let origin = self
            .swarm
            .iter()
            .min_by(|a, b| tol.cmp_lex(&a.coords, &b.coords))
            .ok_or(PolytopeError::EmptySwarm)?;
        let mut plane = AffineBasis::new(origin.coords.clone());
        let mut n = -unit_vector(d, 0);

        while plane.sub_dim() < d - 1 {
            let mut lb = plane.lin.clone();
            lb.add_vector(&n, tol);
            let e = lb.orthonormal_vector().ok_or(degenerate("initial plane: no free direction"))?;

            let mut best: Option<(f64, &PointRef, Vector)> = None;
            for s in &self.swarm {
                let w = &s.coords - &origin.coords;
                let (we, wn) = (e.dot(&w), n.dot(&w));
                let u = &e * we + &n * wn;
                let len = u.norm();
                if tol.is_zero(len) {
                    continue;
                }
                let cos = we / len;
                if best.as_ref().map_or(true, |(c, _, _)| cos < *c) {
                    best = Some((cos, s, u));
                }
            }
            let (_, s, r) = best.ok_or(degenerate("initial plane: no candidate point"))?;
            if !plane.add_point(&s.coords, tol) {
                return Err(degenerate("initial plane: candidate already in the plane"));
            }
            let r = r.normalize();
            let tilted = &e * r.dot(&n) - &n * r.dot(&e);
            let len = tilted.norm();
            if tol.is_zero(len) {
                return Err(degenerate("initial plane: normal vanished"));
            }
            n = tilted / len;
            self.orient_normal(&mut n, &origin.coords);
        }
        Ok(plane)
    }

    /// Facet lying in `plane` (an affine basis of dimension `d-1`).
    ///
    /// `init_ridge` is a ridge of the facet already known from the level
    /// above; it seeds the recursive wrap and its vertices always belong to
    /// the facet.
    fn build_face(&mut self, plane: AffineBasis, init_ridge: Option<&SubCp>) -> Step<SubCp> {
        let d = self.space_dim;
        let tol = self.tol;
        let mut in_plane: Vec<PointRef> = self
            .swarm
            .iter()
            .filter(|s| plane.contains(&s.coords, tol))
            .cloned()
            .collect();
        if let Some(ridge) = init_ridge {
            for p in ridge.vertices() {
                if !in_plane.iter().any(|s| s.id == p.id) {
                    in_plane.push(Rc::clone(p));
                }
            }
        }
        if in_plane.len() < d {
            return Err(degenerate("facet plane holds fewer than d points").into());
        }

        let mut face = if in_plane.len() == d {
            SubCp::simplex(in_plane)
        } else {
            let projected: Vec<PointRef> = in_plane.iter().map(|p| SubPoint::project(p, &plane)).collect();
            let init = init_ridge.map(|r| {
                let mut prj = r.project_to(&plane);
                prj.set_normal(unit_vector(d - 1, d - 2));
                prj
            });
            let sub = Wrapper::wrap_level(projected, init, tol)?;
            let face = sub.to_previous_space().ok_or(degenerate("facet could not be lifted"))?;

            // points of the facet plane that are not facet vertices can never be hull vertices
            let dropped: BTreeSet<usize> = in_plane
                .iter()
                .map(|p| p.id)
                .filter(|&id| !face.contains_vertex(id))
                .collect();
            if dropped.iter().any(|id| self.protected.contains(id)) {
                return Err(Halt::Drop(dropped));
            }
            if !dropped.is_empty() {
                trace!(count = dropped.len(), "dropping non-vertex points");
                self.swarm.retain(|p| !dropped.contains(&p.id));
            }
            face
        };

        let n = self.outer_normal(&plane)?;
        face.set_normal(n);
        Ok(face)
    }

    /// Neighbour of facet `fi` across `ridge`.
    ///
    /// Rotate the facet's hyperplane around the ridge: `v` lies in the facet,
    /// orthogonal to the ridge, pointing inwards; every swarm point off the
    /// ridge is projected onto the plane `(v, N)` and the one with the
    /// smallest cosine to `v` spans the new facet together with the ridge.
    fn roll_over(&mut self, fi: usize, ridge: &SubCp) -> Step<SubCp> {
        let d = self.space_dim;
        let tol = self.tol;
        let face = &self.faces[fi];
        let normal = face.normal().cloned().ok_or(degenerate("facet without normal"))?;
        let mut ridge_basis = AffineBasis::from_points(ridge.vertices().iter().map(|p| &p.coords), tol)
            .ok_or(degenerate("empty ridge"))?;
        if ridge_basis.sub_dim() + 2 != d {
            return Err(degenerate("ridge has the wrong dimension").into());
        }
        let f = face
            .vertices()
            .iter()
            .find(|p| !ridge.contains_vertex(p.id))
            .ok_or(degenerate("facet has no vertex off the ridge"))?;

        let mut lb = ridge_basis.lin.clone();
        lb.add_vector(&normal, tol);
        let mut v = lb.orthonormal_vector().ok_or(degenerate("roll-over: no in-facet direction"))?;
        if tol.is_neg(v.dot(&(&f.coords - &ridge_basis.origin))) {
            v = -v;
        }

        let mut best: Option<(f64, PointRef)> = None;
        for s in &self.swarm {
            if ridge_basis.contains(&s.coords, tol) {
                continue;
            }
            let w = &s.coords - &ridge_basis.origin;
            let (wv, wn) = (v.dot(&w), normal.dot(&w));
            let len = wv.hypot(wn);
            if tol.is_zero(len) {
                continue;
            }
            let cos = wv / len;
            if best.as_ref().map_or(true, |(c, _)| cos < *c) {
                best = Some((cos, Rc::clone(s)));
            }
        }
        let (cos, pivot) = best.ok_or(degenerate("roll-over found no candidate point"))?;
        trace!(facet = fi, pivot = pivot.id, cos, "roll over ridge");

        if !ridge_basis.add_point(&pivot.coords, tol) {
            return Err(degenerate("roll-over pivot lies in the ridge").into());
        }
        self.build_face(ridge_basis, Some(ridge))
    }
}
