//! Plain-text dump of a full-dimensional polytope.
//!
//! ```text
//! PDim: 2
//! SDim: 2
//!
//! Vertices: 4
//! 0 0
//! ...
//!
//! Faces: 4
//! N: -1 0
//! 0 1
//! ...
//! ```
//!
//! Every facet is its outer unit normal followed by the ascending indices
//! of its vertices in the `Vertices` block.

use std::io::Write;

use crate::error::Result;
use crate::lattice::FaceLattice;
use crate::polytope::{hrep_of_lattice, ConvexPolytop};

fn join<T: std::fmt::Display>(xs: impl IntoIterator<Item = T>) -> String {
    xs.into_iter().map(|x| x.to_string()).collect::<Vec<_>>().join(" ")
}

/// `-0` prints as `0`.
#[inline]
fn clean(x: f64) -> f64 {
    x + 0.0
}

/// Write `p` in the text format above.
pub fn write_txt<W: Write>(p: &ConvexPolytop, out: W) -> Result<()> {
    write_lattice_txt(p.face_lattice()?, out)
}

/// Same format, straight from a face lattice.
pub fn write_lattice_txt<W: Write>(fl: &FaceLattice, mut out: W) -> Result<()> {
    let hps = hrep_of_lattice(fl)?;
    let facets = fl.level(fl.dim() - 1);

    writeln!(out, "PDim: {}", fl.dim())?;
    writeln!(out, "SDim: {}", fl.space_dim())?;
    writeln!(out)?;
    writeln!(out, "Vertices: {}", fl.points().len())?;
    for v in fl.points() {
        writeln!(out, "{}", join(v.iter().map(|&x| clean(x))))?;
    }
    writeln!(out)?;
    writeln!(out, "Faces: {}", facets.len())?;
    for (hp, &id) in hps.iter().zip(facets) {
        writeln!(out, "N: {}", join(hp.normal.iter().map(|&x| clean(x))))?;
        writeln!(out, "{}", join(&fl.node(id).vertices))?;
    }
    Ok(())
}
