mod provenance;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use polytopes::api::{write_txt, ConvexPolytop, HrepToVrep, HyperPlane, Tol, Vector};
use serde::Deserialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "polytopes-cli")]
#[command(about = "Convex hulls and polytope conversions")]
struct Cmd {
    /// Comparison tolerance for every geometric predicate
    #[arg(long, global = true, default_value_t = 1e-8)]
    eps: f64,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Wrap a point swarm (or convert half-spaces) and write the text format
    Hull {
        #[arg(long)]
        input: PathBuf,
        /// Output file; stdout if omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Vertices of a half-space system, as JSON
    Hrep {
        #[arg(long)]
        input: PathBuf,
        /// Walk the edge graph instead of intersecting every d-subset
        #[arg(long)]
        walk: bool,
    },
    /// Face counts per dimension, as JSON
    Fvector {
        #[arg(long)]
        input: PathBuf,
    },
}

#[derive(Deserialize)]
struct HalfspaceIn {
    normal: Vec<f64>,
    offset: f64,
}

/// `{"points": [[..], ..]}` or `{"halfspaces": [{"normal": [..], "offset": c}, ..]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Input {
    Points { points: Vec<Vec<f64>> },
    Halfspaces { halfspaces: Vec<HalfspaceIn> },
}

impl Input {
    fn read(path: &Path) -> Result<Self> {
        let raw = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_slice(&raw).with_context(|| format!("parsing {}", path.display()))
    }

    fn halfspaces(hs: Vec<HalfspaceIn>) -> Result<Vec<HyperPlane>> {
        hs.into_iter()
            .enumerate()
            .map(|(i, h)| {
                HyperPlane::new(Vector::from_vec(h.normal), h.offset).with_context(|| format!("half-space #{i}"))
            })
            .collect()
    }

    fn into_polytope(self, tol: Tol) -> Result<ConvexPolytop> {
        let p = match self {
            Input::Points { points } => {
                ConvexPolytop::from_points(points.into_iter().map(Vector::from_vec).collect(), true, tol)?
            }
            Input::Halfspaces { halfspaces } => ConvexPolytop::from_halfspaces(Self::halfspaces(halfspaces)?, tol)?,
        };
        Ok(p)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let cmd = Cmd::parse();
    if cmd.eps.is_nan() || cmd.eps <= 0.0 {
        bail!("--eps must be positive, got {}", cmd.eps);
    }
    let tol = Tol::new(cmd.eps);
    match cmd.action {
        Action::Hull { input, out } => hull(&input, out.as_deref(), tol),
        Action::Hrep { input, walk } => hrep(&input, walk, tol, io::stdout().lock()),
        Action::Fvector { input } => fvector(&input, tol, io::stdout().lock()),
    }
}

fn hull(input: &Path, out: Option<&Path>, tol: Tol) -> Result<()> {
    let p = Input::read(input)?.into_polytope(tol)?;
    let f = p.f_vector()?;
    tracing::info!(input = %input.display(), dim = p.polytop_dim()?, f_vector = ?f, "hull");

    let Some(out) = out else {
        write_txt(&p, io::stdout().lock())?;
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    let mut w = BufWriter::new(file);
    write_txt(&p, &mut w)?;
    w.flush()?;

    let params = serde_json::json!({
        "input": input.to_string_lossy(),
        "eps": tol.eps,
        "f_vector": f,
    });
    let sidecar = provenance::write_sidecar(out, &params)?;
    tracing::info!(out = %out.display(), sidecar = %sidecar.display(), "written");
    Ok(())
}

fn hrep<W: Write>(input: &Path, walk: bool, tol: Tol, mut out: W) -> Result<()> {
    let Input::Halfspaces { halfspaces } = Input::read(input)? else {
        bail!("{} holds points, expected half-spaces", input.display());
    };
    let hps = Input::halfspaces(halfspaces)?;
    let strategy = if walk { HrepToVrep::Walk } else { HrepToVrep::Naive };
    let vs = strategy.convert(&hps, tol)?;
    tracing::info!(halfspaces = hps.len(), vertices = vs.len(), ?strategy, "hrep");
    let rows: Vec<Vec<f64>> = vs.iter().map(|v| v.iter().copied().collect()).collect();
    serde_json::to_writer(&mut out, &serde_json::json!({ "vertices": rows }))?;
    writeln!(out)?;
    Ok(())
}

fn fvector<W: Write>(input: &Path, tol: Tol, mut out: W) -> Result<()> {
    let p = Input::read(input)?.into_polytope(tol)?;
    serde_json::to_writer(&mut out, &p.f_vector()?)?;
    writeln!(out)?;
    Ok(())
}
