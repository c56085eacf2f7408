//! `<stem>.provenance.json` sidecars for written tables.
//!
//! A sidecar pins one table to the code revision, the generator inputs and the
//! placement outcome, so a table can be regenerated from its seed.

use anyhow::{Context, Result};
use arcplace::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// `[lo, hi]` of a ranged parameter; fixed values repeat.
pub type Bounds = [f64; 2];

fn bounds(p: &Param) -> Bounds {
    let (lo, hi) = p.bounds();
    [lo, hi]
}

/// Generator inputs by shape.
#[derive(Debug, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Inputs {
    Circular {
        curvature: Bounds,
        length: Bounds,
    },
    Elliptical {
        eccentricity: Bounds,
        length: Bounds,
        rotation: Bounds,
    },
    Ellipse {
        a: f64,
        b: f64,
        rotation: f64,
    },
}

impl From<&ArcSpec> for Inputs {
    fn from(spec: &ArcSpec) -> Self {
        match spec {
            ArcSpec::Circular(c) => Inputs::Circular {
                curvature: bounds(&c.curvature),
                length: bounds(&c.length),
            },
            ArcSpec::Elliptical(e) => Inputs::Elliptical {
                eccentricity: bounds(&e.eccentricity),
                length: bounds(&e.length),
                rotation: bounds(&e.rotation),
            },
        }
    }
}

/// Accept/drop tally of one placement run.
#[derive(Debug, Serialize)]
pub struct Tally {
    pub min_dist: f64,
    pub retry_budget: usize,
    pub requested: usize,
    pub accepted: usize,
    pub dropped: Vec<usize>,
    pub moves: usize,
}

impl Tally {
    pub fn new(cfg: &PlacementCfg, placement: &Placement) -> Self {
        let mut dropped = Vec::new();
        let mut moves = 0;
        for outcome in &placement.outcomes {
            match *outcome {
                Outcome::Accepted { attempts, .. } => moves += attempts,
                Outcome::Dropped { index, attempts } => {
                    moves += attempts;
                    dropped.push(index);
                }
            }
        }
        Self {
            min_dist: cfg.min_dist,
            retry_budget: cfg.retry_budget,
            requested: placement.requested(),
            accepted: placement.accepted.len(),
            dropped,
            moves,
        }
    }
}

/// Everything recorded next to one table.
#[derive(Debug, Serialize)]
pub struct Sidecar {
    pub code_rev: Option<String>,
    pub crate_version: &'static str,
    pub table: PathBuf,
    pub canvas: [f64; 2],
    pub seed: u64,
    pub inputs: Inputs,
    pub tally: Option<Tally>,
}

impl Sidecar {
    pub fn new(table: &Path, canvas: Canvas, seed: u64, inputs: Inputs) -> Self {
        Self {
            code_rev: git_rev(),
            crate_version: arcplace::VERSION,
            table: table.to_path_buf(),
            canvas: [canvas.width, canvas.height],
            seed,
            inputs,
            tally: None,
        }
    }

    pub fn with_tally(mut self, tally: Tally) -> Self {
        self.tally = Some(tally);
        self
    }

    /// Write next to `self.table`; returns the sidecar path.
    pub fn write(&self) -> Result<PathBuf> {
        let path = sidecar_path(&self.table);
        let body = serde_json::to_vec_pretty(self)?;
        fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

/// `hairTests/arcs.csv` -> `hairTests/arcs.provenance.json`.
pub fn sidecar_path(table: &Path) -> PathBuf {
    table.with_extension("provenance.json")
}

/// Short commit hash of the working tree, if it is a git checkout.
pub fn git_rev() -> Option<String> {
    let out = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let rev = String::from_utf8(out.stdout).ok()?;
    Some(rev.trim().to_string()).filter(|r| !r.is_empty())
}
