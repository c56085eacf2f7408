use anyhow::{Context, Result};
use arcplace::api::export_row;
use arcplace::prelude::*;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod table;

use provenance::{Inputs, Sidecar, Tally};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Generate, place and export hair-like arc populations")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Args, Clone, Copy, Debug)]
struct CanvasArgs {
    /// Canvas width
    #[arg(long, default_value_t = 800.0)]
    width: f64,
    /// Canvas height
    #[arg(long, default_value_t = 800.0)]
    height: f64,
}

impl CanvasArgs {
    fn canvas(&self) -> Result<Canvas> {
        Ok(Canvas::new(self.width, self.height)?)
    }
}

#[derive(Args, Clone, Debug)]
struct PlaceArgs {
    /// Minimum separation between placed arcs
    #[arg(long, default_value_t = 10.0)]
    min_dist: f64,
    /// Number of candidate arcs
    #[arg(long, default_value_t = 10)]
    amount: usize,
    /// Repositioning attempts before a candidate is dropped
    #[arg(long, default_value_t = 100)]
    budget: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// CSV output; a provenance sidecar is written next to it
    #[arg(long, default_value = "hairTests/arcs.csv")]
    out: PathBuf,
    /// Also print every accepted arc as a table row
    #[arg(long)]
    print: bool,
    #[command(flatten)]
    canvas: CanvasArgs,
}

#[derive(Subcommand)]
enum Action {
    /// Circular arcs from curvature and length (value or range "lo-hi")
    Circular {
        #[arg(long)]
        curvature: Param,
        #[arg(long)]
        length: Param,
        #[command(flatten)]
        place: PlaceArgs,
    },
    /// Elliptical arcs from eccentricity, length and rotation (value or range "lo-hi")
    Elliptical {
        #[arg(long)]
        eccentricity: Param,
        #[arg(long)]
        length: Param,
        /// Rotation in radians
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        rotation: Param,
        #[command(flatten)]
        place: PlaceArgs,
    },
    /// A single full ellipse placed inside the canvas
    CrossSection {
        #[arg(long)]
        semi_major: f64,
        #[arg(long)]
        semi_minor: f64,
        /// Rotation in radians
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        rotation: f64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value = "hairTests/ellipse.csv")]
        out: PathBuf,
        #[command(flatten)]
        canvas: CanvasArgs,
    },
    /// Load an arc table and re-check bounds and separation
    Load {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = 10.0)]
        min_dist: f64,
        #[command(flatten)]
        canvas: CanvasArgs,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Serialize)]
struct RunSummary {
    kind: &'static str,
    requested: usize,
    accepted: usize,
    dropped: usize,
    output: String,
    provenance: String,
}

#[derive(Serialize)]
struct LoadReport {
    kind: Option<&'static str>,
    arcs: usize,
    out_of_bounds: Vec<usize>,
    too_close: Vec<(usize, usize)>,
    colliding: Vec<(usize, usize)>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Circular {
            curvature,
            length,
            place,
        } => run(
            ArcSpec::Circular(CircularCfg { curvature, length }),
            &place,
        ),
        Action::Elliptical {
            eccentricity,
            length,
            rotation,
            place,
        } => run(
            ArcSpec::Elliptical(EllipticalCfg {
                eccentricity,
                length,
                rotation,
            }),
            &place,
        ),
        Action::CrossSection {
            semi_major,
            semi_minor,
            rotation,
            seed,
            out,
            canvas,
        } => cross_section(semi_major, semi_minor, rotation, seed, &out, canvas),
        Action::Load {
            input,
            min_dist,
            canvas,
        } => load(&input, min_dist, canvas),
        Action::Report => report(),
    }
}

fn run(spec: ArcSpec, args: &PlaceArgs) -> Result<()> {
    let kind = match spec {
        ArcSpec::Circular(_) => ArcKind::Circular,
        ArcSpec::Elliptical(_) => ArcKind::Elliptical,
    };
    let canvas = args.canvas.canvas()?;
    let cfg = PlacementCfg {
        min_dist: args.min_dist,
        retry_budget: args.budget,
    };
    tracing::info!(
        kind = kind.label(),
        amount = args.amount,
        min_dist = args.min_dist,
        seed = args.seed,
        out = %args.out.display(),
        "run"
    );
    let placement = generate(&spec, args.amount, canvas, &cfg, ReplayToken::new(args.seed))
        .context("generating arcs")?;

    if args.print {
        for (i, arc) in placement.accepted.iter().enumerate() {
            println!("{}", export_row(i, arc).join(","));
        }
    }

    let mut df = table::arcs_frame(kind, &placement.accepted)?;
    table::write_csv(&mut df, &args.out)?;
    let prov_path = Sidecar::new(&args.out, canvas, args.seed, Inputs::from(&spec))
        .with_tally(Tally::new(&cfg, &placement))
        .write()?;

    let summary = RunSummary {
        kind: kind.label(),
        requested: placement.requested(),
        accepted: placement.accepted.len(),
        dropped: placement.dropped(),
        output: args.out.display().to_string(),
        provenance: prov_path.display().to_string(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn cross_section(
    a: f64,
    b: f64,
    rotation: f64,
    seed: u64,
    out: &Path,
    canvas: CanvasArgs,
) -> Result<()> {
    tracing::info!(a, b, rotation, seed, out = %out.display(), "cross_section");
    let canvas = canvas.canvas()?;
    let factory = ArcFactory::new(canvas);
    let mut rng = ReplayToken::new(seed).to_std_rng();
    let ellipse = factory.cross_section(a, b, rotation, &mut rng)?;
    let mut df = table::ellipse_frame(&ellipse)?;
    table::write_csv(&mut df, out)?;
    Sidecar::new(out, canvas, seed, Inputs::Ellipse { a, b, rotation }).write()?;
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "center": [ellipse.center.x, ellipse.center.y],
            "output": out.display().to_string(),
        }))?
    );
    Ok(())
}

/// Exact engine where its preconditions hold, sampled otherwise.
fn precision_for(a: &Arc, b: &Arc) -> Precision {
    let exact_ok = |x: &Arc| x.kind == ArcKind::Circular && !x.is_rotated();
    if exact_ok(a) && exact_ok(b) {
        Precision::Exact
    } else {
        Precision::Fast
    }
}

fn check_loaded(arcs: &[Arc], min_dist: f64) -> Result<LoadReport> {
    let mut report = LoadReport {
        kind: arcs.first().map(|a| a.kind.label()),
        arcs: arcs.len(),
        out_of_bounds: Vec::new(),
        too_close: Vec::new(),
        colliding: Vec::new(),
    };
    for (i, arc) in arcs.iter().enumerate() {
        let outside = if arc.is_rotated() {
            fast_out_of_bounds(arc)
        } else {
            exact_out_of_bounds(arc)?
        };
        if outside {
            report.out_of_bounds.push(i);
        }
        for (j, other) in arcs.iter().enumerate().skip(i + 1) {
            match separation(arc, other, precision_for(arc, other))?.distance() {
                None => report.colliding.push((i, j)),
                Some(d) if d.floor() < min_dist => report.too_close.push((i, j)),
                Some(_) => {}
            }
        }
    }
    Ok(report)
}

fn load(input: &Path, min_dist: f64, canvas: CanvasArgs) -> Result<()> {
    tracing::info!(input = %input.display(), min_dist, "load");
    let arcs = table::read_arcs(input, canvas.canvas()?)?;
    let report = check_loaded(&arcs, min_dist)?;
    tracing::info!(
        arcs = report.arcs,
        out_of_bounds = report.out_of_bounds.len(),
        too_close = report.too_close.len(),
        colliding = report.colliding.len(),
        "loaded"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::git_rev(),
        "crate_version": arcplace::VERSION,
        "defaults": {
            "canvas": [Canvas::default().width, Canvas::default().height],
            "min_dist": PlacementCfg::default().min_dist,
            "retry_budget": PlacementCfg::default().retry_budget,
        },
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cmd::command().debug_assert();
    }

    #[test]
    fn parses_ranges_and_defaults() {
        let cmd = Cmd::try_parse_from([
            "cli",
            "circular",
            "--curvature",
            "0.002-0.01",
            "--length",
            "100",
        ])
        .unwrap();
        match cmd.action {
            Action::Circular {
                curvature,
                length,
                place,
            } => {
                assert_eq!(curvature, Param::range(0.002, 0.01));
                assert_eq!(length, Param::Fixed(100.0));
                assert_eq!(place.amount, 10);
                assert_eq!(place.min_dist, 10.0);
                assert_eq!(place.canvas.width, 800.0);
            }
            _ => panic!("expected circular"),
        }
        let bad = ["cli", "circular", "--curvature", "x", "--length", "1"];
        assert!(Cmd::try_parse_from(bad).is_err());
    }

    #[test]
    fn generated_table_reloads_clean() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("arcs.csv");
        let args = PlaceArgs {
            min_dist: 10.0,
            amount: 6,
            budget: 100,
            seed: 5,
            out: out.clone(),
            print: false,
            canvas: CanvasArgs {
                width: 800.0,
                height: 800.0,
            },
        };
        let spec = ArcSpec::Circular(CircularCfg {
            curvature: Param::range(0.01, 0.02),
            length: Param::Fixed(60.0),
        });
        run(spec, &args).unwrap();
        assert!(dir.path().join("arcs.provenance.json").exists());
        let arcs = table::read_arcs(&out, Canvas::default()).unwrap();
        assert!(!arcs.is_empty());
        let report = check_loaded(&arcs, 10.0).unwrap();
        assert!(report.colliding.is_empty());
    }

    #[test]
    fn overlapping_loaded_arcs_are_reported() {
        let canvas = Canvas::default();
        let a = Arc::circular(50.0, 5.0, 7.5, canvas)
            .unwrap()
            .with_center(Vec2::new(360.0, 400.0));
        let b = Arc::circular(50.0, 1.6, 4.7, canvas)
            .unwrap()
            .with_center(Vec2::new(440.0, 400.0));
        let far = Arc::circular(50.0, 0.0, 1.0, canvas)
            .unwrap()
            .with_center(Vec2::new(900.0, 100.0));
        // facing halves of two circles 5 apart along y = 200
        let right = Arc::circular(50.0, 5.0, 7.5, canvas)
            .unwrap()
            .with_center(Vec2::new(200.0, 200.0));
        let left = Arc::circular(50.0, 1.6, 4.7, canvas)
            .unwrap()
            .with_center(Vec2::new(305.0, 200.0));
        let report = check_loaded(&[a, b, far, right, left], 10.0).unwrap();
        assert_eq!(report.colliding, vec![(0, 1)]);
        assert_eq!(report.too_close, vec![(3, 4)]);
        assert_eq!(report.out_of_bounds, vec![2]);
    }
}
