//! Placement timing probe on the default canvas.
//!
//! Purpose
//! - Give a reproducible data point for "how long does a 100-arc run take and
//!   how many candidates are dropped?" with the default constraints.

use std::time::Instant;

use arcplace::prelude::*;

fn main() {
    let spec = ArcSpec::Circular(CircularCfg::default());
    let cfg = PlacementCfg::default();
    let canvas = Canvas::default();

    let start = Instant::now();
    let placement = generate(&spec, 100, canvas, &cfg, ReplayToken::new(2024))
        .expect("default parameters are valid");
    let elapsed = start.elapsed().as_secs_f64() * 1e3;

    let retries: usize = placement
        .outcomes
        .iter()
        .map(|o| match *o {
            Outcome::Accepted { attempts, .. } | Outcome::Dropped { attempts, .. } => attempts,
        })
        .sum();
    println!(
        "canvas={}x{} min_dist={} budget={}",
        canvas.width, canvas.height, cfg.min_dist, cfg.retry_budget
    );
    println!(
        "requested={} accepted={} dropped={} retries={retries}",
        placement.requested(),
        placement.accepted.len(),
        placement.dropped()
    );
    println!("placement_time_ms={elapsed:.3}");
}
