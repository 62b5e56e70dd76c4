//! Floor Plan Headless Layout Harness
//!
//! Runs the layout engine entirely in-process. No rendering, no export,
//! no networking.
//!
//! Usage:
//!   cargo run -p floorplan-simtest                           # scenario sweep
//!   cargo run -p floorplan-simtest -- --verbose --seeds 500
//!   cargo run -p floorplan-simtest -- --request house.json --seed 42 --pretty
//!   echo '{"rooms": {"bedroom": 2}, "width": 50, "height": 50}' | \
//!     cargo run -p floorplan-simtest -- --request -

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use floorplan_logic::canvas::{scaling_factor, size_canvas, Dimensions};
use floorplan_logic::catalog::{RoomCatalog, RoomCategory};
use floorplan_logic::config::{validate_config, LayoutConfig};
use floorplan_logic::doorway::{connect, WallOrientation};
use floorplan_logic::error::LayoutError;
use floorplan_logic::geometry::{self, Severity};
use floorplan_logic::occupancy::Rect;
use floorplan_logic::placement::{generate_layout, InstanceOutcome, LayoutResult, UnplacedReason};
use floorplan_logic::request::HouseRequest;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Headless floor plan layout harness.
#[derive(Parser, Debug)]
#[command(name = "floorplan-simtest", about = "Headless floor plan layout harness")]
struct Cli {
    /// House request JSON to lay out ('-' reads stdin). Without it, the
    /// scenario sweep runs instead.
    #[arg(short = 'r', long = "request")]
    request: Option<String>,

    /// Layout config JSON (missing fields use defaults)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Random seed, overrides the config seed
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Number of seeds for the property sweep
    #[arg(long = "seeds", default_value = "200")]
    seeds: u64,

    /// Pretty-print the layout JSON
    #[arg(long = "pretty")]
    pretty: bool,

    /// Print every check, not just failures
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("error: cannot load config '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => LayoutConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let config_errors = validate_config(&config);
    if !config_errors.is_empty() {
        for e in &config_errors {
            eprintln!("error: {}", e);
        }
        process::exit(1);
    }

    match &cli.request {
        Some(source) => run_request(source, &config, cli.pretty),
        None => run_sweep(&config, cli.seeds, cli.verbose),
    }
}

fn load_config(path: &Path) -> Result<LayoutConfig, String> {
    let text = fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&text).map_err(|e| e.to_string())
}

// ── Request mode ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct RunReport<'a> {
    layout: &'a LayoutResult,
    warnings: Vec<String>,
}

fn run_request(source: &str, config: &LayoutConfig, pretty: bool) {
    let text = if source == "-" {
        let mut buf = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            eprintln!("error: cannot read stdin: {}", e);
            process::exit(1);
        }
        buf
    } else {
        match fs::read_to_string(source) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: cannot read '{}': {}", source, e);
                process::exit(1);
            }
        }
    };

    let layout = match layout_from_json(&text, config) {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    let warnings: Vec<String> = geometry::validate_layout(&layout)
        .into_iter()
        .map(|v| {
            if v.severity == Severity::Error {
                tracing::error!("{}: {}", v.category, v.message);
            } else {
                tracing::warn!("{}: {}", v.category, v.message);
            }
            v.message
        })
        .collect();

    let report = RunReport {
        layout: &layout,
        warnings,
    };
    let json = if pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    };
    match json {
        Ok(s) => println!("{}", s),
        Err(e) => {
            eprintln!("error: cannot serialize layout: {}", e);
            process::exit(1);
        }
    }
}

fn layout_from_json(text: &str, config: &LayoutConfig) -> Result<LayoutResult, LayoutError> {
    let request = HouseRequest::from_json(text)?;
    let mut rng = config.rng();
    generate_layout(&request, config, &mut rng)
}

// ── Scenario sweep ──────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn run_sweep(config: &LayoutConfig, seeds: u64, verbose: bool) {
    println!("=== Floor Plan Layout Harness ===\n");

    let mut results = Vec::new();

    // 1. Canvas sizing & room catalog
    results.extend(validate_canvas_and_catalog(config, verbose));

    // 2. Request validation
    results.extend(validate_requests(config));

    // 3. Concrete placement scenarios
    results.extend(validate_scenarios(config, verbose));

    // 4. Doorway connector
    results.extend(validate_doorways(config));

    // 5. Property sweep over seeds
    results.extend(validate_properties(config, seeds));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        process::exit(1);
    }
}

// ── 1. Canvas & Catalog ─────────────────────────────────────────────────

fn validate_canvas_and_catalog(config: &LayoutConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Canvas & Catalog ---");
    let mut results = Vec::new();
    let base = Dimensions::new(50.0, 50.0);

    let small = size_canvas(base, 4, config);
    results.push(TestResult {
        name: "canvas_four_rooms_unscaled".into(),
        passed: small == base,
        detail: format!("4 rooms → {}×{}", small.width, small.height),
    });

    let factor = scaling_factor(6, config);
    let six = size_canvas(base, 6, config);
    results.push(TestResult {
        name: "canvas_six_rooms_doubled".into(),
        passed: factor == 2 && six == Dimensions::new(100.0, 100.0),
        detail: format!("factor {} → {}×{}", factor, six.width, six.height),
    });

    let monotonic = (0..100u32)
        .map(|n| size_canvas(base, n, config))
        .collect::<Vec<_>>()
        .windows(2)
        .all(|w| w[1].width >= w[0].width && w[1].height >= w[0].height);
    results.push(TestResult {
        name: "canvas_monotonic".into(),
        passed: monotonic,
        detail: "canvas never shrinks as room count grows (0..100)".into(),
    });

    let tiny = RoomCatalog::for_canvas(Dimensions::new(10.0, 10.0), config);
    results.push(TestResult {
        name: "catalog_min_base_size".into(),
        passed: tiny.base_size() == config.min_base_size,
        detail: format!("10×10 canvas → base size {}", tiny.base_size()),
    });

    let catalog = RoomCatalog::for_canvas(base, config);
    let all_positive = RoomCategory::all().iter().all(|&c| {
        let s = catalog.size_of(c);
        s.width > 0.0 && s.height > 0.0
    });
    results.push(TestResult {
        name: "catalog_positive_sizes".into(),
        passed: all_positive,
        detail: format!("{} categories at base size {}", RoomCategory::all().len(), catalog.base_size()),
    });

    if verbose {
        println!("  Room sizes on a 50×50 canvas:");
        for &c in RoomCategory::all() {
            let s = catalog.size_of(c);
            println!("    {:12}: {:.1} × {:.1}", c.name(), s.width, s.height);
        }
    }

    results
}

// ── 2. Request Validation ───────────────────────────────────────────────

fn validate_requests(config: &LayoutConfig) -> Vec<TestResult> {
    println!("--- Request Validation ---");
    let mut results = Vec::new();

    let missing_height = layout_from_json(r#"{"rooms": {"bedroom": 2}, "width": 50}"#, config);
    results.push(TestResult {
        name: "request_missing_height".into(),
        passed: matches!(missing_height, Err(LayoutError::MissingField("height"))),
        detail: describe(&missing_height),
    });

    let missing_rooms = layout_from_json(r#"{"width": 50, "height": 50}"#, config);
    results.push(TestResult {
        name: "request_missing_rooms".into(),
        passed: matches!(missing_rooms, Err(LayoutError::MissingField("rooms"))),
        detail: describe(&missing_rooms),
    });

    let unknown = layout_from_json(
        r#"{"rooms": {"bedroom": 1, "balcony": 1}, "width": 50, "height": 50}"#,
        config,
    );
    results.push(TestResult {
        name: "request_unknown_category".into(),
        passed: matches!(&unknown, Err(LayoutError::UnknownCategory(name)) if name == "balcony"),
        detail: describe(&unknown),
    });

    results
}

fn describe(result: &Result<LayoutResult, LayoutError>) -> String {
    match result {
        Ok(layout) => format!("unexpected success: {} rooms", layout.rooms.len()),
        Err(e) => e.to_string(),
    }
}

// ── 3. Placement Scenarios ──────────────────────────────────────────────

fn validate_scenarios(config: &LayoutConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Placement Scenarios ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or(42));

    let request = HouseRequest::new(
        [("bedroom", 2), ("kitchen", 1), ("living room", 1)],
        50.0,
        50.0,
    );
    match generate_layout(&request, config, &mut rng) {
        Ok(layout) => {
            let living: Vec<_> = layout.rooms_of(RoomCategory::LivingRoom).collect();
            let anchored = living.len() == 1 && (living[0].rect.x, living[0].rect.y) == (16.0, 25.0);
            results.push(TestResult {
                name: "scenario_small_house".into(),
                passed: layout.rooms.len() == 4 && anchored,
                detail: format!(
                    "{} rooms, {} doorways, living room anchored={}",
                    layout.rooms.len(),
                    layout.doorways.len(),
                    anchored
                ),
            });
            if verbose {
                for (i, r) in layout.rooms.iter().enumerate() {
                    println!(
                        "    #{} {:12} ({:.1}, {:.1}) {:.1}×{:.1}",
                        i,
                        r.category.name(),
                        r.rect.x,
                        r.rect.y,
                        r.rect.width,
                        r.rect.height
                    );
                }
            }
        }
        Err(e) => results.push(TestResult {
            name: "scenario_small_house".into(),
            passed: false,
            detail: e.to_string(),
        }),
    }

    let request = HouseRequest::new([("garage", 6)], 50.0, 50.0);
    match generate_layout(&request, config, &mut rng) {
        Ok(layout) => {
            let no_living = layout.rooms_of(RoomCategory::LivingRoom).count() == 0;
            results.push(TestResult {
                name: "scenario_garages_only".into(),
                passed: layout.canvas == Dimensions::new(100.0, 100.0)
                    && no_living
                    && layout.doorways.is_empty()
                    && layout.outcomes.len() == 6,
                detail: format!(
                    "canvas {}×{}, {} of 6 garages placed at random",
                    layout.canvas.width,
                    layout.canvas.height,
                    layout.rooms.len()
                ),
            });
        }
        Err(e) => results.push(TestResult {
            name: "scenario_garages_only".into(),
            passed: false,
            detail: e.to_string(),
        }),
    }

    results
}

// ── 4. Doorway Connector ────────────────────────────────────────────────

fn validate_doorways(config: &LayoutConfig) -> Vec<TestResult> {
    println!("--- Doorway Connector ---");
    let mut results = Vec::new();

    let bedroom = Rect::new(10.0, 10.0, 12.0, 14.4);
    let bathroom = Rect::new(22.0, 10.0, 9.6, 8.4);
    let door = connect(0, &bedroom, 1, &bathroom, config.doorway_length);
    let (mx, my) = door.midpoint();
    results.push(TestResult {
        name: "doorway_side_by_side".into(),
        passed: door.orientation == WallOrientation::Vertical
            && (mx - 22.0).abs() < 1e-3
            && (my - 17.2).abs() < 1e-3,
        detail: format!("{:?} door centered at ({:.2}, {:.2})", door.orientation, mx, my),
    });

    let below = Rect::new(10.0, 10.0 - 8.4, 9.6, 8.4);
    let door = connect(0, &bedroom, 1, &below, config.doorway_length);
    results.push(TestResult {
        name: "doorway_stacked".into(),
        passed: door.orientation == WallOrientation::Horizontal
            && (door.start.1 - 10.0).abs() < 1e-3
            && door.start.0 >= 10.0
            && door.end.0 <= 19.6 + 1e-3,
        detail: format!(
            "{:?} door ({:.2},{:.2})→({:.2},{:.2})",
            door.orientation, door.start.0, door.start.1, door.end.0, door.end.1
        ),
    });

    results
}

// ── 5. Property Sweep ───────────────────────────────────────────────────

fn validate_properties(config: &LayoutConfig, seeds: u64) -> Vec<TestResult> {
    println!("--- Property Sweep ({} seeds) ---", seeds);
    let mut results = Vec::new();

    let request = HouseRequest::new(
        [
            ("living room", 2),
            ("bedroom", 4),
            ("bathroom", 3),
            ("kitchen", 1),
            ("garage", 2),
        ],
        50.0,
        50.0,
    );

    let mut overlap_failures = 0;
    let mut living_failures = 0;
    let mut doorway_failures = 0;
    let mut nondeterministic = 0;
    let mut job_errors = 0;
    let mut exhausted = 0;
    let mut out_of_canvas = 0;

    for seed in 0..seeds {
        let first = generate_layout(&request, config, &mut StdRng::seed_from_u64(seed));
        let second = generate_layout(&request, config, &mut StdRng::seed_from_u64(seed));
        let (first, second) = match (first, second) {
            (Ok(first), Ok(second)) => (first, second),
            (Err(e), _) | (_, Err(e)) => {
                tracing::error!("seed {}: layout failed: {}", seed, e);
                job_errors += 1;
                continue;
            }
        };

        if first != second {
            nondeterministic += 1;
        }
        if !geometry::check_room_overlaps(&first.rooms).is_empty() {
            overlap_failures += 1;
        }
        if first.rooms_of(RoomCategory::LivingRoom).count() != 1 {
            living_failures += 1;
        }
        if !geometry::check_doorways_on_shared_wall(&first.doorways, &first.rooms).is_empty() {
            doorway_failures += 1;
        }
        exhausted += first
            .unplaced()
            .filter(|o| {
                matches!(
                    o,
                    InstanceOutcome::Unplaced {
                        reason: UnplacedReason::Exhausted { .. },
                        ..
                    }
                )
            })
            .count();
        out_of_canvas += geometry::check_rooms_within_canvas(&first.rooms, first.canvas).len();
    }

    results.push(TestResult {
        name: "property_jobs_succeed".into(),
        passed: job_errors == 0,
        detail: format!("{} of {} seeds failed with a job error", job_errors, seeds),
    });
    results.push(TestResult {
        name: "property_no_overlap".into(),
        passed: overlap_failures == 0,
        detail: format!("{} of {} layouts with overlapping rooms", overlap_failures, seeds),
    });
    results.push(TestResult {
        name: "property_single_living_room".into(),
        passed: living_failures == 0,
        detail: format!("{} of {} layouts without exactly one living room", living_failures, seeds),
    });
    results.push(TestResult {
        name: "property_doorways_on_walls".into(),
        passed: doorway_failures == 0,
        detail: format!("{} of {} layouts with misplaced doorways", doorway_failures, seeds),
    });
    results.push(TestResult {
        name: "property_deterministic".into(),
        passed: nondeterministic == 0,
        detail: format!("{} of {} seeds diverged between runs", nondeterministic, seeds),
    });
    // Informational: partial layouts and overflow are allowed outcomes.
    results.push(TestResult {
        name: "stats_partial_layouts".into(),
        passed: true,
        detail: format!(
            "{} rooms exhausted, {} rooms overflowing canvas across {} layouts",
            exhausted, out_of_canvas, seeds
        ),
    });

    results
}
