// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `seatmap` command line: lay out a plan, replay taps, inspect config.

use crate::delegate::{PlanDelegate, SeatEvent};
use crate::plan::Plan;
use anyhow::{Context, Result};
use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use glam::{Vec2, Vec3};
use seatmap_app_core::config::ConfigService;
use seatmap_app_core::config_port::{ConfigPort, SEATMAP_CONFIG_KEY};
use seatmap_config_fs::FsConfigStore;
use seatmap_core::{
    BoundingExtent, GridPosition, SeatBookingView, SeatMapConfig, SeatVariant, Viewport,
};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Parsed `seatmap` arguments.
#[derive(Parser, Debug)]
#[command(name = "seatmap")]
#[command(version, about = "Lay out seating plans and replay seat taps")]
pub struct Cli {
    /// Directory holding seatmap.json (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,
    /// Viewport width in points
    #[arg(long, global = true, default_value_t = 800.0)]
    pub width: f32,
    /// Viewport height in points
    #[arg(long, global = true, default_value_t = 600.0)]
    pub height: f32,
    /// More log output on stderr (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    /// What to run
    #[command(subcommand)]
    pub command: Commands,
}

/// `seatmap` subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the map and print every seat, the extent and the framed camera
    Layout {
        /// Path to a plan file
        plan: PathBuf,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Build the map, then replay taps and print each delegate notification
    #[command(group(ArgGroup::new("target").required(true).args(["seat", "at"])))]
    Tap {
        /// Path to a plan file
        plan: PathBuf,
        /// Tap the center of the seat at COL,ROW (repeatable)
        #[arg(long, value_parser = parse_seat)]
        seat: Vec<GridPosition>,
        /// Tap the view point X,Y (repeatable)
        #[arg(long, value_parser = parse_point)]
        at: Vec<Vec2>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration
    Config {
        /// Also write it to the config directory
        #[arg(long)]
        save: bool,
    },
}

/// Parses `COL,ROW`.
pub fn parse_seat(s: &str) -> Result<GridPosition, String> {
    let (c, r) = s
        .split_once(',')
        .ok_or_else(|| format!("expected COL,ROW, got {s:?}"))?;
    let column = c.trim().parse().map_err(|e| format!("bad column {c:?}: {e}"))?;
    let row = r.trim().parse().map_err(|e| format!("bad row {r:?}: {e}"))?;
    Ok(GridPosition::new(column, row))
}

/// Parses `X,Y`.
pub fn parse_point(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x {x:?}: {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y {y:?}: {e}"))?;
    Ok(Vec2::new(x, y))
}

#[derive(Serialize)]
struct SeatReport {
    position: GridPosition,
    variant: Option<SeatVariant>,
    label: String,
    translation: Vec3,
}

#[derive(Serialize)]
struct LayoutReport {
    columns: u32,
    rows: u32,
    seats: Vec<SeatReport>,
    extent: Option<BoundingExtent>,
    camera: Vec3,
}

#[derive(Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
enum TapTarget {
    Seat(GridPosition),
    Point([f32; 2]),
}

impl core::fmt::Display for TapTarget {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Seat(p) => write!(f, "seat {p}"),
            Self::Point([x, y]) => write!(f, "point ({x}, {y})"),
        }
    }
}

#[derive(Serialize)]
struct TapRecord {
    target: TapTarget,
    events: Vec<SeatEvent>,
}

#[derive(Serialize)]
struct TapReport {
    taps: Vec<TapRecord>,
    selected: Vec<GridPosition>,
}

fn read_plan(path: &Path) -> Result<Plan> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read plan {}", path.display()))?;
    Plan::parse(&text).with_context(|| format!("failed to parse plan {}", path.display()))
}

fn open_store(dir: Option<&Path>) -> Result<FsConfigStore> {
    match dir {
        Some(dir) => FsConfigStore::at(dir)
            .with_context(|| format!("failed to open config dir {}", dir.display())),
        None => FsConfigStore::new().context("failed to resolve config dir"),
    }
}

fn load_config(dir: Option<&Path>) -> SeatMapConfig {
    match open_store(dir) {
        Ok(store) => ConfigService::new(store).load_seatmap_config(),
        Err(err) => {
            warn!(err = %format!("{err:#}"), "no config store; using defaults");
            SeatMapConfig::default()
        }
    }
}

fn fmt_vec(v: Vec3) -> String {
    // keeps -0.0 from printing as "-0.000"
    let tidy = |x: f32| if x.abs() < 5e-4 { 0.0 } else { x };
    format!("({:.3}, {:.3}, {:.3})", tidy(v.x), tidy(v.y), tidy(v.z))
}

fn build_view(
    plan: &Rc<Plan>,
    delegate: &Rc<PlanDelegate>,
    config: SeatMapConfig,
    viewport: Viewport,
) -> SeatBookingView {
    let mut view = SeatBookingView::new(config, viewport);
    view.set_delegate(delegate);
    view.set_data_source(plan);
    view
}

fn layout(
    plan: Rc<Plan>,
    config: SeatMapConfig,
    viewport: Viewport,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let delegate = Rc::new(PlanDelegate::new(Rc::clone(&plan)));
    let view = build_view(&plan, &delegate, config, viewport);
    let size = plan.size();
    let report = LayoutReport {
        columns: size.columns,
        rows: size.rows,
        seats: view
            .seats()
            .iter()
            .map(|s| SeatReport {
                position: s.position(),
                variant: plan.variant_at(s.position()),
                label: s.asset().label().to_owned(),
                translation: s.world_position(),
            })
            .collect(),
        extent: view.extent(),
        camera: view.camera().position,
    };

    if json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }
    writeln!(
        out,
        "plan {}x{}, {} seats",
        report.columns,
        report.rows,
        report.seats.len()
    )?;
    for seat in &report.seats {
        let variant = seat.variant.map_or("?", SeatVariant::tag);
        writeln!(
            out,
            "{} {variant} {}",
            seat.position,
            fmt_vec(seat.translation)
        )?;
    }
    match report.extent {
        Some(extent) => writeln!(
            out,
            "extent {} .. {} width {:.3}",
            fmt_vec(extent.min),
            fmt_vec(extent.max),
            extent.width()
        )?,
        None => writeln!(out, "extent none")?,
    }
    writeln!(out, "camera {}", fmt_vec(report.camera))?;
    Ok(())
}

fn tap(
    plan: Rc<Plan>,
    config: SeatMapConfig,
    viewport: Viewport,
    targets: Vec<TapTarget>,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let delegate = Rc::new(PlanDelegate::new(Rc::clone(&plan)));
    let mut view = build_view(&plan, &delegate, config, viewport);
    let settle = config.transition.duration_secs;

    let mut taps = Vec::with_capacity(targets.len());
    for target in targets {
        let change = match target {
            TapTarget::Seat(position) => {
                if view.seat_at(position).is_none() {
                    warn!(%position, "no seat placed there");
                }
                view.tap_seat(position)
            }
            TapTarget::Point([x, y]) => view.handle_tap(Vec2::new(x, y)),
        };
        debug!(tapped = %target, changed = change.is_some(), "tap replayed");
        // let the seat finish moving so the next tap sees its resting place
        view.advance(settle);
        taps.push(TapRecord {
            target,
            events: delegate.take_events(),
        });
    }
    let report = TapReport {
        taps,
        selected: view.selected_positions(),
    };

    if json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }
    for record in &report.taps {
        if record.events.is_empty() {
            writeln!(out, "tap {}: no change", record.target)?;
        }
        for event in &record.events {
            writeln!(out, "tap {}: {event}", record.target)?;
        }
    }
    if report.selected.is_empty() {
        writeln!(out, "selected: none")?;
    } else {
        let list: Vec<String> = report.selected.iter().map(ToString::to_string).collect();
        writeln!(out, "selected: {}", list.join(", "))?;
    }
    Ok(())
}

fn config(dir: Option<&Path>, save: bool, out: &mut dyn Write) -> Result<()> {
    let effective = load_config(dir);
    serde_json::to_writer_pretty(&mut *out, &effective)?;
    writeln!(out)?;
    if save {
        let store = open_store(dir)?;
        let base = store.base().to_path_buf();
        ConfigService::new(store)
            .save(SEATMAP_CONFIG_KEY, &effective)
            .with_context(|| format!("failed to save config to {}", base.display()))?;
        writeln!(out, "saved to {}", base.display())?;
    }
    Ok(())
}

/// Runs a parsed command line, writing results to `out`.
pub fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let viewport = Viewport::new(cli.width, cli.height);
    let dir = cli.config_dir.as_deref();
    match cli.command {
        Commands::Layout { plan, json } => {
            let plan = Rc::new(read_plan(&plan)?);
            layout(plan, load_config(dir), viewport, json, out)
        }
        Commands::Tap {
            plan,
            seat,
            at,
            json,
        } => {
            let plan = Rc::new(read_plan(&plan)?);
            let targets = seat
                .into_iter()
                .map(TapTarget::Seat)
                .chain(at.into_iter().map(|p| TapTarget::Point(p.to_array())))
                .collect();
            tap(plan, load_config(dir), viewport, targets, json, out)
        }
        Commands::Config { save } => config(dir, save, out),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Parses the process arguments and runs the command.
pub fn entrypoint() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}
