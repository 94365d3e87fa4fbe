//! # LUMEN Headless Demo
//!
//! Runs a scripted visitor session against the full portfolio without a
//! display:
//! - pointer sweeps across the hero, with a click every 90 frames
//! - steady scrolling down the page
//! - a resize to a 500px wide viewport halfway through
//! - a contact form submission
//!
//! Prints frame and entity statistics at the end.
//!
//! Run with: cargo run --bin lumen_demo -- --frames 1200 --realtime

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use lumen::{LumenResult, Portfolio, TracingRenderer};
use lumen_core::{
    BackgroundConfig, EntityKind, FrameClock, FrameLoop, FrameLoopConfig, InputQueue, LoopSummary, ManualClock,
    Renderer, SystemClock,
};
use lumen_page::{ContactFields, PageConfig, PageEffect, PageLayout, Section};
use lumen_shared::{InputEvent, Vec2, Viewport, TARGET_FPS};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lumen_demo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Headless LUMEN portfolio session", long_about = None)]
struct Args {
    /// Viewport width in px
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Viewport height in px
    #[arg(long, default_value_t = 800.0)]
    height: f32,

    /// Frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Background config (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pace frames in real time instead of simulating as fast as possible
    #[arg(long)]
    realtime: bool,
}

/// Width the demo resizes to halfway through.
const NARROW_WIDTH: f32 = 500.0;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "demo failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> LumenResult<()> {
    let mut config = match &args.config {
        Some(path) => BackgroundConfig::load(path)?,
        None => BackgroundConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut renderer = TracingRenderer::new(Viewport::new(args.width, args.height));
    let mut portfolio = Portfolio::new(config, PageConfig::default(), demo_layout(), &mut renderer)?;

    let queue = InputQueue::default();
    let tx = queue.sender();
    let clock: Box<dyn FrameClock> = if args.realtime {
        Box::new(SystemClock::new(TARGET_FPS))
    } else {
        Box::new(ManualClock::at_fps(TARGET_FPS))
    };
    let mut frame_loop = FrameLoop::with_config(
        clock,
        queue.receiver(),
        FrameLoopConfig {
            enable_timing_logs: args.realtime,
            ..FrameLoopConfig::default()
        },
    );

    info!(frames = args.frames, width = args.width, height = args.height, "session started");

    let mut summary: Option<LoopSummary> = None;
    let mut page_effects = 0usize;
    let mut viewport = renderer.viewport();

    for frame in 0..args.frames {
        for event in script(frame, args.frames, viewport) {
            if let InputEvent::Resize(next) = event {
                renderer.set_viewport(next);
                viewport = next;
            }
            let _ = tx.send(event);
        }
        if frame == args.frames / 3 {
            portfolio.submit_contact(
                ContactFields {
                    name: "Visitor".into(),
                    email: "visitor@example.com".into(),
                    message: "Loved the sparkles.".into(),
                },
                summary.as_ref().map_or(Duration::ZERO, |s| s.last_frame_at),
            );
        }

        let step = frame_loop.run_frames(1, &mut portfolio, &mut renderer);
        if step.frames == 0 {
            break;
        }
        match summary.as_mut() {
            Some(total) => total.merge(&step),
            None => summary = Some(step),
        }

        for effect in portfolio.take_page_effects() {
            if let PageEffect::Notify(notice) = &effect {
                info!(message = notice.message(), "notice");
            }
            page_effects += 1;
        }
    }

    if let Some(summary) = summary {
        print_summary(&summary, &renderer, &portfolio, page_effects);
    }
    Ok(())
}

/// Input for one frame of the scripted session.
fn script(frame: u64, total: u64, viewport: Viewport) -> Vec<InputEvent> {
    let mut events = Vec::new();

    // triangle wave across the width, gentle bob vertically
    let period = 240;
    let phase = (frame % period) as f32 / period as f32;
    let sweep = if phase < 0.5 { phase * 2.0 } else { 2.0 - phase * 2.0 };
    let pointer = Vec2::new(
        sweep * viewport.width,
        viewport.height * (0.4 + 0.1 * ((frame / 60) % 2) as f32),
    );
    events.push(InputEvent::PointerMove(pointer));

    if frame % 90 == 45 {
        events.push(InputEvent::Click(pointer));
    }
    if frame % 30 == 0 {
        events.push(InputEvent::Scroll {
            y: (frame / 30) as f32 * 120.0,
        });
    }
    if frame == total / 2 {
        events.push(InputEvent::Resize(Viewport::new(NARROW_WIDTH, viewport.height)));
    }

    events
}

fn demo_layout() -> PageLayout {
    PageLayout {
        sections: vec![
            Section::new("home", 0.0, 900.0),
            Section::new("about", 900.0, 1100.0),
            Section::new("skills", 2000.0, 900.0),
            Section::new("vision", 2900.0, 700.0),
            Section::new("contact", 3600.0, 800.0),
        ],
        nav_links: ["#home", "#about", "#skills", "#vision", "#contact"]
            .into_iter()
            .map(String::from)
            .collect(),
        fade_in_groups: vec![
            vec![1100.0, 1400.0, 1700.0],
            vec![2100.0, 2100.0, 2400.0, 2400.0],
            vec![3000.0],
            vec![3700.0],
        ],
        timeline: vec![(1100.0, 250.0), (1400.0, 250.0), (1700.0, 250.0)],
        subtitle: Some("Civil Engineering Student | Future Entrepreneur".into()),
    }
}

fn print_summary(summary: &LoopSummary, renderer: &TracingRenderer, portfolio: &Portfolio, page_effects: usize) {
    let timing = &summary.timing;
    let effects = portfolio.background().effects().stats();

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                    LUMEN SESSION SUMMARY                         ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();
    println!("┌─ FRAMES ─────────────────────────────────────────────────────────┐");
    println!("│ Frames:             {}", summary.frames);
    println!("│ Virtual Time:       {:.2} s", summary.last_frame_at.as_secs_f64());
    println!("│ Events Processed:   {}", summary.events_processed);
    println!("│ Events Dropped:     {}", summary.events_dropped);
    println!("│ Page Effects:       {page_effects}");
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();
    println!("┌─ ENTITIES (live) ────────────────────────────────────────────────┐");
    for kind in EntityKind::ALL {
        println!("│ {:<20}{}", format!("{kind:?}:"), renderer.live(kind));
    }
    println!("│ Bursts Spawned:     {}", effects.bursts_spawned);
    println!("│ Lines Spawned:      {}", effects.lines_spawned);
    println!("│ Expired:            {}", effects.expired);
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();
    println!("┌─ TIMING ─────────────────────────────────────────────────────────┐");
    println!("│ Average Frame:      {:.3} ms", timing.avg_frame_ms());
    println!("│ Min Frame:          {:.3} ms", timing.min_frame_ms());
    println!("│ Max Frame:          {:.3} ms", timing.max_frame_ms());
    println!(
        "│ Over Budget:        {} frames ({:.1}%)",
        timing.frames_over_budget,
        timing.over_budget_ratio() * 100.0
    );
    println!("└──────────────────────────────────────────────────────────────────┘");
}
