//! Headless front end: loads a page, optionally scrolls and clicks, and
//! prints what a window would have drawn as JSON.

use anyhow::{Context as _, Result};
use clap::Parser;
use layouter::FixedWidthMetrics;
use log::info;
use page_handler::{BrowserConfig, JpegDecoder, Tab};
use renderer::{DisplayList, DrawCommand, HitBox, RecordingTarget};
use serde::Serialize;
use std::io::{self, Write as _};
use std::rc::Rc;

/// Render a page without a window and report the result as JSON
#[derive(Parser, Debug)]
#[command(name = "lumen", version, about)]
struct Args {
    /// Page to load (http, https or file URL)
    url: String,

    /// Viewport width in pixels (overrides `LUMEN_VIEWPORT_WIDTH`)
    #[arg(long)]
    width: Option<i32>,

    /// Viewport height in pixels (overrides `LUMEN_VIEWPORT_HEIGHT`)
    #[arg(long)]
    height: Option<i32>,

    /// Scroll by this many pixels before rendering
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    scroll: i32,

    /// Click at X,Y in viewport pixels after the first render
    #[arg(long, value_parser = parse_point)]
    click: Option<Point>,

    /// Include the recorded draw commands in the report
    #[arg(long)]
    commands: bool,
}

#[derive(Clone, Copy, Debug)]
struct Point {
    x: i32,
    y: i32,
}

fn parse_point(raw: &str) -> Result<Point, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {raw:?}"))?;
    let coord = |text: &str| {
        text.trim()
            .parse::<i32>()
            .map_err(|err| format!("bad coordinate {text:?}: {err}"))
    };
    Ok(Point {
        x: coord(x)?,
        y: coord(y)?,
    })
}

#[derive(Serialize)]
struct Report<'tab> {
    url: String,
    title: &'tab str,
    viewport: [i32; 2],
    doc_height: i32,
    scroll_y: i32,
    can_go_back: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    clicked: Option<bool>,
    display_list: Option<&'tab DisplayList>,
    hit_boxes: &'tab [HitBox],
    #[serde(skip_serializing_if = "Option::is_none")]
    commands: Option<&'tab [DrawCommand]>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = BrowserConfig::from_env();
    if let Some(width) = args.width {
        config.viewport_width = width.max(1);
    }
    if let Some(height) = args.height {
        config.viewport_height = height.max(1);
    }

    let metrics = FixedWidthMetrics::default();
    let mut tab = Tab::new(
        Rc::new(config.http_client()),
        Rc::new(metrics),
        config.viewport(),
    )
    .with_image_decoder(Rc::new(JpegDecoder));
    tab.load(&args.url)
        .with_context(|| format!("could not open {}", args.url))?;
    info!("Loaded {:?} ({})", tab.title(), tab.current_url_string());

    tab.scroll_by(args.scroll);
    let mut target = RecordingTarget::new(metrics);
    tab.render(&mut target);

    let clicked = match args.click {
        Some(Point { x, y }) => {
            let followed = tab.click(x, y)?;
            if followed {
                target.clear();
                tab.render(&mut target);
            }
            Some(followed)
        }
        None => None,
    };

    let viewport = tab.viewport();
    let report = Report {
        url: tab.current_url_string(),
        title: tab.title(),
        viewport: [viewport.width, viewport.height],
        doc_height: tab.doc_height(),
        scroll_y: tab.scroll_y(),
        can_go_back: tab.can_go_back(),
        clicked,
        display_list: tab.display_list(),
        hit_boxes: tab.hit_boxes(),
        commands: args.commands.then(|| target.commands()),
    };

    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &report)
        .context("failed to write report")?;
    writeln!(out)?;
    Ok(())
}
