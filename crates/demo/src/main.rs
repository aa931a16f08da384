// File: crates/demo/src/main.rs
// Summary: Demo loads a dated CSV (or built-in monthly usage) and renders line and stacked-bar graphs to PNGs.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use elroi_core::types::Size;
use elroi_core::{elroi, ElroiArgs, HeadlessHost, PartialOptions, Point, Series, SeriesType, TooltipRecord};
use elroi_render_skia::SkiaSurface;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const WIDTH: f32 = 800.0;
const HEIGHT: f32 = 400.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,elroi_core=debug".into()),
        )
        .init();

    // Usage: elroi-demo [data.csv] [options.json]
    let mut args = std::env::args().skip(1);
    let (stem, data) = match args.next() {
        Some(raw) => {
            let (path, used_alt) = resolve_path(&raw)?;
            info!(path = %path.display(), used_alt, "using input file");
            let data = load_dated_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("graph").to_string();
            (stem, data)
        }
        None => {
            info!("no input given; using built-in monthly usage");
            ("sample".to_string(), sample_usage())
        }
    };
    let options = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path).with_context(|| format!("reading options '{path}'"))?;
            PartialOptions::from_json(&json).with_context(|| format!("parsing options '{path}'"))?
        }
        None => PartialOptions::from_json(r#"{ "axes": { "y1": { "unit": "kWh" } }, "seriesDefaults": { "fillPoints": true } }"#)?,
    };

    let layers = data.len();
    let points = data.iter().map(Vec::len).max().unwrap_or(0);
    info!(layers, points, "loaded series");
    if points == 0 {
        warn!("no rows loaded; graphs will only show the grid");
    }

    let tooltips = tooltip_records(&data);
    let mut host = HeadlessHost::new();
    let container = host.add_container(Size::new(WIDTH, HEIGHT));
    let elroi_args = ElroiArgs::new(container, vec![Series::new(data.clone())])
        .with_options(options)
        .with_tooltips(tooltips);
    let mut graph = elroi(elroi_args, host, SkiaSurface::new);

    // 1) Lines
    graph.draw();
    let out_line = out_name_with(&stem, "line");
    graph.graph().surface().render_to_png(&out_line)?;
    info!(path = %out_line.display(), "wrote");

    // 2) Same data as stacked bars, redrawn in place
    graph.update(vec![Series::new(data).with_type(SeriesType::StackedBar)]);
    let out_bars = out_name_with(&stem, "bars");
    graph.graph().surface().render_to_png(&out_bars)?;
    info!(path = %out_bars.display(), "wrote");

    Ok(())
}

/// Resolve path, trying .csv/.cvs swap if needed.
/// Returns (actual_path, used_alt)
fn resolve_path(raw: &str) -> Result<(PathBuf, bool)> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok((p.to_path_buf(), false));
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            return Ok((alt, true));
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let mut alt = p.to_path_buf();
    let ext = p.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "cvs" => alt.set_extension("csv"),
        "csv" => alt.set_extension("cvs"),
        _ => return None,
    };
    Some(alt)
}

/// Output file name like target/out/elroi_<stem>_<suffix>.png
fn out_name_with(stem: &str, suffix: &str) -> PathBuf {
    let short = stem.split('_').take(3).collect::<Vec<_>>().join("_");
    let name = if short.is_empty() { format!("elroi_{suffix}.png") } else { format!("elroi_{short}_{suffix}.png") };
    PathBuf::from("target/out").join(name)
}

/// Load a CSV whose first column is a date and whose other columns are one layer each.
/// Empty or unparsable cells become gaps.
fn load_dated_csv(path: &Path) -> Result<Vec<Vec<Point>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(str::to_string).collect::<Vec<_>>();
    info!(?headers, "csv headers");
    if headers.len() < 2 {
        anyhow::bail!("expected a date column and at least one value column");
    }

    let mut layers: Vec<Vec<Point>> = vec![Vec::new(); headers.len() - 1];
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let date = rec.get(0).and_then(parse_date);
        if date.is_none() {
            warn!(row, "unparsable date");
        }
        for (j, layer) in layers.iter_mut().enumerate() {
            let value = rec.get(j + 1).and_then(|s| s.trim().parse::<f64>().ok());
            let mut point = match value {
                Some(v) => Point::new(v),
                None => Point::null(),
            };
            if let Some(date) = date {
                point = point.with_start_date(date);
            }
            layer.push(point);
        }
    }
    Ok(layers)
}

fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(d) = DateTime::parse_from_rfc3339(s) {
        return Some(d.with_timezone(&Utc));
    }
    let day = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0)?))
}

/// Twelve months of household usage, with a flagged outlier.
fn sample_usage() -> Vec<Vec<Point>> {
    let usage = [683.0, 592.0, 540.0, 471.0, 502.0, 655.0, 812.0, 798.0, 610.0, 488.0, 530.0, 701.0];
    let month = |m: u32| Utc.with_ymd_and_hms(2010, m, 1, 0, 0, 0).single();
    let you = usage
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let mut p = Point::new(v);
            if let Some(d) = month(i as u32 + 1) {
                p = p.with_start_date(d);
            }
            if i == 6 { p.with_flag("Highest month") } else { p }
        })
        .collect();
    let baseline = usage.iter().map(|v| Point::new((v * 0.15_f64).round())).collect();
    vec![you, baseline]
}

fn tooltip_records(layers: &[Vec<Point>]) -> Vec<TooltipRecord> {
    let Some(first) = layers.first() else { return Vec::new() };
    first
        .iter()
        .map(|p| TooltipRecord {
            date_range: p.x_label("%b %Y").unwrap_or_default(),
            value: p.value,
            unit: "kWh".into(),
            ..TooltipRecord::default()
        })
        .collect()
}
