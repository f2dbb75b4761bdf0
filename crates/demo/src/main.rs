// File: crates/demo/src/main.rs
// Summary: Demo loads named (x, y) series from CSV, composes a line widget and writes its document as JSON.

use anyhow::{Context, Result};
use chart_core::{
    compose, BottomAxis, Color, Component, Font, Highlight, LeftAxis, Page, Tooltip, TooltipContent, Widget,
    WidgetOptions, XScale, YScale,
};
use chart_plugins_example::LineMarks;
use std::path::{Path, PathBuf};

type Series = (String, Vec<(f64, f64)>);

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Accept CSV path and optional options JSON from CLI
    let mut args = std::env::args().skip(1);
    let input = PathBuf::from(args.next().unwrap_or_else(|| "crates/demo/data/sample.csv".to_string()));
    let options = match args.next() {
        Some(p) => {
            let text = std::fs::read_to_string(&p).with_context(|| format!("reading options '{p}'"))?;
            WidgetOptions::from_json(&text).with_context(|| format!("parsing options '{p}'"))?
        }
        None => WidgetOptions { width: 640.0, height: 360.0, ..WidgetOptions::default() },
    };

    let series = load_series_csv(&input).with_context(|| format!("failed to load CSV '{}'", input.display()))?;
    if series.is_empty() {
        anyhow::bail!("no rows loaded; expected name,x,y columns");
    }
    let (x_range, y_range) = bounds(&series);
    tracing::info!(series = series.len(), ?x_range, ?y_range, "loaded input");

    let page = Page::new();
    let root = page.document().borrow().root();
    let base = Widget::mount(&page, root, &options).context("mount widget")?;

    let counts: Vec<(String, usize)> = series.iter().map(|(name, pts)| (name.clone(), pts.len())).collect();
    let marks = series.into_iter().fold(LineMarks::new(), |m, (name, pts)| m.with_series(name, pts));
    let mut widget = compose(
        base,
        [
            Box::new(Font::default()) as Box<dyn Component>,
            Box::new(XScale::new(x_range.0, x_range.1)),
            Box::new(YScale::new(y_range.0, y_range.1)),
            Box::new(Color::default()),
            Box::new(BottomAxis::new(5)),
            Box::new(LeftAxis::new(5).with_precision(2)),
            Box::new(marks),
            Box::new(Tooltip::default()),
            Box::new(TooltipContent::new(move |key| {
                counts.iter().find(|(name, _)| name == key).map(|(name, n)| format!("{name}: {n} points"))
            })),
            Box::new(Highlight::new(["path"])),
        ],
    )
    .context("compose widget")?;

    widget.refresh();
    let settled = page.advance(options.duration_ms);
    tracing::debug!(settled, "transitions finished");

    let out = out_name_with(&input, "json");
    let json = serde_json::to_string_pretty(&widget.snapshot())?;
    std::fs::write(&out, json).with_context(|| format!("writing {}", out.display()))?;
    println!("Wrote {}", out.display());

    let css = out.with_extension("css");
    std::fs::write(&css, page.styles().stylesheet()).with_context(|| format!("writing {}", css.display()))?;
    println!("Wrote {}", css.display());

    widget.dispose();
    Ok(())
}

/// Produce output file name like target/out/widget_<stem>.<ext>
fn out_name_with(input: &Path, ext: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("widget");
    let mut out = PathBuf::from("target/out");
    std::fs::create_dir_all(&out).ok();
    out.push(format!("widget_{stem}.{ext}"));
    out
}

/// Load `name,x,y` rows, grouped by name in first-seen order.
fn load_series_csv(path: &Path) -> Result<Vec<Series>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect::<Vec<_>>();
    tracing::debug!(?headers, "csv headers");
    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));

    let i_name = idx(&["name", "series", "key"]);
    let (Some(i_x), Some(i_y)) = (idx(&["x", "time", "index"]), idx(&["y", "value"])) else {
        anyhow::bail!("missing x/y columns in {:?}", headers);
    };

    let mut out: Vec<Series> = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let parse = |i: usize| rec.get(i).and_then(|s| s.parse::<f64>().ok());
        let (Some(x), Some(y)) = (parse(i_x), parse(i_y)) else {
            tracing::warn!(row, "skipping row with non-numeric x/y");
            continue;
        };
        let name = i_name.and_then(|i| rec.get(i)).unwrap_or("series").to_string();
        match out.iter_mut().find(|(n, _)| *n == name) {
            Some((_, pts)) => pts.push((x, y)),
            None => out.push((name, vec![(x, y)])),
        }
    }
    Ok(out)
}

fn bounds(series: &[Series]) -> ((f64, f64), (f64, f64)) {
    let mut x = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y = (f64::INFINITY, f64::NEG_INFINITY);
    for &(px, py) in series.iter().flat_map(|(_, pts)| pts) {
        x = (x.0.min(px), x.1.max(px));
        y = (y.0.min(py), y.1.max(py));
    }
    (x, y)
}
