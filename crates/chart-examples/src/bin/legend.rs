// File: crates/chart-examples/src/bin/legend.rs
// Summary: Two widgets on one page: a legend that highlights series of a line chart it holds no reference into.

use anyhow::{Context, Result};
use chart_core::{
    compose, plot, BottomAxis, ChartResult, Color, ColorMapper, Component, Font, Highlight, HighlightApi, LeftAxis,
    Namespace, Page, Placement, UpdateContext, Widget, WidgetOptions, XScale, YScale,
};
use chart_plugins_example::{LineMarks, Watermark};

const ROW_HEIGHT: f64 = 18.0;

/// Public `legend` namespace: the entries to list.
struct LegendApi {
    entries: Vec<String>,
}

impl Namespace for LegendApi {
    const KEY: &'static str = "legend";
}

fn update_legend(ctx: &mut UpdateContext<'_>) {
    let Ok(api) = ctx.api.get::<LegendApi>() else { return };
    let entries = api.entries.clone();
    let swatches: Vec<String> = match ctx.protected.capability::<dyn ColorMapper>() {
        Ok(colors) => entries.iter().enumerate().map(|(i, e)| colors.color_of(e, i)).collect(),
        Err(_) => vec!["currentColor".to_string(); entries.len()],
    };
    let Some(group) = ctx.plot_group() else { return };
    let Ok(rows) = plot::join(ctx.document, group, "g", &entries) else { return };
    for (i, ((&row, label), fill)) in rows.nodes.iter().zip(&entries).zip(&swatches).enumerate() {
        if let Some(el) = ctx.document.get_mut(row) {
            el.attr("transform", format!("translate(0,{})", i as f64 * ROW_HEIGHT));
        }
        if let Ok(rect) = ctx.document.ensure_child(row, "rect", "da-swatch") {
            if let Some(el) = ctx.document.get_mut(rect) {
                el.attr("width", "12").attr("height", "12").attr("fill", fill.as_str());
            }
        }
        if let Ok(text) = ctx.document.ensure_child(row, "text", "da-legend-label") {
            if let Some(el) = ctx.document.get_mut(text) {
                el.attr("x", "16").attr("y", "10").set_text(label.as_str());
            }
        }
    }
}

/// Legend rows. Shares colors with the chart by using the same palette.
fn legend(entries: &[&str]) -> impl Component {
    let entries: Vec<String> = entries.iter().map(|e| e.to_string()).collect();
    move |mut w: Widget| -> ChartResult<Widget> {
        w.protected.chain_mut().extend("legend", Placement::After, update_legend);
        w.api.contribute(LegendApi { entries });
        Ok(w)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let page = Page::new();
    let root = page.document().borrow().root();
    let names = ["north", "south east"];

    let chart = Widget::mount(&page, root, &WidgetOptions { width: 480.0, height: 300.0, ..WidgetOptions::default() })
        .context("mount chart")?;
    let mut chart = compose(
        chart,
        [
            Box::new(Font::default()) as Box<dyn Component>,
            Box::new(XScale::new(0.0, 5.0)),
            Box::new(YScale::new(0.0, 2.2)),
            Box::new(Color::default()),
            Box::new(BottomAxis::new(6).with_precision(0)),
            Box::new(LeftAxis::new(3)),
            Box::new(
                LineMarks::new()
                    .with_series(names[0], vec![(0.0, 0.0), (1.0, 1.2), (2.0, 0.8), (3.0, 1.8), (4.0, 1.4), (5.0, 2.0)])
                    .with_series(names[1], vec![(0.0, 2.0), (2.5, 1.0), (5.0, 0.4)]),
            ),
            Box::new(Highlight::new(["path"])),
            Box::new(Watermark::new("example")),
        ],
    )
    .context("compose chart")?;

    let legend_options = WidgetOptions {
        width: 160.0,
        height: 60.0,
        x: -10.0,
        margins: chart_core::Margins::uniform(4.0),
        ..WidgetOptions::default()
    };
    let mut legend_widget = Widget::mount(&page, root, &legend_options)
        .and_then(|w| w.add(Color::default()))
        .and_then(|w| w.add(legend(&names)))
        .context("compose legend")?;

    chart.render(0);
    legend_widget.render(0);

    // Hovering a legend row highlights the matching series in the chart.
    let hovered = names[1];
    chart.configure::<HighlightApi>(|h| {
        h.keys([hovered]);
    });
    chart.refresh();
    page.advance(400);

    println!("{:#}", chart.snapshot());
    println!("{:#}", legend_widget.snapshot());
    print!("{}", page.styles().stylesheet());
    Ok(())
}
