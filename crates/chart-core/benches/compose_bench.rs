use anyhow::Result;
use chart_core::{
    compose, BottomAxis, Color, Component, Font, Highlight, LeftAxis, Page, Tooltip, Widget, WidgetOptions, XScale,
    YScale,
};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion, black_box};

fn components() -> Vec<Box<dyn Component>> {
    vec![
        Box::new(Font::default()),
        Box::new(Color::default()),
        Box::new(XScale::new(0.0, 100.0)),
        Box::new(YScale::new(-12.0, 12.0)),
        Box::new(BottomAxis::new(10)),
        Box::new(LeftAxis::new(6)),
        Box::new(Tooltip::default()),
        Box::new(Highlight::new(["path", "circle"])),
    ]
}

fn build(page: &Page) -> Result<Widget> {
    let root = page.document().borrow().root();
    let base = Widget::mount(page, root, &WidgetOptions::default())?;
    Ok(compose(base, components())?)
}

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    group.bench_function("full_stack", |b| {
        b.iter_batched(
            Page::new,
            |page| -> Result<()> {
                black_box(build(&page)?);
                Ok(())
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    for &width in &[300.0f64, 1200.0f64] {
        group.bench_function(format!("full_stack_w{width}"), |b| {
            let page = Page::new();
            let Ok(mut w) = build(&page) else { return };
            w.width(width);
            b.iter(|| {
                w.render(0);
                black_box(w.phase());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compose, bench_render);
criterion_main!(benches);
