// File: crates/chart-core/tests/lifecycle.rs
// Purpose: Mounting, staged configuration, render layout, transitions and disposal.

use chart_core::widget::{CONTAINER_CLASS, DISABLED_CLASS, PLOT_CLASS, SVG_CLASS};
use chart_core::{ChartError, Margins, Page, Phase, Widget, WidgetOptions};

fn mount(page: &Page) -> Widget {
    let root = page.document().borrow().root();
    Widget::mount(page, root, &WidgetOptions::default()).unwrap()
}

fn container_style(w: &Widget, name: &str) -> Option<String> {
    let doc = w.page().document().borrow();
    doc.get(w.container()).and_then(|el| el.styles.get(name).cloned())
}

#[test]
fn mount_requires_a_live_parent() {
    let page = Page::new();
    let host = {
        let mut doc = page.document().borrow_mut();
        let root = doc.root();
        let host = doc.create(root, "div").unwrap();
        doc.remove(host);
        host
    };
    let err = Widget::mount(&page, host, &WidgetOptions::default()).err().unwrap();
    assert!(matches!(err, ChartError::MissingDom(_)));

    let err = Widget::mount_by_id(&page, "nope", &WidgetOptions::default()).err().unwrap();
    assert!(matches!(err, ChartError::MissingDom(ref s) if s == "#nope"));
}

#[test]
fn mount_by_id_finds_the_host() {
    let page = Page::new();
    let host = {
        let mut doc = page.document().borrow_mut();
        let root = doc.root();
        let host = doc.create(root, "div").unwrap();
        doc.node_mut(host).unwrap().id = Some("chart".into());
        host
    };
    let w = Widget::mount_by_id(&page, "chart", &WidgetOptions::default()).unwrap();
    let doc = page.document().borrow();
    assert_eq!(doc.get(w.container()).unwrap().parent(), Some(host));
    assert!(doc.get(w.container()).unwrap().has_class(CONTAINER_CLASS));
}

#[test]
fn setters_stage_until_render() {
    let page = Page::new();
    let mut w = mount(&page);
    assert_eq!(w.phase(), Phase::Configured);
    assert_eq!(container_style(&w, "width"), None);

    w.render(0);
    assert_eq!(w.phase(), Phase::Rendered);
    assert_eq!(container_style(&w, "width").as_deref(), Some("300px"));

    w.width(500.0);
    assert_eq!(w.phase(), Phase::Configured);
    assert_eq!(container_style(&w, "width").as_deref(), Some("300px"));

    w.render(0);
    assert_eq!(container_style(&w, "width").as_deref(), Some("500px"));
    assert_eq!(w.snapshot()["styles"]["width"], "500px");
}

#[test]
fn setters_chain() {
    let page = Page::new();
    let mut w = mount(&page);
    w.x(10.0).y(20.0).width(120.0).height(80.0).margins(Margins::uniform(5.0)).render(0);
    assert_eq!(container_style(&w, "left").as_deref(), Some("10px"));
    assert_eq!(container_style(&w, "top").as_deref(), Some("20px"));
    assert_eq!(container_style(&w, "height").as_deref(), Some("80px"));
    assert_eq!(w.protected.widget().inner_width(), 110.0);
    assert_eq!(w.protected.widget().inner_height(), 70.0);
}

#[test]
fn negative_offsets_anchor_to_far_edges() {
    let page = Page::new();
    let mut w = mount(&page);
    w.x(15.0).render(0);
    assert_eq!(container_style(&w, "left").as_deref(), Some("15px"));

    w.x(-15.0).y(-5.0).render(0);
    assert_eq!(container_style(&w, "right").as_deref(), Some("15px"));
    assert_eq!(container_style(&w, "left"), None);
    assert_eq!(container_style(&w, "bottom").as_deref(), Some("5px"));
    assert_eq!(container_style(&w, "top"), None);
    assert_eq!(container_style(&w, "position").as_deref(), Some("absolute"));
}

#[test]
fn render_builds_svg_and_plot_group() {
    let page = Page::new();
    let mut w = mount(&page);
    w.render(0);
    let doc = page.document().borrow();
    let svg = doc.select_class(w.container(), SVG_CLASS);
    let plot = doc.select_class(w.container(), PLOT_CLASS);
    assert_eq!(svg.len(), 1);
    assert_eq!(plot.len(), 1);
    assert_eq!(doc.get(svg[0]).unwrap().attrs["width"], "300px");
    // Default margins: left 40, top 10.
    assert_eq!(doc.get(plot[0]).unwrap().attrs["transform"], "translate(40,10)");
}

#[test]
fn transition_flag_clears_when_the_transition_ends() {
    let page = Page::new();
    let mut w = mount(&page);
    w.render(400);
    assert!(w.is_transitioning());
    page.advance(399);
    assert!(w.is_transitioning());
    page.advance(1);
    assert!(!w.is_transitioning());

    w.render(0);
    assert!(!w.is_transitioning());
}

#[test]
fn rerender_supersedes_pending_transition() {
    let page = Page::new();
    let mut w = mount(&page);
    w.render(400);
    page.advance(300);
    w.render(400);
    assert_eq!(page.document().borrow().pending_transitions(), 1);

    // The first transition would have ended here; the second still runs.
    page.advance(100);
    assert!(w.is_transitioning());
    page.advance(300);
    assert!(!w.is_transitioning());
}

#[test]
fn refresh_uses_the_default_duration() {
    let page = Page::new();
    let options = WidgetOptions { duration_ms: 50, ..WidgetOptions::default() };
    let root = page.document().borrow().root();
    let mut w = Widget::mount(&page, root, &options).unwrap();
    w.refresh();
    assert!(w.is_transitioning());
    page.advance(50);
    assert!(!w.is_transitioning());
}

#[test]
fn dispose_removes_the_container() {
    let page = Page::new();
    let mut w = mount(&page);
    w.render(400);
    let container = w.container();
    w.dispose();
    let doc = page.document().borrow();
    assert!(!doc.contains(container));
    assert!(doc.get(doc.root()).unwrap().children().is_empty());
    assert_eq!(doc.pending_transitions(), 0);
}

#[test]
fn render_after_external_removal_is_a_no_op() {
    let page = Page::new();
    let mut w = mount(&page);
    let container = w.container();
    page.document().borrow_mut().remove(container);
    w.render(0);
    assert_eq!(w.phase(), Phase::Configured);
}

#[test]
fn negative_sizes_pass_through() {
    let page = Page::new();
    let mut w = mount(&page);
    w.width(-20.0).render(0);
    assert_eq!(container_style(&w, "width").as_deref(), Some("-20px"));
    assert!(w.protected.widget().inner_width() < 0.0);
}

#[test]
fn disabled_toggles_class() {
    let page = Page::new();
    let mut w = mount(&page);
    let has_class = |w: &Widget| {
        let doc = w.page().document().borrow();
        doc.get(w.container()).unwrap().has_class(DISABLED_CLASS)
    };
    w.disabled(true).render(0);
    assert!(has_class(&w));
    w.disabled(false).render(0);
    assert!(!has_class(&w));
}

#[test]
fn options_from_json_keep_defaults() {
    let options = WidgetOptions::from_json(r#"{ "width": 640, "margins": { "left": 0 } }"#).unwrap();
    assert_eq!(options.width, 640.0);
    assert_eq!(options.height, 200.0);
    assert_eq!(options.margins.left, 0.0);
    assert_eq!(options.margins.bottom, 40.0);
    assert!(matches!(WidgetOptions::from_json(r#"{ "width": "wide" }"#), Err(ChartError::Config(_))));
}

#[test]
fn widgets_on_separate_pages_are_isolated() {
    let (a, b) = (Page::new(), Page::new());
    let mut wa = mount(&a);
    let _wb = mount(&b);
    wa.render(0);
    assert_eq!(a.document().borrow().get(a.document().borrow().root()).unwrap().children().len(), 1);
    assert!(b.document().borrow().select_class(b.document().borrow().root(), SVG_CLASS).is_empty());
}

#[test]
fn huge_durations_saturate_the_clock() {
    let page = Page::new();
    let mut w = mount(&page);
    page.advance(1);
    w.render(u64::MAX);
    assert!(w.is_transitioning());
    page.advance(1_000);
    assert!(w.is_transitioning());
    page.advance(u64::MAX);
    assert!(!w.is_transitioning());
}

#[test]
fn completion_callbacks_can_render_other_widgets() {
    let page = Page::new();
    let mut first = mount(&page);
    let second = std::rc::Rc::new(std::cell::RefCell::new(mount(&page)));
    first.render(100);

    let (target, handle) = (second.clone(), page.clone());
    let container = first.container();
    let _ = page.document().borrow_mut().transition(
        container,
        100,
        Some(Box::new(move || {
            let alive = handle.document().borrow().contains(container);
            target.borrow_mut().disabled(!alive).render(0);
        })),
    );
    assert_eq!(page.advance(100), 2);
    assert!(!first.is_transitioning());
    assert_eq!(second.borrow().phase(), Phase::Rendered);
    assert_eq!(container_style(&second.borrow(), "width").as_deref(), Some("300px"));
}
