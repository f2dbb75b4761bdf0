// File: crates/chart-core/tests/compose.rs
// Purpose: Composition order, namespace accumulation, collisions and dependency errors.

use chart_core::{
    compose, BottomAxis, ChartError, ChartResult, Color, Component, Font, Highlight, Page, Tooltip, TooltipContent,
    Widget, WidgetOptions, XScale, YScale,
};

fn mount(page: &Page) -> Widget {
    let root = page.document().borrow().root();
    Widget::mount(page, root, &WidgetOptions::default()).unwrap()
}

fn f1(mut w: Widget) -> ChartResult<Widget> {
    w.protected.namespaces_mut().insert("c", 1i32);
    w.api.insert("d", 1i32);
    Ok(w)
}

fn f2(mut w: Widget) -> ChartResult<Widget> {
    w.protected.namespaces_mut().insert("e", 1i32);
    w.api.insert("f", 1i32);
    Ok(w)
}

#[test]
fn namespaces_accumulate_across_components() {
    let page = Page::new();
    let mut base = mount(&page);
    base.protected.namespaces_mut().insert("a", 1i32);
    base.api.insert("b", 1i32);

    let w = compose(base, [Box::new(f1) as Box<dyn Component>, Box::new(f2)]).unwrap();
    assert_eq!(w.protected.namespaces().keys().collect::<Vec<_>>(), ["a", "c", "e"]);
    assert_eq!(w.api.keys().collect::<Vec<_>>(), ["b", "d", "f"]);
}

#[test]
fn empty_composition_returns_base() {
    let page = Page::new();
    let w = compose(mount(&page), Vec::<Box<dyn Component>>::new()).unwrap();
    assert!(w.api.is_empty());
    assert_eq!(w.protected.widget().chain().labels(), ["widget"]);
}

#[test]
fn later_contribution_wins_on_collision() {
    let page = Page::new();
    let w = mount(&page)
        .add(|mut w: Widget| -> ChartResult<Widget> {
            w.api.insert("shared", "first");
            Ok(w)
        })
        .and_then(|w| {
            w.add(|mut w: Widget| -> ChartResult<Widget> {
                w.api.insert("shared", "second");
                Ok(w)
            })
        })
        .unwrap();
    assert_eq!(*w.api.get_as::<&str>("shared").unwrap(), "second");
    assert_eq!(w.api.len(), 1);
}

#[test]
fn explicit_override_needs_an_existing_namespace() {
    let page = Page::new();
    let err = mount(&page)
        .add(|mut w: Widget| -> ChartResult<Widget> {
            w.api.override_with("nobody", 1i32)?;
            Ok(w)
        })
        .err()
        .unwrap();
    assert!(matches!(err, ChartError::NothingToOverride(key) if key == "nobody"));
}

#[test]
fn tooltip_content_requires_tooltip() {
    let page = Page::new();
    let err = mount(&page).add(TooltipContent::new(|_| None)).err().unwrap();
    assert!(matches!(err, ChartError::NothingToOverride(_)));
}

#[test]
fn axis_requires_its_scale() {
    let page = Page::new();
    let err = mount(&page).add(BottomAxis::default()).err().unwrap();
    assert!(matches!(err, ChartError::MissingCapability(_)));

    // The vertical scale does not satisfy a bottom axis.
    let err = mount(&page).add(YScale::new(0.0, 1.0)).and_then(|w| w.add(BottomAxis::default())).err().unwrap();
    assert!(matches!(err, ChartError::MissingCapability(_)));
}

#[test]
fn failing_component_stops_the_fold() {
    let page = Page::new();
    let ran = std::rc::Rc::new(std::cell::Cell::new(false));
    let flag = ran.clone();
    let result = compose(
        mount(&page),
        [
            Box::new(BottomAxis::default()) as Box<dyn Component>,
            Box::new(move |w: Widget| -> ChartResult<Widget> {
                flag.set(true);
                Ok(w)
            }),
        ],
    );
    assert!(result.is_err());
    assert!(!ran.get());
}

#[test]
fn chain_order_follows_registration_and_placement() {
    let page = Page::new();
    let w = compose(
        mount(&page),
        [
            Box::new(Font::default()) as Box<dyn Component>,
            Box::new(Color::default()),
            Box::new(XScale::new(0.0, 10.0)),
            Box::new(YScale::new(0.0, 1.0)),
            Box::new(BottomAxis::default()),
            Box::new(Tooltip::default()),
            Box::new(Highlight::new(["path"])),
        ],
    )
    .unwrap();
    assert_eq!(
        w.protected.widget().chain().labels(),
        ["scale-y", "scale-x", "color", "widget", "font", "axis-x", "tooltip", "highlight"]
    );
    assert_eq!(
        w.api.keys().collect::<Vec<_>>(),
        ["font", "color", "scale_x", "scale_y", "axis_x", "tooltip", "highlight"]
    );
}

#[test]
fn components_see_earlier_contributions() {
    let page = Page::new();
    let w = mount(&page)
        .add(Color::default())
        .and_then(|w| {
            w.add(|mut w: Widget| -> ChartResult<Widget> {
                let seen = w.protected.capabilities().has::<dyn chart_core::ColorMapper>();
                w.api.insert("saw_color", seen);
                Ok(w)
            })
        })
        .unwrap();
    assert!(*w.api.get_as::<bool>("saw_color").unwrap());
}
