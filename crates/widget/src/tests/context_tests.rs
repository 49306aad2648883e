use super::*;

#[test]
fn placeholder_is_shown_until_skeleton_renders() {
    let ctx = AppContext::new().with_placeholder("<p>waiting for host</p>");
    assert!(!ctx.has_skeleton());
    assert_eq!(ctx.app_name(), APP_NAME);
    assert_eq!(
        ctx.to_html(),
        r#"<div data-app-name="sRNA_phasing_app"><p>waiting for host</p></div>"#
    );
}

#[test]
fn region_mutations_before_skeleton_are_dropped() {
    let mut ctx = AppContext::new();
    ctx.set_html(Region::MainResults, "<table></table>");
    ctx.add_class(Region::ProvenanceInfo, "text-center");
    assert_eq!(ctx.region_html(Region::MainResults), None);
    assert!(ctx.region_classes(Region::ProvenanceInfo).is_empty());
    assert_eq!(ctx.to_html(), r#"<div data-app-name="sRNA_phasing_app"></div>"#);
}

#[test]
fn skeleton_has_title_and_three_empty_regions() {
    let mut ctx = AppContext::new().with_placeholder("old");
    ctx.render_skeleton("Title");
    assert_eq!(
        ctx.inner_html(),
        r#"<h2>Title</h2><div class="interactive"></div><div class="main_results"></div><hr><div class="provenance-info"></div><br>"#
    );
}

#[test]
fn set_replaces_append_extends_and_classes_are_unique() {
    let mut ctx = AppContext::new();
    ctx.render_skeleton("T");
    ctx.set_html(Region::Interactive, "a");
    ctx.set_html(Region::Interactive, "b");
    ctx.append_html(Region::Interactive, "c");
    ctx.add_class(Region::Interactive, "wide");
    ctx.add_class(Region::Interactive, "wide");

    assert_eq!(ctx.region_html(Region::Interactive), Some("bc"));
    assert_eq!(ctx.region_classes(Region::Interactive), vec!["interactive", "wide"]);
}

#[test]
fn rerendering_skeleton_clears_regions() {
    let mut ctx = AppContext::new();
    ctx.render_skeleton("T");
    ctx.set_html(Region::MainResults, "rows");
    ctx.render_skeleton("T");
    assert_eq!(ctx.region_html(Region::MainResults), Some(""));
}
