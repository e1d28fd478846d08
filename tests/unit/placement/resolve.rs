use super::*;

fn params_grid8() -> TilingParams {
    TilingParams::new(8.0, 8.0, 24.0, 40.0, 40.0).unwrap()
}

fn lookup_const(ratio: f64) -> impl FnMut(&ContentId) -> Option<f64> {
    move |_| Some(ratio)
}

#[test]
fn width_led_wins_when_both_fit() {
    // 184 / (16/9) = 103.5, within the 168 cap; height-led would need w = 299 > 184.
    let content = ContentId::new("c");
    let resolved = resolve_size(
        Rect::new(0.0, 0.0, 184.0, 168.0),
        Some(&content),
        SizeCaps::new(184.0, 168.0),
        &params_grid8(),
        &mut lookup_const(16.0 / 9.0),
    );
    assert_eq!(resolved.rect, Rect::new(0.0, 0.0, 184.0, 104.0));
    assert!(!resolved.needs_ratio);
}

#[test]
fn height_led_wins_when_width_led_overflows() {
    // ratio 0.5 (tall): width-led would need h = 368 > 160; height-led gives w = 80.
    let content = ContentId::new("c");
    let resolved = resolve_size(
        Rect::new(0.0, 0.0, 184.0, 160.0),
        Some(&content),
        SizeCaps::new(184.0, 160.0),
        &params_grid8(),
        &mut lookup_const(0.5),
    );
    assert_eq!(resolved.rect, Rect::new(0.0, 0.0, 80.0, 160.0));
}

#[test]
fn unknown_ratio_returns_the_clamped_snapped_box_and_flags_a_fetch() {
    let content = ContentId::new("c");
    let resolved = resolve_size(
        Rect::new(40.0, 80.0, 400.0, 400.0),
        Some(&content),
        SizeCaps::new(200.0, 304.0),
        &params_grid8(),
        &mut |_| None,
    );
    assert_eq!(resolved.rect, Rect::new(40.0, 80.0, 200.0, 304.0));
    assert!(resolved.needs_ratio);
}

#[test]
fn content_free_intents_skip_ratio_lookup() {
    let mut calls = 0usize;
    let resolved = resolve_size(
        Rect::new(0.0, 0.0, 160.0, 160.0),
        None,
        SizeCaps::unbounded(),
        &params_grid8(),
        &mut |_| {
            calls += 1;
            Some(2.0)
        },
    );
    assert_eq!(calls, 0);
    assert_eq!(resolved.rect, Rect::new(0.0, 0.0, 160.0, 160.0));
    assert!(!resolved.needs_ratio);
}

#[test]
fn minimums_apply_after_the_ratio_fit() {
    // An extremely wide ratio collapses the height; the configured minimum wins.
    let content = ContentId::new("c");
    let resolved = resolve_size(
        Rect::new(0.0, 0.0, 184.0, 168.0),
        Some(&content),
        SizeCaps::new(184.0, 168.0),
        &params_grid8(),
        &mut lookup_const(100.0),
    );
    assert_eq!(resolved.rect.h, 40.0);
    assert_eq!(resolved.rect.w, 184.0);
}

#[test]
fn invalid_ratios_are_ignored() {
    let content = ContentId::new("c");
    for bad in [0.0, -2.0, f64::NAN, f64::INFINITY] {
        let resolved = resolve_size(
            Rect::new(0.0, 0.0, 160.0, 160.0),
            Some(&content),
            SizeCaps::unbounded(),
            &params_grid8(),
            &mut lookup_const(bad),
        );
        assert_eq!(resolved.rect, Rect::new(0.0, 0.0, 160.0, 160.0));
        assert!(resolved.needs_ratio, "ratio {bad} should count as unknown");
    }
}

#[test]
fn unbounded_caps_never_constrain() {
    let resolved = resolve_size(
        Rect::new(0.0, 0.0, 1000.0, 1000.0),
        None,
        SizeCaps::unbounded(),
        &params_grid8(),
        &mut |_| None,
    );
    assert_eq!(resolved.rect, Rect::new(0.0, 0.0, 1000.0, 1000.0));
}
