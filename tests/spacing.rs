//! Properties of [compute_even_spacing] and [layout_joist_centroids] over arbitrary inputs.

use joistframe::{
    compute_even_spacing, layout_joist_centroids, Error, HalfExtents, InvalidArgument, JoistParams,
};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

/// Map an arbitrary `u16` onto a span in `(0, 6553.6]`.
fn span_of(raw: u16) -> f64 {
    (raw as f64 + 1.0) / 10.0
}

/// Map an arbitrary `u8` onto a member count in `2..=257`.
fn count_of(raw: u8) -> usize {
    raw as usize + 2
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[quickcheck]
fn evenly_spaced_without_inset(raw_span: u16, raw_count: u8) -> bool {
    let (span, count) = (span_of(raw_span), count_of(raw_count));
    let s = compute_even_spacing(span, count, 0.0).unwrap();
    let step = span / (count - 1) as f64;

    s.len() == count
        && s[0] == 0.0
        && close(s[count - 1], span)
        && s.positions()
            .windows(2)
            .all(|w| close(w[1] - w[0], step))
}

#[quickcheck]
fn inset_only_moves_the_ends(raw_span: u16, raw_count: u8, inset: i16) -> bool {
    let (span, count) = (span_of(raw_span), count_of(raw_count));
    let inset = inset as f64 / 100.0;
    let plain = compute_even_spacing(span, count, 0.0).unwrap();
    let inset_s = compute_even_spacing(span, count, inset).unwrap();

    inset_s[0] == plain[0] + inset
        && inset_s[count - 1] == plain[count - 1] - inset
        && inset_s.positions()[1..count - 1] == plain.positions()[1..count - 1]
}

#[quickcheck]
fn idempotent(raw_span: u16, raw_count: u8, inset: i16) -> bool {
    let (span, count) = (span_of(raw_span), count_of(raw_count));
    let inset = inset as f64 / 100.0;
    compute_even_spacing(span, count, inset) == compute_even_spacing(span, count, inset)
}

#[quickcheck]
fn fewer_than_two_members_is_invalid(span: f64, inset: f64, one: bool) -> bool {
    let count = if one { 1 } else { 0 };
    compute_even_spacing(span, count, inset)
        == Err(Error::InvalidArgument(InvalidArgument::MemberCount(count)))
}

#[quickcheck]
fn never_produces_non_finite_positions(span: f64, raw_count: u8, inset: f64) -> TestResult {
    match compute_even_spacing(span, count_of(raw_count), inset) {
        Ok(s) => TestResult::from_bool(s.iter().all(f64::is_finite)),
        Err(Error::InvalidArgument(_)) => TestResult::discard(),
        Err(e) => TestResult::error(e.to_string()),
    }
}

#[quickcheck]
fn crossing_is_flagged_iff_ends_overlap(raw_span: u16, raw_count: u8, inset: i16) -> bool {
    let (span, count) = (span_of(raw_span), count_of(raw_count));
    let inset = inset as f64 / 10.0;
    let s = compute_even_spacing(span, count, inset).unwrap();
    let crossed = s.positions().windows(2).any(|w| w[1] <= w[0]);
    s.degeneracy().is_some() == crossed
}

#[quickcheck]
fn centroids_follow_spacing(raw_span: u16, raw_count: u8, raw_width: u8) -> bool {
    let half = HalfExtents::new(span_of(raw_span) / 2.0, 3.0, 4.0);
    let params = JoistParams::new(count_of(raw_count), (raw_width as f64 + 1.0) / 8.0, 0.5);
    let layout = layout_joist_centroids(&half, &params).unwrap();
    let spacing = compute_even_spacing(half.span(), params.count, params.end_inset()).unwrap();

    layout.len() == params.count
        && layout.spacing() == &spacing
        && layout
            .centroids()
            .iter()
            .zip(spacing.iter())
            .all(|(c, p)| c.x == p - half.x && c.y == 2.75 && c.z == 2.0)
}

#[test]
fn two_members_span_the_whole_length() {
    let s = compute_even_spacing(3.5f64, 2, 0.0).unwrap();
    assert_eq!(s.positions(), &[0.0, 3.5]);
}

#[test]
fn twelve_foot_span_with_two_inch_joists() {
    let half = HalfExtents::new(72.0f64, 5.0, 96.0);
    let params = JoistParams::new(3, 2.0, 10.0);
    assert_eq!(params.end_inset(), 1.0);
    let layout = layout_joist_centroids(&half, &params).unwrap();
    assert_eq!(layout.spacing().positions(), &[1.0, 72.0, 143.0]);
}
