//! Fallback parser for free-text stringing notes.
//!
//! Racquets that predate structured job history often carry their last
//! setup as prose, e.g. `"Luxilon ALU Power @ 24"` or
//! `"RPM Blast Rough 23/22, grommets worn"`. When no prior job exists for
//! a racquet, this parser recovers whatever it can from that text and
//! feeds it into the same [`LastKnownSpec`] shape the structured source
//! produces, so the preference cascade has exactly one history input.
//!
//! Recognized fragments:
//! - a `NN/NN` tension pair (main/cross), decimal comma or point
//! - a single `@ NN` tension, applied to both sides (full-bed reading)
//! - catalog model names, matched case-insensitively; one match fills both
//!   sides, two distinct matches fill main then cross in text order

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::{CatalogEntry, CatalogIndex};
use crate::resolve::{LastKnownSpec, TENSION_MAX, TENSION_MIN};

static TENSION_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2}(?:[.,]\d)?)\s*/\s*(\d{1,2}(?:[.,]\d)?)\b")
        .expect("tension pair pattern")
});

/// A lone figure only counts as a tension when written `@ NN`; a bare
/// number is too likely to be a pattern count or a year.
static TENSION_AT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@\s*(\d{1,2}(?:[.,]\d)?)\b").expect("tension at-sign pattern")
});

/// Parse free-text stringing notes against the string catalog.
///
/// Returns `None` when the text yields neither a string model nor a
/// tension; partial results (tensions without a recognizable string, or
/// vice versa) are returned as-is and resolved per-field downstream.
pub fn parse_stringing_notes(notes: &str, catalog: &CatalogIndex) -> Option<LastKnownSpec> {
    let (main_model, cross_model) = match_models(notes, catalog);
    let (tension_main, tension_cross) = match_tensions(notes);

    if main_model.is_none() && tension_main.is_none() {
        return None;
    }

    Some(LastKnownSpec {
        main_model_id: main_model.map(|m| m.id),
        cross_model_id: cross_model.map(|m| m.id),
        tension_main,
        tension_cross,
        ..Default::default()
    })
}

/// Find catalog model names appearing in the notes.
///
/// Longer names claim their span first, so `"RPM Blast Rough"` is not also
/// counted as `"RPM Blast"`. Matches are then ordered by position: the
/// first is the main string, the second (if any) the cross string; a
/// single match fills both sides.
fn match_models<'a>(
    notes: &str,
    catalog: &'a CatalogIndex,
) -> (Option<&'a CatalogEntry>, Option<&'a CatalogEntry>) {
    let haystack = notes.to_lowercase();

    let mut candidates: Vec<(&CatalogEntry, usize, usize)> = catalog
        .models()
        .filter(|m| m.name.len() >= 3)
        .filter_map(|m| {
            let needle = m.name.to_lowercase();
            haystack.find(&needle).map(|pos| (m, pos, needle.len()))
        })
        .collect();
    candidates.sort_by(|a, b| b.2.cmp(&a.2).then(a.1.cmp(&b.1)).then(a.0.id.cmp(&b.0.id)));

    let mut claimed: Vec<(usize, usize)> = Vec::new();
    let mut matched: Vec<(&CatalogEntry, usize)> = Vec::new();
    for (model, pos, len) in candidates {
        let end = pos + len;
        if claimed.iter().any(|&(s, e)| pos < e && s < end) {
            continue;
        }
        claimed.push((pos, end));
        matched.push((model, pos));
    }
    matched.sort_by_key(|&(_, pos)| pos);

    let main = matched.first().map(|&(m, _)| m);
    let cross = matched.get(1).map(|&(m, _)| m).or(main);
    (main, cross)
}

fn match_tensions(notes: &str) -> (Option<f64>, Option<f64>) {
    for captures in TENSION_PAIR.captures_iter(notes) {
        let main = parse_figure(&captures[1]);
        let cross = parse_figure(&captures[2]);
        if let (Some(main), Some(cross)) = (main, cross) {
            return (Some(main), Some(cross));
        }
    }
    if let Some(captures) = TENSION_AT.captures(notes) {
        if let Some(tension) = parse_figure(&captures[1]) {
            return (Some(tension), Some(tension));
        }
    }
    (None, None)
}

fn parse_figure(raw: &str) -> Option<f64> {
    let value: f64 = raw.replace(',', ".").parse().ok()?;
    (TENSION_MIN..=TENSION_MAX).contains(&value).then_some(value)
}
