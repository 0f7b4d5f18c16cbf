//! Effective stringing specification resolver.
//!
//! A job about to be created pulls its string choice, tensions, and price
//! from three layered sources, highest precedence first: the explicit
//! per-job override, the client's stored preferences, and the racquet's
//! last known specification. Resolution is per-field, not per-record -- a
//! client with only a main-string preference still gets cross fields from
//! racquet history. A field no source can fill stays `None`; that is a
//! valid terminal state, not an error.
//!
//! Brand and model on a given side are resolved together: a model id is
//! only honored when it belongs to the resolved brand, so a retired model
//! or a brand override without a model never produces a mismatched pair.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::CatalogIndex;
use crate::types::{CatalogId, Timestamp};

/// Plausible bounds for a tension figure. Units are not modeled (stringers
/// work in kg or lbs); anything outside this range is treated as not a
/// tension at all.
pub const TENSION_MIN: f64 = 5.0;
pub const TENSION_MAX: f64 = 90.0;

/// A client's stored stringing preferences. Every field is independently
/// nullable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientPreferences {
    pub preferred_main_brand_id: Option<CatalogId>,
    pub preferred_main_model_id: Option<CatalogId>,
    pub default_tension_main: Option<f64>,
    pub preferred_cross_brand_id: Option<CatalogId>,
    pub preferred_cross_model_id: Option<CatalogId>,
    pub default_tension_cross: Option<f64>,
}

/// The most recently recorded stringing specification for a racquet,
/// produced either from the latest prior job's stringing detail or, when
/// no structured record exists, from parsing the racquet's free-text
/// stringing notes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LastKnownSpec {
    /// The job the specification was recorded by, when it came from a
    /// structured record.
    pub job_id: Option<Uuid>,
    pub main_model_id: Option<CatalogId>,
    pub cross_model_id: Option<CatalogId>,
    pub tension_main: Option<f64>,
    pub tension_cross: Option<f64>,
    pub price: Option<f64>,
    pub recorded_at: Option<Timestamp>,
}

/// An explicit choice made for one specific job, e.g. in the job-creation
/// form. Wins over every stored source, field by field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SpecOverride {
    pub main_brand_id: Option<CatalogId>,
    pub main_model_id: Option<CatalogId>,
    pub cross_brand_id: Option<CatalogId>,
    pub cross_model_id: Option<CatalogId>,
    pub tension_main: Option<f64>,
    pub tension_cross: Option<f64>,
    pub price: Option<f64>,
}

/// The resolved specification. Every id is validated against the catalog
/// snapshot or `None`; a resolved model always sits under its resolved
/// brand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectiveSpec {
    pub main_brand_id: Option<CatalogId>,
    pub main_model_id: Option<CatalogId>,
    pub cross_brand_id: Option<CatalogId>,
    pub cross_model_id: Option<CatalogId>,
    pub tension_main: Option<f64>,
    pub tension_cross: Option<f64>,
    pub price: Option<f64>,
}

/// Compute the effective stringing specification for a job.
///
/// Pure: reads the catalog snapshot and the three inputs, writes nothing.
pub fn resolve(
    catalog: &CatalogIndex,
    prefs: &ClientPreferences,
    history: Option<&LastKnownSpec>,
    override_spec: Option<&SpecOverride>,
) -> EffectiveSpec {
    let ov = override_spec.cloned().unwrap_or_default();
    let hist = history.cloned().unwrap_or_default();

    let (main_brand_id, main_model_id) = resolve_side(
        catalog,
        [ov.main_brand_id, prefs.preferred_main_brand_id],
        [ov.main_model_id, prefs.preferred_main_model_id, hist.main_model_id],
    );
    let (cross_brand_id, cross_model_id) = resolve_side(
        catalog,
        [ov.cross_brand_id, prefs.preferred_cross_brand_id],
        [ov.cross_model_id, prefs.preferred_cross_model_id, hist.cross_model_id],
    );

    EffectiveSpec {
        main_brand_id,
        main_model_id,
        cross_brand_id,
        cross_model_id,
        tension_main: first_some([ov.tension_main, prefs.default_tension_main, hist.tension_main]),
        tension_cross: first_some([
            ov.tension_cross,
            prefs.default_tension_cross,
            hist.tension_cross,
        ]),
        price: first_some([ov.price, hist.price]),
    }
}

/// Resolve one side's brand/model pair.
///
/// `brand_candidates` and `model_candidates` are ordered by precedence
/// (override first; history contributes models only, since its brand is
/// implied by the model). Ids unknown to the catalog are skipped as if the
/// source had left them unset; a model is only considered known when its
/// owning brand is also in the snapshot.
fn resolve_side<const B: usize, const M: usize>(
    catalog: &CatalogIndex,
    brand_candidates: [Option<CatalogId>; B],
    model_candidates: [Option<CatalogId>; M],
) -> (Option<CatalogId>, Option<CatalogId>) {
    let brand = brand_candidates
        .iter()
        .enumerate()
        .find_map(|(level, id)| {
            let id = (*id)?;
            catalog.brand(id).map(|_| (level, id))
        });

    let model = model_candidates
        .iter()
        .enumerate()
        .find_map(|(level, id)| {
            let id = (*id)?;
            catalog.owning_brand(id).map(|owner| (level, id, owner))
        });

    match (brand, model) {
        (None, None) => (None, None),
        (Some((_, brand_id)), None) => (Some(brand_id), None),
        // No explicit brand anywhere: the model pulls in its owning brand.
        (None, Some((_, model_id, owner))) => (Some(owner), Some(model_id)),
        (Some((brand_level, brand_id)), Some((model_level, model_id, owner))) => {
            if model_level < brand_level {
                // The model came from a higher-precedence source than the
                // brand, so its owning brand wins over the stored brand.
                (Some(owner), Some(model_id))
            } else if owner == brand_id {
                (Some(brand_id), Some(model_id))
            } else {
                // Mismatched pair: the model was retired from this brand,
                // or the brand was chosen without a model. The model falls
                // through as unset rather than dangling under the wrong
                // brand.
                (Some(brand_id), None)
            }
        }
    }
}

fn first_some<const N: usize>(candidates: [Option<f64>; N]) -> Option<f64> {
    candidates.into_iter().flatten().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;

    fn entry(id: CatalogId, name: &str, brand_id: Option<CatalogId>) -> CatalogEntry {
        CatalogEntry {
            id,
            name: name.to_string(),
            brand_id,
        }
    }

    /// Brand 12 (Babolat) owns models 501/502; brand 13 (Luxilon) owns 777.
    fn catalog() -> CatalogIndex {
        CatalogIndex::new(
            vec![entry(12, "Babolat", None), entry(13, "Luxilon", None)],
            vec![
                entry(501, "RPM Blast", Some(12)),
                entry(502, "Xcel", Some(12)),
                entry(777, "ALU Power", Some(13)),
            ],
        )
    }

    fn prefs_main_only() -> ClientPreferences {
        ClientPreferences {
            preferred_main_brand_id: Some(12),
            preferred_main_model_id: Some(501),
            default_tension_main: Some(24.0),
            ..Default::default()
        }
    }

    fn history() -> LastKnownSpec {
        LastKnownSpec {
            main_model_id: Some(502),
            cross_model_id: Some(777),
            tension_main: Some(23.0),
            tension_cross: Some(22.0),
            price: Some(35.0),
            ..Default::default()
        }
    }

    // -----------------------------------------------------------------------
    // Precedence
    // -----------------------------------------------------------------------

    #[test]
    fn override_model_beats_client_preference() {
        // Client prefers model 501 under brand 12; the override picks model
        // 777. The override wins, and pulls in 777's owning brand.
        let spec = resolve(
            &catalog(),
            &prefs_main_only(),
            Some(&history()),
            Some(&SpecOverride {
                main_model_id: Some(777),
                ..Default::default()
            }),
        );
        assert_eq!(spec.main_model_id, Some(777));
        assert_eq!(spec.main_brand_id, Some(13));
        // No client cross preference: cross falls back to racquet history.
        assert_eq!(spec.cross_model_id, Some(777));
        assert_eq!(spec.cross_brand_id, Some(13));
    }

    #[test]
    fn client_preference_beats_history() {
        let spec = resolve(&catalog(), &prefs_main_only(), Some(&history()), None);
        assert_eq!(spec.main_model_id, Some(501));
        assert_eq!(spec.main_brand_id, Some(12));
        assert_eq!(spec.tension_main, Some(24.0));
    }

    #[test]
    fn main_only_preference_never_leaks_onto_the_cross_side() {
        let spec = resolve(&catalog(), &prefs_main_only(), Some(&history()), None);
        // Cross fields come from history, not from the main preference.
        assert_eq!(spec.cross_model_id, Some(777));
        assert_eq!(spec.cross_brand_id, Some(13));
        assert_eq!(spec.tension_cross, Some(22.0));
    }

    #[test]
    fn history_fills_everything_when_nothing_else_is_set() {
        let spec = resolve(
            &catalog(),
            &ClientPreferences::default(),
            Some(&history()),
            None,
        );
        assert_eq!(spec.main_model_id, Some(502));
        assert_eq!(spec.main_brand_id, Some(12));
        assert_eq!(spec.tension_main, Some(23.0));
        assert_eq!(spec.price, Some(35.0));
    }

    #[test]
    fn no_source_leaves_fields_unset() {
        let spec = resolve(&catalog(), &ClientPreferences::default(), None, None);
        assert_eq!(spec, EffectiveSpec::default());
    }

    // -----------------------------------------------------------------------
    // Per-field independence
    // -----------------------------------------------------------------------

    #[test]
    fn tension_resolves_independently_of_the_string_choice() {
        // Override sets only the tension; the model still comes from the
        // client preference.
        let spec = resolve(
            &catalog(),
            &prefs_main_only(),
            Some(&history()),
            Some(&SpecOverride {
                tension_main: Some(26.5),
                ..Default::default()
            }),
        );
        assert_eq!(spec.tension_main, Some(26.5));
        assert_eq!(spec.main_model_id, Some(501));
    }

    #[test]
    fn price_resolves_from_override_then_history() {
        let overridden = resolve(
            &catalog(),
            &ClientPreferences::default(),
            Some(&history()),
            Some(&SpecOverride {
                price: Some(42.0),
                ..Default::default()
            }),
        );
        assert_eq!(overridden.price, Some(42.0));

        let inherited = resolve(
            &catalog(),
            &ClientPreferences::default(),
            Some(&history()),
            None,
        );
        assert_eq!(inherited.price, Some(35.0));
    }

    // -----------------------------------------------------------------------
    // Brand/model pairing
    // -----------------------------------------------------------------------

    #[test]
    fn retired_model_falls_through_as_unset() {
        // The client stored brand 13 with model 501, but 501 belongs to
        // brand 12 now. The brand survives; the model does not.
        let prefs = ClientPreferences {
            preferred_main_brand_id: Some(13),
            preferred_main_model_id: Some(501),
            ..Default::default()
        };
        let spec = resolve(&catalog(), &prefs, None, None);
        assert_eq!(spec.main_brand_id, Some(13));
        assert_eq!(spec.main_model_id, None);
    }

    #[test]
    fn brand_override_without_model_drops_a_lower_precedence_model() {
        // Override picks brand 13 only; the client's model 501 belongs to
        // brand 12 and must not survive under the overridden brand.
        let spec = resolve(
            &catalog(),
            &prefs_main_only(),
            None,
            Some(&SpecOverride {
                main_brand_id: Some(13),
                ..Default::default()
            }),
        );
        assert_eq!(spec.main_brand_id, Some(13));
        assert_eq!(spec.main_model_id, None);
    }

    #[test]
    fn consistent_lower_precedence_model_survives_a_brand_override() {
        // Override picks brand 12; the client's model 501 already belongs
        // to it, so the pair is kept.
        let spec = resolve(
            &catalog(),
            &prefs_main_only(),
            None,
            Some(&SpecOverride {
                main_brand_id: Some(12),
                ..Default::default()
            }),
        );
        assert_eq!(spec.main_brand_id, Some(12));
        assert_eq!(spec.main_model_id, Some(501));
    }

    #[test]
    fn resolved_pairs_are_always_catalog_consistent() {
        let catalog = catalog();
        let spec = resolve(&catalog, &prefs_main_only(), Some(&history()), None);
        for (brand, model) in [
            (spec.main_brand_id, spec.main_model_id),
            (spec.cross_brand_id, spec.cross_model_id),
        ] {
            if let Some(model_id) = model {
                assert_eq!(catalog.owning_brand(model_id), brand);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Unknown ids
    // -----------------------------------------------------------------------

    #[test]
    fn ids_unknown_to_the_catalog_are_skipped() {
        // Preference points at deleted seed data; history still applies.
        let prefs = ClientPreferences {
            preferred_main_brand_id: Some(99),
            preferred_main_model_id: Some(9001),
            ..Default::default()
        };
        let spec = resolve(&catalog(), &prefs, Some(&history()), None);
        assert_eq!(spec.main_model_id, Some(502));
        assert_eq!(spec.main_brand_id, Some(12));
    }

    #[test]
    fn unknown_history_model_leaves_the_side_unset() {
        let hist = LastKnownSpec {
            cross_model_id: Some(9001),
            ..Default::default()
        };
        let spec = resolve(&catalog(), &ClientPreferences::default(), Some(&hist), None);
        assert_eq!(spec.cross_brand_id, None);
        assert_eq!(spec.cross_model_id, None);
    }
}
