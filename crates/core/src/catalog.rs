//! In-memory brand/model reference-data lookup.
//!
//! The catalog tables (string brands/models, racquet brands/models) are
//! low-churn seed data, so each process loads them once into a
//! [`CatalogIndex`] snapshot and treats the snapshot as immutable for its
//! lifetime. A lookup miss is a normal outcome (the id may reference
//! retired seed data), surfaced as `None` rather than an error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::CatalogId;

/// A brand or model row from one of the catalog tables.
///
/// `brand_id` is the owning brand for model entries and `None` for brand
/// entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: CatalogId,
    pub name: String,
    pub brand_id: Option<CatalogId>,
}

/// O(1) id lookup plus per-brand model listing over one catalog family
/// (string brands/models or racquet brands/models).
#[derive(Debug, Default)]
pub struct CatalogIndex {
    brands: HashMap<CatalogId, CatalogEntry>,
    models: HashMap<CatalogId, CatalogEntry>,
    /// Brand ids sorted ascending by name (ties by id), for listing.
    brand_order: Vec<CatalogId>,
    /// Model ids per brand, pre-sorted ascending by name (ties by id).
    models_by_brand: HashMap<CatalogId, Vec<CatalogId>>,
}

impl CatalogIndex {
    pub fn new(brands: Vec<CatalogEntry>, models: Vec<CatalogEntry>) -> Self {
        let mut brand_order: Vec<CatalogId> = brands.iter().map(|b| b.id).collect();
        sort_by_name(&mut brand_order, &brands);

        let mut models_by_brand: HashMap<CatalogId, Vec<CatalogId>> = HashMap::new();
        for model in &models {
            if let Some(brand_id) = model.brand_id {
                models_by_brand.entry(brand_id).or_default().push(model.id);
            }
        }
        for ids in models_by_brand.values_mut() {
            sort_by_name(ids, &models);
        }

        Self {
            brands: brands.into_iter().map(|b| (b.id, b)).collect(),
            models: models.into_iter().map(|m| (m.id, m)).collect(),
            brand_order,
            models_by_brand,
        }
    }

    /// Look up a brand by id. A miss means "unknown label", not a fault.
    pub fn brand(&self, id: CatalogId) -> Option<&CatalogEntry> {
        self.brands.get(&id)
    }

    /// Look up a model by id. A miss means "unknown label", not a fault.
    pub fn model(&self, id: CatalogId) -> Option<&CatalogEntry> {
        self.models.get(&id)
    }

    /// The brand a model belongs to, validated against the brand table.
    ///
    /// Returns `None` when the model is unknown or its owning brand is not
    /// in the snapshot, so callers never receive a dangling brand id.
    pub fn owning_brand(&self, model_id: CatalogId) -> Option<CatalogId> {
        self.models
            .get(&model_id)
            .and_then(|m| m.brand_id)
            .filter(|brand_id| self.brands.contains_key(brand_id))
    }

    /// All brands, ascending by name. Restartable: each call yields a fresh
    /// iterator over the same snapshot.
    pub fn brands(&self) -> impl Iterator<Item = &CatalogEntry> + '_ {
        self.brand_order.iter().filter_map(|id| self.brands.get(id))
    }

    /// Models belonging to `brand_id`, ascending by name. Empty for an
    /// unknown brand.
    pub fn models_for_brand(
        &self,
        brand_id: CatalogId,
    ) -> impl Iterator<Item = &CatalogEntry> + '_ {
        self.models_by_brand
            .get(&brand_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.models.get(id))
    }

    /// All models, in no particular order. Used by the notes parser to
    /// match string names appearing in free text.
    pub fn models(&self) -> impl Iterator<Item = &CatalogEntry> + '_ {
        self.models.values()
    }
}

fn sort_by_name(ids: &mut [CatalogId], entries: &[CatalogEntry]) {
    let names: HashMap<CatalogId, &str> =
        entries.iter().map(|e| (e.id, e.name.as_str())).collect();
    ids.sort_by(|a, b| {
        let na = names.get(a).copied().unwrap_or_default();
        let nb = names.get(b).copied().unwrap_or_default();
        na.cmp(nb).then(a.cmp(b))
    });
}
