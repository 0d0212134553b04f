//! Nutrition resolver
//!
//! Curated table first, remote lookup second. Collaborator failures are
//! logged and treated as "not found".

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::names::normalize_name;
use super::table::find_curated;
use crate::clients::NutritionLookup;
use crate::models::NutritionRecord;

/// Where a resolved record came from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NutritionSource {
    Curated { matched: String },
    Lookup,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedNutrition {
    pub record: NutritionRecord,
    pub source: NutritionSource,
}

#[derive(Clone, Default)]
pub struct NutritionResolver {
    lookup: Option<Arc<dyn NutritionLookup>>,
}

impl NutritionResolver {
    /// Resolver that never leaves the curated table
    pub fn curated_only() -> Self {
        Self { lookup: None }
    }

    pub fn with_lookup(lookup: Arc<dyn NutritionLookup>) -> Self {
        Self {
            lookup: Some(lookup),
        }
    }

    pub fn has_fallback(&self) -> bool {
        self.lookup.is_some()
    }

    pub fn resolve(&self, name: &str) -> Option<NutritionRecord> {
        self.resolve_detailed(name).map(|resolved| resolved.record)
    }

    pub fn resolve_detailed(&self, name: &str) -> Option<ResolvedNutrition> {
        if normalize_name(name).is_empty() {
            return None;
        }

        if let Some(food) = find_curated(name) {
            debug!("Resolved '{}' from curated entry '{}'", name, food.name);
            return Some(ResolvedNutrition {
                record: food.to_record(),
                source: NutritionSource::Curated {
                    matched: food.name.to_string(),
                },
            });
        }

        let lookup = self.lookup.as_ref()?;
        match lookup.lookup(name.trim()) {
            Ok(Some(record)) => {
                debug!("Resolved '{}' via nutrition lookup", name);
                Some(ResolvedNutrition {
                    record,
                    source: NutritionSource::Lookup,
                })
            }
            Ok(None) => {
                debug!("No nutrition data found for '{}'", name);
                None
            }
            Err(e) => {
                warn!("Nutrition lookup for '{}' failed: {}", name, e);
                None
            }
        }
    }
}

impl std::fmt::Debug for NutritionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NutritionResolver")
            .field("has_fallback", &self.has_fallback())
            .finish()
    }
}
