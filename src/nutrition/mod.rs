//! Nutrition core
//!
//! Name matching, the curated table, resolution and plate aggregation.

pub mod aggregator;
pub mod names;
pub mod resolver;
pub mod table;

pub use aggregator::{aggregate_plate, PlateAggregate, ResolvedItem};
pub use names::{match_name, normalize_name};
pub use resolver::{NutritionResolver, NutritionSource, ResolvedNutrition};
pub use table::{find_curated, CuratedFood, CURATED_FOODS};
