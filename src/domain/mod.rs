pub mod grocery;
pub mod grocery_list;
pub mod household;
pub mod meal_plan;
pub mod preferences;
pub mod recipe;
pub mod serving;

/// Round to 2 decimal places, half away from zero (`f64::round` semantics).
/// All grocery quantities go through this so repeated scaling stays stable.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
