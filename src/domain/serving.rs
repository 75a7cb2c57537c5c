use super::household::HouseholdMember;
use super::meal_plan::MealSlot;
use super::round2;

/// Total servings a slot needs for the week: the serving sizes of the members
/// eating it, summed, times the number of days it covers.
///
/// Example: Mitch(1.5) + Wife(1.0) + Daughter(0.25) = 2.75 × 3 days = 8.25.
///
/// Members no longer in the slot are silently excluded; an empty slot or a
/// slot with no days is exactly 0.0.
pub fn total_servings(slot: &MealSlot, members: &[HouseholdMember]) -> f64 {
    let per_meal: f64 = members
        .iter()
        .filter(|m| slot.member_ids.contains(&m.id))
        .map(|m| m.serving_size)
        .sum();
    round2(per_meal * slot.day_count() as f64)
}
