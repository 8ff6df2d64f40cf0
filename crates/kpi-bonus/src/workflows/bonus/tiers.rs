use super::domain::{Tier, TierMatch};

/// Descending stepwise lookup: the highest threshold not above `value` wins.
///
/// Tiers sharing a threshold keep their configured order, so the first configured one
/// is selected.
pub(crate) fn select_tier<T: Tier>(tiers: &[T], value: f64) -> TierMatch<T> {
    let mut ordered: Vec<&T> = tiers.iter().collect();
    ordered.sort_by(|a, b| b.threshold().total_cmp(&a.threshold()));

    ordered
        .into_iter()
        .find(|tier| value >= tier.threshold())
        .cloned()
        .map(TierMatch::Matched)
        .unwrap_or(TierMatch::Unmatched)
}
