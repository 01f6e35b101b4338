//! Tier and level resolution
//!
//! Table driven: the highest-index tier whose requirement is met wins. The
//! base tier is a separate guard applied after resolution, so a real tier named
//! "Grind" anywhere in the table still maps to level 0.

use passboard_common::RewardTier;

/// Name of the base tier every zero-XP member sits in
pub const BASE_TIER_NAME: &str = "Grind";

/// Resolved tier for one member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierLevel {
    pub tier_name: String,
    /// 1-based tier index, or 0 for the base tier
    pub level: u32,
}

/// Derive tier name and level from total XP and an ascending tier table
///
/// Before any tier qualifies the member sits at level 1 in the first tier
/// (empty name when the table is empty).
pub fn resolve_tier_and_level(total_xp: u64, tiers: &[RewardTier]) -> TierLevel {
    let mut level: u32 = 1;
    let mut tier_name = tiers.first().map(|t| t.name.clone()).unwrap_or_default();

    for (idx, tier) in tiers.iter().enumerate() {
        if total_xp >= tier.xp_required {
            level = idx as u32 + 1;
            tier_name = tier.name.clone();
        }
    }

    if total_xp == 0 || tier_name.eq_ignore_ascii_case(BASE_TIER_NAME) {
        return TierLevel {
            tier_name: BASE_TIER_NAME.to_string(),
            level: 0,
        };
    }

    TierLevel { tier_name, level }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metals() -> Vec<RewardTier> {
        vec![
            RewardTier::new("Bronze", 0),
            RewardTier::new("Silver", 100),
            RewardTier::new("Gold", 500),
        ]
    }

    #[test]
    fn test_highest_qualifying_tier() {
        let resolved = resolve_tier_and_level(150, &metals());
        assert_eq!(resolved.tier_name, "Silver");
        assert_eq!(resolved.level, 2);

        let resolved = resolve_tier_and_level(500, &metals());
        assert_eq!(resolved.tier_name, "Gold");
        assert_eq!(resolved.level, 3);
    }

    #[test]
    fn test_zero_xp_is_grind() {
        let resolved = resolve_tier_and_level(0, &metals());
        assert_eq!(resolved, TierLevel { tier_name: "Grind".to_string(), level: 0 });
    }

    #[test]
    fn test_zero_xp_without_tiers_is_grind() {
        let resolved = resolve_tier_and_level(0, &[]);
        assert_eq!(resolved.tier_name, "Grind");
        assert_eq!(resolved.level, 0);
    }

    #[test]
    fn test_grind_named_tier_forces_level_zero() {
        let tiers = vec![RewardTier::new("grind", 0), RewardTier::new("Silver", 100)];
        let resolved = resolve_tier_and_level(50, &tiers);
        assert_eq!(resolved.tier_name, "Grind");
        assert_eq!(resolved.level, 0);

        let resolved = resolve_tier_and_level(120, &tiers);
        assert_eq!(resolved.tier_name, "Silver");
        assert_eq!(resolved.level, 2);
    }

    #[test]
    fn test_below_first_requirement_keeps_first_tier() {
        let tiers = vec![RewardTier::new("Bronze", 10), RewardTier::new("Silver", 100)];
        let resolved = resolve_tier_and_level(5, &tiers);
        assert_eq!(resolved.tier_name, "Bronze");
        assert_eq!(resolved.level, 1);
    }

    #[test]
    fn test_positive_xp_without_tiers() {
        let resolved = resolve_tier_and_level(40, &[]);
        assert_eq!(resolved.tier_name, "");
        assert_eq!(resolved.level, 1);
    }
}
