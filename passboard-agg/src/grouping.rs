//! Owner grouping
//!
//! Groups are ordered by the first appearance of each owner in the raw asset
//! list; assets inside a group keep their encounter order. Stable ranking and
//! "first valid tier table" both rely on this ordering.

use passboard_common::AssetRecord;
use std::collections::HashMap;

/// Assets currently held by one owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerGroup {
    pub owner: String,
    pub assets: Vec<AssetRecord>,
}

impl OwnerGroup {
    /// First asset encountered for this owner
    pub fn primary_asset_id(&self) -> &str {
        self.assets.first().map(|a| a.id.as_str()).unwrap_or_default()
    }
}

/// Partition assets by current owner
pub fn group_by_owner(assets: impl IntoIterator<Item = AssetRecord>) -> Vec<OwnerGroup> {
    let mut groups: Vec<OwnerGroup> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for asset in assets {
        match positions.get(&asset.owner_address) {
            Some(&idx) => groups[idx].assets.push(asset),
            None => {
                positions.insert(asset.owner_address.clone(), groups.len());
                groups.push(OwnerGroup {
                    owner: asset.owner_address.clone(),
                    assets: vec![asset],
                });
            }
        }
    }

    groups
}
