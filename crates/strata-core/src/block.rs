//! Named block registry for the numeric (pre-flattening) block IDs.
//! Only IDs the survey cares about are named; the rest display as `block#N`.

use crate::types::BlockId;

pub const STONE: BlockId = BlockId(1);
pub const DIRT: BlockId = BlockId(3);
pub const BEDROCK: BlockId = BlockId(7);
pub const FLOWING_WATER: BlockId = BlockId(8);
pub const WATER: BlockId = BlockId(9);
pub const FLOWING_LAVA: BlockId = BlockId(10);
pub const LAVA: BlockId = BlockId(11);
pub const GRAVEL: BlockId = BlockId(13);
pub const GOLD_ORE: BlockId = BlockId(14);
pub const IRON_ORE: BlockId = BlockId(15);
pub const COAL_ORE: BlockId = BlockId(16);
pub const LAPIS_ORE: BlockId = BlockId(21);
pub const OBSIDIAN: BlockId = BlockId(49);
pub const MOB_SPAWNER: BlockId = BlockId(52);
pub const DIAMOND_ORE: BlockId = BlockId(56);
pub const REDSTONE_ORE: BlockId = BlockId(73);
pub const LIT_REDSTONE_ORE: BlockId = BlockId(74);
pub const EMERALD_ORE: BlockId = BlockId(129);

/// (id, name) pairs, sorted by id.
pub const NAMED_BLOCKS: &[(BlockId, &str)] = &[
    (BlockId::AIR, "air"),
    (STONE, "stone"),
    (BlockId(2), "grass"),
    (DIRT, "dirt"),
    (BlockId(4), "cobblestone"),
    (BlockId(5), "planks"),
    (BEDROCK, "bedrock"),
    (FLOWING_WATER, "flowing_water"),
    (WATER, "water"),
    (FLOWING_LAVA, "flowing_lava"),
    (LAVA, "lava"),
    (BlockId(12), "sand"),
    (GRAVEL, "gravel"),
    (GOLD_ORE, "gold_ore"),
    (IRON_ORE, "iron_ore"),
    (COAL_ORE, "coal_ore"),
    (LAPIS_ORE, "lapis_ore"),
    (BlockId(30), "web"),
    (OBSIDIAN, "obsidian"),
    (MOB_SPAWNER, "mob_spawner"),
    (BlockId(54), "chest"),
    (DIAMOND_ORE, "diamond_ore"),
    (BlockId(66), "rail"),
    (REDSTONE_ORE, "redstone_ore"),
    (LIT_REDSTONE_ORE, "lit_redstone_ore"),
    (BlockId(85), "fence"),
    (BlockId(97), "monster_egg"),
    (EMERALD_ORE, "emerald_ore"),
];

/// Registry name for a block ID, if it has one.
pub fn block_name(id: BlockId) -> Option<&'static str> {
    NAMED_BLOCKS
        .binary_search_by_key(&id, |&(block, _)| block)
        .ok()
        .map(|index| NAMED_BLOCKS[index].1)
}

/// Look up a block ID by registry name.
pub fn block_by_name(name: &str) -> Option<BlockId> {
    NAMED_BLOCKS
        .iter()
        .find(|&&(_, block_name)| block_name == name)
        .map(|&(id, _)| id)
}

/// Name suitable for reports: the registry name, or `block#N` for unnamed IDs.
pub fn display_name(id: BlockId) -> String {
    match block_name(id) {
        Some(name) => name.to_string(),
        None => format!("block#{}", id.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_sorted_and_unique() {
        for pair in NAMED_BLOCKS.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{:?} not before {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_lookup_both_directions() {
        assert_eq!(block_by_name("diamond_ore"), Some(DIAMOND_ORE));
        assert_eq!(block_by_name("lava"), Some(LAVA));
        assert_eq!(block_name(DIAMOND_ORE), Some("diamond_ore"));
        assert_eq!(block_name(BlockId::AIR), Some("air"));
        assert_eq!(block_by_name("unobtainium"), None);
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(display_name(LAVA), "lava");
        assert_eq!(display_name(BlockId(200)), "block#200");
    }
}
