//! Numeric block ids understood by the placement core.
//!
//! The host registry owns the full table; only ids the generator reads or
//! writes by name are listed here.

pub type BlockId = u16;

pub const AIR: BlockId = 0;
pub const STONE: BlockId = 1;
pub const BEDROCK: BlockId = 7;
pub const WATER: BlockId = 8;
pub const STILL_WATER: BlockId = 9;
pub const LAVA: BlockId = 10;
pub const STILL_LAVA: BlockId = 11;
pub const GRAVEL: BlockId = 13;
pub const TORCH: BlockId = 50;
pub const MONSTER_SPAWNER: BlockId = 52;
pub const CHEST: BlockId = 54;
pub const FURNACE: BlockId = 61;
pub const LADDER: BlockId = 65;
pub const COBWEB: BlockId = 30;
pub const NETHERRACK: BlockId = 87;
pub const SOUL_SAND: BlockId = 88;
pub const GLOWSTONE: BlockId = 89;
pub const NETHER_BRICKS: BlockId = 112;
pub const NETHER_BRICK_FENCE: BlockId = 113;
pub const NETHER_BRICKS_STAIRS: BlockId = 114;
pub const NETHER_WART: BlockId = 115;

const NAMES: &[(&str, BlockId)] = &[
    ("air", AIR),
    ("stone", STONE),
    ("bedrock", BEDROCK),
    ("water", WATER),
    ("still_water", STILL_WATER),
    ("lava", LAVA),
    ("still_lava", STILL_LAVA),
    ("gravel", GRAVEL),
    ("cobweb", COBWEB),
    ("torch", TORCH),
    ("monster_spawner", MONSTER_SPAWNER),
    ("chest", CHEST),
    ("furnace", FURNACE),
    ("ladder", LADDER),
    ("netherrack", NETHERRACK),
    ("soul_sand", SOUL_SAND),
    ("glowstone", GLOWSTONE),
    ("nether_bricks", NETHER_BRICKS),
    ("nether_brick_fence", NETHER_BRICK_FENCE),
    ("nether_bricks_stairs", NETHER_BRICKS_STAIRS),
    ("nether_wart", NETHER_WART),
];

pub fn name_of(id: BlockId) -> Option<&'static str> {
    NAMES.iter().find(|(_, i)| *i == id).map(|(n, _)| *n)
}

/// Flowing and still variants of water and lava.
#[inline]
pub fn is_liquid(id: BlockId) -> bool {
    matches!(id, WATER | STILL_WATER | LAVA | STILL_LAVA)
}

/// Cells a support column may overwrite while dropping to solid ground.
#[inline]
pub fn is_replaceable_by_column(id: BlockId) -> bool {
    id == AIR || is_liquid(id)
}

/// Blocks whose meta stores a stair direction in the low two bits.
#[inline]
pub fn is_stairs(id: BlockId) -> bool {
    id == NETHER_BRICKS_STAIRS
}

/// Blocks whose meta stores a wall-facing value (2..=5).
#[inline]
pub fn is_wall_facing(id: BlockId) -> bool {
    matches!(id, CHEST | FURNACE | LADDER)
}
