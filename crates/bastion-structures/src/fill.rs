//! Block placement and bulk fills in piece-local coordinates.
//!
//! Every write is clipped to the generation box handed in by the caller, so
//! a piece spanning several chunks only touches the chunk being populated.

use bastion_blocks::state::stairs;
use bastion_blocks::{BlockState, Rotation, ids, is_replaceable_by_column};
use bastion_geom::BoundingBox;
use bastion_world::ChunkManager;

use crate::actors::{BlockActorSink, block_actor_tag};
use crate::piece::PieceBase;
use crate::random::RandomSource;
use crate::selector::BlockSelector;

/// The block actually written for `block` under `rotation`.
///
/// Nether-brick stairs follow their own table: a quarter turn clockwise
/// always rotates; a half turn only rotates south/north stairs; a quarter
/// turn counter-clockwise turns east/west stairs clockwise and south/north
/// stairs counter-clockwise. Any other stair value (e.g. upside-down) is
/// kept as-is under the latter two.
pub fn placement_block(rotation: Rotation, block: BlockState) -> BlockState {
    if rotation == Rotation::None {
        return block;
    }
    if block.id != ids::NETHER_BRICKS_STAIRS {
        return block.rotate(rotation);
    }
    match rotation {
        Rotation::Clockwise90 => block.rotate(rotation),
        Rotation::Clockwise180 => match block.meta {
            stairs::SOUTH | stairs::NORTH => block.rotate(rotation),
            _ => block,
        },
        Rotation::CounterClockwise90 => match block.meta {
            stairs::EAST | stairs::WEST => block.rotate(Rotation::Clockwise90),
            stairs::SOUTH | stairs::NORTH => block.rotate(rotation),
            _ => block,
        },
        Rotation::None => block,
    }
}

#[inline]
#[allow(clippy::too_many_arguments)]
fn on_shell(x: i32, y: i32, z: i32, x1: i32, y1: i32, z1: i32, x2: i32, y2: i32, z2: i32) -> bool {
    y == y1 || y == y2 || x == x1 || x == x2 || z == z1 || z == z2
}

impl PieceBase {
    /// Writes `block` at local `(x, y, z)` if the world cell lies in
    /// `gen_box`. Returns whether anything was written.
    pub fn place_block(
        &self,
        level: &dyn ChunkManager,
        block: BlockState,
        x: i32,
        y: i32,
        z: i32,
        gen_box: &BoundingBox,
    ) -> bool {
        let pos = self.world_pos(x, y, z);
        if !gen_box.is_inside(pos) {
            return false;
        }
        let placed = placement_block(self.rotation(), block);
        level.set_block_state_at(pos.x, pos.y, pos.z, placed);
        true
    }

    /// Reads local `(x, y, z)`; air when the world cell is outside `gen_box`.
    pub fn get_block(
        &self,
        level: &dyn ChunkManager,
        x: i32,
        y: i32,
        z: i32,
        gen_box: &BoundingBox,
    ) -> BlockState {
        let pos = self.world_pos(x, y, z);
        if !gen_box.is_inside(pos) {
            return BlockState::AIR;
        }
        level.block_state_at(pos.x, pos.y, pos.z)
    }

    /// True when the cell just above local `(x, y, z)` sits below the
    /// column's highest block. Missing chunks count as not interior.
    pub fn is_interior(
        &self,
        level: &dyn ChunkManager,
        x: i32,
        y: i32,
        z: i32,
        gen_box: &BoundingBox,
    ) -> bool {
        let wx = self.world_x(x, z);
        let wy = self.world_y(y + 1);
        let wz = self.world_z(x, z);
        if !gen_box.contains(wx, wy, wz) {
            return false;
        }
        match level.chunk(wx >> 4, wz >> 4) {
            Some(chunk) => wy < chunk.highest_block_at(wx & 0xf, wz & 0xf),
            None => false,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn generate_air_box(
        &self,
        level: &dyn ChunkManager,
        gen_box: &BoundingBox,
        x1: i32,
        y1: i32,
        z1: i32,
        x2: i32,
        y2: i32,
        z2: i32,
    ) {
        for y in y1..=y2 {
            for x in x1..=x2 {
                for z in z1..=z2 {
                    self.place_block(level, BlockState::AIR, x, y, z, gen_box);
                }
            }
        }
    }

    /// Fills the local box: shell cells get `outside`, the rest `inside`.
    /// With `skip_air` only cells currently holding a non-air block are
    /// written.
    #[allow(clippy::too_many_arguments)]
    pub fn generate_box(
        &self,
        level: &dyn ChunkManager,
        gen_box: &BoundingBox,
        x1: i32,
        y1: i32,
        z1: i32,
        x2: i32,
        y2: i32,
        z2: i32,
        outside: BlockState,
        inside: BlockState,
        skip_air: bool,
    ) {
        for y in y1..=y2 {
            for x in x1..=x2 {
                for z in z1..=z2 {
                    if skip_air && self.get_block(level, x, y, z, gen_box).is_air() {
                        continue;
                    }
                    let block = if on_shell(x, y, z, x1, y1, z1, x2, y2, z2) {
                        outside
                    } else {
                        inside
                    };
                    self.place_block(level, block, x, y, z, gen_box);
                }
            }
        }
    }

    /// Like [`generate_box`](Self::generate_box), but each cell's block comes
    /// from `selector`, advanced once per cell with the shell flag.
    #[allow(clippy::too_many_arguments)]
    pub fn generate_box_with(
        &self,
        level: &dyn ChunkManager,
        gen_box: &BoundingBox,
        x1: i32,
        y1: i32,
        z1: i32,
        x2: i32,
        y2: i32,
        z2: i32,
        skip_air: bool,
        random: &mut dyn RandomSource,
        selector: &mut dyn BlockSelector,
    ) {
        for y in y1..=y2 {
            for x in x1..=x2 {
                for z in z1..=z2 {
                    if skip_air && self.get_block(level, x, y, z, gen_box).is_air() {
                        continue;
                    }
                    selector.next(random, x, y, z, on_shell(x, y, z, x1, y1, z1, x2, y2, z2));
                    self.place_block(level, selector.current(), x, y, z, gen_box);
                }
            }
        }
    }

    /// Probabilistic box fill. One draw per cell happens before the
    /// `skip_air` and `check_interior` gates; a cell is written when
    /// `draw <= probability`.
    #[allow(clippy::too_many_arguments)]
    pub fn generate_maybe_box(
        &self,
        level: &dyn ChunkManager,
        gen_box: &BoundingBox,
        random: &mut dyn RandomSource,
        probability: i32,
        x1: i32,
        y1: i32,
        z1: i32,
        x2: i32,
        y2: i32,
        z2: i32,
        outside: BlockState,
        inside: BlockState,
        skip_air: bool,
        check_interior: bool,
    ) {
        for y in y1..=y2 {
            for x in x1..=x2 {
                for z in z1..=z2 {
                    if random.next_bounded_int(100) > probability {
                        continue;
                    }
                    if skip_air && self.get_block(level, x, y, z, gen_box).is_air() {
                        continue;
                    }
                    if check_interior && !self.is_interior(level, x, y, z, gen_box) {
                        continue;
                    }
                    let block = if on_shell(x, y, z, x1, y1, z1, x2, y2, z2) {
                        outside
                    } else {
                        inside
                    };
                    self.place_block(level, block, x, y, z, gen_box);
                }
            }
        }
    }

    /// Writes `block` when `draw < probability`.
    #[allow(clippy::too_many_arguments)]
    pub fn maybe_generate_block(
        &self,
        level: &dyn ChunkManager,
        gen_box: &BoundingBox,
        random: &mut dyn RandomSource,
        probability: i32,
        x: i32,
        y: i32,
        z: i32,
        block: BlockState,
    ) -> bool {
        if random.next_bounded_int(100) < probability {
            return self.place_block(level, block, x, y, z, gen_box);
        }
        false
    }

    /// Dome inscribed in the local box, flat side at `y1`. Cells with
    /// normalized squared distance `<= 1.05` are written.
    #[allow(clippy::too_many_arguments)]
    pub fn generate_upper_half_sphere(
        &self,
        level: &dyn ChunkManager,
        gen_box: &BoundingBox,
        x1: i32,
        y1: i32,
        z1: i32,
        x2: i32,
        y2: i32,
        z2: i32,
        block: BlockState,
        skip_air: bool,
    ) {
        let x_len = (x2 - x1 + 1) as f32;
        let y_len = (y2 - y1 + 1) as f32;
        let z_len = (z2 - z1 + 1) as f32;
        let x_half = x1 as f32 + x_len / 2.0;
        let z_half = z1 as f32 + z_len / 2.0;

        for y in y1..=y2 {
            let dy = (y - y1) as f32 / y_len;
            for x in x1..=x2 {
                let dx = (x as f32 - x_half) / (x_len * 0.5);
                for z in z1..=z2 {
                    let dz = (z as f32 - z_half) / (z_len * 0.5);
                    if skip_air && self.get_block(level, x, y, z, gen_box).is_air() {
                        continue;
                    }
                    if dx * dx + dy * dy + dz * dz <= 1.05 {
                        self.place_block(level, block, x, y, z, gen_box);
                    }
                }
            }
        }
    }

    /// Extends a column downward from local `(x, y, z)` through air and
    /// liquid, stopping at the first solid block or at world y 1. A start
    /// above the chunk's top is lowered to it. Writes go straight to the
    /// owning chunk without rotation. Returns the number of cells written.
    pub fn fill_column_down(
        &self,
        level: &dyn ChunkManager,
        block: BlockState,
        x: i32,
        y: i32,
        z: i32,
        gen_box: &BoundingBox,
    ) -> usize {
        let wx = self.world_x(x, z);
        let mut wy = self.world_y(y);
        let wz = self.world_z(x, z);
        if !gen_box.contains(wx, wy, wz) {
            return 0;
        }
        let Some(chunk) = level.chunk(wx >> 4, wz >> 4) else {
            return 0;
        };
        let (lx, lz) = (wx & 0xf, wz & 0xf);
        wy = wy.min(chunk.height() - 1);
        let mut written = 0;
        while is_replaceable_by_column(chunk.block_id(lx, wy, lz)) && wy > 1 {
            chunk.set_block(lx, wy, lz, block.id, block.meta);
            written += 1;
            wy -= 1;
        }
        written
    }

    /// Queues a block-actor record at local `(x, y, z)` when the world cell
    /// lies in `gen_box`.
    pub fn queue_block_actor(
        &self,
        actors: &mut dyn BlockActorSink,
        id: &str,
        x: i32,
        y: i32,
        z: i32,
        gen_box: &BoundingBox,
    ) -> bool {
        let pos = self.world_pos(x, y, z);
        if !gen_box.is_inside(pos) {
            return false;
        }
        actors.spawn_block_actor(block_actor_tag(id, pos));
        true
    }
}
