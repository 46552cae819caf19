use bastion_blocks::BlockState;

use crate::random::RandomSource;

/// Stateful block chooser driven once per cell by
/// [`PieceBase::generate_box_with`](crate::PieceBase::generate_box_with).
pub trait BlockSelector {
    /// Advances to the block for local `(x, y, z)`; `edge` marks shell cells.
    fn next(&mut self, random: &mut dyn RandomSource, x: i32, y: i32, z: i32, edge: bool);

    fn current(&self) -> BlockState;
}

/// Weighted pick among shell blocks; interior cells always get one block.
#[derive(Clone, Debug)]
pub struct ScatterSelector {
    shell: Vec<(BlockState, i32)>,
    total_weight: i32,
    interior: BlockState,
    next: BlockState,
}

impl ScatterSelector {
    pub fn new(interior: BlockState) -> Self {
        Self {
            shell: Vec::new(),
            total_weight: 0,
            interior,
            next: interior,
        }
    }

    /// Adds a shell candidate; non-positive weights are ignored.
    pub fn with(mut self, block: BlockState, weight: i32) -> Self {
        if weight > 0 {
            self.shell.push((block, weight));
            self.total_weight += weight;
        }
        self
    }
}

impl BlockSelector for ScatterSelector {
    fn next(&mut self, random: &mut dyn RandomSource, _x: i32, _y: i32, _z: i32, edge: bool) {
        if !edge || self.shell.is_empty() {
            self.next = self.interior;
            return;
        }
        let mut roll = random.next_bounded_int(self.total_weight);
        for &(block, weight) in &self.shell {
            if roll < weight {
                self.next = block;
                return;
            }
            roll -= weight;
        }
    }

    #[inline]
    fn current(&self) -> BlockState {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;
    use bastion_blocks::ids;

    #[test]
    fn interior_cells_ignore_weights() {
        let mut s = ScatterSelector::new(BlockState::AIR).with(BlockState::of(ids::GRAVEL), 5);
        let mut r = SequenceRandom::constant(0);
        s.next(&mut r, 0, 0, 0, false);
        assert_eq!(s.current(), BlockState::AIR);
        assert_eq!(r.draws(), 0);
    }

    #[test]
    fn shell_rolls_walk_the_weights() {
        let mut s = ScatterSelector::new(BlockState::AIR)
            .with(BlockState::of(ids::NETHER_BRICKS), 3)
            .with(BlockState::of(ids::NETHERRACK), 1);
        let mut r = SequenceRandom::new([2, 3]);
        s.next(&mut r, 0, 0, 0, true);
        assert_eq!(s.current().id, ids::NETHER_BRICKS);
        s.next(&mut r, 0, 0, 0, true);
        assert_eq!(s.current().id, ids::NETHERRACK);
    }
}
