//! Block tiers and the destructible block grid

use super::rect::{Rect, intersects};
use crate::consts::*;

/// Block colour tier, topmost (hardest) first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Red,
    Orange,
    Green,
    Yellow,
}

impl Tier {
    /// Tier palette in row order, top to bottom
    pub const PALETTE: [Tier; 4] = [Tier::Red, Tier::Orange, Tier::Green, Tier::Yellow];

    /// Tier for a grid row: every `ROWS_PER_TIER` rows step down the palette
    pub fn for_row(row: usize) -> Self {
        Self::PALETTE[(row / ROWS_PER_TIER) % Self::PALETTE.len()]
    }

    /// Points awarded for destroying a block of this tier
    pub fn score(self) -> u32 {
        match self {
            Tier::Yellow => 1,
            Tier::Green => 3,
            Tier::Orange => 5,
            Tier::Red => 7,
        }
    }

    /// Velocity multiplier applied on a destructive hit
    pub fn speed_boost(self) -> f32 {
        match self {
            Tier::Yellow => 1.1,
            Tier::Green => 1.2,
            Tier::Orange => 1.3,
            Tier::Red => 1.4,
        }
    }

    /// Per-axis speed cap applied after the boost
    pub fn max_speed(self) -> f32 {
        match self {
            Tier::Yellow => 5.0,
            Tier::Green => 6.0,
            Tier::Orange => 7.0,
            Tier::Red => 8.0,
        }
    }

    /// Display colour (RGB)
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Tier::Red => (255, 0, 0),
            Tier::Orange => (255, 190, 0),
            Tier::Green => (0, 255, 0),
            Tier::Yellow => (255, 255, 0),
        }
    }
}

/// A destructible block
#[derive(Debug, Clone)]
pub struct Block {
    pub rect: Rect,
    pub tier: Tier,
    /// Cleared exactly once, on a destructive hit
    pub visible: bool,
}

/// Blocks in grid layout order (left to right, top to bottom)
#[derive(Debug, Clone, Default)]
pub struct BlockGrid {
    blocks: Vec<Block>,
}

impl BlockGrid {
    /// Lay out a `rows` x `cols` grid starting `top_offset` pixels down
    pub fn generate(rows: usize, cols: usize, spacing: f32, top_offset: f32) -> Self {
        let mut blocks = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            let tier = Tier::for_row(row);
            for col in 0..cols {
                let x = col as f32 * (BLOCK_WIDTH + spacing);
                let y = row as f32 * (BLOCK_HEIGHT + spacing) + top_offset;
                blocks.push(Block {
                    rect: Rect::new(x, y, BLOCK_WIDTH, BLOCK_HEIGHT),
                    tier,
                    visible: true,
                });
            }
        }
        Self { blocks }
    }

    /// The standard 8 x 14 layout used by the menu and every session
    pub fn standard() -> Self {
        Self::generate(GRID_ROWS, GRID_COLS, GRID_SPACING, GRID_TOP_OFFSET)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn visible(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.visible)
    }

    /// Number of blocks not yet destroyed
    pub fn remaining(&self) -> usize {
        self.visible().count()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// First visible block (in layout order) overlapping `rect`
    pub fn first_hit(&mut self, rect: &Rect) -> Option<&mut Block> {
        self.blocks
            .iter_mut()
            .find(|b| b.visible && intersects(&b.rect, rect))
    }
}
