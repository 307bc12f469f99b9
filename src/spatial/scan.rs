//! Outward block scan with a pinned visiting order
//!
//! Offsets are visited shell by shell in ascending manhattan distance from the
//! center; inside a shell the order is ascending `dy`, then `dx`, then `dz`.
//! Nearest-match searches that keep the first candidate on ties therefore
//! produce the same answer on every run.

use super::BlockPos;

/// Precomputed outward visiting order for a box of half-extents `(rx, ry, rz)`
#[derive(Debug, Clone)]
pub struct OutwardScan {
    offsets: Vec<(i32, i32, i32)>,
}

impl OutwardScan {
    pub fn new(rx: i32, ry: i32, rz: i32) -> Self {
        let (rx, ry, rz) = (rx.max(0), ry.max(0), rz.max(0));
        let side = |r: i32| 2 * r as usize + 1;
        let capacity = side(rx)
            .saturating_mul(side(ry))
            .saturating_mul(side(rz));
        let mut offsets = Vec::with_capacity(capacity);
        for dy in -ry..=ry {
            for dx in -rx..=rx {
                for dz in -rz..=rz {
                    offsets.push((dx, dy, dz));
                }
            }
        }
        // Stable sort keeps the (dy, dx, dz) order inside each shell
        offsets.sort_by_key(|&(dx, dy, dz)| dx.abs() + dy.abs() + dz.abs());
        Self { offsets }
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Positions around `center` in visiting order
    pub fn around(&self, center: BlockPos) -> impl Iterator<Item = BlockPos> + '_ {
        self.offsets
            .iter()
            .map(move |&(dx, dy, dz)| center.offset(dx, dy, dz))
    }
}
