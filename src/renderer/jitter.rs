use rand::Rng;

use crate::geometry::FloatType;

/// Sub-pixel offsets in `[0, 1)`, one per sample, generated once before a
/// render is dispatched.
///
/// Worker threads only ever read the table, so rows never contend on a shared
/// RNG. Every pixel of a sample pass shares one offset, which costs a little
/// cross-row statistical independence; total sample count, not offset
/// uniqueness, dominates visible noise.
#[derive(Clone, Debug)]
pub(crate) struct JitterTable {
    offsets: Vec<FloatType>,
}

impl JitterTable {
    pub fn generate(sample_count: u32, rng: &mut impl Rng) -> JitterTable {
        JitterTable {
            offsets: (0..sample_count).map(|_| rng.random()).collect(),
        }
    }

    pub fn offset(&self, sample: u32) -> FloatType {
        self.offsets[sample as usize]
    }
}
