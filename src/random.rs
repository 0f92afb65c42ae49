//! Seeded random sub-streams for parallel sampling.
//!
//! Nothing in the crate owns a global generator. Scalar draws take the
//! caller's `&mut impl Rng`; batch draws take a seed, split the output into
//! fixed-size row chunks and give each chunk its own [`StdRng`] from
//! [`substream`]. Because chunk boundaries do not depend on the thread count,
//! a seeded batch is identical whether it runs on one thread or many.

use rand::SeedableRng;
use rand::rngs::StdRng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::BATCH_CHUNK_ROWS;
use crate::sample::Sample;

/// Generator for chunk `index` of a batch seeded with `seed`.
///
/// Same `(seed, index)` gives the same sequence; neighbouring pairs are
/// decorrelated by a multiplicative hash before seeding.
///
/// ```
/// use rand::Rng;
/// use uqkit::random::substream;
///
/// let a: f64 = substream(42, 3).random();
/// let b: f64 = substream(42, 3).random();
/// let c: f64 = substream(42, 4).random();
/// assert_eq!(a, b);
/// assert_ne!(a, c);
/// ```
pub fn substream(seed: u64, index: u64) -> StdRng {
    StdRng::seed_from_u64(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(index))
}

/// Fill a `size × dimension` sample row by row with `draw`, one sub-stream
/// per chunk of `BATCH_CHUNK_ROWS` rows.
pub(crate) fn fill_rows<F>(size: usize, dimension: usize, seed: u64, draw: F) -> Sample
where
    F: Fn(&mut StdRng, &mut [f64]) + Sync,
{
    let mut out = Sample::zeros(size, dimension);
    if size == 0 || dimension == 0 {
        return out;
    }
    let chunk_len = BATCH_CHUNK_ROWS * dimension;
    let fill_chunk = |(index, chunk): (usize, &mut [f64])| {
        let mut rng = substream(seed, index as u64);
        for row in chunk.chunks_exact_mut(dimension) {
            draw(&mut rng, row);
        }
    };

    #[cfg(feature = "parallel")]
    out.as_mut_slice().par_chunks_mut(chunk_len).enumerate().for_each(fill_chunk);
    #[cfg(not(feature = "parallel"))]
    out.as_mut_slice().chunks_mut(chunk_len).enumerate().for_each(fill_chunk);

    log::debug!("drew {size} rows of dimension {dimension} in {} chunks", size.div_ceil(BATCH_CHUNK_ROWS));
    out
}
