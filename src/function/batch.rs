//! Row-parallel dispatch over samples.
//!
//! [`map_rows`] splits the input and output buffers into matching chunks of
//! [`BATCH_CHUNK_ROWS`] rows. Each chunk writes only its own output rows, so
//! no locking is needed; the per-chunk results are collected in chunk order,
//! which makes the reported error the first failing row in input order no
//! matter which worker hit it first. With the `parallel` feature disabled the
//! same chunks run on the calling thread.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::BATCH_CHUNK_ROWS;
use crate::error::{Error, Result};
use crate::sample::Sample;

/// Apply `kernel` to every row of `input`.
///
/// `kernel(x, y)` receives one input row and the matching zeroed output row
/// of length `output_dimension`.
///
/// # Errors
///
/// `DimensionMismatch` if the sample dimension differs from
/// `input_dimension` (checked before any row runs); `InvalidRow` wrapping the
/// kernel's error for the first failing row.
///
/// ```
/// use uqkit::function::batch::map_rows;
/// use uqkit::sample::Sample;
///
/// let s = Sample::from_rows(2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let sums = map_rows(&s, 2, 1, |x, y| {
///     y[0] = x[0] + x[1];
///     Ok(())
/// })
/// .unwrap();
/// assert_eq!(sums.as_slice(), &[3.0, 7.0]);
/// ```
pub fn map_rows<F>(input: &Sample, input_dimension: usize, output_dimension: usize, kernel: F) -> Result<Sample>
where
    F: Fn(&[f64], &mut [f64]) -> Result<()> + Sync,
{
    if input.dimension() != input_dimension {
        return Err(Error::DimensionMismatch {
            expected: input_dimension,
            got: input.dimension(),
        });
    }
    let size = input.size();
    let mut output = Sample::zeros(size, output_dimension);
    if size == 0 {
        return Ok(output);
    }

    let row_error = |row: usize, e: Error| Error::InvalidRow { row, source: Box::new(e) };

    if input_dimension == 0 || output_dimension == 0 {
        // Empty rows cannot be chunked by length.
        for row in 0..size {
            kernel(input.row(row), output.row_mut(row)).map_err(|e| row_error(row, e))?;
        }
        return Ok(output);
    }

    let run_chunk = |(chunk, (ys, xs)): (usize, (&mut [f64], &[f64]))| -> Result<()> {
        let first_row = chunk * BATCH_CHUNK_ROWS;
        for (k, (y, x)) in ys
            .chunks_exact_mut(output_dimension)
            .zip(xs.chunks_exact(input_dimension))
            .enumerate()
        {
            kernel(x, y).map_err(|e| row_error(first_row + k, e))?;
        }
        Ok(())
    };

    let out_chunk = BATCH_CHUNK_ROWS * output_dimension;
    let in_chunk = BATCH_CHUNK_ROWS * input_dimension;

    #[cfg(feature = "parallel")]
    let results: Vec<Result<()>> = output
        .as_mut_slice()
        .par_chunks_mut(out_chunk)
        .zip(input.as_slice().par_chunks(in_chunk))
        .enumerate()
        .map(run_chunk)
        .collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<Result<()>> = output
        .as_mut_slice()
        .chunks_mut(out_chunk)
        .zip(input.as_slice().chunks(in_chunk))
        .enumerate()
        .map(run_chunk)
        .collect();

    log::debug!("evaluated {size} rows in {} chunks", results.len());
    results.into_iter().collect::<Result<()>>()?;
    Ok(output)
}
