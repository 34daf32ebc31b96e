use super::error::EvalError;
use ndarray::{Array, Array1, ArrayView, Axis, RemoveAxis, Zip, concatenate};
use tracing::trace;

fn concat_results<D: RemoveAxis>(results: &[Array<f64, D>]) -> Result<Array<f64, D>, EvalError> {
    let views: Vec<ArrayView<'_, f64, D>> = results.iter().map(|r| r.view()).collect();
    Ok(concatenate(Axis(0), &views)?)
}

/// Applies `func` to every batch and concatenates the results along axis 0.
pub fn eval_batched<D, F>(
    batches: &[Array<f64, D>],
    mut func: F,
) -> Result<Array<f64, D>, EvalError>
where
    D: RemoveAxis,
    F: FnMut(ArrayView<'_, f64, D>) -> Array<f64, D>,
{
    if batches.is_empty() {
        return Err(EvalError::EmptyInput);
    }
    trace!(batches = batches.len(), "evaluating batched function");
    let results: Vec<Array<f64, D>> = batches.iter().map(|batch| func(batch.view())).collect();
    concat_results(&results)
}

/// Applies a two-output `func` to every batch and concatenates each output
/// component along axis 0.
pub fn eval_batched_pair<D, F>(
    batches: &[Array<f64, D>],
    mut func: F,
) -> Result<(Array<f64, D>, Array<f64, D>), EvalError>
where
    D: RemoveAxis,
    F: FnMut(ArrayView<'_, f64, D>) -> (Array<f64, D>, Array<f64, D>),
{
    if batches.is_empty() {
        return Err(EvalError::EmptyInput);
    }
    let (firsts, seconds): (Vec<_>, Vec<_>) =
        batches.iter().map(|batch| func(batch.view())).unzip();
    Ok((concat_results(&firsts)?, concat_results(&seconds)?))
}

/// Splits `xs` along axis 0 into chunks of `chunk_size` rows (the last
/// chunk may be shorter), applies `func` per chunk, and concatenates the
/// results.
pub fn eval_chunked<D, F>(
    xs: &Array<f64, D>,
    chunk_size: usize,
    mut func: F,
) -> Result<Array<f64, D>, EvalError>
where
    D: RemoveAxis,
    F: FnMut(ArrayView<'_, f64, D>) -> Array<f64, D>,
{
    if chunk_size == 0 {
        return Err(EvalError::InvalidChunkSize);
    }
    if xs.is_empty() {
        return Err(EvalError::EmptyInput);
    }
    let results: Vec<Array<f64, D>> = xs
        .axis_chunks_iter(Axis(0), chunk_size)
        .map(&mut func)
        .collect();
    trace!(chunks = results.len(), "evaluated chunked function");
    concat_results(&results)
}

/// Overwrites the rows of each `dst[i]` with the corresponding rows of
/// `src[i]` wherever `keep` is set; unmasked rows are left untouched.
///
/// All arrays are validated before any of them is mutated.
pub fn assign_where<D>(
    dst: &mut [Array<f64, D>],
    src: &[Array<f64, D>],
    keep: &Array1<bool>,
) -> Result<(), EvalError>
where
    D: RemoveAxis,
{
    if dst.len() != src.len() {
        return Err(EvalError::LengthMismatch {
            expected: dst.len(),
            found: src.len(),
        });
    }
    for (d, s) in dst.iter().zip(src) {
        if d.shape() != s.shape() {
            return Err(EvalError::ShapeMismatch {
                expected: d.shape().to_vec(),
                found: s.shape().to_vec(),
            });
        }
        if d.len_of(Axis(0)) != keep.len() {
            return Err(EvalError::LengthMismatch {
                expected: d.len_of(Axis(0)),
                found: keep.len(),
            });
        }
    }

    for (d, s) in dst.iter_mut().zip(src) {
        Zip::from(d.outer_iter_mut())
            .and(s.outer_iter())
            .and(keep)
            .for_each(|mut d_row, s_row, &m| {
                if m {
                    d_row.assign(&s_row);
                }
            });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    #[test]
    fn eval_batched_concatenates_in_batch_order() {
        let batches = [array![1.0, 2.0], array![3.0]];
        let out = eval_batched(&batches, |batch| &batch * 2.0).unwrap();

        assert_eq!(out, array![2.0, 4.0, 6.0]);
    }

    #[test]
    fn eval_batched_with_no_batches_errors() {
        let batches: [Array2<f64>; 0] = [];
        let result = eval_batched(&batches, |batch| batch.to_owned());

        assert!(matches!(result, Err(EvalError::EmptyInput)));
    }

    #[test]
    fn eval_batched_surfaces_incompatible_result_shapes() {
        let batches = [array![[1.0, 2.0]], array![[3.0, 4.0, 5.0]]];
        let result = eval_batched(&batches, |batch| batch.to_owned());

        assert!(matches!(result, Err(EvalError::Concatenate { .. })));
    }

    #[test]
    fn eval_batched_pair_concatenates_each_component() {
        let batches = [array![1.0, 2.0], array![3.0]];
        let (doubled, shifted) =
            eval_batched_pair(&batches, |batch| (&batch * 2.0, &batch + 1.0)).unwrap();

        assert_eq!(doubled, array![2.0, 4.0, 6.0]);
        assert_eq!(shifted, array![2.0, 3.0, 4.0]);
    }

    #[test]
    fn eval_chunked_matches_unchunked_evaluation_with_ragged_tail() {
        let xs = Array2::from_shape_fn((10, 3), |(i, j)| (i * 3 + j) as f64);
        let out = eval_chunked(&xs, 4, |chunk| &chunk * 3.0).unwrap();

        assert_eq!(out, &xs * 3.0);
    }

    #[test]
    fn eval_chunked_with_zero_chunk_size_errors() {
        let xs = array![1.0, 2.0];
        let result = eval_chunked(&xs, 0, |chunk| chunk.to_owned());

        assert!(matches!(result, Err(EvalError::InvalidChunkSize)));
    }

    #[test]
    fn eval_chunked_on_an_empty_array_errors() {
        let xs = Array2::<f64>::zeros((0, 3));
        let result = eval_chunked(&xs, 4, |chunk| chunk.to_owned());

        assert!(matches!(result, Err(EvalError::EmptyInput)));
    }

    #[test]
    fn assign_where_overwrites_only_masked_rows() {
        let mut dst = [Array2::zeros((3, 2)), Array2::zeros((3, 2))];
        let src = [Array2::ones((3, 2)), Array2::from_elem((3, 2), 2.0)];
        let keep = array![true, false, true];

        assign_where(&mut dst, &src, &keep).unwrap();

        assert_eq!(dst[0], array![[1.0, 1.0], [0.0, 0.0], [1.0, 1.0]]);
        assert_eq!(dst[1], array![[2.0, 2.0], [0.0, 0.0], [2.0, 2.0]]);
    }

    #[test]
    fn assign_where_with_mismatched_array_counts_errors() {
        let mut dst = [Array2::<f64>::zeros((2, 2))];
        let src = [];
        let keep = array![true, false];

        let result = assign_where(&mut dst, &src, &keep);
        assert!(matches!(
            result,
            Err(EvalError::LengthMismatch {
                expected: 1,
                found: 0
            })
        ));
    }

    #[test]
    fn assign_where_with_mismatched_shapes_errors() {
        let mut dst = [Array2::<f64>::zeros((2, 2))];
        let src = [Array2::<f64>::zeros((2, 3))];
        let keep = array![true, false];

        let result = assign_where(&mut dst, &src, &keep);
        assert!(matches!(result, Err(EvalError::ShapeMismatch { .. })));
    }

    #[test]
    fn assign_where_with_wrong_mask_length_leaves_arrays_untouched() {
        let mut dst = [Array2::<f64>::zeros((2, 2))];
        let src = [Array2::<f64>::ones((2, 2))];
        let keep = array![true];

        let result = assign_where(&mut dst, &src, &keep);
        assert!(matches!(result, Err(EvalError::LengthMismatch { .. })));
        assert_eq!(dst[0], Array2::zeros((2, 2)));
    }
}
