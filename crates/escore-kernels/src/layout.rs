use std::borrow::Cow;

use ndarray::{ArrayView, Dimension};

/// Row-major contents of `view`, borrowed when already contiguous.
pub(crate) fn contiguous<'a, D: Dimension>(view: ArrayView<'a, f64, D>) -> Cow<'a, [f64]> {
    match view.to_slice() {
        Some(slice) => Cow::Borrowed(slice),
        None => Cow::Owned(view.iter().copied().collect()),
    }
}
