use ndarray::{Array, Dimension};

/// Produces a self-contained, host-resident copy of a value before it is
/// recorded.
///
/// A recorded value must not keep references into buffers the computation
/// still mutates. For plain scalars this is a copy; for arrays it is an
/// owned standard-layout copy with no view aliasing. A backend whose arrays
/// live in device memory or participate in an autodiff graph implements its
/// transfer here.
pub trait Snapshot {
    fn snapshot(&self) -> Self;
}

macro_rules! identity_snapshot {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Snapshot for $ty {
                fn snapshot(&self) -> Self {
                    self.clone()
                }
            }
        )*
    };
}

identity_snapshot!(bool, i32, i64, u32, u64, usize, f32, f64, String);

impl<A: Clone, D: Dimension> Snapshot for Array<A, D> {
    fn snapshot(&self) -> Self {
        self.as_standard_layout().into_owned()
    }
}
