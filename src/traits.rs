use core::fmt::Debug;
use num_traits::{Float, FromPrimitive};

/// Trait for the floating-point types the numerical core is generic over.
///
/// Blanket-implemented for every `Float` that is also `Send + Sync`, which
/// covers `f32` and `f64`. Special functions, scalar distribution evaluators
/// and the distribution objects in [`crate::stats`] are written against this
/// bound; the point/sample evaluation layer works in `f64`.
pub trait FloatScalar: Float + FromPrimitive + Debug + Send + Sync + 'static {
    /// Convert an `f64` literal into `Self`.
    ///
    /// Used for algorithm constants. Every `FloatScalar` can represent (or
    /// round) any finite `f64`, so this never fails for the literals the crate
    /// feeds it.
    #[inline]
    fn lit(v: f64) -> Self {
        <Self as num_traits::NumCast>::from(v).unwrap_or_else(Self::nan)
    }

    /// Lossy conversion to `f64`, used where an algorithm delegates to an
    /// `f64`-only routine (random variates).
    #[inline]
    fn as_f64(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

impl<T: Float + FromPrimitive + Debug + Send + Sync + 'static> FloatScalar for T {}
