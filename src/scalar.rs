//! Floating-point scalar abstraction
//!
//! Every type in the crate is generic over one [`Real`] parameter and is
//! instantiated for `f32` and `f64`.

use num_traits::Float;
use std::fmt::{Debug, Display};
use std::ops::{AddAssign, MulAssign, SubAssign};
use std::sync::Mutex;

/// Scalar type usable as a matrix element
pub trait Real:
    Float + AddAssign + SubAssign + MulAssign + Debug + Display + Default + Send + Sync + 'static
{
    /// Magnitude at or below which a value is treated as zero
    const EPS: Self;

    /// Process-wide scratch buffer for this precision
    fn shared_scratch() -> &'static Mutex<Vec<Self>>;
}

static SCRATCH_F32: Mutex<Vec<f32>> = Mutex::new(Vec::new());
static SCRATCH_F64: Mutex<Vec<f64>> = Mutex::new(Vec::new());

impl Real for f32 {
    const EPS: Self = f32::EPSILON;

    fn shared_scratch() -> &'static Mutex<Vec<Self>> {
        &SCRATCH_F32
    }
}

impl Real for f64 {
    const EPS: Self = f64::EPSILON;

    fn shared_scratch() -> &'static Mutex<Vec<Self>> {
        &SCRATCH_F64
    }
}

/// True when `x` is large enough to be stored
#[inline]
pub fn above_tolerance<T: Real>(x: T, eps: T) -> bool {
    x.abs() > eps
}
