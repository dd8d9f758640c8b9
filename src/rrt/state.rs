use num_traits::Float;
use serde::de::Error as _;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Add, Div, Index, IndexMut, Mul, Sub};

/// A configuration in N-dimensional real vector space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RealVectorState<F: Float, const N: usize> {
    values: [F; N],
}

impl<F: Float, const N: usize> RealVectorState<F, N> {
    pub fn new(values: [F; N]) -> Self {
        Self { values }
    }

    /// The state at the origin.
    pub fn zeros() -> Self {
        Self {
            values: [F::zero(); N],
        }
    }

    pub fn values(&self) -> &[F; N] {
        &self.values
    }

    pub fn dot(&self, other: &Self) -> F {
        self.values
            .iter()
            .zip(other.values.iter())
            .fold(F::zero(), |acc, (&a, &b)| acc + a * b)
    }

    pub fn norm(&self) -> F {
        self.dot(self).sqrt()
    }

    pub fn euclidean_distance_squared(&self, other: &Self) -> F {
        self.values
            .iter()
            .zip(other.values.iter())
            .fold(F::zero(), |acc, (&a, &b)| acc + (a - b) * (a - b))
    }

    pub fn euclidean_distance(&self, other: &Self) -> F {
        self.euclidean_distance_squared(other).sqrt()
    }

    /// Returns true if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }
}

impl<F: Float, const N: usize> Index<usize> for RealVectorState<F, N> {
    type Output = F;

    fn index(&self, index: usize) -> &F {
        &self.values[index]
    }
}

impl<F: Float, const N: usize> IndexMut<usize> for RealVectorState<F, N> {
    fn index_mut(&mut self, index: usize) -> &mut F {
        &mut self.values[index]
    }
}

impl<F: Float, const N: usize> Sub for RealVectorState<F, N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let mut values = self.values;
        for (v, r) in values.iter_mut().zip(rhs.values.iter()) {
            *v = *v - *r;
        }
        Self { values }
    }
}

impl<'a, F: Float, const N: usize> Sub<&'a RealVectorState<F, N>> for &'a RealVectorState<F, N> {
    type Output = RealVectorState<F, N>;

    fn sub(self, rhs: &'a RealVectorState<F, N>) -> RealVectorState<F, N> {
        *self - *rhs
    }
}

impl<F: Float, const N: usize> Add for RealVectorState<F, N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut values = self.values;
        for (v, r) in values.iter_mut().zip(rhs.values.iter()) {
            *v = *v + *r;
        }
        Self { values }
    }
}

impl<'a, F: Float, const N: usize> Add<&'a RealVectorState<F, N>> for &'a RealVectorState<F, N> {
    type Output = RealVectorState<F, N>;

    fn add(self, rhs: &'a RealVectorState<F, N>) -> RealVectorState<F, N> {
        *self + *rhs
    }
}

impl<F: Float, const N: usize> Mul<F> for RealVectorState<F, N> {
    type Output = Self;

    fn mul(self, scalar: F) -> Self {
        Self {
            values: self.values.map(|v| v * scalar),
        }
    }
}

impl<F: Float, const N: usize> Div<F> for RealVectorState<F, N> {
    type Output = Self;

    fn div(self, scalar: F) -> Self {
        Self {
            values: self.values.map(|v| v / scalar),
        }
    }
}

// Arrays of generic length have no serde impls, so the state is written as a fixed-size tuple.
impl<F: Float + Serialize, const N: usize> Serialize for RealVectorState<F, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(N)?;
        for value in &self.values {
            tuple.serialize_element(value)?;
        }
        tuple.end()
    }
}

impl<'de, F: Float + Deserialize<'de>, const N: usize> Deserialize<'de>
    for RealVectorState<F, N>
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values: Vec<F> = Vec::deserialize(deserializer)?;
        let len = values.len();
        let values: [F; N] = values.try_into().map_err(|_| {
            D::Error::invalid_length(len, &format!("a state with {} components", N).as_str())
        })?;
        Ok(Self { values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_and_norm() {
        let a = RealVectorState::new([0.0, 0.0]);
        let b = RealVectorState::new([3.0, 4.0]);
        assert_eq!(a.euclidean_distance(&b), 5.0);
        assert_eq!(b.euclidean_distance_squared(&a), 25.0);
        assert_eq!((&b - &a).norm(), 5.0);
        assert_eq!(a.dot(&b), 0.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = RealVectorState::new([1.0f32, 2.0, 3.0]);
        let b = RealVectorState::new([0.5f32, 0.5, 0.5]);
        assert_eq!(&a + &b, RealVectorState::new([1.5, 2.5, 3.5]));
        assert_eq!(a - b, RealVectorState::new([0.5, 1.5, 2.5]));
        assert_eq!(a * 2.0, RealVectorState::new([2.0, 4.0, 6.0]));
        assert_eq!((a / 2.0)[2], 1.5);
    }

    #[test]
    fn test_non_finite_detection() {
        assert!(RealVectorState::new([1.0, 2.0]).is_finite());
        assert!(!RealVectorState::new([f64::NAN, 2.0]).is_finite());
        assert!(!RealVectorState::new([1.0, f64::INFINITY]).is_finite());
    }
}
