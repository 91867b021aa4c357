//! Cosine similarity between embedding vectors.

use kb_core::errors::{ConfigurationError, KbResult};

/// `dot(a, b) / (|a| * |b|)`, 0 when either vector is zero. Vectors of
/// different lengths are a configuration error, never a zero score.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> KbResult<f64> {
    if a.len() != b.len() {
        return Err(ConfigurationError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        }
        .into());
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / denom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kb_core::KbError;

    #[test]
    fn identical_is_one() {
        let v = [0.3f32, -0.4, 0.5];
        assert!((cosine_similarity(&v, &v).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn orthogonal_is_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 2.0]).unwrap(), 0.0);
    }

    #[test]
    fn zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]).unwrap(), 0.0);
    }

    #[test]
    fn mismatched_dimensions_error() {
        let err = cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            KbError::Configuration(ConfigurationError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }
}
