use crate::domain::error::DomainError;

fn check_dims(a: &[f32], b: &[f32]) -> Result<(), DomainError> {
    if a.len() != b.len() {
        return Err(DomainError::InvalidInput(format!(
            "vector dimension mismatch: {} vs {}",
            a.len(),
            b.len()
        )));
    }
    Ok(())
}

/// `1 - cos(a, b)`, in `[0, 2]`. A zero vector is at distance 1 from everything.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> Result<f64, DomainError> {
    check_dims(a, b)?;
    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        Ok(1.0)
    } else {
        Ok(1.0 - dot / denom)
    }
}

pub fn euclidean_distance(a: &[f32], b: &[f32]) -> Result<f64, DomainError> {
    check_dims(a, b)?;
    let sum: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = *x as f64 - *y as f64;
            d * d
        })
        .sum();
    Ok(sum.sqrt())
}

/// Scales `v` to unit L2 norm. The zero vector is returned unchanged.
pub fn normalize(mut v: Vec<f32>) -> Vec<f32> {
    let norm = v.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x = (*x as f64 / norm) as f32;
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors_have_zero_cosine_distance() {
        let v = [0.1, 0.2, 0.3, 0.4];
        assert!(cosine_distance(&v, &v).unwrap().abs() < 1e-9);
    }

    #[test]
    fn test_orthogonal_vectors() {
        let d = cosine_distance(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!((d - 1.0).abs() < 1e-9);
        let e = euclidean_distance(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!((e - 2f64.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_dimension_mismatch_is_error() {
        assert!(cosine_distance(&[1.0], &[1.0, 2.0]).is_err());
        assert!(euclidean_distance(&[1.0], &[]).is_err());
    }

    #[test]
    fn test_zero_vector_distance() {
        assert_eq!(cosine_distance(&[0.0, 0.0], &[1.0, 0.0]).unwrap(), 1.0);
    }

    #[test]
    fn test_normalize() {
        let v = normalize(vec![3.0, 4.0]);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);
        assert_eq!(normalize(vec![0.0, 0.0]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_demo_query_is_closer_to_first_sample() {
        let q = [0.11, 0.20, 0.29, 0.41];
        let a = [0.10, 0.20, 0.30, 0.40];
        let b = [0.11, 0.19, 0.31, 0.39];
        assert!(cosine_distance(&q, &a).unwrap() < cosine_distance(&q, &b).unwrap());
        assert!(euclidean_distance(&q, &a).unwrap() < euclidean_distance(&q, &b).unwrap());
    }
}
