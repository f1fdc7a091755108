use ndarray::{Array2, Axis, Zip};

/// Kernel half-width in standard deviations.
const TRUNCATE: f64 = 4.0;

fn kernel(sigma: f64) -> Vec<f64> {
    let radius = (TRUNCATE * sigma + 0.5) as isize;
    let weights: Vec<f64> = (-radius..=radius)
        .map(|i| (-0.5 * (i as f64 / sigma).powi(2)).exp())
        .collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Mirror index into `0..n`, edge sample repeated (`d c b a | a b c d`).
fn reflect(i: isize, n: usize) -> usize {
    let n = n as isize;
    let period = 2 * n;
    let m = i.rem_euclid(period);
    (if m >= n { period - 1 - m } else { m }) as usize
}

fn blur_axis(input: &Array2<f32>, weights: &[f64], axis: Axis) -> Array2<f32> {
    let radius = (weights.len() / 2) as isize;
    let len = input.len_of(axis);
    let mut out = Array2::<f32>::zeros(input.raw_dim());

    Zip::indexed(&mut out).par_for_each(|(r, c), v| {
        let acc: f64 = weights
            .iter()
            .enumerate()
            .map(|(k, w)| {
                let offset = k as isize - radius;
                let sample = match axis {
                    Axis(0) => input[[reflect(r as isize + offset, len), c]],
                    _ => input[[r, reflect(c as isize + offset, len)]],
                };
                w * sample as f64
            })
            .sum();
        *v = acc as f32;
    });
    out
}

/// Separable Gaussian blur with mirrored borders.
pub fn gaussian_filter(input: &Array2<f32>, sigma: f64) -> Array2<f32> {
    if input.is_empty() || sigma <= 0.0 {
        return input.clone();
    }
    let weights = kernel(sigma);
    let rows = blur_axis(input, &weights, Axis(0));
    blur_axis(&rows, &weights, Axis(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect() {
        assert_eq!(reflect(-1, 4), 0);
        assert_eq!(reflect(-2, 4), 1);
        assert_eq!(reflect(4, 4), 3);
        assert_eq!(reflect(5, 4), 2);
        assert_eq!(reflect(-9, 4), 0);
        assert_eq!(reflect(3, 1), 0);
    }

    #[test]
    fn test_kernel_normalized() {
        let k = kernel(2.0);
        assert_eq!(k.len(), 17);
        assert!((k.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_is_preserved() {
        let input = Array2::from_elem((5, 3), 0.7f32);
        let out = gaussian_filter(&input, 2.0);
        assert!(out.iter().all(|&v| (v - 0.7).abs() < 1e-5));
    }

    #[test]
    fn test_mass_is_preserved_away_from_edges() {
        let mut input = Array2::<f32>::zeros((41, 41));
        input[[20, 20]] = 1.0;
        let out = gaussian_filter(&input, 2.0);
        assert!((out.sum() - 1.0).abs() < 1e-4);
        assert!(out[[20, 20]] > out[[20, 22]]);
    }
}
