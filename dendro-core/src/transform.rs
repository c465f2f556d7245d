//! Post-processing of a laid out dendrogram: orientation and line widths.

use glam::{Mat2, Vec2};
use tracing::warn;

use crate::error::DegenerateDiameters;

/// Applies the linear map `m` to every line endpoint in place.
///
/// With `m = [[a, c], [b, d]]` (column major) a point `(x, y)` becomes
/// `(a·x + b·y, c·x + d·y)`.
pub fn affine_transform(positions: &mut [[Vec2; 2]], m: Mat2) {
    for line in positions.iter_mut() {
        for p in line.iter_mut() {
            *p = m * *p;
        }
    }
}

/// Rotates every line endpoint counter-clockwise by `angle` radians.
pub fn rotate(positions: &mut [[Vec2; 2]], angle: f32) {
    affine_transform(positions, Mat2::from_angle(angle));
}

/// Widths to draw the dendrogram lines with.
#[derive(Clone, Debug, PartialEq)]
pub struct LineWidths {
    pub values: Vec<f32>,
    /// Set when diameters were requested but could not be normalized.
    pub warning: Option<DegenerateDiameters>,
}

/// Turns per-line diameters into line widths.
///
/// Without `show_diameters` every line gets width `1.0`. Otherwise the
/// diameters are divided by their minimum, so the thinnest line keeps
/// width `1.0`. A non-positive minimum disables the scaling and reports
/// [`DegenerateDiameters`].
pub fn line_widths(diameters: &[f32], show_diameters: bool) -> LineWidths {
    let uniform = || vec![1.0; diameters.len()];

    if !show_diameters || diameters.is_empty() {
        return LineWidths {
            values: uniform(),
            warning: None,
        };
    }

    let min = diameters.iter().copied().fold(f32::INFINITY, f32::min);
    if !(min > 0.0) {
        let degenerate = DegenerateDiameters { min };
        warn!(%degenerate, "falling back to uniform line widths");
        return LineWidths {
            values: uniform(),
            warning: Some(degenerate),
        };
    }

    LineWidths {
        values: diameters.iter().map(|d| d / min).collect(),
        warning: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPS: f32 = 1e-5;

    fn sample() -> Vec<[Vec2; 2]> {
        vec![
            [Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0)],
            [Vec2::new(1.0, -2.0), Vec2::new(3.5, 4.25)],
        ]
    }

    fn assert_lines_close(a: &[[Vec2; 2]], b: &[[Vec2; 2]]) {
        assert_eq!(a.len(), b.len());
        for (la, lb) in a.iter().zip(b) {
            for (pa, pb) in la.iter().zip(lb) {
                assert!((*pa - *pb).length() < EPS, "{pa:?} != {pb:?}");
            }
        }
    }

    #[test]
    fn rotation_by_zero_is_identity() {
        let mut pos = sample();
        rotate(&mut pos, 0.0);
        assert_lines_close(&pos, &sample());
    }

    #[test]
    fn rotation_by_pi_negates_points() {
        let mut pos = sample();
        rotate(&mut pos, PI);

        let expected: Vec<[Vec2; 2]> = sample().iter().map(|[a, b]| [-*a, -*b]).collect();
        assert_lines_close(&pos, &expected);
    }

    #[test]
    fn quarter_turn_maps_x_axis_to_y_axis() {
        let mut pos = vec![[Vec2::ZERO, Vec2::new(2.0, 0.0)]];
        rotate(&mut pos, FRAC_PI_2);
        assert_lines_close(&pos, &[[Vec2::ZERO, Vec2::new(0.0, 2.0)]]);

        rotate(&mut pos, -FRAC_PI_2);
        assert_lines_close(&pos, &[[Vec2::ZERO, Vec2::new(2.0, 0.0)]]);
    }

    #[test]
    fn affine_transform_applies_general_matrix() {
        let mut pos = vec![[Vec2::new(1.0, 2.0), Vec2::new(-1.0, 0.5)]];
        // x' = 2x + y, y' = -y
        let m = Mat2::from_cols(Vec2::new(2.0, 0.0), Vec2::new(1.0, -1.0));
        affine_transform(&mut pos, m);
        assert_lines_close(&pos, &[[Vec2::new(4.0, -2.0), Vec2::new(-1.5, -0.5)]]);
    }

    #[test]
    fn widths_are_uniform_without_diameters() {
        let w = line_widths(&[3.0, 1.0, 2.0], false);
        assert_eq!(w.values, vec![1.0, 1.0, 1.0]);
        assert!(w.warning.is_none());
    }

    #[test]
    fn widths_are_scaled_by_minimum() {
        let w = line_widths(&[3.0, 1.5, 6.0], true);
        assert_eq!(w.values, vec![2.0, 1.0, 4.0]);
        assert!(w.warning.is_none());
    }

    #[test]
    fn non_positive_minimum_falls_back_to_uniform() {
        let w = line_widths(&[3.0, 0.0, 6.0], true);
        assert_eq!(w.values, vec![1.0, 1.0, 1.0]);
        assert_eq!(w.warning, Some(DegenerateDiameters { min: 0.0 }));

        let w = line_widths(&[-1.0, 2.0], true);
        assert_eq!(w.values, vec![1.0, 1.0]);
        assert!(w.warning.is_some());
    }

    #[test]
    fn empty_diameters_give_empty_widths() {
        let w = line_widths(&[], true);
        assert!(w.values.is_empty());
        assert!(w.warning.is_none());
    }
}
