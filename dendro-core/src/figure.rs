//! Dendrogram figure data, ready for a renderer.

use glam::Vec2;

use crate::{
    config::DendrogramConfig,
    error::{DegenerateDiameters, Result},
    layout::dendro_transform,
    transform::{line_widths, rotate},
    tree::Tree,
};

pub const TITLE: &str = "Morphology Dendrogram";
pub const LENGTH_LABEL: &str = "Length (um)";

/// Axis-aligned box around every line endpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// Everything a renderer needs to draw a dendrogram.
#[derive(Clone, Debug, PartialEq)]
pub struct DendrogramFigure {
    pub lines: Vec<[Vec2; 2]>,
    pub widths: Vec<f32>,
    pub title: &'static str,
    pub xlabel: &'static str,
    pub ylabel: &'static str,
    /// `None` when there is nothing to draw.
    pub bounds: Option<Bounds>,
    /// Set when diameters were requested but could not be used.
    pub warning: Option<DegenerateDiameters>,
}

/// Lays out `tree`, computes line widths and orients the result.
///
/// ### Errors
/// Propagates [`crate::error::LayoutError`] from the layout pass.
pub fn dendrogram(tree: &Tree, cfg: &DendrogramConfig) -> Result<DendrogramFigure> {
    let layout = dendro_transform(tree)?;
    let widths = line_widths(&layout.diameters, cfg.show_diameters);

    let mut lines = layout.positions;
    rotate(&mut lines, cfg.rotation.angle());

    let (xlabel, ylabel) = if cfg.rotation.swaps_axes() {
        ("", LENGTH_LABEL)
    } else {
        (LENGTH_LABEL, "")
    };

    let bounds = bounds_of(&lines);

    Ok(DendrogramFigure {
        lines,
        widths: widths.values,
        title: TITLE,
        xlabel,
        ylabel,
        bounds,
        warning: widths.warning,
    })
}

fn bounds_of(lines: &[[Vec2; 2]]) -> Option<Bounds> {
    let mut points = lines.iter().flatten();
    let first = *points.next()?;
    let (min, max) = points.fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p)));
    Some(Bounds { min, max })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Rotation, point::Point};

    const EPS: f32 = 1e-5;

    fn forked_tree() -> Tree {
        let mut t = Tree::new(vec![
            Point::new(3, 0.0, 0.0, 0.0, 1.0),
            Point::new(3, 4.0, 0.0, 0.0, 1.0),
        ])
        .unwrap();
        t.add_child(0, vec![Point::new(3, 4.0, 0.0, 0.0, 1.0), Point::new(3, 6.0, 0.0, 0.0, 0.5)])
            .unwrap();
        t.add_child(0, vec![Point::new(3, 4.0, 0.0, 0.0, 1.0), Point::new(3, 7.0, 0.0, 0.0, 0.5)])
            .unwrap();
        t
    }

    #[test]
    fn default_figure_grows_right_with_uniform_widths() {
        let fig = dendrogram(&forked_tree(), &DendrogramConfig::default()).unwrap();

        assert_eq!(fig.title, TITLE);
        assert_eq!(fig.xlabel, LENGTH_LABEL);
        assert_eq!(fig.ylabel, "");
        assert_eq!(fig.lines.len(), fig.widths.len());
        assert!(fig.widths.iter().all(|&w| w == 1.0));
        assert!(fig.warning.is_none());

        let b = fig.bounds.unwrap();
        assert!((b.min - Vec2::new(0.0, -1.0)).length() < EPS);
        assert!((b.max - Vec2::new(7.0, 1.0)).length() < EPS);
    }

    #[test]
    fn up_rotation_swaps_labels_and_axes() {
        let cfg = DendrogramConfig {
            rotation: Rotation::Up,
            ..Default::default()
        };
        let fig = dendrogram(&forked_tree(), &cfg).unwrap();

        assert_eq!(fig.xlabel, "");
        assert_eq!(fig.ylabel, LENGTH_LABEL);

        let b = fig.bounds.unwrap();
        assert!((b.min - Vec2::new(-1.0, 0.0)).length() < EPS);
        assert!((b.max - Vec2::new(1.0, 7.0)).length() < EPS);
    }

    #[test]
    fn left_rotation_mirrors_the_default_layout() {
        let right = dendrogram(&forked_tree(), &DendrogramConfig::default()).unwrap();
        let left = dendrogram(
            &forked_tree(),
            &DendrogramConfig {
                rotation: Rotation::Left,
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(left.xlabel, LENGTH_LABEL);
        for (r, l) in right.lines.iter().zip(&left.lines) {
            assert!((r[0] + l[0]).length() < EPS);
            assert!((r[1] + l[1]).length() < EPS);
        }
    }

    #[test]
    fn diameters_scale_widths_by_thinnest_line() {
        let cfg = DendrogramConfig {
            show_diameters: true,
            ..Default::default()
        };
        let fig = dendrogram(&forked_tree(), &cfg).unwrap();

        let min = fig.widths.iter().copied().fold(f32::INFINITY, f32::min);
        assert_eq!(min, 1.0);
        // Trunk (1 + 1) against the thin tips (1 + 0.5).
        assert!((fig.widths[0] - 2.0 / 1.5).abs() < EPS);
    }

    #[test]
    fn empty_layout_has_no_bounds() {
        let t = Tree::new(vec![Point::new(1, 0.0, 0.0, 0.0, 3.0)]).unwrap();
        let fig = dendrogram(&t, &DendrogramConfig::default()).unwrap();
        assert!(fig.lines.is_empty());
        assert!(fig.bounds.is_none());
    }
}
