//! Dendrogram layout of a section tree.
//!
//! Every point gets a 2D origin: the x coordinate is the path length from
//! the root, the y coordinate separates branches. Points are placed one
//! [`Segment`] at a time, in pre-order, so that every segment starts at a
//! point that is already laid out.
//!
//! Each laid out point carries a `line_type` deciding where its next
//! child goes:
//! - `0` straight continuation,
//! - `1` above the parent,
//! - `-1` below the parent.
//!
//! After every child the parent's `line_type` grows by 2, so the second
//! child of a bifurcation is mirrored against the first one. The vertical
//! room available to a point shrinks with each generation that branches
//! off sideways.

use std::collections::HashMap;

use glam::Vec2;
use tracing::debug;

use crate::{
    error::{LayoutError, Result},
    point::path_length,
    segment::{Segment, segments},
    tree::Tree,
    types::PointId,
};

/// Layout state of one point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutState {
    /// Position of the point in the dendrogram.
    pub origin: Vec2,
    /// Direction of the next child drawn from this point.
    pub line_type: i32,
}

/// Output of the layout: 2D lines and the diameter drawn for each of them.
///
/// `positions` and `diameters` are index aligned.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dendrogram {
    pub positions: Vec<[Vec2; 2]>,
    pub diameters: Vec<f32>,
}

impl Dendrogram {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Incremental dendrogram layout over a single tree.
///
/// Built with the root point registered at the origin; segments are then
/// fed with [`DendrogramLayout::place`] and the result collected with
/// [`DendrogramLayout::finish`].
#[derive(Debug)]
pub struct DendrogramLayout<'a> {
    tree: &'a Tree,
    states: HashMap<PointId, LayoutState>,
    y_length: HashMap<PointId, f32>,
    out: Dendrogram,
}

impl<'a> DendrogramLayout<'a> {
    pub fn new(tree: &'a Tree) -> Self {
        let root = PointId::new(tree.root(), 0);

        let mut states = HashMap::new();
        states.insert(
            root,
            LayoutState {
                origin: Vec2::ZERO,
                line_type: 0,
            },
        );
        let mut y_length = HashMap::new();
        y_length.insert(root, 1.0);

        Self {
            tree,
            states,
            y_length,
            out: Dendrogram::default(),
        }
    }

    pub fn state(&self, id: PointId) -> Option<LayoutState> {
        self.states.get(&id).copied()
    }

    /// Vertical room of the branches drawn from `id`.
    pub fn vertical_allowance(&self, id: PointId) -> Option<f32> {
        self.y_length.get(&id).copied()
    }

    /// Lays out the end point of `segment` and emits its lines.
    ///
    /// ### Returns
    /// The number of lines emitted: `1` for a straight continuation, `2`
    /// when a vertical connector is needed.
    ///
    /// ### Errors
    /// [`LayoutError::MissingState`] if the start point was never laid
    /// out.
    pub fn place(&mut self, segment: &Segment) -> Result<usize> {
        let start_id = segment.start.id;
        let end_id = segment.end.id;

        let missing = || LayoutError::MissingState { id: start_id };
        let LayoutState { origin, line_type } = *self.states.get(&start_id).ok_or_else(missing)?;
        let allowance = *self.y_length.get(&start_id).ok_or_else(missing)?;

        let x1 = origin.x + path_length(&segment.points());
        let y1 = origin.y + allowance * line_type as f32;

        self.y_length
            .insert(end_id, allowance * (1.0 - 0.5 * line_type.abs() as f32));

        // Sum of the endpoint radii, i.e. the mean of the endpoint diameters.
        let diameter = segment.start.point.r + segment.end.point.r;

        self.out
            .positions
            .push([Vec2::new(origin.x, y1), Vec2::new(x1, y1)]);
        self.out.diameters.push(diameter);
        let mut emitted = 1;

        if line_type != 0 {
            self.out
                .positions
                .push([origin, Vec2::new(origin.x, y1)]);
            self.out.diameters.push(diameter);
            emitted += 1;
        }

        // A leaf gets 1, a continuation 0, a bifurcation starts below with -1.
        let fanout = self.tree.point_children(end_id) as i32;
        self.states.insert(
            end_id,
            LayoutState {
                origin: Vec2::new(x1, y1),
                line_type: 1 - fanout,
            },
        );

        // The next sibling hanging from the same point is mirrored.
        if let Some(parent) = self.states.get_mut(&start_id) {
            parent.line_type += 2;
        }

        Ok(emitted)
    }

    pub fn finish(self) -> Dendrogram {
        self.out
    }
}

/// Lays out the whole tree in one pre-order pass.
pub fn dendro_transform(tree: &Tree) -> Result<Dendrogram> {
    let mut layout = DendrogramLayout::new(tree);
    for seg in segments(tree) {
        layout.place(&seg)?;
    }

    let out = layout.finish();
    debug!(
        sections = tree.len(),
        lines = out.len(),
        "dendrogram layout done"
    );
    Ok(out)
}
