//! Pre-order walk over the point links of a [`Tree`].

use crate::{
    point::Point,
    tree::Tree,
    types::{NodeId, PointId},
};

/// One end of a [`Segment`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentEnd {
    pub id: PointId,
    pub point: Point,
}

/// A directed link between two consecutive points, parent side first.
///
/// Either both ends lie in the same section, or `start` is the last point
/// of a section and `end` the first point of one of its children.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: SegmentEnd,
    pub end: SegmentEnd,
}

impl Segment {
    pub fn length(&self) -> f32 {
        self.start.point.pos.distance(self.end.point.pos)
    }

    pub fn points(&self) -> [Point; 2] {
        [self.start.point, self.end.point]
    }
}

/// Iterator returned by [`segments`].
///
/// Yields the intra-section links of a section, then for each child in
/// stored order the link into the child followed by the child's own
/// segments.
#[derive(Debug)]
pub struct Segments<'a> {
    tree: &'a Tree,
    /// Section currently being walked and the point the walk has reached.
    cursor: Option<(NodeId, usize)>,
    /// Sections still to visit, with the point they hang from.
    pending: Vec<(Option<PointId>, NodeId)>,
}

/// Lazily walks every segment of `tree` in pre-order.
pub fn segments(tree: &Tree) -> Segments<'_> {
    Segments {
        tree,
        cursor: None,
        pending: vec![(None, tree.root())],
    }
}

impl Segments<'_> {
    fn end(&self, id: PointId) -> Option<SegmentEnd> {
        self.tree.point(id).map(|&point| SegmentEnd { id, point })
    }

    fn make(&self, a: PointId, b: PointId) -> Option<Segment> {
        Some(Segment {
            start: self.end(a)?,
            end: self.end(b)?,
        })
    }
}

impl Iterator for Segments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        let tree = self.tree;
        loop {
            if let Some((section, index)) = self.cursor {
                let node = tree.node(section)?;
                if index + 1 < node.points.len() {
                    self.cursor = Some((section, index + 1));
                    return self.make(
                        PointId::new(section, index),
                        PointId::new(section, index + 1),
                    );
                }

                // Section exhausted: queue its children, first child on top.
                let from = PointId::new(section, index);
                self.pending
                    .extend(node.children.iter().rev().map(|&c| (Some(from), c)));
                self.cursor = None;
            }

            let (from, section) = self.pending.pop()?;
            self.cursor = Some((section, 0));
            if let Some(from) = from {
                return self.make(from, PointId::new(section, 0));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, r: f32) -> Point {
        Point::new(3, x, 0.0, 0.0, r)
    }

    fn ids(tree: &Tree) -> Vec<((usize, usize), (usize, usize))> {
        segments(tree)
            .map(|s| {
                (
                    (s.start.id.section, s.start.id.index),
                    (s.end.id.section, s.end.id.index),
                )
            })
            .collect()
    }

    #[test]
    fn single_point_tree_has_no_segments() {
        let t = Tree::new(vec![p(0.0, 1.0)]).unwrap();
        assert_eq!(segments(&t).count(), 0);
    }

    #[test]
    fn intra_section_links_come_first() {
        let t = Tree::new(vec![p(0.0, 1.0), p(1.0, 1.0), p(3.0, 1.0)]).unwrap();
        assert_eq!(ids(&t), vec![((0, 0), (0, 1)), ((0, 1), (0, 2))]);

        let lengths: Vec<f32> = segments(&t).map(|s| s.length()).collect();
        assert_eq!(lengths, vec![1.0, 2.0]);
    }

    #[test]
    fn children_follow_in_preorder() {
        let mut t = Tree::new(vec![p(0.0, 1.0), p(1.0, 1.0)]).unwrap();
        let a = t.add_child(0, vec![p(2.0, 1.0)]).unwrap();
        let b = t.add_child(0, vec![p(2.0, 1.0), p(3.0, 1.0)]).unwrap();
        let c = t.add_child(a, vec![p(4.0, 1.0)]).unwrap();

        assert_eq!(
            ids(&t),
            vec![
                ((0, 0), (0, 1)),
                ((0, 1), (a, 0)),
                ((a, 0), (c, 0)),
                ((0, 1), (b, 0)),
                ((b, 0), (b, 1)),
            ]
        );
    }

    #[test]
    fn segment_ends_carry_radii() {
        let mut t = Tree::new(vec![p(0.0, 1.5)]).unwrap();
        t.add_child(0, vec![p(5.0, 0.5)]).unwrap();

        let seg = segments(&t).next().unwrap();
        assert_eq!(seg.start.point.r, 1.5);
        assert_eq!(seg.end.point.r, 0.5);
        assert_eq!(seg.length(), 5.0);
    }
}
