//! Neurites and neurons built on top of the section [`Tree`].

use std::cell::OnceCell;

use glam::Vec3;

use crate::{point::Point, tree::Tree};

/// Kind of a neurite, as tagged in the reconstruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum NeuriteType {
    Soma,
    Axon,
    BasalDendrite,
    ApicalDendrite,
    #[default]
    Undefined,
}

impl NeuriteType {
    /// Maps a point type tag to a neurite type using the SWC numbering.
    pub fn from_tag(t: u8) -> Self {
        match t {
            1 => Self::Soma,
            2 => Self::Axon,
            3 => Self::BasalDendrite,
            4 => Self::ApicalDendrite,
            _ => Self::Undefined,
        }
    }

    pub fn tag(self) -> u8 {
        match self {
            Self::Soma => 1,
            Self::Axon => 2,
            Self::BasalDendrite => 3,
            Self::ApicalDendrite => 4,
            Self::Undefined => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Soma => "soma",
            Self::Axon => "axon",
            Self::BasalDendrite => "basal dendrite",
            Self::ApicalDendrite => "apical dendrite",
            Self::Undefined => "undefined",
        }
    }
}

/// A neurite: a typed section tree.
#[derive(Debug, Clone)]
pub struct Neurite {
    pub kind: NeuriteType,
    tree: Tree,
    points: OnceCell<Vec<[f32; 4]>>,
}

impl Neurite {
    pub fn new(kind: NeuriteType, tree: Tree) -> Self {
        Self {
            kind,
            tree,
            points: OnceCell::new(),
        }
    }

    /// Neurite typed after the tag of its first point.
    pub fn from_tree(tree: Tree) -> Self {
        let kind = tree
            .node(tree.root())
            .and_then(|n| n.points.first())
            .map(|p| NeuriteType::from_tag(p.t))
            .unwrap_or_default();
        Self::new(kind, tree)
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// All `[x, y, z, r]` samples of the neurite.
    ///
    /// The first point of every section is skipped as it repeats the
    /// parent's last point, except for the very first point of the root.
    /// Computed on first access.
    pub fn points(&self) -> &[[f32; 4]] {
        self.points.get_or_init(|| {
            let mut pts = Vec::new();
            for id in self.tree.preorder() {
                let Some(node) = self.tree.node(id) else {
                    continue;
                };
                let skip = if id == self.tree.root() { 0 } else { 1 };
                pts.extend(node.points.iter().skip(skip).map(Point::xyzr));
            }
            pts
        })
    }

    /// Copy of this neurite with `trans` applied to every 3D position.
    pub fn transform<F>(&self, mut trans: F) -> Neurite
    where
        F: FnMut(Vec3) -> Vec3,
    {
        let tree = self.tree.map_points(|p| Point {
            pos: trans(p.pos),
            ..*p
        });
        Neurite::new(self.kind, tree)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Soma {
    pub center: Vec3,
    pub radius: f32,
}

/// A soma with the neurites growing out of it.
#[derive(Debug, Clone)]
pub struct Neuron {
    pub soma: Soma,
    pub neurites: Vec<Neurite>,
}

impl Neuron {
    pub fn new(soma: Soma, neurites: Vec<Neurite>) -> Self {
        Self { soma, neurites }
    }

    pub fn neurites_of(&self, kind: NeuriteType) -> impl Iterator<Item = &Neurite> {
        self.neurites.iter().filter(move |n| n.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Tree {
        let mut t = Tree::new(vec![
            Point::new(3, 0.0, 0.0, 0.0, 2.0),
            Point::new(3, 1.0, 0.0, 0.0, 2.0),
        ])
        .unwrap();
        t.add_child(
            0,
            vec![
                Point::new(3, 1.0, 0.0, 0.0, 2.0),
                Point::new(3, 2.0, 1.0, 0.0, 1.0),
            ],
        )
        .unwrap();
        t.add_child(
            0,
            vec![
                Point::new(3, 1.0, 0.0, 0.0, 2.0),
                Point::new(3, 2.0, -1.0, 0.0, 1.0),
            ],
        )
        .unwrap();
        t
    }

    #[test]
    fn neurite_type_follows_first_point_tag() {
        let n = Neurite::from_tree(sample_tree());
        assert_eq!(n.kind, NeuriteType::BasalDendrite);
        assert_eq!(NeuriteType::from_tag(NeuriteType::Axon.tag()), NeuriteType::Axon);
        assert_eq!(NeuriteType::from_tag(99), NeuriteType::Undefined);
    }

    #[test]
    fn points_skip_duplicated_section_starts() {
        let n = Neurite::from_tree(sample_tree());
        let pts = n.points();

        assert_eq!(pts.len(), 4);
        assert_eq!(pts[0], [0.0, 0.0, 0.0, 2.0]);
        assert_eq!(pts[1], [1.0, 0.0, 0.0, 2.0]);
        assert_eq!(pts[2], [2.0, 1.0, 0.0, 1.0]);
        assert_eq!(pts[3], [2.0, -1.0, 0.0, 1.0]);
    }

    #[test]
    fn transform_returns_new_neurite() {
        let n = Neurite::from_tree(sample_tree());
        let moved = n.transform(|p| p * 2.0);

        assert_eq!(moved.kind, n.kind);
        assert_eq!(moved.points()[2], [4.0, 2.0, 0.0, 1.0]);
        // Original unchanged.
        assert_eq!(n.points()[2], [2.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn neurites_of_filters_by_kind() {
        let dend = Neurite::from_tree(sample_tree());
        let axon = Neurite::new(NeuriteType::Axon, sample_tree());
        let neuron = Neuron::new(
            Soma {
                center: Vec3::ZERO,
                radius: 5.0,
            },
            vec![dend, axon],
        );

        assert_eq!(neuron.neurites_of(NeuriteType::Axon).count(), 1);
        assert_eq!(neuron.neurites_of(NeuriteType::BasalDendrite).count(), 1);
        assert_eq!(neuron.neurites_of(NeuriteType::ApicalDendrite).count(), 0);
    }
}
