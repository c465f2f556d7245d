/// Identifier for a section in a [`crate::tree::Tree`].
///
/// This is an index into `Tree::nodes`, and is only meaningful within
/// the lifetime of a given `Tree` instance.
pub type NodeId = usize;

/// Address of a single sample point: the owning section and the index
/// of the point inside that section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId {
    pub section: NodeId,
    pub index: usize,
}

impl PointId {
    pub fn new(section: NodeId, index: usize) -> Self {
        Self { section, index }
    }
}

impl std::fmt::Display for PointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.section, self.index)
    }
}
