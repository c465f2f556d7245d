use crate::types::{NodeId, PointId};

/// Failures while building a [`crate::tree::Tree`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeError {
    #[error("a section needs at least one point")]
    EmptySection,
    #[error("parent section {parent} does not exist")]
    UnknownParent { parent: NodeId },
}

/// Failures of the dendrogram layout pass.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// A segment started at a point that was never laid out, i.e. the
    /// segments were not fed in pre-order.
    #[error("no layout state for point {id}; segments must arrive parent first")]
    MissingState { id: PointId },
}

/// Diameters that cannot be normalized by their minimum.
///
/// Not returned as an error: widths fall back to a uniform value and this
/// is reported alongside them.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("minimum diameter {min} is not positive; using uniform line width")]
pub struct DegenerateDiameters {
    pub min: f32,
}

pub type Result<T, E = LayoutError> = std::result::Result<T, E>;
