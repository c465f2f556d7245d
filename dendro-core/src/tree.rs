use crate::{
    error::TreeError,
    point::{Point, path_length},
    types::{NodeId, PointId},
};

/// One unbranched run of sample points.
///
/// The first point of a child section usually repeats the last point of
/// its parent, as morphology formats store it that way. The tree does not
/// rely on it.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub points: Vec<Point>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Section hierarchy of a single neurite, stored as an arena.
///
/// Nodes are only ever appended below an existing id, so the structure
/// is rooted and acyclic by construction. The root is always id `0`.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new_root(points: Vec<Point>) -> Self {
        Self {
            points,
            parent: None,
            children: Vec::with_capacity(2),
        }
    }

    pub fn new_child(points: Vec<Point>, parent: NodeId) -> Self {
        Self {
            points,
            parent: Some(parent),
            children: Vec::with_capacity(2),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Index of the last point of this section.
    pub(crate) fn last_index(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

impl Tree {
    pub fn new(root_points: Vec<Point>) -> Result<Self, TreeError> {
        if root_points.is_empty() {
            return Err(TreeError::EmptySection);
        }
        Ok(Self {
            nodes: vec![TreeNode::new_root(root_points)],
        })
    }

    /// Appends a section below `parent` and returns its id.
    pub fn add_child(&mut self, parent: NodeId, points: Vec<Point>) -> Result<NodeId, TreeError> {
        if points.is_empty() {
            return Err(TreeError::EmptySection);
        }
        if parent >= self.nodes.len() {
            return Err(TreeError::UnknownParent { parent });
        }

        let id = self.nodes.len();
        self.nodes.push(TreeNode::new_child(points, parent));
        self.nodes[parent].children.push(id);
        Ok(id)
    }

    pub fn root(&self) -> NodeId {
        0
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a tree owns at least its root section.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.nodes.get(id.section)?.points.get(id.index)
    }

    /// Number of points directly following `id` in the hierarchy.
    ///
    /// Inside a section this is `1`; for the last point it is the number
    /// of child sections. Unknown ids have no children.
    pub fn point_children(&self, id: PointId) -> usize {
        let Some(node) = self.nodes.get(id.section) else {
            return 0;
        };
        if id.index < node.last_index() {
            1
        } else {
            node.children.len()
        }
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(TreeNode::is_leaf)
    }

    /// Section ids in pre-order: parent first, then each child subtree in
    /// stored order.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![self.root()],
        }
    }

    /// Terminal sections in pre-order.
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.preorder().filter(|&id| self.is_leaf(id))
    }

    /// Path length of a section, without the link to its parent.
    pub fn section_length(&self, id: NodeId) -> f32 {
        self.nodes
            .get(id)
            .map(|n| path_length(&n.points))
            .unwrap_or(0.0)
    }

    /// Path length over every point link of the tree, including the links
    /// between a parent's last point and a child's first point.
    pub fn total_length(&self) -> f32 {
        let mut total = 0.0;
        for node in &self.nodes {
            total += path_length(&node.points);
            if let Some(parent) = node.parent
                && let (Some(a), Some(b)) =
                    (self.nodes[parent].points.last(), node.points.first())
            {
                total += a.pos.distance(b.pos);
            }
        }
        total
    }

    /// Builds a structurally identical tree with `f` applied to every
    /// point. The original is left untouched.
    pub fn map_points<F>(&self, mut f: F) -> Tree
    where
        F: FnMut(&Point) -> Point,
    {
        let nodes = self
            .nodes
            .iter()
            .map(|n| TreeNode {
                points: n.points.iter().map(&mut f).collect(),
                parent: n.parent,
                children: n.children.clone(),
            })
            .collect();
        Tree { nodes }
    }
}

/// Iterator returned by [`Tree::preorder`].
#[derive(Debug)]
pub struct Preorder<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        // Reverse so the first child is popped first.
        self.stack
            .extend(self.tree.nodes[id].children.iter().rev().copied());
        Some(id)
    }
}
