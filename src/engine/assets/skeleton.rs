// Skeletal hierarchy delivered by the asset loader

use super::handle::EquipmentHandle;
use glam::{Mat4, Quat, Vec3};

/// Index of a node inside one [`Skeleton`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Local transform of a node relative to its parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl NodeTransform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone)]
pub struct SkeletonNode {
    pub name: String,
    pub parent: Option<NodeId>,
    pub local: NodeTransform,
}

/// Named node hierarchy. Node 0 is the root; parents always precede children.
#[derive(Debug, Clone)]
pub struct Skeleton {
    nodes: Vec<SkeletonNode>,
}

impl Skeleton {
    pub fn new(root_name: &str) -> Self {
        Self {
            nodes: vec![SkeletonNode {
                name: root_name.to_string(),
                parent: None,
                local: NodeTransform::IDENTITY,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a child node. Returns `None` if `parent` does not belong to this skeleton.
    pub fn add_node(&mut self, parent: NodeId, name: &str, local: NodeTransform) -> Option<NodeId> {
        if parent.0 >= self.nodes.len() {
            return None;
        }
        self.nodes.push(SkeletonNode {
            name: name.to_string(),
            parent: Some(parent),
            local,
        });
        Some(NodeId(self.nodes.len() - 1))
    }

    pub fn node(&self, id: NodeId) -> Option<&SkeletonNode> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node (in hierarchy order) whose name satisfies the predicate
    pub fn find(&self, mut predicate: impl FnMut(&str) -> bool) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| predicate(&node.name))
            .map(NodeId)
    }

    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.find(|candidate| candidate == name)
    }

    /// Walks parent links until `ancestor` is reached or the root is passed
    pub fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.node(node).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node(id).and_then(|n| n.parent);
        }
        false
    }

    /// Model-space transform of a node (root local transform included)
    pub fn model_transform(&self, id: NodeId) -> Option<Mat4> {
        let node = self.node(id)?;
        let local = node.local.to_mat4();
        match node.parent {
            Some(parent) => Some(self.model_transform(parent)? * local),
            None => Some(local),
        }
    }
}

/// Equipment object (e.g. a sword) the character carries
#[derive(Debug, Clone)]
pub struct Equipment {
    pub name: String,
    pub handle: EquipmentHandle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn arm() -> (Skeleton, NodeId, NodeId) {
        let mut skeleton = Skeleton::new("Armature");
        let spine = skeleton
            .add_node(skeleton.root(), "Spine", NodeTransform::from_translation(Vec3::Y))
            .unwrap();
        let hand = skeleton
            .add_node(spine, "mixamorig:RightHand", NodeTransform::from_translation(Vec3::X))
            .unwrap();
        (skeleton, spine, hand)
    }

    #[test]
    fn test_find_by_predicate() {
        let (skeleton, _, hand) = arm();
        let found = skeleton.find(|name| name.to_lowercase().contains("hand"));
        assert_eq!(found, Some(hand));
        assert_eq!(skeleton.find_by_name("Spine").map(|id| id.index()), Some(1));
        assert!(skeleton.find_by_name("Tail").is_none());
    }

    #[test]
    fn test_descendant_walk() {
        let (skeleton, spine, hand) = arm();
        assert!(skeleton.is_descendant_of(hand, skeleton.root()));
        assert!(skeleton.is_descendant_of(hand, spine));
        assert!(!skeleton.is_descendant_of(spine, hand));
        assert!(!skeleton.is_descendant_of(skeleton.root(), skeleton.root()));
    }

    #[test]
    fn test_add_node_rejects_foreign_parent() {
        let mut skeleton = Skeleton::new("Root");
        assert!(skeleton
            .add_node(NodeId(42), "Orphan", NodeTransform::IDENTITY)
            .is_none());
        assert_eq!(skeleton.len(), 1);
    }

    #[test]
    fn test_model_transform_accumulates() {
        let (skeleton, _, hand) = arm();
        let position = skeleton.model_transform(hand).unwrap().transform_point3(Vec3::ZERO);
        assert_relative_eq!(position.x, 1.0);
        assert_relative_eq!(position.y, 1.0);
    }
}
