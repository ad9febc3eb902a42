use containers_pscope::{Hierarchy, InvalidReparentError, NodeIndex};
use glam::{Quat, Vec3};
use math_pscope::{Hpr, Transform};

#[derive(Debug, Clone)]
pub struct TransformNode
{
    name: String,
    local_position: Vec3,
    local_orientation: Hpr,
}
impl TransformNode
{
    fn new(name: impl Into<String>) -> Self
    {
        Self
        {
            name: name.into(),
            local_position: Vec3::ZERO,
            local_orientation: Hpr::ZERO,
        }
    }

    #[inline] #[must_use] pub fn name(&self) -> &str { &self.name }
    #[inline] #[must_use] pub fn local_position(&self) -> Vec3 { self.local_position }
    #[inline] #[must_use] pub fn local_orientation(&self) -> Hpr { self.local_orientation }

    #[inline] #[must_use]
    pub fn local_transform(&self) -> Transform
    {
        Transform::from_position_hpr(self.local_position, self.local_orientation)
    }
}

/// A tree of spatial nodes hanging off a single "world" root.
///
/// Each node stores only its transform relative to its parent. World transforms are
/// recomputed on request by walking up to the root, so they are never stale.
#[derive(Debug)]
pub struct SceneTree
{
    nodes: Hierarchy<TransformNode>,
    root: NodeIndex,
}
impl Default for SceneTree
{
    fn default() -> Self { Self::new() }
}
impl SceneTree
{
    pub const ROOT_NAME: &'static str = "world";

    #[must_use]
    pub fn new() -> Self
    {
        let mut nodes = Hierarchy::default();
        let root = nodes.add_root(TransformNode::new(Self::ROOT_NAME));
        Self { nodes, root }
    }

    #[inline] #[must_use] pub fn root(&self) -> NodeIndex { self.root }
    #[inline] #[must_use] pub fn len(&self) -> usize { self.nodes.len() }
    #[inline] #[must_use] pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    // New node with an identity local transform
    pub fn add_node(&mut self, name: impl Into<String>, parent: NodeIndex) -> NodeIndex
    {
        self.nodes.add_child(parent, TransformNode::new(name))
    }

    #[inline] #[must_use] pub fn node(&self, node: NodeIndex) -> &TransformNode { self.nodes.get(node) }
    #[inline] #[must_use] pub fn parent(&self, node: NodeIndex) -> NodeIndex { self.nodes.parent(node) }
    #[inline] #[must_use] pub fn children(&self, node: NodeIndex) -> &[NodeIndex] { self.nodes.children(node) }
    #[inline] #[must_use] pub fn depth(&self, node: NodeIndex) -> usize { self.nodes.depth(node) }

    // Reattach keeping the local transform; the world pose follows the new parent
    pub fn attach_child(&mut self, parent: NodeIndex, child: NodeIndex) -> Result<(), InvalidReparentError>
    {
        self.nodes.set_parent(child, parent)
    }

    pub fn set_local_position(&mut self, node: NodeIndex, position: Vec3)
    {
        self.nodes.get_mut(node).local_position = position;
    }

    // Heading and roll are wrapped, pitch is stored as given
    pub fn set_local_orientation(&mut self, node: NodeIndex, hpr: Hpr)
    {
        self.nodes.get_mut(node).local_orientation = hpr.canonical();
    }

    pub fn set_local_transform(&mut self, node: NodeIndex, transform: Transform)
    {
        let entry = self.nodes.get_mut(node);
        entry.local_position = transform.position;
        entry.local_orientation = transform.hpr();
    }

    #[must_use]
    pub fn world_transform(&self, node: NodeIndex) -> Transform
    {
        self.nodes.ancestors(node).fold(
            self.nodes.get(node).local_transform(),
            |world, ancestor| self.nodes.get(ancestor).local_transform() * world)
    }

    // `node`'s transform expressed in `frame`'s space
    #[must_use]
    pub fn relative_transform(&self, node: NodeIndex, frame: NodeIndex) -> Transform
    {
        self.world_transform(frame).inverse() * self.world_transform(node)
    }

    fn parent_world_transform(&self, node: NodeIndex) -> Transform
    {
        match self.nodes.parent(node).get()
        {
            Some(_) => self.world_transform(self.nodes.parent(node)),
            None => Transform::IDENTITY,
        }
    }

    // Pick the local transform that puts `node` at `world` under its current parent
    pub fn set_world_transform(&mut self, node: NodeIndex, world: Transform)
    {
        let local = self.parent_world_transform(node).inverse() * world;
        self.set_local_transform(node, local);
    }

    pub fn set_world_position(&mut self, node: NodeIndex, position: Vec3)
    {
        let world = Transform { position, ..self.world_transform(node) };
        self.set_world_transform(node, world);
    }

    pub fn set_world_rotation(&mut self, node: NodeIndex, rotation: Quat)
    {
        let world = Transform { rotation, ..self.world_transform(node) };
        self.set_world_transform(node, world);
    }

    /// Moves `node` under `new_parent` while keeping its world pose.
    ///
    /// The new local transform is `inverse(world(new_parent)) * world(node)`. Cycles are
    /// rejected before anything is touched, so a failed call leaves the tree as it was.
    pub fn reparent_preserving_world_transform(&mut self, node: NodeIndex, new_parent: NodeIndex) -> Result<(), InvalidReparentError>
    {
        self.nodes.check_reparent(node, new_parent)?;

        let old_world = self.world_transform(node);
        let local = self.world_transform(new_parent).inverse() * old_world;

        self.nodes.set_parent(node, new_parent)?;
        self.set_local_transform(node, local);
        Ok(())
    }

    // Several world-preserving reparents in order; all are validated before the first is applied
    pub fn reparent_all_preserving_world_transform(&mut self, moves: &[(NodeIndex, NodeIndex)]) -> Result<(), InvalidReparentError>
    {
        self.nodes.check_reparents(moves)?;
        for &(node, new_parent) in moves
        {
            self.reparent_preserving_world_transform(node, new_parent)?;
        }
        Ok(())
    }
}
