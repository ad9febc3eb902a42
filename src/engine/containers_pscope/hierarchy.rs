use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use crate::NodeIndex;

// Reparenting that would create a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReparentError
{
    ParentIsSelf,
    ParentIsDescendant,
}
impl Display for InvalidReparentError
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { Debug::fmt(self, f) }
}
impl Error for InvalidReparentError { }

#[derive(Debug)]
struct HierarchyEntry<T>
{
    parent: NodeIndex,
    children: Vec<NodeIndex>, // back-references, the arena owns all entries
    value: T,
}

// An arena-backed tree; nodes are never removed so indices stay valid for the life of the hierarchy
#[derive(Debug)]
pub struct Hierarchy<T>
{
    entries: Vec<HierarchyEntry<T>>,
}
impl<T> Default for Hierarchy<T>
{
    fn default() -> Self { Self { entries: Vec::new() } }
}
impl<T> Hierarchy<T>
{
    #[inline] #[must_use] pub fn len(&self) -> usize { self.entries.len() }
    #[inline] #[must_use] pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    // Add a parentless node
    pub fn add_root(&mut self, value: T) -> NodeIndex
    {
        let index = NodeIndex::some(self.entries.len());
        self.entries.push(HierarchyEntry
        {
            parent: NodeIndex::none(),
            children: Vec::new(),
            value,
        });
        index
    }

    // A fresh node cannot be an ancestor of anything, so this can't fail
    pub fn add_child(&mut self, parent: NodeIndex, value: T) -> NodeIndex
    {
        let index = NodeIndex::some(self.entries.len());
        self.entries.push(HierarchyEntry
        {
            parent,
            children: Vec::new(),
            value,
        });
        self.entries[parent.0].children.push(index);
        index
    }

    #[inline] #[must_use] pub fn get(&self, node: NodeIndex) -> &T { &self.entries[node.0].value }
    #[inline] #[must_use] pub fn get_mut(&mut self, node: NodeIndex) -> &mut T { &mut self.entries[node.0].value }

    #[inline] #[must_use] pub fn parent(&self, node: NodeIndex) -> NodeIndex { self.entries[node.0].parent }
    #[inline] #[must_use] pub fn children(&self, node: NodeIndex) -> &[NodeIndex] { &self.entries[node.0].children }

    // Walks parent links from (but excluding) `node` up to its root
    pub fn ancestors(&self, node: NodeIndex) -> Ancestors<'_, T>
    {
        Ancestors { hierarchy: self, next: self.parent(node) }
    }

    #[must_use]
    pub fn depth(&self, node: NodeIndex) -> usize { self.ancestors(node).count() }

    // True if `ancestor` lies strictly above `node`
    #[must_use]
    pub fn is_descendant_of(&self, node: NodeIndex, ancestor: NodeIndex) -> bool
    {
        self.ancestors(node).any(|a| a == ancestor)
    }

    // Validate moving `node` under `new_parent` without mutating anything
    pub fn check_reparent(&self, node: NodeIndex, new_parent: NodeIndex) -> Result<(), InvalidReparentError>
    {
        if node == new_parent
        {
            return Err(InvalidReparentError::ParentIsSelf);
        }
        if self.is_descendant_of(new_parent, node)
        {
            return Err(InvalidReparentError::ParentIsDescendant);
        }
        Ok(())
    }

    // Validate applying `moves` in order, each seeing the ones before it, without mutating anything
    pub fn check_reparents(&self, moves: &[(NodeIndex, NodeIndex)]) -> Result<(), InvalidReparentError>
    {
        let mut parents: Vec<NodeIndex> = self.entries.iter().map(|e| e.parent).collect();
        for &(node, new_parent) in moves
        {
            if node == new_parent
            {
                return Err(InvalidReparentError::ParentIsSelf);
            }
            let mut walk = new_parent;
            while let Some(i) = walk.get()
            {
                if walk == node
                {
                    return Err(InvalidReparentError::ParentIsDescendant);
                }
                walk = parents[i];
            }
            parents[node.0] = new_parent;
        }
        Ok(())
    }

    // Move `node` (and its subtree) under `new_parent`
    pub fn set_parent(&mut self, node: NodeIndex, new_parent: NodeIndex) -> Result<(), InvalidReparentError>
    {
        self.check_reparent(node, new_parent)?;

        let old_parent = self.entries[node.0].parent;
        if old_parent == new_parent
        {
            return Ok(());
        }
        if let Some(old) = old_parent.get()
        {
            self.entries[old].children.retain(|c| *c != node);
        }
        self.entries[new_parent.0].children.push(node);
        self.entries[node.0].parent = new_parent;
        log::trace!("Reparented {node:?} from {old_parent:?} to {new_parent:?}");
        Ok(())
    }
}

pub struct Ancestors<'h, T>
{
    hierarchy: &'h Hierarchy<T>,
    next: NodeIndex,
}
impl<T> Iterator for Ancestors<'_, T>
{
    type Item = NodeIndex;

    fn next(&mut self) -> Option<Self::Item>
    {
        let current = self.next;
        self.next = self.hierarchy.entries[current.get()?].parent;
        Some(current)
    }
}
