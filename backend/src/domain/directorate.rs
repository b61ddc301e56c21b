//! Directorate aggregate and the arena-indexed hierarchy built over it.
//!
//! Directorates form a forest. Each record stores an optional parent id; the
//! inverse relation is never stored and is instead computed by
//! [`DirectorateTree`] from a flat list of live records.

use std::collections::{HashMap, HashSet};

use super::ids::{EntityId, PublicId};
use super::name::EntityName;
use super::reference::RegistryRef;

/// A node in the directorate forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directorate {
    id: EntityId,
    public_id: PublicId,
    name: EntityName,
    parent_id: Option<EntityId>,
}

impl Directorate {
    /// Create a new directorate under `parent`, or as a root when `None`.
    #[must_use]
    pub fn new(name: EntityName, parent_id: Option<EntityId>) -> Self {
        Self::from_parts(EntityId::generate(), PublicId::generate(), name, parent_id)
    }

    /// Rehydrate a directorate loaded from storage.
    #[must_use]
    pub const fn from_parts(
        id: EntityId,
        public_id: PublicId,
        name: EntityName,
        parent_id: Option<EntityId>,
    ) -> Self {
        Self {
            id,
            public_id,
            name,
            parent_id,
        }
    }

    /// Internal identifier.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Public identifier.
    #[must_use]
    pub const fn public_id(&self) -> PublicId {
        self.public_id
    }

    /// Directorate name.
    #[must_use]
    pub const fn name(&self) -> &EntityName {
        &self.name
    }

    /// Internal id of the parent directorate, if any.
    #[must_use]
    pub const fn parent_id(&self) -> Option<EntityId> {
        self.parent_id
    }

    /// Reference suitable for embedding in a program or a tree view.
    #[must_use]
    pub fn to_ref(&self) -> RegistryRef {
        RegistryRef {
            id: self.id,
            public_id: self.public_id,
            name: self.name.to_string(),
        }
    }
}

/// Errors raised while indexing a set of directorates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectorateTreeError {
    /// Following parent links from this directorate revisits a node.
    #[error("directorate {public_id} is part of a parent cycle")]
    Cycle {
        /// Directorate where the cycle was detected.
        public_id: PublicId,
    },
}

/// A directorate together with its resolved parent and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorateNode {
    /// The directorate itself.
    pub directorate: Directorate,
    /// Live parent, if the directorate is not a root.
    pub parent: Option<RegistryRef>,
    /// Live children ordered by creation.
    pub children: Vec<RegistryRef>,
}

/// Arena of live directorates with a computed children index.
///
/// Parents that are absent from the arena (for example soft-deleted ones)
/// are treated as missing, so their children surface as roots.
#[derive(Debug, Default)]
pub struct DirectorateTree {
    nodes: HashMap<EntityId, Directorate>,
    children: HashMap<EntityId, Vec<EntityId>>,
    order: Vec<EntityId>,
}

impl DirectorateTree {
    /// Index `records`, rejecting parent cycles.
    ///
    /// # Errors
    /// Returns [`DirectorateTreeError::Cycle`] when any parent chain loops.
    pub fn build(records: Vec<Directorate>) -> Result<Self, DirectorateTreeError> {
        let mut order: Vec<EntityId> = records.iter().map(Directorate::id).collect();
        order.sort_unstable();
        let nodes: HashMap<EntityId, Directorate> =
            records.into_iter().map(|record| (record.id(), record)).collect();

        let mut children: HashMap<EntityId, Vec<EntityId>> = HashMap::new();
        for id in &order {
            let parent = nodes
                .get(id)
                .and_then(Directorate::parent_id)
                .filter(|parent| nodes.contains_key(parent));
            if let Some(parent) = parent {
                children.entry(parent).or_default().push(*id);
            }
        }

        let tree = Self {
            nodes,
            children,
            order,
        };
        tree.ensure_acyclic()?;
        Ok(tree)
    }

    fn ensure_acyclic(&self) -> Result<(), DirectorateTreeError> {
        let mut settled: HashSet<EntityId> = HashSet::new();
        for start in &self.order {
            let mut path: HashSet<EntityId> = HashSet::new();
            let mut cursor = Some(*start);
            while let Some(id) = cursor {
                if settled.contains(&id) {
                    break;
                }
                if !path.insert(id) {
                    let public_id = self
                        .nodes
                        .get(start)
                        .map_or_else(PublicId::generate, Directorate::public_id);
                    return Err(DirectorateTreeError::Cycle { public_id });
                }
                cursor = self.parent_of(id).map(Directorate::id);
            }
            settled.extend(path);
        }
        Ok(())
    }

    /// Number of live directorates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no directorates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look a directorate up by its public id.
    #[must_use]
    pub fn find_by_public_id(&self, public_id: PublicId) -> Option<&Directorate> {
        self.nodes
            .values()
            .find(|directorate| directorate.public_id() == public_id)
    }

    /// Live parent of `id`.
    #[must_use]
    pub fn parent_of(&self, id: EntityId) -> Option<&Directorate> {
        self.nodes
            .get(&id)
            .and_then(Directorate::parent_id)
            .and_then(|parent| self.nodes.get(&parent))
    }

    /// Live children of `id` in creation order.
    pub fn children_of(&self, id: EntityId) -> impl Iterator<Item = &Directorate> {
        self.children
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(|child| self.nodes.get(child))
    }

    /// Whether `id` has at least one live child.
    #[must_use]
    pub fn has_children(&self, id: EntityId) -> bool {
        self.children.get(&id).is_some_and(|ids| !ids.is_empty())
    }

    /// Resolve parent and children for a single directorate.
    #[must_use]
    pub fn node(&self, id: EntityId) -> Option<DirectorateNode> {
        let directorate = self.nodes.get(&id)?;
        Some(DirectorateNode {
            directorate: directorate.clone(),
            parent: self.parent_of(id).map(Directorate::to_ref),
            children: self.children_of(id).map(Directorate::to_ref).collect(),
        })
    }

    /// Every live directorate with relations populated, in creation order.
    #[must_use]
    pub fn nodes(&self) -> Vec<DirectorateNode> {
        self.order.iter().filter_map(|id| self.node(*id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn named(name: &str, parent: Option<&Directorate>) -> Directorate {
        Directorate::new(
            EntityName::new(name).expect("valid name"),
            parent.map(Directorate::id),
        )
    }

    #[fixture]
    fn family() -> (Directorate, Directorate, Directorate) {
        let root = named("Operations", None);
        std::thread::sleep(std::time::Duration::from_millis(1));
        let first = named("Logistics", Some(&root));
        std::thread::sleep(std::time::Duration::from_millis(1));
        let second = named("Procurement", Some(&root));
        (root, first, second)
    }

    #[rstest]
    fn children_are_indexed_under_their_parent(family: (Directorate, Directorate, Directorate)) {
        let (root, first, second) = family;
        let tree = DirectorateTree::build(vec![second.clone(), root.clone(), first.clone()])
            .expect("acyclic");

        let children: Vec<_> = tree.children_of(root.id()).map(Directorate::id).collect();
        assert_eq!(children, vec![first.id(), second.id()]);
        assert!(tree.has_children(root.id()));
        assert!(!tree.has_children(first.id()));
        assert_eq!(tree.parent_of(first.id()).map(Directorate::id), Some(root.id()));
    }

    #[rstest]
    fn node_populates_parent_and_children(family: (Directorate, Directorate, Directorate)) {
        let (root, first, second) = family;
        let tree =
            DirectorateTree::build(vec![root.clone(), first.clone(), second]).expect("acyclic");

        let root_node = tree.node(root.id()).expect("root present");
        assert!(root_node.parent.is_none());
        assert_eq!(root_node.children.len(), 2);

        let child_node = tree.node(first.id()).expect("child present");
        assert_eq!(child_node.parent, Some(root.to_ref()));
        assert!(child_node.children.is_empty());
    }

    #[rstest]
    fn missing_parent_surfaces_as_root(family: (Directorate, Directorate, Directorate)) {
        let (_root, first, _second) = family;
        let tree = DirectorateTree::build(vec![first.clone()]).expect("acyclic");

        let node = tree.node(first.id()).expect("present");
        assert!(node.parent.is_none());
    }

    #[rstest]
    fn parent_cycles_are_rejected() {
        let a_id = EntityId::generate();
        let b_id = EntityId::generate();
        let a = Directorate::from_parts(
            a_id,
            PublicId::generate(),
            EntityName::new("A").expect("valid"),
            Some(b_id),
        );
        let b = Directorate::from_parts(
            b_id,
            PublicId::generate(),
            EntityName::new("B").expect("valid"),
            Some(a_id),
        );

        let error = DirectorateTree::build(vec![a, b]).expect_err("cycle detected");
        assert!(matches!(error, DirectorateTreeError::Cycle { .. }));
    }

    #[rstest]
    fn self_parent_is_a_cycle() {
        let id = EntityId::generate();
        let looped = Directorate::from_parts(
            id,
            PublicId::generate(),
            EntityName::new("Loop").expect("valid"),
            Some(id),
        );
        assert!(DirectorateTree::build(vec![looped]).is_err());
    }

    #[rstest]
    fn find_by_public_id_matches_only_live_nodes(family: (Directorate, Directorate, Directorate)) {
        let (root, first, _second) = family;
        let tree = DirectorateTree::build(vec![root.clone()]).expect("acyclic");
        assert_eq!(
            tree.find_by_public_id(root.public_id()).map(Directorate::id),
            Some(root.id())
        );
        assert!(tree.find_by_public_id(first.public_id()).is_none());
        assert_eq!(tree.len(), 1);
    }
}
