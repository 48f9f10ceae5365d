//! Scope chains and name resolution over them.
//!
//! Every node of a compilation unit's chain lives in one
//! [`SymbolTableArena`]; nodes refer to their parent by [`TableId`], so the
//! chain is a borrow of the arena and never a reference-counted cycle. The
//! root has no parent. By default it is [`JavaLangScope`], backed by the
//! classpath alone.
//!
//! Lookups start at a [`SymbolTableRef`] and walk towards the root, asking
//! each scope only for what it declares itself. The first scope that answers
//! wins, which is all there is to shadowing.

pub mod candidates;
pub mod helper;
pub mod result;
pub mod scope;
pub mod stack;

pub use candidates::MethodCandidates;
pub use helper::ResolveHelper;
pub use result::ResolveResult;
pub use scope::SymbolScope;
pub use stack::ScopeStack;

use scope::JavaLangScope;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use symscope_api::models::{ClassSymbol, Range, TypeDeclSymbol, ValueSymbol};

static NEXT_ARENA: AtomicUsize = AtomicUsize::new(0);

/// Names one table of one arena. Ids are only meaningful to the arena that
/// handed them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId {
    arena: usize,
    index: usize,
}

impl TableId {
    pub fn index(self) -> usize {
        self.index
    }

    pub fn is_root(self) -> bool {
        self.index == 0
    }
}

struct TableNode<'h> {
    scope: Box<dyn SymbolScope + 'h>,
    parent: Option<TableId>,
}

/// Owns the scope chain of one compilation unit.
///
/// Nodes are immutable once pushed and are only dropped with the arena.
pub struct SymbolTableArena<'h> {
    id: usize,
    nodes: Vec<TableNode<'h>>,
    helper: &'h ResolveHelper,
}

impl<'h> SymbolTableArena<'h> {
    pub fn new(helper: &'h ResolveHelper) -> Self {
        Self::with_root(helper, JavaLangScope)
    }

    pub fn with_root(helper: &'h ResolveHelper, root: impl SymbolScope + 'h) -> Self {
        Self {
            id: NEXT_ARENA.fetch_add(1, Ordering::Relaxed),
            nodes: vec![TableNode {
                scope: Box::new(root),
                parent: None,
            }],
            helper,
        }
    }

    /// Adds `scope` as a child of `parent`.
    ///
    /// # Panics
    ///
    /// If `parent` is not a table of this arena.
    pub fn push(&mut self, parent: TableId, scope: impl SymbolScope + 'h) -> TableId {
        self.push_boxed(parent, Box::new(scope))
    }

    pub fn push_boxed(&mut self, parent: TableId, scope: Box<dyn SymbolScope + 'h>) -> TableId {
        assert!(
            self.owns(parent),
            "malformed scope chain: parent {:?} is not a table of arena {} ({} tables)",
            parent,
            self.id,
            self.nodes.len()
        );
        let id = self.table_id(self.nodes.len());
        tracing::trace!("Pushing {} scope {:?} under {:?}", scope.name(), id, parent);
        self.nodes.push(TableNode {
            scope,
            parent: Some(parent),
        });
        id
    }

    /// # Panics
    ///
    /// If `id` is not a table of this arena.
    pub fn get(&self, id: TableId) -> SymbolTableRef<'_> {
        assert!(
            self.owns(id),
            "table {:?} is not a table of arena {} ({} tables)",
            id,
            self.id,
            self.nodes.len()
        );
        SymbolTableRef { arena: self, id }
    }

    pub fn root_id(&self) -> TableId {
        self.table_id(0)
    }

    pub fn root(&self) -> SymbolTableRef<'_> {
        self.get(self.root_id())
    }

    /// Whether `id` was handed out by this arena.
    pub fn owns(&self, id: TableId) -> bool {
        id.arena == self.id && id.index < self.nodes.len()
    }

    fn table_id(&self, index: usize) -> TableId {
        TableId {
            arena: self.id,
            index,
        }
    }

    pub fn helper(&self) -> &'h ResolveHelper {
        self.helper
    }

    /// Number of tables, root included. Never zero.
    pub fn table_count(&self) -> usize {
        self.nodes.len()
    }
}

impl fmt::Debug for SymbolTableArena<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolTableArena")
            .field("id", &self.id)
            .field("tables", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

/// One node of a scope chain, seen through its arena.
#[derive(Clone, Copy)]
pub struct SymbolTableRef<'a> {
    arena: &'a SymbolTableArena<'a>,
    id: TableId,
}

impl<'a> SymbolTableRef<'a> {
    pub fn id(&self) -> TableId {
        self.id
    }

    fn node(&self) -> &'a TableNode<'a> {
        let arena = self.arena;
        &arena.nodes[self.id.index]
    }

    pub fn scope(&self) -> &'a dyn SymbolScope {
        self.node().scope.as_ref()
    }

    pub fn scope_name(&self) -> &'static str {
        self.scope().name()
    }

    pub fn helper(&self) -> &'a ResolveHelper {
        self.arena.helper
    }

    /// The enclosing table; `None` only at the root.
    pub fn parent(&self) -> Option<SymbolTableRef<'a>> {
        self.node().parent.map(|id| SymbolTableRef {
            arena: self.arena,
            id,
        })
    }

    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }

    /// This table, then each enclosing one up to the root.
    pub fn ancestors(self) -> impl Iterator<Item = SymbolTableRef<'a>> {
        std::iter::successors(Some(self), SymbolTableRef::parent)
    }

    /// Number of links between this table and the root.
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    /// Finds the type `simple_name` declared by the innermost table that
    /// declares one.
    pub fn resolve_type_name(&self, simple_name: &str) -> ResolveResult<TypeDeclSymbol> {
        self.resolve_in_chain(simple_name, |scope, helper| {
            scope.resolve_type_name_impl(simple_name, helper)
        })
    }

    /// Finds the value `simple_name` declared by the innermost table that
    /// declares one.
    pub fn resolve_value_name(&self, simple_name: &str) -> ResolveResult<ValueSymbol> {
        self.resolve_in_chain(simple_name, |scope, helper| {
            scope.resolve_value_name_impl(simple_name, helper)
        })
    }

    /// Every method named `simple_name` visible from this table, innermost
    /// table first. Nothing is looked up until the iterator is advanced,
    /// and a table is only asked once the ones below it are exhausted.
    pub fn resolve_method_name(&self, simple_name: &str) -> MethodCandidates<'a> {
        MethodCandidates::new(*self, simple_name)
    }

    pub fn is_prunable(&self) -> bool {
        self.scope().is_prunable()
    }

    /// Loads a class from the classpath, reporting it at `location` when it
    /// is missing.
    pub fn load_class_report_failure(&self, location: Range, fqcn: &str) -> Option<Arc<ClassSymbol>> {
        self.helper().load_class_report_failure(location, fqcn)
    }

    pub fn load_class_ignore_failure(&self, fqcn: &str) -> Option<Arc<ClassSymbol>> {
        self.helper().load_class_ignore_failure(fqcn)
    }

    fn resolve_in_chain<T>(
        &self,
        simple_name: &str,
        lookup: impl Fn(&dyn SymbolScope, &ResolveHelper) -> ResolveResult<T>,
    ) -> ResolveResult<T> {
        let helper = self.helper();
        for table in self.ancestors() {
            let result = lookup(table.scope(), helper);
            if result.is_found() {
                tracing::trace!(
                    "Resolved {} in {} scope {:?}",
                    simple_name,
                    table.scope_name(),
                    table.id
                );
                return result;
            }
        }
        ResolveResult::failed()
    }
}

impl fmt::Debug for SymbolTableRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolTableRef")
            .field("id", &self.id)
            .field("scope", &self.scope_name())
            .field("parent", &self.node().parent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classpath::MemoryClasspath;
    use crate::diagnostics::CollectingLogger;
    use crate::table::scope::{EmptyScope, LocalScope};
    use symscope_api::models::{LocalKind, LocalVarSymbol};

    fn helper() -> ResolveHelper {
        ResolveHelper::new(
            Arc::new(MemoryClasspath::new()),
            Arc::new(CollectingLogger::new()),
        )
    }

    #[test]
    fn test_chain_links() {
        let helper = helper();
        let mut arena = SymbolTableArena::new(&helper);
        let root = arena.root_id();
        let a = arena.push(root, EmptyScope);
        let b = arena.push(a, LocalScope::new());

        let leaf = arena.get(b);
        assert_eq!(leaf.depth(), 2);
        assert_eq!(leaf.parent().map(|p| p.id()), Some(a));
        let ids: Vec<TableId> = leaf.ancestors().map(|t| t.id()).collect();
        assert_eq!(ids, vec![b, a, root]);
        assert!(root.is_root());
        assert_eq!(b.index(), 2);

        let root = arena.root();
        assert!(root.is_root());
        assert!(root.parent().is_none());
        assert_eq!(root.scope_name(), "JavaLang");
        assert_eq!(arena.table_count(), 3);
    }

    #[test]
    fn test_siblings_share_parent() {
        let helper = helper();
        let mut arena = SymbolTableArena::new(&helper);
        let x = LocalVarSymbol::new("x", LocalKind::Variable, Range::default());
        let outer = arena.push(arena.root_id(), LocalScope::new().with_local(x));
        let left = arena.push(outer, LocalScope::new());
        let right = arena.push(outer, EmptyScope);

        assert!(arena.get(left).resolve_value_name("x").is_found());
        assert!(arena.get(right).resolve_value_name("x").is_found());
        assert!(!arena.root().resolve_value_name("x").is_found());
    }

    #[test]
    #[should_panic(expected = "malformed scope chain")]
    fn test_unknown_parent_panics() {
        let helper = helper();
        let mut arena = SymbolTableArena::new(&helper);
        let unknown = TableId {
            arena: arena.id,
            index: 7,
        };
        arena.push(unknown, EmptyScope);
    }

    #[test]
    #[should_panic(expected = "malformed scope chain")]
    fn test_same_index_from_other_arena_panics() {
        let helper = helper();
        let mut other = SymbolTableArena::new(&helper);
        let borrowed = other.push(other.root_id(), EmptyScope);

        let mut arena = SymbolTableArena::new(&helper);
        arena.push(arena.root_id(), LocalScope::new());
        assert_eq!(arena.table_count(), 2);
        assert!(!arena.owns(borrowed));
        arena.push(borrowed, EmptyScope);
    }

    #[test]
    #[should_panic(expected = "is not a table of arena")]
    fn test_get_rejects_other_arena() {
        let helper = helper();
        let other = SymbolTableArena::new(&helper);
        let arena = SymbolTableArena::new(&helper);
        arena.get(other.root_id());
    }

    #[test]
    fn test_debug_names_scope() {
        let helper = helper();
        let arena = SymbolTableArena::new(&helper);
        let rendered = format!("{:?}", arena.root());
        assert!(rendered.contains("JavaLang"));
    }
}
