use super::scope::{ImportOnDemandScope, SamePackageScope, SingleImportScope, SymbolScope};
use super::{SymbolTableArena, SymbolTableRef, TableId};
use symscope_api::models::ImportDecl;

/// Builds a chain while an AST is walked top down: `enter` when a lexical
/// region opens, `exit` when it closes.
///
/// Scopes that declare nothing are not pushed; the region reuses the
/// enclosing table instead.
#[derive(Debug)]
pub struct ScopeStack<'h> {
    arena: SymbolTableArena<'h>,
    path: Vec<TableId>,
}

impl<'h> ScopeStack<'h> {
    pub fn new(arena: SymbolTableArena<'h>) -> Self {
        let root = arena.root_id();
        Self {
            arena,
            path: vec![root],
        }
    }

    pub fn enter(&mut self, scope: impl SymbolScope + 'h) -> TableId {
        let current = self.current();
        if scope.is_prunable() {
            tracing::trace!("Pruned empty {} scope under {:?}", scope.name(), current);
            self.path.push(current);
            return current;
        }
        let id = self.arena.push(current, scope);
        self.path.push(id);
        id
    }

    /// Leaves the innermost region and returns the table now current.
    ///
    /// # Panics
    ///
    /// If there is no region left to leave.
    pub fn exit(&mut self) -> TableId {
        assert!(self.path.len() > 1, "exit() without a matching enter()");
        self.path.pop();
        self.current()
    }

    pub fn current(&self) -> TableId {
        self.path.last().copied().unwrap_or_else(|| self.arena.root_id())
    }

    pub fn current_table(&self) -> SymbolTableRef<'_> {
        self.arena.get(self.current())
    }

    /// Number of regions entered and not yet left.
    pub fn depth(&self) -> usize {
        self.path.len() - 1
    }

    pub fn arena(&self) -> &SymbolTableArena<'h> {
        &self.arena
    }

    pub fn into_arena(self) -> SymbolTableArena<'h> {
        self.arena
    }

    /// Enters the file-level regions of a compilation unit, outermost
    /// first: on-demand imports, the package, single imports.
    pub fn enter_compilation_unit(&mut self, package: &str, imports: &[ImportDecl]) -> TableId {
        let helper = self.arena.helper();
        self.enter(ImportOnDemandScope::new(imports, helper));
        self.enter(SamePackageScope::new(package));
        self.enter(SingleImportScope::new(imports, helper))
    }
}
