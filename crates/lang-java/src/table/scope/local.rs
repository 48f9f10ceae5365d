use super::SymbolScope;
use crate::table::helper::ResolveHelper;
use crate::table::result::ResolveResult;
use std::sync::Arc;
use symscope_api::models::{ClassSymbol, LocalVarSymbol, TypeDeclSymbol, ValueSymbol};

/// A block: local variables, formal parameters and local classes.
#[derive(Debug, Clone, Default)]
pub struct LocalScope {
    locals: Vec<Arc<LocalVarSymbol>>,
    classes: Vec<Arc<ClassSymbol>>,
}

impl LocalScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_local(mut self, local: LocalVarSymbol) -> Self {
        self.locals.push(Arc::new(local));
        self
    }

    pub fn with_class(mut self, class: ClassSymbol) -> Self {
        self.classes.push(Arc::new(class));
        self
    }

    pub fn locals(&self) -> &[Arc<LocalVarSymbol>] {
        &self.locals
    }
}

impl SymbolScope for LocalScope {
    fn name(&self) -> &'static str {
        "Local"
    }

    fn resolve_type_name_impl(
        &self,
        simple_name: &str,
        _helper: &ResolveHelper,
    ) -> ResolveResult<TypeDeclSymbol> {
        self.classes
            .iter()
            .find(|c| c.simple_name() == simple_name)
            .map(|c| TypeDeclSymbol::Class(c.clone()))
            .into()
    }

    fn resolve_value_name_impl(
        &self,
        simple_name: &str,
        _helper: &ResolveHelper,
    ) -> ResolveResult<ValueSymbol> {
        self.locals
            .iter()
            .find(|l| l.name == simple_name)
            .map(|l| ValueSymbol::Local(l.clone()))
            .into()
    }

    fn is_prunable(&self) -> bool {
        self.locals.is_empty() && self.classes.is_empty()
    }
}
