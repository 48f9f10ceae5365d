use super::SymbolScope;
use crate::table::helper::ResolveHelper;
use crate::table::result::ResolveResult;
use std::sync::Arc;
use symscope_api::models::{TypeDeclSymbol, TypeParamSymbol};

/// Type parameters of a generic class or method declaration.
#[derive(Debug, Clone, Default)]
pub struct TypeParamsScope {
    params: Vec<Arc<TypeParamSymbol>>,
}

impl TypeParamsScope {
    pub fn new(params: impl IntoIterator<Item = TypeParamSymbol>) -> Self {
        Self {
            params: params.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn params(&self) -> &[Arc<TypeParamSymbol>] {
        &self.params
    }
}

impl SymbolScope for TypeParamsScope {
    fn name(&self) -> &'static str {
        "TypeParams"
    }

    fn resolve_type_name_impl(
        &self,
        simple_name: &str,
        _helper: &ResolveHelper,
    ) -> ResolveResult<TypeDeclSymbol> {
        self.params
            .iter()
            .find(|p| p.name == simple_name)
            .map(|p| TypeDeclSymbol::TypeParam(p.clone()))
            .into()
    }

    fn is_prunable(&self) -> bool {
        self.params.is_empty()
    }
}
