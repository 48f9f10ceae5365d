//! The per-scope extension points and the Java scope kinds implementing them.
//!
//! A scope only answers for declarations it owns. Walking to the parent is
//! the job of [`SymbolTableRef`](super::SymbolTableRef), never of a scope.

use super::helper::ResolveHelper;
use super::result::ResolveResult;
use std::sync::Arc;
use symscope_api::models::{MethodSymbol, TypeDeclSymbol, ValueSymbol};

pub mod empty;
pub mod import_on_demand;
pub mod java_lang;
pub mod local;
pub mod same_package;
pub mod single_import;
pub mod type_member;
pub mod type_params;

pub use empty::EmptyScope;
pub use import_on_demand::ImportOnDemandScope;
pub use java_lang::JavaLangScope;
pub use local::LocalScope;
pub use same_package::SamePackageScope;
pub use single_import::SingleImportScope;
pub use type_member::TypeMemberScope;
pub use type_params::TypeParamsScope;

/// Overload candidates contributed by one scope, in declaration order.
pub type LocalMethods<'a> = Box<dyn Iterator<Item = Arc<MethodSymbol>> + 'a>;

pub trait SymbolScope {
    /// Short label for logs and debugging.
    fn name(&self) -> &'static str;

    /// Finds a type declared by this scope, without asking the parent.
    fn resolve_type_name_impl(
        &self,
        _simple_name: &str,
        _helper: &ResolveHelper,
    ) -> ResolveResult<TypeDeclSymbol> {
        ResolveResult::failed()
    }

    /// Finds a value declared by this scope, without asking the parent.
    fn resolve_value_name_impl(
        &self,
        _simple_name: &str,
        _helper: &ResolveHelper,
    ) -> ResolveResult<ValueSymbol> {
        ResolveResult::failed()
    }

    /// Finds the methods declared by this scope, without asking the parent.
    fn resolve_method_name_impl<'a>(
        &'a self,
        _simple_name: &str,
        _helper: &'a ResolveHelper,
    ) -> LocalMethods<'a> {
        Box::new(std::iter::empty())
    }

    /// True if this scope declares nothing in any namespace and can be left
    /// out of the chain.
    fn is_prunable(&self) -> bool {
        false
    }
}
