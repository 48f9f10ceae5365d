use super::SymbolScope;
use crate::table::helper::ResolveHelper;
use crate::table::result::ResolveResult;
use symscope_api::models::TypeDeclSymbol;

/// Types of the package the compilation unit belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamePackageScope {
    package: String,
}

impl SamePackageScope {
    /// An empty `package` stands for the default package.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }
}

impl SymbolScope for SamePackageScope {
    fn name(&self) -> &'static str {
        "SamePackage"
    }

    fn resolve_type_name_impl(
        &self,
        simple_name: &str,
        helper: &ResolveHelper,
    ) -> ResolveResult<TypeDeclSymbol> {
        let fqcn = if self.package.is_empty() {
            simple_name.to_string()
        } else {
            format!("{}.{}", self.package, simple_name)
        };
        helper
            .load_class_ignore_failure(&fqcn)
            .map(TypeDeclSymbol::Class)
            .into()
    }
}
