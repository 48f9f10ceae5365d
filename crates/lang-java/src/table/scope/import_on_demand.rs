use super::{LocalMethods, SymbolScope};
use crate::table::helper::ResolveHelper;
use crate::table::result::ResolveResult;
use smol_str::SmolStr;
use std::sync::Arc;
use symscope_api::models::{ClassSymbol, ImportDecl, TypeDeclSymbol, ValueSymbol};

/// `import p.*;` and `import static p.C.*;` declarations of a compilation unit.
///
/// Type-import-on-demand targets are only probed when a name is looked up;
/// static targets are loaded up front, reporting the ones that are missing.
#[derive(Debug, Clone, Default)]
pub struct ImportOnDemandScope {
    /// Packages, or classes whose member types are imported.
    containers: Vec<String>,
    static_classes: Vec<Arc<ClassSymbol>>,
}

impl ImportOnDemandScope {
    pub fn new(imports: &[ImportDecl], helper: &ResolveHelper) -> Self {
        let mut scope = Self::default();
        for import in imports.iter().filter(|i| i.is_on_demand) {
            if import.is_static {
                if let Some(class) = helper.load_class_report_failure(import.range, &import.name) {
                    scope.static_classes.push(class);
                }
            } else {
                scope.containers.push(import.name.clone());
            }
        }
        scope
    }
}

impl SymbolScope for ImportOnDemandScope {
    fn name(&self) -> &'static str {
        "ImportOnDemand"
    }

    fn resolve_type_name_impl(
        &self,
        simple_name: &str,
        helper: &ResolveHelper,
    ) -> ResolveResult<TypeDeclSymbol> {
        // First match wins; javac would reject a name provided by two imports
        self.containers
            .iter()
            .find_map(|container| {
                helper.load_class_ignore_failure(&format!("{container}.{simple_name}"))
            })
            .or_else(|| {
                self.static_classes.iter().find_map(|class| {
                    class.member_type(simple_name).cloned().or_else(|| {
                        helper.load_class_ignore_failure(&format!(
                            "{}.{}",
                            class.canonical_name, simple_name
                        ))
                    })
                })
            })
            .map(TypeDeclSymbol::Class)
            .into()
    }

    fn resolve_value_name_impl(
        &self,
        simple_name: &str,
        _helper: &ResolveHelper,
    ) -> ResolveResult<ValueSymbol> {
        self.static_classes
            .iter()
            .find_map(|class| class.fields_named(simple_name).find(|f| f.is_static()).cloned())
            .map(ValueSymbol::Field)
            .into()
    }

    fn resolve_method_name_impl<'a>(
        &'a self,
        simple_name: &str,
        _helper: &'a ResolveHelper,
    ) -> LocalMethods<'a> {
        let name = SmolStr::from(simple_name);
        Box::new(self.static_classes.iter().flat_map(move |class| {
            let name = name.clone();
            class
                .methods
                .iter()
                .filter(move |m| m.name == name && m.is_static())
                .cloned()
        }))
    }

    fn is_prunable(&self) -> bool {
        self.containers.is_empty() && self.static_classes.is_empty()
    }
}
