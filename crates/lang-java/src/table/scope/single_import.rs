use super::{LocalMethods, SymbolScope};
use crate::table::helper::ResolveHelper;
use crate::table::result::ResolveResult;
use smol_str::SmolStr;
use std::collections::HashMap;
use std::sync::Arc;
use symscope_api::models::{ImportDecl, MethodSymbol, TypeDeclSymbol, ValueSymbol};

/// `import p.C;` and `import static p.C.m;` declarations of a compilation
/// unit. Every imported class is loaded when the scope is built; the ones
/// missing from the classpath are reported once each.
#[derive(Debug, Clone, Default)]
pub struct SingleImportScope {
    types: HashMap<SmolStr, TypeDeclSymbol>,
    values: HashMap<SmolStr, ValueSymbol>,
    methods: HashMap<SmolStr, Vec<Arc<MethodSymbol>>>,
}

impl SingleImportScope {
    pub fn new(imports: &[ImportDecl], helper: &ResolveHelper) -> Self {
        let mut scope = Self::default();
        for import in imports.iter().filter(|i| !i.is_on_demand) {
            let member = SmolStr::from(import.simple_name());

            if !import.is_static {
                if let Some(class) = helper.load_class_report_failure(import.range, &import.name) {
                    scope
                        .types
                        .entry(member)
                        .or_insert(TypeDeclSymbol::Class(class));
                }
                continue;
            }

            let Some(target) = import.static_target() else {
                continue;
            };
            let Some(class) = helper.load_class_report_failure(import.range, target) else {
                continue;
            };

            if let Some(nested) = class.member_type(&member) {
                scope
                    .types
                    .entry(member.clone())
                    .or_insert_with(|| TypeDeclSymbol::Class(nested.clone()));
            }
            if let Some(field) = class.fields_named(&member).find(|f| f.is_static()) {
                scope
                    .values
                    .entry(member.clone())
                    .or_insert_with(|| ValueSymbol::Field(field.clone()));
            }
            scope.methods.entry(member.clone()).or_default().extend(
                class
                    .methods_named(&member)
                    .filter(|m| m.is_static())
                    .cloned(),
            );
        }
        scope.methods.retain(|_, overloads| !overloads.is_empty());
        scope
    }
}

impl SymbolScope for SingleImportScope {
    fn name(&self) -> &'static str {
        "SingleImport"
    }

    fn resolve_type_name_impl(
        &self,
        simple_name: &str,
        _helper: &ResolveHelper,
    ) -> ResolveResult<TypeDeclSymbol> {
        self.types.get(simple_name).cloned().into()
    }

    fn resolve_value_name_impl(
        &self,
        simple_name: &str,
        _helper: &ResolveHelper,
    ) -> ResolveResult<ValueSymbol> {
        self.values.get(simple_name).cloned().into()
    }

    fn resolve_method_name_impl<'a>(
        &'a self,
        simple_name: &str,
        _helper: &'a ResolveHelper,
    ) -> LocalMethods<'a> {
        Box::new(self.methods.get(simple_name).into_iter().flatten().cloned())
    }

    fn is_prunable(&self) -> bool {
        self.types.is_empty() && self.values.is_empty() && self.methods.is_empty()
    }
}
