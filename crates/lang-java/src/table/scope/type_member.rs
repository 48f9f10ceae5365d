use super::{LocalMethods, SymbolScope};
use crate::table::helper::ResolveHelper;
use crate::table::result::ResolveResult;
use smol_str::SmolStr;
use std::sync::Arc;
use symscope_api::models::{ClassSymbol, TypeDeclSymbol, ValueSymbol};

/// The body of a class: member types, fields and methods it declares.
#[derive(Debug, Clone)]
pub struct TypeMemberScope {
    class: Arc<ClassSymbol>,
}

impl TypeMemberScope {
    pub fn new(class: Arc<ClassSymbol>) -> Self {
        Self { class }
    }

    pub fn class(&self) -> &Arc<ClassSymbol> {
        &self.class
    }
}

impl SymbolScope for TypeMemberScope {
    fn name(&self) -> &'static str {
        "TypeMember"
    }

    fn resolve_type_name_impl(
        &self,
        simple_name: &str,
        helper: &ResolveHelper,
    ) -> ResolveResult<TypeDeclSymbol> {
        if let Some(member) = self.class.member_type(simple_name) {
            return ResolveResult::found(TypeDeclSymbol::Class(member.clone()));
        }
        // Classes loaded from the classpath do not list their member types
        helper
            .load_class_ignore_failure(&format!("{}.{}", self.class.canonical_name, simple_name))
            .map(TypeDeclSymbol::Class)
            .into()
    }

    fn resolve_value_name_impl(
        &self,
        simple_name: &str,
        _helper: &ResolveHelper,
    ) -> ResolveResult<ValueSymbol> {
        self.class
            .fields_named(simple_name)
            .next()
            .map(|f| ValueSymbol::Field(f.clone()))
            .into()
    }

    fn resolve_method_name_impl<'a>(
        &'a self,
        simple_name: &str,
        _helper: &'a ResolveHelper,
    ) -> LocalMethods<'a> {
        let name = SmolStr::from(simple_name);
        Box::new(
            self.class
                .methods
                .iter()
                .filter(move |m| m.name == name)
                .cloned(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classpath::MemoryClasspath;
    use crate::diagnostics::CollectingLogger;
    use symscope_api::models::{ClassKind, FieldSymbol, MethodSymbol, TypeRef};

    fn outer() -> ClassSymbol {
        ClassSymbol::new("com.example.Outer", ClassKind::Class)
            .with_field(FieldSymbol::new("count", "com.example.Outer", TypeRef::raw("int")))
            .with_method(MethodSymbol::new("run", "com.example.Outer"))
            .with_method(
                MethodSymbol::new("run", "com.example.Outer")
                    .with_parameters(vec![TypeRef::raw("int")]),
            )
            .with_method(MethodSymbol::new("stop", "com.example.Outer"))
    }

    #[test]
    fn test_type_member_scope_members() {
        let helper = ResolveHelper::new(
            Arc::new(MemoryClasspath::new()),
            Arc::new(CollectingLogger::new()),
        );
        let scope = TypeMemberScope::new(Arc::new(outer()));

        let runs: Vec<_> = scope.resolve_method_name_impl("run", &helper).collect();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].arity(), 1);

        assert!(scope.resolve_value_name_impl("count", &helper).is_found());
        assert!(!scope.resolve_value_name_impl("run", &helper).is_found());
    }

    #[test]
    fn test_member_type_falls_back_to_classpath() {
        let inner = ClassSymbol::new("com.example.Outer.Inner", ClassKind::Class)
            .with_binary_name("com.example.Outer$Inner");
        let cp = MemoryClasspath::new().with_class(inner);
        let helper = ResolveHelper::new(Arc::new(cp), Arc::new(CollectingLogger::new()));
        let scope = TypeMemberScope::new(Arc::new(outer()));

        let found = scope.resolve_type_name_impl("Inner", &helper).into_symbol();
        assert_eq!(
            found.and_then(|t| t.as_class().map(|c| c.binary_name.clone())),
            Some("com.example.Outer$Inner".to_string())
        );
    }

    #[test]
    fn test_default_package_member_type_from_classpath() {
        let outer = ClassSymbol::new("Outer", ClassKind::Class);
        let inner = ClassSymbol::new("Outer.Inner", ClassKind::Class).with_binary_name("Outer$Inner");
        let cp = MemoryClasspath::new().with_class(outer.clone()).with_class(inner);
        let helper = ResolveHelper::new(Arc::new(cp), Arc::new(CollectingLogger::new()));
        let scope = TypeMemberScope::new(Arc::new(outer));

        let found = scope.resolve_type_name_impl("Inner", &helper).into_symbol();
        assert_eq!(
            found.and_then(|t| t.as_class().map(|c| c.binary_name.clone())),
            Some("Outer$Inner".to_string())
        );
        assert!(!scope.resolve_type_name_impl("Missing", &helper).is_found());
    }
}
