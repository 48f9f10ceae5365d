use super::SymbolScope;
use crate::table::helper::ResolveHelper;
use crate::table::result::ResolveResult;
use symscope_api::models::TypeDeclSymbol;

const JAVA_LANG: &str = "java.lang";

/// The implicit `import java.lang.*;` of every compilation unit. It is the
/// default root of a chain: it has no parent, and is backed by the
/// classpath alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct JavaLangScope;

impl SymbolScope for JavaLangScope {
    fn name(&self) -> &'static str {
        "JavaLang"
    }

    fn resolve_type_name_impl(
        &self,
        simple_name: &str,
        helper: &ResolveHelper,
    ) -> ResolveResult<TypeDeclSymbol> {
        helper
            .load_class_ignore_failure(&format!("{JAVA_LANG}.{simple_name}"))
            .map(TypeDeclSymbol::Class)
            .into()
    }
}
