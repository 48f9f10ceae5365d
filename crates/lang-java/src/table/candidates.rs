use super::SymbolTableRef;
use super::scope::LocalMethods;
use smol_str::SmolStr;
use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;
use symscope_api::models::MethodSymbol;

/// Overload candidates of one method name along a scope chain.
///
/// The candidates of a table are only computed when iteration reaches it,
/// and the enclosing table is only asked once they are exhausted. Tables
/// never interleave. Stopping early leaves the rest of the chain untouched.
pub struct MethodCandidates<'a> {
    name: SmolStr,
    current: Option<LocalMethods<'a>>,
    pending: Option<SymbolTableRef<'a>>,
}

impl<'a> MethodCandidates<'a> {
    pub(crate) fn new(start: SymbolTableRef<'a>, name: &str) -> Self {
        Self {
            name: SmolStr::from(name),
            current: None,
            pending: Some(start),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Iterator for MethodCandidates<'_> {
    type Item = Arc<MethodSymbol>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(current) = self.current.as_mut() {
                if let Some(method) = current.next() {
                    return Some(method);
                }
                self.current = None;
            }

            let table = self.pending.take()?;
            tracing::trace!(
                "Looking up methods {} in {} scope {:?}",
                self.name,
                table.scope_name(),
                table.id()
            );
            self.current = Some(
                table
                    .scope()
                    .resolve_method_name_impl(&self.name, table.helper()),
            );
            self.pending = table.parent();
        }
    }
}

impl FusedIterator for MethodCandidates<'_> {}

impl fmt::Debug for MethodCandidates<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodCandidates")
            .field("name", &self.name)
            .field("next_table", &self.pending.map(|t| t.id()))
            .finish_non_exhaustive()
    }
}
