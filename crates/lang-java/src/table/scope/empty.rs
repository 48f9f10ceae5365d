use super::SymbolScope;

/// Declares nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyScope;

impl SymbolScope for EmptyScope {
    fn name(&self) -> &'static str {
        "Empty"
    }

    fn is_prunable(&self) -> bool {
        true
    }
}
