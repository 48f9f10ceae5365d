/// Outcome of a lookup in a single-result namespace (types, values).
///
/// `NotFound` carries no payload: every failed lookup returns the same
/// value, no allocation involved. It never means "not searched".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveResult<T> {
    Found(T),
    NotFound,
}

impl<T> ResolveResult<T> {
    /// The shared failure value.
    pub const fn failed() -> Self {
        ResolveResult::NotFound
    }

    pub fn found(symbol: T) -> Self {
        ResolveResult::Found(symbol)
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ResolveResult::Found(_))
    }

    pub fn symbol(&self) -> Option<&T> {
        match self {
            ResolveResult::Found(symbol) => Some(symbol),
            ResolveResult::NotFound => None,
        }
    }

    pub fn into_symbol(self) -> Option<T> {
        match self {
            ResolveResult::Found(symbol) => Some(symbol),
            ResolveResult::NotFound => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ResolveResult<U> {
        match self {
            ResolveResult::Found(symbol) => ResolveResult::Found(f(symbol)),
            ResolveResult::NotFound => ResolveResult::NotFound,
        }
    }

    /// Evaluates `fallback` only when this result is `NotFound`.
    pub fn or_else(self, fallback: impl FnOnce() -> Self) -> Self {
        match self {
            ResolveResult::Found(_) => self,
            ResolveResult::NotFound => fallback(),
        }
    }
}

impl<T> Default for ResolveResult<T> {
    fn default() -> Self {
        ResolveResult::NotFound
    }
}

impl<T> From<Option<T>> for ResolveResult<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(ResolveResult::NotFound, ResolveResult::Found)
    }
}
