//! Scope chains and name resolution for Java compilation units.
//!
//! A chain is built per compilation unit with a [`ScopeStack`] over a
//! [`SymbolTableArena`]; names are resolved from any [`SymbolTableRef`] in
//! three independent namespaces: types, values and methods. Classes that no
//! source declares come from a [`ClasspathLoader`], and problems worth
//! telling the user about go to a [`SemanticLogger`].

pub mod classpath;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod jdk;
pub mod table;

pub use classpath::{ArchiveClasspath, ClasspathLoader, MemoryClasspath};
pub use config::ClasspathConfig;
pub use diagnostics::{CollectingLogger, Diagnostic, DiagnosticKind, SemanticLogger, TracingLogger};
pub use error::{JavaError, Result};
pub use table::{
    MethodCandidates, ResolveHelper, ResolveResult, ScopeStack, SymbolScope, SymbolTableArena,
    SymbolTableRef, TableId,
};
