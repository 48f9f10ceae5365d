use crate::classpath::ClasspathLoader;
use crate::diagnostics::{DiagnosticKind, SemanticLogger};
use std::sync::Arc;
use symscope_api::models::{ClassSymbol, Range};

/// Context shared by every table of an analysis session: where classes are
/// loaded from and where warnings go. Read-only once built, so one helper
/// can serve analyses running on several threads.
#[derive(Clone)]
pub struct ResolveHelper {
    loader: Arc<dyn ClasspathLoader>,
    logger: Arc<dyn SemanticLogger>,
}

impl ResolveHelper {
    pub fn new(loader: Arc<dyn ClasspathLoader>, logger: Arc<dyn SemanticLogger>) -> Self {
        Self { loader, logger }
    }

    pub fn loader(&self) -> &dyn ClasspathLoader {
        self.loader.as_ref()
    }

    pub fn logger(&self) -> &dyn SemanticLogger {
        self.logger.as_ref()
    }

    /// Loads a class by binary or canonical name. A broken classpath is
    /// logged and treated like a missing class.
    pub fn load_class_or_fail(&self, name: &str) -> Option<Arc<ClassSymbol>> {
        match self.loader.load(name) {
            Ok(found) => found,
            Err(e) => {
                tracing::error!("Failed to load {} from the classpath: {}", name, e);
                None
            }
        }
    }

    /// Loads a class, emitting one `CANNOT_FIND_CLASSPATH_SYMBOL` warning at
    /// `location` if it cannot be found. Repeated calls warn again.
    pub fn load_class_report_failure(&self, location: Range, fqcn: &str) -> Option<Arc<ClassSymbol>> {
        let loaded = self.load_class_or_fail(fqcn);
        if loaded.is_none() {
            self.logger
                .warning(location, DiagnosticKind::CannotFindClasspathSymbol, &[fqcn]);
        }
        loaded
    }

    /// Loads a class without reporting anything when it is missing.
    pub fn load_class_ignore_failure(&self, canonical_name: &str) -> Option<Arc<ClassSymbol>> {
        self.load_class_or_fail(canonical_name)
    }
}

impl std::fmt::Debug for ResolveHelper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolveHelper").finish_non_exhaustive()
    }
}
