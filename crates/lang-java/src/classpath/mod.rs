//! Class loading from the classpath.
//!
//! Loaders answer "which class has this fully qualified name?". Not being on
//! the classpath is an ordinary outcome (`Ok(None)`); `Err` is reserved for
//! a broken environment (unreadable archive, corrupt class file).

use crate::error::Result;
use std::collections::HashMap;
use std::sync::Arc;
use symscope_api::models::ClassSymbol;

pub mod archive;
mod converter;

pub use archive::ArchiveClasspath;

pub trait ClasspathLoader: Send + Sync {
    /// Looks up a class by binary name (`a.b.Outer$Inner`).
    fn load_binary(&self, binary_name: &str) -> Result<Option<Arc<ClassSymbol>>>;

    /// Looks up a class by binary or canonical name (`a.b.Outer.Inner`).
    fn load(&self, name: &str) -> Result<Option<Arc<ClassSymbol>>> {
        for candidate in binary_name_candidates(name) {
            if let Some(class) = self.load_binary(&candidate)? {
                return Ok(Some(class));
            }
        }
        Ok(None)
    }
}

/// Candidate binary names for a possibly canonical name, most likely first:
/// `a.b.C.D`, then `a.b.C$D`, `a.b$C$D`, `a$b$C$D`. The last one covers
/// member types of default-package classes (`Outer.Inner`).
pub fn binary_name_candidates(name: &str) -> impl Iterator<Item = String> + '_ {
    let dots: Vec<usize> = name.match_indices('.').map(|(i, _)| i).collect();
    (0..=dots.len()).map(move |nested| {
        let mut candidate = name.to_string();
        for &idx in dots.iter().rev().take(nested) {
            candidate.replace_range(idx..idx + 1, "$");
        }
        candidate
    })
}

/// A classpath held entirely in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryClasspath {
    classes: HashMap<String, Arc<ClassSymbol>>,
}

impl MemoryClasspath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a class and, recursively, its member types.
    pub fn add(&mut self, class: ClassSymbol) -> Arc<ClassSymbol> {
        let class = Arc::new(class);
        self.add_shared(class.clone());
        class
    }

    pub fn with_class(mut self, class: ClassSymbol) -> Self {
        self.add(class);
        self
    }

    fn add_shared(&mut self, class: Arc<ClassSymbol>) {
        for member in &class.member_types {
            self.add_shared(member.clone());
        }
        self.classes.insert(class.binary_name.clone(), class);
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClasspathLoader for MemoryClasspath {
    fn load_binary(&self, binary_name: &str) -> Result<Option<Arc<ClassSymbol>>> {
        Ok(self.classes.get(binary_name).cloned())
    }
}
