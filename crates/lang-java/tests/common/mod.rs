#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use symscope_api::models::{
    ClassKind, ClassSymbol, FieldSymbol, MethodSymbol, TypeDeclSymbol, TypeRef, ValueSymbol,
};
use symscope_java::table::scope::LocalMethods;
use symscope_java::{CollectingLogger, MemoryClasspath, ResolveHelper, ResolveResult, SymbolScope};

/// A helper over an in-memory classpath, with a logger the test can inspect.
pub fn memory_helper(classes: Vec<ClassSymbol>) -> (ResolveHelper, Arc<CollectingLogger>) {
    let mut cp = MemoryClasspath::new();
    for class in classes {
        cp.add(class);
    }
    let logger = Arc::new(CollectingLogger::new());
    (ResolveHelper::new(Arc::new(cp), logger.clone()), logger)
}

/// How many times each local lookup of a [`CountingScope`] ran.
#[derive(Debug, Default)]
pub struct LookupCounts {
    pub types: AtomicUsize,
    pub values: AtomicUsize,
    pub methods: AtomicUsize,
}

impl LookupCounts {
    pub fn types(&self) -> usize {
        self.types.load(Ordering::SeqCst)
    }

    pub fn values(&self) -> usize {
        self.values.load(Ordering::SeqCst)
    }

    pub fn methods(&self) -> usize {
        self.methods.load(Ordering::SeqCst)
    }
}

/// A scope declaring exactly what the test gives it and counting every
/// local lookup.
pub struct CountingScope {
    owner: String,
    types: Vec<Arc<ClassSymbol>>,
    values: Vec<Arc<FieldSymbol>>,
    methods: Vec<Arc<MethodSymbol>>,
    counts: Arc<LookupCounts>,
}

impl CountingScope {
    pub fn new(owner: &str) -> Self {
        Self {
            owner: owner.to_string(),
            types: Vec::new(),
            values: Vec::new(),
            methods: Vec::new(),
            counts: Arc::new(LookupCounts::default()),
        }
    }

    pub fn with_type(mut self, simple_name: &str) -> Self {
        let fqcn = format!("{}.{}", self.owner, simple_name);
        self.types.push(Arc::new(ClassSymbol::new(fqcn, ClassKind::Class)));
        self
    }

    pub fn with_value(mut self, name: &str) -> Self {
        self.values.push(Arc::new(FieldSymbol::new(
            name,
            self.owner.clone(),
            TypeRef::raw("int"),
        )));
        self
    }

    pub fn with_method(mut self, name: &str, params: &[&str]) -> Self {
        self.methods.push(Arc::new(
            MethodSymbol::new(name, self.owner.clone())
                .with_parameters(params.iter().map(|p| TypeRef::raw(*p)).collect()),
        ));
        self
    }

    pub fn counts(&self) -> Arc<LookupCounts> {
        self.counts.clone()
    }
}

impl SymbolScope for CountingScope {
    fn name(&self) -> &'static str {
        "Counting"
    }

    fn resolve_type_name_impl(
        &self,
        simple_name: &str,
        _helper: &ResolveHelper,
    ) -> ResolveResult<TypeDeclSymbol> {
        self.counts.types.fetch_add(1, Ordering::SeqCst);
        self.types
            .iter()
            .find(|c| c.simple_name() == simple_name)
            .map(|c| TypeDeclSymbol::Class(c.clone()))
            .into()
    }

    fn resolve_value_name_impl(
        &self,
        simple_name: &str,
        _helper: &ResolveHelper,
    ) -> ResolveResult<ValueSymbol> {
        self.counts.values.fetch_add(1, Ordering::SeqCst);
        self.values
            .iter()
            .find(|f| f.name == simple_name)
            .map(|f| ValueSymbol::Field(f.clone()))
            .into()
    }

    fn resolve_method_name_impl<'a>(
        &'a self,
        simple_name: &str,
        _helper: &'a ResolveHelper,
    ) -> LocalMethods<'a> {
        self.counts.methods.fetch_add(1, Ordering::SeqCst);
        let name = simple_name.to_string();
        Box::new(
            self.methods
                .iter()
                .filter(move |m| m.name.as_str() == name.as_str())
                .cloned(),
        )
    }
}

pub const ACC_PUBLIC: u16 = 0x0001;
pub const ACC_STATIC: u16 = 0x0008;
pub const ACC_NATIVE: u16 = 0x0100;
pub const ACC_INTERFACE: u16 = 0x0200;
pub const ACC_ABSTRACT: u16 = 0x0400;

/// A member of a hand-assembled class file: access flags, name, descriptor.
pub type MemberSpec<'a> = (u16, &'a str, &'a str);

/// Assembles a minimal class file (Java 8 format, no attributes).
/// `internal_name` uses slashes, e.g. `com/acme/Util$Inner`.
pub fn class_file(
    internal_name: &str,
    access: u16,
    fields: &[MemberSpec<'_>],
    methods: &[MemberSpec<'_>],
) -> Vec<u8> {
    fn utf8(pool: &mut Vec<Vec<u8>>, s: &str) -> u16 {
        let mut entry = vec![1u8];
        entry.extend_from_slice(&(s.len() as u16).to_be_bytes());
        entry.extend_from_slice(s.as_bytes());
        pool.push(entry);
        pool.len() as u16
    }
    fn class(pool: &mut Vec<Vec<u8>>, name_index: u16) -> u16 {
        let mut entry = vec![7u8];
        entry.extend_from_slice(&name_index.to_be_bytes());
        pool.push(entry);
        pool.len() as u16
    }
    fn members(pool: &mut Vec<Vec<u8>>, specs: &[MemberSpec<'_>]) -> Vec<u8> {
        let mut out = (specs.len() as u16).to_be_bytes().to_vec();
        for (flags, name, descriptor) in specs {
            let name_index = utf8(pool, name);
            let descriptor_index = utf8(pool, descriptor);
            out.extend_from_slice(&flags.to_be_bytes());
            out.extend_from_slice(&name_index.to_be_bytes());
            out.extend_from_slice(&descriptor_index.to_be_bytes());
            out.extend_from_slice(&0u16.to_be_bytes());
        }
        out
    }

    let mut pool: Vec<Vec<u8>> = Vec::new();
    let this_name = utf8(&mut pool, internal_name);
    let this_class = class(&mut pool, this_name);
    let super_name = utf8(&mut pool, "java/lang/Object");
    let super_class = class(&mut pool, super_name);

    let field_bytes = members(&mut pool, fields);
    let method_bytes = members(&mut pool, methods);

    let mut bytes = vec![0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 52];
    bytes.extend_from_slice(&((pool.len() + 1) as u16).to_be_bytes());
    for entry in &pool {
        bytes.extend_from_slice(entry);
    }
    bytes.extend_from_slice(&access.to_be_bytes());
    bytes.extend_from_slice(&this_class.to_be_bytes());
    bytes.extend_from_slice(&super_class.to_be_bytes());
    bytes.extend_from_slice(&0u16.to_be_bytes()); // interfaces
    bytes.extend_from_slice(&field_bytes);
    bytes.extend_from_slice(&method_bytes);
    bytes.extend_from_slice(&0u16.to_be_bytes()); // attributes
    bytes
}

/// Writes a jar holding `entries` (path inside the jar, contents).
pub fn write_jar(path: &Path, entries: &[(&str, Vec<u8>)]) {
    let file = std::fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();
    for (name, bytes) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(bytes).unwrap();
    }
    zip.finish().unwrap();
}
