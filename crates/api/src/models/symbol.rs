use super::types::{ClassKind, TypeRef};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::sync::Arc;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, JsonSchema)]
pub struct Range {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl Range {
    pub fn new(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    pub fn contains(&self, line: usize, col: usize) -> bool {
        if line < self.start_line || line > self.end_line {
            return false;
        }
        if line == self.start_line && col < self.start_col {
            return false;
        }
        if line == self.end_line && col > self.end_col {
            return false;
        }
        true
    }
}

fn has_modifier(modifiers: &[String], modifier: &str) -> bool {
    modifiers.iter().any(|m| m == modifier)
}

/// A class, interface, enum, annotation or record declaration.
///
/// Classes coming from source carry a `location`; classes loaded from the
/// classpath do not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSymbol {
    /// Dotted name, nested classes separated by `.` (e.g. `java.util.Map.Entry`).
    pub canonical_name: String,
    /// Name as it appears on the classpath (e.g. `java.util.Map$Entry`).
    pub binary_name: String,
    pub kind: ClassKind,
    pub modifiers: Vec<String>,
    pub fields: Vec<Arc<FieldSymbol>>,
    pub methods: Vec<Arc<MethodSymbol>>,
    pub member_types: Vec<Arc<ClassSymbol>>,
    pub location: Option<Range>,
}

impl ClassSymbol {
    pub fn new(canonical_name: impl Into<String>, kind: ClassKind) -> Self {
        let canonical_name = canonical_name.into();
        Self {
            binary_name: canonical_name.clone(),
            canonical_name,
            kind,
            modifiers: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            member_types: Vec::new(),
            location: None,
        }
    }

    pub fn with_binary_name(mut self, binary_name: impl Into<String>) -> Self {
        self.binary_name = binary_name.into();
        self
    }

    pub fn with_modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifiers = modifiers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_field(mut self, field: FieldSymbol) -> Self {
        self.fields.push(Arc::new(field));
        self
    }

    pub fn with_method(mut self, method: MethodSymbol) -> Self {
        self.methods.push(Arc::new(method));
        self
    }

    pub fn with_member_type(mut self, member: ClassSymbol) -> Self {
        self.member_types.push(Arc::new(member));
        self
    }

    pub fn with_location(mut self, range: Range) -> Self {
        self.location = Some(range);
        self
    }

    pub fn simple_name(&self) -> &str {
        self.canonical_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.canonical_name)
    }

    /// Package part of the binary name; empty for the default package.
    pub fn package_name(&self) -> &str {
        let top_level = self
            .binary_name
            .split('$')
            .next()
            .unwrap_or(&self.binary_name);
        top_level.rsplit_once('.').map_or("", |(pkg, _)| pkg)
    }

    pub fn is_static(&self) -> bool {
        has_modifier(&self.modifiers, "static")
    }

    pub fn fields_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Arc<FieldSymbol>> {
        self.fields.iter().filter(move |f| f.name == name)
    }

    pub fn methods_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Arc<MethodSymbol>> {
        self.methods.iter().filter(move |m| m.name == name)
    }

    pub fn member_type(&self, name: &str) -> Option<&Arc<ClassSymbol>> {
        self.member_types.iter().find(|c| c.simple_name() == name)
    }
}

/// A type variable declared by a generic class or method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParamSymbol {
    pub name: SmolStr,
    /// Canonical name of the declaring class, or `Class#method` for method type parameters.
    pub owner: String,
    pub bounds: Vec<TypeRef>,
}

impl TypeParamSymbol {
    pub fn new(name: impl Into<SmolStr>, owner: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            bounds: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSymbol {
    pub name: SmolStr,
    pub owner: String,
    pub type_ref: TypeRef,
    pub modifiers: Vec<String>,
}

impl FieldSymbol {
    pub fn new(name: impl Into<SmolStr>, owner: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            type_ref,
            modifiers: Vec::new(),
        }
    }

    pub fn with_modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifiers = modifiers.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_static(&self) -> bool {
        has_modifier(&self.modifiers, "static")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalKind {
    Variable,
    Parameter,
    CatchParameter,
    Resource,
}

/// A local variable or formal parameter, always declared in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalVarSymbol {
    pub name: SmolStr,
    pub kind: LocalKind,
    /// Declared type; `None` for `var` and implicitly typed lambda parameters.
    pub type_ref: Option<TypeRef>,
    pub range: Range,
}

impl LocalVarSymbol {
    pub fn new(name: impl Into<SmolStr>, kind: LocalKind, range: Range) -> Self {
        Self {
            name: name.into(),
            kind,
            type_ref: None,
            range,
        }
    }

    pub fn with_type(mut self, type_ref: TypeRef) -> Self {
        self.type_ref = Some(type_ref);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSymbol {
    pub name: SmolStr,
    pub owner: String,
    pub parameters: Vec<TypeRef>,
    pub return_type: TypeRef,
    pub modifiers: Vec<String>,
    pub is_varargs: bool,
}

impl MethodSymbol {
    pub fn new(name: impl Into<SmolStr>, owner: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            parameters: Vec::new(),
            return_type: TypeRef::raw("void"),
            modifiers: Vec::new(),
            is_varargs: false,
        }
    }

    pub fn with_parameters(mut self, parameters: Vec<TypeRef>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_return_type(mut self, return_type: TypeRef) -> Self {
        self.return_type = return_type;
        self
    }

    pub fn with_modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifiers = modifiers.into_iter().map(Into::into).collect();
        self
    }

    pub fn varargs(mut self) -> Self {
        self.is_varargs = true;
        self
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_static(&self) -> bool {
        has_modifier(&self.modifiers, "static")
    }

    /// Renders the method as `owner#name(params)`.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.parameters.iter().map(|p| p.to_string()).collect();
        format!("{}#{}({})", self.owner, self.name, params.join(", "))
    }
}

/// A symbol of the type namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDeclSymbol {
    Class(Arc<ClassSymbol>),
    TypeParam(Arc<TypeParamSymbol>),
}

impl TypeDeclSymbol {
    pub fn simple_name(&self) -> &str {
        match self {
            TypeDeclSymbol::Class(c) => c.simple_name(),
            TypeDeclSymbol::TypeParam(p) => &p.name,
        }
    }

    pub fn as_class(&self) -> Option<&Arc<ClassSymbol>> {
        match self {
            TypeDeclSymbol::Class(c) => Some(c),
            TypeDeclSymbol::TypeParam(_) => None,
        }
    }

    /// Identity comparison, as opposed to the structural `==`.
    pub fn is_same(&self, other: &TypeDeclSymbol) -> bool {
        match (self, other) {
            (TypeDeclSymbol::Class(a), TypeDeclSymbol::Class(b)) => Arc::ptr_eq(a, b),
            (TypeDeclSymbol::TypeParam(a), TypeDeclSymbol::TypeParam(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Arc<ClassSymbol>> for TypeDeclSymbol {
    fn from(class: Arc<ClassSymbol>) -> Self {
        TypeDeclSymbol::Class(class)
    }
}

impl From<Arc<TypeParamSymbol>> for TypeDeclSymbol {
    fn from(param: Arc<TypeParamSymbol>) -> Self {
        TypeDeclSymbol::TypeParam(param)
    }
}

/// A symbol of the value namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSymbol {
    Field(Arc<FieldSymbol>),
    Local(Arc<LocalVarSymbol>),
}

impl ValueSymbol {
    pub fn simple_name(&self) -> &str {
        match self {
            ValueSymbol::Field(f) => &f.name,
            ValueSymbol::Local(l) => &l.name,
        }
    }

    pub fn is_same(&self, other: &ValueSymbol) -> bool {
        match (self, other) {
            (ValueSymbol::Field(a), ValueSymbol::Field(b)) => Arc::ptr_eq(a, b),
            (ValueSymbol::Local(a), ValueSymbol::Local(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Arc<FieldSymbol>> for ValueSymbol {
    fn from(field: Arc<FieldSymbol>) -> Self {
        ValueSymbol::Field(field)
    }
}

impl From<Arc<LocalVarSymbol>> for ValueSymbol {
    fn from(local: Arc<LocalVarSymbol>) -> Self {
        ValueSymbol::Local(local)
    }
}
