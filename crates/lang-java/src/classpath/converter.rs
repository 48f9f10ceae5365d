use crate::error::{JavaError, Result};
use ristretto_classfile::{
    BaseType, ClassAccessFlags, ClassFile, FieldAccessFlags, FieldType, MethodAccessFlags,
};
use std::io::Cursor;
use symscope_api::models::{ClassKind, ClassSymbol, FieldSymbol, MethodSymbol, TypeRef};

/// Builds a class symbol out of raw class-file bytes.
pub fn class_from_bytes(binary_name: &str, bytes: Vec<u8>) -> Result<ClassSymbol> {
    let malformed = |reason: String| JavaError::ClassFormat {
        name: binary_name.to_string(),
        reason,
    };

    let class = ClassFile::from_bytes(&mut Cursor::new(bytes))
        .map_err(|e| malformed(format!("{e:?}")))?;

    let kind = if class.access_flags.contains(ClassAccessFlags::ANNOTATION) {
        ClassKind::Annotation
    } else if class.access_flags.contains(ClassAccessFlags::INTERFACE) {
        ClassKind::Interface
    } else if class.access_flags.contains(ClassAccessFlags::ENUM) {
        ClassKind::Enum
    } else {
        ClassKind::Class
    };

    let canonical_name = binary_name.replace('$', ".");
    let mut symbol = ClassSymbol::new(canonical_name.clone(), kind)
        .with_binary_name(binary_name)
        .with_modifiers(JavaModifierConverter::parse_class(class.access_flags));

    for field in &class.fields {
        let name = class
            .constant_pool
            .try_get_utf8(field.name_index)
            .map_err(|e| malformed(format!("field name: {e:?}")))?
            .to_string();
        symbol = symbol.with_field(
            FieldSymbol::new(
                name,
                canonical_name.clone(),
                JavaTypeConverter::convert_field(&field.field_type),
            )
            .with_modifiers(JavaModifierConverter::parse_field(field.access_flags)),
        );
    }

    for method in &class.methods {
        let name = class
            .constant_pool
            .try_get_utf8(method.name_index)
            .map_err(|e| malformed(format!("method name: {e:?}")))?
            .to_string();
        // Constructors and static initializers are not part of the method namespace
        if name.starts_with('<') {
            continue;
        }
        let descriptor = class
            .constant_pool
            .try_get_utf8(method.descriptor_index)
            .map_err(|e| malformed(format!("method descriptor: {e:?}")))?
            .to_string();
        let is_varargs = method.access_flags.contains(MethodAccessFlags::VARARGS);
        let (return_type, parameters) = JavaTypeConverter::convert_method(&descriptor)
            .map_err(|e| malformed(format!("signature of {name}: {e:?}")))?;

        let mut m = MethodSymbol::new(name, canonical_name.clone())
            .with_parameters(parameters)
            .with_return_type(return_type)
            .with_modifiers(JavaModifierConverter::parse_method(method.access_flags));
        if is_varargs {
            m = m.varargs();
        }
        symbol = symbol.with_method(m);
    }

    Ok(symbol)
}

pub struct JavaTypeConverter;

impl JavaTypeConverter {
    pub fn convert_field(ty: &FieldType) -> TypeRef {
        Self::convert_type(ty)
    }

    pub fn convert_method(
        descriptor: &str,
    ) -> std::result::Result<(TypeRef, Vec<TypeRef>), ristretto_classfile::Error> {
        let (params, ret) = FieldType::parse_method_descriptor(descriptor)?;
        let return_type = match ret {
            None => TypeRef::raw("void"),
            Some(field_type) => Self::convert_field(&field_type),
        };
        let parameters = params.iter().map(Self::convert_field).collect();
        Ok((return_type, parameters))
    }

    pub fn convert_type(ty: &FieldType) -> TypeRef {
        match ty {
            FieldType::Base(BaseType::Byte) => TypeRef::raw("byte"),
            FieldType::Base(BaseType::Char) => TypeRef::raw("char"),
            FieldType::Base(BaseType::Double) => TypeRef::raw("double"),
            FieldType::Base(BaseType::Float) => TypeRef::raw("float"),
            FieldType::Base(BaseType::Int) => TypeRef::raw("int"),
            FieldType::Base(BaseType::Long) => TypeRef::raw("long"),
            FieldType::Base(BaseType::Short) => TypeRef::raw("short"),
            FieldType::Base(BaseType::Boolean) => TypeRef::raw("boolean"),
            FieldType::Object(name) => TypeRef::id(name.replace(['/', '$'], ".")),
            FieldType::Array(component) => {
                let mut dimensions = 1usize;
                let mut current = component.as_ref();
                while let FieldType::Array(inner) = current {
                    dimensions += 1;
                    current = inner.as_ref();
                }

                TypeRef::Array {
                    element: Box::new(Self::convert_type(current)),
                    dimensions,
                }
            }
        }
    }
}

pub struct JavaModifierConverter;

impl JavaModifierConverter {
    pub fn parse_class(flags: ClassAccessFlags) -> Vec<String> {
        let mut mods = Vec::new();
        if flags.contains(ClassAccessFlags::PUBLIC) {
            mods.push("public".into());
        }
        if flags.contains(ClassAccessFlags::FINAL) {
            mods.push("final".into());
        }
        if flags.contains(ClassAccessFlags::ABSTRACT) && !flags.contains(ClassAccessFlags::INTERFACE)
        {
            mods.push("abstract".into());
        }
        mods
    }

    pub fn parse_field(flags: FieldAccessFlags) -> Vec<String> {
        [
            (FieldAccessFlags::PUBLIC, "public"),
            (FieldAccessFlags::PRIVATE, "private"),
            (FieldAccessFlags::PROTECTED, "protected"),
            (FieldAccessFlags::STATIC, "static"),
            (FieldAccessFlags::FINAL, "final"),
            (FieldAccessFlags::VOLATILE, "volatile"),
            (FieldAccessFlags::TRANSIENT, "transient"),
        ]
        .into_iter()
        .filter(|(flag, _)| flags.contains(*flag))
        .map(|(_, name)| name.to_string())
        .collect()
    }

    pub fn parse_method(flags: MethodAccessFlags) -> Vec<String> {
        [
            (MethodAccessFlags::PUBLIC, "public"),
            (MethodAccessFlags::PRIVATE, "private"),
            (MethodAccessFlags::PROTECTED, "protected"),
            (MethodAccessFlags::STATIC, "static"),
            (MethodAccessFlags::FINAL, "final"),
            (MethodAccessFlags::SYNCHRONIZED, "synchronized"),
            (MethodAccessFlags::NATIVE, "native"),
            (MethodAccessFlags::ABSTRACT, "abstract"),
            (MethodAccessFlags::STRICT, "strictfp"),
        ]
        .into_iter()
        .filter(|(flag, _)| flags.contains(*flag))
        .map(|(_, name)| name.to_string())
        .collect()
    }
}
