use crate::{ClasspathArgs, Namespace};
use std::sync::Arc;
use symscope_api::models::{ImportDecl, Range, TypeDeclSymbol, ValueSymbol};
use symscope_java::{CollectingLogger, ResolveHelper, ResolveResult, ScopeStack, SymbolTableArena};

pub fn run(
    name: &str,
    package: &str,
    imports: &[String],
    namespace: Namespace,
    classpath: &ClasspathArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    // Each import is reported at its position on the command line
    let imports = imports
        .iter()
        .enumerate()
        .map(|(i, text)| ImportDecl::parse(text, Range::new(i, 0, i, text.len())))
        .collect::<Result<Vec<_>, _>>()?;

    let logger = Arc::new(CollectingLogger::new());
    let helper = ResolveHelper::new(classpath.loader()?, logger.clone());
    let mut stack = ScopeStack::new(SymbolTableArena::new(&helper));
    stack.enter_compilation_unit(package, &imports);
    let table = stack.current_table();

    match namespace {
        Namespace::Type => match table.resolve_type_name(name) {
            ResolveResult::Found(TypeDeclSymbol::Class(class)) => {
                println!("{} ({})", class.canonical_name, class.kind)
            }
            ResolveResult::Found(TypeDeclSymbol::TypeParam(param)) => {
                println!("type parameter {} of {}", param.name, param.owner)
            }
            ResolveResult::NotFound => println!("{name}: no type in scope"),
        },
        Namespace::Value => match table.resolve_value_name(name) {
            ResolveResult::Found(ValueSymbol::Field(field)) => {
                println!("{}.{}: {}", field.owner, field.name, field.type_ref)
            }
            ResolveResult::Found(ValueSymbol::Local(local)) => println!("local {}", local.name),
            ResolveResult::NotFound => println!("{name}: no value in scope"),
        },
        Namespace::Method => {
            let mut any = false;
            for method in table.resolve_method_name(name) {
                any = true;
                println!("{}: {}", method.signature(), method.return_type);
            }
            if !any {
                println!("{name}: no method in scope");
            }
        }
    }

    let diagnostics = logger.diagnostics();
    for diagnostic in &diagnostics {
        let import = imports
            .get(diagnostic.range.start_line)
            .map_or("?", |i| i.name.as_str());
        println!("warning: import {}: {}", import, diagnostic.message());
    }
    Ok(())
}
