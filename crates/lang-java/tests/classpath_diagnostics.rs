mod common;

use common::{
    ACC_ABSTRACT, ACC_INTERFACE, ACC_NATIVE, ACC_PUBLIC, ACC_STATIC, class_file, memory_helper,
    write_jar,
};
use std::sync::Arc;
use symscope_api::models::{ClassKind, ClassSymbol, ImportDecl, Range, TypeRef};
use symscope_java::{
    ArchiveClasspath, ClasspathLoader, CollectingLogger, DiagnosticKind, JavaError, ResolveHelper,
    ScopeStack, SymbolTableArena,
};
use tempfile::tempdir;

#[test]
fn test_report_failure_warns_once_per_call() {
    let (helper, logger) = memory_helper(vec![]);
    let arena = SymbolTableArena::new(&helper);
    let root = arena.root();
    let at = Range::new(3, 0, 3, 28);

    assert!(root.load_class_report_failure(at, "com.acme.Missing").is_none());
    let diags = logger.diagnostics();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind, DiagnosticKind::CannotFindClasspathSymbol);
    assert_eq!(diags[0].kind.code(), "CANNOT_FIND_CLASSPATH_SYMBOL");
    assert_eq!(diags[0].range, at);
    assert_eq!(diags[0].args, vec!["com.acme.Missing".to_string()]);
    assert!(diags[0].message().contains("com.acme.Missing"));

    // No de-duplication across calls
    assert!(root.load_class_report_failure(at, "com.acme.Missing").is_none());
    assert_eq!(logger.count(DiagnosticKind::CannotFindClasspathSymbol), 2);
}

#[test]
fn test_report_failure_is_silent_on_success() {
    let (helper, logger) = memory_helper(vec![ClassSymbol::new("com.acme.Present", ClassKind::Class)]);
    let arena = SymbolTableArena::new(&helper);

    let found = arena
        .root()
        .load_class_report_failure(Range::default(), "com.acme.Present");
    assert_eq!(found.map(|c| c.canonical_name.clone()), Some("com.acme.Present".to_string()));
    assert!(logger.is_empty());
}

#[test]
fn test_ignore_failure_never_warns() {
    let (helper, logger) = memory_helper(vec![]);
    let arena = SymbolTableArena::new(&helper);

    assert!(arena.root().load_class_ignore_failure("com.acme.Missing").is_none());
    assert!(helper.load_class_ignore_failure("com.acme.Missing").is_none());
    assert!(logger.is_empty());
}

struct BrokenClasspath;

impl ClasspathLoader for BrokenClasspath {
    fn load_binary(&self, binary_name: &str) -> symscope_java::Result<Option<Arc<ClassSymbol>>> {
        Err(JavaError::Internal(format!("cannot read {binary_name}")))
    }
}

#[test]
fn test_broken_classpath_counts_as_missing() {
    let logger = Arc::new(CollectingLogger::new());
    let helper = ResolveHelper::new(Arc::new(BrokenClasspath), logger.clone());

    assert!(helper.load_class_ignore_failure("a.B").is_none());
    assert!(logger.is_empty());

    assert!(helper.load_class_report_failure(Range::default(), "a.B").is_none());
    assert_eq!(logger.count(DiagnosticKind::CannotFindClasspathSymbol), 1);
}

#[test]
fn test_unresolved_imports_are_reported_while_entering_unit() {
    let (helper, logger) = memory_helper(vec![
        ClassSymbol::new("java.util.List", ClassKind::Interface),
        ClassSymbol::new("java.lang.Math", ClassKind::Class),
    ]);
    let imports: Vec<ImportDecl> = [
        "import java.util.List;",
        "import com.acme.Gone;",
        "import static java.lang.Math.*;",
        "import static com.acme.Absent.*;",
        "import com.acme.pkg.*;",
    ]
    .iter()
    .enumerate()
    .map(|(line, text)| ImportDecl::parse(text, Range::new(line, 0, line, text.len())).unwrap())
    .collect();

    let mut stack = ScopeStack::new(SymbolTableArena::new(&helper));
    stack.enter_compilation_unit("com.acme", &imports);

    let diags = logger.diagnostics();
    let reported: Vec<(&str, usize)> = diags
        .iter()
        .map(|d| (d.args[0].as_str(), d.range.start_line))
        .collect();
    // On-demand package imports are never checked
    assert_eq!(reported, vec![("com.acme.Absent", 3), ("com.acme.Gone", 1)]);

    // Queries afterwards are silent
    let table = stack.current_table();
    assert!(!table.resolve_type_name("Gone").is_found());
    assert!(!table.resolve_type_name("Whatever").is_found());
    assert_eq!(logger.diagnostics().len(), 2);
}

fn acme_jar(dir: &std::path::Path) -> std::path::PathBuf {
    let jar = dir.join("acme.jar");
    write_jar(
        &jar,
        &[
            (
                "com/acme/Util.class",
                class_file(
                    "com/acme/Util",
                    ACC_PUBLIC,
                    &[(ACC_PUBLIC | ACC_STATIC, "COUNT", "I")],
                    &[
                        (ACC_PUBLIC | ACC_STATIC | ACC_NATIVE, "max", "(II)I"),
                        (ACC_PUBLIC | ACC_NATIVE, "size", "()I"),
                        (
                            ACC_PUBLIC | ACC_STATIC | ACC_NATIVE,
                            "max",
                            "([Ljava/lang/String;)Ljava/lang/String;",
                        ),
                    ],
                ),
            ),
            (
                "com/acme/Util$Inner.class",
                class_file("com/acme/Util$Inner", ACC_PUBLIC, &[], &[]),
            ),
            (
                "com/acme/api/Service.class",
                class_file(
                    "com/acme/api/Service",
                    ACC_PUBLIC | ACC_INTERFACE | ACC_ABSTRACT,
                    &[],
                    &[(ACC_PUBLIC | ACC_ABSTRACT, "start", "()V")],
                ),
            ),
        ],
    );
    jar
}

#[test]
fn test_jar_classes_are_read() {
    let dir = tempdir().unwrap();
    let cp = ArchiveClasspath::new([acme_jar(dir.path())]);

    let util = cp.load("com.acme.Util").unwrap().expect("Util is in the jar");
    assert_eq!(util.kind, ClassKind::Class);
    assert_eq!(util.modifiers, vec!["public".to_string()]);
    assert_eq!(util.fields.len(), 1);
    assert!(util.fields[0].is_static());
    assert_eq!(util.fields[0].type_ref, TypeRef::raw("int"));

    let names: Vec<&str> = util.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["max", "size", "max"]);
    let max = &util.methods[0];
    assert!(max.is_static());
    assert_eq!(max.parameters, vec![TypeRef::raw("int"), TypeRef::raw("int")]);
    assert_eq!(max.return_type, TypeRef::raw("int"));
    assert_eq!(util.methods[2].return_type, TypeRef::id("java.lang.String"));

    let service = cp.load("com.acme.api.Service").unwrap().unwrap();
    assert_eq!(service.kind, ClassKind::Interface);
    assert_eq!(service.modifiers, vec!["public".to_string()]);
}

#[test]
fn test_nested_class_by_canonical_name() {
    let dir = tempdir().unwrap();
    let cp = ArchiveClasspath::new([acme_jar(dir.path())]);

    let inner = cp.load("com.acme.Util.Inner").unwrap().expect("nested class");
    assert_eq!(inner.binary_name, "com.acme.Util$Inner");
    assert_eq!(inner.canonical_name, "com.acme.Util.Inner");
    assert_eq!(inner.simple_name(), "Inner");

    // Memoised: the same symbol comes back
    let again = cp.load("com.acme.Util$Inner").unwrap().unwrap();
    assert!(Arc::ptr_eq(&inner, &again));
}

#[test]
fn test_jar_backed_compilation_unit() {
    let dir = tempdir().unwrap();
    let cp = ArchiveClasspath::new([acme_jar(dir.path())]);
    let logger = Arc::new(CollectingLogger::new());
    let helper = ResolveHelper::new(Arc::new(cp), logger.clone());

    let imports = vec![
        ImportDecl::static_single("com.acme.Util.max", Range::new(1, 0, 1, 30)),
        ImportDecl::single("com.acme.Util.Inner", Range::new(2, 0, 2, 27)),
        ImportDecl::on_demand("com.acme.api", Range::new(3, 0, 3, 20)),
    ];
    let mut stack = ScopeStack::new(SymbolTableArena::new(&helper));
    stack.enter_compilation_unit("app", &imports);
    let table = stack.current_table();

    let overloads: Vec<_> = table.resolve_method_name("max").collect();
    assert_eq!(overloads.len(), 2);
    assert!(overloads.iter().all(|m| m.owner == "com.acme.Util"));
    assert!(table.resolve_method_name("size").next().is_none());

    let inner = table.resolve_type_name("Inner").into_symbol().unwrap();
    assert_eq!(inner.as_class().map(|c| c.binary_name.as_str()), Some("com.acme.Util$Inner"));
    assert!(table.resolve_type_name("Service").is_found());
    assert!(logger.is_empty(), "unexpected: {:?}", logger.diagnostics());
}

#[test]
fn test_packages_of_jar() {
    let dir = tempdir().unwrap();
    let jar = acme_jar(dir.path());
    let packages = ArchiveClasspath::packages(&jar).unwrap();
    assert_eq!(packages, vec!["com.acme".to_string(), "com.acme.api".to_string()]);
}
