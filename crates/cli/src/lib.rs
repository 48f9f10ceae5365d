mod logging;
mod members;
mod packages;
mod resolve;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use symscope_java::{ArchiveClasspath, ClasspathConfig, ClasspathLoader};

#[derive(Parser)]
#[command(
    name = "symscope",
    version,
    about = "Resolve Java names the way a compiler's scope chain does",
    long_about = "Symscope builds the scope chain of a Java compilation unit (java.lang, \
                  on-demand imports, the package, single imports) over a classpath of jars, \
                  class directories and JDK images, and resolves names against it."
)]
pub struct Cli {
    /// Log resolution steps to stderr, not only warnings
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a simple name as seen from a compilation unit
    Resolve {
        /// Simple name to resolve
        #[arg(value_name = "NAME")]
        name: String,

        /// Package of the compilation unit (empty for the default package)
        #[arg(long, default_value = "")]
        package: String,

        /// Import declaration, e.g. "java.util.*" or "static java.lang.Math.max" (repeatable)
        #[arg(long = "import", short = 'i', value_name = "IMPORT")]
        imports: Vec<String>,

        /// Namespace to resolve the name in
        #[arg(long, value_enum, default_value_t = Namespace::Type)]
        namespace: Namespace,

        #[command(flatten)]
        classpath: ClasspathArgs,
    },
    /// List the fields and methods of a class on the classpath
    Members {
        /// Binary or canonical name of the class
        #[arg(value_name = "FQCN")]
        class: String,

        #[command(flatten)]
        classpath: ClasspathArgs,
    },
    /// List the packages a classpath entry provides
    Packages {
        /// Jar file, JImage file or class directory
        #[arg(value_name = "ENTRY")]
        entry: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Namespace {
    Type,
    Value,
    Method,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ClasspathArgs {
    /// Jar file, JImage file or class directory to search, in order (repeatable)
    #[arg(long = "classpath", short = 'c', value_name = "ENTRY")]
    pub entries: Vec<PathBuf>,

    /// JSON classpath configuration; its entries come first
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not append the JDK found on this machine
    #[arg(long)]
    pub no_jdk: bool,
}

impl ClasspathArgs {
    pub fn to_config(&self) -> symscope_java::Result<ClasspathConfig> {
        let mut config = match &self.config {
            Some(path) => ClasspathConfig::load(path)?,
            None => ClasspathConfig::default(),
        };
        config.entries.extend(self.entries.iter().cloned());
        if self.no_jdk {
            config.include_jdk = false;
        }
        Ok(config)
    }

    pub fn loader(&self) -> symscope_java::Result<Arc<dyn ClasspathLoader>> {
        let classpath = ArchiveClasspath::from_config(&self.to_config()?);
        tracing::info!("Classpath has {} entries", classpath.len());
        Ok(Arc::new(classpath))
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = logging::init_logging("cli", cli.verbose);

    match cli.command {
        Commands::Resolve {
            name,
            package,
            imports,
            namespace,
            classpath,
        } => resolve::run(&name, &package, &imports, namespace, &classpath),
        Commands::Members { class, classpath } => members::run(&class, &classpath),
        Commands::Packages { entry } => packages::run(&entry),
    }
}
