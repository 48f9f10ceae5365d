use std::path::Path;
use symscope_java::ArchiveClasspath;

pub fn run(entry: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let packages = ArchiveClasspath::packages(entry)?;
    if packages.is_empty() {
        println!("No packages in {}.", entry.display());
    }
    for package in packages {
        println!("{package}");
    }
    Ok(())
}
