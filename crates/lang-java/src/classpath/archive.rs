use super::ClasspathLoader;
use super::converter::class_from_bytes;
use crate::config::ClasspathConfig;
use crate::error::{JavaError, Result};
use dashmap::DashMap;
use ristretto_jimage::Image;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use symscope_api::models::ClassSymbol;
use walkdir::WalkDir;
use zip::ZipArchive;
use zip::result::ZipError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFormat {
    Zip,
    JImage,
    Directory,
}

impl EntryFormat {
    /// Detects the format of a classpath entry from its magic bytes.
    pub fn detect(path: &Path) -> Result<Self> {
        if path.is_dir() {
            return Ok(EntryFormat::Directory);
        }

        let mut file = File::open(path)?;
        let mut magic = [0u8; 4];
        if file.read_exact(&mut magic).is_err() {
            return Err(JavaError::InvalidClasspathEntry(path.to_path_buf()));
        }

        match &magic {
            // ZIP magic: PK\x03\x04 or PK\x05\x06 (empty) or PK\x07\x08 (spanned)
            [0x50, 0x4B, _, _] => Ok(EntryFormat::Zip),
            // JImage magic: CAFEDADA (big-endian) or DADAFECA (little-endian)
            [0xCA, 0xFE, 0xDA, 0xDA] | [0xDA, 0xDA, 0xFE, 0xCA] => Ok(EntryFormat::JImage),
            _ => Err(JavaError::InvalidClasspathEntry(path.to_path_buf())),
        }
    }
}

/// Resource path inside a JImage without its module: `java/util/List.class`
/// for `/java.base/java/util/List.class`. Names without a module segment
/// are returned unchanged.
fn module_relative(full_name: &str) -> &str {
    full_name
        .strip_prefix('/')
        .and_then(|rest| rest.split_once('/'))
        .map_or(full_name, |(_module, path)| path)
}

/// Package of a `.class` resource path, `None` for the default package,
/// member classes and `META-INF`.
fn class_package(path: &str) -> Option<String> {
    let stem = path.strip_suffix(".class")?;
    let (package, simple) = stem.rsplit_once('/')?;
    if simple.contains('$') || package.starts_with("META-INF") {
        return None;
    }
    Some(package.replace('/', "."))
}

fn jimage_error(e: ristretto_jimage::Error) -> JavaError {
    JavaError::JImage(format!("{e:?}"))
}

/// Class files of one JImage, keyed by their path below the module.
#[derive(Debug, Default)]
struct JImageIndex {
    classes: HashMap<String, String>,
}

impl JImageIndex {
    fn build(image: &Image) -> Self {
        let mut index = Self::default();
        for resource in image.iter().flatten() {
            if resource.extension() == "class" {
                index.insert(resource.full_name());
            }
        }
        tracing::debug!("Indexed {} classes", index.classes.len());
        index
    }

    fn insert(&mut self, full_name: String) {
        let relative = module_relative(&full_name).to_string();
        // The first module providing a class wins
        self.classes.entry(relative).or_insert(full_name);
    }

    fn resource_name(&self, class_path: &str) -> Option<&str> {
        self.classes.get(class_path).map(String::as_str)
    }
}

enum ClasspathEntry {
    Zip {
        path: PathBuf,
        archive: Mutex<ZipArchive<File>>,
    },
    JImage {
        path: PathBuf,
        image: Image,
        index: OnceLock<JImageIndex>,
    },
    Directory(PathBuf),
}

impl ClasspathEntry {
    fn open(path: &Path) -> Result<Self> {
        let entry = match EntryFormat::detect(path)? {
            EntryFormat::Directory => ClasspathEntry::Directory(path.to_path_buf()),
            EntryFormat::JImage => ClasspathEntry::JImage {
                path: path.to_path_buf(),
                image: Image::from_file(path).map_err(jimage_error)?,
                index: OnceLock::new(),
            },
            EntryFormat::Zip => {
                ClasspathEntry::Zip {
                    path: path.to_path_buf(),
                    archive: Mutex::new(ZipArchive::new(File::open(path)?)?),
                }
            }
        };
        tracing::debug!("Opened classpath entry {}", path.display());
        Ok(entry)
    }

    fn read_class(&self, class_path: &str) -> Result<Option<Vec<u8>>> {
        match self {
            ClasspathEntry::Zip { archive, .. } => {
                let mut archive = archive.lock().unwrap_or_else(PoisonError::into_inner);
                match archive.by_name(class_path) {
                    Ok(mut entry) => {
                        let mut bytes = Vec::new();
                        entry.read_to_end(&mut bytes)?;
                        Ok(Some(bytes))
                    }
                    Err(ZipError::FileNotFound) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            }
            ClasspathEntry::Directory(root) => {
                let file = root.join(class_path);
                if file.is_file() {
                    Ok(Some(std::fs::read(file)?))
                } else {
                    Ok(None)
                }
            }
            ClasspathEntry::JImage { image, index, .. } => {
                let index = index.get_or_init(|| JImageIndex::build(image));
                match index.resource_name(class_path) {
                    Some(name) => {
                        let resource = image.get_resource(name).map_err(jimage_error)?;
                        Ok(Some(resource.data().to_vec()))
                    }
                    None => Ok(None),
                }
            }
        }
    }

    fn path(&self) -> &Path {
        match self {
            ClasspathEntry::Zip { path, .. } => path,
            ClasspathEntry::JImage { path, .. } | ClasspathEntry::Directory(path) => path,
        }
    }
}

/// A classpath made of jar files, class directories and JImage files,
/// searched in order. Lookups, misses included, are memoised.
pub struct ArchiveClasspath {
    entries: Vec<ClasspathEntry>,
    cache: DashMap<String, Option<Arc<ClassSymbol>>>,
}

impl ArchiveClasspath {
    /// Opens every entry. Entries that do not exist or have an unknown
    /// format are skipped with a warning.
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let entries = paths
            .into_iter()
            .filter_map(|p| match ClasspathEntry::open(p.as_ref()) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(
                        "Skipping classpath entry {}: {}",
                        p.as_ref().display(),
                        e
                    );
                    None
                }
            })
            .collect();

        Self {
            entries,
            cache: DashMap::new(),
        }
    }

    pub fn from_config(config: &ClasspathConfig) -> Self {
        Self::new(config.resolved_entries())
    }

    pub fn entry_paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(ClasspathEntry::path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find(&self, binary_name: &str) -> Result<Option<Arc<ClassSymbol>>> {
        let class_path = binary_name.replace('.', "/") + ".class";
        for entry in &self.entries {
            if let Some(bytes) = entry.read_class(&class_path)? {
                tracing::trace!("Found {} in {}", binary_name, entry.path().display());
                return class_from_bytes(binary_name, bytes).map(|c| Some(Arc::new(c)));
            }
        }
        Ok(None)
    }

    /// Lists the packages a single classpath entry provides, sorted.
    pub fn packages(path: &Path) -> Result<Vec<String>> {
        let packages = match EntryFormat::detect(path)? {
            EntryFormat::Zip => Self::packages_from_zip(&mut ZipArchive::new(File::open(path)?)?)?,
            EntryFormat::JImage => {
                Self::packages_from_jimage(&Image::from_file(path).map_err(jimage_error)?)
            }
            EntryFormat::Directory => Self::packages_from_directory(path),
        };

        let mut result: Vec<String> = packages.into_iter().collect();
        result.sort();
        Ok(result)
    }

    fn packages_from_zip(archive: &mut ZipArchive<File>) -> Result<HashSet<String>> {
        let mut packages = HashSet::new();
        for i in 0..archive.len() {
            if let Some(package) = class_package(archive.by_index(i)?.name()) {
                packages.insert(package);
            }
        }
        Ok(packages)
    }

    fn packages_from_jimage(image: &Image) -> HashSet<String> {
        image
            .iter()
            .flatten()
            .filter_map(|resource| class_package(module_relative(&resource.full_name())))
            .collect()
    }

    fn packages_from_directory(root: &Path) -> HashSet<String> {
        WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.file_type().is_file()
                    && e.path().extension().is_some_and(|ext| ext == "class")
                    && !e.file_name().to_string_lossy().contains('$')
            })
            .filter_map(|e| {
                let parent = e.path().parent()?.strip_prefix(root).ok()?;
                let package = parent
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join(".");
                (!package.is_empty()).then_some(package)
            })
            .collect()
    }
}

impl ClasspathLoader for ArchiveClasspath {
    fn load_binary(&self, binary_name: &str) -> Result<Option<Arc<ClassSymbol>>> {
        if let Some(cached) = self.cache.get(binary_name) {
            tracing::trace!("Cache hit for {}", binary_name);
            return Ok(cached.clone());
        }

        let found = self.find(binary_name)?;
        self.cache.insert(binary_name.to_string(), found.clone());
        Ok(found)
    }
}
