//=========================================================================
// Resource Manager
//=========================================================================
//
// Name-keyed cache of decoded textures.
//
// Architecture:
//   load_texture(path, name?) → image::open → RGBA Surface → Texture
//                                                   ↓
//                           HashMap<String, Texture> (last write wins)
//
//   load_resources_from_folder(dir) → recursive walk → load_texture(...)
//                                     (png / jpg / jpeg / gif / bmp)
//
// Relative paths are resolved against the manager's root directory.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::math::{Color, Vec2};
use super::surface::Surface;

//=== Constants ===========================================================

/// File extensions (lowercase, without dot) picked up by folder loads.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

//=== AssetError ==========================================================

/// Failure while loading an asset from disk.
#[derive(Debug)]
pub enum AssetError {
    /// File or directory could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File was read but is not a decodable image.
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

impl AssetError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Decode { path, .. } => path,
        }
    }
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "I/O error on {}: {}", path.display(), source),
            Self::Decode { path, source } => {
                write!(f, "Failed to decode {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
        }
    }
}

//=== LoadPolicy / LoadReport =============================================

/// What a folder load does when one file fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Stop at the first failure and return its error.
    #[default]
    Abort,

    /// Log the failure, remember the path, and keep going.
    Skip,
}

/// Summary of a folder load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Names inserted into the cache, in load order.
    pub loaded: Vec<String>,

    /// Files that failed under [`LoadPolicy::Skip`].
    pub failed: Vec<(PathBuf, AssetError)>,
}

//=== TextureId ===========================================================

/// Process-unique texture identifier, fresh for every load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(u64);

impl TextureId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== Texture =============================================================

/// Decoded image owned by the [`ResourceManager`].
///
/// Immutable once loaded; `clone()` is an explicit deep copy (same id).
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    id: TextureId,
    name: String,
    path: PathBuf,
    surface: Surface,
}

impl Texture {
    pub fn id(&self) -> TextureId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn size(&self) -> Vec2 {
        self.surface.size()
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }
}

impl fmt::Display for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Texture({}, {}x{})", self.name, self.width(), self.height())
    }
}

//=== ResourceManager =====================================================

/// Cache of loaded textures keyed by name.
#[derive(Debug)]
pub struct ResourceManager {
    root: PathBuf,
    policy: LoadPolicy,
    textures: HashMap<String, Texture>,
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceManager {
    //--- Construction -----------------------------------------------------

    /// Creates an empty manager rooted at the working directory.
    pub fn new() -> Self {
        Self::with_root(".")
    }

    /// Creates an empty manager resolving relative paths against `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            policy: LoadPolicy::default(),
            textures: HashMap::new(),
        }
    }

    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }

    //--- Configuration ----------------------------------------------------

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn policy(&self) -> LoadPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: LoadPolicy) {
        self.policy = policy;
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    //--- Loading ----------------------------------------------------------

    /// Decodes the image at `path` and caches it.
    ///
    /// The cache key is `name`, or the file stem when `name` is `None`.
    /// An existing entry with the same key is replaced.
    pub fn load_texture(
        &mut self,
        path: impl AsRef<Path>,
        name: Option<&str>,
    ) -> Result<&Texture, AssetError> {
        let path = self.resolve(path.as_ref());
        self.load_resolved(path, name)
    }

    /// Loads a texture from an already resolved path.
    fn load_resolved(&mut self, path: PathBuf, name: Option<&str>) -> Result<&Texture, AssetError> {
        let surface = decode_rgba(&path)?;

        let name = match name {
            Some(n) => n.to_string(),
            None => name_from_path(&path),
        };

        trace!(
            "Loaded texture {:<10} {:>9} {}",
            name,
            format!("{}x{}", surface.width(), surface.height()),
            path.display()
        );

        let texture = Texture {
            id: TextureId::next(),
            name: name.clone(),
            path,
            surface,
        };

        if let Some(old) = self.textures.insert(name.clone(), texture) {
            debug!("Texture '{}' replaced ({} from {})", name, old.id, old.path.display());
        }

        // The entry was inserted right above.
        Ok(&self.textures[&name])
    }

    /// Recursively loads every image under `path`, named by file stem.
    ///
    /// Failure handling follows the manager's [`LoadPolicy`].
    pub fn load_resources_from_folder(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<LoadReport, AssetError> {
        let dir = self.resolve(path.as_ref());
        let mut files = Vec::new();
        collect_images(&dir, &mut files)?;

        let mut report = LoadReport::default();
        for file in files {
            let name = name_from_path(&file);
            match self.load_resolved(file.clone(), Some(&name)) {
                Ok(_) => report.loaded.push(name),
                Err(e) => match self.policy {
                    LoadPolicy::Abort => return Err(e),
                    LoadPolicy::Skip => {
                        warn!("Skipping {}: {}", file.display(), e);
                        report.failed.push((file, e));
                    }
                },
            }
        }

        info!(
            "Loaded {} texture(s) from {} ({} skipped)",
            report.loaded.len(),
            dir.display(),
            report.failed.len()
        );
        Ok(report)
    }

    //--- Queries ----------------------------------------------------------

    pub fn get_texture(&self, name: &str) -> Option<&Texture> {
        self.textures.get(name)
    }

    pub fn get_texture_by_id(&self, id: TextureId) -> Option<&Texture> {
        self.textures.values().find(|t| t.id == id)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.textures.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Cached names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.textures.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

//=== Helpers =============================================================

fn decode_rgba(path: &Path) -> Result<Surface, AssetError> {
    let bytes = fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let image = image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let pixels = rgba
        .pixels()
        .map(|p| Color::rgba(p[0], p[1], p[2], p[3]))
        .collect();

    // `to_rgba8` always yields width * height pixels.
    Ok(Surface::from_pixels(width, height, pixels).unwrap_or_else(|| Surface::new(width, height)))
}

fn name_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Depth-first walk; entries are sorted per directory for stable order.
///
/// Symlinked directories are not entered, so link cycles cannot loop.
/// Symlinked image files are still loaded.
fn collect_images(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), AssetError> {
    let io_err = |source| AssetError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let file_type = entry.file_type().map_err(io_err)?;
        entries.push((entry.path(), file_type));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    for (path, file_type) in entries {
        if file_type.is_dir() {
            collect_images(&path, out)?;
        } else if file_type.is_symlink() {
            if path.is_file() && is_image(&path) {
                out.push(path);
            } else {
                trace!("Not following symlink {}", path.display());
            }
        } else if is_image(&path) {
            out.push(path);
        }
    }
    Ok(())
}

//=========================================================================
// Unit Tests
//=========================================================================
