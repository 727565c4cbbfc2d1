use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::decode::{PreparedImage, decode_any, default_pointer};
use crate::foundation::error::{WheelError, WheelResult};

/// Reference to an image asset.
///
/// JSON form is `{"path": "avatar.png"}` or `{"url": "https://..."}`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetRef {
    /// Filesystem path; relative paths resolve against the loader root.
    Path(PathBuf),
    /// Remote location. Fetching is delegated to a caller-provided [`AssetLoader`].
    Url(String),
    /// Encoded bytes already in memory.
    #[serde(skip)]
    Bytes(Arc<Vec<u8>>),
}

impl AssetRef {
    /// Wrap encoded image bytes.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(Arc::new(bytes.into()))
    }

    fn describe(&self) -> String {
        match self {
            Self::Path(p) => p.display().to_string(),
            Self::Url(u) => u.clone(),
            Self::Bytes(b) => format!("<{} inline bytes>", b.len()),
        }
    }
}

/// Fetches the encoded bytes behind an [`AssetRef`].
///
/// Implementations must be shareable across threads: avatar and pointer loads run concurrently.
pub trait AssetLoader: Send + Sync {
    /// Return the encoded bytes for `asset`.
    fn load(&self, asset: &AssetRef) -> WheelResult<Vec<u8>>;
}

/// Loader for filesystem paths and inline bytes.
#[derive(Clone, Debug, Default)]
pub struct FsAssetLoader {
    root: PathBuf,
}

impl FsAssetLoader {
    /// Resolve relative paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory relative paths are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetLoader for FsAssetLoader {
    fn load(&self, asset: &AssetRef) -> WheelResult<Vec<u8>> {
        match asset {
            AssetRef::Path(p) => {
                let path = if p.is_absolute() {
                    p.clone()
                } else {
                    self.root.join(p)
                };
                std::fs::read(&path).map_err(|e| {
                    WheelError::asset_load(format!("failed to read '{}': {e}", path.display()))
                })
            }
            AssetRef::Url(u) => Err(WheelError::asset_load(format!(
                "'{u}': the filesystem loader cannot fetch URLs; provide an AssetLoader that can"
            ))),
            AssetRef::Bytes(b) => Ok(b.as_ref().clone()),
        }
    }
}

/// Load and decode one image.
pub(crate) fn load_image(loader: &dyn AssetLoader, asset: &AssetRef) -> WheelResult<PreparedImage> {
    let bytes = loader.load(asset)?;
    decode_any(&bytes).map_err(|e| match e {
        WheelError::AssetLoad(msg) => {
            WheelError::asset_load(format!("'{}': {msg}", asset.describe()))
        }
        other => other,
    })
}

/// Load the avatar and pointer images concurrently; `None` selects the built-in pointer.
///
/// Both loads complete (or fail) before this returns.
#[tracing::instrument(level = "debug", skip_all)]
pub(crate) fn load_avatar_and_pointer(
    loader: &dyn AssetLoader,
    avatar: &AssetRef,
    pointer: Option<&AssetRef>,
) -> WheelResult<(PreparedImage, PreparedImage)> {
    let (avatar, pointer) = rayon::join(
        || load_image(loader, avatar),
        || match pointer {
            Some(p) => load_image(loader, p),
            None => default_pointer(),
        },
    );
    let (avatar, pointer) = (avatar?, pointer?);
    tracing::debug!(
        avatar_w = avatar.width,
        avatar_h = avatar.height,
        pointer_w = pointer.width,
        pointer_h = pointer.height,
        "loaded assets"
    );
    Ok((avatar, pointer))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
