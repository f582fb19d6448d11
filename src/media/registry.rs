use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::foundation::math::Fnv1a64;

/// Session-owned mapping from opaque media tokens to local file paths.
///
/// Clips and overlays refer to media by locator only
/// (`http://localhost:<port>/media/<token>`); the file server resolves the
/// token back to a path through [`MediaRegistry::lookup`].
#[derive(Clone, Debug)]
pub struct MediaRegistry {
    port: u16,
    seed: u64,
    counter: u64,
    by_token: BTreeMap<String, PathBuf>,
    by_path: BTreeMap<PathBuf, String>,
}

impl MediaRegistry {
    /// Path prefix under which the file server serves tokens.
    pub const ROUTE: &'static str = "/media/";

    /// Empty registry for a file server on `port`. `seed` makes tokens unguessable.
    pub fn new(port: u16, seed: u64) -> Self {
        Self {
            port,
            seed,
            counter: 0,
            by_token: BTreeMap::new(),
            by_path: BTreeMap::new(),
        }
    }

    /// Port written into every locator.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Register `path` and return its locator. Registering the same path again
    /// returns the locator handed out the first time.
    pub fn register(&mut self, path: impl AsRef<Path>) -> String {
        let path = path.as_ref();
        if let Some(token) = self.by_path.get(path) {
            return self.locator(token);
        }

        let mut token = self.mint_token(path);
        while self.by_token.contains_key(&token) {
            token = self.mint_token(path);
        }
        self.by_token.insert(token.clone(), path.to_path_buf());
        self.by_path.insert(path.to_path_buf(), token.clone());
        tracing::debug!(path = %path.display(), %token, "registered media");
        self.locator(&token)
    }

    /// Local path for a bare token.
    pub fn lookup(&self, token: &str) -> Option<&Path> {
        self.by_token.get(token).map(PathBuf::as_path)
    }

    /// Resolve a full locator produced by [`MediaRegistry::register`].
    pub fn resolve_locator(&self, locator: &str) -> Option<&Path> {
        let (_, token) = locator.split_once(Self::ROUTE)?;
        self.lookup(token)
    }

    /// Forget every registration. Locators handed out earlier stop resolving.
    pub fn teardown(&mut self) {
        tracing::debug!(entries = self.by_token.len(), "media registry teardown");
        self.by_token.clear();
        self.by_path.clear();
    }

    /// Number of registered files.
    pub fn len(&self) -> usize {
        self.by_token.len()
    }

    /// `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.by_token.is_empty()
    }

    fn locator(&self, token: &str) -> String {
        format!("http://localhost:{}{}{token}", self.port, Self::ROUTE)
    }

    // 128 bits from two FNV streams over (seed, counter, path).
    fn mint_token(&mut self, path: &Path) -> String {
        self.counter += 1;
        let bytes = path.to_string_lossy();
        let mut hi = Fnv1a64::new(self.seed);
        hi.write_u64(self.counter);
        hi.write_bytes(bytes.as_bytes());
        let mut lo = Fnv1a64::new(self.seed.rotate_left(32) ^ 0x9e37_79b9_7f4a_7c15);
        lo.write_bytes(bytes.as_bytes());
        lo.write_u64(self.counter);
        format!("{:016x}{:016x}", hi.finish(), lo.finish())
    }
}

/// Content type served for `path`, by extension.
pub fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        Some("mkv") => "video/x-matroska",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Inclusive byte range requested through an HTTP `Range` header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte.
    pub start: u64,
    /// Last byte, inclusive.
    pub end: u64,
}

impl ByteRange {
    /// Parse `bytes=<start>-[<end>]` against a file of `size` bytes.
    ///
    /// A missing end means "to the last byte". Returns `None` for malformed or
    /// unsatisfiable ranges.
    pub fn parse(header: &str, size: u64) -> Option<Self> {
        let range = header.trim().strip_prefix("bytes=")?;
        let (start, end) = range.split_once('-')?;
        let start: u64 = start.trim().parse().ok()?;
        let last = size.checked_sub(1)?;
        let end = match end.trim() {
            "" => last,
            e => e.parse::<u64>().ok()?.min(last),
        };
        (start <= end).then_some(Self { start, end })
    }

    /// Number of bytes in the range.
    pub fn byte_len(self) -> u64 {
        self.end - self.start + 1
    }

    /// `Content-Range` header value.
    pub fn content_range(self, size: u64) -> String {
        format!("bytes {}-{}/{size}", self.start, self.end)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/registry.rs"]
mod tests;
