//! Image list parsing.
//!
//! One input line describes one image to mirror: an optional
//! `--platform <os>/<arch>` annotation plus an image reference, where the
//! reference may carry a tag or a digest. Parsing is pure; filtering of
//! blank and comment lines happens in [`load_lines`].

use crate::error::{Result, SyncError};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;


// Matches "--platform linux/arm64" and "--platform=linux/arm64".
static PLATFORM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"--platform(?:[ =])(\S+)").expect("platform pattern is valid"));

const DEFAULT_OS: &str = "linux";
const DEFAULT_ARCH: &str = "amd64";

/// An `os/arch[/variant]` triple restricting which variant of a
/// multi-arch image to copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub os: String,
    pub arch: String,
    /// Trailing variant component, e.g. `v7` in `linux/arm/v7`.
    pub variant: Option<String>,
}

impl Platform {
    /// Parses an `os/arch[/variant]` value, filling missing os and arch
    /// components with the `linux`/`amd64` defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use libregsync::Platform;
    ///
    /// let p = Platform::parse("linux/arm64");
    /// assert_eq!((p.os.as_str(), p.arch.as_str()), ("linux", "arm64"));
    /// assert_eq!(p.variant, None);
    ///
    /// // A value with no slash only names the os; the arch defaults.
    /// let p = Platform::parse("windows");
    /// assert_eq!((p.os.as_str(), p.arch.as_str()), ("windows", "amd64"));
    ///
    /// // Variant arches keep the arch itself clean.
    /// let p = Platform::parse("linux/arm/v7");
    /// assert_eq!(p.arch, "arm");
    /// assert_eq!(p.variant.as_deref(), Some("v7"));
    /// ```
    pub fn parse(value: &str) -> Self {
        let parts: Vec<&str> = value.split('/').collect();
        let os = parts
            .first()
            .copied()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_OS);
        let arch = parts
            .get(1)
            .copied()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_ARCH);
        let variant = (parts.len() > 2)
            .then(|| parts[2..].join("-"))
            .filter(|s| !s.is_empty());
        Self {
            os: os.to_string(),
            arch: arch.to_string(),
            variant,
        }
    }

    /// Destination suffix for this platform, e.g. `-linux-arm64` or
    /// `-linux-arm-v7`. Always a valid tag fragment.
    pub fn suffix(&self) -> String {
        match &self.variant {
            Some(variant) => format!("-{}-{}-{}", self.os, self.arch, variant),
            None => format!("-{}-{}", self.os, self.arch),
        }
    }
}

/// One parsed input line. Constructed once at parse time, immutable after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSpec {
    /// The original input line.
    pub raw_line: String,
    /// Platform annotation, if the line carried one.
    pub platform: Option<Platform>,
    /// The full source reference, digest included, used for the copy source.
    pub source_ref: String,
    /// The reference with any `@digest` qualifier stripped, used for naming.
    pub source_image: String,
    /// `/`-split components of `source_image`.
    pub segments: Vec<String>,
    /// Final path segment including the tag, e.g. `nginx:latest`.
    pub name_and_tag: String,
    /// Image basename, the final segment up to the first `:`.
    pub image_name: String,
    /// Namespace segment used for duplicate detection only.
    pub source_namespace: String,
}

impl ImageSpec {
    /// Parses one trimmed, non-comment input line.
    ///
    /// The last whitespace-delimited token is taken as the image
    /// reference; a `--platform` annotation may appear anywhere before it.
    ///
    /// # Examples
    ///
    /// ```
    /// use libregsync::ImageSpec;
    ///
    /// let spec = ImageSpec::parse("--platform=linux/arm64 library/nginx:latest").unwrap();
    /// assert_eq!(spec.image_name, "nginx");
    /// assert_eq!(spec.source_namespace, "library");
    /// assert!(spec.platform.is_some());
    /// ```
    pub fn parse(line: &str) -> Result<Self> {
        let raw_line = line.to_string();

        let platform = PLATFORM_RE
            .captures(line)
            .and_then(|c| c.get(1))
            .map(|m| Platform::parse(m.as_str()));

        let source_ref = line
            .split_whitespace()
            .last()
            .ok_or_else(|| SyncError::input("empty image line", None))?
            .to_string();

        // The digest stays on the copy source but never feeds naming.
        let source_image = source_ref
            .split('@')
            .next()
            .unwrap_or(source_ref.as_str())
            .to_string();

        let segments: Vec<String> = source_image.split('/').map(str::to_string).collect();
        let name_and_tag = segments
            .last()
            .cloned()
            .unwrap_or_else(|| source_image.clone());
        let image_name = name_and_tag
            .split(':')
            .next()
            .unwrap_or(name_and_tag.as_str())
            .to_string();

        let source_namespace = match segments.len() {
            0 => String::new(),
            1 => segments[0].clone(),
            n => segments[n - 2].clone(),
        };

        Ok(Self {
            raw_line,
            platform,
            source_ref,
            source_image,
            segments,
            name_and_tag,
            image_name,
            source_namespace,
        })
    }
}

/// Reads an image list file, dropping blank lines and `#` comments.
pub fn load_lines(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        SyncError::input(
            format!("images file not found or unreadable: {}: {}", path.display(), e),
            Some(path.display().to_string()),
        )
    })?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
