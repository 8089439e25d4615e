//! Destination naming and command construction.
//!
//! Turns one parsed image line plus the duplicate set into the copy
//! source, the disambiguated destination, and the copy-tool argument
//! vector. Building a plan is pure and deterministic; a plan is built
//! once per task and never re-evaluated on retry, so the destination
//! cannot change between attempts.

use crate::dedup::DuplicateSet;
use crate::image::{ImageSpec, Platform};
use serde::Serialize;
use tracing::warn;

#[cfg(test)]
mod tests;

/// Source, destination and copy-tool arguments for one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyPlan {
    /// Copy source, `docker://` plus the full reference (digest included).
    pub source: String,
    /// Copy destination under the mirror registry and namespace.
    pub destination: String,
    /// Copy-tool arguments, without the binary name.
    pub command: Vec<String>,
}

impl CopyPlan {
    /// Builds the plan for one image.
    ///
    /// Duplicated basenames get a `<namespace>_` destination prefix taken
    /// from the segment before the final one. A parsed platform adds
    /// `--override-os`/`--override-arch` to the command and an
    /// `-<os>-<arch>[-<variant>]` suffix to the destination's final
    /// segment; the variant stays out of the override flags.
    ///
    /// # Examples
    ///
    /// ```
    /// use libregsync::{CopyPlan, DuplicateSet, ImageSpec};
    ///
    /// let spec = ImageSpec::parse("alpine:3.19").unwrap();
    /// let plan = CopyPlan::build(&spec, &DuplicateSet::default(), "registry.example.com", "mirror");
    /// assert_eq!(plan.source, "docker://alpine:3.19");
    /// assert_eq!(plan.destination, "docker://registry.example.com/mirror/alpine:3.19");
    /// ```
    pub fn build(
        spec: &ImageSpec,
        duplicates: &DuplicateSet,
        registry: &str,
        namespace: &str,
    ) -> Self {
        let prefix = if duplicates.is_duplicate(&spec.image_name) {
            if spec.segments.len() >= 2 {
                format!("{}_", spec.segments[spec.segments.len() - 2])
            } else {
                // A duplicated basename with a single-segment reference has
                // no namespace segment to borrow, so the destination keeps
                // its bare name and can still collide with a sibling.
                warn!(
                    image = %spec.image_name,
                    line = %spec.raw_line,
                    "duplicate image name has no namespace segment to disambiguate with"
                );
                String::new()
            }
        } else {
            String::new()
        };

        let suffix = spec
            .platform
            .as_ref()
            .map(Platform::suffix)
            .unwrap_or_default();

        let source = format!("docker://{}", spec.source_ref);
        let destination = format!(
            "docker://{}/{}/{}{}{}",
            registry, namespace, prefix, spec.name_and_tag, suffix
        );

        let mut command = vec!["copy".to_string()];
        if let Some(platform) = &spec.platform {
            command.push("--override-os".to_string());
            command.push(platform.os.clone());
            command.push("--override-arch".to_string());
            command.push(platform.arch.clone());
        }
        command.push(source.clone());
        command.push(destination.clone());

        Self {
            source,
            destination,
            command,
        }
    }

    /// The command as a single loggable line.
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }
}
