use super::*;
use crate::dedup::DuplicateSet;
use crate::image::ImageSpec;

const REGISTRY: &str = "registry.example.com";
const NAMESPACE: &str = "mirror";

fn plan_for(line: &str, all_lines: &[&str]) -> CopyPlan {
    let specs: Vec<ImageSpec> = all_lines
        .iter()
        .map(|l| ImageSpec::parse(l).unwrap())
        .collect();
    let duplicates = DuplicateSet::detect(&specs);
    let spec = ImageSpec::parse(line).unwrap();
    CopyPlan::build(&spec, &duplicates, REGISTRY, NAMESPACE)
}

#[test]
fn test_duplicate_names_get_namespace_prefixes() {
    let lines = ["library/nginx:latest", "otherorg/nginx:latest"];
    let first = plan_for(lines[0], &lines);
    let second = plan_for(lines[1], &lines);
    assert_eq!(
        first.destination,
        "docker://registry.example.com/mirror/library_nginx:latest"
    );
    assert_eq!(
        second.destination,
        "docker://registry.example.com/mirror/otherorg_nginx:latest"
    );
}

#[test]
fn test_unique_name_has_no_prefix() {
    let lines = ["library/nginx:latest", "library/redis:7"];
    let plan = plan_for("library/redis:7", &lines);
    assert_eq!(
        plan.destination,
        "docker://registry.example.com/mirror/redis:7"
    );
}

#[test]
fn test_platform_adds_override_flags_and_suffix() {
    let lines = ["--platform linux/arm64 alpine:3.19"];
    let plan = plan_for(lines[0], &lines);
    assert_eq!(
        plan.destination,
        "docker://registry.example.com/mirror/alpine:3.19-linux-arm64"
    );
    assert_eq!(
        plan.command,
        vec![
            "copy",
            "--override-os",
            "linux",
            "--override-arch",
            "arm64",
            "docker://alpine:3.19",
            "docker://registry.example.com/mirror/alpine:3.19-linux-arm64",
        ]
    );
}

#[test]
fn test_variant_platform_overrides_arch_without_variant() {
    let lines = ["--platform linux/arm/v7 alpine:3.19"];
    let plan = plan_for(lines[0], &lines);
    // The override flag carries only the arch; the variant shows up in
    // the destination suffix.
    let arch_flag = plan
        .command
        .iter()
        .position(|arg| arg == "--override-arch")
        .unwrap();
    assert_eq!(plan.command[arch_flag + 1], "arm");
    assert_eq!(
        plan.destination,
        "docker://registry.example.com/mirror/alpine:3.19-linux-arm-v7"
    );
}

#[test]
fn test_command_without_platform_has_no_override_flags() {
    let lines = ["library/nginx:latest"];
    let plan = plan_for(lines[0], &lines);
    assert_eq!(
        plan.command,
        vec![
            "copy",
            "docker://library/nginx:latest",
            "docker://registry.example.com/mirror/nginx:latest",
        ]
    );
}

#[test]
fn test_digest_preserved_on_source_stripped_from_destination() {
    let lines = ["ghcr.io/org/app:1.0@sha256:deadbeef"];
    let plan = plan_for(lines[0], &lines);
    assert_eq!(plan.source, "docker://ghcr.io/org/app:1.0@sha256:deadbeef");
    assert_eq!(
        plan.destination,
        "docker://registry.example.com/mirror/app:1.0"
    );
}

#[test]
fn test_duplicate_with_single_segment_keeps_bare_name() {
    // "alpine:3.19" conflicts with "library/alpine:3.19" but has no
    // namespace segment to borrow; the bare destination is kept.
    let lines = ["alpine:3.19", "library/alpine:3.19"];
    let bare = plan_for(lines[0], &lines);
    let namespaced = plan_for(lines[1], &lines);
    assert_eq!(
        bare.destination,
        "docker://registry.example.com/mirror/alpine:3.19"
    );
    assert_eq!(
        namespaced.destination,
        "docker://registry.example.com/mirror/library_alpine:3.19"
    );
}

#[test]
fn test_build_is_deterministic() {
    let lines = ["--platform linux/arm64 library/nginx:latest", "otherorg/nginx:latest"];
    let once = plan_for(lines[0], &lines);
    let twice = plan_for(lines[0], &lines);
    assert_eq!(once, twice);
}

#[test]
fn test_command_line_joins_arguments() {
    let lines = ["library/nginx:latest"];
    let plan = plan_for(lines[0], &lines);
    assert_eq!(
        plan.command_line(),
        "copy docker://library/nginx:latest docker://registry.example.com/mirror/nginx:latest"
    );
}
