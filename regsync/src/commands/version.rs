/// Get the version string for regsync and libregsync
pub fn get_version_string() -> String {
    format!(
        "regsync {}\nlibregsync {}",
        env!("CARGO_PKG_VERSION"),
        libregsync::version()
    )
}

/// Print version information to stdout
pub fn print_version() {
    println!("{}", get_version_string());
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
