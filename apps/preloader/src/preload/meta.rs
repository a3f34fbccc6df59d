/// Generator meta tag identifying this preloader in rendered pages.
///
/// Uses the package name since it never changes between releases.
pub fn generator_meta_tag() -> String {
    format!(
        "<meta name=\"generator\" content=\"{} {}\">\n",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_meta_tag() {
        assert_eq!(
            generator_meta_tag(),
            "<meta name=\"generator\" content=\"lcp-background-image-preloader 0.1.0\">\n"
        );
    }
}
