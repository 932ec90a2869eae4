/// Derives tags for a route that declares none, from its path segments.
///
/// Supplied by the framework integration via
/// [`DocumentGenerator::with_tag_inference`](super::DocumentGenerator::with_tag_inference).
pub type TagInference = dyn Fn(&[&str]) -> Vec<String> + Send + Sync;

fn is_template(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}')
}

/// Tag a route with its first literal path segment.
///
/// `/math/{operation}` is tagged `math`; `/{id}` gets no tag.
pub fn first_path_segment(segments: &[&str]) -> Vec<String> {
    segments
        .iter()
        .find(|s| !is_template(s))
        .map(|s| vec![(*s).to_string()])
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_path_segment() {
        assert_eq!(first_path_segment(&["math", "{operation}"]), vec!["math"]);
        assert_eq!(first_path_segment(&["{tenant}", "users"]), vec!["users"]);
        assert!(first_path_segment(&["{id}"]).is_empty());
        assert!(first_path_segment(&[]).is_empty());
    }
}
