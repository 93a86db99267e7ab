//! String clean-ups applied to raw element text before it lands in a record.

pub const NBSP: char = '\u{a0}';

pub fn strip_newlines(text: &str) -> String {
    text.replace('\n', "")
}

pub fn newlines_to_spaces(text: &str) -> String {
    text.replace('\n', " ")
}

/// Removes non-overlapping pairs of spaces, which is what the page indentation leaves
/// behind once newlines are gone.
pub fn drop_double_spaces(text: &str) -> String {
    text.replace("  ", "")
}

pub fn strip_nbsp(text: &str) -> String {
    text.chars().filter(|c| *c != NBSP).collect()
}

/// Splits on literal three-space runs. Longer runs leave empty segments in between,
/// so segment positions depend on the exact indentation of the block.
pub fn split_space_runs(text: &str) -> Vec<&str> {
    text.split("   ").collect()
}

/// Last non-empty path segment of `link` with `prefix` stripped, e.g. `jobs-kyiv-it` → `it`
/// for the prefix `jobs-kyiv-`.
pub fn slug_from_link(link: &str, prefix: &str) -> Option<String> {
    let url = url::Url::parse(link).ok()?;
    let segment = url.path_segments()?.filter(|s| !s.is_empty()).last()?;
    segment
        .strip_prefix(prefix)
        .filter(|slug| !slug.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_spaces_collapse_pairwise() {
        assert_eq!(drop_double_spaces("    Python Developer   "), "Python Developer ");
    }

    #[test]
    fn space_runs_keep_empty_segments() {
        assert_eq!(split_space_runs("a      b"), vec!["a", "", "b"]);
        assert_eq!(split_space_runs("   x"), vec!["", "x"]);
    }

    #[test]
    fn nbsp_is_removed() {
        assert_eq!(strip_nbsp("50\u{a0}000"), "50000");
    }

    #[test]
    fn slug_is_taken_from_last_segment() {
        assert_eq!(
            slug_from_link("https://www.work.ua/jobs-kyiv/", "jobs-").as_deref(),
            Some("kyiv")
        );
        assert_eq!(
            slug_from_link("https://www.work.ua/jobs-kyiv-it/", "jobs-kyiv-").as_deref(),
            Some("it")
        );
        assert_eq!(slug_from_link("https://www.work.ua/jobs/", "jobs-"), None);
        assert_eq!(slug_from_link("not a url", "jobs-"), None);
    }
}
