//! Attachment-filename slug for job titles.
//!
//! The rendered video is returned to the caller with a suggested filename
//! derived from the job title: ASCII letters, digits, and hyphens survive,
//! whitespace runs become single hyphens, everything else is dropped. Case
//! is preserved. An empty result falls back to `"video"`.

/// Slugify a job title for use in a `Content-Disposition` filename.
pub fn title_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.trim().chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else if ch.is_whitespace() {
            pending_hyphen = true;
        }
        // Every other character (punctuation, non-ASCII) is dropped.
    }

    if slug.is_empty() {
        "video".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_become_hyphens() {
        assert_eq!(title_slug("One Piece Chapter 1044"), "One-Piece-Chapter-1044");
    }

    #[test]
    fn case_is_preserved() {
        assert_eq!(title_slug("ReZero"), "ReZero");
    }

    #[test]
    fn punctuation_is_dropped() {
        assert_eq!(title_slug("Attack!! (on) Titan?"), "Attack-on-Titan");
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(title_slug("a \t  b"), "a-b");
    }

    #[test]
    fn existing_hyphens_survive() {
        assert_eq!(title_slug("Spy-x-Family"), "Spy-x-Family");
    }

    #[test]
    fn empty_title_falls_back() {
        assert_eq!(title_slug(""), "video");
        assert_eq!(title_slug("   "), "video");
        assert_eq!(title_slug("!!!"), "video");
    }

    #[test]
    fn non_ascii_is_filtered() {
        assert_eq!(title_slug("Truyện tranh 12"), "Truyn-tranh-12");
    }
}
