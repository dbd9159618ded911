//! Social-media field checks
//!
//! Each field accepts either a bare handle or a full platform URL. A value
//! containing the platform's domain must match that platform's URL pattern;
//! otherwise the handle pattern applies where the platform defines one.
//! Empty values never reach these checks.

use once_cell::sync::Lazy;
use regex::Regex;

static LINKEDIN_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(www\.)?linkedin\.com/(in|company)/[\w-]+/?$")
        .expect("Invalid LinkedIn regex pattern")
});

static WEBSITE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b([-a-zA-Z0-9()@:%_+.~#?&/=]*)$")
        .expect("Invalid website regex pattern")
});

static INSTAGRAM_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(www\.)?instagram\.com/[\w.-]+/?$")
        .expect("Invalid Instagram regex pattern")
});

static YOUTUBE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(www\.)?youtube\.com/(c|channel|@)/[\w-]+/?$")
        .expect("Invalid YouTube regex pattern")
});

static GITHUB_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(www\.)?github\.com/[\w-]+/?$")
        .expect("Invalid GitHub regex pattern")
});

static TWITTER_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(www\.)?(twitter|x)\.com/\w+/?$")
        .expect("Invalid Twitter regex pattern")
});

static HANDLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w-]+$").expect("Invalid handle regex pattern"));

static DOTTED_HANDLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.-]+$").expect("Invalid dotted handle regex pattern"));

static AT_HANDLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@[\w-]+$").expect("Invalid at-handle regex pattern"));

static TWITTER_HANDLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@?\w+$").expect("Invalid Twitter handle regex pattern"));

/// LinkedIn: URL form is checked, bare handles pass as-is
pub fn check_linkedin(value: &str) -> Option<String> {
    if value.contains("linkedin.com") && !LINKEDIN_URL.is_match(value) {
        return Some("Invalid LinkedIn URL format".to_string());
    }
    None
}

/// Website: always a full URL
pub fn check_website(value: &str) -> Option<String> {
    (!WEBSITE_URL.is_match(value)).then(|| "Invalid website URL format".to_string())
}

/// Instagram: full URL or dotted handle
pub fn check_instagram(value: &str) -> Option<String> {
    if value.contains("instagram.com") {
        (!INSTAGRAM_URL.is_match(value)).then(|| "Invalid Instagram URL format".to_string())
    } else {
        (!DOTTED_HANDLE.is_match(value)).then(|| "Invalid Instagram username format".to_string())
    }
}

/// YouTube: full URL or `@handle`; anything else passes unchecked
pub fn check_youtube(value: &str) -> Option<String> {
    if value.contains("youtube.com") {
        (!YOUTUBE_URL.is_match(value)).then(|| "Invalid YouTube URL format".to_string())
    } else if value.starts_with('@') {
        (!AT_HANDLE.is_match(value)).then(|| "Invalid YouTube handle format".to_string())
    } else {
        None
    }
}

/// GitHub: full URL or bare handle
pub fn check_github(value: &str) -> Option<String> {
    if value.contains("github.com") {
        (!GITHUB_URL.is_match(value)).then(|| "Invalid GitHub URL format".to_string())
    } else {
        (!HANDLE.is_match(value)).then(|| "Invalid GitHub username format".to_string())
    }
}

/// Twitter/X: full URL on either domain, or an optionally-@-prefixed handle
pub fn check_twitter(value: &str) -> Option<String> {
    if value.contains("twitter.com") || value.contains("x.com") {
        (!TWITTER_URL.is_match(value)).then(|| "Invalid Twitter/X URL format".to_string())
    } else {
        (!TWITTER_HANDLE.is_match(value)).then(|| "Invalid Twitter/X username format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linkedin_urls_and_handles() {
        assert!(check_linkedin("https://www.linkedin.com/in/jane-doe").is_none());
        assert!(check_linkedin("https://linkedin.com/company/acme").is_none());
        assert!(check_linkedin("https://linkedin.com/jane").is_some());
        // Bare handles are not pattern-checked for LinkedIn.
        assert!(check_linkedin("jane doe").is_none());
    }

    #[test]
    fn test_website_requires_url() {
        assert!(check_website("https://example.com").is_none());
        assert!(check_website("http://www.example.co.uk/path?q=1").is_none());
        assert!(check_website("example").is_some());
        assert!(check_website("ftp://example.com").is_some());
    }

    #[test]
    fn test_instagram_handle_or_url() {
        assert!(check_instagram("jane.doe").is_none());
        assert!(check_instagram("https://instagram.com/jane.doe").is_none());
        assert!(check_instagram("https://instagram.com/jane doe").is_some());
        assert!(check_instagram("jane doe").is_some());
    }

    #[test]
    fn test_youtube_at_handle() {
        assert!(check_youtube("@janedoe").is_none());
        assert!(check_youtube("@jane doe").is_some());
        assert!(check_youtube("https://www.youtube.com/c/jane-doe").is_none());
        assert!(check_youtube("https://youtube.com/jane").is_some());
        // Neither URL nor @-handle passes through unchecked.
        assert!(check_youtube("janedoe").is_none());
    }

    #[test]
    fn test_github_handle_or_url() {
        assert!(check_github("octocat").is_none());
        assert!(check_github("https://github.com/octocat").is_none());
        assert!(check_github("octo cat").is_some());
        assert!(check_github("https://github.com/octo/cat").is_some());
    }

    #[test]
    fn test_twitter_both_domains() {
        assert!(check_twitter("@jack").is_none());
        assert!(check_twitter("jack").is_none());
        assert!(check_twitter("https://twitter.com/jack").is_none());
        assert!(check_twitter("https://x.com/jack").is_none());
        assert!(check_twitter("https://x.com/jack/status/1").is_some());
        assert!(check_twitter("ja ck").is_some());
    }
}
