use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Loose email shape check used at signup: something@something.tld, no whitespace
    /// - Valid: "ada@campus.edu", "a.b@c.io"
    /// - Invalid: "ada", "ada@campus", "ada smith@campus.edu", "@campus.edu"
    pub static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_regex_valid() {
        assert!(EMAIL_REGEX.is_match("ada@campus.edu"));
        assert!(EMAIL_REGEX.is_match("a.b@c.io"));
        assert!(EMAIL_REGEX.is_match("first+tag@students.kennesaw.edu"));
    }

    #[test]
    fn test_email_regex_invalid() {
        assert!(!EMAIL_REGEX.is_match("ada"));
        assert!(!EMAIL_REGEX.is_match("ada@campus")); // no dot after @
        assert!(!EMAIL_REGEX.is_match("ada smith@campus.edu")); // whitespace
        assert!(!EMAIL_REGEX.is_match("@campus.edu")); // empty local part
        assert!(!EMAIL_REGEX.is_match("ada@@campus.edu"));
        assert!(!EMAIL_REGEX.is_match(""));
    }
}
