//! Content-Security-Policy header value parser.
//!
//! Splits a raw header value into an ordered directive map. Directive names
//! are lower-cased on ingestion; values and source tokens stay verbatim.

/// Ordered mapping from lower-cased directive name to raw value string.
///
/// Insertion order is the order of first appearance. A directive repeated
/// within one header overwrites the earlier value in place — inherited
/// last-value-wins behavior, kept for output parity even though real CSP
/// engines honor the first occurrence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectiveMap {
    entries: Vec<(String, String)>,
}

impl DirectiveMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, name: String, value: String) {
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Look up a directive's raw value. `name` must already be lower-case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Script source list the browser would consult: `script-src`, falling
    /// back to `default-src`, falling back to empty.
    pub fn effective_script_src(&self) -> &str {
        self.get("script-src")
            .or_else(|| self.get("default-src"))
            .unwrap_or("")
    }
}

/// Parse one raw CSP header value into a [`DirectiveMap`].
///
/// An empty input yields an empty map rather than an error; unknown or
/// custom directive names still produce entries and are categorized as
/// `other` downstream. A segment without a space is a valueless directive
/// (e.g. `upgrade-insecure-requests`) and maps to an empty string.
pub fn parse_policy(raw: &str) -> DirectiveMap {
    let mut map = DirectiveMap::new();

    for segment in raw.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        match segment.split_once(' ') {
            Some((name, value)) => {
                map.insert(name.to_lowercase(), value.trim().to_string());
            }
            None => {
                map.insert(segment.to_lowercase(), String::new());
            }
        }
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_map() {
        assert!(parse_policy("").is_empty());
        assert!(parse_policy("   ;  ; ").is_empty());
    }

    #[test]
    fn directive_names_are_lower_cased() {
        let upper = parse_policy("Default-Src 'self'");
        let lower = parse_policy("default-src 'self'");

        assert_eq!(upper, lower);
        assert_eq!(upper.get("default-src"), Some("'self'"));
    }

    #[test]
    fn reparsing_is_deterministic() {
        let raw = "default-src 'self'; script-src 'self' cdn.example.com; base-uri 'self'";
        assert_eq!(parse_policy(raw), parse_policy(raw));
    }

    #[test]
    fn valueless_directive_maps_to_empty_string() {
        let map = parse_policy("upgrade-insecure-requests; default-src 'self'");
        assert_eq!(map.get("upgrade-insecure-requests"), Some(""));
    }

    #[test]
    fn repeated_directive_last_value_wins_in_place() {
        let map = parse_policy("script-src 'self'; img-src *; script-src 'none'");

        assert_eq!(map.get("script-src"), Some("'none'"));
        // First-appearance position is kept.
        let names: Vec<&str> = map.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["script-src", "img-src"]);
    }

    #[test]
    fn unknown_directives_still_produce_entries() {
        let map = parse_policy("x-custom-directive foo bar");
        assert_eq!(map.get("x-custom-directive"), Some("foo bar"));
    }

    #[test]
    fn value_is_trimmed_but_verbatim() {
        let map = parse_policy("script-src   'self'  https://CDN.Example.com ");
        assert_eq!(map.get("script-src"), Some("'self'  https://CDN.Example.com"));
    }

    #[test]
    fn effective_script_src_fallback_chain() {
        assert_eq!(
            parse_policy("script-src 'self'; default-src 'none'").effective_script_src(),
            "'self'"
        );
        assert_eq!(
            parse_policy("default-src 'none'").effective_script_src(),
            "'none'"
        );
        assert_eq!(parse_policy("img-src *").effective_script_src(), "");
    }
}
