/// Pattern parsing for page file segments
///
/// Maps one file or directory name (extension already stripped) to the route
/// segment it contributes. Same input, same output.

/// Kinds of file-name segment understood by the scanner
///
/// # Examples
///
/// ```
/// use routefold::route::pattern::{classify_segment, PatternSegmentType};
///
/// assert!(matches!(classify_segment("history"), PatternSegmentType::Static(_)));
/// assert!(matches!(classify_segment("[id]"), PatternSegmentType::Required(_)));
/// assert!(matches!(classify_segment("[[page]]"), PatternSegmentType::Optional(_)));
/// assert!(matches!(classify_segment("[...rest]"), PatternSegmentType::CatchAll(_)));
/// assert!(matches!(classify_segment("(auth)"), PatternSegmentType::Group(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegmentType {
    /// Catch-all segment: `[...slug]` or `[[...slug]]`
    CatchAll(String),
    /// Optional parameter: `[[id]]` or `[id?]`
    Optional(String),
    /// Required parameter: `[id]`
    Required(String),
    /// Route group `(name)`: organizes files without adding a segment
    Group(String),
    /// Static text segment
    Static(String),
}

impl PatternSegmentType {
    /// The route segment this contributes, `None` for groups
    ///
    /// ```
    /// use routefold::route::pattern::classify_segment;
    ///
    /// assert_eq!(classify_segment("[id]").to_route_segment().as_deref(), Some(":id"));
    /// assert_eq!(classify_segment("[...rest]").to_route_segment().as_deref(), Some(":rest(.*)*"));
    /// assert_eq!(classify_segment("(auth)").to_route_segment(), None);
    /// ```
    pub fn to_route_segment(&self) -> Option<String> {
        match self {
            PatternSegmentType::CatchAll(name) => Some(format!(":{}(.*)*", name)),
            PatternSegmentType::Optional(name) => Some(format!(":{}?", name)),
            PatternSegmentType::Required(name) => Some(format!(":{}", name)),
            PatternSegmentType::Group(_) => None,
            PatternSegmentType::Static(text) => Some(text.clone()),
        }
    }
}

/// Classifies a segment into a pattern type
///
/// # Parsing Rules (evaluated in order)
///
/// 1. **Group**: `(name)`
/// 2. **Double brackets**: `[[...name]]` is a catch-all, `[[name]]` optional
/// 3. **Catch-all**: `[...name]`
/// 4. **Optional param**: `[name?]`
/// 5. **Required param**: `[name]`
/// 6. **Static**: anything else, including unbalanced brackets
pub fn classify_segment(segment: &str) -> PatternSegmentType {
    if let Some(inner) = segment.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        return PatternSegmentType::Group(inner.to_string());
    }

    if let Some(inner) = segment.strip_prefix("[[").and_then(|s| s.strip_suffix("]]")) {
        return match inner.strip_prefix("...") {
            Some(name) => PatternSegmentType::CatchAll(name.to_string()),
            None => PatternSegmentType::Optional(inner.to_string()),
        };
    }

    match segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        Some(inner) => {
            if let Some(name) = inner.strip_prefix("...") {
                return PatternSegmentType::CatchAll(name.to_string());
            }

            if let Some(name) = inner.strip_suffix('?') {
                return PatternSegmentType::Optional(name.to_string());
            }

            PatternSegmentType::Required(inner.to_string())
        }
        None => PatternSegmentType::Static(segment.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_static() {
        assert_eq!(classify_segment("about"), PatternSegmentType::Static("about".to_string()));
        assert_eq!(classify_segment("SystemMonitoring"), PatternSegmentType::Static("SystemMonitoring".to_string()));
    }

    #[test]
    fn test_classify_required() {
        assert_eq!(classify_segment("[id]"), PatternSegmentType::Required("id".to_string()));
    }

    #[test]
    fn test_classify_optional() {
        assert_eq!(classify_segment("[id?]"), PatternSegmentType::Optional("id".to_string()));
        assert_eq!(classify_segment("[[id]]"), PatternSegmentType::Optional("id".to_string()));
    }

    #[test]
    fn test_classify_catch_all() {
        assert_eq!(classify_segment("[...slug]"), PatternSegmentType::CatchAll("slug".to_string()));
        assert_eq!(classify_segment("[[...slug]]"), PatternSegmentType::CatchAll("slug".to_string()));
    }

    #[test]
    fn test_classify_group() {
        assert_eq!(classify_segment("(auth)"), PatternSegmentType::Group("auth".to_string()));
    }

    #[test]
    fn test_unbalanced_brackets_are_static() {
        assert_eq!(classify_segment("[id"), PatternSegmentType::Static("[id".to_string()));
        assert_eq!(classify_segment("(x"), PatternSegmentType::Static("(x".to_string()));
    }

    #[test]
    fn test_route_segments() {
        assert_eq!(classify_segment("[[id]]").to_route_segment().as_deref(), Some(":id?"));
        assert_eq!(classify_segment("stats").to_route_segment().as_deref(), Some("stats"));
    }
}
