/// Lazy iterator over a path and each of its ancestors
///
/// For path `/admin/users/edit`, yields: `/admin/users/edit` → `/admin/users` → `/admin` → `/`
///
/// Borrows slices of the input; never allocates.
///
/// # Examples
///
/// ```
/// use routefold::path::PathHierarchy;
///
/// let nearest = PathHierarchy::new("/templates/missing")
///     .skip(1)
///     .find(|p| *p == "/templates");
/// assert_eq!(nearest, Some("/templates"));
/// ```
#[derive(Debug, Clone)]
pub struct PathHierarchy<'a> {
    current: Option<&'a str>,
}

impl<'a> PathHierarchy<'a> {
    /// Starts the walk at `path` itself
    pub fn new(path: &'a str) -> Self {
        Self {
            current: Some(path),
        }
    }
}

impl<'a> Iterator for PathHierarchy<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;

        self.current = if current == "/" {
            None
        } else {
            match current.rfind('/') {
                Some(0) => Some("/"),
                Some(slash_pos) => Some(&current[..slash_pos]),
                None => None,
            }
        };

        Some(current)
    }
}
