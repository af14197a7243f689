//! Line tokenizers for Gradle's `projects` and `dependencies` reports.
//!
//! Each function matches one line shape and returns the captured pieces, or
//! `None` when the line does not have that shape.

/// Characters Gradle uses to draw report trees.
const TREE_CHARS: &[char] = &['-', '+', '\\', '|', ' '];

/// Marker Gradle puts in front of first-party modules in a dependency tree.
const PROJECT_MARKER: &str = "project ";

/// One entry of a dependency tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyLine<'a> {
    /// Length of the tree-drawing prefix
    pub depth: usize,
    /// Module path (`:core`) or coordinates (`com.acme:lib:1.0`)
    pub name: &'a str,
    /// Whether the entry was marked as a first-party module
    pub is_project: bool,
}

fn is_tree_char(c: char) -> bool {
    TREE_CHARS.contains(&c)
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ':' | '.' | '_' | '-')
}

/// Matches `'<name>'` spanning the whole input, with a non-empty name that
/// contains no quote.
fn quoted_name(rest: &str) -> Option<&str> {
    let name = rest.strip_prefix('\'')?.strip_suffix('\'')?;
    if name.is_empty() || name.contains('\'') {
        return None;
    }
    Some(name)
}

/// Matches `Root project '<name>'`.
pub fn root_project_label(line: &str) -> Option<&str> {
    quoted_name(line.strip_prefix("Root project ")?)
}

/// Matches `Root project '<name>'` or `Project '<name>'`.
pub fn project_label(line: &str) -> Option<&str> {
    root_project_label(line).or_else(|| quoted_name(line.strip_prefix("Project ")?))
}

/// Matches a tree-drawing prefix followed by `Project '<name>'`.
pub fn nested_project_label(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches(is_tree_char);
    if rest.len() == line.len() {
        return None;
    }
    quoted_name(rest.strip_prefix("Project ")?)
}

/// Returns true if the line opens a dependency tree (`+---` or `\---`).
pub fn is_tree_start(line: &str) -> bool {
    line.starts_with("+---") || line.starts_with("\\---")
}

/// Matches a dependency tree entry.
///
/// The prefix is the longest run of tree-drawing characters. An optional
/// `project ` marker follows, then the identifier, which runs up to the
/// first character outside `[A-Za-z0-9:._-]`. Anything after the identifier
/// (`-> 1.2`, `(*)`, `(c)`) is ignored.
pub fn dependency_line(line: &str) -> Option<DependencyLine<'_>> {
    let rest = line.trim_start_matches(is_tree_char);
    let depth = line.len() - rest.len();
    if depth == 0 {
        return None;
    }

    if let Some(marked) = rest.strip_prefix(PROJECT_MARKER) {
        let name = identifier(marked);
        if !name.is_empty() {
            return Some(DependencyLine {
                depth,
                name,
                is_project: true,
            });
        }
    }

    let name = identifier(rest);
    if name.is_empty() {
        return None;
    }

    Some(DependencyLine {
        depth,
        name,
        is_project: false,
    })
}

fn identifier(input: &str) -> &str {
    let end = input
        .find(|c: char| !is_identifier_char(c))
        .unwrap_or(input.len());
    &input[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_project_label() {
        assert_eq!(root_project_label("Root project 'app'"), Some("app"));
        assert_eq!(root_project_label("Root project 'my app'"), Some("my app"));
        assert_eq!(root_project_label("Root project ''"), None);
        assert_eq!(root_project_label("Root project 'app' - the app"), None);
        assert_eq!(root_project_label(" Root project 'app'"), None);
        assert_eq!(root_project_label("Project 'app'"), None);
    }

    #[test]
    fn test_project_label() {
        assert_eq!(project_label("Root project 'app'"), Some("app"));
        assert_eq!(project_label("Project ':core'"), Some(":core"));
        assert_eq!(project_label("project ':core'"), None);
        assert_eq!(project_label("Project ':co're'"), None);
    }

    #[test]
    fn test_nested_project_label() {
        assert_eq!(nested_project_label("+--- Project ':core'"), Some(":core"));
        assert_eq!(
            nested_project_label("|    \\--- Project ':core:data'"),
            Some(":core:data")
        );
        assert_eq!(nested_project_label("Project ':core'"), None);
        assert_eq!(nested_project_label("+--- Project ':core' - desc"), None);
    }

    #[test]
    fn test_is_tree_start() {
        assert!(is_tree_start("+--- project :core"));
        assert!(is_tree_start("\\--- com.acme:lib:1.0"));
        assert!(!is_tree_start("|    +--- x"));
        assert!(!is_tree_start("No dependencies"));
    }

    #[test]
    fn test_dependency_line_project() {
        let line = dependency_line("+--- project :core").unwrap();
        assert_eq!(line.depth, 5);
        assert_eq!(line.name, ":core");
        assert!(line.is_project);
    }

    #[test]
    fn test_dependency_line_external() {
        let line = dependency_line("\\--- com.x:lib:1.0").unwrap();
        assert_eq!(line.depth, 5);
        assert_eq!(line.name, "com.x:lib:1.0");
        assert!(!line.is_project);
    }

    #[test]
    fn test_dependency_line_nested_depth() {
        let line = dependency_line("|    \\--- org.slf4j:slf4j-api:2.0.9").unwrap();
        assert_eq!(line.depth, 10);
        assert_eq!(line.name, "org.slf4j:slf4j-api:2.0.9");
    }

    #[test]
    fn test_dependency_line_ignores_annotations() {
        let line = dependency_line("+--- com.acme:lib:1.0 -> 1.2 (*)").unwrap();
        assert_eq!(line.name, "com.acme:lib:1.0");

        let line = dependency_line("+--- com.acme:bom:1.0 (c)").unwrap();
        assert_eq!(line.name, "com.acme:bom:1.0");
    }

    #[test]
    fn test_dependency_line_bare_project_word() {
        let line = dependency_line("+--- project").unwrap();
        assert_eq!(line.name, "project");
        assert!(!line.is_project);

        let line = dependency_line("+--- project ").unwrap();
        assert_eq!(line.name, "project");
        assert!(!line.is_project);
    }

    #[test]
    fn test_dependency_line_rejects_prefix_only() {
        assert_eq!(dependency_line("+---"), None);
        assert_eq!(dependency_line("|    "), None);
        assert_eq!(dependency_line("\\--- (n)"), None);
    }

    #[test]
    fn test_dependency_line_requires_prefix() {
        assert_eq!(dependency_line("com.acme:lib:1.0"), None);
        assert_eq!(dependency_line("(*) - dependencies omitted"), None);
    }
}
