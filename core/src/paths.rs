#![deny(missing_docs)]

//! # Workspace Paths
//!
//! Descriptors are addressed by workspace paths: `/`-separated, rooted at the
//! workspace (`/src/app/app.module.ts`). These helpers keep them normalized and
//! compute the relative specifiers used in `import` statements.

/// Normalizes a workspace path.
///
/// Backslashes become `/`, empty and `.` segments are dropped and `..` pops
/// the previous segment. A leading `/` is preserved; the root stays `/`.
pub fn normalize(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let absolute = unified.starts_with('/');

    let mut parts: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|p| *p != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    if absolute {
        format!("/{}", joined)
    } else {
        joined
    }
}

/// Joins two path fragments and normalizes the result.
pub fn join(base: &str, tail: &str) -> String {
    if base.is_empty() {
        return normalize(tail);
    }
    normalize(&format!("{}/{}", base, tail))
}

/// Returns the parent directory of a normalized path (`/` for top-level entries).
pub fn dirname(path: &str) -> String {
    let path = normalize(path);
    match path.rfind('/') {
        Some(0) => "/".to_string(),
        Some(pos) => path[..pos].to_string(),
        None => String::new(),
    }
}

/// Returns the last segment of a path.
pub fn basename(path: &str) -> String {
    let path = normalize(path);
    path.rsplit('/').next().unwrap_or_default().to_string()
}

/// Computes the relative path between two normalized directories.
///
/// Returns an empty string when both point to the same directory.
pub fn relative(from_dir: &str, to_dir: &str) -> String {
    let from = normalize(from_dir);
    let to = normalize(to_dir);

    let from_parts: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
    let to_parts: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments: Vec<&str> = Vec::new();
    segments.extend(std::iter::repeat("..").take(from_parts.len() - common));
    segments.extend(to_parts[common..].iter().copied());
    segments.join("/")
}

/// Builds the import specifier that reaches `to_file` from inside `from_file`.
///
/// e.g. `/src/app/app.module.ts` -> `/src/app/widget/widget.module` gives `./widget/widget.module`.
pub fn build_relative_path(from_file: &str, to_file: &str) -> String {
    let from_dir = dirname(from_file);
    let to_dir = dirname(to_file);
    let to_name = basename(to_file);

    let rel = relative(&from_dir, &to_dir);

    if rel.is_empty() {
        format!("./{}", to_name)
    } else if rel.starts_with('.') {
        format!("{}/{}", rel, to_name)
    } else {
        format!("./{}/{}", rel, to_name)
    }
}

/// Iterates a path and its ancestors, stopping before the root.
///
/// `/a/b/c` yields `/a/b/c`, `/a/b`, `/a`.
pub fn ancestors(path: &str) -> Vec<String> {
    let mut dirs = Vec::new();
    let mut current = normalize(path);
    while !current.is_empty() && current != "/" {
        let parent = dirname(&current);
        dirs.push(current);
        current = parent;
    }
    dirs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("/src/app/"), "/src/app");
        assert_eq!(normalize("//src/./app//x"), "/src/app/x");
        assert_eq!(normalize("/src/app/../lib"), "/src/lib");
        assert_eq!(normalize("src\\app"), "src/app");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("/.."), "/");
    }

    #[test]
    fn test_dirname_basename() {
        assert_eq!(dirname("/src/app/app.module.ts"), "/src/app");
        assert_eq!(dirname("/app.module.ts"), "/");
        assert_eq!(basename("/src/app/app.module.ts"), "app.module.ts");
        assert_eq!(join("/src/app", "widget"), "/src/app/widget");
        assert_eq!(join("/src/app", ""), "/src/app");
    }

    #[test]
    fn test_relative() {
        assert_eq!(relative("/src/app", "/src/app"), "");
        assert_eq!(relative("/src/app", "/src/app/widget"), "widget");
        assert_eq!(relative("/src/app/admin", "/src/app/widget"), "../widget");
        assert_eq!(relative("/", "/widget"), "widget");
    }

    #[test]
    fn test_build_relative_path() {
        assert_eq!(
            build_relative_path("/app.module.ts", "/widget/widget.module"),
            "./widget/widget.module"
        );
        assert_eq!(
            build_relative_path("/src/app/app.module.ts", "/src/app/widget.module"),
            "./widget.module"
        );
        assert_eq!(
            build_relative_path(
                "/src/app/admin/admin.module.ts",
                "/src/app/shared/shared.module"
            ),
            "../shared/shared.module"
        );
    }

    #[test]
    fn test_ancestors() {
        assert_eq!(ancestors("/a/b/c"), vec!["/a/b/c", "/a/b", "/a"]);
        assert!(ancestors("/").is_empty());
    }
}
