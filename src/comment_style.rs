//! # Comment Style Module
//!
//! This module decides, from a file's name alone, how a license header must be
//! wrapped so that it is a comment in that file's language.
//!
//! The module includes:
//! - [`CommentStyle`] describing the top, middle and bottom markers of a comment block
//! - [`ExtensionRule`] binding a set of extensions to a style
//! - [`CommentStyleResolver`] with a built-in table ([`BuiltinResolver`]) and a caller-supplied table
//!   ([`RuleTableResolver`])
//!
//! Placement is purely textual. Nothing here parses the target language.

use std::path::Path;

use tracing::debug;

/// Defines how a block of text is wrapped as a comment.
///
/// An empty `top` or `bottom` means no delimiter line is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentStyle {
  /// Line emitted before the body (e.g., "/*")
  pub top: String,

  /// Prefix for every body line (e.g., " * " or "// ")
  pub middle: String,

  /// Line emitted after the body (e.g., " */")
  pub bottom: String,
}

impl CommentStyle {
  /// Create a line-comment style (no top/bottom markers).
  pub fn line(prefix: &str) -> Self {
    Self {
      top: String::new(),
      middle: prefix.to_string(),
      bottom: String::new(),
    }
  }

  /// Create a block-comment style.
  pub fn block(top: &str, middle: &str, bottom: &str) -> Self {
    Self {
      top: top.to_string(),
      middle: middle.to_string(),
      bottom: bottom.to_string(),
    }
  }
}

/// A set of extension keys sharing one comment style.
///
/// Keys use the same shape as [`file_extension`]: a leading dot for real
/// extensions (".go"), or a bare lowercase file name ("dockerfile").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionRule {
  pub extensions: Vec<String>,
  pub style: CommentStyle,
}

impl ExtensionRule {
  pub fn new<I, S>(extensions: I, style: CommentStyle) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      extensions: extensions.into_iter().map(Into::into).collect(),
      style,
    }
  }

  /// Whether this rule covers the given (already case-folded) key.
  pub fn matches(&self, key: &str) -> bool {
    self.extensions.iter().any(|ext| ext == key)
  }
}

/// Returns the case-folded lookup key for a path.
///
/// This is the substring of the file name from the last `.` to the end,
/// including the dot. A name without any `.` yields the whole file name, so
/// bare names such as `Dockerfile` or `Gemfile` can be matched directly.
pub fn file_extension(path: &Path) -> String {
  let name = path
    .file_name()
    .map(|name| name.to_string_lossy())
    .unwrap_or_default();

  match name.rfind('.') {
    Some(idx) => name[idx..].to_lowercase(),
    None => name.to_lowercase(),
  }
}

/// Trait for resolving comment styles for file paths.
pub trait CommentStyleResolver: Send + Sync {
  /// Resolve the comment style for the given file path, or `None` when the
  /// file type is unsupported and the file must be left untouched.
  fn resolve(&self, path: &Path) -> Option<CommentStyle>;
}

/// Built-in extension table. Scanned in order; the first entry containing the
/// key wins.
const BUILTIN_RULES: &[(&[&str], &str, &str, &str)] = &[
  (&[".c", ".h", ".gv"], "/*", " * ", " */"),
  (
    &[".js", ".mjs", ".cjs", ".jsx", ".tsx", ".css", ".scss", ".sass", ".tf", ".ts"],
    "/**",
    " * ",
    " */",
  ),
  (
    &[
      ".cc", ".cpp", ".cs", ".go", ".hcl", ".hh", ".hpp", ".java", ".m", ".mm", ".proto", ".rs", ".scala", ".swift",
      ".dart", ".groovy", ".kt", ".kts", ".v", ".sv", ".php",
    ],
    "",
    "// ",
    "",
  ),
  (
    &[
      ".py",
      ".sh",
      ".yaml",
      ".yml",
      ".toml",
      ".bzl",
      ".cmake",
      ".dockerfile",
      "dockerfile",
      ".rb",
      "gemfile",
      ".tcl",
      ".pl",
    ],
    "",
    "# ",
    "",
  ),
  (&[".el", ".lisp"], "", ";; ", ""),
  (&[".erl"], "", "% ", ""),
  (&[".hs", ".sql", ".sdl"], "", "-- ", ""),
  (&[".html", ".xml", ".vue", ".wxi", ".wxl", ".wxs"], "<!--", " ", "-->"),
  (&[".j2"], "{#", "", "#}"),
  (&[".ml", ".mli", ".mll", ".mly"], "(**", "   ", "*)"),
];

/// Resolver backed by the built-in extension table.
///
/// Used whenever the caller supplies no rules of its own.
#[derive(Debug, Default)]
pub struct BuiltinResolver;

impl CommentStyleResolver for BuiltinResolver {
  fn resolve(&self, path: &Path) -> Option<CommentStyle> {
    let key = file_extension(path);

    BUILTIN_RULES
      .iter()
      .find(|(extensions, ..)| extensions.contains(&key.as_str()))
      .map(|(_, top, middle, bottom)| CommentStyle::block(top, middle, bottom))
  }
}

/// Resolver backed by a caller-supplied rule table.
///
/// The table fully replaces the built-in one: an extension missing here is
/// unsupported even if the built-in table knows it.
#[derive(Debug)]
pub struct RuleTableResolver {
  rules: Vec<ExtensionRule>,
}

impl RuleTableResolver {
  /// Creates a resolver over `rules`, case-folding every extension key.
  pub fn new(rules: Vec<ExtensionRule>) -> Self {
    let rules = rules
      .into_iter()
      .map(|rule| ExtensionRule {
        extensions: rule.extensions.iter().map(|ext| ext.to_lowercase()).collect(),
        style: rule.style,
      })
      .collect::<Vec<_>>();

    debug!("Using configured comment styles: {} rules", rules.len());
    Self { rules }
  }
}

impl CommentStyleResolver for RuleTableResolver {
  fn resolve(&self, path: &Path) -> Option<CommentStyle> {
    let key = file_extension(path);
    self.rules.iter().find(|rule| rule.matches(&key)).map(|rule| rule.style.clone())
  }
}

/// Create a resolver for the given rule table.
///
/// A non-empty table yields a [`RuleTableResolver`]; an empty one falls back
/// to the [`BuiltinResolver`]. The two tables are never merged.
pub fn create_resolver(rules: Vec<ExtensionRule>) -> Box<dyn CommentStyleResolver> {
  if rules.is_empty() {
    Box::new(BuiltinResolver)
  } else {
    Box::new(RuleTableResolver::new(rules))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_file_extension_with_dot() {
    assert_eq!(file_extension(Path::new("src/main.GO")), ".go");
    assert_eq!(file_extension(Path::new("archive.tar.gz")), ".gz");
  }

  #[test]
  fn test_file_extension_bare_name() {
    assert_eq!(file_extension(Path::new("docker/Dockerfile")), "dockerfile");
    assert_eq!(file_extension(Path::new("Gemfile")), "gemfile");
  }

  #[test]
  fn test_file_extension_dotfile() {
    assert_eq!(file_extension(Path::new("home/.bashrc")), ".bashrc");
  }

  #[test]
  fn test_builtin_resolver_go() {
    let style = BuiltinResolver.resolve(Path::new("main.go")).expect("go is supported");

    assert_eq!(style.top, "");
    assert_eq!(style.middle, "// ");
    assert_eq!(style.bottom, "");
  }

  #[test]
  fn test_builtin_resolver_c() {
    let style = BuiltinResolver.resolve(Path::new("lib.h")).expect("c headers are supported");

    assert_eq!(style, CommentStyle::block("/*", " * ", " */"));
  }

  #[test]
  fn test_builtin_resolver_javascript() {
    let style = BuiltinResolver.resolve(Path::new("app.js")).expect("js is supported");

    assert_eq!(style, CommentStyle::block("/**", " * ", " */"));
  }

  #[test]
  fn test_builtin_resolver_lisp_and_html() {
    assert_eq!(
      BuiltinResolver.resolve(Path::new("init.el")),
      Some(CommentStyle::line(";; "))
    );
    assert_eq!(
      BuiltinResolver.resolve(Path::new("index.HTML")),
      Some(CommentStyle::block("<!--", " ", "-->"))
    );
  }

  #[test]
  fn test_builtin_resolver_bare_filenames() {
    assert_eq!(
      BuiltinResolver.resolve(Path::new("Dockerfile")),
      Some(CommentStyle::line("# "))
    );
    assert_eq!(BuiltinResolver.resolve(Path::new("Gemfile")), Some(CommentStyle::line("# ")));
  }

  #[test]
  fn test_builtin_resolver_unknown_is_unsupported() {
    assert_eq!(BuiltinResolver.resolve(Path::new("notes.txt")), None);
    assert_eq!(BuiltinResolver.resolve(Path::new("Makefile")), None);
  }

  #[test]
  fn test_rule_table_replaces_builtin() {
    let resolver = create_resolver(vec![ExtensionRule::new([".xyz"], CommentStyle::line("## "))]);

    assert_eq!(resolver.resolve(Path::new("a.xyz")), Some(CommentStyle::line("## ")));
    // Known to the built-in table only, so unsupported here.
    assert_eq!(resolver.resolve(Path::new("main.go")), None);
  }

  #[test]
  fn test_rule_table_first_match_wins() {
    let resolver = RuleTableResolver::new(vec![
      ExtensionRule::new([".go", ".rs"], CommentStyle::line("// ")),
      ExtensionRule::new([".go"], CommentStyle::block("/*", " * ", " */")),
    ]);

    assert_eq!(resolver.resolve(Path::new("main.go")), Some(CommentStyle::line("// ")));
  }

  #[test]
  fn test_rule_table_keys_are_case_folded() {
    let resolver = RuleTableResolver::new(vec![ExtensionRule::new(["Justfile", ".PY"], CommentStyle::line("# "))]);

    assert!(resolver.resolve(Path::new("justfile")).is_some());
    assert!(resolver.resolve(Path::new("tool.py")).is_some());
  }

  #[test]
  fn test_create_resolver_empty_uses_builtin() {
    let resolver = create_resolver(Vec::new());
    assert_eq!(resolver.resolve(Path::new("main.rs")), Some(CommentStyle::line("// ")));
  }
}
