use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use converter::{Converter, SourceDocument};
use guide::RenderWarning;

const TEST_SUFFIX: &str = ".test.txt";

#[derive(Debug, Deserialize)]
pub struct ExpectedWarning {
    /// Substring that must appear in the warning message.
    pub contains: String,

    /// If set, the warning's span must start on this 1-based line of the document.
    #[serde(default)]
    pub line: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestConfig {
    /// Human-readable test description.
    #[serde(default)]
    pub description: Option<String>,

    /// Name of the document, as if it were the file stem. Defaults to "main".
    #[serde(default = "default_name")]
    pub name: String,

    /// Document name that is remapped to MAIN. Defaults to "MAIN".
    #[serde(default = "default_main")]
    pub main: String,

    /// Expected node title.
    #[serde(default)]
    pub expect_title: Option<String>,

    /// Expected serialized node, from `@node` to `@endnode` (trimmed comparison).
    #[serde(default)]
    pub expect_output: Option<String>,

    /// Expected warnings. If present (even empty), warning count and content are checked.
    #[serde(default)]
    pub expect_warnings: Option<Vec<ExpectedWarning>>,
}

fn default_name() -> String {
    "main".to_string()
}

fn default_main() -> String {
    guide::MAIN_NODE.to_string()
}

/// Split a `.test.txt` file into its TOML frontmatter and the document source.
fn parse_test_file(content: &str) -> Result<(TestConfig, &str), String> {
    let content = content.trim_start_matches('\u{feff}');

    let after_open = content
        .strip_prefix("---")
        .ok_or("missing opening --- frontmatter delimiter")?;
    let after_open = after_open
        .strip_prefix('\n')
        .or_else(|| after_open.strip_prefix("\r\n"))
        .unwrap_or(after_open);

    let close_pos = after_open
        .find("\n---")
        .ok_or("missing closing --- frontmatter delimiter")?;

    let toml_str = after_open[..close_pos].trim_end_matches('\r');
    let rest = &after_open[close_pos + 4..];
    let source = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .unwrap_or(rest);

    let config: TestConfig =
        toml::from_str(toml_str).map_err(|e| format!("TOML parse error: {}", e))?;

    Ok((config, source))
}

pub enum TestOutcome {
    Pass,
    Fail(String),
}

pub struct TestResult {
    pub path: PathBuf,
    pub description: Option<String>,
    pub outcome: TestOutcome,
}

impl TestResult {
    fn label(&self) -> &str {
        self.description.as_deref().unwrap_or_else(|| {
            self.path
                .file_name()
                .and_then(|s| s.to_str())
                .and_then(|s| s.strip_suffix(TEST_SUFFIX))
                .unwrap_or("?")
        })
    }
}

fn run_single_test(path: &Path) -> TestResult {
    let fail = |description: Option<String>, reason: String| TestResult {
        path: path.to_path_buf(),
        description,
        outcome: TestOutcome::Fail(reason),
    };

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => return fail(None, format!("cannot read file: {}", e)),
    };

    let (config, source) = match parse_test_file(&content) {
        Ok(pair) => pair,
        Err(e) => return fail(None, format!("frontmatter error: {}", e)),
    };
    let description = config.description.clone();

    match check_conversion(&config, source) {
        Some(reason) => fail(description, reason),
        None => TestResult {
            path: path.to_path_buf(),
            description,
            outcome: TestOutcome::Pass,
        },
    }
}

/// Convert the document and compare against the expectations.
/// Returns `Some(reason)` on the first mismatch.
fn check_conversion(config: &TestConfig, source: &str) -> Option<String> {
    let converter = Converter::new("test.guide").with_main(config.main.clone());
    let conversion = converter.convert(&[SourceDocument::new(config.name.clone(), source)]);

    let node_name = converter.node_name(&config.name);
    let Some(node) = conversion.database.get(&node_name) else {
        return Some(format!("node {} was not created", node_name));
    };

    if let Some(expected_title) = &config.expect_title {
        if node.title != *expected_title {
            return Some(format!(
                "title mismatch\n  expected: {}\n  actual:   {}",
                expected_title, node.title
            ));
        }
    }

    if let Some(expected_output) = &config.expect_output {
        let actual = node.to_string();
        if actual.trim() != expected_output.trim() {
            return Some(format!(
                "output mismatch\n  expected:\n{}\n  actual:\n{}",
                indent(expected_output.trim()),
                indent(actual.trim())
            ));
        }
    }

    if let Some(expected_warnings) = &config.expect_warnings {
        return check_warnings(source, &conversion.warnings, expected_warnings);
    }

    None
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|l| format!("    {}", l))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Convert a byte offset in `source` to a 1-based line number.
fn byte_offset_to_line(source: &str, offset: usize) -> usize {
    source[..offset.min(source.len())]
        .bytes()
        .filter(|&b| b == b'\n')
        .count()
        + 1
}

/// Check that actual warnings match expectations. Returns `Some(reason)` on mismatch.
fn check_warnings(
    source: &str,
    warnings: &[RenderWarning],
    expected: &[ExpectedWarning],
) -> Option<String> {
    if warnings.len() != expected.len() {
        let actual_msgs: Vec<String> = warnings
            .iter()
            .map(|w| format!("    - {}", w))
            .collect();
        return Some(format!(
            "expected {} warning(s), got {}\n  actual warnings:\n{}",
            expected.len(),
            warnings.len(),
            if actual_msgs.is_empty() {
                "    (none)".to_string()
            } else {
                actual_msgs.join("\n")
            }
        ));
    }

    for (i, (actual, expected)) in warnings.iter().zip(expected).enumerate() {
        let message = actual.to_string();
        if !message.contains(&expected.contains) {
            return Some(format!(
                "warning[{}]: expected message containing \"{}\", got: {}",
                i, expected.contains, message
            ));
        }

        if let Some(expected_line) = expected.line {
            let actual_line = byte_offset_to_line(source, actual.span.start);
            if actual_line != expected_line {
                return Some(format!(
                    "warning[{}]: expected on line {}, but span is on line {}",
                    i, expected_line, actual_line
                ));
            }
        }
    }

    None
}

/// Discover `.test.txt` files grouped by category (subfolder relative to root).
/// Files directly in `root` get category "" (uncategorized).
fn discover_categorized(root: &Path) -> BTreeMap<String, Vec<PathBuf>> {
    let mut categories: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    collect_tests(root, root, &mut categories);
    for files in categories.values_mut() {
        files.sort();
    }
    categories
}

fn collect_tests(dir: &Path, root: &Path, out: &mut BTreeMap<String, Vec<PathBuf>>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_tests(&path, root, out);
        } else if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(TEST_SUFFIX))
        {
            let category = path
                .parent()
                .and_then(|p| p.strip_prefix(root).ok())
                .map(|p| p.to_string_lossy().replace('\\', "/"))
                .unwrap_or_default();
            out.entry(category).or_default().push(path);
        }
    }
}

fn category_label(category: &str) -> &str {
    if category.is_empty() { "(root)" } else { category }
}

/// List available categories for the given test path.
pub fn list_categories(path: &Path) {
    if path.is_file() {
        eprintln!("(single file, no categories)");
        return;
    }

    let categories = discover_categorized(path);
    if categories.is_empty() {
        eprintln!("no {} files found in {}", TEST_SUFFIX, path.display());
        return;
    }

    eprintln!("available categories:");
    for (cat, files) in &categories {
        eprintln!("  {} ({} tests)", category_label(cat), files.len());
    }
}

/// Terminal styling for the report, disabled by `--no-color`.
struct Style {
    color: bool,
}

impl Style {
    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }

    fn pass(&self) -> String {
        self.paint("32", "PASS")
    }

    fn fail(&self) -> String {
        self.paint("31", "FAIL")
    }

    fn bold(&self, text: &str) -> String {
        self.paint("1", text)
    }
}

/// Select the categories to run. An empty request runs everything.
fn select_categories<'a>(
    all: &'a BTreeMap<String, Vec<PathBuf>>,
    requested: &[String],
) -> BTreeMap<&'a str, &'a Vec<PathBuf>> {
    if requested.is_empty() {
        return all.iter().map(|(k, v)| (k.as_str(), v)).collect();
    }

    let mut selected = BTreeMap::new();
    for request in requested {
        let req = request.trim_matches('/');
        let before = selected.len();
        for (cat, files) in all {
            if cat == req || cat.starts_with(&format!("{}/", req)) {
                selected.insert(cat.as_str(), files);
            }
        }
        if selected.len() == before {
            eprintln!(
                "warning: category '{}' not found (available: {})",
                req,
                all.keys()
                    .map(|k| category_label(k))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
    }
    selected
}

/// Run all `.test.txt` files under `path` (or a single file).
/// If `categories` is non-empty, only run tests in those categories.
/// Returns exit code: 0 = all pass, 1 = any failure.
pub fn run_tests(path: &Path, no_color: bool, categories: &[String]) -> i32 {
    let style = Style { color: !no_color };

    let all_categories = if path.is_file() {
        BTreeMap::from([(String::new(), vec![path.to_path_buf()])])
    } else {
        discover_categorized(path)
    };

    if all_categories.is_empty() {
        eprintln!("no {} files found in {}", TEST_SUFFIX, path.display());
        return 1;
    }

    let run_categories = if path.is_file() {
        select_categories(&all_categories, &[])
    } else {
        select_categories(&all_categories, categories)
    };

    if run_categories.is_empty() {
        eprintln!("no matching categories found");
        return 1;
    }

    let mut passed = 0usize;
    let mut failures: Vec<TestResult> = Vec::new();

    for (cat, files) in &run_categories {
        eprintln!();
        eprintln!("{}", style.bold(category_label(cat)));

        for file in *files {
            let result = run_single_test(file);
            match &result.outcome {
                TestOutcome::Pass => {
                    passed += 1;
                    eprintln!("  {}  {}", style.pass(), result.label());
                }
                TestOutcome::Fail(_) => {
                    eprintln!("  {}  {}", style.fail(), result.label());
                    failures.push(result);
                }
            }
        }
    }

    if !failures.is_empty() {
        eprintln!();
        eprintln!("failures:");
        for f in &failures {
            eprintln!();
            eprintln!("  --- {} ---", f.path.display());
            if let TestOutcome::Fail(reason) = &f.outcome {
                for line in reason.lines() {
                    eprintln!("  {}", line);
                }
            }
        }
    }

    eprintln!();
    let failed = failures.len();
    if failed == 0 {
        eprintln!("test result: {}. {} passed, 0 failed", style.paint("32", "ok"), passed);
        0
    } else {
        eprintln!(
            "test result: {}. {} passed, {} failed (of {})",
            style.paint("31", "FAILED"),
            passed,
            failed,
            passed + failed
        );
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontmatter_split() {
        let file = "---\ndescription = \"demo\"\nname = \"intro\"\n---\nTitle\nBody\n";
        let (config, source) = parse_test_file(file).unwrap();
        assert_eq!(config.description.as_deref(), Some("demo"));
        assert_eq!(config.name, "intro");
        assert_eq!(config.main, "MAIN");
        assert_eq!(source, "Title\nBody\n");
    }

    #[test]
    fn frontmatter_errors() {
        assert!(parse_test_file("Title\nBody").is_err());
        assert!(parse_test_file("---\nname = \"x\"\nTitle").is_err());
        assert!(parse_test_file("---\nbogus = 1\n---\nTitle").is_err());
    }

    #[test]
    fn passing_and_failing_expectations() {
        let (config, source) = parse_test_file(
            "---\nexpect_title = \"Hello\"\nexpect_output = '''\n@node MAIN \"Hello\"\n@{b}hi@{ub}\n@endnode\n'''\n---\nHello\n*hi*",
        )
        .unwrap();
        assert_eq!(check_conversion(&config, source), None);

        let (config, source) =
            parse_test_file("---\nexpect_title = \"Other\"\n---\nHello\nbody").unwrap();
        let reason = check_conversion(&config, source).unwrap();
        assert!(reason.starts_with("title mismatch"));
    }

    #[test]
    fn warning_lines() {
        let (config, source) = parse_test_file(
            "---\nexpect_warnings = [{ contains = \"unterminated link\", line = 3 }]\n---\nT\nfine\n[open",
        )
        .unwrap();
        assert_eq!(check_conversion(&config, source), None);
    }

    #[test]
    fn bundled_cases_pass() {
        let cases = Path::new(env!("CARGO_MANIFEST_DIR")).join("../cases");
        assert_eq!(run_tests(&cases, true, &[]), 0);
    }

    #[test]
    fn runs_a_directory() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let sub = dir.path().join("basic");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(
            sub.join("ok.test.txt"),
            "---\nexpect_title = \"T\"\n---\nT\nbody\n",
        )
        .unwrap();
        assert_eq!(run_tests(dir.path(), true, &[]), 0);

        std::fs::write(
            sub.join("bad.test.txt"),
            "---\nexpect_title = \"Wrong\"\n---\nT\nbody\n",
        )
        .unwrap();
        assert_eq!(run_tests(dir.path(), true, &[]), 1);
        assert_eq!(run_tests(&sub.join("ok.test.txt"), true, &[]), 0);
        assert_eq!(run_tests(dir.path(), true, &["missing".to_string()]), 1);
    }
}
