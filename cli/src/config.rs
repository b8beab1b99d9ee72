use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Optional per-project settings, read from the input directory.
pub const CONFIG_FILE: &str = "guide.toml";

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Output file, relative to the input directory.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Document name that becomes the MAIN node.
    #[serde(default)]
    pub main: Option<String>,

    /// Extension of the source files.
    #[serde(default)]
    pub extension: Option<String>,

    /// Name written into the `@database` header.
    #[serde(default)]
    pub database: Option<String>,
}

impl ProjectConfig {
    /// Load `guide.toml` from `dir`. A missing file is an empty config.
    pub fn load(dir: &Path) -> Result<Self, String> {
        let path = dir.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(ProjectConfig::default());
        }
        let text = std::fs::read_to_string(&path)
            .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
        Self::parse(&text).map_err(|e| format!("{}: {}", path.display(), e))
    }

    pub fn parse(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| format!("TOML parse error: {}", e))
    }
}

/// Everything a build needs, after command line, config and defaults are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub main: String,
    pub extension: String,
    pub database: String,
}

/// Values given on the command line; `None` means not given.
#[derive(Debug, Default)]
pub struct Overrides {
    pub output: Option<PathBuf>,
    pub main: Option<String>,
    pub extension: Option<String>,
    pub database: Option<String>,
}

impl Settings {
    /// Command line beats `guide.toml`, which beats the defaults.
    pub fn resolve(input: PathBuf, cwd: &Path, config: ProjectConfig, cli: Overrides) -> Self {
        let output = cli
            .output
            .or_else(|| config.output.map(|p| input.join(p)))
            .unwrap_or_else(|| cwd.join("output.guide"));

        let database = cli.database.or(config.database).unwrap_or_else(|| {
            output
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "output.guide".to_string())
        });

        Settings {
            output,
            main: cli.main.or(config.main).unwrap_or_else(|| "MAIN".to_string()),
            extension: cli.extension.or(config.extension).unwrap_or_else(|| "txt".to_string()),
            database,
            input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::resolve(
            PathBuf::from("docs"),
            Path::new("/work"),
            ProjectConfig::default(),
            Overrides::default(),
        );
        assert_eq!(settings.output, PathBuf::from("/work/output.guide"));
        assert_eq!(settings.main, "MAIN");
        assert_eq!(settings.extension, "txt");
        assert_eq!(settings.database, "output.guide");
    }

    #[test]
    fn config_is_relative_to_input() {
        let config = ProjectConfig::parse("output = \"build/help.guide\"\nmain = \"index\"\n").unwrap();
        let settings = Settings::resolve(
            PathBuf::from("docs"),
            Path::new("/work"),
            config,
            Overrides::default(),
        );
        assert_eq!(settings.output, PathBuf::from("docs/build/help.guide"));
        assert_eq!(settings.main, "index");
        assert_eq!(settings.database, "help.guide");
    }

    #[test]
    fn command_line_wins() {
        let config = ProjectConfig::parse("main = \"index\"\nextension = \"doc\"\ndatabase = \"Cfg\"").unwrap();
        let settings = Settings::resolve(
            PathBuf::from("docs"),
            Path::new("/work"),
            config,
            Overrides {
                output: Some(PathBuf::from("out.guide")),
                main: Some("start".into()),
                extension: None,
                database: None,
            },
        );
        assert_eq!(settings.output, PathBuf::from("out.guide"));
        assert_eq!(settings.main, "start");
        assert_eq!(settings.extension, "doc");
        assert_eq!(settings.database, "Cfg");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(ProjectConfig::parse("colour = \"red\"").is_err());
    }

    #[test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        assert_eq!(ProjectConfig::load(dir.path()).unwrap(), ProjectConfig::default());

        std::fs::write(dir.path().join(CONFIG_FILE), "extension = \"text\"\n").unwrap();
        let config = ProjectConfig::load(dir.path()).unwrap();
        assert_eq!(config.extension.as_deref(), Some("text"));
    }
}
