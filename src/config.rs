use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{Project, ResourceFile};

pub const CONFIG_FILE_NAME: &str = ".resrefactorrc.json";

/// Designer output and build folders, skipped unless `ignoreGenerated` is off.
pub const GENERATED_FILE_PATTERNS: &[&str] = &[
    "**/*.Designer.cs",
    "**/*.Designer.vb",
    "**/*.g.cs",
    "**/*.g.vb",
    "**/*.g.i.cs",
    "**/*.g.i.vb",
    "**/bin/**",
    "**/obj/**",
];

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_ignore_generated")]
    pub ignore_generated: bool,
    #[serde(default)]
    pub project: Project,
    #[serde(default = "default_resource_file")]
    pub resource_file: ResourceFile,
    /// Read `web.config` and `_ViewImports.cshtml` when scanning Razor imports.
    #[serde(default = "default_ambient_imports")]
    pub ambient_imports: bool,
    /// Shortest decoded value `scan` reports.
    #[serde(default = "default_min_length")]
    pub min_length: usize,
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_ignore_generated() -> bool {
    true
}

fn default_resource_file() -> ResourceFile {
    ResourceFile::new("Properties/Resources.resx")
}

fn default_ambient_imports() -> bool {
    true
}

fn default_min_length() -> usize {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            includes: Vec::new(),
            source_root: default_source_root(),
            ignore_generated: default_ignore_generated(),
            project: Project::default(),
            resource_file: default_resource_file(),
            ambient_imports: default_ambient_imports(),
            min_length: default_min_length(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob patterns in `ignores` or `includes` are invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without wildcards are literal directory paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.resource_file.path.as_os_str().is_empty() {
            anyhow::bail!("'resourceFile.path' must not be empty");
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory holding the config file; project-relative paths resolve
    /// against it.
    pub root: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            let root = path
                .parent()
                .map_or_else(|| start_dir.to_path_buf(), Path::to_path_buf);
            Ok(ConfigLoadResult {
                config,
                root,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            root: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::core::{ItemType, ProjectKind};
    use pretty_assertions::assert_eq;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.ignores.is_empty());
        assert!(config.includes.is_empty());
        assert!(config.ambient_imports);
        assert_eq!(config.project.kind, ProjectKind::CSharp);
        assert_eq!(config.resource_file.path, Path::new("Properties/Resources.resx"));
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "ignores": ["**/Migrations/**"],
              "includes": ["src"],
              "project": {
                  "kind": "visualBasic",
                  "rootNamespace": "VbApp",
                  "extenders": ["WebApplication"]
              },
              "resourceFile": {
                  "path": "App_GlobalResources/Site.resx",
                  "customTool": "GlobalResourceProxyGenerator",
                  "itemType": "content"
              },
              "minLength": 3
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.ignores, vec!["**/Migrations/**"]);
        assert_eq!(config.project.kind, ProjectKind::VisualBasic);
        assert_eq!(config.project.root_namespace.as_deref(), Some("VbApp"));
        assert!(config.project.is_web_application());
        assert_eq!(config.resource_file.item_type, ItemType::Content);
        assert_eq!(
            config.resource_file.custom_tool.as_deref(),
            Some("GlobalResourceProxyGenerator")
        );
        assert_eq!(config.min_length, 3);
        assert!(config.ignore_generated);
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("Views").join("Home");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_stops_at_git_root() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        assert!(find_config_file(dir.path()).is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("src");
        fs::create_dir(&nested).unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "project": { "defaultNamespace": "WindowsForms1" } }"#,
        )
        .unwrap();

        let result = load_config(&nested).unwrap();
        assert!(result.from_file);
        assert_eq!(result.root, dir.path());
        assert_eq!(
            result.config.project.default_namespace.as_deref(),
            Some("WindowsForms1")
        );
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(!result.from_file);
        assert_eq!(result.root, dir.path());
    }

    #[test]
    fn test_validate_invalid_patterns() {
        let config = Config {
            ignores: vec!["[invalid".to_string()],
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("ignores"));

        let config = Config {
            includes: vec!["src/**/[invalid".to_string()],
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("includes"));
    }

    #[test]
    fn test_validate_empty_resource_path() {
        let config = Config {
            resource_file: ResourceFile::new(""),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_json_round_trips() {
        let json = default_config_json().unwrap();
        assert!(json.contains("\"resourceFile\""));
        assert!(json.contains("\"ambientImports\": true"));
        let config: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config.min_length, 1);
    }
}
