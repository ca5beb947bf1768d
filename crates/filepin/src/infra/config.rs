//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static WORKSPACE_CONFIG_PATH: &str = ".filepin/config.toml";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub store: Store,
    #[serde(default)]
    pub picker: Picker,
}

/// Where the selection record lives and which JSON field holds it.
///
/// Two naming conventions are in circulation: `fileSelector.json` with a
/// `selectedFile` field, and `pinFile.json` with a `pinnedFile` field. Either
/// is picked by name via `convention`, and `file_name` / `field` override the
/// preset piecewise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Store {
    #[serde(default)]
    convention: Option<String>,
    #[serde(default)]
    file_name: Option<String>,
    #[serde(default)]
    field: Option<String>,
    #[serde(default)]
    dir: Option<String>,
}

impl Store {
    fn preset(&self) -> (&'static str, &'static str) {
        match self.convention.as_deref() {
            Some("pinFile") => ("pinFile.json", "pinnedFile"),
            _ => ("fileSelector.json", "selectedFile"),
        }
    }

    /// Settings file name within the store directory.
    pub fn file_name(&self) -> String {
        self.file_name
            .clone()
            .unwrap_or_else(|| self.preset().0.to_owned())
    }

    /// JSON field holding the stored path.
    pub fn field(&self) -> String {
        self.field
            .clone()
            .unwrap_or_else(|| self.preset().1.to_owned())
    }

    /// Directory under the workspace root holding the settings file.
    pub fn dir(&self) -> String {
        self.dir.clone().unwrap_or_else(|| ".vscode".to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Picker {
    #[serde(default)]
    prompt: Option<String>,
}

impl Picker {
    pub fn prompt(&self) -> String {
        self.prompt
            .clone()
            .unwrap_or_else(|| "Select file".to_owned())
    }
}

/// Environment overrides for the store convention.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    file_name: Option<String>,
    field: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            file_name: env::var("FILEPIN_STORE_FILE").ok(),
            field: env::var("FILEPIN_STORE_FIELD").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(file_name: &str, field: &str) -> Self {
        Self {
            file_name: Some(file_name.to_owned()),
            field: Some(field.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from defaults, user/global config, workspace config,
    /// and env overrides.
    pub fn load(workspace_root: Option<&Path>) -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = workspace_root.map(|root| root.join(WORKSPACE_CONFIG_PATH));
        Self::load_with_layers(global, workspace, env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            store: merge_store(self.store, other.store),
            picker: merge_picker(self.picker, other.picker),
        }
    }
}

fn merge_store(mut base: Store, overlay: Store) -> Store {
    if overlay.convention.is_some() {
        base.convention = overlay.convention;
    }
    if overlay.file_name.is_some() {
        base.file_name = overlay.file_name;
    }
    if overlay.field.is_some() {
        base.field = overlay.field;
    }
    if overlay.dir.is_some() {
        base.dir = overlay.dir;
    }
    base
}

fn merge_picker(mut base: Picker, overlay: Picker) -> Picker {
    if overlay.prompt.is_some() {
        base.prompt = overlay.prompt;
    }
    base
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("filepin/config.toml"))
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(file_name) = env.file_name {
        config.store.file_name = Some(file_name);
    }
    if let Some(field) = env.field {
        config.store.field = Some(field);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_defaults_when_no_files() {
        let config = Config::load_with_layers(None, None, EnvOverrides::default())
            .expect("load default config");
        assert_eq!(config.store.file_name(), "fileSelector.json");
        assert_eq!(config.store.field(), "selectedFile");
        assert_eq!(config.store.dir(), ".vscode");
        assert_eq!(config.picker.prompt(), "Select file");
    }

    #[test]
    fn pin_file_convention_switches_both_names() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let global = temp.path().join("config.toml");
        fs::write(
            &global,
            r#"
[store]
convention = "pinFile"
"#,
        )?;

        let config = Config::load_with_layers(Some(global), None, EnvOverrides::default())?;
        assert_eq!(config.store.file_name(), "pinFile.json");
        assert_eq!(config.store.field(), "pinnedFile");
        Ok(())
    }

    #[test]
    fn merge_global_and_workspace() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let global = temp.path().join("config.toml");
        fs::write(
            &global,
            r#"
[store]
convention = "pinFile"
[picker]
prompt = "Pick one"
"#,
        )?;

        let workspace_dir = temp.path().join("repo");
        fs::create_dir_all(workspace_dir.join(".filepin"))?;
        fs::write(
            workspace_dir.join(".filepin/config.toml"),
            r#"
[store]
file_name = "team.json"
"#,
        )?;

        let global_path = Some(global);
        let workspace_path = Some(workspace_dir.join(".filepin/config.toml"));

        let config =
            Config::load_with_layers(global_path, workspace_path, EnvOverrides::default())?;

        assert_eq!(config.store.file_name(), "team.json");
        assert_eq!(config.store.field(), "pinnedFile");
        assert_eq!(config.picker.prompt(), "Pick one");

        Ok(())
    }

    #[test]
    fn env_overrides_take_precedence() -> Result<()> {
        let overrides = EnvOverrides::for_tests("ci.json", "ciFile");
        let config = Config::load_with_layers(None, None, overrides)?;
        assert_eq!(config.store.file_name(), "ci.json");
        assert_eq!(config.store.field(), "ciFile");
        Ok(())
    }

    #[test]
    fn invalid_config_returns_error() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = temp.path().join("broken.toml");
        fs::write(&file, "this is not toml")?;
        let result = Config::from_file(&file);
        assert!(result.is_err());
        Ok(())
    }
}
