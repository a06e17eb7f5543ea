//! Command implementations for the pinmark CLI.
//!
//! This module contains the business logic for each CLI command. Every
//! command takes the resolved settings and returns a result type that can be
//! rendered as JSON or as human-readable text.

use crate::config::{PinmarkConfig, ResolvedSettings, ValueSource, write_config};
use crate::host::{Binding, Session};
use crate::models::{Entry, normalize_path};
use crate::plugin::PinPlugin;
use crate::storage::PinStore;
use crate::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!(r#"{{"error": "{}"}}"#, e))
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

/// Open the pin store and a session with the pin plugin installed.
pub fn open_session(settings: &ResolvedSettings) -> Result<Session> {
    let store = PinStore::open(settings.pin_file())?;
    let mut session = Session::new(store);
    PinPlugin::new(settings.plugin_settings()).install(&mut session);
    session.init()?;
    Ok(session)
}

fn current_dir() -> Result<PathBuf> {
    Ok(std::env::current_dir()?)
}

// === pin / unpin ===

#[derive(Debug, Serialize)]
pub struct PinResult {
    pub added: Vec<PathBuf>,
    pub pinned: usize,
}

impl Output for PinResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.added.is_empty() {
            return format!("Nothing new to pin ({} total)", plural(self.pinned, "pin"));
        }
        let mut lines = vec![format!("Pinned {}:", plural(self.added.len(), "path"))];
        lines.extend(self.added.iter().map(|p| format!("  {}", p.display())));
        lines.join("\n")
    }
}

/// Pin paths (relative paths resolve against the working directory).
pub fn pin(settings: &ResolvedSettings, paths: &[PathBuf]) -> Result<PinResult> {
    let mut store = PinStore::open(settings.pin_file())?;
    let added = store.pin(paths)?;
    Ok(PinResult {
        added,
        pinned: store.pins().len(),
    })
}

#[derive(Debug, Serialize)]
pub struct UnpinResult {
    pub removed: Vec<PathBuf>,
    pub pinned: usize,
}

impl Output for UnpinResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.removed.is_empty() {
            return format!("Nothing to unpin ({} total)", plural(self.pinned, "pin"));
        }
        let mut lines = vec![format!("Unpinned {}:", plural(self.removed.len(), "path"))];
        lines.extend(self.removed.iter().map(|p| format!("  {}", p.display())));
        lines.join("\n")
    }
}

/// Unpin paths, removing duplicates left in the file as well.
pub fn unpin(settings: &ResolvedSettings, paths: &[PathBuf]) -> Result<UnpinResult> {
    let mut store = PinStore::open(settings.pin_file())?;
    let removed = store.unpin(paths)?;
    Ok(UnpinResult {
        removed,
        pinned: store.pins().len(),
    })
}

// === list / check ===

#[derive(Debug, Serialize)]
pub struct ListResult {
    pub pin_file: PathBuf,
    pub count: usize,
    pub pins: Vec<PathBuf>,
}

impl Output for ListResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.pins.is_empty() {
            return "No pinned paths.".to_string();
        }
        let mut lines = vec![format!("{}:", plural(self.count, "pinned path"))];
        lines.extend(self.pins.iter().map(|p| format!("  {}", p.display())));
        lines.join("\n")
    }
}

/// List pinned paths in pin order.
pub fn list(settings: &ResolvedSettings) -> Result<ListResult> {
    let store = PinStore::open(settings.pin_file())?;
    let pins = store.pins().paths().to_vec();
    Ok(ListResult {
        pin_file: store.path().to_path_buf(),
        count: pins.len(),
        pins,
    })
}

#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub path: PathBuf,
    pub pinned: bool,
}

impl Output for CheckResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.pinned {
            format!("{} is pinned", self.path.display())
        } else {
            format!("{} is not pinned", self.path.display())
        }
    }
}

/// Check whether a path is pinned.
pub fn check(settings: &ResolvedSettings, path: &Path) -> Result<CheckResult> {
    let store = PinStore::open(settings.pin_file())?;
    let path = normalize_path(path, &current_dir()?);
    Ok(CheckResult {
        pinned: store.is_pinned(&path),
        path,
    })
}

// === sort ===

#[derive(Debug, Serialize)]
pub struct SortedEntry {
    pub path: PathBuf,
    pub pinned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct SortResult {
    pub key: String,
    pub entries: Vec<SortedEntry>,
}

impl Output for SortResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                let marker = if entry.pinned { '*' } else { ' ' };
                match &entry.tags {
                    Some(tags) if !tags.is_empty() => {
                        format!("{} {}  [{}]", marker, entry.path.display(), tags.join(", "))
                    }
                    _ => format!("{} {}", marker, entry.path.display()),
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Sort paths the way a host listing would, using a registered sort key.
pub fn sort(
    settings: &ResolvedSettings,
    paths: &[PathBuf],
    key: &str,
    with_tags: bool,
) -> Result<SortResult> {
    let session = open_session(settings)?;
    let cwd = current_dir()?;
    let mut entries: Vec<Entry> = paths
        .iter()
        .map(|p| Entry::new(normalize_path(p, &cwd)))
        .collect();

    session.sort(&mut entries, key)?;

    let entries = entries
        .into_iter()
        .map(|entry| SortedEntry {
            pinned: session.store().is_pinned(entry.path()),
            tags: with_tags.then(|| session.style_tags(&entry, Vec::new())),
            path: entry.path,
        })
        .collect();

    Ok(SortResult {
        key: key.to_string(),
        entries,
    })
}

// === bindings ===

#[derive(Debug, Serialize)]
pub struct BindingsResult {
    pub bindings: Vec<Binding>,
}

impl Output for BindingsResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        self.bindings
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Key bindings in effect once the plugin has initialized.
pub fn bindings(settings: &ResolvedSettings) -> Result<BindingsResult> {
    let session = open_session(settings)?;
    Ok(BindingsResult {
        bindings: session.keymap().iter().cloned().collect(),
    })
}

// === config ===

#[derive(Debug, Serialize)]
pub struct ConfigShowResult {
    #[serde(flatten)]
    pub settings: ResolvedSettings,
}

impl Output for ConfigShowResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let s = &self.settings;
        [
            format!("pin-file = {} ({})", s.pin_file.value.display(), s.pin_file.source),
            format!("output-format = {} ({})", s.output_format.value, s.output_format.source),
            format!("tag = {} ({})", s.tag.value, s.tag.source),
            format!("bindings.pin = {} ({})", s.pin_keys.value, s.pin_keys.source),
            format!("bindings.unpin = {} ({})", s.unpin_keys.value, s.unpin_keys.source),
        ]
        .join("\n")
    }
}

pub fn config_show(settings: &ResolvedSettings) -> ConfigShowResult {
    ConfigShowResult {
        settings: settings.clone(),
    }
}

#[derive(Debug, Serialize)]
pub struct ConfigPathResult {
    pub data_dir: PathBuf,
    pub config_file: PathBuf,
    pub config_exists: bool,
    pub pin_file: PathBuf,
    pub pin_file_exists: bool,
}

impl Output for ConfigPathResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let exists = |b: bool| if b { "" } else { " (missing)" };
        format!(
            "data dir:    {}\nconfig file: {}{}\npin file:    {}{}",
            self.data_dir.display(),
            self.config_file.display(),
            exists(self.config_exists),
            self.pin_file.display(),
            exists(self.pin_file_exists),
        )
    }
}

pub fn config_path(settings: &ResolvedSettings) -> ConfigPathResult {
    ConfigPathResult {
        data_dir: settings.data_dir.clone(),
        config_file: settings.config_file.clone(),
        config_exists: settings.config_file.exists(),
        pin_file: settings.pin_file().to_path_buf(),
        pin_file_exists: settings.pin_file().exists(),
    }
}

#[derive(Debug, Serialize)]
pub struct ConfigInitResult {
    pub path: PathBuf,
    pub created: bool,
}

impl Output for ConfigInitResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.created {
            format!("Wrote {}", self.path.display())
        } else {
            format!("{} already exists (use --force to overwrite)", self.path.display())
        }
    }
}

/// Write a config.kdl holding the current effective settings.
///
/// Flags given to this command (`-H`, `--pin-file`) are part of the
/// effective settings and are written too.
pub fn config_init(settings: &ResolvedSettings, force: bool) -> Result<ConfigInitResult> {
    let path = settings.config_file.clone();
    if path.exists() && !force {
        return Ok(ConfigInitResult {
            path,
            created: false,
        });
    }

    // A default pin file stays implicit so it keeps following PM_DATA_DIR.
    let pin_file = match settings.pin_file.source {
        ValueSource::Default => None,
        _ => {
            let path = settings.pin_file();
            let path = path.to_str().ok_or_else(|| {
                Error::InvalidInput(format!("pin file path is not valid UTF-8: {}", path.display()))
            })?;
            Some(path.to_string())
        }
    };

    let config = PinmarkConfig {
        pin_file,
        output_format: Some(settings.output_format().clone()),
        tag: Some(settings.tag.value.clone()),
        pin_keys: Some(settings.pin_keys.value.clone()),
        unpin_keys: Some(settings.unpin_keys.value.clone()),
    };
    write_config(&path, &config)?;

    Ok(ConfigInitResult {
        path,
        created: true,
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::{ConfigOverrides, OutputFormat, load_config, resolve_settings_with_data_dir};
    use crate::host::NATURAL_SORT_KEY;
    use crate::plugin::PIN_SORT_KEY;
    use crate::test_utils::TestEnv;

    fn settings(env: &TestEnv) -> ResolvedSettings {
        resolve_settings_with_data_dir(env.data_path(), None, &ConfigOverrides::new()).unwrap()
    }

    #[test]
    fn test_pin_then_list() {
        let env = TestEnv::new();
        let settings = settings(&env);

        let result = pin(&settings, &[PathBuf::from("/srv/a"), PathBuf::from("/srv/b")]).unwrap();
        assert_eq!(result.pinned, 2);

        let listed = list(&settings).unwrap();
        assert_eq!(listed.pins, vec![PathBuf::from("/srv/a"), PathBuf::from("/srv/b")]);
        assert_eq!(listed.pin_file, env.pin_file());
    }

    #[test]
    fn test_unpin_reports_removed() {
        let env = TestEnv::new();
        env.write_pin_file("/srv/a\n/srv/b\n");
        let settings = settings(&env);

        let result = unpin(&settings, &[PathBuf::from("/srv/a"), PathBuf::from("/nope")]).unwrap();

        assert_eq!(result.removed, vec![PathBuf::from("/srv/a")]);
        assert_eq!(result.pinned, 1);
    }

    #[test]
    fn test_check() {
        let env = TestEnv::new();
        env.write_pin_file("/srv/a\n");
        let settings = settings(&env);

        assert!(check(&settings, Path::new("/srv/a/")).unwrap().pinned);
        assert!(!check(&settings, Path::new("/srv/b")).unwrap().pinned);
    }

    #[test]
    fn test_sort_with_tags() {
        let env = TestEnv::new();
        env.write_pin_file("/d/z\n");
        let settings = settings(&env);
        let paths: Vec<PathBuf> = ["/d/b2", "/d/a10", "/d/a9", "/d/z"]
            .iter()
            .map(PathBuf::from)
            .collect();

        let result = sort(&settings, &paths, PIN_SORT_KEY, true).unwrap();

        let order: Vec<_> = result.entries.iter().map(|e| e.path.clone()).collect();
        assert_eq!(
            order,
            vec![
                PathBuf::from("/d/z"),
                PathBuf::from("/d/a9"),
                PathBuf::from("/d/a10"),
                PathBuf::from("/d/b2"),
            ]
        );
        assert_eq!(result.entries[0].tags, Some(vec!["pin".to_string()]));
        assert_eq!(result.entries[1].tags, Some(Vec::new()));
        assert!(result.to_human().starts_with("* /d/z  [pin]"));
    }

    #[test]
    fn test_sort_natural_key() {
        let env = TestEnv::new();
        env.write_pin_file("/d/z\n");
        let settings = settings(&env);
        let paths = vec![PathBuf::from("/d/z"), PathBuf::from("/d/a")];

        let result = sort(&settings, &paths, NATURAL_SORT_KEY, false).unwrap();

        assert_eq!(result.entries[0].path, PathBuf::from("/d/a"));
        assert!(result.entries[1].pinned);
        assert!(result.entries[0].tags.is_none());
    }

    #[test]
    fn test_sort_unknown_key() {
        let env = TestEnv::new();
        let settings = settings(&env);

        let err = sort(&settings, &[PathBuf::from("/a")], "size", false).unwrap_err();

        assert!(matches!(err, Error::UnknownSortKey(ref msg) if msg.contains("natural, pin")));
    }

    #[test]
    fn test_bindings_default() {
        let env = TestEnv::new();
        let settings = settings(&env);

        let human = bindings(&settings).unwrap().to_human();

        assert_eq!(human, "map ++ chain pin; reset\nmap -- chain unpin; reset");
    }

    #[test]
    fn test_config_init_does_not_clobber() {
        let env = TestEnv::new();
        let settings = settings(&env);

        assert!(config_init(&settings, false).unwrap().created);
        assert!(!config_init(&settings, false).unwrap().created);
        assert!(config_init(&settings, true).unwrap().created);
        assert!(config_path(&settings).config_exists);
    }

    #[test]
    fn test_config_init_keeps_effective_settings() {
        let env = TestEnv::new();
        std::fs::write(
            env.data_path().join("config.kdl"),
            "pin-file \"/srv/pins\"\noutput-format \"human\"\ntag \"starred\"\n",
        )
        .unwrap();
        let settings = settings(&env);

        assert!(config_init(&settings, true).unwrap().created);

        let written = load_config(&settings.config_file).unwrap();
        assert_eq!(written.pin_file.as_deref(), Some("/srv/pins"));
        assert_eq!(written.output_format, Some(OutputFormat::Human));
        assert_eq!(written.tag.as_deref(), Some("starred"));
        assert_eq!(written.pin_keys.as_deref(), Some("++"));
    }

    #[test]
    fn test_config_init_leaves_default_pin_file_implicit() {
        let env = TestEnv::new();
        let settings = settings(&env);

        config_init(&settings, false).unwrap();

        let written = load_config(&settings.config_file).unwrap();
        assert_eq!(written.pin_file, None);
        assert_eq!(written.output_format, Some(OutputFormat::Json));
    }
}
