//! Configuration discovery and effective settings resolution.
//!
//! The linter configuration is read from `.sass-lint.yml` or, failing that,
//! `.sasslintrc` (YAML or JSON), looked up in the working directory and then
//! in each ancestor. The walk stops before the user's home directory.
//! Defaults:
//! - `options`, `files`, `rules`: empty
//! - `output`: `human` (`options.formatter: json` selects JSON)
//! - engine command: [`crate::engine::DEFAULT_ENGINE_CMD`]
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::engine::DEFAULT_ENGINE_CMD;
use crate::error::ConfigError;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub const PRIMARY_CONFIG: &str = ".sass-lint.yml";
pub const FALLBACK_CONFIG: &str = ".sasslintrc";

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    options: Option<Mapping>,
    files: Option<Mapping>,
    rules: Option<Mapping>,
}

#[derive(Debug, Default, Clone, PartialEq)]
/// Parsed configuration. Everything except `rules.indentation` is passed through.
pub struct ResolvedConfig {
    pub options: Mapping,
    pub files: Mapping,
    pub rules: Mapping,
}

impl ResolvedConfig {
    /// `base-indent` option of the `indentation` rule.
    ///
    /// Accepts the `[severity, {base-indent: N}]` form as well as a bare
    /// options mapping. Values that are not non-negative integers are ignored.
    pub fn base_indent(&self) -> Option<usize> {
        let rule = self.rules.get("indentation")?;
        let options = match rule {
            Value::Sequence(seq) => seq.get(1)?,
            Value::Mapping(_) => rule,
            _ => return None,
        };
        let raw = options.get("base-indent")?;
        match raw.as_u64().and_then(|n| usize::try_from(n).ok()) {
            Some(n) => Some(n),
            None => {
                if !raw.is_null() {
                    tracing::warn!(value = ?raw, "ignoring invalid indentation base-indent");
                }
                None
            }
        }
    }

    /// `options.formatter`, when set to a string.
    pub fn formatter(&self) -> Option<&str> {
        self.options.get("formatter")?.as_str()
    }
}

#[derive(Debug, Clone)]
/// Fully-resolved settings used by the lint command after applying precedence.
pub struct Effective {
    pub config: ResolvedConfig,
    pub config_path: Option<PathBuf>,
    pub output: String,
    pub engine_cmd: String,
    pub base_indent: Option<usize>,
}

/// Home directory as reported by the environment.
pub fn home_dir() -> Option<PathBuf> {
    ["HOME", "HOMEPATH", "USERPROFILE"]
        .iter()
        .filter_map(std::env::var_os)
        .find(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Walk upward from `start` looking for a config file.
///
/// Each directory is checked for the primary name, then the fallback. `start`
/// itself is always checked; an ancestor exactly equal to `home` ends the walk
/// without being searched.
pub fn find_config(start: &Path, home: Option<&Path>) -> Option<PathBuf> {
    let mut cur = start;
    loop {
        for name in [PRIMARY_CONFIG, FALLBACK_CONFIG] {
            let p = cur.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
        match cur.parent() {
            Some(p) if Some(p) != home => cur = p,
            _ => return None,
        }
    }
}

/// Parse one configuration file. An empty file yields defaults.
pub fn read_config(path: &Path) -> Result<ResolvedConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_err = |source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    };
    let value: Value = serde_yaml::from_str(&s).map_err(parse_err)?;
    if value.is_null() {
        return Ok(ResolvedConfig::default());
    }
    let raw: RawConfig = serde_yaml::from_value(value).map_err(parse_err)?;
    Ok(ResolvedConfig {
        options: raw.options.unwrap_or_default(),
        files: raw.files.unwrap_or_default(),
        rules: raw.rules.unwrap_or_default(),
    })
}

/// Load the configuration, from `explicit` if given, otherwise by discovery from `cwd`.
pub fn load_config(
    explicit: Option<&Path>,
    cwd: &Path,
) -> Result<(ResolvedConfig, Option<PathBuf>), ConfigError> {
    let path = match explicit {
        Some(p) => {
            let p = cwd.join(p);
            if !p.is_file() {
                return Err(ConfigError::NotFound(p));
            }
            Some(p)
        }
        None => find_config(cwd, home_dir().as_deref()),
    };
    match path {
        Some(p) => {
            tracing::debug!(path = %p.display(), "loading config");
            Ok((read_config(&p)?, Some(p)))
        }
        None => Ok((ResolvedConfig::default(), None)),
    }
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cwd: &Path,
    cli_config: Option<&Path>,
    cli_output: Option<&str>,
    cli_engine: Option<&str>,
) -> Result<Effective, ConfigError> {
    let (config, config_path) = load_config(cli_config, cwd)?;

    let output = cli_output
        .map(|s| s.to_string())
        .or_else(|| {
            config
                .formatter()
                .map(|f| if f == "json" { "json" } else { "human" }.to_string())
        })
        .unwrap_or_else(|| "human".to_string());

    let engine_cmd = cli_engine
        .map(|s| s.to_string())
        .unwrap_or_else(|| DEFAULT_ENGINE_CMD.to_string());

    let base_indent = config.base_indent();

    Ok(Effective {
        config,
        config_path,
        output,
        engine_cmd,
        base_indent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn cfg(yaml: &str) -> ResolvedConfig {
        let dir = tempdir().unwrap();
        let p = dir.path().join(PRIMARY_CONFIG);
        fs::write(&p, yaml).unwrap();
        read_config(&p).unwrap()
    }

    #[test]
    fn base_indent_from_sass_lint_rule_form() {
        let c = cfg("rules:\n  indentation:\n    - 1\n    - size: 2\n      base-indent: 4\n");
        assert_eq!(c.base_indent(), Some(4));
    }

    #[test]
    fn base_indent_absent_or_invalid() {
        assert_eq!(cfg("rules:\n  indentation: 1\n").base_indent(), None);
        assert_eq!(cfg("rules: {}\n").base_indent(), None);
        assert_eq!(
            cfg("rules:\n  indentation: [1, {base-indent: -2}]\n").base_indent(),
            None
        );
        assert_eq!(
            cfg("rules:\n  indentation: [1, {base-indent: two}]\n").base_indent(),
            None
        );
    }

    #[test]
    fn empty_and_null_sections_default() {
        assert_eq!(cfg(""), ResolvedConfig::default());
        let c = cfg("options:\nrules:\n");
        assert!(c.options.is_empty());
        assert!(c.rules.is_empty());
    }

    #[test]
    fn json_sasslintrc_is_accepted() {
        let dir = tempdir().unwrap();
        let p = dir.path().join(FALLBACK_CONFIG);
        fs::write(
            &p,
            r#"{"options":{"formatter":"json"},"rules":{"indentation":[2,{"base-indent":2}]}}"#,
        )
        .unwrap();
        let c = read_config(&p).unwrap();
        assert_eq!(c.formatter(), Some("json"));
        assert_eq!(c.base_indent(), Some(2));
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempdir().unwrap();
        let p = dir.path().join(PRIMARY_CONFIG);
        fs::write(&p, "rules: [unclosed\n").unwrap();
        assert!(matches!(read_config(&p), Err(ConfigError::Parse { .. })));
        fs::write(&p, "rules: 3\n").unwrap();
        assert!(matches!(read_config(&p), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn primary_wins_over_fallback() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(PRIMARY_CONFIG), "").unwrap();
        fs::write(dir.path().join(FALLBACK_CONFIG), "").unwrap();
        assert_eq!(
            find_config(dir.path(), None),
            Some(dir.path().join(PRIMARY_CONFIG))
        );
    }

    #[test]
    fn walks_up_to_ancestor() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(FALLBACK_CONFIG), "").unwrap();
        assert_eq!(
            find_config(&nested, None),
            Some(dir.path().join(FALLBACK_CONFIG))
        );
    }

    #[test]
    fn walk_stops_before_home() {
        let dir = tempdir().unwrap();
        let home = dir.path().join("home");
        let nested = home.join("proj/src");
        fs::create_dir_all(&nested).unwrap();
        fs::write(home.join(PRIMARY_CONFIG), "").unwrap();
        assert_eq!(find_config(&nested, Some(&home)), None);
        // Starting in home itself still checks home
        assert_eq!(
            find_config(&home, Some(&home)),
            Some(home.join(PRIMARY_CONFIG))
        );
    }

    #[test]
    fn precedence_cli_over_config() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(PRIMARY_CONFIG),
            "options:\n  formatter: json\nrules:\n  indentation: [1, {base-indent: 2}]\n",
        )
        .unwrap();
        let eff = resolve_effective(dir.path(), None, None, None).unwrap();
        assert_eq!(eff.output, "json");
        assert_eq!(eff.base_indent, Some(2));
        assert_eq!(eff.engine_cmd, DEFAULT_ENGINE_CMD);

        let eff = resolve_effective(dir.path(), None, Some("human"), Some("my-linter")).unwrap();
        assert_eq!(eff.output, "human");
        assert_eq!(eff.engine_cmd, "my-linter");
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempdir().unwrap();
        let res = resolve_effective(dir.path(), Some(Path::new("nope.yml")), None, None);
        assert!(matches!(res, Err(ConfigError::NotFound(_))));
    }
}
