use serde::Deserialize;

use crate::error::BindError;
use crate::types::ClassKind;

/// Build-time switches for library bindings.
///
/// Read from the `[bindings]` table of `zbind.toml` by the CLI; every field
/// defaults, so an empty table is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BinderConfig {
    /// Reject fields whose arity is marked unverified instead of warning.
    pub strict_arity: bool,
    /// Bindings to install even though their descriptor is disabled.
    pub enable: Vec<String>,
    /// Bindings to leave out even though their descriptor is enabled.
    /// Takes precedence over `enable`.
    pub disable: Vec<String>,
}

impl BinderConfig {
    pub fn is_enabled(&self, name: &str, default: bool) -> bool {
        if self.disable.iter().any(|n| n == name) {
            false
        } else if self.enable.iter().any(|n| n == name) {
            true
        } else {
            default
        }
    }

    /// Every name in `enable`/`disable` must be one of `known`.
    pub fn check_names<'a>(
        &self,
        class: ClassKind,
        known: impl Iterator<Item = &'a str> + Clone,
    ) -> Result<(), BindError> {
        for name in self.enable.iter().chain(&self.disable) {
            if !known.clone().any(|k| k == name.as_str()) {
                return Err(BindError::UnknownBinding {
                    class,
                    name: name.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_follows_descriptor() {
        let cfg = BinderConfig::default();
        assert!(cfg.is_enabled("X", true));
        assert!(!cfg.is_enabled("D", false));
    }

    #[test]
    fn test_disable_wins() {
        let cfg = BinderConfig {
            enable: vec!["D".into()],
            disable: vec!["D".into()],
            ..Default::default()
        };
        assert!(!cfg.is_enabled("D", false));
    }

    #[test]
    fn test_unknown_names_rejected() {
        let cfg = BinderConfig {
            enable: vec!["Nope".into()],
            ..Default::default()
        };
        let known = ["X", "Y"];
        assert_eq!(
            cfg.check_names(ClassKind::Ffc, known.iter().copied()),
            Err(BindError::UnknownBinding {
                class: ClassKind::Ffc,
                name: "Nope".into()
            })
        );
    }

    #[test]
    fn test_parse_from_toml() {
        let cfg: BinderConfig = toml::from_str(
            r#"
            strict_arity = true
            enable = ["WasTriggered"]
            "#,
        )
        .unwrap();
        assert!(cfg.strict_arity);
        assert_eq!(cfg.enable, vec!["WasTriggered".to_string()]);
        assert!(cfg.disable.is_empty());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let parsed: Result<BinderConfig, _> = toml::from_str("strict = true");
        assert!(parsed.is_err());
    }
}
