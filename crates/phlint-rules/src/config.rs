//! Rule configuration, loadable from YAML
//!
//! Every section has defaults matching the stock rule behavior, so an
//! absent file or an empty document configures the full rule set.

use std::path::Path;

use phlint_analyze::NamePatternSet;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    pub no_factory_in_constructor: NoFactoryConfig,
    pub no_inject_on_final: NoInjectConfig,
}

impl RulesConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }
}

/// Exemptions for the constructor-factory rule: receiver types that are
/// legitimate constructor collaborators, parent classes whose subclasses
/// are exempt wholesale, and class-name patterns to skip entirely.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoFactoryConfig {
    pub allowed_types: NamePatternSet,
    pub allowed_parent_types: Vec<String>,
    pub skip_class_names: NamePatternSet,
}

impl Default for NoFactoryConfig {
    fn default() -> Self {
        Self {
            allowed_types: NamePatternSet::from_strings([
                "Symfony\\Component\\DependencyInjection\\ParameterBag\\ParameterBagInterface",
                "Doctrine\\ORM\\EntityManagerInterface",
                "Symplify\\PackageBuilder\\Parameter\\ParameterProvider",
            ]),
            allowed_parent_types: vec!["Exception".to_string()],
            skip_class_names: NamePatternSet::from_strings(["*\\ValueObject\\*"]),
        }
    }
}

/// Attribute names that mark a property as injected. Matched either as the
/// full name or by the final name segment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoInjectConfig {
    pub inject_attributes: Vec<String>,
}

impl Default for NoInjectConfig {
    fn default() -> Self {
        Self {
            inject_attributes: vec![
                "Inject".to_string(),
                "Nette\\DI\\Attributes\\Inject".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = RulesConfig::from_yaml("").unwrap();
        assert!(config
            .no_factory_in_constructor
            .allowed_types
            .is_match("Doctrine\\ORM\\EntityManagerInterface"));
        assert!(config
            .no_factory_in_constructor
            .skip_class_names
            .is_match("App\\ValueObject\\Money"));
        assert_eq!(config.no_inject_on_final.inject_attributes.len(), 2);
    }

    #[test]
    fn sections_override_independently() {
        let yaml = "
no_factory_in_constructor:
  allowed_types:
    - 'App\\Clock\\ClockInterface'
  allowed_parent_types: []
  skip_class_names: []
";
        let config = RulesConfig::from_yaml(yaml).unwrap();
        assert!(config
            .no_factory_in_constructor
            .allowed_types
            .is_match("App\\Clock\\ClockInterface"));
        assert!(!config
            .no_factory_in_constructor
            .allowed_types
            .is_match("Doctrine\\ORM\\EntityManagerInterface"));
        assert!(config.no_factory_in_constructor.allowed_parent_types.is_empty());
        // untouched section keeps defaults
        assert_eq!(
            config.no_inject_on_final.inject_attributes[0],
            "Inject"
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(RulesConfig::from_yaml("no_such_rule: {}").is_err());
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        use std::io::Write;
        file.write_all(b"no_inject_on_final:\n  inject_attributes: ['Autowire']\n")
            .unwrap();
        let config = RulesConfig::load(file.path()).unwrap();
        assert_eq!(
            config.no_inject_on_final.inject_attributes,
            vec!["Autowire".to_string()]
        );
    }
}
