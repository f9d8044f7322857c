//! phlint-rules: the bundled rule set
//!
//! Three structural rules over constructor hygiene and member access,
//! configurable through [`RulesConfig`]. `default_rules` builds the full
//! set; `build_engine` registers it on a fresh engine.

pub mod config;
pub mod no_factory_in_constructor;
pub mod no_inject_on_final;
pub mod require_this_call_on_local_method;

pub use config::{ConfigError, NoFactoryConfig, NoInjectConfig, RulesConfig};
pub use no_factory_in_constructor::NoFactoryInConstructorRule;
pub use no_inject_on_final::NoInjectOnFinalRule;
pub use require_this_call_on_local_method::RequireThisCallOnLocalMethodRule;

use phlint_analyze::{Rule, RuleEngine};

/// All bundled rules, in their stable registration order.
pub fn default_rules(config: RulesConfig) -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(NoFactoryInConstructorRule::new(
            config.no_factory_in_constructor,
        )),
        Box::new(RequireThisCallOnLocalMethodRule::new()),
        Box::new(NoInjectOnFinalRule::new(config.no_inject_on_final)),
    ]
}

/// Engine preloaded with the bundled rule set.
pub fn build_engine(config: RulesConfig) -> RuleEngine {
    let mut engine = RuleEngine::new();
    for rule in default_rules(config) {
        engine.register(rule);
    }
    engine
}
