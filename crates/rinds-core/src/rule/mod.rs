mod descriptor;
mod load;
mod rule_type;
pub mod version;

pub use descriptor::RuleDescriptor;
pub use load::{load_rules, parse_rules};
pub use rule_type::RuleType;
