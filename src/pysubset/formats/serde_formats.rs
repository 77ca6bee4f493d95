//! JSON and YAML output through serde.

use super::{Format, FormatError};
use crate::pysubset::ast::Module;

pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, module: &Module) -> Result<String, FormatError> {
        Ok(serde_json::to_string_pretty(module)?)
    }
}

pub struct YamlFormat;

impl Format for YamlFormat {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, module: &Module) -> Result<String, FormatError> {
        Ok(serde_yaml::to_string(module)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pysubset::ast::{Expr, Stmt};

    #[test]
    fn test_json_tags_nodes() {
        let module = Module::new(vec![Stmt::assign(Expr::store("x"), Expr::bool(true))]);
        let json = JsonFormat.serialize(&module).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["body"][0]["node"], "Assign");
        assert_eq!(value["body"][0]["target"]["ctx"], "Store");
        assert_eq!(value["body"][0]["value"]["value"], true);
    }

    #[test]
    fn test_yaml_mentions_every_node() {
        let module = Module::new(vec![Stmt::expr(Expr::neg(Expr::int(4)))]);
        let yaml = YamlFormat.serialize(&module).unwrap();
        assert!(yaml.contains("node: Expr"));
        assert!(yaml.contains("node: UnaryOp"));
        assert!(yaml.contains("op: Neg"));
    }
}
