//! Line-oriented inspection shell
//!
//! A [`Shell`] keeps a scope of named values and turns `%oi` / `%di` lines
//! into inspector trees.

use std::str::FromStr;

use log::debug;
use thiserror::Error;

use crate::config::InspectorConfig;
use crate::expr::{parse_expr, EvalError, Evaluator, Scope};
use crate::object::Value;
use crate::tree::{Inspector, InspectorKind};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShellError {
    #[error("Unknown magic: %{name}")]
    UnknownMagic { name: String },

    #[error("Not a magic command: '{line}'")]
    NotAMagic { line: String },

    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Line magics understood by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Magic {
    /// `%oi`: attribute inspector
    ObjectInspector,
    /// `%di`: container inspector
    DataInspector,
}

impl Magic {
    pub fn name(self) -> &'static str {
        match self {
            Magic::ObjectInspector => "oi",
            Magic::DataInspector => "di",
        }
    }

    pub fn kind(self) -> InspectorKind {
        match self {
            Magic::ObjectInspector => InspectorKind::Object,
            Magic::DataInspector => InspectorKind::Data,
        }
    }
}

impl FromStr for Magic {
    type Err = ShellError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "oi" => Ok(Magic::ObjectInspector),
            "di" => Ok(Magic::DataInspector),
            other => Err(ShellError::UnknownMagic {
                name: other.to_string(),
            }),
        }
    }
}

/// Shell session: variables in scope plus the config for new trees
#[derive(Debug, Default)]
pub struct Shell {
    evaluator: Evaluator,
    config: InspectorConfig,
}

impl Shell {
    pub fn new(config: InspectorConfig) -> Self {
        Self {
            evaluator: Evaluator::new(),
            config,
        }
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: Value) {
        self.evaluator.set_variable(name, value);
    }

    pub fn remove_variable(&mut self, name: &str) -> Option<Value> {
        self.evaluator.variables_mut().remove(name)
    }

    /// Local variables in definition order
    pub fn locals(&self) -> &Scope {
        self.evaluator.variables()
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Replace the config used by trees built from now on
    pub fn set_config(&mut self, config: InspectorConfig) {
        self.config = config;
    }

    /// Evaluate an expression in the shell scope
    pub fn eval(&self, source: &str) -> Result<Value, EvalError> {
        self.evaluator.eval(&parse_expr(source)?)
    }

    /// `%oi`: attribute inspector over an expression, or over all locals
    pub fn object_inspector(&self, line: &str) -> Result<Inspector, EvalError> {
        self.inspect(line, InspectorKind::Object)
    }

    /// `%di`: container inspector over an expression, or over all locals
    pub fn data_inspector(&self, line: &str) -> Result<Inspector, EvalError> {
        self.inspect(line, InspectorKind::Data)
    }

    pub fn inspect(&self, line: &str, kind: InspectorKind) -> Result<Inspector, EvalError> {
        let source = line.trim();
        let config = self.config.clone();

        if source.is_empty() {
            debug!("inspecting {} locals", self.locals().len());
            let named = self
                .locals()
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()));
            return Ok(Inspector::with_values(kind, config, Vec::new(), named));
        }

        let value = self.eval(source)?;
        Ok(Inspector::with_values(kind, config, [value], Vec::new()))
    }

    /// Run a `%name args` line
    pub fn run_line(&self, line: &str) -> Result<Inspector, ShellError> {
        let Some(command) = line.trim_start().strip_prefix('%') else {
            return Err(ShellError::NotAMagic {
                line: line.to_string(),
            });
        };
        let (name, args) = command
            .split_once(char::is_whitespace)
            .unwrap_or((command, ""));
        let magic: Magic = name.parse()?;
        debug!("running %{} with '{}'", magic.name(), args.trim());
        Ok(self.inspect(args, magic.kind())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeId;
    use pretty_assertions::assert_eq;

    fn shell() -> Shell {
        let mut shell = Shell::new(InspectorConfig::default());
        shell.set_variable("numbers", Value::list([Value::I32(1), Value::I32(2)]));
        shell.set_variable("name", Value::from("objscope"));
        shell
    }

    fn root_names(inspector: &Inspector) -> Vec<Option<String>> {
        inspector
            .roots()
            .iter()
            .map(|&id| inspector.node(id).and_then(|n| n.field_name()).map(str::to_string))
            .collect()
    }

    #[test]
    fn test_empty_line_inspects_all_locals() {
        let inspector = shell().object_inspector("   ").unwrap();
        assert_eq!(inspector.kind(), InspectorKind::Object);
        assert_eq!(
            root_names(&inspector),
            vec![Some("numbers".to_string()), Some("name".to_string())]
        );
    }

    #[test]
    fn test_expression_gives_single_anonymous_root() {
        let mut inspector = shell().data_inspector("numbers").unwrap();
        assert_eq!(inspector.kind(), InspectorKind::Data);
        assert_eq!(root_names(&inspector), vec![None]);

        inspector.expand(NodeId::from(0)).unwrap();
        let labels: Vec<_> = inspector
            .view()
            .nodes
            .iter()
            .skip(1)
            .map(|node| node.field_name.clone())
            .collect();
        assert_eq!(labels, vec![Some("0".to_string()), Some("1".to_string())]);
    }

    #[test]
    fn test_eval_errors_propagate() {
        assert_eq!(
            shell().object_inspector("missing").unwrap_err(),
            EvalError::unknown_var("missing")
        );
        assert!(matches!(
            shell().data_inspector("numbers(1)"),
            Err(EvalError::UnsupportedExpression { .. })
        ));
    }

    #[test]
    fn test_run_line_dispatches_magics() {
        let shell = shell();
        assert_eq!(shell.run_line("%oi").unwrap().kind(), InspectorKind::Object);
        assert_eq!(
            shell.run_line("  %di numbers[0]").unwrap().kind(),
            InspectorKind::Data
        );
        assert_eq!(
            shell.run_line("%xi name").unwrap_err(),
            ShellError::UnknownMagic {
                name: "xi".to_string()
            }
        );
        assert!(matches!(shell.run_line("name"), Err(ShellError::NotAMagic { .. })));
        assert!(matches!(
            shell.run_line("%oi nope"),
            Err(ShellError::Eval(EvalError::UnknownVariable { .. }))
        ));
    }

    #[test]
    fn test_config_applies_to_new_trees() {
        let mut shell = shell();
        shell.set_config(InspectorConfig {
            max_height: "5em".to_string(),
            ..Default::default()
        });
        assert!(shell.run_line("%oi name").unwrap().to_html().contains("max-height: 5em"));
    }
}
