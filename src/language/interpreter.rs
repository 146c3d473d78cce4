use thiserror::Error;
use tracing::{debug, trace};
use crate::language::ast::Node;
use crate::language::environment::Environment;
use crate::language::io::{EnvironmentVariables, Printer, ProcessEnvironment, Reader, StdinReader, StdoutPrinter};
use crate::language::lexer::{TokenKind, TokenPos};
use crate::language::version::GrammarVersion;

pub mod value;
pub mod arithmetic;


use value::Value;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("Undefined variable '{name}'")]
    UndefinedVariable { name: String, pos: TokenPos },
    #[error("Undefined environment variable '{name}'")]
    UndefinedEnvironmentVariable { name: String, pos: TokenPos },
    #[error("Variable '{name}' is already declared")]
    AlreadyDeclared { name: String, pos: TokenPos },
    #[error("Cannot reassign constant '{name}'")]
    ImmutableReassignment { name: String, pos: TokenPos },
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String, pos: TokenPos },
    #[error("Division by zero")]
    DivisionByZero { pos: TokenPos },
    #[error("Unsupported operator '{operator}'")]
    UnsupportedOperator { operator: String, pos: TokenPos },
    #[error("Unsupported operands for '{operator}': {left} and {right}")]
    UnsupportedOperands { operator: String, left: &'static str, right: &'static str, pos: TokenPos },
    #[error("Unsupported node kind: {kind}")]
    UnsupportedNodeKind { kind: &'static str, pos: TokenPos },
    #[error("Expected a value for {context}")]
    MissingValue { context: &'static str, pos: TokenPos },
    #[error("Failed to read input: {reason}")]
    InputUnavailable { reason: String, pos: TokenPos },
}

impl RuntimeError {
    pub fn get_pos(&self) -> Option<TokenPos> {
        Some(match self {
            RuntimeError::UndefinedVariable { pos, .. }
            | RuntimeError::UndefinedEnvironmentVariable { pos, .. }
            | RuntimeError::AlreadyDeclared { pos, .. }
            | RuntimeError::ImmutableReassignment { pos, .. }
            | RuntimeError::TypeMismatch { pos, .. }
            | RuntimeError::DivisionByZero { pos }
            | RuntimeError::UnsupportedOperator { pos, .. }
            | RuntimeError::UnsupportedOperands { pos, .. }
            | RuntimeError::UnsupportedNodeKind { pos, .. }
            | RuntimeError::MissingValue { pos, .. }
            | RuntimeError::InputUnavailable { pos, .. } => *pos,
        })
    }
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Tree-walking evaluator.
///
/// Owns its variable environment and borrows syntax trees read-only. All printing, input
/// and environment variable access goes through the injected collaborators.
pub struct Interpreter<P: Printer, R: Reader, E: EnvironmentVariables> {
    version: GrammarVersion,
    environment: Environment,

    printer: P,
    reader: R,
    env_vars: E,
}

impl Interpreter<StdoutPrinter, StdinReader, ProcessEnvironment> {
    pub fn with_stdio(version: GrammarVersion) -> Self {
        Interpreter::new(version, StdoutPrinter, StdinReader, ProcessEnvironment)
    }
}

impl<P: Printer, R: Reader, E: EnvironmentVariables> Interpreter<P, R, E> {
    pub fn new(version: GrammarVersion, printer: P, reader: R, env_vars: E) -> Self {
        Interpreter {
            version,
            environment: Environment::new(),
            printer, reader, env_vars,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn get_var(&self, name: &str) -> Option<Value> {
        self.environment.get(name).cloned()
    }

    pub fn printer(&self) -> &P {
        &self.printer
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Executes statements in order, stopping at the first error; returns the last result.
    pub fn run(&mut self, nodes: &[Node]) -> RuntimeResult<Option<Value>> {
        let mut last = None;

        for node in nodes {
            debug!(statement = ?node, "executing");
            last = self.execute(node)?;
        }

        Ok(last)
    }

    pub fn execute(&mut self, node: &Node) -> RuntimeResult<Option<Value>> {
        trace!(kind = node.kind_name(), position = %node.position(), "evaluating");

        match node {
            Node::Literal { value, kind, position } => self.evaluate_literal(value, *kind, *position).map(Some),
            Node::Binary { left, right, operator, position } => {
                let left = self.execute(left)?
                    .ok_or(RuntimeError::MissingValue { context: "left operand", pos: left.position() })?;
                let right = self.execute(right)?
                    .ok_or(RuntimeError::MissingValue { context: "right operand", pos: right.position() })?;

                arithmetic::apply(operator, left, right, *position).map(Some)
            },
            Node::Print { expression, position } => {
                let value = self.execute(expression)?
                    .ok_or(RuntimeError::MissingValue { context: "println argument", pos: *position })?;

                self.printer.print(&value.to_string());
                Ok(None)
            },
            Node::Declaration { keyword, id, expr, position, .. } => {
                if self.environment.contains(id) {
                    return Err(RuntimeError::AlreadyDeclared { name: id.clone(), pos: *position });
                }

                let value = self.execute(expr)?;

                if let Some(value) = &value {
                    self.environment.declare(id, keyword, value.clone());
                }

                Ok(value)
            },
            Node::Assignation { id, expression, position } => {
                let value = self.execute(expression)?
                    .ok_or(RuntimeError::MissingValue { context: "assignment", pos: *position })?;

                if let Some(current) = self.environment.get(id) {
                    if self.environment.is_immutable(id) {
                        return Err(RuntimeError::ImmutableReassignment { name: id.clone(), pos: *position });
                    }

                    if !current.same_type(&value) {
                        return Err(RuntimeError::TypeMismatch {
                            expected: current.type_name().to_owned(),
                            found: value.type_name().to_owned(),
                            pos: *position,
                        });
                    }
                }

                self.environment.assign(id, value.clone());
                Ok(Some(value))
            },
            Node::Block { statements, .. } => {
                let mut last = None;

                for statement in statements {
                    last = self.execute(statement)?;
                }

                Ok(last)
            },
            Node::Conditional { position, .. } if self.version == GrammarVersion::V1_0 =>
                Err(RuntimeError::UnsupportedNodeKind { kind: node.kind_name(), pos: *position }),
            Node::Conditional { condition, then_block, else_block, .. } => {
                match self.execute(condition)? {
                    Some(Value::Bool(true)) => self.execute(then_block),
                    Some(Value::Bool(false)) => self.execute(else_block),
                    other => Err(RuntimeError::TypeMismatch {
                        expected: String::from("boolean"),
                        found: other.map_or("no value", |value| value.type_name()).to_owned(),
                        pos: condition.position(),
                    }),
                }
            },
            Node::FunctionCall { name, argument, position } => self.call(name, argument, *position),
            Node::Nil { .. } => Ok(None),
        }
    }

    fn evaluate_literal(&self, value: &str, kind: TokenKind, pos: TokenPos) -> RuntimeResult<Value> {
        match kind {
            TokenKind::NumberLiteral => value.parse::<i64>().map(Value::Int)
                .or_else(|_| value.parse::<f32>().map(Value::Float))
                .map_err(|_| RuntimeError::TypeMismatch {
                    expected: String::from("number"),
                    found: format!("'{}'", value),
                    pos,
                }),
            TokenKind::StringLiteral => Ok(Value::Str(value.to_owned())),
            TokenKind::BooleanLiteral => match value {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(RuntimeError::TypeMismatch {
                    expected: String::from("boolean"),
                    found: format!("'{}'", value),
                    pos,
                }),
            },
            TokenKind::Identifier => self.environment.get(value).cloned()
                .ok_or_else(|| RuntimeError::UndefinedVariable { name: value.to_owned(), pos }),
            _ => Err(RuntimeError::UnsupportedNodeKind { kind: "literal", pos }),
        }
    }

    fn call(&mut self, name: &str, argument: &Node, pos: TokenPos) -> RuntimeResult<Option<Value>> {
        let builtins = self.version == GrammarVersion::V1_1;

        match name {
            "readInput" if builtins => {
                let prompt = self.string_argument(argument)?;
                self.printer.print(&prompt);

                let raw = self.reader.input(&prompt)
                    .map_err(|err| RuntimeError::InputUnavailable { reason: err.to_string(), pos })?;
                Ok(Some(Value::from_input(&raw)))
            },
            "readEnv" if builtins => {
                let variable = self.string_argument(argument)?;

                self.env_vars.var(&variable)
                    .map(|value| Some(Value::Str(value)))
                    .ok_or(RuntimeError::UndefinedEnvironmentVariable { name: variable, pos })
            },
            _ => {
                let value = self.execute(argument)?
                    .ok_or(RuntimeError::MissingValue { context: "function argument", pos })?;

                self.printer.print(&value.to_string());
                Ok(None)
            },
        }
    }

    fn string_argument(&mut self, argument: &Node) -> RuntimeResult<String> {
        if !matches!(argument, Node::Literal { .. }) {
            return Err(RuntimeError::TypeMismatch {
                expected: String::from("string literal"),
                found: argument.kind_name().to_owned(),
                pos: argument.position(),
            });
        }

        match self.execute(argument)? {
            Some(Value::Str(text)) => Ok(text),
            other => Err(RuntimeError::TypeMismatch {
                expected: String::from("string"),
                found: other.map_or("no value", |value| value.type_name()).to_owned(),
                pos: argument.position(),
            }),
        }
    }
}
