use serde::Serialize;
use tracing::debug;

use crate::{
    ast::{Program, Statement},
    error::{ErrorKind, RuntimeError},
    interpreter::evaluator::core::{EvalResult, Interpreter},
};

/// The only language version this interpreter runs.
pub const SUPPORTED_VERSION: &str = "0.01";

/// A 2D line graph recorded by `graph(x, y, [title])`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphRecord {
    /// Caption; `Graph N` when none was given.
    pub title: String,
    /// The x coordinates.
    pub x:     Vec<f64>,
    /// The y coordinates.
    pub y:     Vec<f64>,
}

/// A 3D brick-with-hole recorded by `graph_3d`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graph3dRecord {
    pub title:       String,
    /// Shape tag, always `brick_with_hole`.
    #[serde(rename = "type")]
    pub kind:        String,
    pub width:       f64,
    pub height:      f64,
    pub depth:       f64,
    pub hole_width:  f64,
    pub hole_height: f64,
    pub hole_depth:  f64,
}

/// One column of a recorded table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TableColumn {
    /// A column evaluated from a numeric array.
    Numbers(Vec<f64>),
    /// A column written as an array of string literals.
    Strings(Vec<String>),
}

impl TableColumn {
    /// Number of cells in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Numbers(cells) => cells.len(),
            Self::Strings(cells) => cells.len(),
        }
    }

    /// Returns `true` for a column without cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A table recorded by `table(headers, col1, ...)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRecord {
    /// Column titles.
    pub headers: Vec<String>,
    /// Column data, one entry per header.
    pub columns: Vec<TableColumn>,
}

/// Everything a program run produced.
///
/// On failure `success` is `false` and `error` holds the message of the
/// first error. Output lines and records produced before the failure are
/// kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvaluationResult {
    /// `true` when every statement executed without error.
    pub success:    bool,
    /// Printed lines, in order.
    pub outputs:    Vec<String>,
    /// The error message of a failed run.
    pub error:      Option<String>,
    /// The category of the error of a failed run.
    #[serde(skip)]
    pub error_kind: Option<ErrorKind>,
    pub graphs:     Vec<GraphRecord>,
    pub graphs_3d:  Vec<Graph3dRecord>,
    pub tables:     Vec<TableRecord>,
}

impl EvaluationResult {
    /// A failed result for a program that could not be parsed.
    #[must_use]
    pub fn parse_failure(message: String) -> Self {
        Self { success: false,
               error: Some(message),
               ..Self::default() }
    }
}

/// Checks a `@version` value.
///
/// # Example
/// ```
/// use madola::interpreter::program::check_version;
///
/// assert!(check_version("0.01", 1).is_ok());
/// let err = check_version("0.02", 1).unwrap_err();
/// assert_eq!(err.to_string(), "Error on line 1: Unsupported version: 0.02. Expected version 0.01");
/// ```
pub fn check_version(version: &str, line: usize) -> EvalResult<()> {
    if version == SUPPORTED_VERSION {
        Ok(())
    } else {
        Err(RuntimeError::UnsupportedVersion { version: version.to_string(),
                                               line })
    }
}

impl Interpreter {
    /// Runs a whole program.
    ///
    /// The first statement must be `@version 0.01`; otherwise nothing runs.
    /// Output lines and records accumulate across calls on the same
    /// interpreter, and the result carries all of them.
    ///
    /// # Example
    /// ```
    /// use madola::{interpreter::{evaluator::core::Interpreter, value::core::Value}, parse_program};
    ///
    /// let program = parse_program("@version 0.01\nx := 2 + 3;").unwrap();
    /// let mut interpreter = Interpreter::default();
    /// let result = interpreter.run(&program);
    ///
    /// assert!(result.success);
    /// assert!(result.outputs.is_empty());
    /// assert_eq!(interpreter.get_variable("x"), Some(&Value::Number(5.0)));
    /// ```
    pub fn run(&mut self, program: &Program) -> EvaluationResult {
        let outcome = self.execute_program(program);
        let (error, error_kind) = match outcome {
            Ok(()) => (None, None),
            Err(err) => {
                debug!(error = %err, "program failed");
                (Some(err.to_string()), Some(err.kind()))
            },
        };

        EvaluationResult { success: error.is_none(),
                           outputs: self.outputs.clone(),
                           error,
                           error_kind,
                           graphs: self.graphs.clone(),
                           graphs_3d: self.graphs_3d.clone(),
                           tables: self.tables.clone() }
    }

    fn execute_program(&mut self, program: &Program) -> EvalResult<()> {
        let Some((first, rest)) = program.statements.split_first() else {
            return Err(RuntimeError::MissingVersion { line: 1 });
        };
        let Statement::Version { version, line } = first else {
            return Err(RuntimeError::MissingVersion { line: first.line_number() });
        };
        check_version(version, *line)?;
        debug!(statements = rest.len(), "running program");

        for statement in rest {
            // Top-level `return` and `break` are rejected where they occur.
            self.exec_statement(statement)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parse_program;

    #[test]
    fn missing_version_runs_nothing() {
        let program = parse_program("print(1);").unwrap();
        let mut interpreter = Interpreter::default();
        let result = interpreter.run(&program);
        assert!(!result.success);
        assert_eq!(result.error_kind, Some(ErrorKind::MissingVersion));
        assert!(result.outputs.is_empty());
    }

    #[test]
    fn empty_program_is_missing_its_version() {
        let result = Interpreter::default().run(&Program::default());
        assert_eq!(result.error_kind, Some(ErrorKind::MissingVersion));
    }

    #[test]
    fn partial_output_survives_a_failure() {
        let program = parse_program("@version 0.01\nprint(1);\nprint(1/0);\nprint(2);").unwrap();
        let result = Interpreter::default().run(&program);
        assert!(!result.success);
        assert_eq!(result.outputs, vec!["1"]);
        assert_eq!(result.error_kind, Some(ErrorKind::DivisionByZero));
    }

    #[test]
    fn result_serializes_records_by_name() {
        let result = EvaluationResult { success: true,
                                        graphs_3d: vec![Graph3dRecord { title:       "b".to_string(),
                                                                        kind:        "brick_with_hole".to_string(),
                                                                        width:       1.0,
                                                                        height:      1.0,
                                                                        depth:       1.0,
                                                                        hole_width:  0.5,
                                                                        hole_height: 0.5,
                                                                        hole_depth:  0.5, }],
                                        tables: vec![TableRecord { headers: vec!["n".to_string()],
                                                                   columns: vec![TableColumn::Strings(vec!["a".to_string()])], }],
                                        ..EvaluationResult::default() };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["graphs_3d"][0]["type"], "brick_with_hole");
        assert_eq!(json["tables"][0]["columns"][0][0], "a");
        assert!(json.get("error_kind").is_none());
    }
}
