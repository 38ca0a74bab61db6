use tracing::debug;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        program::{Graph3dRecord, GraphRecord, TableColumn, TableRecord},
        value::core::Value,
    },
    util::num::format_fixed6,
};

/// Default brick and hole dimensions of a 3D graph:
/// width, height, depth, hole width, hole height, hole depth.
const BRICK_DEFAULTS: [f64; 6] = [4.0, 2.0, 3.0, 2.0, 1.0, 1.5];

fn argument_count(details: String, line: usize) -> RuntimeError {
    RuntimeError::ArgumentCountMismatch { details, line }
}

/// Reads a header cell: the text of a string literal, the name of an
/// identifier, or the source text of anything else.
fn header_text(expr: &Expr) -> String {
    match expr {
        Expr::Str { value, .. } => value.clone(),
        Expr::Variable { name, .. } => name.clone(),
        other => other.to_string(),
    }
}

/// Returns the literal strings of an array literal whose first element is a
/// string literal, or `None` when the column is numeric.
fn string_column(expr: &Expr, line: usize) -> EvalResult<Option<Vec<String>>> {
    let Expr::ArrayLiteral { rows, .. } = expr else {
        return Ok(None);
    };
    let mut cells = rows.iter().flatten().peekable();
    if !matches!(cells.peek(), Some(Expr::Str { .. })) {
        return Ok(None);
    }
    cells.map(|cell| match cell {
             Expr::Str { value, .. } => Ok(value.clone()),
             _ => Err(RuntimeError::TypeMismatch { details: "table() string array column must contain only string literals".to_string(),
                                                   line }),
         })
         .collect::<EvalResult<Vec<_>>>()
         .map(Some)
}

impl Interpreter {
    /// `type(name)`: the kind of value bound to `name`, or `undefined`.
    pub(crate) fn eval_type(&self, arguments: &[Expr], line: usize) -> EvalResult<Value> {
        if arguments.len() != 1 {
            return Err(argument_count(format!("Function type() expects 1 argument (variable), got {}",
                                              arguments.len()),
                                      line));
        }
        let Expr::Variable { name, .. } = &arguments[0] else {
            return Err(RuntimeError::TypeMismatch { details: "Argument to type() must be a variable identifier".to_string(),
                                                    line });
        };
        Ok(Value::from(self.env.lookup(name).map_or("undefined", Value::type_name)))
    }

    /// `graph(x, y, [title])`: records a 2D line graph.
    pub(crate) fn eval_graph(&mut self, arguments: &[Expr], line: usize) -> EvalResult<Value> {
        if !(2..=3).contains(&arguments.len()) {
            return Err(argument_count(format!("Function graph expects 2-3 arguments (x_array, y_array, [title]), got {}",
                                              arguments.len()),
                                      line));
        }
        let (Value::Array(x), Value::Array(y)) = (self.eval(&arguments[0])?, self.eval(&arguments[1])?) else {
            return Err(RuntimeError::TypeMismatch { details: "graph() arguments must be arrays".to_string(),
                                                    line });
        };
        if x.element_count() != y.element_count() {
            return Err(RuntimeError::DimensionMismatch { details: "graph() x and y arrays must have the same length".to_string(),
                                                         line });
        }

        let title = match arguments.get(2).map(|arg| self.eval(arg)).transpose()? {
            None => String::new(),
            Some(Value::String(title)) => title,
            Some(_) => {
                return Err(RuntimeError::TypeMismatch { details: "graph() title argument must be a string".to_string(),
                                                        line });
            },
        };
        let title = if title.is_empty() { format!("Graph {}", self.graphs.len() + 1) } else { title };

        let points = x.element_count();
        self.graphs.push(GraphRecord { title,
                                       x: x.to_flat(),
                                       y: y.to_flat() });
        debug!(graph = self.graphs.len(), points, "recorded graph");
        Ok(Value::String(format!("Graph {} created with {points} data points", self.graphs.len())))
    }

    /// `graph_3d(title, [w, h, d, hole_w, hole_h, hole_d])`: records a brick
    /// with a rectangular hole.
    pub(crate) fn eval_graph_3d(&mut self, arguments: &[Expr], line: usize) -> EvalResult<Value> {
        if !(1..=7).contains(&arguments.len()) {
            return Err(argument_count(format!("Function graph_3d expects 1-7 arguments (title, [width, height, depth, hole_width, hole_height, hole_depth]), got {}",
                                              arguments.len()),
                                      line));
        }
        let title = match self.eval(&arguments[0])? {
            Value::String(title) => title,
            Value::Number(n) => format!("Graph {}", format_fixed6(n)),
            _ => "3D Graph".to_string(),
        };

        let mut dims = BRICK_DEFAULTS;
        for (slot, arg) in dims.iter_mut().zip(&arguments[1..]) {
            let Value::Number(n) = self.eval(arg)? else {
                return Err(RuntimeError::TypeMismatch { details: "graph_3d() dimension arguments must be numbers".to_string(),
                                                        line });
            };
            *slot = n;
        }
        let [width, height, depth, hole_width, hole_height, hole_depth] = dims;

        let message = format!("3D Graph '{title}' created with brick ({}×{}×{}) and hole ({}×{}×{})",
                              format_fixed6(width),
                              format_fixed6(height),
                              format_fixed6(depth),
                              format_fixed6(hole_width),
                              format_fixed6(hole_height),
                              format_fixed6(hole_depth));
        self.graphs_3d.push(Graph3dRecord { title,
                                            kind: "brick_with_hole".to_string(),
                                            width,
                                            height,
                                            depth,
                                            hole_width,
                                            hole_height,
                                            hole_depth });
        Ok(Value::String(message))
    }

    /// `table(headers, col1, ...)`: records a table.
    ///
    /// Headers are read from the literal, not evaluated. A column written as
    /// an array of string literals is taken verbatim; any other column must
    /// evaluate to an array.
    pub(crate) fn eval_table(&mut self, arguments: &[Expr], line: usize) -> EvalResult<Value> {
        if arguments.len() < 2 {
            return Err(argument_count(format!("Function table expects at least 2 arguments (headers_array, column1, ...), got {}",
                                              arguments.len()),
                                      line));
        }
        let Expr::ArrayLiteral { rows, .. } = &arguments[0] else {
            return Err(RuntimeError::TypeMismatch { details: "table() first argument must be an array literal of headers".to_string(),
                                                    line });
        };
        let headers = rows.iter().flatten().map(header_text).collect::<Vec<_>>();

        let mut columns = Vec::with_capacity(arguments.len() - 1);
        for (i, arg) in arguments.iter().enumerate().skip(1) {
            if let Some(strings) = string_column(arg, line)? {
                columns.push(TableColumn::Strings(strings));
                continue;
            }
            match self.eval(arg)? {
                Value::Array(array) => columns.push(TableColumn::Numbers(array.to_flat())),
                _ => {
                    return Err(RuntimeError::TypeMismatch { details: format!("table() column argument {i} must be an array"),
                                                            line });
                },
            }
        }

        if columns.len() != headers.len() {
            return Err(RuntimeError::DimensionMismatch { details: format!("table() number of columns ({}) must match number of headers ({})",
                                                                          columns.len(),
                                                                          headers.len()),
                                                         line });
        }

        let row_count = columns.iter().map(TableColumn::len).max().unwrap_or(0);
        let column_count = headers.len();
        self.tables.push(TableRecord { headers, columns });
        Ok(Value::String(format!("Table {} created with {column_count} columns and {row_count} rows",
                                 self.tables.len())))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        evaluate,
        interpreter::program::{TableColumn, TableRecord},
    };

    #[test]
    fn type_reports_value_kinds() {
        let result = evaluate("@version 0.01\nx := 5 m;\nv := [1; 2];\nprint(type(x));\nprint(type(v));\nprint(type(nothing));");
        assert_eq!(result.outputs, vec!["unit", "column_vector", "undefined"]);
    }

    #[test]
    fn graph_defaults_its_title() {
        let result = evaluate("@version 0.01\ngraph([1, 2, 3], [4, 5, 6]);\ngraph([1], [2], \"load\");");
        assert!(result.success, "{:?}", result.error);
        assert_eq!(result.outputs,
                   vec!["Graph 1 created with 3 data points", "Graph 2 created with 1 data points"]);
        assert_eq!(result.graphs[0].title, "Graph 1");
        assert_eq!(result.graphs[1].title, "load");
        assert_eq!(result.graphs[0].y, vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn graph_rejects_mismatched_lengths() {
        let result = evaluate("@version 0.01\ngraph([1, 2], [1]);");
        assert_eq!(result.error.as_deref(),
                   Some("Error on line 2: graph() x and y arrays must have the same length"));
    }

    #[test]
    fn graph_3d_uses_defaults_for_missing_dimensions() {
        let result = evaluate("@version 0.01\ngraph_3d(\"block\", 10, 5);");
        assert_eq!(result.outputs,
                   vec!["3D Graph 'block' created with brick (10.000000×5.000000×3.000000) and hole (2.000000×1.000000×1.500000)"]);
        let record = &result.graphs_3d[0];
        assert_eq!(record.kind, "brick_with_hole");
        assert_eq!(record.hole_depth, 1.5);
    }

    #[test]
    fn table_mixes_string_and_numeric_columns() {
        let result = evaluate("@version 0.01\nload := [1, 2, 3];\ntable([\"name\", load], [\"a\", \"b\"], load);");
        assert!(result.success, "{:?}", result.error);
        assert_eq!(result.outputs, vec!["Table 1 created with 2 columns and 3 rows"]);
        assert_eq!(result.tables,
                   vec![TableRecord { headers: vec!["name".to_string(), "load".to_string()],
                                      columns: vec![TableColumn::Strings(vec!["a".to_string(), "b".to_string()]),
                                                    TableColumn::Numbers(vec![1.0, 2.0, 3.0])], }]);
    }

    #[test]
    fn table_column_must_be_an_array() {
        let result = evaluate("@version 0.01\ntable([\"a\", \"b\"], [1], 5);");
        assert_eq!(result.error.as_deref(),
                   Some("Error on line 2: table() column argument 2 must be an array"));
    }
}
