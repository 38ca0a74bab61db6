use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        linalg::{core as matrix, determinant::determinant, eigen, inverse::inverse},
        value::{array::ArrayValue, core::Value},
    },
};

/// The methods an array receiver answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatrixMethod {
    Det,
    Inv,
    Tr,
    Transpose,
    Eigenvalues,
    Eigenvectors,
}

impl MatrixMethod {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "det" => Self::Det,
            "inv" => Self::Inv,
            "tr" => Self::Tr,
            "T" => Self::Transpose,
            "eigenvalues" => Self::Eigenvalues,
            "eigenvectors" => Self::Eigenvectors,
            _ => return None,
        })
    }

    /// Capitalised name used in shape errors, as in `Det() requires ...`.
    const fn label(self) -> &'static str {
        match self {
            Self::Det => "Det",
            Self::Inv => "Inv",
            Self::Tr => "Tr",
            Self::Transpose => "T",
            Self::Eigenvalues => "Eigenvalues",
            Self::Eigenvectors => "Eigenvectors",
        }
    }
}

impl Interpreter {
    /// Evaluates `object.method(arguments)`.
    ///
    /// A receiver spelled `math` selects the `math.*` namespace. Any other
    /// receiver must evaluate to an array and the method must be one of
    /// `det`, `inv`, `tr`, `T`, `eigenvalues` or `eigenvectors`, called
    /// without arguments.
    ///
    /// # Example
    /// ```
    /// let result = madola::evaluate("@version 0.01\nA := [2, 0; 0, 3];\nprint(A.det());");
    /// assert_eq!(result.outputs, vec!["6"]);
    /// ```
    pub(crate) fn eval_method_call(&mut self,
                                   object: &Expr,
                                   method: &str,
                                   arguments: &[Expr],
                                   line: usize)
                                   -> EvalResult<Value> {
        if let Expr::Variable { name, .. } = object
           && name == "math"
        {
            return self.eval_math_method(method, arguments, line);
        }

        let Value::Array(array) = self.eval(object)? else {
            return Err(RuntimeError::TypeMismatch { details: "Method calls are only supported on matrices/arrays".to_string(),
                                                    line });
        };
        let Some(matrix_method) = MatrixMethod::parse(method) else {
            return Err(RuntimeError::Unsupported { details: format!("Unknown method '{method}' for matrix/array"),
                                                   line });
        };
        if !arguments.is_empty() {
            return Err(RuntimeError::ArgumentCountMismatch { details: format!("Method .{method}() expects no arguments, got {}",
                                                                              arguments.len()),
                                                             line });
        }

        apply_matrix_method(matrix_method, &array, line)
    }
}

fn apply_matrix_method(method: MatrixMethod, array: &ArrayValue, line: usize) -> EvalResult<Value> {
    if method == MatrixMethod::Transpose {
        return Ok(Value::Array(match array {
                                   ArrayValue::Matrix(rows) => ArrayValue::Matrix(matrix::transpose(rows)),
                                   ArrayValue::Vector { elements, column } => {
                                       ArrayValue::Vector { elements: elements.clone(),
                                                            column:   !column, }
                                   },
                               }));
    }

    let rows = array.square_rows().ok_or_else(|| {
                                      RuntimeError::TypeMismatch { details: format!("{}() can only be applied to matrices",
                                                                                    method.label()),
                                                                   line }
                                  })?;
    Ok(match method {
        MatrixMethod::Det => Value::Number(determinant(&rows, line)?),
        MatrixMethod::Tr => Value::Number(matrix::trace(&rows, line)?),
        MatrixMethod::Inv => Value::Array(ArrayValue::Matrix(inverse(&rows, line)?)),
        MatrixMethod::Eigenvalues => Value::Array(ArrayValue::row(eigen::eigenvalues(&rows, line)?)),
        MatrixMethod::Eigenvectors | MatrixMethod::Transpose => {
            Value::Array(ArrayValue::Matrix(eigen::eigenvectors(&rows, line)?))
        },
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{error::ErrorKind, evaluate};

    fn run(body: &str) -> crate::EvaluationResult {
        evaluate(&format!("@version 0.01\n{body}"))
    }

    #[test]
    fn transpose_flips_vectors_and_matrices() {
        let result = run("print([1, 2, 3].T());\nprint([1, 2; 3, 4].T());");
        assert_eq!(result.outputs, vec!["[1; 2; 3]", "[[1, 3]; [2, 4]]"]);
    }

    #[test]
    fn inverse_and_trace() {
        let result = run("A := [4, 7; 2, 6];\nprint(A.tr());\nprint(A.inv());");
        assert_eq!(result.outputs, vec!["10", "[[0.6, -0.7]; [-0.2, 0.4]]"]);
    }

    #[test]
    fn single_element_vector_counts_as_matrix() {
        assert_eq!(run("print([5].det());").outputs, vec!["5"]);
        let result = run("x := [1, 2].det();");
        assert_eq!(result.error.as_deref(),
                   Some("Error on line 2: Det() can only be applied to matrices"));
    }

    #[test]
    fn methods_take_no_arguments() {
        let result = run("A := [1, 2; 3, 4];\nx := A.det(1);");
        assert_eq!(result.error_kind, Some(ErrorKind::ArgumentCountMismatch));
        assert_eq!(result.error.as_deref(),
                   Some("Error on line 3: Method .det() expects no arguments, got 1"));
    }

    #[test]
    fn unknown_method_and_receiver() {
        let result = run("A := [1, 2; 3, 4];\nx := A.norm();");
        assert_eq!(result.error.as_deref(),
                   Some("Error on line 3: Unknown method 'norm' for matrix/array"));
        let result = run("x := 5;\ny := x.det();");
        assert_eq!(result.error.as_deref(),
                   Some("Error on line 3: Method calls are only supported on matrices/arrays"));
    }

    #[test]
    fn complex_eigenvalues_are_rejected() {
        let result = run("R := [0, -1; 1, 0];\nv := R.eigenvalues();");
        assert_eq!(result.error_kind, Some(ErrorKind::Unsupported));
    }
}
