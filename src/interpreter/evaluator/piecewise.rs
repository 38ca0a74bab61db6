use tracing::trace;

use crate::{
    ast::{PiecewiseCase, PiecewiseFunctionDecl},
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            utils::check_arity,
        },
        value::core::Value,
    },
    util::stack::ensure_sufficient_stack,
};

impl Interpreter {
    /// Evaluates the first case whose guard holds.
    ///
    /// A guard holds when it is a nonzero number or a nonzero quantity;
    /// every other value counts as false. An `otherwise` case always
    /// matches. When nothing matches the result is `0`.
    ///
    /// # Example
    /// ```
    /// let result = madola::evaluate("@version 0.01\nx := 5;\nprint(piecewise { (1, x < 0), (2, otherwise) });");
    /// assert_eq!(result.outputs, vec!["2"]);
    /// ```
    pub(crate) fn eval_piecewise(&mut self, cases: &[PiecewiseCase]) -> EvalResult<Value> {
        for case in cases {
            let matched = match &case.condition {
                None => true,
                Some(condition) => self.eval(condition)?
                                       .numeric_part()
                                       .is_some_and(|n| n != 0.0),
            };
            if matched {
                return self.eval(&case.value);
            }
        }
        Ok(Value::Number(0.0))
    }

    /// Calls a piecewise function with evaluated arguments.
    ///
    /// The parameters live in their own frame for the duration of the call.
    /// Piecewise calls count toward the call-depth limit like user function
    /// calls do.
    pub(crate) fn call_piecewise(&mut self,
                                 decl: &PiecewiseFunctionDecl,
                                 args: &[Value],
                                 line: usize)
                                 -> EvalResult<Value> {
        check_arity(&decl.name, decl.params.len(), args.len(), line)?;
        self.check_call_depth(line)?;
        trace!(function = %decl.name, "calling piecewise function");

        self.env.push_frame();
        for (param, value) in decl.params.iter().zip(args) {
            self.env.define(param.as_str(), value.clone());
        }
        self.call_depth += 1;

        let result = ensure_sufficient_stack(|| self.eval_piecewise(&decl.cases));

        self.call_depth -= 1;
        self.env.pop_frame();
        result
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::evaluate;

    #[test]
    fn piecewise_function_picks_first_true_case() {
        let result = evaluate("@version 0.01\n\
                               sign(x) := piecewise { (-1, x < 0), (0, x == 0), (1, otherwise) };\n\
                               print(sign(-3));\nprint(sign(0));\nprint(sign(8));");
        assert!(result.success, "{:?}", result.error);
        assert_eq!(result.outputs, vec!["-1", "0", "1"]);
    }

    #[test]
    fn no_match_without_otherwise_is_zero() {
        let result = evaluate("@version 0.01\nf(x) := piecewise { (10, x > 100) };\nprint(f(1));");
        assert_eq!(result.outputs, vec!["0"]);
    }

    #[test]
    fn string_guards_are_false() {
        let result = evaluate("@version 0.01\nprint(piecewise { (1, \"yes\"), (2, otherwise) });");
        assert_eq!(result.outputs, vec!["2"]);
    }

    #[test]
    fn parameters_do_not_leak() {
        let result = evaluate("@version 0.01\nf(q) := piecewise { (q, otherwise) };\ny := f(4);\nprint(q);");
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Error on line 4: Undefined variable: q"));
    }
}
