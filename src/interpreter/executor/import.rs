use std::{
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

use tracing::{debug, info};

use crate::{
    ast::ImportItem,
    error::RuntimeError,
    interpreter::evaluator::core::{EvalResult, Interpreter},
    parse_program,
    util::stack::ensure_sufficient_stack,
};

/// Extension of MADOLA source modules.
pub const MODULE_EXTENSION: &str = "mda";

/// Appends `.mda` to a module name without an extension.
///
/// # Example
/// ```
/// use madola::interpreter::executor::import::module_file_name;
///
/// assert_eq!(module_file_name("beams"), "beams.mda");
/// assert_eq!(module_file_name("lib/beams.mda"), "lib/beams.mda");
/// assert_eq!(module_file_name("native.wasm"), "native.wasm");
/// ```
#[must_use]
pub fn module_file_name(module: &str) -> String {
    if Path::new(module).extension().is_some() {
        module.to_string()
    } else {
        format!("{module}.{MODULE_EXTENSION}")
    }
}

fn import_failure(details: String, line: usize) -> RuntimeError {
    RuntimeError::ImportFailure { details, line }
}

impl Interpreter {
    /// Returns the first existing file named `file_name` on the search path.
    fn resolve_module(&self, file_name: &str) -> Option<PathBuf> {
        self.config
            .search_dirs()
            .map(|dir| dir.join(file_name))
            .find(|candidate| candidate.is_file())
    }

    /// Executes `from module import a, b as c` (`items` is `Some`) or
    /// `import module` (`items` is `None`).
    ///
    /// The module runs to completion in its own interpreter, which shares
    /// this interpreter's configuration and call-depth budget. Only
    /// functions are brought back; the module's variables and output are
    /// discarded.
    ///
    /// # Errors
    /// `ImportFailure` when the module is not an `.mda` file, cannot be
    /// found, read, parsed or evaluated, or lacks a requested function.
    pub(crate) fn exec_import(&mut self, module: &str, items: Option<&[ImportItem]>, line: usize) -> EvalResult<()> {
        let file_name = module_file_name(module);
        if Path::new(&file_name).extension().is_none_or(|ext| ext != MODULE_EXTENSION) {
            return Err(import_failure(format!("Cannot import '{module}': only .{MODULE_EXTENSION} modules are supported"),
                                      line));
        }
        self.check_call_depth(line)?;

        let path = self.resolve_module(&file_name).ok_or_else(|| {
                                                      let searched = self.config
                                                                         .search_dirs()
                                                                         .map(|dir| dir.display().to_string())
                                                                         .collect::<Vec<_>>()
                                                                         .join(", ");
                                                      import_failure(format!("Cannot find module '{file_name}' (searched: {searched})"),
                                                                     line)
                                                  })?;
        info!(module = %file_name, path = %path.display(), "resolved import");

        let source = fs::read_to_string(&path).map_err(|e| {
                                                  import_failure(format!("Cannot open file for import: {}: {e}",
                                                                         path.display()),
                                                                 line)
                                              })?;
        let program = parse_program(&source).map_err(|e| {
                                                import_failure(format!("Failed to parse imported file '{file_name}': {e}"),
                                                               line)
                                            })?;

        let mut module_interpreter = self.for_import();
        let result = ensure_sufficient_stack(|| module_interpreter.run(&program));
        if !result.success {
            return Err(import_failure(format!("Failed to evaluate imported file '{file_name}': {}",
                                              result.error.unwrap_or_default()),
                                      line));
        }

        match items {
            None => {
                self.env.copy_functions_from(&module_interpreter.env);
                for (name, decl) in &module_interpreter.piecewise {
                    self.piecewise.insert(name.clone(), Rc::clone(decl));
                }
                debug!(module = %file_name, "imported all functions");
            },
            Some(items) => {
                for item in items {
                    self.import_item(&module_interpreter, item, &file_name, line)?;
                }
            },
        }
        Ok(())
    }

    fn import_item(&mut self, module: &Self, item: &ImportItem, file_name: &str, line: usize) -> EvalResult<()> {
        if let Some(decl) = module.env.lookup_function(&item.name) {
            self.piecewise.remove(&item.name);
            self.env.define_function_as(item.name.as_str(), decl);
        } else if let Some(decl) = module.piecewise.get(&item.name) {
            self.piecewise.insert(item.name.clone(), Rc::clone(decl));
        } else {
            return Err(import_failure(format!("Function '{}' not found in module '{file_name}'", item.name),
                                      line));
        }

        if let Some(alias) = &item.alias {
            self.env.define_alias(alias.as_str(), item.name.as_str());
        }
        info!(function = %item.name, alias = item.alias.as_deref(), module = %file_name, "imported function");
        Ok(())
    }
}
