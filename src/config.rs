use std::path::PathBuf;

/// Default limit on nested user-function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

/// Environment variable naming the trove directory.
pub const TROVE_ENV_VAR: &str = "MADOLA_TROVE";

/// Settings shared by an interpreter and the interpreters it spawns for
/// imports.
///
/// # Example
/// ```
/// use madola::config::InterpreterConfig;
///
/// let config = InterpreterConfig::default().with_import_path("lib");
/// assert_eq!(config.max_call_depth, 256);
/// assert_eq!(config.import_paths.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Calls nested deeper than this fail with a recursion-limit error.
    pub max_call_depth: usize,
    /// Directories searched for modules after the working directory.
    pub import_paths:   Vec<PathBuf>,
    /// Directory of shared modules, searched last.
    pub trove_dir:      Option<PathBuf>,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self { max_call_depth: DEFAULT_MAX_CALL_DEPTH,
               import_paths:   Vec::new(),
               trove_dir:      None, }
    }
}

impl InterpreterConfig {
    /// Builds a configuration from the process environment.
    ///
    /// The trove directory is `$MADOLA_TROVE` when set, otherwise
    /// `~/.madola/trove`.
    #[must_use]
    pub fn from_env() -> Self {
        let trove_dir = std::env::var_os(TROVE_ENV_VAR).map(PathBuf::from)
                                                        .or_else(|| {
                                                            std::env::var_os("HOME").map(|home| {
                                                                PathBuf::from(home).join(".madola")
                                                                                   .join("trove")
                                                            })
                                                        });
        Self { trove_dir,
               ..Self::default() }
    }

    /// Appends a directory to the import search path.
    #[must_use]
    pub fn with_import_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.import_paths.push(path.into());
        self
    }

    /// Directories searched for a module, in order.
    pub fn search_dirs(&self) -> impl Iterator<Item = PathBuf> + '_ {
        std::iter::once(PathBuf::from("."))
            .chain(self.import_paths.iter().cloned())
            .chain(self.trove_dir.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_order_is_cwd_then_paths_then_trove() {
        let config = InterpreterConfig { trove_dir: Some(PathBuf::from("/trove")),
                                         ..InterpreterConfig::default() }.with_import_path("a");
        let dirs: Vec<PathBuf> = config.search_dirs().collect();
        assert_eq!(dirs,
                   vec![PathBuf::from("."), PathBuf::from("a"), PathBuf::from("/trove")]);
    }
}
