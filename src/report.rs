use std::fmt::Display;

/// Diagnostic context for user-facing output.
///
/// Carries the program name used as the prefix of every diagnostic line, so
/// components print `runsfx: ...` style messages without reaching for global
/// state. Constructed once in `main` and passed down by reference.
#[derive(Debug, Clone)]
pub struct Console {
    program: String,
}

impl Console {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Prefixed informational line on stdout.
    pub fn info(&self, message: impl Display) {
        println!("{}: {}", self.program, message);
    }

    /// Prefixed diagnostic line on stderr.
    pub fn error(&self, message: impl Display) {
        eprintln!("{}: {}", self.program, message);
    }

    /// Unprefixed follow-up line on stderr, for usage hints.
    pub fn hint(&self, message: impl Display) {
        eprintln!("{message}");
    }
}
