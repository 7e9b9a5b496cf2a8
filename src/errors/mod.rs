use std::fmt;

/// Process exit status for a successful run.
pub const EXIT_SUCCESS: i32 = 0;
/// Writing the chain to its destination failed.
pub const EXIT_IO: i32 = 1;
/// Bad invocation: missing type name, unknown option, missing option value.
pub const EXIT_USAGE: i32 = 2;
/// A type name could not be resolved.
pub const EXIT_UNRESOLVED: i32 = 3;
/// A registry file or configuration file was rejected.
pub const EXIT_REGISTRY: i32 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    MissingArgument,
    UnknownOption { option: String },
    MissingOptionValue { option: String },
    TypeResolution { name: String },
    DuplicateType { name: String },
    UnknownSuperclass { name: String, superclass: String },
    InterfaceSuperclass { name: String, superclass: String },
    CircularInheritance { chain: Vec<String> },
    InvalidRegistry { path: String, message: String },
    Config { message: String },
    Io { context: String, message: String },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument => {
                write!(f, "Missing argument: a fully-qualified type name is required")
            }
            Self::UnknownOption { option } => {
                write!(f, "Unknown option: {}", option)
            }
            Self::MissingOptionValue { option } => {
                write!(f, "Option {} requires a value", option)
            }
            Self::TypeResolution { name } => {
                write!(f, "Type not found: {}", name)
            }
            Self::DuplicateType { name } => {
                write!(f, "Type registered twice: {}", name)
            }
            Self::UnknownSuperclass { name, superclass } => {
                write!(f, "Type {} extends unknown type {}", name, superclass)
            }
            Self::InterfaceSuperclass { name, superclass } => {
                write!(f, "Interface {} cannot declare superclass {}", name, superclass)
            }
            Self::CircularInheritance { chain } => {
                write!(f, "Circular inheritance: {}", chain.join(" -> "))
            }
            Self::InvalidRegistry { path, message } => {
                write!(f, "Invalid registry file {}: {}", path, message)
            }
            Self::Config { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::Io { context, message } => {
                write!(f, "{}: {}", context, message)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainError {
    pub kind: ErrorKind,
    pub suggestions: Vec<String>,
}

impl ChainError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            suggestions: Vec::new(),
        }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn missing_argument() -> Self {
        Self::new(ErrorKind::MissingArgument)
            .with_suggestion("Pass the type to inspect, e.g. `typechain java.io.IOException`".to_string())
    }

    /// Resolution failure with "did you mean" hints drawn from `known`.
    pub fn unresolved(name: &str, known: &[String]) -> Self {
        let mut suggestions = Vec::new();

        // Simple-name matches first: `IOException` -> `java.io.IOException`
        let simple = name.rsplit('.').next().unwrap_or(name);
        for candidate in known {
            if candidate != name && candidate.rsplit('.').next() == Some(simple) {
                suggestions.push(format!("Did you mean '{}'?", candidate));
            }
        }

        for similar in find_similar_names(name, known, 3) {
            let hint = format!("Did you mean '{}'?", similar);
            if !suggestions.contains(&hint) {
                suggestions.push(hint);
            }
        }
        suggestions.truncate(3);

        Self::new(ErrorKind::TypeResolution { name: name.to_string() })
            .with_suggestions(suggestions)
    }

    pub fn io(context: impl Into<String>, err: &std::io::Error) -> Self {
        Self::new(ErrorKind::Io {
            context: context.into(),
            message: err.to_string(),
        })
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config { message: message.into() })
    }

    pub fn invalid_registry(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRegistry {
            path: path.into(),
            message: message.into(),
        })
    }

    /// Exit status the binary reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self.kind {
            ErrorKind::MissingArgument
            | ErrorKind::UnknownOption { .. }
            | ErrorKind::MissingOptionValue { .. } => EXIT_USAGE,
            ErrorKind::TypeResolution { .. } => EXIT_UNRESOLVED,
            ErrorKind::DuplicateType { .. }
            | ErrorKind::UnknownSuperclass { .. }
            | ErrorKind::InterfaceSuperclass { .. }
            | ErrorKind::CircularInheritance { .. }
            | ErrorKind::InvalidRegistry { .. }
            | ErrorKind::Config { .. } => EXIT_REGISTRY,
            ErrorKind::Io { .. } => EXIT_IO,
        }
    }

    pub fn is_usage(&self) -> bool {
        self.exit_code() == EXIT_USAGE
    }
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        for suggestion in &self.suggestions {
            write!(f, "\n  hint: {}", suggestion)?;
        }

        Ok(())
    }
}

impl std::error::Error for ChainError {}

/// Compute Levenshtein distance for "did you mean" suggestions
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 { return b_len; }
    if b_len == 0 { return a_len; }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for i in 1..=a_len {
        curr[0] = i;
        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Find similar names for "did you mean" suggestions, closest first
pub fn find_similar_names(target: &str, candidates: &[String], max_distance: usize) -> Vec<String> {
    let mut results: Vec<(String, usize)> = candidates
        .iter()
        .map(|c| (c.clone(), levenshtein_distance(target, c)))
        .filter(|(_, dist)| *dist <= max_distance && *dist > 0)
        .collect();

    results.sort_by(|(a, da), (b, db)| da.cmp(db).then_with(|| a.cmp(b)));
    results.into_iter().map(|(name, _)| name).collect()
}
