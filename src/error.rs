// Copyright (C) 2025 Andy Kurnia.

// Stable marker prefixes: "invalid format", "unknown board type",
// "invalid input", "internal invariant". Collaborator surfaces key off
// the prefix, so keep them intact when wording messages.

pub struct SkraflError {
    s: String,
}

impl std::fmt::Display for SkraflError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.s)
    }
}

impl std::fmt::Debug for SkraflError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        (self as &dyn std::fmt::Display).fmt(f)
    }
}

impl std::error::Error for SkraflError {}

pub fn new(s: String) -> SkraflError {
    SkraflError { s }
}

pub fn invalid_format(s: &str) -> SkraflError {
    SkraflError {
        s: format!("invalid format: {s}"),
    }
}

pub fn unknown_board_type(s: &str) -> SkraflError {
    SkraflError {
        s: format!("unknown board type: {s}"),
    }
}

pub fn invalid_input(field: &str, s: &str) -> SkraflError {
    SkraflError {
        s: format!("invalid input: {field}: {s}"),
    }
}

pub fn internal_invariant(s: &str) -> SkraflError {
    SkraflError {
        s: format!("internal invariant: {s}"),
    }
}

pub type BoxAnyError = Box<dyn std::error::Error + Send + Sync>;
pub type Returns<T> = Result<T, BoxAnyError>;

#[macro_export]
macro_rules! return_error {
    ($error:expr) => {
        return Err($crate::error::new($error).into());
    };
}
