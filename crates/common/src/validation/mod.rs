//! Field-level validation framework
//!
//! A [`Validator`] collects every problem with an input instead of stopping
//! at the first, so a rejected request can report all offending fields at
//! once. Nested inputs (a list of records, say) push a path segment so each
//! error names its location, e.g. `records[3].to_time`.
//!
//! ```rust
//! use tallyline_common::validation::Validator;
//!
//! let mut validator = Validator::new();
//! validator.validate_not_empty("name", "  ");
//! validator.validate_before("window", 10, 3);
//! let err = validator.finalize().unwrap_err();
//! assert_eq!(err.errors.len(), 2);
//! ```

use std::fmt;

/// Type alias for validation results
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation error with detailed field-level errors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Add a field-level error
    pub fn add_field_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => write!(f, "Validation error with no specific field errors"),
            [only] => write!(f, "Validation failed: {}: {}", only.field, only.message),
            errors => {
                write!(f, "Validation failed with {} errors: ", errors.len())?;
                for (i, error) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}: {}", error.field, error.message)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Individual field error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Collects field errors for one input
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationError,
    path: Vec<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    fn qualified(&self, field: &str) -> String {
        if self.path.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", self.path.join("."), field)
        }
    }

    /// Record an error against `field` (qualified by the current path)
    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        let field = self.qualified(field);
        self.errors.add_field_error(field, message);
    }

    /// Require a non-blank string
    pub fn validate_not_empty(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add_error(field, "cannot be empty");
        }
    }

    /// Require a string of at most `max_chars` characters
    pub fn validate_max_len(&mut self, field: &str, value: &str, max_chars: usize) {
        if value.chars().count() > max_chars {
            self.add_error(field, format!("must not exceed {max_chars} characters"));
        }
    }

    /// Require `value <= max`
    pub fn validate_max<T>(&mut self, field: &str, value: T, max: T)
    where
        T: PartialOrd + fmt::Display,
    {
        if value > max {
            self.add_error(field, format!("must not exceed {max}"));
        }
    }

    /// Require `start < end` for a half-open range
    pub fn validate_before<T>(&mut self, field: &str, start: T, end: T)
    where
        T: PartialOrd + fmt::Display,
    {
        if start >= end {
            self.add_error(field, format!("start {start} must be before end {end}"));
        }
    }

    /// Run `f` with `segment` pushed onto the field path
    pub fn validate_nested<F>(&mut self, segment: impl Into<String>, f: F)
    where
        F: FnOnce(&mut Validator),
    {
        self.path.push(segment.into());
        f(self);
        self.path.pop();
    }

    /// Finalize and return result
    pub fn finalize(self) -> ValidationResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
