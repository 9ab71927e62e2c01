//! Macro for implementing string conversions on domain enums
//!
//! Report parameters such as the period grouping arrive as strings from the
//! controller layer and configuration files. This macro gives such enums a
//! single canonical spelling:
//!
//! - `as_str()`: the canonical lowercase label
//! - `Display`: writes the canonical label
//! - `FromStr`: case-insensitive, surrounding whitespace ignored, failing
//!   with [`TallylineError::InvalidInput`](crate::TallylineError::InvalidInput)
//!
//! # Example
//!
//! ```rust
//! use tallyline_domain::impl_domain_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum ExportFormat {
//!     Json,
//!     Csv,
//! }
//!
//! impl_domain_enum_conversions!(ExportFormat {
//!     Json => "json",
//!     Csv => "csv",
//! });
//!
//! assert_eq!(ExportFormat::Csv.as_str(), "csv");
//! assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
//! ```

/// Implements `as_str`, `Display` and `FromStr` for a fieldless enum
#[macro_export]
macro_rules! impl_domain_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical lowercase label for this value
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::TallylineError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    other => Err($crate::TallylineError::InvalidInput(format!(
                        "unknown {}: '{}'",
                        stringify!($enum_name),
                        other
                    ))),
                }
            }
        }
    };
}
