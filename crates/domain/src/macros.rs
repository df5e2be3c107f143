//! Macro for implementing Display and FromStr for mode enums
//!
//! The UI layer exchanges gesture and view modes as short strings
//! (`"resize-top"`, `"month"`, ...). This macro keeps both directions of that
//! mapping in one place with case-insensitive parsing.
//!
//! # Example
//!
//! ```rust
//! use whenly_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Handle {
//!     Top,
//!     Bottom,
//! }
//!
//! impl_domain_status_conversions!(Handle {
//!     Top => "top",
//!     Bottom => "bottom",
//! });
//!
//! assert_eq!(Handle::Top.to_string(), "top");
//! assert_eq!("BOTTOM".parse::<Handle>(), Ok(Handle::Bottom));
//! ```

/// Implements Display and FromStr traits for mode enums
///
/// This macro generates:
/// - Display trait: converts enum variants to their wire strings
/// - FromStr trait: parses case-insensitive strings to enum variants
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their string
///   representations
///
/// # Features
///
/// - Case-insensitive parsing (e.g., "MOVE", "move", "Move" all work)
/// - Consistent string output
/// - Descriptive error messages with enum name
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestMode {
        Move,
        ResizeTop,
        ResizeBottom,
    }

    impl_domain_status_conversions!(TestMode {
        Move => "move",
        ResizeTop => "resize-top",
        ResizeBottom => "resize-bottom",
    });

    #[test]
    fn test_display_conversion() {
        assert_eq!(TestMode::Move.to_string(), "move");
        assert_eq!(TestMode::ResizeTop.to_string(), "resize-top");
        assert_eq!(TestMode::ResizeBottom.to_string(), "resize-bottom");
    }

    #[test]
    fn test_fromstr_mixed_case() {
        assert_eq!(TestMode::from_str("Resize-Top").unwrap(), TestMode::ResizeTop);
        assert_eq!(TestMode::from_str("MOVE").unwrap(), TestMode::Move);
    }

    #[test]
    fn test_fromstr_invalid() {
        let result = TestMode::from_str("resize-left");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid TestMode: resize-left"));
    }

    #[test]
    fn test_fromstr_empty() {
        assert!(TestMode::from_str("").is_err());
    }
}
