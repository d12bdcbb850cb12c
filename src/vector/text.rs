//! Delimited-text parsing and rendering.

use std::fmt;
use std::str::FromStr;

use crate::error::{LinalgError, Result};
use crate::format::ListFormat;

use super::DenseVector;

impl DenseVector {
    /// Parses a delimited list of numbers with the given format.
    ///
    /// The input may be wrapped in one matching pair of `()` or `[]`.
    /// Whitespace around the whole input and around each element is
    /// ignored. Empty input, an unclosed or mismatched bracket, a dangling
    /// or doubled separator, and any unparseable element all yield
    /// [`LinalgError::Format`].
    ///
    /// ```
    /// use linvec::{DenseVector, ListFormat};
    ///
    /// let format = ListFormat { separator: ';', decimal: ',' };
    /// let v = DenseVector::parse_with("(1; 2,5; 3)", &format)?;
    /// assert_eq!(v.as_slice(), &[1.0, 2.5, 3.0]);
    /// # Ok::<(), linvec::LinalgError>(())
    /// ```
    pub fn parse_with(text: &str, format: &ListFormat) -> Result<DenseVector> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(LinalgError::Format {
                reason: "input is empty".to_string(),
            });
        }
        let inner = strip_brackets(trimmed)?;
        let mut values = Vec::new();
        for token in inner.split(format.separator) {
            let token = token.trim();
            if token.is_empty() {
                return Err(LinalgError::Format {
                    reason: "missing value between separators".to_string(),
                });
            }
            match format.parse_value(token) {
                Some(value) => values.push(value),
                None => {
                    log::debug!("rejecting vector text at token {:?}", token);
                    return Err(LinalgError::Format {
                        reason: format!("invalid number '{}'", token),
                    });
                }
            }
        }
        // split always yields at least one token, so values is non-empty.
        Ok(DenseVector::new_unchecked(values))
    }

    /// Renders the vector with the format's separator and decimal mark.
    ///
    /// The output has no brackets or padding and parses back with
    /// [`parse_with`](Self::parse_with) under the same format.
    pub fn format_with(&self, format: &ListFormat) -> String {
        let mut out = String::new();
        for (i, &value) in self.values.iter().enumerate() {
            if i > 0 {
                out.push(format.separator);
            }
            out.push_str(&format.format_value(value));
        }
        out
    }
}

/// Strips one layer of `()` or `[]`; a bracket without its partner is an
/// error.
fn strip_brackets(text: &str) -> Result<&str> {
    if let Some(rest) = text.strip_prefix('(') {
        return match rest.strip_suffix(')') {
            Some(inner) => Ok(inner),
            None => Err(LinalgError::Format {
                reason: "missing closing ')'".to_string(),
            }),
        };
    }
    if let Some(rest) = text.strip_prefix('[') {
        return match rest.strip_suffix(']') {
            Some(inner) => Ok(inner),
            None => Err(LinalgError::Format {
                reason: "missing closing ']'".to_string(),
            }),
        };
    }
    Ok(text)
}

/// Parses with the default `','` separator and `'.'` decimal mark.
///
/// ```
/// use linvec::DenseVector;
///
/// let v: DenseVector = "[0.5, 2, 3.25]".parse()?;
/// assert_eq!(v.as_slice(), &[0.5, 2.0, 3.25]);
/// # Ok::<(), linvec::LinalgError>(())
/// ```
impl FromStr for DenseVector {
    type Err = LinalgError;

    fn from_str(s: &str) -> Result<DenseVector> {
        DenseVector::parse_with(s, &ListFormat::default())
    }
}

impl fmt::Display for DenseVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}
