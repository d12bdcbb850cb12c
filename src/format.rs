//! Punctuation conventions for delimited-text round-trips.

use serde::{Deserialize, Serialize};

/// Separator and decimal mark used when rendering or parsing a vector as a
/// delimited list of numbers.
///
/// Stands in for a host locale: `separator` splits elements, `decimal`
/// marks the fraction point inside each number. The default is `','` and
/// `'.'`. A format with `separator == decimal` cannot round-trip and is the
/// caller's mistake; nothing here checks for it.
///
/// ```
/// use linvec::ListFormat;
///
/// let german = ListFormat { separator: ';', decimal: ',' };
/// assert_eq!(ListFormat::default().separator, ',');
/// assert_eq!(german.decimal, ',');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFormat {
    /// Token between consecutive elements.
    pub separator: char,
    /// Decimal mark inside a single number.
    pub decimal: char,
}

impl Default for ListFormat {
    fn default() -> Self {
        ListFormat {
            separator: ',',
            decimal: '.',
        }
    }
}

impl ListFormat {
    /// Default decimal mark with a custom element separator.
    pub fn with_separator(separator: char) -> Self {
        ListFormat {
            separator,
            ..ListFormat::default()
        }
    }

    /// Renders one value with this format's decimal mark.
    pub(crate) fn format_value(&self, value: f32) -> String {
        let plain = value.to_string();
        if self.decimal == '.' {
            plain
        } else {
            plain.replace('.', &self.decimal.to_string())
        }
    }

    /// Parses one trimmed token, honoring this format's decimal mark.
    ///
    /// Digit grouping is not supported: under a non-`'.'` decimal mark a
    /// literal `'.'` in the token is rejected rather than read as a group
    /// separator.
    pub(crate) fn parse_value(&self, token: &str) -> Option<f32> {
        if self.decimal == '.' {
            return token.parse().ok();
        }
        if token.contains('.') {
            return None;
        }
        token.replace(self.decimal, ".").parse().ok()
    }
}
