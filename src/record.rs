use std::fmt;

use crate::error::BridgeError;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StorageKey(pub(crate) String);

impl StorageKey {
    pub fn new(name: impl Into<String>) -> Result<Self, BridgeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(BridgeError::EmptyKey);
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The persisted highscore. Always carried as text, whatever the
/// application meant by it; the content is never validated here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Highscore(String);

impl Highscore {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Highscore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Highscore {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Highscore {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<bool> for Highscore {
    fn from(value: bool) -> Self {
        Self(value.to_string())
    }
}

macro_rules! highscore_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Highscore {
                fn from(value: $ty) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

highscore_from_int!(i32, i64, u32, u64, usize);

impl From<f64> for Highscore {
    fn from(value: f64) -> Self {
        Self(number_text(value))
    }
}

pub(crate) fn number_text(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }

    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let text = format!("{value:e}");
        return match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => text,
        };
    }

    format!("{value}")
}
