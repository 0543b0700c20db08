use serde::{Deserialize, Deserializer};

/// A single attribute of a partial update for a nullable column.
///
/// Deserializes from a JSON field as follows, provided the field is marked
/// `#[serde(default)]`:
///
/// - field absent → [`Patch::Unchanged`]
/// - `null` → [`Patch::Clear`]
/// - a value → [`Patch::Set`]
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    Unchanged,
    Clear,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Unchanged
    }
}

impl<T> Patch<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Patch::Unchanged)
    }

    /// The new value when set, `None` when cleared or unchanged.
    pub fn value(&self) -> Option<&T> {
        match self {
            Patch::Set(value) => Some(value),
            Patch::Unchanged | Patch::Clear => None,
        }
    }

    /// Apply to the current value of the attribute.
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Patch::Unchanged => current,
            Patch::Clear => None,
            Patch::Set(value) => Some(value),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Patch::Set(value),
            None => Patch::Clear,
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Into::into)
    }
}
