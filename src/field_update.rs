//! Tri-state updates for optional entity fields.

use serde::{Deserialize, Deserializer};

/// Change requested for an optional field during a partial update.
///
/// When deserialized with `#[serde(default)]`, an absent key becomes
/// [`FieldUpdate::Keep`], an explicit `null` becomes [`FieldUpdate::Clear`]
/// and any other value becomes [`FieldUpdate::Set`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Leave the current value untouched.
    #[default]
    Keep,
    /// Remove the current value.
    Clear,
    /// Replace the current value.
    Set(T),
}

impl<T> FieldUpdate<T> {
    /// Builds an update from an optional value, clearing on `None`.
    #[must_use]
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Clear, Self::Set)
    }

    /// Converts the carried value, preserving `Keep` and `Clear`.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `convert`.
    pub fn try_map<U, E>(self, convert: impl FnOnce(T) -> Result<U, E>) -> Result<FieldUpdate<U>, E> {
        Ok(match self {
            Self::Keep => FieldUpdate::Keep,
            Self::Clear => FieldUpdate::Clear,
            Self::Set(value) => FieldUpdate::Set(convert(value)?),
        })
    }

    /// Applies the update to an optional slot.
    pub fn apply_to(self, slot: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Clear => *slot = None,
            Self::Set(value) => *slot = Some(value),
        }
    }
}

impl<'de, T> Deserialize<'de> for FieldUpdate<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Self::from_option)
    }
}

#[cfg(test)]
mod tests {
    use super::FieldUpdate;
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default)]
        note: FieldUpdate<String>,
    }

    #[rstest]
    #[case("{}", FieldUpdate::Keep)]
    #[case(r#"{"note":null}"#, FieldUpdate::Clear)]
    #[case(r#"{"note":"hello"}"#, FieldUpdate::Set("hello".to_owned()))]
    fn deserializes_tri_state(#[case] json: &str, #[case] expected: FieldUpdate<String>) {
        let patch: Patch = serde_json::from_str(json).expect("valid patch json");
        assert_eq!(patch.note, expected);
    }

    #[rstest]
    #[case(FieldUpdate::Keep, Some(1))]
    #[case(FieldUpdate::Clear, None)]
    #[case(FieldUpdate::Set(7), Some(7))]
    fn applies_to_slot(#[case] update: FieldUpdate<i32>, #[case] expected: Option<i32>) {
        let mut slot = Some(1);
        update.apply_to(&mut slot);
        assert_eq!(slot, expected);
    }
}
