use std::{cmp::Ordering, fmt::Debug, hash::Hash};

use strum::IntoEnumIterator;

use crate::utils::Uncased;

/// One constant of an enum used as a key type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumConstant<K> {
    pub name: &'static str,
    pub ordinal: usize,
    pub value: K,
}

/// How properties of a model keyed by `K` get their keys.
pub enum KeyKind<K> {
    /// The explicit name override or the member name.
    Name(fn(&str) -> K),
    /// The explicit positional index; `None` if the index doesn't fit `K`.
    Index(fn(usize) -> Option<K>),
    /// The enum constant matched by tag, then member name, then ordinal.
    Constant(Vec<EnumConstant<K>>),
    /// Enums whose variants carry data. Not supported as keys.
    Variant,
}

/// Trait for types that can address properties within a model.
///
/// Implemented for `String`, [`Uncased`] and the integer
/// types. Enums get it through `#[derive(ModelKey)]`, or by hand from their
/// `strum` iterator with [`enum_constants`].
pub trait ModelKey: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    fn key_kind() -> KeyKind<Self>;

    /// An ordering the model's keys are sorted by once built. `None` keeps
    /// insertion order.
    fn ordering() -> Option<fn(&Self, &Self) -> Ordering> {
        None
    }

    /// How the key is spelled in model descriptions.
    fn key_name(&self) -> String {
        format!("{self:?}")
    }
}

impl ModelKey for String {
    fn key_kind() -> KeyKind<Self> {
        KeyKind::Name(|name| name.to_string())
    }

    fn key_name(&self) -> String {
        self.clone()
    }
}

impl ModelKey for Uncased {
    fn key_kind() -> KeyKind<Self> {
        KeyKind::Name(|name| Uncased::new(name))
    }

    fn ordering() -> Option<fn(&Self, &Self) -> Ordering> {
        Some(<Uncased as Ord>::cmp)
    }

    fn key_name(&self) -> String {
        self.to_string()
    }
}

macro_rules! index_key {
    ($($int:ty),*) => {
        $(
            impl ModelKey for $int {
                fn key_kind() -> KeyKind<Self> {
                    KeyKind::Index(|index| <$int>::try_from(index).ok())
                }

                fn key_name(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

index_key!(u8, u16, u32, u64, usize, i8, i16, i32, i64);

/// Lists the constants of a `strum` enum in iteration order.
///
/// Requires `EnumIter` and `IntoStaticStr` on the enum.
pub fn enum_constants<E>() -> Vec<EnumConstant<E>>
where
    E: IntoEnumIterator,
    for<'a> &'a E: Into<&'static str>,
{
    E::iter()
        .enumerate()
        .map(|(ordinal, value)| EnumConstant {
            name: (&value).into(),
            ordinal,
            value,
        })
        .collect()
}
