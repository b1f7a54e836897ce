use crate::{
    annotations::{self, builtin},
    descriptor::MemberDescriptor,
    errors::{ModelError, ModelResult},
    traits::{EnumConstant, KeyKind, ModelKey},
    utils::naming::loosely_eq,
};

/// Key resolution policy, chosen once per model from the key type.
pub(crate) enum KeyResolver<K> {
    Name(fn(&str) -> K),
    Index(fn(usize) -> Option<K>),
    Constant(Vec<EnumConstant<K>>),
}

/// What a member's `property` annotation says about its key.
struct KeyMetadata {
    name: Option<String>,
    index: i64,
    tags: Vec<String>,
}

impl KeyMetadata {
    fn of<T>(member: &MemberDescriptor<T>) -> Self {
        let Some(property) = annotations::find(&member.annotations, builtin::PROPERTY) else {
            return Self {
                name: None,
                index: -1,
                tags: Vec::new(),
            };
        };

        let name = property
            .argument("name", 0)
            .and_then(|v| v.as_str())
            .filter(|name| !name.trim().is_empty())
            .map(str::to_string);

        let index = property
            .argument("index", 1)
            .and_then(|v| v.as_int())
            .unwrap_or(-1);

        let tags = match property.argument("tags", 2) {
            Some(value) => match value.as_list() {
                Some(list) => list.iter().filter_map(|t| t.as_str()).map(str::to_string).collect(),
                None => value.as_str().map(|t| vec![t.to_string()]).unwrap_or_default(),
            },
            None => Vec::new(),
        };

        Self { name, index, tags }
    }

    fn resolved_name<'a, T>(&'a self, member: &'a MemberDescriptor<T>) -> &'a str {
        self.name.as_deref().unwrap_or(member.name)
    }
}

/// The name a member goes by: its non-blank `property(name = ..)` override,
/// else its declared name.
pub(crate) fn resolved_name<T>(member: &MemberDescriptor<T>) -> String {
    KeyMetadata::of(member).resolved_name(member).to_string()
}

impl<K: ModelKey> KeyResolver<K> {
    pub(crate) fn new() -> ModelResult<Self> {
        match K::key_kind() {
            KeyKind::Name(resolve) => Ok(Self::Name(resolve)),
            KeyKind::Index(resolve) => Ok(Self::Index(resolve)),
            KeyKind::Constant(constants) => Ok(Self::Constant(constants)),
            KeyKind::Variant => Err(ModelError::UnsupportedKind {
                kind: "Variant",
                usage: "model keys",
            }),
        }
    }

    pub(crate) fn resolve<T>(&self, member: &MemberDescriptor<T>) -> ModelResult<K> {
        let metadata = KeyMetadata::of(member);

        match self {
            Self::Name(resolve) => Ok(resolve(metadata.resolved_name(member))),
            Self::Index(resolve) => {
                if metadata.index < 0 {
                    return Err(ModelError::KeyNotFound {
                        member: member.name.to_string(),
                        reason: "integer keys need a non-negative property index".into(),
                    });
                }

                resolve(metadata.index as usize).ok_or_else(|| ModelError::KeyNotFound {
                    member: member.name.to_string(),
                    reason: format!("index {} doesn't fit the key type", metadata.index),
                })
            }
            Self::Constant(constants) => Self::constant(constants, member, &metadata),
        }
    }

    /// Tags first, then the resolved name, then the ordinal index.
    fn constant<T>(
        constants: &[EnumConstant<K>],
        member: &MemberDescriptor<T>,
        metadata: &KeyMetadata,
    ) -> ModelResult<K> {
        let by_tag = metadata
            .tags
            .iter()
            .find_map(|tag| constants.iter().find(|c| loosely_eq(c.name, tag)));

        let name = metadata.resolved_name(member);
        let found = by_tag
            .or_else(|| constants.iter().find(|c| loosely_eq(c.name, name)))
            .or_else(|| {
                usize::try_from(metadata.index)
                    .ok()
                    .and_then(|index| constants.iter().find(|c| c.ordinal == index))
            });

        found
            .map(|c| c.value.clone())
            .ok_or_else(|| ModelError::KeyNotFound {
                member: member.name.to_string(),
                reason: "no enum constant matches its tags, name or index".into(),
            })
    }
}
