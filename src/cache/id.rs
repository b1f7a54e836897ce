use std::{
    any::TypeId,
    fmt,
    hash::{Hash, Hasher},
};

/// Identifies a model by its target type and its key/label configuration.
#[derive(Clone, Copy)]
pub struct ModelId {
    target: TypeId,
    key: TypeId,
    label: TypeId,
    property_label: TypeId,
    name: &'static str,
}

impl ModelId {
    pub fn of<T: 'static, K: 'static, L: 'static, Lp: 'static>() -> Self {
        Self {
            target: TypeId::of::<T>(),
            key: TypeId::of::<K>(),
            label: TypeId::of::<L>(),
            property_label: TypeId::of::<Lp>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn target_name(&self) -> &'static str {
        self.name
    }

    fn ids(&self) -> [TypeId; 4] {
        [self.target, self.key, self.label, self.property_label]
    }
}

impl PartialEq for ModelId {
    fn eq(&self, other: &Self) -> bool {
        self.ids() == other.ids()
    }
}

impl Eq for ModelId {}

impl Hash for ModelId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ids().hash(state);
    }
}

impl fmt::Debug for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModelId({})", self.name)
    }
}
