use std::collections::HashSet;

use crate::reflection::{TypeInfo, TypeKey};

/// 익스포트 타깃 타입의 집합
///
/// - `has`: 정확한 멤버십
/// - `is_export_target`: 멤버이거나 멤버에서 파생된 타입
///
/// ```rust,ignore
/// let set = ExportTargetSet::new(&[&base]);
///
/// assert!(set.is_export_target(&derived));
/// assert!(!set.has(&derived));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ExportTargetSet {
    keys: Vec<TypeKey>,
}

impl ExportTargetSet {
    pub fn new(targets: &[&TypeInfo]) -> Self {
        Self::from_keys(targets.iter().map(|target| target.key()))
    }

    /// 중복을 제거하며 처음 나온 순서를 유지합니다.
    pub fn from_keys(keys: impl IntoIterator<Item = TypeKey>) -> Self {
        let mut seen = HashSet::new();
        let keys = keys.into_iter().filter(|key| seen.insert(*key)).collect();

        Self { keys }
    }

    pub fn has(&self, target: &TypeInfo) -> bool {
        self.keys.contains(&target.key())
    }

    pub fn is_export_target(&self, target: &TypeInfo) -> bool {
        self.keys
            .iter()
            .any(|key| *key == target.key() || target.is_derived_from_id(key.id()))
    }

    pub fn keys(&self) -> &[TypeKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Vehicle: Send + Sync {}
    struct Car;
    struct Truck;

    impl Vehicle for Car {}

    #[test]
    fn test_membership_is_exact_but_targets_follow_derivation() {
        let vehicle = TypeInfo::of::<dyn Vehicle>();
        let car = TypeInfo::builder::<Car>().derives_from(&vehicle).build();
        let truck = TypeInfo::of::<Truck>();

        let set = ExportTargetSet::new(&[&vehicle]);

        assert!(set.has(&vehicle));
        assert!(!set.has(&car));
        assert!(set.is_export_target(&vehicle));
        assert!(set.is_export_target(&car));
        assert!(!set.is_export_target(&truck));
    }

    #[test]
    fn test_duplicates_removed_in_order() {
        let car = TypeInfo::of::<Car>();
        let truck = TypeInfo::of::<Truck>();

        let set = ExportTargetSet::new(&[&truck, &car, &truck]);

        assert_eq!(set.len(), 2);
        assert_eq!(set.keys()[0], truck.key());
        assert_eq!(set.keys()[1], car.key());
    }
}
