use super::cow::CowVec;

/// Physical representation of a vector's elements
///
/// `Concrete` is backed by real storage. `Repeated` is the virtual
/// representation: a single element logically repeated to a length,
/// produced by recycling. A virtual vector answers reads without
/// allocating, but must be forced through [Rep::materialize] before any
/// storage-level access, otherwise a caller would be handed the
/// generator's single element rather than the vector it represents.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Rep<T> {
    Concrete(CowVec<T>),
    Repeated(T, usize),
}

impl<T: Clone + Default> Rep<T> {
    /// Create an empty vector
    pub fn new() -> Self {
        Rep::Concrete(CowVec::new(Vec::new()))
    }

    /// A virtual vector of `n` repetitions of a single element
    pub fn repeated(elem: T, n: usize) -> Self {
        Rep::Repeated(elem, n)
    }

    pub fn len(&self) -> usize {
        match self {
            Rep::Concrete(v) => v.len(),
            Rep::Repeated(_, n) => *n,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_virtual(&self) -> bool {
        matches!(self, Rep::Repeated(..))
    }

    /// Get a single element, 0-indexed
    pub fn get(&self, index: usize) -> Option<T> {
        match self {
            Rep::Concrete(v) => v.borrow().get(index).cloned(),
            Rep::Repeated(elem, n) => (index < *n).then(|| elem.clone()),
        }
    }

    /// Clone values out into a plain vector, applying any repetition.
    pub fn to_vec(&self) -> Vec<T> {
        match self {
            Rep::Concrete(v) => v.borrow().clone(),
            Rep::Repeated(elem, n) => vec![elem.clone(); *n],
        }
    }

    /// Force the representation into fresh concrete storage.
    pub fn materialize(&self) -> Self {
        if self.is_virtual() {
            log::trace!("materializing a repeated vector of length {}", self.len());
        }
        Rep::Concrete(CowVec::new(self.to_vec()))
    }

    /// A second handle onto the same physical storage.
    ///
    /// Repeated vectors have no shared storage to alias; their clone is
    /// already as cheap as a view.
    ///
    pub fn alias(&self) -> Self {
        match self {
            Rep::Concrete(v) => Rep::Concrete(v.alias()),
            Rep::Repeated(elem, n) => Rep::Repeated(elem.clone(), *n),
        }
    }

    pub fn storage_id(&self) -> Option<usize> {
        match self {
            Rep::Concrete(v) => Some(v.id()),
            Rep::Repeated(..) => None,
        }
    }
}

impl<T: Clone + Default> Default for Rep<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Default> From<Vec<T>> for Rep<T> {
    fn from(value: Vec<T>) -> Self {
        Rep::Concrete(CowVec::new(value))
    }
}

#[cfg(test)]
mod test {
    use super::Rep;
    use crate::object::Integer;

    #[test]
    fn repeated_reads_like_concrete() {
        let x: Rep<Integer> = Rep::repeated(Integer::Some(7), 4);
        assert_eq!(x.len(), 4);
        assert!(x.is_virtual());
        assert_eq!(x.get(3), Some(Integer::Some(7)));
        assert_eq!(x.get(4), None);
        assert_eq!(x.to_vec(), vec![Integer::Some(7); 4]);
    }

    #[test]
    fn materialize_is_fresh_and_concrete() {
        let x: Rep<Integer> = Rep::repeated(Integer::Some(1), 3);
        let y = x.materialize();
        assert!(!y.is_virtual());
        assert_eq!(y.to_vec(), x.to_vec());
        assert!(y.storage_id().is_some());
    }

    #[test]
    fn alias_shares_concrete_storage() {
        let x: Rep<Integer> = vec![Integer::Some(1), Integer::Some(2)].into();
        let y = x.alias();
        assert_eq!(x.storage_id(), y.storage_id());
        let z = x.clone();
        assert_ne!(x.storage_id(), z.storage_id());
    }
}
