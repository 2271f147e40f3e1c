use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// Shared storage cell backing concrete vectors
///
/// `Clone` copies the elements into fresh storage; sharing the same
/// storage between two cells is only ever done explicitly through
/// [CowVec::alias]. This keeps aliasing a visible state rather than an
/// accident of cloning.
///
#[derive(Debug, Default)]
pub struct CowVec<T>(Rc<RefCell<Vec<T>>>);

impl<T> CowVec<T> {
    pub fn new(values: Vec<T>) -> Self {
        CowVec(Rc::new(RefCell::new(values)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn borrow(&self) -> Ref<'_, Vec<T>> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Vec<T>> {
        self.0.borrow_mut()
    }

    /// Share the same physical storage.
    ///
    /// The caller is responsible for marking both handles `Shared`;
    /// mutating either side without a clone writes through to the other.
    ///
    pub fn alias(&self) -> Self {
        CowVec(Rc::clone(&self.0))
    }

    /// A stable identity for the physical storage, for alias checks.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const u8 as usize
    }
}

impl<T: Clone> CowVec<T> {
    pub fn deep_clone(&self) -> Self {
        CowVec::new(self.0.borrow().clone())
    }
}

impl<T: Clone> Clone for CowVec<T> {
    fn clone(&self) -> Self {
        self.deep_clone()
    }
}

impl<T: PartialEq> PartialEq for CowVec<T> {
    fn eq(&self, other: &Self) -> bool {
        *self.0.borrow() == *other.0.borrow()
    }
}

impl<T> From<Vec<T>> for CowVec<T> {
    fn from(value: Vec<T>) -> Self {
        CowVec::new(value)
    }
}
