use crate::object::Handle;

/// Whether storage may be written in place
///
/// `Exclusive` means the caller has proven that no other live reference
/// shares the storage. `Shared` means a clone must come first.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipClass {
    Exclusive,
    Shared,
}

/// Whether storage physically exists yet
///
/// A `Virtual` representation is computed on demand; dereferencing it
/// "in place" would expose the generator's internals rather than the
/// vector it stands for, so it is cloned unconditionally, whatever its
/// ownership class.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReprClass {
    Concrete,
    Virtual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnershipState {
    pub class: OwnershipClass,
    pub repr: ReprClass,
}

impl OwnershipState {
    /// True only for the one state that permits in-place writes.
    pub fn mutable_in_place(&self) -> bool {
        self.class == OwnershipClass::Exclusive && self.repr == ReprClass::Concrete
    }
}

/// Read a handle's ownership state
///
/// Pure bookkeeping: the class was stamped by whichever component
/// produced the handle, and virtualness is a property of the
/// representation itself.
///
pub fn classify(handle: &Handle) -> OwnershipState {
    OwnershipState {
        class: handle.ownership(),
        repr: if handle.is_virtual() {
            ReprClass::Virtual
        } else {
            ReprClass::Concrete
        },
    }
}

/// Make a handle safe to mutate in place
///
/// The single chokepoint in front of every in-place write. Virtual
/// representations are forced into fresh concrete storage
/// unconditionally; shared concrete storage is cloned; exclusive
/// concrete handles pass through with no allocation.
///
pub fn ensure_mutable(handle: Handle) -> Handle {
    let state = classify(&handle);

    if state.repr == ReprClass::Virtual {
        log::trace!("forcing a virtual vector into concrete storage before mutation");
        return Handle::new(handle.vector().materialized());
    }

    match state.class {
        OwnershipClass::Shared => {
            log::trace!("cloning shared storage before mutation");
            Handle::new(handle.vector().clone())
        }
        OwnershipClass::Exclusive => handle,
    }
}
