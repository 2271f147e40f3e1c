use std::rc::Rc;

use super::coercion::{AtomicMode, CoercibleInto};
use super::record::Record;
use super::rep::Rep;
use super::types::*;
use crate::contract_violation;
use crate::error::Error;
use crate::ptype::{AtomicKind, TypeTag};

/// An element of a list-vector
///
/// Lists hold arbitrary values per element; a missing element is the
/// list analogue of an atomic `NA`.
///
pub type ListElem = OptionNA<Rc<Vector>>;

/// A vector of one of the engine's storage types
///
/// Atomic variants wrap a typed representation; `List` holds values per
/// element and `Record` holds named, equal-length columns. All variants
/// share the same representation machinery, so virtualness and aliasing
/// behave uniformly across types.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Vector {
    Logical(Rep<Logical>),
    Integer(Rep<Integer>),
    Double(Rep<Double>),
    Complex(Rep<Complex>),
    Character(Rep<Character>),
    List(Rep<ListElem>),
    Record(Record),
}

impl Vector {
    /// Element count, or row count for records.
    pub fn len(&self) -> usize {
        match self {
            Vector::Logical(v) => v.len(),
            Vector::Integer(v) => v.len(),
            Vector::Double(v) => v.len(),
            Vector::Complex(v) => v.len(),
            Vector::Character(v) => v.len(),
            Vector::List(v) => v.len(),
            Vector::Record(v) => v.rows(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn type_tag(&self) -> TypeTag {
        match self {
            Vector::Logical(_) => TypeTag::Atomic(Logical::atomic_kind()),
            Vector::Integer(_) => TypeTag::Atomic(Integer::atomic_kind()),
            Vector::Double(_) => TypeTag::Atomic(Double::atomic_kind()),
            Vector::Complex(_) => TypeTag::Atomic(Complex::atomic_kind()),
            Vector::Character(_) => TypeTag::Atomic(Character::atomic_kind()),
            Vector::List(_) => TypeTag::List,
            Vector::Record(v) => v.type_tag(),
        }
    }

    pub fn is_virtual(&self) -> bool {
        match self {
            Vector::Logical(v) => v.is_virtual(),
            Vector::Integer(v) => v.is_virtual(),
            Vector::Double(v) => v.is_virtual(),
            Vector::Complex(v) => v.is_virtual(),
            Vector::Character(v) => v.is_virtual(),
            Vector::List(v) => v.is_virtual(),
            Vector::Record(v) => v.is_virtual(),
        }
    }

    /// Force every representation into fresh concrete storage.
    pub fn materialized(&self) -> Vector {
        match self {
            Vector::Logical(v) => Vector::Logical(v.materialize()),
            Vector::Integer(v) => Vector::Integer(v.materialize()),
            Vector::Double(v) => Vector::Double(v.materialize()),
            Vector::Complex(v) => Vector::Complex(v.materialize()),
            Vector::Character(v) => Vector::Character(v.materialize()),
            Vector::List(v) => Vector::List(v.materialize()),
            Vector::Record(v) => Vector::Record(v.materialized()),
        }
    }

    /// A second vector over the same physical storage.
    pub fn alias(&self) -> Vector {
        match self {
            Vector::Logical(v) => Vector::Logical(v.alias()),
            Vector::Integer(v) => Vector::Integer(v.alias()),
            Vector::Double(v) => Vector::Double(v.alias()),
            Vector::Complex(v) => Vector::Complex(v.alias()),
            Vector::Character(v) => Vector::Character(v.alias()),
            Vector::List(v) => Vector::List(v.alias()),
            Vector::Record(v) => Vector::Record(v.alias()),
        }
    }

    /// Identity of the physical storage, `None` while virtual.
    pub fn storage_id(&self) -> Option<usize> {
        match self {
            Vector::Logical(v) => v.storage_id(),
            Vector::Integer(v) => v.storage_id(),
            Vector::Double(v) => v.storage_id(),
            Vector::Complex(v) => v.storage_id(),
            Vector::Character(v) => v.storage_id(),
            Vector::List(v) => v.storage_id(),
            Vector::Record(v) => v.storage_id(),
        }
    }

    /// A virtual vector repeating this vector's single element
    ///
    /// The cheap representation behind recycling. Only defined for
    /// size-1 non-record vectors; the caller establishes that via the
    /// size resolver first.
    ///
    pub(crate) fn repeat_first(&self, n: usize) -> Result<Vector, Error> {
        fn rep1<T: Clone + Default>(rep: &Rep<T>, n: usize) -> Result<Rep<T>, Error> {
            match rep.get(0) {
                Some(elem) => Ok(Rep::repeated(elem, n)),
                None => Err(contract_violation!("cannot repeat an empty vector")),
            }
        }

        match self {
            Vector::Logical(v) => Ok(Vector::Logical(rep1(v, n)?)),
            Vector::Integer(v) => Ok(Vector::Integer(rep1(v, n)?)),
            Vector::Double(v) => Ok(Vector::Double(rep1(v, n)?)),
            Vector::Complex(v) => Ok(Vector::Complex(rep1(v, n)?)),
            Vector::Character(v) => Ok(Vector::Character(rep1(v, n)?)),
            Vector::List(v) => Ok(Vector::List(rep1(v, n)?)),
            Vector::Record(_) => Err(contract_violation!(
                "records recycle column-wise, not by element"
            )),
        }
    }

    /// Coerce this vector to another type along the lattice
    ///
    /// Only widening targets are reachable when the target came out of
    /// [crate::ptype::resolve_type]; anything else reports the pair as
    /// incompatible. Virtual representations stay virtual through a
    /// cast.
    ///
    pub fn cast(&self, target: &TypeTag) -> Result<Vector, Error> {
        use AtomicKind as K;
        use TypeTag as T;

        if self.type_tag() == *target {
            return Ok(self.clone());
        }

        let incompatible = || Error::IncompatibleType {
            lhs: self.type_tag(),
            rhs: target.clone(),
        };

        match (self, target) {
            (Vector::Logical(v), T::Atomic(K::Integer)) => Ok(Vector::Integer(cast_rep(v))),
            (Vector::Logical(v), T::Atomic(K::Double)) => Ok(Vector::Double(cast_rep(v))),
            (Vector::Logical(v), T::Atomic(K::Complex)) => Ok(Vector::Complex(cast_rep(v))),
            (Vector::Logical(v), T::Atomic(K::Character)) => Ok(Vector::Character(cast_rep(v))),
            (Vector::Integer(v), T::Atomic(K::Double)) => Ok(Vector::Double(cast_rep(v))),
            (Vector::Integer(v), T::Atomic(K::Complex)) => Ok(Vector::Complex(cast_rep(v))),
            (Vector::Integer(v), T::Atomic(K::Character)) => Ok(Vector::Character(cast_rep(v))),
            (Vector::Double(v), T::Atomic(K::Complex)) => Ok(Vector::Complex(cast_rep(v))),
            (Vector::Double(v), T::Atomic(K::Character)) => Ok(Vector::Character(cast_rep(v))),
            (Vector::Complex(v), T::Atomic(K::Character)) => Ok(Vector::Character(cast_rep(v))),
            (Vector::Logical(v), T::List) => Ok(Vector::List(promote_rep(v))),
            (Vector::Integer(v), T::List) => Ok(Vector::List(promote_rep(v))),
            (Vector::Double(v), T::List) => Ok(Vector::List(promote_rep(v))),
            (Vector::Complex(v), T::List) => Ok(Vector::List(promote_rep(v))),
            (Vector::Character(v), T::List) => Ok(Vector::List(promote_rep(v))),
            (Vector::Record(v), T::Record(columns)) => {
                Ok(Vector::Record(v.cast_columns(columns)?))
            }
            _ => Err(incompatible()),
        }
    }
}

fn cast_rep<F, T>(rep: &Rep<F>) -> Rep<T>
where
    F: CoercibleInto<T> + Clone + Default,
    T: Clone + Default,
{
    match rep {
        Rep::Concrete(v) => {
            let values: Vec<T> = v.borrow().iter().map(|i| i.clone().coerce_into()).collect();
            Rep::from(values)
        }
        Rep::Repeated(elem, n) => Rep::repeated(elem.clone().coerce_into(), *n),
    }
}

/// Lift each atomic element into a scalar vector, yielding a list
fn promote_rep<T>(rep: &Rep<T>) -> Rep<ListElem>
where
    T: Clone + Default,
    Vector: From<Vec<T>>,
{
    let elems: Vec<ListElem> = rep
        .to_vec()
        .into_iter()
        .map(|elem| OptionNA::Some(Rc::new(Vector::from(vec![elem]))))
        .collect();
    Rep::from(elems)
}

impl Vector {
    /// A list-vector from element values.
    pub fn list(elems: Vec<Vector>) -> Vector {
        let elems: Vec<ListElem> = elems
            .into_iter()
            .map(|v| OptionNA::Some(Rc::new(v)))
            .collect();
        Vector::List(Rep::from(elems))
    }
}

impl From<Vec<Logical>> for Vector {
    fn from(value: Vec<Logical>) -> Self {
        Vector::Logical(Rep::from(value))
    }
}

impl From<Vec<Integer>> for Vector {
    fn from(value: Vec<Integer>) -> Self {
        Vector::Integer(Rep::from(value))
    }
}

impl From<Vec<Double>> for Vector {
    fn from(value: Vec<Double>) -> Self {
        Vector::Double(Rep::from(value))
    }
}

impl From<Vec<Complex>> for Vector {
    fn from(value: Vec<Complex>) -> Self {
        Vector::Complex(Rep::from(value))
    }
}

impl From<Vec<Character>> for Vector {
    fn from(value: Vec<Character>) -> Self {
        Vector::Character(Rep::from(value))
    }
}

impl From<Vec<ListElem>> for Vector {
    fn from(value: Vec<ListElem>) -> Self {
        Vector::List(Rep::from(value))
    }
}

impl From<Vec<bool>> for Vector {
    fn from(value: Vec<bool>) -> Self {
        let value: Vec<Logical> = value.into_iter().map(OptionNA::Some).collect();
        value.into()
    }
}

impl From<Vec<i32>> for Vector {
    fn from(value: Vec<i32>) -> Self {
        let value: Vec<Integer> = value.into_iter().map(OptionNA::Some).collect();
        value.into()
    }
}

impl From<Vec<f64>> for Vector {
    fn from(value: Vec<f64>) -> Self {
        let value: Vec<Double> = value.into_iter().map(OptionNA::Some).collect();
        value.into()
    }
}

impl From<Vec<Cplx>> for Vector {
    fn from(value: Vec<Cplx>) -> Self {
        let value: Vec<Complex> = value.into_iter().map(OptionNA::Some).collect();
        value.into()
    }
}

impl From<Vec<String>> for Vector {
    fn from(value: Vec<String>) -> Self {
        let value: Vec<Character> = value.into_iter().map(OptionNA::Some).collect();
        value.into()
    }
}

impl From<Vec<&str>> for Vector {
    fn from(value: Vec<&str>) -> Self {
        let value: Vec<Character> = value
            .into_iter()
            .map(|s| OptionNA::Some(s.to_string()))
            .collect();
        value.into()
    }
}
