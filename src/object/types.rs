use std::fmt::Debug;

/// A value that may be missing
///
/// Every atomic element in the engine is wrapped in [OptionNA] so that
/// missingness survives coercion and slicing. The default value of any
/// atomic element type is `NA`, which is what extraction produces for
/// missing selections and what growth fills new slots with.
///
#[derive(Default, Clone, Copy, PartialEq)]
pub enum OptionNA<T> {
    #[default]
    NA,
    Some(T),
}

impl<T> OptionNA<T> {
    pub fn map<F, U>(self, f: F) -> OptionNA<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            OptionNA::Some(x) => OptionNA::Some(f(x)),
            OptionNA::NA => OptionNA::NA,
        }
    }

    pub fn as_option(self) -> Option<T> {
        match self {
            OptionNA::Some(x) => Option::Some(x),
            OptionNA::NA => Option::None,
        }
    }

    pub fn is_na(&self) -> bool {
        matches!(self, OptionNA::NA)
    }
}

impl<T> PartialOrd for OptionNA<T>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (OptionNA::Some(l), OptionNA::Some(r)) => l.partial_cmp(r),
            _ => None,
        }
    }
}

impl<T> Debug for OptionNA<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionNA::Some(x) => write!(f, "{:?}", x),
            OptionNA::NA => write!(f, "NA"),
        }
    }
}

impl<T> From<T> for OptionNA<T> {
    fn from(value: T) -> Self {
        OptionNA::Some(value)
    }
}

/// A complex scalar
///
/// Stored as a plain cartesian pair. Only storage, coercion and display
/// are needed here; complex arithmetic is out of scope.
///
#[derive(Default, Clone, Copy, PartialEq)]
pub struct Cplx {
    pub re: f64,
    pub im: f64,
}

impl Cplx {
    pub fn new(re: f64, im: f64) -> Self {
        Cplx { re, im }
    }
}

impl From<f64> for Cplx {
    fn from(re: f64) -> Self {
        Cplx { re, im: 0.0 }
    }
}

impl Debug for Cplx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.im < 0.0 {
            write!(f, "{}{}i", self.re, self.im)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}

pub type Logical = OptionNA<bool>;
pub type Integer = OptionNA<i32>;
pub type Double = OptionNA<f64>;
pub type Complex = OptionNA<Cplx>;
pub type Character = OptionNA<String>;
