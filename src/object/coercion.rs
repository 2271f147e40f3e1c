use super::types::*;
use crate::ptype::AtomicKind;

/// Report the atomic kind of a vector's element type
///
/// Links each element type back into the coercion ladder so that typed
/// storage can report a [crate::ptype::TypeTag] without inspecting its
/// contents.
///
pub trait AtomicMode {
    fn atomic_kind() -> AtomicKind;
}

impl AtomicMode for Logical {
    fn atomic_kind() -> AtomicKind {
        AtomicKind::Logical
    }
}

impl AtomicMode for Integer {
    fn atomic_kind() -> AtomicKind {
        AtomicKind::Integer
    }
}

impl AtomicMode for Double {
    fn atomic_kind() -> AtomicKind {
        AtomicKind::Double
    }
}

impl AtomicMode for Complex {
    fn atomic_kind() -> AtomicKind {
        AtomicKind::Complex
    }
}

impl AtomicMode for Character {
    fn atomic_kind() -> AtomicKind {
        AtomicKind::Character
    }
}

/// Element-level widening along the coercion ladder
///
/// Implemented for every ordered pair of element types with
/// logical < integer < double < complex < character. Narrowing
/// conversions are deliberately absent; the lattice resolver only ever
/// widens toward the common type.
///
pub trait CoercibleInto<T>: Sized {
    fn coerce_into(self) -> T;
}

impl CoercibleInto<Logical> for Logical {
    #[inline]
    fn coerce_into(self) -> Logical {
        self
    }
}

impl CoercibleInto<Integer> for Logical {
    #[inline]
    fn coerce_into(self) -> Integer {
        self.map(|i| i as i32)
    }
}

impl CoercibleInto<Double> for Logical {
    #[inline]
    fn coerce_into(self) -> Double {
        self.map(|i| i as i32 as f64)
    }
}

impl CoercibleInto<Complex> for Logical {
    #[inline]
    fn coerce_into(self) -> Complex {
        self.map(|i| Cplx::from(i as i32 as f64))
    }
}

impl CoercibleInto<Character> for Logical {
    fn coerce_into(self) -> Character {
        self.map(|i| if i { "TRUE".to_string() } else { "FALSE".to_string() })
    }
}

impl CoercibleInto<Integer> for Integer {
    #[inline]
    fn coerce_into(self) -> Integer {
        self
    }
}

impl CoercibleInto<Double> for Integer {
    #[inline]
    fn coerce_into(self) -> Double {
        self.map(|i| i as f64)
    }
}

impl CoercibleInto<Complex> for Integer {
    #[inline]
    fn coerce_into(self) -> Complex {
        self.map(|i| Cplx::from(i as f64))
    }
}

impl CoercibleInto<Character> for Integer {
    fn coerce_into(self) -> Character {
        self.map(|i| format!("{}", i))
    }
}

impl CoercibleInto<Double> for Double {
    #[inline]
    fn coerce_into(self) -> Double {
        self
    }
}

impl CoercibleInto<Complex> for Double {
    #[inline]
    fn coerce_into(self) -> Complex {
        self.map(Cplx::from)
    }
}

impl CoercibleInto<Character> for Double {
    fn coerce_into(self) -> Character {
        self.map(|i| format!("{}", i))
    }
}

impl CoercibleInto<Complex> for Complex {
    #[inline]
    fn coerce_into(self) -> Complex {
        self
    }
}

impl CoercibleInto<Character> for Complex {
    fn coerce_into(self) -> Character {
        self.map(|i| format!("{:?}", i))
    }
}

impl CoercibleInto<Character> for Character {
    #[inline]
    fn coerce_into(self) -> Character {
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::object::OptionNA::*;

    #[test]
    fn modes_report_their_kind() {
        assert_eq!(Logical::atomic_kind(), AtomicKind::Logical);
        assert_eq!(Integer::atomic_kind(), AtomicKind::Integer);
        assert_eq!(Double::atomic_kind(), AtomicKind::Double);
        assert_eq!(Complex::atomic_kind(), AtomicKind::Complex);
        assert_eq!(Character::atomic_kind(), AtomicKind::Character);
    }

    #[test]
    fn na_survives_coercion() {
        let x: Double = CoercibleInto::<Double>::coerce_into(Integer::NA);
        assert!(x.is_na());
        let x: Character = CoercibleInto::<Character>::coerce_into(Logical::NA);
        assert!(x.is_na());
    }

    #[test]
    fn logical_widens() {
        assert_eq!(CoercibleInto::<Integer>::coerce_into(Some(true)), Some(1));
        assert_eq!(CoercibleInto::<Double>::coerce_into(Some(false)), Some(0.0));
        assert_eq!(
            CoercibleInto::<Character>::coerce_into(Some(true)),
            Some("TRUE".to_string())
        );
    }

    #[test]
    fn numeric_widens_to_complex() {
        assert_eq!(
            CoercibleInto::<Complex>::coerce_into(Some(2)),
            Some(Cplx::new(2.0, 0.0))
        );
        assert_eq!(
            CoercibleInto::<Complex>::coerce_into(Some(0.5)),
            Some(Cplx::new(0.5, 0.0))
        );
    }

    #[test]
    fn complex_formats_as_character() {
        assert_eq!(
            CoercibleInto::<Character>::coerce_into(Some(Cplx::new(1.0, -1.0))),
            Some("1-1i".to_string())
        );
    }
}
