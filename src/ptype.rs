use crate::error::Error;
use crate::registry::Registry;

use hashbrown::HashMap;

/// Atomic vector kinds, ordered by the coercion ladder
///
/// The derived `Ord` is the lattice for atomic pairs: the common type of
/// two atomic vectors is simply the greater kind.
///
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum AtomicKind {
    Logical,
    Integer,
    Double,
    Complex,
    Character,
}

/// A vector's type descriptor
///
/// Records carry their column types; the column list is kept sorted by
/// name so that structurally equal record types compare equal regardless
/// of the order columns were declared in.
///
#[derive(Debug, Clone, PartialEq)]
pub enum TypeTag {
    Atomic(AtomicKind),
    List,
    Record(Vec<(String, TypeTag)>),
    Custom(String),
}

impl TypeTag {
    pub fn record<I, S>(columns: I) -> TypeTag
    where
        I: IntoIterator<Item = (S, TypeTag)>,
        S: Into<String>,
    {
        let mut columns: Vec<(String, TypeTag)> = columns
            .into_iter()
            .map(|(name, tag)| (name.into(), tag))
            .collect();
        columns.sort_by(|l, r| l.0.cmp(&r.0));
        TypeTag::Record(columns)
    }

    /// The identifier used to key registry rules.
    pub fn identifier(&self) -> String {
        match self {
            TypeTag::Atomic(kind) => kind.to_string(),
            TypeTag::List => "list".to_string(),
            TypeTag::Record(_) => "record".to_string(),
            TypeTag::Custom(id) => id.clone(),
        }
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeTag::Atomic(kind) => write!(f, "{kind}"),
            TypeTag::List => write!(f, "list"),
            TypeTag::Record(columns) => {
                let fields = columns
                    .iter()
                    .map(|(name, tag)| format!("{name}: {tag}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "record<{fields}>")
            }
            TypeTag::Custom(id) => write!(f, "{id}"),
        }
    }
}

/// Caller configuration for the lattice
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeOptions {
    /// Unify an atomic type with a list by promoting the atomic side.
    pub promote_atomic_to_list: bool,
}

/// Find the least-upper-bound type of two type descriptors
///
/// The built-in hierarchy is consulted first; pairs it cannot place are
/// handed to the registry, keyed by the ordered pair of identifiers and
/// tried in both directions. Resolution is commutative and, folded over
/// more than two operands, independent of fold order.
///
pub fn resolve_type(
    lhs: &TypeTag,
    rhs: &TypeTag,
    registry: &Registry,
    options: &TypeOptions,
) -> Result<TypeTag, Error> {
    use TypeTag::*;
    match (lhs, rhs) {
        (Atomic(l), Atomic(r)) => Ok(Atomic(std::cmp::max(*l, *r))),
        (List, List) => Ok(List),
        (Atomic(_), List) | (List, Atomic(_)) if options.promote_atomic_to_list => Ok(List),
        (Record(l), Record(r)) => resolve_record(l, r, registry, options),
        _ => registry
            .resolve(lhs, rhs)
            .ok_or_else(|| Error::IncompatibleType { lhs: lhs.clone(), rhs: rhs.clone() }),
    }
}

/// Column-wise unification of two record types
///
/// Requires identical column name sets; shared columns resolve
/// recursively. The mismatch error reports which names each side lacks.
///
fn resolve_record(
    lhs: &[(String, TypeTag)],
    rhs: &[(String, TypeTag)],
    registry: &Registry,
    options: &TypeOptions,
) -> Result<TypeTag, Error> {
    let rhs_types: HashMap<&str, &TypeTag> = rhs
        .iter()
        .map(|(name, tag)| (name.as_str(), tag))
        .collect();

    let missing: Vec<String> = rhs
        .iter()
        .filter(|(name, _)| !lhs.iter().any(|(l, _)| l == name))
        .map(|(name, _)| name.clone())
        .collect();
    let extra: Vec<String> = lhs
        .iter()
        .filter(|(name, _)| !rhs_types.contains_key(name.as_str()))
        .map(|(name, _)| name.clone())
        .collect();

    if !missing.is_empty() || !extra.is_empty() {
        return Err(Error::IncompatibleRecordFields { missing, extra });
    }

    let columns = lhs
        .iter()
        .map(|(name, ltag)| {
            let rtag = rhs_types[name.as_str()];
            Ok((name.clone(), resolve_type(ltag, rtag, registry, options)?))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(TypeTag::record(columns))
}

/// Fold [resolve_type] over any number of operands
///
/// Returns `None` for an empty sequence; otherwise folds left-to-right,
/// which by the lattice's commutativity and associativity agrees with
/// every other fold order.
///
pub fn common_type<'a, I>(
    types: I,
    registry: &Registry,
    options: &TypeOptions,
) -> Result<Option<TypeTag>, Error>
where
    I: IntoIterator<Item = &'a TypeTag>,
{
    let mut iter = types.into_iter();
    let Some(first) = iter.next() else {
        return Ok(None);
    };

    let mut result = first.clone();
    for tag in iter {
        result = resolve_type(&result, tag, registry, options)?;
    }
    Ok(Some(result))
}
