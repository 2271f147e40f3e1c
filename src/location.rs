use crate::contract_violation;
use crate::error::Error;
use crate::object::{Character, Integer, Logical, OptionNA};

use hashbrown::{HashMap, HashSet};

/// A raw location specification
///
/// Indices are 1-based. Positive indices select, negative indices
/// exclude, and the two cannot be mixed in one spec. Masks select by
/// position, names by label.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Indices(Vec<Integer>),
    Mask(Vec<Logical>),
    Names(Vec<Character>),
}

impl From<Vec<i32>> for Location {
    fn from(value: Vec<i32>) -> Self {
        Location::Indices(value.into_iter().map(OptionNA::Some).collect())
    }
}

impl From<Vec<bool>> for Location {
    fn from(value: Vec<bool>) -> Self {
        Location::Mask(value.into_iter().map(OptionNA::Some).collect())
    }
}

impl From<Vec<&str>> for Location {
    fn from(value: Vec<&str>) -> Self {
        Location::Names(
            value
                .into_iter()
                .map(|s| OptionNA::Some(s.to_string()))
                .collect(),
        )
    }
}

/// What to do with a positive index beyond the vector's size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutOfBounds {
    #[default]
    Error,
    /// Retain the position and flag it for growth. Only meaningful for
    /// assignment; extraction rejects the flagged positions.
    Extend,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationOptions {
    pub out_of_bounds: OutOfBounds,
    /// Permit missing markers in integer specs and masks.
    pub allow_missing: bool,
}

impl Default for LocationOptions {
    fn default() -> Self {
        LocationOptions { out_of_bounds: OutOfBounds::Error, allow_missing: true }
    }
}

/// One canonical selection
///
/// `Pos` and `Grow` are 1-based; `Grow` marks a position beyond the
/// normalized size that assignment must create first.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    Pos(usize),
    Missing,
    Grow(usize),
}

/// The canonical, validated form of a location specification
///
/// An ordered sequence of picks (duplicates allowed, order significant)
/// plus the size it was normalized against, so downstream consumers can
/// check they are slicing the vector the spec was resolved for.
///
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedLocation {
    picks: Vec<Pick>,
    size: usize,
}

impl NormalizedLocation {
    pub fn picks(&self) -> &[Pick] {
        &self.picks
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of selected positions.
    pub fn len(&self) -> usize {
        self.picks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// The largest growth target, if any position extends the vector.
    pub fn max_grow(&self) -> Option<usize> {
        self.picks
            .iter()
            .filter_map(|pick| match pick {
                Pick::Grow(n) => Some(*n),
                _ => None,
            })
            .max()
    }
}

/// A name table for selection by label
///
/// Lookup follows the first-match policy: duplicate names are allowed
/// in the table, but only the first occurrence is ever matched. Missing
/// and empty names can appear in the table; they are simply unmatchable.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Names {
    values: Vec<Character>,
    index: HashMap<String, usize>,
}

impl Names {
    pub fn new(values: Vec<Character>) -> Self {
        let mut index = HashMap::new();
        for (i, name) in values.iter().enumerate() {
            if let OptionNA::Some(name) = name {
                if !name.is_empty() {
                    index.entry(name.clone()).or_insert(i);
                }
            }
        }
        Names { values, index }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 0-indexed position of the first occurrence of a name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}

impl From<Vec<&str>> for Names {
    fn from(value: Vec<&str>) -> Self {
        Names::new(
            value
                .into_iter()
                .map(|s| OptionNA::Some(s.to_string()))
                .collect(),
        )
    }
}

/// Normalize a location specification against a vector size
///
/// Produces the canonical 1-based index sequence, or reports exactly
/// which part of the spec cannot be resolved. The output's size always
/// echoes the `size` argument, independent of how selection was
/// expressed.
///
pub fn normalize(
    spec: &Location,
    size: usize,
    names: Option<&Names>,
    options: &LocationOptions,
) -> Result<NormalizedLocation, Error> {
    let picks = match spec {
        Location::Indices(indices) => normalize_indices(indices, size, options)?,
        Location::Mask(mask) => normalize_mask(mask, size, options)?,
        Location::Names(requested) => normalize_names(requested, size, names)?,
    };

    Ok(NormalizedLocation { picks, size })
}

fn normalize_indices(
    indices: &[Integer],
    size: usize,
    options: &LocationOptions,
) -> Result<Vec<Pick>, Error> {
    let has_positive = indices.iter().any(|i| matches!(i, OptionNA::Some(x) if *x > 0));
    let has_negative = indices.iter().any(|i| matches!(i, OptionNA::Some(x) if *x < 0));

    if has_positive && has_negative {
        return Err(Error::MixedSignLocation);
    }

    if has_negative {
        return normalize_exclusions(indices, size, options);
    }

    let mut picks = Vec::with_capacity(indices.len());
    for index in indices {
        match index {
            OptionNA::NA if options.allow_missing => picks.push(Pick::Missing),
            OptionNA::NA => return Err(Error::MissingLocation),
            OptionNA::Some(0) => continue,
            OptionNA::Some(x) => {
                let position = *x as usize;
                if position <= size {
                    picks.push(Pick::Pos(position))
                } else {
                    match options.out_of_bounds {
                        OutOfBounds::Extend => picks.push(Pick::Grow(position)),
                        OutOfBounds::Error => {
                            return Err(Error::OutOfBounds { index: *x, size })
                        }
                    }
                }
            }
        }
    }

    Ok(picks)
}

/// Resolve an all-negative spec into the complement of its exclusions
///
/// Duplicated exclusions collapse; the canonical sequence is every
/// retained position in ascending order. Exclusion has no meaningful
/// interaction with growth, so combining it with the extension policy
/// is rejected outright rather than guessed at.
///
fn normalize_exclusions(
    indices: &[Integer],
    size: usize,
    options: &LocationOptions,
) -> Result<Vec<Pick>, Error> {
    if options.out_of_bounds == OutOfBounds::Extend {
        return Err(contract_violation!(
            "negative locations cannot be combined with out-of-bounds extension"
        ));
    }

    let mut excluded = HashSet::new();
    for index in indices {
        match index {
            OptionNA::NA => return Err(Error::MissingLocation),
            OptionNA::Some(0) => continue,
            OptionNA::Some(x) => {
                let position = x.unsigned_abs() as usize;
                if position > size {
                    return Err(Error::OutOfBounds { index: *x, size });
                }
                excluded.insert(position);
            }
        }
    }

    Ok((1..=size)
        .filter(|i| !excluded.contains(i))
        .map(Pick::Pos)
        .collect())
}

fn normalize_mask(
    mask: &[Logical],
    size: usize,
    options: &LocationOptions,
) -> Result<Vec<Pick>, Error> {
    // a length-1 mask broadcasts across the full vector
    if let [only] = mask {
        return match only {
            OptionNA::Some(true) => Ok((1..=size).map(Pick::Pos).collect()),
            OptionNA::Some(false) => Ok(Vec::new()),
            OptionNA::NA if options.allow_missing => Ok(vec![Pick::Missing; size]),
            OptionNA::NA => Err(Error::MissingLocation),
        };
    }

    if mask.len() != size {
        return Err(Error::MaskLength { mask: mask.len(), size });
    }

    let mut picks = Vec::new();
    for (i, entry) in mask.iter().enumerate() {
        match entry {
            OptionNA::Some(true) => picks.push(Pick::Pos(i + 1)),
            OptionNA::Some(false) => continue,
            OptionNA::NA if options.allow_missing => picks.push(Pick::Missing),
            OptionNA::NA => return Err(Error::MissingLocation),
        }
    }

    Ok(picks)
}

fn normalize_names(
    requested: &[Character],
    size: usize,
    names: Option<&Names>,
) -> Result<Vec<Pick>, Error> {
    let Some(names) = names else {
        return Err(Error::Unnamed);
    };

    if names.len() != size {
        return Err(contract_violation!(format!(
            "name table of length {} does not match size {size}",
            names.len()
        )));
    }

    requested
        .iter()
        .map(|name| match name {
            OptionNA::NA => Err(Error::InvalidName),
            OptionNA::Some(name) if name.is_empty() => Err(Error::InvalidName),
            OptionNA::Some(name) => match names.position(name) {
                Some(i) => Ok(Pick::Pos(i + 1)),
                None => Err(Error::UnknownName(name.clone())),
            },
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;

    fn positions(loc: &NormalizedLocation) -> Vec<usize> {
        loc.picks()
            .iter()
            .map(|pick| match pick {
                Pick::Pos(i) => *i,
                other => panic!("expected a plain position, found {other:?}"),
            })
            .collect()
    }

    #[test]
    fn positive_indices_normalize_verbatim() {
        let spec = Location::from(vec![1, 2, 3, 4, 5]);
        let loc = normalize(&spec, 5, None, &LocationOptions::default()).unwrap();
        assert_eq!(positions(&loc), vec![1, 2, 3, 4, 5]);
        assert_eq!(loc.size(), 5);
    }

    #[test]
    fn duplicates_and_order_are_preserved() {
        let spec = Location::from(vec![3, 1, 3, 3]);
        let loc = normalize(&spec, 5, None, &LocationOptions::default()).unwrap();
        assert_eq!(positions(&loc), vec![3, 1, 3, 3]);
    }

    #[test]
    fn zeros_are_dropped() {
        let spec = Location::from(vec![0, 1, 0, 2]);
        let loc = normalize(&spec, 5, None, &LocationOptions::default()).unwrap();
        assert_eq!(positions(&loc), vec![1, 2]);
    }

    #[test]
    fn missing_indices_propagate() {
        let spec = Location::Indices(vec![Integer::Some(1), Integer::NA]);
        let loc = normalize(&spec, 5, None, &LocationOptions::default()).unwrap();
        assert_eq!(loc.picks(), &[Pick::Pos(1), Pick::Missing]);
    }

    #[test]
    fn missing_indices_can_be_disallowed() {
        let options = LocationOptions { allow_missing: false, ..Default::default() };
        let spec = Location::Indices(vec![Integer::NA]);
        let result = normalize(&spec, 5, None, &options);
        assert_eq!(result, Err(Error::MissingLocation));
    }

    #[test]
    fn mixed_signs_fail_for_any_size() {
        let spec = Location::from(vec![1, -1]);
        for size in [0, 1, 5, 100] {
            let result = normalize(&spec, size, None, &LocationOptions::default());
            assert_eq!(result, Err(Error::MixedSignLocation));
        }
    }

    #[test]
    fn negative_indices_complement() {
        let spec = Location::from(vec![-2, -4]);
        let loc = normalize(&spec, 5, None, &LocationOptions::default()).unwrap();
        assert_eq!(positions(&loc), vec![1, 3, 5]);
    }

    #[test]
    fn negative_duplicates_collapse() {
        let spec = Location::from(vec![-2, -2, -2]);
        let loc = normalize(&spec, 4, None, &LocationOptions::default()).unwrap();
        assert_eq!(positions(&loc), vec![1, 3, 4]);
    }

    #[test]
    fn negative_beyond_bounds_is_invalid() {
        let spec = Location::from(vec![-7]);
        let result = normalize(&spec, 5, None, &LocationOptions::default());
        assert_eq!(result, Err(Error::OutOfBounds { index: -7, size: 5 }));
    }

    #[test]
    fn negative_with_extension_is_a_contract_violation() {
        let options =
            LocationOptions { out_of_bounds: OutOfBounds::Extend, ..Default::default() };
        let spec = Location::from(vec![-1]);
        let result = normalize(&spec, 5, None, &options);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::ContractViolation);
    }

    #[test]
    fn out_of_bounds_errors_by_default() {
        let spec = Location::from(vec![5]);
        let result = normalize(&spec, 3, None, &LocationOptions::default());
        assert_eq!(result, Err(Error::OutOfBounds { index: 5, size: 3 }));
    }

    #[test]
    fn out_of_bounds_can_flag_growth() {
        let options =
            LocationOptions { out_of_bounds: OutOfBounds::Extend, ..Default::default() };
        let spec = Location::from(vec![2, 5]);
        let loc = normalize(&spec, 3, None, &options).unwrap();
        assert_eq!(loc.picks(), &[Pick::Pos(2), Pick::Grow(5)]);
        assert_eq!(loc.max_grow(), Some(5));
        assert_eq!(loc.size(), 3);
    }

    #[test]
    fn mask_selects_true_positions() {
        let spec = Location::from(vec![true, false, true]);
        let loc = normalize(&spec, 3, None, &LocationOptions::default()).unwrap();
        assert_eq!(positions(&loc), vec![1, 3]);
    }

    #[test]
    fn mask_broadcasts_from_length_one() {
        let spec = Location::from(vec![true]);
        let loc = normalize(&spec, 4, None, &LocationOptions::default()).unwrap();
        assert_eq!(positions(&loc), vec![1, 2, 3, 4]);

        let spec = Location::from(vec![false]);
        let loc = normalize(&spec, 4, None, &LocationOptions::default()).unwrap();
        assert!(loc.is_empty());
    }

    #[test]
    fn missing_mask_entries_select_missing() {
        let spec = Location::Mask(vec![
            Logical::Some(true),
            Logical::NA,
            Logical::Some(false),
        ]);
        let loc = normalize(&spec, 3, None, &LocationOptions::default()).unwrap();
        assert_eq!(loc.picks(), &[Pick::Pos(1), Pick::Missing]);
    }

    #[test]
    fn mask_length_must_match() {
        let spec = Location::from(vec![true, false]);
        let result = normalize(&spec, 3, None, &LocationOptions::default());
        assert_eq!(result, Err(Error::MaskLength { mask: 2, size: 3 }));
    }

    #[test]
    fn names_resolve_to_first_match() {
        let names = Names::from(vec!["a", "b", "a", "c"]);
        let spec = Location::from(vec!["a", "c", "a"]);
        let loc = normalize(&spec, 4, Some(&names), &LocationOptions::default()).unwrap();
        assert_eq!(positions(&loc), vec![1, 4, 1]);
    }

    #[test]
    fn unknown_names_are_invalid() {
        let names = Names::from(vec!["a", "b"]);
        let spec = Location::from(vec!["z"]);
        let result = normalize(&spec, 2, Some(&names), &LocationOptions::default());
        assert_eq!(result, Err(Error::UnknownName("z".to_string())));
    }

    #[test]
    fn empty_and_missing_names_are_invalid() {
        let names = Names::from(vec!["a", ""]);
        let spec = Location::from(vec![""]);
        let result = normalize(&spec, 2, Some(&names), &LocationOptions::default());
        assert_eq!(result, Err(Error::InvalidName));

        let spec = Location::Names(vec![Character::NA]);
        let result = normalize(&spec, 2, Some(&names), &LocationOptions::default());
        assert_eq!(result, Err(Error::InvalidName));
    }

    #[test]
    fn names_require_a_name_table() {
        let spec = Location::from(vec!["a"]);
        let result = normalize(&spec, 2, None, &LocationOptions::default());
        assert_eq!(result, Err(Error::Unnamed));
    }

    #[test]
    fn name_table_length_must_match_size() {
        let names = Names::from(vec!["a", "b"]);
        let spec = Location::from(vec!["a"]);
        let result = normalize(&spec, 3, Some(&names), &LocationOptions::default());
        assert_eq!(result.unwrap_err().kind(), ErrorKind::ContractViolation);
    }

    #[test]
    fn normalized_size_echoes_the_argument() {
        let spec = Location::from(vec![1]);
        let loc = normalize(&spec, 9, None, &LocationOptions::default()).unwrap();
        assert_eq!(loc.size(), 9);
        assert_eq!(loc.len(), 1);
    }
}
