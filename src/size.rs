use crate::contract_violation;
use crate::error::Error;
use crate::object::{Handle, Record, Vector};

/// Find the common size of a collection of vector sizes
///
/// An empty collection and any operand of size 0 both resolve to 0:
/// broadcasting against an empty vector empties the result, overriding
/// every other operand. Otherwise the common size is the maximum,
/// provided every operand is either size 1 or already at the maximum.
/// The failure reports every offending operand's index and size.
///
pub fn common_size(sizes: &[usize]) -> Result<usize, Error> {
    if sizes.is_empty() || sizes.contains(&0) {
        return Ok(0);
    }

    let size = sizes.iter().copied().max().unwrap_or(0);
    let offenders: Vec<(usize, usize)> = sizes
        .iter()
        .enumerate()
        .filter(|(_, &n)| n != 1 && n != size)
        .map(|(i, &n)| (i, n))
        .collect();

    if offenders.is_empty() {
        Ok(size)
    } else {
        Err(Error::IncompatibleSize { sizes: offenders, size })
    }
}

/// Common size across handles, using each handle's own size concept.
pub fn common_size_of(handles: &[&Handle]) -> Result<usize, Error> {
    let sizes: Vec<usize> = handles.iter().map(|h| h.len()).collect();
    common_size(&sizes)
}

/// Recycle a vector to a target size established by [common_size]
///
/// An already-sized vector passes through untouched, identical storage
/// and all. A size-1 vector becomes a repeated view: a fresh virtual
/// handle that behaves as fully materialized for reads but defers the
/// copy until something needs its storage. Any other combination means
/// the size resolver was skipped, which is a bug in the caller.
///
pub fn recycle(handle: Handle, size: usize) -> Result<Handle, Error> {
    let n = handle.len();

    if n == size {
        return Ok(handle);
    }

    if n != 1 {
        return Err(contract_violation!(format!(
            "cannot recycle a vector of size {n} to size {size}"
        )));
    }

    log::trace!("recycling size-1 vector to a repeated view of length {size}");
    match handle.vector() {
        Vector::Record(record) => {
            let columns = record
                .columns()
                .iter()
                .map(|(name, column)| Ok((name.clone(), column.repeat_first(size)?)))
                .collect::<Result<Vec<_>, Error>>()?;
            Ok(Handle::new(Vector::Record(Record::new(columns)?)))
        }
        vector => Ok(Handle::new(vector.repeat_first(size)?)),
    }
}
