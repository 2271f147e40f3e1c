use crate::contract_violation;
use crate::error::Error;
use crate::location::{NormalizedLocation, Pick};
use crate::object::{Handle, Record, Rep, Vector};
use crate::owned::ensure_mutable;
use crate::ptype::{resolve_type, TypeOptions};
use crate::registry::Registry;

/// Read the selected elements out into a new vector
///
/// The result is always fresh, concrete and exclusively owned;
/// extraction never aliases its source. Missing selections come out as
/// the element type's `NA`. Growth markers are an assignment-only
/// concept and are rejected here.
///
pub fn extract(handle: &Handle, location: &NormalizedLocation) -> Result<Handle, Error> {
    if location.size() != handle.len() {
        return Err(contract_violation!(format!(
            "location normalized for size {} applied to a vector of size {}",
            location.size(),
            handle.len()
        )));
    }

    if location.max_grow().is_some() {
        return Err(contract_violation!("extraction cannot extend a vector"));
    }

    Ok(Handle::new(extract_vector(handle.vector(), location)?))
}

fn extract_vector(vector: &Vector, location: &NormalizedLocation) -> Result<Vector, Error> {
    match vector {
        Vector::Logical(v) => Ok(Vector::Logical(extract_rep(v, location))),
        Vector::Integer(v) => Ok(Vector::Integer(extract_rep(v, location))),
        Vector::Double(v) => Ok(Vector::Double(extract_rep(v, location))),
        Vector::Complex(v) => Ok(Vector::Complex(extract_rep(v, location))),
        Vector::Character(v) => Ok(Vector::Character(extract_rep(v, location))),
        Vector::List(v) => Ok(Vector::List(extract_rep(v, location))),
        Vector::Record(record) => {
            let columns = record
                .columns()
                .iter()
                .map(|(name, column)| Ok((name.clone(), extract_vector(column, location)?)))
                .collect::<Result<Vec<_>, Error>>()?;
            Ok(Vector::Record(Record::new(columns)?))
        }
    }
}

fn extract_rep<T: Clone + Default>(rep: &Rep<T>, location: &NormalizedLocation) -> Rep<T> {
    let values: Vec<T> = location
        .picks()
        .iter()
        .map(|pick| match pick {
            Pick::Pos(i) => rep.get(i - 1).unwrap_or_default(),
            Pick::Missing => T::default(),
            // unreachable: rejected before extraction begins
            Pick::Grow(_) => T::default(),
        })
        .collect();
    Rep::from(values)
}

/// Write values into the selected elements
///
/// The container and values are first widened to their common type;
/// the container then passes through [ensure_mutable] exactly once
/// before the first write, so shared or virtual storage is cloned and
/// everything after mutates in place. Values are recycled when they
/// are a single element; otherwise their size must match the number of
/// selected positions. Growth markers extend the container with `NA`
/// fill before writing. Missing selections write nothing but still
/// consume their value slot.
///
pub fn assign(
    handle: Handle,
    location: &NormalizedLocation,
    values: Handle,
) -> Result<Handle, Error> {
    if location.size() != handle.len() {
        return Err(contract_violation!(format!(
            "location normalized for size {} applied to a vector of size {}",
            location.size(),
            handle.len()
        )));
    }

    let target = resolve_type(
        &handle.type_tag(),
        &values.type_tag(),
        &Registry::default(),
        &TypeOptions::default(),
    )?;

    let needed = location.len();
    let given = values.len();
    if given != 1 && given != needed {
        return Err(Error::AssignmentSize { needed, given });
    }

    let container = if handle.type_tag() == target {
        handle
    } else {
        Handle::new(handle.vector().cast(&target)?)
    };
    let container = ensure_mutable(container);

    let values = if values.type_tag() == target {
        values
    } else {
        Handle::new(values.vector().cast(&target)?)
    };

    if let Some(grow) = location.max_grow() {
        log::debug!("growing a vector of size {} to size {grow} for assignment", location.size());
        grow_vector(container.vector(), grow)?;
    }

    write_vector(container.vector(), location, values.vector())?;
    Ok(container)
}

fn grow_vector(vector: &Vector, size: usize) -> Result<(), Error> {
    match vector {
        Vector::Logical(v) => grow_rep(v, size),
        Vector::Integer(v) => grow_rep(v, size),
        Vector::Double(v) => grow_rep(v, size),
        Vector::Complex(v) => grow_rep(v, size),
        Vector::Character(v) => grow_rep(v, size),
        Vector::List(v) => grow_rep(v, size),
        Vector::Record(record) => {
            for (_, column) in record.columns() {
                grow_vector(column, size)?;
            }
            Ok(())
        }
    }
}

fn grow_rep<T: Clone + Default>(rep: &Rep<T>, size: usize) -> Result<(), Error> {
    match rep {
        Rep::Concrete(cell) => {
            let mut buffer = cell.borrow_mut();
            if buffer.len() < size {
                buffer.resize(size, T::default());
            }
            Ok(())
        }
        Rep::Repeated(..) => Err(contract_violation!("cannot grow a virtual vector")),
    }
}

fn write_vector(
    container: &Vector,
    location: &NormalizedLocation,
    values: &Vector,
) -> Result<(), Error> {
    match (container, values) {
        (Vector::Logical(l), Vector::Logical(r)) => write_rep(l, location, r),
        (Vector::Integer(l), Vector::Integer(r)) => write_rep(l, location, r),
        (Vector::Double(l), Vector::Double(r)) => write_rep(l, location, r),
        (Vector::Complex(l), Vector::Complex(r)) => write_rep(l, location, r),
        (Vector::Character(l), Vector::Character(r)) => write_rep(l, location, r),
        (Vector::List(l), Vector::List(r)) => write_rep(l, location, r),
        (Vector::Record(l), Vector::Record(r)) => {
            for (name, column) in l.columns() {
                let value_column = r.column(name).ok_or_else(|| {
                    contract_violation!(format!("values are missing column '{name}'"))
                })?;
                write_vector(column, location, value_column)?;
            }
            Ok(())
        }
        _ => Err(contract_violation!(
            "container and values must share a type after coercion"
        )),
    }
}

fn write_rep<T: Clone + Default>(
    rep: &Rep<T>,
    location: &NormalizedLocation,
    values: &Rep<T>,
) -> Result<(), Error> {
    let Rep::Concrete(cell) = rep else {
        return Err(contract_violation!("assignment requires concrete storage"));
    };

    let recycled = values.len() == 1;
    let mut buffer = cell.borrow_mut();

    for (slot, pick) in location.picks().iter().enumerate() {
        let value = if recycled { values.get(0) } else { values.get(slot) };
        let Some(value) = value else { continue };

        match pick {
            Pick::Pos(i) | Pick::Grow(i) => buffer[i - 1] = value,
            Pick::Missing => continue,
        }
    }

    Ok(())
}
