use super::vector::Vector;
use crate::contract_violation;
use crate::error::Error;
use crate::ptype::TypeTag;

/// A record: named columns of equal length
///
/// The record's size is its row count, not its column count; every
/// row-wise operation (recycling, slicing, assignment) applies to each
/// column independently and reassembles.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    columns: Vec<(String, Vector)>,
}

impl Record {
    /// Assemble a record from named columns
    ///
    /// Columns must be uniquely named and of equal length; anything
    /// else is a caller error, not a recoverable condition.
    ///
    pub fn new<S>(columns: Vec<(S, Vector)>) -> Result<Record, Error>
    where
        S: Into<String>,
    {
        let columns: Vec<(String, Vector)> = columns
            .into_iter()
            .map(|(name, v)| (name.into(), v))
            .collect();

        if let Some((_, first)) = columns.first() {
            let rows = first.len();
            for (name, column) in columns.iter() {
                if column.len() != rows {
                    return Err(contract_violation!(format!(
                        "column '{name}' has length {}, expected {rows}",
                        column.len()
                    )));
                }
            }
        }

        for (i, (name, _)) in columns.iter().enumerate() {
            if columns[..i].iter().any(|(other, _)| other == name) {
                return Err(contract_violation!(format!("duplicate column '{name}'")));
            }
        }

        Ok(Record { columns })
    }

    pub fn rows(&self) -> usize {
        self.columns.first().map_or(0, |(_, v)| v.len())
    }

    pub fn columns(&self) -> &[(String, Vector)] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Vector> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn type_tag(&self) -> TypeTag {
        TypeTag::record(
            self.columns
                .iter()
                .map(|(name, v)| (name.clone(), v.type_tag())),
        )
    }

    pub fn is_virtual(&self) -> bool {
        self.columns.iter().any(|(_, v)| v.is_virtual())
    }

    pub fn materialized(&self) -> Record {
        Record {
            columns: self
                .columns
                .iter()
                .map(|(name, v)| (name.clone(), v.materialized()))
                .collect(),
        }
    }

    pub fn alias(&self) -> Record {
        Record {
            columns: self
                .columns
                .iter()
                .map(|(name, v)| (name.clone(), v.alias()))
                .collect(),
        }
    }

    pub fn storage_id(&self) -> Option<usize> {
        self.columns.first().and_then(|(_, v)| v.storage_id())
    }

    /// Cast each column to its counterpart in a resolved record type.
    pub(crate) fn cast_columns(&self, target: &[(String, TypeTag)]) -> Result<Record, Error> {
        let columns = self
            .columns
            .iter()
            .map(|(name, v)| {
                let tag = target
                    .iter()
                    .find(|(n, _)| n == name)
                    .map(|(_, tag)| tag)
                    .ok_or_else(|| Error::IncompatibleType {
                        lhs: self.type_tag(),
                        rhs: TypeTag::Record(target.to_vec()),
                    })?;
                Ok((name.clone(), v.cast(tag)?))
            })
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(Record { columns })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;
    use crate::ptype::AtomicKind;

    fn sample() -> Record {
        Record::new(vec![
            ("a", Vector::from(vec![1, 2, 3])),
            ("b", Vector::from(vec![true, false, true])),
        ])
        .unwrap()
    }

    #[test]
    fn size_is_row_count() {
        assert_eq!(sample().rows(), 3);
        let empty = Record::new(Vec::<(String, Vector)>::new()).unwrap();
        assert_eq!(empty.rows(), 0);
    }

    #[test]
    fn ragged_columns_are_a_contract_violation() {
        let result = Record::new(vec![
            ("a", Vector::from(vec![1, 2, 3])),
            ("b", Vector::from(vec![true])),
        ]);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::ContractViolation);
    }

    #[test]
    fn duplicate_columns_are_a_contract_violation() {
        let result = Record::new(vec![
            ("a", Vector::from(vec![1])),
            ("a", Vector::from(vec![2])),
        ]);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::ContractViolation);
    }

    #[test]
    fn type_tag_is_column_wise() {
        let expect = TypeTag::record(vec![
            ("a", TypeTag::Atomic(AtomicKind::Integer)),
            ("b", TypeTag::Atomic(AtomicKind::Logical)),
        ]);
        assert_eq!(sample().type_tag(), expect);
    }
}
