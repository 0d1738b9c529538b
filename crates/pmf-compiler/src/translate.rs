//! Column type translation
//!
//! Maps logical column types to canonical IR type descriptors. The kind
//! mapping is a closed table; anything outside it is a translation error.

use crate::error::{CompileError, Result};
use pmf_core::ir::{Dim, ElementKind, TypeDescriptor};
use pmf_core::types::{ColumnType, DataKind};

/// Column type translator
pub struct TypeTranslator;

impl TypeTranslator {
    /// Canonical element kind of a raw column kind
    pub fn element_kind(kind: DataKind) -> Result<ElementKind> {
        match kind {
            DataKind::Boolean => Ok(ElementKind::Int64),
            DataKind::Text => Ok(ElementKind::String),
            DataKind::UInt32 => Ok(ElementKind::Int64),
            DataKind::Float32 => Ok(ElementKind::Float),
            other => Err(CompileError::Translation(other)),
        }
    }

    /// Translate a column type into an IR type descriptor
    ///
    /// Scalars become bare scalar descriptors. Vectors become tensors whose
    /// shape is the batch dimension followed by: one unbound dimension when
    /// the length is unknown, `[1]` for single-item vectors, and the declared
    /// dimensions otherwise.
    pub fn translate(ty: &ColumnType) -> Result<TypeDescriptor> {
        let kind = Self::element_kind(ty.raw_kind())?;

        match ty {
            ColumnType::Scalar(_) => Ok(TypeDescriptor::scalar(kind)),
            ColumnType::Vector { dims, .. } => {
                let shape: Vec<Dim> = match ty.value_count() {
                    0 => vec![Dim::Unbound],
                    1 => vec![Dim::Fixed(1)],
                    _ => dims.iter().map(|d| Dim::Fixed(*d)).collect(),
                };
                Ok(TypeDescriptor::tensor(kind, shape))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pmf_core::ir::BATCH_DIM;

    #[test]
    fn test_kind_table() {
        assert_eq!(TypeTranslator::element_kind(DataKind::Boolean).unwrap(), ElementKind::Int64);
        assert_eq!(TypeTranslator::element_kind(DataKind::Text).unwrap(), ElementKind::String);
        assert_eq!(TypeTranslator::element_kind(DataKind::UInt32).unwrap(), ElementKind::Int64);
        assert_eq!(TypeTranslator::element_kind(DataKind::Float32).unwrap(), ElementKind::Float);
    }

    #[test]
    fn test_unknown_kind_fails() {
        for kind in [DataKind::Float64, DataKind::Int32, DataKind::DateTime, DataKind::Uuid] {
            assert_eq!(
                TypeTranslator::element_kind(kind),
                Err(CompileError::Translation(kind))
            );
        }
    }

    #[test]
    fn test_scalar_has_no_shape() {
        let ty = TypeTranslator::translate(&ColumnType::scalar(DataKind::Float32)).unwrap();
        assert_eq!(ty, TypeDescriptor::Scalar(ElementKind::Float));
    }

    #[test]
    fn test_key_uses_raw_kind() {
        let ty = TypeTranslator::translate(&ColumnType::key(DataKind::UInt32, 100)).unwrap();
        assert_eq!(ty, TypeDescriptor::Scalar(ElementKind::Int64));
    }

    #[test]
    fn test_unknown_length_vector() {
        let ty = TypeTranslator::translate(&ColumnType::var_vector(DataKind::Text)).unwrap();
        assert_eq!(
            ty,
            TypeDescriptor::Tensor {
                kind: ElementKind::String,
                shape: vec![BATCH_DIM, Dim::Unbound],
            }
        );
    }

    #[test]
    fn test_single_item_vector() {
        let ty = TypeTranslator::translate(&ColumnType::vector(DataKind::Float32, vec![1])).unwrap();
        assert_eq!(ty.shape(), Some(&[BATCH_DIM, Dim::Fixed(1)][..]));
    }

    #[test]
    fn test_multi_dim_vector() {
        let ty =
            TypeTranslator::translate(&ColumnType::vector(DataKind::Float32, vec![2, 5])).unwrap();
        assert_eq!(
            ty.shape(),
            Some(&[BATCH_DIM, Dim::Fixed(2), Dim::Fixed(5)][..])
        );
    }

    #[test]
    fn test_translation_is_idempotent() {
        let column = ColumnType::vector(DataKind::Boolean, vec![7]);
        assert_eq!(
            TypeTranslator::translate(&column).unwrap(),
            TypeTranslator::translate(&column).unwrap()
        );
    }

    #[test]
    fn test_vector_of_unknown_kind_fails() {
        let column = ColumnType::vector(DataKind::Float64, vec![3]);
        assert!(matches!(
            TypeTranslator::translate(&column),
            Err(CompileError::Translation(DataKind::Float64))
        ));
    }
}
