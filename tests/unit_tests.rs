//! Unit tests for colvec.

use colvec::storage::{FixedWidthRegion, VariableLengthStore};
use colvec::types::{ChildType, PhysicalType};
use colvec::{
    parse_type, resolve, ColvecError, DecodeConfig, DuplicateKeyPolicy, LogicalType, MapValue,
    NullMask, StoredValue, StructValue, TimeUnit, TypeDescriptor, Value,
};
use std::cmp::Ordering;

// =============================================================================
// Error Tests
// =============================================================================

mod error_tests {
    use super::*;

    #[test]
    fn test_unsupported_type_display() {
        let err = ColvecError::UnsupportedType("FROB".into());
        assert!(err.to_string().contains("Unsupported type"));
        assert!(err.to_string().contains("FROB"));
    }

    #[test]
    fn test_unsupported_operation_display() {
        let err = ColvecError::UnsupportedOperation("clear".into());
        assert!(err.to_string().contains("Unsupported operation"));
        assert!(err.to_string().contains("clear"));
    }

    #[test]
    fn test_malformed_map_display() {
        let err = ColvecError::MalformedMap("duplicate key 'k'".into());
        assert!(err.to_string().contains("Malformed map"));
        assert!(err.to_string().contains("'k'"));
    }

    #[test]
    fn test_bounds_violation_display() {
        let err = ColvecError::BoundsViolation { row: 5, len: 3 };
        assert!(err.to_string().contains("Row 5"));
        assert!(err.to_string().contains("length 3"));
    }

    #[test]
    fn test_layout_mismatch_display() {
        let err = ColvecError::LayoutMismatch {
            what: "fixed-width buffer",
            expected: 12,
            actual: 8,
        };
        assert!(err.to_string().contains("fixed-width buffer"));
        assert!(err.to_string().contains("12"));
        assert!(err.to_string().contains('8'));
    }

    #[test]
    fn test_type_error_display() {
        let err = ColvecError::TypeError {
            expected: "i32".into(),
            actual: "VARCHAR".into(),
        };
        assert!(err.to_string().contains("i32"));
        assert!(err.to_string().contains("VARCHAR"));
    }
}

// =============================================================================
// Type Registry Tests
// =============================================================================

mod registry_tests {
    use super::*;

    #[test]
    fn test_resolve_scalar_tokens() {
        assert_eq!(resolve("BOOLEAN").unwrap(), LogicalType::Boolean);
        assert_eq!(resolve("SMALLINT").unwrap(), LogicalType::Int16);
        assert_eq!(resolve("INTEGER").unwrap(), LogicalType::Int32);
        assert_eq!(resolve("BIGINT").unwrap(), LogicalType::Int64);
        assert_eq!(resolve("VARCHAR").unwrap(), LogicalType::Utf8);
        assert_eq!(
            resolve("TIMESTAMP").unwrap(),
            LogicalType::Timestamp(TimeUnit::Microsecond)
        );
        assert_eq!(
            resolve("TIMESTAMP_NS").unwrap(),
            LogicalType::Timestamp(TimeUnit::Nanosecond)
        );
    }

    #[test]
    fn test_resolve_nested_tokens() {
        assert_eq!(resolve("STRUCT").unwrap(), LogicalType::Struct);
        assert_eq!(resolve("LIST").unwrap(), LogicalType::List);
        assert_eq!(resolve("MAP").unwrap(), LogicalType::Map);
        assert_eq!(resolve("INTEGER[]").unwrap(), LogicalType::List);
        assert_eq!(resolve("MAP(VARCHAR, BIGINT)").unwrap(), LogicalType::Map);
    }

    #[test]
    fn test_resolve_rejects_unknown_tokens() {
        for token in ["FROB", "integer", "", "DECIMAL(18,3)", "STRUCT(a)"] {
            assert!(
                matches!(resolve(token), Err(ColvecError::UnsupportedType(_))),
                "{token:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_single_width_table() {
        assert_eq!(LogicalType::Int16.byte_width(), Some(2));
        assert_eq!(LogicalType::Int32.byte_width(), Some(4));
        assert_eq!(LogicalType::Int64.byte_width(), Some(8));
        assert_eq!(
            LogicalType::Timestamp(TimeUnit::Second).byte_width(),
            Some(8)
        );
        assert_eq!(LogicalType::UInt8.physical_type(), PhysicalType::I16);
        assert_eq!(LogicalType::Utf8.byte_width(), None);
        assert!(LogicalType::Map.is_nested());
    }

    #[test]
    fn test_descriptor_children() {
        let descriptor = parse_type("STRUCT(id BIGINT, tags VARCHAR[])").unwrap();
        assert_eq!(descriptor.logical_type(), LogicalType::Struct);
        assert_eq!(
            descriptor.field_names().collect::<Vec<_>>(),
            vec!["id", "tags"]
        );
        let tags = descriptor.child("tags").unwrap();
        assert_eq!(
            tags.element().map(TypeDescriptor::logical_type),
            Some(LogicalType::Utf8)
        );
    }

    #[test]
    fn test_descriptor_builders_match_parser() {
        let built = TypeDescriptor::map_of(
            TypeDescriptor::new(LogicalType::Utf8),
            TypeDescriptor::list_of(LogicalType::Int32.into()),
        );
        assert_eq!(built, parse_type("MAP(VARCHAR, INTEGER[])").unwrap());
        assert_eq!(built.to_string(), "MAP(VARCHAR, INTEGER[])");

        let children: Vec<&ChildType> = built.children().iter().collect();
        assert_eq!(children[0].name, "key");
        assert_eq!(children[1].name, "value");
    }
}

// =============================================================================
// Value Tests
// =============================================================================

mod value_tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Int32(7).as_int32(), Some(7));
        assert_eq!(Value::Int16(7).to_i64(), Some(7));
        assert_eq!(Value::from("x").as_string(), Some("x"));
        assert!(Value::Null.is_null());
        assert_eq!(Value::Int32(7).as_string(), None);
    }

    #[test]
    fn test_value_compare() {
        assert_eq!(
            Value::Int64(1).compare(&Value::Int64(2)),
            Some(Ordering::Less)
        );
        assert_eq!(Value::Int64(1).compare(&Value::from("a")), None);
    }

    #[test]
    fn test_date_view() {
        let date = Value::Date(19_000).as_date().unwrap();
        assert_eq!(date.to_string(), "2022-01-08");
    }

    #[test]
    fn test_struct_value_order() {
        let value: StructValue = vec![("b", Value::Int32(1)), ("a", Value::Int32(2))]
            .into_iter()
            .collect();
        assert_eq!(value.field_names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(value.get("a"), Some(&Value::Int32(2)));
        assert_eq!(value.get("c"), None);
    }

    #[test]
    fn test_map_value_policies() {
        let pairs = || {
            vec![
                (Value::from("k"), Value::Int32(1)),
                (Value::from("j"), Value::Int32(2)),
                (Value::from("k"), Value::Int32(3)),
            ]
        };
        assert!(matches!(
            MapValue::try_from_entries(pairs(), DuplicateKeyPolicy::Reject),
            Err(ColvecError::MalformedMap(_))
        ));

        let map = MapValue::try_from_entries(pairs(), DuplicateKeyPolicy::LastWins).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&Value::from("k")), Some(&Value::Int32(3)));
        assert_eq!(
            map.keys().cloned().collect::<Vec<_>>(),
            vec![Value::from("k"), Value::from("j")]
        );
    }

    #[test]
    fn test_map_value_rejects_null_key() {
        let result = MapValue::try_from_entries(
            vec![(Value::Null, Value::Int32(1))],
            DuplicateKeyPolicy::LastWins,
        );
        assert!(matches!(result, Err(ColvecError::MalformedMap(_))));
    }
}

// =============================================================================
// Storage Tests
// =============================================================================

mod storage_tests {
    use super::*;

    #[test]
    fn test_null_mask_from_bools() {
        let mask = NullMask::from_bools(&[false, true, false]);
        assert_eq!(mask.len(), 3);
        assert_eq!(mask.null_count(), 1);
        assert!(!mask.is_null(0).unwrap());
        assert!(mask.is_null(1).unwrap());
        assert!(matches!(
            mask.is_null(3),
            Err(ColvecError::BoundsViolation { row: 3, len: 3 })
        ));
    }

    #[test]
    fn test_null_mask_from_validity_bitmap() {
        // Bit set means the row is present.
        let mask = NullMask::from_validity_bitmap(&[0b0000_0101], 3).unwrap();
        assert_eq!(mask.validity(), vec![true, false, true]);
        assert!(mask.is_null(1).unwrap());

        assert!(matches!(
            NullMask::from_validity_bitmap(&[0xFF], 9),
            Err(ColvecError::LayoutMismatch { .. })
        ));
    }

    #[test]
    fn test_fixed_region_reads_little_endian() {
        let region = FixedWidthRegion::new(vec![0x01, 0x02, 0xFF, 0xFF], 2, 2).unwrap();
        assert_eq!(region.read::<i16>(0).unwrap(), 0x0201);
        assert_eq!(region.read::<i16>(1).unwrap(), -1);
        assert!(matches!(
            region.read::<i16>(2),
            Err(ColvecError::BoundsViolation { row: 2, len: 2 })
        ));
        assert!(matches!(
            region.read::<i32>(0),
            Err(ColvecError::TypeError { .. })
        ));
    }

    #[test]
    fn test_fixed_region_length_checked() {
        assert!(matches!(
            FixedWidthRegion::new(vec![0; 7], 4, 2),
            Err(ColvecError::LayoutMismatch {
                expected: 8,
                actual: 7,
                ..
            })
        ));
    }

    #[test]
    fn test_variable_store_reads_slots() {
        let store =
            VariableLengthStore::new(vec!["a".into(), StoredValue::Bytes(vec![1, 2])], 2).unwrap();
        assert_eq!(store.read(1).unwrap(), &StoredValue::Bytes(vec![1, 2]));
        assert!(store.read(2).is_err());
    }
}

// =============================================================================
// Config Tests
// =============================================================================

mod config_tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DecodeConfig::default();
        assert_eq!(config.duplicate_keys, DuplicateKeyPolicy::Reject);
        assert!(config.verify_layout);
        assert_eq!(config, DecodeConfig::new());
    }

    #[test]
    fn test_config_builders() {
        let config = DecodeConfig::new()
            .with_duplicate_keys(DuplicateKeyPolicy::LastWins)
            .with_verify_layout(false);
        assert_eq!(config.duplicate_keys, DuplicateKeyPolicy::LastWins);
        assert!(!config.verify_layout);
    }
}

// =============================================================================
// Serialization Tests
// =============================================================================

mod serde_tests {
    use super::*;

    fn round_trip<T>(value: &T) -> T
    where
        T: serde::Serialize + serde::de::DeserializeOwned,
    {
        let bytes = bincode::serialize(value).unwrap();
        bincode::deserialize(&bytes).unwrap()
    }

    #[test]
    fn test_value_round_trip() {
        let map = MapValue::try_from_entries(
            vec![
                (Value::from("k"), Value::Float64(1.5)),
                (Value::Int32(2), Value::Null),
            ],
            DuplicateKeyPolicy::Reject,
        )
        .unwrap();
        let value = Value::List(vec![
            Value::Timestamp(1_704_067_201, TimeUnit::Second),
            Value::Blob(vec![0, 255]),
            Value::Struct(vec![("m", Value::Map(map))].into_iter().collect()),
            Value::Null,
        ]);
        assert_eq!(round_trip(&value), value);
    }

    #[test]
    fn test_logical_type_and_config_round_trip() {
        for logical_type in [
            LogicalType::UInt16,
            LogicalType::Timestamp(TimeUnit::Nanosecond),
            LogicalType::Map,
        ] {
            assert_eq!(round_trip(&logical_type), logical_type);
        }

        let config = DecodeConfig::new()
            .with_duplicate_keys(DuplicateKeyPolicy::LastWins)
            .with_verify_layout(false);
        assert_eq!(round_trip(&config), config);
    }

    #[test]
    fn test_deserialized_map_keeps_key_rules() {
        let duplicated = vec![
            (Value::from("k"), Value::Int32(1)),
            (Value::from("k"), Value::Int32(2)),
        ];
        let bytes = bincode::serialize(&duplicated).unwrap();
        assert!(bincode::deserialize::<MapValue>(&bytes).is_err());

        let null_key = vec![(Value::Null, Value::Int32(1))];
        let bytes = bincode::serialize(&null_key).unwrap();
        let err = bincode::deserialize::<MapValue>(&bytes).unwrap_err();
        assert!(err.to_string().contains("null"));
    }
}
