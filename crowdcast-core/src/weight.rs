//! Shared validation for unit-interval weights.

use crate::TableError;

/// Accept `weight` when it is finite and within `0.0..=1.0`.
pub(crate) fn unit_weight(
    table: &'static str,
    key: impl std::fmt::Display,
    weight: f32,
) -> Result<f32, TableError> {
    if weight.is_finite() && (0.0..=1.0).contains(&weight) {
        Ok(weight)
    } else {
        Err(TableError::WeightOutOfRange {
            table,
            key: key.to_string(),
            weight,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0)]
    #[case(0.35)]
    #[case(1.0)]
    fn accepts_weights_in_the_unit_interval(#[case] weight: f32) {
        assert_eq!(unit_weight("test", "key", weight), Ok(weight));
    }

    #[rstest]
    #[case(-0.01)]
    #[case(1.01)]
    #[case(f32::NAN)]
    fn rejects_weights_outside_the_unit_interval(#[case] weight: f32) {
        let err = unit_weight("test", "key", weight).expect_err("weight rejected");
        assert!(matches!(
            err,
            TableError::WeightOutOfRange { table: "test", .. }
        ));
    }
}
