//! Feature assembly for classifier inference
//!
//! Validates raw clinical inputs against their documented bounds and maps
//! them into the fixed-order feature vector the model gateway expects.
//! BMI is the one derived feature, computed from height and weight.

use crate::error::ScreeningError;
use crate::models::{ClinicalInput, FeatureVector};

/// Inclusive bounds for one clinical input field
#[derive(Debug, Clone, Copy)]
pub struct FieldBounds {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
}

pub const PREGNANCIES_BOUNDS: FieldBounds = FieldBounds {
    field: "pregnancies",
    min: 0.0,
    max: 20.0,
};
pub const GLUCOSE_BOUNDS: FieldBounds = FieldBounds {
    field: "glucose_mg_dl",
    min: 50.0,
    max: 300.0,
};
pub const BLOOD_PRESSURE_BOUNDS: FieldBounds = FieldBounds {
    field: "blood_pressure_mm_hg",
    min: 50.0,
    max: 200.0,
};
pub const SKIN_THICKNESS_BOUNDS: FieldBounds = FieldBounds {
    field: "skin_thickness_mm",
    min: 0.0,
    max: 100.0,
};
pub const INSULIN_BOUNDS: FieldBounds = FieldBounds {
    field: "insulin_micro_u_per_ml",
    min: 0.0,
    max: 900.0,
};
pub const HEIGHT_BOUNDS: FieldBounds = FieldBounds {
    field: "height_cm",
    min: 100.0,
    max: 250.0,
};
pub const WEIGHT_BOUNDS: FieldBounds = FieldBounds {
    field: "weight_kg",
    min: 30.0,
    max: 200.0,
};
pub const PEDIGREE_BOUNDS: FieldBounds = FieldBounds {
    field: "diabetes_pedigree",
    min: 0.0,
    max: 2.5,
};
pub const AGE_BOUNDS: FieldBounds = FieldBounds {
    field: "age_years",
    min: 1.0,
    max: 120.0,
};

fn check(bounds: FieldBounds, value: f64) -> Result<(), ScreeningError> {
    if !value.is_finite() || value < bounds.min || value > bounds.max {
        return Err(ScreeningError::validation(
            bounds.field,
            value,
            bounds.min,
            bounds.max,
        ));
    }
    Ok(())
}

/// Compute body-mass index from height and weight
///
/// Callers must have validated height; a zero height is still rejected here
/// so a non-finite value can never reach the feature vector.
pub fn compute_bmi(height_cm: u32, weight_kg: u32) -> Result<f32, ScreeningError> {
    if height_cm == 0 {
        return Err(ScreeningError::validation(
            HEIGHT_BOUNDS.field,
            0.0,
            HEIGHT_BOUNDS.min,
            HEIGHT_BOUNDS.max,
        ));
    }
    let height_m = height_cm as f32 / 100.0;
    Ok(weight_kg as f32 / (height_m * height_m))
}

/// Validate a clinical input and assemble the classifier feature vector
///
/// Pure: no side effects, no clock, no I/O. The first out-of-range field
/// fails the whole assembly with a `Validation` error naming it.
pub fn assemble(input: &ClinicalInput) -> Result<FeatureVector, ScreeningError> {
    check(PREGNANCIES_BOUNDS, input.pregnancies as f64)?;
    check(GLUCOSE_BOUNDS, input.glucose_mg_dl as f64)?;
    check(BLOOD_PRESSURE_BOUNDS, input.blood_pressure_mm_hg as f64)?;
    check(SKIN_THICKNESS_BOUNDS, input.skin_thickness_mm as f64)?;
    check(INSULIN_BOUNDS, input.insulin_micro_u_per_ml as f64)?;
    check(HEIGHT_BOUNDS, input.height_cm as f64)?;
    check(WEIGHT_BOUNDS, input.weight_kg as f64)?;
    check(PEDIGREE_BOUNDS, input.diabetes_pedigree as f64)?;
    check(AGE_BOUNDS, input.age_years as f64)?;

    let bmi = compute_bmi(input.height_cm, input.weight_kg)?;

    Ok(FeatureVector {
        pregnancies: input.pregnancies as f32,
        glucose: input.glucose_mg_dl as f32,
        blood_pressure: input.blood_pressure_mm_hg as f32,
        skin_thickness: input.skin_thickness_mm as f32,
        insulin: input.insulin_micro_u_per_ml as f32,
        bmi,
        diabetes_pedigree: input.diabetes_pedigree,
        age: input.age_years as f32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_input() -> ClinicalInput {
        ClinicalInput {
            patient_name: "John Smith".to_string(),
            patient_id: "PT-20240101-001".to_string(),
            gender: "Male".to_string(),
            pregnancies: 1,
            glucose_mg_dl: 120,
            blood_pressure_mm_hg: 80,
            skin_thickness_mm: 25,
            insulin_micro_u_per_ml: 85,
            height_cm: 175,
            weight_kg: 75,
            diabetes_pedigree: 0.5,
            age_years: 45,
        }
    }

    #[test]
    fn test_assemble_valid_input() {
        let features = assemble(&create_test_input()).unwrap();
        let arr = features.as_array();
        assert_eq!(arr[0], 1.0);
        assert_eq!(arr[1], 120.0);
        assert_eq!(arr[2], 80.0);
        assert_eq!(arr[3], 25.0);
        assert_eq!(arr[4], 85.0);
        // bmi = 75 / 1.75^2 = 24.489..., rounds to 24.5 at one decimal
        assert!((arr[5] - 24.49).abs() < 0.01);
        assert_eq!(format!("{:.1}", arr[5]), "24.5");
        assert_eq!(arr[6], 0.5);
        assert_eq!(arr[7], 45.0);
    }

    #[test]
    fn test_bmi_lands_only_at_index_five() {
        let features = assemble(&create_test_input()).unwrap();
        let bmi = compute_bmi(175, 75).unwrap();
        let arr = features.as_array();
        assert_eq!(arr[5], bmi);
        for (i, v) in arr.iter().enumerate() {
            if i != 5 {
                assert_ne!(*v, bmi);
            }
        }
    }

    #[test]
    fn test_age_out_of_range_names_field() {
        let mut input = create_test_input();
        input.age_years = 0;
        let err = assemble(&input).unwrap_err();
        assert_eq!(err.field(), Some("age_years"));

        input.age_years = 200;
        let err = assemble(&input).unwrap_err();
        assert_eq!(err.field(), Some("age_years"));
    }

    #[test]
    fn test_glucose_out_of_range_names_field() {
        let mut input = create_test_input();
        input.glucose_mg_dl = 49;
        let err = assemble(&input).unwrap_err();
        assert_eq!(err.field(), Some("glucose_mg_dl"));

        input.glucose_mg_dl = 301;
        let err = assemble(&input).unwrap_err();
        assert_eq!(err.field(), Some("glucose_mg_dl"));
    }

    #[test]
    fn test_pedigree_bounds() {
        let mut input = create_test_input();
        input.diabetes_pedigree = 2.51;
        let err = assemble(&input).unwrap_err();
        assert_eq!(err.field(), Some("diabetes_pedigree"));

        input.diabetes_pedigree = f32::NAN;
        let err = assemble(&input).unwrap_err();
        assert_eq!(err.field(), Some("diabetes_pedigree"));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let mut input = create_test_input();
        input.glucose_mg_dl = 50;
        assert!(assemble(&input).is_ok());
        input.glucose_mg_dl = 300;
        assert!(assemble(&input).is_ok());
        input.age_years = 1;
        assert!(assemble(&input).is_ok());
        input.age_years = 120;
        assert!(assemble(&input).is_ok());
    }

    #[test]
    fn test_zero_height_rejected_defensively() {
        let err = compute_bmi(0, 75).unwrap_err();
        assert_eq!(err.field(), Some("height_cm"));
    }
}
