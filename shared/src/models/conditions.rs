//! Farm condition models

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::validation::{validate_numeric, validate_required};

/// Soil types offered by the conditions form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "String")]
pub enum SoilType {
    #[default]
    Loamy,
    Clay,
    Sandy,
    Silty,
    Chalky,
    Peaty,
}

impl SoilType {
    /// All soil types, in form order
    pub const ALL: [SoilType; 6] = [
        SoilType::Loamy,
        SoilType::Clay,
        SoilType::Sandy,
        SoilType::Silty,
        SoilType::Chalky,
        SoilType::Peaty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Loamy => "Loamy",
            SoilType::Clay => "Clay",
            SoilType::Sandy => "Sandy",
            SoilType::Silty => "Silty",
            SoilType::Chalky => "Chalky",
            SoilType::Peaty => "Peaty",
        }
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SoilType {
    type Err = ConditionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SoilType::ALL
            .iter()
            .copied()
            .find(|soil| soil.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConditionsError::UnknownSoilType(s.to_string()))
    }
}

impl TryFrom<String> for SoilType {
    type Error = ConditionsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Editable fields of the conditions form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum FarmField {
    SoilType,
    Temperature,
    Rainfall,
    Ph,
    Region,
}

impl FarmField {
    pub const ALL: [FarmField; 5] = [
        FarmField::SoilType,
        FarmField::Temperature,
        FarmField::Rainfall,
        FarmField::Ph,
        FarmField::Region,
    ];

    /// Name of the form control bound to this field
    pub fn as_str(&self) -> &'static str {
        match self {
            FarmField::SoilType => "soilType",
            FarmField::Temperature => "temperature",
            FarmField::Rainfall => "rainfall",
            FarmField::Ph => "ph",
            FarmField::Region => "region",
        }
    }

    // Struct member name, as reported by `validator`
    fn member_name(&self) -> &'static str {
        match self {
            FarmField::SoilType => "soil_type",
            FarmField::Temperature => "temperature",
            FarmField::Rainfall => "rainfall",
            FarmField::Ph => "ph",
            FarmField::Region => "region",
        }
    }

    /// Whether the form control is `type="number"`
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FarmField::Temperature | FarmField::Rainfall | FarmField::Ph
        )
    }
}

impl std::fmt::Display for FarmField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FarmField {
    type Err = ConditionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FarmField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ConditionsError::UnknownField(s.to_string()))
    }
}

/// Errors raised while editing or checking farm conditions
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConditionsError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown soil type: {0}")]
    UnknownSoilType(String),

    #[error("Invalid {field}: {message}")]
    Invalid { field: FarmField, message: String },
}

impl ConditionsError {
    /// The field this error refers to, if any
    pub fn field(&self) -> Option<FarmField> {
        match self {
            ConditionsError::UnknownField(_) => None,
            ConditionsError::UnknownSoilType(_) => Some(FarmField::SoilType),
            ConditionsError::Invalid { field, .. } => Some(*field),
        }
    }
}

/// Soil and climate parameters for one recommendation request.
///
/// Numeric readings are kept as the raw strings the user typed; they are only
/// interpreted as numbers when the outbound prompt is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FarmConditions {
    pub soil_type: SoilType,

    /// Average temperature in °C
    #[validate(custom = "validate_numeric")]
    pub temperature: String,

    /// Annual rainfall in mm
    #[validate(custom = "validate_numeric")]
    pub rainfall: String,

    /// Soil pH
    #[validate(custom = "validate_numeric")]
    pub ph: String,

    /// Geographical region or climate
    #[validate(custom = "validate_required")]
    pub region: String,
}

impl Default for FarmConditions {
    fn default() -> Self {
        Self {
            soil_type: SoilType::Loamy,
            temperature: "25".to_string(),
            rainfall: "1000".to_string(),
            ph: "6.5".to_string(),
            region: "Temperate".to_string(),
        }
    }
}

impl FarmConditions {
    /// Current raw value of a field
    pub fn get(&self, field: FarmField) -> String {
        match field {
            FarmField::SoilType => self.soil_type.to_string(),
            FarmField::Temperature => self.temperature.clone(),
            FarmField::Rainfall => self.rainfall.clone(),
            FarmField::Ph => self.ph.clone(),
            FarmField::Region => self.region.clone(),
        }
    }

    /// Replace a single field with the raw value from the form.
    ///
    /// Only the soil type is checked, since its control is a closed select.
    pub fn set(&mut self, field: FarmField, value: &str) -> Result<(), ConditionsError> {
        match field {
            FarmField::SoilType => self.soil_type = value.parse()?,
            FarmField::Temperature => self.temperature = value.to_string(),
            FarmField::Rainfall => self.rainfall = value.to_string(),
            FarmField::Ph => self.ph = value.to_string(),
            FarmField::Region => self.region = value.to_string(),
        }
        Ok(())
    }

    /// Check the form constraints: every field present, numeric fields numeric.
    ///
    /// Reports the first offending field in form order.
    pub fn check(&self) -> Result<(), ConditionsError> {
        match self.validate() {
            Ok(()) => Ok(()),
            Err(errors) => Err(first_error(&errors)),
        }
    }
}

fn first_error(errors: &ValidationErrors) -> ConditionsError {
    let field_errors = errors.field_errors();
    FarmField::ALL
        .iter()
        .find_map(|field| {
            let error = field_errors.get(field.member_name())?.first()?;
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| error.code.to_string());
            Some(ConditionsError::Invalid {
                field: *field,
                message,
            })
        })
        .unwrap_or_else(|| ConditionsError::Invalid {
            field: FarmField::Region,
            message: errors.to_string(),
        })
}
