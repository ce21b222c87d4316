//! Dish field validation.
//!
//! Length and range rules are declared with `validator` on private rule
//! structs; the public functions flatten the result into `{field, message}`
//! pairs and add the checks `validator` cannot express (required, blank).

use serde::Serialize;
use validator::{Validate, ValidationErrors};

/// Wire name of the Japanese display name field.
pub const FIELD_NAME_JA: &str = "nameJa";

/// Wire name of the English display name field.
pub const FIELD_NAME_EN: &str = "nameEn";

/// Wire name of the price field.
pub const FIELD_PRICE: &str = "price";

const MSG_REQUIRED: &str = "is required";
const MSG_BLANK: &str = "must not be blank";
const MSG_NOT_INTEGER: &str = "must be an integer";

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Raw dish fields as received from a form, before validation.
///
/// `None` means the field was not sent at all.
#[derive(Debug, Clone, Default)]
pub struct DishFields {
    pub name_ja: Option<String>,
    pub name_en: Option<String>,
    pub price: Option<String>,
}

/// Validated values for a new dish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDish {
    pub name_ja: String,
    pub name_en: String,
    pub price: i32,
}

/// Validated values for a partial update. `None` leaves the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidDishPatch {
    pub name_ja: Option<String>,
    pub name_en: Option<String>,
    pub price: Option<i32>,
}

impl ValidDishPatch {
    /// True when the patch would not change any text or number field.
    pub fn is_empty(&self) -> bool {
        self.name_ja.is_none() && self.name_en.is_none() && self.price.is_none()
    }
}

#[derive(Debug, Validate)]
struct DishRules {
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    name_ja: Option<String>,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    name_en: Option<String>,
    #[validate(range(min = 1, max = 2147483647, message = "must be a positive integer"))]
    price: Option<i64>,
}

/// Validate the fields of a create request. Every field is required.
pub fn validate_create(fields: &DishFields) -> Result<ValidDish, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name_ja = required_name(FIELD_NAME_JA, fields.name_ja.as_deref(), &mut errors);
    let name_en = required_name(FIELD_NAME_EN, fields.name_en.as_deref(), &mut errors);
    let price = match non_empty(fields.price.as_deref()) {
        Some(raw) => parse_price(raw, &mut errors),
        None => {
            errors.push(FieldError::new(FIELD_PRICE, MSG_REQUIRED));
            None
        }
    };

    let rules = DishRules {
        name_ja: name_ja.clone(),
        name_en: name_en.clone(),
        price,
    };
    if let Err(e) = rules.validate() {
        errors.extend(flatten(&e));
    }

    match (name_ja, name_en, price) {
        (Some(name_ja), Some(name_en), Some(price)) if errors.is_empty() => Ok(ValidDish {
            name_ja,
            name_en,
            price: price as i32,
        }),
        _ => Err(sorted(errors)),
    }
}

/// Validate the fields of an update request.
///
/// Missing or empty fields are skipped; only supplied values are checked.
pub fn validate_update(fields: &DishFields) -> Result<ValidDishPatch, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name_ja = optional_name(FIELD_NAME_JA, fields.name_ja.as_deref(), &mut errors);
    let name_en = optional_name(FIELD_NAME_EN, fields.name_en.as_deref(), &mut errors);
    let price = non_empty(fields.price.as_deref()).and_then(|raw| parse_price(raw, &mut errors));

    let rules = DishRules {
        name_ja: name_ja.clone(),
        name_en: name_en.clone(),
        price,
    };
    if let Err(e) = rules.validate() {
        errors.extend(flatten(&e));
    }

    if errors.is_empty() {
        Ok(ValidDishPatch {
            name_ja,
            name_en,
            price: price.map(|p| p as i32),
        })
    } else {
        Err(sorted(errors))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn required_name(field: &str, value: Option<&str>, errors: &mut Vec<FieldError>) -> Option<String> {
    match non_empty(value) {
        None => {
            errors.push(FieldError::new(field, MSG_REQUIRED));
            None
        }
        Some(v) if v.trim().is_empty() => {
            errors.push(FieldError::new(field, MSG_BLANK));
            None
        }
        Some(v) => Some(v.to_string()),
    }
}

fn optional_name(field: &str, value: Option<&str>, errors: &mut Vec<FieldError>) -> Option<String> {
    match non_empty(value) {
        Some(v) if v.trim().is_empty() => {
            errors.push(FieldError::new(field, MSG_BLANK));
            None
        }
        other => other.map(str::to_string),
    }
}

fn parse_price(raw: &str, errors: &mut Vec<FieldError>) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(price) => Some(price),
        Err(_) => {
            errors.push(FieldError::new(FIELD_PRICE, MSG_NOT_INTEGER));
            None
        }
    }
}

/// Map `validator`'s struct field names onto wire names.
fn wire_name(field: &str) -> &str {
    match field {
        "name_ja" => FIELD_NAME_JA,
        "name_en" => FIELD_NAME_EN,
        "price" => FIELD_PRICE,
        other => other,
    }
}

fn flatten(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    for (field, errs) in errors.field_errors() {
        let field = field.to_string();
        for err in errs.iter() {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| err.code.to_string());
            out.push(FieldError::new(wire_name(&field), message));
        }
    }
    out
}

fn sorted(mut errors: Vec<FieldError>) -> Vec<FieldError> {
    let rank = |f: &str| match f {
        FIELD_NAME_JA => 0,
        FIELD_NAME_EN => 1,
        FIELD_PRICE => 2,
        _ => 3,
    };
    errors.sort_by_key(|e| rank(e.field.as_str()));
    errors
}
