//! Binding and validation of submitted forms.
//!
//! Every form arrives as optional strings. Cleaning trims text, runs the `validator` rules
//! declared on the form struct, coerces typed fields and checks referenced records exist,
//! collecting every message into [`FormErrors`] before anything is written.

pub mod branch;
pub mod staff;
pub mod transaction;
pub mod work_log;

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveEnum, Iterable};
use validator::ValidationErrors;

use crate::{
    model::api::ChoiceDto,
    server::{error::form::FormErrors, util::money},
};

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";
pub const INVALID_DATE: &str = "Enter a valid date.";
pub const INVALID_NUMBER: &str = "Enter a number.";

/// Date format of date inputs and query parameters
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trims a submitted value, treating blank input as absent
pub fn clean_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Moves the messages of a failed `validate()` call into `errors`
pub fn merge_validation(errors: &mut FormErrors, result: Result<(), ValidationErrors>) {
    let Err(validation) = result else {
        return;
    };

    for (field, field_errors) in validation.field_errors() {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| error.code.to_string());
            errors.add(&field, message);
        }
    }
}

/// Parses a `YYYY-MM-DD` date, recording an error when present but malformed
pub fn parse_date(errors: &mut FormErrors, field: &str, value: Option<&str>) -> Option<NaiveDate> {
    let value = value?;

    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, INVALID_DATE);
            None
        }
    }
}

/// Parses the primary key of a selected record
pub fn parse_choice_id(errors: &mut FormErrors, field: &str, value: Option<&str>) -> Option<i32> {
    let value = value?;

    match value.parse::<i32>() {
        Ok(id) => Some(id),
        Err(_) => {
            errors.add(field, INVALID_CHOICE);
            None
        }
    }
}

/// Parses an enum choice by its stored value
pub fn parse_enum_choice<E>(errors: &mut FormErrors, field: &str, value: Option<&str>) -> Option<E>
where
    E: ActiveEnum<Value = String>,
{
    let value = value?;

    match E::try_from_value(&value.to_string()) {
        Ok(choice) => Some(choice),
        Err(_) => {
            errors.add(field, INVALID_CHOICE);
            None
        }
    }
}

/// Parses a two-place decimal of at most `max_digits` digits into minor units
pub fn parse_minor_units(
    errors: &mut FormErrors,
    field: &str,
    value: Option<&str>,
    max_digits: u32,
) -> Option<i64> {
    let value = value?;

    let Ok(decimal) = Decimal::from_str(value) else {
        errors.add(field, INVALID_NUMBER);
        return None;
    };

    let normalized = decimal.normalize();
    if normalized.scale() > money::SCALE {
        errors.add(
            field,
            format!(
                "Ensure that there are no more than {} decimal places.",
                money::SCALE
            ),
        );
        return None;
    }

    let whole_digits = normalized.trunc().abs().to_string().trim_start_matches('0').len() as u32;
    if whole_digits > max_digits - money::SCALE {
        errors.add(
            field,
            format!(
                "Ensure that there are no more than {} digits in total.",
                max_digits
            ),
        );
        return None;
    }

    match money::to_minor_units(decimal) {
        Some(minor) => Some(minor),
        None => {
            errors.add(field, INVALID_NUMBER);
            None
        }
    }
}

/// Records [`REQUIRED`] when a typed field was not supplied
pub fn require<T>(
    errors: &mut FormErrors,
    field: &str,
    submitted: Option<&str>,
    parsed: Option<T>,
) -> Option<T> {
    if submitted.is_none() {
        errors.add(field, REQUIRED);
    }

    parsed
}

/// Choice list of every variant of a database enum
pub fn enum_choices<E>(label: impl Fn(&E) -> &'static str) -> Vec<ChoiceDto>
where
    E: ActiveEnum<Value = String> + Iterable,
{
    E::iter()
        .map(|choice| ChoiceDto {
            value: choice.to_value(),
            label: label(&choice).to_string(),
        })
        .collect()
}
