use chrono::NaiveDate;

use crate::domain::entities::TimeOffRequestForm;
use crate::domain::errors::ValidationError;

// Fields of a submission that passed every validity rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub employee_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
}

// Check a submission against the validity rules; the first failing rule wins.
pub fn validate_request(
    form: &TimeOffRequestForm,
    today: NaiveDate,
) -> Result<ValidatedRequest, ValidationError> {
    let employee_name = form.employee_name.trim();
    if employee_name.is_empty() {
        return Err(ValidationError::EmployeeNameRequired);
    }

    let start_date = parse_date(
        form.start_date.as_deref(),
        ValidationError::StartDateRequired,
        ValidationError::StartDateInvalid,
    )?;
    let end_date = parse_date(
        form.end_date.as_deref(),
        ValidationError::EndDateRequired,
        ValidationError::EndDateInvalid,
    )?;

    if start_date > end_date {
        return Err(ValidationError::StartAfterEnd);
    }
    if start_date < today {
        return Err(ValidationError::StartDateInPast);
    }

    let reason = form
        .reason
        .as_deref()
        .map(str::trim)
        .filter(|reason| !reason.is_empty())
        .map(str::to_string);

    Ok(ValidatedRequest {
        employee_name: employee_name.to_string(),
        start_date,
        end_date,
        reason,
    })
}

fn parse_date(
    value: Option<&str>,
    missing: ValidationError,
    invalid: ValidationError,
) -> Result<NaiveDate, ValidationError> {
    let value = value.map(str::trim).filter(|v| !v.is_empty()).ok_or(missing)?;
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid)
}
