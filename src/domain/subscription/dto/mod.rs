pub mod subscription_create_request;
pub mod subscription_patch_request;

use validator::ValidationError;

use crate::core::util::month_util::YearMonth;

pub(crate) fn validate_month(value: &str) -> Result<(), ValidationError> {
    value.parse::<YearMonth>().map(|_| ()).map_err(|err| {
        let mut error = ValidationError::new("month");
        error.message = Some(err.to_string().into());
        error
    })
}

pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be empty".into());
        return Err(error);
    }
    Ok(())
}
