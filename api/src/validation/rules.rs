//! Rule sets applied to the requested personal data
//!
//! The data-validation endpoint and the profile-verification endpoint check
//! different things with different messages, so each has its own rule set.
//! Rules run in a fixed order and, for the same field or leaf, the last
//! failing rule's message is the one reported.

use shared::{DataRequestPayload, RequestedInfo};

use super::errors::ValidationErrors;
use super::validators::{
    has_blocked_email_suffix, is_blocked_country, is_malformed_email, is_missing_or_not_length,
    is_missing_or_shorter_than, is_present_and_shorter_than,
};

pub const EMAIL: &str = "email";
pub const NAME: &str = "name";
pub const FIRST_NAME: &str = "firstName";
pub const FAMILY_NAME: &str = "familyName";
pub const PHYSICAL_ADDRESS: &str = "physicalAddress";
pub const ADDRESS1: &str = "address1";
pub const CITY: &str = "city";
pub const POSTAL_CODE: &str = "postalCode";
pub const COUNTRY_CODE: &str = "countryCode";
pub const PHONE_NUMBER: &str = "phoneNumber";
pub const NUMBER: &str = "number";

/// A set of field rules producing per-field failures for one callback.
pub trait RuleSet: Send + Sync {
    /// Short name used in logs and metric labels.
    fn name(&self) -> &'static str;

    fn check(&self, info: &RequestedInfo, errors: &mut ValidationErrors);

    /// Validate a whole payload. A payload without `requestedInfo` is valid.
    fn validate(&self, payload: &DataRequestPayload) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let Some(info) = payload.requested_info() {
            self.check(info, &mut errors);
        }
        errors
    }
}

/// Rules of the data-validation callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataValidationRules;

impl DataValidationRules {
    pub const BLOCKED_EMAIL_SUFFIXES: [&'static str; 2] = ["@example.com", "@test.com"];
    pub const BLOCKED_COUNTRIES: [&'static str; 2] = ["XY", "ZZ"];

    pub const INVALID_EMAIL_ADDRESS: &'static str = "Please provide a valid email address";
    pub const INVALID_EMAIL_FORMAT: &'static str = "Please provide a valid email format";
    pub const FIRST_NAME_REQUIRED: &'static str = "First name is required";
    pub const LAST_NAME_REQUIRED: &'static str = "Last name is required";
    pub const INVALID_STREET: &'static str = "Please provide a valid street address";
    pub const INVALID_CITY: &'static str = "Please provide a valid city";
    pub const INVALID_POSTAL_CODE: &'static str = "Please provide a valid postal code";
    pub const INVALID_COUNTRY_CODE: &'static str = "Please provide a valid country code";
    pub const UNSHIPPABLE_COUNTRY: &'static str = "We don't ship to this location";
    pub const INVALID_PHONE: &'static str = "Please provide a valid phone number";
}

impl RuleSet for DataValidationRules {
    fn name(&self) -> &'static str {
        "data_validation"
    }

    fn check(&self, info: &RequestedInfo, errors: &mut ValidationErrors) {
        if let Some(email) = info.email() {
            errors
                .check(
                    has_blocked_email_suffix(email, &Self::BLOCKED_EMAIL_SUFFIXES),
                    EMAIL,
                    Self::INVALID_EMAIL_ADDRESS,
                )
                .check(is_malformed_email(email), EMAIL, Self::INVALID_EMAIL_FORMAT);
        }

        if let Some(name) = &info.name {
            errors
                .check_nested(
                    is_missing_or_shorter_than(name.first_name.as_deref(), 1),
                    NAME,
                    FIRST_NAME,
                    Self::FIRST_NAME_REQUIRED,
                )
                .check_nested(
                    is_missing_or_shorter_than(name.family_name.as_deref(), 1),
                    NAME,
                    FAMILY_NAME,
                    Self::LAST_NAME_REQUIRED,
                );
        }

        if let Some(address) = &info.physical_address {
            let country_code = address.country_code.as_deref();
            errors
                .check_nested(
                    is_missing_or_shorter_than(address.address1.as_deref(), 5),
                    PHYSICAL_ADDRESS,
                    ADDRESS1,
                    Self::INVALID_STREET,
                )
                .check_nested(
                    is_missing_or_shorter_than(address.city.as_deref(), 2),
                    PHYSICAL_ADDRESS,
                    CITY,
                    Self::INVALID_CITY,
                )
                .check_nested(
                    is_missing_or_shorter_than(address.postal_code.as_deref(), 3),
                    PHYSICAL_ADDRESS,
                    POSTAL_CODE,
                    Self::INVALID_POSTAL_CODE,
                )
                .check_nested(
                    is_missing_or_not_length(country_code, 2),
                    PHYSICAL_ADDRESS,
                    COUNTRY_CODE,
                    Self::INVALID_COUNTRY_CODE,
                )
                .check_nested(
                    is_blocked_country(country_code, &Self::BLOCKED_COUNTRIES),
                    PHYSICAL_ADDRESS,
                    COUNTRY_CODE,
                    Self::UNSHIPPABLE_COUNTRY,
                );
        }

        if let Some(phone) = &info.phone_number {
            errors.check_nested(
                is_missing_or_shorter_than(phone.number.as_deref(), 7),
                PHONE_NUMBER,
                NUMBER,
                Self::INVALID_PHONE,
            );
        }
    }
}

/// Rules of the profile-verification callback. Deliberately looser than
/// [`DataValidationRules`]; the two are not meant to agree.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileVerificationRules;

impl ProfileVerificationRules {
    pub const BLOCKED_EMAIL_SUFFIXES: [&'static str; 1] = ["@example.com"];
    pub const BLOCKED_COUNTRIES: [&'static str; 1] = ["XY"];

    pub const EXAMPLE_EMAIL: &'static str = "Example.com emails are not allowed";
    pub const INVALID_POSTAL_CODE: &'static str = "Invalid postal code";
    pub const UNSHIPPABLE_COUNTRY: &'static str = "We don't ship to this country";
    pub const FIRST_NAME_REQUIRED: &'static str = "First name is required";
}

impl RuleSet for ProfileVerificationRules {
    fn name(&self) -> &'static str {
        "profile_verification"
    }

    fn check(&self, info: &RequestedInfo, errors: &mut ValidationErrors) {
        if let Some(email) = info.email() {
            errors.check(
                has_blocked_email_suffix(email, &Self::BLOCKED_EMAIL_SUFFIXES),
                EMAIL,
                Self::EXAMPLE_EMAIL,
            );
        }

        if let Some(address) = &info.physical_address {
            errors
                .check_nested(
                    is_present_and_shorter_than(address.postal_code.as_deref(), 5),
                    PHYSICAL_ADDRESS,
                    POSTAL_CODE,
                    Self::INVALID_POSTAL_CODE,
                )
                .check_nested(
                    is_blocked_country(address.country_code.as_deref(), &Self::BLOCKED_COUNTRIES),
                    PHYSICAL_ADDRESS,
                    COUNTRY_CODE,
                    Self::UNSHIPPABLE_COUNTRY,
                );
        }

        if let Some(name) = &info.name {
            errors.check_nested(
                is_missing_or_shorter_than(name.first_name.as_deref(), 1),
                NAME,
                FIRST_NAME,
                Self::FIRST_NAME_REQUIRED,
            );
        }
    }
}
