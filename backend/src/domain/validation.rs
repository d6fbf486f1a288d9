//! Field validation for inbound user records.
//!
//! The rules form a fixed table evaluated in full: every rule runs against
//! every record so callers always receive the complete violation list.
//!
//! | field      | rule                | code                 |
//! |------------|---------------------|----------------------|
//! | `email`    | email grammar       | `invalid_email`      |
//! | `password` | at least 8 chars    | `password_too_short` |
//! | `name`     | at least 2 chars    | `name_too_short`     |
//!
//! Lengths count Unicode scalar values without trimming. An absent field is
//! checked as the empty string. Email addresses need a top-level domain, so
//! `user@localhost` is rejected. A password violation never echoes the
//! submitted value.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use super::user::{NewUser, UserRecord};

/// Minimum password length in characters.
pub const PASSWORD_MIN: usize = 8;
/// Minimum name length in characters.
pub const NAME_MIN: usize = 2;

/// Machine-readable identifier for a failed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    /// `email` is not a syntactically valid address.
    InvalidEmail,
    /// `password` is shorter than [`PASSWORD_MIN`].
    PasswordTooShort,
    /// `name` is shorter than [`NAME_MIN`].
    NameTooShort,
}

/// One failed rule for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    field: String,
    code: ViolationCode,
    message: String,
    location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

impl FieldViolation {
    /// Name of the offending field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Rule that failed.
    pub const fn code(&self) -> ViolationCode {
        self.code
    }

    /// Human-readable description of the rule.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Submitted value, when the field was present and is not a password.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// Complete violation list from one validation pass. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} field(s) failed validation", .violations.len())]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    /// Violations in rule-table order.
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Names of the offending fields in rule-table order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(FieldViolation::field)
    }
}

struct Rule {
    field: &'static str,
    select: fn(&UserRecord) -> Option<&str>,
    check: fn(&str) -> bool,
    code: ViolationCode,
    message: &'static str,
    echo_value: bool,
}

impl Rule {
    fn evaluate(&self, record: &UserRecord) -> Option<FieldViolation> {
        let submitted = (self.select)(record);
        if (self.check)(submitted.unwrap_or_default()) {
            return None;
        }
        Some(FieldViolation {
            field: self.field.to_owned(),
            code: self.code,
            message: self.message.to_owned(),
            location: "body".to_owned(),
            value: submitted.filter(|_| self.echo_value).map(str::to_owned),
        })
    }
}

const RULES: [Rule; 3] = [
    Rule {
        field: "email",
        select: submitted_email,
        check: is_email,
        code: ViolationCode::InvalidEmail,
        message: "must be a valid email address",
        echo_value: true,
    },
    Rule {
        field: "password",
        select: submitted_password,
        check: is_long_password,
        code: ViolationCode::PasswordTooShort,
        message: "must be at least 8 characters long",
        echo_value: false,
    },
    Rule {
        field: "name",
        select: submitted_name,
        check: is_long_name,
        code: ViolationCode::NameTooShort,
        message: "must be at least 2 characters long",
        echo_value: true,
    },
];

fn submitted_email(record: &UserRecord) -> Option<&str> {
    record.email.as_deref()
}

fn submitted_password(record: &UserRecord) -> Option<&str> {
    record.password.as_deref()
}

fn submitted_name(record: &UserRecord) -> Option<&str> {
    record.name.as_deref()
}

fn is_email(value: &str) -> bool {
    value.to_owned().validate_email() && has_top_level_domain(value)
}

/// The domain must end in an alphabetic label of at least two characters.
fn has_top_level_domain(address: &str) -> bool {
    address
        .rsplit_once('@')
        .and_then(|(_, domain)| domain.rsplit_once('.'))
        .is_some_and(|(_, tld)| {
            tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic)
        })
}

fn is_long_password(value: &str) -> bool {
    value.chars().count() >= PASSWORD_MIN
}

fn is_long_name(value: &str) -> bool {
    value.chars().count() >= NAME_MIN
}

/// Run every rule against `record`.
///
/// Returns the record as a [`NewUser`] when no rule fails; extra fields are
/// carried over untouched.
///
/// # Errors
/// Returns [`ValidationErrors`] listing every failed rule when at least one
/// rule fails.
///
/// # Examples
/// ```
/// use users_api::domain::UserRecord;
/// use users_api::domain::validation::validate;
///
/// let record = UserRecord {
///     email: Some("bad".into()),
///     password: Some("short".into()),
///     name: Some("A".into()),
///     ..UserRecord::default()
/// };
/// let errors = validate(record).unwrap_err();
/// assert_eq!(errors.fields().collect::<Vec<_>>(), ["email", "password", "name"]);
/// ```
pub fn validate(record: UserRecord) -> Result<NewUser, ValidationErrors> {
    let violations: Vec<FieldViolation> = RULES
        .iter()
        .filter_map(|rule| rule.evaluate(&record))
        .collect();
    if !violations.is_empty() {
        return Err(ValidationErrors { violations });
    }

    let UserRecord {
        email,
        password,
        name,
        extra,
    } = record;
    Ok(NewUser::from_parts(
        email.unwrap_or_default(),
        password.unwrap_or_default(),
        name.unwrap_or_default(),
        extra,
    ))
}

impl fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::InvalidEmail => "invalid_email",
            Self::PasswordTooShort => "password_too_short",
            Self::NameTooShort => "name_too_short",
        };
        f.write_str(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn valid_record() -> UserRecord {
        UserRecord {
            email: Some("a@b.com".to_owned()),
            password: Some("longpass1".to_owned()),
            name: Some("Al".to_owned()),
            ..UserRecord::default()
        }
    }

    fn violated_fields(record: UserRecord) -> Vec<String> {
        match validate(record) {
            Ok(_) => Vec::new(),
            Err(errors) => errors.fields().map(str::to_owned).collect(),
        }
    }

    #[rstest]
    fn valid_record_passes_through(valid_record: UserRecord) {
        let user = validate(valid_record).expect("record is valid");
        assert_eq!(user.email(), "a@b.com");
        assert_eq!(user.password(), "longpass1");
        assert_eq!(user.name(), "Al");
        assert_eq!(user.extra_fields().count(), 0);
    }

    #[rstest]
    #[case("bad")]
    #[case("")]
    #[case("user@")]
    #[case("@example.com")]
    #[case("two@@example.com")]
    #[case("a@b")]
    #[case("user@localhost")]
    #[case("user@example.c")]
    #[case("user@example.c0m")]
    #[case("user@[127.0.0.1]")]
    fn malformed_email_is_reported(mut valid_record: UserRecord, #[case] email: &str) {
        valid_record.email = Some(email.to_owned());
        assert_eq!(violated_fields(valid_record), ["email"]);
    }

    #[rstest]
    #[case("1234567", false)]
    #[case("12345678", true)]
    #[case("ñññññññ", false)]
    #[case("ññññññññ", true)]
    fn password_length_boundary(
        mut valid_record: UserRecord,
        #[case] password: &str,
        #[case] accepted: bool,
    ) {
        valid_record.password = Some(password.to_owned());
        let fields = violated_fields(valid_record);
        assert_eq!(fields.is_empty(), accepted, "password {password:?}");
        if !accepted {
            assert_eq!(fields, ["password"]);
        }
    }

    #[rstest]
    #[case("A", false)]
    #[case("Al", true)]
    #[case("é", false)]
    #[case("Zoë", true)]
    fn name_length_boundary(
        mut valid_record: UserRecord,
        #[case] name: &str,
        #[case] accepted: bool,
    ) {
        valid_record.name = Some(name.to_owned());
        let fields = violated_fields(valid_record);
        assert_eq!(fields.is_empty(), accepted, "name {name:?}");
        if !accepted {
            assert_eq!(fields, ["name"]);
        }
    }

    #[rstest]
    #[case("a@b.com")]
    #[case("first.last@sub.example.org")]
    #[case("user+tag@example.museum")]
    fn addresses_with_top_level_domain_are_accepted(
        mut valid_record: UserRecord,
        #[case] email: &str,
    ) {
        valid_record.email = Some(email.to_owned());
        assert!(violated_fields(valid_record).is_empty(), "{email}");
    }

    #[rstest]
    fn password_violation_omits_submitted_value(mut valid_record: UserRecord) {
        valid_record.password = Some("short".to_owned());
        let errors = validate(valid_record).expect_err("password fails");
        let value = serde_json::to_value(errors.violations()).expect("serialise violations");
        assert_eq!(
            value,
            json!([{
                "field": "password",
                "code": "password_too_short",
                "message": "must be at least 8 characters long",
                "location": "body",
            }])
        );
    }

    #[rstest]
    fn lengths_are_not_trimmed(mut valid_record: UserRecord) {
        valid_record.password = Some("       x".to_owned());
        valid_record.name = Some(" A".to_owned());
        assert!(validate(valid_record).is_ok());
    }

    #[rstest]
    fn every_rule_runs_without_short_circuit() {
        let record = UserRecord {
            email: Some("bad".to_owned()),
            password: Some("short".to_owned()),
            name: Some("A".to_owned()),
            ..UserRecord::default()
        };

        let errors = validate(record).expect_err("all rules fail");
        let codes: Vec<ViolationCode> = errors.violations().iter().map(|v| v.code()).collect();
        assert_eq!(
            codes,
            [
                ViolationCode::InvalidEmail,
                ViolationCode::PasswordTooShort,
                ViolationCode::NameTooShort,
            ]
        );
    }

    #[rstest]
    fn absent_fields_fail_without_value() {
        let errors = validate(UserRecord::default()).expect_err("empty record fails");
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            ["email", "password", "name"]
        );
        assert!(errors.violations().iter().all(|v| v.value().is_none()));
    }

    #[rstest]
    fn extra_fields_survive_validation(mut valid_record: UserRecord) {
        valid_record
            .extra
            .insert("nickname".to_owned(), json!("al"));
        let user = validate(valid_record).expect("record is valid");
        assert_eq!(user.extra_fields().collect::<Vec<_>>(), ["nickname"]);
    }

    #[rstest]
    fn violation_serialises_with_submitted_value() {
        let record = UserRecord {
            email: Some("bad".to_owned()),
            password: Some("longpass1".to_owned()),
            name: Some("Al".to_owned()),
            ..UserRecord::default()
        };
        let errors = validate(record).expect_err("email fails");
        let value = serde_json::to_value(errors.violations()).expect("serialise violations");
        assert_eq!(
            value,
            json!([{
                "field": "email",
                "code": "invalid_email",
                "message": "must be a valid email address",
                "location": "body",
                "value": "bad",
            }])
        );
    }

    #[rstest]
    fn violation_code_display_matches_wire_format() {
        for code in [
            ViolationCode::InvalidEmail,
            ViolationCode::PasswordTooShort,
            ViolationCode::NameTooShort,
        ] {
            let wire = serde_json::to_value(code).expect("serialise code");
            assert_eq!(wire, json!(code.to_string()));
        }
    }
}
