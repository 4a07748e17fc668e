// # Candidate Validation
//
// Decides whether a candidate record may be persisted.
//
// ## Checks
//
// - Required fields (username, password, email, firstname) must be
//   non-empty after trimming surrounding whitespace.
// - Email must look like `local@domain.tld`: letters, digits and `._%+-`
//   in the local part, letters/digits/`.`/`-` in the domain, an all-letter
//   top-level segment of length >= 2.
// - Phone is optional; when present it must be 7-20 characters of digits,
//   spaces, `-`, `(`, `)` with an optional leading `+`.
// - Birthdate must not lie after the current date.
//
// Last/middle name and gender carry no format constraints; the gender
// enumeration is enforced by its type.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{Error, Result};
use crate::record::NewRegistration;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is valid")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-\(\)]{7,20}$").expect("phone pattern is valid"));

/// Validate a candidate record against the current date
///
/// # Returns
///
/// - `Ok(())`: The candidate may be persisted (uniqueness not yet checked)
/// - `Err(Error)`: The specific rejection, naming the offending field
pub fn validate(candidate: &NewRegistration) -> Result<()> {
    validate_at(candidate, chrono::Local::now().date_naive())
}

/// Validate a candidate record against an explicit "today"
///
/// Split out from [`validate`] so the not-in-the-future birthdate rule can
/// be exercised deterministically in tests.
pub fn validate_at(candidate: &NewRegistration, today: NaiveDate) -> Result<()> {
    require_non_empty("username", &candidate.username)?;
    require_non_empty("password", &candidate.password)?;
    require_non_empty("email", &candidate.email)?;
    require_non_empty("firstname", &candidate.firstname)?;

    let email = candidate.email.trim();
    if !EMAIL_RE.is_match(email) {
        return Err(Error::InvalidEmail(email.to_string()));
    }

    let phone = candidate.phone.trim();
    if !phone.is_empty() && !PHONE_RE.is_match(phone) {
        return Err(Error::InvalidPhone(phone.to_string()));
    }

    if candidate.birthdate > today {
        return Err(Error::BirthdateInFuture(candidate.birthdate));
    }

    Ok(())
}

fn require_non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::missing_field(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Gender;

    fn candidate() -> NewRegistration {
        NewRegistration::new("bob", "pw1", "bob@x.com", "Bob")
            .with_birthdate(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap())
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn well_formed_candidate_passes() {
        let full = candidate()
            .with_lastname("Smith")
            .with_middlename("J")
            .with_phone("+7 (123) 456-7890")
            .with_gender(Gender::Male);
        assert!(validate_at(&full, today()).is_ok());
    }

    #[test]
    fn required_fields_rejected_when_blank() {
        for (field, mutate) in [
            ("username", Box::new(|c: &mut NewRegistration| c.username = "   ".into())
                as Box<dyn Fn(&mut NewRegistration)>),
            ("password", Box::new(|c: &mut NewRegistration| c.password.clear())),
            ("email", Box::new(|c: &mut NewRegistration| c.email.clear())),
            ("firstname", Box::new(|c: &mut NewRegistration| c.firstname = " ".into())),
        ] {
            let mut c = candidate();
            mutate(&mut c);
            match validate_at(&c, today()) {
                Err(Error::MissingField(name)) => assert_eq!(name, field),
                other => panic!("expected MissingField({field}), got {other:?}"),
            }
        }
    }

    #[test]
    fn email_format_truth_table() {
        let mut c = candidate();
        c.email = "a@b.co".into();
        assert!(validate_at(&c, today()).is_ok());

        for bad in ["a@b", "a.b@", "@b.co", "a b@c.co", "a@b.c"] {
            c.email = bad.into();
            assert!(
                matches!(validate_at(&c, today()), Err(Error::InvalidEmail(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn phone_format_truth_table() {
        let mut c = candidate();

        // Empty phone is fine: the field is optional.
        c.phone = String::new();
        assert!(validate_at(&c, today()).is_ok());

        c.phone = "+7 (123) 456-7890".into();
        assert!(validate_at(&c, today()).is_ok());

        for bad in ["abc", "123456", "+7 123 456 7890 123 456 78"] {
            c.phone = bad.into();
            assert!(
                matches!(validate_at(&c, today()), Err(Error::InvalidPhone(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn future_birthdate_rejected() {
        let c = candidate().with_birthdate(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
        assert!(matches!(
            validate_at(&c, today()),
            Err(Error::BirthdateInFuture(_))
        ));

        // Born today is allowed: the rule is "not after".
        let c = candidate().with_birthdate(today());
        assert!(validate_at(&c, today()).is_ok());
    }
}
