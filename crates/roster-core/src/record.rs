// # Registration Records
//
// Data model for the roster registration system.
//
// ## Purpose
//
// Defines the record as it lives in the store (`Registration`) and the
// candidate supplied by the front-end before an identifier and timestamp
// have been assigned (`NewRegistration`).
//
// ## Row Format
//
// A record occupies one row of the tabular backing file, with cells in
// this fixed column order:
//
// ```text
// ID, Username, Password, Email, Lastname, Firstname, Middlename,
// Birthdate, Phone, Gender, Registration Date
// ```
//
// Birthdate cells hold `dd.mm.yyyy`; the registration timestamp holds
// `yyyy-mm-dd hh:mm:ss`. Optional fields are stored as empty cells.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Header row of the backing file, in fixed column order
pub const COLUMNS: [&str; 11] = [
    "ID",
    "Username",
    "Password",
    "Email",
    "Lastname",
    "Firstname",
    "Middlename",
    "Birthdate",
    "Phone",
    "Gender",
    "Registration Date",
];

/// Cell format for birthdate values
pub const BIRTHDATE_FORMAT: &str = "%d.%m.%Y";

/// Cell format for registration timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Gender as offered by the front-end: a fixed enumerated set or empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    /// No selection made (stored as an empty cell)
    #[default]
    #[serde(rename = "")]
    Unspecified,
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Unspecified => Ok(()),
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

impl FromStr for Gender {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" => Ok(Gender::Unspecified),
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(crate::Error::config(format!(
                "unknown gender '{other}' (expected male, female, or empty)"
            ))),
        }
    }
}

/// A registration record as persisted in the store
///
/// Field order matters: it defines the column order of serialized rows and
/// must stay in sync with [`COLUMNS`].
///
/// The password is stored exactly as supplied (no hashing). Masking it for
/// display is the consumer's concern, not the store's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    /// Unique identifier, one more than the maximum at insertion time
    #[serde(rename = "ID")]
    pub id: u64,

    /// Unique login name
    #[serde(rename = "Username")]
    pub username: String,

    /// Password, stored as given
    #[serde(rename = "Password")]
    pub password: String,

    /// Unique email address
    #[serde(rename = "Email")]
    pub email: String,

    /// Last name, optional (empty when absent)
    #[serde(rename = "Lastname")]
    pub lastname: String,

    /// First name, required
    #[serde(rename = "Firstname")]
    pub firstname: String,

    /// Middle name, optional
    #[serde(rename = "Middlename")]
    pub middlename: String,

    /// Date of birth, never after the registration date
    #[serde(rename = "Birthdate", with = "birthdate_format")]
    pub birthdate: NaiveDate,

    /// Phone number, optional, loosely formatted
    #[serde(rename = "Phone")]
    pub phone: String,

    /// Gender selection
    #[serde(rename = "Gender")]
    pub gender: Gender,

    /// Timestamp assigned when the record was appended
    #[serde(rename = "Registration Date", with = "timestamp_format")]
    pub registered_at: NaiveDateTime,
}

/// A candidate record as supplied by the front-end
///
/// Carries everything except the identifier and registration timestamp,
/// which the registrar assigns at append time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRegistration {
    pub username: String,
    pub password: String,
    pub email: String,
    pub lastname: String,
    pub firstname: String,
    pub middlename: String,
    pub birthdate: NaiveDate,
    pub phone: String,
    pub gender: Gender,
}

impl NewRegistration {
    /// Create a candidate with the required fields set
    ///
    /// Optional fields start empty; the birthdate defaults to the current
    /// date, matching the front-end's date picker default.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
        firstname: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: email.into(),
            lastname: String::new(),
            firstname: firstname.into(),
            middlename: String::new(),
            birthdate: chrono::Local::now().date_naive(),
            phone: String::new(),
            gender: Gender::Unspecified,
        }
    }

    /// Set the last name
    pub fn with_lastname(mut self, lastname: impl Into<String>) -> Self {
        self.lastname = lastname.into();
        self
    }

    /// Set the middle name
    pub fn with_middlename(mut self, middlename: impl Into<String>) -> Self {
        self.middlename = middlename.into();
        self
    }

    /// Set the birthdate
    pub fn with_birthdate(mut self, birthdate: NaiveDate) -> Self {
        self.birthdate = birthdate;
        self
    }

    /// Set the phone number
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Set the gender
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    /// Copy of the candidate with surrounding whitespace stripped from
    /// every text field except the password, which is stored verbatim
    pub(crate) fn trimmed(&self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            email: self.email.trim().to_string(),
            lastname: self.lastname.trim().to_string(),
            firstname: self.firstname.trim().to_string(),
            middlename: self.middlename.trim().to_string(),
            birthdate: self.birthdate,
            phone: self.phone.trim().to_string(),
            gender: self.gender,
        }
    }

    /// Promote the candidate to a stored record
    ///
    /// # Visibility
    ///
    /// This is `pub(crate)` so identifiers and timestamps are only ever
    /// assigned by the registrar during an append.
    pub(crate) fn into_registration(self, id: u64, registered_at: NaiveDateTime) -> Registration {
        Registration {
            id,
            username: self.username,
            password: self.password,
            email: self.email,
            lastname: self.lastname,
            firstname: self.firstname,
            middlename: self.middlename,
            birthdate: self.birthdate,
            phone: self.phone,
            gender: self.gender,
            registered_at,
        }
    }
}

mod birthdate_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(super::BIRTHDATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let cell = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&cell, super::BIRTHDATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        stamp: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&stamp.format(super::TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let cell = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&cell, super::TIMESTAMP_FORMAT)
            .map_err(serde::de::Error::custom)
    }
}
