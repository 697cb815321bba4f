use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::NaiveDate;
use chrono::Utc;
use uuid::Uuid;

use crate::contact::errors::BirthdayError;
use crate::contact::errors::ContactIdError;
use crate::contact::errors::NameError;
use crate::contact::errors::PhoneError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;

/// Contact entity, always owned by exactly one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub id: ContactId,
    pub owner_id: UserId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub birthday: Birthday,
    pub created_at: DateTime<Utc>,
}

/// Contact unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContactId(pub Uuid);

impl ContactId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a contact ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ContactIdError> {
        Uuid::parse_str(s)
            .map(ContactId)
            .map_err(|e| ContactIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ContactId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// First or last name, 1-100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MAX_LENGTH: usize = 100;

    pub fn new(name: String) -> Result<Self, NameError> {
        let length = name.chars().count();
        if length == 0 {
            Err(NameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Free-form phone number, 3-80 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 80;

    pub fn new(phone: String) -> Result<Self, PhoneError> {
        let length = phone.chars().count();
        if length < Self::MIN_LENGTH {
            Err(PhoneError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(PhoneError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(phone))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Calendar date of birth, written as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Birthday(NaiveDate);

impl Birthday {
    const FORMAT: &'static str = "%Y-%m-%d";

    /// # Errors
    /// * `BirthdayError` - Not a valid `YYYY-MM-DD` date
    pub fn parse(value: &str) -> Result<Self, BirthdayError> {
        NaiveDate::parse_from_str(value, Self::FORMAT)
            .map(Self)
            .map_err(|_| BirthdayError)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Month and day as `MM-DD`, the key used for birthday windows.
    pub fn month_day(&self) -> String {
        month_day(self.0)
    }
}

impl From<NaiveDate> for Birthday {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

fn month_day(date: NaiveDate) -> String {
    date.format("%m-%d").to_string()
}

/// Upcoming birthdays from `start` through `end` inclusive, compared by month
/// and day only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthdayWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl BirthdayWindow {
    /// Longest window kept as an explicit range; anything longer already
    /// covers every birthday.
    const MAX_DAYS: u32 = 366;

    /// Window covering `today` and the following `days` days.
    pub fn starting(today: NaiveDate, days: u32) -> Self {
        let span = Duration::days(i64::from(days.min(Self::MAX_DAYS)));
        Self {
            start: today,
            end: today.checked_add_signed(span).unwrap_or(NaiveDate::MAX),
        }
    }

    pub fn start_key(&self) -> String {
        month_day(self.start)
    }

    pub fn end_key(&self) -> String {
        month_day(self.end)
    }

    /// A year or more: every birthday matches.
    pub fn is_whole_year(&self) -> bool {
        (self.end - self.start).num_days() >= 365
    }

    /// Window passes New Year, e.g. `12-30` through `01-05`.
    pub fn wraps_year_end(&self) -> bool {
        self.start_key() > self.end_key()
    }

    pub fn contains(&self, birthday: &Birthday) -> bool {
        if self.is_whole_year() {
            return true;
        }

        let key = birthday.month_day();
        if self.wraps_year_end() {
            key >= self.start_key() || key <= self.end_key()
        } else {
            key >= self.start_key() && key <= self.end_key()
        }
    }
}

/// Contact list query as received from the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactQuery {
    /// Case-insensitive substring of first name, last name or email.
    pub search: Option<String>,
    /// Only contacts whose birthday falls within this many days from today.
    pub birthdays_within: Option<u32>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

/// Resolved list filter handed to the repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    pub search: Option<String>,
    pub birthdays: Option<BirthdayWindow>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl ContactFilter {
    /// Whether a contact passes the search and birthday conditions.
    ///
    /// Paging is not considered.
    pub fn matches(&self, contact: &Contact) -> bool {
        let matches_search = match &self.search {
            Some(search) => {
                let needle = search.to_lowercase();
                [
                    contact.first_name.as_str(),
                    contact.last_name.as_str(),
                    contact.email.as_str(),
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            }
            None => true,
        };

        let matches_birthday = self
            .birthdays
            .as_ref()
            .map_or(true, |window| window.contains(&contact.birthday));

        matches_search && matches_birthday
    }
}

/// Command to create a contact with validated fields
#[derive(Debug, Clone)]
pub struct CreateContactCommand {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub birthday: Birthday,
}

/// Partial update; only provided fields change.
#[derive(Debug, Clone, Default)]
pub struct UpdateContactCommand {
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub birthday: Option<Birthday>,
}
