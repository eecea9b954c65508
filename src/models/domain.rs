use serde::{Deserialize, Serialize};
use crate::core::interests::{self, Interests, InterestsError};

/// Store-assigned profile identifier
pub type ProfileId = i64;

/// User profile in its public form, interests held as a set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub email: String,
    pub city: String,
    pub interests: Interests,
}

/// Profile row as the store holds it, interests still serialized
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ProfileRecord {
    pub id: ProfileId,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub email: String,
    pub city: String,
    pub interests: String,
}

impl ProfileRecord {
    /// Decode the stored interests scalar into the public form
    pub fn into_profile(self) -> Result<Profile, InterestsError> {
        let interests = interests::decode(&self.interests)?;

        Ok(Profile {
            id: self.id,
            name: self.name,
            age: self.age,
            gender: self.gender,
            email: self.email,
            city: self.city,
            interests,
        })
    }
}

/// Insert payload in persistence form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfileRecord {
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub email: String,
    pub city: String,
    pub interests: String,
}

/// Partial update in persistence form; `None` leaves the column unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub interests: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.email.is_none()
            && self.city.is_none()
            && self.interests.is_none()
    }

    /// Apply the supplied fields to a record in place
    pub fn apply_to(&self, record: &mut ProfileRecord) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(age) = self.age {
            record.age = age;
        }
        if let Some(gender) = &self.gender {
            record.gender = gender.clone();
        }
        if let Some(email) = &self.email {
            record.email = email.clone();
        }
        if let Some(city) = &self.city {
            record.city = city.clone();
        }
        if let Some(interests) = &self.interests {
            record.interests = interests.clone();
        }
    }
}

/// Columns the store can be scanned on by equality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanField {
    City,
    Email,
}

impl ScanField {
    pub fn column(&self) -> &'static str {
        match self {
            ScanField::City => "city",
            ScanField::Email => "email",
        }
    }

    pub fn value_of<'a>(&self, record: &'a ProfileRecord) -> &'a str {
        match self {
            ScanField::City => &record.city,
            ScanField::Email => &record.email,
        }
    }
}
