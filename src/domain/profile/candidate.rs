//! Candidate profile - the person a resume is generated for.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{UserId, ValidationError};

/// Identity details the summary step writes about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    user_id: UserId,
    full_name: String,
    headline: Option<String>,
    location: Option<String>,
    email: Option<String>,
    years_of_experience: Option<u32>,
}

impl CandidateProfile {
    pub fn new(user_id: UserId, full_name: impl Into<String>) -> Result<Self, ValidationError> {
        let full_name = full_name.into();
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(ValidationError::empty_field("full_name"));
        }
        Ok(Self {
            user_id,
            full_name: full_name.to_string(),
            headline: None,
            location: None,
            email: None,
            years_of_experience: None,
        })
    }

    pub fn with_headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = non_blank(headline.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = non_blank(location.into());
        self
    }

    /// Sets the contact email; requires a single `@` with text on both sides.
    pub fn with_email(mut self, email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into().trim().to_string();
        let valid = matches!(email.split_once('@'), Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@'));
        if !valid {
            return Err(ValidationError::invalid_format("email", "not an email address"));
        }
        self.email = Some(email);
        Ok(self)
    }

    pub fn with_years_of_experience(mut self, years: u32) -> Self {
        self.years_of_experience = Some(years);
        self
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn headline(&self) -> Option<&str> {
        self.headline.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn years_of_experience(&self) -> Option<u32> {
        self.years_of_experience
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
