//! Validation of raw form submissions.
//!
//! Everything that can be wrong with a submission is caught here, so the
//! formulas in [`crate::core::age`] only ever see a valid [`AgeQuery`].

use crate::core::profiles::{profile, OTHER_BREED};
use crate::domain::model::{AgeQuery, FormInput, Species};
use crate::utils::error::{PetAgeError, Result};
use crate::utils::validation::{parse_age, validate_required_field};

impl FormInput {
    pub fn new(species: impl Into<String>) -> Self {
        Self {
            species: species.into(),
            ..Default::default()
        }
    }

    pub fn with_age(mut self, age: impl Into<String>) -> Self {
        self.age = Some(age.into());
        self
    }

    pub fn with_breed(mut self, breed: impl Into<String>) -> Self {
        self.breed = Some(breed.into());
        self
    }

    pub fn with_custom_breed(mut self, custom: impl Into<String>) -> Self {
        self.custom_breed = Some(custom.into());
        self
    }

    pub fn into_query(self) -> Result<AgeQuery> {
        parse_form(&self)
    }
}

pub fn parse_form(form: &FormInput) -> Result<AgeQuery> {
    if form.species.trim().is_empty() {
        return Err(PetAgeError::missing_field("species"));
    }
    let species: Species = form.species.parse()?;

    let age = parse_age("age", validate_required_field("age", &form.age)?)?;
    let breed = resolve_breed(form)?;

    if breed.is_empty() && profile(species).requires_breed() {
        return Err(PetAgeError::missing_field("breed"));
    }

    Ok(AgeQuery {
        species,
        age,
        breed,
    })
}

/// 下拉選單選 "other" 時改用自行輸入的品種
fn resolve_breed(form: &FormInput) -> Result<String> {
    let selected = form.breed.as_deref().map(str::trim).unwrap_or_default();

    if selected.eq_ignore_ascii_case(OTHER_BREED) {
        return validate_required_field("custom breed", &form.custom_breed).map(str::to_string);
    }

    if selected.is_empty() {
        let custom = form.custom_breed.as_deref().map(str::trim).unwrap_or_default();
        return Ok(custom.to_string());
    }

    Ok(selected.to_string())
}
