// 🧺 Forager Service - required fields, state format, duplicate detection

use crate::data::{codec::has_line_break, Repository, Result};
use crate::models::Forager;

use super::result::ServiceResult;

pub struct ForagerService<R: Repository<Forager>> {
    repository: R,
}

impl<R: Repository<Forager>> ForagerService<R> {
    pub fn new(repository: R) -> Self {
        ForagerService { repository }
    }

    pub fn find_all(&self) -> Vec<Forager> {
        self.repository.find_all()
    }

    pub fn find_by_id(&self, id: &str) -> Option<Forager> {
        self.repository.find_by_id(id)
    }

    /// Case-insensitive match on the state abbreviation
    pub fn find_by_state(&self, state: &str) -> Vec<Forager> {
        self.repository.find_by_field(state)
    }

    /// Foragers whose last name starts with `prefix` (case-sensitive)
    pub fn find_by_last_name(&self, prefix: &str) -> Vec<Forager> {
        self.repository
            .find_all()
            .into_iter()
            .filter(|f| f.last_name.starts_with(prefix))
            .collect()
    }

    /// Validate and store a forager, assigning a UUID when the id is empty
    pub fn add(&self, mut forager: Forager) -> Result<ServiceResult<Forager>> {
        let mut result = self.validate(&forager);

        if !result.is_success() {
            tracing::warn!(errors = ?result.messages(), "forager rejected");
            return Ok(result);
        }

        if forager.id.trim().is_empty() {
            forager.id = uuid::Uuid::new_v4().to_string();
        }

        let stored = self.repository.add(forager)?;
        result.set_payload(stored);
        Ok(result)
    }

    fn validate(&self, forager: &Forager) -> ServiceResult<Forager> {
        let mut result = ServiceResult::new();

        if forager.first_name.trim().is_empty() {
            result.add_error_message("First name is required.");
        } else if has_line_break(&forager.first_name) {
            result.add_error_message("First name cannot contain line breaks.");
        }

        if forager.last_name.trim().is_empty() {
            result.add_error_message("Last name is required.");
        } else if has_line_break(&forager.last_name) {
            result.add_error_message("Last name cannot contain line breaks.");
        }

        if forager.state.trim().is_empty() {
            result.add_error_message("State is required.");
        } else if !is_state_abbreviation(&forager.state) {
            result.add_error_message("State must be a two-letter abbreviation.");
        }

        let duplicate = self
            .repository
            .find_by_field(&forager.state)
            .iter()
            .any(|existing| existing.is_same_person(forager));

        if duplicate {
            result.add_error_message("Duplicate forager found.");
        }

        result
    }
}

fn is_state_abbreviation(state: &str) -> bool {
    state.len() == 2 && state.chars().all(|c| c.is_ascii_alphabetic())
}
