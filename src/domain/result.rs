/// Outcome of a validated operation: either a payload or a list of
/// human-readable messages, one per broken rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResult<T> {
    messages: Vec<String>,
    payload: Option<T>,
}

impl<T> ServiceResult<T> {
    pub fn new() -> Self {
        ServiceResult {
            messages: Vec::new(),
            payload: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn add_error_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn set_payload(&mut self, payload: T) {
        self.payload = Some(payload);
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }
}

impl<T> Default for ServiceResult<T> {
    fn default() -> Self {
        Self::new()
    }
}
