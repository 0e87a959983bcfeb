//! Alerts modelled as state.
//!
//! A feature presents a dialog by storing a `Prompt` in an optional field;
//! each button carries the action the view dispatches when it is pressed.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonRole {
    Primary,
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromptButton<A> {
    pub label: String,
    pub role: ButtonRole,
    pub action: A,
}

impl<A> PromptButton<A> {
    pub fn primary(label: impl Into<String>, action: A) -> Self {
        Self {
            label: label.into(),
            role: ButtonRole::Primary,
            action,
        }
    }

    pub fn cancel(label: impl Into<String>, action: A) -> Self {
        Self {
            label: label.into(),
            role: ButtonRole::Cancel,
            action,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prompt<A> {
    pub title: String,
    pub message: String,
    pub buttons: Vec<PromptButton<A>>,
}

impl<A> Prompt<A> {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            buttons: Vec::new(),
        }
    }

    pub fn button(mut self, button: PromptButton<A>) -> Self {
        self.buttons.push(button);
        self
    }

    /// Action of the button with `label`.
    pub fn action_for(&self, label: &str) -> Option<&A> {
        self.buttons
            .iter()
            .find(|button| button.label == label)
            .map(|button| &button.action)
    }
}
