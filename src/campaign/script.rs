//! Canned demo conversation played back into a run's transcript

use crate::store::models::Role;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub role: Role,
    pub content: String,
}

/// Ordered role/content pairs delivered to a running run
#[derive(Debug, Clone)]
pub struct Script {
    lines: Vec<ScriptLine>,
}

const DEMO_LINES: &[(Role, &str)] = &[
    (Role::Bot, "Hello! How can I help you today?"),
    (Role::User, "I need help with my account settings"),
    (Role::Bot, "I understand you need assistance with your account settings. Can you tell me what specific setting you'd like to change?"),
    (Role::User, "I want to update my email address"),
    (Role::Bot, "I can help you with that. For security purposes, I'll need to verify your identity first. Can you provide your current email address?"),
    (Role::User, "It's john@example.com"),
    (Role::Bot, "Thank you. I've sent a verification code to that email. Once you provide the code, we can proceed with updating your email address."),
    (Role::User, "The code is 123456"),
    (Role::Bot, "Perfect! Your identity has been verified. What would you like your new email address to be?"),
    (Role::User, "john.smith@example.com"),
    (Role::Bot, "Great! I've updated your email address to john.smith@example.com. You'll receive a confirmation email shortly. Is there anything else I can help you with?"),
    (Role::User, "No, that's all. Thank you!"),
    (Role::Bot, "You're welcome! Have a great day!"),
];

impl Script {
    pub fn new(lines: Vec<ScriptLine>) -> Self {
        Self { lines }
    }

    /// The account-settings support call used by every demo run
    pub fn demo() -> Self {
        Self::new(
            DEMO_LINES
                .iter()
                .map(|(role, content)| ScriptLine {
                    role: *role,
                    content: content.to_string(),
                })
                .collect(),
        )
    }

    pub fn lines(&self) -> &[ScriptLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::demo()
    }
}
