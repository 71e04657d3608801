use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(default, alias = "verified")]
    pub is_verified: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LinkInfo {
    pub link_id: String,
}

impl LinkInfo {
    /// Public URL a sender opens to reach this recipient's submission form.
    pub fn share_url(&self, base: &str) -> String {
        format!("{}/submit/{}", base.trim_end_matches('/'), self.link_id)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum MessageCategory {
    #[default]
    #[serde(rename = "Inner Feelings")]
    InnerFeelings,
    Feedback,
    Question,
    Compliment,
}

impl MessageCategory {
    pub const ALL: [MessageCategory; 4] = [
        MessageCategory::InnerFeelings,
        MessageCategory::Feedback,
        MessageCategory::Question,
        MessageCategory::Compliment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageCategory::InnerFeelings => "Inner Feelings",
            MessageCategory::Feedback => "Feedback",
            MessageCategory::Question => "Question",
            MessageCategory::Compliment => "Compliment",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SubmitMessageRequest {
    pub content: String,
    pub category: MessageCategory,
    pub captcha: Option<String>,
}

/// A message as listed on the recipient dashboard.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub message_id: String,
    pub content: String,
    pub category: String,
    pub created_at: String,
    #[serde(default)]
    pub is_read: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RecipientName {
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl Default for SubmitMessageRequest {
    fn default() -> Self {
        Self {
            content: String::new(),
            category: MessageCategory::default(),
            captcha: None,
        }
    }
}
