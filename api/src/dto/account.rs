use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangeEmailRequest {
    #[validate(length(min = 3, max = 254))]
    pub old_email: String,
    #[validate(length(min = 3, max = 254))]
    pub new_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConfirmEmailChangeRequest {
    #[validate(length(min = 1, max = 16))]
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailChangedResponse {
    pub email: String,
}
