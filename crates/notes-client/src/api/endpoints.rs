use notes_types::{
    ChangePasswordRequest, LinkInfo, LoginRequest, LoginResponse, Message, RecipientName,
    RegisterRequest, SubmitMessageRequest, UserProfile,
};
use serde_json::Value;

use super::request::ApiRequest;
use super::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    pub async fn register(&self, req: &RegisterRequest) -> Result<Value, ClientError> {
        self.request(ApiRequest::post("/api/register").json(req)?).await
    }

    pub async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ClientError> {
        self.request(ApiRequest::post("/api/login").json(req)?).await
    }

    pub async fn current_user(&self) -> Result<UserProfile, ClientError> {
        self.request(ApiRequest::get("/api/user").authenticated()).await
    }

    pub async fn get_link(&self) -> Result<LinkInfo, ClientError> {
        self.request(ApiRequest::get("/api/get-link").authenticated()).await
    }

    pub async fn submit_message(
        &self,
        link_id: &str,
        req: &SubmitMessageRequest,
    ) -> Result<Value, ClientError> {
        let req = ApiRequest::post("/api/messages").segment(link_id).json(req)?;
        self.request(req).await
    }

    pub async fn get_messages(&self) -> Result<Vec<Message>, ClientError> {
        self.request(ApiRequest::get("/api/messages").authenticated()).await
    }

    pub async fn recipient_name(&self, link_id: &str) -> Result<RecipientName, ClientError> {
        self.request(ApiRequest::get("/api/user").segment(link_id)).await
    }

    pub async fn change_password(
        &self,
        req: &ChangePasswordRequest,
    ) -> Result<Value, ClientError> {
        self.request(ApiRequest::put("/api/user/password").json(req)?.authenticated())
            .await
    }

    /// Logs in and stores the issued token in the session.
    pub async fn sign_in(&self, req: &LoginRequest) -> Result<(), ClientError> {
        let response = self.login(req).await?;
        self.session().set_token(response.token);
        Ok(())
    }

    pub fn sign_out(&self) {
        self.session().clear_token();
    }
}
