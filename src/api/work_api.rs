use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::dispatcher::{Dispatcher, RequestError, RequestOptions};
use crate::models::{
    CreateRequest, Created, Decision, DecisionRequest, DecisionResult, LoginRequest,
    LoginResponse, RequestDetail,
};
use crate::session::AuthUpdate;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const HEALTH_PATH: &str = "/api/health";
pub const REQUESTS_PATH: &str = "/api/requests";
pub const STATS_PATH: &str = "/api/ops/stats";
/// The backend records this header as the acting user in its audit log.
pub const ACTOR_HEADER: &str = "X-Actor";

/// Typed calls against the approval-ops backend. Everything flows through the dispatcher.
pub struct WorkApi {
    dispatcher: Arc<Dispatcher>,
}

impl WorkApi {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Signs in and stores the returned token. The session is untouched on failure.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, RequestError> {
        let credentials = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self
            .dispatcher
            .dispatch_as(LOGIN_PATH, RequestOptions::post().json(&credentials)?)
            .await?;
        if response.token.is_empty() {
            return Err(RequestError::Decode(
                "login response carried no token".to_string(),
            ));
        }

        let display_name = response
            .username
            .clone()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| username.to_string());
        self.dispatcher
            .session()
            .set_auth(AuthUpdate::new(response.token.clone(), display_name.clone()));
        info!("Signed in as '{}'", display_name);
        Ok(response)
    }

    /// Forgets the local session. The backend keeps no server-side session to end.
    pub fn logout(&self) {
        self.dispatcher.session().clear_auth();
        info!("Signed out");
    }

    pub async fn health(&self) -> Result<Value, RequestError> {
        self.dispatcher.dispatch(HEALTH_PATH, self.options()).await
    }

    pub async fn list_requests(&self) -> Result<Value, RequestError> {
        self.dispatcher.dispatch(REQUESTS_PATH, self.options()).await
    }

    pub async fn request_detail(&self, id: i64) -> Result<RequestDetail, RequestError> {
        self.dispatcher
            .dispatch_as(&request_path(id, None), self.options())
            .await
    }

    pub async fn create_request(&self, title: &str, input_text: &str) -> Result<Created, RequestError> {
        let body = CreateRequest {
            title: title.to_string(),
            input_text: input_text.to_string(),
        };
        let options = self.post_options().json(&body)?;
        self.dispatcher.dispatch_as(REQUESTS_PATH, options).await
    }

    /// Asks the backend to draft an execution plan for the request.
    pub async fn plan(&self, id: i64) -> Result<Value, RequestError> {
        self.dispatcher
            .dispatch(&request_path(id, Some("plan")), self.post_options())
            .await
    }

    pub async fn decide(
        &self,
        id: i64,
        decision: Decision,
        comment: Option<&str>,
    ) -> Result<DecisionResult, RequestError> {
        info!("Recording {} for request {}", decision, id);
        let body = DecisionRequest {
            decision,
            comment: comment.map(str::to_string),
        };
        let options = self.post_options().json(&body)?;
        self.dispatcher
            .dispatch_as(&request_path(id, Some("approve")), options)
            .await
    }

    pub async fn execute(&self, id: i64) -> Result<Value, RequestError> {
        self.dispatcher
            .dispatch(&request_path(id, Some("execute")), self.post_options())
            .await
    }

    pub async fn stats(&self) -> Result<Value, RequestError> {
        self.dispatcher.dispatch(STATS_PATH, self.options()).await
    }

    fn options(&self) -> RequestOptions {
        let session = self.dispatcher.session();
        if session.is_authenticated() {
            RequestOptions::get().header(ACTOR_HEADER, session.get_username())
        } else {
            RequestOptions::get()
        }
    }

    fn post_options(&self) -> RequestOptions {
        self.options().method(reqwest::Method::POST)
    }
}

fn request_path(id: i64, action: Option<&str>) -> String {
    match action {
        Some(action) => format!("{}/{}/{}", REQUESTS_PATH, id, action),
        None => format!("{}/{}", REQUESTS_PATH, id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;
    use crate::storage::MemoryStorage;
    use crate::transport::StubTransport;
    use reqwest::Method;
    use serde_json::json;

    fn setup(stub: StubTransport) -> (WorkApi, Arc<SessionStore>, Arc<StubTransport>) {
        let session = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
        let stub = Arc::new(stub);
        let dispatcher = Arc::new(Dispatcher::new(session.clone(), stub.clone()));
        (WorkApi::new(dispatcher), session, stub)
    }

    #[tokio::test]
    async fn test_login_stores_token_and_username() {
        let (api, session, stub) =
            setup(StubTransport::new().respond(200, r#"{"token":"abc","username":"Kim"}"#));

        api.login("kim", "pw").await.unwrap();

        assert_eq!(session.get_token(), "abc");
        assert_eq!(session.get_username(), "Kim");
        let sent = stub.last_sent().unwrap();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.path, LOGIN_PATH);
        let body: Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"username": "kim", "password": "pw"}));
    }

    #[tokio::test]
    async fn test_login_falls_back_to_submitted_username() {
        let (api, session, _) = setup(StubTransport::new().respond(200, r#"{"token":"abc"}"#));
        api.login("kim", "pw").await.unwrap();
        assert_eq!(session.get_username(), "kim");
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_alone() {
        let (api, session, _) =
            setup(StubTransport::new().respond(401, r#"{"error":"Bad credentials"}"#));
        let err = api.login("kim", "wrong").await.unwrap_err();
        assert_eq!(err.message(), "Bad credentials");
        assert_eq!(session.get_token(), "");
        assert_eq!(session.get_username(), "guest");
    }

    /// A 200 without a token must not leave a named but unauthenticated session.
    #[tokio::test]
    async fn test_login_without_token_is_rejected() {
        let (api, session, _) = setup(StubTransport::new().respond(200, r#"{"token":""}"#));
        let err = api.login("kim", "pw").await.unwrap_err();
        assert_eq!(
            err,
            RequestError::Decode("login response carried no token".to_string())
        );
        assert_eq!(session.get_token(), "");
        assert_eq!(session.get_username(), "guest");
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let (api, session, _) = setup(StubTransport::new());
        session.set_auth(AuthUpdate::new("abc", "kim"));
        api.logout();
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_guest_calls_send_no_actor() {
        let (api, _, stub) = setup(StubTransport::new().respond(200, "[]"));
        let list = api.list_requests().await.unwrap();
        assert_eq!(list, json!([]));
        assert_eq!(stub.last_sent().unwrap().header(ACTOR_HEADER), None);
    }

    #[tokio::test]
    async fn test_create_request_sends_actor_and_body() {
        let (api, session, stub) = setup(StubTransport::new().respond(200, r#"{"id":12}"#));
        session.set_auth(AuthUpdate::new("abc", "kim"));

        let created = api.create_request("Onboard", "new hire").await.unwrap();

        assert_eq!(created.id, 12);
        let sent = stub.last_sent().unwrap();
        assert_eq!(sent.path, "/api/requests");
        assert_eq!(sent.header("x-actor"), Some("kim"));
        assert_eq!(sent.header("authorization"), Some("Bearer abc"));
        let body: Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"title": "Onboard", "inputText": "new hire"}));
    }

    #[tokio::test]
    async fn test_decide_posts_to_approve_endpoint() {
        let (api, _, stub) =
            setup(StubTransport::new().respond(200, r#"{"id":3,"status":"REJECTED"}"#));

        let result = api
            .decide(3, Decision::Reject, Some("not now"))
            .await
            .unwrap();

        assert_eq!(result.status, "REJECTED");
        let sent = stub.last_sent().unwrap();
        assert_eq!(sent.path, "/api/requests/3/approve");
        let body: Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"decision": "REJECT", "comment": "not now"}));
    }

    #[tokio::test]
    async fn test_plan_execute_and_stats_paths() {
        let (api, _, stub) = setup(
            StubTransport::new()
                .respond(200, r#"{"steps":[]}"#)
                .respond(200, r#"{"ok":true}"#)
                .respond(200, r#"{"total":4}"#),
        );
        api.plan(5).await.unwrap();
        api.execute(5).await.unwrap();
        let stats = api.stats().await.unwrap();

        let paths: Vec<_> = stub.sent().into_iter().map(|r| (r.method, r.path)).collect();
        assert_eq!(
            paths,
            vec![
                (Method::POST, "/api/requests/5/plan".to_string()),
                (Method::POST, "/api/requests/5/execute".to_string()),
                (Method::GET, "/api/ops/stats".to_string()),
            ]
        );
        assert_eq!(stats["total"], 4);
    }

    #[tokio::test]
    async fn test_request_detail_is_typed() {
        let (api, _, _) = setup(StubTransport::new().respond(
            200,
            r#"{"request":{"id":1},"audit":[],"tickets":[{"key":"T-1"}],"wikiPages":[]}"#,
        ));
        let detail = api.request_detail(1).await.unwrap();
        assert_eq!(detail.request["id"], 1);
        assert_eq!(detail.tickets.len(), 1);
    }
}
