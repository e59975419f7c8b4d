//! # Vault API
//!
//! Typed endpoints of the Onepass backend. Each method issues exactly one
//! request; the session is passed in explicitly by the caller.

use super::http::{ApiError, ApiRequest, HttpService};
use crate::repl::models::{
    AccountUpdate, AuthStatus, CreatedEntry, Credentials, EntryForm, EntryId, LoginResult,
    Session, SortOrder, StrengthReport, VaultEntry, VaultEntrySummary,
};

#[derive(Debug, Clone)]
pub struct VaultApi {
    http: HttpService,
}

impl VaultApi {
    pub fn new(http: HttpService) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &HttpService {
        &self.http
    }

    /// `POST /api/auth/login`, returning the new api key
    pub async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let request = ApiRequest::post("/api/auth/login").json(credentials)?;
        let result: LoginResult = self.http.send(request).await?.result()?;
        Ok(result.api_key)
    }

    /// `POST /api/user/add`
    pub async fn create_account(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let request = ApiRequest::post("/api/user/add").json(credentials)?;
        self.http.send(request).await?;
        Ok(())
    }

    /// `GET /api/auth/status`
    pub async fn auth_status(&self, session: &Session) -> Result<AuthStatus, ApiError> {
        let request = ApiRequest::get("/api/auth/status").authorized(session);
        self.http.send(request).await?.result()
    }

    /// `POST /api/auth/logout`
    pub async fn logout(&self, session: &Session) -> Result<(), ApiError> {
        let request = ApiRequest::post("/api/auth/logout").authorized(session);
        self.http.send(request).await?;
        Ok(())
    }

    /// `GET /api/vault`, ordered by the server
    pub async fn list_vault(
        &self,
        session: &Session,
        sort_by: SortOrder,
    ) -> Result<Vec<VaultEntrySummary>, ApiError> {
        let request = ApiRequest::get("/api/vault")
            .authorized(session)
            .query("sort_by", sort_by.as_str());
        self.http.send(request).await?.result()
    }

    /// `GET /api/vault/search`
    pub async fn search_vault(
        &self,
        session: &Session,
        query: &str,
    ) -> Result<Vec<VaultEntrySummary>, ApiError> {
        let request = ApiRequest::get("/api/vault/search")
            .query("query", query)
            .authorized(session);
        self.http.send(request).await?.result()
    }

    /// `GET /api/vault/{id}`
    pub async fn get_entry(&self, session: &Session, id: EntryId) -> Result<VaultEntry, ApiError> {
        let request = ApiRequest::get(format!("/api/vault/{id}")).authorized(session);
        self.http.send(request).await?.result()
    }

    /// `POST /api/vault`, returning the id of the new entry
    pub async fn add_entry(&self, session: &Session, form: &EntryForm) -> Result<EntryId, ApiError> {
        let request = ApiRequest::post("/api/vault").authorized(session).json(form)?;
        let created: CreatedEntry = self.http.send(request).await?.result()?;
        Ok(created.id)
    }

    /// `PUT /api/vault/{id}`
    pub async fn edit_entry(
        &self,
        session: &Session,
        id: EntryId,
        form: &EntryForm,
    ) -> Result<(), ApiError> {
        let request = ApiRequest::put(format!("/api/vault/{id}"))
            .authorized(session)
            .json(form)?;
        self.http.send(request).await?;
        Ok(())
    }

    /// `DELETE /api/vault/{id}`
    pub async fn delete_entry(&self, session: &Session, id: EntryId) -> Result<(), ApiError> {
        let request = ApiRequest::delete(format!("/api/vault/{id}")).authorized(session);
        self.http.send(request).await?;
        Ok(())
    }

    /// `GET /api/vault/{id}/check`
    pub async fn check_entry(
        &self,
        session: &Session,
        id: EntryId,
    ) -> Result<StrengthReport, ApiError> {
        let request = ApiRequest::get(format!("/api/vault/{id}/check")).authorized(session);
        self.http.send(request).await?.result()
    }

    /// `PUT /api/user`
    pub async fn update_account(
        &self,
        session: &Session,
        update: &AccountUpdate,
    ) -> Result<(), ApiError> {
        let request = ApiRequest::put("/api/user").authorized(session).json(update)?;
        self.http.send(request).await?;
        Ok(())
    }

    /// `DELETE /api/user`
    pub async fn delete_account(&self, session: &Session) -> Result<(), ApiError> {
        let request = ApiRequest::delete("/api/user").authorized(session);
        self.http.send(request).await?;
        Ok(())
    }
}
