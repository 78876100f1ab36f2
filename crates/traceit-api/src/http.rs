use std::time::Duration;

use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use reqwest::StatusCode;
use tracing::debug;

use traceit_types::{
    ApiMessage, Comment, LoginRequest, LoginResponse, NewComment, RegisterRequest, Report, Role,
};

use crate::backend::{Backend, ReportDraft};
use crate::error::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// `Backend` implementation over HTTP.
///
/// One instance per configured backend origin; cheap to clone and safe to
/// share across watcher threads.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(&self, request: RequestBuilder, method: &str, path: &str) -> Result<Response> {
        debug!(method, path, "backend request");
        let response = request.send()?;
        check_status(response)
    }
}

/// Map non-2xx responses into the error taxonomy, draining the body for
/// the server's `{message}` where one exists.
fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED {
        return Err(Error::Unauthorized);
    }

    let message = response
        .json::<ApiMessage>()
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

    if status == StatusCode::FORBIDDEN {
        Err(Error::Forbidden(message))
    } else {
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl Backend for HttpBackend {
    fn login(&self, email: &str, password: &str, role: Role) -> Result<LoginResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            role,
        };
        let response = self.send(
            self.client.post(self.url("/api/auth/login")).json(&body),
            "POST",
            "/api/auth/login",
        )?;
        Ok(response.json()?)
    }

    fn register(&self, name: &str, email: &str, password: &str) -> Result<()> {
        let body = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: Role::Student,
        };
        self.send(
            self.client.post(self.url("/api/auth/register")).json(&body),
            "POST",
            "/api/auth/register",
        )?;
        Ok(())
    }

    fn list_reports(&self, token: &str) -> Result<Vec<Report>> {
        let response = self.send(
            self.client.get(self.url("/api/items")).bearer_auth(token),
            "GET",
            "/api/items",
        )?;
        Ok(response.json()?)
    }

    fn list_approved(&self, token: &str) -> Result<Vec<Report>> {
        let response = self.send(
            self.client
                .get(self.url("/api/items/approved"))
                .bearer_auth(token),
            "GET",
            "/api/items/approved",
        )?;
        Ok(response.json()?)
    }

    fn submit_report(&self, token: &str, draft: &ReportDraft) -> Result<Report> {
        let mut form = multipart::Form::new()
            .text("title", draft.title.clone())
            .text("description", draft.description.clone());
        if let Some(path) = &draft.image {
            form = form.file("image", path)?;
        }

        let response = self.send(
            self.client
                .post(self.url("/api/items"))
                .bearer_auth(token)
                .multipart(form),
            "POST",
            "/api/items",
        )?;
        Ok(response.json()?)
    }

    fn approve_report(&self, token: &str, report_id: &str) -> Result<()> {
        let path = format!("/api/items/{}", report_id);
        self.send(
            self.client.put(self.url(&path)).bearer_auth(token),
            "PUT",
            &path,
        )?;
        Ok(())
    }

    fn delete_report(&self, token: &str, report_id: &str) -> Result<()> {
        let path = format!("/api/items/{}", report_id);
        self.send(
            self.client.delete(self.url(&path)).bearer_auth(token),
            "DELETE",
            &path,
        )?;
        Ok(())
    }

    fn comments(&self, token: &str, report_id: &str) -> Result<Vec<Comment>> {
        let path = format!("/api/comments/{}", report_id);
        let response = self.send(
            self.client.get(self.url(&path)).bearer_auth(token),
            "GET",
            &path,
        )?;
        Ok(response.json()?)
    }

    fn post_comment(&self, token: &str, new_comment: &NewComment) -> Result<Comment> {
        let response = self.send(
            self.client
                .post(self.url("/api/comments"))
                .bearer_auth(token)
                .json(new_comment),
            "POST",
            "/api/comments",
        )?;
        Ok(response.json()?)
    }

    fn upload_url(&self, filename: &str) -> String {
        format!("{}/uploads/{}", self.base_url, filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let backend = HttpBackend::new("http://localhost:5000/").unwrap();
        assert_eq!(backend.base_url(), "http://localhost:5000");
        assert_eq!(
            backend.upload_url("bag.jpg"),
            "http://localhost:5000/uploads/bag.jpg"
        );
    }
}
