use crate::errors::ApiError;
use crate::models::{ErrorBody, Fast, GoalsUpdate, HistoryPage, StartRequest, WeeklyStats};
use reqwest::{Client, Response};
use std::env;

pub fn resolve_base_url() -> String {
    env::var("FASTING_API_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string())
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    page_size: Option<u32>,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            page_size: None,
            http: Client::new(),
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn active_fast(&self) -> Result<Option<Fast>, ApiError> {
        let response = self
            .http
            .get(format!("{}/api/fast/active", self.base_url))
            .send()
            .await?;
        let response = check(response).await?;
        Ok(response.json().await?)
    }

    pub async fn start_fast(&self, target_hours: u32) -> Result<Fast, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/fast/start", self.base_url))
            .json(&StartRequest { target_hours })
            .send()
            .await?;
        let response = check(response).await?;
        Ok(response.json().await?)
    }

    pub async fn stop_fast(&self) -> Result<Fast, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/fast/stop", self.base_url))
            .send()
            .await?;
        let response = check(response).await?;
        Ok(response.json().await?)
    }

    pub async fn weekly_stats(&self) -> Result<WeeklyStats, ApiError> {
        let response = self
            .http
            .get(format!("{}/api/stats/weekly", self.base_url))
            .send()
            .await?;
        let response = check(response).await?;
        Ok(response.json().await?)
    }

    pub async fn history(&self, page: u32) -> Result<HistoryPage, ApiError> {
        let mut url = format!("{}/api/fast/history?page={page}", self.base_url);
        if let Some(per_page) = self.page_size {
            url.push_str(&format!("&per_page={per_page}"));
        }
        let response = self.http.get(url).send().await?;
        let response = check(response).await?;
        Ok(response.json().await?)
    }

    pub async fn delete_fast(&self, id: u64) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(format!("{}/api/fast/{id}", self.base_url))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    pub async fn update_goals(&self, goals: &GoalsUpdate) -> Result<(), ApiError> {
        let response = self
            .http
            .put(format!("{}/api/user/goals", self.base_url))
            .json(goals)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(body) => body.error,
        Err(_) => format!("request failed with status {status}"),
    };
    Err(ApiError::server(status, message))
}
