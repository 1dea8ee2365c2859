//! Remote data source abstraction

use async_trait::async_trait;
use octoscope_core::{Account, LanguageUsage, OctoscopeError, Project, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// The API calls one search cycle needs (allows mocking in tests)
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// `GET /users/{account}`
    async fn fetch_account(&self, account: &str) -> Result<Account>;

    /// `GET /users/{account}/repos`, one page, most recently updated first
    async fn fetch_project_page(&self, account: &str, page: u32) -> Result<Vec<Project>>;

    /// `GET /repos/{owner}/{project}/languages`
    async fn fetch_languages(&self, owner: &str, project: &str) -> Result<LanguageUsage>;
}

/// In-memory source for testing
///
/// Projects are served in pages of `page_size`. A project without a language
/// entry answers its language request with an HTTP 500.
#[derive(Clone)]
pub struct MockProfileSource {
    account: Option<Account>,
    projects: Vec<Project>,
    page_size: usize,
    languages: HashMap<String, LanguageUsage>,
    page_requests: Arc<Mutex<Vec<u32>>>,
    language_requests: Arc<Mutex<Vec<String>>>,
}

impl Default for MockProfileSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProfileSource {
    pub fn new() -> Self {
        Self {
            account: None,
            projects: Vec::new(),
            page_size: crate::PAGE_SIZE,
            languages: HashMap::new(),
            page_requests: Arc::new(Mutex::new(Vec::new())),
            language_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_account(mut self, account: Account) -> Self {
        self.account = Some(account);
        self
    }

    pub fn with_projects(mut self, projects: Vec<Project>) -> Self {
        self.projects = projects;
        self
    }

    pub fn with_languages(mut self, project: &str, languages: LanguageUsage) -> Self {
        self.languages.insert(project.to_string(), languages);
        self
    }

    /// Page numbers requested so far, in order
    pub fn page_requests(&self) -> Vec<u32> {
        self.page_requests
            .lock()
            .map(|pages| pages.clone())
            .unwrap_or_default()
    }

    /// Project names whose languages were requested so far
    pub fn language_requests(&self) -> Vec<String> {
        self.language_requests
            .lock()
            .map(|names| names.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ProfileSource for MockProfileSource {
    async fn fetch_account(&self, account: &str) -> Result<Account> {
        self.account
            .clone()
            .filter(|a| a.login == account)
            .ok_or_else(|| OctoscopeError::NotFound(format!("/users/{}", account)))
    }

    async fn fetch_project_page(&self, account: &str, page: u32) -> Result<Vec<Project>> {
        if let Ok(mut pages) = self.page_requests.lock() {
            pages.push(page);
        }
        if self.account.as_ref().map(|a| a.login.as_str()) != Some(account) {
            return Err(OctoscopeError::NotFound(format!("/users/{}/repos", account)));
        }

        let start = (page.saturating_sub(1) as usize) * self.page_size;
        Ok(self
            .projects
            .iter()
            .skip(start)
            .take(self.page_size)
            .cloned()
            .collect())
    }

    async fn fetch_languages(&self, _owner: &str, project: &str) -> Result<LanguageUsage> {
        if let Ok(mut names) = self.language_requests.lock() {
            names.push(project.to_string());
        }
        self.languages
            .get(project)
            .cloned()
            .ok_or(OctoscopeError::Http { status: 500 })
    }
}
