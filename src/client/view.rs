//! Terminal rendering for the article client.
//!
//! All state lives in [`UiState`]. Server responses are folded in with
//! [`UiState::apply`], and [`render`] turns a state into text without side
//! effects. The success/failure banner is transient: [`UiState::after_render`]
//! drops it once it has been shown.

use std::fmt::{self, Write as _};

use crate::article::model::{ArticleRequest, ArticleResponse};
use crate::client::api::ClientError;

pub const BACKEND_UNREACHABLE: &str = "Cannot connect to backend service";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Failure { status: Option<u16>, message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Last successful list response, newest first.
    pub articles: Vec<ArticleResponse>,
    /// Article selected for editing.
    pub editing: Option<ArticleResponse>,
    /// Article opened with `show`, displayed once.
    pub viewing: Option<ArticleResponse>,
    pub banner: Option<Banner>,
    /// Connectivity warning, kept until a list call succeeds again.
    pub warning: Option<String>,
}

/// A server response the UI reacts to.
#[derive(Debug)]
pub enum Outcome {
    Listed(Result<Vec<ArticleResponse>, ClientError>),
    Shown(Result<ArticleResponse, ClientError>),
    Selected(Result<ArticleResponse, ClientError>),
    Created(Result<String, ClientError>),
    Updated(Result<(), ClientError>),
    Deleted {
        id: String,
        result: Result<(), ClientError>,
    },
    EditCancelled,
    /// A form was submitted with a blank field and never sent.
    Incomplete,
}

impl UiState {
    pub fn apply(mut self, outcome: Outcome) -> UiState {
        match outcome {
            Outcome::Listed(Ok(articles)) => {
                self.articles = articles;
                self.warning = None;
            }
            Outcome::Listed(Err(err)) => {
                if err.is_unreachable() {
                    self.warning = Some(BACKEND_UNREACHABLE.to_string());
                }
                self.articles.clear();
            }
            Outcome::Shown(Ok(article)) => self.viewing = Some(article),
            Outcome::Selected(Ok(article)) => self.editing = Some(article),
            Outcome::Created(Ok(_)) => {
                self.banner = Some(Banner::Success("Article published successfully!".into()));
            }
            Outcome::Updated(Ok(())) => {
                self.editing = None;
                self.banner = Some(Banner::Success("Article updated successfully!".into()));
            }
            Outcome::Deleted { id, result: Ok(()) } => {
                if self.editing.as_ref().is_some_and(|a| a.id == id) {
                    self.editing = None;
                }
                self.banner = Some(Banner::Success("Article deleted successfully!".into()));
            }
            Outcome::Shown(Err(err))
            | Outcome::Selected(Err(err))
            | Outcome::Created(Err(err))
            | Outcome::Updated(Err(err))
            | Outcome::Deleted { result: Err(err), .. } => self.fail(err),
            Outcome::EditCancelled => self.editing = None,
            Outcome::Incomplete => {
                self.banner = Some(Banner::Failure {
                    status: None,
                    message: "Title, author and content are all required".into(),
                });
            }
        }
        self
    }

    fn fail(&mut self, err: ClientError) {
        if err.is_unreachable() {
            self.warning = Some(BACKEND_UNREACHABLE.to_string());
        }
        self.banner = Some(match err {
            ClientError::Rejected { status, message } => Banner::Failure {
                status: Some(status),
                message,
            },
            other => Banner::Failure {
                status: None,
                message: other.to_string(),
            },
        });
    }

    /// Drops everything that is only shown once.
    pub fn after_render(mut self) -> UiState {
        self.banner = None;
        self.viewing = None;
        self
    }
}

/// Entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Refresh,
    Show,
    Publish,
    Edit,
    Save,
    CancelEdit,
    Delete,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Refresh => "Refresh articles",
            Action::Show => "Read an article",
            Action::Publish => "Publish new article",
            Action::Edit => "Edit an article",
            Action::Save => "Save changes",
            Action::CancelEdit => "Cancel editing",
            Action::Delete => "Delete an article",
            Action::Quit => "Quit",
        })
    }
}

/// Menu entries that make sense for the current state.
pub fn menu(state: &UiState) -> Vec<Action> {
    let mut actions = vec![Action::Refresh, Action::Publish];
    if !state.articles.is_empty() {
        actions.extend([Action::Show, Action::Edit, Action::Delete]);
    }
    if state.editing.is_some() {
        actions.extend([Action::Save, Action::CancelEdit]);
    }
    actions.push(Action::Quit);
    actions
}

/// One picker line per listed article, in list order.
pub fn article_choices(state: &UiState) -> Vec<String> {
    state
        .articles
        .iter()
        .map(|a| format!("{} by {} ({})", a.title, a.author, date_part(&a.created_at)))
        .collect()
}

/// Form field check; blank input is refused before anything is sent.
pub fn require_text(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        Err("This field is required")
    } else {
        Ok(())
    }
}

/// Builds a request body only when every field has text.
pub fn form_draft(title: &str, author: &str, content: &str) -> Option<ArticleRequest> {
    if [title, author, content].iter().any(|f| f.trim().is_empty()) {
        return None;
    }
    Some(ArticleRequest {
        title: Some(title.to_string()),
        author: Some(author.to_string()),
        content: Some(content.to_string()),
    })
}

pub fn render(state: &UiState) -> String {
    let mut out = String::from("=== Article Management System ===\n");

    if let Some(warning) = &state.warning {
        let _ = writeln!(out, "!! {}", warning);
    }
    match &state.banner {
        Some(Banner::Success(message)) => {
            let _ = writeln!(out, "[ok] {}", message);
        }
        Some(Banner::Failure {
            status: Some(status),
            message,
        }) => {
            let _ = writeln!(out, "[failed] status {}: {}", status, message);
        }
        Some(Banner::Failure {
            status: None,
            message,
        }) => {
            let _ = writeln!(out, "[failed] {}", message);
        }
        None => {}
    }
    if let Some(article) = &state.editing {
        let _ = writeln!(out, "Editing: {} ({})", article.title, article.id);
    }
    if let Some(article) = &state.viewing {
        out.push('\n');
        out.push_str(&render_article(None, article));
    }

    out.push_str("\n--- Published Articles ---\n");
    if state.articles.is_empty() {
        out.push_str("No articles published yet. Be the first to publish!\n");
    }
    for (i, article) in state.articles.iter().enumerate() {
        out.push_str(&render_article(Some(i + 1), article));
    }
    out
}

pub fn render_article(position: Option<usize>, article: &ArticleResponse) -> String {
    let mut out = String::new();
    match position {
        Some(n) => {
            let _ = writeln!(out, "[{}] {}", n, article.title);
        }
        None => {
            let _ = writeln!(out, "{}", article.title);
        }
    }
    let _ = writeln!(out, "    By: {}", article.author);
    let _ = writeln!(out, "    Published: {}", date_part(&article.created_at));
    if let Some(updated_at) = &article.updated_at {
        let _ = writeln!(out, "    Updated: {}", date_part(updated_at));
    }
    for line in article.content.lines() {
        let _ = writeln!(out, "    {}", line);
    }
    let _ = writeln!(out, "    id: {}", article.id);
    out
}

fn date_part(timestamp: &str) -> &str {
    timestamp.get(..10).unwrap_or(timestamp)
}
