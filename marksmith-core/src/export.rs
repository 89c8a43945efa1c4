use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::app::App;
use crate::model::{Document, Selection};

/// Editor state dump for the "Print State" command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateExport<'a> {
    pub session: Uuid,
    pub title: &'a str,
    pub exported_at: DateTime<Utc>,
    pub revision: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<Selection>,
    pub document: &'a Document,
}

impl<'a> StateExport<'a> {
    pub fn from_app(app: &'a App) -> Self {
        Self {
            session: app.session.id,
            title: &app.session.title,
            exported_at: Utc::now(),
            revision: app.editor.revision(),
            selection: app.editor.selection(),
            document: app.editor.document(),
        }
    }
}

pub fn to_json(app: &App) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&StateExport::from_app(app))
}
