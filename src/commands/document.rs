//! Documents: listing and mock upload.
//!
//! An upload only records metadata. No bytes are read or kept and every
//! document points at the placeholder URL.

use super::{App, Output, json, short_time};
use crate::models::{Document, PLACEHOLDER_URL, file_extension};
use crate::notify::Notification;
use crate::routes::Route;
use crate::store::ids::DOCUMENT_PREFIX;
use crate::{Error, Result};
use serde::Serialize;
use std::path::Path;

/// A file selected for upload.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub project_id: String,
    pub name: String,
    pub size: u64,
    /// Explicit type; inferred from the name's extension when absent
    pub doc_type: Option<String>,
}

impl UploadRequest {
    /// Describe a file on disk using its metadata only.
    pub fn from_path(path: &Path, project_id: &str) -> Result<Self> {
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(Error::InvalidInput(format!(
                "Not a file: {}",
                path.display()
            )));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::InvalidInput(format!("No file name in {}", path.display())))?;
        Ok(Self {
            project_id: project_id.to_string(),
            name,
            size: metadata.len(),
            doc_type: None,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentRow {
    #[serde(flatten)]
    pub document: Document,
    pub project_name: String,
    pub uploader_name: String,
    pub human_size: String,
}

#[derive(Debug, Serialize)]
pub struct DocumentList {
    pub documents: Vec<DocumentRow>,
    pub count: usize,
}

impl Output for DocumentList {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.documents.is_empty() {
            return "No documents.".to_string();
        }
        let mut lines = vec![format!("{} document(s):", self.count)];
        for row in &self.documents {
            lines.push(format!(
                "  {} [{}] {} - {} - uploaded by {} on {} ({})",
                row.document.id,
                row.document.doc_type,
                row.document.name,
                row.human_size,
                row.uploader_name,
                short_time(&row.document.uploaded_at),
                row.project_name
            ));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentUploaded {
    pub document: Document,
    pub human_size: String,
}

impl Output for DocumentUploaded {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Uploaded {} \"{}\" ({}) to project {}",
            self.document.id, self.document.name, self.human_size, self.document.project_id
        )
    }
}

impl App {
    pub fn doc_list(&self, project_id: Option<&str>) -> Result<DocumentList> {
        self.guard(&Route::Documents)?;
        let projects = self.project_names()?;
        let users = self.user_names()?;
        let documents: Vec<DocumentRow> = self
            .store
            .list_documents(project_id)?
            .into_iter()
            .map(|document| DocumentRow {
                project_name: projects.get(&document.project_id).cloned().unwrap_or_default(),
                uploader_name: users
                    .get(&document.uploaded_by)
                    .cloned()
                    .unwrap_or_else(|| document.uploaded_by.clone()),
                human_size: document.human_size(),
                document,
            })
            .collect();
        Ok(DocumentList {
            count: documents.len(),
            documents,
        })
    }

    /// Record a mock upload by the session user.
    pub fn doc_upload(&mut self, request: &UploadRequest) -> Result<DocumentUploaded> {
        self.guard(&Route::Documents)?;
        if request.name.is_empty() {
            return Err(Error::InvalidInput("File name is required".to_string()));
        }
        if !self.store.project_exists(&request.project_id)? {
            return Err(Error::NotFound(format!(
                "Project not found: {}",
                request.project_id
            )));
        }

        let doc_type = match request.doc_type.as_deref() {
            Some(t) if !t.is_empty() => t.to_lowercase(),
            _ => file_extension(&request.name),
        };
        let document = Document {
            id: self.next_id(DOCUMENT_PREFIX),
            project_id: request.project_id.clone(),
            name: request.name.clone(),
            doc_type,
            url: PLACEHOLDER_URL.to_string(),
            uploaded_by: self.user_id(),
            uploaded_at: self.now(),
            size: request.size,
        };
        self.store.add_document(&document)?;

        tracing::info!(id = %document.id, name = %document.name, size = document.size, "document uploaded");
        self.notify(Notification::info(
            "File Uploaded",
            format!("\"{}\" has been added to the documents.", document.name),
        ));
        Ok(DocumentUploaded {
            human_size: document.human_size(),
            document,
        })
    }
}
