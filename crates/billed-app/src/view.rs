//! Typed view-model state held by the controllers.
//!
//! Each struct stands in for one interactive page region. Controllers
//! own these directly, resolved once at construction; the rendering
//! layer reads them back instead of being queried ad hoc.

use bytes::Bytes;

/// Default pixel width of the attachment modal.
pub const DEFAULT_MODAL_WIDTH: u32 = 800;

/// A file picked in the file input, as handed over by the rendering
/// layer.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// The file input element.
#[derive(Debug, Default)]
pub struct FileInput {
    selection: Option<SelectedFile>,
}

impl FileInput {
    pub fn select(&mut self, file: SelectedFile) {
        self.selection = Some(file);
    }

    pub fn clear(&mut self) {
        self.selection = None;
    }

    pub fn selection(&self) -> Option<&SelectedFile> {
        self.selection.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_none()
    }
}

/// Inline message region: the single validation/error feedback channel.
#[derive(Debug, Default)]
pub struct ErrorRegion {
    message: Option<String>,
}

impl ErrorRegion {
    pub fn set(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn clear(&mut self) {
        self.message = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }
}

/// The attachment image shown inside the modal.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentPreview {
    pub url: String,
    pub file_name: String,
    /// Explicit pixel width when the responsive layout pass is bypassed.
    pub width: Option<u32>,
}

/// Modal dialog holding the attachment preview.
#[derive(Debug)]
pub struct AttachmentModal {
    pub width: u32,
    visible: bool,
    preview: Option<AttachmentPreview>,
}

impl AttachmentModal {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            visible: false,
            preview: None,
        }
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn set_preview(&mut self, preview: Option<AttachmentPreview>) {
        self.preview = preview;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn preview(&self) -> Option<&AttachmentPreview> {
        self.preview.as_ref()
    }
}

impl Default for AttachmentModal {
    fn default() -> Self {
        Self::new(DEFAULT_MODAL_WIDTH)
    }
}

/// Raw values of the new-bill form fields, exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct NewBillForm {
    pub expense_type: String,
    pub name: String,
    pub date: String,
    pub amount: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}
