use std::sync::Arc;

use billed_core::bill::{BillStatus, CreateBill};
use billed_core::user::SessionUser;
use billed_store::{NewAttachment, Store};
use tracing::{info, warn};

use crate::navigation::{Navigator, Route};
use crate::session::{current_user, SessionError, SessionReader};
use crate::view::{ErrorRegion, FileInput, NewBillForm, SelectedFile};

/// Extensions accepted for bill attachments.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Inline message shown when a file with another extension is selected.
pub const INVALID_FILE_MESSAGE: &str =
    "Invalid file format. Please select a JPG, JPEG, or PNG file";

// Percentage applied when the form field is left empty.
const DEFAULT_PCT: u32 = 20;

/// A successfully uploaded attachment, kept until the form is submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedAttachment {
    pub file_url: String,
    pub file_name: String,
    pub key: String,
}

/// Controller for the new-bill page: validates the attachment, uploads
/// it, persists the bill and navigates back to the listing.
pub struct NewBillController {
    store: Arc<dyn Store>,
    navigator: Arc<dyn Navigator>,
    user: SessionUser,
    form: NewBillForm,
    file_input: FileInput,
    message: ErrorRegion,
    attachment: Option<UploadedAttachment>,
}

impl NewBillController {
    /// The session user is read once, here.
    pub fn new(
        store: Arc<dyn Store>,
        navigator: Arc<dyn Navigator>,
        session: &dyn SessionReader,
    ) -> Result<Self, SessionError> {
        let user = current_user(session)?;
        Ok(Self {
            store,
            navigator,
            user,
            form: NewBillForm::default(),
            file_input: FileInput::default(),
            message: ErrorRegion::default(),
            attachment: None,
        })
    }

    /// File-input change handler: validate the extension, then upload.
    ///
    /// An invalid file never stays pending: the input is cleared and the
    /// inline message set. An upload failure is logged and the previous
    /// attachment, if any, stays as last-known-good.
    pub async fn handle_file_selected(&mut self, file: SelectedFile) {
        if !has_allowed_extension(&file.name) {
            self.file_input.clear();
            self.message.set(INVALID_FILE_MESSAGE);
            return;
        }
        self.message.clear();
        self.file_input.select(file.clone());

        let upload = NewAttachment {
            file_name: file.name.clone(),
            content_type: file.content_type,
            email: self.user.email.clone(),
            data: file.data,
        };
        match self.store.create_attachment(upload).await {
            Ok(receipt) => {
                info!("stored attachment {} as {}", file.name, receipt.key);
                self.attachment = Some(UploadedAttachment {
                    file_url: receipt.file_url,
                    file_name: file.name,
                    key: receipt.key,
                });
            }
            Err(e) => warn!("attachment upload failed: {e}"),
        }
    }

    /// Form-submit handler. Navigates to the listing whatever the store
    /// answers to the creation call.
    pub async fn handle_submit(&mut self) {
        let bill = self.build_bill();
        if let Err(e) = self.store.create_bill(&bill).await {
            warn!("bill creation failed: {e}");
        }
        self.navigator.navigate(Route::Bills);
    }

    fn build_bill(&self) -> CreateBill {
        let form = &self.form;
        let commentary = form.commentary.trim();
        CreateBill {
            email: self.user.email.clone(),
            expense_type: form.expense_type.clone(),
            name: form.name.clone(),
            date: form.date.clone(),
            amount: form.amount.trim().parse().unwrap_or(0.0),
            vat: form.vat.trim().parse().ok(),
            pct: form.pct.trim().parse().unwrap_or(DEFAULT_PCT),
            commentary: (!commentary.is_empty()).then(|| commentary.to_string()),
            status: BillStatus::Pending,
            file_url: self.attachment.as_ref().map(|a| a.file_url.clone()),
            file_name: self.attachment.as_ref().map(|a| a.file_name.clone()),
        }
    }

    pub fn form(&self) -> &NewBillForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut NewBillForm {
        &mut self.form
    }

    pub fn file_input(&self) -> &FileInput {
        &self.file_input
    }

    pub fn message(&self) -> &ErrorRegion {
        &self.message
    }

    pub fn attachment(&self) -> Option<&UploadedAttachment> {
        self.attachment.as_ref()
    }
}

/// Extension check on the filename string only, case-insensitive.
pub fn has_allowed_extension(name: &str) -> bool {
    let lower = name.to_lowercase();
    ALLOWED_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use billed_store::{MockStore, StoreError};
    use bytes::Bytes;

    use crate::navigation::RecordingNavigator;
    use crate::session::MemorySession;

    fn selected(name: &str) -> SelectedFile {
        SelectedFile {
            name: name.to_string(),
            content_type: "image/png".to_string(),
            data: Bytes::from_static(b"bytes"),
        }
    }

    fn controller(store: Arc<MockStore>) -> (NewBillController, Arc<RecordingNavigator>) {
        let navigator = Arc::new(RecordingNavigator::new());
        let session = MemorySession::with_user("Employee", "employee@test.tld");
        let controller = NewBillController::new(store, navigator.clone(), &session).unwrap();
        (controller, navigator)
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(has_allowed_extension("image.jpg"));
        assert!(has_allowed_extension("image.JPEG"));
        assert!(has_allowed_extension("IMAGE.PNG"));
        assert!(!has_allowed_extension("image.pdf"));
        assert!(!has_allowed_extension("image.gif"));
        assert!(!has_allowed_extension("image"));
        assert!(!has_allowed_extension("imagepng"));
    }

    #[test]
    fn construction_fails_without_a_session_user() {
        let store: Arc<dyn Store> = Arc::new(MockStore::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let session = MemorySession::new();
        assert!(matches!(
            NewBillController::new(store, navigator, &session),
            Err(SessionError::Missing)
        ));
    }

    #[tokio::test]
    async fn invalid_extension_clears_the_input_and_uploads_nothing() {
        let store = Arc::new(MockStore::new());
        let (mut controller, _) = controller(store.clone());

        controller.handle_file_selected(selected("facture.pdf")).await;
        assert!(controller.file_input().is_empty());
        assert_eq!(controller.message().message(), Some(INVALID_FILE_MESSAGE));
        assert!(store.uploads().is_empty());
        assert!(controller.attachment().is_none());
    }

    #[tokio::test]
    async fn valid_file_uploads_with_the_session_email() {
        let store = Arc::new(MockStore::new());
        let (mut controller, _) = controller(store.clone());

        controller.handle_file_selected(selected("image.png")).await;
        assert!(!controller.file_input().is_empty());
        assert!(!controller.message().is_visible());

        let uploads = store.uploads();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].email, "employee@test.tld");

        let attachment = controller.attachment().unwrap();
        assert_eq!(attachment.file_name, "image.png");
        assert!(attachment.file_url.ends_with("/image.png"));
    }

    #[tokio::test]
    async fn reselecting_a_valid_file_clears_the_previous_message() {
        let store = Arc::new(MockStore::new());
        let (mut controller, _) = controller(store);

        controller.handle_file_selected(selected("facture.pdf")).await;
        assert!(controller.message().is_visible());

        controller.handle_file_selected(selected("facture.jpeg")).await;
        assert!(!controller.message().is_visible());
    }

    #[tokio::test]
    async fn upload_failure_keeps_the_last_known_good_attachment() {
        let store = Arc::new(MockStore::new());
        let (mut controller, _) = controller(store);

        controller.handle_file_selected(selected("first.png")).await;
        let first = controller.attachment().cloned().unwrap();

        // Swap in a failing store to simulate the second upload dying.
        let failing: Arc<dyn Store> = Arc::new(
            MockStore::new().with_attachment_failure(StoreError::Internal("Erreur 500".into())),
        );
        controller.store = failing;
        controller.handle_file_selected(selected("second.png")).await;

        assert_eq!(controller.attachment(), Some(&first));
    }

    #[tokio::test]
    async fn submit_builds_a_pending_bill_and_navigates() {
        let store = Arc::new(MockStore::new());
        let (mut controller, navigator) = controller(store.clone());

        controller.handle_file_selected(selected("image.png")).await;
        {
            let form = controller.form_mut();
            form.expense_type = "Transports".into();
            form.name = "vol".into();
            form.date = "2022-08-22".into();
            form.amount = "300".into();
            form.vat = "40".into();
            form.pct = "50".into();
            form.commentary = "Some comment".into();
        }
        controller.handle_submit().await;

        let created = store.created_bills();
        assert_eq!(created.len(), 1);
        let bill = &created[0];
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.email, "employee@test.tld");
        assert_eq!(bill.amount, 300.0);
        assert_eq!(bill.vat, Some(40.0));
        assert_eq!(bill.pct, 50);
        assert_eq!(bill.file_name.as_deref(), Some("image.png"));
        assert_eq!(navigator.last(), Some(Route::Bills));
    }

    #[tokio::test]
    async fn submit_defaults_the_lenient_numeric_fields() {
        let store = Arc::new(MockStore::new());
        let (mut controller, _) = controller(store.clone());

        {
            let form = controller.form_mut();
            form.expense_type = "Restaurants et bars".into();
            form.name = "déjeuner".into();
            form.date = "2022-08-22".into();
            form.amount = "not a number".into();
        }
        controller.handle_submit().await;

        let bill = &store.created_bills()[0];
        assert_eq!(bill.amount, 0.0);
        assert!(bill.vat.is_none());
        assert_eq!(bill.pct, 20);
        assert!(bill.commentary.is_none());
    }

    #[tokio::test]
    async fn submit_navigates_even_when_the_store_fails() {
        let store = Arc::new(
            MockStore::new().with_bill_failure(StoreError::Internal("Erreur 500".into())),
        );
        let (mut controller, navigator) = controller(store);

        controller.handle_submit().await;
        assert_eq!(navigator.last(), Some(Route::Bills));
    }
}
