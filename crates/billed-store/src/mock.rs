use std::sync::Mutex;

use async_trait::async_trait;
use billed_core::bill::{Bill, CreateBill};
use uuid::Uuid;

use crate::{AttachmentReceipt, NewAttachment, Store, StoreError};

/// An in-memory `Store` for tests: serves fixture bills, records every
/// write, and returns configurable failures.
#[derive(Default)]
pub struct MockStore {
    bills: Vec<Bill>,
    list_failure: Option<StoreError>,
    attachment_failure: Option<StoreError>,
    bill_failure: Option<StoreError>,
    uploads: Mutex<Vec<NewAttachment>>,
    created: Mutex<Vec<CreateBill>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bills(mut self, bills: Vec<Bill>) -> Self {
        self.bills = bills;
        self
    }

    pub fn with_list_failure(mut self, err: StoreError) -> Self {
        self.list_failure = Some(err);
        self
    }

    pub fn with_attachment_failure(mut self, err: StoreError) -> Self {
        self.attachment_failure = Some(err);
        self
    }

    pub fn with_bill_failure(mut self, err: StoreError) -> Self {
        self.bill_failure = Some(err);
        self
    }

    /// Attachments received so far.
    pub fn uploads(&self) -> Vec<NewAttachment> {
        self.uploads.lock().unwrap().clone()
    }

    /// Bill payloads received so far.
    pub fn created_bills(&self) -> Vec<CreateBill> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl Store for MockStore {
    async fn list_bills(&self) -> Result<Vec<Bill>, StoreError> {
        if let Some(err) = &self.list_failure {
            return Err(err.clone());
        }
        Ok(self.bills.clone())
    }

    async fn create_attachment(
        &self,
        input: NewAttachment,
    ) -> Result<AttachmentReceipt, StoreError> {
        if let Some(err) = &self.attachment_failure {
            return Err(err.clone());
        }
        let key = Uuid::new_v4().to_string();
        let receipt = AttachmentReceipt {
            file_url: format!("https://test.storage.tld/{key}/{}", input.file_name),
            key,
        };
        self.uploads.lock().unwrap().push(input);
        Ok(receipt)
    }

    async fn create_bill(&self, input: &CreateBill) -> Result<Bill, StoreError> {
        if let Some(err) = &self.bill_failure {
            return Err(err.clone());
        }
        let bill = Bill {
            id: Uuid::new_v4().to_string(),
            email: input.email.clone(),
            expense_type: input.expense_type.clone(),
            name: input.name.clone(),
            date: input.date.clone(),
            amount: input.amount,
            vat: input.vat,
            pct: Some(input.pct),
            commentary: input.commentary.clone(),
            status: input.status.as_str().to_string(),
            file_url: input.file_url.clone(),
            file_name: input.file_name.clone(),
        };
        self.created.lock().unwrap().push(input.clone());
        Ok(bill)
    }
}
