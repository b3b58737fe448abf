use std::sync::Arc;

use billed_core::bill::Bill;
use billed_core::format::{format_date, format_status};
use billed_store::{Store, StoreError};
use chrono::NaiveDate;
use tracing::warn;

use crate::navigation::{Navigator, Route};
use crate::view::{AttachmentModal, AttachmentPreview, ErrorRegion};

/// One bill plus its display labels.
#[derive(Debug, Clone)]
pub struct BillRow {
    pub bill: Bill,
    pub date_label: String,
    pub status_label: String,
}

/// Controller for the bill-listing page: bridges the store and the
/// rendered list, and handles the page's two UI triggers.
pub struct BillsController {
    store: Option<Arc<dyn Store>>,
    navigator: Arc<dyn Navigator>,
    modal: AttachmentModal,
}

impl BillsController {
    pub fn new(store: Option<Arc<dyn Store>>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            store,
            navigator,
            modal: AttachmentModal::default(),
        }
    }

    /// "New bill" action element.
    pub fn handle_click_new_bill(&self) {
        self.navigator.navigate(Route::NewBill);
    }

    /// Per-row "view attachment" action element. `attachment_url` is the
    /// URL carried by the trigger's associated data, if any; when absent
    /// the modal opens with an empty preview region.
    pub fn handle_click_icon_eye(&mut self, attachment_url: Option<&str>) {
        let preview = attachment_url.map(|url| AttachmentPreview {
            url: url.to_string(),
            file_name: file_name_from_url(url),
            // Without a store there is no responsive layout pass over the
            // preview, so the width is pinned to half the modal instead.
            width: self.store.is_none().then_some(self.modal.width / 2),
        });
        self.modal.set_preview(preview);
        self.modal.show();
    }

    /// Fetch the bills and attach display labels.
    ///
    /// One malformed record never drops the page: it keeps its raw date
    /// and status, the failure is only logged, and every other record is
    /// unaffected. A store failure propagates unmodified.
    pub async fn get_bills(&self) -> Result<Vec<BillRow>, StoreError> {
        let store = match &self.store {
            Some(store) => store,
            None => return Ok(Vec::new()),
        };
        let bills = store.list_bills().await?;
        let rows = bills
            .into_iter()
            .map(|bill| match format_date(&bill.date) {
                Ok(date_label) => BillRow {
                    date_label,
                    status_label: format_status(&bill.status),
                    bill,
                },
                Err(e) => {
                    warn!("could not format date for bill {}: {e}", bill.id);
                    BillRow {
                        date_label: bill.date.clone(),
                        status_label: bill.status.clone(),
                        bill,
                    }
                }
            })
            .collect();
        Ok(rows)
    }

    pub fn modal(&self) -> &AttachmentModal {
        &self.modal
    }
}

/// Last path segment of an attachment URL, query stripped.
pub fn file_name_from_url(url: &str) -> String {
    let path = url.split(['?', ';']).next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or(path).to_string()
}

/// Display-layer wrapper around the listing controller: owns the fetched
/// rows and the page error region.
pub struct BillsPage {
    controller: BillsController,
    rows: Vec<BillRow>,
    error: ErrorRegion,
}

impl BillsPage {
    pub fn new(controller: BillsController) -> Self {
        Self {
            controller,
            rows: Vec::new(),
            error: ErrorRegion::default(),
        }
    }

    /// Reload the listing. Rows come out anti-chronologically ordered by
    /// calendar date (unparseable dates last); a store failure lands
    /// verbatim in the error region instead of aborting the page.
    pub async fn refresh(&mut self) {
        match self.controller.get_bills().await {
            Ok(mut rows) => {
                rows.sort_by(|a, b| sort_key(&b.bill.date).cmp(&sort_key(&a.bill.date)));
                self.rows = rows;
                self.error.clear();
            }
            Err(e) => self.error.set(e.to_string()),
        }
    }

    pub fn rows(&self) -> &[BillRow] {
        &self.rows
    }

    pub fn error(&self) -> &ErrorRegion {
        &self.error
    }

    pub fn title(&self) -> &'static str {
        Route::Bills.title()
    }

    pub fn controller(&self) -> &BillsController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut BillsController {
        &mut self.controller
    }
}

fn sort_key(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}
