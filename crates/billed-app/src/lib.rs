pub mod bills;
pub mod navigation;
pub mod new_bill;
pub mod session;
pub mod view;

pub use bills::{BillRow, BillsController, BillsPage};
pub use navigation::{Navigator, RecordingNavigator, Route};
pub use new_bill::NewBillController;
pub use session::{MemorySession, SessionError, SessionReader};
