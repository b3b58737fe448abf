pub mod bill;
pub mod format;
pub mod user;

pub use bill::{Bill, BillStatus, CreateBill};
pub use format::{format_date, format_status, FormatError};
pub use user::SessionUser;
