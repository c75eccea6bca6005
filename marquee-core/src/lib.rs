pub mod cache;
pub mod error;
pub mod header;
pub mod lifecycle;
pub mod menu;
pub mod model;
pub mod paths;
pub mod redirect;

pub use cache::{Clock, ManualClock, SystemClock, TtlCache};
pub use error::CoreError;
pub use lifecycle::{Generation, Ticket};
pub use model::{Block, MenuItem, MenuLinkType, PageRecord, PageStatus};
pub use paths::{build_page_paths, find_page_by_path};
pub use redirect::{RedirectRule, RedirectTarget, RedirectType, find_redirect};
