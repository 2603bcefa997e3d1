pub mod handle;
pub mod loader;
pub mod store;

pub use handle::CatalogHandle;
pub use loader::{OPTIONAL_COLUMNS, REQUIRED_COLUMNS};
pub use store::{CatalogStore, MIN_TITLE_LEN};
