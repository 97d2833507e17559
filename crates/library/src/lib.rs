//! Libris library management
//!
//! The [`LibraryStore`] keeps the book collection in a JSON file and
//! [`LibrisApi`] wraps it together with the UI settings into the set of
//! operations the front-end calls.

pub mod api;
pub mod content;
pub mod dialogs;
pub mod error;
pub mod fonts;
pub mod scanner;
pub mod store;

pub use api::{ApiOptions, LibrisApi};
pub use content::read_data_uri;
pub use dialogs::{DialogFilter, DialogRequest, FileDialogs};
pub use error::{LibraryError, LibraryResult};
pub use fonts::{list_fonts_in, list_system_fonts};
pub use scanner::{DiscoveredFile, EbookScanner};
pub use store::LibraryStore;
