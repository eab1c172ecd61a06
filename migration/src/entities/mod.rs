pub mod url_entry;

pub use url_entry::Entity as UrlEntryEntity;
