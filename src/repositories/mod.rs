mod http_contact_store;
mod traits;

pub use http_contact_store::HttpContactStore;
pub use traits::ContactStore;
