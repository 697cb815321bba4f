pub mod create_contact;
pub mod delete_contact;
pub mod get_contact;
pub mod list_contacts;
pub mod update_contact;

pub use create_contact::create_contact;
pub use delete_contact::delete_contact;
pub use get_contact::get_contact;
pub use list_contacts::list_contacts;
pub use update_contact::update_contact;
