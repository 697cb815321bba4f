pub mod me;
pub mod update_avatar;

pub use me::me;
pub use update_avatar::update_avatar;
