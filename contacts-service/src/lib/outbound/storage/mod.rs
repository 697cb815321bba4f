pub mod local;

pub use local::LocalAvatarStorage;
