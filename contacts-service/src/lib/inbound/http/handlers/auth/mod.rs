pub mod login;
pub mod password_reset;
pub mod password_reset_confirm;
pub mod register;
pub mod verify_email;

pub use login::login;
pub use password_reset::password_reset;
pub use password_reset_confirm::password_reset_confirm;
pub use register::register;
pub use verify_email::verify_email;
