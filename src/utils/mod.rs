pub mod phone;

pub use phone::{PhoneLocale, PhoneNumber, PhoneValidator};
