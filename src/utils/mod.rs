pub mod address_validator;
pub mod explorer;
pub mod string_utils;
pub mod time_utils;

// Re-export commonly used functions
pub use address_validator::AddressValidator;
pub use explorer::transaction_url;
pub use string_utils::is_amount;
pub use time_utils::format_display_date;
