pub mod price_service;
pub mod transaction_classifier;
pub mod unit_converter;
pub mod valuation_service;

pub use price_service::PriceService;
pub use transaction_classifier::TransactionClassifier;
pub use unit_converter::UnitConverter;
pub use valuation_service::ValuationService;
