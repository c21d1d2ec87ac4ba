pub mod listing_service;
pub mod upload_service;
