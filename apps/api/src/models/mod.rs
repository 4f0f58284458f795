pub mod caption;
pub mod localization;
pub mod style;
