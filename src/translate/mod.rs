pub mod cache;
pub mod factory;
pub mod google;
pub mod interface;
pub mod languages;
pub mod libretranslate;
pub mod service;

pub use cache::{CacheKey, CacheStats, TranslationCache};
pub use factory::TranslatorFactory;
pub use interface::TranslatorInterface;
pub use service::{TranslationService, UNDETERMINED_LANGUAGE};
