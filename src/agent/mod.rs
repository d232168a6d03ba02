pub mod interface;
pub mod llm_service;
pub mod stateless_llm_factory;

pub mod stateless_llm;

pub use interface::*;
pub use llm_service::*;
pub use stateless_llm_factory::*;
pub use stateless_llm::*;
