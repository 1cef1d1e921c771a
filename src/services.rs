pub mod conta_service;
pub use conta_service::ContaService;
pub mod fornecedor_service;
pub use fornecedor_service::FornecedorService;
