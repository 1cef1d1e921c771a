pub mod repository;
pub use repository::{ContaRepository, FornecedorRepository};
pub mod conta_repo;
pub use conta_repo::PgContaRepository;
pub mod fornecedor_repo;
pub use fornecedor_repo::PgFornecedorRepository;
pub mod memory;
pub use memory::InMemoryStore;
