pub mod conta;
pub mod fornecedor;
