pub mod contas;
pub mod fornecedores;
