pub mod codec;
pub mod domain;
pub mod dto;
pub mod field;
pub mod validator;
