pub mod customer;
pub mod envelope;
pub mod order;
pub mod product;
