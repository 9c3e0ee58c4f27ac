pub mod controller;
pub mod mapper;
pub mod router;
pub mod service;

pub use router::init_products_router;
pub use service::ProductService;
