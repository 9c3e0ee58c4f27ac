pub mod controller;
pub mod mapper;
pub mod router;
pub mod service;

pub use router::init_categories_router;
pub use service::CategoryService;
