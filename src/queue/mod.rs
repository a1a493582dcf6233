pub mod order;
pub mod heap;
pub mod emergency;
