pub mod cart;
pub mod concert;
pub mod order;
pub mod ticket;
pub mod venue;
