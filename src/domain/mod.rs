pub mod product;
pub mod line_item;
pub mod sale;

pub use product::*;
pub use line_item::*;
pub use sale::*;
