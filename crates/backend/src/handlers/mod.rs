pub mod a001_menu;
pub mod a002_category;
pub mod a003_sub_category;
pub mod a004_product;
pub mod a005_offer;
pub mod catalog;
pub mod error;
pub mod state;
