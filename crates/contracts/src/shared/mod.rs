pub mod api;
pub mod hierarchy;
pub mod menu_tree;
