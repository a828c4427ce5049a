//! Ratatui widgets for the skuboard TUI.

pub mod command_bar;
pub mod comment_box;
pub mod filter_bar;
pub mod help;
pub mod sku_table;
pub mod tab_bar;
