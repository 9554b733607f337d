//! Shelter Intake
//!
//! 保護動物入所データの読み込み・前処理・出力。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod pipeline;
pub mod selector;
