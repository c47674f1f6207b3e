//! # lsb_veil 库
//!
//! 本库包含蓝色通道 LSB 隐写编解码器的核心逻辑。

// 声明库包含的所有模块。

pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod pixel;
pub mod steganography;
