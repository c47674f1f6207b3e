//! # 错误类型模块
//!
//! 编解码器的所有失败都以类型化的 [`StegoError`] 返回给调用者，
//! 绝不在核心层中断进程或打印输出。

use std::string::FromUtf8Error;

/// 隐写编码或解码可能产生的错误。
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum StegoError {
    #[error("message needs {required} bytes but the image can only hold {available}")]
    CapacityExceeded { required: usize, available: usize },

    #[error("the image ends before the embedded data does")]
    TruncatedImage,

    #[error("the embedded length prefix is not a positive value")]
    InvalidLength,

    #[error("the embedded length of {declared} bytes exceeds the image capacity of {capacity} bytes")]
    LengthExceedsCapacity { declared: usize, capacity: usize },

    #[error("the embedded payload is not valid UTF-8")]
    InvalidEncoding(#[from] FromUtf8Error),

    #[error("the embedded payload is empty")]
    EmptyMessage,
}
