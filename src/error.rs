//! # 错误类型模块
//!
//! 定义核心隐写算法的所有失败类型。
//! I/O 层的错误 (文件不可读、格式不支持等) 不在此处定义，
//! 由 `handler` 模块通过 `anyhow` 附加上下文后原样传播。

use thiserror::Error;

/// 核心编码/解码操作的错误类型。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StegoError {
    /// 消息的比特流长度超过了图像的可用采样数。
    /// 在任何写入发生之前返回，缓冲区保持原样。
    #[error("the message needs {required} bits but the image only holds {available}")]
    InsufficientCapacity { required: usize, available: usize },

    /// 图像采样的最低有效位中不存在哨兵序列，
    /// 或哨兵匹配位置之前的载荷无法构成完整字符。
    #[error("no hidden message was found in the image")]
    NoHiddenMessage,

    /// 比特流长度不是 8 的整数倍，无法按字符分组。
    #[error("bitstream of {len} bits cannot be split into whole characters")]
    MalformedBitstream { len: usize },

    /// 字符的码点超出 8 位范围 (0-255)，无法隐写。
    #[error("character {0:?} does not fit in a single byte")]
    UnsupportedCharacter(char),
}
