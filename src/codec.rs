//! # 比特编解码模块
//!
//! 负责文本与扁平比特序列之间的无损、保序转换。
//! 每个字符展开为 8 bits，最高有效位在前；比特序列中每个元素取值 0 或 1。

use crate::constants::BITS_PER_CHAR;
use crate::error::StegoError;

/// 将消息文本转换为比特序列。
///
/// 每个字符的码点按无符号 8 位整数展开，零填充到 8 bits，
/// 最高有效位在前，并按消息顺序连接。
///
/// # Errors
///
/// 如果任何字符的码点超出 0-255 范围，返回 [`StegoError::UnsupportedCharacter`]。
pub fn text_to_bits(message: &str) -> Result<Vec<u8>, StegoError> {
    let mut bits = Vec::with_capacity(message.len() * BITS_PER_CHAR);

    for ch in message.chars() {
        let code = u32::from(ch);
        if code > u32::from(u8::MAX) {
            return Err(StegoError::UnsupportedCharacter(ch));
        }

        for shift in (0..BITS_PER_CHAR).rev() {
            bits.push(((code >> shift) & 1) as u8);
        }
    }

    Ok(bits)
}

/// 将比特序列还原为消息文本。
///
/// 比特序列按连续 8 bits 分组，每组解释为无符号 8 位大端整数，
/// 并映射为对应码点的字符。
///
/// # Errors
///
/// 如果比特序列长度不是 8 的整数倍，返回 [`StegoError::MalformedBitstream`]。
/// 本库的调用方只会传入完整分组的序列，该检查属于内部不变量校验。
pub fn bits_to_text(bits: &[u8]) -> Result<String, StegoError> {
    if bits.len() % BITS_PER_CHAR != 0 {
        return Err(StegoError::MalformedBitstream { len: bits.len() });
    }

    let text = bits
        .chunks_exact(BITS_PER_CHAR)
        .map(|group| {
            let code = group.iter().fold(0u8, |acc, &bit| (acc << 1) | bit);
            char::from(code)
        })
        .collect();

    Ok(text)
}
