/// 长度前缀所占的字节数。
/// 负载长度以小端序 `u32` 形式嵌入，占用 4 字节 (32 bits)，
/// 因此解码时先要读出 32 个像素才能得到负载长度。
pub const LENGTH_PREFIX_BYTES: usize = 4;

/// 负载结尾的固定标记。
/// 解码时与负载之后的 3 个字节比对，用于检测图像是否被篡改。
pub const END_MARKER: [u8; 3] = *b"END";

/// 每个像素承载的负载位数。
/// 只使用蓝色通道的最低有效位，对颜色深度转换最不敏感。
pub const BITS_PER_PIXEL: usize = 1;
