use crate::error::ClipboardError;

const FILE_HEADER_SIZE: usize = 14;
const INFO_HEADER_SIZE: usize = 40;
const BI_BITFIELDS: u32 = 3;

fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}

/// Convert a Windows DIB (CF_DIB / CF_DIBV5) to a BMP file by prepending the
/// 14-byte file header. The pixel offset accounts for the info header, any
/// BI_BITFIELDS masks and the colour table.
pub fn dib_to_bmp(dib: &[u8]) -> Result<Vec<u8>, ClipboardError> {
    if dib.len() < INFO_HEADER_SIZE {
        return Err(ClipboardError::Encode("DIB too small".to_string()));
    }

    let header_size = read_u32(dib, 0) as usize;
    if header_size < INFO_HEADER_SIZE || header_size > dib.len() {
        return Err(ClipboardError::Encode(format!(
            "invalid DIB header size {}",
            header_size
        )));
    }

    let bit_count = read_u16(dib, 14);
    let compression = read_u32(dib, 16);
    let colors_used = read_u32(dib, 32) as usize;

    let masks = if compression == BI_BITFIELDS && header_size == INFO_HEADER_SIZE {
        12
    } else {
        0
    };
    let palette_entries = match (bit_count, colors_used) {
        (1..=8, 0) => 1usize << bit_count,
        (_, used) => used,
    };

    let pixel_offset = FILE_HEADER_SIZE + header_size + masks + palette_entries * 4;
    let file_size = FILE_HEADER_SIZE + dib.len();

    let mut bmp = Vec::with_capacity(file_size);
    bmp.extend_from_slice(b"BM");
    bmp.extend_from_slice(&(file_size as u32).to_le_bytes());
    bmp.extend_from_slice(&[0; 4]);
    bmp.extend_from_slice(&(pixel_offset as u32).to_le_bytes());
    bmp.extend_from_slice(dib);

    Ok(bmp)
}
