use crate::config::PinConfig;

/// Number of pins in a triangular rack with `rows` rows.
pub fn rack_size(rows: u32) -> u32 {
    rows * (rows + 1) / 2
}

/// Pin centres for a full rack, head pin first.
///
/// Row `r` holds `r + 1` pins spread symmetrically around the lane centre,
/// each row one `row_gap` further from the foul line.
pub fn rack_positions(config: &PinConfig) -> Vec<[f32; 3]> {
    let head_z = -config.offset;
    let mut positions = Vec::with_capacity(rack_size(config.rows) as usize);
    for row in 0..config.rows {
        let z = head_z - config.row_gap * row as f32;
        for i in 0..=row {
            let x = config.col_gap * (2 * i) as f32 - config.col_gap * row as f32;
            positions.push([x, config.y, z]);
        }
    }
    positions
}

/// Whether a pin whose centre is at `height` has been knocked down.
pub fn is_pin_down(height: f32, config: &PinConfig) -> bool {
    height < config.fallen_y
}
