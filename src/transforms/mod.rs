pub mod normalize;
pub mod transpose;

use crate::types::song::Song;

pub struct TransformDescriptor {
    pub normalize: bool,
    pub transpose_amount: i32,
}

impl Default for TransformDescriptor {
    fn default() -> Self {
        Self {
            normalize: true,
            transpose_amount: 0,
        }
    }
}

pub fn apply_transforms(song: &Song, transforms: &TransformDescriptor) -> Song {
    let mut current = song.clone();

    // order is important here

    if transforms.normalize {
        current = normalize::transform(&current);
    }

    if transforms.transpose_amount != 0 {
        current = transpose::transform(&current, transforms.transpose_amount);
    }

    current
}
