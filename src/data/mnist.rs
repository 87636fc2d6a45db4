//! MNIST IDX reader.
//!
//! The headers are skipped rather than interpreted: the caller states how
//! many samples to read and how long each image is. Pixels are scaled into
//! [0.01, 1.0] and labels become one-hot vectors of 0.01 / 0.99 so that no
//! sigmoid target ever sits at an asymptote.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};

/// Four big-endian i32s: magic, count, rows, cols.
pub const IMAGE_HEADER_LEN: usize = 16;
/// Two big-endian i32s: magic, count.
pub const LABEL_HEADER_LEN: usize = 8;

pub const TARGET_ON: f64 = 0.99;
pub const TARGET_OFF: f64 = 0.01;

/// Maps a raw byte to `byte / 255 × 0.99 + 0.01`.
pub fn normalize_pixel(byte: u8) -> f64 {
    byte as f64 / 255.0 * 0.99 + 0.01
}

/// One-hot target vector: 0.99 at `class`, 0.01 elsewhere.
pub fn one_hot(class: usize, classes: usize) -> Vec<f64> {
    let mut target = vec![TARGET_OFF; classes];
    if let Some(slot) = target.get_mut(class) {
        *slot = TARGET_ON;
    }
    target
}

/// Reads `count` images of `pixels_per_image` bytes after the image header.
pub fn read_images<R: Read>(
    reader: &mut R,
    count: usize,
    pixels_per_image: usize,
) -> Result<Vec<Vec<f64>>> {
    skip(reader, IMAGE_HEADER_LEN)?;

    let len = count.checked_mul(pixels_per_image).ok_or_else(|| {
        Error::InvalidConfig(format!("{count} images of {pixels_per_image} pixels overflow"))
    })?;
    let mut bytes = vec![0u8; len];
    reader.read_exact(&mut bytes)?;

    if pixels_per_image == 0 {
        return Ok(vec![Vec::new(); count]);
    }
    Ok(bytes
        .chunks_exact(pixels_per_image)
        .map(|chunk| chunk.iter().map(|&px| normalize_pixel(px)).collect())
        .collect())
}

/// Reads `count` labels after the label header. Returns the one-hot targets
/// and the raw class indexes.
pub fn read_labels<R: Read>(
    reader: &mut R,
    count: usize,
    classes: usize,
) -> Result<(Vec<Vec<f64>>, Vec<usize>)> {
    skip(reader, LABEL_HEADER_LEN)?;

    let mut bytes = vec![0u8; count];
    reader.read_exact(&mut bytes)?;

    let mut targets = Vec::with_capacity(count);
    let mut indexes = Vec::with_capacity(count);
    for (index, &label) in bytes.iter().enumerate() {
        let class = label as usize;
        if class >= classes {
            return Err(Error::InvalidLabel { index, label, classes });
        }
        targets.push(one_hot(class, classes));
        indexes.push(class);
    }
    Ok((targets, indexes))
}

fn skip<R: Read>(reader: &mut R, len: usize) -> Result<()> {
    let mut header = vec![0u8; len];
    reader.read_exact(&mut header)?;
    Ok(())
}

/// Normalized MNIST samples held in memory.
#[derive(Debug, Clone, Default)]
pub struct MnistDataset {
    pub pixels: Vec<Vec<f64>>,
    pub targets: Vec<Vec<f64>>,
    pub label_indexes: Vec<usize>,
}

impl MnistDataset {
    /// Loads the first `count` samples from an IDX3 image file and its IDX1
    /// label file.
    ///
    /// # Arguments
    /// - `images_path`:      IDX3 image file
    /// - `labels_path`:      IDX1 label file with at least `count` labels
    /// - `count`:            number of samples to read from the start of both files
    /// - `pixels_per_image`: bytes per image, 784 for 28×28 MNIST
    /// - `classes`:          length of each one-hot target; larger labels are an error
    pub fn load(
        images_path: impl AsRef<Path>,
        labels_path: impl AsRef<Path>,
        count: usize,
        pixels_per_image: usize,
        classes: usize,
    ) -> Result<MnistDataset> {
        let images_path = images_path.as_ref();
        let labels_path = labels_path.as_ref();

        let pixels = {
            let mut reader = BufReader::new(File::open(images_path)?);
            read_images(&mut reader, count, pixels_per_image)?
        };
        let (targets, label_indexes) = {
            let mut reader = BufReader::new(File::open(labels_path)?);
            read_labels(&mut reader, count, classes)?
        };

        log::info!(
            "loaded {} samples from {} and {}",
            count,
            images_path.display(),
            labels_path.display()
        );
        Ok(MnistDataset { pixels, targets, label_indexes })
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}
