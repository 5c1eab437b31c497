use image::imageops::{self, FilterType};
use ndarray::Array4;
use thiserror::Error;

/// Side length of the square input the model was trained on.
pub const INPUT_SIZE: u32 = 224;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct ImageDecodeError(#[from] image::ImageError);

/// A single RGB image shaped `[1, INPUT_SIZE, INPUT_SIZE, 3]`, values in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor(Array4<f32>);

impl Tensor {
    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }

    /// Nested `batch -> row -> column -> channel` vectors, the layout the
    /// serving endpoint expects under `inputs`.
    pub fn to_nested(&self) -> Vec<Vec<Vec<Vec<f32>>>> {
        self.0
            .outer_iter()
            .map(|image| {
                image
                    .outer_iter()
                    .map(|row| row.outer_iter().map(|pixel| pixel.to_vec()).collect())
                    .collect()
            })
            .collect()
    }
}

pub fn preprocess(bytes: &[u8]) -> Result<Tensor, ImageDecodeError> {
    let rgb = image::load_from_memory(bytes)?.to_rgb8();
    // CatmullRom is the bicubic kernel, which is what the training pipeline resized with.
    let resized = imageops::resize(&rgb, INPUT_SIZE, INPUT_SIZE, FilterType::CatmullRom);

    let size = INPUT_SIZE as usize;
    let tensor = Array4::from_shape_fn((1, size, size, 3), |(_, y, x, c)| {
        resized[(x as u32, y as u32)][c] as f32 / 255.0
    });

    Ok(Tensor(tensor))
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Cursor;

    use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage, Rgba, RgbaImage};

    use super::*;

    pub(crate) fn encode(image: &DynamicImage, format: ImageOutputFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        image.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    pub(crate) fn gradient_png(width: u32, height: u32) -> Vec<u8> {
        let image = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        encode(&DynamicImage::ImageRgb8(image), ImageOutputFormat::Png)
    }

    fn assert_normalized(tensor: &Tensor) {
        assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
        assert!(tensor.0.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn shapes_any_input_size() {
        for (width, height) in [(1, 1), (50, 300), (640, 480), (224, 224)] {
            let tensor = preprocess(&gradient_png(width, height)).unwrap();
            assert_normalized(&tensor);
        }
    }

    #[test]
    fn jpeg_input() {
        let image = RgbImage::from_pixel(320, 240, Rgb([10, 200, 30]));
        let bytes = encode(&DynamicImage::ImageRgb8(image), ImageOutputFormat::Jpeg(90));
        assert_normalized(&preprocess(&bytes).unwrap());
    }

    #[test]
    fn drops_alpha_channel() {
        let image = RgbaImage::from_pixel(64, 64, Rgba([255, 0, 0, 0]));
        let bytes = encode(&DynamicImage::ImageRgba8(image), ImageOutputFormat::Png);
        let tensor = preprocess(&bytes).unwrap();
        assert_normalized(&tensor);
        assert!(tensor.0[[0, 10, 10, 0]] >= 254.0 / 255.0);
        assert!(tensor.0[[0, 10, 10, 1]] <= 1.0 / 255.0);
    }

    #[test]
    fn expands_grayscale() {
        let image = image::GrayImage::from_pixel(30, 30, image::Luma([51]));
        let bytes = encode(&DynamicImage::ImageLuma8(image), ImageOutputFormat::Png);
        let tensor = preprocess(&bytes).unwrap();
        let pixel = tensor.0.slice(ndarray::s![0, 5, 5, ..]).to_vec();
        for channel in pixel {
            assert!((channel - 0.2).abs() <= 1.0 / 255.0);
        }
    }

    #[test]
    fn deterministic() {
        let bytes = gradient_png(300, 200);
        assert_eq!(preprocess(&bytes).unwrap(), preprocess(&bytes).unwrap());
    }

    #[test]
    fn nested_layout_matches_shape() {
        let tensor = preprocess(&gradient_png(10, 10)).unwrap();
        let nested = tensor.to_nested();
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].len(), 224);
        assert_eq!(nested[0][0].len(), 224);
        assert_eq!(nested[0][0][0].len(), 3);
        assert_eq!(nested[0][7][3][2], tensor.0[[0, 7, 3, 2]]);
    }

    #[test]
    fn rejects_truncated_bytes() {
        let bytes = gradient_png(64, 64);
        assert!(preprocess(&bytes[..bytes.len() / 3]).is_err());
        assert!(preprocess(b"definitely not an image").is_err());
    }
}
