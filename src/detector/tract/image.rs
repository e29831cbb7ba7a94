use image::{imageops, DynamicImage};
use tract_onnx::prelude::*;

/// Stretches the image to the model input and packs it as an NCHW tensor of
/// RGB values scaled to [0, 1]. No letterboxing, so boxes map back by plain scaling.
pub fn image_to_tensor(
    image: &DynamicImage,
    width: u32,
    height: u32,
) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
    if width == 0 || height == 0 {
        return Err("Model input size must be non-zero".into());
    }

    let resized = image.resize_exact(width, height, imageops::FilterType::Triangle);
    let rgb = resized.to_rgb8();

    let tensor = tract_ndarray::Array4::from_shape_fn(
        (1, 3, height as usize, width as usize),
        |(_, c, y, x)| {
            let pixel = rgb.get_pixel(x as u32, y as u32);
            pixel[c] as f32 / 255.0
        },
    );

    Ok(tensor.into_tensor())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, Rgb};

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        let mut img = ImageBuffer::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = Rgb(color);
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_tensor_shape_is_nchw() {
        let tensor = image_to_tensor(&solid(100, 50, [255, 0, 0]), 640, 480).unwrap();
        assert_eq!(tensor.shape(), &[1, 3, 480, 640]);
    }

    #[test]
    fn test_channels_keep_rgb_order() {
        let tensor = image_to_tensor(&solid(100, 100, [255, 0, 0]), 64, 48).unwrap();
        let slice = tensor.as_slice::<f32>().unwrap();

        assert_eq!(slice[0], 1.0);
        assert_eq!(slice[64 * 48], 0.0);
        assert_eq!(slice[2 * 64 * 48], 0.0);
    }

    #[test]
    fn test_values_are_scaled() {
        let tensor = image_to_tensor(&solid(10, 10, [128, 128, 128]), 8, 8).unwrap();
        let slice = tensor.as_slice::<f32>().unwrap();

        let expected = 128.0 / 255.0;
        assert!((slice[0] - expected).abs() < 0.0001);
        assert!((slice[8 * 8 + 3] - expected).abs() < 0.0001);
    }

    #[test]
    fn test_zero_size_is_rejected() {
        assert!(image_to_tensor(&solid(10, 10, [0, 0, 0]), 0, 10).is_err());
    }
}
