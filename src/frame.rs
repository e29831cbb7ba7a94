use image::RgbImage;
use opencv::core::{Mat, Scalar, CV_8UC3};
use opencv::prelude::*;

/// OpenCV frames are BGR; everything handed to the detector or written through
/// `image` is RGB.
pub fn mat_to_rgb_image(mat: &Mat) -> Result<RgbImage, Box<dyn std::error::Error + Send + Sync>> {
    if mat.typ() != CV_8UC3 {
        return Err(format!("Unsupported frame type {}", mat.typ()).into());
    }

    let (width, height) = (mat.cols() as u32, mat.rows() as u32);

    let continuous;
    let source = if mat.is_continuous() {
        mat
    } else {
        continuous = mat.try_clone()?;
        &continuous
    };

    let bgr = source.data_bytes()?;
    let mut rgb = Vec::with_capacity(bgr.len());
    for pixel in bgr.chunks_exact(3) {
        rgb.extend_from_slice(&[pixel[2], pixel[1], pixel[0]]);
    }

    RgbImage::from_raw(width, height, rgb).ok_or_else(|| "Frame buffer size mismatch".into())
}

pub fn rgb_image_to_mat(image: &RgbImage) -> Result<Mat, Box<dyn std::error::Error + Send + Sync>> {
    let mut mat = Mat::new_rows_cols_with_default(
        image.height() as i32,
        image.width() as i32,
        CV_8UC3,
        Scalar::all(0.0),
    )?;

    let bgr = mat.data_bytes_mut()?;
    for (dst, src) in bgr.chunks_exact_mut(3).zip(image.as_raw().chunks_exact(3)) {
        dst[0] = src[2];
        dst[1] = src[1];
        dst[2] = src[0];
    }

    Ok(mat)
}

pub fn blank_frame(width: u32, height: u32) -> Result<Mat, Box<dyn std::error::Error + Send + Sync>> {
    Ok(Mat::new_rows_cols_with_default(
        height as i32,
        width as i32,
        CV_8UC3,
        Scalar::all(0.0),
    )?)
}
