use crate::detector::interface::Detection;
use opencv::core::{Mat, Point, Rect, Scalar};
use opencv::imgproc;

// BGR
const GREEN: (f64, f64, f64) = (0.0, 255.0, 0.0);
const BLUE: (f64, f64, f64) = (255.0, 0.0, 0.0);

fn color((b, g, r): (f64, f64, f64)) -> Scalar {
    Scalar::new(b, g, r, 0.0)
}

/// `"87.5% pothole"`, score as a percentage rounded to two places.
pub fn video_label(detection: &Detection) -> String {
    let percent = (detection.confidence as f64 * 100.0 * 100.0).round() / 100.0;
    format!("{}% {}", percent, detection.label)
}

pub fn image_label(detection: &Detection) -> String {
    format!("{:.2}", detection.confidence)
}

fn draw_box(frame: &mut Mat, detection: &Detection) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let b = detection.bbox;
    imgproc::rectangle(
        frame,
        Rect::new(b.x, b.y, b.width, b.height),
        color(GREEN),
        2,
        imgproc::LINE_8,
        0,
    )?;
    Ok(())
}

fn draw_text(
    frame: &mut Mat,
    text: &str,
    origin: Point,
    font: i32,
    scale: f64,
    bgr: (f64, f64, f64),
    thickness: i32,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    imgproc::put_text(
        frame,
        text,
        origin,
        font,
        scale,
        color(bgr),
        thickness,
        imgproc::LINE_8,
        false,
    )?;
    Ok(())
}

pub fn draw_video_detection(
    frame: &mut Mat,
    detection: &Detection,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    draw_box(frame, detection)?;
    draw_text(
        frame,
        &video_label(detection),
        Point::new(detection.bbox.x, detection.bbox.y - 10),
        imgproc::FONT_HERSHEY_COMPLEX,
        0.5,
        BLUE,
        1,
    )
}

pub fn draw_image_detection(
    frame: &mut Mat,
    detection: &Detection,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    draw_box(frame, detection)?;
    draw_text(
        frame,
        &image_label(detection),
        Point::new(detection.bbox.x, detection.bbox.y - 10),
        imgproc::FONT_HERSHEY_SIMPLEX,
        0.5,
        GREEN,
        2,
    )
}

pub fn draw_fps(frame: &mut Mat, fps: f64) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    draw_text(
        frame,
        &format!("FPS: {:.2}", fps),
        Point::new(20, 50),
        imgproc::FONT_HERSHEY_COMPLEX,
        0.7,
        GREEN,
        2,
    )
}
