use image::{GrayImage, Luma, RgbImage};
use imageproc::point::Point;
use ndarray::Array2;

use crate::Region;

const GAUSSIAN_5X5_1D: [f64; 5] = [0.120076, 0.233880, 0.292088, 0.233880, 0.120076];

pub fn rgb_to_gray(image: &RgbImage) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut gray = GrayImage::new(width, height);

    for (x, y, pixel) in image.enumerate_pixels() {
        let lum =
            (0.299 * pixel[0] as f64 + 0.587 * pixel[1] as f64 + 0.114 * pixel[2] as f64) as u8;
        gray.put_pixel(x, y, Luma([lum]));
    }

    gray
}

pub fn gray_to_array(image: &GrayImage) -> Array2<f64> {
    let (width, height) = image.dimensions();
    let mut arr = Array2::zeros((height as usize, width as usize));

    for (x, y, pixel) in image.enumerate_pixels() {
        arr[[y as usize, x as usize]] = pixel[0] as f64;
    }

    arr
}

pub fn array_to_gray(arr: &Array2<f64>) -> GrayImage {
    let (height, width) = arr.dim();
    let mut image = GrayImage::new(width as u32, height as u32);

    for y in 0..height {
        for x in 0..width {
            let value = arr[[y, x]].clamp(0.0, 255.0) as u8;
            image.put_pixel(x as u32, y as u32, Luma([value]));
        }
    }

    image
}

// Separable 5x5 pass with replicated borders, so flat images blur to themselves.
pub fn gaussian_blur_5x5(arr: &Array2<f64>) -> Array2<f64> {
    let (height, width) = arr.dim();
    let mut horizontal = Array2::zeros((height, width));
    let mut result = Array2::zeros((height, width));

    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0;
            for (k, weight) in GAUSSIAN_5X5_1D.iter().enumerate() {
                let sx = (x as i64 + k as i64 - 2).clamp(0, width as i64 - 1) as usize;
                sum += arr[[y, sx]] * weight;
            }
            horizontal[[y, x]] = sum;
        }
    }

    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0;
            for (k, weight) in GAUSSIAN_5X5_1D.iter().enumerate() {
                let sy = (y as i64 + k as i64 - 2).clamp(0, height as i64 - 1) as usize;
                sum += horizontal[[sy, x]] * weight;
            }
            result[[y, x]] = sum;
        }
    }

    result
}

pub fn sobel_magnitude(gray: &GrayImage) -> Array2<f64> {
    let (width, height) = gray.dimensions();
    let mut magnitude = Array2::zeros((height as usize, width as usize));

    for y in 0..height {
        for x in 0..width {
            let gx = sobel_x(gray, x, y);
            let gy = sobel_y(gray, x, y);
            magnitude[[y as usize, x as usize]] = (gx * gx + gy * gy).sqrt();
        }
    }

    magnitude
}

fn sobel_x(gray: &GrayImage, x: u32, y: u32) -> f64 {
    let get_pixel = |dx: i32, dy: i32| -> f64 {
        let px = (x as i32 + dx).max(0) as u32;
        let py = (y as i32 + dy).max(0) as u32;
        gray.get_pixel(px.min(gray.width() - 1), py.min(gray.height() - 1))[0] as f64
    };

    -get_pixel(-1, -1) - 2.0 * get_pixel(-1, 0) - get_pixel(-1, 1)
        + get_pixel(1, -1)
        + 2.0 * get_pixel(1, 0)
        + get_pixel(1, 1)
}

fn sobel_y(gray: &GrayImage, x: u32, y: u32) -> f64 {
    let get_pixel = |dx: i32, dy: i32| -> f64 {
        let px = (x as i32 + dx).max(0) as u32;
        let py = (y as i32 + dy).max(0) as u32;
        gray.get_pixel(px.min(gray.width() - 1), py.min(gray.height() - 1))[0] as f64
    };

    -get_pixel(-1, -1) - 2.0 * get_pixel(0, -1) - get_pixel(1, -1)
        + get_pixel(-1, 1)
        + 2.0 * get_pixel(0, 1)
        + get_pixel(1, 1)
}

pub fn normalize_to_u8(arr: &Array2<f64>) -> Array2<f64> {
    let min = arr.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = arr.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range < 1e-10 {
        Array2::zeros(arr.dim())
    } else {
        arr.mapv(|v| ((v - min) / range) * 255.0)
    }
}

// Shoelace over the traced border, matching polygon contour area rather than
// component pixel count.
pub fn contour_area(points: &[Point<u32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut doubled = 0i64;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        doubled += a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64;
    }

    doubled.abs() as f64 / 2.0
}

pub fn contour_region(points: &[Point<u32>], width: u32, height: u32) -> Option<Region> {
    if points.is_empty() || width == 0 || height == 0 {
        return None;
    }

    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    let max_x = max_x.min(width - 1);
    let max_y = max_y.min(height - 1);
    if min_x > max_x || min_y > max_y {
        return None;
    }

    Some(Region {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_image_blurs_to_itself() {
        let arr = Array2::from_elem((32, 32), 128.0);
        let blurred = gaussian_blur_5x5(&arr);

        for value in blurred.iter() {
            assert!((value - 128.0).abs() < 0.01);
        }
    }

    #[test]
    fn normalize_flat_array_is_zero() {
        let arr = Array2::from_elem((8, 8), 42.0);
        let normalized = normalize_to_u8(&arr);
        assert!(normalized.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn normalize_spans_full_range() {
        let mut arr = Array2::zeros((2, 2));
        arr[[0, 0]] = 10.0;
        arr[[1, 1]] = 20.0;
        let normalized = normalize_to_u8(&arr);

        assert_eq!(normalized[[0, 0]], 0.0);
        assert_eq!(normalized[[1, 1]], 255.0);
    }

    #[test]
    fn shoelace_area_of_square() {
        let points = vec![
            Point::new(0u32, 0u32),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ];
        assert_eq!(contour_area(&points), 100.0);
    }

    #[test]
    fn contour_region_bounds_points() {
        let points = vec![Point::new(3u32, 4u32), Point::new(7, 9)];
        let region = contour_region(&points, 100, 100).unwrap();

        assert_eq!(region.x, 3);
        assert_eq!(region.y, 4);
        assert_eq!(region.width, 5);
        assert_eq!(region.height, 6);
    }
}
