use core::convert::Infallible;

use embedded_graphics_core::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::BinaryColor,
};

use crate::matrix::{Matrix8x8, SIZE};

impl DrawTarget for Matrix8x8 {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }

            let _ = self.set(point.x as usize, point.y as usize, color.is_on());
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        *self = if color.is_on() {
            Matrix8x8::filled()
        } else {
            Matrix8x8::empty()
        };
        Ok(())
    }
}

impl OriginDimensions for Matrix8x8 {
    fn size(&self) -> Size {
        Size::new(SIZE as u32, SIZE as u32)
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics_core::geometry::Point;

    use super::*;

    #[test]
    fn pixels_outside_matrix_are_dropped() {
        let mut matrix = Matrix8x8::empty();
        let pixels = [
            Pixel(Point::new(1, 2), BinaryColor::On),
            Pixel(Point::new(-1, 0), BinaryColor::On),
            Pixel(Point::new(8, 0), BinaryColor::On),
        ];

        matrix.draw_iter(pixels).unwrap();

        assert_eq!(matrix.lit_count(), 1);
        assert_eq!(matrix.get(1, 2), Some(true));
        assert_eq!(matrix.size(), Size::new(8, 8));
    }

    #[test]
    fn clear_fills_with_color() {
        let mut matrix = Matrix8x8::empty();
        matrix.clear(BinaryColor::On).unwrap();
        assert_eq!(matrix, Matrix8x8::filled());
    }
}
