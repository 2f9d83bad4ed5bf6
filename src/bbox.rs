use std::marker::PhantomData;

pub trait BBoxFormat: std::fmt::Debug {}

/// X-y-width-height format, contains coordinates of the center of bbox and width-height
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Xywh;
impl BBoxFormat for Xywh {}

/// Left-top-right-bottom format, contains left top and right bottom corners
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ltrb;
impl BBoxFormat for Ltrb {}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BBox<F: BBoxFormat>([f32; 4], PhantomData<F>);

impl<F: BBoxFormat> From<BBox<F>> for [f32; 4] {
    fn from(bbox: BBox<F>) -> Self {
        bbox.0
    }
}

impl<F: BBoxFormat> BBox<F> {
    #[inline]
    pub fn as_slice(&self) -> &[f32; 4] {
        &self.0
    }
}

impl BBox<Xywh> {
    #[inline]
    pub fn xywh(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        BBox([cx, cy, w, h], PhantomData)
    }

    #[inline(always)]
    pub fn cx(&self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn cy(&self) -> f32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn width(&self) -> f32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn height(&self) -> f32 {
        self.0[3]
    }

    #[inline(always)]
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    #[inline]
    pub fn as_ltrb(&self) -> BBox<Ltrb> {
        self.into()
    }
}

impl BBox<Ltrb> {
    #[inline]
    pub fn ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        BBox([left, top, right, bottom], PhantomData)
    }

    #[inline(always)]
    pub fn left(&self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn top(&self) -> f32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn right(&self) -> f32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn bottom(&self) -> f32 {
        self.0[3]
    }

    /// Integer pixel rectangle covered by this box inside a `width` x `height` image.
    ///
    /// Coordinates are truncated toward zero and then clamped to the image, so a box
    /// hanging over the border yields a smaller rect and a box fully outside yields
    /// an empty one. NaN coordinates collapse to zero.
    pub fn to_pixel_rect(&self, width: usize, height: usize) -> PixelRect {
        let clamp = |v: f32, max: usize| (v as i64).clamp(0, max as i64) as usize;

        let left = clamp(self.left(), width);
        let right = clamp(self.right(), width).max(left);
        let top = clamp(self.top(), height);
        let bottom = clamp(self.bottom(), height).max(top);

        PixelRect {
            left,
            top,
            right,
            bottom,
        }
    }
}

impl<'a> From<&'a BBox<Xywh>> for BBox<Ltrb> {
    #[inline]
    fn from(v: &'a BBox<Xywh>) -> Self {
        let hw = 0.5 * v.0[2];
        let hh = 0.5 * v.0[3];

        Self(
            [v.0[0] - hw, v.0[1] - hh, v.0[0] + hw, v.0[1] + hh],
            PhantomData,
        )
    }
}

/// Half-open pixel rectangle `[top, bottom) x [left, right)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

impl PixelRect {
    #[inline]
    pub fn width(&self) -> usize {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.bottom - self.top
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xywh_to_ltrb() {
        let b = BBox::xywh(10.0, 20.0, 4.0, 6.0).as_ltrb();
        assert_eq!(b.as_slice(), &[8.0, 17.0, 12.0, 23.0]);
    }

    #[test]
    fn rect_inside_image() {
        let r = BBox::xywh(10.0, 20.0, 4.0, 6.0)
            .as_ltrb()
            .to_pixel_rect(100, 100);

        assert_eq!(
            r,
            PixelRect {
                left: 8,
                top: 17,
                right: 12,
                bottom: 23
            }
        );
        assert_eq!(r.width(), 4);
        assert_eq!(r.height(), 6);
    }

    #[test]
    fn rect_clamped_at_border() {
        let r = BBox::xywh(98.0, 1.0, 10.0, 10.0)
            .as_ltrb()
            .to_pixel_rect(100, 50);

        assert_eq!(r.left, 93);
        assert_eq!(r.right, 100);
        assert_eq!(r.top, 0);
        assert_eq!(r.bottom, 6);
    }

    #[test]
    fn rect_outside_image_is_empty() {
        let r = BBox::xywh(500.0, 500.0, 10.0, 10.0)
            .as_ltrb()
            .to_pixel_rect(100, 100);
        assert!(r.is_empty());

        let r = BBox::xywh(-50.0, 10.0, 10.0, 10.0)
            .as_ltrb()
            .to_pixel_rect(100, 100);
        assert!(r.is_empty());
    }

    #[test]
    fn nan_box_is_empty() {
        let r = BBox::xywh(f32::NAN, 10.0, 10.0, 10.0)
            .as_ltrb()
            .to_pixel_rect(100, 100);
        assert!(r.is_empty());
    }
}
