use serde_derive::{Deserialize, Serialize};

use crate::bbox::{BBox, Xywh};

/// One tracked object of the current frame.
///
/// Contains (x,y) of the center and (width,height) of bbox, in image pixels
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Track {
    #[inline]
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline(always)]
    pub fn bbox(&self) -> BBox<Xywh> {
        BBox::xywh(self.x, self.y, self.w, self.h)
    }

    #[inline(always)]
    pub fn xmax(&self) -> f32 {
        self.x + self.w / 2.
    }

    #[inline(always)]
    pub fn ymax(&self) -> f32 {
        self.y + self.h / 2.
    }

    #[inline(always)]
    pub fn xmin(&self) -> f32 {
        self.x - self.w / 2.
    }

    #[inline(always)]
    pub fn ymin(&self) -> f32 {
        self.y - self.h / 2.
    }
}

impl From<[f32; 4]> for Track {
    fn from([x, y, w, h]: [f32; 4]) -> Self {
        Self { x, y, w, h }
    }
}

#[cfg(test)]
mod tests {
    use super::Track;

    #[test]
    fn extents() {
        let t = Track::new(50.0, 40.0, 20.0, 10.0);
        assert_eq!(t.xmin(), 40.0);
        assert_eq!(t.xmax(), 60.0);
        assert_eq!(t.ymin(), 35.0);
        assert_eq!(t.ymax(), 45.0);
        assert_eq!(t.bbox().area(), 200.0);
    }

    #[test]
    fn deserialize_from_host_record() {
        let t: Track = serde_json::from_str(r#"{"x": 1.5, "y": 2.0, "w": 3.0, "h": 4.0}"#).unwrap();
        assert_eq!(t, Track::from([1.5, 2.0, 3.0, 4.0]));
    }
}
