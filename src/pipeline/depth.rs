/// Row-major grid of the nearest depth seen per pixel. Smaller is nearer.
#[derive(Debug, Clone)]
pub struct DepthBuffer {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![f32::INFINITY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reallocates for new dimensions. Contents are reset.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.data = vec![f32::INFINITY; width * height];
    }

    pub fn reset(&mut self) {
        self.data.fill(f32::INFINITY);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        (x < self.width && y < self.height).then(|| self.data[x + y * self.width])
    }

    /// Stores `depth` at (x, y) if it is strictly nearer than what is there.
    /// Returns whether the caller should write the pixel.
    pub fn test_and_set(&mut self, x: usize, y: usize, depth: f32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = x + y * self.width;
        if depth < self.data[index] {
            self.data[index] = depth;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strictly_nearer_wins() {
        let mut depth = DepthBuffer::new(4, 4);
        assert!(depth.test_and_set(1, 2, 0.8));
        assert!(depth.test_and_set(1, 2, 0.2));
        assert!(!depth.test_and_set(1, 2, 0.2));
        assert!(!depth.test_and_set(1, 2, 0.5));
        assert_eq!(depth.get(1, 2), Some(0.2));
    }

    #[test]
    fn reset_and_resize() {
        let mut depth = DepthBuffer::new(2, 2);
        depth.test_and_set(0, 0, 1.0);
        depth.reset();
        assert_eq!(depth.get(0, 0), Some(f32::INFINITY));

        depth.resize(3, 5);
        assert_eq!((depth.width(), depth.height()), (3, 5));
        assert_eq!(depth.get(2, 4), Some(f32::INFINITY));
        assert_eq!(depth.get(3, 0), None);

        depth.resize(0, 0);
        assert!(!depth.test_and_set(0, 0, 0.0));
    }
}
