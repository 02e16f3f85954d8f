use crate::camera::Camera;
use cherish_core::{SceneError, SceneResult};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Named camera pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub name: String,
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
}

impl Bookmark {
    pub fn new(name: impl Into<String>, eye: Vec3, center: Vec3, up: Vec3, fov: f32) -> Self {
        Self {
            name: name.into(),
            eye,
            center,
            up,
            fov,
        }
    }

    /// Camera restoring this view for a viewport aspect ratio.
    pub fn camera(&self, aspect: f32) -> Camera {
        Camera::new(self.eye, self.center, self.up, self.fov, aspect)
    }
}

/// Ordered list of bookmarks, addressed by row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bookmarks {
    items: Vec<Bookmark>,
}

impl Bookmarks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(items: Vec<Bookmark>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bookmark> {
        self.items.iter()
    }

    pub fn get(&self, row: usize) -> Option<&Bookmark> {
        self.items.get(row)
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|b| b.name.as_str()).collect()
    }

    pub fn add(&mut self, bookmark: Bookmark) -> usize {
        self.items.push(bookmark);
        self.items.len() - 1
    }

    /// Replace the pose at `row`, keeping its name.
    pub fn update(&mut self, row: usize, eye: Vec3, center: Vec3, up: Vec3, fov: f32) -> SceneResult<()> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(row)
            .ok_or(SceneError::BookmarkIndex { index: row, len })?;
        item.eye = eye;
        item.center = center;
        item.up = up;
        item.fov = fov;
        Ok(())
    }

    pub fn rename(&mut self, row: usize, name: impl Into<String>) -> SceneResult<()> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(row)
            .ok_or(SceneError::BookmarkIndex { index: row, len })?;
        item.name = name.into();
        Ok(())
    }

    pub fn remove(&mut self, row: usize) -> SceneResult<Bookmark> {
        if row >= self.items.len() {
            return Err(SceneError::BookmarkIndex {
                index: row,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(row))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn to_vec(&self) -> Vec<Bookmark> {
        self.items.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows() {
        let mut bookmarks = Bookmarks::new();
        let row = bookmarks.add(Bookmark::new("front", Vec3::Z, Vec3::ZERO, Vec3::Y, 30.0));
        assert_eq!(row, 0);
        bookmarks
            .update(0, Vec3::X, Vec3::ZERO, Vec3::Y, 45.0)
            .unwrap();
        assert_eq!(bookmarks.get(0).unwrap().eye, Vec3::X);
        assert_eq!(bookmarks.get(0).unwrap().name, "front");
        assert!(matches!(
            bookmarks.remove(3),
            Err(SceneError::BookmarkIndex { index: 3, len: 1 })
        ));
        assert_eq!(bookmarks.remove(0).unwrap().name, "front");
        assert!(bookmarks.is_empty());
    }
}
