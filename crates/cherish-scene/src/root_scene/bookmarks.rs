use super::{rejected, RootScene};
use crate::entities::{Bookmark, Bookmarks};
use crate::tools::{BookmarkTool, SceneComponent};
use cherish_core::{SceneError, SceneResult};
use glam::Vec3;

impl RootScene {
    pub fn bookmarks(&self) -> &Bookmarks {
        &self.bookmarks
    }

    pub fn bookmark_tools(&self) -> &[BookmarkTool] {
        &self.bookmark_tools
    }

    /// Save a camera view and add its marker. Returns the new row.
    pub fn add_bookmark(
        &mut self,
        name: impl Into<String>,
        eye: Vec3,
        center: Vec3,
        up: Vec3,
        fov: f32,
    ) -> usize {
        let bookmark = Bookmark::new(name, eye, center, up, fov);
        tracing::debug!("Adding bookmark '{}'", bookmark.name);
        let row = self.bookmarks.add(bookmark);
        self.add_bookmark_tool(eye, center, up);
        row
    }

    /// Add a marker without a bookmark entry.
    pub fn add_bookmark_tool(&mut self, eye: Vec3, center: Vec3, up: Vec3) {
        let mut tool = BookmarkTool::new(eye, center, up);
        tool.set_visibility(self.bookmark_tools_visible);
        self.bookmark_tools.push(tool);
    }

    /// Replace the pose at `row` and move its marker.
    pub fn update_bookmark(
        &mut self,
        row: usize,
        eye: Vec3,
        center: Vec3,
        up: Vec3,
        fov: f32,
    ) -> SceneResult<()> {
        self.bookmarks
            .update(row, eye, center, up, fov)
            .or_else(|e| rejected("Update bookmark", e))?;
        if let Some(tool) = self.bookmark_tools.get_mut(row) {
            tool.set_pose(eye, center, up);
        }
        Ok(())
    }

    pub fn rename_bookmark(&mut self, row: usize, name: impl Into<String>) -> SceneResult<()> {
        self.bookmarks
            .rename(row, name)
            .or_else(|e| rejected("Rename bookmark", e))
    }

    /// Remove a bookmark and its marker.
    pub fn delete_bookmark(&mut self, row: usize) -> SceneResult<Bookmark> {
        let removed = self
            .bookmarks
            .remove(row)
            .or_else(|e| rejected("Delete bookmark", e))?;
        if row < self.bookmark_tools.len() {
            self.bookmark_tools.remove(row);
        }
        Ok(removed)
    }

    /// Remove markers `[first, last)`.
    pub fn delete_bookmark_tools(&mut self, first: usize, last: usize) -> SceneResult<()> {
        let len = self.bookmark_tools.len();
        if first > last || last > len {
            return rejected(
                "Delete bookmark tools",
                SceneError::BookmarkIndex { index: last, len },
            );
        }
        self.bookmark_tools.drain(first..last);
        Ok(())
    }

    /// Drop all bookmarks and markers.
    pub fn reset_bookmarks(&mut self) {
        self.bookmarks.clear();
        self.bookmark_tools.clear();
    }

    /// Rebuild markers from the bookmark list.
    pub(crate) fn rebuild_bookmark_tools(&mut self) {
        self.bookmark_tools.clear();
        let poses: Vec<_> = self
            .bookmarks
            .iter()
            .map(|b| (b.eye, b.center, b.up))
            .collect();
        for (eye, center, up) in poses {
            self.add_bookmark_tool(eye, center, up);
        }
    }

    pub fn set_bookmark_tool_visibility(&mut self, visible: bool) {
        self.bookmark_tools_visible = visible;
        for tool in &mut self.bookmark_tools {
            tool.set_visibility(visible);
        }
    }

    pub fn bookmark_tool_visibility(&self) -> bool {
        self.bookmark_tools_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookmarks_mirror_tools() {
        let mut root = RootScene::default();
        root.add_bookmark("front", Vec3::Z * 5.0, Vec3::ZERO, Vec3::Y, 30.0);
        root.add_bookmark("side", Vec3::X * 5.0, Vec3::ZERO, Vec3::Y, 30.0);
        assert_eq!(root.bookmark_tools().len(), 2);

        root.update_bookmark(1, Vec3::X * 8.0, Vec3::ZERO, Vec3::Y, 45.0)
            .unwrap();
        assert_eq!(root.bookmarks().get(1).unwrap().fov, 45.0);

        let removed = root.delete_bookmark(0).unwrap();
        assert_eq!(removed.name, "front");
        assert_eq!(root.bookmark_tools().len(), 1);
        assert!(root.delete_bookmark(3).is_err());

        root.reset_bookmarks();
        assert!(root.bookmarks().is_empty());
        assert!(root.bookmark_tools().is_empty());
    }

    #[test]
    fn test_delete_tool_range() {
        let mut root = RootScene::default();
        for _ in 0..4 {
            root.add_bookmark_tool(Vec3::Z, Vec3::ZERO, Vec3::Y);
        }
        root.delete_bookmark_tools(1, 3).unwrap();
        assert_eq!(root.bookmark_tools().len(), 2);
        assert!(root.delete_bookmark_tools(1, 5).is_err());
    }

    #[test]
    fn test_tool_visibility() {
        let mut root = RootScene::default();
        root.set_bookmark_tool_visibility(false);
        root.add_bookmark("a", Vec3::Z, Vec3::ZERO, Vec3::Y, 30.0);
        assert!(!root.bookmark_tools()[0].visibility());
    }
}
