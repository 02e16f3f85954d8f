#[path = "io/photos.rs"]
mod photos;
#[path = "io/scene_file.rs"]
mod scene_file;
