pub mod subscription;
pub mod system;
