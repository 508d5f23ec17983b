pub mod drop_zone;
